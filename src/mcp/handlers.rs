//! Per-tool handlers.
//!
//! Each handler parses its arguments into a typed struct (validated at
//! construction), builds the upstream request, sends it, and formats the
//! response. Every failure after startup is rendered into the textual tool
//! result: a bad argument or an upstream error never becomes a protocol
//! fault and never crashes the process.

use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;

use super::tools::ToolHandler;
use crate::models::{ChatRequest, ContentPart, ContextSize, Message, RecencyFilter, SonarModel};
use crate::sonar::{format_response, FormatOptions, FormatSections, SonarClient};
use crate::utils::text::truncate_chars;
use crate::utils::validate::{
    self, ValidationError, MAX_QUERY_CHARS, MAX_QUICK_QUERY_CHARS,
};

// ===== Argument extraction helpers =====

/// Get an optional string argument, rejecting non-string values
fn opt_str<'a>(args: &'a Value, key: &'static str) -> Result<Option<&'a str>, ValidationError> {
    match args.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.as_str())),
        Some(_) => Err(ValidationError::WrongType {
            field: key,
            expected: "string",
        }),
    }
}

/// Get a required, non-blank string argument
fn required_str<'a>(args: &'a Value, key: &'static str) -> Result<&'a str, ValidationError> {
    match opt_str(args, key)? {
        Some(s) if !s.trim().is_empty() => Ok(s),
        _ => Err(ValidationError::MissingField(key)),
    }
}

/// Get an optional string-array argument
fn opt_str_list(args: &Value, key: &'static str) -> Result<Vec<String>, ValidationError> {
    match args.get(key) {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::Array(items)) => items
            .iter()
            .map(|v| match v {
                Value::String(s) => Ok(s.clone()),
                _ => Err(ValidationError::WrongType {
                    field: key,
                    expected: "array of strings",
                }),
            })
            .collect(),
        Some(_) => Err(ValidationError::WrongType {
            field: key,
            expected: "array of strings",
        }),
    }
}

/// Get an optional boolean argument
fn opt_bool(args: &Value, key: &'static str, default: bool) -> Result<bool, ValidationError> {
    match args.get(key) {
        None | Some(Value::Null) => Ok(default),
        Some(Value::Bool(b)) => Ok(*b),
        Some(_) => Err(ValidationError::WrongType {
            field: key,
            expected: "boolean",
        }),
    }
}

/// Render a tool result; failures become the result text
fn text_result(text: String) -> Result<Value, String> {
    Ok(Value::String(text))
}

/// Run the common send-and-format tail shared by every networked tool
async fn call_upstream(
    client: &SonarClient,
    request: &ChatRequest,
    timeout: Duration,
    opts: &FormatOptions,
) -> Result<Value, String> {
    match client.send(request, timeout).await {
        Ok(response) => text_result(format_response(&response, request, opts)),
        Err(e) => {
            tracing::warn!(error = %e, "upstream call failed");
            text_result(format!("Error: {}", e))
        }
    }
}

// ===== search_web =====

/// Validated arguments for the full web search tool
#[derive(Debug)]
struct SearchWebArgs {
    query: String,
    model: SonarModel,
    system_prompt: Option<String>,
    recency: Option<RecencyFilter>,
    domains: Vec<String>,
    context_size: Option<ContextSize>,
    after_date: Option<String>,
}

impl SearchWebArgs {
    fn parse(args: &Value) -> Result<Self, ValidationError> {
        let query = truncate_chars(required_str(args, "query")?, MAX_QUERY_CHARS).to_string();
        let model = validate::parse_model(opt_str(args, "model")?, SonarModel::Sonar)?;
        let system_prompt = opt_str(args, "system_prompt")?
            .filter(|s| !s.trim().is_empty())
            .map(|s| truncate_chars(s, MAX_QUERY_CHARS).to_string());
        let recency = validate::parse_recency(opt_str(args, "search_recency")?)?;
        let domains = opt_str_list(args, "domain_filter")?;
        validate::validate_domains(&domains)?;
        let context_size = validate::parse_context_size(
            opt_str(args, "search_context_size")?,
            Some(ContextSize::Medium),
        )?;
        let after_date = validate::parse_after_date(opt_str(args, "search_after_date")?)?;

        Ok(Self {
            query,
            model,
            system_prompt,
            recency,
            domains,
            context_size,
            after_date,
        })
    }

    fn request(&self) -> ChatRequest {
        let mut messages = Vec::new();
        if let Some(ref prompt) = self.system_prompt {
            messages.push(Message::system(prompt.clone()));
        }
        messages.push(Message::user(self.query.clone()));

        let mut request = ChatRequest::new(self.model, messages);
        if let Some(size) = self.context_size {
            request = request.context_size(size);
        }
        if let Some(recency) = self.recency {
            request = request.recency(recency);
        }
        if let Some(ref date) = self.after_date {
            request = request.after_date(date.clone());
        }
        request.domain_filter(self.domains.clone())
    }
}

/// Handler for the primary web search tool
#[derive(Debug)]
pub struct SearchWebHandler {
    pub client: Arc<SonarClient>,
    pub timeout: Duration,
}

#[async_trait::async_trait]
impl ToolHandler for SearchWebHandler {
    async fn execute(&self, args: Value) -> Result<Value, String> {
        let parsed = match SearchWebArgs::parse(&args) {
            Ok(parsed) => parsed,
            Err(e) => return text_result(format!("Error: {}", e)),
        };

        let request = parsed.request();
        let opts = FormatOptions::full(FormatSections::all());
        call_upstream(&self.client, &request, self.timeout, &opts).await
    }
}

// ===== quick_search =====

/// Validated arguments for the quick search tool
#[derive(Debug)]
struct QuickSearchArgs {
    query: String,
}

impl QuickSearchArgs {
    fn parse(args: &Value) -> Result<Self, ValidationError> {
        let query =
            truncate_chars(required_str(args, "query")?, MAX_QUICK_QUERY_CHARS).to_string();
        Ok(Self { query })
    }

    fn request(&self) -> ChatRequest {
        ChatRequest::new(SonarModel::Sonar, vec![Message::user(self.query.clone())])
            .context_size(ContextSize::Low)
    }
}

/// Handler for the minimal-latency search tool
#[derive(Debug)]
pub struct QuickSearchHandler {
    pub client: Arc<SonarClient>,
    pub timeout: Duration,
}

#[async_trait::async_trait]
impl ToolHandler for QuickSearchHandler {
    async fn execute(&self, args: Value) -> Result<Value, String> {
        let parsed = match QuickSearchArgs::parse(&args) {
            Ok(parsed) => parsed,
            Err(e) => return text_result(format!("Error: {}", e)),
        };

        let request = parsed.request();
        call_upstream(&self.client, &request, self.timeout, &FormatOptions::quick()).await
    }
}

// ===== search_academic =====

/// Validated arguments for the academic search tool
#[derive(Debug)]
struct SearchAcademicArgs {
    query: String,
    model: SonarModel,
    context_size: Option<ContextSize>,
    recency: Option<RecencyFilter>,
    after_date: Option<String>,
}

impl SearchAcademicArgs {
    fn parse(args: &Value) -> Result<Self, ValidationError> {
        let query = truncate_chars(required_str(args, "query")?, MAX_QUERY_CHARS).to_string();
        let model = validate::parse_model(opt_str(args, "model")?, SonarModel::SonarPro)?;
        let context_size = validate::parse_context_size(
            opt_str(args, "search_context_size")?,
            Some(ContextSize::High),
        )?;
        let recency = validate::parse_recency(opt_str(args, "search_recency")?)?;
        let after_date = validate::parse_after_date(opt_str(args, "search_after_date")?)?;

        Ok(Self {
            query,
            model,
            context_size,
            recency,
            after_date,
        })
    }

    fn request(&self) -> ChatRequest {
        let mut request =
            ChatRequest::new(self.model, vec![Message::user(self.query.clone())]).academic();
        if let Some(size) = self.context_size {
            request = request.context_size(size);
        }
        if let Some(recency) = self.recency {
            request = request.recency(recency);
        }
        if let Some(ref date) = self.after_date {
            request = request.after_date(date.clone());
        }
        request
    }
}

/// Handler for the academic search tool
#[derive(Debug)]
pub struct SearchAcademicHandler {
    pub client: Arc<SonarClient>,
    pub timeout: Duration,
}

#[async_trait::async_trait]
impl ToolHandler for SearchAcademicHandler {
    async fn execute(&self, args: Value) -> Result<Value, String> {
        let parsed = match SearchAcademicArgs::parse(&args) {
            Ok(parsed) => parsed,
            Err(e) => return text_result(format!("Error: {}", e)),
        };

        let request = parsed.request();
        let opts = FormatOptions::full(
            FormatSections::PREAMBLE | FormatSections::CITATIONS | FormatSections::USAGE,
        )
        .label("Academic Search Results:");
        call_upstream(&self.client, &request, self.timeout, &opts).await
    }
}

// ===== search_with_context =====

/// Validated arguments for the context-augmented search tool
#[derive(Debug)]
struct SearchWithContextArgs {
    query: String,
    context: String,
    model: SonarModel,
    context_size: Option<ContextSize>,
}

impl SearchWithContextArgs {
    fn parse(args: &Value) -> Result<Self, ValidationError> {
        let query = truncate_chars(required_str(args, "query")?, MAX_QUERY_CHARS).to_string();
        let context = truncate_chars(required_str(args, "context")?, MAX_QUERY_CHARS).to_string();
        let model = validate::parse_model(opt_str(args, "model")?, SonarModel::SonarPro)?;
        let context_size = validate::parse_context_size(
            opt_str(args, "search_context_size")?,
            Some(ContextSize::High),
        )?;

        Ok(Self {
            query,
            context,
            model,
            context_size,
        })
    }

    fn request(&self) -> ChatRequest {
        let combined = format!("Context: {}\n\nQuestion: {}", self.context, self.query);
        let mut request = ChatRequest::new(self.model, vec![Message::user(combined)]);
        if let Some(size) = self.context_size {
            request = request.context_size(size);
        }
        request
    }
}

/// Handler for the context-augmented search tool
#[derive(Debug)]
pub struct SearchWithContextHandler {
    pub client: Arc<SonarClient>,
    pub timeout: Duration,
}

#[async_trait::async_trait]
impl ToolHandler for SearchWithContextHandler {
    async fn execute(&self, args: Value) -> Result<Value, String> {
        let parsed = match SearchWithContextArgs::parse(&args) {
            Ok(parsed) => parsed,
            Err(e) => return text_result(format!("Error: {}", e)),
        };

        let request = parsed.request();
        let opts =
            FormatOptions::full(FormatSections::CITATIONS | FormatSections::SOURCES);
        call_upstream(&self.client, &request, self.timeout, &opts).await
    }
}

// ===== reasoning_search =====

/// Validated arguments for the reasoning search tool
#[derive(Debug)]
struct ReasoningSearchArgs {
    query: String,
    model: SonarModel,
    context_size: Option<ContextSize>,
}

impl ReasoningSearchArgs {
    fn parse(args: &Value) -> Result<Self, ValidationError> {
        let query = truncate_chars(required_str(args, "query")?, MAX_QUERY_CHARS).to_string();
        let model = validate::parse_reasoning_model(
            opt_str(args, "model")?,
            SonarModel::SonarReasoning,
        )?;
        let context_size = validate::parse_context_size(
            opt_str(args, "search_context_size")?,
            Some(ContextSize::High),
        )?;

        Ok(Self {
            query,
            model,
            context_size,
        })
    }

    fn request(&self) -> ChatRequest {
        let mut request = ChatRequest::new(self.model, vec![Message::user(self.query.clone())]);
        if let Some(size) = self.context_size {
            request = request.context_size(size);
        }
        request
    }
}

/// Handler for the reasoning search tool
#[derive(Debug)]
pub struct ReasoningSearchHandler {
    pub client: Arc<SonarClient>,
    pub timeout: Duration,
}

#[async_trait::async_trait]
impl ToolHandler for ReasoningSearchHandler {
    async fn execute(&self, args: Value) -> Result<Value, String> {
        let parsed = match ReasoningSearchArgs::parse(&args) {
            Ok(parsed) => parsed,
            Err(e) => return text_result(format!("Error: {}", e)),
        };

        let request = parsed.request();
        let opts = FormatOptions::full(FormatSections::CITATIONS | FormatSections::USAGE)
            .label("Reasoning Analysis:");
        call_upstream(&self.client, &request, self.timeout, &opts).await
    }
}

// ===== analyze_image_url =====

/// Validated arguments for URL-based image analysis
#[derive(Debug)]
struct AnalyzeImageUrlArgs {
    question: String,
    image_url: String,
    model: SonarModel,
}

impl AnalyzeImageUrlArgs {
    fn parse(args: &Value) -> Result<Self, ValidationError> {
        let question = truncate_chars(required_str(args, "question")?, MAX_QUERY_CHARS).to_string();
        let image_url = validate::validate_reference_url(required_str(args, "image_url")?)?;
        let model = validate::parse_model(opt_str(args, "model")?, SonarModel::SonarPro)?;

        Ok(Self {
            question,
            image_url,
            model,
        })
    }

    fn request(&self) -> ChatRequest {
        ChatRequest::new(
            self.model,
            vec![Message::user_parts(vec![
                ContentPart::text(self.question.clone()),
                ContentPart::image_url(self.image_url.clone()),
            ])],
        )
    }
}

/// Handler for image analysis from a public URL
#[derive(Debug)]
pub struct AnalyzeImageUrlHandler {
    pub client: Arc<SonarClient>,
    pub timeout: Duration,
}

#[async_trait::async_trait]
impl ToolHandler for AnalyzeImageUrlHandler {
    async fn execute(&self, args: Value) -> Result<Value, String> {
        let parsed = match AnalyzeImageUrlArgs::parse(&args) {
            Ok(parsed) => parsed,
            Err(e) => return text_result(format!("Error: {}", e)),
        };

        let request = parsed.request();
        let opts = FormatOptions::full(FormatSections::CITATIONS | FormatSections::USAGE);
        call_upstream(&self.client, &request, self.timeout, &opts).await
    }
}

// ===== analyze_image_base64 =====

/// Validated arguments for base64 image analysis
#[derive(Debug)]
struct AnalyzeImageBase64Args {
    question: String,
    data_uri: String,
    model: SonarModel,
}

impl AnalyzeImageBase64Args {
    fn parse(args: &Value) -> Result<Self, ValidationError> {
        let question = truncate_chars(required_str(args, "question")?, MAX_QUERY_CHARS).to_string();
        let data = required_str(args, "image_base64")?;
        let mime = validate::parse_image_type(opt_str(args, "image_type")?)?;
        let model = validate::parse_model(opt_str(args, "model")?, SonarModel::SonarPro)?;

        Ok(Self {
            question,
            data_uri: format!("data:{};base64,{}", mime, data),
            model,
        })
    }

    fn request(&self) -> ChatRequest {
        ChatRequest::new(
            self.model,
            vec![Message::user_parts(vec![
                ContentPart::text(self.question.clone()),
                ContentPart::image_url(self.data_uri.clone()),
            ])],
        )
    }
}

/// Handler for image analysis from inline base64 data
#[derive(Debug)]
pub struct AnalyzeImageBase64Handler {
    pub client: Arc<SonarClient>,
    pub timeout: Duration,
}

#[async_trait::async_trait]
impl ToolHandler for AnalyzeImageBase64Handler {
    async fn execute(&self, args: Value) -> Result<Value, String> {
        let parsed = match AnalyzeImageBase64Args::parse(&args) {
            Ok(parsed) => parsed,
            Err(e) => return text_result(format!("Error: {}", e)),
        };

        let request = parsed.request();
        let opts = FormatOptions::full(FormatSections::CITATIONS | FormatSections::USAGE);
        call_upstream(&self.client, &request, self.timeout, &opts).await
    }
}

// ===== analyze_pdf =====

/// Validated arguments for PDF analysis
#[derive(Debug)]
struct AnalyzePdfArgs {
    question: String,
    pdf_url: String,
    model: SonarModel,
    include_web_search: bool,
}

impl AnalyzePdfArgs {
    fn parse(args: &Value) -> Result<Self, ValidationError> {
        let question = truncate_chars(required_str(args, "question")?, MAX_QUERY_CHARS).to_string();
        let pdf_url = validate::validate_reference_url(required_str(args, "pdf_url")?)?;
        let model = validate::parse_model(opt_str(args, "model")?, SonarModel::SonarPro)?;
        let include_web_search = opt_bool(args, "include_web_search", false)?;

        Ok(Self {
            question,
            pdf_url,
            model,
            include_web_search,
        })
    }

    fn request(&self) -> ChatRequest {
        let mut request = ChatRequest::new(
            self.model,
            vec![Message::user_parts(vec![
                ContentPart::text(self.question.clone()),
                ContentPart::file_url(self.pdf_url.clone()),
            ])],
        );
        if self.include_web_search {
            request
                .web_search_options
                .get_or_insert_with(Default::default)
                .search_type = Some("pro".to_string());
        }
        request
    }
}

/// Handler for PDF document analysis
#[derive(Debug)]
pub struct AnalyzePdfHandler {
    pub client: Arc<SonarClient>,
    pub timeout: Duration,
}

#[async_trait::async_trait]
impl ToolHandler for AnalyzePdfHandler {
    async fn execute(&self, args: Value) -> Result<Value, String> {
        let parsed = match AnalyzePdfArgs::parse(&args) {
            Ok(parsed) => parsed,
            Err(e) => return text_result(format!("Error: {}", e)),
        };

        let request = parsed.request();
        let opts = FormatOptions::full(FormatSections::CITATIONS | FormatSections::USAGE);
        call_upstream(&self.client, &request, self.timeout, &opts).await
    }
}

// ===== explain_capabilities =====

/// Handler returning a static description of the server; no network
#[derive(Debug)]
pub struct ExplainCapabilitiesHandler;

#[async_trait::async_trait]
impl ToolHandler for ExplainCapabilitiesHandler {
    async fn execute(&self, _args: Value) -> Result<Value, String> {
        text_result(CAPABILITIES.to_string())
    }
}

const CAPABILITIES: &str = "\
Sonar MCP Server Capabilities

Web Search
- Real-time internet search with citations (search_web, quick_search)
- Models: sonar, sonar-pro, sonar-reasoning, sonar-reasoning-pro, sonar-deep-research
- Filtering: domain lists (up to 20 entries, '-' prefix excludes), recency
  windows, after-date filters
- Adjustable search depth: low / medium / high context size

Academic Research
- Dedicated academic search mode (search_academic)
- Peer-reviewed source prioritization with scholarly citations

Reasoning
- Multi-step analytical queries via reasoning models (reasoning_search)
- Token and cost accounting in results

Multimodal Analysis
- Image analysis from URLs or base64 data (analyze_image_url, analyze_image_base64)
- PDF document processing (analyze_pdf), optionally combined with web search

Configuration
- Set PERPLEXITY_API_KEY in the environment to authenticate
- Input validation on all parameters; no data persistence
";

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_required_str() {
        let args = json!({"query": "hello"});
        assert_eq!(required_str(&args, "query").unwrap(), "hello");

        let missing = json!({});
        assert_eq!(
            required_str(&missing, "query").unwrap_err(),
            ValidationError::MissingField("query")
        );

        let blank = json!({"query": "   "});
        assert!(required_str(&blank, "query").is_err());

        let wrong = json!({"query": 5});
        assert!(matches!(
            required_str(&wrong, "query").unwrap_err(),
            ValidationError::WrongType { field: "query", .. }
        ));
    }

    #[test]
    fn test_opt_str_list() {
        let args = json!({"domain_filter": ["a.org", "-b.com"]});
        assert_eq!(
            opt_str_list(&args, "domain_filter").unwrap(),
            vec!["a.org".to_string(), "-b.com".to_string()]
        );

        let absent = json!({});
        assert!(opt_str_list(&absent, "domain_filter").unwrap().is_empty());

        let mixed = json!({"domain_filter": ["a.org", 7]});
        assert!(opt_str_list(&mixed, "domain_filter").is_err());
    }

    #[test]
    fn test_search_web_args_defaults() {
        let parsed = SearchWebArgs::parse(&json!({"query": "rust"})).unwrap();
        assert_eq!(parsed.model, SonarModel::Sonar);
        assert_eq!(parsed.context_size, Some(ContextSize::Medium));
        assert!(parsed.domains.is_empty());

        let request = parsed.request();
        assert_eq!(request.messages.len(), 1);
        assert!(request.search_domain_filter.is_none());
        assert_eq!(
            request
                .web_search_options
                .as_ref()
                .unwrap()
                .search_context_size,
            Some(ContextSize::Medium)
        );
    }

    #[test]
    fn test_search_web_args_strict_enum() {
        let err = SearchWebArgs::parse(&json!({"query": "q", "model": "gpt-4"})).unwrap_err();
        assert_eq!(err, ValidationError::InvalidModel("gpt-4".to_string()));

        let err = SearchWebArgs::parse(&json!({"query": "q", "search_context_size": "huge"}))
            .unwrap_err();
        assert_eq!(err, ValidationError::InvalidContextSize("huge".to_string()));
    }

    #[test]
    fn test_search_web_system_prompt_message_order() {
        let parsed = SearchWebArgs::parse(&json!({
            "query": "q",
            "system_prompt": "be terse"
        }))
        .unwrap();
        let request = parsed.request();
        assert_eq!(request.messages.len(), 2);
        assert!(matches!(
            request.messages[0].role,
            crate::models::Role::System
        ));
    }

    #[test]
    fn test_search_web_query_cap() {
        let long = "q".repeat(10_000);
        let parsed = SearchWebArgs::parse(&json!({"query": long})).unwrap();
        assert_eq!(parsed.query.chars().count(), MAX_QUERY_CHARS);
    }

    #[test]
    fn test_quick_search_query_cap() {
        let long = "q".repeat(2000);
        let parsed = QuickSearchArgs::parse(&json!({"query": long})).unwrap();
        assert_eq!(parsed.query.chars().count(), MAX_QUICK_QUERY_CHARS);

        let request = parsed.request();
        assert_eq!(request.model, SonarModel::Sonar);
        assert_eq!(
            request.web_search_options.unwrap().search_context_size,
            Some(ContextSize::Low)
        );
    }

    #[test]
    fn test_academic_args_set_mode() {
        let parsed = SearchAcademicArgs::parse(&json!({"query": "q"})).unwrap();
        let request = parsed.request();
        assert_eq!(
            request.search_mode,
            Some(crate::models::SearchMode::Academic)
        );
        assert_eq!(request.model, SonarModel::SonarPro);
    }

    #[test]
    fn test_context_args_combine_message() {
        let parsed = SearchWithContextArgs::parse(&json!({
            "query": "what changed?",
            "context": "comparing v1 and v2"
        }))
        .unwrap();
        let request = parsed.request();
        match &request.messages[0].content {
            crate::models::MessageContent::Text(text) => {
                assert!(text.starts_with("Context: comparing v1 and v2"));
                assert!(text.ends_with("Question: what changed?"));
            }
            other => panic!("expected text content, got {:?}", other),
        }
    }

    #[test]
    fn test_reasoning_args_reject_plain_model() {
        let err =
            ReasoningSearchArgs::parse(&json!({"query": "q", "model": "sonar"})).unwrap_err();
        assert_eq!(err, ValidationError::NotReasoningModel("sonar".to_string()));
    }

    #[test]
    fn test_image_url_args() {
        let parsed = AnalyzeImageUrlArgs::parse(&json!({
            "question": "what is this?",
            "image_url": "https://example.com/cat.png"
        }))
        .unwrap();
        let request = parsed.request();
        match &request.messages[0].content {
            crate::models::MessageContent::Parts(parts) => {
                assert_eq!(parts.len(), 2);
                assert!(matches!(parts[0], ContentPart::Text { .. }));
                assert!(matches!(parts[1], ContentPart::ImageUrl { .. }));
            }
            other => panic!("expected parts, got {:?}", other),
        }
    }

    #[test]
    fn test_image_url_args_reject_bad_url() {
        assert!(AnalyzeImageUrlArgs::parse(&json!({
            "question": "q",
            "image_url": "ftp://example.com/cat.png"
        }))
        .is_err());
    }

    #[test]
    fn test_image_base64_data_uri() {
        let parsed = AnalyzeImageBase64Args::parse(&json!({
            "question": "q",
            "image_base64": "aGVsbG8=",
            "image_type": "image/jpeg"
        }))
        .unwrap();
        assert_eq!(parsed.data_uri, "data:image/jpeg;base64,aGVsbG8=");
    }

    #[test]
    fn test_image_base64_rejects_bad_mime() {
        assert!(AnalyzeImageBase64Args::parse(&json!({
            "question": "q",
            "image_base64": "aGVsbG8=",
            "image_type": "image/tiff"
        }))
        .is_err());
    }

    #[test]
    fn test_pdf_args_web_search_flag() {
        let parsed = AnalyzePdfArgs::parse(&json!({
            "question": "summarize",
            "pdf_url": "https://example.com/paper.pdf",
            "include_web_search": true
        }))
        .unwrap();
        let request = parsed.request();
        assert_eq!(
            request.web_search_options.unwrap().search_type.as_deref(),
            Some("pro")
        );

        let without = AnalyzePdfArgs::parse(&json!({
            "question": "summarize",
            "pdf_url": "https://example.com/paper.pdf"
        }))
        .unwrap()
        .request();
        assert!(without.web_search_options.is_none());
    }

    #[tokio::test]
    async fn test_explain_capabilities_is_static() {
        let handler = ExplainCapabilitiesHandler;
        let result = handler.execute(json!({})).await.unwrap();
        let text = result.as_str().unwrap();
        assert!(text.contains("search_web"));
        assert!(text.contains("PERPLEXITY_API_KEY"));
    }
}
