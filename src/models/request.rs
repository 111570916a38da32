//! Upstream request models.
//!
//! These types replace ad hoc JSON maps with validated structures: a
//! [`ChatRequest`] can only hold values that already passed argument
//! validation, and serialization omits every filter that was not set so the
//! wire payload matches what the upstream expects.

use serde::{Deserialize, Serialize};

/// Maximum number of entries accepted in a domain filter list
pub const MAX_DOMAIN_FILTERS: usize = 20;

/// Sonar model families exposed by the upstream API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SonarModel {
    #[serde(rename = "sonar")]
    Sonar,
    #[serde(rename = "sonar-pro")]
    SonarPro,
    #[serde(rename = "sonar-reasoning")]
    SonarReasoning,
    #[serde(rename = "sonar-reasoning-pro")]
    SonarReasoningPro,
    #[serde(rename = "sonar-deep-research")]
    SonarDeepResearch,
}

impl SonarModel {
    /// All valid model identifiers, as accepted in tool arguments
    pub const ALL: [SonarModel; 5] = [
        SonarModel::Sonar,
        SonarModel::SonarPro,
        SonarModel::SonarReasoning,
        SonarModel::SonarReasoningPro,
        SonarModel::SonarDeepResearch,
    ];

    /// The wire identifier for this model
    pub fn as_str(&self) -> &'static str {
        match self {
            SonarModel::Sonar => "sonar",
            SonarModel::SonarPro => "sonar-pro",
            SonarModel::SonarReasoning => "sonar-reasoning",
            SonarModel::SonarReasoningPro => "sonar-reasoning-pro",
            SonarModel::SonarDeepResearch => "sonar-deep-research",
        }
    }

    /// Parse a model identifier
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|m| m.as_str() == s)
    }

    /// Whether this model performs multi-step reasoning
    pub fn is_reasoning(&self) -> bool {
        matches!(
            self,
            SonarModel::SonarReasoning
                | SonarModel::SonarReasoningPro
                | SonarModel::SonarDeepResearch
        )
    }
}

impl std::fmt::Display for SonarModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Search context size: how much retrieved web content informs the answer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContextSize {
    Low,
    Medium,
    High,
}

impl ContextSize {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContextSize::Low => "low",
            ContextSize::Medium => "medium",
            ContextSize::High => "high",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "low" => Some(ContextSize::Low),
            "medium" => Some(ContextSize::Medium),
            "high" => Some(ContextSize::High),
            _ => None,
        }
    }
}

impl std::fmt::Display for ContextSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Upstream search mode. `Web` is the default and is omitted from the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchMode {
    Web,
    Academic,
}

impl SearchMode {
    /// Parse a search mode argument. The empty string means general web search.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "" => Some(SearchMode::Web),
            "academic" => Some(SearchMode::Academic),
            _ => None,
        }
    }
}

/// Recency window for search results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecencyFilter {
    Day,
    Week,
    Month,
    Year,
}

impl RecencyFilter {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecencyFilter::Day => "day",
            RecencyFilter::Week => "week",
            RecencyFilter::Month => "month",
            RecencyFilter::Year => "year",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "day" => Some(RecencyFilter::Day),
            "week" => Some(RecencyFilter::Week),
            "month" => Some(RecencyFilter::Month),
            "year" => Some(RecencyFilter::Year),
            _ => None,
        }
    }
}

/// Message role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// One part of a multimodal message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ContentPart {
    #[serde(rename = "text")]
    Text { text: String },
    #[serde(rename = "image_url")]
    ImageUrl { image_url: UrlRef },
    #[serde(rename = "file_url")]
    FileUrl { file_url: UrlRef },
}

/// A URL reference inside a content part
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UrlRef {
    pub url: String,
}

impl ContentPart {
    pub fn text(text: impl Into<String>) -> Self {
        ContentPart::Text { text: text.into() }
    }

    pub fn image_url(url: impl Into<String>) -> Self {
        ContentPart::ImageUrl {
            image_url: UrlRef { url: url.into() },
        }
    }

    pub fn file_url(url: impl Into<String>) -> Self {
        ContentPart::FileUrl {
            file_url: UrlRef { url: url.into() },
        }
    }
}

/// Message content: a plain string for text tools, typed parts for
/// image and document analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MessageContent {
    Text(String),
    Parts(Vec<ContentPart>),
}

/// A single chat message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: MessageContent,
}

impl Message {
    /// A system message with plain text content
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: MessageContent::Text(content.into()),
        }
    }

    /// A user message with plain text content
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: MessageContent::Text(content.into()),
        }
    }

    /// A user message composed of typed parts
    pub fn user_parts(parts: Vec<ContentPart>) -> Self {
        Self {
            role: Role::User,
            content: MessageContent::Parts(parts),
        }
    }
}

/// Web search options attached to a request
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WebSearchOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search_context_size: Option<ContextSize>,

    /// Set to "pro" when a document analysis should also search the web
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search_type: Option<String>,
}

impl WebSearchOptions {
    pub fn is_empty(&self) -> bool {
        self.search_context_size.is_none() && self.search_type.is_none()
    }
}

/// The upstream chat-completions request
///
/// Exactly one of these is produced per tool invocation. Optional filters
/// are omitted from serialization when unset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub model: SonarModel,
    pub messages: Vec<Message>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub search_mode: Option<SearchMode>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub web_search_options: Option<WebSearchOptions>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub search_domain_filter: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub search_recency_filter: Option<RecencyFilter>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub search_after_date_filter: Option<String>,
}

impl ChatRequest {
    /// Create a request with the given model and messages, no filters
    pub fn new(model: SonarModel, messages: Vec<Message>) -> Self {
        Self {
            model,
            messages,
            search_mode: None,
            web_search_options: None,
            search_domain_filter: None,
            search_recency_filter: None,
            search_after_date_filter: None,
        }
    }

    /// Set the search context size
    pub fn context_size(mut self, size: ContextSize) -> Self {
        self.web_search_options
            .get_or_insert_with(WebSearchOptions::default)
            .search_context_size = Some(size);
        self
    }

    /// Enable academic search mode
    pub fn academic(mut self) -> Self {
        self.search_mode = Some(SearchMode::Academic);
        self
    }

    /// Attach a domain filter list. Only the first [`MAX_DOMAIN_FILTERS`]
    /// entries are kept.
    pub fn domain_filter(mut self, mut domains: Vec<String>) -> Self {
        if domains.is_empty() {
            return self;
        }
        domains.truncate(MAX_DOMAIN_FILTERS);
        self.search_domain_filter = Some(domains);
        self
    }

    /// Attach a recency filter
    pub fn recency(mut self, recency: RecencyFilter) -> Self {
        self.search_recency_filter = Some(recency);
        self
    }

    /// Attach an after-date filter (already validated as MM/DD/YYYY)
    pub fn after_date(mut self, date: impl Into<String>) -> Self {
        self.search_after_date_filter = Some(date.into());
        self
    }

    /// Whether this request is in academic mode
    pub fn is_academic(&self) -> bool {
        self.search_mode == Some(SearchMode::Academic)
    }
}
