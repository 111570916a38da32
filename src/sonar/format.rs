//! Rendering of upstream responses into bounded plain text.

use std::fmt::Write as _;

use crate::models::{ChatRequest, ChatResponse};
use crate::utils::{sanitize, truncate_chars};

/// Placeholder used when the upstream returned no answer text
const NO_RESPONSE: &str = "No response";

bitflags::bitflags! {
    /// Sections a formatted result can include
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct FormatSections: u32 {
        /// Echo request metadata (model, mode, filters) before the answer
        const PREAMBLE = 1 << 0;
        /// Numbered citation list
        const CITATIONS = 1 << 1;
        /// Search results consulted by the upstream
        const SOURCES = 1 << 2;
        /// Token and cost summary
        const USAGE = 1 << 3;
    }
}

/// Per-tool formatting contract
#[derive(Debug, Clone)]
pub struct FormatOptions {
    /// Sections to render when present in the response
    pub sections: FormatSections,

    /// Optional heading placed before the answer text
    pub label: Option<&'static str>,

    /// Hard cap on output length, in characters
    pub max_chars: usize,

    /// Maximum number of citation lines
    pub max_citations: usize,

    /// Maximum number of source lines
    pub max_sources: usize,
}

impl FormatOptions {
    /// Options for full search tools: all sections, 8000-char cap
    pub fn full(sections: FormatSections) -> Self {
        Self {
            sections,
            label: None,
            max_chars: 8000,
            max_citations: 10,
            max_sources: 5,
        }
    }

    /// Options for the quick search tool: content only, 2000-char cap
    pub fn quick() -> Self {
        Self {
            sections: FormatSections::empty(),
            label: None,
            max_chars: 2000,
            max_citations: 10,
            max_sources: 5,
        }
    }

    /// Set a heading label
    pub fn label(mut self, label: &'static str) -> Self {
        self.label = Some(label);
        self
    }
}

/// Render a response as bounded plain text.
///
/// The answer text of the first choice is always included, substituting a
/// placeholder when absent. Optional sections are appended per `opts`, the
/// whole output is sanitized of control characters, and the length cap is
/// applied by truncation, never by error.
pub fn format_response(
    response: &ChatResponse,
    request: &ChatRequest,
    opts: &FormatOptions,
) -> String {
    let mut out = String::new();

    if opts.sections.contains(FormatSections::PREAMBLE) {
        render_preamble(&mut out, request);
    }

    if let Some(label) = opts.label {
        let _ = writeln!(out, "{}", label);
        out.push('\n');
    }

    out.push_str(response.content().unwrap_or(NO_RESPONSE));

    if opts.sections.contains(FormatSections::CITATIONS) && !response.citations.is_empty() {
        out.push_str("\n\nCitations:\n");
        for (i, citation) in response.citations.iter().take(opts.max_citations).enumerate() {
            let _ = writeln!(out, "{}. {}", i + 1, citation);
        }
    }

    if opts.sections.contains(FormatSections::SOURCES) && !response.search_results.is_empty() {
        out.push_str("\nSources consulted:\n");
        for result in response.search_results.iter().take(opts.max_sources) {
            let title = result.title.as_deref().unwrap_or("Unknown");
            let url = result.url.as_deref().unwrap_or("");
            let _ = writeln!(out, "- {}: {}", title, url);
        }
    }

    if opts.sections.contains(FormatSections::USAGE) {
        if let Some(usage) = &response.usage {
            out.push_str("\nUsage:\n");
            if let Some(total) = usage.total_tokens {
                let _ = writeln!(out, "- Total tokens: {}", total);
            }
            if let Some(ref size) = usage.search_context_size {
                let _ = writeln!(out, "- Search context: {}", size);
            }
            if let Some(cost) = usage.cost.as_ref().and_then(|c| c.total_cost) {
                let _ = writeln!(out, "- Total cost: ${:.3}", cost);
            }
        }
    }

    let sanitized = sanitize(&out);
    truncate_chars(&sanitized, opts.max_chars).to_string()
}

/// Echo the request parameters that shaped this answer
fn render_preamble(out: &mut String, request: &ChatRequest) {
    out.push_str("Request:\n");
    let _ = writeln!(out, "- Model: {}", request.model);
    if request.is_academic() {
        out.push_str("- Academic search mode\n");
    }
    if let Some(size) = request
        .web_search_options
        .as_ref()
        .and_then(|o| o.search_context_size)
    {
        let _ = writeln!(out, "- Search context size: {}", size);
    }
    if let Some(ref domains) = request.search_domain_filter {
        let _ = writeln!(out, "- Domain filter: {}", domains.join(", "));
    }
    if let Some(recency) = request.search_recency_filter {
        let _ = writeln!(out, "- Recency: {}", recency.as_str());
    }
    if let Some(ref date) = request.search_after_date_filter {
        let _ = writeln!(out, "- After date: {}", date);
    }
    out.push_str("\n---\n\n");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ContextSize, Message, SonarModel};

    fn response_json(json: &str) -> ChatResponse {
        serde_json::from_str(json).unwrap()
    }

    fn plain_request() -> ChatRequest {
        ChatRequest::new(SonarModel::Sonar, vec![Message::user("test")])
    }

    #[test]
    fn test_answer_with_citations() {
        let response = response_json(
            r#"{"choices":[{"message":{"content":"answer"}}],"citations":["http://a"]}"#,
        );
        let opts = FormatOptions::full(FormatSections::CITATIONS);
        let text = format_response(&response, &plain_request(), &opts);

        assert!(text.starts_with("answer"));
        assert!(text.contains("Citations:"));
        assert!(text.contains("1. http://a"));
    }

    #[test]
    fn test_missing_content_placeholder() {
        let response = response_json("{}");
        let opts = FormatOptions::full(FormatSections::all());
        let text = format_response(&response, &plain_request(), &opts);
        assert!(text.contains("No response"));
    }

    #[test]
    fn test_citation_cap() {
        let citations: Vec<String> = (0..25).map(|i| format!("\"http://c{}\"", i)).collect();
        let response = response_json(&format!(
            r#"{{"choices":[{{"message":{{"content":"x"}}}}],"citations":[{}]}}"#,
            citations.join(",")
        ));
        let opts = FormatOptions::full(FormatSections::CITATIONS);
        let text = format_response(&response, &plain_request(), &opts);

        let numbered = text.lines().filter(|l| l.contains(". http://c")).count();
        assert_eq!(numbered, 10);
        assert!(text.contains("10. http://c9"));
        assert!(!text.contains("11."));
    }

    #[test]
    fn test_length_cap_by_truncation() {
        let long = "x".repeat(20_000);
        let response = response_json(&format!(
            r#"{{"choices":[{{"message":{{"content":"{}"}}}}]}}"#,
            long
        ));
        let opts = FormatOptions::full(FormatSections::empty());
        let text = format_response(&response, &plain_request(), &opts);
        assert_eq!(text.chars().count(), 8000);
    }

    #[test]
    fn test_quick_cap() {
        let long = "y".repeat(5000);
        let response = response_json(&format!(
            r#"{{"choices":[{{"message":{{"content":"{}"}}}}]}}"#,
            long
        ));
        let text = format_response(&response, &plain_request(), &FormatOptions::quick());
        assert_eq!(text.chars().count(), 2000);
    }

    #[test]
    fn test_quick_omits_sections() {
        let response = response_json(
            r#"{"choices":[{"message":{"content":"short"}}],"citations":["http://a"],"usage":{"total_tokens":5}}"#,
        );
        let text = format_response(&response, &plain_request(), &FormatOptions::quick());
        assert_eq!(text, "short");
    }

    #[test]
    fn test_preamble_echoes_filters() {
        let request = ChatRequest::new(SonarModel::SonarPro, vec![Message::user("q")])
            .academic()
            .context_size(ContextSize::High)
            .domain_filter(vec!["arxiv.org".to_string()]);
        let response = response_json(r#"{"choices":[{"message":{"content":"a"}}]}"#);
        let opts = FormatOptions::full(FormatSections::PREAMBLE);
        let text = format_response(&response, &request, &opts);

        assert!(text.contains("Model: sonar-pro"));
        assert!(text.contains("Academic search mode"));
        assert!(text.contains("Search context size: high"));
        assert!(text.contains("Domain filter: arxiv.org"));
    }

    #[test]
    fn test_usage_section() {
        let response = response_json(
            r#"{"choices":[{"message":{"content":"a"}}],"usage":{"total_tokens":321,"search_context_size":"low","cost":{"total_cost":0.0051}}}"#,
        );
        let opts = FormatOptions::full(FormatSections::USAGE);
        let text = format_response(&response, &plain_request(), &opts);

        assert!(text.contains("Total tokens: 321"));
        assert!(text.contains("Search context: low"));
        assert!(text.contains("Total cost: $0.005"));
    }

    #[test]
    fn test_sources_section() {
        let response = response_json(
            r#"{"choices":[{"message":{"content":"a"}}],"search_results":[
                {"title":"T1","url":"http://s1"},{"url":"http://s2"}]}"#,
        );
        let opts = FormatOptions::full(FormatSections::SOURCES);
        let text = format_response(&response, &plain_request(), &opts);

        assert!(text.contains("- T1: http://s1"));
        assert!(text.contains("- Unknown: http://s2"));
    }

    #[test]
    fn test_control_characters_sanitized() {
        let response = ChatResponse {
            choices: vec![crate::models::Choice {
                message: Some(crate::models::ChoiceMessage {
                    content: Some("bad\u{0}byte and\u{1} control".to_string()),
                }),
            }],
            ..Default::default()
        };
        let opts = FormatOptions::full(FormatSections::empty());
        let text = format_response(&response, &plain_request(), &opts);
        assert_eq!(text, "badbyte and control");
    }

    #[test]
    fn test_label_heading() {
        let response = response_json(r#"{"choices":[{"message":{"content":"a"}}]}"#);
        let opts = FormatOptions::full(FormatSections::empty()).label("Reasoning Analysis:");
        let text = format_response(&response, &plain_request(), &opts);
        assert!(text.starts_with("Reasoning Analysis:\n\na"));
    }
}
