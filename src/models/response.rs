//! Upstream response models.
//!
//! Every field is optional or defaulted: a response with an unexpected shape
//! deserializes to a partial structure and the formatter renders whatever is
//! extractable, rather than failing the call.

use serde::{Deserialize, Serialize};

/// The upstream chat-completions response
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChatResponse {
    #[serde(default)]
    pub choices: Vec<Choice>,

    #[serde(default)]
    pub citations: Vec<String>,

    #[serde(default)]
    pub search_results: Vec<SearchResult>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage: Option<Usage>,
}

impl ChatResponse {
    /// The primary answer text, when present
    pub fn content(&self) -> Option<&str> {
        self.choices
            .first()
            .and_then(|c| c.message.as_ref())
            .and_then(|m| m.content.as_deref())
    }
}

/// One completion choice
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Choice {
    #[serde(default)]
    pub message: Option<ChoiceMessage>,
}

/// The message inside a completion choice
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChoiceMessage {
    #[serde(default)]
    pub content: Option<String>,
}

/// A search result consulted by the upstream
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchResult {
    #[serde(default)]
    pub title: Option<String>,

    #[serde(default)]
    pub url: Option<String>,

    #[serde(default)]
    pub snippet: Option<String>,
}

/// Token and cost accounting
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Usage {
    #[serde(default)]
    pub prompt_tokens: Option<u64>,

    #[serde(default)]
    pub completion_tokens: Option<u64>,

    #[serde(default)]
    pub total_tokens: Option<u64>,

    #[serde(default)]
    pub search_context_size: Option<String>,

    #[serde(default)]
    pub cost: Option<UsageCost>,
}

/// Cost breakdown inside the usage record
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UsageCost {
    #[serde(default)]
    pub total_cost: Option<f64>,
}
