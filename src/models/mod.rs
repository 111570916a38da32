//! Typed request and response models for the Sonar chat-completions API.

mod request;
mod response;

pub use request::{
    ChatRequest, ContentPart, ContextSize, Message, MessageContent, RecencyFilter, Role,
    SearchMode, SonarModel, UrlRef, WebSearchOptions, MAX_DOMAIN_FILTERS,
};
pub use response::{ChatResponse, Choice, ChoiceMessage, SearchResult, Usage, UsageCost};
