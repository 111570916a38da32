//! Tool argument validation.
//!
//! Enum arguments are checked against fixed sets with a strict policy: a
//! value that is present but outside the set is an error naming the field
//! and the offending value, while an absent value takes the tool's
//! documented default. Free-text arguments are length-capped rather than
//! rejected. Validation always completes before any network call.

use chrono::NaiveDate;
use thiserror::Error;

use crate::models::{ContextSize, RecencyFilter, SearchMode, SonarModel};

/// Maximum characters accepted for a query or context block
pub const MAX_QUERY_CHARS: usize = 4000;

/// Maximum characters accepted for a quick-search query
pub const MAX_QUICK_QUERY_CHARS: usize = 500;

/// Accepted image MIME types for base64 image analysis
pub const IMAGE_TYPES: [&str; 4] = ["image/png", "image/jpeg", "image/webp", "image/gif"];

/// Validation error types
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("missing required argument '{0}'")]
    MissingField(&'static str),

    #[error("argument '{field}' must be a {expected}")]
    WrongType {
        field: &'static str,
        expected: &'static str,
    },

    #[error("invalid model '{0}': expected one of sonar, sonar-pro, sonar-reasoning, sonar-reasoning-pro, sonar-deep-research")]
    InvalidModel(String),

    #[error("invalid search_context_size '{0}': expected low, medium, or high")]
    InvalidContextSize(String),

    #[error("model '{0}' is not a reasoning model: expected sonar-reasoning, sonar-reasoning-pro, or sonar-deep-research")]
    NotReasoningModel(String),

    #[error("invalid search_mode '{0}': expected 'academic' or an empty string")]
    InvalidSearchMode(String),

    #[error("invalid search_recency '{0}': expected day, week, month, or year")]
    InvalidRecency(String),

    #[error("invalid date '{0}': expected MM/DD/YYYY")]
    InvalidDate(String),

    #[error("invalid image_type '{0}': expected image/png, image/jpeg, image/webp, or image/gif")]
    InvalidImageType(String),

    #[error("invalid URL '{0}': {1}")]
    InvalidUrl(String, String),

    #[error("domain filter entries must be non-empty strings")]
    EmptyDomain,
}

/// Parse a model argument, strict on present-but-invalid values
pub fn parse_model(value: Option<&str>, default: SonarModel) -> Result<SonarModel, ValidationError> {
    match value {
        None => Ok(default),
        Some(s) => SonarModel::parse(s).ok_or_else(|| ValidationError::InvalidModel(s.to_string())),
    }
}

/// Parse a model argument for the reasoning search tool, which only
/// accepts reasoning-capable models
pub fn parse_reasoning_model(
    value: Option<&str>,
    default: SonarModel,
) -> Result<SonarModel, ValidationError> {
    let model = parse_model(value, default)?;
    if model.is_reasoning() {
        Ok(model)
    } else {
        Err(ValidationError::NotReasoningModel(
            model.as_str().to_string(),
        ))
    }
}

/// Parse a context size argument, strict on present-but-invalid values
pub fn parse_context_size(
    value: Option<&str>,
    default: Option<ContextSize>,
) -> Result<Option<ContextSize>, ValidationError> {
    match value {
        None => Ok(default),
        Some(s) => ContextSize::parse(s)
            .map(Some)
            .ok_or_else(|| ValidationError::InvalidContextSize(s.to_string())),
    }
}

/// Parse a search mode argument. The empty string means general web search.
pub fn parse_search_mode(value: Option<&str>) -> Result<SearchMode, ValidationError> {
    match value {
        None => Ok(SearchMode::Web),
        Some(s) => {
            SearchMode::parse(s).ok_or_else(|| ValidationError::InvalidSearchMode(s.to_string()))
        }
    }
}

/// Parse a recency filter argument. The empty string means no filter.
pub fn parse_recency(value: Option<&str>) -> Result<Option<RecencyFilter>, ValidationError> {
    match value {
        None => Ok(None),
        Some("") => Ok(None),
        Some(s) => RecencyFilter::parse(s)
            .map(Some)
            .ok_or_else(|| ValidationError::InvalidRecency(s.to_string())),
    }
}

/// Validate an after-date filter as MM/DD/YYYY. The empty string means no
/// filter.
pub fn parse_after_date(value: Option<&str>) -> Result<Option<String>, ValidationError> {
    match value {
        None | Some("") => Ok(None),
        Some(s) => match NaiveDate::parse_from_str(s, "%m/%d/%Y") {
            Ok(_) => Ok(Some(s.to_string())),
            Err(_) => Err(ValidationError::InvalidDate(s.to_string())),
        },
    }
}

/// Validate an image MIME type, strict on present-but-invalid values
pub fn parse_image_type(value: Option<&str>) -> Result<String, ValidationError> {
    let mime = value.unwrap_or("image/png");
    if IMAGE_TYPES.contains(&mime) {
        Ok(mime.to_string())
    } else {
        Err(ValidationError::InvalidImageType(mime.to_string()))
    }
}

/// Validate that a reference URL is a well-formed http(s) URL
pub fn validate_reference_url(value: &str) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::InvalidUrl(
            value.to_string(),
            "empty URL".to_string(),
        ));
    }

    let parsed = url::Url::parse(trimmed)
        .map_err(|e| ValidationError::InvalidUrl(trimmed.to_string(), e.to_string()))?;

    match parsed.scheme() {
        "http" | "https" => Ok(trimmed.to_string()),
        other => Err(ValidationError::InvalidUrl(
            trimmed.to_string(),
            format!("unsupported scheme '{}'", other),
        )),
    }
}

/// Validate a domain filter list: entries must be non-empty. The 20-entry
/// cap is applied later at request construction, not here.
pub fn validate_domains(domains: &[String]) -> Result<(), ValidationError> {
    if domains.iter().any(|d| d.trim().is_empty()) {
        return Err(ValidationError::EmptyDomain);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_model_default() {
        assert_eq!(
            parse_model(None, SonarModel::Sonar).unwrap(),
            SonarModel::Sonar
        );
        assert_eq!(
            parse_model(None, SonarModel::SonarPro).unwrap(),
            SonarModel::SonarPro
        );
    }

    #[test]
    fn test_parse_model_valid() {
        assert_eq!(
            parse_model(Some("sonar-reasoning"), SonarModel::Sonar).unwrap(),
            SonarModel::SonarReasoning
        );
    }

    #[test]
    fn test_parse_model_strict() {
        let err = parse_model(Some("gpt-4"), SonarModel::Sonar).unwrap_err();
        assert_eq!(err, ValidationError::InvalidModel("gpt-4".to_string()));
    }

    #[test]
    fn test_parse_reasoning_model() {
        assert_eq!(
            parse_reasoning_model(None, SonarModel::SonarReasoning).unwrap(),
            SonarModel::SonarReasoning
        );
        assert_eq!(
            parse_reasoning_model(Some("sonar-deep-research"), SonarModel::SonarReasoning)
                .unwrap(),
            SonarModel::SonarDeepResearch
        );
        assert_eq!(
            parse_reasoning_model(Some("sonar"), SonarModel::SonarReasoning).unwrap_err(),
            ValidationError::NotReasoningModel("sonar".to_string())
        );
        assert!(parse_reasoning_model(Some("bogus"), SonarModel::SonarReasoning).is_err());
    }

    #[test]
    fn test_parse_context_size() {
        assert_eq!(parse_context_size(None, None).unwrap(), None);
        assert_eq!(
            parse_context_size(None, Some(ContextSize::High)).unwrap(),
            Some(ContextSize::High)
        );
        assert_eq!(
            parse_context_size(Some("low"), None).unwrap(),
            Some(ContextSize::Low)
        );
        assert!(parse_context_size(Some("auto"), None).is_err());
        assert!(parse_context_size(Some("huge"), None).is_err());
    }

    #[test]
    fn test_parse_search_mode() {
        assert_eq!(parse_search_mode(None).unwrap(), SearchMode::Web);
        assert_eq!(parse_search_mode(Some("")).unwrap(), SearchMode::Web);
        assert_eq!(
            parse_search_mode(Some("academic")).unwrap(),
            SearchMode::Academic
        );
        assert!(parse_search_mode(Some("news")).is_err());
    }

    #[test]
    fn test_parse_recency() {
        assert_eq!(parse_recency(None).unwrap(), None);
        assert_eq!(parse_recency(Some("")).unwrap(), None);
        assert_eq!(parse_recency(Some("week")).unwrap(), Some(RecencyFilter::Week));
        assert!(parse_recency(Some("decade")).is_err());
    }

    #[test]
    fn test_parse_after_date() {
        assert_eq!(parse_after_date(None).unwrap(), None);
        assert_eq!(
            parse_after_date(Some("03/01/2025")).unwrap(),
            Some("03/01/2025".to_string())
        );
        assert!(parse_after_date(Some("2025-03-01")).is_err());
        assert!(parse_after_date(Some("13/45/2025")).is_err());
        assert!(parse_after_date(Some("yesterday")).is_err());
    }

    #[test]
    fn test_parse_image_type() {
        assert_eq!(parse_image_type(None).unwrap(), "image/png");
        assert_eq!(parse_image_type(Some("image/webp")).unwrap(), "image/webp");
        assert!(parse_image_type(Some("image/tiff")).is_err());
    }

    #[test]
    fn test_validate_reference_url() {
        assert!(validate_reference_url("https://example.com/a.png").is_ok());
        assert!(validate_reference_url("http://example.com/doc.pdf").is_ok());
        assert!(validate_reference_url("").is_err());
        assert!(validate_reference_url("ftp://example.com/a").is_err());
        assert!(validate_reference_url("javascript:alert(1)").is_err());
        assert!(validate_reference_url("not a url").is_err());
    }

    #[test]
    fn test_validate_domains() {
        assert!(validate_domains(&["arxiv.org".to_string(), "-reddit.com".to_string()]).is_ok());
        assert!(validate_domains(&["".to_string()]).is_err());
        assert!(validate_domains(&["ok.org".to_string(), "  ".to_string()]).is_err());
    }
}
