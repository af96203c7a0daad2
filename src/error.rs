use thiserror::Error;

/// Result type alias for tag operations
pub type Result<T> = std::result::Result<T, TagError>;

/// Errors raised while parsing selectors or rendering tags
#[derive(Debug, Error)]
pub enum TagError {
    #[error("Invalid selector '{selector}': {reason}")]
    InvalidSelector { selector: String, reason: String },

    #[error("Nested content was provided for \"{tag}\", a self-closing tag")]
    NestedContent { tag: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl TagError {
    pub(crate) fn invalid_selector(selector: &str, reason: impl Into<String>) -> Self {
        TagError::InvalidSelector {
            selector: selector.to_string(),
            reason: reason.into(),
        }
    }
}
