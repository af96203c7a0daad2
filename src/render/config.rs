use serde::{Deserialize, Serialize};

/// Options for markup rendering
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct MarkupOptions {
    /// End self-closing tags with ` />` (default: true); otherwise with a bare `>`
    pub close_void_tags: bool,
}

impl Default for MarkupOptions {
    fn default() -> Self {
        Self {
            close_void_tags: true,
        }
    }
}

impl MarkupOptions {
    /// Create options with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: set how self-closing tags end
    pub fn close_void_tags(mut self, close: bool) -> Self {
        self.close_void_tags = close;
        self
    }

    /// Load options from a JSON document; missing fields keep their defaults
    pub fn from_json(json: &str) -> crate::error::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub(crate) fn void_tag_end(&self) -> &'static str {
        if self.close_void_tags { " />" } else { ">" }
    }
}
