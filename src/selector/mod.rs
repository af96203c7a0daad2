//! Selector parsing
//!
//! Turns a single simple CSS selector such as `div.container#main[data-foo="bar"]` into the
//! identity of one element: its tag name, class list, id and attribute map. This is not a
//! selector engine; combinators and pseudo-classes carry no meaning here.

pub mod parser;

pub use parser::parse;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Result of parsing a selector
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ParsedSelector {
    /// Lowercased tag name
    pub tag: String,

    /// Class tokens in selector order, duplicates preserved
    pub classes: Vec<String>,

    /// Id from the `#id` token (or an `[id=...]` bracket)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Attribute map, including `class` and `id` when present.
    /// A `None` value marks a key given without a value (`[disabled]`).
    pub attributes: IndexMap<String, Option<String>>,
}

impl ParsedSelector {
    /// Space-joined class tokens
    pub fn class_name(&self) -> String {
        self.classes.join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_class_name() {
        let parsed = parse("div.one.two").unwrap();
        assert_eq!(parsed.class_name(), "one two");
        assert_eq!(parse("div").unwrap().class_name(), "");
    }

    #[test]
    fn test_parsed_selector_serialization() {
        let parsed = parse("div.container[data-foo=\"bar\"]").unwrap();

        let json = serde_json::to_string(&parsed).unwrap();
        assert!(json.contains("\"tag\":\"div\""));
        assert!(!json.contains("\"id\":"));

        let deserialized: ParsedSelector = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, deserialized);
    }
}
