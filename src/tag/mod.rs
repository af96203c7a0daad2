//! Element nodes and their fluent mutation API
//!
//! This module provides:
//! - Tag: an element built from a selector, with chaining mutators
//! - Child: nested tag or pre-rendered markup content
//! - Attributes: the ordered attribute map behind a tag

pub mod attributes;
pub mod element;

pub use attributes::Attributes;
pub use element::{Child, SELF_CLOSING_TAGS, Tag};

use crate::error::Result;

/// Create a tag from a selector, e.g. `tag("div.container")?`
pub fn tag(selector: &str) -> Result<Tag> {
    Tag::new(selector)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_factory() {
        let div = tag("div.container").unwrap();
        assert_eq!(div.name(), "div");
        assert!(tag("[data-x]").is_err());
    }

    #[test]
    fn test_attributes_export() {
        let attrs = Attributes::new();
        assert!(attrs.is_empty());
    }
}
