//! Rendering tags
//!
//! Two output modes sit behind the [`Renderer`] trait and are picked explicitly by the caller:
//! - [`MarkupRenderer`]: serializes a tag tree into an HTML string
//! - [`NativeTreeRenderer`]: builds a tree of host elements through a [`Document`]
//!
//! Both reject a self-closing tag that carries children.

pub mod config;
pub mod fragment;
pub mod markup;

pub use config::MarkupOptions;
pub use fragment::{Document, FragmentDocument, FragmentNode, NativeTreeRenderer};
pub use markup::MarkupRenderer;

use crate::error::{Result, TagError};
use crate::tag::Tag;

/// Output capability for a tag tree
pub trait Renderer {
    type Output;

    fn render(&mut self, tag: &Tag) -> Result<Self::Output>;
}

/// Self-closing tags must never carry nested content
fn ensure_no_nested_content(tag: &Tag) -> Result<()> {
    if tag.is_self_closing() && !tag.children().is_empty() {
        return Err(TagError::NestedContent {
            tag: tag.name().to_string(),
        });
    }
    Ok(())
}
