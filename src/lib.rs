//! # tag-builder
//!
//! A small Rust library for building markup elements from CSS selectors.
//!
//! ## Features
//!
//! - **Selector Parsing**: `div.container#main[data-foo="bar"]` becomes a tag name, class list, id and attribute map
//! - **Fluent Mutation**: chainable methods for children, text, attributes and classes
//! - **Markup Rendering**: serialize a tag tree to an HTML string
//! - **Native Trees**: build host element trees through the [`Document`] trait
//!
//! ## Basic Usage
//!
//! ```rust
//! use tag_builder::Tag;
//!
//! # fn main() -> tag_builder::Result<()> {
//! let mut tag = Tag::new("div.container")?;
//! tag.set_text("Test");
//!
//! assert_eq!(tag.render()?, r#"<div class="container">Test</div>"#);
//! # Ok(())
//! # }
//! ```
//!
//! ### Nesting and Chaining
//!
//! ```rust
//! use tag_builder::{Tag, tag};
//!
//! # fn main() -> tag_builder::Result<()> {
//! let mut list = tag("ul.menu")?;
//! list.add(tag("li")?.with_text("Home"))
//!     .add_if(false, tag("li")?.with_text("Admin"))
//!     .add("<li>raw markup</li>")
//!     .add_class("open")
//!     .set_attr("role", "menu");
//!
//! assert_eq!(
//!     list.render()?,
//!     r#"<ul class="menu open" role="menu"><li>Home</li><li>raw markup</li></ul>"#
//! );
//! # Ok(())
//! # }
//! ```
//!
//! ### Native Trees
//!
//! ```rust
//! use tag_builder::{FragmentDocument, NativeTreeRenderer, Tag};
//!
//! # fn main() -> tag_builder::Result<()> {
//! let tag = Tag::new("div.container")?.with_child(Tag::new("span.child")?);
//! let mut renderer = NativeTreeRenderer::new(FragmentDocument::new());
//!
//! let node = tag.render_with(&mut renderer)?;
//! assert_eq!(node.children().len(), 1);
//! # Ok(())
//! # }
//! ```
//!
//! ## Module Overview
//!
//! - [`selector`]: Selector parsing into tag identity
//! - [`tag`]: The element node and its mutation API
//! - [`render`]: Markup and native tree renderers
//! - [`error`]: Error types and result aliases

pub mod error;
pub mod render;
pub mod selector;
pub mod tag;

pub use error::{Result, TagError};
pub use render::{
    Document, FragmentDocument, FragmentNode, MarkupOptions, MarkupRenderer, NativeTreeRenderer,
    Renderer,
};
pub use selector::{ParsedSelector, parse};
pub use tag::{Attributes, Child, SELF_CLOSING_TAGS, Tag, tag};
