use crate::error::Result;
use crate::render::{Renderer, ensure_no_nested_content};
use crate::tag::{Child, Tag};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Host capability for building native element trees
pub trait Document {
    type Node;

    fn create_element(&mut self, name: &str) -> Self::Node;

    fn create_text(&mut self, text: &str) -> Self::Node;

    fn set_attribute(&mut self, element: &mut Self::Node, key: &str, value: &str);

    fn set_text_content(&mut self, element: &mut Self::Node, text: &str);

    fn append_child(&mut self, parent: &mut Self::Node, child: Self::Node);
}

/// Builds a host element tree from a tag tree.
///
/// A tag with children gets only its children; its text is dropped. A childless tag gets
/// its text as content. Markup-string children are handed to the host as text nodes.
#[derive(Debug, Default)]
pub struct NativeTreeRenderer<D: Document> {
    document: D,
}

impl<D: Document> NativeTreeRenderer<D> {
    pub fn new(document: D) -> Self {
        Self { document }
    }

    pub fn document(&self) -> &D {
        &self.document
    }

    pub fn into_document(self) -> D {
        self.document
    }

    fn build(&mut self, tag: &Tag) -> Result<D::Node> {
        log::trace!("Building native <{}> with {} child(ren)", tag.name(), tag.children().len());

        ensure_no_nested_content(tag)?;

        let mut element = self.document.create_element(tag.name());

        if tag.children().is_empty() {
            if !tag.text().is_empty() {
                self.document.set_text_content(&mut element, tag.text());
            }
        } else {
            for child in tag.children() {
                let node = match child {
                    Child::Tag(nested) => self.build(nested)?,
                    Child::Markup(markup) => self.document.create_text(markup),
                };
                self.document.append_child(&mut element, node);
            }
        }

        for (key, value) in tag.attributes().rendered() {
            self.document.set_attribute(&mut element, key, value);
        }

        Ok(element)
    }
}

impl<D: Document> Renderer for NativeTreeRenderer<D> {
    type Output = D::Node;

    fn render(&mut self, tag: &Tag) -> Result<D::Node> {
        self.build(tag)
    }
}

/// Node of an in-memory element tree
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum FragmentNode {
    Element {
        name: String,
        #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
        attributes: IndexMap<String, String>,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        children: Vec<FragmentNode>,
    },
    Text {
        content: String,
    },
}

impl FragmentNode {
    /// Element name, `None` for text nodes
    pub fn name(&self) -> Option<&str> {
        match self {
            FragmentNode::Element { name, .. } => Some(name.as_str()),
            FragmentNode::Text { .. } => None,
        }
    }

    pub fn attr(&self, key: &str) -> Option<&str> {
        match self {
            FragmentNode::Element { attributes, .. } => attributes.get(key).map(String::as_str),
            FragmentNode::Text { .. } => None,
        }
    }

    pub fn children(&self) -> &[FragmentNode] {
        match self {
            FragmentNode::Element { children, .. } => children.as_slice(),
            FragmentNode::Text { .. } => &[],
        }
    }

    /// Concatenated text of this node and its descendants
    pub fn text_content(&self) -> String {
        match self {
            FragmentNode::Text { content } => content.clone(),
            FragmentNode::Element { children, .. } => {
                children.iter().map(FragmentNode::text_content).collect()
            }
        }
    }
}

/// In-memory [`Document`] producing [`FragmentNode`] trees
#[derive(Debug, Default)]
pub struct FragmentDocument {
    created: usize,
}

impl FragmentDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of nodes created so far
    pub fn nodes_created(&self) -> usize {
        self.created
    }
}

impl Document for FragmentDocument {
    type Node = FragmentNode;

    fn create_element(&mut self, name: &str) -> FragmentNode {
        self.created += 1;
        FragmentNode::Element {
            name: name.to_string(),
            attributes: IndexMap::new(),
            children: Vec::new(),
        }
    }

    fn create_text(&mut self, text: &str) -> FragmentNode {
        self.created += 1;
        FragmentNode::Text {
            content: text.to_string(),
        }
    }

    fn set_attribute(&mut self, element: &mut FragmentNode, key: &str, value: &str) {
        if let FragmentNode::Element { attributes, .. } = element {
            attributes.insert(key.to_string(), value.to_string());
        }
    }

    fn set_text_content(&mut self, element: &mut FragmentNode, text: &str) {
        match element {
            FragmentNode::Element { children, .. } => {
                let text = self.create_text(text);
                *children = vec![text];
            }
            FragmentNode::Text { content } => *content = text.to_string(),
        }
    }

    fn append_child(&mut self, parent: &mut FragmentNode, child: FragmentNode) {
        match parent {
            FragmentNode::Element { children, .. } => children.push(child),
            FragmentNode::Text { .. } => log::warn!("Cannot append a child to a text node"),
        }
    }
}
