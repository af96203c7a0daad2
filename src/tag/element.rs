use crate::error::{Result, TagError};
use crate::render::{MarkupRenderer, Renderer};
use crate::selector::{self, ParsedSelector};
use crate::tag::attributes::Attributes;
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;

/// Tag names that never carry nested content
pub const SELF_CLOSING_TAGS: &[&str] = &[
    "area", "base", "basefont", "br", "hr", "input", "img", "link", "meta",
];

/// Content slot of a tag: a nested tag or an already-rendered markup fragment
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum Child {
    /// Pre-rendered markup, emitted verbatim
    Markup(String),
    /// Nested tag, rendered recursively
    Tag(Tag),
}

impl From<Tag> for Child {
    fn from(tag: Tag) -> Self {
        Child::Tag(tag)
    }
}

impl From<String> for Child {
    fn from(markup: String) -> Self {
        Child::Markup(markup)
    }
}

impl From<&str> for Child {
    fn from(markup: &str) -> Self {
        Child::Markup(markup.to_string())
    }
}

/// A markup element built from a selector.
///
/// The tag name is fixed at construction. Classes are tracked both as an ordered list and
/// as the space-joined `class` attribute; every mutator keeps the two in step. The id lives
/// only in the attribute map.
///
/// Mutators return `&mut Self` so calls chain. Invalid arguments (an empty key, value or
/// class name) are ignored with a warning rather than reported as errors.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Tag {
    name: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    classes: Vec<String>,

    #[serde(default)]
    attributes: Attributes,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    text: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    children: Vec<Child>,
}

impl Tag {
    /// Create a new tag from a selector such as `div.container[data-foo="bar"]`
    pub fn new(selector: &str) -> Result<Self> {
        Self::from_parsed(selector::parse(selector)?)
    }

    /// Create a tag from an already parsed selector.
    ///
    /// The name is lowercased and must not be empty. The class list wins over the `class`
    /// entry of the attribute map; with no classes listed, the `class` entry seeds them.
    /// A listed id fills in a missing `id` entry.
    pub fn from_parsed(parsed: ParsedSelector) -> Result<Self> {
        let name = parsed.tag.trim().to_ascii_lowercase();
        if name.is_empty() {
            return Err(TagError::invalid_selector(&parsed.tag, "selector does not supply a valid tag"));
        }

        let mut attributes = Attributes::from(parsed.attributes);
        if let Some(id) = parsed.id.filter(|id| !id.is_empty())
            && !attributes.is_set("id")
        {
            attributes.insert("id", Some(id));
        }

        let mut tag = Self {
            name,
            classes: Vec::new(),
            attributes,
            text: String::new(),
            children: Vec::new(),
        };

        let classes: Vec<String> = parsed
            .classes
            .iter()
            .flat_map(|class| class.split_whitespace())
            .map(str::to_string)
            .collect();

        if classes.is_empty() {
            let seeded: Vec<String> = tag
                .attributes
                .get("class")
                .map(|value| value.split_whitespace().map(str::to_string).collect())
                .unwrap_or_default();
            tag.classes = seeded;
        } else {
            tag.classes = classes;
        }
        tag.sync_class_attribute();

        Ok(tag)
    }

    /// Lowercase tag name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Element id, read from the `id` attribute
    pub fn id(&self) -> Option<&str> {
        self.attributes.get("id")
    }

    /// Class tokens in order
    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    /// Check if the tag carries a specific class
    pub fn has_class(&self, class_name: &str) -> bool {
        self.classes.iter().any(|c| c == class_name)
    }

    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn children(&self) -> &[Child] {
        &self.children
    }

    /// Whether this tag belongs to [`SELF_CLOSING_TAGS`]
    pub fn is_self_closing(&self) -> bool {
        SELF_CLOSING_TAGS.contains(&self.name.as_str())
    }

    /// Append a child. Self-closing tags accept the call; rendering rejects them later.
    pub fn add(&mut self, child: impl Into<Child>) -> &mut Self {
        self.children.push(child.into());
        self
    }

    /// Append zero or more children in order
    pub fn add_all<I, C>(&mut self, children: I) -> &mut Self
    where
        I: IntoIterator<Item = C>,
        C: Into<Child>,
    {
        self.children.extend(children.into_iter().map(Into::into));
        self
    }

    pub fn add_if(&mut self, condition: bool, child: impl Into<Child>) -> &mut Self {
        if condition {
            self.add(child);
        }
        self
    }

    /// Get attribute value by key
    pub fn get_attr(&self, key: &str) -> Option<&str> {
        self.attributes.get(key)
    }

    /// Set an attribute, overwriting any existing value.
    /// Setting `class` replaces the class list with the tokens of `value`.
    pub fn set_attr(&mut self, key: &str, value: impl Into<String>) -> &mut Self {
        let value = value.into();

        if key.is_empty() || value.is_empty() {
            log::warn!(
                "Ignoring set_attr on <{}> with empty key or value (key: '{}')",
                self.name,
                key
            );
            return self;
        }

        if key == "class" {
            self.classes = Vec::new();
            for token in value.split_whitespace() {
                if !self.has_class(token) {
                    self.classes.push(token.to_string());
                }
            }
            self.sync_class_attribute();
        } else {
            self.attributes.insert(key, Some(value));
        }

        self
    }

    /// Set an attribute only if it does not already hold a value
    pub fn add_attr(&mut self, key: &str, value: impl Into<String>) -> &mut Self {
        if self.attributes.is_set(key) {
            log::debug!("Keeping existing '{}' attribute on <{}>", key, self.name);
            return self;
        }
        self.set_attr(key, value)
    }

    /// Non-destructively merge several attributes, see [`Tag::add_attr`]
    pub fn merge_attrs<I, K, V>(&mut self, attributes: I) -> &mut Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        for (key, value) in attributes {
            self.add_attr(key.as_ref(), value);
        }
        self
    }

    pub fn add_attr_if(&mut self, condition: bool, key: &str, value: impl Into<String>) -> &mut Self {
        if condition {
            self.add_attr(key, value);
        }
        self
    }

    /// Remove an attribute; absent keys are fine. Removing `class` clears the class list.
    pub fn remove_attr(&mut self, key: &str) -> &mut Self {
        self.attributes.remove(key);
        if key == "class" {
            self.classes.clear();
        }
        self
    }

    pub fn remove_attr_if(&mut self, condition: bool, key: &str) -> &mut Self {
        if condition {
            self.remove_attr(key);
        }
        self
    }

    /// Add one or more whitespace-separated classes, skipping ones already present
    pub fn add_class(&mut self, class_name: &str) -> &mut Self {
        if class_name.trim().is_empty() {
            log::warn!("Ignoring add_class on <{}> with empty class name", self.name);
            return self;
        }

        let mut changed = false;
        for token in class_name.split_whitespace() {
            if !self.has_class(token) {
                self.classes.push(token.to_string());
                changed = true;
            }
        }

        if changed {
            self.sync_class_attribute();
        }
        self
    }

    /// Remove one or more whitespace-separated classes; missing ones are ignored
    pub fn remove_class(&mut self, class_name: &str) -> &mut Self {
        if class_name.trim().is_empty() {
            log::warn!("Ignoring remove_class on <{}> with empty class name", self.name);
            return self;
        }

        let before = self.classes.len();
        let tokens: Vec<&str> = class_name.split_whitespace().collect();
        self.classes.retain(|c| !tokens.contains(&c.as_str()));

        if self.classes.len() != before {
            self.sync_class_attribute();
        }
        self
    }

    pub fn add_class_if(&mut self, condition: bool, class_name: &str) -> &mut Self {
        if condition {
            self.add_class(class_name);
        }
        self
    }

    pub fn remove_class_if(&mut self, condition: bool, class_name: &str) -> &mut Self {
        if condition {
            self.remove_class(class_name);
        }
        self
    }

    /// Replace the text content with the string form of `value`
    pub fn set_text(&mut self, value: impl Display) -> &mut Self {
        self.text = value.to_string();
        self
    }

    /// Builder method: append a child
    pub fn with_child(mut self, child: impl Into<Child>) -> Self {
        self.add(child);
        self
    }

    /// Builder method: set text content
    pub fn with_text(mut self, value: impl Display) -> Self {
        self.set_text(value);
        self
    }

    /// Builder method: add a class
    pub fn with_class(mut self, class_name: &str) -> Self {
        self.add_class(class_name);
        self
    }

    /// Builder method: set an attribute
    pub fn with_attr(mut self, key: &str, value: impl Into<String>) -> Self {
        self.set_attr(key, value);
        self
    }

    /// Render to a markup string with default options
    pub fn render(&self) -> Result<String> {
        MarkupRenderer::default().render(self)
    }

    /// Render through any renderer
    pub fn render_with<R: Renderer>(&self, renderer: &mut R) -> Result<R::Output> {
        renderer.render(self)
    }

    /// Export the tag tree to JSON for debugging
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(TagError::from)
    }

    fn sync_class_attribute(&mut self) {
        if self.classes.is_empty() {
            self.attributes.remove("class");
        } else {
            self.attributes.insert("class", Some(self.classes.join(" ")));
        }
    }
}

impl FromStr for Tag {
    type Err = TagError;

    fn from_str(selector: &str) -> Result<Self> {
        Tag::new(selector)
    }
}
