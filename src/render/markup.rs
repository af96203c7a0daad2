use crate::error::Result;
use crate::render::{MarkupOptions, Renderer, ensure_no_nested_content};
use crate::tag::{Child, Tag};

/// Serializes a tag tree into an HTML string.
///
/// Attribute values and text are written as given; nothing is escaped. A tag's text is
/// written before its children.
#[derive(Debug, Clone, Default)]
pub struct MarkupRenderer {
    options: MarkupOptions,
}

impl MarkupRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: MarkupOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &MarkupOptions {
        &self.options
    }

    fn write_tag(&self, tag: &Tag, output: &mut String) -> Result<()> {
        log::trace!("Rendering <{}> with {} child(ren)", tag.name(), tag.children().len());

        ensure_no_nested_content(tag)?;

        output.push('<');
        output.push_str(tag.name());

        for (key, value) in tag.attributes().rendered() {
            output.push(' ');
            output.push_str(key);
            output.push_str("=\"");
            output.push_str(value);
            output.push('"');
        }

        if tag.is_self_closing() {
            output.push_str(self.options.void_tag_end());
            return Ok(());
        }

        output.push('>');
        output.push_str(tag.text());

        for child in tag.children() {
            match child {
                Child::Markup(markup) => output.push_str(markup),
                Child::Tag(nested) => self.write_tag(nested, output)?,
            }
        }

        output.push_str("</");
        output.push_str(tag.name());
        output.push('>');

        Ok(())
    }
}

impl Renderer for MarkupRenderer {
    type Output = String;

    fn render(&mut self, tag: &Tag) -> Result<String> {
        let mut output = String::with_capacity(256);
        self.write_tag(tag, &mut output)?;
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TagError;

    fn render(tag: &Tag) -> String {
        MarkupRenderer::new().render(tag).unwrap()
    }

    #[test]
    fn test_render_text() {
        let mut tag = Tag::new("div.container").unwrap();
        tag.set_text("Test");

        assert_eq!(render(&tag), r#"<div class="container">Test</div>"#);
    }

    #[test]
    fn test_render_nested() {
        let mut tag = Tag::new("div.container").unwrap();
        tag.add(Tag::new("span.child").unwrap());

        assert_eq!(
            render(&tag),
            r#"<div class="container"><span class="child"></span></div>"#
        );
    }

    #[test]
    fn test_render_text_before_children() {
        let mut tag = Tag::new("p").unwrap();
        tag.add(Tag::new("b").unwrap()).set_text("Hello ");

        assert_eq!(render(&tag), "<p>Hello <b></b></p>");
    }

    #[test]
    fn test_render_markup_children_verbatim() {
        let mut tag = Tag::new("ul").unwrap();
        tag.add("<li>one</li>").add(Tag::new("li").unwrap().with_text("two"));

        assert_eq!(render(&tag), "<ul><li>one</li><li>two</li></ul>");
    }

    #[test]
    fn test_render_skips_unset_attributes() {
        let tag = Tag::new("input[disabled][name=q]#search").unwrap();

        assert_eq!(render(&tag), r#"<input id="search" name="q" />"#);
    }

    #[test]
    fn test_render_attribute_order_is_stable() {
        let tag = Tag::new("a.link#home[href=\"/\"][title=Home]").unwrap();
        let first = render(&tag);

        assert_eq!(first, r#"<a class="link" id="home" href="/" title="Home"></a>"#);
        assert_eq!(render(&tag), first);
    }

    #[test]
    fn test_render_self_closing() {
        assert_eq!(render(&Tag::new("br").unwrap()), "<br />");
        assert_eq!(
            render(&Tag::new("img[src=\"a.png\"]").unwrap()),
            r#"<img src="a.png" />"#
        );
    }

    #[test]
    fn test_render_self_closing_ignores_text() {
        let tag = Tag::new("hr").unwrap().with_text("ignored");
        assert_eq!(render(&tag), "<hr />");
    }

    #[test]
    fn test_render_void_style() {
        let mut renderer = MarkupRenderer::with_options(MarkupOptions::new().close_void_tags(false));
        let tag = Tag::new("meta[charset=utf-8]").unwrap();

        assert_eq!(renderer.render(&tag).unwrap(), r#"<meta charset="utf-8">"#);
        assert!(!renderer.options().close_void_tags);
    }

    #[test]
    fn test_render_rejects_nested_content_in_self_closing() {
        let mut img = Tag::new("img").unwrap();
        img.add(Tag::new("span").unwrap());

        let err = MarkupRenderer::new().render(&img).unwrap_err();
        assert!(matches!(err, TagError::NestedContent { ref tag } if tag == "img"));
    }

    #[test]
    fn test_render_rejects_deeply_nested_violation() {
        let tree = Tag::new("div")
            .unwrap()
            .with_child(Tag::new("p").unwrap().with_child(Tag::new("br").unwrap().with_child("x")));

        assert!(MarkupRenderer::new().render(&tree).is_err());
    }
}
