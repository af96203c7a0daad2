use crate::error::{Result, TagError};
use crate::selector::ParsedSelector;
use indexmap::IndexMap;

/// Characters that may precede `=` inside an attribute bracket
const OPERATOR_PREFIXES: &[char] = &['*', '^', '$', '|', '!', '~'];

/// Parse a single simple selector (`tag.class#id[attr=value]`) into its parts.
///
/// The selector must start with a tag name. Classes, the id and attribute brackets may
/// follow in any order. Anything else (whitespace, combinators, pseudo-classes) is skipped,
/// and a malformed attribute bracket is dropped with a warning. Only a missing tag name fails.
pub fn parse(selector: &str) -> Result<ParsedSelector> {
    if selector.trim().is_empty() {
        return Err(TagError::invalid_selector(selector, "selector is empty"));
    }

    let mut scanner = Scanner::new(selector);

    let tag = scanner
        .identifier(&['*'])
        .ok_or_else(|| TagError::invalid_selector(selector, "selector does not supply a valid tag"))?
        .to_ascii_lowercase();

    let mut classes: Vec<String> = Vec::new();
    let mut id: Option<String> = None;
    let mut bracketed: IndexMap<String, Option<String>> = IndexMap::new();

    while let Some(c) = scanner.peek() {
        match c {
            '.' => {
                scanner.bump();
                match scanner.identifier(&[]) {
                    Some(class) => classes.push(class),
                    None => log::debug!("Ignoring empty class token in selector '{}'", selector),
                }
            }
            '#' => {
                scanner.bump();
                match scanner.identifier(&[]) {
                    Some(value) if id.is_none() => id = Some(value),
                    Some(value) => log::warn!("Ignoring second id '{}' in selector '{}'", value, selector),
                    None => log::debug!("Ignoring empty id token in selector '{}'", selector),
                }
            }
            '[' => {
                scanner.bump();
                match scanner.attribute() {
                    Some((key, value)) => {
                        bracketed.insert(key, value);
                    }
                    None => {
                        log::warn!("Dropping malformed attribute bracket in selector '{}'", selector);
                        scanner.close_bracket();
                    }
                }
            }
            other => {
                log::debug!("Skipping unsupported character '{}' in selector '{}'", other, selector);
                scanner.bump();
            }
        }
    }

    // Bracketed class/id only count when the selector did not spell them out directly
    if classes.is_empty()
        && let Some(Some(value)) = bracketed.get("class")
    {
        classes = value.split_whitespace().map(str::to_string).collect();
    }
    if id.is_none()
        && let Some(Some(value)) = bracketed.get("id")
    {
        id = Some(value.clone());
    }

    let mut attributes = IndexMap::new();
    if !classes.is_empty() {
        attributes.insert("class".to_string(), Some(classes.join(" ")));
    }
    if let Some(id) = &id {
        attributes.insert("id".to_string(), Some(id.clone()));
    }
    for (key, value) in bracketed {
        attributes.entry(key).or_insert(value);
    }

    log::debug!(
        "Parsed selector '{}' into <{}> with {} class(es) and {} attribute(s)",
        selector,
        tag,
        classes.len(),
        attributes.len()
    );

    Ok(ParsedSelector {
        tag,
        classes,
        id,
        attributes,
    })
}

/// Cursor over the characters of a selector
struct Scanner {
    chars: Vec<char>,
    pos: usize,
}

impl Scanner {
    fn new(selector: &str) -> Self {
        Self {
            chars: selector.chars().collect(),
            pos: 0,
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<char> {
        self.chars.get(self.pos + offset).copied()
    }

    fn bump(&mut self) {
        self.pos += 1;
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.peek(), Some(' ' | '\t' | '\r' | '\n' | '\u{c}')) {
            self.bump();
        }
    }

    /// Read an identifier: escaped characters, word characters, hyphens and anything above
    /// U+00A0. `extra` widens the accepted set (`*` for tag names, `#` for bare values).
    fn identifier(&mut self, extra: &[char]) -> Option<String> {
        let mut ident = String::new();

        while let Some(c) = self.peek() {
            if c == '\\' {
                match self.peek_at(1) {
                    Some(escaped) => {
                        ident.push(escaped);
                        self.pos += 2;
                    }
                    None => break,
                }
            } else if is_identifier_char(c) || extra.contains(&c) {
                ident.push(c);
                self.bump();
            } else {
                break;
            }
        }

        if ident.is_empty() { None } else { Some(ident) }
    }

    /// Advance past the next `]`. Returns false when the selector ends first.
    fn close_bracket(&mut self) -> bool {
        while let Some(c) = self.peek() {
            self.bump();
            if c == ']' {
                return true;
            }
        }
        false
    }

    /// Read the remainder of an attribute bracket, the opening `[` already consumed.
    /// Returns `None` for a bracket without a name or without a closing `]`.
    fn attribute(&mut self) -> Option<(String, Option<String>)> {
        self.skip_whitespace();

        let key = self.identifier(&[])?;

        self.skip_whitespace();

        let has_operator = match self.peek() {
            Some('=') => {
                self.bump();
                true
            }
            Some(c) if OPERATOR_PREFIXES.contains(&c) && self.peek_at(1) == Some('=') => {
                self.pos += 2;
                true
            }
            _ => false,
        };

        let value = if has_operator {
            self.skip_whitespace();
            match self.peek() {
                Some(quote @ ('"' | '\'')) => {
                    self.bump();
                    let value = self.quoted(quote)?;
                    // Trailing flags such as ` i` carry no meaning here
                    if !self.close_bracket() {
                        return None;
                    }
                    Some(value)
                }
                _ => Some(self.unquoted()?),
            }
        } else {
            self.skip_whitespace();
            if self.peek() != Some(']') {
                return None;
            }
            self.bump();
            None
        };

        Some((key, value.filter(|v| !v.is_empty())))
    }

    /// Read an unquoted value up to the closing `]`, which is consumed. Surrounding
    /// whitespace is trimmed.
    fn unquoted(&mut self) -> Option<String> {
        let mut value = String::new();

        loop {
            match self.peek()? {
                '\\' => {
                    if let Some(escaped) = self.peek_at(1) {
                        value.push(escaped);
                    }
                    self.pos += 2;
                }
                ']' => {
                    self.bump();
                    return Some(value.trim().to_string());
                }
                c => {
                    value.push(c);
                    self.bump();
                }
            }
        }
    }

    /// Read a quoted value up to the matching unescaped quote, which is consumed.
    fn quoted(&mut self, quote: char) -> Option<String> {
        let mut value = String::new();

        loop {
            match self.peek()? {
                '\\' => {
                    if let Some(escaped) = self.peek_at(1) {
                        value.push(escaped);
                    }
                    self.pos += 2;
                }
                c if c == quote => {
                    self.bump();
                    return Some(value);
                }
                c => {
                    value.push(c);
                    self.bump();
                }
            }
        }
    }
}

fn is_identifier_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '-' || u32::from(c) > 0xA0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_tag_only() {
        let parsed = parse("div").unwrap();
        assert_eq!(parsed.tag, "div");
        assert!(parsed.classes.is_empty());
        assert_eq!(parsed.id, None);
        assert!(parsed.attributes.is_empty());
    }

    #[test]
    fn test_parse_full_selector() {
        let parsed = parse("a.btn.primary#go[href=\"/home\"][target=_blank]").unwrap();

        assert_eq!(parsed.tag, "a");
        assert_eq!(parsed.classes, vec!["btn", "primary"]);
        assert_eq!(parsed.id.as_deref(), Some("go"));
        assert_eq!(parsed.attributes["class"].as_deref(), Some("btn primary"));
        assert_eq!(parsed.attributes["id"].as_deref(), Some("go"));
        assert_eq!(parsed.attributes["href"].as_deref(), Some("/home"));
        assert_eq!(parsed.attributes["target"].as_deref(), Some("_blank"));
    }

    #[test]
    fn test_parse_tokens_in_any_order() {
        let parsed = parse("section[role=main]#content.wide").unwrap();

        assert_eq!(parsed.tag, "section");
        assert_eq!(parsed.classes, vec!["wide"]);
        assert_eq!(parsed.id.as_deref(), Some("content"));
        assert_eq!(parsed.attributes["role"].as_deref(), Some("main"));
    }

    #[test]
    fn test_parse_rejects_missing_tag() {
        assert!(matches!(parse(""), Err(TagError::InvalidSelector { .. })));
        assert!(matches!(parse("   "), Err(TagError::InvalidSelector { .. })));
        assert!(matches!(parse(".container"), Err(TagError::InvalidSelector { .. })));
        assert!(matches!(parse("#main"), Err(TagError::InvalidSelector { .. })));
    }

    #[test]
    fn test_parse_drops_malformed_brackets() {
        let parsed = parse("div.a[data-foo").unwrap();
        assert_eq!(parsed.tag, "div");
        assert_eq!(parsed.classes, vec!["a"]);
        assert!(!parsed.attributes.contains_key("data-foo"));

        let parsed = parse("div[data-foo=\"bar]").unwrap();
        assert!(!parsed.attributes.contains_key("data-foo"));

        let parsed = parse("div[].b[x y][ok=1]").unwrap();
        assert_eq!(parsed.classes, vec!["b"]);
        assert!(!parsed.attributes.contains_key("x"));
        assert_eq!(parsed.attributes["ok"].as_deref(), Some("1"));
    }

    #[test]
    fn test_parse_unquoted_values_run_to_bracket() {
        let parsed = parse("a[href=/home]").unwrap();
        assert_eq!(parsed.attributes["href"].as_deref(), Some("/home"));

        let parsed = parse("div[data-x=a.b]").unwrap();
        assert!(parsed.classes.is_empty());
        assert_eq!(parsed.attributes["data-x"].as_deref(), Some("a.b"));

        let parsed = parse("a[href=http://x.com][title= spaced out ]").unwrap();
        assert_eq!(parsed.attributes["href"].as_deref(), Some("http://x.com"));
        assert_eq!(parsed.attributes["title"].as_deref(), Some("spaced out"));
    }

    #[test]
    fn test_parse_quoted_value_with_flag() {
        let parsed = parse("a[type=\"A\" i].x").unwrap();
        assert_eq!(parsed.attributes["type"].as_deref(), Some("A"));
        assert_eq!(parsed.classes, vec!["x"]);
    }

    #[test]
    fn test_parse_lowercases_tag_name() {
        assert_eq!(parse("DIV.Box").unwrap().tag, "div");
        assert_eq!(parse("DIV.Box").unwrap().classes, vec!["Box"]);
    }

    #[test]
    fn test_parse_valueless_attribute() {
        let parsed = parse("input[disabled]").unwrap();
        assert!(parsed.attributes.contains_key("disabled"));
        assert_eq!(parsed.attributes["disabled"], None);

        let parsed = parse("input[value=\"\"]").unwrap();
        assert_eq!(parsed.attributes["value"], None);
    }

    #[test]
    fn test_parse_operators_keep_value() {
        let parsed = parse("a[href^=\"https\"][lang|=en][title*='x y']").unwrap();

        assert_eq!(parsed.attributes["href"].as_deref(), Some("https"));
        assert_eq!(parsed.attributes["lang"].as_deref(), Some("en"));
        assert_eq!(parsed.attributes["title"].as_deref(), Some("x y"));

        let parsed = parse("img[src$=\".png\"][rel~=icon][data-state!=off]").unwrap();

        assert_eq!(parsed.attributes["src"].as_deref(), Some(".png"));
        assert_eq!(parsed.attributes["rel"].as_deref(), Some("icon"));
        assert_eq!(parsed.attributes["data-state"].as_deref(), Some("off"));
    }

    #[test]
    fn test_parse_quoted_value_keeps_specials() {
        let parsed = parse("a[href=\"https://example.com/a.b?c=d\"]").unwrap();

        assert!(parsed.classes.is_empty());
        assert_eq!(
            parsed.attributes["href"].as_deref(),
            Some("https://example.com/a.b?c=d")
        );

        let parsed = parse(r#"span[title="say \"hi\""]"#).unwrap();
        assert_eq!(parsed.attributes["title"].as_deref(), Some("say \"hi\""));
    }

    #[test]
    fn test_parse_whitespace_inside_brackets() {
        let parsed = parse("div[ data-x = \"1\" ]").unwrap();
        assert_eq!(parsed.attributes["data-x"].as_deref(), Some("1"));
    }

    #[test]
    fn test_parse_keeps_duplicate_classes() {
        let parsed = parse("p.note.note").unwrap();
        assert_eq!(parsed.classes, vec!["note", "note"]);
        assert_eq!(parsed.attributes["class"].as_deref(), Some("note note"));
    }

    #[test]
    fn test_parse_selector_class_and_id_win_over_brackets() {
        let parsed = parse("div.a#b[class=c][id=d]").unwrap();
        assert_eq!(parsed.attributes["class"].as_deref(), Some("a"));
        assert_eq!(parsed.attributes["id"].as_deref(), Some("b"));
    }

    #[test]
    fn test_parse_bracket_class_and_id_seed_fields() {
        let parsed = parse("div[class=\"x y\"][id=z]").unwrap();
        assert_eq!(parsed.classes, vec!["x", "y"]);
        assert_eq!(parsed.id.as_deref(), Some("z"));
    }

    #[test]
    fn test_parse_first_id_wins() {
        let parsed = parse("div#one#two").unwrap();
        assert_eq!(parsed.id.as_deref(), Some("one"));
    }

    #[test]
    fn test_parse_unicode_and_escapes() {
        let parsed = parse("div.café.md\\:flex").unwrap();
        assert_eq!(parsed.classes, vec!["café", "md:flex"]);

        let parsed = parse("my-element.x").unwrap();
        assert_eq!(parsed.tag, "my-element");
    }

    #[test]
    fn test_parse_skips_unsupported_syntax() {
        let parsed = parse("li:first-child").unwrap();
        assert_eq!(parsed.tag, "li");
        assert!(parsed.classes.is_empty());
    }
}
