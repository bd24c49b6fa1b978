//! Allowlist HTML sanitizer applied to article content before persistence.
//!
//! Unknown tags are unwrapped (their children survive), script-like
//! subtrees are dropped outright, and attributes are filtered down to a
//! per-tag allowlist with scheme-checked links and a restricted set of
//! inline style properties.

use crate::dom::{HtmlElement, HtmlNode, css_declarations};
use crate::parser::parse_html;
use quick_xml::escape::escape;

const ALLOWED_TAGS: &[&str] = &[
    "a", "b", "br", "div", "em", "font", "h1", "h2", "h3", "i", "li", "ol", "p", "span", "strong",
    "u", "ul",
];

/// Subtrees removed entirely, content included.
const DROPPED_TAGS: &[&str] = &["script", "style", "iframe", "object", "embed", "head", "title"];

const ALLOWED_SCHEMES: &[&str] = &["http", "https", "mailto"];

const ALLOWED_STYLE_PROPERTIES: &[&str] = &[
    "color",
    "background-color",
    "font-family",
    "font-size",
    "font-style",
    "font-weight",
    "line-height",
    "text-align",
    "text-decoration",
];

/// Reduce arbitrary HTML to the allowlisted subset, re-emitted with all
/// text and attribute values escaped. Input that does not parse at all is
/// kept as escaped plain text.
pub fn sanitize_html(input: &str) -> String {
    match parse_html(input) {
        Ok(nodes) => {
            let mut out = String::with_capacity(input.len());
            for node in &nodes {
                write_node(&mut out, node);
            }
            out
        }
        Err(err) => {
            log::warn!("sanitizer falling back to plain text: {err}");
            escape(input).into_owned()
        }
    }
}

fn write_node(out: &mut String, node: &HtmlNode) {
    match node {
        HtmlNode::Text(text) => out.push_str(&escape(text.as_str())),
        HtmlNode::Element(element) => write_element(out, element),
    }
}

fn write_element(out: &mut String, element: &HtmlElement) {
    let tag = element.tag.as_str();
    if DROPPED_TAGS.contains(&tag) {
        return;
    }
    if !ALLOWED_TAGS.contains(&tag) {
        for child in &element.children {
            write_node(out, child);
        }
        return;
    }

    if tag == "br" {
        out.push_str("<br>");
        return;
    }

    out.push('<');
    out.push_str(tag);
    for (name, value) in filtered_attributes(element) {
        out.push(' ');
        out.push_str(&name);
        out.push_str("=\"");
        out.push_str(&escape(value.as_str()));
        out.push('"');
    }
    out.push('>');
    for child in &element.children {
        write_node(out, child);
    }
    out.push_str("</");
    out.push_str(tag);
    out.push('>');
}

fn filtered_attributes(element: &HtmlElement) -> Vec<(String, String)> {
    let mut kept = Vec::new();
    for (name, value) in &element.attrs {
        match (element.tag.as_str(), name.as_str()) {
            ("a", "href") => {
                if let Some(href) = safe_href(value) {
                    kept.push(("href".to_string(), href));
                }
            }
            ("a", "name") | ("a", "target") => kept.push((name.clone(), value.clone())),
            ("font", "color") | ("font", "face") => kept.push((name.clone(), value.clone())),
            (_, "style") => {
                let filtered = filter_style(value);
                if !filtered.is_empty() {
                    kept.push(("style".to_string(), filtered));
                }
            }
            _ => {}
        }
    }
    kept
}

/// Keep a link target only when it is relative or uses an allowed scheme.
fn safe_href(value: &str) -> Option<String> {
    let href = value.trim();
    if href.is_empty() {
        return None;
    }
    match href.split_once(':') {
        Some((scheme, _)) => {
            // A ':' after a path separator or fragment is not a scheme.
            if scheme.contains('/') || scheme.contains('#') || scheme.contains('?') {
                return Some(href.to_string());
            }
            if ALLOWED_SCHEMES.contains(&scheme.to_ascii_lowercase().as_str()) {
                Some(href.to_string())
            } else {
                None
            }
        }
        None => Some(href.to_string()),
    }
}

fn filter_style(css: &str) -> String {
    css_declarations(css)
        .filter(|(property, _)| ALLOWED_STYLE_PROPERTIES.contains(&property.as_str()))
        .map(|(property, value)| format!("{}: {}", property, value))
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn script_subtrees_are_dropped_entirely() {
        let out = sanitize_html("<p>safe</p><script>alert('x')</script>");
        assert_eq!(out, "<p>safe</p>");
    }

    #[test]
    fn unknown_tags_are_unwrapped_but_text_survives() {
        let out = sanitize_html("<article><p>kept</p></article>");
        assert_eq!(out, "<p>kept</p>");
    }

    #[test]
    fn javascript_links_are_stripped() {
        let out = sanitize_html(r#"<a href="javascript:alert(1)">x</a>"#);
        assert_eq!(out, "<a>x</a>");
    }

    #[test]
    fn http_and_relative_links_survive() {
        let out = sanitize_html(r#"<a href="https://example.com" target="_blank">x</a>"#);
        assert!(out.contains(r#"href="https://example.com""#));
        assert!(out.contains(r#"target="_blank""#));

        let relative = sanitize_html(r#"<a href="/articles/one">x</a>"#);
        assert!(relative.contains(r#"href="/articles/one""#));
    }

    #[test]
    fn style_declarations_are_filtered() {
        let out = sanitize_html(
            r#"<span style="color: red; position: absolute; font-weight: bold">x</span>"#,
        );
        assert!(out.contains("color: red"));
        assert!(out.contains("font-weight: bold"));
        assert!(!out.contains("position"));
    }

    #[test]
    fn event_handler_attributes_are_removed() {
        let out = sanitize_html(r#"<p onclick="evil()">x</p>"#);
        assert_eq!(out, "<p>x</p>");
    }

    #[test]
    fn text_is_escaped_on_output() {
        let out = sanitize_html("<p>a < b && c</p>");
        assert!(!out.contains("&&"));
        assert!(out.contains("&amp;"));
    }
}
