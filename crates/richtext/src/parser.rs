//! A tolerant markup driver that reads HTML-ish input and builds the
//! [`dom`](crate::dom) tree.
//!
//! The reader is configured for leniency: end-tag names are not checked
//! against start tags and stray end tags are ignored, so the sloppy markup
//! rich-text editors produce still parses. Hard syntax errors surface as
//! [`HtmlParseError`]; the compiler turns those into a visible error
//! paragraph rather than failing the request.

use crate::dom::{HtmlElement, HtmlNode};
use quick_xml::Reader;
use quick_xml::escape::unescape;
use quick_xml::events::{BytesStart, Event};
use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum HtmlParseError {
    #[error("Markup parsing failed: {0}")]
    Syntax(String),
}

/// Tags that never carry children and may appear unclosed.
const VOID_TAGS: &[&str] = &["br", "hr", "img", "input", "meta", "link", "source", "wbr"];

pub fn parse_html(source: &str) -> Result<Vec<HtmlNode>, HtmlParseError> {
    let mut reader = Reader::from_str(source);
    let config = reader.config_mut();
    config.check_end_names = false;
    config.allow_unmatched_ends = true;

    let mut root: Vec<HtmlNode> = Vec::new();
    let mut stack: Vec<HtmlElement> = Vec::new();

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                let element = element_from_tag(&e);
                if VOID_TAGS.contains(&element.tag.as_str()) {
                    append_node(&mut root, &mut stack, HtmlNode::Element(element));
                } else {
                    stack.push(element);
                }
            }
            Ok(Event::Empty(e)) => {
                let element = element_from_tag(&e);
                append_node(&mut root, &mut stack, HtmlNode::Element(element));
            }
            Ok(Event::Text(e)) => {
                let raw = String::from_utf8_lossy(e.as_ref()).into_owned();
                let text = match unescape(&raw) {
                    Ok(unescaped) => unescaped.into_owned(),
                    Err(_) => raw,
                };
                append_text(&mut root, &mut stack, &text);
            }
            Ok(Event::GeneralRef(e)) => {
                let name = String::from_utf8_lossy(e.as_ref()).into_owned();
                append_text(&mut root, &mut stack, &resolve_entity(&name));
            }
            Ok(Event::CData(e)) => {
                let text = String::from_utf8_lossy(e.as_ref()).into_owned();
                append_text(&mut root, &mut stack, &text);
            }
            Ok(Event::End(e)) => {
                let tag = String::from_utf8_lossy(e.local_name().as_ref()).to_lowercase();
                close_element(&mut root, &mut stack, &tag);
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(err) => return Err(HtmlParseError::Syntax(err.to_string())),
        }
    }

    // Attach anything left unclosed.
    while let Some(element) = stack.pop() {
        append_node(&mut root, &mut stack, HtmlNode::Element(element));
    }

    Ok(root)
}

fn element_from_tag(e: &BytesStart<'_>) -> HtmlElement {
    let tag = String::from_utf8_lossy(e.local_name().as_ref()).to_lowercase();
    let mut attrs = Vec::new();
    for attr in e.attributes().with_checks(false).flatten() {
        let key = String::from_utf8_lossy(attr.key.as_ref()).to_lowercase();
        let value = attr
            .unescape_value()
            .map(|value| value.into_owned())
            .unwrap_or_else(|_| String::from_utf8_lossy(&attr.value).into_owned());
        attrs.push((key, value));
    }
    HtmlElement { tag, attrs, children: Vec::new() }
}

fn append_node(root: &mut Vec<HtmlNode>, stack: &mut [HtmlElement], node: HtmlNode) {
    match stack.last_mut() {
        Some(parent) => parent.children.push(node),
        None => root.push(node),
    }
}

/// Append text, merging with a preceding text node so entity references do
/// not split one logical run into several.
fn append_text(root: &mut Vec<HtmlNode>, stack: &mut [HtmlElement], text: &str) {
    if text.is_empty() {
        return;
    }
    let target = match stack.last_mut() {
        Some(parent) => &mut parent.children,
        None => root,
    };
    if let Some(HtmlNode::Text(existing)) = target.last_mut() {
        existing.push_str(text);
    } else {
        target.push(HtmlNode::Text(text.to_string()));
    }
}

/// Close the innermost open element with the given tag; elements opened
/// after it are closed implicitly. A tag with no matching open element is
/// ignored.
fn close_element(root: &mut Vec<HtmlNode>, stack: &mut Vec<HtmlElement>, tag: &str) {
    let Some(index) = stack.iter().rposition(|element| element.tag == tag) else {
        return;
    };
    while stack.len() > index {
        if let Some(element) = stack.pop() {
            append_node(root, stack, HtmlNode::Element(element));
        }
    }
}

fn resolve_entity(name: &str) -> String {
    match name {
        "amp" => "&".to_string(),
        "lt" => "<".to_string(),
        "gt" => ">".to_string(),
        "quot" => "\"".to_string(),
        "apos" => "'".to_string(),
        "nbsp" => " ".to_string(),
        _ => {
            if let Some(code) = name.strip_prefix("#x").or_else(|| name.strip_prefix("#X")) {
                if let Some(c) = u32::from_str_radix(code, 16).ok().and_then(char::from_u32) {
                    return c.to_string();
                }
            } else if let Some(code) = name.strip_prefix('#') {
                if let Some(c) = code.parse::<u32>().ok().and_then(char::from_u32) {
                    return c.to_string();
                }
            }
            format!("&{};", name)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn first_element(nodes: &[HtmlNode]) -> &HtmlElement {
        match &nodes[0] {
            HtmlNode::Element(element) => element,
            other => panic!("expected element, got {:?}", other),
        }
    }

    #[test]
    fn parses_nested_elements_with_attributes() {
        let nodes = parse_html(r#"<p style="color: blue"><b>hi</b> there</p>"#).unwrap();
        assert_eq!(nodes.len(), 1);
        let p = first_element(&nodes);
        assert_eq!(p.tag, "p");
        assert_eq!(p.style(), Some("color: blue"));
        assert_eq!(p.children.len(), 2);
    }

    #[test]
    fn unclosed_tags_are_attached_at_eof() {
        let nodes = parse_html("<div><p>open").unwrap();
        let div = first_element(&nodes);
        assert_eq!(div.tag, "div");
        assert_eq!(div.children.len(), 1);
    }

    #[test]
    fn stray_end_tags_are_ignored() {
        let nodes = parse_html("</b>text</p>").unwrap();
        assert_eq!(nodes, vec![HtmlNode::Text("text".to_string())]);
    }

    #[test]
    fn void_tags_do_not_swallow_siblings() {
        let nodes = parse_html("<p>a<br>b</p>").unwrap();
        let p = first_element(&nodes);
        assert_eq!(p.children.len(), 3);
        assert!(matches!(&p.children[1], HtmlNode::Element(e) if e.tag == "br"));
    }

    #[test]
    fn entities_merge_into_surrounding_text() {
        let nodes = parse_html("<p>a &amp; b</p>").unwrap();
        let p = first_element(&nodes);
        assert_eq!(p.children, vec![HtmlNode::Text("a & b".to_string())]);
    }

    #[test]
    fn plain_text_input_is_a_single_text_node() {
        let nodes = parse_html("just some words").unwrap();
        assert_eq!(nodes, vec![HtmlNode::Text("just some words".to_string())]);
    }
}
