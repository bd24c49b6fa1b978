//! The rich-text compiler: walks the parsed tree and emits styled
//! paragraphs, honoring inherited formatting down the node tree.

use crate::dom::{HtmlElement, HtmlNode, css_declarations};
use crate::parser::parse_html;
use pagesmith_doc::{Alignment, Paragraph, TextRun};
use pagesmith_style::{
    StyleDefaults, StyleMap, normalize_color, normalize_font_size, normalize_font_size_css,
    normalize_line_height,
};

/// The effective text style at one point of the tree: the parent's resolved
/// style with this node's overrides merged on top. Immutable once built;
/// each child receives its own copy.
#[derive(Debug, Clone, PartialEq)]
struct ResolvedTextStyle {
    font_family: String,
    size_half_points: u32,
    color: String,
    bold: bool,
    italic: bool,
    underline: bool,
}

impl ResolvedTextStyle {
    fn from_base(styles: &StyleMap, defaults: &StyleDefaults) -> Self {
        let font_family = styles
            .get_str("fontFamily")
            .map(clean_font_family)
            .filter(|family| !family.is_empty())
            .unwrap_or_else(|| defaults.font_family.clone());
        let size_half_points =
            normalize_font_size(styles.get("fontSize"), defaults.font_size_half_points);
        let color = match styles.get_str("color") {
            Some(value) => normalize_color(Some(value)),
            None => defaults.color.clone(),
        };
        Self {
            font_family,
            size_half_points,
            color,
            bold: false,
            italic: false,
            underline: false,
        }
    }

    fn run(&self, text: String) -> TextRun {
        TextRun {
            text,
            font_family: self.font_family.clone(),
            size_half_points: self.size_half_points,
            color: self.color.clone(),
            bold: self.bold,
            italic: self.italic,
            underline: self.underline,
        }
    }
}

/// Compile an HTML fragment into paragraphs of styled runs.
///
/// Total over its whole input domain: malformed markup yields a marked error
/// paragraph, empty output yields a placeholder paragraph, and nothing in
/// between returns an error or panics.
pub fn compile(html: &str, base_styles: &StyleMap, defaults: &StyleDefaults) -> Vec<Paragraph> {
    let base = ResolvedTextStyle::from_base(base_styles, defaults);
    let line_spacing = normalize_line_height(base_styles.get("lineHeight"));

    let nodes = match parse_html(html) {
        Ok(nodes) => nodes,
        Err(err) => {
            log::warn!("rich-text input did not parse: {err}");
            return vec![error_paragraph(defaults, line_spacing)];
        }
    };

    let mut paragraphs = Vec::new();
    for node in &nodes {
        match node {
            HtmlNode::Text(text) => {
                let collapsed = collapse_whitespace(text);
                if collapsed.is_empty() {
                    continue;
                }
                paragraphs.push(Paragraph {
                    runs: vec![base.run(collapsed)],
                    alignment: Alignment::Left,
                    heading_level: None,
                    line_spacing,
                });
            }
            HtmlNode::Element(element) => {
                let mut runs = Vec::new();
                collect_runs(element, &base, &mut runs);
                if runs.is_empty() {
                    continue;
                }
                paragraphs.push(Paragraph {
                    runs,
                    alignment: alignment_of(element),
                    heading_level: heading_level_of(&element.tag),
                    line_spacing,
                });
            }
        }
    }

    if paragraphs.is_empty() {
        paragraphs.push(Paragraph {
            runs: vec![base.run("No content".to_string())],
            alignment: Alignment::Left,
            heading_level: None,
            line_spacing,
        });
    }

    paragraphs
}

fn collect_runs(element: &HtmlElement, inherited: &ResolvedTextStyle, runs: &mut Vec<TextRun>) {
    if element.tag == "br" {
        runs.push(inherited.run("\n".to_string()));
        return;
    }

    let resolved = resolve_element_style(element, inherited);
    for child in &element.children {
        match child {
            HtmlNode::Text(text) => {
                let collapsed = collapse_whitespace(text);
                if !collapsed.is_empty() {
                    runs.push(resolved.run(collapsed));
                }
            }
            HtmlNode::Element(child_element) => collect_runs(child_element, &resolved, runs),
        }
    }
}

/// Merge an element's own formatting onto the inherited style. Tag
/// semantics first, then inline declarations, so `style` wins over the tag.
fn resolve_element_style(
    element: &HtmlElement,
    inherited: &ResolvedTextStyle,
) -> ResolvedTextStyle {
    let mut resolved = inherited.clone();

    match element.tag.as_str() {
        "b" | "strong" => resolved.bold = true,
        "i" | "em" => resolved.italic = true,
        "u" => resolved.underline = true,
        "font" => {
            if let Some(color) = element.attr("color") {
                resolved.color = normalize_color(Some(color));
            }
            if let Some(face) = element.attr("face") {
                let family = clean_font_family(face);
                if !family.is_empty() {
                    resolved.font_family = family;
                }
            }
        }
        _ => {}
    }

    if let Some(css) = element.style() {
        for (property, value) in css_declarations(css) {
            match property.as_str() {
                "color" => resolved.color = normalize_color(Some(&value)),
                "font-family" => {
                    let family = clean_font_family(&value);
                    if !family.is_empty() {
                        resolved.font_family = family;
                    }
                }
                "font-size" => {
                    resolved.size_half_points =
                        normalize_font_size_css(&value, resolved.size_half_points);
                }
                "font-weight" => {
                    if is_bold_weight(&value) {
                        resolved.bold = true;
                    }
                }
                "font-style" => {
                    if value.eq_ignore_ascii_case("italic") {
                        resolved.italic = true;
                    }
                }
                "text-decoration" => {
                    if value.to_lowercase().contains("underline") {
                        resolved.underline = true;
                    }
                }
                _ => {}
            }
        }
    }

    resolved
}

fn alignment_of(element: &HtmlElement) -> Alignment {
    let Some(css) = element.style() else {
        return Alignment::Left;
    };
    for (property, value) in css_declarations(css) {
        if property == "text-align" {
            return match value.to_lowercase().as_str() {
                "center" => Alignment::Center,
                "right" => Alignment::Right,
                "justify" => Alignment::Justify,
                _ => Alignment::Left,
            };
        }
    }
    Alignment::Left
}

fn heading_level_of(tag: &str) -> Option<u8> {
    match tag {
        "h1" => Some(1),
        "h2" => Some(2),
        "h3" => Some(3),
        _ => None,
    }
}

fn is_bold_weight(value: &str) -> bool {
    let v = value.trim().to_lowercase();
    if v == "bold" || v == "bolder" {
        return true;
    }
    v.parse::<u32>().map(|weight| weight >= 600).unwrap_or(false)
}

/// Strip quotes, keep the first family of a comma-separated list.
fn clean_font_family(value: &str) -> String {
    value
        .split(',')
        .next()
        .unwrap_or("")
        .trim()
        .trim_matches(|c| c == '"' || c == '\'')
        .trim()
        .to_string()
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn error_paragraph(defaults: &StyleDefaults, line_spacing: f32) -> Paragraph {
    Paragraph {
        runs: vec![TextRun {
            text: "Unable to format this content.".to_string(),
            font_family: defaults.font_family.clone(),
            size_half_points: defaults.font_size_half_points,
            color: "FF0000".to_string(),
            bold: false,
            italic: false,
            underline: false,
        }],
        alignment: Alignment::Left,
        heading_level: None,
        line_spacing,
    }
}
