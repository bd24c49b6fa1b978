//! Compiler entry point: elements in input order to one HTML body plus one
//! stylesheet, in a single pass with no shared state between compiles.

use crate::css::{BASE_STYLESHEET, CANVAS_HEIGHT, CANVAS_WIDTH, canvas_rule};
use crate::element::Element;
use crate::renderers::{RenderContext, RendererRegistry};
use once_cell::sync::Lazy;
use pagesmith_style::StyleDefaults;
use pagesmith_types::Size;

static REGISTRY: Lazy<RendererRegistry> = Lazy::new(RendererRegistry::default);

/// Per-service compilation settings, injected once instead of living as
/// literals at the call sites.
#[derive(Debug, Clone)]
pub struct CompileOptions {
    /// Prefix for resolving relative image URLs in exported pages.
    pub base_url: String,
    pub canvas: Size,
    /// Label for the generated form submit button.
    pub submit_label: String,
    pub defaults: StyleDefaults,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            canvas: Size::new(CANVAS_WIDTH, CANVAS_HEIGHT),
            submit_label: "Submit".to_string(),
            defaults: StyleDefaults::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CompiledLayout {
    /// The canvas container with one fragment per element, in input order.
    pub html: String,
    /// Boilerplate stylesheet followed by one rule per element.
    pub css: String,
}

/// Compile an element batch. Infallible: per-element anomalies were
/// already defaulted during deserialization, unknown types render through
/// the generic arm, and an empty batch yields an empty canvas.
pub fn compile(elements: &[Element], options: &CompileOptions) -> CompiledLayout {
    let ctx = RenderContext::new(options, &REGISTRY);

    let mut body = String::new();
    for element in elements {
        body.push_str(&ctx.render_element(element));
        body.push('\n');
    }
    let html = format!("<div id=\"canvas\" class=\"canvas\">\n{}</div>", body);

    let mut css = String::with_capacity(BASE_STYLESHEET.len() + 256);
    css.push_str(BASE_STYLESHEET);
    css.push_str(&canvas_rule(options));
    for rule in ctx.take_rules() {
        css.push('\n');
        css.push_str(&rule);
    }

    CompiledLayout { html, css }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn elements_from(value: serde_json::Value) -> Vec<Element> {
        value
            .as_array()
            .expect("test input is an array")
            .iter()
            .map(Element::from_value_lenient)
            .collect()
    }

    fn compile_default(value: serde_json::Value) -> CompiledLayout {
        compile(&elements_from(value), &CompileOptions::default())
    }

    #[test]
    fn header_element_end_to_end() {
        let compiled = compile_default(json!([{
            "id": 1,
            "type": "header",
            "position": {"x": 10, "y": 20},
            "styles": {"color": "#ff0000"},
            "customText": "Hi"
        }]));

        assert!(compiled.css.contains("left: 10px;"));
        assert!(compiled.css.contains("top: 20px;"));
        assert!(compiled.css.contains("color: #ff0000;"));
        assert!(compiled.html.contains("<h1>Hi</h1>"));
        assert!(compiled.html.contains("id=\"header-1\""));
        assert!(compiled.css.contains("#header-1 {"));
    }

    #[test]
    fn one_rule_and_one_fragment_per_top_level_element() {
        let compiled = compile_default(json!([
            {"id": 1, "type": "text", "content": "a"},
            {"id": 2, "type": "button", "content": "b"},
            {"id": 3, "type": "mystery-widget", "content": "c"},
            {"id": 4, "type": "map"}
        ]));

        let rules = compiled.css.matches("position: absolute;").count();
        assert_eq!(rules, 4);
        for anchor in ["text-1", "button-2", "generic-3", "map-4"] {
            assert!(
                compiled.html.contains(&format!("id=\"{}\"", anchor)),
                "missing {}",
                anchor
            );
        }
    }

    #[test]
    fn unknown_type_falls_back_to_generic_container() {
        let compiled = compile_default(json!([
            {"id": 9, "type": "hologram", "content": "still here"}
        ]));
        assert!(compiled.html.contains("id=\"generic-9\""));
        assert!(compiled.html.contains("still here"));
    }

    #[test]
    fn children_emit_their_own_top_level_rules() {
        let compiled = compile_default(json!([{
            "id": 1,
            "type": "section",
            "children": [
                {"id": 2, "type": "text", "content": "inner", "position": {"x": 5, "y": 6}}
            ]
        }]));

        assert_eq!(compiled.css.matches("position: absolute;").count(), 2);
        assert!(compiled.html.contains("id=\"text-2\""));
        assert!(compiled.css.contains("#text-2 {"));
        // The child fragment nests inside the parent fragment.
        let section_start = compiled.html.find("id=\"section-1\"").unwrap();
        let child_start = compiled.html.find("id=\"text-2\"").unwrap();
        let section_end = compiled.html.find("</section>").unwrap();
        assert!(section_start < child_start && child_start < section_end);
    }

    #[test]
    fn user_content_is_escaped() {
        let compiled = compile_default(json!([
            {"id": 1, "type": "text", "content": "<script>alert('x')</script>"}
        ]));
        assert!(!compiled.html.contains("<script>"));
        assert!(compiled.html.contains("&lt;script&gt;"));
    }

    #[test]
    fn relative_image_urls_resolve_against_the_base_url() {
        let options = CompileOptions {
            base_url: "https://cdn.example.com/".to_string(),
            ..CompileOptions::default()
        };
        let elements = elements_from(json!([
            {"id": 1, "type": "image", "imageUrl": "/images/a.png"}
        ]));
        let compiled = compile(&elements, &options);
        assert!(compiled.html.contains("src=\"https://cdn.example.com/images/a.png\""));
        assert!(compiled.html.contains("onerror="));
    }

    #[test]
    fn absolute_image_urls_pass_through() {
        let elements = elements_from(json!([
            {"id": 1, "type": "image", "imageUrl": "https://elsewhere.net/pic.jpg"}
        ]));
        let compiled = compile(&elements, &CompileOptions::default());
        assert!(compiled.html.contains("src=\"https://elsewhere.net/pic.jpg\""));
    }

    #[test]
    fn form_fields_render_controls_and_submit() {
        let compiled = compile_default(json!([{
            "id": 1,
            "type": "form",
            "fields": [
                {"label": "Name", "type": "text", "placeholder": "Your name", "required": true},
                {"label": "Message", "type": "textarea"},
                {"label": "Topic", "type": "select", "options": ["One", "Two"]}
            ]
        }]));

        assert!(compiled.html.contains("placeholder=\"Your name\""));
        assert!(compiled.html.contains(" required"));
        assert!(compiled.html.contains("<textarea"));
        assert!(compiled.html.contains("<option>One</option>"));
        assert!(compiled.html.contains("<button type=\"submit\">Submit</button>"));
    }

    #[test]
    fn navbar_and_footer_render_their_items() {
        let compiled = compile_default(json!([
            {
                "id": 1,
                "type": "navbar",
                "content": "Acme",
                "items": [{"label": "Home", "href": "/"}, {"label": "About", "href": "/about"}]
            },
            {
                "id": 2,
                "type": "footer",
                "columns": [
                    {"title": "Company", "links": [{"label": "Jobs", "href": "/jobs"}]}
                ]
            }
        ]));

        assert!(compiled.html.contains("<span class=\"brand\">Acme</span>"));
        assert!(compiled.html.contains("<a href=\"/about\">About</a>"));
        assert!(compiled.html.contains("<h4>Company</h4>"));
        assert!(compiled.html.contains("<a href=\"/jobs\">Jobs</a>"));
    }

    #[test]
    fn grid_without_items_renders_placeholders() {
        let compiled = compile_default(json!([{"id": 1, "type": "grid"}]));
        assert_eq!(compiled.html.matches("grid-cell").count(), 3);
    }

    #[test]
    fn empty_batch_still_produces_a_canvas() {
        let compiled = compile(&[], &CompileOptions::default());
        assert!(compiled.html.contains("class=\"canvas\""));
        assert!(compiled.css.contains(".canvas {"));
        assert_eq!(compiled.css.matches("position: absolute;").count(), 0);
    }

    #[test]
    fn stylesheet_starts_with_the_boilerplate() {
        let compiled = compile_default(json!([{"id": 1, "type": "text"}]));
        assert!(compiled.css.starts_with(BASE_STYLESHEET));
        assert!(compiled.css.contains("width: 1440px;"));
        assert!(compiled.css.contains("height: 900px;"));
    }
}
