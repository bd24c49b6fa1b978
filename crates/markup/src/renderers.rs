//! The per-type fragment renderers and the dispatch table that selects
//! them.
//!
//! Every renderer receives the shared [`RenderContext`], the element and
//! its precomputed anchor, and returns a complete HTML fragment. Adding an
//! element type is a table entry, not a new branch in a switch.

use crate::compiler::CompileOptions;
use crate::css::element_rule;
use crate::element::{Element, ElementKind, anchor_for};
use quick_xml::escape::escape;
use std::cell::{Cell, RefCell};
use std::collections::HashMap;

/// Inline placeholder swapped in by the generated `onerror` handler when an
/// image fails to load in an exported page.
pub const IMAGE_FALLBACK_DATA_URI: &str = "data:image/svg+xml,%3Csvg%20xmlns=%22http://www.w3.org/2000/svg%22%20width=%22160%22%20height=%22120%22%3E%3Crect%20width=%22100%25%22%20height=%22100%25%22%20fill=%22%23e5e7eb%22/%3E%3Ctext%20x=%2250%25%22%20y=%2250%25%22%20text-anchor=%22middle%22%20fill=%22%236b7280%22%20font-family=%22sans-serif%22%20font-size=%2212%22%3EImage%20unavailable%3C/text%3E%3C/svg%3E";

/// How many placeholder entries list/grid/card renderers produce when the
/// element carries no item data.
const PLACEHOLDER_ITEM_COUNT: usize = 3;

pub type RenderFn = fn(&RenderContext<'_>, &Element, &str) -> String;

/// The dispatch table: element kind to renderer function. Kinds without an
/// entry (only [`ElementKind::Unknown`] in practice) fall back to the
/// generic container renderer.
pub struct RendererRegistry {
    table: HashMap<ElementKind, RenderFn>,
}

impl Default for RendererRegistry {
    fn default() -> Self {
        let mut table: HashMap<ElementKind, RenderFn> = HashMap::new();
        table.insert(ElementKind::Text, render_text as RenderFn);
        table.insert(ElementKind::Header, render_header);
        table.insert(ElementKind::Image, render_image);
        table.insert(ElementKind::Button, render_button);
        table.insert(ElementKind::Form, render_form);
        table.insert(ElementKind::Navbar, render_navbar);
        table.insert(ElementKind::Footer, render_footer);
        table.insert(ElementKind::List, render_list);
        table.insert(ElementKind::Grid, render_grid);
        table.insert(ElementKind::Card, render_card);
        table.insert(ElementKind::Map, render_map);
        table.insert(ElementKind::Section, render_section);
        table.insert(ElementKind::Container, render_container);
        Self { table }
    }
}

impl RendererRegistry {
    pub fn render(&self, ctx: &RenderContext<'_>, element: &Element, anchor: &str) -> String {
        let renderer = self
            .table
            .get(&element.element_kind())
            .copied()
            .unwrap_or(render_container as RenderFn);
        renderer(ctx, element, anchor)
    }
}

/// Per-compile state threaded through the recursive walk: the options, the
/// dispatch table, the collected CSS rules and the id-fallback counter.
pub struct RenderContext<'a> {
    pub options: &'a CompileOptions,
    registry: &'a RendererRegistry,
    rules: RefCell<Vec<String>>,
    sequence: Cell<usize>,
}

impl<'a> RenderContext<'a> {
    pub fn new(options: &'a CompileOptions, registry: &'a RendererRegistry) -> Self {
        Self {
            options,
            registry,
            rules: RefCell::new(Vec::new()),
            sequence: Cell::new(0),
        }
    }

    /// Render one element: emit its CSS rule as an independent top-level
    /// rule, then dispatch for the HTML fragment. Children recurse through
    /// here, so nested elements get their own rules too.
    pub fn render_element(&self, element: &Element) -> String {
        let index = self.sequence.get();
        self.sequence.set(index + 1);
        let anchor = anchor_for(element, index);
        self.rules.borrow_mut().push(element_rule(&anchor, element));
        self.registry.render(self, element, &anchor)
    }

    pub fn render_children(&self, element: &Element) -> String {
        element
            .children
            .iter()
            .map(|child| self.render_element(child))
            .collect()
    }

    pub fn take_rules(&self) -> Vec<String> {
        self.rules.take()
    }

    /// Resolve an image URL to something usable in a standalone export:
    /// absolute URLs pass through, relative ones are joined onto the
    /// configured base URL.
    pub fn resolve_url(&self, url: &str) -> String {
        let url = url.trim();
        if url.is_empty() {
            return IMAGE_FALLBACK_DATA_URI.to_string();
        }
        if url.starts_with("http://")
            || url.starts_with("https://")
            || url.starts_with("data:")
            || url.starts_with("//")
        {
            return url.to_string();
        }
        let base = self.options.base_url.trim_end_matches('/');
        if base.is_empty() {
            return url.to_string();
        }
        format!("{}/{}", base, url.trim_start_matches('/'))
    }
}

fn esc(text: &str) -> String {
    escape(text).into_owned()
}

/// Derive a form control name from its label; falls back to the field
/// index for unusable labels.
fn field_name(label: &str, index: usize) -> String {
    let name: String = label
        .to_lowercase()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();
    let name = name.trim_matches('_');
    if name.is_empty() {
        format!("field_{}", index)
    } else {
        name.to_string()
    }
}

// --- Renderers ---

fn render_text(ctx: &RenderContext<'_>, element: &Element, anchor: &str) -> String {
    format!(
        "<div id=\"{anchor}\" class=\"el el-text\"><p>{}</p>{}</div>",
        esc(element.content_text()),
        ctx.render_children(element),
    )
}

fn render_header(ctx: &RenderContext<'_>, element: &Element, anchor: &str) -> String {
    format!(
        "<div id=\"{anchor}\" class=\"el el-header\"><h1>{}</h1>{}</div>",
        esc(element.content_text()),
        ctx.render_children(element),
    )
}

fn render_button(ctx: &RenderContext<'_>, element: &Element, anchor: &str) -> String {
    let label = element.content.as_deref().unwrap_or("Click me");
    format!(
        "<div id=\"{anchor}\" class=\"el el-button\"><button type=\"button\">{}</button>{}</div>",
        esc(label),
        ctx.render_children(element),
    )
}

fn render_image(ctx: &RenderContext<'_>, element: &Element, anchor: &str) -> String {
    let src = ctx.resolve_url(element.image_url.as_deref().unwrap_or(""));
    let alt = element.content.as_deref().unwrap_or("Layout image");
    format!(
        "<div id=\"{anchor}\" class=\"el el-image\">\
         <img src=\"{}\" alt=\"{}\" onerror=\"this.onerror=null;this.src='{}'\">{}</div>",
        esc(&src),
        esc(alt),
        IMAGE_FALLBACK_DATA_URI,
        ctx.render_children(element),
    )
}

fn render_form(ctx: &RenderContext<'_>, element: &Element, anchor: &str) -> String {
    let mut out = format!("<form id=\"{anchor}\" class=\"el el-form\">");
    for (index, field) in element.fields.iter().enumerate() {
        let label = if field.label.is_empty() {
            format!("Field {}", index + 1)
        } else {
            field.label.clone()
        };
        let name = field_name(&label, index);
        let required = if field.required { " required" } else { "" };

        out.push_str("<div class=\"form-field\">");
        out.push_str(&format!(
            "<label for=\"{anchor}-{name}\">{}</label>",
            esc(&label)
        ));
        match field.field_type.to_lowercase().as_str() {
            "textarea" => out.push_str(&format!(
                "<textarea id=\"{anchor}-{name}\" name=\"{name}\" placeholder=\"{}\"{required}></textarea>",
                esc(&field.placeholder),
            )),
            "select" => {
                out.push_str(&format!(
                    "<select id=\"{anchor}-{name}\" name=\"{name}\"{required}>"
                ));
                for option in &field.options {
                    out.push_str(&format!("<option>{}</option>", esc(option)));
                }
                out.push_str("</select>");
            }
            field_type => {
                let input_type = if field_type.is_empty() { "text" } else { field_type };
                out.push_str(&format!(
                    "<input id=\"{anchor}-{name}\" type=\"{}\" name=\"{name}\" placeholder=\"{}\"{required}>",
                    esc(input_type),
                    esc(&field.placeholder),
                ));
            }
        }
        out.push_str("</div>");
    }
    out.push_str(&format!(
        "<button type=\"submit\">{}</button>",
        esc(&ctx.options.submit_label)
    ));
    out.push_str(&ctx.render_children(element));
    out.push_str("</form>");
    out
}

fn render_navbar(ctx: &RenderContext<'_>, element: &Element, anchor: &str) -> String {
    let brand = element.content.as_deref().unwrap_or("Brand");
    let mut out = format!(
        "<nav id=\"{anchor}\" class=\"el el-navbar\"><span class=\"brand\">{}</span><ul>",
        esc(brand)
    );
    for item in &element.items {
        out.push_str(&format!(
            "<li><a href=\"{}\">{}</a></li>",
            esc(item.href.as_deref().unwrap_or("#")),
            esc(&item.label),
        ));
    }
    out.push_str("</ul>");
    out.push_str(&ctx.render_children(element));
    out.push_str("</nav>");
    out
}

fn render_footer(ctx: &RenderContext<'_>, element: &Element, anchor: &str) -> String {
    let mut out = format!("<footer id=\"{anchor}\" class=\"el el-footer\">");
    for column in &element.columns {
        out.push_str("<div class=\"footer-col\">");
        out.push_str(&format!("<h4>{}</h4><ul>", esc(&column.title)));
        for link in &column.links {
            out.push_str(&format!(
                "<li><a href=\"{}\">{}</a></li>",
                esc(link.href.as_deref().unwrap_or("#")),
                esc(&link.label),
            ));
        }
        out.push_str("</ul></div>");
    }
    out.push_str(&ctx.render_children(element));
    out.push_str("</footer>");
    out
}

fn render_list(ctx: &RenderContext<'_>, element: &Element, anchor: &str) -> String {
    let mut out = format!("<div id=\"{anchor}\" class=\"el el-list\"><ul>");
    if element.items.is_empty() {
        for index in 0..PLACEHOLDER_ITEM_COUNT {
            out.push_str(&format!("<li>List item {}</li>", index + 1));
        }
    } else {
        for item in &element.items {
            out.push_str(&format!("<li>{}</li>", esc(&item.label)));
        }
    }
    out.push_str("</ul>");
    out.push_str(&ctx.render_children(element));
    out.push_str("</div>");
    out
}

fn render_grid(ctx: &RenderContext<'_>, element: &Element, anchor: &str) -> String {
    let mut out = format!("<div id=\"{anchor}\" class=\"el el-grid\">");
    if element.items.is_empty() {
        for index in 0..PLACEHOLDER_ITEM_COUNT {
            out.push_str(&format!(
                "<div class=\"grid-cell\">Grid item {}</div>",
                index + 1
            ));
        }
    } else {
        for item in &element.items {
            out.push_str(&format!("<div class=\"grid-cell\">{}</div>", esc(&item.label)));
        }
    }
    out.push_str(&ctx.render_children(element));
    out.push_str("</div>");
    out
}

fn render_card(ctx: &RenderContext<'_>, element: &Element, anchor: &str) -> String {
    let mut out = format!("<div id=\"{anchor}\" class=\"el el-card\">");
    if !element.content_text().is_empty() {
        out.push_str(&format!("<p>{}</p>", esc(element.content_text())));
    }
    for item in &element.items {
        out.push_str(&format!("<p>{}</p>", esc(&item.label)));
    }
    out.push_str(&ctx.render_children(element));
    out.push_str("</div>");
    out
}

fn render_map(ctx: &RenderContext<'_>, element: &Element, anchor: &str) -> String {
    let caption = element.content.as_deref().unwrap_or("Map");
    format!(
        "<div id=\"{anchor}\" class=\"el el-map\"><span>{}</span>{}</div>",
        esc(caption),
        ctx.render_children(element),
    )
}

fn render_section(ctx: &RenderContext<'_>, element: &Element, anchor: &str) -> String {
    format!(
        "<section id=\"{anchor}\" class=\"el el-section\">{}{}</section>",
        esc(element.content_text()),
        ctx.render_children(element),
    )
}

/// The default arm: a generic `<div>` wrapping the element's content. Both
/// explicit containers and unrecognized types land here.
fn render_container(ctx: &RenderContext<'_>, element: &Element, anchor: &str) -> String {
    format!(
        "<div id=\"{anchor}\" class=\"el el-{}\">{}{}</div>",
        element.element_kind().slug(),
        esc(element.content_text()),
        ctx.render_children(element),
    )
}
