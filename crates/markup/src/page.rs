//! Page-shell assembly through registered templates.
//!
//! Two shells: a standalone page with the stylesheet inlined (preview and
//! single-file download) and a linked-stylesheet page (zip export, where
//! `styles.css` ships alongside `index.html`).

use crate::compiler::CompiledLayout;
use handlebars::Handlebars;
use once_cell::sync::Lazy;
use serde_json::json;

static STANDALONE_TEMPLATE: &str = "\
<!DOCTYPE html>
<html lang=\"en\">
<head>
<meta charset=\"UTF-8\">
<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">
<title>{{title}}</title>
<style>
{{{css}}}
</style>
</head>
<body>
{{{body}}}
</body>
</html>
";

static LINKED_TEMPLATE: &str = "\
<!DOCTYPE html>
<html lang=\"en\">
<head>
<meta charset=\"UTF-8\">
<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">
<title>{{title}}</title>
<link rel=\"stylesheet\" href=\"{{stylesheet}}\">
</head>
<body>
{{{body}}}
</body>
</html>
";

static TEMPLATES: Lazy<Handlebars<'static>> = Lazy::new(|| {
    let mut handlebars = Handlebars::new();
    handlebars
        .register_template_string("standalone", STANDALONE_TEMPLATE)
        .expect("standalone page template is valid");
    handlebars
        .register_template_string("linked", LINKED_TEMPLATE)
        .expect("linked page template is valid");
    handlebars
});

/// A complete single-file page with the stylesheet inlined.
pub fn standalone_page(layout: &CompiledLayout, title: &str) -> String {
    render_page(
        "standalone",
        json!({"title": title, "css": layout.css, "body": layout.html}),
        layout,
    )
}

/// A page referencing an external stylesheet, for multi-file exports.
pub fn linked_page(layout: &CompiledLayout, title: &str, stylesheet_href: &str) -> String {
    render_page(
        "linked",
        json!({"title": title, "stylesheet": stylesheet_href, "body": layout.html}),
        layout,
    )
}

fn render_page(template: &str, data: serde_json::Value, layout: &CompiledLayout) -> String {
    match TEMPLATES.render(template, &data) {
        Ok(page) => page,
        Err(err) => {
            // Template rendering over static templates should not fail;
            // degrade to an unstyled shell rather than dropping the body.
            log::error!("page template '{template}' failed to render: {err}");
            format!(
                "<!DOCTYPE html>\n<html><head><style>{}</style></head><body>{}</body></html>",
                layout.css, layout.html
            )
        }
    }
}
