//! CSS emission: the static boilerplate stylesheet plus one generated rule
//! per element.

use crate::compiler::CompileOptions;
use crate::element::Element;

/// Fixed canvas dimensions. Exported pages position elements absolutely
/// against this box; there is no responsive repositioning.
pub const CANVAS_WIDTH: f64 = 1440.0;
pub const CANVAS_HEIGHT: f64 = 900.0;

/// Resets, canvas chrome and per-component base classes shared by every
/// generated page. Element-specific rules are appended after this block.
pub static BASE_STYLESHEET: &str = "\
* {
  margin: 0;
  padding: 0;
  box-sizing: border-box;
}
body {
  background: #f3f4f6;
}
.canvas {
  position: relative;
  margin: 0 auto;
  background: #ffffff;
  overflow: hidden;
}
.el img {
  display: block;
  max-width: 100%;
  max-height: 100%;
}
.el-form .form-field {
  display: flex;
  flex-direction: column;
  margin-bottom: 12px;
}
.el-form label {
  font-size: 13px;
  margin-bottom: 4px;
}
.el-form input,
.el-form textarea,
.el-form select {
  padding: 8px;
  border: 1px solid #d1d5db;
  border-radius: 4px;
  font: inherit;
}
.el-form button[type=\"submit\"] {
  padding: 8px 16px;
  border: none;
  border-radius: 4px;
  background: #2563eb;
  color: #ffffff;
  cursor: pointer;
}
.el-navbar {
  display: flex;
  align-items: center;
  justify-content: space-between;
}
.el-navbar .brand {
  font-weight: bold;
}
.el-navbar ul {
  display: flex;
  gap: 24px;
  list-style: none;
}
.el-navbar a {
  color: inherit;
  text-decoration: none;
}
.el-footer {
  display: flex;
  gap: 32px;
}
.el-footer h4 {
  margin-bottom: 8px;
}
.el-footer ul {
  list-style: none;
}
.el-footer a {
  color: inherit;
  text-decoration: none;
}
.el-list ul {
  list-style: disc inside;
}
.el-grid {
  display: grid;
  grid-template-columns: repeat(3, 1fr);
  gap: 16px;
}
.el-card {
  padding: 16px;
  border: 1px solid #e5e7eb;
  border-radius: 8px;
  background: #ffffff;
}
.el-map {
  display: flex;
  align-items: center;
  justify-content: center;
  background: #e5e7eb;
  color: #6b7280;
}
";

/// The canvas sizing rule, generated from configuration so the fixed
/// default can still be overridden service-wide.
pub fn canvas_rule(options: &CompileOptions) -> String {
    format!(
        ".canvas {{\n  width: {};\n  height: {};\n  font-family: {}, Arial, sans-serif;\n}}\n",
        format_px(options.canvas.width),
        format_px(options.canvas.height),
        options.defaults.font_family,
    )
}

/// One rule per element: absolute position first, then the element's own
/// style map translated to declarations (later entries win in CSS, so
/// client styles can override the size shorthand).
pub fn element_rule(anchor: &str, element: &Element) -> String {
    let position = element.position.unwrap_or_default();
    let mut declarations = vec![
        "position: absolute".to_string(),
        format!("left: {}", format_px(position.x)),
        format!("top: {}", format_px(position.y)),
    ];
    if let Some(size) = element.size {
        if size.width > 0.0 {
            declarations.push(format!("width: {}", format_px(size.width)));
        }
        if size.height > 0.0 {
            declarations.push(format!("height: {}", format_px(size.height)));
        }
    }
    declarations.extend(element.styles.to_css_declarations());
    format!("#{} {{\n  {};\n}}\n", anchor, declarations.join(";\n  "))
}

pub fn format_px(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}px", value as i64)
    } else {
        format!("{}px", value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn rule_positions_the_element_absolutely() {
        let element: Element = serde_json::from_value(json!({
            "id": 1,
            "type": "header",
            "position": {"x": 10, "y": 20},
            "styles": {"color": "#ff0000"}
        }))
        .unwrap();
        let rule = element_rule("header-1", &element);
        assert!(rule.starts_with("#header-1 {"));
        assert!(rule.contains("position: absolute;"));
        assert!(rule.contains("left: 10px;"));
        assert!(rule.contains("top: 20px;"));
        assert!(rule.contains("color: #ff0000;"));
    }

    #[test]
    fn missing_position_defaults_to_origin() {
        let element: Element = serde_json::from_value(json!({"type": "text"})).unwrap();
        let rule = element_rule("text-0", &element);
        assert!(rule.contains("left: 0px;"));
        assert!(rule.contains("top: 0px;"));
    }

    #[test]
    fn size_emits_width_and_height() {
        let element: Element = serde_json::from_value(json!({
            "type": "card",
            "size": {"width": 320, "height": 180.5}
        }))
        .unwrap();
        let rule = element_rule("card-0", &element);
        assert!(rule.contains("width: 320px;"));
        assert!(rule.contains("height: 180.5px;"));
    }
}
