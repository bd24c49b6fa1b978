//! The element descriptor model: one positioned, typed, styled unit of a
//! layout, exactly as the client editor submits it.

use pagesmith_style::StyleMap;
use pagesmith_types::{Position, Size};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Client ids arrive as whatever the editor generated, number or string.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum ElementId {
    Number(i64),
    Text(String),
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ElementId::Number(n) => write!(f, "{}", n),
            ElementId::Text(s) => write!(f, "{}", s),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct Element {
    pub id: Option<ElementId>,
    /// The dispatch key. Older editor revisions submitted it as `label`.
    #[serde(rename = "type", alias = "label")]
    pub kind: Option<String>,
    pub styles: StyleMap,
    pub position: Option<Position>,
    pub size: Option<Size>,
    /// Older revisions submitted `customText`.
    #[serde(alias = "customText")]
    pub content: Option<String>,
    pub image_url: Option<String>,
    pub children: Vec<Element>,
    /// Form elements only.
    pub fields: Vec<FormField>,
    /// Navbars, lists, grids, cards.
    pub items: Vec<LinkItem>,
    /// Footers only.
    pub columns: Vec<FooterColumn>,
}

impl Element {
    pub fn element_kind(&self) -> ElementKind {
        ElementKind::from_type(self.kind.as_deref())
    }

    pub fn content_text(&self) -> &str {
        self.content.as_deref().unwrap_or("")
    }

    /// Deserialize one element from raw JSON, defaulting anomalies away:
    /// an element that does not fit the model becomes a generic container
    /// carrying whatever id/type/position/content can be salvaged. One bad
    /// element must never abort the batch.
    pub fn from_value_lenient(value: &Value) -> Element {
        match serde_json::from_value(value.clone()) {
            Ok(element) => element,
            Err(err) => {
                log::warn!("element did not deserialize cleanly, defaulting: {err}");
                Element {
                    id: value
                        .get("id")
                        .and_then(|v| serde_json::from_value(v.clone()).ok()),
                    kind: value
                        .get("type")
                        .or_else(|| value.get("label"))
                        .and_then(Value::as_str)
                        .map(str::to_string),
                    position: value
                        .get("position")
                        .and_then(|v| serde_json::from_value(v.clone()).ok()),
                    content: value
                        .get("content")
                        .or_else(|| value.get("customText"))
                        .and_then(Value::as_str)
                        .map(str::to_string),
                    ..Element::default()
                }
            }
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct FormField {
    pub label: String,
    #[serde(rename = "type")]
    pub field_type: String,
    pub placeholder: String,
    pub required: bool,
    pub options: Vec<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct LinkItem {
    pub label: String,
    #[serde(alias = "url")]
    pub href: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct FooterColumn {
    pub title: String,
    pub links: Vec<LinkItem>,
}

/// The closed catalog of renderable element types.
///
/// `type` strings the catalog does not know map to [`ElementKind::Unknown`],
/// which renders through the generic container arm; dispatch never fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    Text,
    Header,
    Image,
    Button,
    Form,
    Navbar,
    Footer,
    List,
    Grid,
    Card,
    Map,
    Section,
    Container,
    Unknown,
}

impl ElementKind {
    pub fn from_type(kind: Option<&str>) -> Self {
        let Some(kind) = kind else {
            return ElementKind::Container;
        };
        match kind.trim().to_lowercase().as_str() {
            "text" | "paragraph" => ElementKind::Text,
            "header" | "heading" => ElementKind::Header,
            "image" | "img" => ElementKind::Image,
            "button" => ElementKind::Button,
            "form" => ElementKind::Form,
            "navbar" | "nav" => ElementKind::Navbar,
            "footer" => ElementKind::Footer,
            "list" => ElementKind::List,
            "grid" => ElementKind::Grid,
            "card" => ElementKind::Card,
            "map" => ElementKind::Map,
            "section" => ElementKind::Section,
            "container" | "div" | "box" => ElementKind::Container,
            _ => ElementKind::Unknown,
        }
    }

    /// Stable identifier fragment, also the `el-*` class suffix.
    pub fn slug(&self) -> &'static str {
        match self {
            ElementKind::Text => "text",
            ElementKind::Header => "header",
            ElementKind::Image => "image",
            ElementKind::Button => "button",
            ElementKind::Form => "form",
            ElementKind::Navbar => "navbar",
            ElementKind::Footer => "footer",
            ElementKind::List => "list",
            ElementKind::Grid => "grid",
            ElementKind::Card => "card",
            ElementKind::Map => "map",
            ElementKind::Section => "section",
            ElementKind::Container => "container",
            ElementKind::Unknown => "generic",
        }
    }
}

/// Stable identifier for one element: its kind slug plus its id, or the
/// compile-order index when no id was supplied. Id text is reduced to
/// characters that are safe in both a CSS selector and an `id` attribute.
pub fn anchor_for(element: &Element, index: usize) -> String {
    let slug = element.element_kind().slug();
    match &element.id {
        Some(id) => format!("{}-{}", slug, safe_id_fragment(&id.to_string())),
        None => format!("{}-{}", slug, index),
    }
}

fn safe_id_fragment(raw: &str) -> String {
    let cleaned: String = raw
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '-'
            }
        })
        .collect();
    if cleaned.is_empty() {
        "x".to_string()
    } else {
        cleaned
    }
}
