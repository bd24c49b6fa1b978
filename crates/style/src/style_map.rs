//! The generic key/value bag of presentational properties attached to a
//! layout element or inline node.
//!
//! Keys are whatever the client sent (usually camelCase); values are either
//! bare numbers (pixels unless the property is dimensionless) or
//! pre-formatted strings. Unknown keys are carried through verbatim so newer
//! clients keep working against older servers.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Properties whose bare-number values must not get a `px` suffix.
const DIMENSIONLESS_PROPERTIES: &[&str] = &["opacity", "z-index", "font-weight", "line-height"];

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum StyleValue {
    Number(f64),
    Text(String),
    Flag(bool),
}

impl StyleValue {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            StyleValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            StyleValue::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }
}

impl From<f64> for StyleValue {
    fn from(n: f64) -> Self {
        StyleValue::Number(n)
    }
}

impl From<&str> for StyleValue {
    fn from(s: &str) -> Self {
        StyleValue::Text(s.to_string())
    }
}

impl From<String> for StyleValue {
    fn from(s: String) -> Self {
        StyleValue::Text(s)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(transparent)]
pub struct StyleMap(BTreeMap<String, StyleValue>);

impl StyleMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<StyleValue>) {
        self.0.insert(key.into(), value.into());
    }

    /// Look up a property regardless of key spelling: `fontSize`,
    /// `font-size` and `font_size` all address the same entry.
    pub fn get(&self, key: &str) -> Option<&StyleValue> {
        if let Some(value) = self.0.get(key) {
            return Some(value);
        }
        let wanted = canonical_key(key);
        self.0
            .iter()
            .find(|(k, _)| canonical_key(k) == wanted)
            .map(|(_, v)| v)
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(StyleValue::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &StyleValue)> {
        self.0.iter()
    }

    /// Translate every entry into a `property: value` CSS declaration.
    ///
    /// Bare numbers get a `px` suffix unless the property is in the
    /// dimensionless set; strings are emitted verbatim. Entries with an
    /// empty string value produce nothing rather than an invalid
    /// declaration.
    pub fn to_css_declarations(&self) -> Vec<String> {
        self.0
            .iter()
            .filter_map(|(key, value)| {
                let property = css_property_name(key);
                let rendered = match value {
                    StyleValue::Number(n) => {
                        if DIMENSIONLESS_PROPERTIES.contains(&property.as_str()) {
                            format_css_number(*n)
                        } else {
                            format!("{}px", format_css_number(*n))
                        }
                    }
                    StyleValue::Text(s) => {
                        if s.trim().is_empty() {
                            return None;
                        }
                        s.trim().to_string()
                    }
                    StyleValue::Flag(b) => b.to_string(),
                };
                Some(format!("{}: {}", property, rendered))
            })
            .collect()
    }
}

impl FromIterator<(String, StyleValue)> for StyleMap {
    fn from_iter<T: IntoIterator<Item = (String, StyleValue)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Convert a camelCase style key into its kebab-case CSS property name.
/// Keys that already look like CSS properties pass through unchanged.
pub fn css_property_name(key: &str) -> String {
    let mut out = String::with_capacity(key.len() + 2);
    for c in key.chars() {
        if c.is_ascii_uppercase() {
            out.push('-');
            out.push(c.to_ascii_lowercase());
        } else if c == '_' {
            out.push('-');
        } else {
            out.push(c);
        }
    }
    out
}

fn canonical_key(key: &str) -> String {
    key.chars()
        .filter(|c| *c != '-' && *c != '_')
        .collect::<String>()
        .to_lowercase()
}

fn format_css_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{}", n)
    }
}
