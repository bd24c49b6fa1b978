//! Minimal node tree for the bounded HTML subset the compilers accept.

/// A parsed node: either an element with children or a run of text.
#[derive(Debug, Clone, PartialEq)]
pub enum HtmlNode {
    Element(HtmlElement),
    Text(String),
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct HtmlElement {
    /// Lowercased tag name.
    pub tag: String,
    /// Lowercased attribute names, values as written.
    pub attrs: Vec<(String, String)>,
    pub children: Vec<HtmlNode>,
}

impl HtmlElement {
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn style(&self) -> Option<&str> {
        self.attr("style")
    }
}

/// Iterate the `property: value` declarations of an inline `style`
/// attribute. Property names come back lowercased and trimmed; values are
/// trimmed but otherwise as written.
pub fn css_declarations(css: &str) -> impl Iterator<Item = (String, String)> + '_ {
    css.split(';').filter_map(|declaration| {
        let (property, value) = declaration.split_once(':')?;
        let property = property.trim().to_lowercase();
        let value = value.trim().to_string();
        if property.is_empty() || value.is_empty() {
            None
        } else {
            Some((property, value))
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_inline_declarations() {
        let decls: Vec<_> = css_declarations("color: red; Font-Size:16px ;;broken").collect();
        assert_eq!(
            decls,
            vec![
                ("color".to_string(), "red".to_string()),
                ("font-size".to_string(), "16px".to_string()),
            ]
        );
    }
}
