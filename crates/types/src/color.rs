use serde::{Deserialize, Deserializer, Serialize, de};

/// An opaque RGB color.
///
/// Parsing is deliberately forgiving: hex strings with or without a leading
/// `#`, `rgb()`/`rgba()` functional notation, and a small palette of CSS
/// color names are all accepted. Components outside [0, 255] are clamped.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Default for Color {
    fn default() -> Self {
        Self { r: 0, g: 0, b: 0 }
    }
}

/// The named colors recognized by [`Color::parse`].
const NAMED_COLORS: &[(&str, Color)] = &[
    ("black", Color { r: 0, g: 0, b: 0 }),
    ("white", Color { r: 255, g: 255, b: 255 }),
    ("red", Color { r: 255, g: 0, b: 0 }),
    ("green", Color { r: 0, g: 128, b: 0 }),
    ("blue", Color { r: 0, g: 0, b: 255 }),
    ("yellow", Color { r: 255, g: 255, b: 0 }),
    ("orange", Color { r: 255, g: 165, b: 0 }),
    ("purple", Color { r: 128, g: 0, b: 128 }),
    ("gray", Color { r: 128, g: 128, b: 128 }),
    ("grey", Color { r: 128, g: 128, b: 128 }),
    ("pink", Color { r: 255, g: 192, b: 203 }),
    ("brown", Color { r: 165, g: 42, b: 42 }),
    ("cyan", Color { r: 0, g: 255, b: 255 }),
    ("magenta", Color { r: 255, g: 0, b: 255 }),
];

impl Color {
    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn gray(value: u8) -> Self {
        Self { r: value, g: value, b: value }
    }

    /// Uppercase six-digit hex representation with no `#` prefix.
    pub fn to_hex(self) -> String {
        format!("{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    /// Parse any supported color notation. Returns `None` for input that is
    /// not recognizable as a color; callers decide the fallback.
    pub fn parse(input: &str) -> Option<Color> {
        let s = input.trim().to_lowercase();
        if s.is_empty() {
            return None;
        }

        if let Some(color) = Self::parse_hex(&s) {
            return Some(color);
        }
        if let Some(color) = Self::parse_rgb(&s) {
            return Some(color);
        }
        NAMED_COLORS
            .iter()
            .find(|(name, _)| *name == s)
            .map(|(_, color)| *color)
    }

    /// Parse a 3- or 6-digit hex string, `#` prefix optional.
    fn parse_hex(s: &str) -> Option<Color> {
        let hex = s.strip_prefix('#').unwrap_or(s);
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }

        match hex.len() {
            3 => {
                let r = u8::from_str_radix(&hex[0..1].repeat(2), 16).ok()?;
                let g = u8::from_str_radix(&hex[1..2].repeat(2), 16).ok()?;
                let b = u8::from_str_radix(&hex[2..3].repeat(2), 16).ok()?;
                Some(Color { r, g, b })
            }
            6 => {
                let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
                let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
                let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
                Some(Color { r, g, b })
            }
            _ => None,
        }
    }

    /// Parse `rgb(r, g, b)` or `rgba(r, g, b, a)`; the alpha channel is
    /// ignored and components are clamped to [0, 255].
    fn parse_rgb(s: &str) -> Option<Color> {
        let body = s
            .strip_prefix("rgba")
            .or_else(|| s.strip_prefix("rgb"))?
            .trim()
            .strip_prefix('(')?;
        let body = body.strip_suffix(')').unwrap_or(body);

        let mut components = body.split(',').map(|part| {
            part.trim()
                .parse::<i64>()
                .map(|n| n.clamp(0, 255) as u8)
        });

        let r = components.next()?.ok()?;
        let g = components.next()?.ok()?;
        let b = components.next()?.ok()?;
        Some(Color { r, g, b })
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum ColorDef {
            Str(String),
            Map { r: u8, g: u8, b: u8 },
        }

        match ColorDef::deserialize(deserializer)? {
            ColorDef::Str(s) => Color::parse(&s)
                .ok_or_else(|| de::Error::custom(format!("unrecognized color: {}", s))),
            ColorDef::Map { r, g, b } => Ok(Color { r, g, b }),
        }
    }
}
