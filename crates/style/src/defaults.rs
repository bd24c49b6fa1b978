use serde::{Deserialize, Serialize};

/// The single source of fallback styling shared by both compilers.
///
/// Constructed once (from service configuration) and injected wherever a
/// missing or unusable style value needs a default, instead of each call
/// site carrying its own literals.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct StyleDefaults {
    /// Font family applied when none is specified.
    pub font_family: String,
    /// Font size in half-points (22 = 11pt).
    pub font_size_half_points: u32,
    /// Six-digit uppercase hex, no `#` prefix.
    pub color: String,
    /// Line-spacing multiplier.
    pub line_height: f32,
}

impl Default for StyleDefaults {
    fn default() -> Self {
        Self {
            font_family: "Calibri".to_string(),
            font_size_half_points: 22,
            color: "000000".to_string(),
            line_height: 1.5,
        }
    }
}
