pub mod defaults;
pub mod normalize;
pub mod style_map;

pub use defaults::StyleDefaults;
pub use normalize::{
    DEFAULT_LINE_HEIGHT, MAX_FONT_POINTS, MAX_LINE_HEIGHT, MIN_FONT_POINTS, MIN_LINE_HEIGHT,
    normalize_color, normalize_font_size, normalize_font_size_css, normalize_line_height,
    parse_size_points,
};
pub use style_map::{StyleMap, StyleValue, css_property_name};
