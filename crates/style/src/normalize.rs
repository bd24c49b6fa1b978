//! Canonicalization of client-supplied style values.
//!
//! Every function here is total: any input, including `None`, garbage text
//! and non-finite numbers, resolves to a usable value. Bad styling degrades
//! to a default instead of failing document generation.

use crate::style_map::StyleValue;
use nom::IResult;
use nom::branch::alt;
use nom::bytes::complete::{tag_no_case, take_while_m_n};
use nom::character::complete::char;
use nom::combinator::{map, map_res, opt, recognize};
use nom::sequence::{pair, tuple};
use pagesmith_types::Color;

pub const MIN_FONT_POINTS: f32 = 8.0;
pub const MAX_FONT_POINTS: f32 = 72.0;
pub const MIN_LINE_HEIGHT: f32 = 1.0;
pub const MAX_LINE_HEIGHT: f32 = 3.0;
pub const DEFAULT_LINE_HEIGHT: f32 = 1.5;

/// Canonicalize any color notation to uppercase six-digit hex without a
/// `#` prefix. Unrecognized or absent input resolves to `"000000"`.
pub fn normalize_color(input: Option<&str>) -> String {
    input
        .and_then(Color::parse)
        .unwrap_or_default()
        .to_hex()
}

/// Canonicalize a font size to half-point units, clamped to the
/// [`MIN_FONT_POINTS`, `MAX_FONT_POINTS`] range. Non-numeric input yields
/// the fallback, which is already in half-points and returned as-is.
pub fn normalize_font_size(input: Option<&StyleValue>, fallback_half_points: u32) -> u32 {
    let points = match input {
        Some(StyleValue::Number(n)) => Some(*n as f32),
        Some(StyleValue::Text(s)) => parse_size_points(s),
        _ => None,
    };
    match points {
        Some(value) if value.is_finite() => {
            (value.clamp(MIN_FONT_POINTS, MAX_FONT_POINTS) * 2.0).round() as u32
        }
        _ => fallback_half_points,
    }
}

/// Variant of [`normalize_font_size`] for raw CSS declaration values.
pub fn normalize_font_size_css(value: &str, fallback_half_points: u32) -> u32 {
    match parse_size_points(value) {
        Some(points) if points.is_finite() => {
            (points.clamp(MIN_FONT_POINTS, MAX_FONT_POINTS) * 2.0).round() as u32
        }
        _ => fallback_half_points,
    }
}

/// Canonicalize a line-height multiplier, clamped to
/// [`MIN_LINE_HEIGHT`, `MAX_LINE_HEIGHT`], defaulting to
/// [`DEFAULT_LINE_HEIGHT`].
pub fn normalize_line_height(input: Option<&StyleValue>) -> f32 {
    let value = match input {
        Some(StyleValue::Number(n)) => Some(*n as f32),
        Some(StyleValue::Text(s)) => s.trim().parse::<f32>().ok(),
        _ => None,
    };
    match value {
        Some(v) if v.is_finite() => v.clamp(MIN_LINE_HEIGHT, MAX_LINE_HEIGHT),
        _ => DEFAULT_LINE_HEIGHT,
    }
}

/// Parse the leading numeric part of a size value (`"16"`, `"16px"`,
/// `"12pt"`); `px` and `pt` are both treated as points. Trailing input is
/// ignored.
pub fn parse_size_points(input: &str) -> Option<f32> {
    match parse_length(input.trim()) {
        Ok((_, value)) => Some(value),
        Err(_) => None,
    }
}

// --- Low-level nom parsers ---

fn parse_f32(input: &str) -> IResult<&str, f32> {
    map_res(
        recognize(pair(
            opt(alt((char('+'), char('-')))),
            alt((
                recognize(tuple((
                    take_while_m_n(1, 10, |c: char| c.is_ascii_digit()),
                    opt(tuple((
                        char('.'),
                        take_while_m_n(1, 10, |c: char| c.is_ascii_digit()),
                    ))),
                ))),
                recognize(tuple((
                    char('.'),
                    take_while_m_n(1, 10, |c: char| c.is_ascii_digit()),
                ))),
            )),
        )),
        |s: &str| s.parse::<f32>(),
    )(input)
}

fn parse_unit(input: &str) -> IResult<&str, f32> {
    alt((
        map(tag_no_case("pt"), |_| 1.0),
        map(tag_no_case("px"), |_| 1.0), // Treat px as pt
    ))(input)
}

fn parse_length(input: &str) -> IResult<&str, f32> {
    let (input, value) = parse_f32(input)?;
    let (input, unit_multiplier) = opt(parse_unit)(input)?;
    Ok((input, value * unit_multiplier.unwrap_or(1.0)))
}
