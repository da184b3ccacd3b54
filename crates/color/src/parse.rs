//! CSS color parsing
//!
//! Accepts the color syntaxes theme authors actually write:
//!
//! - Hex: `#rgb`, `#rgba`, `#rrggbb`, `#rrggbbaa`
//! - `rgb()` / `rgba()` with numbers or percentages, either all comma
//!   separated (`rgba(0, 0, 0, 0.5)`) or space separated with a `/` before
//!   the alpha (`rgb(0 0 0 / 50%)`); the two forms cannot be mixed
//! - `hsl()` / `hsla()` with an optional `deg` hue unit
//! - CSS named colors and `transparent`
//!
//! # Example
//!
//! ```rust
//! use color::{parse_css_color, Rgba};
//!
//! assert_eq!(parse_css_color("#fff").unwrap(), Rgba::WHITE);
//! assert_eq!(parse_css_color("rgb(255 0 0 / 50%)").unwrap(), Rgba::rgba(255, 0, 0, 0.5));
//! assert!(parse_css_color("not-a-color").is_err());
//! ```

use crate::space::{Hsl, Rgba};
use nom::{
    branch::alt,
    bytes::complete::{tag, tag_no_case, take_while1},
    character::complete::{char, multispace0, multispace1},
    combinator::{opt, value},
    multi::many0,
    number::complete::double,
    sequence::{delimited, pair, tuple},
    IResult,
};
use thiserror::Error;

/// Errors that can occur while parsing a CSS color
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ColorParseError {
    /// Input was empty or whitespace only
    #[error("Color value is empty")]
    Empty,

    /// Hex notation with a bad digit count or non-hex characters
    #[error("Invalid hex color: {0}")]
    InvalidHex(String),

    /// Malformed `rgb()`/`hsl()` call
    #[error("Invalid color function: {0}")]
    InvalidFunction(String),

    /// Not a known CSS color keyword
    #[error("Unknown color name: {0}")]
    UnknownName(String),

    /// A valid color followed by extra characters
    #[error("Unexpected trailing input after color: {0}")]
    TrailingInput(String),
}

/// Result type for color parsing
pub type Result<T> = std::result::Result<T, ColorParseError>;

/// Parse any supported CSS color string
pub fn parse_css_color(input: &str) -> Result<Rgba> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(ColorParseError::Empty);
    }

    if trimmed.starts_with('#') {
        let (rest, color) = hex_color(trimmed)
            .map_err(|_| ColorParseError::InvalidHex(trimmed.to_string()))?;
        return finish(trimmed, rest, color);
    }

    if trimmed.contains('(') {
        let (rest, color) = color_function(trimmed)
            .map_err(|_| ColorParseError::InvalidFunction(trimmed.to_string()))?;
        return finish(trimmed, rest, color);
    }

    named_color(trimmed).ok_or_else(|| ColorParseError::UnknownName(trimmed.to_string()))
}

/// Check whether a string parses as a CSS color
pub fn is_valid_css_color(input: &str) -> bool {
    parse_css_color(input).is_ok()
}

fn finish(input: &str, rest: &str, color: Rgba) -> Result<Rgba> {
    if rest.is_empty() {
        Ok(color)
    } else {
        Err(ColorParseError::TrailingInput(input.to_string()))
    }
}

// =============================================================================
// Hex
// =============================================================================

fn hex_color(input: &str) -> IResult<&str, Rgba> {
    let (rest, _) = char('#')(input)?;
    let (rest, digits) = take_while1(|c: char| c.is_ascii_hexdigit())(rest)?;

    let nibble = |i: usize| u8::from_str_radix(&digits[i..=i], 16).map(|v| v * 17);
    let byte = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16);
    let fail = || nom::Err::Error(nom::error::Error::new(input, nom::error::ErrorKind::HexDigit));

    let color = match digits.len() {
        3 | 4 => {
            let r = nibble(0).map_err(|_| fail())?;
            let g = nibble(1).map_err(|_| fail())?;
            let b = nibble(2).map_err(|_| fail())?;
            let a = if digits.len() == 4 {
                nibble(3).map_err(|_| fail())? as f64 / 255.0
            } else {
                1.0
            };
            Rgba::rgba(r, g, b, a)
        }
        6 | 8 => {
            let r = byte(0).map_err(|_| fail())?;
            let g = byte(2).map_err(|_| fail())?;
            let b = byte(4).map_err(|_| fail())?;
            let a = if digits.len() == 8 {
                byte(6).map_err(|_| fail())? as f64 / 255.0
            } else {
                1.0
            };
            Rgba::rgba(r, g, b, a)
        }
        _ => return Err(fail()),
    };

    Ok((rest, color))
}

// =============================================================================
// Color functions
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq)]
enum Unit {
    None,
    Percent,
    Degrees,
}

#[derive(Debug, Clone, Copy)]
struct Component {
    value: f64,
    unit: Unit,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Function {
    Rgb,
    Hsl,
}

fn component(input: &str) -> IResult<&str, Component> {
    let (rest, (value, unit)) = tuple((
        double,
        opt(alt((tag("%"), tag_no_case("deg")))),
    ))(input)?;

    let unit = match unit {
        Some("%") => Unit::Percent,
        Some(_) => Unit::Degrees,
        None => Unit::None,
    };

    Ok((rest, Component { value, unit }))
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Separator {
    Comma,
    Slash,
    Space,
}

fn separator(input: &str) -> IResult<&str, Separator> {
    alt((
        value(Separator::Comma, tuple((multispace0, char(','), multispace0))),
        value(Separator::Slash, tuple((multispace0, char('/'), multispace0))),
        value(Separator::Space, multispace1),
    ))(input)
}

/// Legacy syntax separates every argument with commas; modern syntax uses
/// spaces between channels and `/` before the alpha.
fn consistent_separators(separators: &[Separator]) -> bool {
    let legacy = separators.iter().all(|s| *s == Separator::Comma);
    let modern = separators.iter().enumerate().all(|(index, s)| match index {
        0 | 1 => *s == Separator::Space,
        _ => *s == Separator::Slash,
    });
    legacy || modern
}

fn arguments(input: &str) -> IResult<&str, Vec<Component>> {
    let (rest, (first, tail)) = pair(component, many0(pair(separator, component)))(input)?;

    let separators: Vec<Separator> = tail.iter().map(|(sep, _)| *sep).collect();
    if !consistent_separators(&separators) {
        return Err(nom::Err::Error(nom::error::Error::new(
            input,
            nom::error::ErrorKind::Verify,
        )));
    }

    let mut components = vec![first];
    components.extend(tail.into_iter().map(|(_, c)| c));
    Ok((rest, components))
}

fn color_function(input: &str) -> IResult<&str, Rgba> {
    let (rest, name) = alt((
        tag_no_case("rgba"),
        tag_no_case("rgb"),
        tag_no_case("hsla"),
        tag_no_case("hsl"),
    ))(input)?;

    let function = if name.to_ascii_lowercase().starts_with("rgb") {
        Function::Rgb
    } else {
        Function::Hsl
    };

    let (rest, components) = delimited(
        tuple((multispace0, char('('), multispace0)),
        arguments,
        tuple((multispace0, char(')'))),
    )(rest)?;

    let color = match function {
        Function::Rgb => rgb_from_components(&components),
        Function::Hsl => hsl_from_components(&components),
    }
    .ok_or_else(|| nom::Err::Error(nom::error::Error::new(input, nom::error::ErrorKind::Verify)))?;

    Ok((rest, color))
}

fn rgb_from_components(components: &[Component]) -> Option<Rgba> {
    if !(3..=4).contains(&components.len()) {
        return None;
    }

    let channel = |c: &Component| -> Option<u8> {
        let value = match c.unit {
            Unit::None => c.value,
            Unit::Percent => c.value * 2.55,
            Unit::Degrees => return None,
        };
        finite(value).map(|v| v.clamp(0.0, 255.0).round() as u8)
    };

    let alpha = match components.get(3) {
        Some(c) => alpha_value(c)?,
        None => 1.0,
    };

    Some(Rgba::rgba(
        channel(&components[0])?,
        channel(&components[1])?,
        channel(&components[2])?,
        alpha,
    ))
}

fn hsl_from_components(components: &[Component]) -> Option<Rgba> {
    if !(3..=4).contains(&components.len()) {
        return None;
    }

    let hue = match components[0].unit {
        Unit::None | Unit::Degrees => finite(components[0].value)?,
        Unit::Percent => return None,
    };

    let percent = |c: &Component| -> Option<f64> {
        match c.unit {
            Unit::None | Unit::Percent => finite(c.value).map(|v| v.clamp(0.0, 100.0)),
            Unit::Degrees => None,
        }
    };

    let alpha = match components.get(3) {
        Some(c) => alpha_value(c)?,
        None => 1.0,
    };

    Some(Rgba::from_hsl(
        Hsl::new(hue, percent(&components[1])?, percent(&components[2])?),
        alpha,
    ))
}

fn alpha_value(c: &Component) -> Option<f64> {
    let value = match c.unit {
        Unit::None => c.value,
        Unit::Percent => c.value / 100.0,
        Unit::Degrees => return None,
    };
    finite(value).map(|v| v.clamp(0.0, 1.0))
}

fn finite(v: f64) -> Option<f64> {
    v.is_finite().then_some(v)
}

// =============================================================================
// Named colors
// =============================================================================

fn named_color(name: &str) -> Option<Rgba> {
    let lower = name.to_ascii_lowercase();
    if lower == "transparent" {
        return Some(Rgba::TRANSPARENT);
    }
    NAMED_COLORS
        .iter()
        .find(|(n, _)| *n == lower)
        .map(|(_, hex)| Rgba::from_hex_u32(*hex))
}

/// CSS Color Level 4 named colors
const NAMED_COLORS: &[(&str, u32)] = &[
    ("aliceblue", 0xF0F8FF), ("antiquewhite", 0xFAEBD7), ("aqua", 0x00FFFF),
    ("aquamarine", 0x7FFFD4), ("azure", 0xF0FFFF), ("beige", 0xF5F5DC),
    ("bisque", 0xFFE4C4), ("black", 0x000000), ("blanchedalmond", 0xFFEBCD),
    ("blue", 0x0000FF), ("blueviolet", 0x8A2BE2), ("brown", 0xA52A2A),
    ("burlywood", 0xDEB887), ("cadetblue", 0x5F9EA0), ("chartreuse", 0x7FFF00),
    ("chocolate", 0xD2691E), ("coral", 0xFF7F50), ("cornflowerblue", 0x6495ED),
    ("cornsilk", 0xFFF8DC), ("crimson", 0xDC143C), ("cyan", 0x00FFFF),
    ("darkblue", 0x00008B), ("darkcyan", 0x008B8B), ("darkgoldenrod", 0xB8860B),
    ("darkgray", 0xA9A9A9), ("darkgreen", 0x006400), ("darkgrey", 0xA9A9A9),
    ("darkkhaki", 0xBDB76B), ("darkmagenta", 0x8B008B), ("darkolivegreen", 0x556B2F),
    ("darkorange", 0xFF8C00), ("darkorchid", 0x9932CC), ("darkred", 0x8B0000),
    ("darksalmon", 0xE9967A), ("darkseagreen", 0x8FBC8F), ("darkslateblue", 0x483D8B),
    ("darkslategray", 0x2F4F4F), ("darkslategrey", 0x2F4F4F), ("darkturquoise", 0x00CED1),
    ("darkviolet", 0x9400D3), ("deeppink", 0xFF1493), ("deepskyblue", 0x00BFFF),
    ("dimgray", 0x696969), ("dimgrey", 0x696969), ("dodgerblue", 0x1E90FF),
    ("firebrick", 0xB22222), ("floralwhite", 0xFFFAF0), ("forestgreen", 0x228B22),
    ("fuchsia", 0xFF00FF), ("gainsboro", 0xDCDCDC), ("ghostwhite", 0xF8F8FF),
    ("gold", 0xFFD700), ("goldenrod", 0xDAA520), ("gray", 0x808080),
    ("green", 0x008000), ("greenyellow", 0xADFF2F), ("grey", 0x808080),
    ("honeydew", 0xF0FFF0), ("hotpink", 0xFF69B4), ("indianred", 0xCD5C5C),
    ("indigo", 0x4B0082), ("ivory", 0xFFFFF0), ("khaki", 0xF0E68C),
    ("lavender", 0xE6E6FA), ("lavenderblush", 0xFFF0F5), ("lawngreen", 0x7CFC00),
    ("lemonchiffon", 0xFFFACD), ("lightblue", 0xADD8E6), ("lightcoral", 0xF08080),
    ("lightcyan", 0xE0FFFF), ("lightgoldenrodyellow", 0xFAFAD2), ("lightgray", 0xD3D3D3),
    ("lightgreen", 0x90EE90), ("lightgrey", 0xD3D3D3), ("lightpink", 0xFFB6C1),
    ("lightsalmon", 0xFFA07A), ("lightseagreen", 0x20B2AA), ("lightskyblue", 0x87CEFA),
    ("lightslategray", 0x778899), ("lightslategrey", 0x778899), ("lightsteelblue", 0xB0C4DE),
    ("lightyellow", 0xFFFFE0), ("lime", 0x00FF00), ("limegreen", 0x32CD32),
    ("linen", 0xFAF0E6), ("magenta", 0xFF00FF), ("maroon", 0x800000),
    ("mediumaquamarine", 0x66CDAA), ("mediumblue", 0x0000CD), ("mediumorchid", 0xBA55D3),
    ("mediumpurple", 0x9370DB), ("mediumseagreen", 0x3CB371), ("mediumslateblue", 0x7B68EE),
    ("mediumspringgreen", 0x00FA9A), ("mediumturquoise", 0x48D1CC), ("mediumvioletred", 0xC71585),
    ("midnightblue", 0x191970), ("mintcream", 0xF5FFFA), ("mistyrose", 0xFFE4E1),
    ("moccasin", 0xFFE4B5), ("navajowhite", 0xFFDEAD), ("navy", 0x000080),
    ("oldlace", 0xFDF5E6), ("olive", 0x808000), ("olivedrab", 0x6B8E23),
    ("orange", 0xFFA500), ("orangered", 0xFF4500), ("orchid", 0xDA70D6),
    ("palegoldenrod", 0xEEE8AA), ("palegreen", 0x98FB98), ("paleturquoise", 0xAFEEEE),
    ("palevioletred", 0xDB7093), ("papayawhip", 0xFFEFD5), ("peachpuff", 0xFFDAB9),
    ("peru", 0xCD853F), ("pink", 0xFFC0CB), ("plum", 0xDDA0DD),
    ("powderblue", 0xB0E0E6), ("purple", 0x800080), ("rebeccapurple", 0x663399),
    ("red", 0xFF0000), ("rosybrown", 0xBC8F8F), ("royalblue", 0x4169E1),
    ("saddlebrown", 0x8B4513), ("salmon", 0xFA8072), ("sandybrown", 0xF4A460),
    ("seagreen", 0x2E8B57), ("seashell", 0xFFF5EE), ("sienna", 0xA0522D),
    ("silver", 0xC0C0C0), ("skyblue", 0x87CEEB), ("slateblue", 0x6A5ACD),
    ("slategray", 0x708090), ("slategrey", 0x708090), ("snow", 0xFFFAFA),
    ("springgreen", 0x00FF7F), ("steelblue", 0x4682B4), ("tan", 0xD2B48C),
    ("teal", 0x008080), ("thistle", 0xD8BFD8), ("tomato", 0xFF6347),
    ("turquoise", 0x40E0D0), ("violet", 0xEE82EE), ("wheat", 0xF5DEB3),
    ("white", 0xFFFFFF), ("whitesmoke", 0xF5F5F5), ("yellow", 0xFFFF00),
    ("yellowgreen", 0x9ACD32),
];
