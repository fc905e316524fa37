//! Two-color terminal palette
//!
//! Accepts the color spellings a desktop user would type on a command line:
//! `#rgb`, `#rgba`, `#rrggbb`, `#rrggbbaa`, `rgb(r, g, b)`, `rgba(r, g, b, a)`
//! (components as 0-255 integers or percentages, alpha as 0.0-1.0) and a set
//! of basic color names.

use eframe::egui::Color32;

use crate::error::{Error, Result};

/// Default terminal background, rgb(0.1, 0.1, 0.1)
pub const DEFAULT_BACKGROUND: Color32 = Color32::from_rgb(26, 26, 26);

/// Default terminal foreground, rgb(0.8, 0.8, 0.8)
pub const DEFAULT_FOREGROUND: Color32 = Color32::from_rgb(204, 204, 204);

const NAMED_COLORS: &[(&str, [u8; 3])] = &[
    ("black", [0, 0, 0]),
    ("white", [255, 255, 255]),
    ("red", [255, 0, 0]),
    ("green", [0, 128, 0]),
    ("lime", [0, 255, 0]),
    ("blue", [0, 0, 255]),
    ("yellow", [255, 255, 0]),
    ("cyan", [0, 255, 255]),
    ("aqua", [0, 255, 255]),
    ("magenta", [255, 0, 255]),
    ("fuchsia", [255, 0, 255]),
    ("gray", [128, 128, 128]),
    ("grey", [128, 128, 128]),
    ("silver", [192, 192, 192]),
    ("maroon", [128, 0, 0]),
    ("olive", [128, 128, 0]),
    ("navy", [0, 0, 128]),
    ("purple", [128, 0, 128]),
    ("teal", [0, 128, 128]),
    ("orange", [255, 165, 0]),
    ("darkgray", [169, 169, 169]),
    ("darkgrey", [169, 169, 169]),
    ("lightgray", [211, 211, 211]),
    ("lightgrey", [211, 211, 211]),
];

/// Why a single color token was rejected
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ColorParseError {
    #[error("hex color must have 3, 4, 6 or 8 digits")]
    HexLength,

    #[error("invalid hex digit in '{0}'")]
    HexDigit(String),

    #[error("expected {expected} components, found {found}")]
    ComponentCount { expected: usize, found: usize },

    #[error("invalid color component '{0}'")]
    Component(String),

    #[error("unknown color name")]
    UnknownName,

    #[error("empty color")]
    Empty,
}

/// Background and foreground colors applied to the terminal view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub background: Color32,
    pub foreground: Color32,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            background: DEFAULT_BACKGROUND,
            foreground: DEFAULT_FOREGROUND,
        }
    }
}

impl Palette {
    pub fn new(background: Color32, foreground: Color32) -> Self {
        Self {
            background,
            foreground,
        }
    }

    /// Parse a `"BACK FORE"` string.
    ///
    /// Fewer than two space-separated tokens yields `Ok(None)`; tokens beyond
    /// the second are ignored. A token that is not a color yields
    /// [`Error::InvalidColor`] naming it.
    pub fn parse(value: &str) -> Result<Option<Self>> {
        let tokens: Vec<&str> = value.split(' ').filter(|t| !t.is_empty()).collect();
        if tokens.len() < 2 {
            return Ok(None);
        }
        if tokens.len() > 2 {
            debug!("Ignoring extra palette tokens: {:?}", &tokens[2..]);
        }

        let background = parse_color_token(tokens[0])?;
        let foreground = parse_color_token(tokens[1])?;
        Ok(Some(Self::new(background, foreground)))
    }
}

fn parse_color_token(token: &str) -> Result<Color32> {
    parse_color(token).map_err(|e| Error::InvalidColor {
        token: token.to_string(),
        reason: e.to_string(),
    })
}

/// Parse one color token
pub fn parse_color(token: &str) -> std::result::Result<Color32, ColorParseError> {
    let token = token.trim();
    if token.is_empty() {
        return Err(ColorParseError::Empty);
    }

    if token.starts_with('#') {
        return parse_hex(token);
    }

    let lower = token.to_ascii_lowercase();
    if let Some(body) = lower.strip_prefix("rgba(").and_then(|s| s.strip_suffix(')')) {
        return parse_functional(body, true);
    }
    if let Some(body) = lower.strip_prefix("rgb(").and_then(|s| s.strip_suffix(')')) {
        return parse_functional(body, false);
    }

    NAMED_COLORS
        .iter()
        .find(|(name, _)| *name == lower)
        .map(|(_, [r, g, b])| Color32::from_rgb(*r, *g, *b))
        .ok_or(ColorParseError::UnknownName)
}

fn parse_hex(token: &str) -> std::result::Result<Color32, ColorParseError> {
    let digits = &token[1..];
    if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(ColorParseError::HexDigit(digits.to_string()));
    }
    // digits are valid here, so egui can only object to the length
    Color32::from_hex(token).map_err(|_| ColorParseError::HexLength)
}

fn parse_functional(body: &str, with_alpha: bool) -> std::result::Result<Color32, ColorParseError> {
    let parts: Vec<&str> = body.split(',').map(str::trim).collect();
    let expected = if with_alpha { 4 } else { 3 };
    if parts.len() != expected {
        return Err(ColorParseError::ComponentCount {
            expected,
            found: parts.len(),
        });
    }

    let r = parse_channel(parts[0])?;
    let g = parse_channel(parts[1])?;
    let b = parse_channel(parts[2])?;
    if with_alpha {
        let a = parse_alpha(parts[3])?;
        Ok(Color32::from_rgba_unmultiplied(r, g, b, a))
    } else {
        Ok(Color32::from_rgb(r, g, b))
    }
}

fn parse_channel(part: &str) -> std::result::Result<u8, ColorParseError> {
    let invalid = || ColorParseError::Component(part.to_string());
    if let Some(percent) = part.strip_suffix('%') {
        let value: f32 = percent.trim().parse().map_err(|_| invalid())?;
        if !(0.0..=100.0).contains(&value) {
            return Err(invalid());
        }
        return Ok((value / 100.0 * 255.0).round() as u8);
    }
    part.parse::<u8>().map_err(|_| invalid())
}

fn parse_alpha(part: &str) -> std::result::Result<u8, ColorParseError> {
    let value: f32 = part
        .parse()
        .map_err(|_| ColorParseError::Component(part.to_string()))?;
    if !(0.0..=1.0).contains(&value) {
        return Err(ColorParseError::Component(part.to_string()));
    }
    Ok((value * 255.0).round() as u8)
}
