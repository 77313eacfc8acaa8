//! RGBA colour type used for gradient stops.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ColorError;

/// 8-bit RGBA colour.
///
/// Serializes as a CSS hex string (`#rrggbb`, or `#rrggbbaa` when not opaque)
/// so it can be handed straight to a canvas gradient stop.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn transparent() -> Self {
        Self::new(0, 0, 0, 0)
    }

    /// Create from RGB hex value (e.g., 0x56D3C9)
    pub const fn from_hex(hex: u32) -> Self {
        Self::new(
            ((hex >> 16) & 0xFF) as u8,
            ((hex >> 8) & 0xFF) as u8,
            (hex & 0xFF) as u8,
            0xFF,
        )
    }

    /// Parse `#rrggbb`, `#rrggbbaa`, `0xRRGGBB` or bare hex digits.
    pub fn parse(input: &str) -> Result<Self, ColorError> {
        let trimmed = input.trim();
        let digits = trimmed
            .strip_prefix('#')
            .or_else(|| trimmed.strip_prefix("0x"))
            .or_else(|| trimmed.strip_prefix("0X"))
            .unwrap_or(trimmed);

        if digits.len() != 6 && digits.len() != 8 {
            return Err(ColorError::Length(input.to_string()));
        }
        // `from_str_radix` alone would accept a leading sign.
        if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(ColorError::Digits(input.to_string()));
        }
        let value =
            u32::from_str_radix(digits, 16).map_err(|_| ColorError::Digits(input.to_string()))?;

        Ok(if digits.len() == 6 {
            Self::from_hex(value)
        } else {
            Self::new(
                (value >> 24) as u8,
                ((value >> 16) & 0xFF) as u8,
                ((value >> 8) & 0xFF) as u8,
                (value & 0xFF) as u8,
            )
        })
    }

    pub fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }

    pub fn is_opaque(&self) -> bool {
        self.a == 0xFF
    }

    /// CSS hex notation accepted by `CanvasGradient.addColorStop`.
    pub fn to_css(&self) -> String {
        if self.is_opaque() {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }
}

impl Default for Rgba {
    fn default() -> Self {
        Self::transparent()
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_css())
    }
}

impl FromStr for Rgba {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<Rgba> for String {
    fn from(color: Rgba) -> Self {
        color.to_css()
    }
}

impl TryFrom<String> for Rgba {
    type Error = ColorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Rgba> for tiny_skia::Color {
    fn from(color: Rgba) -> Self {
        tiny_skia::Color::from_rgba8(color.r, color.g, color.b, color.a)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_hex() {
        let color = Rgba::from_hex(0xC7F0FE);
        assert_eq!(color, Rgba::new(0xC7, 0xF0, 0xFE, 0xFF));
    }

    #[test]
    fn test_parse_accepts_css_and_rust_notation() {
        assert_eq!(Rgba::parse("#56d3c9").unwrap(), Rgba::from_hex(0x56D3C9));
        assert_eq!(Rgba::parse("0x56D3C9").unwrap(), Rgba::from_hex(0x56D3C9));
        assert_eq!(
            Rgba::parse("#56d3c980").unwrap(),
            Rgba::from_hex(0x56D3C9).with_alpha(0x80)
        );
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert!(matches!(Rgba::parse("#fff"), Err(ColorError::Length(_))));
        assert!(matches!(Rgba::parse("#zzzzzz"), Err(ColorError::Digits(_))));
    }

    #[test]
    fn test_parse_rejects_signed_digits() {
        assert!(matches!(Rgba::parse("#+12345"), Err(ColorError::Digits(_))));
        assert!(matches!(Rgba::parse("0x-1234567"), Err(ColorError::Digits(_))));
    }

    #[test]
    fn test_css_output() {
        assert_eq!(Rgba::from_hex(0xC7F0FE).to_css(), "#c7f0fe");
        assert_eq!(Rgba::new(1, 2, 3, 4).to_css(), "#01020304");
    }

    #[test]
    fn test_serde_uses_css_strings() {
        let json = serde_json::to_string(&Rgba::from_hex(0x56D3C9)).unwrap();
        assert_eq!(json, "\"#56d3c9\"");
        let back: Rgba = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Rgba::from_hex(0x56D3C9));
    }
}
