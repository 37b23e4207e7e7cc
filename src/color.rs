//! Color types and the temperature ramp.
//!
//! Colors travel through config files and SVG attributes as `#rrggbb` strings,
//! so [`Rgba`] parses and prints that notation.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// RGBA color with 8-bit components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgba {
    /// Red component (0-255).
    pub r: u8,
    /// Green component (0-255).
    pub g: u8,
    /// Blue component (0-255).
    pub b: u8,
    /// Alpha component (0-255, 255 = fully opaque).
    pub a: u8,
}

/// Cool-to-warm ramp used for the five temperature buckets.
pub const ANOMALY_RAMP: [Rgba; 5] = [
    Rgba::rgb(0x45, 0x75, 0xb4),
    Rgba::rgb(0x91, 0xbf, 0xdb),
    Rgba::rgb(0xfe, 0xe0, 0x90),
    Rgba::rgb(0xfc, 0x8d, 0x59),
    Rgba::rgb(0xd7, 0x30, 0x27),
];

impl Rgba {
    /// Fully transparent black.
    pub const TRANSPARENT: Self = Self::new(0, 0, 0, 0);
    /// Opaque black.
    pub const BLACK: Self = Self::new(0, 0, 0, 255);
    /// Opaque white.
    pub const WHITE: Self = Self::new(255, 255, 255, 255);

    /// Create a new RGBA color.
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Create an opaque RGB color (alpha = 255).
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    /// Parse `#rrggbb` or `#rrggbbaa` (the leading `#` is optional).
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidColor`] for any other length or a non-hex digit.
    pub fn from_hex(hex: &str) -> Result<Self> {
        let digits = hex.trim().trim_start_matches('#');
        if !matches!(digits.len(), 6 | 8) || !digits.is_ascii() {
            return Err(Error::InvalidColor(hex.to_string()));
        }

        let channel = |i: usize| {
            u8::from_str_radix(&digits[i..i + 2], 16)
                .map_err(|_| Error::InvalidColor(hex.to_string()))
        };

        let a = if digits.len() == 8 { channel(6)? } else { 255 };
        Ok(Self::new(channel(0)?, channel(2)?, channel(4)?, a))
    }

    /// Format as `#rrggbb`, appending the alpha byte only when not opaque.
    #[must_use]
    pub fn to_hex(self) -> String {
        if self.a == 255 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl TryFrom<String> for Rgba {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        Self::from_hex(&value)
    }
}

impl From<Rgba> for String {
    fn from(color: Rgba) -> Self {
        color.to_hex()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgba_constants() {
        assert_eq!(Rgba::BLACK, Rgba::rgb(0, 0, 0));
        assert_eq!(Rgba::WHITE, Rgba::rgb(255, 255, 255));
        assert_eq!(Rgba::TRANSPARENT.a, 0);
    }

    #[test]
    fn test_from_hex() {
        let c = Rgba::from_hex("#4575b4").unwrap();
        assert_eq!(c, Rgba::rgb(0x45, 0x75, 0xb4));

        let c = Rgba::from_hex("d7302780").unwrap();
        assert_eq!(c.a, 0x80);
    }

    #[test]
    fn test_from_hex_invalid() {
        assert!(Rgba::from_hex("#12345").is_err());
        assert!(Rgba::from_hex("#zzzzzz").is_err());
        assert!(Rgba::from_hex("").is_err());
        assert!(Rgba::from_hex("#ééé").is_err());
    }

    #[test]
    fn test_to_hex() {
        assert_eq!(ANOMALY_RAMP[0].to_hex(), "#4575b4");
        assert_eq!(ANOMALY_RAMP[4].to_string(), "#d73027");
        assert_eq!(Rgba::new(0, 0, 0, 0x80).to_hex(), "#00000080");
    }

    #[test]
    fn test_ramp_is_cool_to_warm() {
        assert!(ANOMALY_RAMP[0].b > ANOMALY_RAMP[0].r);
        assert!(ANOMALY_RAMP[4].r > ANOMALY_RAMP[4].b);
    }

    #[test]
    fn test_serde_hex_string() {
        let c: Rgba = serde_json::from_str("\"#fee090\"").unwrap();
        assert_eq!(c, ANOMALY_RAMP[2]);
        assert_eq!(serde_json::to_string(&c).unwrap(), "\"#fee090\"");
        assert!(serde_json::from_str::<Rgba>("\"red\"").is_err());
    }
}
