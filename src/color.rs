//! `#RRGGBB` color parsing.

use image::Rgba;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::PosterError;

/// An opaque sRGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Self = Self::new(0, 0, 0);
    pub const WHITE: Self = Self::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse a `#RRGGBB` string. `field` names the input in the error.
    pub fn parse_hex(field: &str, s: &str) -> Result<Self, PosterError> {
        let invalid = |reason: &str| {
            PosterError::invalid_argument(field, format!("'{}' {}", s, reason))
        };

        let hex = s
            .trim()
            .strip_prefix('#')
            .ok_or_else(|| invalid("must start with '#'"))?;
        if hex.len() != 6 || !hex.is_ascii() {
            return Err(invalid("must be #RRGGBB"));
        }

        let byte = |pair: &str| u8::from_str_radix(pair, 16).map_err(|_| invalid("is not valid hex"));
        Ok(Self::new(byte(&hex[0..2])?, byte(&hex[2..4])?, byte(&hex[4..6])?))
    }

    /// This color with the given alpha.
    #[inline]
    pub fn with_alpha(self, alpha: u8) -> Rgba<u8> {
        Rgba([self.r, self.g, self.b, alpha])
    }

    #[inline]
    pub fn opaque(self) -> Rgba<u8> {
        self.with_alpha(255)
    }
}

impl FromStr for Rgb {
    type Err = PosterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_hex("color", s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex() {
        assert_eq!(Rgb::parse_hex("fg", "#eb4034").unwrap(), Rgb::new(0xeb, 0x40, 0x34));
        assert_eq!(Rgb::parse_hex("bg", "#FFFFFF").unwrap(), Rgb::WHITE);
    }

    #[test]
    fn test_rejects_missing_hash() {
        assert!(Rgb::parse_hex("bg", "ffffff").is_err());
    }

    #[test]
    fn test_rejects_wrong_length() {
        assert!(Rgb::parse_hex("bg", "#fff").is_err());
        assert!(Rgb::parse_hex("bg", "#ffffff00").is_err());
    }

    #[test]
    fn test_rejects_non_hex_and_names_field() {
        let err = Rgb::parse_hex("bg_color", "#gg0000").unwrap_err();
        assert_eq!(err.field(), Some("bg_color"));
    }

    #[test]
    fn test_rejects_multibyte_input() {
        assert!(Rgb::parse_hex("bg", "#ééé").is_err());
    }

    #[test]
    fn test_with_alpha() {
        assert_eq!(Rgb::new(1, 2, 3).with_alpha(4), Rgba([1, 2, 3, 4]));
    }
}
