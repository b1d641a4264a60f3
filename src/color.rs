// SPDX-License-Identifier: PMPL-1.0-or-later
//! WCAG 2.1 colorimetry.
//!
//! Relative luminance and contrast ratio as defined in
//! <https://www.w3.org/TR/WCAG21/#dfn-relative-luminance> and
//! <https://www.w3.org/TR/WCAG21/#dfn-contrast-ratio>.

use crate::error::{ContrastbotError, Result};
use std::fmt;
use std::str::FromStr;

/// sRGB companding threshold used by WCAG 2.1.
const LINEAR_THRESHOLD: f64 = 0.03928;

/// Luma coefficients for the red, green and blue channels.
const LUMA: [f64; 3] = [0.2126, 0.7152, 0.0722];

/// An sRGB color parsed from a `#RRGGBB` string
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Channels normalized to `[0, 1]`
    pub fn channels(&self) -> [f64; 3] {
        [self.r, self.g, self.b].map(|c| f64::from(c) / 255.0)
    }

    /// Relative luminance in `[0, 1]`
    pub fn luminance(&self) -> f64 {
        let [r, g, b] = self.channels().map(linearize);
        LUMA[0] * r + LUMA[1] * g + LUMA[2] * b
    }

    /// Contrast ratio against another color, in `[1, 21]`
    pub fn contrast(&self, other: &Rgb) -> f64 {
        ratio_from_luminance(self.luminance(), other.luminance())
    }
}

impl FromStr for Rgb {
    type Err = ContrastbotError;

    fn from_str(s: &str) -> Result<Self> {
        let hex = s.trim();
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        // from_str_radix tolerates a leading '+', so check the digits first
        if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(ContrastbotError::InvalidHex(s.to_string()));
        }
        let byte = |i: usize| {
            u8::from_str_radix(&digits[i..i + 2], 16)
                .map_err(|_| ContrastbotError::InvalidHex(s.to_string()))
        };
        Ok(Self::new(byte(0)?, byte(2)?, byte(4)?))
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Parse a hex color into normalized `(r, g, b)` fractions
pub fn parse_hex(hex: &str) -> Result<(f64, f64, f64)> {
    let [r, g, b] = hex.parse::<Rgb>()?.channels();
    Ok((r, g, b))
}

/// sRGB to linear-light companding (piecewise, not a plain 2.2 gamma)
pub fn linearize(c: f64) -> f64 {
    if c <= LINEAR_THRESHOLD {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// Relative luminance of a hex color
pub fn relative_luminance(hex: &str) -> Result<f64> {
    Ok(hex.parse::<Rgb>()?.luminance())
}

/// Contrast ratio between two hex colors.
/// Returns a ratio >= 1.0 (e.g., 4.5, 7.0, 21.0)
pub fn contrast_ratio(a: &str, b: &str) -> Result<f64> {
    let a: Rgb = a.parse()?;
    let b: Rgb = b.parse()?;
    Ok(a.contrast(&b))
}

fn ratio_from_luminance(l1: f64, l2: f64) -> f64 {
    (l1.max(l2) + 0.05) / (l1.min(l2) + 0.05)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_parse_hex_with_and_without_hash() {
        assert_eq!("#ff0000".parse::<Rgb>().unwrap(), Rgb::new(255, 0, 0));
        assert_eq!("00FF00".parse::<Rgb>().unwrap(), Rgb::new(0, 255, 0));
        assert_eq!("#1A1b26".parse::<Rgb>().unwrap(), Rgb::new(0x1a, 0x1b, 0x26));
    }

    #[test]
    fn test_parse_hex_rejects_malformed() {
        for bad in ["", "#", "#fff", "#12345", "#1234567", "#gg0000", "#+f0000", "red"] {
            assert!(
                matches!(bad.parse::<Rgb>(), Err(ContrastbotError::InvalidHex(_))),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_parse_hex_normalizes_channels() {
        let (r, g, b) = parse_hex("#ff8000").unwrap();
        assert_eq!(r, 1.0);
        assert!((g - 128.0 / 255.0).abs() < 1e-12);
        assert_eq!(b, 0.0);
    }

    #[test]
    fn test_linearize_piecewise() {
        assert_eq!(linearize(0.0), 0.0);
        assert_eq!(linearize(0.03928), 0.03928 / 12.92);
        assert!((linearize(1.0) - 1.0).abs() < 1e-12);
        // mid-grey lands well below 0.5 in linear light
        assert!((linearize(0.5) - 0.214_041).abs() < 1e-6);
    }

    #[test]
    fn test_relative_luminance_extremes() {
        assert_eq!(relative_luminance("#000000").unwrap(), 0.0);
        assert!((relative_luminance("#ffffff").unwrap() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_contrast_ratio_black_white() {
        let ratio = contrast_ratio("#000000", "#ffffff").unwrap();
        assert!((ratio - 21.0).abs() < 1e-9, "Black on white should be 21:1, got {:.4}", ratio);
    }

    #[test]
    fn test_contrast_ratio_known_pair() {
        // #767676 on white is the classic just-passing AA grey
        let ratio = contrast_ratio("#767676", "#ffffff").unwrap();
        assert!(ratio >= 4.5 && ratio < 4.6, "got {:.3}", ratio);
    }

    #[test]
    fn test_contrast_ratio_propagates_invalid() {
        assert!(contrast_ratio("#000000", "nope").is_err());
    }

    #[test]
    fn test_display_lowercase() {
        assert_eq!(Rgb::new(0xAB, 0x01, 0xFF).to_string(), "#ab01ff");
    }

    fn rgb() -> impl Strategy<Value = Rgb> {
        any::<(u8, u8, u8)>().prop_map(|(r, g, b)| Rgb::new(r, g, b))
    }

    proptest! {
        #[test]
        fn prop_contrast_is_symmetric(a in rgb(), b in rgb()) {
            prop_assert_eq!(a.contrast(&b), b.contrast(&a));
        }

        #[test]
        fn prop_contrast_with_self_is_one(a in rgb()) {
            prop_assert_eq!(a.contrast(&a), 1.0);
        }

        #[test]
        fn prop_contrast_is_bounded(a in rgb(), b in rgb()) {
            let ratio = a.contrast(&b);
            prop_assert!(ratio >= 1.0);
            prop_assert!(ratio <= 21.0 + 1e-9);
        }
    }
}
