//! RGB Colors and Blending
//!
//! Colors are plain 8-bit RGB triples. The engine never deals in named or
//! indexed colors: whatever the surface can display is its own business.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// An 8-bit-per-channel RGB color
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);

    /// Create a color from its channels
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Create a color from a packed `0xRRGGBB` value
    pub const fn from_u32(packed: u32) -> Self {
        Self {
            r: ((packed >> 16) & 0xff) as u8,
            g: ((packed >> 8) & 0xff) as u8,
            b: (packed & 0xff) as u8,
        }
    }

    /// Channels in r, g, b order
    pub const fn channels(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }
}

/// Blend `src` toward `dst` by `amount`
///
/// Each channel is `round(amount * dst + (1 - amount) * src)`. An `amount`
/// of 0 yields `src`, 1 yields `dst`; values outside `[0, 1]` are clamped.
#[must_use]
pub fn blend(src: Rgb, dst: Rgb, amount: f64) -> Rgb {
    let amount = amount.clamp(0.0, 1.0);
    let mix = |s: u8, d: u8| (amount * f64::from(d) + (1.0 - amount) * f64::from(s)).round() as u8;

    Rgb {
        r: mix(src.r, dst.r),
        g: mix(src.g, dst.g),
        b: mix(src.b, dst.b),
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl FromStr for Rgb {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s
            .strip_prefix('#')
            .filter(|h| h.len() == 6 && h.chars().all(|c| c.is_ascii_hexdigit()))
            .ok_or_else(|| EngineError::InvalidColor(s.to_string()))?;

        u32::from_str_radix(hex, 16)
            .map(Rgb::from_u32)
            .map_err(|_| EngineError::InvalidColor(s.to_string()))
    }
}

impl TryFrom<String> for Rgb {
    type Error = EngineError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Rgb> for String {
    fn from(color: Rgb) -> Self {
        color.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLES: [Rgb; 5] = [
        Rgb::BLACK,
        Rgb::WHITE,
        Rgb::new(12, 200, 99),
        Rgb::new(255, 0, 128),
        Rgb::new(1, 2, 3),
    ];

    #[test]
    fn test_blend_endpoints() {
        for src in SAMPLES {
            for dst in SAMPLES {
                assert_eq!(blend(src, dst, 0.0), src);
                assert_eq!(blend(src, dst, 1.0), dst);
            }
        }
    }

    #[test]
    fn test_blend_midpoint_rounds_half_up() {
        let mixed = blend(Rgb::new(0, 255, 0), Rgb::new(255, 0, 0), 0.5);
        assert_eq!(mixed, Rgb::new(128, 128, 0));
    }

    #[test]
    fn test_blend_monotonic_per_channel() {
        let src = Rgb::new(10, 240, 100);
        let dst = Rgb::new(250, 5, 100);

        let mut prev = blend(src, dst, 0.0);
        for step in 1..=100 {
            let next = blend(src, dst, f64::from(step) / 100.0);
            assert!(next.r >= prev.r, "red must not fall as amount rises");
            assert!(next.g <= prev.g, "green must not rise as amount rises");
            assert_eq!(next.b, 100);
            prev = next;
        }
    }

    #[test]
    fn test_blend_clamps_amount() {
        let src = Rgb::new(10, 20, 30);
        let dst = Rgb::new(200, 100, 50);
        assert_eq!(blend(src, dst, -0.5), src);
        assert_eq!(blend(src, dst, 1.5), dst);
    }

    #[test]
    fn test_from_u32() {
        assert_eq!(Rgb::from_u32(0xff8000), Rgb::new(255, 128, 0));
        assert_eq!(Rgb::from_u32(0x000000), Rgb::BLACK);
    }

    #[test]
    fn test_parse_and_display() {
        let color: Rgb = "#1a2B3c".parse().unwrap();
        assert_eq!(color, Rgb::new(0x1a, 0x2b, 0x3c));
        assert_eq!(color.to_string(), "#1a2b3c");
    }

    #[test]
    fn test_parse_rejects_malformed() {
        for bad in ["1a2b3c", "#1a2b3", "#1a2b3c4", "#gg0000", ""] {
            assert!(
                matches!(bad.parse::<Rgb>(), Err(EngineError::InvalidColor(_))),
                "{bad:?} should not parse"
            );
        }
    }
}
