use image::Rgba;

use super::error::{QRError, QRResult};

// Color
//------------------------------------------------------------------------------

/// Largest value of the renderer's alpha channel. `0` is opaque, `127` fully transparent.
pub const MAX_ALPHA: u8 = 127;

/// An RGB color with a 7-bit transparency channel.
///
/// Hex strings are accepted as `#RGB`, `#RRGGBB` or `#RRGGBBAA`. The 8-bit alpha of the
/// last form is halved (truncating) onto the `0..=127` scale, so `80` becomes `64` and
/// `FF` becomes `127`.
#[derive(Debug, PartialEq, Eq, Copy, Clone, Hash)]
pub struct Color {
    r: u8,
    g: u8,
    b: u8,
    alpha: u8,
}

impl Color {
    pub const BLACK: Self = Self::new(0, 0, 0);
    pub const WHITE: Self = Self::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, alpha: 0 }
    }

    pub fn with_alpha(r: u8, g: u8, b: u8, alpha: u8) -> Self {
        debug_assert!(alpha <= MAX_ALPHA, "Alpha {alpha} exceeds {MAX_ALPHA}");
        Self { r, g, b, alpha: alpha.min(MAX_ALPHA) }
    }

    pub fn from_hex(hex: &str) -> QRResult<Self> {
        let invalid = || QRError::InvalidColor(hex.to_string());

        let digits = hex.strip_prefix('#').ok_or_else(invalid)?;
        if !matches!(digits.len(), 3 | 6 | 8) || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(invalid());
        }

        let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).map_err(|_| invalid());
        match digits.len() {
            3 => {
                let nibble = |i: usize| {
                    u8::from_str_radix(&digits[i..i + 1], 16).map(|n| n * 17).map_err(|_| invalid())
                };
                Ok(Self::new(nibble(0)?, nibble(1)?, nibble(2)?))
            }
            6 => Ok(Self::new(channel(0)?, channel(2)?, channel(4)?)),
            _ => Ok(Self::with_alpha(channel(0)?, channel(2)?, channel(4)?, channel(6)? / 2)),
        }
    }

    pub fn red(&self) -> u8 {
        self.r
    }

    pub fn green(&self) -> u8 {
        self.g
    }

    pub fn blue(&self) -> u8 {
        self.b
    }

    pub fn alpha(&self) -> u8 {
        self.alpha
    }

    /// Opacity on the 8-bit scale used by image buffers.
    pub fn opacity(&self) -> u8 {
        255 - (self.alpha as u32 * 255 / MAX_ALPHA as u32) as u8
    }

    pub fn to_rgba(&self) -> Rgba<u8> {
        Rgba([self.r, self.g, self.b, self.opacity()])
    }

    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

#[cfg(test)]
mod color_tests {
    use proptest::prelude::*;
    use test_case::test_case;

    use super::Color;
    use crate::common::error::QRError;

    #[test]
    fn test_parse_rrggbb() {
        let clr = Color::from_hex("#FF5733").unwrap();
        assert_eq!((clr.red(), clr.green(), clr.blue(), clr.alpha()), (255, 87, 51, 0));
    }

    #[test]
    fn test_parse_short_form() {
        assert_eq!(Color::from_hex("#F53").unwrap(), Color::new(0xff, 0x55, 0x33));
        assert_eq!(Color::from_hex("#fff").unwrap(), Color::WHITE);
    }

    #[test_case("#FF000000", 0; "alpha_0")]
    #[test_case("#FF00007F", 63; "alpha_127")]
    #[test_case("#FF000080", 64; "alpha_128")]
    #[test_case("#FF0000FF", 127; "alpha_255")]
    fn test_alpha_is_halved(hex: &str, alpha: u8) {
        let clr = Color::from_hex(hex).unwrap();
        assert_eq!((clr.red(), clr.green(), clr.blue()), (255, 0, 0));
        assert_eq!(clr.alpha(), alpha);
    }

    #[test_case("red")]
    #[test_case("ffffff")]
    #[test_case("#fffffff")]
    #[test_case("#ffff")]
    #[test_case("#gggggg")]
    #[test_case("")]
    #[test_case("#")]
    fn test_malformed(hex: &str) {
        assert_eq!(Color::from_hex(hex), Err(QRError::InvalidColor(hex.to_string())));
    }

    #[test]
    fn test_opacity() {
        assert_eq!(Color::BLACK.opacity(), 255);
        assert_eq!(Color::with_alpha(0, 0, 0, 127).opacity(), 0);
        assert_eq!(Color::with_alpha(0, 0, 0, 64).to_rgba().0[3], 127);
    }

    proptest! {
        #[test]
        fn proptest_rrggbb_roundtrip(r in any::<u8>(), g in any::<u8>(), b in any::<u8>()) {
            let clr = Color::from_hex(&format!("#{r:02X}{g:02X}{b:02X}")).unwrap();
            prop_assert_eq!(clr, Color::new(r, g, b));
            prop_assert_eq!(clr.to_hex(), format!("#{r:02x}{g:02x}{b:02x}"));
        }

        #[test]
        fn proptest_rrggbbaa_alpha(a in any::<u8>()) {
            let clr = Color::from_hex(&format!("#102030{a:02x}")).unwrap();
            prop_assert_eq!(clr.alpha(), a / 2);
        }
    }
}
