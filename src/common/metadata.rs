use std::fmt::{Display, Error, Formatter};
use std::str::FromStr;

use super::error::QRError;

// Error correction level
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Copy, Clone, Default)]
pub enum ECLevel {
    #[default]
    L,
    M,
    Q,
    H,
}

impl From<ECLevel> for qrcode::EcLevel {
    fn from(ecl: ECLevel) -> Self {
        match ecl {
            ECLevel::L => qrcode::EcLevel::L,
            ECLevel::M => qrcode::EcLevel::M,
            ECLevel::Q => qrcode::EcLevel::Q,
            ECLevel::H => qrcode::EcLevel::H,
        }
    }
}

impl FromStr for ECLevel {
    type Err = QRError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "l" | "low" => Ok(Self::L),
            "m" | "medium" => Ok(Self::M),
            "q" | "quartile" => Ok(Self::Q),
            "h" | "high" => Ok(Self::H),
            _ => Err(QRError::InvalidECLevel(s.to_string())),
        }
    }
}

// Round block size mode
//------------------------------------------------------------------------------

/// How a fractional block size (`size / block_count`) is settled.
#[derive(Debug, PartialEq, Eq, Copy, Clone, Default)]
pub enum RoundBlockSizeMode {
    /// Floor the block size and grow the margin to keep the outer size.
    #[default]
    Margin,
    /// Ceil the block size, the image grows.
    Enlarge,
    /// Floor the block size, the image shrinks.
    Shrink,
    /// Keep the fractional block size.
    None,
}

// Label alignment
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Copy, Clone, Default)]
pub enum LabelAlignment {
    Left,
    #[default]
    Center,
    Right,
}

impl FromStr for LabelAlignment {
    type Err = QRError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "left" => Ok(Self::Left),
            "center" => Ok(Self::Center),
            "right" => Ok(Self::Right),
            _ => Err(QRError::InvalidLabelAlignment(s.to_string())),
        }
    }
}

impl Display for LabelAlignment {
    fn fmt(&self, f: &mut Formatter) -> Result<(), Error> {
        let s = match self {
            Self::Left => "left",
            Self::Center => "center",
            Self::Right => "right",
        };
        f.write_str(s)
    }
}

// Label margin
//------------------------------------------------------------------------------

pub const MAX_LABEL_MARGIN: i32 = 200;

#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub struct Margin {
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
    pub left: i32,
}

impl Margin {
    pub fn from_slice(values: &[i32]) -> Result<Self, QRError> {
        let [top, right, bottom, left] = values else {
            return Err(QRError::InvalidLabelMargin);
        };
        if values.iter().any(|v| v.abs() > MAX_LABEL_MARGIN) {
            return Err(QRError::InvalidLabelMargin);
        }
        Ok(Self { top: *top, right: *right, bottom: *bottom, left: *left })
    }
}

impl Default for Margin {
    fn default() -> Self {
        Self { top: 0, right: 10, bottom: 10, left: 10 }
    }
}

#[cfg(test)]
mod metadata_tests {
    use test_case::test_case;

    use super::{ECLevel, LabelAlignment, Margin};
    use crate::common::error::QRError;

    #[test_case("low", ECLevel::L)]
    #[test_case("Medium", ECLevel::M)]
    #[test_case("q", ECLevel::Q)]
    #[test_case(" HIGH ", ECLevel::H)]
    fn test_ec_level_from_str(s: &str, exp: ECLevel) {
        assert_eq!(s.parse::<ECLevel>().unwrap(), exp);
    }

    #[test]
    fn test_alignment_is_case_sensitive() {
        assert_eq!("right".parse::<LabelAlignment>().unwrap(), LabelAlignment::Right);
        assert!("Right".parse::<LabelAlignment>().is_err());
    }

    #[test]
    fn test_margin_from_slice() {
        let m = Margin::from_slice(&[1, -2, 200, -200]).unwrap();
        assert_eq!((m.top, m.right, m.bottom, m.left), (1, -2, 200, -200));
    }

    #[test_case(&[0, 10, 10]; "too_few")]
    #[test_case(&[0, 10, 10, 10, 10]; "too_many")]
    #[test_case(&[0, 201, 10, 10]; "too_large")]
    #[test_case(&[-201, 10, 10, 10]; "too_small")]
    fn test_margin_rejected(values: &[i32]) {
        assert_eq!(Margin::from_slice(values), Err(QRError::InvalidLabelMargin));
    }
}
