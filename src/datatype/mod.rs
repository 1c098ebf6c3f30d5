mod email;
mod location;
mod phone;
mod screening;
mod url;
mod wifi;

use std::fmt::{Display, Error, Formatter};
use std::str::FromStr;

pub(crate) use screening::{has_script_tag, has_sql_injection};

use crate::common::error::{QRError, QRResult};

// Data type
//------------------------------------------------------------------------------

/// Semantic kind of a payload. Each kind validates its input and maps it onto the
/// string that is finally embedded in the symbol.
#[derive(Debug, PartialEq, Eq, Copy, Clone, Hash, Default)]
pub enum DataType {
    Url,
    Email,
    Phone,
    Wifi,
    Location,
    #[default]
    Text,
}

impl DataType {
    pub const ALL: [Self; 6] =
        [Self::Url, Self::Email, Self::Phone, Self::Wifi, Self::Location, Self::Text];

    /// Returns whether `value` is an acceptable payload for this kind.
    ///
    /// Only the phone check can fail for a reason other than the value itself: without the
    /// `phone` feature it reports [`QRError::MissingDependency`].
    pub fn validate(&self, value: &str) -> QRResult<bool> {
        let valid = match self {
            Self::Url => url::validate(value),
            Self::Email => email::validate(value),
            Self::Phone => phone::validate(value)?,
            Self::Wifi => wifi::validate(value),
            Self::Location => location::validate(value),
            Self::Text => !has_script_tag(value) && !has_sql_injection(value),
        };
        Ok(valid)
    }

    /// Maps a validated value onto its encoded form.
    pub fn canonicalize(&self, value: &str) -> String {
        match self {
            Self::Email => format!("mailto:{value}"),
            Self::Phone => format!("tel:{value}"),
            Self::Location => format!("https://www.google.com/maps?q={value}"),
            Self::Url | Self::Wifi | Self::Text => value.to_string(),
        }
    }

    /// Validates `value` and returns its canonical form.
    pub fn prepare(&self, value: &str) -> QRResult<String> {
        if !self.validate(value)? {
            return Err(QRError::InvalidData(*self));
        }
        if value.trim().is_empty() {
            return Err(QRError::EmptyData);
        }
        Ok(self.canonicalize(value))
    }
}

impl Display for DataType {
    fn fmt(&self, f: &mut Formatter) -> Result<(), Error> {
        let s = match self {
            Self::Url => "Url",
            Self::Email => "Email",
            Self::Phone => "Phone",
            Self::Wifi => "Wifi",
            Self::Location => "Location",
            Self::Text => "Text",
        };
        f.write_str(s)
    }
}

impl FromStr for DataType {
    type Err = QRError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.to_string().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| QRError::UnsupportedDataType(s.to_string()))
    }
}

#[cfg(test)]
mod datatype_tests {
    use test_case::test_case;

    use super::DataType;
    use crate::common::error::QRError;

    #[test_case(DataType::Email, "info@heroexpert.ir", "mailto:info@heroexpert.ir")]
    #[test_case(DataType::Location, "51.3890,12.3", "https://www.google.com/maps?q=51.3890,12.3")]
    #[test_case(DataType::Url, "https://www.rust-lang.org", "https://www.rust-lang.org")]
    #[test_case(DataType::Text, "Hello <b>world</b>", "Hello <b>world</b>"; "text_is_not_escaped")]
    fn test_prepare(ty: DataType, value: &str, exp: &str) {
        assert_eq!(ty.prepare(value).unwrap(), exp);
    }

    #[cfg(feature = "phone")]
    #[test]
    fn test_prepare_phone() {
        assert_eq!(DataType::Phone.prepare("+442012345678").unwrap(), "tel:+442012345678");
    }

    #[test]
    fn test_invalid_data_names_type() {
        let err = DataType::Location.prepare("91,0").unwrap_err();
        assert_eq!(err, QRError::InvalidData(DataType::Location));
        assert_eq!(err.to_string(), "Invalid data for type: Location");
    }

    #[test]
    fn test_blank_text_is_empty() {
        assert_eq!(DataType::Text.prepare("   "), Err(QRError::EmptyData));
        assert_eq!(DataType::Text.prepare(""), Err(QRError::EmptyData));
    }

    #[test]
    fn test_from_str() {
        assert_eq!("wifi".parse::<DataType>().unwrap(), DataType::Wifi);
        assert_eq!(" URL ".parse::<DataType>().unwrap(), DataType::Url);
        assert!("barcode".parse::<DataType>().is_err());
    }
}
