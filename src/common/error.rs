use std::fmt::{Display, Error, Formatter};

use crate::datatype::DataType;

// Error
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum ErrorKind {
    InvalidInput,
    MissingDependency,
}

#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum Dependency {
    Phone,
    Pdf,
    Raster,
}

impl Display for Dependency {
    fn fmt(&self, f: &mut Formatter) -> Result<(), Error> {
        let msg = match *self {
            Self::Phone => "the `phonenumber` library (enable the `phone` feature)",
            Self::Pdf => "the `printpdf` library (enable the `pdf` feature)",
            Self::Raster => "a raster image backend",
        };
        f.write_str(msg)
    }
}

#[derive(Debug, PartialEq, Eq, Clone)]
pub enum QRError {
    // Data
    EmptyData,
    InvalidData(DataType),
    UnsupportedDataType(String),
    DataTooLong,
    UnencodableData(&'static str),
    EmptyEncoding,
    UnsupportedEncoding(String),

    // Style
    InvalidSize,
    InvalidECLevel(String),
    InvalidColor(String),
    EmptyLabel,
    LabelTooLong,
    InvalidLabelAlignment(String),
    InvalidFontSize,
    InvalidFont(String),
    InvalidLabelMargin,
    InvalidLogoSize,
    LogoNotFound(String),
    UnsupportedLogoFormat,
    BlockSizeTooSmall,

    // Custom decoration
    InvalidKey { key: String, valid: Vec<&'static str> },
    UnsupportedFormat(String),
    UnsupportedCustomFormat(String),
    MalformedMatrix,

    // Rendering & output
    Image(String),
    SaveFailed(String),
    UnsupportedMimeType(String),

    // Dependencies
    MissingDependency(Dependency),
}

impl QRError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::MissingDependency(_) => ErrorKind::MissingDependency,
            _ => ErrorKind::InvalidInput,
        }
    }

    pub(crate) fn invalid_key(key: &str, valid: Vec<&'static str>) -> Self {
        Self::InvalidKey { key: key.to_string(), valid }
    }
}

impl Display for QRError {
    fn fmt(&self, f: &mut Formatter) -> Result<(), Error> {
        match self {
            // Data
            Self::EmptyData => f.write_str("Data cannot be empty"),
            Self::InvalidData(ty) => write!(f, "Invalid data for type: {ty}"),
            Self::UnsupportedDataType(ty) => write!(f, "Unsupported data type \"{ty}\""),
            Self::DataTooLong => f.write_str("Data too long to fit in a QR code"),
            Self::UnencodableData(enc) => write!(f, "Data cannot be represented in {enc}"),
            Self::EmptyEncoding => f.write_str("Encoding cannot be empty"),
            Self::UnsupportedEncoding(enc) => write!(
                f,
                "Unsupported encoding \"{enc}\". Supported encodings are: {}",
                crate::style::SUPPORTED_ENCODINGS.join(", ")
            ),

            // Style
            Self::InvalidSize => {
                f.write_str("Size must be a positive integer and, with the margin, fit in a u32 pixel dimension")
            }
            Self::InvalidECLevel(ecl) => write!(f, "Invalid error correction level \"{ecl}\""),
            Self::InvalidColor(hex) => write!(f, "Invalid color format: \"{hex}\""),
            Self::EmptyLabel => f.write_str("Label text cannot be empty"),
            Self::LabelTooLong => f.write_str("Label text cannot exceed 200 characters"),
            Self::InvalidLabelAlignment(align) => write!(
                f,
                "Invalid label alignment \"{align}\". Allowed values are \"left\", \"center\", or \"right\""
            ),
            Self::InvalidFontSize => f.write_str("Font size must be a positive integer"),
            Self::InvalidFont(path) => write!(f, "Unable to load font from \"{path}\""),
            Self::InvalidLabelMargin => f.write_str(
                "Margin must contain exactly 4 values [top, right, bottom, left], each within [-200, 200]",
            ),
            Self::InvalidLogoSize => f.write_str("Logo size must be a positive integer"),
            Self::LogoNotFound(path) => {
                write!(f, "Logo path \"{path}\" does not exist or is not readable")
            }
            Self::UnsupportedLogoFormat => f.write_str("Raster writers do not support vector logos"),
            Self::BlockSizeTooSmall => {
                f.write_str("Too much data: increase the size or use a lower error correction level")
            }

            // Custom decoration
            Self::InvalidKey { key, valid } => {
                write!(f, "Invalid key '{key}' provided. Valid keys are : {}.", valid.join(", "))
            }
            Self::UnsupportedFormat(format) => write!(
                f,
                "Unsupported format '{format}'. Supported formats: {}",
                crate::writer::Format::names().join(", ")
            ),
            Self::UnsupportedCustomFormat(format) => {
                write!(f, "Custom writers not supported for '{format}'")
            }
            Self::MalformedMatrix => f.write_str("Matrix is missing a finder pattern anchor"),

            // Rendering & output
            Self::Image(msg) => write!(f, "Image error: {msg}"),
            Self::SaveFailed(path) => write!(f, "Saving to file \"{path}\" failed"),
            Self::UnsupportedMimeType(mime) => write!(f, "Unsupported format \"{mime}\""),

            // Dependencies
            Self::MissingDependency(dep) => write!(f, "Missing dependency: {dep} is required"),
        }
    }
}

impl std::error::Error for QRError {}

impl From<image::ImageError> for QRError {
    fn from(err: image::ImageError) -> Self {
        Self::Image(err.to_string())
    }
}

pub type QRResult<T> = Result<T, QRError>;

#[cfg(test)]
mod error_tests {
    use super::{Dependency, ErrorKind, QRError};

    #[test]
    fn test_invalid_key_lists_valid_keys() {
        let err = QRError::invalid_key("M9", vec!["M1", "M2", "M3"]);
        assert_eq!(err.to_string(), "Invalid key 'M9' provided. Valid keys are : M1, M2, M3.");
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
    }

    #[test]
    fn test_missing_dependency_kind() {
        let err = QRError::MissingDependency(Dependency::Pdf);
        assert_eq!(err.kind(), ErrorKind::MissingDependency);
        assert!(err.to_string().contains("printpdf"));
    }

    #[test]
    fn test_save_failure_is_input_error() {
        assert_eq!(QRError::SaveFailed("/nope".into()).kind(), ErrorKind::InvalidInput);
    }
}
