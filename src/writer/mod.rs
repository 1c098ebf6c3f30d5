mod binary;
mod compose;
mod custom_png;
mod eps;
mod pdf;
mod raster;
mod svg;

use std::fmt::{Display, Error, Formatter};
use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use image::{ImageFormat, RgbaImage};
use tracing::debug;

pub use binary::BinaryWriter;
pub use compose::{add_label, add_logo, target_canvas, tint, TINT_ALPHA_THRESHOLD};
pub use custom_png::{CustomPngWriter, FINDER_PATTERN_SIZE, QUALITY_MULTIPLIER};
pub use eps::EpsWriter;
pub use pdf::PdfWriter;
pub use raster::RasterWriter;
pub use svg::SvgWriter;

use crate::common::color::Color;
use crate::common::error::{QRError, QRResult};
use crate::common::matrix::Matrix;
use crate::style::{LabelManager, LogoManager};

// Format
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Copy, Clone, Hash)]
pub enum Format {
    Png,
    Svg,
    Pdf,
    Webp,
    Gif,
    Eps,
    Binary,
}

impl Format {
    pub const ALL: [Self; 7] =
        [Self::Png, Self::Svg, Self::Pdf, Self::Webp, Self::Gif, Self::Eps, Self::Binary];

    pub fn names() -> Vec<&'static str> {
        Self::ALL.iter().map(Format::name).collect()
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Svg => "svg",
            Self::Pdf => "pdf",
            Self::Webp => "webp",
            Self::Gif => "gif",
            Self::Eps => "eps",
            Self::Binary => "binary",
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Svg => "image/svg+xml",
            Self::Pdf => "application/pdf",
            Self::Webp => "image/webp",
            Self::Gif => "image/gif",
            Self::Eps => "image/eps",
            Self::Binary => "text/plain",
        }
    }

    /// Only PNG has a rasterizer that can draw finder-pattern decorations.
    pub fn supports_customization(&self) -> bool {
        matches!(self, Self::Png)
    }

    /// The plain writer for this format.
    pub fn writer(&self) -> Box<dyn Writer> {
        match self {
            Self::Png => Box::new(RasterWriter::new(ImageFormat::Png)),
            Self::Webp => Box::new(RasterWriter::new(ImageFormat::WebP)),
            Self::Gif => Box::new(RasterWriter::new(ImageFormat::Gif)),
            Self::Svg => Box::new(SvgWriter),
            Self::Eps => Box::new(EpsWriter),
            Self::Pdf => Box::new(PdfWriter),
            Self::Binary => Box::new(BinaryWriter),
        }
    }
}

impl FromStr for Format {
    type Err = QRError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|f| f.name() == name)
            .ok_or_else(|| QRError::UnsupportedFormat(s.to_string()))
    }
}

impl Display for Format {
    fn fmt(&self, f: &mut Formatter) -> Result<(), Error> {
        f.write_str(self.name())
    }
}

/// File extension for a MIME type, dot included.
pub fn extension_for(mime: &str) -> QRResult<&'static str> {
    match mime {
        "image/png" => Ok(".png"),
        "image/gif" => Ok(".gif"),
        "image/svg+xml" => Ok(".svg"),
        "image/webp" => Ok(".webp"),
        "image/eps" | "application/postscript" => Ok(".eps"),
        "application/pdf" => Ok(".pdf"),
        "application/octet-stream" | "text/plain" => Ok(".bin"),
        _ => Err(QRError::UnsupportedMimeType(mime.to_string())),
    }
}

// Writer
//------------------------------------------------------------------------------

/// Styling shared by every writer.
#[derive(Debug, Clone, Copy)]
pub struct RenderOptions<'a> {
    pub foreground: Color,
    pub background: Color,
    pub logo: Option<&'a LogoManager>,
    pub label: Option<&'a LabelManager>,
}

impl Default for RenderOptions<'_> {
    fn default() -> Self {
        Self { foreground: Color::BLACK, background: Color::WHITE, logo: None, label: None }
    }
}

pub trait Writer {
    fn format(&self) -> Format;

    fn write(&self, matrix: &Matrix, opts: &RenderOptions) -> QRResult<QRCode>;
}

pub(crate) fn encode_image(img: &RgbaImage, format: ImageFormat) -> QRResult<Vec<u8>> {
    let mut buf = Vec::new();
    img.write_to(&mut Cursor::new(&mut buf), format)?;
    Ok(buf)
}

// Output
//------------------------------------------------------------------------------

/// A generated code: the encoded file contents, their MIME type and the source matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct QRCode {
    bytes: Vec<u8>,
    mime: &'static str,
    matrix: Matrix,
}

impl QRCode {
    pub fn new(bytes: Vec<u8>, mime: &'static str, matrix: Matrix) -> Self {
        Self { bytes, mime, matrix }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    pub fn mime_type(&self) -> &'static str {
        self.mime
    }

    pub fn data_uri(&self) -> String {
        format!("data:{};base64,{}", self.mime, STANDARD.encode(&self.bytes))
    }

    pub fn matrix(&self) -> &Matrix {
        &self.matrix
    }

    pub fn matrix_as_array(&self) -> Vec<Vec<u8>> {
        self.matrix.to_rows()
    }

    /// Writes the code to `base_path` plus the extension for its MIME type and returns
    /// the final path.
    pub fn save<P: AsRef<Path>>(&self, base_path: P) -> QRResult<PathBuf> {
        let ext = extension_for(self.mime)?;
        let mut path = base_path.as_ref().as_os_str().to_os_string();
        path.push(ext);
        let path = PathBuf::from(path);

        std::fs::write(&path, &self.bytes)
            .map_err(|_| QRError::SaveFailed(path.display().to_string()))?;
        debug!("Saved {} bytes to {}", self.bytes.len(), path.display());
        Ok(path)
    }
}

impl Display for QRCode {
    fn fmt(&self, f: &mut Formatter) -> Result<(), Error> {
        f.write_str(&self.data_uri())
    }
}

#[cfg(test)]
mod writer_tests {
    use test_case::test_case;

    use super::{extension_for, Format, QRCode};
    use crate::common::error::QRError;
    use crate::common::matrix::matrix_tests::test_pattern;
    use crate::common::matrix::Matrix;
    use crate::common::metadata::RoundBlockSizeMode;

    fn code(bytes: &[u8], mime: &'static str) -> QRCode {
        let m = Matrix::new(test_pattern(), 100, 0, RoundBlockSizeMode::Margin).unwrap();
        QRCode::new(bytes.to_vec(), mime, m)
    }

    #[test_case(" PNG ", Format::Png)]
    #[test_case("binary", Format::Binary)]
    #[test_case("WebP", Format::Webp)]
    fn test_format_from_str(s: &str, exp: Format) {
        assert_eq!(s.parse::<Format>().unwrap(), exp);
    }

    #[test]
    fn test_unknown_format_lists_supported() {
        let err = "bmp".parse::<Format>().unwrap_err();
        assert_eq!(err, QRError::UnsupportedFormat("bmp".into()));
        assert_eq!(
            err.to_string(),
            "Unsupported format 'bmp'. Supported formats: png, svg, pdf, webp, gif, eps, binary"
        );
    }

    #[test_case("image/png", ".png")]
    #[test_case("image/svg+xml", ".svg")]
    #[test_case("application/postscript", ".eps")]
    #[test_case("text/plain", ".bin")]
    #[test_case("application/octet-stream", ".bin")]
    fn test_extension(mime: &str, exp: &str) {
        assert_eq!(extension_for(mime).unwrap(), exp);
    }

    #[test]
    fn test_every_format_has_extension() {
        for f in Format::ALL {
            assert!(extension_for(f.mime_type()).is_ok(), "{f}");
        }
        assert_eq!(extension_for("image/bmp"), Err(QRError::UnsupportedMimeType("image/bmp".into())));
    }

    #[test]
    fn test_data_uri() {
        let qr = code(b"hello", "text/plain");
        assert_eq!(qr.data_uri(), "data:text/plain;base64,aGVsbG8=");
        assert_eq!(qr.to_string(), qr.data_uri());
    }

    #[test]
    fn test_save_appends_extension() {
        let base = std::env::temp_dir().join("qrforge_save_test");
        let path = code(b"0101", "text/plain").save(&base).unwrap();
        assert_eq!(path, std::env::temp_dir().join("qrforge_save_test.bin"));
        assert_eq!(std::fs::read(&path).unwrap(), b"0101");
        std::fs::remove_file(path).unwrap();
    }

    #[test]
    fn test_save_failure() {
        let err = code(b"x", "image/png").save("/no/such/dir/qr").unwrap_err();
        assert_eq!(err, QRError::SaveFailed("/no/such/dir/qr.png".into()));
    }

    #[test]
    fn test_matrix_as_array() {
        assert_eq!(code(b"", "image/png").matrix_as_array(), test_pattern());
    }
}
