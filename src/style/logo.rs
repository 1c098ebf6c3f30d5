use std::fs::File;
use std::path::{Path, PathBuf};

use image::RgbaImage;

use crate::common::error::{QRError, QRResult};

pub const DEFAULT_LOGO_WIDTH: u32 = 40;

// Logo manager
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Clone)]
pub struct LogoManager {
    path: PathBuf,
    width: u32,
    punchout: bool,
}

impl LogoManager {
    pub fn new<P: AsRef<Path>>(path: P, width: u32) -> QRResult<Self> {
        let mut logo = Self { path: PathBuf::new(), width: DEFAULT_LOGO_WIDTH, punchout: false };
        logo.set_logo(path)?;
        logo.set_logo_size(width)?;
        Ok(logo)
    }

    pub fn set_logo<P: AsRef<Path>>(&mut self, path: P) -> QRResult<()> {
        let path = path.as_ref();
        if !path.is_file() || File::open(path).is_err() {
            return Err(QRError::LogoNotFound(path.display().to_string()));
        }
        self.path = path.to_path_buf();
        Ok(())
    }

    pub fn set_logo_size(&mut self, width: u32) -> QRResult<()> {
        if width == 0 {
            return Err(QRError::InvalidLogoSize);
        }
        self.width = width;
        Ok(())
    }

    pub fn set_punchout_background(&mut self, punchout: bool) {
        self.punchout = punchout;
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn punchout_background(&self) -> bool {
        self.punchout
    }

    pub fn read_bytes(&self) -> QRResult<Vec<u8>> {
        std::fs::read(&self.path).map_err(|_| QRError::LogoNotFound(self.path.display().to_string()))
    }

    /// MIME type of the logo file, from its content.
    pub fn mime_type(&self, bytes: &[u8]) -> QRResult<&'static str> {
        if self.is_vector(bytes) {
            return Ok("image/svg+xml");
        }
        let format = image::guess_format(bytes)?;
        Ok(format.to_mime_type())
    }

    fn is_vector(&self, bytes: &[u8]) -> bool {
        let by_ext = self.path.extension().is_some_and(|e| e.eq_ignore_ascii_case("svg"));
        let head = &bytes[..bytes.len().min(512)];
        let by_content = String::from_utf8_lossy(head).contains("<svg");
        by_ext || by_content
    }

    /// Decodes the logo for raster writers. Vector logos are rejected.
    pub fn load(&self) -> QRResult<LogoImage> {
        let bytes = self.read_bytes()?;
        if self.is_vector(&bytes) {
            return Err(QRError::UnsupportedLogoFormat);
        }
        let image = image::load_from_memory(&bytes)?.to_rgba8();
        let (w, h) = image.dimensions();
        let height = ((self.width as u64 * h as u64) / w.max(1) as u64).max(1) as u32;
        Ok(LogoImage { image, width: self.width, height, punchout: self.punchout })
    }
}

// Decoded logo
//------------------------------------------------------------------------------

/// A decoded logo with the footprint it occupies on the symbol.
#[derive(Debug, Clone)]
pub struct LogoImage {
    pub image: RgbaImage,
    pub width: u32,
    pub height: u32,
    pub punchout: bool,
}

#[cfg(test)]
pub(crate) mod logo_tests {
    use std::path::PathBuf;

    use image::{Rgba, RgbaImage};

    use super::LogoManager;
    use crate::common::error::QRError;

    /// Writes a `w`x`h` solid red PNG into the temp dir.
    pub(crate) fn write_logo(name: &str, w: u32, h: u32) -> PathBuf {
        let path = std::env::temp_dir().join(format!("qrforge_{name}.png"));
        RgbaImage::from_pixel(w, h, Rgba([255, 0, 0, 255])).save(&path).unwrap();
        path
    }

    #[test]
    fn test_missing_file() {
        let err = LogoManager::new("/no/such/logo.png", 40).unwrap_err();
        assert_eq!(err, QRError::LogoNotFound("/no/such/logo.png".into()));
    }

    #[test]
    fn test_zero_width() {
        let path = write_logo("zero_width", 10, 10);
        assert_eq!(LogoManager::new(&path, 0).unwrap_err(), QRError::InvalidLogoSize);
    }

    #[test]
    fn test_aspect_ratio() {
        let path = write_logo("aspect", 100, 50);
        let logo = LogoManager::new(&path, 40).unwrap().load().unwrap();
        assert_eq!((logo.width, logo.height), (40, 20));
        assert!(!logo.punchout);
    }

    #[test]
    fn test_mime_type() {
        let path = write_logo("mime", 4, 4);
        let logo = LogoManager::new(&path, 40).unwrap();
        let bytes = logo.read_bytes().unwrap();
        assert_eq!(logo.mime_type(&bytes).unwrap(), "image/png");
    }

    #[test]
    fn test_svg_rejected_by_raster() {
        let path = std::env::temp_dir().join("qrforge_logo_test.svg");
        std::fs::write(&path, r#"<svg xmlns="http://www.w3.org/2000/svg" width="4" height="4"/>"#)
            .unwrap();
        let logo = LogoManager::new(&path, 40).unwrap();
        assert_eq!(logo.load().unwrap_err(), QRError::UnsupportedLogoFormat);
        let bytes = logo.read_bytes().unwrap();
        assert_eq!(logo.mime_type(&bytes).unwrap(), "image/svg+xml");
    }
}
