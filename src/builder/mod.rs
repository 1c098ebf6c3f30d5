use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::common::{
    error::{QRError, QRResult},
    matrix::{encode, Matrix},
    metadata::{ECLevel, RoundBlockSizeMode},
};
use crate::custom::Customization;
use crate::datatype::DataType;
use crate::style::{ColorManager, EncodingManager, LabelManager, LogoManager};
use crate::writer::{CustomPngWriter, Format, QRCode, RenderOptions, Writer};

pub const DEFAULT_SIZE: u32 = 200;
pub const DEFAULT_MARGIN: u32 = 10;

const NOT_GENERATED: &str = "No QR code has been generated. Call generate() first.";

// Generator
//------------------------------------------------------------------------------

/// Configures and renders a QR code.
///
/// Every setter validates its input and leaves the previous value untouched on error.
/// Output accessors are only meaningful after a successful [`QRGenerator::generate`];
/// calling them earlier is a bug in the caller and panics.
///
/// ```rust
/// use qrforge::{Customization, DataType, QRGenerator};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let mut qr = QRGenerator::new();
/// qr.data("https://www.rust-lang.org", DataType::Url)?.size(300)?.color("#1a1a2e")?;
/// qr.generate("png", &Customization::new().marker("M2"))?;
/// assert!(qr.data_uri().starts_with("data:image/png;base64,"));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct QRGenerator {
    data: String,
    data_type: DataType,
    size: u32,
    margin: u32,
    colors: ColorManager,
    encoding: EncodingManager,
    ec_level: ECLevel,
    mode: RoundBlockSizeMode,
    logo: Option<LogoManager>,
    punchout: bool,
    label: Option<LabelManager>,
    output: Option<QRCode>,
}

impl Default for QRGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl QRGenerator {
    pub fn new() -> Self {
        Self {
            data: String::new(),
            data_type: DataType::Text,
            size: DEFAULT_SIZE,
            margin: DEFAULT_MARGIN,
            colors: ColorManager::default(),
            encoding: EncodingManager::default(),
            ec_level: ECLevel::L,
            mode: RoundBlockSizeMode::Margin,
            logo: None,
            punchout: false,
            label: None,
            output: None,
        }
    }

    /// Validates `data` as `data_type` and stores its canonical form.
    pub fn data(&mut self, data: &str, data_type: DataType) -> QRResult<&mut Self> {
        self.data = data_type.prepare(data)?;
        self.data_type = data_type;
        Ok(self)
    }

    /// Requested symbol size in pixels, margin excluded.
    pub fn size(&mut self, size: u32) -> QRResult<&mut Self> {
        if size == 0 {
            return Err(QRError::InvalidSize);
        }
        self.size = size;
        Ok(self)
    }

    pub fn margin(&mut self, margin: u32) -> QRResult<&mut Self> {
        self.margin = margin;
        Ok(self)
    }

    pub fn color(&mut self, hex: &str) -> QRResult<&mut Self> {
        self.colors.set_color(hex)?;
        Ok(self)
    }

    pub fn background_color(&mut self, hex: &str) -> QRResult<&mut Self> {
        self.colors.set_background_color(hex)?;
        Ok(self)
    }

    /// Centres a logo `width` pixels wide on the symbol. The height keeps the aspect ratio.
    pub fn logo<P: AsRef<Path>>(&mut self, path: P, width: u32) -> QRResult<&mut Self> {
        let mut logo = LogoManager::new(path, width)?;
        logo.set_punchout_background(self.punchout);
        self.logo = Some(logo);
        Ok(self)
    }

    /// Clears the symbol behind the logo before drawing it.
    pub fn logo_punchout(&mut self, punchout: bool) -> &mut Self {
        self.punchout = punchout;
        if let Some(logo) = self.logo.as_mut() {
            logo.set_punchout_background(punchout);
        }
        self
    }

    /// Adds a text line below the symbol. `margin` is `[top, right, bottom, left]`.
    pub fn label(
        &mut self,
        text: &str,
        alignment: &str,
        color: &str,
        font_size: u32,
        margin: &[i32],
    ) -> QRResult<&mut Self> {
        let mut label = LabelManager::new(text, alignment, color, font_size, margin)?;
        if let Some(font) = self.label.as_ref().and_then(|l| l.font().path()) {
            label.set_font(font)?;
        }
        self.colors.set_label_color(color)?;
        self.label = Some(label);
        Ok(self)
    }

    /// Replaces the bundled label font with a TTF/OTF file. Requires a label.
    pub fn label_font<P: AsRef<Path>>(&mut self, path: P) -> QRResult<&mut Self> {
        let label = self.label.as_mut().ok_or(QRError::EmptyLabel)?;
        label.set_font(path)?;
        Ok(self)
    }

    pub fn encoding(&mut self, encoding: &str) -> QRResult<&mut Self> {
        self.encoding.set_encoding(encoding)?;
        Ok(self)
    }

    pub fn error_correction(&mut self, ec_level: ECLevel) -> &mut Self {
        self.ec_level = ec_level;
        self
    }

    pub fn round_block_size_mode(&mut self, mode: RoundBlockSizeMode) -> &mut Self {
        self.mode = mode;
        self
    }

    pub fn metadata(&self) -> String {
        format!(
            "{{ Type: {}, Size: {}, Margin: {}, Ec level: {:?}, Encoding: {}, Mode: {:?} }}",
            self.data_type,
            self.size,
            self.margin,
            self.ec_level,
            self.encoding.encoding(),
            self.mode
        )
    }

    /// The canonical payload, e.g. `mailto:` prefixed for emails.
    pub fn payload(&self) -> &str {
        &self.data
    }

    pub fn data_type(&self) -> DataType {
        self.data_type
    }

    pub fn colors(&self) -> &ColorManager {
        &self.colors
    }

    pub fn logo_manager(&self) -> Option<&LogoManager> {
        self.logo.as_ref()
    }

    pub fn label_manager(&self) -> Option<&LabelManager> {
        self.label.as_ref()
    }
}

impl QRGenerator {
    /// Renders the configured code as `format`. Any key in `custom` selects the decorated
    /// PNG rasterizer, which only `png` supports.
    pub fn generate(&mut self, format: &str, custom: &Customization) -> QRResult<&QRCode> {
        if self.data.is_empty() {
            return Err(QRError::EmptyData);
        }
        let format: Format = format.parse()?;
        let writer: Box<dyn Writer> = if custom.is_empty() {
            format.writer()
        } else {
            if !format.supports_customization() {
                return Err(QRError::UnsupportedCustomFormat(format.to_string()));
            }
            let keys = custom.resolve()?;
            debug!("Decorating finders with {} and {}", keys.marker, keys.overlay_key());
            Box::new(CustomPngWriter::new(keys.marker, keys.overlay_key()))
        };

        debug!("Generating QR {}...", self.metadata());
        let payload = self.encoding.transcode(&self.data)?;
        let matrix = encode(&payload, self.ec_level, self.size, self.margin, self.mode)?;

        let opts = RenderOptions {
            foreground: self.colors.color(),
            background: self.colors.background_color(),
            logo: self.logo.as_ref(),
            label: self.label.as_ref(),
        };
        let qr = writer.write(&matrix, &opts)?;

        info!(
            "Generated {} QR: {n}x{n} blocks, {} bytes",
            writer.format(),
            qr.as_bytes().len(),
            n = matrix.block_count()
        );
        Ok(self.output.insert(qr))
    }

    /// The last generated code, if any.
    pub fn output(&self) -> Option<&QRCode> {
        self.output.as_ref()
    }

    fn generated(&self) -> &QRCode {
        match &self.output {
            Some(qr) => qr,
            None => panic!("{NOT_GENERATED}"),
        }
    }

    /// Writes the code to `base_path` plus the format's extension.
    pub fn save<P: AsRef<Path>>(&self, base_path: P) -> QRResult<PathBuf> {
        self.generated().save(base_path)
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.generated().as_bytes()
    }

    pub fn data_uri(&self) -> String {
        self.generated().data_uri()
    }

    pub fn matrix(&self) -> &Matrix {
        self.generated().matrix()
    }

    pub fn matrix_as_array(&self) -> Vec<Vec<u8>> {
        self.generated().matrix_as_array()
    }

    pub fn mime_type(&self) -> &'static str {
        self.generated().mime_type()
    }
}
