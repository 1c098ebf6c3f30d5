use std::fmt::{Debug, Formatter};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use ab_glyph::{Font, FontArc, ScaleFont};

use crate::common::color::Color;
use crate::common::error::{QRError, QRResult};
use crate::common::metadata::{LabelAlignment, Margin};

pub const MAX_LABEL_LEN: usize = 200;

const DEFAULT_FONT_SIZE: u32 = 20;
static BUNDLED_FONT: &[u8] = include_bytes!("../../assets/fonts/DejaVuSans.ttf");

// Font
//------------------------------------------------------------------------------

#[derive(Clone, Default)]
pub enum LabelFont {
    /// DejaVu Sans, compiled into the crate.
    #[default]
    Bundled,
    File { path: PathBuf, font: FontArc },
}

impl LabelFont {
    pub fn from_file<P: AsRef<Path>>(path: P) -> QRResult<Self> {
        let path = path.as_ref();
        let invalid = || QRError::InvalidFont(path.display().to_string());
        let bytes = std::fs::read(path).map_err(|_| invalid())?;
        let font = FontArc::try_from_vec(bytes).map_err(|_| invalid())?;
        Ok(Self::File { path: path.to_path_buf(), font })
    }

    pub fn load(&self) -> QRResult<FontArc> {
        match self {
            Self::Bundled => FontArc::try_from_slice(BUNDLED_FONT)
                .map_err(|_| QRError::InvalidFont("DejaVuSans.ttf".to_string())),
            Self::File { font, .. } => Ok(font.clone()),
        }
    }

    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Bundled => None,
            Self::File { path, .. } => Some(path),
        }
    }
}

impl Debug for LabelFont {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        match self {
            Self::Bundled => f.write_str("Bundled"),
            Self::File { path, .. } => write!(f, "File({})", path.display()),
        }
    }
}

// Label manager
//------------------------------------------------------------------------------

/// Text rendered below the symbol, with its alignment, color, font and margins.
#[derive(Debug, Clone)]
pub struct LabelManager {
    text: String,
    alignment: LabelAlignment,
    color: Color,
    font_size: u32,
    font: LabelFont,
    margin: Margin,
}

impl LabelManager {
    /// Builds a label, validating every field before anything is stored.
    pub fn new(
        text: &str,
        alignment: &str,
        color: &str,
        font_size: u32,
        margin: &[i32],
    ) -> QRResult<Self> {
        let mut label = Self {
            text: String::new(),
            alignment: LabelAlignment::default(),
            color: Color::BLACK,
            font_size: DEFAULT_FONT_SIZE,
            font: LabelFont::Bundled,
            margin: Margin::default(),
        };
        label.set_label(text)?;
        label.set_alignment(alignment)?;
        label.set_color(color)?;
        label.set_font_size(font_size)?;
        label.set_margin(margin)?;
        Ok(label)
    }

    pub fn set_label(&mut self, text: &str) -> QRResult<()> {
        if text.trim().is_empty() {
            return Err(QRError::EmptyLabel);
        }
        if text.chars().count() > MAX_LABEL_LEN {
            return Err(QRError::LabelTooLong);
        }
        self.text = text.to_string();
        Ok(())
    }

    pub fn set_alignment(&mut self, alignment: &str) -> QRResult<()> {
        self.alignment = LabelAlignment::from_str(alignment)?;
        Ok(())
    }

    pub fn set_color(&mut self, hex: &str) -> QRResult<()> {
        self.color = Color::from_hex(hex)?;
        Ok(())
    }

    pub fn set_font_size(&mut self, size: u32) -> QRResult<()> {
        if size == 0 {
            return Err(QRError::InvalidFontSize);
        }
        self.font_size = size;
        Ok(())
    }

    pub fn set_font<P: AsRef<Path>>(&mut self, path: P) -> QRResult<()> {
        self.font = LabelFont::from_file(path)?;
        Ok(())
    }

    pub fn set_margin(&mut self, margin: &[i32]) -> QRResult<()> {
        self.margin = Margin::from_slice(margin)?;
        Ok(())
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn alignment(&self) -> LabelAlignment {
        self.alignment
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn font_size(&self) -> u32 {
        self.font_size
    }

    pub fn font(&self) -> &LabelFont {
        &self.font
    }

    pub fn margin(&self) -> Margin {
        self.margin
    }

    /// Ascent of the loaded font at the label's size, in pixels.
    pub fn ascent(&self, font: &FontArc) -> f32 {
        font.as_scaled(self.font_size as f32).ascent()
    }

    /// Height of one line of text, ascent to descent, in pixels.
    pub fn line_height(&self, font: &FontArc) -> u32 {
        let scaled = font.as_scaled(self.font_size as f32);
        (scaled.ascent() - scaled.descent()).ceil() as u32
    }

    /// Vertical space the label adds below the symbol, margins included. Negative
    /// margins may shrink it to zero.
    pub fn block_height(&self, font: &FontArc) -> u32 {
        let h = self.line_height(font) as i64 + self.margin.top as i64 + self.margin.bottom as i64;
        h.max(0) as u32
    }
}
