use crate::common::color::Color;
use crate::common::error::QRResult;

/// Foreground, background and label colors. Setters parse first and only assign on
/// success, so a rejected value leaves the previous one in place.
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub struct ColorManager {
    color: Color,
    background: Color,
    label: Color,
}

impl Default for ColorManager {
    fn default() -> Self {
        Self { color: Color::BLACK, background: Color::WHITE, label: Color::BLACK }
    }
}

impl ColorManager {
    pub fn set_color(&mut self, hex: &str) -> QRResult<()> {
        self.color = Color::from_hex(hex)?;
        Ok(())
    }

    pub fn set_background_color(&mut self, hex: &str) -> QRResult<()> {
        self.background = Color::from_hex(hex)?;
        Ok(())
    }

    pub fn set_label_color(&mut self, hex: &str) -> QRResult<()> {
        self.label = Color::from_hex(hex)?;
        Ok(())
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn background_color(&self) -> Color {
        self.background
    }

    pub fn label_color(&self) -> Color {
        self.label
    }
}
