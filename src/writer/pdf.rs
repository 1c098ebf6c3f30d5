use super::{Format, QRCode, RenderOptions, Writer};
use crate::common::error::QRResult;
use crate::common::matrix::Matrix;

/// Single-page PDF writer, one millimetre per pixel. Needs the `pdf` feature.
#[derive(Debug, Default, Copy, Clone)]
pub struct PdfWriter;

impl Writer for PdfWriter {
    fn format(&self) -> Format {
        Format::Pdf
    }

    #[cfg(feature = "pdf")]
    fn write(&self, matrix: &Matrix, opts: &RenderOptions) -> QRResult<QRCode> {
        let bytes = document::render(matrix, opts)?;
        Ok(QRCode::new(bytes, Format::Pdf.mime_type(), matrix.clone()))
    }

    #[cfg(not(feature = "pdf"))]
    fn write(&self, _matrix: &Matrix, _opts: &RenderOptions) -> QRResult<QRCode> {
        use crate::common::error::{Dependency, QRError};

        Err(QRError::MissingDependency(Dependency::Pdf))
    }
}

#[cfg(feature = "pdf")]
mod document {
    use printpdf::{BuiltinFont, Color as PdfColor, Mm, PdfDocument, Rect, Rgb};
    use tracing::{debug, warn};

    use crate::common::color::Color;
    use crate::common::error::{QRError, QRResult};
    use crate::common::matrix::Matrix;
    use crate::common::metadata::LabelAlignment;
    use crate::render::{ImageRaster, Raster};
    use crate::writer::RenderOptions;

    const PT_PER_MM: f32 = 72.0 / 25.4;

    pub(super) fn render(matrix: &Matrix, opts: &RenderOptions) -> QRResult<Vec<u8>> {
        if opts.logo.is_some() {
            warn!("PDF output ignores the logo");
        }
        let label = match opts.label {
            Some(l) => Some((l, l.font().load()?)),
            None => None,
        };

        let w = matrix.outer_size();
        let h = w + label.as_ref().map_or(0, |(l, font)| l.block_height(font));
        let (doc, page, layer) = PdfDocument::new("QR code", Mm(w as f32), Mm(h as f32), "QR");
        let layer = doc.get_page(page).get_layer(layer);

        // Page origin is bottom-left
        let rect = |x: u32, y: u32, rw: u32, rh: u32| {
            let top = (h - y) as f32;
            Rect::new(Mm(x as f32), Mm(top - rh as f32), Mm((x + rw) as f32), Mm(top))
        };

        layer.set_fill_color(fill(opts.background));
        layer.add_rect(rect(0, 0, w, h));

        layer.set_fill_color(fill(opts.foreground));
        let offset = matrix.margin_left();
        let n = matrix.block_count();
        for r in 0..n {
            let (y, y_end) = (matrix.block_offset(r), matrix.block_offset(r + 1));
            for c in (0..n).filter(|&c| matrix.is_dark(r, c)) {
                let (x, x_end) = (matrix.block_offset(c), matrix.block_offset(c + 1));
                layer.add_rect(rect(offset + x, offset + y, x_end - x, y_end - y));
            }
        }

        if let Some((label, font)) = &label {
            let helvetica = doc
                .add_builtin_font(BuiltinFont::Helvetica)
                .map_err(|e| QRError::Image(e.to_string()))?;
            let px = label.font_size() as f32;
            let text_w = ImageRaster.text_width(label.text(), font, px) as f32;
            let margin = label.margin();
            let x = match label.alignment() {
                LabelAlignment::Left => margin.left as f32,
                LabelAlignment::Center => w as f32 / 2.0 - text_w / 2.0,
                LabelAlignment::Right => w as f32 - text_w - margin.right as f32,
            };
            layer.set_fill_color(fill(label.color()));
            layer.use_text(label.text(), px * PT_PER_MM, Mm(x), Mm(margin.bottom as f32), &helvetica);
        }

        let bytes = doc.save_to_bytes().map_err(|e| QRError::Image(e.to_string()))?;
        debug!("Wrote {} byte pdf document", bytes.len());
        Ok(bytes)
    }

    fn fill(color: Color) -> PdfColor {
        let ch = |v: u8| v as f32 / 255.0;
        PdfColor::Rgb(Rgb::new(ch(color.red()), ch(color.green()), ch(color.blue()), None))
    }
}
