use std::fmt::Write as _;

use tracing::{debug, warn};

use super::{Format, QRCode, RenderOptions, Writer};
use crate::common::color::Color;
use crate::common::error::{QRError, QRResult};
use crate::common::matrix::Matrix;

/// Encapsulated PostScript writer. PostScript y grows upwards, so rows are flipped.
#[derive(Debug, Default, Copy, Clone)]
pub struct EpsWriter;

impl Writer for EpsWriter {
    fn format(&self) -> Format {
        Format::Eps
    }

    fn write(&self, matrix: &Matrix, opts: &RenderOptions) -> QRResult<QRCode> {
        if opts.logo.is_some() {
            warn!("EPS output ignores the logo");
        }
        if opts.label.is_some() {
            warn!("EPS output ignores the label");
        }

        let doc = document(matrix, opts).map_err(|e| QRError::Image(e.to_string()))?;
        debug!("Wrote {} byte eps document", doc.len());
        Ok(QRCode::new(doc.into_bytes(), Format::Eps.mime_type(), matrix.clone()))
    }
}

fn document(matrix: &Matrix, opts: &RenderOptions) -> Result<String, std::fmt::Error> {
    let size = matrix.outer_size();
    let mut eps = String::new();

    writeln!(eps, "%!PS-Adobe-3.0 EPSF-3.0")?;
    writeln!(eps, "%%BoundingBox: 0 0 {size} {size}")?;
    writeln!(eps, "%%LanguageLevel: 2")?;
    writeln!(eps, "%%EndComments")?;
    writeln!(eps, "{} setrgbcolor", rgb(opts.background))?;
    writeln!(eps, "0 0 {size} {size} rectfill")?;
    writeln!(eps, "{} setrgbcolor", rgb(opts.foreground))?;

    let offset = matrix.margin_left();
    let n = matrix.block_count();
    for r in 0..n {
        let (y, y_end) = (matrix.block_offset(r), matrix.block_offset(r + 1));
        for c in (0..n).filter(|&c| matrix.is_dark(r, c)) {
            let (x, x_end) = (matrix.block_offset(c), matrix.block_offset(c + 1));
            let bottom = size - offset - y_end;
            writeln!(eps, "{} {bottom} {} {} rectfill", offset + x, x_end - x, y_end - y)?;
        }
    }

    writeln!(eps, "showpage")?;
    writeln!(eps, "%%EOF")?;
    Ok(eps)
}

fn rgb(color: Color) -> String {
    let ch = |v: u8| v as f64 / 255.0;
    format!("{:.3} {:.3} {:.3}", ch(color.red()), ch(color.green()), ch(color.blue()))
}

#[cfg(test)]
mod eps_tests {
    use super::{rgb, EpsWriter};
    use crate::common::color::Color;
    use crate::common::matrix::matrix_tests::test_pattern;
    use crate::common::matrix::Matrix;
    use crate::common::metadata::RoundBlockSizeMode;
    use crate::style::LabelManager;
    use crate::writer::{RenderOptions, Writer};

    #[test]
    fn test_document() {
        let m = Matrix::new(test_pattern(), 200, 10, RoundBlockSizeMode::Margin).unwrap();
        let label = LabelManager::new("ignored", "center", "#000", 20, &[0, 10, 10, 10]).unwrap();
        let opts = RenderOptions { label: Some(&label), ..RenderOptions::default() };
        let qr = EpsWriter.write(&m, &opts).unwrap();
        assert_eq!(qr.mime_type(), "image/eps");

        let eps = String::from_utf8(qr.into_bytes()).unwrap();
        assert!(eps.starts_with("%!PS-Adobe-3.0 EPSF-3.0\n%%BoundingBox: 0 0 220 220\n"));
        // Background plus one per dark block
        assert_eq!(eps.matches("rectfill").count(), m.count_dark_blocks() + 1);
        // Top-left block sits at the top of the page
        assert!(eps.contains("\n10 202 8 8 rectfill\n"));
        assert!(eps.trim_end().ends_with("%%EOF"));
    }

    #[test]
    fn test_rgb() {
        assert_eq!(rgb(Color::WHITE), "1.000 1.000 1.000");
        assert_eq!(rgb(Color::new(255, 0, 51)), "1.000 0.000 0.200");
    }
}
