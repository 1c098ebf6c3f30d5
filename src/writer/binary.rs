use super::{Format, QRCode, RenderOptions, Writer};
use crate::common::error::QRResult;
use crate::common::matrix::Matrix;

/// The bare block grid as text, one row of `0`/`1` characters per line.
#[derive(Debug, Default, Copy, Clone)]
pub struct BinaryWriter;

impl Writer for BinaryWriter {
    fn format(&self) -> Format {
        Format::Binary
    }

    fn write(&self, matrix: &Matrix, _opts: &RenderOptions) -> QRResult<QRCode> {
        let text = matrix
            .to_rows()
            .iter()
            .map(|row| row.iter().map(|&b| if b == 1 { '1' } else { '0' }).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n");
        Ok(QRCode::new(text.into_bytes(), Format::Binary.mime_type(), matrix.clone()))
    }
}
