use qrcode::types::QrError;
use qrcode::QrCode;
use tracing::debug;

use super::error::{QRError, QRResult};
use super::metadata::{ECLevel, RoundBlockSizeMode};

// Matrix
//------------------------------------------------------------------------------

/// The encoded symbol: a square grid of blocks (`1` dark, `0` light) plus the pixel
/// geometry used to lay it out on a canvas of the requested size.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    blocks: Vec<u8>,
    block_count: usize,
    block_size: f64,
    inner_size: u32,
    outer_size: u32,
    margin_left: u32,
    margin_right: u32,
    mode: RoundBlockSizeMode,
}

impl Matrix {
    pub fn new(
        block_values: Vec<Vec<u8>>,
        size: u32,
        margin: u32,
        mode: RoundBlockSizeMode,
    ) -> QRResult<Self> {
        let block_count = block_values.len();
        debug_assert!(block_values.iter().all(|r| r.len() == block_count), "Matrix is not square");
        if block_count == 0 {
            return Err(QRError::EmptyData);
        }

        // Pixel sizes must fit in a u32 canvas dimension
        let padded = |inner: u32| margin.checked_mul(2).and_then(|m| inner.checked_add(m));
        let rounded = |block_size: f64| {
            u32::try_from(block_count).ok().and_then(|n| (block_size as u32).checked_mul(n))
        };

        let mut block_size = size as f64 / block_count as f64;
        let mut inner_size = size;
        let mut outer_size = padded(size).ok_or(QRError::InvalidSize)?;

        match mode {
            RoundBlockSizeMode::Enlarge => {
                block_size = block_size.ceil();
                inner_size = rounded(block_size).ok_or(QRError::InvalidSize)?;
                outer_size = padded(inner_size).ok_or(QRError::InvalidSize)?;
            }
            RoundBlockSizeMode::Shrink => {
                block_size = block_size.floor();
                inner_size = rounded(block_size).ok_or(QRError::InvalidSize)?;
                outer_size = padded(inner_size).ok_or(QRError::InvalidSize)?;
            }
            RoundBlockSizeMode::Margin => {
                block_size = block_size.floor();
                inner_size = rounded(block_size).ok_or(QRError::InvalidSize)?;
            }
            RoundBlockSizeMode::None => {}
        }

        if block_size < 1.0 {
            return Err(QRError::BlockSizeTooSmall);
        }

        let margin_left = (outer_size - inner_size) / 2;
        let margin_right = outer_size - inner_size - margin_left;
        let blocks = block_values.into_iter().flatten().collect();

        Ok(Self {
            blocks,
            block_count,
            block_size,
            inner_size,
            outer_size,
            margin_left,
            margin_right,
            mode,
        })
    }

    pub fn block_count(&self) -> usize {
        self.block_count
    }

    pub fn block_value(&self, r: usize, c: usize) -> u8 {
        debug_assert!(r < self.block_count, "Row {r} out of bounds");
        debug_assert!(c < self.block_count, "Column {c} out of bounds");
        self.blocks[r * self.block_count + c]
    }

    pub fn is_dark(&self, r: usize, c: usize) -> bool {
        self.block_value(r, c) == 1
    }

    pub fn block_size(&self) -> f64 {
        self.block_size
    }

    pub fn inner_size(&self) -> u32 {
        self.inner_size
    }

    pub fn outer_size(&self) -> u32 {
        self.outer_size
    }

    pub fn margin_left(&self) -> u32 {
        self.margin_left
    }

    pub fn margin_right(&self) -> u32 {
        self.margin_right
    }

    pub fn round_block_size_mode(&self) -> RoundBlockSizeMode {
        self.mode
    }

    pub fn to_rows(&self) -> Vec<Vec<u8>> {
        self.blocks.chunks_exact(self.block_count).map(<[u8]>::to_vec).collect()
    }

    /// Pixel offset of block `i`, truncated so adjacent blocks never overlap or gap.
    pub fn block_offset(&self, i: usize) -> u32 {
        (i as f64 * self.block_size) as u32
    }

    pub fn count_dark_blocks(&self) -> usize {
        self.blocks.iter().filter(|&&b| b == 1).count()
    }
}

// Encoder
//------------------------------------------------------------------------------

/// Encodes `data` with the external symbol encoder and lays it out for `size` pixels.
pub fn encode(
    data: &[u8],
    ec_level: ECLevel,
    size: u32,
    margin: u32,
    mode: RoundBlockSizeMode,
) -> QRResult<Matrix> {
    let code = QrCode::with_error_correction_level(data, ec_level.into()).map_err(|e| match e {
        QrError::DataTooLong => QRError::DataTooLong,
        _ => QRError::Image(e.to_string()),
    })?;

    let w = code.width();
    debug!("Encoded {} bytes into {w}x{w} modules at {ec_level:?}", data.len());

    let colors = code.into_colors();
    let rows = colors
        .chunks_exact(w)
        .map(|row| row.iter().map(|c| c.select(1, 0)).collect())
        .collect();

    Matrix::new(rows, size, margin, mode)
}
