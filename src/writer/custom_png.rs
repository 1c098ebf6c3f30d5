use image::{ImageFormat, Rgba, RgbaImage};
use tracing::debug;

use super::compose::{add_label, add_logo, target_canvas, tint};
use super::{encode_image, Format, QRCode, RenderOptions, Writer};
use crate::common::error::{Dependency, QRError, QRResult};
use crate::common::matrix::Matrix;
use crate::common::metadata::RoundBlockSizeMode;
use crate::custom::{ImageOverlay, OverlayOptions};
use crate::render::{ImageRaster, Raster, Region, Rotation};

/// Supersampling factor of the intermediate canvas.
pub const QUALITY_MULTIPLIER: u32 = 10;

/// Side of a finder pattern in blocks.
pub const FINDER_PATTERN_SIZE: usize = 7;

const TRANSPARENT: Rgba<u8> = Rgba([0, 0, 0, 0]);

// Custom PNG writer
//------------------------------------------------------------------------------

/// PNG rasterizer that replaces the three finder patterns with marker/cursor artwork.
///
/// The symbol is drawn on a transparent canvas at [`QUALITY_MULTIPLIER`] times the block
/// size, each finder pattern painted once as a single bitmap from its top-left anchor
/// block, then resampled down onto the background. Logo and label are composited last.
pub struct CustomPngWriter {
    marker: &'static str,
    overlay: &'static str,
    raster: Box<dyn Raster>,
}

impl CustomPngWriter {
    /// `overlay` is a cursor or shape key.
    pub fn new(marker: &'static str, overlay: &'static str) -> Self {
        Self::with_raster(marker, overlay, Box::new(ImageRaster))
    }

    pub fn with_raster(marker: &'static str, overlay: &'static str, raster: Box<dyn Raster>) -> Self {
        Self { marker, overlay, raster }
    }

    pub fn marker(&self) -> &'static str {
        self.marker
    }

    pub fn overlay(&self) -> &'static str {
        self.overlay
    }

    /// Renders the final image without encoding it.
    pub fn render(&self, matrix: &Matrix, opts: &RenderOptions) -> QRResult<RgbaImage> {
        let raster = self.raster.as_ref();
        if !raster.is_available() {
            return Err(QRError::MissingDependency(Dependency::Raster));
        }
        check_finder_anchors(matrix)?;

        // Decode optional assets before any drawing so bad input fails fast
        let logo = opts.logo.map(|l| l.load()).transpose()?;
        let label = match opts.label {
            Some(l) => Some((l, l.font().load()?)),
            None => None,
        };

        let block = base_block_size(matrix);
        let n = matrix.block_count();
        debug!("Rasterizing {n}x{n} blocks at {block}px per block");

        let mut base = raster.canvas(n as u32 * block, n as u32 * block, TRANSPARENT);
        let corner = self.corner_image(block, opts)?;
        draw_matrix(raster, &mut base, matrix, block, opts.foreground.to_rgba(), &corner);
        drop(corner);

        let mut target =
            target_canvas(raster, matrix, opts.background, label.as_ref().map(|(l, f)| (*l, f)));
        let offset = matrix.margin_left() as i64;
        let inner = Region::square(offset, offset, matrix.inner_size());
        raster.copy_resampled(&mut target, &base, inner, Region::of_image(&base));
        drop(base);

        if let Some(logo) = &logo {
            add_logo(raster, &mut target, matrix, logo);
        }
        if let Some((label, font)) = &label {
            add_label(raster, &mut target, label, font);
        }
        Ok(target)
    }

    /// The finder decoration, tinted to the foreground and scaled to seven blocks.
    fn corner_image(&self, block: u32, opts: &RenderOptions) -> QRResult<RgbaImage> {
        let raster = self.raster.as_ref();
        let overlay = ImageOverlay::new(self.marker, self.overlay, OverlayOptions::default())?;
        let tinted = tint(raster, overlay.image(), opts.foreground);

        let side = FINDER_PATTERN_SIZE as u32 * block;
        let mut resized = raster.canvas(side, side, TRANSPARENT);
        raster.copy_resampled(&mut resized, &tinted, Region::square(0, 0, side), Region::of_image(&tinted));
        Ok(resized)
    }
}

impl Writer for CustomPngWriter {
    fn format(&self) -> Format {
        Format::Png
    }

    fn write(&self, matrix: &Matrix, opts: &RenderOptions) -> QRResult<QRCode> {
        let img = self.render(matrix, opts)?;
        let bytes = encode_image(&img, ImageFormat::Png)?;
        Ok(QRCode::new(bytes, Format::Png.mime_type(), matrix.clone()))
    }
}

// Matrix rasterization
//------------------------------------------------------------------------------

fn base_block_size(matrix: &Matrix) -> u32 {
    let reference = match matrix.round_block_size_mode() {
        RoundBlockSizeMode::Margin => 10,
        _ => matrix.block_size() as u32,
    };
    reference * QUALITY_MULTIPLIER
}

#[derive(Debug, PartialEq, Eq, Copy, Clone)]
enum Corner {
    TopLeft,
    TopRight,
    BottomLeft,
}

impl Corner {
    fn rotation(&self) -> Rotation {
        match self {
            Self::TopLeft => Rotation::None,
            Self::TopRight => Rotation::Deg270,
            Self::BottomLeft => Rotation::Deg90,
        }
    }
}

/// Top-left block of each finder pattern.
fn finder_anchors(n: usize) -> [(Corner, usize, usize); 3] {
    let far = n - FINDER_PATTERN_SIZE;
    [(Corner::TopLeft, 0, 0), (Corner::TopRight, 0, far), (Corner::BottomLeft, far, 0)]
}

fn corner_of(n: usize, r: usize, c: usize) -> Option<Corner> {
    let near = |i: usize| i < FINDER_PATTERN_SIZE;
    let far = |i: usize| i >= n - FINDER_PATTERN_SIZE;
    match (near(r), near(c), far(r), far(c)) {
        (true, true, _, _) => Some(Corner::TopLeft),
        (true, _, _, true) => Some(Corner::TopRight),
        (_, true, true, _) => Some(Corner::BottomLeft),
        _ => None,
    }
}

/// Every finder pattern must start with a dark anchor block, otherwise its decoration
/// would silently go missing.
fn check_finder_anchors(matrix: &Matrix) -> QRResult<()> {
    let n = matrix.block_count();
    if n < FINDER_PATTERN_SIZE * 2 {
        return Err(QRError::MalformedMatrix);
    }
    if finder_anchors(n).iter().all(|&(_, r, c)| matrix.is_dark(r, c)) {
        Ok(())
    } else {
        Err(QRError::MalformedMatrix)
    }
}

fn draw_matrix(
    raster: &dyn Raster,
    canvas: &mut RgbaImage,
    matrix: &Matrix,
    block: u32,
    color: Rgba<u8>,
    corner: &RgbaImage,
) {
    let n = matrix.block_count();
    let anchors = finder_anchors(n);
    let side = FINDER_PATTERN_SIZE as u32 * block;

    for r in 0..n {
        for c in 0..n {
            if !matrix.is_dark(r, c) {
                continue;
            }
            let (x, y) = (c as i64 * block as i64, r as i64 * block as i64);
            match corner_of(n, r, c) {
                Some(which) => {
                    // Only the anchor paints; the rest of the 7x7 region is covered by it
                    if !anchors.contains(&(which, r, c)) {
                        continue;
                    }
                    let rotated = raster.rotate(corner, which.rotation());
                    raster.copy_resampled(canvas, &rotated, Region::square(x, y, side), Region::square(0, 0, side));
                }
                None => raster.fill_rect(canvas, Region::square(x, y, block - 1), color),
            }
        }
    }
}

#[cfg(test)]
mod custom_png_tests {
    use image::Rgba;
    use test_case::test_case;

    use super::{base_block_size, check_finder_anchors, corner_of, finder_anchors, Corner, CustomPngWriter};
    use crate::common::color::Color;
    use crate::common::error::{Dependency, QRError};
    use crate::common::matrix::matrix_tests::test_pattern;
    use crate::common::matrix::Matrix;
    use crate::common::metadata::RoundBlockSizeMode;
    use crate::render::render_tests::CountingRaster;
    use crate::render::Rotation;
    use crate::writer::{RenderOptions, Writer};

    fn matrix(size: u32, mode: RoundBlockSizeMode) -> Matrix {
        Matrix::new(test_pattern(), size, 10, mode).unwrap()
    }

    #[test_case(0, 0, Some(Corner::TopLeft))]
    #[test_case(6, 6, Some(Corner::TopLeft))]
    #[test_case(0, 18, Some(Corner::TopRight))]
    #[test_case(6, 24, Some(Corner::TopRight))]
    #[test_case(18, 0, Some(Corner::BottomLeft))]
    #[test_case(24, 6, Some(Corner::BottomLeft))]
    #[test_case(7, 7, None)]
    #[test_case(18, 18, None)]
    #[test_case(0, 7, None)]
    fn test_corner_of(r: usize, c: usize, exp: Option<Corner>) {
        assert_eq!(corner_of(25, r, c), exp);
    }

    #[test_case(Corner::TopLeft, Rotation::None)]
    #[test_case(Corner::TopRight, Rotation::Deg270)]
    #[test_case(Corner::BottomLeft, Rotation::Deg90)]
    fn test_corner_rotation(corner: Corner, exp: Rotation) {
        assert_eq!(corner.rotation(), exp);
    }

    #[test]
    fn test_finder_anchors() {
        let anchors = finder_anchors(25);
        assert_eq!(
            anchors,
            [(Corner::TopLeft, 0, 0), (Corner::TopRight, 0, 18), (Corner::BottomLeft, 18, 0)]
        );
    }

    #[test]
    fn test_finders_rotated_per_corner() {
        let raster = CountingRaster::new(true);
        let rotations = raster.rotations.clone();
        let writer = CustomPngWriter::with_raster("M3", "C2", Box::new(raster));
        writer.render(&matrix(100, RoundBlockSizeMode::Margin), &RenderOptions::default()).unwrap();
        // Anchors are visited top-left, top-right, then bottom-left
        assert_eq!(*rotations.borrow(), [Rotation::None, Rotation::Deg270, Rotation::Deg90]);
    }

    #[test]
    fn test_base_block_size() {
        assert_eq!(base_block_size(&matrix(200, RoundBlockSizeMode::Margin)), 100);
        assert_eq!(base_block_size(&matrix(240, RoundBlockSizeMode::None)), 90);
        assert_eq!(base_block_size(&matrix(240, RoundBlockSizeMode::Enlarge)), 100);
    }

    #[test]
    fn test_malformed_matrix() {
        let mut rows = test_pattern();
        rows[0][18] = 0;
        let m = Matrix::new(rows, 100, 0, RoundBlockSizeMode::Margin).unwrap();
        assert_eq!(check_finder_anchors(&m), Err(QRError::MalformedMatrix));
    }

    #[test]
    fn test_unavailable_raster() {
        let writer = CustomPngWriter::with_raster("M1", "C1", Box::new(CountingRaster::new(false)));
        let err = writer.write(&matrix(100, RoundBlockSizeMode::Margin), &RenderOptions::default());
        assert_eq!(err.unwrap_err(), QRError::MissingDependency(Dependency::Raster));
    }

    #[test]
    fn test_each_finder_painted_once() {
        let raster = CountingRaster::new(true);
        let copies = raster.copies.clone();
        let writer = CustomPngWriter::with_raster("M2", "S2", Box::new(raster));
        writer.render(&matrix(100, RoundBlockSizeMode::Margin), &RenderOptions::default()).unwrap();
        // Corner resize, three finder paints and the final downsample
        assert_eq!(copies.get(), 5);
    }

    #[test]
    fn test_render_reads_back() {
        let m = matrix(200, RoundBlockSizeMode::Margin);
        let opts = RenderOptions {
            foreground: Color::new(200, 0, 0),
            background: Color::WHITE,
            ..RenderOptions::default()
        };
        let img = CustomPngWriter::new("M1", "C1").render(&m, &opts).unwrap();
        assert_eq!(img.dimensions(), (220, 220));

        // Sample each block centre: 8px blocks after a 10px margin
        let rows = m.to_rows();
        for (r, row) in rows.iter().enumerate() {
            for (c, &v) in row.iter().enumerate() {
                let px = img.get_pixel(10 + c as u32 * 8 + 4, 10 + r as u32 * 8 + 4);
                let dark = px[1] < 128;
                assert_eq!(dark, v == 1, "block ({r}, {c}) pixel {px:?}");
            }
        }
        assert_eq!(*img.get_pixel(2, 2), Rgba([255, 255, 255, 255]));
    }
}
