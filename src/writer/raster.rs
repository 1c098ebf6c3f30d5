use image::{ImageFormat, Rgba, RgbaImage};
use tracing::debug;

use super::compose::{add_label, add_logo, target_canvas};
use super::{encode_image, Format, QRCode, RenderOptions, Writer};
use crate::common::error::{Dependency, QRError, QRResult};
use crate::common::matrix::Matrix;
use crate::render::{ImageRaster, Raster, Region};

const TRANSPARENT: Rgba<u8> = Rgba([0, 0, 0, 0]);

/// Plain raster writer for PNG, GIF and WebP.
///
/// Blocks are drawn at their native pixel size on a transparent layer, which is then
/// composited over the background so translucent foregrounds blend the same way the
/// decorated writer does.
pub struct RasterWriter {
    format: ImageFormat,
    raster: Box<dyn Raster>,
}

impl RasterWriter {
    pub fn new(format: ImageFormat) -> Self {
        Self::with_raster(format, Box::new(ImageRaster))
    }

    pub fn with_raster(format: ImageFormat, raster: Box<dyn Raster>) -> Self {
        debug_assert!(
            matches!(format, ImageFormat::Png | ImageFormat::Gif | ImageFormat::WebP),
            "Unsupported raster format {format:?}"
        );
        Self { format, raster }
    }

    pub fn render(&self, matrix: &Matrix, opts: &RenderOptions) -> QRResult<RgbaImage> {
        let raster = self.raster.as_ref();
        if !raster.is_available() {
            return Err(QRError::MissingDependency(Dependency::Raster));
        }

        let logo = opts.logo.map(|l| l.load()).transpose()?;
        let label = match opts.label {
            Some(l) => Some((l, l.font().load()?)),
            None => None,
        };

        let inner = matrix.inner_size();
        let mut layer = raster.canvas(inner, inner, TRANSPARENT);
        let color = opts.foreground.to_rgba();
        let n = matrix.block_count();
        for r in 0..n {
            let (y, y_end) = (matrix.block_offset(r), matrix.block_offset(r + 1));
            for c in 0..n {
                if !matrix.is_dark(r, c) {
                    continue;
                }
                let (x, x_end) = (matrix.block_offset(c), matrix.block_offset(c + 1));
                let region = Region::new(x as i64, y as i64, x_end - x, y_end - y);
                raster.fill_rect(&mut layer, region, color);
            }
        }

        let mut target =
            target_canvas(raster, matrix, opts.background, label.as_ref().map(|(l, f)| (*l, f)));
        let offset = matrix.margin_left() as i64;
        raster.copy_resampled(&mut target, &layer, Region::square(offset, offset, inner), Region::of_image(&layer));
        drop(layer);

        if let Some(logo) = &logo {
            add_logo(raster, &mut target, matrix, logo);
        }
        if let Some((label, font)) = &label {
            add_label(raster, &mut target, label, font);
        }
        Ok(target)
    }
}

impl Writer for RasterWriter {
    fn format(&self) -> Format {
        match self.format {
            ImageFormat::Gif => Format::Gif,
            ImageFormat::WebP => Format::Webp,
            _ => Format::Png,
        }
    }

    fn write(&self, matrix: &Matrix, opts: &RenderOptions) -> QRResult<QRCode> {
        let img = self.render(matrix, opts)?;
        let bytes = encode_image(&img, self.format)?;
        debug!("Encoded {}x{} {} image ({} bytes)", img.width(), img.height(), self.format(), bytes.len());
        Ok(QRCode::new(bytes, self.format().mime_type(), matrix.clone()))
    }
}
