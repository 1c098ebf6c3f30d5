use ab_glyph::FontArc;
use image::{Rgba, RgbaImage};
use tracing::debug;

use crate::common::color::{Color, MAX_ALPHA};
use crate::common::matrix::Matrix;
use crate::common::metadata::LabelAlignment;
use crate::render::{Raster, Region};
use crate::style::{LabelManager, LogoImage};

// Shared raster steps
//------------------------------------------------------------------------------

/// Source pixels whose transparency (0..=127, 127 fully clear) is below this are
/// recolored by [`tint`]; the rest become transparent.
pub const TINT_ALPHA_THRESHOLD: u8 = 120;

const TRANSPARENT: Rgba<u8> = Rgba([0, 0, 0, 0]);

/// Recolors every visible pixel of `img` to `color`.
pub fn tint(raster: &dyn Raster, img: &RgbaImage, color: Color) -> RgbaImage {
    let mut tinted = raster.canvas(img.width(), img.height(), TRANSPARENT);
    let fill = color.to_rgba();
    for (x, y, px) in img.enumerate_pixels() {
        let transparency = MAX_ALPHA - px[3] / 2;
        if transparency < TINT_ALPHA_THRESHOLD {
            tinted.put_pixel(x, y, fill);
        }
    }
    tinted
}

/// The output canvas: outer size wide, grown downwards by the label block, filled with
/// the background color.
pub fn target_canvas(
    raster: &dyn Raster,
    matrix: &Matrix,
    background: Color,
    label: Option<(&LabelManager, &FontArc)>,
) -> RgbaImage {
    let w = matrix.outer_size();
    let h = w + label.map_or(0, |(l, font)| l.block_height(font));
    raster.canvas(w, h, background.to_rgba())
}

/// Centres the logo on the symbol, optionally clearing its footprint first.
pub fn add_logo(raster: &dyn Raster, canvas: &mut RgbaImage, matrix: &Matrix, logo: &LogoImage) {
    let half = matrix.outer_size() as f64 / 2.0;
    let x = (half - logo.width as f64 / 2.0) as i64;
    let y = (half - logo.height as f64 / 2.0) as i64;
    let footprint = Region::new(x, y, logo.width, logo.height);

    if logo.punchout {
        raster.fill_rect(canvas, footprint, Rgba([255, 255, 255, 0]));
    }
    raster.copy_resampled(canvas, &logo.image, footprint, Region::of_image(&logo.image));
    debug!("Placed {}x{} logo at ({x}, {y})", logo.width, logo.height);
}

/// Draws the label with its baseline `margin.bottom` pixels above the canvas bottom.
pub fn add_label(raster: &dyn Raster, canvas: &mut RgbaImage, label: &LabelManager, font: &FontArc) {
    let px = label.font_size() as f32;
    let text_w = raster.text_width(label.text(), font, px) as i64;
    let (w, h) = (canvas.width() as i64, canvas.height() as i64);
    let margin = label.margin();

    let x = match label.alignment() {
        LabelAlignment::Left => margin.left as i64,
        LabelAlignment::Center => (w as f64 / 2.0 - text_w as f64 / 2.0) as i64,
        LabelAlignment::Right => w - text_w - margin.right as i64,
    };
    let baseline = h - margin.bottom as i64;
    let top = baseline - label.ascent(font).round() as i64;

    raster.draw_text(canvas, label.text(), font, px, x as i32, top as i32, label.color().to_rgba());
    debug!("Drew label {:?} at ({x}, {baseline})", label.text());
}
