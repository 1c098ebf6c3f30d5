use ab_glyph::{FontArc, PxScale};
use image::imageops::{self, FilterType};
use image::{Rgba, RgbaImage};
use imageproc::drawing::{draw_filled_rect_mut, draw_text_mut, text_size};
use imageproc::rect::Rect;

// Geometry
//------------------------------------------------------------------------------

/// A rectangle on a canvas. The origin may lie outside the canvas; drawing clips.
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub struct Region {
    pub x: i64,
    pub y: i64,
    pub w: u32,
    pub h: u32,
}

impl Region {
    pub fn new(x: i64, y: i64, w: u32, h: u32) -> Self {
        Self { x, y, w, h }
    }

    pub fn square(x: i64, y: i64, side: u32) -> Self {
        Self { x, y, w: side, h: side }
    }

    pub fn of_image(img: &RgbaImage) -> Self {
        Self { x: 0, y: 0, w: img.width(), h: img.height() }
    }

    pub fn is_empty(&self) -> bool {
        self.w == 0 || self.h == 0
    }
}

/// Counter-clockwise rotation by a right angle.
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum Rotation {
    None,
    Deg90,
    Deg270,
}

// Raster capability
//------------------------------------------------------------------------------

/// Pixel primitives the rasterizers are written against. Canvases are owned buffers,
/// so every intermediate image is released when it goes out of scope.
pub trait Raster {
    /// Whether the backend can be used at all.
    fn is_available(&self) -> bool {
        true
    }

    fn canvas(&self, w: u32, h: u32, fill: Rgba<u8>) -> RgbaImage;

    /// Overwrites the pixels of `region`, alpha included.
    fn fill_rect(&self, canvas: &mut RgbaImage, region: Region, color: Rgba<u8>);

    fn rotate(&self, img: &RgbaImage, rotation: Rotation) -> RgbaImage;

    /// Scales `src_region` of `src` onto `dst_region` of `dst`, alpha-blending the result.
    fn copy_resampled(
        &self,
        dst: &mut RgbaImage,
        src: &RgbaImage,
        dst_region: Region,
        src_region: Region,
    );

    /// Draws `text` with the top of its line box at `y`.
    #[allow(clippy::too_many_arguments)]
    fn draw_text(
        &self,
        canvas: &mut RgbaImage,
        text: &str,
        font: &FontArc,
        px: f32,
        x: i32,
        y: i32,
        color: Rgba<u8>,
    );

    fn text_width(&self, text: &str, font: &FontArc, px: f32) -> u32;
}

/// Default backend over `image` and `imageproc`.
#[derive(Debug, Default, Copy, Clone)]
pub struct ImageRaster;

impl Raster for ImageRaster {
    fn canvas(&self, w: u32, h: u32, fill: Rgba<u8>) -> RgbaImage {
        RgbaImage::from_pixel(w, h, fill)
    }

    fn fill_rect(&self, canvas: &mut RgbaImage, region: Region, color: Rgba<u8>) {
        if region.is_empty() {
            return;
        }
        let rect = Rect::at(region.x as i32, region.y as i32).of_size(region.w, region.h);
        draw_filled_rect_mut(canvas, rect, color);
    }

    fn rotate(&self, img: &RgbaImage, rotation: Rotation) -> RgbaImage {
        // imageops rotates clockwise
        match rotation {
            Rotation::None => img.clone(),
            Rotation::Deg90 => imageops::rotate270(img),
            Rotation::Deg270 => imageops::rotate90(img),
        }
    }

    fn copy_resampled(
        &self,
        dst: &mut RgbaImage,
        src: &RgbaImage,
        dst_region: Region,
        src_region: Region,
    ) {
        if dst_region.is_empty() || src_region.is_empty() {
            return;
        }
        let (sx, sy) = (src_region.x.max(0) as u32, src_region.y.max(0) as u32);
        let cropped = imageops::crop_imm(src, sx, sy, src_region.w, src_region.h).to_image();
        if cropped.width() == 0 || cropped.height() == 0 {
            return;
        }

        let scaled = if cropped.dimensions() == (dst_region.w, dst_region.h) {
            cropped
        } else {
            imageops::resize(&cropped, dst_region.w, dst_region.h, FilterType::Triangle)
        };
        imageops::overlay(dst, &scaled, dst_region.x, dst_region.y);
    }

    #[allow(clippy::too_many_arguments)]
    fn draw_text(
        &self,
        canvas: &mut RgbaImage,
        text: &str,
        font: &FontArc,
        px: f32,
        x: i32,
        y: i32,
        color: Rgba<u8>,
    ) {
        draw_text_mut(canvas, color, x, y, PxScale::from(px), font, text);
    }

    fn text_width(&self, text: &str, font: &FontArc, px: f32) -> u32 {
        text_size(PxScale::from(px), font, text).0
    }
}

#[cfg(test)]
pub(crate) mod render_tests {
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    use ab_glyph::FontArc;
    use image::{Rgba, RgbaImage};

    use super::{ImageRaster, Raster, Region, Rotation};

    /// Delegates to [`ImageRaster`] while counting resampled copies and recording
    /// rotations in call order.
    pub(crate) struct CountingRaster {
        pub available: bool,
        pub copies: Rc<Cell<usize>>,
        pub rotations: Rc<RefCell<Vec<Rotation>>>,
    }

    impl CountingRaster {
        pub fn new(available: bool) -> Self {
            Self { available, copies: Rc::new(Cell::new(0)), rotations: Rc::default() }
        }
    }

    impl Raster for CountingRaster {
        fn is_available(&self) -> bool {
            self.available
        }

        fn canvas(&self, w: u32, h: u32, fill: Rgba<u8>) -> RgbaImage {
            ImageRaster.canvas(w, h, fill)
        }

        fn fill_rect(&self, canvas: &mut RgbaImage, region: Region, color: Rgba<u8>) {
            ImageRaster.fill_rect(canvas, region, color)
        }

        fn rotate(&self, img: &RgbaImage, rotation: Rotation) -> RgbaImage {
            self.rotations.borrow_mut().push(rotation);
            ImageRaster.rotate(img, rotation)
        }

        fn copy_resampled(&self, dst: &mut RgbaImage, src: &RgbaImage, d: Region, s: Region) {
            self.copies.set(self.copies.get() + 1);
            ImageRaster.copy_resampled(dst, src, d, s)
        }

        #[allow(clippy::too_many_arguments)]
        fn draw_text(
            &self,
            canvas: &mut RgbaImage,
            text: &str,
            font: &FontArc,
            px: f32,
            x: i32,
            y: i32,
            color: Rgba<u8>,
        ) {
            ImageRaster.draw_text(canvas, text, font, px, x, y, color)
        }

        fn text_width(&self, text: &str, font: &FontArc, px: f32) -> u32 {
            ImageRaster.text_width(text, font, px)
        }
    }

    const CLEAR: Rgba<u8> = Rgba([0, 0, 0, 0]);
    const RED: Rgba<u8> = Rgba([255, 0, 0, 255]);

    #[test]
    fn test_fill_rect_replaces_alpha() {
        let mut canvas = ImageRaster.canvas(10, 10, RED);
        ImageRaster.fill_rect(&mut canvas, Region::square(2, 2, 3), CLEAR);
        assert_eq!(*canvas.get_pixel(2, 2), CLEAR);
        assert_eq!(*canvas.get_pixel(4, 4), CLEAR);
        assert_eq!(*canvas.get_pixel(5, 5), RED);
    }

    #[test]
    fn test_fill_rect_clips() {
        let mut canvas = ImageRaster.canvas(4, 4, CLEAR);
        ImageRaster.fill_rect(&mut canvas, Region::square(-2, -2, 3), RED);
        assert_eq!(*canvas.get_pixel(0, 0), RED);
        assert_eq!(*canvas.get_pixel(1, 1), CLEAR);
    }

    #[test]
    fn test_rotation_is_counter_clockwise() {
        // A single red pixel in the top-left corner
        let mut img = RgbaImage::from_pixel(4, 4, CLEAR);
        img.put_pixel(0, 0, RED);

        let ccw90 = ImageRaster.rotate(&img, Rotation::Deg90);
        assert_eq!(*ccw90.get_pixel(0, 3), RED);

        let ccw270 = ImageRaster.rotate(&img, Rotation::Deg270);
        assert_eq!(*ccw270.get_pixel(3, 0), RED);

        assert_eq!(ImageRaster.rotate(&img, Rotation::None), img);
    }

    #[test]
    fn test_copy_resampled_scales_and_offsets() {
        let src = RgbaImage::from_pixel(20, 20, RED);
        let mut dst = ImageRaster.canvas(30, 30, CLEAR);
        ImageRaster.copy_resampled(&mut dst, &src, Region::square(10, 10, 10), Region::of_image(&src));
        let px = dst.get_pixel(15, 15);
        assert!(px[0] > 250 && px[3] > 250);
        assert_eq!(*dst.get_pixel(5, 5), CLEAR);
        assert_eq!(*dst.get_pixel(25, 25), CLEAR);
    }
}
