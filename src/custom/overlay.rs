use std::path::Path;

use image::imageops::{self, FilterType};
use image::{Rgba, RgbaImage};
use tracing::debug;

use super::paths::{asset_bytes, ASSET_SIZE, CURSORS, MARKERS, SHAPES};
use super::shapes::Shape;
use crate::common::error::{QRError, QRResult};

// Image overlay
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub struct OverlayOptions {
    /// Side of the composed bitmap in pixels.
    pub size: u32,
}

impl Default for OverlayOptions {
    fn default() -> Self {
        Self { size: ASSET_SIZE }
    }
}

/// A finder-pattern decoration: a marker ring with a cursor bitmap or a drawn shape
/// stacked in its centre.
#[derive(Debug, Clone)]
pub struct ImageOverlay {
    image: RgbaImage,
}

impl ImageOverlay {
    /// `background_key` must be a marker key, `overlay_key` a cursor or shape key.
    pub fn new(background_key: &str, overlay_key: &str, opts: OverlayOptions) -> QRResult<Self> {
        let bg_path = MARKERS.path(background_key)?;

        let mut image = load_asset(bg_path)?;
        if CURSORS.is_valid_key(overlay_key) {
            let cursor = load_asset(CURSORS.path(overlay_key)?)?;
            imageops::overlay(&mut image, &cursor, 0, 0);
        } else if SHAPES.is_valid_key(overlay_key) {
            let shape = Shape::from_identifier(SHAPES.path(overlay_key)?)?;
            let c = (ASSET_SIZE / 2) as i32;
            shape.draw(&mut image, c, c, ASSET_SIZE * 3 / 7, Rgba([0, 0, 0, 255]));
        } else {
            let valid = CURSORS.valid_keys().into_iter().chain(SHAPES.valid_keys()).collect();
            return Err(QRError::invalid_key(overlay_key, valid));
        }

        if opts.size != ASSET_SIZE {
            image = imageops::resize(&image, opts.size, opts.size, FilterType::Triangle);
        }
        debug!("Composed finder decoration {background_key}+{overlay_key} at {}px", opts.size);

        Ok(Self { image })
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn into_image(self) -> RgbaImage {
        self.image
    }

    pub fn save_image<P: AsRef<Path>>(&self, path: P) -> QRResult<()> {
        let path = path.as_ref();
        self.image.save(path).map_err(|_| QRError::SaveFailed(path.display().to_string()))
    }
}

fn load_asset(path: &str) -> QRResult<RgbaImage> {
    let bytes = asset_bytes(path).ok_or_else(|| QRError::Image(format!("Missing asset \"{path}\"")))?;
    Ok(image::load_from_memory(bytes)?.to_rgba8())
}
