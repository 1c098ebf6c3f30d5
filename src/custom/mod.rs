mod overlay;
mod paths;
mod shapes;

pub use overlay::{ImageOverlay, OverlayOptions};
pub use paths::{Registry, ASSET_SIZE, CURSORS, MARKERS, SHAPES};
pub use shapes::{draw_circle, draw_diamond, draw_square, draw_star, Shape};

use crate::common::error::{QRError, QRResult};

// Customization
//------------------------------------------------------------------------------

/// Finder-pattern decoration keys passed to `generate`. Any key present selects the
/// custom PNG rasterizer.
#[derive(Debug, PartialEq, Eq, Clone, Default)]
pub struct Customization {
    marker: Option<String>,
    cursor: Option<String>,
    shape: Option<String>,
}

impl Customization {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn marker(mut self, key: &str) -> Self {
        self.marker = Some(key.to_string());
        self
    }

    pub fn cursor(mut self, key: &str) -> Self {
        self.cursor = Some(key.to_string());
        self
    }

    pub fn shape(mut self, key: &str) -> Self {
        self.shape = Some(key.to_string());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.marker.is_none() && self.cursor.is_none() && self.shape.is_none()
    }

    /// Resolves every key against its registry, filling omitted keys with the registry
    /// default. Keys are case-sensitive and matched exactly.
    pub(crate) fn resolve(&self) -> QRResult<ResolvedKeys> {
        let marker = resolve_key(self.marker.as_deref(), &MARKERS)?;
        let cursor = resolve_key(self.cursor.as_deref(), &CURSORS)?;
        let shape = match self.shape.as_deref() {
            Some(key) => Some(resolve_key(Some(key), &SHAPES)?),
            None => None,
        };
        Ok(ResolvedKeys { marker, cursor, shape })
    }
}

fn resolve_key(key: Option<&str>, reg: &Registry) -> QRResult<&'static str> {
    let Some(key) = key else {
        return Ok(reg.default_key());
    };
    reg.all_paths()
        .iter()
        .map(|(k, _)| *k)
        .find(|k| *k == key)
        .ok_or_else(|| QRError::invalid_key(key, reg.valid_keys()))
}

/// Registry keys after validation.
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub(crate) struct ResolvedKeys {
    pub marker: &'static str,
    pub cursor: &'static str,
    pub shape: Option<&'static str>,
}

impl ResolvedKeys {
    /// The drawn shape wins over the cursor bitmap when both are present.
    pub fn overlay_key(&self) -> &'static str {
        self.shape.unwrap_or(self.cursor)
    }
}
