use crate::common::error::{QRError, QRResult};

// Registries
//------------------------------------------------------------------------------

/// Immutable lookup table from a decoration key (`M1`, `C2`, `S3`...) to an asset path
/// or a drawing routine identifier. Keys are case-sensitive.
#[derive(Debug, PartialEq, Eq)]
pub struct Registry {
    name: &'static str,
    entries: &'static [(&'static str, &'static str)],
}

pub const MARKERS: Registry = Registry {
    name: "marker",
    entries: &[
        ("M1", "markers/marker-1.png"),
        ("M2", "markers/marker-2.png"),
        ("M3", "markers/marker-3.png"),
    ],
};

pub const CURSORS: Registry = Registry {
    name: "cursor",
    entries: &[
        ("C1", "cursors/cursor-1.png"),
        ("C2", "cursors/cursor-2.png"),
        ("C3", "cursors/cursor-3.png"),
    ],
};

pub const SHAPES: Registry = Registry {
    name: "shape",
    entries: &[
        ("S1", "draw_square"),
        ("S2", "draw_circle"),
        ("S3", "draw_star"),
        ("S4", "draw_diamond"),
    ],
};

impl Registry {
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn all_paths(&self) -> &'static [(&'static str, &'static str)] {
        self.entries
    }

    pub fn is_valid_key(&self, key: &str) -> bool {
        self.entries.iter().any(|(k, _)| *k == key)
    }

    pub fn path(&self, key: &str) -> QRResult<&'static str> {
        self.entries
            .iter()
            .find_map(|(k, p)| (*k == key).then_some(*p))
            .ok_or_else(|| QRError::invalid_key(key, self.valid_keys()))
    }

    pub fn valid_keys(&self) -> Vec<&'static str> {
        self.entries.iter().map(|(k, _)| *k).collect()
    }

    /// Key used when a customization omits this registry.
    pub fn default_key(&self) -> &'static str {
        self.entries[0].0
    }
}

// Bundled assets
//------------------------------------------------------------------------------

/// Side of every bundled marker and cursor bitmap, 20 px per finder module.
pub const ASSET_SIZE: u32 = 140;

pub(crate) fn asset_bytes(path: &str) -> Option<&'static [u8]> {
    let bytes: &'static [u8] = match path {
        "markers/marker-1.png" => include_bytes!("../../assets/markers/marker-1.png"),
        "markers/marker-2.png" => include_bytes!("../../assets/markers/marker-2.png"),
        "markers/marker-3.png" => include_bytes!("../../assets/markers/marker-3.png"),
        "cursors/cursor-1.png" => include_bytes!("../../assets/cursors/cursor-1.png"),
        "cursors/cursor-2.png" => include_bytes!("../../assets/cursors/cursor-2.png"),
        "cursors/cursor-3.png" => include_bytes!("../../assets/cursors/cursor-3.png"),
        _ => return None,
    };
    Some(bytes)
}
