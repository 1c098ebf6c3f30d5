//! # qrforge
//!
//! A Rust library for generating styled QR codes. Payloads are validated per data type,
//! the symbol is encoded with the `qrcode` crate, and the result is rendered to one of
//! several output formats, optionally decorated with custom finder-pattern artwork, a
//! centred logo and a text label.
//!
//! ## Features
//!
//! - **Typed payloads**: URL, email, phone, Wi-Fi, geo location and plain text, each validated
//!   and canonicalized (`mailto:`, `tel:`, maps link) before encoding
//! - **Custom finder patterns**: replace the three corner patterns with bundled marker and
//!   cursor bitmaps or drawn shapes (PNG only)
//! - **Styling**: foreground/background colors with alpha, logo with optional punch-out,
//!   label with alignment, font, size and margins
//! - **Output formats**: PNG, SVG, PDF (feature `pdf`), WebP, GIF, EPS and a plain `0`/`1` grid
//!
//! ## Quick Start
//!
//! ### Simple QR Code Generation
//!
//! ```rust
//! use qrforge::{Customization, DataType, QRGenerator};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut qr = QRGenerator::new();
//! qr.data("Hello, World!", DataType::Text)?;
//! qr.generate("png", &Customization::new())?;
//!
//! let path = qr.save(std::env::temp_dir().join("simple_qr"))?; // appends ".png"
//! # std::fs::remove_file(path)?;
//! # Ok(())
//! # }
//! ```
//!
//! ### Full Configuration
//!
//! ```rust
//! use qrforge::{Customization, DataType, ECLevel, QRGenerator, RoundBlockSizeMode};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut qr = QRGenerator::new();
//! qr.data("WIFI:T:WPA2;S:HomeNetwork;P:correct-horse;", DataType::Wifi)?
//!     .size(300)?                          // Symbol size in pixels - defaults to 200
//!     .margin(20)?                         // Quiet zone in pixels - defaults to 10
//!     .color("#1A237E")?                   // Foreground - defaults to #000000
//!     .background_color("#FFFFFFF0")?      // Background with alpha - defaults to #ffffff
//!     .label("Guest Wi-Fi", "center", "#1A237E", 18, &[5, 10, 10, 10])?
//!     .error_correction(ECLevel::H)        // Defaults to ECLevel::L
//!     .round_block_size_mode(RoundBlockSizeMode::Margin);
//!
//! let custom = Customization::new().marker("M2").shape("S3");
//! let code = qr.generate("png", &custom)?;
//! assert_eq!(code.mime_type(), "image/png");
//! # Ok(())
//! # }
//! ```
//!
//! ## Customization Keys
//!
//! - **Markers** `M1`..`M3`: outer ring of each finder pattern (square, rounded, circular)
//! - **Cursors** `C1`..`C3`: inner eye bitmap (square, rounded, round)
//! - **Shapes** `S1`..`S4`: drawn eye (square, circle, star, diamond), wins over a cursor
//!
//! Omitted keys fall back to `M1` and `C1`. Any key present requires the `png` format.
//!
//! ## Error Correction Levels
//! - **L (Low)**: ~7% error correction
//! - **M (Medium)**: ~15% error correction
//! - **Q (Quartile)**: ~25% error correction
//! - **H (High)**: ~30% error correction

#![allow(clippy::items_after_test_module)]

pub mod builder;
pub mod common;
pub mod custom;
pub mod datatype;
pub mod render;
pub mod style;
pub mod writer;

pub use builder::QRGenerator;
pub use common::color::Color;
pub use common::error::{Dependency, ErrorKind, QRError, QRResult};
pub use common::matrix::Matrix;
pub use common::metadata::{ECLevel, LabelAlignment, Margin, RoundBlockSizeMode};
pub use custom::Customization;
pub use datatype::DataType;
pub use writer::{Format, QRCode};
