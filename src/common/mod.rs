pub mod color;
pub mod error;
pub mod matrix;
pub mod metadata;

pub use color::*;
pub use error::*;
pub use matrix::*;
pub use metadata::*;
