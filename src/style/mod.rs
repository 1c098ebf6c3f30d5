mod colors;
mod encoding;
mod label;
pub(crate) mod logo;

pub use colors::ColorManager;
pub use encoding::{EncodingManager, SUPPORTED_ENCODINGS};
pub use label::{LabelFont, LabelManager, MAX_LABEL_LEN};
pub use logo::{LogoImage, LogoManager, DEFAULT_LOGO_WIDTH};
