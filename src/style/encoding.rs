use std::borrow::Cow;

use encoding_rs::Encoding;

use crate::common::error::{QRError, QRResult};

pub const SUPPORTED_ENCODINGS: [&str; 4] = ["UTF-8", "ISO-8859-1", "ISO-8859-5", "ISO-8859-15"];

/// Character set the payload is transcoded into before encoding.
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub struct EncodingManager {
    name: &'static str,
}

impl Default for EncodingManager {
    fn default() -> Self {
        Self { name: SUPPORTED_ENCODINGS[0] }
    }
}

impl EncodingManager {
    /// Accepts any supported name, ignoring case.
    pub fn set_encoding(&mut self, encoding: &str) -> QRResult<()> {
        let encoding = encoding.trim();
        if encoding.is_empty() {
            return Err(QRError::EmptyEncoding);
        }
        self.name = SUPPORTED_ENCODINGS
            .into_iter()
            .find(|e| e.eq_ignore_ascii_case(encoding))
            .ok_or_else(|| QRError::UnsupportedEncoding(encoding.to_string()))?;
        Ok(())
    }

    pub fn encoding(&self) -> &'static str {
        self.name
    }

    pub fn transcode<'a>(&self, data: &'a str) -> QRResult<Cow<'a, [u8]>> {
        let Some(enc) = Encoding::for_label(self.name.as_bytes()) else {
            return Err(QRError::UnsupportedEncoding(self.name.to_string()));
        };
        if enc == encoding_rs::UTF_8 {
            return Ok(Cow::Borrowed(data.as_bytes()));
        }
        let (bytes, _, had_errors) = enc.encode(data);
        if had_errors {
            return Err(QRError::UnencodableData(self.name));
        }
        Ok(bytes)
    }
}
