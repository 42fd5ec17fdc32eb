//! Character encoding detection and strict decoding.
//!
//! Downloaded books arrive in whatever encoding their producer used (ASCII,
//! Latin-1, UTF-8 with or without BOM, ...). Detection is delegated to an
//! [`EncodingDetector`]; decoding then uses exactly the reported encoding and
//! refuses to paper over malformed input.

use std::borrow::Cow;

use chardetng::EncodingDetector as Chardet;
use encoding_rs::Encoding;

use crate::{GutentextError, Result};

/// Produces a best-guess encoding label for raw bytes.
pub trait EncodingDetector {
    /// Returns an encoding label understood by [`Encoding::for_label`], or
    /// `None` when no guess can be made.
    fn detect(&self, bytes: &[u8]) -> Option<String>;
}

/// Default detector: byte order mark first, then statistical detection via `chardetng`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ChardetDetector;

impl EncodingDetector for ChardetDetector {
    fn detect(&self, bytes: &[u8]) -> Option<String> {
        if let Some((encoding, _)) = Encoding::for_bom(bytes) {
            return Some(encoding.name().to_string());
        }

        let mut detector = Chardet::new();
        detector.feed(bytes, true);
        Some(detector.guess(None, true).name().to_string())
    }
}

/// Decodes `bytes` with the encoding named by `label`.
///
/// A leading BOM for that same encoding is dropped. Unknown labels and any
/// malformed sequence fail with [`GutentextError::Decode`]; no replacement
/// characters are ever produced.
pub fn decode_with_label<'a>(bytes: &'a [u8], label: &str) -> Result<Cow<'a, str>> {
    let encoding = Encoding::for_label(label.as_bytes())
        .ok_or_else(|| GutentextError::Decode { encoding: label.to_string() })?;

    let (text, had_errors) = encoding.decode_with_bom_removal(bytes);
    if had_errors {
        return Err(GutentextError::Decode { encoding: encoding.name().to_string() });
    }

    Ok(text)
}

/// Detects the encoding of `bytes` and decodes them.
pub fn detect_and_decode<'a, D: EncodingDetector + ?Sized>(detector: &D, bytes: &'a [u8]) -> Result<Cow<'a, str>> {
    let label = detector
        .detect(bytes)
        .ok_or_else(|| GutentextError::Decode { encoding: "unknown".to_string() })?;

    tracing::debug!(encoding = %label, size = bytes.len(), "detected text encoding");
    decode_with_label(bytes, &label)
}
