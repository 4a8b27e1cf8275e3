use std::sync::Arc;

use encoding_rs::Encoding;

use super::StageFactory;
use super::decode::{Endian, Utf32Decoder};
use crate::core::label::EncodingLabel;

/// Maps an encoding label to a decode stage.
pub trait DecoderRegistry {
    /// Returns a factory for the label, or `None` when the charset is not
    /// supported.
    fn lookup(&self, label: &EncodingLabel) -> Option<Arc<dyn StageFactory>>;
}

/// Registry of every WHATWG encoding known to `encoding_rs`, plus UTF-32.
///
/// Labels resolve the way browsers resolve them, so "ISO-8859-1" decodes as
/// windows-1252. The `replacement` encoding is treated as unsupported.
#[derive(Debug, Clone, Copy, Default)]
pub struct EncodingRsRegistry;

impl DecoderRegistry for EncodingRsRegistry {
    fn lookup(&self, label: &EncodingLabel) -> Option<Arc<dyn StageFactory>> {
        match label.as_str() {
            "UTF-32LE" => return Some(Arc::new(Utf32Decoder::new(Endian::Little))),
            "UTF-32BE" => return Some(Arc::new(Utf32Decoder::new(Endian::Big))),
            _ => {}
        }

        let encoding = Encoding::for_label(label.as_str().as_bytes())?;
        if encoding == encoding_rs::REPLACEMENT {
            return None;
        }
        Some(Arc::new(encoding))
    }
}
