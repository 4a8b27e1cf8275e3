//! Convenient re-exports for common usage.
//!
//! ```
//! use utf8_reader::prelude::*;
//!
//! let detection = detect(&[0xFE, 0xFF, 0x00, 0x61], &NullClassifier);
//! assert_eq!(detection.label, EncodingLabel::UTF_16BE);
//! ```

pub use crate::{
    // Detection
    CharsetClassifier,
    ChardetClassifier,
    Detection,
    EncodingLabel,
    NullClassifier,
    detect,
    detect_encoding,

    // Config
    NormalizationForm,
    ReaderConfig,
    ReaderSettings,
    StageRequest,

    // Errors
    ReaderError,

    // Streaming
    RawTransform,
    StreamState,
    Transform,
    Utf8Reader,
};
