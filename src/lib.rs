//! Streaming reader that detects the character encoding of its input and
//! yields UTF-8.
//!
//! A [`Utf8Reader`] captures a bounded prefix of any [`std::io::Read`] source,
//! detects its encoding once, and then streams every byte through a decode
//! stage and optional Unicode normalization. The transcoded prefix can be
//! inspected with [`Utf8Reader::peek`] before reading starts.
//!
//! ```
//! use std::io::Read;
//! use utf8_reader::{ReaderConfig, Utf8Reader};
//!
//! let mut reader = Utf8Reader::new(&b"plain text"[..], &ReaderConfig::default()).unwrap();
//! assert_eq!(reader.peek().unwrap(), b"plain text");
//!
//! let mut text = String::new();
//! reader.read_to_string(&mut text).unwrap();
//! assert_eq!(text, "plain text");
//! ```

pub mod core;
pub mod detection;
pub mod errors;
pub mod prelude;
pub mod streaming;
pub mod transform;

pub use crate::core::config::{
    ClassifierKind, DEFAULT_PEEK_SIZE, MIN_PEEK_SIZE, NormalizationForm, ReaderConfig,
    ReaderSettings, StageRequest,
};
pub use crate::core::label::EncodingLabel;
pub use crate::detection::{
    CharsetClassifier, ChardetClassifier, Detection, FixedClassifier, NullClassifier, detect,
    detect_encoding,
};
pub use crate::errors::{ClassifyError, ReaderError, SettingsError};
pub use crate::streaming::{PrefixBuffer, StreamState, TransformReader, Utf8Reader};
pub use crate::transform::{
    Chain, DecoderRegistry, EncodingRsRegistry, PipelineSpec, RawTransform, StageDescriptor,
    Transform,
};
