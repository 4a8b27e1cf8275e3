//! Encoding detection over a bounded prefix.
//!
//! Checks run in a fixed order and the first conclusive one wins:
//! byte order mark, UTF-8 validity (tolerating a cut final character),
//! UTF-16 byte parity, and finally a statistical classifier. A prefix made
//! mostly of `<NUL><ASCII>` pairs is never taken for UTF-8, so ASCII text
//! stored as UTF-16 reaches the parity check.
//!
//! Detection is best effort. Short or ambiguous prefixes can be misread, for
//! example Latin-1 text whose only high byte is the last one passes as UTF-8.

pub mod bom;
pub mod classifier;
pub mod utf16;
pub mod utf8;

pub use bom::detect_bom;
pub use classifier::{CharsetClassifier, ChardetClassifier, FixedClassifier, NullClassifier};
pub use utf16::{guess_utf16, mostly_utf16_pairs};
pub use utf8::{is_utf8, truncated_len};

use crate::core::label::EncodingLabel;

/// Outcome of running detection over a prefix.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Detection {
    /// Detected encoding, empty when inconclusive.
    pub label: EncodingLabel,
    /// Length of the matched byte order mark, 0 if none.
    pub bom_len: usize,
}

impl Detection {
    pub fn inconclusive() -> Self {
        Self::default()
    }

    fn heuristic(label: EncodingLabel) -> Self {
        Detection { label, bom_len: 0 }
    }
}

/// Detects the encoding of `prefix`, which still includes any BOM.
pub fn detect<C: CharsetClassifier + ?Sized>(prefix: &[u8], classifier: &C) -> Detection {
    if prefix.is_empty() {
        return Detection::inconclusive();
    }

    if let Some((label, bom_len)) = detect_bom(prefix) {
        return Detection { label, bom_len };
    }

    // ASCII stored as UTF-16 is valid UTF-8 too
    if !mostly_utf16_pairs(prefix) && is_utf8(prefix) {
        return Detection::heuristic(EncodingLabel::UTF_8);
    }

    if let Some(label) = guess_utf16(prefix) {
        return Detection::heuristic(label);
    }

    match classifier.classify(prefix) {
        Ok(name) => {
            let label = EncodingLabel::new(&name);
            if is_ascii_label(&label) {
                Detection::inconclusive()
            } else {
                Detection::heuristic(label)
            }
        }
        Err(e) => {
            log::debug!("charset classifier gave up: {}", e);
            Detection::inconclusive()
        }
    }
}

/// Detects with the default `chardetng` classifier.
pub fn detect_encoding(prefix: &[u8]) -> Detection {
    detect(prefix, &ChardetClassifier::new())
}

// ASCII needs no transcoding
fn is_ascii_label(label: &EncodingLabel) -> bool {
    matches!(label.as_str(), "ASCII" | "US-ASCII")
}
