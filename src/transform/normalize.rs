use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::{canonical_combining_class, compose};

use super::Transform;
use crate::core::config::NormalizationForm;

/// Pending text is flushed unconditionally past this size.
const MAX_PENDING: usize = 16 * 1024;

/// Streaming Unicode normalization stage.
///
/// Text is buffered until a stable boundary: a starter that cannot be
/// affected by what came before it. Everything before the boundary is
/// normalized and emitted, the rest waits for more input. An incomplete
/// trailing UTF-8 sequence is left unconsumed; invalid bytes are passed
/// through unchanged.
#[derive(Debug)]
pub struct Normalizer {
    form: NormalizationForm,
    pending: String,
}

impl Normalizer {
    pub fn new(form: NormalizationForm) -> Self {
        Normalizer {
            form,
            pending: String::new(),
        }
    }

    pub fn form(&self) -> NormalizationForm {
        self.form
    }

    fn emit(&self, text: &str, dst: &mut Vec<u8>) {
        let normalized: String = match self.form {
            NormalizationForm::Nfc => text.nfc().collect(),
            NormalizationForm::Nfd => text.nfd().collect(),
        };
        dst.extend_from_slice(normalized.as_bytes());
    }

    fn flush(&mut self, dst: &mut Vec<u8>) {
        if !self.pending.is_empty() {
            let text = std::mem::take(&mut self.pending);
            self.emit(&text, dst);
        }
    }

    /// Byte offset of the last position in `pending` before which text can
    /// be normalized independently of what follows.
    fn stable_boundary(&self) -> usize {
        for (i, c) in self.pending.char_indices().rev() {
            if i == 0 {
                break;
            }
            if canonical_combining_class(c) != 0 {
                continue;
            }
            // Hangul LV + T composes although neither jamo does with T alone,
            // so test against the composed text rather than the raw character
            if self.form == NormalizationForm::Nfc {
                let joins_previous = self.pending[..i]
                    .nfc()
                    .last()
                    .is_some_and(|prev| compose(prev, c).is_some());
                if joins_previous {
                    continue;
                }
            }
            return i;
        }
        0
    }
}

impl Transform for Normalizer {
    fn transform(&mut self, src: &[u8], dst: &mut Vec<u8>, last: bool) -> usize {
        let mut consumed = 0;
        for chunk in src.utf8_chunks() {
            self.pending.push_str(chunk.valid());
            consumed += chunk.valid().len();

            let invalid = chunk.invalid();
            if invalid.is_empty() {
                continue;
            }
            if !last && consumed + invalid.len() == src.len() {
                // possibly a sequence cut by the chunk boundary
                break;
            }
            self.flush(dst);
            dst.extend_from_slice(invalid);
            consumed += invalid.len();
        }

        if last || self.pending.len() > MAX_PENDING {
            self.flush(dst);
        } else {
            let split = self.stable_boundary();
            if split > 0 {
                let rest = self.pending.split_off(split);
                let ready = std::mem::replace(&mut self.pending, rest);
                self.emit(&ready, dst);
            }
        }
        consumed
    }
}
