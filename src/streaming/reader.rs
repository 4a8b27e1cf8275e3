use std::io::{self, Read};

use super::prefix::PrefixBuffer;
use super::transform_reader::TransformReader;
use crate::core::config::ReaderConfig;
use crate::core::label::EncodingLabel;
use crate::detection::{self, CharsetClassifier, ChardetClassifier, Detection};
use crate::errors::{ReaderError, Result};
use crate::transform::{DecoderRegistry, EncodingRsRegistry, PipelineSpec};

/// Lifecycle of the captured prefix, as seen by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamState {
    /// Nothing has been read yet and the prefix holds bytes.
    Fresh,
    /// Reading has started but the prefix is not yet exhausted.
    Draining,
    /// The prefix is exhausted; reads go straight to the source.
    Live,
}

enum Source<R> {
    Empty,
    Passthrough(PrefixBuffer<R>),
    Transformed(TransformReader<PrefixBuffer<R>>),
}

impl<R: Read> Source<R> {
    fn prefix(&self) -> Option<&PrefixBuffer<R>> {
        match self {
            Source::Empty => None,
            Source::Passthrough(buffer) => Some(buffer),
            Source::Transformed(reader) => Some(reader.get_ref()),
        }
    }
}

/// A reader that detects the encoding of its source and yields UTF-8.
///
/// On construction the first `peek_size` bytes are captured and the encoding
/// is detected from them once. Any byte order mark is dropped, and every byte
/// afterwards goes through the same decode and normalization pipeline.
///
/// Detection is best effort: short or ambiguous input can be misread, and an
/// inconclusive result means the bytes are passed through as they are.
///
/// The reader owns `R`; pass `&mut source` to keep ownership of a source that
/// needs closing.
///
/// ```
/// use std::io::Read;
/// use utf8_reader::{ReaderConfig, Utf8Reader};
///
/// // "bétà" in UTF-16LE without a byte order mark
/// let input: &[u8] = &[0x62, 0x00, 0xe9, 0x00, 0x74, 0x00, 0xe0, 0x00];
/// let mut reader = Utf8Reader::new(input, &ReaderConfig::default()).unwrap();
/// assert_eq!(reader.encoding(), "UTF-16LE");
///
/// let mut text = String::new();
/// reader.read_to_string(&mut text).unwrap();
/// assert_eq!(text, "bétà");
/// ```
pub struct Utf8Reader<R> {
    detection: Detection,
    pipeline: PipelineSpec,
    source: Source<R>,
    peek_enabled: bool,
    // transformed prefix bytes still waiting in the transform reader
    prefix_output: bool,
}

impl<R: Read> Utf8Reader<R> {
    /// Builds a reader using the `chardetng` classifier and the `encoding_rs`
    /// decoders.
    pub fn new(source: R, config: &ReaderConfig) -> Result<Self> {
        Self::with_components(source, config, &ChardetClassifier::new(), &EncodingRsRegistry)
    }

    /// Builds a reader with an explicit classifier and decoder registry.
    ///
    /// The configuration is validated before the source is touched. Failing
    /// to capture the prefix is fatal; an encoding without a decoder is not.
    pub fn with_components<C, D>(
        source: R,
        config: &ReaderConfig,
        classifier: &C,
        registry: &D,
    ) -> Result<Self>
    where
        C: CharsetClassifier + ?Sized,
        D: DecoderRegistry + ?Sized,
    {
        let requested = config.stage_descriptors()?;

        let mut buffer =
            PrefixBuffer::fill(source, config.effective_peek_size()).map_err(ReaderError::Fill)?;
        let detection = detection::detect(buffer.peek(), classifier);
        buffer.skip(detection.bom_len);

        if detection.label.is_inconclusive() {
            log::debug!("encoding detection inconclusive, passing bytes through");
        } else {
            log::debug!(
                "detected {} (bom: {} bytes)",
                detection.label,
                detection.bom_len
            );
        }

        let pipeline =
            PipelineSpec::assemble(&detection.label, registry, &requested);
        let source = if pipeline.is_identity() {
            Source::Passthrough(buffer)
        } else {
            Source::Transformed(TransformReader::new(buffer, pipeline.build()))
        };

        Ok(Utf8Reader {
            detection,
            pipeline,
            source,
            peek_enabled: true,
            prefix_output: false,
        })
    }

    /// Builds a reader for a source that may be absent.
    ///
    /// `None` gives the same reader as [`Utf8Reader::empty`].
    pub fn from_source(source: Option<R>, config: &ReaderConfig) -> Result<Self> {
        match source {
            Some(source) => Self::new(source, config),
            None => Ok(Self::empty()),
        }
    }

    /// Returns the transcoded remaining prefix without consuming anything.
    ///
    /// Only available before the first call to `read`; afterwards, or when
    /// the prefix is empty, returns `None`. When the prefix is not the whole
    /// input, a character cut by its end is left out of the result.
    pub fn peek(&self) -> Option<Vec<u8>> {
        if !self.peek_enabled {
            return None;
        }
        let buffer = self.source.prefix()?;
        if buffer.is_drained() {
            return None;
        }
        Some(self.pipeline.apply(buffer.peek(), buffer.reached_end()))
    }

    /// Where reads are currently served from.
    ///
    /// For a transcoded stream the prefix counts as consumed once its
    /// transformed output has been handed out, not when the transform has
    /// pulled it from the buffer.
    pub fn state(&self) -> StreamState {
        let Some(buffer) = self.source.prefix() else {
            return StreamState::Live;
        };
        if !buffer.is_drained() {
            if self.peek_enabled {
                return StreamState::Fresh;
            }
            return StreamState::Draining;
        }
        match &self.source {
            Source::Transformed(reader) if self.prefix_output && reader.buffered() > 0 => {
                StreamState::Draining
            }
            _ => StreamState::Live,
        }
    }
}

impl<R> Utf8Reader<R> {
    /// A reader with no source: unlabelled and permanently at end of stream.
    pub fn empty() -> Self {
        Utf8Reader {
            detection: Detection::inconclusive(),
            pipeline: PipelineSpec::default(),
            source: Source::Empty,
            peek_enabled: false,
            prefix_output: false,
        }
    }

    /// The detected encoding; empty when detection was inconclusive.
    pub fn encoding(&self) -> &EncodingLabel {
        &self.detection.label
    }

    pub fn detection(&self) -> &Detection {
        &self.detection
    }

    /// The stages every byte passes through.
    pub fn pipeline(&self) -> &PipelineSpec {
        &self.pipeline
    }
}

impl<R> Default for Utf8Reader<R> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<R: Read> Read for Utf8Reader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.peek_enabled = false;
        let n = match &mut self.source {
            Source::Empty => 0,
            Source::Passthrough(buffer) => buffer.read(buf)?,
            Source::Transformed(reader) => {
                // a refill happens only with nothing buffered
                let refills = reader.buffered() == 0;
                let from_prefix = !reader.get_ref().is_drained();
                let n = reader.read(buf)?;
                if refills {
                    self.prefix_output = from_prefix;
                }
                n
            }
        };
        log::trace!("read {} bytes", n);
        Ok(n)
    }
}
