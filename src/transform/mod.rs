//! Byte-stream transforms applied after detection.
//!
//! A pipeline is an ordered list of [`StageDescriptor`]s decided once at
//! construction: an optional decode stage followed by normalization and caller
//! supplied stages in the order requested. Descriptors are immutable;
//! [`PipelineSpec::build`]
//! turns them into a fresh [`Chain`] of stateful transforms whenever one is
//! needed.

pub mod decode;
pub mod normalize;
pub mod registry;

pub use decode::{EncodingRsDecoder, Utf32Decoder};
pub use normalize::Normalizer;
pub use registry::{DecoderRegistry, EncodingRsRegistry};

use std::fmt;
use std::sync::Arc;

use crate::core::config::NormalizationForm;
use crate::core::label::EncodingLabel;

/// A stateful streaming byte transform.
///
/// `transform` appends output for a prefix of `src` to `dst` and returns how
/// many bytes of `src` it consumed. Bytes it did not consume (typically an
/// incomplete trailing sequence) are offered again, followed by new input, on
/// the next call. When `last` is true no more input follows and every byte
/// must be consumed.
pub trait Transform: Send {
    fn transform(&mut self, src: &[u8], dst: &mut Vec<u8>, last: bool) -> usize;
}

impl<T: Transform + ?Sized> Transform for Box<T> {
    fn transform(&mut self, src: &[u8], dst: &mut Vec<u8>, last: bool) -> usize {
        (**self).transform(src, dst, last)
    }
}

/// Produces fresh instances of a decode stage.
pub trait StageFactory: Send + Sync {
    fn create(&self) -> Box<dyn Transform>;
}

/// A caller supplied stage, given as a factory so a pristine instance can be
/// created for every pipeline built.
#[derive(Clone)]
pub struct RawTransform {
    name: String,
    factory: Arc<dyn Fn() -> Box<dyn Transform> + Send + Sync>,
}

impl RawTransform {
    pub fn new<F, T>(name: impl Into<String>, factory: F) -> Self
    where
        F: Fn() -> T + Send + Sync + 'static,
        T: Transform + 'static,
    {
        RawTransform {
            name: name.into(),
            factory: Arc::new(move || Box::new(factory()) as Box<dyn Transform>),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    fn create(&self) -> Box<dyn Transform> {
        (self.factory)()
    }
}

impl fmt::Debug for RawTransform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RawTransform").field("name", &self.name).finish()
    }
}

/// One entry of a pipeline.
#[derive(Clone)]
pub enum StageDescriptor {
    Decode {
        label: EncodingLabel,
        factory: Arc<dyn StageFactory>,
    },
    Normalize(NormalizationForm),
    Raw(RawTransform),
}

impl StageDescriptor {
    pub fn instantiate(&self) -> Box<dyn Transform> {
        match self {
            StageDescriptor::Decode { factory, .. } => factory.create(),
            StageDescriptor::Normalize(form) => Box::new(Normalizer::new(*form)),
            StageDescriptor::Raw(raw) => raw.create(),
        }
    }

    pub fn name(&self) -> String {
        match self {
            StageDescriptor::Decode { label, .. } => format!("decode({})", label),
            StageDescriptor::Normalize(form) => form.to_string(),
            StageDescriptor::Raw(raw) => format!("raw({})", raw.name()),
        }
    }
}

impl fmt::Debug for StageDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

/// Ordered, immutable description of a pipeline.
#[derive(Debug, Clone, Default)]
pub struct PipelineSpec {
    stages: Vec<StageDescriptor>,
}

impl PipelineSpec {
    /// Assembles the stages for a detected label, followed by `requested`.
    ///
    /// A decode stage is added only when the label needs decoding and the
    /// registry knows it; an unknown label degrades to pass-through.
    pub fn assemble<D: DecoderRegistry + ?Sized>(
        label: &EncodingLabel,
        registry: &D,
        requested: &[StageDescriptor],
    ) -> Self {
        let mut stages = Vec::with_capacity(1 + requested.len());

        if label.needs_decoding() {
            match registry.lookup(label) {
                Some(factory) => stages.push(StageDescriptor::Decode {
                    label: label.clone(),
                    factory,
                }),
                None => log::warn!("no decoder for {}, passing bytes through", label),
            }
        }
        stages.extend(requested.iter().cloned());

        log::debug!("pipeline: {:?}", stages);
        PipelineSpec { stages }
    }

    pub fn stages(&self) -> &[StageDescriptor] {
        &self.stages
    }

    /// True when the pipeline leaves bytes untouched.
    pub fn is_identity(&self) -> bool {
        self.stages.is_empty()
    }

    pub fn has_decoder(&self) -> bool {
        self.stages
            .iter()
            .any(|stage| matches!(stage, StageDescriptor::Decode { .. }))
    }

    /// Creates fresh stage instances composed into one transform.
    pub fn build(&self) -> Chain {
        Chain::new(self.stages.iter().map(StageDescriptor::instantiate).collect())
    }

    /// Runs a fresh pipeline over a complete byte slice.
    ///
    /// With `last` false, a trailing incomplete sequence is held back and only
    /// the output for what could be transformed is returned.
    pub fn apply(&self, src: &[u8], last: bool) -> Vec<u8> {
        let mut out = Vec::with_capacity(src.len());
        self.build().transform(src, &mut out, last);
        out
    }
}

/// Composite of transforms run in order.
///
/// Each stage keeps its own carry of unconsumed input, so the chain as a whole
/// always consumes everything it is given. No stages means identity.
pub struct Chain {
    stages: Vec<Box<dyn Transform>>,
    carries: Vec<Vec<u8>>,
}

impl Chain {
    pub fn new(stages: Vec<Box<dyn Transform>>) -> Self {
        let carries = stages.iter().map(|_| Vec::new()).collect();
        Chain { stages, carries }
    }

    pub fn is_identity(&self) -> bool {
        self.stages.is_empty()
    }
}

impl Transform for Chain {
    fn transform(&mut self, src: &[u8], dst: &mut Vec<u8>, last: bool) -> usize {
        if self.stages.is_empty() {
            dst.extend_from_slice(src);
            return src.len();
        }

        let mut input = src.to_vec();
        for (stage, carry) in self.stages.iter_mut().zip(self.carries.iter_mut()) {
            carry.extend_from_slice(&input);
            let mut output = Vec::with_capacity(carry.len());
            let consumed = stage.transform(carry, &mut output, last);
            carry.drain(..consumed);
            if last && !carry.is_empty() {
                // leftovers on the last call pass through untouched
                output.append(carry);
            }
            input = output;
        }
        dst.extend_from_slice(&input);
        src.len()
    }
}
