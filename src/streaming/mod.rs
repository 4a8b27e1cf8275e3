//! Streaming side of the reader: the captured prefix, the lazy transform
//! adapter and the [`Utf8Reader`] facade built on both.

mod prefix;
mod reader;
mod transform_reader;

pub use prefix::PrefixBuffer;
pub use reader::{StreamState, Utf8Reader};
pub use transform_reader::TransformReader;
