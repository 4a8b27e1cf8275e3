use encoding_rs::{CoderResult, Decoder, Encoding};

use super::{StageFactory, Transform};

/// Decode stage for any charset known to `encoding_rs`.
///
/// The decoder is created without BOM handling since the BOM, if any, was
/// stripped before decoding starts. Malformed input becomes U+FFFD.
pub struct EncodingRsDecoder {
    decoder: Decoder,
}

impl EncodingRsDecoder {
    pub fn new(encoding: &'static Encoding) -> Self {
        EncodingRsDecoder {
            decoder: encoding.new_decoder_without_bom_handling(),
        }
    }
}

impl Transform for EncodingRsDecoder {
    fn transform(&mut self, src: &[u8], dst: &mut Vec<u8>, last: bool) -> usize {
        let mut consumed = 0;
        loop {
            let remaining = &src[consumed..];
            let needed = self
                .decoder
                .max_utf8_buffer_length(remaining.len())
                .unwrap_or(remaining.len() * 3 + 16);
            let start = dst.len();
            dst.resize(start + needed, 0);

            let (result, read, written, _) =
                self.decoder
                    .decode_to_utf8(remaining, &mut dst[start..], last);
            dst.truncate(start + written);
            consumed += read;

            match result {
                CoderResult::InputEmpty => return consumed,
                CoderResult::OutputFull => continue,
            }
        }
    }
}

impl StageFactory for &'static Encoding {
    fn create(&self) -> Box<dyn Transform> {
        Box::new(EncodingRsDecoder::new(*self))
    }
}

const REPLACEMENT: &[u8] = "\u{FFFD}".as_bytes();

/// Byte order of a UTF-32 stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endian {
    Little,
    Big,
}

/// Decode stage for UTF-32, which `encoding_rs` does not cover.
///
/// Consumes whole code units only; a partial unit waits for more input, or
/// becomes U+FFFD at the end of the stream. Surrogates and values above
/// U+10FFFF also become U+FFFD.
#[derive(Debug, Clone, Copy)]
pub struct Utf32Decoder {
    endian: Endian,
}

impl Utf32Decoder {
    pub fn new(endian: Endian) -> Self {
        Utf32Decoder { endian }
    }
}

impl Transform for Utf32Decoder {
    fn transform(&mut self, src: &[u8], dst: &mut Vec<u8>, last: bool) -> usize {
        let mut units = src.chunks_exact(4);
        let mut buf = [0u8; 4];
        for unit in &mut units {
            let bytes = [unit[0], unit[1], unit[2], unit[3]];
            let value = match self.endian {
                Endian::Little => u32::from_le_bytes(bytes),
                Endian::Big => u32::from_be_bytes(bytes),
            };
            let c = char::from_u32(value).unwrap_or(char::REPLACEMENT_CHARACTER);
            dst.extend_from_slice(c.encode_utf8(&mut buf).as_bytes());
        }

        let whole = src.len() - units.remainder().len();
        if last && whole < src.len() {
            dst.extend_from_slice(REPLACEMENT);
            return src.len();
        }
        whole
    }
}

impl StageFactory for Utf32Decoder {
    fn create(&self) -> Box<dyn Transform> {
        Box::new(*self)
    }
}
