use crate::core::label::EncodingLabel;

/// Byte order marks, longest first so that `FF FE 00 00` is seen as UTF-32LE
/// before its `FF FE` prefix can match UTF-16LE.
const SIGNATURES: &[(&[u8], &str)] = &[
    (&[0xFF, 0xFE, 0x00, 0x00], "UTF-32LE"),
    (&[0x00, 0x00, 0xFE, 0xFF], "UTF-32BE"),
    (&[0xEF, 0xBB, 0xBF], "UTF-8"),
    (&[0xFE, 0xFF], "UTF-16BE"),
    (&[0xFF, 0xFE], "UTF-16LE"),
];

/// Matches the leading bytes against the known byte order marks.
///
/// Returns the label and the exact BOM length, or `None` when no signature
/// matches.
pub fn detect_bom(bytes: &[u8]) -> Option<(EncodingLabel, usize)> {
    SIGNATURES
        .iter()
        .find(|(signature, _)| bytes.starts_with(signature))
        .map(|(signature, name)| (EncodingLabel::from_static(*name), signature.len()))
}
