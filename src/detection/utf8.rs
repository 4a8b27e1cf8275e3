/// Longest UTF-8 sequence in bytes.
const UTF8_MAX: usize = 4;

fn is_sequence_start(byte: u8) -> bool {
    byte & 0xC0 != 0x80
}

/// Length of `data` without a possibly truncated trailing character.
///
/// Scans back at most four bytes for the start of the last sequence. If that
/// sequence does not decode the region ends before it, otherwise the region
/// ends right after it.
pub fn truncated_len(data: &[u8]) -> usize {
    let end = data.len();
    let limit = end.saturating_sub(UTF8_MAX);

    for start in (limit..end).rev() {
        if is_sequence_start(data[start]) {
            return match std::str::from_utf8(&data[start..]) {
                Ok(_) => end,
                Err(e) => start + e.valid_up_to(),
            };
        }
    }
    end
}

/// True if `data` is well-formed UTF-8, allowing its last character to be
/// cut short.
///
/// A single-byte encoding whose text happens to end in a high byte can pass
/// this check; detection is best effort.
pub fn is_utf8(data: &[u8]) -> bool {
    std::str::from_utf8(&data[..truncated_len(data)]).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncated_len() {
        let cases: &[(&[u8], usize)] = &[
            // "mouillé"
            (&[0x6d, 0x6f, 0x75, 0x69, 0x6c, 0x6c, 0xc3, 0xa9], 8),
            (&[0x6d, 0x6f, 0x75, 0x69, 0x6c, 0x6c, 0xc3], 6),
            // "=🏖️"
            (&[0x3d, 0xf0, 0x9f, 0x8f, 0x96, 0xef, 0xb8, 0x8f], 8),
            (&[0x3d, 0xf0, 0x9f, 0x8f, 0x96, 0xef, 0xb8], 5),
            (&[0x3d, 0xf0, 0x9f, 0x8f, 0x96, 0xef], 5),
            (&[0x3d, 0xf0, 0x9f, 0x8f, 0x96], 5),
            (&[0x3d, 0xf0, 0x9f, 0x8f], 1),
            (&[0x3d, 0xf0, 0x9f], 1),
            (&[0x3d, 0xf0], 1),
            (&[0x3d], 1),
            (&[], 0),
        ];
        for (input, expected) in cases {
            assert_eq!(truncated_len(input), *expected, "input {:02x?}", input);
        }
    }

    #[test]
    fn test_is_utf8() {
        // "mouillé", complete and cut
        assert!(is_utf8(&[0x6d, 0x6f, 0x75, 0x69, 0x6c, 0x6c, 0xc3, 0xa9]));
        assert!(is_utf8(&[0x6d, 0x6f, 0x75, 0x69, 0x6c, 0x6c, 0xc3]));
        // ISO-8859-1 "mouillé" looks like a cut sequence
        assert!(is_utf8(&[0x6d, 0x6f, 0x75, 0x69, 0x6c, 0x6c, 0xe9]));
        // ...until something follows it
        assert!(!is_utf8(&[0x6d, 0x6f, 0x75, 0x69, 0x6c, 0x6c, 0xe9, 0x20]));
        // KOI8-R "тест"
        assert!(!is_utf8(&[0xf4, 0xe5, 0xf1, 0xf2]));
    }

    #[test]
    fn test_every_cut_of_valid_text_is_utf8() {
        let text = "Това е на български, 5 € 🏖️".as_bytes();
        for cut in 0..=text.len() {
            assert!(is_utf8(&text[..cut]), "cut at {}", cut);
        }
    }
}
