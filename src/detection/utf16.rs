use crate::core::label::EncodingLabel;

/// Byte pairs that look like ASCII stored as UTF-16.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct PairCounts {
    pairs: usize,
    big_endian: usize,
    little_endian: usize,
    either: usize,
}

fn count_pairs(data: &[u8]) -> PairCounts {
    let mut counts = PairCounts {
        pairs: data.len() / 2,
        ..PairCounts::default()
    };

    for pair in data.chunks_exact(2) {
        let be = pair[0] == 0 && pair[1].is_ascii();
        let le = pair[0].is_ascii() && pair[1] == 0;
        counts.big_endian += be as usize;
        counts.little_endian += le as usize;
        counts.either += (be || le) as usize;
    }
    counts
}

/// Guesses UTF-16 byte order from `<NUL><ASCII>` and `<ASCII><NUL>` pairs.
///
/// Statistical classifiers tend to report ASCII text stored as UTF-16 as plain
/// ASCII, while other encodings rarely contain these pairs. Ties go to
/// big-endian.
pub fn guess_utf16(data: &[u8]) -> Option<EncodingLabel> {
    let counts = count_pairs(data);

    if counts.big_endian == 0 && counts.little_endian == 0 {
        None
    } else if counts.little_endian > counts.big_endian {
        Some(EncodingLabel::UTF_16LE)
    } else {
        Some(EncodingLabel::UTF_16BE)
    }
}

/// True when at least half of the byte pairs are `<NUL><ASCII>` or
/// `<ASCII><NUL>`.
///
/// Such data is valid UTF-8 when it is ASCII text stored as UTF-16, so the
/// UTF-8 check must not claim it. A stray NUL in real UTF-8 text does not
/// reach the threshold.
pub fn mostly_utf16_pairs(data: &[u8]) -> bool {
    let counts = count_pairs(data);
    counts.pairs > 0 && counts.either * 2 >= counts.pairs
}
