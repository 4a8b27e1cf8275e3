//! Library API tests for `Utf8Reader`.
//!
//! Legacy charsets are detected through `FixedClassifier` so the results do
//! not depend on the statistical model.

use std::io::{self, Cursor, Read};

use utf8_reader::{
    EncodingLabel, EncodingRsRegistry, FixedClassifier, NullClassifier, RawTransform,
    ReaderConfig, ReaderError, ReaderSettings, StreamState, Transform, Utf8Reader,
};

fn open(input: &[u8], charset: &str, config: &ReaderConfig) -> Utf8Reader<Cursor<Vec<u8>>> {
    Utf8Reader::with_components(
        Cursor::new(input.to_vec()),
        config,
        &FixedClassifier::new(charset),
        &EncodingRsRegistry,
    )
    .unwrap()
}

fn read_string<R: Read>(reader: &mut Utf8Reader<R>) -> String {
    let mut out = String::new();
    reader.read_to_string(&mut out).unwrap();
    out
}

fn utf16le(text: &str) -> Vec<u8> {
    text.encode_utf16().flat_map(u16::to_le_bytes).collect()
}

fn utf16be(text: &str) -> Vec<u8> {
    text.encode_utf16().flat_map(u16::to_be_bytes).collect()
}

// ============================================================================
// Detection through the reader
// ============================================================================

#[test]
fn test_koi8r_scenario() {
    let input = [
        0xF4, 0xCF, 0xD7, 0xC1, 0x20, 0xC5, 0x20, 0xCE, 0xC1, 0x20, 0xC2, 0xDF, 0xCC, 0xC7, 0xC1,
        0xD2, 0xD3, 0xCB, 0xC9,
    ];
    let mut reader = open(&input, "KOI8-R", &ReaderConfig::default());
    assert_eq!(reader.encoding(), "KOI8-R");
    assert_eq!(read_string(&mut reader), "Това е на български");
}

#[test]
fn test_koi8r_scenario_default_classifier() {
    // chardetng reports the KOI8-U superset, which decodes this text the same
    let input = [
        0xF4, 0xCF, 0xD7, 0xC1, 0x20, 0xC5, 0x20, 0xCE, 0xC1, 0x20, 0xC2, 0xDF, 0xCC, 0xC7, 0xC1,
        0xD2, 0xD3, 0xCB, 0xC9,
    ];
    let mut reader = Utf8Reader::new(&input[..], &ReaderConfig::default()).unwrap();
    assert_eq!(reader.encoding(), "KOI8-U");
    assert_eq!(read_string(&mut reader), "Това е на български");
}

#[test]
fn test_legacy_round_trips() {
    let cases: &[(&str, &[u8], &str)] = &[
        (
            "ISO-8859-1",
            b"C'est b\xEAte en fran\xE7ais",
            "C'est bête en français",
        ),
        (
            "WINDOWS-1251",
            &[
                0xC3, 0xEB, 0xF3, 0xEF, 0xE0, 0xE2, 0xEE, 0x20, 0xE5, 0x20, 0xED, 0xE0, 0x20, 0xE1,
                0xFA, 0xEB, 0xE3, 0xE0, 0xF0, 0xF1, 0xEA, 0xE8,
            ],
            "Глупаво е на български",
        ),
        (
            "KOI8-R",
            &[
                0xE7, 0xCC, 0xD5, 0xD0, 0xC1, 0xD7, 0xCF, 0x20, 0xC5, 0x20, 0xCE, 0xC1, 0x20, 0xC2,
                0xDF, 0xCC, 0xC7, 0xC1, 0xD2, 0xD3, 0xCB, 0xC9,
            ],
            "Глупаво е на български",
        ),
    ];

    for (charset, input, expected) in cases {
        let mut reader = open(input, charset, &ReaderConfig::default());
        assert_eq!(reader.encoding(), *charset);
        assert_eq!(read_string(&mut reader), *expected, "{}", charset);
    }
}

#[test]
fn test_unicode_inputs() {
    let cases: Vec<(Vec<u8>, EncodingLabel)> = vec![
        ("bétà".as_bytes().to_vec(), EncodingLabel::UTF_8),
        (utf16le("bétà"), EncodingLabel::UTF_16LE),
        ([&[0xFF, 0xFE][..], &utf16le("bétà")].concat(), EncodingLabel::UTF_16LE),
        (utf16be("bétà"), EncodingLabel::UTF_16BE),
        ([&[0xFE, 0xFF][..], &utf16be("bétà")].concat(), EncodingLabel::UTF_16BE),
        (
            [&[0xFF, 0xFE, 0x00, 0x00][..], &[0x62, 0, 0, 0, 0xE9, 0, 0, 0, 0x74, 0, 0, 0, 0xE0, 0, 0, 0]].concat(),
            EncodingLabel::UTF_32LE,
        ),
        (
            [&[0x00, 0x00, 0xFE, 0xFF][..], &[0, 0, 0, 0x62, 0, 0, 0, 0xE9, 0, 0, 0, 0x74, 0, 0, 0, 0xE0]].concat(),
            EncodingLabel::UTF_32BE,
        ),
    ];

    for (input, label) in cases {
        let mut reader = open(&input, "ASCII", &ReaderConfig::default());
        assert_eq!(reader.encoding(), &label);
        assert_eq!(read_string(&mut reader), "bétà", "{}", label);
    }
}

#[test]
fn test_ascii_as_utf16_is_not_inconclusive() {
    let text = "just some ascii";
    let reader = open(&utf16le(text), "ASCII", &ReaderConfig::default());
    assert_eq!(reader.encoding(), &EncodingLabel::UTF_16LE);
    let reader = open(&utf16be(text), "ASCII", &ReaderConfig::default());
    assert_eq!(reader.encoding(), &EncodingLabel::UTF_16BE);
}

#[test]
fn test_utf8_with_stray_nul() {
    let mut input = vec![0x00, b'#'];
    for _ in 0..20 {
        input.extend_from_slice("Това е на български текст. ".as_bytes());
    }
    let mut reader = Utf8Reader::new(&input[..], &ReaderConfig::default()).unwrap();
    assert_eq!(reader.encoding(), &EncodingLabel::UTF_8);

    let mut out = Vec::new();
    reader.read_to_end(&mut out).unwrap();
    assert_eq!(out, input);
}

#[test]
fn test_ascii_classification_passes_through() {
    let input = [0x41, 0x80, 0x42];
    let mut reader = open(&input, "US-ASCII", &ReaderConfig::default());
    assert!(reader.encoding().is_inconclusive());
    let mut out = Vec::new();
    reader.read_to_end(&mut out).unwrap();
    assert_eq!(out, input);
}

#[test]
fn test_empty_input() {
    let mut reader = Utf8Reader::new(io::empty(), &ReaderConfig::default()).unwrap();
    assert_eq!(reader.encoding(), "");
    assert_eq!(reader.peek(), None);
    let mut buf = [0u8; 16];
    assert_eq!(reader.read(&mut buf).unwrap(), 0);
}

#[test]
fn test_default_classifier_with_settings_hint() {
    let text = "Съешь же ещё этих мягких французских булок, да выпей чаю. \
                Широкая электрификация южных губерний даст мощный толчок подъёму сельского хозяйства.";
    let (bytes, _, _) = encoding_rs::WINDOWS_1251.encode(text);
    let settings = ReaderSettings::from_toml("[detection]\ntld = \"ru\"\n").unwrap();

    let mut reader = Utf8Reader::with_components(
        &bytes[..],
        &settings.reader_config(),
        &settings.classifier(),
        &EncodingRsRegistry,
    )
    .unwrap();
    assert_eq!(reader.encoding(), "WINDOWS-1251");
    assert_eq!(read_string(&mut reader), text);
}

// ============================================================================
// Peek
// ============================================================================

#[test]
fn test_peek_decodes_prefix() {
    let reader = open(&utf16le("bétà"), "ASCII", &ReaderConfig::default());
    assert_eq!(reader.peek().unwrap(), "bétà".as_bytes());
}

#[test]
fn test_peek_never_changes_read_output() {
    let text: String = (0..2000).map(|i| ["b", "é", "t", "à", "😀", "ж"][i % 6]).collect();
    let input = utf16le(&text);
    assert!(input.len() > 4096);

    let config = ReaderConfig::new().with_peek_size(1024);
    let mut reader = open(&input, "ASCII", &config);
    let first = reader.peek().unwrap();
    for _ in 0..3 {
        assert_eq!(reader.peek().unwrap(), first);
    }
    assert!(text.as_bytes().starts_with(&first));
    assert_eq!(reader.state(), StreamState::Fresh);

    assert_eq!(read_string(&mut reader), text);
    assert_eq!(reader.peek(), None);
    assert_eq!(reader.state(), StreamState::Live);
}

#[test]
fn test_peek_disabled_after_partial_read() {
    let input = "x".repeat(2000);
    let mut reader = open(input.as_bytes(), "ASCII", &ReaderConfig::default());
    let mut buf = [0u8; 4];
    reader.read_exact(&mut buf).unwrap();
    assert_eq!(reader.state(), StreamState::Draining);
    assert_eq!(reader.peek(), None);
    assert_eq!(read_string(&mut reader).len(), 1996);
}

// ============================================================================
// Pipeline configuration
// ============================================================================

#[test]
fn test_normalization_stages() {
    let input = b"b\xEAte";

    let mut reader = open(input, "ISO-8859-1", &ReaderConfig::default());
    assert_eq!(read_string(&mut reader), "bête");

    let config = ReaderConfig::new().with_normalization("NFD");
    let mut reader = open(input, "ISO-8859-1", &config);
    assert_eq!(read_string(&mut reader), "be\u{302}te");
    assert_eq!(reader.peek(), None);

    let config = ReaderConfig::new()
        .with_normalization("NFD")
        .with_normalization("NFC");
    let mut reader = open(input, "ISO-8859-1", &config);
    assert_eq!(read_string(&mut reader), "bête");
}

#[test]
fn test_nfc_on_utf8_input() {
    let config = ReaderConfig::new().with_normalization("nfc");
    let mut reader = open("be\u{302}te".as_bytes(), "ASCII", &config);
    assert_eq!(reader.encoding(), &EncodingLabel::UTF_8);
    assert_eq!(reader.peek().unwrap(), "bête".as_bytes());
    assert_eq!(read_string(&mut reader), "bête");
}

#[test]
fn test_nfc_composes_hangul_syllable() {
    let config = ReaderConfig::new().with_normalization("NFC");
    let mut reader = open("\u{1100}\u{1161}\u{11A8}".as_bytes(), "ASCII", &config);
    assert_eq!(read_string(&mut reader), "\u{AC01}");
}

#[test]
fn test_unknown_normalization_is_fatal() {
    let config = ReaderConfig::new()
        .with_normalization("NFC")
        .with_normalization("NFKC");
    match Utf8Reader::new(&b"abc"[..], &config) {
        Err(ReaderError::UnsupportedNormalization(names)) => assert_eq!(names, vec!["NFKC"]),
        Err(other) => panic!("unexpected error: {}", other),
        Ok(_) => panic!("unknown normalization form accepted"),
    }
}

struct Upper;

impl Transform for Upper {
    fn transform(&mut self, src: &[u8], dst: &mut Vec<u8>, _last: bool) -> usize {
        dst.extend(src.iter().map(u8::to_ascii_uppercase));
        src.len()
    }
}

/// Drops U+0301 COMBINING ACUTE ACCENT.
struct StripAcute;

impl Transform for StripAcute {
    fn transform(&mut self, src: &[u8], dst: &mut Vec<u8>, last: bool) -> usize {
        let n = if !last && src.last() == Some(&0xCC) {
            src.len() - 1
        } else {
            src.len()
        };
        let mut i = 0;
        while i < n {
            if src[i..n].starts_with(&[0xCC, 0x81]) {
                i += 2;
            } else {
                dst.push(src[i]);
                i += 1;
            }
        }
        n
    }
}

#[test]
fn test_stages_run_in_call_order() {
    let config = ReaderConfig::new()
        .with_raw_transform(RawTransform::new("strip", || StripAcute))
        .with_normalization("NFD");
    let mut reader = open("é".as_bytes(), "ASCII", &config);
    let names: Vec<String> = reader.pipeline().stages().iter().map(|s| s.name()).collect();
    assert_eq!(names, vec!["raw(strip)", "NFD"]);
    assert_eq!(read_string(&mut reader), "e\u{301}");

    let config = ReaderConfig::new()
        .with_normalization("NFD")
        .with_raw_transform(RawTransform::new("strip", || StripAcute));
    let mut reader = open("é".as_bytes(), "ASCII", &config);
    assert_eq!(read_string(&mut reader), "e");
}

#[test]
fn test_raw_transform_after_decoding() {
    let config = ReaderConfig::new()
        .with_normalization("NFD")
        .with_raw_transform(RawTransform::new("upper", || Upper));
    let mut reader = open(b"b\xEAte", "ISO-8859-1", &config);

    let names: Vec<String> = reader.pipeline().stages().iter().map(|s| s.name()).collect();
    assert_eq!(names, vec!["decode(ISO-8859-1)", "NFD", "raw(upper)"]);
    assert_eq!(read_string(&mut reader), "BE\u{302}TE");
}

#[test]
fn test_raw_transform_on_utf8() {
    let config = ReaderConfig::new().with_raw_transform(RawTransform::new("upper", || Upper));
    let mut reader = open(b"hello", "ASCII", &config);
    assert_eq!(reader.peek().unwrap(), b"HELLO");
    assert_eq!(read_string(&mut reader), "HELLO");
}

#[test]
fn test_unsupported_charset_keeps_label() {
    let input = [0xA4, 0xA4, 0xA4, 0xE5];
    let mut reader = open(&input, "x-unknown-charset", &ReaderConfig::default());
    assert_eq!(reader.encoding(), "X-UNKNOWN-CHARSET");
    let mut out = Vec::new();
    reader.read_to_end(&mut out).unwrap();
    assert_eq!(out, input);
}

// ============================================================================
// Failures and absent sources
// ============================================================================

/// Serves `data`, then fails with `kind` instead of signalling end of data.
struct FailAfter {
    data: Cursor<Vec<u8>>,
    kind: io::ErrorKind,
}

impl Read for FailAfter {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self.data.read(buf)? {
            0 => Err(io::Error::new(self.kind, "source failed")),
            n => Ok(n),
        }
    }
}

#[test]
fn test_fill_failure_is_fatal() {
    let source = FailAfter {
        data: Cursor::new(b"short".to_vec()),
        kind: io::ErrorKind::PermissionDenied,
    };
    match Utf8Reader::new(source, &ReaderConfig::default()) {
        Err(ReaderError::Fill(e)) => assert_eq!(e.kind(), io::ErrorKind::PermissionDenied),
        Err(other) => panic!("unexpected error: {}", other),
        Ok(_) => panic!("reader built over a failing source"),
    }
}

#[test]
fn test_read_failure_passes_through() {
    let source = FailAfter {
        data: Cursor::new(vec![b'a'; 3000]),
        kind: io::ErrorKind::BrokenPipe,
    };
    let config = ReaderConfig::new().with_peek_size(1024);
    let mut reader = Utf8Reader::new(source, &config).unwrap();
    assert_eq!(reader.encoding(), &EncodingLabel::UTF_8);

    let mut out = Vec::new();
    let err = reader.read_to_end(&mut out).unwrap_err();
    assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
    assert_eq!(out.len(), 3000);
}

#[test]
fn test_absent_source() {
    let mut reader =
        Utf8Reader::<io::Empty>::from_source(None, &ReaderConfig::default()).unwrap();
    assert!(reader.encoding().is_inconclusive());
    assert_eq!(reader.peek(), None);
    assert_eq!(reader.state(), StreamState::Live);
    let mut buf = [0u8; 8];
    assert_eq!(reader.read(&mut buf).unwrap(), 0);
}

#[test]
fn test_source_by_reference() {
    let mut source = Cursor::new(utf16le("bétà"));
    {
        let mut reader = Utf8Reader::with_components(
            &mut source,
            &ReaderConfig::default(),
            &NullClassifier,
            &EncodingRsRegistry,
        )
        .unwrap();
        assert_eq!(read_string(&mut reader), "bétà");
    }
    assert_eq!(source.position(), 8);
}
