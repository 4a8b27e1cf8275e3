use chardetng::EncodingDetector;

use crate::errors::ClassifyError;

/// Frequency based charset guesser consulted when no heuristic matches.
///
/// Implementations return a charset name in any case; the detector
/// canonicalizes it. A result of "ASCII" means no transcoding is needed.
pub trait CharsetClassifier {
    fn classify(&self, bytes: &[u8]) -> Result<String, ClassifyError>;
}

impl<C: CharsetClassifier + ?Sized> CharsetClassifier for &C {
    fn classify(&self, bytes: &[u8]) -> Result<String, ClassifyError> {
        (**self).classify(bytes)
    }
}

impl<C: CharsetClassifier + ?Sized> CharsetClassifier for Box<C> {
    fn classify(&self, bytes: &[u8]) -> Result<String, ClassifyError> {
        (**self).classify(bytes)
    }
}

/// Classifier backed by `chardetng`.
///
/// `chardetng` covers legacy single and multi byte encodings. It never
/// reports UTF-16, which is why the parity heuristic runs first.
#[derive(Debug, Clone, Default)]
pub struct ChardetClassifier {
    tld: Option<String>,
}

impl ChardetClassifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Uses a top-level domain (e.g. "ru", "jp") as a hint.
    pub fn with_tld(tld: &str) -> Self {
        ChardetClassifier {
            tld: Some(tld.trim_start_matches('.').to_ascii_lowercase()),
        }
    }
}

impl CharsetClassifier for ChardetClassifier {
    fn classify(&self, bytes: &[u8]) -> Result<String, ClassifyError> {
        if bytes.is_empty() {
            return Err(ClassifyError::EmptyInput);
        }
        let mut detector = EncodingDetector::new();
        detector.feed(bytes, true);
        // UTF-8 was already ruled out by the caller
        let encoding = detector.guess(self.tld.as_deref().map(str::as_bytes), false);
        Ok(encoding.name().to_string())
    }
}

/// Classifier that never guesses.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullClassifier;

impl CharsetClassifier for NullClassifier {
    fn classify(&self, _bytes: &[u8]) -> Result<String, ClassifyError> {
        Err(ClassifyError::NoMatch)
    }
}

/// Classifier returning a fixed answer, for deterministic detection.
#[derive(Debug, Clone)]
pub struct FixedClassifier(Result<String, ClassifyError>);

impl FixedClassifier {
    pub fn new(charset: &str) -> Self {
        FixedClassifier(Ok(charset.to_string()))
    }

    pub fn failing(error: ClassifyError) -> Self {
        FixedClassifier(Err(error))
    }
}

impl CharsetClassifier for FixedClassifier {
    fn classify(&self, _bytes: &[u8]) -> Result<String, ClassifyError> {
        self.0.clone()
    }
}
