use std::borrow::Cow;
use std::fmt;

/// Canonical name of a detected character encoding.
///
/// Labels are upper-cased charset names such as `"UTF-16LE"` or
/// `"WINDOWS-1251"`. The empty label means detection was inconclusive and the
/// input is treated as already UTF-8 (or plain ASCII).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct EncodingLabel(Cow<'static, str>);

impl EncodingLabel {
    pub const INCONCLUSIVE: EncodingLabel = EncodingLabel(Cow::Borrowed(""));
    pub const UTF_8: EncodingLabel = EncodingLabel(Cow::Borrowed("UTF-8"));
    pub const UTF_16LE: EncodingLabel = EncodingLabel(Cow::Borrowed("UTF-16LE"));
    pub const UTF_16BE: EncodingLabel = EncodingLabel(Cow::Borrowed("UTF-16BE"));
    pub const UTF_32LE: EncodingLabel = EncodingLabel(Cow::Borrowed("UTF-32LE"));
    pub const UTF_32BE: EncodingLabel = EncodingLabel(Cow::Borrowed("UTF-32BE"));

    /// Builds a canonical label from any charset name.
    ///
    /// Surrounding whitespace is trimmed and ASCII letters are upper-cased.
    pub fn new(name: &str) -> Self {
        EncodingLabel(Cow::Owned(name.trim().to_ascii_uppercase()))
    }

    pub const fn from_static(name: &'static str) -> Self {
        EncodingLabel(Cow::Borrowed(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True when no encoding could be determined.
    pub fn is_inconclusive(&self) -> bool {
        self.0.is_empty()
    }

    pub fn is_utf8(&self) -> bool {
        self.as_str() == "UTF-8"
    }

    /// True when bytes labelled this way need a decode stage.
    pub fn needs_decoding(&self) -> bool {
        !self.is_inconclusive() && !self.is_utf8()
    }
}

impl fmt::Display for EncodingLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl AsRef<str> for EncodingLabel {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl PartialEq<str> for EncodingLabel {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl PartialEq<&str> for EncodingLabel {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}
