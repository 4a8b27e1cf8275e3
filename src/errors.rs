use std::io;

use thiserror::Error;

/// Failures that prevent a [`crate::Utf8Reader`] from being constructed.
///
/// Everything after construction is reported through `std::io::Error` by the
/// `Read` implementation, unmodified from the underlying source.
#[derive(Error, Debug)]
pub enum ReaderError {
    /// The source failed while the detection prefix was being filled.
    #[error("failed to fill the detection buffer: {0}")]
    Fill(#[source] io::Error),
    /// One or more requested normalization forms are not NFC or NFD.
    #[error("unsupported normalization form(s): {} (expected NFC or NFD)", .0.join(", "))]
    UnsupportedNormalization(Vec<String>),
}

/// Why a charset classifier could not produce a guess.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClassifyError {
    #[error("no input to classify")]
    EmptyInput,
    #[error("no charset matched the input")]
    NoMatch,
}

/// Failures while loading a settings file.
#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("cannot read settings file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error("invalid settings: {0}")]
    Parse(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, ReaderError>;
