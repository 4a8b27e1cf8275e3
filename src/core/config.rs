use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use crate::detection::{CharsetClassifier, ChardetClassifier, NullClassifier};
use crate::errors::{ReaderError, SettingsError};
use crate::transform::{RawTransform, StageDescriptor};

/// Default number of bytes captured for detection.
pub const DEFAULT_PEEK_SIZE: usize = 4096;
/// Smallest prefix ever captured, regardless of configuration.
pub const MIN_PEEK_SIZE: usize = 1024;

/// Unicode normalization applied after decoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NormalizationForm {
    /// Canonical composition.
    #[serde(rename = "NFC", alias = "nfc")]
    Nfc,
    /// Canonical decomposition.
    #[serde(rename = "NFD", alias = "nfd")]
    Nfd,
}

impl NormalizationForm {
    pub fn as_str(&self) -> &'static str {
        match self {
            NormalizationForm::Nfc => "NFC",
            NormalizationForm::Nfd => "NFD",
        }
    }
}

impl FromStr for NormalizationForm {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "NFC" => Ok(NormalizationForm::Nfc),
            "NFD" => Ok(NormalizationForm::Nfd),
            _ => Err(s.to_string()),
        }
    }
}

impl fmt::Display for NormalizationForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A stage requested on a [`ReaderConfig`].
#[derive(Debug, Clone)]
pub enum StageRequest {
    /// Normalization form by name, checked when the reader is built.
    Normalize(String),
    /// Caller supplied stage.
    Raw(RawTransform),
}

/// Construction options for a [`crate::Utf8Reader`].
///
/// Nothing here is validated until the reader is built; all problems are then
/// reported together as a single [`ReaderError`].
#[derive(Debug, Clone)]
pub struct ReaderConfig {
    /// Bytes captured for detection. Values below [`MIN_PEEK_SIZE`] are raised
    /// to it.
    pub peek_size: usize,
    /// Stages run after decoding, in the order they were requested.
    pub stages: Vec<StageRequest>,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        ReaderConfig {
            peek_size: DEFAULT_PEEK_SIZE,
            stages: Vec::new(),
        }
    }
}

impl ReaderConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the number of bytes captured for detection.
    pub fn with_peek_size(mut self, size: usize) -> Self {
        self.peek_size = size;
        self
    }

    /// Appends a normalization stage ("NFC" or "NFD").
    ///
    /// May be called several times; stages run in call order.
    pub fn with_normalization(mut self, form: impl Into<String>) -> Self {
        self.stages.push(StageRequest::Normalize(form.into()));
        self
    }

    /// Appends a caller supplied stage.
    pub fn with_raw_transform(mut self, stage: RawTransform) -> Self {
        self.stages.push(StageRequest::Raw(stage));
        self
    }

    /// Replaces every requested normalization stage with `forms`, appended
    /// after the remaining stages.
    pub fn replace_normalization(&mut self, forms: &[String]) {
        self.stages.retain(|stage| !matches!(stage, StageRequest::Normalize(_)));
        self.stages.extend(forms.iter().cloned().map(StageRequest::Normalize));
    }

    /// Names of the requested normalization stages, in order.
    pub fn normalization(&self) -> Vec<&str> {
        self.stages
            .iter()
            .filter_map(|stage| match stage {
                StageRequest::Normalize(name) => Some(name.as_str()),
                StageRequest::Raw(_) => None,
            })
            .collect()
    }

    /// The prefix size actually used, after applying the floor.
    pub fn effective_peek_size(&self) -> usize {
        self.peek_size.max(MIN_PEEK_SIZE)
    }

    /// Resolves the requested stages in order.
    ///
    /// All unrecognized normalization names are collected into one error.
    pub fn stage_descriptors(&self) -> Result<Vec<StageDescriptor>, ReaderError> {
        let mut stages = Vec::with_capacity(self.stages.len());
        let mut unknown = Vec::new();
        for request in &self.stages {
            match request {
                StageRequest::Normalize(name) => match name.parse::<NormalizationForm>() {
                    Ok(form) => stages.push(StageDescriptor::Normalize(form)),
                    Err(name) => unknown.push(name),
                },
                StageRequest::Raw(raw) => stages.push(StageDescriptor::Raw(raw.clone())),
            }
        }
        if unknown.is_empty() {
            Ok(stages)
        } else {
            Err(ReaderError::UnsupportedNormalization(unknown))
        }
    }
}

/// Statistical fallback used when no heuristic matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ClassifierKind {
    /// Frequency based guess from `chardetng`.
    #[default]
    Chardetng,
    /// Never guess; undetected input passes through unchanged.
    None,
}

impl ClassifierKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ClassifierKind::Chardetng => "chardetng",
            ClassifierKind::None => "none",
        }
    }
}

/// `[reader]` table of a settings file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReaderSection {
    #[serde(default)]
    pub peek_size: Option<usize>,
    #[serde(default)]
    pub normalization: Option<Vec<String>>,
}

/// `[detection]` table of a settings file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DetectionSection {
    #[serde(default)]
    pub classifier: Option<ClassifierKind>,
    /// Top-level domain hint handed to the classifier, e.g. "ru".
    #[serde(default)]
    pub tld: Option<String>,
}

/// Settings loaded from TOML files.
///
/// Every field is optional so that later files only override what they set.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReaderSettings {
    #[serde(default)]
    pub reader: ReaderSection,
    #[serde(default)]
    pub detection: DetectionSection,
}

impl ReaderSettings {
    /// Parses settings from TOML content.
    pub fn from_toml(content: &str) -> Result<Self, SettingsError> {
        Ok(toml::from_str(content)?)
    }

    /// Loads the built-in settings.
    pub fn load_default() -> Result<Self, SettingsError> {
        let content = include_str!("../../config/default.toml");
        Self::from_toml(content)
    }

    /// Loads settings from a file path.
    pub fn load_from_file(path: &Path) -> Result<Self, SettingsError> {
        let content = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml(&content)
    }

    /// Loads settings with user overrides from standard locations.
    ///
    /// Searches in priority order:
    /// 1. Built-in settings
    /// 2. `~/.config/utf8-reader/config.toml`
    /// 3. `./utf8-reader.toml`
    ///
    /// Later files override earlier ones field by field. Files that fail to
    /// parse are skipped with a warning.
    pub fn load_with_overrides() -> Result<Self, SettingsError> {
        let mut settings = Self::load_default()?;

        if let Some(config_dir) = dirs::config_dir() {
            let user_path = config_dir.join("utf8-reader").join("config.toml");
            settings.merge_file(&user_path);
        }

        settings.merge_file(Path::new("utf8-reader.toml"));

        Ok(settings)
    }

    fn merge_file(&mut self, path: &Path) {
        if !path.exists() {
            return;
        }
        match Self::load_from_file(path) {
            Ok(other) => {
                log::debug!("merging settings from {}", path.display());
                self.merge(other);
            }
            Err(e) => log::warn!("ignoring settings from {}: {}", path.display(), e),
        }
    }

    /// Merges another settings value into this one.
    ///
    /// Fields set in `other` win.
    pub fn merge(&mut self, other: ReaderSettings) {
        if other.reader.peek_size.is_some() {
            self.reader.peek_size = other.reader.peek_size;
        }
        if other.reader.normalization.is_some() {
            self.reader.normalization = other.reader.normalization;
        }
        if other.detection.classifier.is_some() {
            self.detection.classifier = other.detection.classifier;
        }
        if other.detection.tld.is_some() {
            self.detection.tld = other.detection.tld;
        }
    }

    pub fn peek_size(&self) -> usize {
        self.reader.peek_size.unwrap_or(DEFAULT_PEEK_SIZE)
    }

    pub fn normalization(&self) -> &[String] {
        self.reader.normalization.as_deref().unwrap_or_default()
    }

    pub fn classifier_kind(&self) -> ClassifierKind {
        self.detection.classifier.unwrap_or_default()
    }

    /// Builds the reader configuration these settings describe.
    pub fn reader_config(&self) -> ReaderConfig {
        let mut config = ReaderConfig::new().with_peek_size(self.peek_size());
        for form in self.normalization() {
            config = config.with_normalization(form.clone());
        }
        config
    }

    /// Builds the statistical classifier these settings select.
    pub fn classifier(&self) -> Box<dyn CharsetClassifier> {
        match self.classifier_kind() {
            ClassifierKind::Chardetng => {
                let classifier = match &self.detection.tld {
                    Some(tld) => ChardetClassifier::with_tld(tld),
                    None => ChardetClassifier::new(),
                };
                Box::new(classifier)
            }
            ClassifierKind::None => Box::new(NullClassifier),
        }
    }
}
