//! Language codes and the ordered catalog that intermediate hops cycle through
//!
//! The catalog is fixed once built. The planner picks the language for hop `i`
//! as `catalog[i % len]`, so the order of codes matters.

use crate::error::{MtError, MtResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Language codes offered by LibreTranslate, in the order hops walk them
pub const LIBRE_TRANSLATE_CODES: &[&str] = &[
    "af", "am", "ar", "az", "be", "bg", "bn", "bs", "ca", "ceb", "co", "cs", "cy", "da", "de",
    "el", "en", "eo", "es", "et", "eu", "fa", "fi", "fr", "fy", "ga", "gd", "gl", "gu", "ha",
    "haw", "he", "hi", "hmn", "hr", "ht", "hu", "hy", "id", "ig", "is", "it", "ja", "jw", "ka",
    "kk", "km", "kn", "ko", "ku", "ky", "la", "lb", "lo", "lt", "lv", "mg", "mi", "mk", "ml",
    "mn", "mr", "ms", "mt", "my", "ne", "nl", "no", "ny", "pa", "pl", "ps", "pt", "ro", "ru",
    "rw", "sd", "si", "sk", "sl", "sm", "sn", "so", "sq", "sr", "st", "su", "sv", "sw", "ta",
    "te", "tg", "th", "tk", "tl", "tr", "tt", "ug", "uk", "ur", "uz", "vi", "xh", "yi", "yo",
    "zh", "zu",
];

/// A short language identifier such as `en` or `haw`
///
/// Opaque on purpose: whether a code is usable is decided by catalog
/// membership, not by its shape.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LanguageCode(String);

impl LanguageCode {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LanguageCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for LanguageCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for LanguageCode {
    fn from(code: &str) -> Self {
        Self(code.to_string())
    }
}

impl From<String> for LanguageCode {
    fn from(code: String) -> Self {
        Self(code)
    }
}

/// Ordered, immutable set of supported language codes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageCatalog {
    codes: Vec<LanguageCode>,
}

impl LanguageCatalog {
    /// Build a catalog from an ordered list of codes
    ///
    /// Fails with `ConfigError` when `codes` is empty, since hop selection
    /// cycles over the list.
    pub fn new<I, C>(codes: I) -> MtResult<Self>
    where
        I: IntoIterator<Item = C>,
        C: Into<LanguageCode>,
    {
        let codes: Vec<LanguageCode> = codes.into_iter().map(Into::into).collect();
        if codes.is_empty() {
            return Err(MtError::ConfigError(
                "Language catalog cannot be empty".to_string(),
            ));
        }
        Ok(Self { codes })
    }

    pub fn codes(&self) -> &[LanguageCode] {
        &self.codes
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    /// Always false; construction rejects empty catalogs
    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// Position of `code` in the catalog, first occurrence wins
    pub fn index_of(&self, code: &str) -> Option<usize> {
        self.codes.iter().position(|c| c.as_str() == code)
    }

    pub fn contains(&self, code: &str) -> bool {
        self.index_of(code).is_some()
    }

    /// Code at position `index`, wrapping around the end of the catalog
    pub fn code_at(&self, index: usize) -> &LanguageCode {
        &self.codes[index % self.codes.len()]
    }

    /// Check that `code` is a catalog member
    pub fn validate(&self, code: &LanguageCode) -> MtResult<()> {
        if self.contains(code.as_str()) {
            Ok(())
        } else {
            Err(MtError::InvalidLanguageCode(code.to_string()))
        }
    }
}

impl Default for LanguageCatalog {
    fn default() -> Self {
        Self {
            codes: LIBRE_TRANSLATE_CODES
                .iter()
                .map(|&c| LanguageCode::from(c))
                .collect(),
        }
    }
}
