//! Add-on identity types

use std::borrow::Borrow;
use std::fmt;
use std::str::FromStr;

use amo_errors::LifecycleError;
use serde::{Deserialize, Serialize};

/// Stable identifier of a browser extension (not its human-facing slug).
///
/// A `Guid` is never empty; construction and deserialization both reject
/// blank values so a malformed payload cannot reach the reducer.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Guid(String);

impl Guid {
    /// Create a guid from any stringy input.
    ///
    /// # Errors
    ///
    /// Returns `LifecycleError::EmptyGuid` when the value is blank.
    pub fn new(value: impl Into<String>) -> Result<Self, LifecycleError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(LifecycleError::EmptyGuid);
        }
        Ok(Self(value))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Guid {
    type Error = LifecycleError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl FromStr for Guid {
    type Err = LifecycleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl From<Guid> for String {
    fn from(guid: Guid) -> Self {
        guid.0
    }
}

impl Borrow<str> for Guid {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Guid {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Guid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Kind of add-on as published on the marketplace
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AddonType {
    #[serde(rename = "extension")]
    Extension,
    #[serde(rename = "statictheme")]
    StaticTheme,
    #[serde(rename = "dictionary")]
    Dictionary,
    #[serde(rename = "language")]
    LanguagePack,
}

impl AddonType {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Extension => "extension",
            Self::StaticTheme => "statictheme",
            Self::Dictionary => "dictionary",
            Self::LanguagePack => "language",
        }
    }
}

impl Default for AddonType {
    fn default() -> Self {
        Self::Extension
    }
}

impl fmt::Display for AddonType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
