//! Download progress values

use amo_errors::LifecycleError;
use serde::{Deserialize, Serialize};

/// Whole percentage in `0..=100`
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(try_from = "i64", into = "u8")]
pub struct Percent(u8);

impl Percent {
    pub const ZERO: Self = Self(0);
    pub const FULL: Self = Self(100);

    /// Create a percentage.
    ///
    /// # Errors
    ///
    /// Returns `LifecycleError::InvalidPercent` when `value` is outside `0..=100`.
    pub fn new(value: i64) -> Result<Self, LifecycleError> {
        u8::try_from(value)
            .ok()
            .filter(|percent| *percent <= 100)
            .map(Self)
            .ok_or(LifecycleError::InvalidPercent { value })
    }

    #[must_use]
    pub fn value(self) -> u8 {
        self.0
    }
}

impl TryFrom<i64> for Percent {
    type Error = LifecycleError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Percent> for u8 {
    fn from(percent: Percent) -> Self {
        percent.0
    }
}

impl std::fmt::Display for Percent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}%", self.0)
    }
}

/// Progress as seen by a progress indicator.
///
/// Installing and enabling have no measurable progress and are shown as a
/// bar moving forward; uninstalling is shown as a bar moving backward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum DownloadProgress {
    Percent(Percent),
    /// Forward-indeterminate, rendered as full
    Filling,
    /// Backward-indeterminate, rendered as empty
    Emptying,
}

impl DownloadProgress {
    /// Percentage to draw for this progress value
    #[must_use]
    pub fn rendered_percent(self) -> u8 {
        match self {
            Self::Percent(percent) => percent.value(),
            Self::Filling => 100,
            Self::Emptying => 0,
        }
    }

    #[must_use]
    pub fn is_indeterminate(self) -> bool {
        !matches!(self, Self::Percent(_))
    }
}
