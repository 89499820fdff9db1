//! Installation lifecycle error types

use std::borrow::Cow;

use crate::UserFacingError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LifecycleError {
    #[error("no add-on with guid {guid} found")]
    UnknownAddon { guid: String },

    #[error("add-on {guid} is not downloading (status: {status})")]
    NotDownloading { guid: String, status: String },

    #[error("download progress for {guid} out of range: {value} (expected 0..=100)")]
    ProgressOutOfRange { guid: String, value: i64 },

    #[error("invalid percentage: {value} (expected 0..=100)")]
    InvalidPercent { value: i64 },

    #[error("add-on guid must not be empty")]
    EmptyGuid,

    #[error("add-on {guid} carries an error but its status is {status}")]
    UnexpectedError { guid: String, status: String },

    #[error("unknown install status: {value}")]
    UnknownStatus { value: String },
}

impl LifecycleError {
    /// Errors caused by the caller addressing an add-on that was never
    /// recorded. These are programmer errors, not user-visible ones.
    ///
    /// Late progress for a record that already left DOWNLOADING is rejected
    /// too, but it is a delivery race rather than a caller bug.
    #[must_use]
    pub fn is_usage_error(&self) -> bool {
        matches!(self, Self::UnknownAddon { .. })
    }
}

impl UserFacingError for LifecycleError {
    fn user_message(&self) -> Cow<'_, str> {
        Cow::Owned(self.to_string())
    }

    fn user_hint(&self) -> Option<&'static str> {
        match self {
            Self::UnknownAddon { .. } => {
                Some("Record the add-on with an INSTALL_STATE action before updating it.")
            }
            Self::NotDownloading { .. } => {
                Some("Send START_DOWNLOAD before reporting download progress.")
            }
            Self::ProgressOutOfRange { .. } | Self::InvalidPercent { .. } => {
                Some("Report progress as a whole percentage between 0 and 100.")
            }
            _ => None,
        }
    }

    fn user_code(&self) -> Option<&'static str> {
        let code = match self {
            Self::UnknownAddon { .. } => "lifecycle.unknown_addon",
            Self::NotDownloading { .. } => "lifecycle.not_downloading",
            Self::ProgressOutOfRange { .. } => "lifecycle.progress_out_of_range",
            Self::InvalidPercent { .. } => "lifecycle.invalid_percent",
            Self::EmptyGuid => "lifecycle.empty_guid",
            Self::UnexpectedError { .. } => "lifecycle.unexpected_error",
            Self::UnknownStatus { .. } => "lifecycle.unknown_status",
        };
        Some(code)
    }
}
