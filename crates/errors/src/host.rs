//! Host extension manager error types

use std::borrow::Cow;

use crate::UserFacingError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum HostError {
    #[error("no add-on manager is available")]
    ManagerUnavailable,

    #[error("add-on not found: {guid}")]
    AddonNotFound { guid: String },

    #[error("enabling is not available for {guid}")]
    EnableNotAvailable { guid: String },

    #[error("unknown add-on manager event: {name}")]
    UnknownEvent { name: String },

    #[error("no install URL for {guid}")]
    MissingInstallUrl { guid: String },

    #[error("install of {guid} failed: {message}")]
    InstallFailed { guid: String, message: String },

    #[error("uninstall of {guid} failed: {message}")]
    UninstallFailed { guid: String, message: String },

    #[error("add-on manager failure: {message}")]
    Failed { message: String },
}

impl UserFacingError for HostError {
    fn user_message(&self) -> Cow<'_, str> {
        Cow::Owned(self.to_string())
    }

    fn user_hint(&self) -> Option<&'static str> {
        match self {
            Self::ManagerUnavailable => {
                Some("Add-on management is only available inside a supporting browser.")
            }
            Self::MissingInstallUrl { .. } => {
                Some("No file is published for this platform; try another version.")
            }
            _ => None,
        }
    }

    fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::InstallFailed { .. } | Self::UninstallFailed { .. } | Self::Failed { .. }
        )
    }

    fn user_code(&self) -> Option<&'static str> {
        let code = match self {
            Self::ManagerUnavailable => "host.manager_unavailable",
            Self::AddonNotFound { .. } => "host.addon_not_found",
            Self::EnableNotAvailable { .. } => "host.enable_not_available",
            Self::UnknownEvent { .. } => "host.unknown_event",
            Self::MissingInstallUrl { .. } => "host.missing_install_url",
            Self::InstallFailed { .. } => "host.install_failed",
            Self::UninstallFailed { .. } => "host.uninstall_failed",
            Self::Failed { .. } => "host.failed",
        };
        Some(code)
    }
}
