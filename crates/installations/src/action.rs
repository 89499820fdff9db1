//! Lifecycle actions
//!
//! Each variant carries exactly the fields its transition needs. Guids and
//! percentages are validated when built, whether through the constructors
//! here or through deserialization.

use amo_errors::LifecycleError;
use amo_types::{Guid, InstallErrorCode, InstallStatus, Percent};
use serde::{Deserialize, Serialize};

use crate::record::InstalledAddon;

/// Payload of an `INSTALL_STATE` action: the full replacement record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstallState {
    pub guid: Guid,
    pub status: InstallStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<InstallErrorCode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Defaults to `true` when the host did not say otherwise
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub can_uninstall: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub needs_restart: Option<bool>,
}

impl InstallState {
    #[must_use]
    pub fn new(guid: Guid, status: InstallStatus) -> Self {
        Self {
            guid,
            status,
            error: None,
            url: None,
            version: None,
            name: None,
            can_uninstall: None,
            needs_restart: None,
        }
    }

    #[must_use]
    pub fn with_error(mut self, error: impl Into<InstallErrorCode>) -> Self {
        self.error = Some(error.into());
        self
    }

    #[must_use]
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    #[must_use]
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn with_can_uninstall(mut self, can_uninstall: bool) -> Self {
        self.can_uninstall = Some(can_uninstall);
        self
    }

    #[must_use]
    pub fn with_needs_restart(mut self, needs_restart: bool) -> Self {
        self.needs_restart = Some(needs_restart);
        self
    }

    /// An error code is only meaningful on an `Error` record.
    ///
    /// # Errors
    ///
    /// Returns `LifecycleError::UnexpectedError` when an error code is set
    /// on any other status.
    pub fn validate(&self) -> Result<(), LifecycleError> {
        if self.error.is_some() && self.status != InstallStatus::Error {
            return Err(LifecycleError::UnexpectedError {
                guid: self.guid.to_string(),
                status: self.status.to_string(),
            });
        }
        Ok(())
    }

    pub(crate) fn into_record(self) -> InstalledAddon {
        InstalledAddon {
            guid: self.guid,
            status: self.status,
            download_progress: Percent::ZERO,
            error: self.error,
            can_uninstall: self.can_uninstall.unwrap_or(true),
            needs_restart: self.needs_restart.unwrap_or(false),
            url: self.url,
            version: self.version,
            name: self.name,
        }
    }
}

/// A lifecycle event applied to the installation table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InstallAction {
    /// Create or fully replace the record for `guid`
    #[serde(rename = "INSTALL_STATE")]
    SetInstallState(InstallState),

    StartDownload {
        guid: Guid,
    },

    DownloadProgress {
        guid: Guid,
        #[serde(rename = "downloadProgress")]
        progress: Percent,
    },

    InstallComplete {
        guid: Guid,
    },

    UninstallComplete {
        guid: Guid,
    },

    InstallCancelled {
        guid: Guid,
    },

    InstallError {
        guid: Guid,
        error: InstallErrorCode,
    },
}

impl InstallAction {
    /// Build an `INSTALL_STATE` action.
    ///
    /// # Errors
    ///
    /// Returns an error if the payload carries an error code without an
    /// `Error` status.
    pub fn set_install_state(state: InstallState) -> Result<Self, LifecycleError> {
        state.validate()?;
        Ok(Self::SetInstallState(state))
    }

    #[must_use]
    pub fn start_download(guid: Guid) -> Self {
        Self::StartDownload { guid }
    }

    /// Build a `DOWNLOAD_PROGRESS` action.
    ///
    /// # Errors
    ///
    /// Returns `LifecycleError::ProgressOutOfRange` for values outside `0..=100`.
    pub fn download_progress(guid: Guid, progress: i64) -> Result<Self, LifecycleError> {
        match Percent::new(progress) {
            Ok(progress) => Ok(Self::DownloadProgress { guid, progress }),
            Err(_) => Err(LifecycleError::ProgressOutOfRange {
                guid: guid.to_string(),
                value: progress,
            }),
        }
    }

    #[must_use]
    pub fn install_complete(guid: Guid) -> Self {
        Self::InstallComplete { guid }
    }

    #[must_use]
    pub fn uninstall_complete(guid: Guid) -> Self {
        Self::UninstallComplete { guid }
    }

    #[must_use]
    pub fn install_cancelled(guid: Guid) -> Self {
        Self::InstallCancelled { guid }
    }

    #[must_use]
    pub fn install_error(guid: Guid, error: impl Into<InstallErrorCode>) -> Self {
        Self::InstallError {
            guid,
            error: error.into(),
        }
    }

    /// The add-on this action targets
    #[must_use]
    pub fn guid(&self) -> &Guid {
        match self {
            Self::SetInstallState(state) => &state.guid,
            Self::StartDownload { guid }
            | Self::DownloadProgress { guid, .. }
            | Self::InstallComplete { guid }
            | Self::UninstallComplete { guid }
            | Self::InstallCancelled { guid }
            | Self::InstallError { guid, .. } => guid,
        }
    }

    /// Stable action tag, matching the serialized `type` field
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::SetInstallState(_) => "INSTALL_STATE",
            Self::StartDownload { .. } => "START_DOWNLOAD",
            Self::DownloadProgress { .. } => "DOWNLOAD_PROGRESS",
            Self::InstallComplete { .. } => "INSTALL_COMPLETE",
            Self::UninstallComplete { .. } => "UNINSTALL_COMPLETE",
            Self::InstallCancelled { .. } => "INSTALL_CANCELLED",
            Self::InstallError { .. } => "INSTALL_ERROR",
        }
    }
}
