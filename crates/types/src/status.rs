//! Install status and install error code definitions

use std::fmt;
use std::str::FromStr;

use amo_errors::LifecycleError;
use serde::{Deserialize, Serialize};

/// Tracked installation status of an add-on
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InstallStatus {
    /// Nothing is known about the add-on yet
    #[default]
    Unknown,
    Uninstalled,
    Installing,
    Installed,
    Enabled,
    Enabling,
    Disabled,
    Disabling,
    Uninstalling,
    Downloading,
    Error,
    /// Installed and enabled but not active (never used for static themes)
    Inactive,
}

impl InstallStatus {
    pub const ALL: [Self; 12] = [
        Self::Unknown,
        Self::Uninstalled,
        Self::Installing,
        Self::Installed,
        Self::Enabled,
        Self::Enabling,
        Self::Disabled,
        Self::Disabling,
        Self::Uninstalling,
        Self::Downloading,
        Self::Error,
        Self::Inactive,
    ];

    /// Stable string tag, matching the serialized form
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unknown => "UNKNOWN",
            Self::Uninstalled => "UNINSTALLED",
            Self::Installing => "INSTALLING",
            Self::Installed => "INSTALLED",
            Self::Enabled => "ENABLED",
            Self::Enabling => "ENABLING",
            Self::Disabled => "DISABLED",
            Self::Disabling => "DISABLING",
            Self::Uninstalling => "UNINSTALLING",
            Self::Downloading => "DOWNLOADING",
            Self::Error => "ERROR",
            Self::Inactive => "INACTIVE",
        }
    }

    /// Whether an operation is in flight for this status
    #[must_use]
    pub fn is_transitional(&self) -> bool {
        matches!(
            self,
            Self::Downloading
                | Self::Installing
                | Self::Enabling
                | Self::Disabling
                | Self::Uninstalling
        )
    }
}

impl fmt::Display for InstallStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InstallStatus {
    type Err = LifecycleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| LifecycleError::UnknownStatus {
                value: s.to_string(),
            })
    }
}

/// Error code reported for a failed download, install or uninstall.
///
/// Codes the presentation layer knows how to explain have their own variant;
/// anything else reported by the host is carried through as `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum InstallErrorCode {
    DownloadFailed,
    InstallFailed,
    CorruptFile,
    FatalInstall,
    FatalUninstall,
    Fatal,
    Other(String),
}

impl InstallErrorCode {
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::DownloadFailed => "DOWNLOAD_FAILED",
            Self::InstallFailed => "INSTALL_FAILED",
            Self::CorruptFile => "ERROR_CORRUPT_FILE",
            Self::FatalInstall => "FATAL_INSTALL_ERROR",
            Self::FatalUninstall => "FATAL_UNINSTALL_ERROR",
            Self::Fatal => "FATAL_ERROR",
            Self::Other(code) => code,
        }
    }
}

impl From<&str> for InstallErrorCode {
    fn from(value: &str) -> Self {
        match value {
            "DOWNLOAD_FAILED" => Self::DownloadFailed,
            "INSTALL_FAILED" => Self::InstallFailed,
            "ERROR_CORRUPT_FILE" => Self::CorruptFile,
            "FATAL_INSTALL_ERROR" => Self::FatalInstall,
            "FATAL_UNINSTALL_ERROR" => Self::FatalUninstall,
            "FATAL_ERROR" => Self::Fatal,
            other => Self::Other(other.to_string()),
        }
    }
}

impl From<String> for InstallErrorCode {
    fn from(value: String) -> Self {
        Self::from(value.as_str())
    }
}

impl From<InstallErrorCode> for String {
    fn from(code: InstallErrorCode) -> Self {
        match code {
            InstallErrorCode::Other(code) => code,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for InstallErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
