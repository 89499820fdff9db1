//! The host extension manager interface

use amo_errors::HostError;
use amo_types::Guid;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// An add-on as the host sees it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HostAddon {
    pub guid: Guid,
    pub name: String,
    pub version: String,
    pub is_active: bool,
    pub is_enabled: bool,
    pub can_uninstall: bool,
}

/// What to install
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallRequest {
    pub url: String,
    /// Expected file hash, checked by the host
    pub hash: Option<String>,
}

/// State of a running install, as reported alongside each install event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallPhase {
    Available,
    Downloading,
    Downloaded,
    DownloadFailed,
    Installing,
    Installed,
    InstallFailed,
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InstallSnapshot {
    pub phase: InstallPhase,
    pub progress: u64,
    /// Zero when the host does not know the download size
    pub max_progress: u64,
}

/// Per-install notifications
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstallEventKind {
    DownloadStarted,
    DownloadProgress,
    DownloadEnded,
    DownloadCancelled,
    /// `error` is the host's own error code, when it gave one
    DownloadFailed { error: Option<String> },
    InstallStarted,
    InstallProgress,
    InstallEnded,
    InstallCancelled,
    InstallFailed,
}

/// How a host install finished when it did not fail
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallOutcome {
    Installed,
    /// The user dismissed the install in the host UI
    Cancelled,
}

/// Receives every install event for one install, in order
pub trait InstallObserver: Send + Sync {
    fn on_event(&self, install: &InstallSnapshot, event: &InstallEventKind);
}

/// The browser's extension manager
#[async_trait]
pub trait AddonManager: Send + Sync {
    /// Look up an installed add-on.
    ///
    /// Fails with `HostError::AddonNotFound` when the host has no such add-on.
    async fn get_addon(&self, guid: &Guid) -> Result<HostAddon, HostError>;

    /// Download and install, reporting progress to `observer`
    async fn install(
        &self,
        request: InstallRequest,
        observer: &dyn InstallObserver,
    ) -> Result<InstallOutcome, HostError>;

    async fn uninstall(&self, guid: &Guid) -> Result<(), HostError>;

    /// Fails with `HostError::EnableNotAvailable` when the host cannot
    /// toggle this add-on.
    async fn set_enabled(&self, guid: &Guid, enabled: bool) -> Result<(), HostError>;

    /// Whether the host shows its own permission prompts on install
    fn has_permission_prompts(&self) -> bool;
}
