//! The per-add-on installation record

use amo_types::{Guid, InstallErrorCode, InstallStatus, Percent};
use serde::Serialize;

/// What the application currently knows about one add-on's installation.
///
/// Records are created and replaced by `INSTALL_STATE` and changed only by
/// the reducer; everything else sees them through shared references.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InstalledAddon {
    pub guid: Guid,
    pub status: InstallStatus,
    /// Only non-zero while `status` is `Downloading`
    pub download_progress: Percent,
    /// Only present while `status` is `Error`
    pub error: Option<InstallErrorCode>,
    pub can_uninstall: bool,
    /// The browser must restart to finish the current transition
    pub needs_restart: bool,
    pub url: Option<String>,
    pub version: Option<String>,
    pub name: Option<String>,
}

impl InstalledAddon {
    /// Move to a settled status, dropping progress and any stored error
    pub(crate) fn settle(&mut self, status: InstallStatus) {
        self.status = status;
        self.download_progress = Percent::ZERO;
        self.error = None;
    }
}
