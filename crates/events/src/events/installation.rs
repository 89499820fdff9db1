use amo_types::{Guid, InstallErrorCode, InstallStatus, Percent};
use serde::{Deserialize, Serialize};

use super::FailureContext;

/// Changes to the tracked installation table
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum InstallationEvent {
    /// A record was created or its status changed
    StateChanged {
        guid: Guid,
        /// `None` when the record did not exist before
        from: Option<InstallStatus>,
        to: InstallStatus,
        action: String,
    },

    /// Download progress moved for a record that is downloading
    ProgressUpdated { guid: Guid, progress: Percent },

    /// The host reported a download, install or uninstall failure
    Failed { guid: Guid, error: InstallErrorCode },

    /// An action was delivered that the record cannot accept
    UsageError {
        guid: Guid,
        action: String,
        failure: FailureContext,
    },

    /// The whole table was dropped (navigation, reload)
    Reset { cleared: usize },
}

impl InstallationEvent {
    #[must_use]
    pub fn guid(&self) -> Option<&Guid> {
        match self {
            Self::StateChanged { guid, .. }
            | Self::ProgressUpdated { guid, .. }
            | Self::Failed { guid, .. }
            | Self::UsageError { guid, .. } => Some(guid),
            Self::Reset { .. } => None,
        }
    }
}
