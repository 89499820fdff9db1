use amo_types::Guid;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::FailureContext;

/// Operation requested from the host extension manager
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HostOperation {
    QueryStatus,
    Install,
    Uninstall,
    Enable,
}

impl fmt::Display for HostOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::QueryStatus => "query_status",
            Self::Install => "install",
            Self::Uninstall => "uninstall",
            Self::Enable => "enable",
        })
    }
}

/// Traffic between the glue layer and the host extension manager
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum HostEvent {
    /// A listener for a global host notification was attached
    ListenerRegistered { event: String },

    /// The host announced a change for an add-on
    NotificationReceived {
        guid: Guid,
        event: String,
        needs_restart: bool,
    },

    /// An operation was sent to the host
    OperationStarted { guid: Guid, operation: HostOperation },

    /// The host finished an operation
    OperationCompleted { guid: Guid, operation: HostOperation },

    /// The user cancelled an operation in the host UI
    OperationCancelled { guid: Guid, operation: HostOperation },

    /// The host failed an operation
    OperationFailed {
        guid: Guid,
        operation: HostOperation,
        failure: FailureContext,
    },
}

impl HostEvent {
    #[must_use]
    pub fn guid(&self) -> Option<&Guid> {
        match self {
            Self::ListenerRegistered { .. } => None,
            Self::NotificationReceived { guid, .. }
            | Self::OperationStarted { guid, .. }
            | Self::OperationCompleted { guid, .. }
            | Self::OperationCancelled { guid, .. }
            | Self::OperationFailed { guid, .. } => Some(guid),
        }
    }
}
