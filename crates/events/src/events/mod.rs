use amo_types::Guid;
use serde::{Deserialize, Serialize};

use crate::EventSource;
use amo_errors::UserFacingError;

/// Structured failure information shared across domains.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailureContext {
    /// Stable error code, when the error has one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    /// Short user-facing message.
    pub message: String,
    /// Optional remediation hint.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
    /// Whether retrying the operation might succeed.
    pub retryable: bool,
}

impl FailureContext {
    /// Construct a new failure context.
    #[must_use]
    pub fn new(
        code: Option<impl Into<String>>,
        message: impl Into<String>,
        hint: Option<impl Into<String>>,
        retryable: bool,
    ) -> Self {
        Self {
            code: code.map(Into::into),
            message: message.into(),
            hint: hint.map(Into::into),
            retryable,
        }
    }

    /// Build failure context from a `UserFacingError` implementation.
    #[must_use]
    pub fn from_error<E: UserFacingError + ?Sized>(error: &E) -> Self {
        Self::new(
            error.user_code(),
            error.user_message().into_owned(),
            error.user_hint(),
            error.is_retryable(),
        )
    }
}

pub mod general;
pub mod host;
pub mod installation;

pub use general::*;
pub use host::*;
pub use installation::*;

/// Top-level application event enum that aggregates all domain-specific events
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "domain", content = "event", rename_all = "snake_case")]
pub enum AppEvent {
    /// General utility events (warnings, errors, debug output)
    General(GeneralEvent),

    /// Tracked installation state changes
    Installation(InstallationEvent),

    /// Host extension manager notifications and requests
    Host(HostEvent),
}

impl AppEvent {
    /// Identify the source domain for this event (used for metadata/logging).
    #[must_use]
    pub fn event_source(&self) -> EventSource {
        match self {
            Self::General(_) => EventSource::GENERAL,
            Self::Installation(_) => EventSource::INSTALLATIONS,
            Self::Host(_) => EventSource::HOST,
        }
    }

    /// Add-on this event is about, if any
    #[must_use]
    pub fn guid(&self) -> Option<&Guid> {
        match self {
            Self::General(_) => None,
            Self::Installation(event) => event.guid(),
            Self::Host(event) => event.guid(),
        }
    }

    /// Determine the appropriate tracing log level for this event
    #[must_use]
    pub fn log_level(&self) -> tracing::Level {
        use tracing::Level;

        match self {
            Self::Installation(InstallationEvent::UsageError { .. })
            | Self::Host(HostEvent::OperationFailed { .. }) => Level::ERROR,

            Self::General(GeneralEvent::Warning { .. })
            | Self::Installation(InstallationEvent::Failed { .. })
            | Self::Host(HostEvent::OperationCancelled { .. }) => Level::WARN,

            Self::Installation(InstallationEvent::ProgressUpdated { .. })
            | Self::Host(HostEvent::ListenerRegistered { .. }) => Level::DEBUG,

            _ => Level::INFO,
        }
    }

    /// Get the log target for this event (for structured logging)
    #[must_use]
    pub fn log_target(&self) -> &'static str {
        match self {
            Self::General(_) => "amo::events::general",
            Self::Installation(_) => "amo::events::installations",
            Self::Host(_) => "amo::events::host",
        }
    }
}
