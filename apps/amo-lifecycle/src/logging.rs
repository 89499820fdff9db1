//! Structured logging integration for events
//!
//! Every event the libraries emit is turned into a tracing record with
//! structured fields, so `--debug` and JSON log output show the full
//! lifecycle.

use amo_events::{AppEvent, EventMessage, GeneralEvent, HostEvent, InstallationEvent};
use tracing::{debug, error, info, warn};

/// Log an `EventMessage` using the tracing infrastructure with structured fields
pub fn log_event_with_tracing(message: &EventMessage) {
    let meta = &message.meta;
    match &message.event {
        AppEvent::Installation(event) => match event {
            InstallationEvent::StateChanged {
                guid,
                from,
                to,
                action,
            } => {
                info!(
                    source = meta.source.as_str(),
                    event_id = %meta.event_id,
                    correlation = ?meta.correlation_id,
                    guid = %guid,
                    from = ?from,
                    to = %to,
                    action = %action,
                    "Installation state changed"
                );
            }
            InstallationEvent::ProgressUpdated { guid, progress } => {
                debug!(
                    source = meta.source.as_str(),
                    event_id = %meta.event_id,
                    guid = %guid,
                    progress = progress.value(),
                    "Download progress"
                );
            }
            InstallationEvent::Failed { guid, error } => {
                warn!(
                    source = meta.source.as_str(),
                    event_id = %meta.event_id,
                    correlation = ?meta.correlation_id,
                    guid = %guid,
                    error = %error,
                    "Installation failed"
                );
            }
            InstallationEvent::UsageError {
                guid,
                action,
                failure,
            } => {
                error!(
                    source = meta.source.as_str(),
                    event_id = %meta.event_id,
                    correlation = ?meta.correlation_id,
                    guid = %guid,
                    action = %action,
                    code = ?failure.code,
                    message = %failure.message,
                    hint = ?failure.hint,
                    "Install action misused"
                );
            }
            InstallationEvent::Reset { cleared } => {
                info!(
                    source = meta.source.as_str(),
                    event_id = %meta.event_id,
                    cleared = cleared,
                    "Installation table reset"
                );
            }
        },

        AppEvent::Host(event) => match event {
            HostEvent::OperationFailed {
                guid,
                operation,
                failure,
            } => {
                error!(
                    source = meta.source.as_str(),
                    event_id = %meta.event_id,
                    correlation = ?meta.correlation_id,
                    guid = %guid,
                    operation = %operation,
                    retryable = failure.retryable,
                    code = ?failure.code,
                    message = %failure.message,
                    "Host operation failed"
                );
            }
            other => {
                info!(
                    source = meta.source.as_str(),
                    event_id = %meta.event_id,
                    correlation = ?meta.correlation_id,
                    event = ?other,
                    "Host event"
                );
            }
        },

        AppEvent::General(GeneralEvent::Warning { message, context }) => {
            warn!(
                source = meta.source.as_str(),
                event_id = %meta.event_id,
                correlation = ?meta.correlation_id,
                message = %message,
                context = ?context,
                "Warning"
            );
        }
    }
}
