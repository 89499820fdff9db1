//! Event handling and status display

use amo_events::{AppEvent, EventMessage, InstallationEvent};
use console::Style;

use crate::logging::log_event_with_tracing;

/// Logs every event and, in debug mode, echoes state changes to stderr
pub struct EventHandler {
    colors_enabled: bool,
    debug_enabled: bool,
}

impl EventHandler {
    pub fn new(colors_enabled: bool, debug_enabled: bool) -> Self {
        Self {
            colors_enabled,
            debug_enabled,
        }
    }

    pub fn handle_event(&mut self, message: EventMessage) {
        log_event_with_tracing(&message);
        if !self.debug_enabled {
            return;
        }

        if let Some(line) = describe(&message.event) {
            if self.colors_enabled {
                eprintln!("{}", Style::new().dim().apply_to(line));
            } else {
                eprintln!("{line}");
            }
        }
    }
}

/// One-line description of the events worth echoing
fn describe(event: &AppEvent) -> Option<String> {
    match event {
        AppEvent::Installation(InstallationEvent::StateChanged {
            guid,
            from: Some(from),
            to,
            ..
        }) => Some(format!("{guid}: {from} -> {to}")),
        AppEvent::Installation(InstallationEvent::StateChanged {
            guid,
            from: None,
            to,
            ..
        }) => Some(format!("{guid}: tracked as {to}")),
        AppEvent::Installation(InstallationEvent::UsageError { guid, action, failure }) => {
            Some(format!("{guid}: {action} rejected: {}", failure.message))
        }
        _ => None,
    }
}
