//! Global change notifications from the host

use std::sync::Arc;

use amo_errors::HostError;
use amo_events::{EventEmitter, EventSender, HostEvent};
use amo_installations::{ActionSender, InstallAction, InstallState};
use amo_types::Guid;
use tracing::{error, info};

use crate::manager::AddonManager;
use crate::send_action;
use crate::status::{addon_status, GlobalEvent};

/// A host notification about one add-on
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeEvent {
    pub guid: Guid,
    /// Host event name, e.g. `onEnabled`
    pub event: String,
    pub needs_restart: bool,
}

/// Keeps the store in step with changes made outside the application
pub struct ChangeListener {
    manager: Arc<dyn AddonManager>,
    actions: ActionSender,
    events: Option<EventSender>,
}

impl ChangeListener {
    #[must_use]
    pub fn new(manager: Arc<dyn AddonManager>, actions: ActionSender) -> Self {
        Self {
            manager,
            actions,
            events: None,
        }
    }

    #[must_use]
    pub fn with_events(mut self, events: EventSender) -> Self {
        self.events = Some(events);
        self
    }

    /// The notifications this listener handles. Call once when attaching to
    /// the host.
    pub fn register(&self) -> Vec<GlobalEvent> {
        for event in GlobalEvent::ALL {
            info!(event = event.name(), "adding host event listener");
            self.emit_host(HostEvent::ListenerRegistered {
                event: event.name().to_string(),
            });
        }
        GlobalEvent::ALL.to_vec()
    }

    /// Record the add-on's new state.
    ///
    /// # Errors
    ///
    /// Fails for unknown event names, and when the host cannot return an
    /// add-on it should know about. Nothing is dispatched in either case.
    pub async fn handle(&self, change: &ChangeEvent) -> Result<InstallAction, HostError> {
        let event: GlobalEvent = change.event.parse()?;
        info!(
            guid = %change.guid,
            event = event.name(),
            needs_restart = change.needs_restart,
            "host event received"
        );
        self.emit_host(HostEvent::NotificationReceived {
            guid: change.guid.clone(),
            event: event.name().to_string(),
            needs_restart: change.needs_restart,
        });

        let (status, can_uninstall) = if event.addon_queryable() {
            let addon = self.manager.get_addon(&change.guid).await.inspect_err(|err| {
                error!(guid = %change.guid, event = event.name(), error = %err, "could not read add-on after host event");
            })?;
            let status = event
                .status()
                .unwrap_or_else(|| addon_status(&addon, None));
            (status, addon.can_uninstall)
        } else {
            // Not installed yet or already gone; assume it can be removed.
            let status = event.status().unwrap_or_default();
            (status, true)
        };

        let action = InstallAction::SetInstallState(
            InstallState::new(change.guid.clone(), status)
                .with_needs_restart(change.needs_restart)
                .with_can_uninstall(can_uninstall),
        );
        send_action(&self.actions, action.clone());
        Ok(action)
    }
}

impl EventEmitter for ChangeListener {
    fn event_sender(&self) -> Option<&EventSender> {
        self.events.as_ref()
    }
}
