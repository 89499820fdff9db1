//! Session-owned installation store
//!
//! The store is the one writer of the table. It decides what a usage error
//! does (panic or log), and publishes every accepted change as an
//! [`InstallationEvent`].

use amo_config::{LifecycleConfig, UsageErrorPolicy};
use amo_errors::LifecycleError;
use amo_events::{EventEmitter, EventSender, FailureContext, InstallationEvent};
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};
use tracing::{debug, error, warn};

use crate::action::InstallAction;
use crate::reducer::{Installations, Transition};

/// Producer half for actions raised by asynchronous host callbacks
pub type ActionSender = UnboundedSender<InstallAction>;

/// Consumer half drained by [`run_dispatcher`]
pub type ActionReceiver = UnboundedReceiver<InstallAction>;

#[must_use]
pub fn action_channel() -> (ActionSender, ActionReceiver) {
    tokio::sync::mpsc::unbounded_channel()
}

/// Owns the installation table for one application session
#[derive(Debug)]
pub struct InstallationStore {
    state: Installations,
    policy: UsageErrorPolicy,
    events: Option<EventSender>,
}

impl InstallationStore {
    #[must_use]
    pub fn new(policy: UsageErrorPolicy) -> Self {
        Self {
            state: Installations::new(),
            policy,
            events: None,
        }
    }

    /// Build a store from lifecycle configuration. `events` is ignored when
    /// event emission is switched off.
    #[must_use]
    pub fn from_config(config: &LifecycleConfig, events: Option<EventSender>) -> Self {
        Self {
            state: Installations::new(),
            policy: config.usage_errors,
            events: events.filter(|_| config.emit_events),
        }
    }

    #[must_use]
    pub fn with_events(mut self, events: EventSender) -> Self {
        self.events = Some(events);
        self
    }

    #[must_use]
    pub fn state(&self) -> &Installations {
        &self.state
    }

    #[must_use]
    pub fn policy(&self) -> UsageErrorPolicy {
        self.policy
    }

    /// Apply one action and publish what changed.
    ///
    /// # Errors
    ///
    /// Returns the reducer's error when the action is rejected. The table is
    /// unchanged in that case.
    ///
    /// # Panics
    ///
    /// Panics on a usage error (an action for a guid that was never
    /// recorded) when the policy is [`UsageErrorPolicy::Panic`].
    pub fn dispatch(&mut self, action: &InstallAction) -> Result<Transition, LifecycleError> {
        match self.state.apply(action) {
            Ok(transition) => {
                debug!(
                    guid = %transition.guid,
                    action = action.kind(),
                    from = ?transition.from,
                    to = %transition.to,
                    "applied install action"
                );
                self.publish(action, &transition);
                Ok(transition)
            }
            Err(err) if err.is_usage_error() => Err(self.usage_error(action, err)),
            Err(err) => {
                warn!(guid = %action.guid(), action = action.kind(), error = %err, "rejected install action");
                self.emit_warning_with_context(
                    format!("rejected {} action", action.kind()),
                    err.to_string(),
                );
                Err(err)
            }
        }
    }

    /// Forget every record, e.g. when the session navigates away
    pub fn reset(&mut self) -> usize {
        let cleared = self.state.clear();
        debug!(cleared, "installation table reset");
        self.emit_installation(InstallationEvent::Reset { cleared });
        cleared
    }

    fn usage_error(&self, action: &InstallAction, err: LifecycleError) -> LifecycleError {
        error!(guid = %action.guid(), action = action.kind(), error = %err, "install action misused");
        self.emit_installation(InstallationEvent::UsageError {
            guid: action.guid().clone(),
            action: action.kind().to_string(),
            failure: FailureContext::from_error(&err),
        });
        if self.policy == UsageErrorPolicy::Panic {
            panic!("{err} (while applying {})", action.kind());
        }
        err
    }

    fn publish(&self, action: &InstallAction, transition: &Transition) {
        if matches!(action, InstallAction::SetInstallState(_)) || transition.is_change() {
            self.emit_installation(InstallationEvent::StateChanged {
                guid: transition.guid.clone(),
                from: transition.from,
                to: transition.to,
                action: action.kind().to_string(),
            });
        }
        match action {
            InstallAction::DownloadProgress { guid, progress } => {
                self.emit_installation(InstallationEvent::ProgressUpdated {
                    guid: guid.clone(),
                    progress: *progress,
                });
            }
            InstallAction::InstallError { guid, error } => {
                self.emit_installation(InstallationEvent::Failed {
                    guid: guid.clone(),
                    error: error.clone(),
                });
            }
            _ => {}
        }
    }
}

impl EventEmitter for InstallationStore {
    fn event_sender(&self) -> Option<&EventSender> {
        self.events.as_ref()
    }
}

/// Apply actions from `actions` one at a time until every sender is gone.
///
/// Rejected actions are already logged by the store and do not stop the
/// loop. Returns how many actions were applied.
pub async fn run_dispatcher(store: &mut InstallationStore, mut actions: ActionReceiver) -> usize {
    let mut applied = 0;
    while let Some(action) = actions.recv().await {
        if store.dispatch(&action).is_ok() {
            applied += 1;
        }
    }
    debug!(applied, "action channel closed");
    applied
}
