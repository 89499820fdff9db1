//! Install, uninstall and enable operations for a single add-on

use std::sync::Arc;

use amo_errors::HostError;
use amo_events::{EventEmitter, EventSender, FailureContext, HostEvent, HostOperation};
use amo_installations::{ActionSender, InstallAction, InstallState};
use amo_types::{AddonType, Guid, InstallErrorCode, InstallStatus};
use tracing::{debug, error, info};

use crate::manager::{AddonManager, InstallOutcome, InstallRequest};
use crate::progress::ProgressHandler;
use crate::send_action;
use crate::status::addon_status;

/// What the application knows about an add-on from its listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddonInfo {
    pub guid: Guid,
    pub name: String,
    pub addon_type: AddonType,
    /// Download URL of the file for the current platform, if one exists
    pub install_url: Option<String>,
    pub file_hash: Option<String>,
}

/// Host operations for one add-on, each reflected in the store
pub struct InstallHelpers {
    addon: AddonInfo,
    manager: Option<Arc<dyn AddonManager>>,
    actions: ActionSender,
    events: Option<EventSender>,
}

impl InstallHelpers {
    /// `manager` is `None` when the application runs outside a browser that
    /// exposes an extension manager.
    #[must_use]
    pub fn new(
        addon: AddonInfo,
        manager: Option<Arc<dyn AddonManager>>,
        actions: ActionSender,
    ) -> Self {
        Self {
            addon,
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

    #[must_use]
    pub fn addon(&self) -> &AddonInfo {
        &self.addon
    }

    #[must_use]
    pub fn has_addon_manager(&self) -> bool {
        self.manager.is_some()
    }

    /// After a successful install or enable, the host only shows its own
    /// notice when permission prompts are on.
    #[must_use]
    pub fn needs_post_install_notice(&self) -> bool {
        self.manager
            .as_ref()
            .is_some_and(|manager| !manager.has_permission_prompts())
    }

    /// Ask the host for the add-on and record what it says.
    ///
    /// Returns the dispatched action, or `None` without a manager.
    pub async fn set_current_status(&self) -> Option<InstallAction> {
        let Some(manager) = self.manager.as_ref() else {
            info!(guid = %self.addon.guid, "no add-on manager, cannot set add-on status");
            return None;
        };
        let guid = self.addon.guid.clone();
        self.emit_host(HostEvent::OperationStarted {
            guid: guid.clone(),
            operation: HostOperation::QueryStatus,
        });

        let state = match manager.get_addon(&guid).await {
            Ok(host_addon) => {
                let status = addon_status(&host_addon, Some(self.addon.addon_type));
                self.emit_host(HostEvent::OperationCompleted {
                    guid: guid.clone(),
                    operation: HostOperation::QueryStatus,
                });
                self.listing_state(status)
                    .with_version(host_addon.version)
                    .with_can_uninstall(host_addon.can_uninstall)
            }
            Err(HostError::AddonNotFound { .. }) => {
                info!(%guid, "add-on not found, setting status to UNINSTALLED");
                self.emit_host(HostEvent::OperationCompleted {
                    guid: guid.clone(),
                    operation: HostOperation::QueryStatus,
                });
                self.listing_state(InstallStatus::Uninstalled)
            }
            Err(err) => {
                error!(%guid, error = %err, "add-on manager failed");
                self.operation_failed(HostOperation::QueryStatus, &err);
                InstallState::new(guid, InstallStatus::Error).with_error(InstallErrorCode::Fatal)
            }
        };

        let action = InstallAction::SetInstallState(state);
        send_action(&self.actions, action.clone());
        Some(action)
    }

    /// Start a download and install through the host.
    ///
    /// # Errors
    ///
    /// Fails when there is no manager, no install URL, or the host install
    /// fails. The record is moved to `FATAL_INSTALL_ERROR` in each case.
    pub async fn install(&self) -> Result<InstallOutcome, HostError> {
        let guid = self.addon.guid.clone();
        send_action(&self.actions, InstallAction::start_download(guid.clone()));
        self.emit_host(HostEvent::OperationStarted {
            guid: guid.clone(),
            operation: HostOperation::Install,
        });

        match self.run_install().await {
            Ok(outcome) => {
                let event = match outcome {
                    InstallOutcome::Installed => HostEvent::OperationCompleted {
                        guid,
                        operation: HostOperation::Install,
                    },
                    InstallOutcome::Cancelled => HostEvent::OperationCancelled {
                        guid,
                        operation: HostOperation::Install,
                    },
                };
                self.emit_host(event);
                Ok(outcome)
            }
            Err(err) => {
                error!(%guid, error = %err, "install error");
                self.operation_failed(HostOperation::Install, &err);
                send_action(
                    &self.actions,
                    InstallAction::install_error(guid, InstallErrorCode::FatalInstall),
                );
                Err(err)
            }
        }
    }

    async fn run_install(&self) -> Result<InstallOutcome, HostError> {
        let manager = self.manager.as_ref().ok_or(HostError::ManagerUnavailable)?;
        let url = self
            .addon
            .install_url
            .clone()
            .filter(|url| !url.is_empty())
            .ok_or_else(|| HostError::MissingInstallUrl {
                guid: self.addon.guid.to_string(),
            })?;

        let observer = ProgressHandler::new(self.addon.guid.clone(), self.actions.clone());
        let request = InstallRequest {
            url,
            hash: self.addon.file_hash.clone(),
        };
        debug!(guid = %self.addon.guid, url = %request.url, "requesting install");
        manager.install(request, &observer).await
    }

    /// Remove the add-on through the host.
    ///
    /// # Errors
    ///
    /// Fails when there is no manager or the host uninstall fails; the record
    /// is moved to `FATAL_UNINSTALL_ERROR`.
    pub async fn uninstall(&self) -> Result<(), HostError> {
        let guid = self.addon.guid.clone();
        send_action(
            &self.actions,
            InstallAction::SetInstallState(InstallState::new(
                guid.clone(),
                InstallStatus::Uninstalling,
            )),
        );
        self.emit_host(HostEvent::OperationStarted {
            guid: guid.clone(),
            operation: HostOperation::Uninstall,
        });

        let result = match self.manager.as_ref() {
            Some(manager) => {
                info!(%guid, "requesting uninstall");
                manager.uninstall(&guid).await
            }
            None => Err(HostError::ManagerUnavailable),
        };

        match result {
            Ok(()) => {
                self.emit_host(HostEvent::OperationCompleted {
                    guid,
                    operation: HostOperation::Uninstall,
                });
                Ok(())
            }
            Err(err) => {
                error!(%guid, error = %err, "uninstall error");
                self.operation_failed(HostOperation::Uninstall, &err);
                send_action(
                    &self.actions,
                    InstallAction::install_error(guid, InstallErrorCode::FatalUninstall),
                );
                Err(err)
            }
        }
    }

    /// Enable the add-on through the host.
    ///
    /// A host that cannot toggle the add-on is not an error.
    ///
    /// # Errors
    ///
    /// Any other failure moves the record to `ERROR` with `FATAL_ERROR` and
    /// is returned.
    pub async fn enable(&self) -> Result<(), HostError> {
        let guid = self.addon.guid.clone();
        let result = match self.manager.as_ref() {
            Some(manager) => {
                info!(%guid, "enable");
                self.emit_host(HostEvent::OperationStarted {
                    guid: guid.clone(),
                    operation: HostOperation::Enable,
                });
                manager.set_enabled(&guid, true).await
            }
            None => Err(HostError::ManagerUnavailable),
        };

        match result {
            Ok(()) => {
                self.emit_host(HostEvent::OperationCompleted {
                    guid,
                    operation: HostOperation::Enable,
                });
                Ok(())
            }
            Err(HostError::EnableNotAvailable { .. }) => {
                info!(%guid, "enabling not available, unable to enable");
                Ok(())
            }
            Err(err) => {
                error!(%guid, error = %err, "error while trying to enable");
                self.operation_failed(HostOperation::Enable, &err);
                send_action(
                    &self.actions,
                    InstallAction::SetInstallState(
                        InstallState::new(guid, InstallStatus::Error)
                            .with_error(InstallErrorCode::Fatal),
                    ),
                );
                Err(err)
            }
        }
    }

    /// Whether the host reports the add-on as enabled; `false` if it cannot say
    pub async fn is_addon_enabled(&self) -> bool {
        let Some(manager) = self.manager.as_ref() else {
            debug!(guid = %self.addon.guid, "no add-on manager, assuming not enabled");
            return false;
        };
        match manager.get_addon(&self.addon.guid).await {
            Ok(host_addon) => host_addon.is_enabled,
            Err(err) => {
                error!(guid = %self.addon.guid, error = %err, "could not determine whether the add-on was enabled");
                false
            }
        }
    }

    fn listing_state(&self, status: InstallStatus) -> InstallState {
        let state = InstallState::new(self.addon.guid.clone(), status).with_name(&self.addon.name);
        match &self.addon.install_url {
            Some(url) => state.with_url(url),
            None => state,
        }
    }

    fn operation_failed(&self, operation: HostOperation, err: &HostError) {
        self.emit_host(HostEvent::OperationFailed {
            guid: self.addon.guid.clone(),
            operation,
            failure: FailureContext::from_error(err),
        });
    }
}

impl EventEmitter for InstallHelpers {
    fn event_sender(&self) -> Option<&EventSender> {
        self.events.as_ref()
    }
}
