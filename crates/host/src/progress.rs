//! Install progress translation

use amo_types::{Guid, InstallErrorCode, InstallStatus};
use amo_installations::{ActionSender, InstallAction, InstallState};
use tracing::{trace, warn};

use crate::manager::{InstallEventKind, InstallObserver, InstallPhase, InstallSnapshot};
use crate::send_action;

/// Turns the host's per-install events for one add-on into store actions
#[derive(Debug, Clone)]
pub struct ProgressHandler {
    guid: Guid,
    actions: ActionSender,
}

impl ProgressHandler {
    #[must_use]
    pub fn new(guid: Guid, actions: ActionSender) -> Self {
        Self { guid, actions }
    }

    /// The action an install event maps to, if any
    #[must_use]
    pub fn action_for(
        &self,
        install: &InstallSnapshot,
        event: &InstallEventKind,
    ) -> Option<InstallAction> {
        if install.phase == InstallPhase::Downloading {
            return self.progress_action(install);
        }

        let guid = self.guid.clone();
        match event {
            InstallEventKind::DownloadEnded => Some(InstallAction::SetInstallState(
                InstallState::new(guid, InstallStatus::Installing),
            )),
            InstallEventKind::DownloadFailed { error } => {
                let code = match error.as_deref().map(InstallErrorCode::from) {
                    Some(InstallErrorCode::CorruptFile) => InstallErrorCode::CorruptFile,
                    _ => InstallErrorCode::DownloadFailed,
                };
                Some(InstallAction::install_error(guid, code))
            }
            InstallEventKind::InstallCancelled => Some(InstallAction::install_cancelled(guid)),
            InstallEventKind::InstallFailed => Some(InstallAction::install_error(
                guid,
                InstallErrorCode::InstallFailed,
            )),
            _ => None,
        }
    }

    fn progress_action(&self, install: &InstallSnapshot) -> Option<InstallAction> {
        if install.max_progress == 0 {
            trace!(guid = %self.guid, "download size unknown, skipping progress");
            return None;
        }
        let percent = install.progress.saturating_mul(100) / install.max_progress;
        let percent = i64::try_from(percent.min(100)).unwrap_or(100);
        match InstallAction::download_progress(self.guid.clone(), percent) {
            Ok(action) => Some(action),
            Err(err) => {
                warn!(guid = %self.guid, error = %err, "dropping download progress");
                None
            }
        }
    }
}

impl InstallObserver for ProgressHandler {
    fn on_event(&self, install: &InstallSnapshot, event: &InstallEventKind) {
        if let Some(action) = self.action_for(install, event) {
            send_action(&self.actions, action);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use amo_installations::action_channel;

    fn handler() -> ProgressHandler {
        let (tx, _rx) = action_channel();
        ProgressHandler::new(Guid::new("my-addon@me.com").unwrap(), tx)
    }

    fn snapshot(phase: InstallPhase, progress: u64, max_progress: u64) -> InstallSnapshot {
        InstallSnapshot {
            phase,
            progress,
            max_progress,
        }
    }

    #[test]
    fn test_downloading_reports_floored_percent() {
        let action = handler().action_for(
            &snapshot(InstallPhase::Downloading, 1, 3),
            &InstallEventKind::DownloadProgress,
        );
        let Some(InstallAction::DownloadProgress { progress, .. }) = action else {
            panic!("expected DOWNLOAD_PROGRESS, got {action:?}");
        };
        assert_eq!(progress.value(), 33);
    }

    #[test]
    fn test_unknown_size_is_skipped() {
        assert_eq!(
            handler().action_for(
                &snapshot(InstallPhase::Downloading, 10, 0),
                &InstallEventKind::DownloadProgress
            ),
            None
        );
    }

    #[test]
    fn test_download_failures() {
        let done = snapshot(InstallPhase::DownloadFailed, 0, 0);
        let corrupt = handler().action_for(
            &done,
            &InstallEventKind::DownloadFailed {
                error: Some("ERROR_CORRUPT_FILE".into()),
            },
        );
        assert!(matches!(
            corrupt,
            Some(InstallAction::InstallError { error: InstallErrorCode::CorruptFile, .. })
        ));

        let network = handler().action_for(
            &done,
            &InstallEventKind::DownloadFailed {
                error: Some("ERROR_NETWORK_FAILURE".into()),
            },
        );
        assert!(matches!(
            network,
            Some(InstallAction::InstallError { error: InstallErrorCode::DownloadFailed, .. })
        ));
    }

    #[test]
    fn test_lifecycle_events() {
        let handler = handler();
        let installing = snapshot(InstallPhase::Installing, 0, 0);

        assert!(matches!(
            handler.action_for(&snapshot(InstallPhase::Downloaded, 5, 5), &InstallEventKind::DownloadEnded),
            Some(InstallAction::SetInstallState(ref state)) if state.status == InstallStatus::Installing
        ));
        assert!(matches!(
            handler.action_for(&installing, &InstallEventKind::InstallCancelled),
            Some(InstallAction::InstallCancelled { .. })
        ));
        assert!(matches!(
            handler.action_for(&installing, &InstallEventKind::InstallFailed),
            Some(InstallAction::InstallError { error: InstallErrorCode::InstallFailed, .. })
        ));
        assert_eq!(handler.action_for(&installing, &InstallEventKind::InstallStarted), None);
    }
}
