//! The installation table and its single transition function

use std::collections::BTreeMap;

use amo_errors::LifecycleError;
use amo_types::{Guid, InstallStatus, Percent};
use serde::Serialize;

use crate::action::InstallAction;
use crate::record::InstalledAddon;

/// All known installation records, keyed by guid
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Installations {
    addons: BTreeMap<Guid, InstalledAddon>,
}

/// The status change produced by one applied action
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub guid: Guid,
    /// `None` when the action created the record
    pub from: Option<InstallStatus>,
    pub to: InstallStatus,
}

impl Transition {
    /// Whether the record's status actually moved
    #[must_use]
    pub fn is_change(&self) -> bool {
        self.from != Some(self.to)
    }
}

impl Installations {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn get(&self, guid: &str) -> Option<&InstalledAddon> {
        self.addons.get(guid)
    }

    #[must_use]
    pub fn contains(&self, guid: &str) -> bool {
        self.addons.contains_key(guid)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.addons.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.addons.is_empty()
    }

    /// Records in guid order
    pub fn iter(&self) -> impl Iterator<Item = &InstalledAddon> {
        self.addons.values()
    }

    /// Apply `action` in place.
    ///
    /// Every check happens before anything is written, so on error the
    /// table is exactly as it was.
    ///
    /// # Errors
    ///
    /// - `UnknownAddon` if a non-`INSTALL_STATE` action names a guid with no record
    /// - `NotDownloading` if progress arrives for a record that is not downloading
    /// - `UnexpectedError` if an `INSTALL_STATE` payload sets an error on a non-error status
    pub fn apply(&mut self, action: &InstallAction) -> Result<Transition, LifecycleError> {
        match action {
            InstallAction::SetInstallState(state) => {
                state.validate()?;
                let record = state.clone().into_record();
                let to = record.status;
                let from = self
                    .addons
                    .insert(state.guid.clone(), record)
                    .map(|previous| previous.status);
                Ok(Transition {
                    guid: state.guid.clone(),
                    from,
                    to,
                })
            }
            InstallAction::StartDownload { guid } => self.update(guid, |record| {
                record.settle(InstallStatus::Downloading);
                Ok(())
            }),
            InstallAction::DownloadProgress { guid, progress } => self.update(guid, |record| {
                if record.status != InstallStatus::Downloading {
                    return Err(LifecycleError::NotDownloading {
                        guid: record.guid.to_string(),
                        status: record.status.to_string(),
                    });
                }
                record.download_progress = *progress;
                Ok(())
            }),
            InstallAction::InstallComplete { guid } => self.update(guid, |record| {
                record.settle(InstallStatus::Installed);
                Ok(())
            }),
            InstallAction::UninstallComplete { guid } | InstallAction::InstallCancelled { guid } => {
                self.update(guid, |record| {
                    record.settle(InstallStatus::Uninstalled);
                    Ok(())
                })
            }
            InstallAction::InstallError { guid, error } => self.update(guid, |record| {
                record.status = InstallStatus::Error;
                record.download_progress = Percent::ZERO;
                record.error = Some(error.clone());
                Ok(())
            }),
        }
    }

    /// Drop every record, returning how many there were
    pub fn clear(&mut self) -> usize {
        let cleared = self.addons.len();
        self.addons.clear();
        cleared
    }

    fn update<F>(&mut self, guid: &Guid, change: F) -> Result<Transition, LifecycleError>
    where
        F: FnOnce(&mut InstalledAddon) -> Result<(), LifecycleError>,
    {
        let record = self
            .addons
            .get_mut(guid.as_str())
            .ok_or_else(|| LifecycleError::UnknownAddon {
                guid: guid.to_string(),
            })?;
        let from = record.status;
        change(record)?;
        Ok(Transition {
            guid: guid.clone(),
            from: Some(from),
            to: record.status,
        })
    }
}

/// Pure transition: the table that results from applying `action` to `state`.
///
/// # Errors
///
/// Returns the same errors as [`Installations::apply`]; `state` is never
/// modified.
pub fn reduce(state: &Installations, action: &InstallAction) -> Result<Installations, LifecycleError> {
    let mut next = state.clone();
    next.apply(action)?;
    Ok(next)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::InstallState;

    fn guid() -> Guid {
        Guid::new("my-addon@me.com").unwrap()
    }

    fn table_with(status: InstallStatus) -> Installations {
        let mut table = Installations::new();
        table
            .apply(&InstallAction::SetInstallState(InstallState::new(guid(), status)))
            .unwrap();
        table
    }

    #[test]
    fn test_set_install_state_creates_record_with_defaults() {
        let table = table_with(InstallStatus::Uninstalled);
        let record = table.get("my-addon@me.com").unwrap();

        assert_eq!(record.status, InstallStatus::Uninstalled);
        assert_eq!(record.download_progress, Percent::ZERO);
        assert!(record.can_uninstall);
        assert!(!record.needs_restart);
        assert_eq!(record.error, None);
    }

    #[test]
    fn test_set_install_state_replaces_whole_record() {
        let mut table = Installations::new();
        let first = InstallState::new(guid(), InstallStatus::Installed)
            .with_url("https://example.com/a.xpi")
            .with_version("1.0")
            .with_can_uninstall(false);
        table.apply(&InstallAction::SetInstallState(first)).unwrap();

        let transition = table
            .apply(&InstallAction::SetInstallState(InstallState::new(
                guid(),
                InstallStatus::Disabled,
            )))
            .unwrap();

        assert_eq!(transition.from, Some(InstallStatus::Installed));
        let record = table.get("my-addon@me.com").unwrap();
        assert_eq!(record.url, None);
        assert_eq!(record.version, None);
        assert!(record.can_uninstall);
    }

    #[test]
    fn test_unknown_guid_is_rejected_without_mutation() {
        let table = table_with(InstallStatus::Uninstalled);
        let other = Guid::new("other@me.com").unwrap();

        let err = reduce(&table, &InstallAction::start_download(other)).unwrap_err();
        assert_eq!(err.to_string(), "no add-on with guid other@me.com found");
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_progress_requires_downloading() {
        let mut table = table_with(InstallStatus::Installed);
        let before = table.clone();

        let err = table
            .apply(&InstallAction::download_progress(guid(), 50).unwrap())
            .unwrap_err();
        assert!(matches!(err, LifecycleError::NotDownloading { .. }));
        assert_eq!(table, before);
    }

    #[test]
    fn test_completion_clears_progress_and_error() {
        let mut table = table_with(InstallStatus::Uninstalled);
        table.apply(&InstallAction::start_download(guid())).unwrap();
        table
            .apply(&InstallAction::download_progress(guid(), 80).unwrap())
            .unwrap();
        table.apply(&InstallAction::install_complete(guid())).unwrap();

        let record = table.get("my-addon@me.com").unwrap();
        assert_eq!(record.status, InstallStatus::Installed);
        assert_eq!(record.download_progress, Percent::ZERO);
        assert_eq!(record.error, None);
    }

    #[test]
    fn test_transition_reports_change() {
        let mut table = table_with(InstallStatus::Downloading);
        let same = table
            .apply(&InstallAction::download_progress(guid(), 10).unwrap())
            .unwrap();
        assert!(!same.is_change());

        let moved = table.apply(&InstallAction::install_cancelled(guid())).unwrap();
        assert!(moved.is_change());
        assert_eq!(moved.to, InstallStatus::Uninstalled);
    }
}
