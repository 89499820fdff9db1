//! Read-only views over the installation table
//!
//! Presentation code should go through these rather than reading records
//! directly; each one has a defined answer for guids that are not tracked.

use amo_types::{DownloadProgress, InstallErrorCode, InstallStatus};

use crate::record::InstalledAddon;
use crate::reducer::Installations;

/// The full record, if tracked
#[must_use]
pub fn addon<'a>(state: &'a Installations, guid: &str) -> Option<&'a InstalledAddon> {
    state.get(guid)
}

/// Current status; `Unknown` for guids that are not tracked
#[must_use]
pub fn status(state: &Installations, guid: &str) -> InstallStatus {
    state.get(guid).map_or(InstallStatus::Unknown, |record| record.status)
}

/// Progress indicator for the install button.
///
/// A determinate percentage only while downloading, a filling indicator
/// while installing or enabling, an emptying one while uninstalling, and
/// nothing in every other state.
#[must_use]
pub fn download_progress(state: &Installations, guid: &str) -> Option<DownloadProgress> {
    let record = state.get(guid)?;
    match record.status {
        InstallStatus::Downloading => Some(DownloadProgress::Percent(record.download_progress)),
        InstallStatus::Installing | InstallStatus::Enabling => Some(DownloadProgress::Filling),
        InstallStatus::Uninstalling => Some(DownloadProgress::Emptying),
        _ => None,
    }
}

/// Whether the add-on may be removed; `true` when not tracked
#[must_use]
pub fn can_uninstall(state: &Installations, guid: &str) -> bool {
    state.get(guid).is_none_or(|record| record.can_uninstall)
}

#[must_use]
pub fn needs_restart(state: &Installations, guid: &str) -> bool {
    state.get(guid).is_some_and(|record| record.needs_restart)
}

/// The stored error code, present only on records in `Error`
#[must_use]
pub fn install_error<'a>(state: &'a Installations, guid: &str) -> Option<&'a InstallErrorCode> {
    state.get(guid).and_then(|record| record.error.as_ref())
}
