//! Replaying action logs through the installation store

use std::path::Path;

use amo_installations::{error_message, selectors, InstallAction, InstallationStore, Installations};
use amo_types::{DownloadProgress, Guid, InstallErrorCode, InstallStatus};
use serde::Serialize;
use tokio::io::AsyncReadExt;
use tracing::{debug, warn};

use crate::error::CliError;

/// Outcome of one replay
#[derive(Debug, Serialize)]
pub struct ReplayReport {
    pub applied: usize,
    pub failures: Vec<ReplayFailure>,
    pub addons: Vec<AddonSummary>,
}

/// A line that could not be parsed or was rejected by the store
#[derive(Debug, Serialize)]
pub struct ReplayFailure {
    pub line: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<&'static str>,
    pub message: String,
}

/// Everything the presentation layer would read for one add-on
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddonSummary {
    pub guid: Guid,
    pub status: InstallStatus,
    pub progress: Option<DownloadProgress>,
    pub can_uninstall: bool,
    pub needs_restart: bool,
    pub error: Option<InstallErrorCode>,
    pub error_message: Option<&'static str>,
    pub version: Option<String>,
}

impl AddonSummary {
    #[must_use]
    pub fn from_state(state: &Installations, guid: &Guid) -> Self {
        let record = selectors::addon(state, guid.as_str());
        let error = selectors::install_error(state, guid.as_str()).cloned();
        Self {
            guid: guid.clone(),
            status: selectors::status(state, guid.as_str()),
            progress: selectors::download_progress(state, guid.as_str()),
            can_uninstall: selectors::can_uninstall(state, guid.as_str()),
            needs_restart: selectors::needs_restart(state, guid.as_str()),
            error_message: error.as_ref().map(error_message),
            error,
            version: record.and_then(|record| record.version.clone()),
        }
    }
}

/// Read an action log from `path`, or stdin for `-`
pub async fn read_input(path: &Path) -> Result<String, CliError> {
    if path == Path::new("-") {
        let mut input = String::new();
        tokio::io::stdin().read_to_string(&mut input).await?;
        Ok(input)
    } else {
        Ok(tokio::fs::read_to_string(path).await?)
    }
}

/// Dispatch each non-blank line of `input` as an [`InstallAction`].
///
/// Lines starting with `#` are comments. `only` narrows the summaries to a
/// single add-on, tracked or not.
pub fn replay(store: &mut InstallationStore, input: &str, only: Option<&Guid>) -> ReplayReport {
    let mut applied = 0;
    let mut failures = Vec::new();

    for (index, line) in input.lines().enumerate() {
        let line_no = index + 1;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let action: InstallAction = match serde_json::from_str(trimmed) {
            Ok(action) => action,
            Err(err) => {
                warn!(line = line_no, error = %err, "skipping malformed action");
                failures.push(ReplayFailure {
                    line: line_no,
                    action: None,
                    message: err.to_string(),
                });
                continue;
            }
        };

        match store.dispatch(&action) {
            Ok(_) => applied += 1,
            Err(err) => failures.push(ReplayFailure {
                line: line_no,
                action: Some(action.kind()),
                message: err.to_string(),
            }),
        }
    }
    debug!(applied, failed = failures.len(), "replay finished");

    let state = store.state();
    let addons = match only {
        Some(guid) => vec![AddonSummary::from_state(state, guid)],
        None => state
            .iter()
            .map(|record| AddonSummary::from_state(state, &record.guid))
            .collect(),
    };

    ReplayReport {
        applied,
        failures,
        addons,
    }
}
