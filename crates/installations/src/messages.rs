//! User-facing messages for install error codes

use amo_types::InstallErrorCode;

/// Message shown to the user for an install error code.
///
/// Unrecognised codes fall back to a generic message.
#[must_use]
pub fn error_message(code: &InstallErrorCode) -> &'static str {
    match code {
        InstallErrorCode::InstallFailed => "Installation failed. Please try again.",
        InstallErrorCode::DownloadFailed => "Download failed. Please check your connection.",
        InstallErrorCode::CorruptFile => {
            "Installation aborted because the add-on appears to be corrupt."
        }
        InstallErrorCode::FatalInstall => "An unexpected error occurred during installation.",
        InstallErrorCode::FatalUninstall => "An unexpected error occurred during uninstallation.",
        InstallErrorCode::Fatal | InstallErrorCode::Other(_) => "An unexpected error occurred.",
    }
}
