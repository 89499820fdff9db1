#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Glue between the browser's extension manager and the installation store
//!
//! The host is reached through the [`AddonManager`] trait. Everything the
//! host reports, whether a global change notification, install progress or
//! the result of a request, is turned into an
//! [`InstallAction`](amo_installations::InstallAction) and sent to the store
//! over an [`ActionSender`](amo_installations::ActionSender).

pub mod helpers;
pub mod listener;
pub mod manager;
pub mod progress;
pub mod status;

pub use helpers::{AddonInfo, InstallHelpers};
pub use listener::{ChangeEvent, ChangeListener};
pub use manager::{
    AddonManager, HostAddon, InstallEventKind, InstallObserver, InstallOutcome, InstallPhase,
    InstallRequest, InstallSnapshot,
};
pub use progress::ProgressHandler;
pub use status::{addon_status, GlobalEvent};

use amo_installations::{ActionSender, InstallAction};

/// Hand an action to the store. A closed channel means the session is
/// shutting down, so the action is dropped.
pub(crate) fn send_action(actions: &ActionSender, action: InstallAction) {
    if let Err(err) = actions.send(action) {
        tracing::warn!(
            guid = %err.0.guid(),
            action = err.0.kind(),
            "installation store is gone, dropping action"
        );
    }
}
