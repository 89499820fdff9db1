#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Installation lifecycle tracking for amo
//!
//! Every add-on the application knows about has exactly one
//! [`InstalledAddon`] record, keyed by its guid. Records change only by
//! running an [`InstallAction`] through [`reduce`] (or the in-place
//! [`Installations::apply`]); the read side is the set of pure functions in
//! [`selectors`].
//!
//! [`InstallationStore`] owns a table for one session, applies the configured
//! usage-error policy and publishes changes on the event bus. Asynchronous
//! producers talk to it through an [`ActionSender`] so that actions are
//! applied one at a time, in the order they were sent.

pub mod action;
pub mod messages;
pub mod record;
pub mod reducer;
pub mod selectors;
pub mod store;

pub use action::{InstallAction, InstallState};
pub use messages::error_message;
pub use record::InstalledAddon;
pub use reducer::{reduce, Installations, Transition};
pub use store::{action_channel, run_dispatcher, ActionReceiver, ActionSender, InstallationStore};
