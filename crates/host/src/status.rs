//! Host status mapping

use std::fmt;
use std::str::FromStr;

use amo_errors::HostError;
use amo_types::{AddonType, InstallStatus};

use crate::manager::HostAddon;

/// Status to record for an add-on the host knows about.
///
/// Enabled but inactive add-ons are `Inactive`, except static themes,
/// which are reported as `Disabled` instead.
#[must_use]
pub fn addon_status(addon: &HostAddon, addon_type: Option<AddonType>) -> InstallStatus {
    if addon.is_active && addon.is_enabled {
        InstallStatus::Enabled
    } else if addon.is_enabled && !addon.is_active && addon_type != Some(AddonType::StaticTheme) {
        InstallStatus::Inactive
    } else {
        InstallStatus::Disabled
    }
}

/// Global notifications broadcast by the host extension manager
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GlobalEvent {
    Enabled,
    Disabled,
    Enabling,
    Disabling,
    Installing,
    Installed,
    Uninstalling,
    Uninstalled,
    OperationCancelled,
}

impl GlobalEvent {
    pub const ALL: [Self; 9] = [
        Self::Enabled,
        Self::Disabled,
        Self::Enabling,
        Self::Disabling,
        Self::Installing,
        Self::Installed,
        Self::Uninstalling,
        Self::Uninstalled,
        Self::OperationCancelled,
    ];

    /// Host-side event name
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Enabled => "onEnabled",
            Self::Disabled => "onDisabled",
            Self::Enabling => "onEnabling",
            Self::Disabling => "onDisabling",
            Self::Installing => "onInstalling",
            Self::Installed => "onInstalled",
            Self::Uninstalling => "onUninstalling",
            Self::Uninstalled => "onUninstalled",
            Self::OperationCancelled => "onOperationCancelled",
        }
    }

    /// The status this notification implies. `OperationCancelled` has none;
    /// the add-on must be asked.
    #[must_use]
    pub fn status(self) -> Option<InstallStatus> {
        match self {
            Self::Enabled => Some(InstallStatus::Enabled),
            Self::Disabled => Some(InstallStatus::Disabled),
            Self::Enabling => Some(InstallStatus::Enabling),
            Self::Disabling => Some(InstallStatus::Disabling),
            Self::Installing => Some(InstallStatus::Installing),
            Self::Installed => Some(InstallStatus::Installed),
            Self::Uninstalling => Some(InstallStatus::Uninstalling),
            Self::Uninstalled => Some(InstallStatus::Uninstalled),
            Self::OperationCancelled => None,
        }
    }

    /// The host cannot return an add-on that is not installed yet or was
    /// just removed.
    #[must_use]
    pub fn addon_queryable(self) -> bool {
        !matches!(self, Self::Installing | Self::Uninstalled)
    }
}

impl FromStr for GlobalEvent {
    type Err = HostError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|event| event.name() == s)
            .ok_or_else(|| HostError::UnknownEvent { name: s.to_string() })
    }
}

impl fmt::Display for GlobalEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
