//! Device state and action enums plus the transition table.
//!
//! The legality of every action is data, not dispatch: [`DeviceState::target`]
//! maps a `(state, action)` pair to the wire-level target state, and `None`
//! encodes an illegal action. Callers that get `None` perform no request and
//! no transition.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Operational state of a controlled device.
///
/// `Stopped` and `Running` are server-confirmed states. `Rebooting` is a
/// client-only sub-state of `Running`: it is entered when a reboot request is
/// issued and left when the reboot's stop-half confirmation (or a failure)
/// arrives. The server never reports it and [`StateFactory`] never produces
/// it.
///
/// [`StateFactory`]: crate::core::StateFactory
///
/// # Example
///
/// ```rust
/// use devstate::core::{DeviceAction, DeviceState, TargetState};
///
/// assert_eq!(
///     DeviceState::Stopped.target(DeviceAction::Run),
///     Some(TargetState::Running)
/// );
/// assert_eq!(DeviceState::Stopped.target(DeviceAction::Stop), None);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceState {
    /// Device is confirmed stopped; only `Run` is legal.
    Stopped,
    /// Device is confirmed running; `Stop` and `Reboot` are legal.
    Running,
    /// A reboot request is in flight; no action is legal.
    Rebooting,
}

/// Action requested through the hosting UI.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceAction {
    Run,
    Stop,
    Reboot,
}

/// Wire-level target state carried in a state-change request.
///
/// Serialized lowercase: `"running"`, `"stopped"`, `"reboot"`.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetState {
    Running,
    Stopped,
    Reboot,
}

impl DeviceState {
    /// Get the state's name for display/logging.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Stopped => "stopped",
            Self::Running => "running",
            Self::Rebooting => "rebooting",
        }
    }

    /// Look up the wire target for an action in this state.
    ///
    /// Returns `None` for illegal actions. All actions are illegal while
    /// `Rebooting`; the in-flight guard in the machine blocks them as well.
    pub fn target(&self, action: DeviceAction) -> Option<TargetState> {
        match (self, action) {
            (Self::Stopped, DeviceAction::Run) => Some(TargetState::Running),
            (Self::Running, DeviceAction::Stop) => Some(TargetState::Stopped),
            (Self::Running, DeviceAction::Reboot) => Some(TargetState::Reboot),
            _ => None,
        }
    }

    /// Check whether an action is legal in this state.
    pub fn accepts(&self, action: DeviceAction) -> bool {
        self.target(action).is_some()
    }

    /// Check if the device is confirmed by the server to be in this state.
    ///
    /// `Rebooting` is not confirmed: it exists only between a reboot dispatch
    /// and its completion.
    pub fn is_confirmed(&self) -> bool {
        !matches!(self, Self::Rebooting)
    }
}

impl fmt::Display for DeviceState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl TargetState {
    /// Wire name used in the request body.
    pub fn wire_name(&self) -> &'static str {
        match self {
            Self::Running => "running",
            Self::Stopped => "stopped",
            Self::Reboot => "reboot",
        }
    }
}

impl fmt::Display for TargetState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

impl fmt::Display for DeviceAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Run => "run",
            Self::Stop => "stop",
            Self::Reboot => "reboot",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stopped_only_accepts_run() {
        assert_eq!(
            DeviceState::Stopped.target(DeviceAction::Run),
            Some(TargetState::Running)
        );
        assert_eq!(DeviceState::Stopped.target(DeviceAction::Stop), None);
        assert_eq!(DeviceState::Stopped.target(DeviceAction::Reboot), None);
    }

    #[test]
    fn running_accepts_stop_and_reboot() {
        assert_eq!(DeviceState::Running.target(DeviceAction::Run), None);
        assert_eq!(
            DeviceState::Running.target(DeviceAction::Stop),
            Some(TargetState::Stopped)
        );
        assert_eq!(
            DeviceState::Running.target(DeviceAction::Reboot),
            Some(TargetState::Reboot)
        );
    }

    #[test]
    fn rebooting_accepts_nothing() {
        for action in [DeviceAction::Run, DeviceAction::Stop, DeviceAction::Reboot] {
            assert!(!DeviceState::Rebooting.accepts(action));
        }
    }

    #[test]
    fn only_rebooting_is_unconfirmed() {
        assert!(DeviceState::Stopped.is_confirmed());
        assert!(DeviceState::Running.is_confirmed());
        assert!(!DeviceState::Rebooting.is_confirmed());
    }

    #[test]
    fn target_serializes_to_wire_names() {
        for (target, expected) in [
            (TargetState::Running, "\"running\""),
            (TargetState::Stopped, "\"stopped\""),
            (TargetState::Reboot, "\"reboot\""),
        ] {
            assert_eq!(serde_json::to_string(&target).unwrap(), expected);
        }
    }

    #[test]
    fn state_name_matches_display() {
        for state in [
            DeviceState::Stopped,
            DeviceState::Running,
            DeviceState::Rebooting,
        ] {
            assert_eq!(state.name(), state.to_string());
        }
    }
}
