//! Sans-io state-change engine.
//!
//! [`DeviceStateMachine`] produces requests and applies confirmations but
//! performs no I/O itself. The split mirrors the rest of the crate: callers
//! call [`dispatch`](DeviceStateMachine::dispatch) to obtain a
//! [`StateChangeRequest`], perform the exchange however they like, then feed
//! the outcome back through [`complete_success`] or [`complete_failure`].
//!
//! The server is the source of truth: apart from the client-only `Rebooting`
//! sub-state, no transition happens before an explicit confirmation.
//!
//! [`complete_success`]: DeviceStateMachine::complete_success
//! [`complete_failure`]: DeviceStateMachine::complete_failure

use crate::core::state::{DeviceAction, DeviceState, TargetState};
use crate::protocol::{ReplayToken, StateChangeRequest, StateChangeResponse};

/// Outcome of dispatching an action.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Dispatch {
    /// Action is legal; send this request and complete the cycle with
    /// `complete_success` or `complete_failure`.
    Send(StateChangeRequest),
    /// Action is not legal in the current state. Nothing was sent, nothing
    /// changed.
    NotLegal,
    /// A request is already in flight. Nothing was sent, nothing changed.
    InFlight,
}

/// State-change engine for one controlled device.
///
/// Holds the confirmed state, the in-flight request (at most one), and the
/// anti-replay token. Exactly one machine exists per service group context;
/// replacing the state is a field assignment inside `complete_success`, so
/// there is never a moment with zero or two bound states.
///
/// # Example
///
/// ```rust
/// use devstate::core::{DeviceAction, DeviceState, DeviceStateMachine, Dispatch};
/// use devstate::protocol::{ReplayToken, StateChangeResponse};
///
/// let mut machine = DeviceStateMachine::new(DeviceState::Stopped, ReplayToken::new("t0"));
///
/// let Dispatch::Send(request) = machine.dispatch(DeviceAction::Run) else {
///     unreachable!("run is legal while stopped");
/// };
/// assert_eq!(request.token.as_str(), "t0");
///
/// let confirmed = machine.complete_success(StateChangeResponse::new("t1"));
/// assert_eq!(confirmed, Some(DeviceState::Running));
/// assert_eq!(machine.token().as_str(), "t1");
/// ```
#[derive(Clone, Debug)]
pub struct DeviceStateMachine {
    state: DeviceState,
    pending: Option<TargetState>,
    token: ReplayToken,
}

impl DeviceStateMachine {
    /// Create a machine in a confirmed initial state.
    pub fn new(initial: DeviceState, token: ReplayToken) -> Self {
        Self {
            state: initial,
            pending: None,
            token,
        }
    }

    /// Current state (pure).
    pub fn state(&self) -> DeviceState {
        self.state
    }

    /// Current anti-replay token (pure).
    pub fn token(&self) -> &ReplayToken {
        &self.token
    }

    /// Target of the in-flight request, if any (pure).
    pub fn pending(&self) -> Option<TargetState> {
        self.pending
    }

    /// Dispatch an action, producing the request to send.
    ///
    /// At most one request can be in flight: further dispatches return
    /// [`Dispatch::InFlight`] until the cycle completes. Illegal actions
    /// return [`Dispatch::NotLegal`]. Dispatching `Reboot` moves the machine
    /// to `Rebooting` immediately; every other transition waits for the
    /// confirmation.
    pub fn dispatch(&mut self, action: DeviceAction) -> Dispatch {
        if self.pending.is_some() {
            return Dispatch::InFlight;
        }

        let Some(target) = self.state.target(action) else {
            return Dispatch::NotLegal;
        };

        if target == TargetState::Reboot {
            self.state = DeviceState::Rebooting;
        }
        self.pending = Some(target);

        Dispatch::Send(StateChangeRequest {
            state: target,
            token: self.token.clone(),
        })
    }

    /// Apply a success response for the in-flight request.
    ///
    /// Token rotation is unconditional and happens before any state change,
    /// so a follow-up request can never be built from a stale token — even
    /// when no visible transition occurs (the stop-half of a reboot).
    ///
    /// Returns the newly confirmed state when a visible transition occurred,
    /// `None` for the reboot stop-half (the machine stays `Running`, awaiting
    /// the implicit restart).
    ///
    /// A response arriving with no request pending is unsolicited and ignored
    /// entirely, token included.
    pub fn complete_success(&mut self, response: StateChangeResponse) -> Option<DeviceState> {
        let target = self.pending.take()?;
        self.token = response.token;

        match target {
            TargetState::Running => {
                self.state = DeviceState::Running;
                Some(DeviceState::Running)
            }
            TargetState::Stopped => {
                self.state = DeviceState::Stopped;
                Some(DeviceState::Stopped)
            }
            TargetState::Reboot => {
                // Stop-half of the reboot cycle: not a terminal stop.
                self.state = DeviceState::Running;
                None
            }
        }
    }

    /// Apply a failure for the in-flight request.
    ///
    /// No transition, no token rotation. A failed reboot reverts the
    /// `Rebooting` sub-state back to `Running`.
    pub fn complete_failure(&mut self) {
        if self.pending.take().is_some() && self.state == DeviceState::Rebooting {
            self.state = DeviceState::Running;
        }
    }
}
