//! Device controller: the imperative shell around the sans-io machine.
//!
//! One controller per service group context. It owns the machine, the
//! anti-replay token (inside the machine), the transition log, and the view,
//! and drives complete request/confirmation cycles against a [`Transport`]
//! environment. Notification policy follows the rendered-markup contract:
//! the view hears about the current confirmed state on the initial bind and
//! after every confirmed visible transition, never about `Rebooting`.

use crate::core::{
    DeviceAction, DeviceState, DeviceStateMachine, Dispatch, StateError, StateFactory,
    TransitionLog, TransitionRecord,
};
use crate::effects::transport::{send_state_change, Transport, TransportError};
use crate::protocol::{ReplayToken, ServiceGroupId};
use stillwater::prelude::*;
use tracing::{debug, warn};

/// Render hooks invoked by the controller.
///
/// Both hooks must be idempotent: they are re-invoked on every bind, and a
/// device confirmed `Running` twice in a row renders the same controls twice.
pub trait DeviceView {
    /// The device is confirmed running; render stop/reboot controls.
    fn on_device_running(&mut self);

    /// The device is confirmed stopped; render the run control.
    fn on_device_stopped(&mut self);
}

/// Outcome of driving one action through a full cycle.
///
/// Replaces global notification side effects: the hosting UI decides how to
/// surface each case. Transport failures are absorbed here — they never
/// propagate as errors.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum ActionOutcome {
    /// The server confirmed a visible transition; the view has been notified.
    Confirmed(DeviceState),
    /// The server acknowledged the stop-half of a reboot; no visible
    /// transition, the device is still modeled as running.
    Acknowledged,
    /// The action is not legal in the current state; nothing was sent.
    NotLegal,
    /// A request is already in flight; nothing was sent.
    InFlight,
    /// The exchange failed; state and token are unchanged.
    Failed(TransportError),
}

/// Controller binding one device's state machine to its service group.
pub struct DeviceController<V: DeviceView> {
    group: ServiceGroupId,
    machine: DeviceStateMachine,
    log: TransitionLog,
    view: V,
}

impl<V: DeviceView> DeviceController<V> {
    /// Create a controller in a known confirmed state.
    ///
    /// Binds the state immediately: the view is notified of `initial` so the
    /// rendered controls match it from the start.
    pub fn new(initial: DeviceState, group: ServiceGroupId, token: ReplayToken, view: V) -> Self {
        let mut controller = Self {
            group,
            machine: DeviceStateMachine::new(initial, token),
            log: TransitionLog::new(),
            view,
        };
        controller.notify(initial);
        controller
    }

    /// Create a controller from the state signature rendered in markup.
    ///
    /// This is the initialization path at page load. An unrecognized
    /// signature fails synchronously with [`StateError`]; the device's
    /// controller must not come up with a guessed state.
    pub fn from_signature(
        factory: &StateFactory,
        signature: &str,
        group: ServiceGroupId,
        token: ReplayToken,
        view: V,
    ) -> Result<Self, StateError> {
        let initial = factory.resolve(signature)?;
        Ok(Self::new(initial, group, token, view))
    }

    /// Current confirmed (or mid-reboot) state.
    pub fn state(&self) -> DeviceState {
        self.machine.state()
    }

    /// Current anti-replay token.
    pub fn token(&self) -> &ReplayToken {
        self.machine.token()
    }

    /// Owning service group.
    pub fn group(&self) -> &ServiceGroupId {
        &self.group
    }

    /// Log of confirmed visible transitions.
    pub fn log(&self) -> &TransitionLog {
        &self.log
    }

    /// The bound view.
    pub fn view(&self) -> &V {
        &self.view
    }

    /// Request the device to start.
    pub async fn run<Env>(&mut self, env: &Env) -> ActionOutcome
    where
        Env: Transport + Clone + Send + Sync + 'static,
    {
        self.apply(DeviceAction::Run, env).await
    }

    /// Request the device to stop.
    pub async fn stop<Env>(&mut self, env: &Env) -> ActionOutcome
    where
        Env: Transport + Clone + Send + Sync + 'static,
    {
        self.apply(DeviceAction::Stop, env).await
    }

    /// Request a reboot cycle.
    pub async fn reboot<Env>(&mut self, env: &Env) -> ActionOutcome
    where
        Env: Transport + Clone + Send + Sync + 'static,
    {
        self.apply(DeviceAction::Reboot, env).await
    }

    async fn apply<Env>(&mut self, action: DeviceAction, env: &Env) -> ActionOutcome
    where
        Env: Transport + Clone + Send + Sync + 'static,
    {
        let from = self.machine.state();
        let request = match self.machine.dispatch(action) {
            Dispatch::Send(request) => request,
            Dispatch::NotLegal => {
                debug!(group = %self.group, %action, state = %from, "ignoring illegal action");
                return ActionOutcome::NotLegal;
            }
            Dispatch::InFlight => {
                debug!(group = %self.group, %action, "request already in flight");
                return ActionOutcome::InFlight;
            }
        };

        debug!(group = %self.group, %action, target = %request.state, "sending state change");
        match send_state_change(self.group.clone(), request).run(env).await {
            Ok(response) => match self.machine.complete_success(response) {
                Some(confirmed) => {
                    self.log = self.log.record(TransitionRecord::now(from, confirmed, action));
                    self.notify(confirmed);
                    debug!(group = %self.group, state = %confirmed, "transition confirmed");
                    ActionOutcome::Confirmed(confirmed)
                }
                None => {
                    debug!(group = %self.group, "reboot stop-half acknowledged");
                    ActionOutcome::Acknowledged
                }
            },
            Err(error) => {
                warn!(group = %self.group, %action, %error, "state change failed");
                self.machine.complete_failure();
                ActionOutcome::Failed(error)
            }
        }
    }

    fn notify(&mut self, state: DeviceState) {
        match state {
            DeviceState::Running => self.view.on_device_running(),
            DeviceState::Stopped => self.view.on_device_stopped(),
            // Client-only sub-state; the view renders confirmed states only.
            DeviceState::Rebooting => {}
        }
    }
}
