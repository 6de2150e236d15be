//! Devstate: a server-confirmed device state machine.
//!
//! Models the on/off/reboot lifecycle of a device bound to an admin service
//! group. The server is the source of truth: the machine only transitions on
//! an explicit success confirmation, every mutating request carries a
//! rotating anti-replay token, and the token is rotated before any visible
//! transition is applied.
//!
//! The crate follows a "pure core, imperative shell" split:
//!
//! - [`core`]: the state/action enums with their transition table, the
//!   sans-io request/confirmation engine, signature resolution, and the
//!   transition log. No side effects.
//! - [`effects`]: the [`Transport`] capability (one request/response
//!   exchange, run as a Stillwater effect) and the [`DeviceController`]
//!   binding a machine to its service group and view.
//! - [`protocol`]: the wire types of the exchange.
//!
//! # Example
//!
//! ```rust
//! use devstate::core::{DeviceAction, DeviceState, DeviceStateMachine, Dispatch};
//! use devstate::protocol::{ReplayToken, StateChangeResponse};
//!
//! // The view rendered "выключено", so the device starts stopped.
//! let mut machine = DeviceStateMachine::new(DeviceState::Stopped, ReplayToken::new("t0"));
//!
//! // Dispatch produces the request; the caller performs the exchange.
//! let Dispatch::Send(request) = machine.dispatch(DeviceAction::Run) else {
//!     unreachable!("run is legal while stopped");
//! };
//! assert_eq!(request.state.wire_name(), "running");
//!
//! // The server confirmed and rotated the token.
//! let confirmed = machine.complete_success(StateChangeResponse::new("t1"));
//! assert_eq!(confirmed, Some(DeviceState::Running));
//! assert_eq!(machine.token().as_str(), "t1");
//! ```

pub mod core;
pub mod effects;
pub mod protocol;

// Re-export commonly used types
pub use crate::core::{
    DeviceAction, DeviceState, DeviceStateMachine, Dispatch, StateError, StateFactory,
};
pub use crate::effects::{ActionOutcome, DeviceController, DeviceView, Transport, TransportError};
pub use crate::protocol::{ReplayToken, ServiceGroupId, StateChangeRequest, StateChangeResponse};
