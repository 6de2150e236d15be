//! Pure core of the device state machine.
//!
//! Everything in this module is side-effect free: the state/action enums and
//! their transition table, the sans-io request/confirmation engine, signature
//! resolution, and the transition log. I/O lives in [`crate::effects`].

mod factory;
mod history;
mod machine;
mod state;

pub use factory::{StateError, StateFactory};
pub use history::{TransitionLog, TransitionRecord};
pub use machine::{DeviceStateMachine, Dispatch};
pub use state::{DeviceAction, DeviceState, TargetState};
