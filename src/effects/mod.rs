//! Effectful shell around the pure core.
//!
//! This module owns every side effect in the crate: the [`Transport`]
//! capability performing the request/response exchange (wrapped in a
//! Stillwater effect) and the [`DeviceController`] driving complete cycles
//! and notifying the bound view.

mod controller;
mod transport;

pub use controller::{ActionOutcome, DeviceController, DeviceView};
pub use transport::{send_state_change, Transport, TransportError};
