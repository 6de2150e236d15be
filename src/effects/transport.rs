//! Transport capability for the state-change exchange.
//!
//! The crate never talks HTTP itself. The hosting application implements
//! [`Transport`] as an environment capability (how the request reaches the
//! per-service-group endpoint is its business), and the controller runs the
//! exchange through a Stillwater effect.

use crate::protocol::{ServiceGroupId, StateChangeRequest, StateChangeResponse};
use stillwater::effect::Effect;
use stillwater::prelude::*;
use thiserror::Error;

/// Failures of a state-change exchange.
///
/// There is no body contract for failures; the taxonomy covers the ways the
/// exchange itself can go wrong. The controller absorbs all of these — they
/// surface as [`ActionOutcome::Failed`], never as a propagated error.
///
/// [`ActionOutcome::Failed`]: crate::effects::ActionOutcome::Failed
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// The endpoint could not be reached at all.
    #[error("no connection to the server: {0}")]
    Unreachable(String),

    /// The endpoint answered with a non-success status.
    #[error("server rejected the request with status {status}")]
    Rejected { status: u16 },

    /// The endpoint answered success but the body was not parseable.
    #[error("malformed response body: {0}")]
    MalformedResponse(String),
}

/// Environment capability performing one request/response exchange.
///
/// Implementations must not retry on their own: the failure policy (surface
/// to the user, no automatic retry) belongs to the hosting UI.
pub trait Transport {
    /// Send a state-change request to the service group's endpoint and wait
    /// for its response.
    fn exchange(
        &self,
        group: &ServiceGroupId,
        request: &StateChangeRequest,
    ) -> Result<StateChangeResponse, TransportError>;
}

/// Effect wrapping one state-change exchange against the environment.
pub fn send_state_change<Env>(
    group: ServiceGroupId,
    request: StateChangeRequest,
) -> impl Effect<Output = StateChangeResponse, Error = TransportError, Env = Env>
where
    Env: Transport + Clone + Send + Sync + 'static,
{
    from_fn(move |env: &Env| env.exchange(&group, &request))
}
