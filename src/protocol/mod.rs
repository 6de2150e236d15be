//! Wire types for the state-change exchange.
//!
//! One request/response pair per state change: the request carries the target
//! state and the current anti-replay token, the success response carries the
//! replacement token. Unknown response fields are ignored.

use crate::core::TargetState;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Rotating anti-replay token.
///
/// Included in every mutating request and replaced by the value returned in
/// the success response. A request replayed with a rotated-out token is
/// rejected server-side.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReplayToken(String);

impl ReplayToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ReplayToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ReplayToken {
    fn from(token: &str) -> Self {
        Self::new(token)
    }
}

impl From<String> for ReplayToken {
    fn from(token: String) -> Self {
        Self(token)
    }
}

/// Identifier of the service group owning the controlled device.
///
/// Opaque: the hosting view reads it from rendered markup as free text.
#[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ServiceGroupId(String);

impl ServiceGroupId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ServiceGroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ServiceGroupId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Body of a state-change request.
///
/// Serializes as `{"state": "running", "token": "t0"}`.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct StateChangeRequest {
    /// Requested target state.
    pub state: TargetState,
    /// Anti-replay token current at dispatch time.
    pub token: ReplayToken,
}

/// Body of a successful state-change response.
///
/// The token is mandatory; any other fields the server returns are ignored.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct StateChangeResponse {
    /// Replacement anti-replay token.
    pub token: ReplayToken,
}

impl StateChangeResponse {
    pub fn new(token: impl Into<ReplayToken>) -> Self {
        Self {
            token: token.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_serializes_to_wire_shape() {
        let request = StateChangeRequest {
            state: TargetState::Running,
            token: ReplayToken::new("t0"),
        };

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"state": "running", "token": "t0"})
        );
    }

    #[test]
    fn response_requires_token() {
        let err = serde_json::from_str::<StateChangeResponse>("{}");
        assert!(err.is_err());
    }

    #[test]
    fn response_ignores_extra_fields() {
        let response: StateChangeResponse =
            serde_json::from_str(r#"{"token": "t1", "uptime": 42, "detail": "ok"}"#).unwrap();
        assert_eq!(response.token, ReplayToken::new("t1"));
    }

    #[test]
    fn token_is_transparent_in_serde() {
        let token = ReplayToken::new("abc");
        assert_eq!(serde_json::to_string(&token).unwrap(), "\"abc\"");
    }

    #[test]
    fn request_roundtrips() {
        let request = StateChangeRequest {
            state: TargetState::Reboot,
            token: ReplayToken::new("t9"),
        };
        let json = serde_json::to_string(&request).unwrap();
        let back: StateChangeRequest = serde_json::from_str(&json).unwrap();
        assert_eq!(request, back);
    }
}
