//! Initial-state resolution from rendered state signatures.
//!
//! The hosting view renders the last confirmed device state as a localized
//! text label. [`StateFactory::resolve`] is the sole entry point for turning
//! that label into a starting [`DeviceState`]; it never falls back to a
//! default, since a silent default would present controls inconsistent with
//! server-side reality.

use crate::core::state::DeviceState;
use std::collections::HashMap;
use thiserror::Error;

/// Errors raised while resolving a state signature.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StateError {
    /// The signature matches no known state label.
    ///
    /// Carries the normalized signature for diagnostics.
    #[error("\"{signature}\" is not a valid state signature")]
    UnknownSignature { signature: String },
}

/// Maps rendered state labels to starting states.
///
/// Lookup is case- and surrounding-whitespace-insensitive. The default map
/// recognizes the two labels of the stock admin markup; hosting views with
/// other localizations supply their own via [`with_labels`](Self::with_labels).
///
/// # Example
///
/// ```rust
/// use devstate::core::{DeviceState, StateFactory};
///
/// let factory = StateFactory::new();
/// assert_eq!(
///     factory.resolve(" Включено ").unwrap(),
///     DeviceState::Running
/// );
/// assert!(factory.resolve("unknown").is_err());
/// ```
#[derive(Clone, Debug)]
pub struct StateFactory {
    labels: HashMap<String, DeviceState>,
}

impl StateFactory {
    /// Factory with the stock label map: `"включено"` → `Running`,
    /// `"выключено"` → `Stopped`.
    pub fn new() -> Self {
        Self::with_labels([
            ("включено", DeviceState::Running),
            ("выключено", DeviceState::Stopped),
        ])
    }

    /// Factory with a custom label map.
    ///
    /// Labels are normalized (trimmed, lowercased) on insertion, the same
    /// way signatures are normalized on lookup. Labels should name confirmed
    /// states; mapping one to `Rebooting` is meaningless, since the server
    /// never renders it.
    pub fn with_labels<I, L>(labels: I) -> Self
    where
        I: IntoIterator<Item = (L, DeviceState)>,
        L: AsRef<str>,
    {
        let labels = labels
            .into_iter()
            .map(|(label, state)| (normalize(label.as_ref()), state))
            .collect();
        Self { labels }
    }

    /// Resolve a rendered signature to a starting state.
    ///
    /// Fails with [`StateError::UnknownSignature`] for unrecognized labels —
    /// propagate this to whoever is initializing the device controller; do
    /// not default.
    pub fn resolve(&self, signature: &str) -> Result<DeviceState, StateError> {
        let normalized = normalize(signature);
        self.labels
            .get(&normalized)
            .copied()
            .ok_or(StateError::UnknownSignature {
                signature: normalized,
            })
    }
}

impl Default for StateFactory {
    fn default() -> Self {
        Self::new()
    }
}

fn normalize(signature: &str) -> String {
    signature.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_stock_labels() {
        let factory = StateFactory::new();
        assert_eq!(factory.resolve("включено").unwrap(), DeviceState::Running);
        assert_eq!(factory.resolve("выключено").unwrap(), DeviceState::Stopped);
    }

    #[test]
    fn resolution_is_case_and_whitespace_insensitive() {
        let factory = StateFactory::new();
        assert_eq!(factory.resolve("Включено").unwrap(), DeviceState::Running);
        assert_eq!(
            factory.resolve("  ВЫКЛЮЧЕНО\n").unwrap(),
            DeviceState::Stopped
        );
    }

    #[test]
    fn unknown_signature_fails_with_offending_label() {
        let factory = StateFactory::new();
        let err = factory.resolve(" Unknown ").unwrap_err();
        assert_eq!(
            err,
            StateError::UnknownSignature {
                signature: "unknown".to_string()
            }
        );
        assert_eq!(
            err.to_string(),
            "\"unknown\" is not a valid state signature"
        );
    }

    #[test]
    fn empty_signature_is_unknown() {
        let factory = StateFactory::new();
        assert!(factory.resolve("").is_err());
    }

    #[test]
    fn custom_labels_are_normalized_on_insertion() {
        let factory = StateFactory::with_labels([
            (" Enabled ", DeviceState::Running),
            ("Disabled", DeviceState::Stopped),
        ]);

        assert_eq!(factory.resolve("enabled").unwrap(), DeviceState::Running);
        assert_eq!(factory.resolve(" DISABLED ").unwrap(), DeviceState::Stopped);
        // Custom maps replace the stock labels, not extend them.
        assert!(factory.resolve("включено").is_err());
    }
}
