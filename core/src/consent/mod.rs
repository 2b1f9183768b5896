//! Consent gating
//!
//! The chat input stays closed until the user accepts the terms. The flag
//! survives restarts through a single marker key in the state store: the
//! marker is written on grant and deleted on revoke. A store that cannot
//! persist never blocks the toggle itself.

use serde_json::Value;
use tracing::warn;

use crate::state::StateStore;

/// State store key holding the consent marker
pub const CONSENT_KEY: &str = "consent-given";

/// Hint shown when the input surface is open
pub const HINT_READY: &str = "メッセージを入力して送信してください";
/// Hint shown while consent is missing
pub const HINT_CONSENT_REQUIRED: &str = "利用規約に同意するとチャットが利用できます";

/// Rendering weight of a hint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HintVariant {
    /// Highlighted, the surface is usable
    Accent,
    /// Greyed out, the surface is closed
    Muted,
}

/// Hint line under the input surface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hint {
    pub text: &'static str,
    pub variant: HintVariant,
}

/// Observable change to the input surface after a consent transition
///
/// `enabled` reflects the consent dimension only; hosts combine it with the
/// turn machine through [`ConversationEngine::can_send`].
///
/// [`ConversationEngine::can_send`]: crate::conversation::ConversationEngine::can_send
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SurfaceUpdate {
    pub enabled: bool,
    pub hint: Hint,
}

impl SurfaceUpdate {
    fn for_consent(granted: bool) -> Self {
        if granted {
            SurfaceUpdate {
                enabled: true,
                hint: Hint {
                    text: HINT_READY,
                    variant: HintVariant::Accent,
                },
            }
        } else {
            SurfaceUpdate {
                enabled: false,
                hint: Hint {
                    text: HINT_CONSENT_REQUIRED,
                    variant: HintVariant::Muted,
                },
            }
        }
    }
}

pub struct ConsentGate {
    granted: bool,
    store: StateStore,
}

impl ConsentGate {
    /// Restore the gate from the persisted marker
    ///
    /// Only the exact string "true" counts as granted. The restore runs the
    /// same path as a toggle, so the surface update and the stored marker
    /// always agree afterwards.
    pub fn initialize(store: StateStore) -> (Self, SurfaceUpdate) {
        let saved = store.get(CONSENT_KEY);
        let granted = matches!(saved, Some(Value::String(ref s)) if s == "true");

        let mut gate = Self {
            granted: false,
            store,
        };
        let update = gate.set_consent(granted);
        (gate, update)
    }

    /// Flip the consent flag and persist it
    ///
    /// Grant writes the marker, revoke deletes it. A persistence failure is
    /// logged and swallowed; the in-memory flag flips either way.
    pub fn set_consent(&mut self, granted: bool) -> SurfaceUpdate {
        self.granted = granted;

        let result = if granted {
            self.store
                .set(CONSENT_KEY.to_string(), Value::String("true".to_string()))
        } else {
            self.store.delete(CONSENT_KEY)
        };
        if let Err(err) = result {
            warn!("[ConsentGate] failed to persist consent change: {}", err);
        }

        SurfaceUpdate::for_consent(granted)
    }

    pub fn granted(&self) -> bool {
        self.granted
    }

    /// Current surface state, for hosts that re-render from scratch
    pub fn surface(&self) -> SurfaceUpdate {
        SurfaceUpdate::for_consent(self.granted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_grant_persists_marker() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("state.json");

        let store = StateStore::with_path(&path).unwrap();
        let (mut gate, _) = ConsentGate::initialize(store);
        let update = gate.set_consent(true);

        assert!(gate.granted());
        assert!(update.enabled);
        assert_eq!(update.hint.text, HINT_READY);
        assert_eq!(update.hint.variant, HintVariant::Accent);

        let reopened = StateStore::with_path(&path).unwrap();
        assert_eq!(
            reopened.get(CONSENT_KEY),
            Some(Value::String("true".to_string()))
        );
    }

    #[test]
    fn test_revoke_deletes_marker() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("state.json");

        let store = StateStore::with_path(&path).unwrap();
        let (mut gate, _) = ConsentGate::initialize(store);
        gate.set_consent(true);
        let update = gate.set_consent(false);

        assert!(!gate.granted());
        assert!(!update.enabled);
        assert_eq!(update.hint.text, HINT_CONSENT_REQUIRED);
        assert_eq!(update.hint.variant, HintVariant::Muted);

        let reopened = StateStore::with_path(&path).unwrap();
        assert_eq!(reopened.get(CONSENT_KEY), None);
    }

    #[test]
    fn test_initialize_restores_granted_state() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("state.json");

        {
            let store = StateStore::with_path(&path).unwrap();
            let (mut gate, _) = ConsentGate::initialize(store);
            gate.set_consent(true);
        }

        let store = StateStore::with_path(&path).unwrap();
        let (gate, update) = ConsentGate::initialize(store);
        assert!(gate.granted());
        assert!(update.enabled);
    }

    #[test]
    fn test_initialize_without_marker_is_ungranted() {
        let (gate, update) = ConsentGate::initialize(StateStore::ephemeral());
        assert!(!gate.granted());
        assert!(!update.enabled);
        assert_eq!(update.hint.text, HINT_CONSENT_REQUIRED);
    }

    #[test]
    fn test_initialize_ignores_unexpected_marker_values() {
        let mut store = StateStore::ephemeral();
        store
            .set(CONSENT_KEY.to_string(), Value::Bool(true))
            .unwrap();

        let (gate, _) = ConsentGate::initialize(store);
        assert!(!gate.granted());
    }

    #[test]
    fn test_roundtrip_restores_enabled_surface() {
        let (mut gate, _) = ConsentGate::initialize(StateStore::ephemeral());
        gate.set_consent(true);
        gate.set_consent(false);
        let update = gate.set_consent(true);

        assert!(update.enabled);
        assert_eq!(update.hint.text, HINT_READY);
        assert_eq!(gate.surface(), update);
    }
}
