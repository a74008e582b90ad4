#![forbid(unsafe_code)]

//! Pill data and the creation-attempt vocabulary.
//!
//! A pill pairs a human-visible `value` with an optional hidden `key` (for
//! example value `"Alice"` keyed by a user id). The key type `K` is chosen
//! by the embedding application; this crate never inspects it.

/// The externally visible data of one pill: its value and optional key.
///
/// Snapshots returned by `data()` and removal operations use this type; the
/// live record (which also owns the renderer handle) stays inside the
/// collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PillData<K> {
    /// Human-visible string, non-empty post-trim at creation.
    pub value: String,
    /// Optional hidden key resolved at creation.
    pub key: Option<K>,
}

/// What a resolver decided about a candidate value.
///
/// `KeyAndValue` rewrites the visible text as well as attaching a key, which
/// lets a resolver normalize input (e.g. `"alice"` becomes value
/// `"Alice Smith"` with key `42`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyResolution<K> {
    /// Keep the value as typed; no hidden key.
    NoKey,
    /// Keep the value as typed; attach this key.
    Key(K),
    /// Override both: store this key and replace the visible value.
    KeyAndValue(K, String),
}

/// Veto flag for one creation attempt.
///
/// Handed to the resolver and the validator; either may latch it. Once
/// latched the attempt produces no pill and no collection mutation. Latching
/// twice is harmless.
#[derive(Debug, Default)]
pub struct Rejection {
    rejected: bool,
}

impl Rejection {
    /// A fresh, un-latched flag.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Veto the current creation attempt.
    pub fn reject(&mut self) {
        self.rejected = true;
    }

    /// Whether the attempt has been vetoed.
    #[must_use]
    pub fn is_rejected(&self) -> bool {
        self.rejected
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejection_starts_clear() {
        let rejection = Rejection::new();
        assert!(!rejection.is_rejected());
    }

    #[test]
    fn rejection_latches() {
        let mut rejection = Rejection::new();
        rejection.reject();
        assert!(rejection.is_rejected());
        // A second call is idempotent.
        rejection.reject();
        assert!(rejection.is_rejected());
    }

    #[test]
    fn resolution_carries_override() {
        let resolution = KeyResolution::KeyAndValue(7u32, "Alice Smith".to_string());
        match resolution {
            KeyResolution::KeyAndValue(key, value) => {
                assert_eq!(key, 7);
                assert_eq!(value, "Alice Smith");
            }
            _ => panic!("expected KeyAndValue"),
        }
    }

    #[test]
    fn pill_data_eq() {
        let a = PillData {
            value: "x".to_string(),
            key: Some(1u8),
        };
        let b = a.clone();
        assert_eq!(a, b);
    }
}
