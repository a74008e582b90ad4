#![forbid(unsafe_code)]

//! Resolve-then-validate gate for pill creation.
//!
//! Two injectable callbacks sit in front of the collection. The *resolver*
//! maps a raw value to an optional hidden key (and may rewrite the value);
//! the *validator* inspects the resolved pair. Either one may veto by
//! latching the attempt's [`Rejection`] flag. Splitting the two lets a
//! consumer do resolution and validation in one callback or divide the
//! concerns; both always get a chance to veto.

use crate::pill::{KeyResolution, Rejection};

/// Maps a raw value to a key decision, with veto capability.
pub type Resolver<K> = Box<dyn FnMut(&str, &mut Rejection) -> KeyResolution<K>>;

/// Inspects the resolved `(value, key)` pair, with veto capability.
pub type Validator<K> = Box<dyn FnMut(&str, Option<&K>, &mut Rejection)>;

/// The creation gate: holds the registered callbacks and runs one attempt.
///
/// Both callbacks are optional; with neither registered every non-empty
/// value is accepted with no key.
pub struct ValidationPipeline<K> {
    resolver: Option<Resolver<K>>,
    validator: Option<Validator<K>>,
}

impl<K> Default for ValidationPipeline<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K> ValidationPipeline<K> {
    /// A pipeline with no callbacks registered.
    #[must_use]
    pub fn new() -> Self {
        Self {
            resolver: None,
            validator: None,
        }
    }

    /// Register the key-resolution callback, replacing any previous one.
    pub fn set_resolver(&mut self, resolver: impl FnMut(&str, &mut Rejection) -> KeyResolution<K> + 'static) {
        self.resolver = Some(Box::new(resolver));
    }

    /// Register the validator callback, replacing any previous one.
    pub fn set_validator(&mut self, validator: impl FnMut(&str, Option<&K>, &mut Rejection) + 'static) {
        self.validator = Some(Box::new(validator));
    }

    /// Run one creation attempt.
    ///
    /// Callers must not pass a value that is empty post-trim. When
    /// `explicit_key` is supplied the resolver is skipped entirely; the
    /// validator always runs. Returns the final `(value, key)` pair, or
    /// `None` if either party vetoed.
    pub fn resolve(&mut self, raw_value: &str, explicit_key: Option<K>) -> Option<(String, Option<K>)> {
        let mut rejection = Rejection::new();
        let mut value = raw_value.to_string();

        let key = match explicit_key {
            Some(key) => Some(key),
            None => match &mut self.resolver {
                Some(resolver) => match resolver(&value, &mut rejection) {
                    KeyResolution::NoKey => None,
                    KeyResolution::Key(key) => Some(key),
                    KeyResolution::KeyAndValue(key, override_value) => {
                        value = override_value;
                        Some(key)
                    }
                },
                None => None,
            },
        };

        // The validator runs even when the resolver already vetoed: both
        // mechanisms see every attempt.
        if let Some(validator) = &mut self.validator {
            validator(&value, key.as_ref(), &mut rejection);
        }

        if rejection.is_rejected() {
            return None;
        }
        Some((value, key))
    }
}

impl<K> std::fmt::Debug for ValidationPipeline<K> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ValidationPipeline")
            .field("resolver", &self.resolver.is_some())
            .field("validator", &self.validator.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_with_no_callbacks() {
        let mut pipeline: ValidationPipeline<u32> = ValidationPipeline::new();
        assert_eq!(
            pipeline.resolve("Alice", None),
            Some(("Alice".to_string(), None))
        );
    }

    #[test]
    fn resolver_attaches_key() {
        let mut pipeline: ValidationPipeline<u32> = ValidationPipeline::new();
        pipeline.set_resolver(|_value, _reject| KeyResolution::Key(42));
        assert_eq!(
            pipeline.resolve("Alice", None),
            Some(("Alice".to_string(), Some(42)))
        );
    }

    #[test]
    fn resolver_overrides_value_and_key() {
        let mut pipeline: ValidationPipeline<u32> = ValidationPipeline::new();
        pipeline.set_resolver(|_value, _reject| {
            KeyResolution::KeyAndValue(42, "Alice Smith".to_string())
        });
        assert_eq!(
            pipeline.resolve("Alice", None),
            Some(("Alice Smith".to_string(), Some(42)))
        );
    }

    #[test]
    fn explicit_key_skips_resolver() {
        let mut pipeline: ValidationPipeline<u32> = ValidationPipeline::new();
        pipeline.set_resolver(|_value, _reject| panic!("resolver must not run"));
        assert_eq!(
            pipeline.resolve("Alice", Some(7)),
            Some(("Alice".to_string(), Some(7)))
        );
    }

    #[test]
    fn validator_runs_with_explicit_key() {
        let mut pipeline: ValidationPipeline<u32> = ValidationPipeline::new();
        pipeline.set_validator(|_value, key, reject| {
            if key == Some(&7) {
                reject.reject();
            }
        });
        assert_eq!(pipeline.resolve("Alice", Some(7)), None);
        assert!(pipeline.resolve("Alice", Some(8)).is_some());
    }

    #[test]
    fn resolver_can_reject() {
        let mut pipeline: ValidationPipeline<u32> = ValidationPipeline::new();
        pipeline.set_resolver(|_value, reject| {
            reject.reject();
            KeyResolution::NoKey
        });
        assert_eq!(pipeline.resolve("Alice", None), None);
    }

    #[test]
    fn validator_sees_resolved_pair() {
        let mut pipeline: ValidationPipeline<u32> = ValidationPipeline::new();
        pipeline.set_resolver(|_value, _reject| {
            KeyResolution::KeyAndValue(1, "normalized".to_string())
        });
        pipeline.set_validator(|value, key, reject| {
            assert_eq!(value, "normalized");
            assert_eq!(key, Some(&1));
            let _ = reject;
        });
        assert!(pipeline.resolve("raw", None).is_some());
    }

    #[test]
    fn validator_runs_even_after_resolver_veto() {
        let mut pipeline: ValidationPipeline<u32> = ValidationPipeline::new();
        pipeline.set_resolver(|_value, reject| {
            reject.reject();
            KeyResolution::NoKey
        });
        let validator_ran = std::rc::Rc::new(std::cell::Cell::new(false));
        let saw = std::rc::Rc::clone(&validator_ran);
        pipeline.set_validator(move |_value, _key, _reject| saw.set(true));
        assert_eq!(pipeline.resolve("Alice", None), None);
        assert!(validator_ran.get());
    }
}
