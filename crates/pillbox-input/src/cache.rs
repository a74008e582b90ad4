#![forbid(unsafe_code)]

//! Memoized derived views of the collection.
//!
//! `keys()` and `values()` are stateful accessors, not pure functions: each
//! owns one cached projection and the clock stamp it was built at. A view is
//! stale iff the collection's clock is strictly newer than its own mark;
//! stale views are rebuilt exactly once, fresh views come back as the same
//! cached slice without recomputing.
//!
//! A type-ahead consumer may poll these on every keystroke against a
//! collection that rarely changes; rebuilding per call would make a typing
//! session quadratic-ish overall, while the cache keeps repeated reads O(1)
//! amortized.

/// Cached `keys`/`values` projections with their as-of stamps.
#[derive(Debug, Clone)]
pub struct DerivedViews<K> {
    keys: Vec<Option<K>>,
    keys_as_of: u64,
    values: Vec<String>,
    values_as_of: u64,
}

impl<K> Default for DerivedViews<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K> DerivedViews<K> {
    /// Fresh caches, consistent with an untouched (empty) collection at
    /// clock stamp zero.
    #[must_use]
    pub fn new() -> Self {
        Self {
            keys: Vec::new(),
            keys_as_of: 0,
            values: Vec::new(),
            values_as_of: 0,
        }
    }

    /// The cached key projection, rebuilding via `project` only if `stamp`
    /// is strictly newer than the last rebuild.
    pub fn keys(&mut self, stamp: u64, project: impl FnOnce() -> Vec<Option<K>>) -> &[Option<K>] {
        if stamp > self.keys_as_of {
            self.keys = project();
            self.keys_as_of = stamp;
        }
        &self.keys
    }

    /// The cached value projection, with the same staleness rule.
    pub fn values(&mut self, stamp: u64, project: impl FnOnce() -> Vec<String>) -> &[String] {
        if stamp > self.values_as_of {
            self.values = project();
            self.values_as_of = stamp;
        }
        &self.values
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_cache_is_empty_without_projecting() {
        let mut views: DerivedViews<u32> = DerivedViews::new();
        let keys = views.keys(0, || panic!("must not project at stamp zero"));
        assert!(keys.is_empty());
    }

    #[test]
    fn rebuilds_exactly_once_per_stamp() {
        let mut views: DerivedViews<u32> = DerivedViews::new();
        let mut rebuilds = 0;

        for _ in 0..3 {
            views.values(1, || {
                rebuilds += 1;
                vec!["a".to_string()]
            });
        }
        assert_eq!(rebuilds, 1);

        views.values(2, || {
            rebuilds += 1;
            vec!["a".to_string(), "b".to_string()]
        });
        assert_eq!(rebuilds, 2);
    }

    #[test]
    fn equal_stamp_is_fresh() {
        let mut views: DerivedViews<u32> = DerivedViews::new();
        views.keys(5, || vec![Some(1)]);
        // Same stamp again: strictly-newer rule says fresh.
        let keys = views.keys(5, || panic!("must not rebuild"));
        assert_eq!(keys, [Some(1)]);
    }

    #[test]
    fn keys_and_values_invalidate_independently() {
        let mut views: DerivedViews<u32> = DerivedViews::new();
        views.keys(1, || vec![Some(1)]);
        // values was never built at stamp 1; it still must project.
        let mut projected = false;
        views.values(1, || {
            projected = true;
            vec!["a".to_string()]
        });
        assert!(projected);
    }

    #[test]
    fn stale_view_reflects_new_projection() {
        let mut views: DerivedViews<u32> = DerivedViews::new();
        views.values(1, || vec!["a".to_string()]);
        let values = views.values(2, || vec!["a".to_string(), "b".to_string()]);
        assert_eq!(values, ["a".to_string(), "b".to_string()]);
    }
}
