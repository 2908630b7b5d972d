//! The in-process store of imported key-value pairs.

use std::collections::BTreeMap;


/// A store of values read from environment file/s.
///
/// The store keeps two views: `original`, the full accumulated import, and
/// the visible set derived from it. When a pick projection is active only
/// the picked keys are visible; forgotten keys are removed from both views.
#[derive(Debug, Clone, Default)]
pub struct ValueStore {
    /// The imported values, before any filtering.
    original: BTreeMap<String, String>,
    /// The visible values, recomputed from `original` and `pick_keys`.
    values: BTreeMap<String, String>,
    /// Keys to "pick". `None` means no projection is active.
    pick_keys: Option<Vec<String>>,
}

impl ValueStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store seeded with `values`.
    #[must_use]
    pub fn from_map(values: BTreeMap<String, String>) -> Self {
        Self {
            values: values.clone(),
            original: values,
            pick_keys: None,
        }
    }

    /// Merge another store's original values into this one.
    ///
    /// Later values win on key collision, then the visible set is
    /// recomputed against the current projection. Pure accumulation; this
    /// cannot fail.
    pub fn merge(&mut self, other: &Self) {
        for (key, value) in &other.original {
            self.original.insert(key.clone(), value.clone());
        }
        self.recalculate();
    }

    /// Add `keys` to the list of keys to "pick".
    ///
    /// The first call — even with an empty list — switches the store from
    /// "unprojected" to "projected", so `pick(&[])` on a fresh store leaves
    /// nothing visible until further keys are picked. Subsequent calls are
    /// additive and never erase previously picked keys.
    pub fn pick(&mut self, keys: &[String]) {
        let pick_keys = self.pick_keys.get_or_insert_with(Vec::new);
        pick_keys.extend(keys.iter().cloned());
        self.recalculate();
    }

    /// Forget `key`, removing it from the original and visible sets.
    ///
    /// A later [`merge`](Self::merge) that reintroduces the key writes
    /// straight into the original set, making it visible again. Forgetting
    /// removes current values, not future ones.
    pub fn forget_key(&mut self, key: &str) {
        self.original.remove(key);
        self.values.remove(key);
    }

    /// Recompute the visible set from the original values and the
    /// projection.
    fn recalculate(&mut self) {
        match &self.pick_keys {
            None => self.values = self.original.clone(),
            Some(pick_keys) => {
                self.values = pick_keys
                    .iter()
                    .filter_map(|key| {
                        self.original
                            .get(key)
                            .map(|value| (key.clone(), value.clone()))
                    })
                    .collect();
            }
        }
    }

    /// A snapshot of the currently visible key-value pairs.
    #[must_use]
    pub fn all(&self) -> BTreeMap<String, String> {
        self.values.clone()
    }

    /// Get a visible value, or `None` when the key is not visible.
    ///
    /// `None` is distinguishable from a legitimately empty value.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Whether `key` is currently visible.
    #[must_use]
    pub fn has_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }
}
