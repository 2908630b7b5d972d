//! Filter actions: narrow the visible set before validation runs.

use std::mem;

use crate::store::ValueStore;

/// Accumulates keys to "pick"; everything else becomes invisible.
#[derive(Debug, Default)]
pub(crate) struct PickAction {
    enabled: bool,
    keys: Vec<String>,
}

impl PickAction {
    /// Accumulate `keys` and enable the action.
    pub(crate) fn add(&mut self, keys: Vec<String>) {
        self.enabled = true;
        self.keys.extend(keys);
    }

    /// Project the store down to the accumulated keys, then reset.
    pub(crate) fn apply(&mut self, store: &mut ValueStore) {
        let keys = mem::take(&mut self.keys);
        if mem::take(&mut self.enabled) {
            store.pick(&keys);
        }
    }
}

/// Accumulates keys to ignore; matching visible keys are forgotten.
#[derive(Debug, Default)]
pub(crate) struct IgnoreAction {
    enabled: bool,
    keys: Vec<String>,
}

impl IgnoreAction {
    /// Accumulate `keys` and enable the action.
    pub(crate) fn add(&mut self, keys: Vec<String>) {
        self.enabled = true;
        self.keys.extend(keys);
    }

    /// Forget every currently visible key on the ignore list, then reset.
    ///
    /// Ignoring a key that is not present is not an error; it is simply
    /// never forgotten.
    pub(crate) fn apply(&mut self, store: &mut ValueStore) {
        let keys = mem::take(&mut self.keys);
        if mem::take(&mut self.enabled) {
            for key in store.all().keys() {
                if keys.contains(key) {
                    store.forget_key(key);
                }
            }
        }
    }
}
