//! Population actions: copy the visible set into an external sink.

use std::mem;

use crate::sink::EnvSink;
use crate::store::ValueStore;

/// Writes every visible key-value pair into a sink when applied.
///
/// With `override_existing` left false, keys already present in the sink
/// are skipped.
#[derive(Debug, Default)]
pub(crate) struct PopulateAction {
    enabled: bool,
    override_existing: bool,
}

impl PopulateAction {
    /// Turn population on. A repeated call replaces the override flag.
    pub(crate) fn enable(&mut self, override_existing: bool) {
        self.enabled = true;
        self.override_existing = override_existing;
    }

    /// Copy the store's visible pairs into `sink`, then reset.
    ///
    /// Keys are written one at a time; there is no cross-key atomicity.
    pub(crate) fn apply(&mut self, store: &ValueStore, sink: &mut dyn EnvSink) {
        let override_existing = mem::take(&mut self.override_existing);
        if !mem::take(&mut self.enabled) {
            return;
        }
        for (key, value) in store.all() {
            if override_existing || sink.get(&key).is_none() {
                sink.set(&key, &value);
            }
        }
    }
}
