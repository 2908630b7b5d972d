//! Population sinks: external key-value targets the pipeline can write to.
//!
//! The loader never touches ambient process state directly; population
//! actions go through an [`EnvSink`], so tests can substitute
//! [`MemorySink`] for the real environment.

use std::collections::BTreeMap;
use std::env;

/// An external mutable key-value target that population actions write into.
///
/// Writes happen one key at a time with no cross-key atomicity; a
/// concurrent reader may observe a partially populated sink. The intended
/// usage is single-threaded configuration bootstrap at process start-up.
pub trait EnvSink {
    /// Read the current value for `key`, or `None` when absent.
    fn get(&self, key: &str) -> Option<String>;

    /// Write `value` under `key`, replacing any existing value.
    fn set(&mut self, key: &str, value: &str);
}

/// The real process environment, exposed as an [`EnvSink`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvSink for ProcessEnv {
    fn get(&self, key: &str) -> Option<String> {
        env::var(key).ok()
    }

    fn set(&mut self, key: &str, value: &str) {
        // SAFETY: the loader's contract is single-threaded configuration
        // bootstrap; callers embedding it in a concurrent host must
        // serialise access to the process environment themselves.
        unsafe { env::set_var(key, value) };
    }
}

/// An in-memory [`EnvSink`] backed by a plain map.
///
/// Useful both as a caller-supplied population target and as a test double
/// for [`ProcessEnv`].
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    values: BTreeMap<String, String>,
}

impl MemorySink {
    /// Create an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a sink seeded with `values`.
    #[must_use]
    pub const fn from_map(values: BTreeMap<String, String>) -> Self {
        Self { values }
    }

    /// A snapshot of everything written to the sink so far.
    #[must_use]
    pub fn all(&self) -> BTreeMap<String, String> {
        self.values.clone()
    }
}

impl EnvSink for MemorySink {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.values.insert(key.to_owned(), value.to_owned());
    }
}

#[cfg(test)]
mod tests {
    use super::{EnvSink, MemorySink};

    #[test]
    fn memory_sink_round_trips_values() {
        let mut sink = MemorySink::new();
        assert_eq!(sink.get("KEY"), None);
        sink.set("KEY", "value");
        assert_eq!(sink.get("KEY"), Some("value".to_owned()));
        sink.set("KEY", "other");
        assert_eq!(sink.get("KEY"), Some("other".to_owned()));
    }
}
