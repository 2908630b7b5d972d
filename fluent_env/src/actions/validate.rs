//! Validation actions: check the visible set against declared rules.
//!
//! Every `apply` takes the accumulated payload before evaluating it, so the
//! action resets even when a check fails. The first violation found aborts
//! with a [`ValidationError`] citing the offending key and value.

use std::collections::BTreeMap;
use std::mem;

use regex::Regex;

use super::Predicate;
use crate::convert;
use crate::error::ValidationError;
use crate::store::ValueStore;

/// The flat per-key rules: each checks one key in isolation.
#[derive(Debug, Clone, Copy)]
pub(crate) enum KeyRule {
    /// The key must be present in the store.
    Required,
    /// When present, the trimmed value must be non-empty.
    NotEmpty,
    /// When present, the value must match the signed-integer grammar.
    Integer,
    /// When present, the value must be in the boolean vocabulary.
    Boolean,
}

/// An action applying one [`KeyRule`] to an accumulated list of keys.
///
/// The rule is fixed at construction; only the key list and the enabled
/// flag are consumed by `apply`.
#[derive(Debug)]
pub(crate) struct KeyRuleAction {
    rule: KeyRule,
    enabled: bool,
    keys: Vec<String>,
}

impl KeyRuleAction {
    /// Create a disabled action for `rule`.
    pub(crate) const fn new(rule: KeyRule) -> Self {
        Self {
            rule,
            enabled: false,
            keys: Vec::new(),
        }
    }

    /// Accumulate `keys` and enable the action.
    pub(crate) fn add(&mut self, keys: Vec<String>) {
        self.enabled = true;
        self.keys.extend(keys);
    }

    /// Check the accumulated keys against the store, then reset.
    pub(crate) fn apply(&mut self, store: &ValueStore) -> Result<(), ValidationError> {
        let keys = mem::take(&mut self.keys);
        if !mem::take(&mut self.enabled) {
            return Ok(());
        }
        for key in keys {
            self.check_key(store, key)?;
        }
        Ok(())
    }

    fn check_key(&self, store: &ValueStore, key: String) -> Result<(), ValidationError> {
        match self.rule {
            KeyRule::Required => {
                if !store.has_key(&key) {
                    return Err(ValidationError::MissingKey { key });
                }
            }
            KeyRule::NotEmpty => {
                if let Some(value) = store.get(&key)
                    && value.trim().is_empty()
                {
                    return Err(ValidationError::Empty { key });
                }
            }
            KeyRule::Integer => {
                if let Some(value) = store.get(&key)
                    && !convert::is_integer(value)
                {
                    return Err(ValidationError::NotAnInteger {
                        key,
                        value: value.to_owned(),
                    });
                }
            }
            KeyRule::Boolean => {
                if let Some(value) = store.get(&key)
                    && !convert::is_boolean(value)
                {
                    return Err(ValidationError::NotABoolean {
                        key,
                        value: value.to_owned(),
                    });
                }
            }
        }
        Ok(())
    }
}

/// Per-key allowed-values lists.
#[derive(Debug, Default)]
pub(crate) struct AllowedValuesAction {
    enabled: bool,
    allowed: BTreeMap<String, Vec<String>>,
}

impl AllowedValuesAction {
    /// Allow `values` for each of `keys` and enable the action.
    pub(crate) fn add(&mut self, keys: Vec<String>, values: Vec<String>) {
        self.enabled = true;
        for key in keys {
            self.allowed.entry(key).or_default().extend(values.clone());
        }
    }

    /// Check every declared key whose value is present, then reset.
    ///
    /// A key declared with an empty allowed-set always fails when present:
    /// no value is vacuously allowed.
    pub(crate) fn apply(&mut self, store: &ValueStore) -> Result<(), ValidationError> {
        let allowed = mem::take(&mut self.allowed);
        if !mem::take(&mut self.enabled) {
            return Ok(());
        }
        for (key, values) in allowed {
            if let Some(value) = store.get(&key)
                && !values.iter().any(|allowed_value| allowed_value == value)
            {
                return Err(ValidationError::ValueNotAllowed {
                    key,
                    value: value.to_owned(),
                    allowed: values,
                });
            }
        }
        Ok(())
    }
}

/// Per-key regex pattern lists. Patterns are compiled at declaration time.
#[derive(Debug, Default)]
pub(crate) struct RegexAction {
    enabled: bool,
    patterns: BTreeMap<String, Vec<Regex>>,
}

impl RegexAction {
    /// Require `pattern` to match each of `keys`, and enable the action.
    pub(crate) fn add(&mut self, keys: Vec<String>, pattern: &Regex) {
        self.enabled = true;
        for key in keys {
            self.patterns.entry(key).or_default().push(pattern.clone());
        }
    }

    /// Check every declared key whose value is present against all of its
    /// patterns, then reset. The first failing pattern is reported.
    pub(crate) fn apply(&mut self, store: &ValueStore) -> Result<(), ValidationError> {
        let patterns = mem::take(&mut self.patterns);
        if !mem::take(&mut self.enabled) {
            return Ok(());
        }
        for (key, key_patterns) in patterns {
            let Some(value) = store.get(&key) else {
                continue;
            };
            for pattern in key_patterns {
                if !pattern.is_match(value) {
                    return Err(ValidationError::RegexMismatch {
                        key,
                        value: value.to_owned(),
                        pattern: pattern.as_str().to_owned(),
                    });
                }
            }
        }
        Ok(())
    }
}

/// Per-key predicate lists.
#[derive(Default)]
pub(crate) struct CallbackAction {
    enabled: bool,
    callbacks: BTreeMap<String, Vec<Predicate>>,
}

impl CallbackAction {
    /// Register `predicate` for each of `keys` and enable the action.
    pub(crate) fn add(&mut self, keys: Vec<String>, predicate: &Predicate) {
        self.enabled = true;
        for key in keys {
            self.callbacks
                .entry(key)
                .or_default()
                .push(Predicate::clone(predicate));
        }
    }

    /// Run every predicate for each declared key that is present, then
    /// reset.
    pub(crate) fn apply(&mut self, store: &ValueStore) -> Result<(), ValidationError> {
        let callbacks = mem::take(&mut self.callbacks);
        if !mem::take(&mut self.enabled) {
            return Ok(());
        }
        for (key, key_callbacks) in callbacks {
            let Some(value) = store.get(&key) else {
                continue;
            };
            for callback in key_callbacks {
                if !callback(&key, value) {
                    return Err(ValidationError::CallbackFailed {
                        key,
                        value: value.to_owned(),
                    });
                }
            }
        }
        Ok(())
    }
}

/// Predicates applied to every visible key-value pair.
#[derive(Default)]
pub(crate) struct CallbackGlobalAction {
    enabled: bool,
    callbacks: Vec<Predicate>,
}

impl CallbackGlobalAction {
    /// Register a global `predicate` and enable the action.
    pub(crate) fn add(&mut self, predicate: Predicate) {
        self.enabled = true;
        self.callbacks.push(predicate);
    }

    /// Run every registered predicate over every visible pair, then reset.
    pub(crate) fn apply(&mut self, store: &ValueStore) -> Result<(), ValidationError> {
        let callbacks = mem::take(&mut self.callbacks);
        if !mem::take(&mut self.enabled) {
            return Ok(());
        }
        for (key, value) in store.all() {
            for callback in &callbacks {
                if !callback(&key, &value) {
                    return Err(ValidationError::GlobalCallbackFailed { key, value });
                }
            }
        }
        Ok(())
    }
}
