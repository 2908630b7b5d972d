//! The declarative pipeline actions.
//!
//! Actions accumulate configuration through repeated `add`/`enable` calls
//! and are consumed by a single `apply` against a
//! [`ValueStore`](crate::ValueStore). Applying a disabled action is a
//! no-op; applying an enabled one takes the accumulated payload first, so
//! the action is back to its empty, disabled state afterwards even when a
//! validation check fails. Each declared batch is consumed exactly once.
//!
//! The loader runs the full set in a fixed order at load time — filters,
//! then validations, then populations — and applies single actions
//! immediately for declarations made after loading.

use std::rc::Rc;

mod filter;
mod populate;
mod validate;

pub(crate) use filter::{IgnoreAction, PickAction};
pub(crate) use populate::PopulateAction;
pub(crate) use validate::{
    AllowedValuesAction, CallbackAction, CallbackGlobalAction, KeyRule, KeyRuleAction, RegexAction,
};

/// A validation predicate over a `(key, value)` pair.
///
/// Reference-counted so one predicate can be registered for several keys.
pub(crate) type Predicate = Rc<dyn Fn(&str, &str) -> bool>;

#[cfg(test)]
mod tests;
