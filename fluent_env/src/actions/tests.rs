//! Unit tests for the action lifecycle: accumulate, apply once, reset.

use std::collections::BTreeMap;
use std::rc::Rc;

use regex::Regex;
use rstest::rstest;

use super::{
    AllowedValuesAction, CallbackAction, CallbackGlobalAction, IgnoreAction, KeyRule,
    KeyRuleAction, PickAction, PopulateAction, Predicate,
};
use crate::error::ValidationError;
use crate::sink::{EnvSink, MemorySink};
use crate::store::ValueStore;

fn store_of(pairs: &[(&str, &str)]) -> ValueStore {
    ValueStore::from_map(
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect(),
    )
}

fn owned(keys: &[&str]) -> Vec<String> {
    keys.iter().map(|k| (*k).to_owned()).collect()
}

#[test]
fn disabled_actions_are_no_ops() {
    let mut store = store_of(&[("A", "1")]);

    PickAction::default().apply(&mut store);
    IgnoreAction::default().apply(&mut store);
    assert_eq!(store.get("A"), Some("1"));

    assert!(KeyRuleAction::new(KeyRule::Required).apply(&store).is_ok());

    let mut sink = MemorySink::new();
    PopulateAction::default().apply(&store, &mut sink);
    assert!(sink.all().is_empty());
}

#[test]
fn pick_applies_and_resets() {
    let mut store = store_of(&[("A", "1"), ("B", "2")]);
    let mut action = PickAction::default();
    action.add(owned(&["A"]));
    action.apply(&mut store);
    assert_eq!(store.all().into_keys().collect::<Vec<_>>(), owned(&["A"]));

    // The batch was consumed; a fresh apply must not re-pick anything.
    let mut other = store_of(&[("C", "3")]);
    action.apply(&mut other);
    assert_eq!(other.get("C"), Some("3"));
}

#[test]
fn ignore_forgets_only_visible_keys() {
    let mut store = store_of(&[("KEEP", "1"), ("DROP", "2")]);
    let mut action = IgnoreAction::default();
    action.add(owned(&["DROP", "NOT_PRESENT"]));
    action.apply(&mut store);
    assert_eq!(store.all().into_keys().collect::<Vec<_>>(), owned(&["KEEP"]));
}

#[test]
fn key_rule_batches_accumulate_across_adds() {
    let store = store_of(&[("A", "1")]);
    let mut action = KeyRuleAction::new(KeyRule::Required);
    action.add(owned(&["A"]));
    action.add(owned(&["B"]));
    let err = action.apply(&store);
    assert!(matches!(
        err,
        Err(ValidationError::MissingKey { key }) if key == "B"
    ));
}

#[test]
fn validation_actions_reset_even_after_a_failure() {
    let store = store_of(&[]);
    let mut action = KeyRuleAction::new(KeyRule::Required);
    action.add(owned(&["MISSING"]));
    assert!(action.apply(&store).is_err());

    // The failed batch was still consumed.
    assert!(action.apply(&store).is_ok());
}

#[rstest]
#[case(KeyRule::NotEmpty, "  ", "present but blank fails")]
#[case(KeyRule::Integer, "5.0", "decimal point fails")]
#[case(KeyRule::Integer, "+5", "leading plus fails")]
#[case(KeyRule::Boolean, "one", "not in the vocabulary")]
fn key_rules_reject_bad_values(#[case] rule: KeyRule, #[case] value: &str, #[case] why: &str) {
    let store = store_of(&[("KEY", value)]);
    let mut action = KeyRuleAction::new(rule);
    action.add(owned(&["KEY"]));
    assert!(action.apply(&store).is_err(), "{why}");
}

#[rstest]
#[case(KeyRule::NotEmpty, "value")]
#[case(KeyRule::Integer, "-5")]
#[case(KeyRule::Integer, "0")]
#[case(KeyRule::Boolean, "Off")]
fn key_rules_accept_good_values(#[case] rule: KeyRule, #[case] value: &str) {
    let store = store_of(&[("KEY", value)]);
    let mut action = KeyRuleAction::new(rule);
    action.add(owned(&["KEY"]));
    assert!(action.apply(&store).is_ok());
}

#[rstest]
#[case(KeyRule::NotEmpty)]
#[case(KeyRule::Integer)]
#[case(KeyRule::Boolean)]
fn value_rules_skip_absent_keys(#[case] rule: KeyRule) {
    let store = store_of(&[]);
    let mut action = KeyRuleAction::new(rule);
    action.add(owned(&["ABSENT"]));
    assert!(action.apply(&store).is_ok());
}

#[test]
fn allowed_values_merge_across_declarations() {
    let store = store_of(&[("MODE", "b")]);
    let mut action = AllowedValuesAction::default();
    action.add(owned(&["MODE"]), owned(&["a"]));
    action.add(owned(&["MODE"]), owned(&["b"]));
    assert!(action.apply(&store).is_ok());
}

#[test]
fn empty_allowed_set_vacuously_fails_a_present_key() {
    let store = store_of(&[("MODE", "anything")]);
    let mut action = AllowedValuesAction::default();
    action.add(owned(&["MODE"]), Vec::new());
    let err = action.apply(&store);
    assert!(matches!(
        err,
        Err(ValidationError::ValueNotAllowed { key, .. }) if key == "MODE"
    ));
}

#[test]
fn regex_reports_the_failing_pattern() -> anyhow::Result<()> {
    let store = store_of(&[("NAME", "abc123")]);
    let mut action = super::RegexAction::default();
    action.add(owned(&["NAME"]), &Regex::new("^abc")?);
    action.add(owned(&["NAME"]), &Regex::new("^[a-z]+$")?);
    match action.apply(&store) {
        Err(ValidationError::RegexMismatch { pattern, .. }) => {
            anyhow::ensure!(pattern == "^[a-z]+$");
        }
        other => anyhow::bail!("expected a regex mismatch, got {other:?}"),
    }
    Ok(())
}

#[test]
fn per_key_callbacks_see_key_and_value() {
    let store = store_of(&[("PORT", "8080")]);
    let mut action = CallbackAction::default();
    let predicate: Predicate = Rc::new(|key, value| key == "PORT" && value == "8080");
    action.add(owned(&["PORT"]), &predicate);
    assert!(action.apply(&store).is_ok());

    let rejecting: Predicate = Rc::new(|_, _| false);
    action.add(owned(&["PORT"]), &rejecting);
    assert!(matches!(
        action.apply(&store),
        Err(ValidationError::CallbackFailed { key, value }) if key == "PORT" && value == "8080"
    ));
}

#[test]
fn global_callbacks_cover_every_visible_pair() {
    let store = store_of(&[("A", "1"), ("B", "x")]);
    let mut action = CallbackGlobalAction::default();
    action.add(Rc::new(|_, value: &str| {
        value.bytes().all(|b| b.is_ascii_digit())
    }));
    assert!(matches!(
        action.apply(&store),
        Err(ValidationError::GlobalCallbackFailed { key, .. }) if key == "B"
    ));
}

#[test]
fn populate_skips_existing_keys_unless_overriding() {
    let store = store_of(&[("NEW", "fresh"), ("OLD", "imported")]);
    let mut sink = MemorySink::from_map(BTreeMap::from([(
        "OLD".to_owned(),
        "pre-existing".to_owned(),
    )]));

    let mut action = PopulateAction::default();
    action.enable(false);
    action.apply(&store, &mut sink);
    assert_eq!(sink.get("NEW"), Some("fresh".to_owned()));
    assert_eq!(sink.get("OLD"), Some("pre-existing".to_owned()));

    action.enable(true);
    action.apply(&store, &mut sink);
    assert_eq!(sink.get("OLD"), Some("imported".to_owned()));
}

#[test]
fn populate_resets_after_apply() {
    let store = store_of(&[("KEY", "value")]);
    let mut sink = MemorySink::new();
    let mut action = PopulateAction::default();
    action.enable(true);
    action.apply(&store, &mut sink);

    let mut later = MemorySink::new();
    action.apply(&store, &mut later);
    assert!(later.all().is_empty());
}
