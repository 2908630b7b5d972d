//! Shared value recognisers and casts.
//!
//! The Integer and Boolean validation rules and the `cast_integer` /
//! `cast_boolean` read accessors deliberately share one recogniser each, so
//! a value that validates also casts and vice versa.

/// Parse `value` as a signed integer literal.
///
/// The accepted grammar is strict: an optional single leading `-` followed
/// by one or more ASCII digits. No `+` sign, no whitespace, no decimal
/// point. Returns `None` when the grammar (or `i64` range) is not met.
///
/// # Examples
///
/// ```
/// use fluent_env::convert::parse_integer;
///
/// assert_eq!(parse_integer("-12345678"), Some(-12_345_678));
/// assert_eq!(parse_integer("+5"), None);
/// assert_eq!(parse_integer("5.0"), None);
/// ```
#[must_use]
pub fn parse_integer(value: &str) -> Option<i64> {
    let digits = value.strip_prefix('-').unwrap_or(value);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    value.parse().ok()
}

/// Whether `value` satisfies the signed-integer grammar of [`parse_integer`].
#[must_use]
pub fn is_integer(value: &str) -> bool {
    parse_integer(value).is_some()
}

/// Parse `value` against the fixed boolean vocabulary.
///
/// Case-insensitive membership in `true`, `false`, `1`, `0`, `yes`, `no`,
/// `on`, `off`. Anything else — including `one` and `zero` — returns
/// `None`.
///
/// # Examples
///
/// ```
/// use fluent_env::convert::parse_boolean;
///
/// assert_eq!(parse_boolean("YeS"), Some(true));
/// assert_eq!(parse_boolean("off"), Some(false));
/// assert_eq!(parse_boolean("one"), None);
/// ```
#[must_use]
pub fn parse_boolean(value: &str) -> Option<bool> {
    for truthy in ["true", "1", "yes", "on"] {
        if value.eq_ignore_ascii_case(truthy) {
            return Some(true);
        }
    }
    for falsy in ["false", "0", "no", "off"] {
        if value.eq_ignore_ascii_case(falsy) {
            return Some(false);
        }
    }
    None
}

/// Whether `value` is in the boolean vocabulary of [`parse_boolean`].
#[must_use]
pub fn is_boolean(value: &str) -> bool {
    parse_boolean(value).is_some()
}

#[cfg(test)]
mod tests {
    use super::{is_boolean, parse_boolean, parse_integer};

    use rstest::rstest;

    #[rstest]
    #[case("5", Some(5))]
    #[case("-5", Some(-5))]
    #[case("0", Some(0))]
    #[case("-12345678", Some(-12_345_678))]
    #[case("", None)]
    #[case("-", None)]
    #[case("+5", None)]
    #[case("5.0", None)]
    #[case("abc", None)]
    #[case(" 5", None)]
    #[case("--5", None)]
    fn integer_grammar(#[case] value: &str, #[case] expected: Option<i64>) {
        assert_eq!(parse_integer(value), expected);
    }

    #[test]
    fn integer_overflow_is_not_castable() {
        assert_eq!(parse_integer("99999999999999999999"), None);
    }

    #[rstest]
    #[case("true", Some(true))]
    #[case("TRUE", Some(true))]
    #[case("YeS", Some(true))]
    #[case("on", Some(true))]
    #[case("1", Some(true))]
    #[case("false", Some(false))]
    #[case("No", Some(false))]
    #[case("OFF", Some(false))]
    #[case("0", Some(false))]
    #[case("one", None)]
    #[case("zero", None)]
    #[case("", None)]
    #[case("truthy", None)]
    fn boolean_vocabulary(#[case] value: &str, #[case] expected: Option<bool>) {
        assert_eq!(parse_boolean(value), expected);
    }

    #[test]
    fn validator_and_cast_share_the_vocabulary() {
        for value in ["true", "false", "1", "0", "yes", "no", "on", "off"] {
            assert!(is_boolean(value), "{value} should be boolean-like");
            assert!(parse_boolean(value).is_some());
        }
    }
}
