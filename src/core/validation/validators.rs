//! Reusable field validators
//!
//! Each validator is a small closure over the raw text of one field. The
//! schema chains them per field and keeps the first failure.

use regex::Regex;

/// A single field rule: `Ok(())` or the message to show next to the field
pub type Rule = Box<dyn Fn(&str) -> Result<(), String> + Send + Sync>;

/// Validator: field must not be empty
pub fn required(
    message: &'static str,
) -> impl Fn(&str) -> Result<(), String> + Send + Sync + Clone {
    move |value: &str| {
        if value.is_empty() {
            Err(message.to_string())
        } else {
            Ok(())
        }
    }
}

/// Validator: field must match the whole of `pattern`
///
/// Empty values pass; pair with [`required`] to reject them.
pub fn matches_pattern(
    pattern: &'static Regex,
    message: &'static str,
) -> impl Fn(&str) -> Result<(), String> + Send + Sync + Clone {
    move |value: &str| {
        if value.is_empty() || pattern.is_match(value) {
            Ok(())
        } else {
            Err(message.to_string())
        }
    }
}

/// Validator: value must be in allowed list
pub fn one_of(
    allowed: &'static [&'static str],
    message: &'static str,
) -> impl Fn(&str) -> Result<(), String> + Send + Sync + Clone {
    move |value: &str| {
        if allowed.contains(&value) {
            Ok(())
        } else {
            Err(message.to_string())
        }
    }
}

/// Run `rules` in order and return the first failure
pub fn first_violation(value: &str, rules: &[Rule]) -> Option<String> {
    rules.iter().find_map(|rule| rule(value).err())
}
