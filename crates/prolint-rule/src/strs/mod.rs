//! Naming-case helpers shared by style rules.
//!
//! Predicates mirror the conventions proto style guides describe:
//! snake-case names must not begin or end with an underscore, and camel
//! case tolerates digits after the first character.

/// Returns `true` when `s` is non-empty `UPPER_SNAKE_CASE`.
#[must_use]
pub fn is_upper_snake_case(s: &str) -> bool {
    is_snake_case(s, char::is_ascii_uppercase)
}

/// Returns `true` when `s` is non-empty `lower_snake_case`.
#[must_use]
pub fn is_lower_snake_case(s: &str) -> bool {
    is_snake_case(s, char::is_ascii_lowercase)
}

fn is_snake_case(s: &str, is_letter_case: impl Fn(&char) -> bool) -> bool {
    if s.is_empty() || s.starts_with('_') || s.ends_with('_') {
        return false;
    }
    s.chars()
        .all(|c| is_letter_case(&c) || c.is_ascii_digit() || c == '_')
}

/// Returns `true` when `s` is non-empty `UpperCamelCase`.
#[must_use]
pub fn is_upper_camel_case(s: &str) -> bool {
    let Some(first) = s.chars().next() else {
        return false;
    };
    first.is_ascii_uppercase() && s.chars().all(|c| c.is_ascii_alphanumeric())
}

/// Converts a camel-case or mixed name to `lower_snake_case`.
///
/// A word boundary is inserted before each uppercase letter that follows
/// a lowercase letter or digit, then everything is lowercased.
#[must_use]
pub fn to_lower_snake_case(s: &str) -> String {
    let mut output = String::with_capacity(s.len());
    let mut prior_lower_or_digit = false;
    for c in s.chars() {
        if c.is_ascii_uppercase() {
            if prior_lower_or_digit {
                output.push('_');
            }
            output.push(c.to_ascii_lowercase());
            prior_lower_or_digit = false;
        } else {
            output.push(c);
            prior_lower_or_digit = c.is_ascii_lowercase() || c.is_ascii_digit();
        }
    }
    output
}
