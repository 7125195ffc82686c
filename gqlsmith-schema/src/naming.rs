//! Naming helpers shared by code generation.

/// Converts a string to kebab-case.
///
/// Word boundaries are placed before an uppercase letter that follows a
/// lowercase letter or digit, and before the last capital of an acronym
/// that starts a new word (`UserIDFilter` becomes `user-id-filter`).
#[must_use]
pub fn to_kebab_case(s: &str) -> String {
    let chars: Vec<char> = s.chars().collect();
    let mut result = String::with_capacity(s.len() + 4);

    for (i, &c) in chars.iter().enumerate() {
        if c == '_' || c == '-' || c == ' ' {
            if !result.is_empty() && !result.ends_with('-') {
                result.push('-');
            }
            continue;
        }
        if c.is_uppercase() && i > 0 {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
            let boundary = prev.is_lowercase()
                || prev.is_ascii_digit()
                || (prev.is_uppercase() && next_is_lower);
            if boundary && !result.ends_with('-') {
                result.push('-');
            }
        }
        result.extend(c.to_lowercase());
    }

    result
}

/// Returns true if `prefix` starts `name` and ends on a word boundary.
#[must_use]
pub fn is_word_prefix(prefix: &str, name: &str) -> bool {
    match name.strip_prefix(prefix) {
        Some(rest) => !prefix.is_empty() && rest.chars().next().is_none_or(char::is_uppercase),
        None => false,
    }
}

/// Removes a trailing word from a PascalCase name, keeping at least one character.
#[must_use]
pub fn strip_suffix_word<'a>(name: &'a str, suffix: &str) -> &'a str {
    match name.strip_suffix(suffix) {
        Some(stem) if !stem.is_empty() => stem,
        _ => name,
    }
}
