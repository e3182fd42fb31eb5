//! Identifier helpers shared by the backends.

use std::borrow::Cow;
use std::collections::HashSet;

/// Reserved-word set of a target language plus the rule used to escape a
/// colliding identifier.
#[derive(Debug, Clone)]
pub struct ReservedWords {
    words: HashSet<String>,
    prefix: &'static str,
}

impl ReservedWords {
    /// Creates a reserved-word set escaping collisions with `prefix`.
    #[must_use]
    pub fn new<I, S>(words: I, prefix: &'static str) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            words: words.into_iter().map(Into::into).collect(),
            prefix,
        }
    }

    /// Returns true if `name` collides with a reserved word.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.words.contains(name)
    }

    /// Escapes `name` if it collides with a reserved word.
    #[must_use]
    pub fn escape<'a>(&self, name: &'a str) -> Cow<'a, str> {
        if self.contains(name) {
            Cow::Owned(format!("{}{}", self.prefix, name))
        } else {
            Cow::Borrowed(name)
        }
    }
}

/// Converts a string to snake_case.
#[must_use]
pub fn to_snake_case(s: &str) -> String {
    let mut result = String::with_capacity(s.len() + 4);
    for (i, c) in s.chars().enumerate() {
        if c.is_uppercase() && i > 0 {
            result.push('_');
        }
        result.push(c.to_ascii_lowercase());
    }
    result
}

/// Strips the lowercase API prefix from a command name (`glGetString` -> `GetString`).
#[must_use]
pub fn strip_api_prefix(name: &str) -> &str {
    let rest = name.trim_start_matches(|c: char| c.is_ascii_lowercase());
    if rest.is_empty() { name } else { rest }
}

/// Makes an enumerant short name usable as an identifier.
///
/// Short names such as `2D` begin with a digit; they get a leading underscore.
#[must_use]
pub fn member_ident(short_name: &str) -> Cow<'_, str> {
    if short_name.starts_with(|c: char| c.is_ascii_digit()) {
        Cow::Owned(format!("_{short_name}"))
    } else {
        Cow::Borrowed(short_name)
    }
}
