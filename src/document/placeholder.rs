//! Placeholder grammar shared by every substitution pass.
//!
//! A token is `{{`, optional whitespace, a key, optional whitespace, `}}`.
//! Keys follow identifier rules: `[A-Za-z_][A-Za-z0-9_]*`.

use lazy_static::lazy_static;
use regex::Regex;
use std::borrow::Cow;
use std::ops::Range;

use super::context::Context;

lazy_static! {
    static ref TOKEN: Regex =
        Regex::new(r"\{\{\s*([A-Za-z_][A-Za-z0-9_]*)\s*\}\}").expect("placeholder pattern is valid");
}

/// What to do with a token whose key is not in the context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingKey {
    /// Render it as an empty string.
    Blank,
    /// Leave the token text as it is.
    Keep,
}

/// One token match and the text that replaces it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Substitution {
    pub range: Range<usize>,
    pub key: String,
    pub value: String,
}

/// Locate every token in `text`, left to right, with its replacement.
pub fn find_substitutions(text: &str, context: &Context, missing: MissingKey) -> Vec<Substitution> {
    TOKEN
        .captures_iter(text)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let key = caps.get(1)?.as_str();
            let value = match (context.get(key), missing) {
                (Some(value), _) => value.to_string(),
                (None, MissingKey::Blank) => String::new(),
                (None, MissingKey::Keep) => return None,
            };
            Some(Substitution {
                range: whole.range(),
                key: key.to_string(),
                value,
            })
        })
        .collect()
}

/// Replace every token in `text` in a single pass.
///
/// Replacement values are not scanned again, so a value that itself looks
/// like a token is inserted literally.
pub fn substitute<'t>(text: &'t str, context: &Context, missing: MissingKey) -> Cow<'t, str> {
    let substitutions = find_substitutions(text, context, missing);
    if substitutions.is_empty() {
        return Cow::Borrowed(text);
    }

    let mut out = String::with_capacity(text.len());
    let mut cursor = 0;
    for sub in &substitutions {
        out.push_str(&text[cursor..sub.range.start]);
        out.push_str(&sub.value);
        cursor = sub.range.end;
    }
    out.push_str(&text[cursor..]);
    Cow::Owned(out)
}
