//! String helpers: truncation, capitalisation and list-to-prose joining.
//!
//! Lengths are counted in Unicode scalar values (`char`), never bytes, so
//! multi-byte text is never split mid-character.

use std::borrow::Cow;

/// Default length used by callers that want the conventional truncation.
pub const DEFAULT_TRUNCATE_LEN: usize = 8;

const ELLIPSIS: &str = "...";

/// Truncates `s` when it is longer than `n` characters.
///
/// A truncated string keeps its first `n − 1` characters followed by
/// `"..."`. Strings of `n` characters or fewer are returned unchanged and
/// borrowed.
///
/// `n = 0` keeps no characters, so any non-empty string becomes `"..."`.
/// This differs from slicing with a negative end index, which would keep
/// all but the last character.
///
/// # Examples
/// ```
/// use lighthouse_utils::text::{truncate, DEFAULT_TRUNCATE_LEN};
/// assert_eq!(truncate("lighthouse keeper", DEFAULT_TRUNCATE_LEN), "lightho...");
/// assert_eq!(truncate("beacon", DEFAULT_TRUNCATE_LEN), "beacon");
/// ```
pub fn truncate(s: &str, n: usize) -> Cow<'_, str> {
    if s.char_indices().nth(n).is_none() {
        return Cow::Borrowed(s);
    }
    let keep = n.saturating_sub(1);
    let end = s
        .char_indices()
        .nth(keep)
        .map(|(i, _)| i)
        .unwrap_or(s.len());
    let mut out = String::with_capacity(end + ELLIPSIS.len());
    out.push_str(&s[..end]);
    out.push_str(ELLIPSIS);
    Cow::Owned(out)
}

/// Upper-cases the first character of `s`, leaving the rest untouched.
///
/// Uses full Unicode case mapping, so a single character may expand
/// (`ß` becomes `SS`).
///
/// # Examples
/// ```
/// use lighthouse_utils::text::capitalise;
/// assert_eq!(capitalise("harbour"), "Harbour");
/// assert_eq!(capitalise(""), "");
/// ```
pub fn capitalise(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Joins items into an English list using "and".
///
/// # Examples
/// ```
/// use lighthouse_utils::text::list_to_prose;
/// assert_eq!(list_to_prose(&["salt"]), "salt");
/// assert_eq!(list_to_prose(&["salt", "pepper"]), "salt and pepper");
/// assert_eq!(list_to_prose(&["salt", "pepper", "vinegar"]), "salt, pepper and vinegar");
/// ```
pub fn list_to_prose<S: AsRef<str>>(items: &[S]) -> String {
    join_prose(items, "and")
}

/// Joins items into an English list with a custom final conjunction.
///
/// Items are separated by `", "` except the last pair, which is joined by
/// `" {conjunction} "`. No serial comma is inserted.
pub fn join_prose<S: AsRef<str>>(items: &[S], conjunction: &str) -> String {
    match items {
        [] => String::new(),
        [only] => only.as_ref().to_string(),
        [head @ .., last] => {
            let head: Vec<&str> = head.iter().map(|s| s.as_ref()).collect();
            format!("{} {} {}", head.join(", "), conjunction, last.as_ref())
        }
    }
}
