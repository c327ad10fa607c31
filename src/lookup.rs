//! Reverse lookup: find the key that maps to a given value.

/// Returns the first key whose value equals `value`.
///
/// Works over any iterator of `(&K, &V)` pairs, so it accepts `&HashMap`,
/// `&BTreeMap` and `&serde_json::Map` directly. "First" follows the
/// collection's own iteration order, which for `HashMap` is unspecified;
/// use an ordered map when several keys may share the value.
///
/// # Returns
/// - `None` if no entry has the value.
///
/// # Examples
/// ```
/// use std::collections::BTreeMap;
/// use lighthouse_utils::lookup::key_by_value;
///
/// let ports = BTreeMap::from([("http", 80), ("https", 443)]);
/// assert_eq!(key_by_value(&ports, &443), Some(&"https"));
/// assert_eq!(key_by_value(&ports, &22), None);
/// ```
pub fn key_by_value<'a, K, V, I>(entries: I, value: &V) -> Option<&'a K>
where
    I: IntoIterator<Item = (&'a K, &'a V)>,
    K: 'a,
    V: PartialEq + ?Sized + 'a,
{
    entries
        .into_iter()
        .find_map(|(k, v)| (v == value).then_some(k))
}
