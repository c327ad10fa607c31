//! Comparator factories for `sort_by` and friends.
//!
//! Each factory captures how to extract a sort key and returns a closure
//! `Fn(&T, &T) -> Ordering`. The `by_property*` variants work on loosely
//! typed JSON records where the field may be missing or of the wrong type.

use std::cmp::Ordering;

use serde_json::Value;

/// Ascending comparator on a key extracted by `f`.
///
/// # Examples
/// ```
/// use lighthouse_utils::compare::by_key;
/// let mut words = vec!["lantern", "sea", "tide"];
/// words.sort_by(by_key(|w: &&str| w.len()));
/// assert_eq!(words, vec!["sea", "tide", "lantern"]);
/// ```
pub fn by_key<T, K, F>(f: F) -> impl Fn(&T, &T) -> Ordering
where
    K: Ord,
    F: Fn(&T) -> K,
{
    move |a, b| f(a).cmp(&f(b))
}

/// Descending comparator on a key extracted by `f`.
pub fn by_key_desc<T, K, F>(f: F) -> impl Fn(&T, &T) -> Ordering
where
    K: Ord,
    F: Fn(&T) -> K,
{
    move |a, b| f(b).cmp(&f(a))
}

/// Ascending comparator on an `f64` key, using IEEE 754 total ordering.
///
/// `NaN` keys sort after every number (positive `NaN`) or before every
/// number (negative `NaN`), so the comparator is always a total order.
pub fn by_float_key<T, F>(f: F) -> impl Fn(&T, &T) -> Ordering
where
    F: Fn(&T) -> f64,
{
    move |a, b| f(a).total_cmp(&f(b))
}

/// Ascending comparator on a named property of JSON objects.
///
/// Numbers compare numerically, strings lexically and booleans with
/// `false < true`. When the two values differ in kind they are ordered
/// number, string, boolean, then anything else; a missing property, `null`,
/// an array or an object always sorts last.
///
/// # Examples
/// ```
/// use lighthouse_utils::compare::by_property;
/// use serde_json::json;
///
/// let mut ships = vec![
///     json!({"name": "Aurora", "tonnage": 900}),
///     json!({"name": "Bounty"}),
///     json!({"name": "Comet", "tonnage": 300}),
/// ];
/// ships.sort_by(by_property("tonnage"));
/// let names: Vec<_> = ships.iter().map(|s| s["name"].as_str().unwrap()).collect();
/// assert_eq!(names, vec!["Comet", "Aurora", "Bounty"]);
/// ```
pub fn by_property(name: &str) -> impl Fn(&Value, &Value) -> Ordering + '_ {
    move |a, b| compare_property(a.get(name), b.get(name), false)
}

/// Descending comparator on a named property of JSON objects.
///
/// Values of the same kind are reversed; missing or incomparable values
/// still sort last.
pub fn by_property_desc(name: &str) -> impl Fn(&Value, &Value) -> Ordering + '_ {
    move |a, b| compare_property(a.get(name), b.get(name), true)
}

fn kind_rank(v: Option<&Value>) -> u8 {
    match v {
        Some(Value::Number(_)) => 0,
        Some(Value::String(_)) => 1,
        Some(Value::Bool(_)) => 2,
        _ => 3,
    }
}

fn compare_property(a: Option<&Value>, b: Option<&Value>, descending: bool) -> Ordering {
    let same_kind = match (a, b) {
        (Some(Value::Number(x)), Some(Value::Number(y))) => match (x.as_f64(), y.as_f64()) {
            (Some(x), Some(y)) => Some(x.total_cmp(&y)),
            _ => None,
        },
        (Some(Value::String(x)), Some(Value::String(y))) => Some(x.cmp(y)),
        (Some(Value::Bool(x)), Some(Value::Bool(y))) => Some(x.cmp(y)),
        _ => None,
    };
    match same_kind {
        Some(ord) if descending => ord.reverse(),
        Some(ord) => ord,
        None => kind_rank(a).cmp(&kind_rank(b)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Clone, PartialEq)]
    struct Keeper {
        name: &'static str,
        years: u32,
        rating: f64,
    }

    fn keepers() -> Vec<Keeper> {
        vec![
            Keeper {
                name: "Grace",
                years: 12,
                rating: 4.5,
            },
            Keeper {
                name: "Abel",
                years: 3,
                rating: 3.9,
            },
            Keeper {
                name: "Ida",
                years: 30,
                rating: 4.8,
            },
        ]
    }

    fn names(ks: &[Keeper]) -> Vec<&'static str> {
        ks.iter().map(|k| k.name).collect()
    }

    #[test]
    fn test_by_key_ascending() {
        let mut ks = keepers();
        ks.sort_by(by_key(|k: &Keeper| k.years));
        assert_eq!(names(&ks), vec!["Abel", "Grace", "Ida"]);
    }

    #[test]
    fn test_by_key_desc() {
        let mut ks = keepers();
        ks.sort_by(by_key_desc(|k: &Keeper| k.name));
        assert_eq!(names(&ks), vec!["Ida", "Grace", "Abel"]);
    }

    #[test]
    fn test_by_float_key() {
        let mut ks = keepers();
        ks.sort_by(by_float_key(|k: &Keeper| k.rating));
        assert_eq!(names(&ks), vec!["Abel", "Grace", "Ida"]);
    }

    #[test]
    fn test_by_float_key_nan_last() {
        let mut v = vec![f64::NAN, 2.0, -1.0];
        v.sort_by(by_float_key(|x: &f64| *x));
        assert_eq!(v[0], -1.0);
        assert_eq!(v[1], 2.0);
        assert!(v[2].is_nan());
    }

    #[test]
    fn test_by_property_strings() {
        let mut rows = vec![json!({"n": "b"}), json!({"n": "c"}), json!({"n": "a"})];
        rows.sort_by(by_property("n"));
        assert_eq!(rows, vec![json!({"n": "a"}), json!({"n": "b"}), json!({"n": "c"})]);
    }

    #[test]
    fn test_by_property_desc_missing_last() {
        let mut rows = vec![
            json!({"v": 1}),
            json!({}),
            json!({"v": 3}),
            json!({"v": null}),
            json!({"v": 2}),
        ];
        rows.sort_by(by_property_desc("v"));
        let vs: Vec<Option<i64>> = rows.iter().map(|r| r["v"].as_i64()).collect();
        assert_eq!(vs, vec![Some(3), Some(2), Some(1), None, None]);
    }

    #[test]
    fn test_by_property_mixed_kinds() {
        let mut rows = vec![json!({"v": true}), json!({"v": "x"}), json!({"v": 5})];
        rows.sort_by(by_property("v"));
        assert_eq!(rows, vec![json!({"v": 5}), json!({"v": "x"}), json!({"v": true})]);
    }

    #[test]
    fn test_by_property_non_object() {
        let cmp = by_property("v");
        assert_eq!(cmp(&json!(1), &json!({"v": 1})), Ordering::Greater);
        assert_eq!(cmp(&json!([1]), &json!("v")), Ordering::Equal);
    }
}
