//! Descriptive statistics over mixed-type sequences.
//!
//! [`analyze`] accepts a slice of any [`Numeric`] type, keeps the numeric
//! entries in their original order and returns a fixed-shape [`Summary`].
//! Non-numeric entries are dropped silently; the function never fails.
//!
//! # Definitions
//!
//! - **Variance**: population variance (denominator `n`, not `n − 1`).
//! - **Skewness**: adjusted Fisher–Pearson coefficient computed with the
//!   *population* standard deviation:
//!   `n / ((n−1)(n−2)) × Σ(xᵢ − x̄)³ / σ³`.
//! - **Quartiles**: index-based on the ascending sort, no interpolation:
//!   `Q1 = x[⌊n/4⌋]`, `Q2 = median`, `Q3 = x[⌊3n/4⌋]`.
//! - **Mode**: every value sharing the highest frequency, in the order the
//!   value was first seen.
//!
//! Arithmetic is plain `f64`; no compensated summation is applied.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Numeric type guard
// ---------------------------------------------------------------------------

/// Type guard used to select numeric entries from a heterogeneous sequence.
///
/// Implemented for every primitive number type, for `Option<T>` (where
/// `None` is non-numeric), for references, and for [`serde_json::Value`]
/// (only `Value::Number` is numeric).
///
/// # Examples
/// ```
/// use lighthouse_utils::stats::Numeric;
/// use serde_json::json;
///
/// assert_eq!(json!(4).numeric_value(), Some(4.0));
/// assert_eq!(json!("4").numeric_value(), None);
/// assert_eq!(json!(true).numeric_value(), None);
/// assert_eq!(Some(2_u8).numeric_value(), Some(2.0));
/// ```
pub trait Numeric {
    /// Returns the value as `f64`, or `None` if it is not a number.
    fn numeric_value(&self) -> Option<f64>;
}

macro_rules! impl_numeric_primitive {
    ($($t:ty),* $(,)?) => {
        $(
            impl Numeric for $t {
                #[inline]
                fn numeric_value(&self) -> Option<f64> {
                    Some(*self as f64)
                }
            }
        )*
    };
}

impl_numeric_primitive!(f64, f32, i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

impl<T: Numeric> Numeric for Option<T> {
    fn numeric_value(&self) -> Option<f64> {
        self.as_ref().and_then(|v| v.numeric_value())
    }
}

impl<T: Numeric + ?Sized> Numeric for &T {
    fn numeric_value(&self) -> Option<f64> {
        (**self).numeric_value()
    }
}

impl Numeric for serde_json::Value {
    fn numeric_value(&self) -> Option<f64> {
        match self {
            serde_json::Value::Number(n) => n.as_f64(),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Summary record
// ---------------------------------------------------------------------------

/// Fixed-shape descriptive summary of a numeric sequence.
///
/// When the input has no numeric entries every `Option` field is `None` and
/// `mode` and `quartiles` are empty (see [`Summary::empty`]). Otherwise
/// `quartiles` always holds exactly three values `[Q1, Q2, Q3]`.
///
/// Serialises with camelCase field names (`interquartileRange`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    /// Arithmetic mean.
    pub mean: Option<f64>,
    /// Middle value, or the average of the two middle values.
    pub median: Option<f64>,
    /// Values with the highest frequency, in first-encounter order.
    pub mode: Vec<f64>,
    /// `max − min`.
    pub range: Option<f64>,
    /// Population variance.
    pub variance: Option<f64>,
    /// Adjusted Fisher–Pearson skewness; `None` when undefined.
    pub skewness: Option<f64>,
    /// `[Q1, Q2, Q3]`, index-based.
    pub quartiles: Vec<f64>,
    /// `Q3 − Q1`.
    pub interquartile_range: Option<f64>,
}

impl Summary {
    /// The record returned for input without numeric entries.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Returns true if the summary was computed from zero numeric entries.
    pub fn is_empty(&self) -> bool {
        self.mean.is_none()
    }
}

// ---------------------------------------------------------------------------
// Entry points
// ---------------------------------------------------------------------------

/// Computes the descriptive summary of the numeric entries of `values`.
///
/// Entries for which [`Numeric::numeric_value`] returns `None` are skipped, as
/// are `NaN` values. The input is never mutated; order statistics are taken
/// on a sorted copy.
///
/// # Complexity
/// Time: O(n log n) (dominated by sort), Space: O(n)
///
/// # Examples
/// ```
/// use lighthouse_utils::stats::analyze;
/// use serde_json::json;
///
/// let values = json!([5, "a", 3, null, 5, 1]);
/// let summary = analyze(values.as_array().unwrap());
/// assert_eq!(summary.mean, Some(3.5));
/// assert_eq!(summary.median, Some(4.0));
/// assert_eq!(summary.mode, vec![5.0]);
/// assert_eq!(summary.quartiles, vec![3.0, 4.0, 5.0]);
/// ```
pub fn analyze<T: Numeric>(values: &[T]) -> Summary {
    let data: Vec<f64> = values
        .iter()
        .filter_map(|v| v.numeric_value())
        .filter(|x| !x.is_nan())
        .collect();
    tracing::trace!(
        total = values.len(),
        numeric = data.len(),
        "filtered non-numeric entries"
    );
    describe(&data)
}

/// Computes the descriptive summary of already-numeric data.
///
/// `NaN` entries are skipped. Equivalent to [`analyze`] on an `f64` slice.
///
/// # Examples
/// ```
/// use lighthouse_utils::stats::summarize;
///
/// let s = summarize(&[1.0, 2.0, 3.0, 4.0]);
/// assert_eq!(s.mean, Some(2.5));
/// assert_eq!(s.variance, Some(1.25));
/// assert_eq!(s.quartiles, vec![2.0, 2.5, 4.0]);
/// assert_eq!(s.interquartile_range, Some(2.0));
/// ```
pub fn summarize(data: &[f64]) -> Summary {
    if data.iter().any(|x| x.is_nan()) {
        let filtered: Vec<f64> = data.iter().copied().filter(|x| !x.is_nan()).collect();
        return describe(&filtered);
    }
    describe(data)
}

fn describe(data: &[f64]) -> Summary {
    let n = data.len();
    if n == 0 {
        return Summary::empty();
    }

    let scan = Scan::new(data);
    let nf = n as f64;
    let mean = scan.sum / nf;
    let variance = squared_deviation_sum(data, mean) / nf;
    let skewness = adjusted_skewness(data, mean, variance);

    let sorted = sorted_copy(data);
    let [q1, q2, q3] = quartiles_sorted(&sorted);

    Summary {
        mean: Some(mean),
        median: Some(q2),
        mode: scan.modal_values(),
        range: Some(scan.max - scan.min),
        variance: Some(variance),
        skewness,
        quartiles: vec![q1, q2, q3],
        interquartile_range: Some(q3 - q1),
    }
}

// ---------------------------------------------------------------------------
// Standalone statistics
// ---------------------------------------------------------------------------
//
// These take numeric data as-is. NaN entries are not filtered and propagate
// through the arithmetic.

/// Computes the arithmetic mean.
///
/// # Returns
/// - `None` if `data` is empty.
///
/// # Examples
/// ```
/// use lighthouse_utils::stats::mean;
/// assert_eq!(mean(&[1.0, 2.0, 3.0, 4.0, 5.0]), Some(3.0));
/// assert_eq!(mean(&[]), None);
/// ```
pub fn mean(data: &[f64]) -> Option<f64> {
    if data.is_empty() {
        return None;
    }
    Some(data.iter().sum::<f64>() / data.len() as f64)
}

/// Computes the median of `data` without mutating the input.
///
/// # Complexity
/// Time: O(n log n), Space: O(n)
///
/// # Returns
/// - `None` if `data` is empty.
///
/// # Examples
/// ```
/// use lighthouse_utils::stats::median;
/// assert_eq!(median(&[3.0, 1.0, 2.0]), Some(2.0));
/// assert_eq!(median(&[4.0, 1.0, 3.0, 2.0]), Some(2.5));
/// ```
pub fn median(data: &[f64]) -> Option<f64> {
    if data.is_empty() {
        return None;
    }
    Some(median_sorted(&sorted_copy(data)))
}

/// Returns every value that occurs with the highest frequency.
///
/// Ties are not broken: all tied values are returned, in the order each was
/// first encountered. `0.0` and `-0.0` count as the same value.
///
/// # Examples
/// ```
/// use lighthouse_utils::stats::mode;
/// assert_eq!(mode(&[1.0, 1.0, 2.0, 2.0, 3.0]), vec![1.0, 2.0]);
/// assert_eq!(mode(&[3.0, 7.0, 7.0]), vec![7.0]);
/// assert!(mode(&[]).is_empty());
/// ```
pub fn mode(data: &[f64]) -> Vec<f64> {
    if data.is_empty() {
        return Vec::new();
    }
    Scan::new(data).modal_values()
}

/// Returns `max − min`.
///
/// # Returns
/// - `None` if `data` is empty.
pub fn range(data: &[f64]) -> Option<f64> {
    if data.is_empty() {
        return None;
    }
    let scan = Scan::new(data);
    Some(scan.max - scan.min)
}

/// Computes the population variance (denominator `n`).
///
/// # Returns
/// - `None` if `data` is empty.
///
/// # Examples
/// ```
/// use lighthouse_utils::stats::population_variance;
/// let v = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
/// assert!((population_variance(&v).unwrap() - 4.0).abs() < 1e-12);
/// ```
pub fn population_variance(data: &[f64]) -> Option<f64> {
    let m = mean(data)?;
    Some(squared_deviation_sum(data, m) / data.len() as f64)
}

/// Computes the adjusted Fisher–Pearson skewness coefficient.
///
/// # Formula
/// ```text
/// G = n / ((n−1)(n−2)) × Σ(xᵢ − x̄)³ / σ³
/// ```
/// where `σ` is the population standard deviation.
///
/// The formula is evaluated without guarding its denominators. A non-finite
/// result is reported as `None`; this always happens for `n < 3` and for
/// data with zero variance.
///
/// # Examples
/// ```
/// use lighthouse_utils::stats::skewness;
/// assert!(skewness(&[1.0, 2.0, 3.0, 4.0, 5.0]).unwrap().abs() < 1e-14);
/// assert!(skewness(&[1.0, 2.0, 3.0, 4.0, 50.0]).unwrap() > 0.0);
/// assert_eq!(skewness(&[1.0, 2.0]), None);
/// ```
pub fn skewness(data: &[f64]) -> Option<f64> {
    let m = mean(data)?;
    let variance = squared_deviation_sum(data, m) / data.len() as f64;
    adjusted_skewness(data, m, variance)
}

/// Computes index-based quartiles `[Q1, Q2, Q3]`.
///
/// `Q1 = sorted[⌊n/4⌋]`, `Q2 = median`, `Q3 = sorted[⌊3n/4⌋]`. No
/// interpolation is performed, so for `n = 1` all three quartiles equal the
/// single value.
///
/// # Returns
/// - An empty vector if `data` is empty.
///
/// # Examples
/// ```
/// use lighthouse_utils::stats::quartiles;
/// assert_eq!(quartiles(&[4.0, 3.0, 2.0, 1.0]), vec![2.0, 2.5, 4.0]);
/// assert_eq!(quartiles(&[7.0]), vec![7.0, 7.0, 7.0]);
/// ```
pub fn quartiles(data: &[f64]) -> Vec<f64> {
    if data.is_empty() {
        return Vec::new();
    }
    quartiles_sorted(&sorted_copy(data)).to_vec()
}

// ---------------------------------------------------------------------------
// Internals
// ---------------------------------------------------------------------------

/// Single-pass extrema, sum and first-encounter frequency table.
struct Scan {
    min: f64,
    max: f64,
    sum: f64,
    /// `(value, count)` in first-encounter order.
    counts: Vec<(f64, usize)>,
}

impl Scan {
    /// `data` must be non-empty.
    fn new(data: &[f64]) -> Self {
        let mut min = data[0];
        let mut max = data[0];
        let mut sum = 0.0;
        let mut index: HashMap<u64, usize> = HashMap::new();
        let mut counts: Vec<(f64, usize)> = Vec::new();

        for &x in data {
            if x < min {
                min = x;
            }
            if x > max {
                max = x;
            }
            sum += x;
            let slot = *index.entry(frequency_key(x)).or_insert_with(|| {
                counts.push((x, 0));
                counts.len() - 1
            });
            counts[slot].1 += 1;
        }

        Self {
            min,
            max,
            sum,
            counts,
        }
    }

    fn modal_values(&self) -> Vec<f64> {
        let top = self.counts.iter().map(|&(_, c)| c).max().unwrap_or(0);
        self.counts
            .iter()
            .filter(|&&(_, c)| c == top)
            .map(|&(v, _)| v)
            .collect()
    }
}

/// Hash key for a value; `-0.0` folds into `0.0`.
fn frequency_key(x: f64) -> u64 {
    if x == 0.0 {
        0.0_f64.to_bits()
    } else {
        x.to_bits()
    }
}

fn squared_deviation_sum(data: &[f64], mean: f64) -> f64 {
    data.iter()
        .map(|&x| {
            let d = x - mean;
            d * d
        })
        .sum()
}

fn adjusted_skewness(data: &[f64], mean: f64, variance: f64) -> Option<f64> {
    let nf = data.len() as f64;
    let sd = variance.sqrt();
    let sum3: f64 = data
        .iter()
        .map(|&x| {
            let d = x - mean;
            d * d * d
        })
        .sum();
    let g = (nf / ((nf - 1.0) * (nf - 2.0))) * (sum3 / sd.powi(3));
    g.is_finite().then_some(g)
}

fn sorted_copy(data: &[f64]) -> Vec<f64> {
    let mut sorted = data.to_vec();
    sorted.sort_unstable_by(f64::total_cmp);
    sorted
}

/// `sorted` must be non-empty and ascending.
fn median_sorted(sorted: &[f64]) -> f64 {
    let n = sorted.len();
    if n % 2 == 1 {
        sorted[n / 2]
    } else {
        (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
    }
}

/// `sorted` must be non-empty and ascending.
fn quartiles_sorted(sorted: &[f64]) -> [f64; 3] {
    let n = sorted.len();
    [sorted[n / 4], median_sorted(sorted), sorted[3 * n / 4]]
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
