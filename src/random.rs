//! Random picks, shuffling, bounded integers and probabilistic events.
//!
//! Every function takes the RNG explicitly so results are reproducible
//! under a fixed seed. Use [`create_rng`] for a seeded generator or
//! `rand::rng()` for the thread-local one.

use rand::Rng;

use crate::error::{Error, Result};

/// Default lower bound for [`random_number`].
pub const DEFAULT_MIN: i64 = 1;

/// Default upper bound for [`random_number`].
pub const DEFAULT_MAX: i64 = 10;

/// Default event probability for [`probability`].
pub const DEFAULT_PROBABILITY: f64 = 0.5;

/// Creates a fast, seeded random number generator.
///
/// Uses `SmallRng`; the sequence is deterministic for a given seed on the
/// same platform.
///
/// # Examples
/// ```
/// use lighthouse_utils::random::create_rng;
/// use rand::Rng;
/// let mut rng = create_rng(42);
/// let x: f64 = rng.random();
/// assert!(x >= 0.0 && x < 1.0);
/// ```
pub fn create_rng(seed: u64) -> rand::rngs::SmallRng {
    use rand::SeedableRng;
    rand::rngs::SmallRng::seed_from_u64(seed)
}

/// Picks one element of `items` uniformly at random.
///
/// # Returns
/// - `None` if `items` is empty.
///
/// # Examples
/// ```
/// use lighthouse_utils::random::{create_rng, random_item};
/// let colours = ["red", "green", "blue"];
/// let mut rng = create_rng(7);
/// let pick = random_item(&colours, &mut rng).unwrap();
/// assert!(colours.contains(pick));
/// ```
pub fn random_item<'a, T, R: Rng>(items: &'a [T], rng: &mut R) -> Option<&'a T> {
    if items.is_empty() {
        return None;
    }
    Some(&items[rng.random_range(0..items.len())])
}

/// Fisher-Yates (Durstenfeld) in-place shuffle.
///
/// Each of the n! permutations is equally likely.
///
/// # Complexity
/// Time: O(n), Space: O(1)
///
/// # Examples
/// ```
/// use lighthouse_utils::random::{create_rng, shuffle};
/// let mut v = vec![1, 2, 3, 4, 5];
/// let mut rng = create_rng(42);
/// shuffle(&mut v, &mut rng);
/// v.sort();
/// assert_eq!(v, vec![1, 2, 3, 4, 5]);
/// ```
pub fn shuffle<T, R: Rng>(slice: &mut [T], rng: &mut R) {
    let n = slice.len();
    if n <= 1 {
        return;
    }
    for i in (1..n).rev() {
        let j = rng.random_range(0..=i);
        slice.swap(i, j);
    }
}

/// Returns a shuffled copy of `items`, leaving the input untouched.
pub fn shuffled<T: Clone, R: Rng>(items: &[T], rng: &mut R) -> Vec<T> {
    let mut out = items.to_vec();
    shuffle(&mut out, rng);
    out
}

/// Draws an integer uniformly from `min..=max`.
///
/// # Errors
/// - [`Error::InvalidRange`] if `min > max`.
///
/// # Examples
/// ```
/// use lighthouse_utils::random::{create_rng, random_number, DEFAULT_MAX, DEFAULT_MIN};
/// let mut rng = create_rng(3);
/// let n = random_number(DEFAULT_MIN, DEFAULT_MAX, &mut rng).unwrap();
/// assert!((1..=10).contains(&n));
/// assert!(random_number(5, 4, &mut rng).is_err());
/// ```
pub fn random_number<R: Rng>(min: i64, max: i64, rng: &mut R) -> Result<i64> {
    if min > max {
        return Err(Error::InvalidRange { min, max });
    }
    Ok(rng.random_range(min..=max))
}

/// Simulates an event that occurs with probability `prob`.
///
/// Draws `u` uniformly from `[0, 1)` and returns `u < prob`, so `0.0`
/// never fires and `1.0` always fires.
///
/// # Errors
/// - [`Error::InvalidProbability`] if `prob` is outside `[0, 1]` or NaN.
///
/// # Examples
/// ```
/// use lighthouse_utils::random::{create_rng, probability};
/// let mut rng = create_rng(1);
/// assert!(probability(1.0, &mut rng).unwrap());
/// assert!(!probability(0.0, &mut rng).unwrap());
/// assert!(probability(1.5, &mut rng).is_err());
/// ```
pub fn probability<R: Rng>(prob: f64, rng: &mut R) -> Result<bool> {
    if !(0.0..=1.0).contains(&prob) {
        return Err(Error::InvalidProbability(prob));
    }
    let u: f64 = rng.random();
    Ok(u < prob)
}

// ============================================================================
// Tests
// ============================================================================
