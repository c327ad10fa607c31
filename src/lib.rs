//! # lighthouse-utils
//!
//! Small, standalone utilities. Each function is independent of the others
//! and holds no state between calls.
//!
//! ## Modules
//!
//! - [`stats`] — Descriptive statistics over mixed-type sequences
//!   (mean, median, mode, range, variance, skewness, quartiles)
//! - [`random`] — Random picks, shuffling, bounded integers, probabilistic events
//! - [`text`] — Truncation, capitalisation, list-to-prose joining
//! - [`lookup`] — Reverse key lookup in maps
//! - [`compare`] — Comparator factories for sorting by key or JSON property
//! - `download` — Async HTTP file downloader (feature `download`, on by default)
//! - [`error`] — Error types
//!
//! ## Design Philosophy
//!
//! - **Total where possible**: statistics, text and comparator helpers never
//!   fail; degenerate input yields documented empty values
//! - **Explicit randomness**: every random helper takes its RNG, so seeded
//!   runs are reproducible
//! - **Property-based testing**: invariants verified via proptest

pub mod compare;
#[cfg(feature = "download")]
pub mod download;
pub mod error;
pub mod lookup;
pub mod random;
pub mod stats;
pub mod text;

pub use error::{Error, Result};
pub use stats::{analyze, Summary};
