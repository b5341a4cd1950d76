#![forbid(unsafe_code)]
#![doc(html_root_url = "https://docs.rs/zip_range_reduce/0.1.0")]

//! Flags integer ranges over a bounded domain and reduces the flagged values
//! to the fewest disjoint, maximal ranges that cover them exactly.
//!
//! The domain defaults to the five-digit ZIP codes `[1, 99999]`, but any
//! primitive integer type and any addressable bounds may be used.
//!
//! Example usage:
//! ```
//! # use zip_range_reduce::*;
//! let domain = Domain::<u32>::default();
//! let mut tracker = MembershipTracker::new(domain);
//! for line in ["20000,20005", "19900,20001", "60003,60005"] {
//!     tracker.mark(&BoundedRange::parse(line, &domain)?);
//! }
//! let reduced: Vec<String> = tracker.reduce(true).iter()
//!     .map(|range| range.to_string())
//!     .collect();
//! assert_eq!(reduced, vec!["[19900,20005]", "[60003,60005]"]);
//! # Ok::<(), ParseRangeError<u32>>(())
//! ```
//!
//! Ranges are validated on construction ([`BoundedRange`]), marked into a dense
//! table ([`MembershipTracker::mark`]) and read back by a linear scan
//! ([`MembershipTracker::reduce`]).
//!
//! With the default `cli` feature, the [`driver`] module and the
//! `zip-range-reduce` binary read ranges from a file and write the reduction.

mod domain;
mod error;
mod range;
mod tracker;

#[cfg(feature = "cli")]
pub mod driver;

pub use domain::{Domain, DEFAULT_FLAGGED_VALUE, DEFAULT_MAX_BOUND, DEFAULT_MIN_BOUND};
pub use error::{DomainError, InvalidRange, ParseRangeError};
pub use range::{BoundedRange, Record};
pub use tracker::MembershipTracker;
