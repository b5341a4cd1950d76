use crate::error::DomainError;

use num_traits::PrimInt;

#[cfg(feature = "include_serde")]
use serde::{Deserialize, Serialize};

/// Lowest value of the default (five-digit ZIP code) domain.
pub const DEFAULT_MIN_BOUND: u32 = 1;
/// Highest value of the default (five-digit ZIP code) domain.
pub const DEFAULT_MAX_BOUND: u32 = 99999;
/// Table value written by a mark under the default configuration.
pub const DEFAULT_FLAGGED_VALUE: bool = true;

/// The closed set of integers `[min, max]` that ranges are validated against
/// and that a [`MembershipTracker`](crate::MembershipTracker) covers.
///
/// Also carries the table value that marking writes, so that the "flagged"
/// convention is configuration rather than a constant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "include_serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "include_serde", serde(try_from = "DomainRepr<T>"))]
#[cfg_attr(feature = "include_serde",
    serde(bound(deserialize = "T: PrimInt + core::fmt::Display + Deserialize<'de>")))]
pub struct Domain<T> {
    min: T,
    max: T,
    flagged_value: bool,
}

impl<T: PrimInt> Domain<T> {
    /// Constructs a domain spanning `[min, max]` with the default flagged value.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::Inverted`] if `min > max`, and
    /// [`DomainError::TooLarge`] if `max - min` overflows `T` or the number
    /// of values in the domain does not fit in a `usize`.
    ///
    /// # Example
    ///
    /// ```
    /// # use zip_range_reduce::*;
    /// let domain = Domain::new(-5i32, 5)?;
    /// assert_eq!(domain.len(), 11);
    /// assert!(Domain::new(5i32, -5).is_err());
    /// # Ok::<(), DomainError<i32>>(())
    /// ```
    pub fn new(min: T, max: T) -> Result<Self, DomainError<T>> {
        if min > max {
            return Err(DomainError::Inverted { min, max });
        }
        // The table must be addressable; len() relies on this check
        let span_ok = max.checked_sub(&min)
            .and_then(|span| span.to_usize())
            .and_then(|span| span.checked_add(1))
            .is_some();
        if !span_ok {
            return Err(DomainError::TooLarge { min, max });
        }
        Ok(Domain {
            min,
            max,
            flagged_value: DEFAULT_FLAGGED_VALUE,
        })
    }

    /// Returns this domain with marks writing `flagged_value` instead.
    ///
    /// A [`MembershipTracker`](crate::MembershipTracker) built on the
    /// returned domain starts with every entry set to `!flagged_value`.
    pub fn with_flagged_value(mut self, flagged_value: bool) -> Self {
        self.flagged_value = flagged_value;
        self
    }

    pub fn min(&self) -> T {
        self.min
    }
    pub fn max(&self) -> T {
        self.max
    }
    /// The table value a mark writes.
    pub fn flagged_value(&self) -> bool {
        self.flagged_value
    }

    /// Returns the number of values in the domain.
    pub fn len(&self) -> usize {
        // Checked in new()
        (self.max - self.min).to_usize().map_or(0, |span| span + 1)
    }
    /// Always false, as a domain holds at least one value.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Returns whether `value` lies in `[min, max]`.
    pub fn contains(&self, value: T) -> bool {
        self.min <= value && value <= self.max
    }

    /// Maps a domain value to its zero-based table offset.
    pub(crate) fn offset_of(&self, value: T) -> Option<usize> {
        if !self.contains(value) {
            return None;
        }
        (value - self.min).to_usize()
    }
}

macro_rules! impl_default_domain {
    ($($int: ty),*) => {
        $(
            impl Default for Domain<$int> {
                /// The five-digit ZIP code domain `[1, 99999]`, flagging with `true`.
                fn default() -> Self {
                    Domain {
                        min: DEFAULT_MIN_BOUND as $int,
                        max: DEFAULT_MAX_BOUND as $int,
                        flagged_value: DEFAULT_FLAGGED_VALUE,
                    }
                }
            }
        )*
    };
}
impl_default_domain!(i32, u32, i64, u64, isize, usize);

#[cfg(feature = "include_serde")]
#[derive(Deserialize)]
struct DomainRepr<T> {
    min: T,
    max: T,
    #[serde(default = "default_flagged_value")]
    flagged_value: bool,
}

#[cfg(feature = "include_serde")]
fn default_flagged_value() -> bool {
    DEFAULT_FLAGGED_VALUE
}

#[cfg(feature = "include_serde")]
impl<T: PrimInt> core::convert::TryFrom<DomainRepr<T>> for Domain<T> {
    type Error = DomainError<T>;

    fn try_from(repr: DomainRepr<T>) -> Result<Self, Self::Error> {
        Domain::new(repr.min, repr.max)
            .map(|domain| domain.with_flagged_value(repr.flagged_value))
    }
}


#[cfg(all(test, feature = "include_serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn deserialize_applies_default_flag() {
        let domain: Domain<u32> = serde_json::from_str(r#"{"min": 1, "max": 10}"#).unwrap();
        assert_eq!(domain, Domain::new(1, 10).unwrap());
        assert!(domain.flagged_value());
        let domain: Domain<u32> =
            serde_json::from_str(r#"{"min": 1, "max": 10, "flagged_value": false}"#).unwrap();
        assert!(!domain.flagged_value());
    }
    #[test]
    fn deserialize_revalidates() {
        let err = serde_json::from_str::<Domain<u32>>(r#"{"min": 10, "max": 5}"#).unwrap_err();
        assert!(err.to_string().contains("domain minimum 10 exceeds maximum 5"), "{}", err);
        let err = serde_json::from_str::<Domain<i8>>(r#"{"min": -128, "max": 127}"#).unwrap_err();
        assert!(err.to_string().contains("too large"), "{}", err);
    }
    #[test]
    fn serialize_round_trips() {
        let domain = Domain::new(5i64, 20).unwrap().with_flagged_value(false);
        let json = serde_json::to_string(&domain).unwrap();
        assert_eq!(json, r#"{"min":5,"max":20,"flagged_value":false}"#);
        assert_eq!(serde_json::from_str::<Domain<i64>>(&json).unwrap(), domain);
    }
}
