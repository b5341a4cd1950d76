use crate::domain::Domain;
use crate::error::{InvalidRange, ParseRangeError};

use core::fmt;
use core::ops::RangeInclusive;

use num_traits::PrimInt;

#[cfg(feature = "include_serde")]
use serde::Serialize;

/// Struct representing a closed interval `[lower, upper]` that has been
/// validated against a [`Domain`].
///
/// There is no way to obtain a `BoundedRange` whose bounds failed
/// validation: construction either returns a valid range or an error.
///
/// Ranges order by lower bound first, then by upper bound.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "include_serde", derive(Serialize))]
pub struct BoundedRange<T> {
    lower: T,
    upper: T,
}

impl<T: PrimInt> BoundedRange<T> {
    /// Constructs the range `[lower, upper]`.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidRange`] for the first failing check, in this order:
    /// `lower` within the domain, `upper` within the domain, `lower <= upper`.
    ///
    /// # Example
    ///
    /// ```
    /// # use zip_range_reduce::*;
    /// let domain = Domain::<u32>::default();
    /// let range = BoundedRange::new(95603, 95699, &domain)?;
    /// assert_eq!((range.lower(), range.upper()), (95603, 95699));
    /// assert_eq!(BoundedRange::new(94122, 94111, &domain),
    ///     Err(InvalidRange::Inverted { lower: 94122, upper: 94111 }));
    /// # Ok::<(), InvalidRange<u32>>(())
    /// ```
    pub fn new(lower: T, upper: T, domain: &Domain<T>) -> Result<Self, InvalidRange<T>> {
        let (min, max) = (domain.min(), domain.max());
        if !domain.contains(lower) {
            Err(InvalidRange::LowerOutOfDomain { value: lower, min, max })
        } else if !domain.contains(upper) {
            Err(InvalidRange::UpperOutOfDomain { value: upper, min, max })
        } else if lower > upper {
            Err(InvalidRange::Inverted { lower, upper })
        } else {
            Ok(BoundedRange { lower, upper })
        }
    }

    /// Parses a `"lower,upper"` record (base-10 integers, no whitespace or `+` sign)
    /// and validates it like [`Self::new`].
    ///
    /// # Errors
    ///
    /// Returns [`ParseRangeError`] if the text does not have exactly two
    /// comma-separated fields, if a field is not an integer, or if the
    /// bounds are invalid; the last case wraps the [`InvalidRange`].
    ///
    /// # Example
    ///
    /// ```
    /// # use zip_range_reduce::*;
    /// let domain = Domain::<u32>::default();
    /// assert_eq!(BoundedRange::parse("98765,99766", &domain)?,
    ///     BoundedRange::new(98765, 99766, &domain).unwrap());
    /// assert!(BoundedRange::parse("1,2,3", &domain).is_err());
    /// # Ok::<(), ParseRangeError<u32>>(())
    /// ```
    pub fn parse(text: &str, domain: &Domain<T>) -> Result<Self, ParseRangeError<T>> {
        let fields: Vec<&str> = text.split(',').collect();
        let (lower_str, upper_str) = match fields.as_slice() {
            [lower, upper] => (*lower, *upper),
            _ => return Err(ParseRangeError::FieldCount {
                text: text.to_string(),
                found: fields.len(),
            })
        };
        let parse_field = |field: &str| {
            let not_an_integer = || ParseRangeError::NotAnInteger {
                text: text.to_string(),
                field: field.to_string(),
            };
            // from_str_radix tolerates a leading '+', records do not
            if field.starts_with('+') {
                return Err(not_an_integer());
            }
            T::from_str_radix(field, 10).map_err(|_| not_an_integer())
        };
        let lower = parse_field(lower_str)?;
        let upper = parse_field(upper_str)?;
        BoundedRange::new(lower, upper, domain).map_err(|violation| ParseRangeError::Invalid {
            text: text.to_string(),
            violation,
        })
    }

    /// Returns the single-value range `[min, min]` of the domain.
    pub fn minimum(domain: &Domain<T>) -> Self {
        BoundedRange {
            lower: domain.min(),
            upper: domain.min(),
        }
    }

    // Caller guarantees both bounds lie in one domain with lower <= upper
    pub(crate) fn from_validated(lower: T, upper: T) -> Self {
        debug_assert!(lower <= upper);
        BoundedRange { lower, upper }
    }

    pub fn lower(&self) -> T {
        self.lower
    }
    pub fn upper(&self) -> T {
        self.upper
    }

    /// Returns whether the element is inside the range.
    pub fn contains(&self, element: T) -> bool {
        self.lower <= element && element <= self.upper
    }

    /// Returns a fixed-format description with both bounds, for diagnostics.
    pub fn describe(&self) -> String
    where
        T: fmt::Display
    {
        format!("BoundedRange with lower bound = {}, and upper bound = {}",
            self.lower, self.upper)
    }

    /// Returns an adapter that displays the range as a `lower,upper` line,
    /// including the trailing newline.
    ///
    /// ```
    /// # use zip_range_reduce::*;
    /// let range = BoundedRange::new(60003, 60005, &Domain::<u32>::default())?;
    /// assert_eq!(range.record().to_string(), "60003,60005\n");
    /// assert_eq!(range.to_string(), "[60003,60005]");
    /// # Ok::<(), InvalidRange<u32>>(())
    /// ```
    pub fn record(&self) -> Record<'_, T> {
        Record(self)
    }
}

/// Displays as `[lower,upper]`.
impl<T: fmt::Display> fmt::Display for BoundedRange<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{},{}]", self.lower, self.upper)
    }
}

/// Helper struct for writing a [`BoundedRange`] as an output file record.
///
/// Created by [`BoundedRange::record`].
#[derive(Clone, Copy, Debug)]
pub struct Record<'a, T>(&'a BoundedRange<T>);

impl<T: fmt::Display> fmt::Display for Record<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{},{}", self.0.lower, self.0.upper)
    }
}

impl<T> From<BoundedRange<T>> for RangeInclusive<T> {
    fn from(range: BoundedRange<T>) -> RangeInclusive<T> {
        range.lower..=range.upper
    }
}

macro_rules! impl_default_range {
    ($($int: ty),*) => {
        $(
            impl Default for BoundedRange<$int> {
                /// The degenerate range at the minimum of the default domain.
                fn default() -> Self {
                    BoundedRange::minimum(&Domain::<$int>::default())
                }
            }
        )*
    };
}
impl_default_range!(i32, u32, i64, u64, isize, usize);


#[cfg(all(test, feature = "include_serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn serialize_bounds() {
        let range = BoundedRange::new(60003u32, 60005, &Domain::default()).unwrap();
        assert_eq!(serde_json::to_string(&range).unwrap(), r#"{"lower":60003,"upper":60005}"#);
    }
}
