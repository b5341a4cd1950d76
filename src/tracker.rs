use crate::domain::Domain;
use crate::error::{InvalidRange, ParseRangeError};
use crate::range::BoundedRange;

use core::fmt;
use core::iter::FromIterator;

use num_traits::PrimInt;
use tracing::{debug, trace, warn};

/*
 * Stores one entry per domain value:
 * table[value - min] is the membership state of value
 * table.len() == domain.len() always holds
 * Marking writes domain.flagged_value(); reset writes an arbitrary value
 * A new table holds !flagged_value everywhere, so nothing starts marked
 */
/// Struct tracking which values of a bounded [`Domain`] are covered by
/// marked ranges, backed by a dense table with one entry per domain value.
///
/// # Example
///
/// ```
/// # use zip_range_reduce::*;
/// let mut tracker = MembershipTracker::<u32>::default();
/// tracker.mark(&tracker.range(10000, 10005)?);
/// tracker.mark(&tracker.range(10002, 10009)?);
/// tracker.mark(&tracker.range(60001, 60001)?);
/// let reduced: Vec<(u32, u32)> = tracker.reduce(true).iter()
///     .map(|range| (range.lower(), range.upper()))
///     .collect();
/// assert_eq!(reduced, vec![(10000, 10009), (60001, 60001)]);
/// # Ok::<(), InvalidRange<u32>>(())
/// ```
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct MembershipTracker<T> {
    domain: Domain<T>,
    table: Box<[bool]>,
}

impl<T: PrimInt> MembershipTracker<T> {
    /// Constructs a tracker covering `domain` with no value marked.
    ///
    /// Every entry starts as the opposite of the domain's flagged value,
    /// which is `false` under the default configuration.
    pub fn new(domain: Domain<T>) -> Self {
        MembershipTracker {
            domain,
            table: vec![!domain.flagged_value(); domain.len()].into_boxed_slice(),
        }
    }

    pub fn domain(&self) -> &Domain<T> {
        &self.domain
    }

    /// Constructs a range validated against this tracker's domain.
    ///
    /// # Errors
    ///
    /// See [`BoundedRange::new`].
    pub fn range(&self, lower: T, upper: T) -> Result<BoundedRange<T>, InvalidRange<T>> {
        BoundedRange::new(lower, upper, &self.domain)
    }
    /// Parses a `"lower,upper"` record against this tracker's domain.
    ///
    /// # Errors
    ///
    /// See [`BoundedRange::parse`].
    pub fn parse_range(&self, text: &str) -> Result<BoundedRange<T>, ParseRangeError<T>> {
        BoundedRange::parse(text, &self.domain)
    }

    /// Sets every entry to `value`, discarding all prior marks.
    pub fn reset(&mut self, value: bool) {
        debug!(value, entries = self.table.len(), "resetting membership table");
        self.table.fill(value);
    }

    /// Sets the entry of every value in the range to the domain's flagged value.
    ///
    /// Marking is idempotent, and overlapping marks simply coincide.
    /// If the range was validated against a different domain, only the
    /// part inside this tracker's domain is marked.
    pub fn mark(&mut self, range: &BoundedRange<T>)
    where
        T: fmt::Display
    {
        let lower = range.lower().max(self.domain.min());
        let upper = range.upper().min(self.domain.max());
        let offsets = (self.domain.offset_of(lower), self.domain.offset_of(upper));
        let (start, end) = match offsets {
            (Some(start), Some(end)) if lower <= upper => (start, end),
            _ => {
                warn!(%range, "range lies outside the tracked domain, ignoring it");
                return;
            }
        };
        if lower != range.lower() || upper != range.upper() {
            warn!(%range, lower = %lower, upper = %upper,
                "range extends past the tracked domain, clipping it");
        }
        trace!(%range, "marking range");
        self.table[start..=end].fill(self.domain.flagged_value());
    }

    /// Returns the raw table entry for `value`, or `None` outside the domain.
    pub fn entry(&self, value: T) -> Option<bool> {
        self.domain.offset_of(value).map(|offset| self.table[offset])
    }
    /// Returns whether the entry for `value` holds the flagged value,
    /// or `None` outside the domain.
    pub fn is_marked(&self, value: T) -> Option<bool> {
        self.entry(value).map(|entry| entry == self.domain.flagged_value())
    }

    /// Returns the minimal ordered list of disjoint ranges covering exactly
    /// the values whose entry equals `target`.
    ///
    /// Each maximal run of equal entries becomes one range, in ascending
    /// order. Reducing `true` and `false` on the same table partitions the
    /// domain. An empty list is returned when nothing matches.
    ///
    /// # Example
    ///
    /// ```
    /// # use zip_range_reduce::*;
    /// let domain = Domain::new(1u32, 10)?;
    /// let mut tracker = MembershipTracker::new(domain);
    /// assert!(tracker.reduce(true).is_empty());
    /// tracker.mark(&tracker.range(3, 4).unwrap());
    /// let gaps: Vec<String> = tracker.reduce(false).iter()
    ///     .map(|range| range.to_string())
    ///     .collect();
    /// assert_eq!(gaps, vec!["[1,2]", "[5,10]"]);
    /// # Ok::<(), DomainError<u32>>(())
    /// ```
    pub fn reduce(&self, target: bool) -> Vec<BoundedRange<T>> {
        self.reduce_into(target)
    }
    /// Functions like [`Self::reduce`], collecting into any container.
    pub fn reduce_into<U>(&self, target: bool) -> U
    where
        U: FromIterator<BoundedRange<T>>
    {
        let mut runs = Vec::new();
        let mut run_start: Option<T> = None;
        // value tracks the domain value of the entry being inspected
        let mut value = self.domain.min();
        for &entry in self.table.iter() {
            match (entry == target, run_start) {
                (true, None) => run_start = Some(value),
                (false, Some(start)) => {
                    // value > start >= min, so this cannot underflow
                    runs.push(BoundedRange::from_validated(start, value - T::one()));
                    run_start = None;
                }
                _ => ()
            }
            // Saturates only past the last entry, where value is unused
            value = value.saturating_add(T::one());
        }
        // A run still open here extends to the domain maximum
        if let Some(start) = run_start {
            runs.push(BoundedRange::from_validated(start, self.domain.max()));
        }
        debug!(target_value = target, runs = runs.len(), "reduced membership table");
        runs.into_iter().collect()
    }

    /// Reduces the values that were marked.
    pub fn reduce_flagged(&self) -> Vec<BoundedRange<T>> {
        self.reduce(self.domain.flagged_value())
    }
    /// Reduces the values that were not marked.
    pub fn reduce_unflagged(&self) -> Vec<BoundedRange<T>> {
        self.reduce(!self.domain.flagged_value())
    }
}

macro_rules! impl_default_tracker {
    ($($int: ty),*) => {
        $(
            impl Default for MembershipTracker<$int> {
                /// Tracker over the default `[1, 99999]` domain.
                fn default() -> Self {
                    MembershipTracker::new(Domain::default())
                }
            }
        )*
    };
}
impl_default_tracker!(i32, u32, i64, u64, isize, usize);

impl<T> fmt::Debug for MembershipTracker<T>
where
    T: PrimInt + fmt::Debug,
{
    /// Prints the domain and the ranges currently holding the flagged value.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let flagged: Vec<String> = self.reduce_flagged().iter()
            .map(|range| format!("{:?}..={:?}", range.lower(), range.upper()))
            .collect();
        write!(f, "{:?}..={:?} [{}]", self.domain.min(), self.domain.max(),
            flagged.join(", "))
    }
}

impl<'a, T> Extend<&'a BoundedRange<T>> for MembershipTracker<T>
where
    T: PrimInt + fmt::Display
{
    /// Calls [`Self::mark`] for each range in the iterator.
    fn extend<I: IntoIterator<Item=&'a BoundedRange<T>>>(&mut self, iter: I) {
        for range in iter {
            self.mark(range);
        }
    }
}

impl<T> Extend<BoundedRange<T>> for MembershipTracker<T>
where
    T: PrimInt + fmt::Display
{
    /// Calls [`Self::mark`] for each range in the iterator.
    fn extend<I: IntoIterator<Item=BoundedRange<T>>>(&mut self, iter: I) {
        for range in iter {
            self.mark(&range);
        }
    }
}
