use thiserror::Error;

/// Enum describing how a pair of bounds fails to form a range in a domain.
///
/// Variants are reported in the order the checks run: lower bound, upper
/// bound, then ordering.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Error)]
pub enum InvalidRange<T> {
    /// Lower bound lies outside `[min, max]`.
    #[error("invalid range: lower bound {value} outside domain [{min},{max}]")]
    LowerOutOfDomain { value: T, min: T, max: T },
    /// Upper bound lies outside `[min, max]`.
    #[error("invalid range: upper bound {value} outside domain [{min},{max}]")]
    UpperOutOfDomain { value: T, min: T, max: T },
    /// Lower bound is greater than upper bound.
    #[error("invalid range: lower bound {lower} exceeds upper bound {upper}")]
    Inverted { lower: T, upper: T },
}

/// Enum describing why a `"lower,upper"` record could not be parsed.
///
/// Every variant echoes the text it was given.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Error)]
pub enum ParseRangeError<T> {
    /// Record did not split into exactly two comma-separated fields.
    #[error("unable to parse range from {text:?}: expected 2 comma-separated fields, found {found}")]
    FieldCount { text: String, found: usize },
    /// A field is not a base-10 integer representable in the bound type.
    #[error("unable to parse range from {text:?}: {field:?} is not an integer")]
    NotAnInteger { text: String, field: String },
    /// Both fields parsed, but the bounds do not form a valid range.
    #[error("unable to parse range from {text:?}: {violation}")]
    Invalid { text: String, violation: InvalidRange<T> },
}

impl<T> ParseRangeError<T> {
    /// Returns the text that failed to parse.
    pub fn text(&self) -> &str {
        match self {
            ParseRangeError::FieldCount { text, .. }
            | ParseRangeError::NotAnInteger { text, .. }
            | ParseRangeError::Invalid { text, .. } => text,
        }
    }
}

/// Enum describing how a domain configuration may be invalid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Error)]
pub enum DomainError<T> {
    /// Domain minimum exceeds its maximum.
    #[error("domain minimum {min} exceeds maximum {max}")]
    Inverted { min: T, max: T },
    /// Domain span overflows the bound type, or has more values than a
    /// membership table can address.
    #[error("domain [{min},{max}] is too large to track")]
    TooLarge { min: T, max: T },
}
