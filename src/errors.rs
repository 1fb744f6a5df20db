//! Error types for structured matrix construction and multiplication.

use thiserror::Error;

/// Contract violations reported by the validating entry points.
///
/// Every variant describes a programming error on the caller side: nothing here is transient
/// and no operation retries. When validation is enabled, these are raised before any numerical
/// work happens.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BttbError {
    /// An array has the wrong dimensions.
    #[error("{name} must have shape {expected:?}, got {actual:?}")]
    Shape {
        name: &'static str,
        expected: (usize, usize),
        actual: (usize, usize),
    },

    /// An argument has the wrong form, e.g. a row was supplied where it must be derived.
    #[error("{0}")]
    Type(String),

    /// A symmetry tag is unknown or unsupported by the requested operation.
    #[error("invalid symmetry `{0}`")]
    Symmetry(String),

    /// A table of columns/rows does not agree with the block count or symmetry.
    #[error("{0}")]
    Cardinality(String),

    /// A flat vector has a length inconsistent with the declared block layout.
    #[error("{name} must have {expected} elements, got {actual}")]
    Size {
        name: &'static str,
        expected: usize,
        actual: usize,
    },

    /// A count that must be strictly positive is zero.
    #[error("{name} must be a positive integer")]
    NonPositive { name: &'static str },

    /// An eigenvalue ordering is neither `row` nor `column`.
    #[error("invalid ordering `{0}`")]
    Ordering(String),
}

pub type Result<T, E = BttbError> = core::result::Result<T, E>;
