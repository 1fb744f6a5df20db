//! Input validation helpers shared by the public operations.
//!
//! Each helper returns `Ok(())` or the matching [`BttbError`] with a descriptive message.
//! Operations call them only when their [`crate::parameters::Validation`] argument is enabled.

use ndarray::{ArrayBase, Ix2, RawData};

use crate::errors::{BttbError, Result};

/// Fails with [`BttbError::NonPositive`] if `value` is zero.
pub fn positive(name: &'static str, value: usize) -> Result<()> {
    if value == 0 {
        return Err(BttbError::NonPositive { name });
    }
    Ok(())
}

/// Fails with [`BttbError::Size`] if a flat vector does not have `expected` elements.
pub fn size(name: &'static str, actual: usize, expected: usize) -> Result<()> {
    if actual != expected {
        return Err(BttbError::Size {
            name,
            expected,
            actual,
        });
    }
    Ok(())
}

/// Fails with [`BttbError::Shape`] if `matrix` is not `expected`.
pub fn shape<S: RawData>(
    name: &'static str,
    matrix: &ArrayBase<S, Ix2>,
    expected: (usize, usize),
) -> Result<()> {
    if matrix.dim() != expected {
        return Err(BttbError::Shape {
            name,
            expected,
            actual: matrix.dim(),
        });
    }
    Ok(())
}

/// Number of elements of a grid of `factor · nblocks · npoints_per_block` values.
///
/// Fails with [`BttbError::Cardinality`] if the count does not fit in `usize`.
pub fn element_count(nblocks: usize, npoints_per_block: usize, factor: usize) -> Result<usize> {
    nblocks
        .checked_mul(npoints_per_block)
        .and_then(|n| n.checked_mul(factor))
        .ok_or_else(|| {
            BttbError::Cardinality(format!(
                "{factor} x {nblocks} blocks x {npoints_per_block} points overflows usize"
            ))
        })
}

/// Fails with [`BttbError::Shape`] if `vector` is empty.
pub fn non_empty(name: &'static str, vector: &[f64]) -> Result<()> {
    if vector.is_empty() {
        return Err(BttbError::Shape {
            name,
            expected: (1, 1),
            actual: (1, 0),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use ndarray::Array2;

    use super::*;

    #[test]
    fn test_positive() {
        assert_eq!(positive("nblocks", 3), Ok(()));
        assert_eq!(
            positive("nblocks", 0),
            Err(BttbError::NonPositive { name: "nblocks" })
        );
    }

    #[test]
    fn test_size() {
        assert_eq!(size("v", 6, 6), Ok(()));
        let err = size("v", 5, 6).unwrap_err();
        assert_eq!(
            err,
            BttbError::Size {
                name: "v",
                expected: 6,
                actual: 5
            }
        );
        assert_eq!(err.to_string(), "v must have 6 elements, got 5");
    }

    #[test]
    fn test_shape() {
        let m = Array2::<f64>::zeros((2, 3));
        assert_eq!(shape("m", &m, (2, 3)), Ok(()));
        assert_eq!(shape("m", &m.view(), (2, 3)), Ok(()));
        assert_eq!(
            shape("m", &m, (3, 2)).unwrap_err().to_string(),
            "m must have shape (3, 2), got (2, 3)"
        );
    }

    #[test]
    fn test_element_count() {
        assert_eq!(element_count(3, 5, 4), Ok(60));
        assert_eq!(element_count(0, 5, 4), Ok(0));
        assert!(matches!(
            element_count(usize::MAX / 2 + 1, 2, 1),
            Err(BttbError::Cardinality(_))
        ));
        assert!(matches!(
            element_count(usize::MAX / 4 + 1, 1, 4),
            Err(BttbError::Cardinality(_))
        ));
    }

    #[test]
    fn test_non_empty() {
        assert!(non_empty("column", &[1.]).is_ok());
        assert!(matches!(
            non_empty("column", &[]),
            Err(BttbError::Shape { name: "column", .. })
        ));
    }
}
