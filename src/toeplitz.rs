//! Toeplitz matrices and their circulant embedding.
//!
//! A Toeplitz matrix `T` of order `P` is constant along its diagonals and is therefore fully
//! determined by its first column and first row:
//!
//! ```text
//!     |t11 t12 ... t1P|
//!     |t21            |
//! T = |.              |
//!     |:              |
//!     |tP1            |
//! ```
//!
//! `T` is the top-left `P × P` quadrant of a circulant matrix `C` of order `2P` whose first
//! column is `[column, 0, reverse(row)]`. The bottom-right quadrant of `C` is `T` again.

use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::{
    check,
    errors::{BttbError, Result},
    parameters::Validation,
    symmetry::SymmetryTag,
    utils::{circulant_index, gather, toeplitz_generator, toeplitz_index},
};

/// Generating data of a Toeplitz matrix.
///
/// `row` is the first row without the diagonal element. It must be given iff the symmetry is
/// generic; symmetric and skew-symmetric matrices derive it from `column`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToeplitzSpec {
    pub symmetry: SymmetryTag,
    pub column: Vec<f64>,
    pub row: Option<Vec<f64>>,
}

impl ToeplitzSpec {
    #[must_use]
    pub const fn symmetric(column: Vec<f64>) -> Self {
        Self {
            symmetry: SymmetryTag::Symmetric,
            column,
            row: None,
        }
    }

    #[must_use]
    pub const fn skew_symmetric(column: Vec<f64>) -> Self {
        Self {
            symmetry: SymmetryTag::SkewSymmetric,
            column,
            row: None,
        }
    }

    #[must_use]
    pub const fn generic(column: Vec<f64>, row: Vec<f64>) -> Self {
        Self {
            symmetry: SymmetryTag::Generic,
            column,
            row: Some(row),
        }
    }

    /// Order `P` of the matrix.
    #[must_use]
    pub fn order(&self) -> usize {
        self.column.len()
    }

    /// Checks that the column is non-empty and that the row agrees with the symmetry.
    pub fn validate(&self) -> Result<()> {
        check::non_empty("column", &self.column)?;
        check_row(self.symmetry, self.column.len(), self.row.as_deref())
    }

    /// First row without its diagonal element, in reverse order.
    pub fn reversed_row(&self) -> Result<Vec<f64>> {
        reversed_row(self.symmetry, &self.column, self.row.as_deref())
    }
}

/// Checks the presence and length of an explicit row against a Toeplitz symmetry.
pub(crate) fn check_row(symmetry: SymmetryTag, order: usize, row: Option<&[f64]>) -> Result<()> {
    match (symmetry, row) {
        (SymmetryTag::Generic, None) => Err(BttbError::Cardinality(
            "a generic Toeplitz matrix requires its first row".to_string(),
        )),
        (SymmetryTag::Generic, Some(row)) if row.len() + 1 != order => {
            Err(BttbError::Cardinality(format!(
                "row must have {} elements (column length minus one), got {}",
                order.saturating_sub(1),
                row.len()
            )))
        }
        (SymmetryTag::Generic, Some(_)) | (_, None) => Ok(()),
        (symmetry, Some(_)) => Err(BttbError::Type(format!(
            "row must be absent for a `{symmetry}` Toeplitz matrix, it is derived from the column"
        ))),
    }
}

/// Reversed first row (without the diagonal) of a Toeplitz matrix.
///
/// - `symm`: `reverse(column[1..])`
/// - `skew`: `-reverse(column[1..])`
/// - `gene`: `reverse(row)`
pub(crate) fn reversed_row(
    symmetry: SymmetryTag,
    column: &[f64],
    row: Option<&[f64]>,
) -> Result<Vec<f64>> {
    match symmetry.mirror_sign() {
        Some(sign) => Ok(column.iter().skip(1).rev().map(|x| sign * x).collect()),
        None => row
            .map(|row| row.iter().rev().copied().collect())
            .ok_or_else(|| {
                BttbError::Cardinality(
                    "a generic Toeplitz matrix requires its first row".to_string(),
                )
            }),
    }
}

/// First column `[column, 0, reverse(row)]` of the circulant embedding.
pub(crate) fn embedding_column(
    symmetry: SymmetryTag,
    column: &[f64],
    row: Option<&[f64]>,
) -> Result<Vec<f64>> {
    let mut first_column = Vec::with_capacity(2 * column.len());
    first_column.extend_from_slice(column);
    first_column.push(0.);
    first_column.extend(reversed_row(symmetry, column, row)?);
    Ok(first_column)
}

/// Gathers the dense Toeplitz block with first column `column`.
pub(crate) fn toeplitz_block(
    symmetry: SymmetryTag,
    column: &[f64],
    row: Option<&[f64]>,
) -> Result<Array2<f64>> {
    let generator = toeplitz_generator(&reversed_row(symmetry, column, row)?, column);
    Ok(gather(&generator, &toeplitz_index(column.len())))
}

/// Dense `P × P` Toeplitz matrix described by `spec`.
pub fn toeplitz(spec: &ToeplitzSpec, validation: Validation) -> Result<Array2<f64>> {
    if validation.is_enabled() {
        spec.validate()?;
    }
    toeplitz_block(spec.symmetry, &spec.column, spec.row.as_deref())
}

/// Circulant matrix of order `2P` embedding a Toeplitz matrix of order `P`.
///
/// Only the first column is stored; [`CirculantEmbedding::to_dense`] expands it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CirculantEmbedding {
    first_column: Vec<f64>,
}

impl CirculantEmbedding {
    #[must_use]
    pub fn first_column(&self) -> &[f64] {
        &self.first_column
    }

    #[must_use]
    pub fn into_first_column(self) -> Vec<f64> {
        self.first_column
    }

    /// Order `2P` of the circulant.
    #[must_use]
    pub fn order(&self) -> usize {
        self.first_column.len()
    }

    /// Dense circulant with entry `(i, j) = C[(i - j) mod 2P]`.
    #[must_use]
    pub fn to_dense(&self) -> Array2<f64> {
        gather(&self.first_column, &circulant_index(self.order()))
    }
}

/// Builds the circulant embedding of the Toeplitz matrix described by `spec`.
pub fn circulant_from_toeplitz(
    spec: &ToeplitzSpec,
    validation: Validation,
) -> Result<CirculantEmbedding> {
    if validation.is_enabled() {
        spec.validate()?;
    }
    Ok(CirculantEmbedding {
        first_column: embedding_column(spec.symmetry, &spec.column, spec.row.as_deref())?,
    })
}
