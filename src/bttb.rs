//! Block Toeplitz matrices formed by Toeplitz blocks (BTTB).
//!
//! A BTTB matrix `T` has `Q × Q` blocks of `P × P` elements. Its first block column and row
//! are
//!
//! ```text
//!     |T11 T12 ... T1Q|
//!     |T21            |
//! T = |.              |
//!     |:              |
//!     |TQ1            |
//! ```
//!
//! and every other block repeats along the block diagonals. Two symmetries are considered
//! (see [`Symmetry`]): `structure` relates `T1j` to `Tj1`, `blocks` relates the two triangles
//! inside each block.

use itertools::Itertools;
use ndarray::{Array2, s};
use rand::Rng;
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use tracing::instrument;

use crate::{
    check,
    errors::{BttbError, Result},
    parameters::Validation,
    symmetry::{Symmetry, SymmetryTag},
    toeplitz::toeplitz_block,
    utils::{gather_blocks, toeplitz_index},
};

/// Generating data of a BTTB matrix.
///
/// Each row of `columns` is the first column of a non-repeating block, ordered
/// `c11, c21, ..., cQ1` and, when the structure is generic, followed by `c12, ..., c1Q`.
/// So `columns` has `nblocks` rows for symmetric/skew-symmetric structures and
/// `2 * nblocks - 1` rows for generic ones. Its width is `npoints_per_block`.
///
/// `rows` holds the matching first rows without the diagonal element (width
/// `npoints_per_block - 1`, same order) and must be present iff the blocks are generic.
#[derive(Debug, Clone, PartialEq)]
pub struct BttbSpec {
    pub symmetry: Symmetry,
    pub nblocks: usize,
    pub columns: Array2<f64>,
    pub rows: Option<Array2<f64>>,
}

impl BttbSpec {
    /// Number of rows/columns `P` of every block.
    #[must_use]
    pub fn npoints_per_block(&self) -> usize {
        self.columns.ncols()
    }

    /// Number of generating blocks the table must hold.
    #[must_use]
    pub const fn num_generating_blocks(&self) -> usize {
        if self.symmetry.structure.is_generic() {
            self.nblocks.saturating_mul(2).saturating_sub(1)
        } else {
            self.nblocks
        }
    }

    /// Order `Q · P` of the dense matrix.
    #[must_use]
    pub fn order(&self) -> usize {
        self.nblocks * self.npoints_per_block()
    }

    /// Random generating data with entries in `[-1, 1)`.
    ///
    /// Entries a skew tag forces to zero are zero: the diagonal block `T11` for a skew-symmetric
    /// structure and the diagonal element of every block for skew-symmetric blocks. Pure
    /// symmetries therefore produce matrices with `Tᵗ = ±T` exactly.
    pub fn random<R: Rng + ?Sized>(
        symmetry: Symmetry,
        nblocks: usize,
        npoints_per_block: usize,
        rng: &mut R,
    ) -> Self {
        let mut spec = Self {
            symmetry,
            nblocks,
            columns: Array2::zeros((0, npoints_per_block)),
            rows: None,
        };
        let height = spec.num_generating_blocks();
        let skew_structure = symmetry.structure == SymmetryTag::SkewSymmetric;
        let skew_blocks = symmetry.blocks == SymmetryTag::SkewSymmetric;

        spec.columns = Array2::from_shape_fn((height, npoints_per_block), |(k, r)| {
            if (skew_structure && k == 0) || (skew_blocks && r == 0) {
                0.
            } else {
                rng.random_range(-1.0..1.0)
            }
        });
        if symmetry.blocks.is_generic() {
            let width = npoints_per_block.saturating_sub(1);
            spec.rows = Some(Array2::from_shape_fn((height, width), |(k, _)| {
                if skew_structure && k == 0 {
                    0.
                } else {
                    rng.random_range(-1.0..1.0)
                }
            }));
        }
        spec
    }

    /// First column `b0` of the BTTB: the first columns of `T11, ..., TQ1` end to end.
    #[must_use]
    pub fn first_column(&self) -> Vec<f64> {
        self.columns
            .slice(s![..self.nblocks, ..])
            .iter()
            .copied()
            .collect()
    }

    /// First column and optional first row of generating block `k`.
    pub(crate) fn generating_block(&self, k: usize) -> (Vec<f64>, Option<Vec<f64>>) {
        (
            self.columns.row(k).to_vec(),
            self.rows.as_ref().map(|rows| rows.row(k).to_vec()),
        )
    }

    /// Checks the table against the block count and the symmetry.
    pub fn validate(&self) -> Result<()> {
        check::positive("nblocks", self.nblocks)?;
        check::positive("npoints_per_block", self.npoints_per_block())?;
        check::element_count(self.nblocks, self.npoints_per_block(), 4)?;

        let expected = self.num_generating_blocks();
        if self.columns.nrows() != expected {
            return Err(BttbError::Cardinality(format!(
                "columns must have {expected} rows for structure `{}` and {} blocks, got {}",
                self.symmetry.structure,
                self.nblocks,
                self.columns.nrows()
            )));
        }

        match &self.rows {
            None if self.symmetry.blocks.is_generic() => Err(BttbError::Cardinality(
                "rows are required when the blocks are generic".to_string(),
            )),
            None => Ok(()),
            Some(_) if !self.symmetry.blocks.is_generic() => Err(BttbError::Type(format!(
                "rows must be absent for `{}` blocks, they are derived from the columns",
                self.symmetry.blocks
            ))),
            Some(rows) => {
                if rows.nrows() != expected {
                    return Err(BttbError::Cardinality(format!(
                        "rows and columns must have the same number of rows ({expected}), got {}",
                        rows.nrows()
                    )));
                }
                if rows.ncols() + 1 != self.npoints_per_block() {
                    return Err(BttbError::Cardinality(format!(
                        "rows must have {} columns (columns width minus one), got {}",
                        self.npoints_per_block() - 1,
                        rows.ncols()
                    )));
                }
                Ok(())
            }
        }
    }

    /// Dense Toeplitz blocks of the first block column and row, indexed by block offset.
    ///
    /// Entry `Q - 1 + k` holds the block on block diagonal `k`: the block column for `k >= 0`
    /// and the block row for `k < 0`, so block `(i, j)` of `T` is entry `i + (Q - 1 - j)`.
    fn offset_blocks(&self) -> Result<Vec<Array2<f64>>> {
        let q = self.nblocks;
        let build = |k: usize| {
            let (column, row) = self.generating_block(k);
            toeplitz_block(self.symmetry.blocks, &column, row.as_deref())
        };

        #[cfg(feature = "parallel")]
        let blocks = (0..self.num_generating_blocks())
            .into_par_iter()
            .map(build)
            .collect::<Result<Vec<_>>>()?;
        #[cfg(not(feature = "parallel"))]
        let blocks = (0..self.num_generating_blocks())
            .map(build)
            .collect::<Result<Vec<_>>>()?;

        Ok(match self.symmetry.structure.mirror_sign() {
            // The block row mirrors the block column, up to a sign.
            Some(sign) => blocks[1..]
                .iter()
                .rev()
                .map(|block| block * sign)
                .chain(blocks.iter().cloned())
                .collect(),
            // Block row T12, ..., T1Q follows the block column in the table.
            None => {
                let (block_column, block_row) = blocks.split_at(q);
                block_row.iter().rev().chain(block_column).cloned().collect_vec()
            }
        })
    }
}

/// Dense `QP × QP` BTTB matrix described by `spec`.
///
/// Blocks are gathered from `[reverse(row), column]` generators with the element-level
/// Toeplitz index, then arranged with the same index at block granularity.
#[instrument(
    skip_all,
    fields(
        symmetry = %spec.symmetry,
        nblocks = spec.nblocks,
        npoints_per_block = spec.npoints_per_block(),
    ),
    level = "debug"
)]
pub fn bttb(spec: &BttbSpec, validation: Validation) -> Result<Array2<f64>> {
    if validation.is_enabled() {
        spec.validate()?;
    }
    let p = spec.npoints_per_block();
    let blocks = spec.offset_blocks()?;
    Ok(gather_blocks(&blocks, &toeplitz_index(spec.nblocks), (p, p)))
}
