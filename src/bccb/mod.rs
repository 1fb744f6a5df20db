//! Block circulant matrices formed by circulant blocks (BCCB) embedding a BTTB.
//!
//! The BTTB has `Q × Q` blocks of `P × P` elements; the embedding BCCB has `2Q × 2Q` blocks of
//! `2P × 2P` elements and inherits the symmetries of the BTTB. Its first block column is
//!
//! ```text
//! [C(T11), C(T21), ..., C(TQ1), 0, C(T1Q), ..., C(T12)]
//! ```
//!
//! where `C(Tij)` is the circulant embedding of block `Tij` and `0` is a zero block that keeps the
//! block-level wraparound from corrupting the BTTB quadrant. A BCCB is fully described by its
//! first column, which is all [`BccbHandle`] stores.

use core::iter;

use ndarray::{Array2, s};
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::{
    bttb::BttbSpec,
    check,
    errors::Result,
    parameters::Validation,
    symmetry::Symmetry,
    toeplitz::embedding_column,
    utils::{circulant_index, gather, gather_blocks},
};

pub mod compact;

#[cfg(test)]
mod tests;

/// First column of an embedding BCCB together with the layout of its originating BTTB.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BccbHandle {
    first_column: Vec<f64>,
    nblocks: usize,
    npoints_per_block: usize,
    symmetry: Symmetry,
}

impl BccbHandle {
    /// Wraps a first column of `4 · nblocks · npoints_per_block` elements.
    pub fn new(
        first_column: Vec<f64>,
        nblocks: usize,
        npoints_per_block: usize,
        symmetry: Symmetry,
        validation: Validation,
    ) -> Result<Self> {
        if validation.is_enabled() {
            check::positive("nblocks", nblocks)?;
            check::positive("npoints_per_block", npoints_per_block)?;
            let expected = check::element_count(nblocks, npoints_per_block, 4)?;
            check::size("first_column", first_column.len(), expected)?;
        }
        Ok(Self {
            first_column,
            nblocks,
            npoints_per_block,
            symmetry,
        })
    }

    #[must_use]
    pub fn first_column(&self) -> &[f64] {
        &self.first_column
    }

    #[must_use]
    pub const fn nblocks(&self) -> usize {
        self.nblocks
    }

    #[must_use]
    pub const fn npoints_per_block(&self) -> usize {
        self.npoints_per_block
    }

    #[must_use]
    pub const fn symmetry(&self) -> Symmetry {
        self.symmetry
    }

    /// First columns of the `2Q` circulant blocks of the first block column.
    fn block_columns(&self) -> impl Iterator<Item = &[f64]> + '_ {
        self.first_column.chunks_exact(2 * self.npoints_per_block)
    }

    /// Expands the handle into the dense `4QP × 4QP` BCCB.
    ///
    /// Each circulant block is gathered with the element-level circulant index, and blocks are
    /// arranged with the block-level one.
    #[must_use]
    pub fn to_dense(&self) -> Array2<f64> {
        let order = 2 * self.npoints_per_block;
        let element_index = circulant_index(order);
        let blocks: Vec<_> = self
            .block_columns()
            .map(|column| gather(column, &element_index))
            .collect();
        gather_blocks(&blocks, &circulant_index(2 * self.nblocks), (order, order))
    }

    /// Recovers the dense `QP × QP` BTTB embedded in the BCCB.
    ///
    /// The BTTB is made of the top-left `P × P` quadrants of the top-left `Q × Q` blocks.
    #[must_use]
    pub fn to_bttb(&self) -> Array2<f64> {
        let (q, p) = (self.nblocks, self.npoints_per_block);
        let element_index = circulant_index(2 * p).slice(s![..p, ..p]).to_owned();
        let block_index = circulant_index(2 * q).slice(s![..q, ..q]).to_owned();
        let blocks: Vec<_> = self
            .block_columns()
            .map(|column| gather(column, &element_index))
            .collect();
        gather_blocks(&blocks, &block_index, (p, p))
    }
}

/// First column of the BCCB embedding the BTTB described by `spec`.
///
/// Every generating block is embedded independently (in parallel with the `parallel`
/// feature). For symmetric/skew-symmetric structures the block row is the block column
/// times the structure sign.
#[instrument(
    skip_all,
    fields(
        symmetry = %spec.symmetry,
        nblocks = spec.nblocks,
        npoints_per_block = spec.npoints_per_block(),
    ),
    level = "debug"
)]
pub fn bccb_first_column(spec: &BttbSpec, validation: Validation) -> Result<BccbHandle> {
    if validation.is_enabled() {
        spec.validate()?;
    }
    let (q, p) = (spec.nblocks, spec.npoints_per_block());
    let embed = |k: usize| {
        let (column, row) = spec.generating_block(k);
        embedding_column(spec.symmetry.blocks, &column, row.as_deref())
    };

    #[cfg(feature = "parallel")]
    let pieces = (0..spec.num_generating_blocks())
        .into_par_iter()
        .map(embed)
        .collect::<Result<Vec<_>>>()?;
    #[cfg(not(feature = "parallel"))]
    let pieces = (0..spec.num_generating_blocks())
        .map(embed)
        .collect::<Result<Vec<_>>>()?;

    let mut first_column = Vec::with_capacity(4 * q * p);
    for piece in &pieces[..q] {
        first_column.extend_from_slice(piece);
    }
    first_column.extend(iter::repeat_n(0., 2 * p));
    match spec.symmetry.structure.mirror_sign() {
        Some(sign) => {
            for piece in pieces[1..q].iter().rev() {
                first_column.extend(piece.iter().map(|x| sign * x));
            }
        }
        None => {
            for piece in pieces[q..].iter().rev() {
                first_column.extend_from_slice(piece);
            }
        }
    }

    Ok(BccbHandle {
        first_column,
        nblocks: q,
        npoints_per_block: p,
        symmetry: spec.symmetry,
    })
}

/// Dense `4QP × 4QP` BCCB embedding the BTTB described by `spec`.
pub fn bccb(spec: &BttbSpec, validation: Validation) -> Result<Array2<f64>> {
    Ok(bccb_first_column(spec, validation)?.to_dense())
}
