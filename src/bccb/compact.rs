//! BCCB first column straight from the first column of a pure-symmetry BTTB.
//!
//! When both the structure and the blocks are symmetric or skew-symmetric, the first column
//! `b0` of the BTTB determines the whole matrix. Its `Q` chunks `b1, ..., bQ` are the first
//! columns of `T11, ..., TQ1`, and the embedding first column is
//!
//! ```text
//! [b1, 0, sb·rev(b1[1..]),  ...,  bQ, 0, sb·rev(bQ[1..]),
//!  0 (2P zeros),
//!  ss·bQ, 0, ss·sb·rev(bQ[1..]),  ...,  ss·b2, 0, ss·sb·rev(b2[1..])]
//! ```
//!
//! with `ss`/`sb` the structure/block signs (`+1` symmetric, `-1` skew-symmetric). This needs
//! `O(QP)` time and memory, against `O(Q²P²)` for a table-driven path materializing rows.

use core::iter;

use tracing::instrument;

use super::BccbHandle;
use crate::{
    check,
    errors::{BttbError, Result},
    parameters::Validation,
    symmetry::Symmetry,
};

/// Computes the first column of the embedding BCCB from the first column `b0` of a BTTB.
///
/// Only the four pure symmetries (`symm-symm`, `symm-skew`, `skew-symm`, `skew-skew`) are
/// supported; any other symmetry fails with [`BttbError::Symmetry`] regardless of `validation`.
#[instrument(
    skip_all,
    fields(
        symmetry = %symmetry,
        nblocks = nblocks,
        npoints_per_block = npoints_per_block,
    ),
    level = "debug"
)]
pub fn embedding_first_column(
    b0: &[f64],
    nblocks: usize,
    npoints_per_block: usize,
    symmetry: Symmetry,
    validation: Validation,
) -> Result<BccbHandle> {
    if validation.is_enabled() {
        check::positive("nblocks", nblocks)?;
        check::positive("npoints_per_block", npoints_per_block)?;
        check::element_count(nblocks, npoints_per_block, 4)?;
        check::size("b0", b0.len(), nblocks * npoints_per_block)?;
    }
    let (Some(structure_sign), Some(block_sign)) = (
        symmetry.structure.mirror_sign(),
        symmetry.blocks.mirror_sign(),
    ) else {
        return Err(BttbError::Symmetry(symmetry.to_string()));
    };

    let parts: Vec<&[f64]> = b0.chunks_exact(npoints_per_block).collect();
    let mut c0 = Vec::with_capacity(4 * nblocks * npoints_per_block);
    // First block column of the BTTB.
    for bi in &parts {
        c0.extend(embedded_piece(bi, 1., block_sign));
    }
    c0.extend(iter::repeat_n(0., 2 * npoints_per_block));
    // First block row of the BTTB, in reverse order.
    for bi in parts.iter().skip(1).rev() {
        c0.extend(embedded_piece(bi, structure_sign, block_sign));
    }

    BccbHandle::new(c0, nblocks, npoints_per_block, symmetry, validation)
}

/// `sign · [bi, 0, block_sign · rev(bi[1..])]`
fn embedded_piece(bi: &[f64], sign: f64, block_sign: f64) -> impl Iterator<Item = f64> + '_ {
    bi.iter()
        .map(move |x| sign * x)
        .chain(iter::once(0.))
        .chain(bi.iter().skip(1).rev().map(move |x| sign * block_sign * x))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symm_symm_single_block() {
        let handle = embedding_first_column(
            &[2., 1.],
            1,
            2,
            Symmetry::SYMM_SYMM,
            Validation::Enabled,
        )
        .unwrap();
        assert_eq!(handle.first_column(), &[2., 1., 0., 1., 0., 0., 0., 0.]);
        assert_eq!(handle.nblocks(), 1);
        assert_eq!(handle.npoints_per_block(), 2);
        assert_eq!(handle.symmetry(), Symmetry::SYMM_SYMM);
    }

    #[test]
    fn test_sign_table_two_blocks() {
        let b0 = [1., 2., 3., 4.];
        let expected = [
            (
                Symmetry::SYMM_SYMM,
                [1., 2., 0., 2., 3., 4., 0., 4., 0., 0., 0., 0., 3., 4., 0., 4.],
            ),
            (
                Symmetry::SYMM_SKEW,
                [1., 2., 0., -2., 3., 4., 0., -4., 0., 0., 0., 0., 3., 4., 0., -4.],
            ),
            (
                Symmetry::SKEW_SYMM,
                [1., 2., 0., 2., 3., 4., 0., 4., 0., 0., 0., 0., -3., -4., 0., -4.],
            ),
            (
                Symmetry::SKEW_SKEW,
                [1., 2., 0., -2., 3., 4., 0., -4., 0., 0., 0., 0., -3., -4., 0., 4.],
            ),
        ];
        for (symmetry, c0) in expected {
            let handle =
                embedding_first_column(&b0, 2, 2, symmetry, Validation::Enabled).unwrap();
            assert_eq!(handle.first_column(), &c0, "{symmetry}");
        }
    }

    #[test]
    fn test_rejects_generic_symmetries() {
        for symmetry in Symmetry::ALL.into_iter().filter(|s| !s.is_pure()) {
            for validation in [Validation::Enabled, Validation::Disabled] {
                assert_eq!(
                    embedding_first_column(&[1., 2.], 1, 2, symmetry, validation),
                    Err(BttbError::Symmetry(symmetry.to_string()))
                );
            }
        }
    }

    #[test]
    fn test_rejects_wrong_size() {
        let b0 = [1., 2., 3.];
        assert_eq!(
            embedding_first_column(&b0, 2, 2, Symmetry::SYMM_SYMM, Validation::Enabled),
            Err(BttbError::Size {
                name: "b0",
                expected: 4,
                actual: 3
            })
        );
    }

    #[test]
    fn test_rejects_zero_sizes() {
        assert_eq!(
            embedding_first_column(&[], 0, 2, Symmetry::SYMM_SYMM, Validation::Enabled),
            Err(BttbError::NonPositive { name: "nblocks" })
        );
        assert_eq!(
            embedding_first_column(&[], 2, 0, Symmetry::SYMM_SYMM, Validation::Enabled),
            Err(BttbError::NonPositive {
                name: "npoints_per_block"
            })
        );
    }

    #[test]
    fn test_rejects_overflowing_sizes() {
        for (nblocks, npoints) in [(usize::MAX / 2 + 1, 2), (usize::MAX / 4 + 1, 1)] {
            let result = embedding_first_column(
                &[1.],
                nblocks,
                npoints,
                Symmetry::SYMM_SYMM,
                Validation::Enabled,
            );
            assert!(matches!(result, Err(BttbError::Cardinality(_))));
        }
    }
}
