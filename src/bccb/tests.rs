use ndarray::{array, s};
use proptest::prelude::*;
use rand::{SeedableRng, rngs::StdRng};

use super::{compact::embedding_first_column, *};
use crate::{
    bttb::bttb,
    errors::BttbError,
    symmetry::SymmetryTag,
    toeplitz::{ToeplitzSpec, circulant_from_toeplitz},
};

fn symm_symm_2x1() -> BttbSpec {
    BttbSpec {
        symmetry: Symmetry::SYMM_SYMM,
        nblocks: 1,
        columns: array![[2., 1.]],
        rows: None,
    }
}

#[test]
fn test_single_block_matches_circulant_embedding() {
    let handle = bccb_first_column(&symm_symm_2x1(), Validation::Enabled).unwrap();
    assert_eq!(handle.first_column(), &[2., 1., 0., 1., 0., 0., 0., 0.]);

    // The top-left block is the Toeplitz circulant embedding.
    let toeplitz = ToeplitzSpec::symmetric(vec![2., 1.]);
    let circulant = circulant_from_toeplitz(&toeplitz, Validation::Enabled)
        .unwrap()
        .to_dense();
    let dense = handle.to_dense();
    assert_eq!(dense.dim(), (8, 8));
    assert_eq!(dense.slice(s![..4, ..4]), circulant);
    assert_eq!(dense.t(), dense);
}

#[test]
fn test_two_blocks_first_column() {
    let spec = BttbSpec {
        symmetry: Symmetry::SKEW_SYMM,
        nblocks: 2,
        columns: array![[0., 0.], [3., 4.]],
        rows: None,
    };
    let handle = bccb_first_column(&spec, Validation::Enabled).unwrap();
    assert_eq!(
        handle.first_column(),
        &[0., 0., 0., 0., 3., 4., 0., 4., 0., 0., 0., 0., -3., -4., 0., -4.]
    );
}

#[test]
fn test_generic_structure_uses_block_row() {
    let spec = BttbSpec {
        symmetry: Symmetry::new(SymmetryTag::Generic, SymmetryTag::Generic),
        nblocks: 2,
        columns: array![[1., 2.], [3., 4.], [7., 9.]],
        rows: Some(array![[5.], [6.], [8.]]),
    };
    let handle = bccb_first_column(&spec, Validation::Enabled).unwrap();
    assert_eq!(
        handle.first_column(),
        &[1., 2., 0., 5., 3., 4., 0., 6., 0., 0., 0., 0., 7., 9., 0., 8.]
    );
}

#[test]
fn test_to_bttb_matches_bttb_for_all_symmetries() {
    let mut rng = StdRng::seed_from_u64(7);
    for symmetry in Symmetry::ALL {
        for (q, p) in [(1, 1), (2, 3), (4, 2)] {
            let spec = BttbSpec::random(symmetry, q, p, &mut rng);
            let handle = bccb_first_column(&spec, Validation::Enabled).unwrap();
            assert_eq!(handle.first_column().len(), 4 * q * p);
            assert_eq!(
                handle.to_bttb(),
                bttb(&spec, Validation::Enabled).unwrap(),
                "{symmetry} {q}x{p}"
            );
        }
    }
}

#[test]
fn test_dense_bccb_quadrants() {
    let mut rng = StdRng::seed_from_u64(11);
    for symmetry in Symmetry::ALL {
        let (q, p) = (3, 2);
        let spec = BttbSpec::random(symmetry, q, p, &mut rng);
        let c = bccb(&spec, Validation::Enabled).unwrap();
        let t = bttb(&spec, Validation::Enabled).unwrap();
        assert_eq!(c.dim(), (4 * q * p, 4 * q * p));

        // Block (i, j) of the BTTB sits in the top-left quadrant of block (i, j) of the BCCB.
        for i in 0..q * p {
            for j in 0..q * p {
                let (bi, ri) = (i / p, i % p);
                let (bj, rj) = (j / p, j % p);
                assert_eq!(c[[bi * 2 * p + ri, bj * 2 * p + rj]], t[[i, j]], "{symmetry}");
            }
        }
    }
}

#[test]
fn test_validation_errors() {
    let mut spec = symm_symm_2x1();
    spec.rows = Some(array![[1.]]);
    assert!(matches!(
        bccb_first_column(&spec, Validation::Enabled),
        Err(BttbError::Type(_))
    ));

    assert_eq!(
        BccbHandle::new(vec![0.; 7], 1, 2, Symmetry::SYMM_SYMM, Validation::Enabled),
        Err(BttbError::Size {
            name: "first_column",
            expected: 8,
            actual: 7
        })
    );
}

#[test]
fn test_overflowing_sizes() {
    let handle = BccbHandle::new(
        vec![0.; 4],
        usize::MAX / 4 + 1,
        1,
        Symmetry::SYMM_SYMM,
        Validation::Enabled,
    );
    assert!(matches!(handle, Err(BttbError::Cardinality(_))));

    let spec = BttbSpec {
        symmetry: Symmetry::SYMM_SYMM,
        nblocks: usize::MAX / 2 + 1,
        columns: array![[1., 2.]],
        rows: None,
    };
    assert!(matches!(
        bccb_first_column(&spec, Validation::Enabled),
        Err(BttbError::Cardinality(_))
    ));
}

proptest! {
    #[test]
    fn prop_compact_matches_table_driven(
        symmetry in prop::sample::select(Symmetry::PURE.to_vec()),
        nblocks in 1usize..=5,
        npoints in 1usize..=5,
        seed in any::<u64>(),
    ) {
        let mut rng = StdRng::seed_from_u64(seed);
        let spec = BttbSpec::random(symmetry, nblocks, npoints, &mut rng);
        let general = bccb_first_column(&spec, Validation::Enabled).unwrap();
        let compact = embedding_first_column(
            &spec.first_column(),
            nblocks,
            npoints,
            symmetry,
            Validation::Enabled,
        )
        .unwrap();
        prop_assert_eq!(compact, general);
    }

    #[test]
    fn prop_bccb_is_block_circulant(
        symmetry in prop::sample::select(Symmetry::ALL.to_vec()),
        nblocks in 1usize..=3,
        npoints in 1usize..=3,
        seed in any::<u64>(),
    ) {
        let mut rng = StdRng::seed_from_u64(seed);
        let spec = BttbSpec::random(symmetry, nblocks, npoints, &mut rng);
        let c = bccb(&spec, Validation::Enabled).unwrap();
        let (n, m) = (c.nrows(), 2 * npoints);
        for i in 0..n {
            for j in 0..n {
                // Shifting by one block along the diagonal.
                prop_assert_eq!(c[[i, j]], c[[(i + m) % n, (j + m) % n]]);
                // Shifting by one element along the diagonal of a block.
                let (bi, bj) = (i - i % m, j - j % m);
                let shifted = [bi + (i % m + 1) % m, bj + (j % m + 1) % m];
                prop_assert_eq!(c[[i, j]], c[shifted]);
            }
        }
    }
}
