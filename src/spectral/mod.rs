//! Spectral diagonalization of BCCB matrices.
//!
//! A BCCB `C` of `2Q × 2Q` blocks of `2P × 2P` elements is diagonalized by the 2D DFT:
//! `C = F* Λ F`, where the eigenvalues `Λ` are the 2D FFT of its first column laid out on a
//! `2Q × 2P` grid. Keeping the eigenvalues instead of the matrix reduces storage to `4QP`
//! complex values and the product with a vector to a pair of 2D FFTs (see [`product`]).

use ndarray::{Array2, ArrayView2};
use num_complex::Complex64;
use tracing::{debug, instrument};

use crate::{
    bccb::BccbHandle,
    check,
    errors::{BttbError, Result},
    parameters::{Ordering, Validation},
    symmetry::Symmetry,
};

pub mod fft2;
pub mod product;


pub use fft2::Fft2;
pub use product::{product, transposed_product};

/// Eigenvalues of an embedding BCCB, ready for repeated products.
///
/// The grid is `2Q × 2P` for [`Ordering::Row`] and `2P × 2Q` for [`Ordering::Column`]. The 2D
/// FFT matching that grid is planned once here and reused by every product.
#[derive(Debug, Clone)]
pub struct SpectralHandle {
    eigenvalues: Array2<Complex64>,
    ordering: Ordering,
    nblocks: usize,
    npoints_per_block: usize,
    symmetry: Symmetry,
    fft: Fft2,
}

impl SpectralHandle {
    /// Wraps an eigenvalue grid computed elsewhere.
    pub fn new(
        eigenvalues: Array2<Complex64>,
        ordering: Ordering,
        nblocks: usize,
        npoints_per_block: usize,
        symmetry: Symmetry,
        validation: Validation,
    ) -> Result<Self> {
        if validation.is_enabled() {
            check::positive("nblocks", nblocks)?;
            check::positive("npoints_per_block", npoints_per_block)?;
            check::element_count(nblocks, npoints_per_block, 4)?;
            check::shape(
                "eigenvalues",
                &eigenvalues,
                ordering.grid_shape(nblocks, npoints_per_block),
            )?;
        }
        let (rows, cols) = eigenvalues.dim();
        Ok(Self {
            eigenvalues,
            ordering,
            nblocks,
            npoints_per_block,
            symmetry,
            fft: Fft2::new(rows, cols),
        })
    }

    #[must_use]
    pub const fn eigenvalues(&self) -> &Array2<Complex64> {
        &self.eigenvalues
    }

    #[must_use]
    pub const fn ordering(&self) -> Ordering {
        self.ordering
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

    /// Order `Q · P` of the embedded BTTB.
    #[must_use]
    pub const fn order(&self) -> usize {
        self.nblocks * self.npoints_per_block
    }

    pub(crate) const fn fft(&self) -> &Fft2 {
        &self.fft
    }
}

/// Computes the eigenvalues of the BCCB whose first column is held by `handle`.
///
/// The first column is laid out row by row on a `2Q × 2P` grid (transposed for
/// [`Ordering::Column`]) and `L = sqrt(4QP) · fft2(G)` with an orthonormal 2D FFT.
#[instrument(
    skip_all,
    fields(
        nblocks = handle.nblocks(),
        npoints_per_block = handle.npoints_per_block(),
        ordering = %ordering,
    ),
    level = "debug"
)]
pub fn eigenvalues(
    handle: &BccbHandle,
    ordering: Ordering,
    validation: Validation,
) -> Result<SpectralHandle> {
    let (q, p) = (handle.nblocks(), handle.npoints_per_block());
    if validation.is_enabled() {
        check::positive("nblocks", q)?;
        check::positive("npoints_per_block", p)?;
        let expected = check::element_count(q, p, 4)?;
        check::size("first_column", handle.first_column().len(), expected)?;
    } else {
        debug!("computing eigenvalues without input validation");
    }

    let first_column = handle.first_column();
    let grid = ArrayView2::from_shape(Ordering::Row.grid_shape(q, p), first_column).map_err(
        |_| BttbError::Size {
            name: "first_column",
            expected: q.saturating_mul(p).saturating_mul(4),
            actual: first_column.len(),
        },
    )?;
    let grid = match ordering {
        Ordering::Row => grid,
        Ordering::Column => grid.reversed_axes(),
    };

    let (rows, cols) = grid.dim();
    let fft = Fft2::new(rows, cols);
    let scale = ((rows * cols) as f64).sqrt();
    let mut eigenvalues = fft.forward(grid.mapv(|x| Complex64::new(x, 0.)));
    eigenvalues.mapv_inplace(|x| x * scale);

    Ok(SpectralHandle {
        eigenvalues,
        ordering,
        nblocks: q,
        npoints_per_block: p,
        symmetry: handle.symmetry(),
        fft,
    })
}
