//! Fast BTTB-vector products through the eigenvalues of the embedding BCCB.
//!
//! For a vector `v` of `Q · P` values, `T · v` is the top-left `Q × P` quadrant of the BCCB
//! product with `v` zero-padded to `2Q × 2P`. The BCCB product is a 2D circular convolution:
//!
//! ```text
//! w = ifft2(L ⊙ fft2(pad(v)))
//! ```
//!
//! with orthonormal 2D FFTs and `L` the eigenvalue grid. Cost is `O(QP log(QP))`.

use ndarray::{Array2, ArrayView2, Zip, s};
use num_complex::Complex64;
use tracing::{debug, instrument};

use super::SpectralHandle;
use crate::{
    check,
    errors::{BttbError, Result},
    parameters::{Ordering, Validation},
};

/// Product `T · v` of the BTTB embedded in `spectral` with `v`.
///
/// `v` holds `Q · P` values in the row-major order of the BTTB columns, i.e. `P` values per
/// block. The result has the same layout.
#[instrument(
    skip_all,
    fields(
        nblocks = spectral.nblocks(),
        npoints_per_block = spectral.npoints_per_block(),
        ordering = %spectral.ordering(),
    ),
    level = "debug"
)]
pub fn product(spectral: &SpectralHandle, v: &[f64], validation: Validation) -> Result<Vec<f64>> {
    let (q, p) = (spectral.nblocks(), spectral.npoints_per_block());
    let ordering = spectral.ordering();
    if validation.is_enabled() {
        check::element_count(q, p, 4)?;
        check::shape(
            "eigenvalues",
            spectral.eigenvalues(),
            ordering.grid_shape(q, p),
        )?;
        check::size("v", v.len(), q * p)?;
    } else {
        debug!("computing product without input validation");
    }

    let data = ArrayView2::from_shape((q, p), v).map_err(|_| BttbError::Size {
        name: "v",
        expected: q.saturating_mul(p),
        actual: v.len(),
    })?;
    let data = match ordering {
        Ordering::Row => data,
        Ordering::Column => data.reversed_axes(),
    };

    let (data_rows, data_cols) = ordering.data_shape(q, p);
    let mut padded = Array2::<Complex64>::zeros(spectral.eigenvalues().dim());
    Zip::from(padded.slice_mut(s![..data_rows, ..data_cols]))
        .and(&data)
        .for_each(|x, &y| *x = Complex64::new(y, 0.));

    let mut spectrum = spectral.fft().forward(padded);
    spectrum *= spectral.eigenvalues();

    let w = spectral.fft().inverse(spectrum);
    let w = w.slice(s![..data_rows, ..data_cols]);
    let w = match ordering {
        Ordering::Row => w,
        Ordering::Column => w.reversed_axes(),
    };
    Ok(w.iter().map(|x| x.re).collect())
}

/// Product `Tᵗ · v` for a BTTB with a pure symmetry.
///
/// Pure-symmetry BTTBs satisfy `Tᵗ = s · T` with `s` the transposition factor of the symmetry,
/// so no embedding of the transpose is needed.
pub fn transposed_product(
    spectral: &SpectralHandle,
    v: &[f64],
    validation: Validation,
) -> Result<Vec<f64>> {
    let factor = spectral.symmetry().transposition_factor()?;
    let mut w = product(spectral, v, validation)?;
    for x in &mut w {
        *x *= factor;
    }
    Ok(w)
}
