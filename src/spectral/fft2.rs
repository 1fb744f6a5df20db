//! Orthonormal 2D FFT over complex grids.

use core::fmt::{self, Debug};
use std::sync::Arc;

use ndarray::{Array2, ArrayView1, ArrayViewMut1, Axis};
use num_complex::Complex64;
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use rustfft::{Fft, FftPlanner};

#[cfg(feature = "parallel")]
use crate::utils::workload_size;

/// Planned forward and inverse 2D FFTs for a fixed `rows × cols` grid.
///
/// Both directions are scaled by `1 / sqrt(rows · cols)`, so the forward transform is unitary and
/// the inverse undoes it exactly (up to rounding). Rows are transformed in place; columns are
/// transformed as the rows of the transposed grid.
#[derive(Clone)]
pub struct Fft2 {
    rows: usize,
    cols: usize,
    row_forward: Arc<dyn Fft<f64>>,
    row_inverse: Arc<dyn Fft<f64>>,
    col_forward: Arc<dyn Fft<f64>>,
    col_inverse: Arc<dyn Fft<f64>>,
}

impl Fft2 {
    #[must_use]
    pub fn new(rows: usize, cols: usize) -> Self {
        let mut planner = FftPlanner::new();
        Self {
            rows,
            cols,
            row_forward: planner.plan_fft_forward(cols),
            row_inverse: planner.plan_fft_inverse(cols),
            col_forward: planner.plan_fft_forward(rows),
            col_inverse: planner.plan_fft_inverse(rows),
        }
    }

    #[must_use]
    pub const fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Forward orthonormal 2D FFT.
    ///
    /// Panics if `grid` does not have the planned shape.
    #[must_use]
    pub fn forward(&self, grid: Array2<Complex64>) -> Array2<Complex64> {
        self.transform(grid, &self.row_forward, &self.col_forward)
    }

    /// Inverse orthonormal 2D FFT.
    ///
    /// Panics if `grid` does not have the planned shape.
    #[must_use]
    pub fn inverse(&self, grid: Array2<Complex64>) -> Array2<Complex64> {
        self.transform(grid, &self.row_inverse, &self.col_inverse)
    }

    fn transform(
        &self,
        grid: Array2<Complex64>,
        row_fft: &Arc<dyn Fft<f64>>,
        col_fft: &Arc<dyn Fft<f64>>,
    ) -> Array2<Complex64> {
        assert_eq!(
            grid.dim(),
            self.shape(),
            "grid does not match the planned shape"
        );
        if grid.is_empty() {
            return grid;
        }

        let mut grid = grid.as_standard_layout().into_owned();
        rows_in_place(&mut grid, row_fft);
        let mut transposed = grid.t().as_standard_layout().into_owned();
        rows_in_place(&mut transposed, col_fft);

        let scale = 1. / ((self.rows * self.cols) as f64).sqrt();
        let mut grid = transposed.reversed_axes().as_standard_layout().into_owned();
        grid.mapv_inplace(|x| x * scale);
        grid
    }
}

impl Debug for Fft2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Fft2")
            .field("rows", &self.rows)
            .field("cols", &self.cols)
            .finish_non_exhaustive()
    }
}

/// Runs `fft` over every row of `grid`.
///
/// Rows are processed in parallel once the grid outgrows the L1 workload size.
fn rows_in_place(grid: &mut Array2<Complex64>, fft: &Arc<dyn Fft<f64>>) {
    let scratch_len = fft.get_inplace_scratch_len();

    #[cfg(feature = "parallel")]
    if grid.len() >= workload_size::<Complex64>() {
        grid.axis_iter_mut(Axis(0)).into_par_iter().for_each_init(
            || vec![Complex64::default(); scratch_len],
            |scratch, row| process_row(row, fft, scratch),
        );
        return;
    }

    let mut scratch = vec![Complex64::default(); scratch_len];
    for row in grid.axis_iter_mut(Axis(0)) {
        process_row(row, fft, &mut scratch);
    }
}

fn process_row(
    mut row: ArrayViewMut1<'_, Complex64>,
    fft: &Arc<dyn Fft<f64>>,
    scratch: &mut [Complex64],
) {
    if let Some(values) = row.as_slice_mut() {
        fft.process_with_scratch(values, scratch);
        return;
    }
    // Strided row: transform a contiguous copy.
    let mut values = row.to_vec();
    fft.process_with_scratch(&mut values, scratch);
    row.assign(&ArrayView1::from(&values));
}
