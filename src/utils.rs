use ndarray::{Array2, ArrayView1, ArrayViewMut2, Axis, Zip, s};
#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Computes the optimal workload size for `T` to fit in L1 cache (32 KB).
///
/// Ensures efficient memory access by dividing the cache size by `T`'s size.
/// The result represents how many elements of `T` can be processed per thread.
pub const fn workload_size<T: Sized>() -> usize {
    const L1_CACHE_SIZE: usize = 1 << 15; // 32 KB
    L1_CACHE_SIZE / size_of::<T>()
}

/// Outer-sum index matrix of a Toeplitz structure of order `n`.
///
/// Entry `(r, c)` is `r + (n - 1 - c)`, in `0..=2n-2`. Gathering a generator
/// `[reverse(row), column]` of length `2n - 1` with it yields the Toeplitz matrix whose first
/// column is `column` and whose first row (after the diagonal) is `row`.
///
/// ```text
/// n = 4
/// [[3 2 1 0]
///  [4 3 2 1]
///  [5 4 3 2]
///  [6 5 4 3]]
/// ```
#[must_use]
pub fn toeplitz_index(n: usize) -> Array2<usize> {
    Array2::from_shape_fn((n, n), |(r, c)| r + (n - 1 - c))
}

/// Index matrix of a circulant structure of order `n`.
///
/// Entry `(i, j)` is `(i - j) mod n`, so gathering a first column `C` with it yields the
/// circulant matrix with entries `C[(i - j) mod n]`.
///
/// ```text
/// n = 4
/// [[0 3 2 1]
///  [1 0 3 2]
///  [2 1 0 3]
///  [3 2 1 0]]
/// ```
#[must_use]
pub fn circulant_index(n: usize) -> Array2<usize> {
    Array2::from_shape_fn((n, n), |(i, j)| (i + n - j) % n)
}

/// Concatenates the reversed first row and the first column: the generator indexed by
/// [`toeplitz_index`].
pub(crate) fn toeplitz_generator(reversed_row: &[f64], column: &[f64]) -> Vec<f64> {
    let mut generator = Vec::with_capacity(reversed_row.len() + column.len());
    generator.extend_from_slice(reversed_row);
    generator.extend_from_slice(column);
    generator
}

/// Gathers `source[index[[r, c]]]` into an array shaped like `index`.
///
/// Together with the outer-sum index matrices above, this builds Toeplitz and circulant
/// structures by fancy indexing instead of nested loops over the entries.
#[must_use]
pub fn gather<T: Copy>(source: &[T], index: &Array2<usize>) -> Array2<T> {
    index.mapv(|k| source[k])
}

/// Block matrix whose block `(i, j)` is `blocks[index[[i, j]]]`.
///
/// Every block must have shape `block_shape`. This is [`gather`] at block granularity: with a
/// block-level Toeplitz (resp. circulant) index it assembles a block Toeplitz (resp. block
/// circulant) matrix. Bands of block rows are filled in parallel.
#[must_use]
pub fn gather_blocks<T>(
    blocks: &[Array2<T>],
    index: &Array2<usize>,
    block_shape: (usize, usize),
) -> Array2<T>
where
    T: Copy + Default + Send + Sync,
{
    let (block_height, block_width) = block_shape;
    debug_assert!(blocks.iter().all(|b| b.dim() == block_shape));
    let (rows, cols) = index.dim();
    let mut out = Array2::default((rows * block_height, cols * block_width));
    if out.is_empty() {
        return out;
    }

    let fill = |(i, mut band): (usize, ArrayViewMut2<'_, T>)| {
        for (j, &k) in index.row(i).iter().enumerate() {
            band.slice_mut(s![.., j * block_width..(j + 1) * block_width])
                .assign(&blocks[k]);
        }
    };

    #[cfg(feature = "parallel")]
    out.axis_chunks_iter_mut(Axis(0), block_height)
        .into_par_iter()
        .enumerate()
        .for_each(fill);
    #[cfg(not(feature = "parallel"))]
    out.axis_chunks_iter_mut(Axis(0), block_height)
        .enumerate()
        .for_each(fill);

    out
}

/// Largest absolute difference between two vectors of equal length.
///
/// Panics if the lengths differ.
#[must_use]
pub fn max_abs_diff<'a, 'b>(
    a: impl Into<ArrayView1<'a, f64>>,
    b: impl Into<ArrayView1<'b, f64>>,
) -> f64 {
    let (a, b): (ArrayView1<'_, f64>, ArrayView1<'_, f64>) = (a.into(), b.into());
    Zip::from(&a)
        .and(&b)
        .fold(0., |acc: f64, x, y| acc.max((x - y).abs()))
}
