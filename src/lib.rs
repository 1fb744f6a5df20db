//! Block Toeplitz matrices with Toeplitz blocks (BTTB), their block circulant embedding
//! (BCCB) and fast matrix-vector products through the 2D FFT.

pub mod bccb;
pub mod bttb;
pub mod check;
pub mod errors;
pub mod parameters;
pub mod spectral;
pub mod symmetry;
pub mod toeplitz;
pub mod utils;

pub use bccb::{BccbHandle, bccb, bccb_first_column, compact::embedding_first_column};
pub use bttb::{BttbSpec, bttb};
pub use errors::{BttbError, Result};
pub use parameters::{Ordering, Validation};
pub use spectral::{SpectralHandle, eigenvalues, product, transposed_product};
pub use symmetry::{Symmetry, SymmetryTag};
pub use toeplitz::{CirculantEmbedding, ToeplitzSpec, circulant_from_toeplitz, toeplitz};
