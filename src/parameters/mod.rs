use core::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::errors::BttbError;

/// Whether a public operation checks its inputs before computing.
///
/// Validation is on by default. Callers running the same operation in a tight loop on inputs
/// that were already validated once may pass [`Validation::Disabled`] to skip the checks; in
/// that mode malformed input is a logic error and may panic or produce garbage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Validation {
    /// Check shapes, sizes and symmetry tags, returning an error on violation.
    #[default]
    Enabled,
    /// Trust the caller.
    Disabled,
}

impl Validation {
    #[must_use]
    pub const fn is_enabled(self) -> bool {
        matches!(self, Self::Enabled)
    }
}

impl From<bool> for Validation {
    fn from(check_input: bool) -> Self {
        if check_input {
            Self::Enabled
        } else {
            Self::Disabled
        }
    }
}

/// How the first column of a BCCB is laid out on the `2Q × 2P` grid before the 2D FFT.
///
/// With [`Ordering::Row`] the grid has `2 * nblocks` rows of `2 * npoints_per_block` values, one
/// circulant block per row. [`Ordering::Column`] stores the transpose of that grid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Ordering {
    #[default]
    Row,
    Column,
}

impl Ordering {
    /// Shape of the eigenvalue grid for a BTTB with the given block layout.
    #[must_use]
    pub const fn grid_shape(self, nblocks: usize, npoints_per_block: usize) -> (usize, usize) {
        match self {
            Self::Row => (2 * nblocks, 2 * npoints_per_block),
            Self::Column => (2 * npoints_per_block, 2 * nblocks),
        }
    }

    /// Shape of the unpadded data grid holding a vector of `nblocks * npoints_per_block` values.
    #[must_use]
    pub const fn data_shape(self, nblocks: usize, npoints_per_block: usize) -> (usize, usize) {
        match self {
            Self::Row => (nblocks, npoints_per_block),
            Self::Column => (npoints_per_block, nblocks),
        }
    }
}

impl Display for Ordering {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(match self {
            Self::Row => "row",
            Self::Column => "column",
        })
    }
}

impl FromStr for Ordering {
    type Err = BttbError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "row" => Ok(Self::Row),
            "column" => Ok(Self::Column),
            _ => Err(BttbError::Ordering(s.to_string())),
        }
    }
}
