//! Symmetry taxonomy of Toeplitz and block Toeplitz matrices.
//!
//! A BTTB matrix carries two independent tags:
//! - `structure`: relation between the blocks above and below the main block diagonal,
//! - `blocks`: relation between the elements above and below the main diagonal of every block.
//!
//! Each tag is generic (`gene`), symmetric (`symm`) or skew-symmetric (`skew`), giving nine
//! combinations written `"<structure>-<blocks>"`, e.g. `"symm-skew"`.

use core::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::errors::{BttbError, Result};

/// Relation between the upper and lower triangle of a matrix (or of a block arrangement).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SymmetryTag {
    /// No relation: the first row must be given explicitly.
    Generic,
    /// Upper triangle mirrors the lower one.
    Symmetric,
    /// Upper triangle mirrors the lower one with opposite sign.
    SkewSymmetric,
}

impl SymmetryTag {
    pub const ALL: [Self; 3] = [Self::Generic, Self::Symmetric, Self::SkewSymmetric];

    /// Sign relating the mirrored half to the stored half, or `None` for generic.
    #[must_use]
    pub const fn mirror_sign(self) -> Option<f64> {
        match self {
            Self::Generic => None,
            Self::Symmetric => Some(1.),
            Self::SkewSymmetric => Some(-1.),
        }
    }

    #[must_use]
    pub const fn is_generic(self) -> bool {
        matches!(self, Self::Generic)
    }

    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Generic => "gene",
            Self::Symmetric => "symm",
            Self::SkewSymmetric => "skew",
        }
    }
}

impl Display for SymmetryTag {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for SymmetryTag {
    type Err = BttbError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "gene" => Ok(Self::Generic),
            "symm" => Ok(Self::Symmetric),
            "skew" => Ok(Self::SkewSymmetric),
            _ => Err(BttbError::Symmetry(s.to_string())),
        }
    }
}

/// Combined symmetry of a BTTB matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Symmetry {
    pub structure: SymmetryTag,
    pub blocks: SymmetryTag,
}

impl Symmetry {
    pub const SYMM_SYMM: Self = Self::new(SymmetryTag::Symmetric, SymmetryTag::Symmetric);
    pub const SYMM_SKEW: Self = Self::new(SymmetryTag::Symmetric, SymmetryTag::SkewSymmetric);
    pub const SKEW_SYMM: Self = Self::new(SymmetryTag::SkewSymmetric, SymmetryTag::Symmetric);
    pub const SKEW_SKEW: Self = Self::new(SymmetryTag::SkewSymmetric, SymmetryTag::SkewSymmetric);

    /// The nine valid combinations.
    pub const ALL: [Self; 9] = [
        Self::SYMM_SYMM,
        Self::SYMM_SKEW,
        Self::new(SymmetryTag::Symmetric, SymmetryTag::Generic),
        Self::SKEW_SYMM,
        Self::SKEW_SKEW,
        Self::new(SymmetryTag::SkewSymmetric, SymmetryTag::Generic),
        Self::new(SymmetryTag::Generic, SymmetryTag::Symmetric),
        Self::new(SymmetryTag::Generic, SymmetryTag::SkewSymmetric),
        Self::new(SymmetryTag::Generic, SymmetryTag::Generic),
    ];

    /// The four combinations where neither level is generic.
    pub const PURE: [Self; 4] = [
        Self::SYMM_SYMM,
        Self::SYMM_SKEW,
        Self::SKEW_SYMM,
        Self::SKEW_SKEW,
    ];

    #[must_use]
    pub const fn new(structure: SymmetryTag, blocks: SymmetryTag) -> Self {
        Self { structure, blocks }
    }

    /// True when both the structure and the blocks are symmetric or skew-symmetric.
    #[must_use]
    pub const fn is_pure(self) -> bool {
        !self.structure.is_generic() && !self.blocks.is_generic()
    }

    /// Fails with [`BttbError::Symmetry`] unless the symmetry is pure.
    pub fn require_pure(self) -> Result<Self> {
        if self.is_pure() {
            Ok(self)
        } else {
            Err(BttbError::Symmetry(self.to_string()))
        }
    }

    /// Sign `s` such that `Tᵗ = s · T` for a pure-symmetry BTTB `T`.
    ///
    /// Multiplying the spectral product by this factor yields `Tᵗ · v` without building the
    /// embedding of the transpose. Generic combinations have no such shortcut.
    ///
    /// | symmetry    | factor |
    /// |-------------|--------|
    /// | `symm-symm` | `+1`   |
    /// | `symm-skew` | `-1`   |
    /// | `skew-symm` | `-1`   |
    /// | `skew-skew` | `+1`   |
    pub fn transposition_factor(self) -> Result<f64> {
        let pure = self.require_pure()?;
        // Both signs exist since the symmetry is pure.
        let structure = pure.structure.mirror_sign().unwrap_or(1.);
        let blocks = pure.blocks.mirror_sign().unwrap_or(1.);
        Ok(structure * blocks)
    }
}

impl Display for Symmetry {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}-{}", self.structure, self.blocks)
    }
}

impl FromStr for Symmetry {
    type Err = BttbError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || BttbError::Symmetry(s.to_string());
        let (structure, blocks) = s.split_once('-').ok_or_else(invalid)?;
        Ok(Self::new(
            structure.parse().map_err(|_| invalid())?,
            blocks.parse().map_err(|_| invalid())?,
        ))
    }
}
