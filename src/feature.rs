//! Feature kinds, normalised form markers and feature handles.

use crate::error::{Result, ZoundsError};

/// Marker of a segmental (base) normalised form.
pub const BNFM: char = 'B';

/// Marker of a suprasegmental normalised form.
pub const SNFM: char = 'S';

/// The subspace a feature belongs to.
///
/// The set is closed: each kind owns exactly one normalised form marker and
/// its own ordered list of feature positions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FeatureKind {
    /// Segmental feature, carried by base and diacritic characters.
    Segmental,
    /// Suprasegmental feature, carried by tone and stress marks.
    Suprasegmental,
}

impl FeatureKind {
    /// Both kinds, in marker order.
    pub const ALL: [FeatureKind; 2] = [FeatureKind::Segmental, FeatureKind::Suprasegmental];

    /// Normalised form marker for this kind.
    #[inline]
    pub const fn marker(self) -> char {
        match self {
            Self::Segmental => BNFM,
            Self::Suprasegmental => SNFM,
        }
    }

    /// Select a kind from a normalised form marker.
    pub fn from_marker(marker: char) -> Result<Self> {
        match marker {
            BNFM => Ok(Self::Segmental),
            SNFM => Ok(Self::Suprasegmental),
            other => Err(ZoundsError::InvalidMarker(Some(other))),
        }
    }

    #[inline]
    pub(crate) const fn slot(self) -> usize {
        match self {
            Self::Segmental => 0,
            Self::Suprasegmental => 1,
        }
    }
}

impl core::fmt::Display for FeatureKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(match self {
            Self::Segmental => "segmental",
            Self::Suprasegmental => "suprasegmental",
        })
    }
}

/// Handle to a feature registered with a [`FeatureModel`](crate::model::FeatureModel).
///
/// The position is fixed for the model's lifetime and is the feature's index
/// in every normalised form of its kind. Names live in the model.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Feature {
    pub(crate) model: u32,
    pub(crate) kind: FeatureKind,
    pub(crate) position: usize,
}

impl Feature {
    /// Kind of the feature.
    #[inline]
    pub fn kind(&self) -> FeatureKind {
        self.kind
    }

    /// Position of the feature in normalised forms of its kind.
    #[inline]
    pub fn position(&self) -> usize {
        self.position
    }
}
