//! Clusters: a base sound plus the characters overlaid on it.
//!
//! A [`Cluster`] holds an ordered, bounded run of characters whose combined
//! normalised form is the left fold of overlay addition, seeded by the first
//! member. The typical cluster is a base character followed by one or more
//! diacritics; each later member overrides what it specifies.
//!
//! Members are stored inline, so a cluster holds at most
//! [`MAX_CLUSTER_SIZE`] characters. Building a longer one fails with
//! `ClusterOverflow` rather than allocating.

extern crate alloc;

use alloc::string::String;

use heapless::Vec as HVec;

use crate::character::Character;
use crate::error::{Result, ZoundsError};
use crate::model::FeatureModel;
use crate::normalised_form::NormalisedForm;

/// Maximum number of characters in one cluster: a base plus up to seven
/// stacked diacritics.
pub const MAX_CLUSTER_SIZE: usize = 8;

/// An ordered sequence of characters combined by overlay addition.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Cluster {
    characters: HVec<Character, MAX_CLUSTER_SIZE>,
}

impl Cluster {
    /// Create an empty cluster.
    pub fn new() -> Self {
        Self {
            characters: HVec::new(),
        }
    }

    /// Build a cluster from `characters`, in order.
    pub fn from_characters(characters: &[Character]) -> Result<Self> {
        let mut cluster = Self::new();
        for &c in characters {
            cluster.push(c)?;
        }
        Ok(cluster)
    }

    /// Append a character. Fails with `ClusterOverflow` when full.
    pub fn push(&mut self, character: Character) -> Result<()> {
        self.characters
            .push(character)
            .map_err(|_| ZoundsError::ClusterOverflow(MAX_CLUSTER_SIZE))
    }

    /// Members in order.
    pub fn characters(&self) -> &[Character] {
        &self.characters
    }

    /// Number of members.
    pub fn len(&self) -> usize {
        self.characters.len()
    }

    /// `true` if the cluster has no members.
    pub fn is_empty(&self) -> bool {
        self.characters.is_empty()
    }

    /// Combined normalised form: `((c0 + c1) + c2) + ...`.
    ///
    /// Fails with `EmptyCluster` when there are no members and with
    /// `TypeMismatch` when members mix segmental and suprasegmental kinds.
    pub fn normalised_form(&self, model: &FeatureModel) -> Result<NormalisedForm> {
        let (first, rest) = self
            .characters
            .split_first()
            .ok_or(ZoundsError::EmptyCluster)?;
        let mut form = model.normalised_form_of(*first)?;
        for &c in rest {
            form = form.checked_add(&model.normalised_form_of(c)?)?;
        }
        tracing::trace!(members = self.len(), form = %form, "folded cluster");
        Ok(form)
    }

    /// Concatenated symbols of the members.
    pub fn symbol(&self, model: &FeatureModel) -> Result<String> {
        let mut out = String::new();
        for &c in self.characters.iter() {
            out.push_str(model.character_symbol(c)?);
        }
        Ok(out)
    }
}
