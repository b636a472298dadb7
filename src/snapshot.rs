//! Portable snapshot of a [`FeatureModel`] for persistence and transport.
//!
//! A snapshot lists the features of each kind in position order and every
//! character with its kind and textual normalised form:
//!
//! ```text
//! { "version": 1,
//!   "features":   [{ "name": "voiced", "kind": "Segmental" }, ...],
//!   "characters": [{ "symbol": "b", "kind": "Base", "form": "B+-" }, ...] }
//! ```
//!
//! Restoring replays the registrations, so a restored model assigns the same
//! positions and produces the same normalised forms. Model identity is not
//! preserved: handles from the original model are unknown to the restored one.
//!
//! # no_std
//!
//! This module requires the `serde` feature and only needs `alloc`.

extern crate alloc;

use alloc::string::{String, ToString};
use alloc::vec::Vec;

use crate::character::CharacterKind;
use crate::error::{Result, ZoundsError};
use crate::feature::{Feature, FeatureKind};
use crate::model::FeatureModel;
use crate::normalised_form::NormalisedForm;

/// Current snapshot format version.
pub const SNAPSHOT_VERSION: u16 = 1;

/// Serializable representation of a whole [`FeatureModel`].
///
/// # Example
///
/// ```rust,ignore
/// use zounds_core::snapshot::ModelSnapshot;
///
/// let snapshot = ModelSnapshot::from_model(&model)?;
/// let json = serde_json::to_string(&snapshot).unwrap();
/// let restored: ModelSnapshot = serde_json::from_str(&json).unwrap();
/// let model = restored.to_model()?;
/// ```
#[derive(serde::Serialize, serde::Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct ModelSnapshot {
    /// Format version, always [`SNAPSHOT_VERSION`] for newly created snapshots.
    pub version: u16,
    /// Segmental features in position order, then suprasegmental ones.
    pub features: Vec<FeatureRecord>,
    /// Characters in registration order.
    pub characters: Vec<CharacterRecord>,
}

/// Serializable representation of one feature.
#[derive(serde::Serialize, serde::Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct FeatureRecord {
    /// Feature name, unique within its kind.
    pub name: String,
    /// Feature kind.
    pub kind: FeatureKind,
}

/// Serializable representation of one character.
#[derive(serde::Serialize, serde::Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct CharacterRecord {
    /// Character symbol.
    pub symbol: String,
    /// Character kind.
    pub kind: CharacterKind,
    /// Textual normalised form (marker followed by one symbol per feature).
    pub form: String,
}

impl ModelSnapshot {
    /// Capture every feature and character of `model`.
    pub fn from_model(model: &FeatureModel) -> Result<Self> {
        let features = FeatureKind::ALL
            .iter()
            .flat_map(|&kind| {
                model.features(kind).map(move |(_, name)| FeatureRecord {
                    name: name.to_string(),
                    kind,
                })
            })
            .collect();

        let characters = model
            .characters()
            .map(|(c, symbol)| {
                Ok(CharacterRecord {
                    symbol: symbol.to_string(),
                    kind: c.kind(),
                    form: model.normalised_form_of(c)?.to_string(),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            version: SNAPSHOT_VERSION,
            features,
            characters,
        })
    }

    /// Rebuild a model by replaying the recorded registrations.
    ///
    /// A form whose kind or length disagrees with the recorded features fails
    /// with `TypeMismatch` or `ShapeMismatch`; a specified value on a spacing
    /// character fails with `MismatchedKind`.
    pub fn to_model(&self) -> Result<FeatureModel> {
        let mut model = FeatureModel::new();
        let mut handles: [Vec<Feature>; 2] = [Vec::new(), Vec::new()];
        for record in &self.features {
            let feature = model.register_feature(&record.name, record.kind)?;
            handles[record.kind.slot()].push(feature);
        }

        for record in &self.characters {
            let c = model.register_character(&record.symbol, record.kind)?;
            let form = NormalisedForm::parse(&record.form)?;
            let kind = record.kind.feature_kind();
            if form.kind() != kind {
                return Err(ZoundsError::TypeMismatch {
                    left: kind,
                    right: form.kind(),
                });
            }
            let features = &handles[kind.slot()];
            if form.len() != features.len() {
                return Err(ZoundsError::ShapeMismatch {
                    left: features.len(),
                    right: form.len(),
                });
            }
            for (&feature, value) in features.iter().zip(form.iter()) {
                model.set_character_feature_value(c, feature, value)?;
            }
        }
        Ok(model)
    }

    /// Number of character records.
    pub fn character_count(&self) -> usize {
        self.characters.len()
    }

    /// Look up a character record by symbol.
    pub fn find_character(&self, symbol: &str) -> Option<&CharacterRecord> {
        self.characters.iter().find(|r| r.symbol == symbol)
    }
}
