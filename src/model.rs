//! The feature model: registry of features, characters and their values.
//!
//! Features and characters live in arenas indexed by registration order.
//! A feature's index within its kind is its position in every normalised
//! form of that kind, so the algebra in [`crate::normalised_form`] never
//! looks anything up by name.
//!
//! # Invariants
//!
//! - Every character has exactly one value per registered feature of its
//!   feature kind. Features registered after a character are retrofitted as
//!   inapplicable.
//! - Positions never change once assigned.
//! - Spacing characters stay all-inapplicable.
//!
//! Construction is the only phase that needs `&mut`. Afterwards every query
//! takes `&self`, and the model can be shared across threads as-is.

extern crate alloc;

use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::sync::atomic::{AtomicU32, Ordering};

use hashbrown::HashMap;

use crate::character::{Character, CharacterKind};
use crate::error::{Result, ZoundsError};
use crate::feature::{Feature, FeatureKind};
use crate::normalised_form::NormalisedForm;
use crate::value::FeatureValue;

static NEXT_MODEL_ID: AtomicU32 = AtomicU32::new(1);

struct CharacterEntry {
    symbol: String,
    kind: CharacterKind,
    row: Vec<FeatureValue>,
}

/// Registry owning every feature and character and the value of each
/// (character, feature) pair.
pub struct FeatureModel {
    id: u32,
    /// Feature names per kind, indexed by position.
    features: [Vec<String>; 2],
    feature_index: [HashMap<String, usize>; 2],
    characters: Vec<CharacterEntry>,
    character_index: HashMap<String, usize>,
}

impl FeatureModel {
    /// Create an empty model.
    pub fn new() -> Self {
        Self {
            id: NEXT_MODEL_ID.fetch_add(1, Ordering::Relaxed),
            features: [Vec::new(), Vec::new()],
            feature_index: [HashMap::new(), HashMap::new()],
            characters: Vec::new(),
            character_index: HashMap::new(),
        }
    }

    // ── Construction ───────────────────────────────────────────────────────

    /// Register a feature of `kind` at the next free position.
    ///
    /// Every existing character of the matching kind gets an inapplicable
    /// value for the new feature.
    pub fn register_feature(&mut self, name: &str, kind: FeatureKind) -> Result<Feature> {
        let slot = kind.slot();
        if self.feature_index[slot].contains_key(name) {
            return Err(ZoundsError::DuplicateFeature {
                name: name.to_string(),
                kind,
            });
        }
        let position = self.features[slot].len();
        self.features[slot].push(name.to_string());
        self.feature_index[slot].insert(name.to_string(), position);

        for entry in self
            .characters
            .iter_mut()
            .filter(|e| e.kind.feature_kind() == kind)
        {
            entry.row.push(FeatureValue::Inapplicable);
        }

        tracing::debug!(feature = name, %kind, position, "registered feature");
        Ok(Feature {
            model: self.id,
            kind,
            position,
        })
    }

    /// Register a character. Its row starts inapplicable for every feature
    /// of its feature kind.
    pub fn register_character(&mut self, symbol: &str, kind: CharacterKind) -> Result<Character> {
        if self.character_index.contains_key(symbol) {
            return Err(ZoundsError::DuplicateCharacter(symbol.to_string()));
        }
        let index = self.characters.len();
        let width = self.features[kind.feature_kind().slot()].len();
        self.characters.push(CharacterEntry {
            symbol: symbol.to_string(),
            kind,
            row: alloc::vec![FeatureValue::Inapplicable; width],
        });
        self.character_index.insert(symbol.to_string(), index);

        tracing::debug!(character = symbol, kind = kind.describe(), "registered character");
        Ok(Character {
            model: self.id,
            kind,
            index,
        })
    }

    /// Assign `value` to `character` for `feature`.
    pub fn set_character_feature_value(
        &mut self,
        character: Character,
        feature: Feature,
        value: FeatureValue,
    ) -> Result<()> {
        self.check_feature(feature)?;
        let index = self.check_character(character)?;
        let entry = &mut self.characters[index];
        if entry.kind.feature_kind() != feature.kind
            || (entry.kind == CharacterKind::Spacing && value.is_specified())
        {
            return Err(ZoundsError::MismatchedKind {
                feature: feature.kind,
                character: entry.kind.describe(),
            });
        }
        entry.row[feature.position] = value;
        Ok(())
    }

    // ── Queries ────────────────────────────────────────────────────────────

    /// Value of `feature` for `character`.
    pub fn value_of(&self, character: Character, feature: Feature) -> Result<FeatureValue> {
        self.check_feature(feature)?;
        let entry = &self.characters[self.check_character(character)?];
        if entry.kind.feature_kind() != feature.kind {
            return Err(ZoundsError::MismatchedKind {
                feature: feature.kind,
                character: entry.kind.describe(),
            });
        }
        Ok(entry.row[feature.position])
    }

    /// Normalised form of `character`: its row in feature registration order,
    /// tagged with the marker of its feature kind.
    pub fn normalised_form_of(&self, character: Character) -> Result<NormalisedForm> {
        let entry = &self.characters[self.check_character(character)?];
        Ok(NormalisedForm::new(entry.kind.feature_kind(), entry.row.clone()))
    }

    /// First registered non-spacing character whose normalised form equals `form`.
    ///
    /// Spacing characters are skipped: their form cannot be told apart from
    /// the empty form.
    pub fn character_for_form(&self, form: &NormalisedForm) -> Option<Character> {
        self.characters
            .iter()
            .enumerate()
            .find(|(_, e)| {
                e.kind != CharacterKind::Spacing
                    && e.kind.feature_kind() == form.kind()
                    && e.row.as_slice() == form.values()
            })
            .map(|(index, e)| Character {
                model: self.id,
                kind: e.kind,
                index,
            })
    }

    /// Look up a feature by name within `kind`.
    pub fn feature(&self, name: &str, kind: FeatureKind) -> Option<Feature> {
        self.feature_index[kind.slot()]
            .get(name)
            .map(|&position| Feature {
                model: self.id,
                kind,
                position,
            })
    }

    /// Look up a character by symbol.
    pub fn character(&self, symbol: &str) -> Option<Character> {
        self.character_index.get(symbol).map(|&index| Character {
            model: self.id,
            kind: self.characters[index].kind,
            index,
        })
    }

    /// Name of `feature`.
    pub fn feature_name(&self, feature: Feature) -> Result<&str> {
        self.check_feature(feature)?;
        Ok(&self.features[feature.kind.slot()][feature.position])
    }

    /// Symbol of `character`.
    pub fn character_symbol(&self, character: Character) -> Result<&str> {
        let index = self.check_character(character)?;
        Ok(&self.characters[index].symbol)
    }

    /// Kind `character` was registered with.
    pub fn character_kind(&self, character: Character) -> Result<CharacterKind> {
        let index = self.check_character(character)?;
        Ok(self.characters[index].kind)
    }

    /// Features of `kind` with their names, in position order.
    pub fn features(&self, kind: FeatureKind) -> impl Iterator<Item = (Feature, &str)> + '_ {
        let model = self.id;
        self.features[kind.slot()]
            .iter()
            .enumerate()
            .map(move |(position, name)| {
                (
                    Feature {
                        model,
                        kind,
                        position,
                    },
                    name.as_str(),
                )
            })
    }

    /// Characters with their symbols, in registration order.
    pub fn characters(&self) -> impl Iterator<Item = (Character, &str)> + '_ {
        let model = self.id;
        self.characters.iter().enumerate().map(move |(index, e)| {
            (
                Character {
                    model,
                    kind: e.kind,
                    index,
                },
                e.symbol.as_str(),
            )
        })
    }

    /// Number of features of `kind`, i.e. the length of its normalised forms.
    pub fn feature_count(&self, kind: FeatureKind) -> usize {
        self.features[kind.slot()].len()
    }

    /// Number of registered characters.
    pub fn character_count(&self) -> usize {
        self.characters.len()
    }

    // ── Internal helpers ───────────────────────────────────────────────────

    fn check_feature(&self, feature: Feature) -> Result<()> {
        if feature.model != self.id || feature.position >= self.features[feature.kind.slot()].len()
        {
            return Err(ZoundsError::UnknownEntity("feature"));
        }
        Ok(())
    }

    fn check_character(&self, character: Character) -> Result<usize> {
        if character.model != self.id || character.index >= self.characters.len() {
            return Err(ZoundsError::UnknownEntity("character"));
        }
        Ok(character.index)
    }
}

impl Default for FeatureModel {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Debug for FeatureModel {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("FeatureModel")
            .field("segmental_features", &self.features[0].len())
            .field("suprasegmental_features", &self.features[1].len())
            .field("characters", &self.characters.len())
            .finish()
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────
