//! Character kinds and character handles.

use crate::error::Result;
use crate::feature::FeatureKind;
use crate::model::FeatureModel;
use crate::normalised_form::NormalisedForm;

/// The class of a phonetic symbol.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CharacterKind {
    /// A single IPA base sound.
    Base,
    /// A modifier overlaid on a base sound.
    Diacritic,
    /// Punctuation or a word boundary. Carries no feature content.
    Spacing,
    /// A tone or stress mark.
    Suprasegmental,
}

impl CharacterKind {
    /// The feature subspace this kind of character populates.
    ///
    /// Spacing characters live in the segmental subspace with a row that is
    /// permanently inapplicable.
    #[inline]
    pub const fn feature_kind(self) -> FeatureKind {
        match self {
            Self::Base | Self::Diacritic | Self::Spacing => FeatureKind::Segmental,
            Self::Suprasegmental => FeatureKind::Suprasegmental,
        }
    }

    pub(crate) const fn describe(self) -> &'static str {
        match self {
            Self::Base => "base",
            Self::Diacritic => "diacritic",
            Self::Spacing => "spacing",
            Self::Suprasegmental => "suprasegmental",
        }
    }
}

/// Handle to a character registered with a [`FeatureModel`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Character {
    pub(crate) model: u32,
    pub(crate) kind: CharacterKind,
    pub(crate) index: usize,
}

impl Character {
    /// Kind of the character.
    #[inline]
    pub fn kind(&self) -> CharacterKind {
        self.kind
    }

    /// Normalised form of this character in `model`.
    ///
    /// Fails with `UnknownEntity` if the character was registered elsewhere.
    pub fn normalised_form(&self, model: &FeatureModel) -> Result<NormalisedForm> {
        model.normalised_form_of(*self)
    }
}
