//! Three-valued feature states and their reserved textual symbols.
//!
//! A feature is either present (`+`), absent (`-`) or inapplicable (`0`).
//! Inapplicable is not "unknown": it records that the dimension has no
//! meaning for this class of segment, e.g. nasality on a tone mark.

/// Symbol for [`FeatureValue::Has`].
pub const HAS_FEATURE: char = '+';

/// Symbol for [`FeatureValue::NotHas`].
pub const NOT_HAS_FEATURE: char = '-';

/// Symbol for [`FeatureValue::Inapplicable`].
pub const INAPPLICABLE_FEATURE: char = '0';

/// The value a character holds for one feature.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FeatureValue {
    /// The segment has the feature.
    Has,
    /// The segment lacks the feature.
    NotHas,
    /// The feature does not apply to the segment's class.
    #[default]
    Inapplicable,
}

impl FeatureValue {
    /// Reserved single-character symbol for this value.
    #[inline]
    pub const fn symbol(self) -> char {
        match self {
            Self::Has => HAS_FEATURE,
            Self::NotHas => NOT_HAS_FEATURE,
            Self::Inapplicable => INAPPLICABLE_FEATURE,
        }
    }

    /// Value for a reserved symbol, or `None` for any other character.
    pub const fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            HAS_FEATURE => Some(Self::Has),
            NOT_HAS_FEATURE => Some(Self::NotHas),
            INAPPLICABLE_FEATURE => Some(Self::Inapplicable),
            _ => None,
        }
    }

    /// `true` for `Has` and `NotHas`.
    #[inline]
    pub const fn is_specified(self) -> bool {
        !matches!(self, Self::Inapplicable)
    }
}

impl core::fmt::Display for FeatureValue {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        use core::fmt::Write;
        f.write_char(self.symbol())
    }
}
