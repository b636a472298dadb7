//! Error taxonomy for the feature algebra.
//!
//! Every variant is a programmer or data error. Nothing here is transient and
//! nothing is retried: an error is fatal to the operation that raised it and
//! is handed back to the caller with `?`.

extern crate alloc;

use alloc::string::String;

use thiserror::Error;

use crate::feature::FeatureKind;

/// Errors raised by the feature model, the normalised form algebra, clusters
/// and inventory construction.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ZoundsError {
    /// A feature with this name is already registered for the kind.
    #[error("feature `{name}` is already registered as a {kind} feature")]
    DuplicateFeature {
        /// Name that collided.
        name: String,
        /// Namespace the collision happened in.
        kind: FeatureKind,
    },

    /// A character with this symbol is already registered with the model.
    #[error("character `{0}` is already registered")]
    DuplicateCharacter(String),

    /// A feature or character handle does not belong to this model.
    #[error("{0} is not registered with this feature model")]
    UnknownEntity(&'static str),

    /// A feature was applied to a character of the wrong kind.
    #[error("cannot assign {feature} feature value to {character} character")]
    MismatchedKind {
        /// Kind of the feature involved.
        feature: FeatureKind,
        /// Description of the character kind involved.
        character: &'static str,
    },

    /// Textual normalised form did not start with a known marker.
    #[error("invalid normalised form marker {0:?}")]
    InvalidMarker(Option<char>),

    /// Textual normalised form contained a symbol that is not a feature value.
    #[error("invalid feature value symbol {symbol:?} at position {position}")]
    InvalidFeatureValue {
        /// Offending symbol.
        symbol: char,
        /// Position within the feature vector (marker excluded).
        position: usize,
    },

    /// Two normalised forms of different variants were combined.
    #[error("cannot combine a {left} normalised form with a {right} one")]
    TypeMismatch {
        /// Kind of the left operand.
        left: FeatureKind,
        /// Kind of the right operand.
        right: FeatureKind,
    },

    /// Two normalised forms of the same variant but different length were combined.
    #[error("normalised forms differ in length ({left} vs {right})")]
    ShapeMismatch {
        /// Length of the left operand.
        left: usize,
        /// Length of the right operand.
        right: usize,
    },

    /// Subtraction has no representable result.
    #[error("no difference form exists: position {position} is inapplicable in the minuend but specified in the subtrahend")]
    NoDifferenceForm {
        /// First position at which subtraction failed.
        position: usize,
    },

    /// One property value is claimed by more than one property key.
    #[error("property value `{value}` maps to both `{first}` and `{second}`")]
    InconsistentPropertyMapping {
        /// Ambiguous value.
        value: String,
        /// Property it was first recorded under.
        first: String,
        /// Property that claimed it again.
        second: String,
    },

    /// A cluster with no members has no normalised form.
    #[error("cluster has no characters")]
    EmptyCluster,

    /// A cluster is already at capacity.
    #[error("cluster cannot hold more than {0} characters")]
    ClusterOverflow(usize),
}

/// Crate-wide result alias.
pub type Result<T> = core::result::Result<T, ZoundsError>;
