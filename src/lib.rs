//! # zounds-core
//!
//! Feature algebra for IPA Zounds, a sound-change engine with support for the IPA.
//!
//! ---
//!
//! ## Sounds are vectors, sound changes are arithmetic.
//!
//! Every phonetic segment is a row of binary distinctive features, each of
//! which is present (`+`), absent (`-`) or inapplicable (`0`). Rule patterns
//! only specify the features they care about; everything else is `0`.
//!
//! **Overlay addition**: `A + B` keeps `B`'s specified values and lets `A`
//! show through wherever `B` is silent. A base sound plus a diacritic, or a
//! matched segment plus a rule's output, is one addition.
//!
//! **Difference subtraction**: `A - B` is the form `C` with `B + C == A`.
//! It fails when `A` is inapplicable where `B` is specified, because no
//! overlay can take a specified value back to "does not apply".
//!
//! Positions are fixed by the [`FeatureModel`](model::FeatureModel) that
//! registered the features, so the arithmetic never looks anything up.
//!
//! ---
//!
//! ## The pipeline
//!
//! ```text
//! SoundInventory ─► build_feature_model ─► FeatureModel ─► Character ─► NormalisedForm
//!                                               │                            │
//!                                          ModelSnapshot              + / - / is_empty
//!                                                                            │
//!                                                            Cluster (fold of +)
//! ```
//!
//! ## Module overview
//!
//! | Module | Key types | What it does |
//! |--------|-----------|--------------|
//! | [`value`] | [`value::FeatureValue`] | Three-valued feature states and their symbols |
//! | [`feature`] | [`feature::Feature`], [`feature::FeatureKind`] | Segmental vs. suprasegmental features; form markers |
//! | [`character`] | [`character::Character`], [`character::CharacterKind`] | Base, diacritic, spacing and suprasegmental characters |
//! | [`model`] | [`model::FeatureModel`] | Registry with stable feature positions and complete rows |
//! | [`normalised_form`] | [`normalised_form::NormalisedForm`] | Overlay, difference, containment, emptiness |
//! | [`cluster`] | [`cluster::Cluster`] | Base plus diacritics combined by overlay |
//! | [`inventory`] | [`inventory::SoundInventory`] | Derive a model from a cross-linguistic sound inventory |
//! | [`error`] | [`error::ZoundsError`] | Error taxonomy |
//! | `snapshot` | `snapshot::ModelSnapshot` | Serialisable model snapshot (requires `serde` feature) |
//!
//! ## Limits
//!
//! A [`Cluster`](cluster::Cluster) stores its members inline and holds at
//! most [`MAX_CLUSTER_SIZE`](cluster::MAX_CLUSTER_SIZE) characters (a base
//! plus seven diacritics). Pushing past that fails with
//! [`ZoundsError::ClusterOverflow`](error::ZoundsError::ClusterOverflow).
//!
//! ## `no_std`
//!
//! This crate is `#![no_std]` by default and needs only `alloc`. Enable the
//! `serde` feature for serialisation support and `python-ffi` for the PyO3
//! bindings.
//!
//! ## License
//!
//! GNU General Public License, version 2 or (at your option) any later version.

#![cfg_attr(not(any(feature = "std", feature = "python-ffi", test)), no_std)]
#![deny(unsafe_code)]
#![deny(missing_docs)]
#![cfg_attr(docsrs, feature(doc_cfg))]

extern crate alloc;

#[cfg(any(feature = "std", feature = "python-ffi"))]
extern crate std;

pub mod error;
pub mod value;
pub mod feature;
pub mod character;
pub mod normalised_form;
pub mod model;
pub mod cluster;
pub mod inventory;
#[cfg(feature = "serde")]
pub mod snapshot;

#[cfg(feature = "python-ffi")]
pub mod ffi;

pub use character::{Character, CharacterKind};
pub use cluster::Cluster;
pub use error::{Result, ZoundsError};
pub use feature::{Feature, FeatureKind};
pub use inventory::{build_feature_model, InventoryConfig, SoundInventory};
pub use model::FeatureModel;
pub use normalised_form::NormalisedForm;
pub use value::FeatureValue;
