//! Normalised forms: marker-typed vectors of feature values and their algebra.
//!
//! A normalised form is the positional feature vector of a character, a
//! cluster, or a rule pattern. It carries no references to the model it came
//! from; position `i` means "the i-th feature of this kind" in whatever model
//! produced it.
//!
//! # Algebra
//!
//! ```text
//! A + B   overlay:    B[i] if A[i] == 0 or B[i] != 0, else A[i]
//! A - B   difference: 0 if A[i] == B[i]; error if A[i] == 0; else A[i]
//!         (B + (A - B) == A whenever A - B succeeds)
//! ```
//!
//! Both operations require the same kind (`TypeMismatch` otherwise) and the
//! same length (`ShapeMismatch` otherwise). Operands are never mutated.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;
use core::ops::{Add, Sub};
use core::str::FromStr;

use crate::error::{Result, ZoundsError};
use crate::feature::FeatureKind;
use crate::value::FeatureValue;

/// Marker-typed, ordered vector of three-valued feature states.
///
/// Equality is structural: same kind and same vector.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NormalisedForm {
    kind: FeatureKind,
    values: Vec<FeatureValue>,
}

impl NormalisedForm {
    /// Build a form of `kind` from its feature values.
    pub fn new(kind: FeatureKind, values: Vec<FeatureValue>) -> Self {
        Self { kind, values }
    }

    /// Segmental (`BNFM`) form.
    pub fn base(values: Vec<FeatureValue>) -> Self {
        Self::new(FeatureKind::Segmental, values)
    }

    /// Suprasegmental (`SNFM`) form.
    pub fn suprasegmental(values: Vec<FeatureValue>) -> Self {
        Self::new(FeatureKind::Suprasegmental, values)
    }

    /// All-inapplicable form of `len` positions: the identity of overlay.
    pub fn empty(kind: FeatureKind, len: usize) -> Self {
        Self::new(kind, alloc::vec![FeatureValue::Inapplicable; len])
    }

    /// Parse the textual representation `marker + symbols`.
    ///
    /// Every symbol must be one of `+`, `-` or `0`, which is stricter than
    /// storing the remainder verbatim: a stray character fails here with
    /// `InvalidFeatureValue` instead of leaking into the algebra. The length
    /// is not checked; mismatches surface at the first combination with
    /// another form.
    pub fn parse(text: &str) -> Result<Self> {
        let mut chars = text.chars();
        let marker = chars.next().ok_or(ZoundsError::InvalidMarker(None))?;
        let kind = FeatureKind::from_marker(marker)?;
        let values = chars
            .enumerate()
            .map(|(position, symbol)| {
                FeatureValue::from_symbol(symbol)
                    .ok_or(ZoundsError::InvalidFeatureValue { symbol, position })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { kind, values })
    }

    /// Variant of this form.
    #[inline]
    pub fn kind(&self) -> FeatureKind {
        self.kind
    }

    /// Marker character of this form's variant.
    #[inline]
    pub fn marker(&self) -> char {
        self.kind.marker()
    }

    /// Number of feature positions.
    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Value at `position`, if in range.
    #[inline]
    pub fn get(&self, position: usize) -> Option<FeatureValue> {
        self.values.get(position).copied()
    }

    /// All feature values in position order.
    #[inline]
    pub fn values(&self) -> &[FeatureValue] {
        &self.values
    }

    /// Iterate over the feature values in position order.
    pub fn iter(&self) -> impl Iterator<Item = FeatureValue> + '_ {
        self.values.iter().copied()
    }

    /// `true` if `value` occurs at any position.
    pub fn contains(&self, value: FeatureValue) -> bool {
        self.values.contains(&value)
    }

    /// `true` if `text` occurs as a substring of the symbols after the
    /// marker. Text that is not made of value symbols is never found.
    pub fn contains_symbols(&self, text: &str) -> bool {
        let symbols: String = self.iter().map(FeatureValue::symbol).collect();
        symbols.contains(text)
    }

    /// `true` if no position is specified, i.e. the form describes the
    /// absence of a segment.
    pub fn is_empty(&self) -> bool {
        !self.contains(FeatureValue::Has) && !self.contains(FeatureValue::NotHas)
    }

    /// Overlay `other` on top of `self`.
    ///
    /// `other`'s specified values win; `self`'s values survive only where
    /// `other` is inapplicable.
    pub fn checked_add(&self, other: &Self) -> Result<Self> {
        self.check_compatible(other)?;
        let values = self
            .values
            .iter()
            .zip(&other.values)
            .map(|(&a, &b)| {
                if a == FeatureValue::Inapplicable || b != FeatureValue::Inapplicable {
                    b
                } else {
                    a
                }
            })
            .collect();
        Ok(Self::new(self.kind, values))
    }

    /// The form `c` such that `other + c == self`.
    ///
    /// Fails with `NoDifferenceForm` at the first position where `self` is
    /// inapplicable and `other` is not: no overlay can turn a specified value
    /// back into an inapplicable one.
    pub fn checked_sub(&self, other: &Self) -> Result<Self> {
        self.check_compatible(other)?;
        let values = self
            .values
            .iter()
            .zip(&other.values)
            .enumerate()
            .map(|(position, (&a, &b))| {
                if a == b {
                    Ok(FeatureValue::Inapplicable)
                } else if a == FeatureValue::Inapplicable {
                    Err(ZoundsError::NoDifferenceForm { position })
                } else {
                    Ok(a)
                }
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::new(self.kind, values))
    }

    fn check_compatible(&self, other: &Self) -> Result<()> {
        if self.kind != other.kind {
            return Err(ZoundsError::TypeMismatch {
                left: self.kind,
                right: other.kind,
            });
        }
        if self.values.len() != other.values.len() {
            return Err(ZoundsError::ShapeMismatch {
                left: self.values.len(),
                right: other.values.len(),
            });
        }
        Ok(())
    }
}

impl core::fmt::Display for NormalisedForm {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        use core::fmt::Write;
        f.write_char(self.marker())?;
        for value in &self.values {
            f.write_char(value.symbol())?;
        }
        Ok(())
    }
}

impl FromStr for NormalisedForm {
    type Err = ZoundsError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl Add for &NormalisedForm {
    type Output = Result<NormalisedForm>;

    fn add(self, rhs: Self) -> Self::Output {
        self.checked_add(rhs)
    }
}

impl Sub for &NormalisedForm {
    type Output = Result<NormalisedForm>;

    fn sub(self, rhs: Self) -> Self::Output {
        self.checked_sub(rhs)
    }
}
