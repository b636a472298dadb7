//! Python FFI bindings via PyO3.
//!
//! Exposes the feature model and normalised form algebra to Python rule
//! engines. Characters and features are addressed by symbol and name rather
//! than by handle.
//!
//! # Building the Python extension
//!
//! ```bash
//! pip install maturin
//! maturin develop --features python-ffi
//! ```
//!
//! # Usage
//!
//! ```python
//! from zounds_core import FeatureModel, NormalisedForm
//!
//! model = FeatureModel()
//! model.register_feature("voiced")
//! model.register_feature("nasal")
//! model.register_character("b", "base")
//! model.register_character("~", "diacritic")
//! model.set_value("b", "voiced", "+")
//! model.set_value("b", "nasal", "-")
//! model.set_value("~", "nasal", "+")
//!
//! b = model.normalised_form("b")          # B+-
//! tilde = model.normalised_form("~")       # B0+
//! nasal_b = b + tilde                      # B++
//! assert tilde + (nasal_b - tilde) == nasal_b
//! assert "+" in nasal_b and "x" not in nasal_b
//! ```

#![allow(non_snake_case)]

use pyo3::exceptions::{PyTypeError, PyValueError};
use pyo3::prelude::*;

use crate::character::CharacterKind;
use crate::error::ZoundsError;
use crate::feature::FeatureKind;
use crate::model::FeatureModel as RustFeatureModel;
use crate::normalised_form::NormalisedForm as RustNormalisedForm;
use crate::value::FeatureValue;

fn to_py_err(e: ZoundsError) -> PyErr {
    match e {
        ZoundsError::TypeMismatch { .. } => PyTypeError::new_err(e.to_string()),
        other => PyValueError::new_err(other.to_string()),
    }
}

fn parse_character_kind(kind: &str) -> PyResult<CharacterKind> {
    match kind {
        "base" => Ok(CharacterKind::Base),
        "diacritic" => Ok(CharacterKind::Diacritic),
        "spacing" => Ok(CharacterKind::Spacing),
        "suprasegmental" => Ok(CharacterKind::Suprasegmental),
        other => Err(PyValueError::new_err(format!(
            "unknown character kind {other:?}; expected base, diacritic, spacing or suprasegmental"
        ))),
    }
}

// ── NormalisedForm ────────────────────────────────────────────────────────────

/// Marker-typed feature vector supporting `+`, `-`, `in` and `is_empty()`.
///
/// Construct from the textual form, e.g. `NormalisedForm("B+-0")`.
#[pyclass(name = "NormalisedForm")]
#[derive(Clone)]
pub struct PyNormalisedForm {
    inner: RustNormalisedForm,
}

#[pymethods]
impl PyNormalisedForm {
    /// Parse a textual normalised form.
    ///
    /// Raises ValueError on an unknown marker or feature value symbol.
    #[new]
    pub fn new(text: &str) -> PyResult<Self> {
        RustNormalisedForm::parse(text)
            .map(|inner| Self { inner })
            .map_err(to_py_err)
    }

    /// Overlay `other` on this form. Raises TypeError on mixed variants.
    pub fn __add__(&self, other: PyRef<'_, Self>) -> PyResult<Self> {
        self.inner
            .checked_add(&other.inner)
            .map(|inner| Self { inner })
            .map_err(to_py_err)
    }

    /// Difference form `c` such that `other + c == self`.
    pub fn __sub__(&self, other: PyRef<'_, Self>) -> PyResult<Self> {
        self.inner
            .checked_sub(&other.inner)
            .map(|inner| Self { inner })
            .map_err(to_py_err)
    }

    /// `True` if `item` occurs in the symbols after the marker.
    ///
    /// Anything that is not a feature value symbol is simply absent.
    pub fn __contains__(&self, item: &str) -> bool {
        self.inner.contains_symbols(item)
    }

    /// `True` if no feature is specified.
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Number of feature positions.
    pub fn __len__(&self) -> usize {
        self.inner.len()
    }

    /// Variant marker character.
    #[getter]
    pub fn marker(&self) -> char {
        self.inner.marker()
    }

    /// Textual form.
    pub fn __str__(&self) -> String {
        self.inner.to_string()
    }

    /// Python repr string.
    pub fn __repr__(&self) -> String {
        format!("NormalisedForm({:?})", self.inner.to_string())
    }

    /// Structural equality.
    pub fn __eq__(&self, other: &PyNormalisedForm) -> bool {
        self.inner == other.inner
    }
}

// ── FeatureModel ──────────────────────────────────────────────────────────────

/// Registry of features and characters.
#[pyclass(name = "FeatureModel")]
pub struct PyFeatureModel {
    inner: RustFeatureModel,
}

#[pymethods]
impl PyFeatureModel {
    /// Create an empty model.
    #[new]
    pub fn new() -> Self {
        Self {
            inner: RustFeatureModel::new(),
        }
    }

    /// Register a segmental (or suprasegmental) feature.
    #[pyo3(signature = (name, suprasegmental=false))]
    pub fn register_feature(&mut self, name: &str, suprasegmental: bool) -> PyResult<usize> {
        let kind = if suprasegmental {
            FeatureKind::Suprasegmental
        } else {
            FeatureKind::Segmental
        };
        self.inner
            .register_feature(name, kind)
            .map(|f| f.position())
            .map_err(to_py_err)
    }

    /// Register a character of kind `base`, `diacritic`, `spacing` or `suprasegmental`.
    pub fn register_character(&mut self, symbol: &str, kind: &str) -> PyResult<()> {
        let kind = parse_character_kind(kind)?;
        self.inner
            .register_character(symbol, kind)
            .map(|_| ())
            .map_err(to_py_err)
    }

    /// Set the value (`+`, `-` or `0`) of `feature` for the character `symbol`.
    pub fn set_value(&mut self, symbol: &str, feature: &str, value: char) -> PyResult<()> {
        let character = self
            .inner
            .character(symbol)
            .ok_or_else(|| to_py_err(ZoundsError::UnknownEntity("character")))?;
        let feature = self
            .inner
            .feature(feature, character.kind().feature_kind())
            .ok_or_else(|| to_py_err(ZoundsError::UnknownEntity("feature")))?;
        let value = FeatureValue::from_symbol(value).ok_or_else(|| {
            to_py_err(ZoundsError::InvalidFeatureValue {
                symbol: value,
                position: feature.position(),
            })
        })?;
        self.inner
            .set_character_feature_value(character, feature, value)
            .map_err(to_py_err)
    }

    /// Normalised form of the character `symbol`.
    pub fn normalised_form(&self, symbol: &str) -> PyResult<PyNormalisedForm> {
        let character = self
            .inner
            .character(symbol)
            .ok_or_else(|| to_py_err(ZoundsError::UnknownEntity("character")))?;
        self.inner
            .normalised_form_of(character)
            .map(|inner| PyNormalisedForm { inner })
            .map_err(to_py_err)
    }

    /// Symbol of the first character whose form equals `form`, or None.
    pub fn character_for_form(&self, form: &PyNormalisedForm) -> Option<String> {
        let c = self.inner.character_for_form(&form.inner)?;
        self.inner.character_symbol(c).ok().map(str::to_string)
    }

    /// Python repr string.
    pub fn __repr__(&self) -> String {
        format!(
            "FeatureModel(segmental={}, suprasegmental={}, characters={})",
            self.inner.feature_count(FeatureKind::Segmental),
            self.inner.feature_count(FeatureKind::Suprasegmental),
            self.inner.character_count(),
        )
    }
}

// ── Module entry point ────────────────────────────────────────────────────────

/// Zounds feature algebra Python bindings.
#[pymodule]
pub fn zounds_core(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyNormalisedForm>()?;
    m.add_class::<PyFeatureModel>()?;
    m.add("__version__", env!("CARGO_PKG_VERSION"))?;
    m.add("HAS_FEATURE", crate::value::HAS_FEATURE)?;
    m.add("NOT_HAS_FEATURE", crate::value::NOT_HAS_FEATURE)?;
    m.add("INAPPLICABLE_FEATURE", crate::value::INAPPLICABLE_FEATURE)?;
    Ok(())
}
