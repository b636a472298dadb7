//! Building a [`FeatureModel`] from a cross-linguistic sound inventory.
//!
//! The inventory describes every sound, diacritic and tone as a set of
//! `property → value` pairs (e.g. `manner → stop`, `phonation → voiced`).
//! Each distinct value becomes one binary segmental feature named after it.
//!
//! # Derivation
//!
//! For a property with values `v1..vn` and a feature `vk`:
//!
//! ```text
//!                       base character          diacritic
//! property == vk        Has                     Has
//! property == other     NotHas                  NotHas
//! property absent       NotHas  (n == 1)        Inapplicable
//!                       Inapplicable (n > 1)
//! ```
//!
//! Diacritics stay inapplicable for everything they do not assert, so that
//! overlaying one on a base sound only changes what the diacritic is about.
//!
//! Tones populate the suprasegmental subspace: one feature per distinct tone
//! start value, `Has` for the tone's own start and `NotHas` otherwise.
//!
//! A value claimed by two different properties makes the derivation
//! ambiguous and fails with `InconsistentPropertyMapping`.
//!
//! All input maps are ordered, so the same inventory always yields the same
//! feature positions.

extern crate alloc;

use alloc::collections::{BTreeMap, BTreeSet};
use alloc::format;
use alloc::string::{String, ToString};
use alloc::vec::Vec;

use crate::character::{Character, CharacterKind};
use crate::error::{Result, ZoundsError};
use crate::feature::FeatureKind;
use crate::model::FeatureModel;
use crate::value::FeatureValue;

// ─── Input data ──────────────────────────────────────────────────────────────

/// One sound or diacritic of the inventory.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SoundEntry {
    /// Alternative spelling of another entry. Aliases are skipped.
    pub alias: bool,
    /// `property → value` pairs describing the sound.
    pub properties: BTreeMap<String, String>,
}

impl SoundEntry {
    /// Non-alias entry with the given properties.
    pub fn new<'a>(properties: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        Self {
            alias: false,
            properties: properties
                .into_iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }
}

/// One tone mark of the inventory.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ToneEntry {
    /// Alternative spelling of another tone. Aliases are skipped.
    pub alias: bool,
    /// Pitch level the contour starts at.
    pub start: u8,
}

/// A cross-linguistic sound inventory, keyed by symbol.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SoundInventory {
    /// Consonant sounds.
    pub consonants: BTreeMap<String, SoundEntry>,
    /// Vowel sounds.
    pub vowels: BTreeMap<String, SoundEntry>,
    /// Click sounds.
    pub clicks: BTreeMap<String, SoundEntry>,
    /// Diacritics, grouped (e.g. by the class of sound they attach to).
    pub diacritics: BTreeMap<String, BTreeMap<String, SoundEntry>>,
    /// Tone marks.
    pub tones: BTreeMap<String, ToneEntry>,
}

// ─── Config ──────────────────────────────────────────────────────────────────

/// Configuration for [`build_feature_model`].
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct InventoryConfig {
    /// Symbols registered as spacing characters before anything else.
    /// Default: apostrophe, space and comma.
    pub spacing_symbols: Vec<String>,
    /// Placeholder stripped from diacritic symbols. Default: `◌`.
    pub diacritic_placeholder: char,
    /// Prefix of tone feature names; the tone start value follows. Default: `t`.
    pub tone_feature_prefix: String,
}

impl Default for InventoryConfig {
    fn default() -> Self {
        Self {
            spacing_symbols: ["'", " ", ","].iter().map(|s| s.to_string()).collect(),
            diacritic_placeholder: '◌',
            tone_feature_prefix: "t".to_string(),
        }
    }
}

// ─── Construction ────────────────────────────────────────────────────────────

/// Build a complete, read-only-ready feature model from `inventory`.
///
/// Call once at start-up and pass the model to every consumer.
pub fn build_feature_model(
    inventory: &SoundInventory,
    config: &InventoryConfig,
) -> Result<FeatureModel> {
    let mut model = FeatureModel::new();

    for symbol in &config.spacing_symbols {
        model.register_character(symbol, CharacterKind::Spacing)?;
    }

    let mut segments: Vec<(Character, BTreeMap<&str, &str>)> = Vec::new();
    let mut owners: BTreeMap<&str, &str> = BTreeMap::new();

    let sounds = inventory
        .consonants
        .iter()
        .chain(&inventory.vowels)
        .chain(&inventory.clicks);
    for (symbol, entry) in sounds {
        if entry.alias || !is_single_char(symbol) {
            tracing::debug!(symbol = symbol.as_str(), alias = entry.alias, "skipping sound");
            continue;
        }
        record_properties(&mut owners, &entry.properties)?;
        let c = model.register_character(symbol, CharacterKind::Base)?;
        segments.push((c, borrowed(&entry.properties)));
    }

    for (group, mods) in &inventory.diacritics {
        for (raw, entry) in mods {
            if entry.alias {
                tracing::debug!(group = group.as_str(), symbol = raw.as_str(), "skipping alias");
                continue;
            }
            // Unregistered diacritics still contribute their values.
            record_properties(&mut owners, &entry.properties)?;
            let symbol: String = raw
                .chars()
                .filter(|&ch| ch != config.diacritic_placeholder)
                .collect();
            if !is_single_char(&symbol) {
                tracing::debug!(group = group.as_str(), symbol = raw.as_str(), "skipping diacritic");
                continue;
            }
            let known = model
                .character(&symbol)
                .filter(|c| c.kind() == CharacterKind::Diacritic)
                .and_then(|c| segments.iter_mut().find(|(s, _)| *s == c));
            match known {
                Some((_, properties)) => {
                    tracing::debug!(group = group.as_str(), symbol = symbol.as_str(), "merging diacritic");
                    properties.extend(borrowed(&entry.properties));
                }
                None => {
                    let c = model.register_character(&symbol, CharacterKind::Diacritic)?;
                    segments.push((c, borrowed(&entry.properties)));
                }
            }
        }
    }

    let mut by_property: BTreeMap<&str, Vec<&str>> = BTreeMap::new();
    for (&value, &property) in &owners {
        by_property.entry(property).or_default().push(value);
    }

    for (property, values) in &by_property {
        let single = values.len() == 1;
        for &value in values {
            let feature = model.register_feature(value, FeatureKind::Segmental)?;
            for (c, properties) in &segments {
                let c = *c;
                let v = match properties.get(property) {
                    Some(&actual) if actual == value => FeatureValue::Has,
                    Some(_) => FeatureValue::NotHas,
                    None if c.kind() == CharacterKind::Base && single => FeatureValue::NotHas,
                    None => FeatureValue::Inapplicable,
                };
                model.set_character_feature_value(c, feature, v)?;
            }
        }
    }

    let tones: Vec<(&String, u8)> = inventory
        .tones
        .iter()
        .filter(|(symbol, entry)| !entry.alias && is_single_char(symbol))
        .map(|(symbol, entry)| (symbol, entry.start))
        .collect();
    let starts: BTreeSet<u8> = tones.iter().map(|&(_, start)| start).collect();
    let mut tone_features = BTreeMap::new();
    for start in starts {
        let name = format!("{}{}", config.tone_feature_prefix, start);
        tone_features.insert(start, model.register_feature(&name, FeatureKind::Suprasegmental)?);
    }
    for (symbol, start) in tones {
        let c = model.register_character(symbol, CharacterKind::Suprasegmental)?;
        for (&s, &feature) in &tone_features {
            let v = if s == start {
                FeatureValue::Has
            } else {
                FeatureValue::NotHas
            };
            model.set_character_feature_value(c, feature, v)?;
        }
    }

    tracing::info!(
        segmental = model.feature_count(FeatureKind::Segmental),
        suprasegmental = model.feature_count(FeatureKind::Suprasegmental),
        characters = model.character_count(),
        "built feature model from sound inventory"
    );
    Ok(model)
}

/// Record which property each value belongs to; a value may belong to one only.
fn record_properties<'a>(
    owners: &mut BTreeMap<&'a str, &'a str>,
    properties: &'a BTreeMap<String, String>,
) -> Result<()> {
    for (property, value) in properties {
        match owners.get(value.as_str()) {
            Some(&first) if first != property.as_str() => {
                return Err(ZoundsError::InconsistentPropertyMapping {
                    value: value.clone(),
                    first: first.to_string(),
                    second: property.clone(),
                });
            }
            Some(_) => {}
            None => {
                owners.insert(value, property);
            }
        }
    }
    Ok(())
}

fn borrowed(properties: &BTreeMap<String, String>) -> BTreeMap<&str, &str> {
    properties
        .iter()
        .map(|(k, v)| (k.as_str(), v.as_str()))
        .collect()
}

fn is_single_char(s: &str) -> bool {
    let mut chars = s.chars();
    chars.next().is_some() && chars.next().is_none()
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    fn inventory() -> SoundInventory {
        let mut inv = SoundInventory::default();
        inv.consonants.insert(
            "p".into(),
            SoundEntry::new([("manner", "stop"), ("phonation", "voiceless"), ("place", "bilabial")]),
        );
        inv.consonants.insert(
            "b".into(),
            SoundEntry::new([("manner", "stop"), ("phonation", "voiced"), ("place", "bilabial")]),
        );
        inv.consonants.insert(
            "m".into(),
            SoundEntry::new([("manner", "nasal"), ("phonation", "voiced"), ("place", "bilabial")]),
        );
        inv.consonants.insert(
            "tʃ".into(),
            SoundEntry::new([("manner", "affricate"), ("place", "post-alveolar")]),
        );
        inv.vowels.insert(
            "a".into(),
            SoundEntry::new([("height", "open"), ("roundedness", "unrounded")]),
        );
        let mut alias = SoundEntry::new([("manner", "stop")]);
        alias.alias = true;
        inv.consonants.insert("ɡ".into(), alias);

        let mut mods = BTreeMap::new();
        mods.insert("◌ʰ".into(), SoundEntry::new([("aspiration", "aspirated")]));
        mods.insert("\u{25cc}\u{303}".into(), SoundEntry::new([("nasalization", "nasalized")]));
        inv.diacritics.insert("consonant".into(), mods);

        inv.tones.insert("˥".into(), ToneEntry { alias: false, start: 5 });
        inv.tones.insert("˩".into(), ToneEntry { alias: false, start: 1 });
        inv.tones.insert("˥˩".into(), ToneEntry { alias: false, start: 5 });
        inv
    }

    fn value(m: &FeatureModel, symbol: &str, feature: &str) -> FeatureValue {
        let c = m.character(symbol).unwrap();
        let f = m.feature(feature, c.kind().feature_kind()).unwrap();
        m.value_of(c, f).unwrap()
    }

    #[test]
    fn registers_single_char_non_alias_symbols() {
        let m = build_feature_model(&inventory(), &InventoryConfig::default()).unwrap();
        for s in ["'", " ", ",", "p", "b", "m", "a", "ʰ", "\u{303}", "˥", "˩"] {
            assert!(m.character(s).is_some(), "missing {s:?}");
        }
        assert!(m.character("tʃ").is_none());
        assert!(m.character("ɡ").is_none());
        assert!(m.character("˥˩").is_none());
        assert_eq!(m.character("ʰ").unwrap().kind(), CharacterKind::Diacritic);
    }

    #[test]
    fn multi_valued_properties_are_inapplicable_when_absent() {
        let m = build_feature_model(&inventory(), &InventoryConfig::default()).unwrap();
        assert_eq!(value(&m, "b", "voiced"), FeatureValue::Has);
        assert_eq!(value(&m, "p", "voiced"), FeatureValue::NotHas);
        assert_eq!(value(&m, "a", "voiced"), FeatureValue::Inapplicable);
        assert_eq!(value(&m, "m", "nasal"), FeatureValue::Has);
        assert_eq!(value(&m, "a", "stop"), FeatureValue::Inapplicable);
    }

    #[test]
    fn single_valued_properties_are_binary_for_bases() {
        let m = build_feature_model(&inventory(), &InventoryConfig::default()).unwrap();
        assert_eq!(value(&m, "p", "bilabial"), FeatureValue::Has);
        assert_eq!(value(&m, "a", "bilabial"), FeatureValue::NotHas);
        assert_eq!(value(&m, "p", "aspirated"), FeatureValue::NotHas);
        // Diacritics only assert what they carry.
        assert_eq!(value(&m, "ʰ", "aspirated"), FeatureValue::Has);
        assert_eq!(value(&m, "ʰ", "bilabial"), FeatureValue::Inapplicable);
    }

    #[test]
    fn diacritic_overlay_changes_only_its_feature() {
        let m = build_feature_model(&inventory(), &InventoryConfig::default()).unwrap();
        let p = m.normalised_form_of(m.character("p").unwrap()).unwrap();
        let h = m.normalised_form_of(m.character("ʰ").unwrap()).unwrap();
        let ph = p.checked_add(&h).unwrap();
        let aspirated = m.feature("aspirated", FeatureKind::Segmental).unwrap();
        assert_eq!(ph.get(aspirated.position()), Some(FeatureValue::Has));
        let diff: usize = p.iter().zip(ph.iter()).filter(|(a, b)| a != b).count();
        assert_eq!(diff, 1);
        assert_eq!(ph.checked_sub(&h).unwrap().checked_add(&h).unwrap(), ph);
    }

    #[test]
    fn tones_get_suprasegmental_features() {
        let m = build_feature_model(&inventory(), &InventoryConfig::default()).unwrap();
        assert_eq!(m.feature_count(FeatureKind::Suprasegmental), 2);
        let high = m.normalised_form_of(m.character("˥").unwrap()).unwrap();
        assert_eq!(high.to_string(), "S-+");
        assert_eq!(value(&m, "˩", "t1"), FeatureValue::Has);
        assert_eq!(value(&m, "˩", "t5"), FeatureValue::NotHas);
    }

    #[test]
    fn spacing_characters_are_empty() {
        let m = build_feature_model(&inventory(), &InventoryConfig::default()).unwrap();
        let space = m.normalised_form_of(m.character(" ").unwrap()).unwrap();
        assert!(space.is_empty());
        assert_eq!(space.len(), m.feature_count(FeatureKind::Segmental));
    }

    #[test]
    fn ambiguous_value_is_rejected() {
        let mut inv = inventory();
        inv.vowels.insert(
            "o".into(),
            SoundEntry::new([("height", "close-mid"), ("roundedness", "voiced")]),
        );
        assert_eq!(
            build_feature_model(&inv, &InventoryConfig::default()).unwrap_err(),
            ZoundsError::InconsistentPropertyMapping {
                value: "voiced".to_string(),
                first: "phonation".to_string(),
                second: "roundedness".to_string(),
            }
        );
    }

    #[test]
    fn diacritic_shared_by_groups_is_registered_once() {
        let mut inv = inventory();
        let mut vowel_mods = BTreeMap::new();
        vowel_mods.insert("◌ː".into(), SoundEntry::new([("duration", "long")]));
        vowel_mods.insert("\u{25cc}\u{303}".into(), SoundEntry::new([("nasalization", "nasalized")]));
        inv.diacritics.insert("vowel".into(), vowel_mods);
        inv.diacritics
            .get_mut("consonant")
            .unwrap()
            .insert("◌ː".into(), SoundEntry::new([("duration", "long")]));

        let m = build_feature_model(&inv, &InventoryConfig::default()).unwrap();
        assert_eq!(m.characters().filter(|&(_, s)| s == "ː").count(), 1);
        assert_eq!(value(&m, "ː", "long"), FeatureValue::Has);
        assert_eq!(value(&m, "\u{303}", "nasalized"), FeatureValue::Has);
        assert_eq!(value(&m, "ː", "nasalized"), FeatureValue::Inapplicable);
    }

    #[test]
    fn multi_char_diacritic_still_contributes_values() {
        let mut inv = inventory();
        inv.diacritics
            .get_mut("consonant")
            .unwrap()
            .insert("◌ʰʷ".into(), SoundEntry::new([("release", "labialized-aspirated")]));
        let m = build_feature_model(&inv, &InventoryConfig::default()).unwrap();
        assert!(m.character("ʰʷ").is_none());
        assert_eq!(value(&m, "p", "labialized-aspirated"), FeatureValue::NotHas);
    }

    #[test]
    fn multi_char_diacritic_can_make_a_value_ambiguous() {
        let mut inv = inventory();
        inv.diacritics
            .get_mut("consonant")
            .unwrap()
            .insert("◌ʰʷ".into(), SoundEntry::new([("release", "stop")]));
        assert_eq!(
            build_feature_model(&inv, &InventoryConfig::default()).unwrap_err(),
            ZoundsError::InconsistentPropertyMapping {
                value: "stop".to_string(),
                first: "manner".to_string(),
                second: "release".to_string(),
            }
        );
    }

    #[test]
    fn construction_is_deterministic() {
        let a = build_feature_model(&inventory(), &InventoryConfig::default()).unwrap();
        let b = build_feature_model(&inventory(), &InventoryConfig::default()).unwrap();
        let names_a: Vec<&str> = a.features(FeatureKind::Segmental).map(|(_, n)| n).collect();
        let names_b: Vec<&str> = b.features(FeatureKind::Segmental).map(|(_, n)| n).collect();
        assert_eq!(names_a, names_b);
        for (c, symbol) in a.characters() {
            let other = b.character(symbol).unwrap();
            assert_eq!(
                a.normalised_form_of(c).unwrap(),
                b.normalised_form_of(other).unwrap()
            );
        }
    }

    #[test]
    fn custom_config_is_honoured() {
        let config = InventoryConfig {
            spacing_symbols: alloc::vec!["#".to_string()],
            diacritic_placeholder: '◌',
            tone_feature_prefix: "tone".to_string(),
        };
        let m = build_feature_model(&inventory(), &config).unwrap();
        assert!(m.character("#").is_some());
        assert!(m.character(" ").is_none());
        assert!(m.feature("tone5", FeatureKind::Suprasegmental).is_some());
    }
}
