//! Model snapshot round-trip integration tests.
//!
//! Verifies that a live FeatureModel can be captured as a ModelSnapshot,
//! serialised to JSON, deserialised back, and restored into a model that
//! produces the same normalised forms.

#[cfg(feature = "serde")]
mod tests {
    use zounds_core::snapshot::{ModelSnapshot, SNAPSHOT_VERSION};
    use zounds_core::{CharacterKind, FeatureKind, FeatureModel, FeatureValue, ZoundsError};

    // ── Helpers ──────────────────────────────────────────────────────────────

    /// voiced, nasal (segmental); t5 (suprasegmental); b, m, ~, ˥ and a space.
    fn make_model() -> FeatureModel {
        let mut m = FeatureModel::new();
        let voiced = m.register_feature("voiced", FeatureKind::Segmental).unwrap();
        let nasal = m.register_feature("nasal", FeatureKind::Segmental).unwrap();
        let t5 = m.register_feature("t5", FeatureKind::Suprasegmental).unwrap();

        m.register_character(" ", CharacterKind::Spacing).unwrap();
        let b = m.register_character("b", CharacterKind::Base).unwrap();
        let nasal_m = m.register_character("m", CharacterKind::Base).unwrap();
        let tilde = m.register_character("~", CharacterKind::Diacritic).unwrap();
        let tone = m.register_character("˥", CharacterKind::Suprasegmental).unwrap();

        m.set_character_feature_value(b, voiced, FeatureValue::Has).unwrap();
        m.set_character_feature_value(b, nasal, FeatureValue::NotHas).unwrap();
        m.set_character_feature_value(nasal_m, voiced, FeatureValue::Has).unwrap();
        m.set_character_feature_value(nasal_m, nasal, FeatureValue::Has).unwrap();
        m.set_character_feature_value(tilde, nasal, FeatureValue::Has).unwrap();
        m.set_character_feature_value(tone, t5, FeatureValue::Has).unwrap();
        m
    }

    // ── Tests ─────────────────────────────────────────────────────────────────

    #[test]
    fn test_snapshot_captures_every_character() {
        let model = make_model();
        let snapshot = ModelSnapshot::from_model(&model).unwrap();
        assert_eq!(snapshot.version, SNAPSHOT_VERSION);
        assert_eq!(snapshot.character_count(), 5);
        assert_eq!(snapshot.features.len(), 3);
        assert_eq!(snapshot.find_character("b").unwrap().form, "B+-");
        assert_eq!(snapshot.find_character("~").unwrap().form, "B0+");
        assert_eq!(snapshot.find_character("˥").unwrap().form, "S+");
        assert_eq!(snapshot.find_character(" ").unwrap().form, "B00");
        assert!(snapshot.find_character("x").is_none());
    }

    #[test]
    fn test_snapshot_round_trip_json() {
        let model = make_model();
        let original = ModelSnapshot::from_model(&model).unwrap();

        let json = serde_json::to_string(&original).expect("serialise to JSON");
        let restored: ModelSnapshot = serde_json::from_str(&json).expect("deserialise from JSON");
        assert_eq!(original, restored);

        let rebuilt = restored.to_model().expect("restore model");
        assert_eq!(rebuilt.character_count(), model.character_count());
        for (c, symbol) in model.characters() {
            let other = rebuilt
                .character(symbol)
                .unwrap_or_else(|| panic!("character {symbol:?} missing after restore"));
            assert_eq!(other.kind(), c.kind());
            assert_eq!(
                rebuilt.normalised_form_of(other).unwrap(),
                model.normalised_form_of(c).unwrap(),
                "form mismatch for {symbol:?}"
            );
        }
    }

    #[test]
    fn test_restored_model_keeps_feature_positions() {
        let model = make_model();
        let rebuilt = ModelSnapshot::from_model(&model).unwrap().to_model().unwrap();
        for kind in FeatureKind::ALL {
            let a: Vec<&str> = model.features(kind).map(|(_, n)| n).collect();
            let b: Vec<&str> = rebuilt.features(kind).map(|(_, n)| n).collect();
            assert_eq!(a, b);
        }
    }

    #[test]
    fn test_restored_model_has_new_identity() {
        let model = make_model();
        let rebuilt = ModelSnapshot::from_model(&model).unwrap().to_model().unwrap();
        let b = model.character("b").unwrap();
        assert_eq!(
            rebuilt.normalised_form_of(b),
            Err(ZoundsError::UnknownEntity("character"))
        );
    }

    #[test]
    fn test_short_form_is_a_shape_mismatch() {
        let mut snapshot = ModelSnapshot::from_model(&make_model()).unwrap();
        snapshot
            .characters
            .iter_mut()
            .find(|r| r.symbol == "b")
            .unwrap()
            .form = "B+".to_string();
        assert_eq!(
            snapshot.to_model().unwrap_err(),
            ZoundsError::ShapeMismatch { left: 2, right: 1 }
        );
    }

    #[test]
    fn test_wrong_marker_is_a_type_mismatch() {
        let mut snapshot = ModelSnapshot::from_model(&make_model()).unwrap();
        snapshot
            .characters
            .iter_mut()
            .find(|r| r.symbol == "˥")
            .unwrap()
            .form = "B+-".to_string();
        assert!(matches!(
            snapshot.to_model(),
            Err(ZoundsError::TypeMismatch { .. })
        ));
    }

    #[test]
    fn test_specified_spacing_row_is_rejected() {
        let mut snapshot = ModelSnapshot::from_model(&make_model()).unwrap();
        snapshot
            .characters
            .iter_mut()
            .find(|r| r.symbol == " ")
            .unwrap()
            .form = "B+0".to_string();
        assert!(matches!(
            snapshot.to_model(),
            Err(ZoundsError::MismatchedKind { .. })
        ));
    }

    #[test]
    fn test_empty_model_snapshot() {
        let snapshot = ModelSnapshot::from_model(&FeatureModel::new()).unwrap();
        assert_eq!(snapshot.character_count(), 0);
        let json = serde_json::to_string(&snapshot).expect("serialise empty snapshot");
        let restored: ModelSnapshot =
            serde_json::from_str(&json).expect("deserialise empty snapshot");
        assert_eq!(restored.to_model().unwrap().character_count(), 0);
    }
}
