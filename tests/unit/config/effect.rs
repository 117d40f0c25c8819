use rand::RngCore;

use super::*;

#[test]
fn defaults_match_the_classic_effect() {
    let cfg = EffectConfig::default();
    assert_eq!(cfg.compare, CompareKind::Mean);
    assert_eq!(cfg.order, SortOrder::Ascending);
    assert_eq!(cfg.threshold, 110);
    assert_eq!(cfg.scalar, 1.0);
    assert_eq!(cfg.noise_factor, 0);
    assert_eq!(cfg.direction, Direction::Right);
    assert!(!cfg.clean && !cfg.invert && !cfg.crush);
    assert_eq!(cfg.debug, DebugFlags::default());
    assert_eq!(cfg.seed, None);
}

#[test]
fn partial_json_fills_defaults() {
    let cfg: EffectConfig =
        serde_json::from_str(r#"{"direction":"up","threshold":42,"debug":{"mask":true}}"#)
            .unwrap();
    assert_eq!(cfg.direction, Direction::Up);
    assert_eq!(cfg.threshold, 42);
    assert!(cfg.debug.mask);
    assert!(!cfg.debug.span_colors);
    assert_eq!(cfg.scalar, 1.0);
}

#[test]
fn unknown_fields_are_rejected() {
    let res = serde_json::from_str::<EffectConfig>(r#"{"thresh":1}"#);
    assert!(res.is_err());
}

#[test]
fn non_finite_scalar_is_invalid() {
    let cfg = EffectConfig {
        scalar: f64::NAN,
        ..EffectConfig::default()
    };
    assert!(matches!(cfg.validate(), Err(SortError::Validation(_))));
    assert!(EffectConfig::default().validate().is_ok());
}

#[test]
fn seeded_rng_is_reproducible() {
    let cfg = EffectConfig {
        seed: Some(9),
        ..EffectConfig::default()
    };
    assert_eq!(cfg.resolve_seed(), 9);
    assert_eq!(cfg.rng().next_u64(), cfg.rng().next_u64());
}

#[test]
fn from_json_path_loads_and_validates() {
    let dir = std::path::PathBuf::from("target").join("unit_config");
    std::fs::create_dir_all(&dir).unwrap();

    let good = dir.join("good.json");
    std::fs::write(&good, r#"{"compare":"red","order":"descending","seed":3}"#).unwrap();
    let cfg = EffectConfig::from_json_path(&good).unwrap();
    assert_eq!(cfg.compare, CompareKind::Red);
    assert_eq!(cfg.order, SortOrder::Descending);
    assert_eq!(cfg.seed, Some(3));

    let missing = dir.join("missing.json");
    let _ = std::fs::remove_file(&missing);
    assert!(matches!(
        EffectConfig::from_json_path(&missing),
        Err(SortError::Other(_))
    ));
}
