//! 설정 파일 로드/저장 테스트.
use std::fs;
use std::path::PathBuf;

use pressure_vessel_toolbox::config::{load_or_default_from, Config};
use pressure_vessel_toolbox::units::UnitSystem;
use pressure_vessel_toolbox::vessel::{OptimizerSettings, VesselInputs};

fn temp_config_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!(
        "pressure_vessel_toolbox_{}_{}.toml",
        name,
        std::process::id()
    ))
}

#[test]
fn default_config_survives_toml_round_trip() {
    let cfg = Config::default();
    let text = toml::to_string_pretty(&cfg).expect("serialize");
    let back: Config = toml::from_str(&text).expect("deserialize");
    assert_eq!(back, cfg);
}

#[test]
fn missing_sections_fall_back_to_defaults() {
    let cfg: Config = toml::from_str("unit_system = \"SI\"\n").expect("deserialize");
    assert_eq!(cfg.unit_system, UnitSystem::SI);
    assert_eq!(cfg.language, "auto");
    assert_eq!(cfg.default_vessel, VesselInputs::default());
    assert_eq!(cfg.optimizer, OptimizerSettings::default());
}

#[test]
fn derated_yield_stress_is_optional_in_file() {
    let text = r#"
unit_system = "US"

[default_vessel]
external_pressure = 20.0
internal_pressure = 0.0
outer_diameter = 1.8
inner_diameter = 1.46
yield_stress = 120.0
"#;
    let cfg: Config = toml::from_str(text).expect("deserialize");
    assert_eq!(cfg.default_vessel.derated_yield_stress, None);
    assert_eq!(cfg.default_vessel.outer_diameter, 1.8);
}

#[test]
fn load_creates_file_when_missing() {
    let path = temp_config_path("create");
    let _ = fs::remove_file(&path);

    let cfg = load_or_default_from(&path).expect("load");
    assert!(path.exists());
    assert_eq!(cfg.path(), Some(path.as_path()));
    assert_eq!(cfg.unit_system, UnitSystem::US);

    let _ = fs::remove_file(&path);
}

#[test]
fn save_then_load_keeps_changes() {
    let path = temp_config_path("save");
    let _ = fs::remove_file(&path);

    let mut cfg = load_or_default_from(&path).expect("load");
    cfg.unit_system = UnitSystem::SI;
    cfg.language = "ko".to_string();
    cfg.default_vessel.external_pressure = 0.2;
    cfg.optimizer.max_iterations = 50;
    cfg.save().expect("save");

    let reloaded = load_or_default_from(&path).expect("reload");
    assert_eq!(reloaded, cfg);

    let _ = fs::remove_file(&path);
}
