//! Integration tests for configuration loading

use tempfile::tempdir;
use tunesync::config::Settings;

#[test]
fn settings_round_trip_preserves_values() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let path = dir.path().join("config.json");

    let settings = Settings {
        animation_scale: 0.25,
        tick_interval_ms: 16,
    };
    settings.validate()?;
    settings.save(&path)?;

    let loaded = Settings::load(&path)?;
    assert_eq!(loaded, settings);
    Ok(())
}

#[test]
fn default_path_is_under_the_config_directory() {
    let path = Settings::default_path();
    assert!(path.ends_with("tunesync/config.json"));
}

#[test]
fn loaded_settings_are_validated_before_use() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let path = dir.path().join("config.json");
    std::fs::write(&path, r#"{ "animation_scale": -2.0 }"#)?;

    let loaded = Settings::load(&path)?;
    assert!(loaded.validate().is_err());
    Ok(())
}
