//! Settings persistence tests.

use autoviz::settings::{ENV_PORT, Settings};
use autoviz::types::ColorScheme;
use tempfile::TempDir;

#[test]
fn test_save_and_load_round_trip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("settings.json");

    let settings = Settings {
        max_upload_mb: 64,
        port: 8080,
        default_color_scheme: ColorScheme::Viridis,
        ..Default::default()
    };
    settings.save(&path).unwrap();

    assert_eq!(Settings::load(&path).unwrap(), settings);
}

#[test]
fn test_missing_file_uses_defaults() {
    let dir = TempDir::new().unwrap();
    let settings = Settings::load_or_default(dir.path().join("absent.json")).unwrap();
    assert_eq!(settings, Settings::default());
}

#[test]
fn test_invalid_file_reports_path() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("settings.json");
    std::fs::write(&path, "{ not json").unwrap();

    let err = Settings::load_or_default(&path).unwrap_err();
    assert!(err.to_string().contains("Failed to parse settings file"));
}

#[test]
fn test_partial_file_keeps_other_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("settings.json");
    std::fs::write(&path, r#"{ "preview_rows": 5, "default_color_scheme": "ocean" }"#).unwrap();

    let settings = Settings::load(&path).unwrap();
    assert_eq!(settings.preview_rows, 5);
    assert_eq!(settings.default_color_scheme, ColorScheme::Ocean);
    assert_eq!(settings.max_upload_mb, 16);
}

#[test]
fn test_env_port_override() {
    let mut settings = Settings::default();
    settings.apply_env_overrides(|key| (key == ENV_PORT).then(|| " 9000 ".to_string()));
    assert_eq!(settings.port, 9000);
}
