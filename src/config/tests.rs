//! Configuration tests
//!
//! Round-trip guards: every field written by `to_toml()` must parse back
//! through `FileConfig` and resolve to the same value.

use super::*;
use crate::render::{QrErrorCorrection, Symbology};
use std::collections::HashMap;

fn no_env(_: &str) -> Option<String> {
    None
}

fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| map.get(key).cloned()
}

// ─────────────────────────────────────────────────────────────────────────────
// Round-trip tests
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_config_roundtrip_default() {
    let config = Config::default();
    let toml_str = config.to_toml();

    let parsed: Result<FileConfig, _> = toml::from_str(&toml_str);
    assert!(
        parsed.is_ok(),
        "Default config should round-trip.\nTOML:\n{}\nError: {:?}",
        toml_str,
        parsed.err()
    );
}

#[test]
fn test_config_roundtrip_preserves_values() {
    let mut config = Config::default();
    config.theme = "light".to_string();
    config.service.base_url = "https://tools.example.com/api".to_string();
    config.service.timeout_secs = 3;
    config.service.endpoints.hash = "generate-hash".to_string();
    config.logging.file_rotation = LogRotation::Hourly;
    config.qr.error_correction = QrErrorCorrection::M;
    config.qr.size = 512;
    config.barcode.default_symbology = Symbology::Ean13;
    config.resources.path = Some(PathBuf::from("/tmp/resources.json"));

    let file: FileConfig = toml::from_str(&config.to_toml()).expect("round-trip parse");
    let resolved = Config::resolve(file, no_env);

    assert_eq!(resolved.theme, "light");
    assert_eq!(resolved.service.base_url, "https://tools.example.com/api");
    assert_eq!(resolved.service.timeout_secs, 3);
    assert_eq!(resolved.service.endpoints.hash, "generate-hash");
    assert_eq!(resolved.service.endpoints.totp, "generate_totp");
    assert_eq!(resolved.logging.file_rotation, LogRotation::Hourly);
    assert_eq!(resolved.qr.error_correction, QrErrorCorrection::M);
    assert_eq!(resolved.qr.size, 512);
    assert_eq!(resolved.barcode.default_symbology, Symbology::Ean13);
    assert_eq!(
        resolved.resources.path,
        Some(PathBuf::from("/tmp/resources.json"))
    );
}

#[test]
fn test_quoting_survives_special_characters() {
    let mut config = Config::default();
    config.service.base_url = r#"http://host/"quoted"\path"#.to_string();

    let file: FileConfig = toml::from_str(&config.to_toml()).expect("round-trip parse");
    let resolved = Config::resolve(file, no_env);
    assert_eq!(resolved.service.base_url, r#"http://host/"quoted"\path"#);
}

// ─────────────────────────────────────────────────────────────────────────────
// Precedence
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_empty_file_uses_defaults() {
    let config = Config::resolve(FileConfig::default(), no_env);
    assert_eq!(config.theme, DEFAULT_THEME);
    assert_eq!(config.service.base_url, "http://localhost:5000/api");
    assert_eq!(config.service.timeout_secs, 10);
    assert_eq!(config.service.endpoints, Endpoints::default());
    assert_eq!(config.qr.error_correction, QrErrorCorrection::H);
    assert_eq!(config.barcode.default_symbology, Symbology::Code128);
    assert!(config.resources.path.is_none());
}

#[test]
fn test_env_overrides_file() {
    let file: FileConfig = toml::from_str(
        r#"
theme = "light"
[service]
base_url = "http://file-host/api"
timeout_secs = 30
"#,
    )
    .unwrap();

    let env = env_from(&[
        ("TRADEKIT_THEME", "dark"),
        ("TRADEKIT_API_URL", "http://env-host/api"),
        ("TRADEKIT_TIMEOUT_SECS", "5"),
    ]);
    let config = Config::resolve(file, env);

    assert_eq!(config.theme, "dark");
    assert_eq!(config.service.base_url, "http://env-host/api");
    assert_eq!(config.service.timeout_secs, 5);
}

#[test]
fn test_zero_or_garbage_timeout_is_ignored() {
    let file: FileConfig = toml::from_str("[service]\ntimeout_secs = 0\n").unwrap();
    let config = Config::resolve(file, env_from(&[("TRADEKIT_TIMEOUT_SECS", "soon")]));
    assert_eq!(config.service.timeout_secs, 10);

    let config = Config::resolve(
        FileConfig::default(),
        env_from(&[("TRADEKIT_TIMEOUT_SECS", "0")]),
    );
    assert_eq!(config.service.timeout_secs, 10);
}

#[test]
fn test_unknown_enum_values_fall_back() {
    let file: FileConfig = toml::from_str(
        r#"
[qr]
error_correction = "Z"
[barcode]
default_symbology = "pdf417"
[logging]
file_rotation = "weekly"
"#,
    )
    .unwrap();
    let config = Config::resolve(file, no_env);

    assert_eq!(config.qr.error_correction, QrErrorCorrection::H);
    assert_eq!(config.barcode.default_symbology, Symbology::Code128);
    assert_eq!(config.logging.file_rotation, LogRotation::Daily);
}

// ─────────────────────────────────────────────────────────────────────────────
// File IO
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_missing_file_is_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let file = Config::load_file_config(&dir.path().join("absent.toml")).unwrap();
    assert!(file.theme.is_none());
}

#[test]
fn test_broken_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "theme = dark-without-quotes").unwrap();

    let err = Config::load_file_config(&path).unwrap_err();
    assert!(err.to_string().contains("Failed to parse config file"));
}

#[test]
fn test_save_to_writes_through() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("config.toml");

    let mut config = Config::default();
    config.theme = "light".to_string();
    config.save_to(&path).unwrap();

    let file = Config::load_file_config(&path).unwrap();
    assert_eq!(file.theme.as_deref(), Some("light"));
}
