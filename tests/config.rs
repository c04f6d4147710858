use tempfile::tempdir;
use vim_core::{ConfigError, EngineConfig};

#[test]
fn test_defaults() {
    let config = EngineConfig::default();
    assert_eq!(config.scroll_off, 3);
    assert_eq!(config.shift_width, 4);
    assert_eq!(config.tab_width, 8);
    assert!(config.expand_tab);
    assert!(config.auto_indent);
    assert_eq!(config.page_lines, 24);
}

#[test]
fn test_partial_json_keeps_other_defaults() {
    let config = EngineConfig::from_json(r#"{ "shift_width": 2, "expand_tab": false }"#).unwrap();
    assert_eq!(config.shift_width, 2);
    assert!(!config.expand_tab);
    assert_eq!(config.tab_width, 8);
    assert_eq!(config.scroll_off, 3);
}

#[test]
fn test_json_round_trip() {
    let config = EngineConfig {
        scroll_off: 0,
        page_lines: 40,
        ..EngineConfig::default()
    };
    let json = config.to_json().unwrap();
    assert_eq!(EngineConfig::from_json(&json).unwrap(), config);
}

#[test]
fn test_invalid_json_is_a_parse_error() {
    let err = EngineConfig::from_json(r#"{ "shift_width": "wide" }"#).unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
    assert!(err.to_string().starts_with("invalid config"));
}

#[test]
fn test_load_from_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("vim_core.json");
    std::fs::write(&path, r#"{ "tab_width": 4 }"#).unwrap();
    let config = EngineConfig::load(&path).unwrap();
    assert_eq!(config.tab_width, 4);
    assert_eq!(config.shift_width, 4);
}

#[test]
fn test_load_missing_file_is_io_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("missing.json");
    let err = EngineConfig::load(&path).unwrap_err();
    assert!(matches!(err, ConfigError::Io(_)));
}

#[test]
fn test_zero_shift_width_follows_tab_width() {
    let config = EngineConfig {
        shift_width: 0,
        tab_width: 3,
        ..EngineConfig::default()
    };
    assert_eq!(config.effective_shift_width(), 3);
    assert_eq!(config.indent_unit(), "   ");

    let config = EngineConfig {
        shift_width: 0,
        tab_width: 0,
        ..EngineConfig::default()
    };
    assert_eq!(config.effective_shift_width(), 1);
}

#[test]
fn test_indent_unit_uses_tab_without_expand_tab() {
    let config = EngineConfig {
        expand_tab: false,
        ..EngineConfig::default()
    };
    assert_eq!(config.indent_unit(), "\t");
    assert_eq!(EngineConfig::default().indent_unit(), "    ");
}
