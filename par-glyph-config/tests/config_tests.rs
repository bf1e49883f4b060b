use par_glyph_config::{Config, ConfigError, LayoutMode};

#[test]
fn test_config_defaults() {
    let config = Config::default();
    assert_eq!(config.glyph_height, 30);
    assert_eq!(config.render_size, 72.0);
    assert_eq!(config.canvas_height, 100);
    assert_eq!(config.baseline, 80);
    assert_eq!(config.threshold, 128);
    assert_eq!(config.blank_width_ratio, 0.25);
    assert_eq!(config.letter_spacing_ratio, 0.0);
    assert_eq!(config.layout, LayoutMode::Variable);
    assert_eq!(config.workers, 0);
    assert_eq!(config.display_width, 80);
    assert!(config.font_path.is_none());
    assert!(config.manifest.is_none());
    assert!(config.validate().is_ok());
}

#[test]
fn test_config_partial_yaml_fills_defaults() {
    let yaml = r#"
glyph_height: 16
layout: fixed
fixed_width: 12
font_path: fonts/NotoSansLao-Regular.ttf
"#;
    let config = Config::from_yaml(yaml).unwrap();
    assert_eq!(config.glyph_height, 16);
    assert_eq!(config.layout, LayoutMode::Fixed);
    assert_eq!(config.effective_fixed_width(), 12);
    assert_eq!(
        config.font_path.as_deref(),
        Some(std::path::Path::new("fonts/NotoSansLao-Regular.ttf"))
    );
    // Untouched fields keep their defaults
    assert_eq!(config.threshold, 128);
    assert_eq!(config.baseline, 80);
}

#[test]
fn test_config_empty_yaml_is_default() {
    let config = Config::from_yaml("   \n").unwrap();
    assert_eq!(config, Config::default());
}

#[test]
fn test_config_invalid_yaml_is_parse_error() {
    let result = Config::from_yaml("glyph_height: [not, a, number]");
    assert!(matches!(result, Err(ConfigError::Parse(_))));
}

#[test]
fn test_config_unknown_layout_is_parse_error() {
    let result = Config::from_yaml("layout: diagonal");
    assert!(matches!(result, Err(ConfigError::Parse(_))));
}

#[test]
fn test_config_validation_rejects_bad_values() {
    let too_small = Config::new().with_glyph_height(4);
    assert!(matches!(
        too_small.validate(),
        Err(ConfigError::Validation(_))
    ));

    let zero_threshold = Config {
        threshold: 0,
        ..Config::default()
    };
    assert!(zero_threshold.validate().is_err());

    let baseline_off_canvas = Config {
        baseline: 100,
        ..Config::default()
    };
    assert!(baseline_off_canvas.validate().is_err());

    let zero_fixed = Config {
        fixed_width: Some(0),
        ..Config::default()
    };
    assert!(zero_fixed.validate().is_err());

    let negative_spacing = Config {
        letter_spacing_ratio: -0.5,
        ..Config::default()
    };
    assert!(negative_spacing.validate().is_err());

    let nan_render = Config {
        render_size: f32::NAN,
        ..Config::default()
    };
    assert!(nan_render.validate().is_err());
}

#[test]
fn test_config_validation_message_names_field() {
    let err = Config::new().with_glyph_height(300).validate().unwrap_err();
    assert!(err.to_string().contains("glyph_height"));
}

#[test]
fn test_config_save_and_load_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("config.yaml");

    let config = Config::new()
        .with_glyph_height(20)
        .with_font_path("fonts/test.ttf")
        .with_layout(LayoutMode::Fixed)
        .with_workers(3);
    config.save_to(&path).unwrap();

    assert!(path.exists());
    assert!(!path.with_extension("yaml.tmp").exists());

    let loaded = Config::load_from(&path).unwrap();
    assert_eq!(loaded, config);
}

#[test]
fn test_config_load_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let result = Config::load_from(&dir.path().join("missing.yaml"));
    assert!(matches!(result, Err(ConfigError::Io(_))));
}
