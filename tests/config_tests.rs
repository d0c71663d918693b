use std::path::PathBuf;

use image_mage::config::Configuration;

#[test]
fn parse_kebab_case_config() {
    let yaml = r#"
window:
  title: "Levels"
  grip-size: 6
histogram:
  bins: 64
  log-y: true
  preview-seed: 7
workspace:
  width-fraction: 0.4
  startup-widgets: [histogram, zoom-view]
"#;
    let cfg: Configuration = serde_yaml::from_str(yaml).unwrap();
    assert_eq!(cfg.window.title, "Levels");
    assert_eq!(cfg.window.grip_size, 6);
    assert_eq!(cfg.histogram.bins, 64);
    assert!(cfg.histogram.log_y);
    assert!(!cfg.histogram.log_x);
    assert_eq!(cfg.histogram.preview_seed, Some(7));
    assert!((cfg.workspace.width_fraction - 0.4).abs() < f64::EPSILON);
    assert_eq!(cfg.workspace.startup_widgets, vec!["histogram", "zoom-view"]);
    cfg.validated().unwrap();
}

#[test]
fn empty_document_uses_defaults() {
    let cfg: Configuration = serde_yaml::from_str("{}").unwrap();
    assert_eq!(cfg.window.title, "IMage");
    assert_eq!((cfg.window.width, cfg.window.height), (1000, 600));
    assert_eq!(cfg.window.position, Some([100, 100]));
    assert_eq!(cfg.histogram.bins, 50);
    assert_eq!(cfg.assets.icons_dir, PathBuf::from("assets/icons"));
}

#[test]
fn grip_below_minimum_is_rejected() {
    let cfg: Configuration = serde_yaml::from_str("window:\n  grip-size: 1\n").unwrap();
    let err = cfg.validated().unwrap_err();
    assert!(format!("{err:#}").contains("grip-size"));
}

#[test]
fn zoom_factor_must_grow() {
    let cfg: Configuration = serde_yaml::from_str("viewer:\n  zoom-factor: 1.0\n").unwrap();
    assert!(cfg.validated().is_err());
}

#[test]
fn reads_config_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.yaml");
    std::fs::write(&path, "theme:\n  accent: \"#123\"\n  font-size: 12\n").unwrap();
    let cfg = Configuration::from_yaml_file(&path).unwrap().validated().unwrap();
    assert_eq!(cfg.theme.accent, "#123");
    assert!((cfg.theme.font_size - 12.0).abs() < f32::EPSILON);
}

#[test]
fn missing_file_names_the_path() {
    let err = Configuration::from_yaml_file("/no/such/config.yaml").unwrap_err();
    assert!(format!("{err:#}").contains("/no/such/config.yaml"));
}
