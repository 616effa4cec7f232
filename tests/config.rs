use chrono::FixedOffset;
use datekit::config::{Config, TimezoneSetting};
use datekit::constants::{CONFIG_ENV_VAR, CONFIG_FILE_NAME};
use datekit::labels::LabelPreset;
use std::io::Write;

#[test]
fn test_default_config() {
    let config = Config::default();
    assert_eq!(config.display.timezone, "local");
    assert_eq!(config.display.default_pattern, "yyyy.MM.dd HH:mm");
    assert_eq!(config.labels.preset, LabelPreset::Chinese);
    assert!(!config.logging.enabled);
    assert_eq!(config.logging.level, "info");
}

#[test]
fn test_config_validation() {
    let mut config = Config::default();

    // Valid config should pass
    assert!(config.validate().is_ok());

    // Unknown timezone should fail
    config.display.timezone = "mars".to_string();
    assert!(config.validate().is_err());

    // Reset and test an unsupported pattern token
    config.display.timezone = "+08:00".to_string();
    config.display.default_pattern = "yyyy-MM-dd Q".to_string();
    assert!(config.validate().is_err());

    // Reset and test a template without placeholder
    config.display.default_pattern = "HH:mm".to_string();
    config.labels.minutes_ago = Some("minutes ago".to_string());
    assert!(config.validate().is_err());

    config.labels.minutes_ago = None;
    config.logging.level = "loud".to_string();
    assert!(config.validate().is_err());
}

#[test]
fn test_timezone_setting() {
    assert_eq!(TimezoneSetting::parse("local").unwrap(), TimezoneSetting::Local);
    assert_eq!(
        TimezoneSetting::parse("UTC").unwrap(),
        TimezoneSetting::Fixed(FixedOffset::east_opt(0).unwrap())
    );
    assert_eq!(
        TimezoneSetting::parse("+08:00").unwrap(),
        TimezoneSetting::Fixed(FixedOffset::east_opt(8 * 3600).unwrap())
    );
    assert_eq!(
        TimezoneSetting::parse("-05:30").unwrap(),
        TimezoneSetting::Fixed(FixedOffset::west_opt(5 * 3600 + 30 * 60).unwrap())
    );
    assert!(TimezoneSetting::parse("somewhere").is_err());
}

#[test]
fn test_config_serialization() {
    let config = Config::default();
    let toml_str = toml::to_string_pretty(&config).unwrap();
    assert!(toml_str.contains("timezone = \"local\""));
    assert!(toml_str.contains("preset = \"chinese\""));
    assert!(!toml_str.contains("just_now"));
}

#[test]
fn test_partial_config_deserialization() {
    // Test that partial TOML configs merge with defaults
    let partial_toml = r#"
[labels]
preset = "english"
yesterday = "Yday"

[logging]
enabled = true
"#;

    let config: Config = toml::from_str(partial_toml).unwrap();

    // Check that specified values are used
    assert!(config.logging.enabled);
    let labels = config.labels();
    assert_eq!(labels.yesterday, "Yday");
    assert_eq!(labels.just_now, "just now");
    assert_eq!(labels.weekdays[0], "Sun");

    // Check that unspecified values use defaults
    assert_eq!(config.display.timezone, "local");
    assert_eq!(config.logging.level, "info");
}

#[test]
fn test_weekday_override() {
    let toml_str = r#"
[labels]
weekdays = ["星期日", "星期一", "星期二", "星期三", "星期四", "星期五", "星期六"]
"#;
    let config: Config = toml::from_str(toml_str).unwrap();
    assert!(config.validate().is_ok());
    let labels = config.labels();
    assert_eq!(labels.weekdays[5], "星期五");
    assert_eq!(labels.just_now, "刚刚");
}

#[test]
fn test_empty_config_deserialization() {
    // Test that empty TOML uses all defaults
    let config: Config = toml::from_str("").unwrap();
    let default_config = Config::default();

    assert_eq!(config.display.timezone, default_config.display.timezone);
    assert_eq!(config.display.default_pattern, default_config.display.default_pattern);
    assert_eq!(config.logging.enabled, default_config.logging.enabled);
    assert_eq!(config.labels(), default_config.labels());
}

#[test]
fn test_load_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[display]\ntimezone = \"+08:00\"\ndefault_pattern = \"yyyy-MM-dd\"").unwrap();

    let config = Config::load_from_file(file.path()).unwrap();
    assert_eq!(config.display.default_pattern, "yyyy-MM-dd");
    assert_eq!(
        config.timezone().unwrap(),
        TimezoneSetting::Fixed(FixedOffset::east_opt(8 * 3600).unwrap())
    );
}

#[test]
fn test_load_from_file_rejects_invalid_values() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[display]\ntimezone = \"nowhere\"").unwrap();
    assert!(Config::load_from_file(file.path()).is_err());

    assert!(Config::load_from_file("/nonexistent/datekit.toml").is_err());
}

#[test]
fn test_generate_default_config() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("config.toml");

    Config::generate_default_config(&path).unwrap();

    let content = std::fs::read_to_string(&path).unwrap();
    assert!(content.starts_with("# datekit Configuration File"));
    let config = Config::load_from_file(&path).unwrap();
    assert_eq!(config.display.timezone, "local");
}

#[test]
fn test_generate_default_config_keeps_existing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[display]\ntimezone = \"utc\"\n").unwrap();

    assert!(Config::generate_default_config(&path).is_err());
    assert_eq!(Config::load_from_file(&path).unwrap().display.timezone, "utc");
}

#[test]
fn test_resolve_prefers_explicit_path() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[labels]\npreset = \"english\"").unwrap();

    let config = Config::resolve(Some(file.path())).unwrap();
    assert_eq!(config.labels.preset, LabelPreset::English);

    assert!(Config::resolve(Some(std::path::Path::new("/nonexistent/datekit.toml"))).is_err());
}

#[test]
fn test_search_paths_order() {
    let dir = tempfile::tempdir().unwrap();
    let env_path = dir.path().join("from-env.toml");
    std::fs::write(&env_path, "[display]\ntimezone = \"-05:00\"\n").unwrap();

    std::env::set_var(CONFIG_ENV_VAR, &env_path);
    let paths = Config::search_paths();
    let config = Config::resolve(None);
    std::env::remove_var(CONFIG_ENV_VAR);

    assert_eq!(paths[0], env_path);
    assert_eq!(paths[1], std::path::PathBuf::from(CONFIG_FILE_NAME));
    assert_eq!(
        config.unwrap().timezone().unwrap(),
        TimezoneSetting::Fixed(FixedOffset::west_opt(5 * 3600).unwrap())
    );

    assert_eq!(Config::search_paths()[0], std::path::PathBuf::from(CONFIG_FILE_NAME));
}
