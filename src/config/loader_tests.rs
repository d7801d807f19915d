//! Tests for configuration file loading.

use super::*;
use serial_test::serial;
use std::env;
use std::fs;

#[test]
fn default_config_path_contains_histrow_config_toml() {
    if let Some(path) = default_config_path() {
        let path_str = path.to_string_lossy();
        assert!(
            path_str.contains("histrow") && path_str.ends_with("config.toml"),
            "Path should contain 'histrow' and end with 'config.toml', got: {}",
            path_str
        );
    }
}

#[test]
fn default_log_path_ends_with_histrow_log() {
    let path = default_log_path();
    assert!(
        path.to_string_lossy().ends_with("histrow.log"),
        "Default log path should end with 'histrow.log', got: {:?}",
        path
    );
}

#[test]
fn load_config_file_returns_ok_none_for_missing_file() {
    let result = load_config_file("/nonexistent/path/to/config.toml");
    assert_eq!(
        result,
        Ok(None),
        "Missing config file should return Ok(None), not an error"
    );
}

#[test]
fn load_config_file_parses_valid_toml() {
    let config_path = env::temp_dir().join("histrow_test_config.toml");

    let toml_content = r#"
commit_height = 60
folded_commits_height = 30
date_separator_height = 24
row_label_width = 180
column_width = 160
utc_offset_minutes = -300
"#;

    fs::write(&config_path, toml_content).expect("Failed to write test config");

    let config = load_config_file(&config_path)
        .expect("Should successfully parse valid TOML")
        .expect("Should return Some(ConfigFile) for existing file");

    assert_eq!(config.commit_height, Some(60));
    assert_eq!(config.folded_commits_height, Some(30));
    assert_eq!(config.date_separator_height, Some(24));
    assert_eq!(config.row_label_width, Some(180));
    assert_eq!(config.column_width, Some(160));
    assert_eq!(config.utc_offset_minutes, Some(-300));
    assert_eq!(config.log_file_path, None);

    fs::remove_file(config_path).ok();
}

#[test]
fn load_config_file_returns_error_for_invalid_toml() {
    let config_path = env::temp_dir().join("histrow_test_invalid.toml");
    fs::write(&config_path, "this is not valid TOML ][}{").expect("Failed to write config");

    let result = load_config_file(&config_path);

    match result {
        Err(ConfigError::ParseError { path, reason: _ }) => {
            assert_eq!(path, config_path);
        }
        _ => panic!("Expected ParseError, got {:?}", result),
    }

    fs::remove_file(config_path).ok();
}

#[test]
fn load_config_file_rejects_unknown_keys() {
    let config_path = env::temp_dir().join("histrow_test_unknown_key.toml");
    fs::write(&config_path, "theme = \"monokai\"\n").expect("Failed to write config");

    let result = load_config_file(&config_path);

    assert!(matches!(result, Err(ConfigError::ParseError { .. })));
    fs::remove_file(config_path).ok();
}

#[test]
fn merge_config_uses_defaults_when_none() {
    assert_eq!(merge_config(None), ResolvedConfig::default());
}

#[test]
fn merge_config_uses_defaults_for_none_fields() {
    let config_file = ConfigFile {
        commit_height: Some(100),
        ..ConfigFile::default()
    };

    let resolved = merge_config(Some(config_file));
    let defaults = ResolvedConfig::default();

    assert_eq!(resolved.commit_height, 100);
    assert_eq!(resolved.folded_commits_height, defaults.folded_commits_height);
    assert_eq!(resolved.date_separator_height, defaults.date_separator_height);
    assert_eq!(resolved.row_label_width, defaults.row_label_width);
    assert_eq!(resolved.column_width, defaults.column_width);
    assert_eq!(resolved.log_file_path, defaults.log_file_path);
}

#[test]
fn resolved_config_builds_metrics() {
    let config = ResolvedConfig {
        commit_height: 60,
        folded_commits_height: 30,
        date_separator_height: 20,
        row_label_width: 150,
        column_width: 100,
        utc_offset_minutes: 120,
        log_file_path: default_log_path(),
    };

    let rows = config.row_metrics().unwrap();
    assert_eq!(rows.commit_height.get(), 60);
    assert_eq!(rows.folded_commits_height.get(), 30);
    assert_eq!(rows.date_separator_height.get(), 20);
    assert_eq!(rows.utc_offset.local_minus_utc(), 7200);

    let columns = config.column_metrics();
    assert_eq!(columns.row_label_width, 150);
    assert_eq!(columns.column_width, 100);
}

#[test]
fn out_of_range_offset_is_rejected() {
    let config = ResolvedConfig {
        utc_offset_minutes: 24 * 60,
        ..ResolvedConfig::default()
    };
    assert_eq!(
        config.row_metrics(),
        Err(ConfigError::InvalidUtcOffset { minutes: 1440 })
    );
}

#[test]
fn zero_row_heights_are_rejected() {
    for field in ["commit_height", "folded_commits_height", "date_separator_height"] {
        let mut config = ResolvedConfig::default();
        match field {
            "commit_height" => config.commit_height = 0,
            "folded_commits_height" => config.folded_commits_height = 0,
            _ => config.date_separator_height = 0,
        }
        assert_eq!(
            config.row_metrics(),
            Err(ConfigError::InvalidHeight { field }),
            "{} = 0 should be rejected",
            field
        );
    }
}

#[test]
fn zero_commit_height_from_file_is_rejected() {
    let config_path = env::temp_dir().join("histrow_test_zero_height.toml");
    fs::write(&config_path, "commit_height = 0\n").expect("Failed to write config");

    let config_file = load_config_file(&config_path).expect("Zero still parses as TOML");
    let resolved = merge_config(config_file);

    assert_eq!(
        resolved.row_metrics(),
        Err(ConfigError::InvalidHeight {
            field: "commit_height"
        })
    );
    fs::remove_file(config_path).ok();
}

#[test]
fn one_pixel_heights_are_accepted() {
    let config = ResolvedConfig {
        commit_height: 1,
        folded_commits_height: 1,
        date_separator_height: 1,
        ..ResolvedConfig::default()
    };
    let metrics = config.row_metrics().unwrap();
    assert_ne!(
        metrics.expanded_folded_height(2),
        metrics.folded_commits_height
    );
}

/// RAII guard to ensure environment variable cleanup even under test parallelism.
struct EnvGuard(&'static str);

impl EnvGuard {
    fn new(name: &'static str) -> Self {
        env::remove_var(name);
        EnvGuard(name)
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        env::remove_var(self.0);
    }
}

#[test]
#[serial(histrow_utc_offset)]
fn apply_env_overrides_respects_utc_offset() {
    let _guard = EnvGuard::new(UTC_OFFSET_ENV_VAR);
    env::set_var(UTC_OFFSET_ENV_VAR, "-480");

    let result = apply_env_overrides(ResolvedConfig::default());

    assert_eq!(result.utc_offset_minutes, -480);
}

#[test]
#[serial(histrow_utc_offset)]
fn apply_env_overrides_ignores_garbage() {
    let _guard = EnvGuard::new(UTC_OFFSET_ENV_VAR);
    env::set_var(UTC_OFFSET_ENV_VAR, "east");

    let base = ResolvedConfig::default();
    assert_eq!(apply_env_overrides(base.clone()), base);
}

#[test]
#[serial(histrow_utc_offset)]
fn apply_env_overrides_no_change_when_env_var_not_set() {
    let _guard = EnvGuard::new(UTC_OFFSET_ENV_VAR);

    let base = ResolvedConfig::default();
    assert_eq!(apply_env_overrides(base.clone()), base);
}

#[test]
fn apply_cli_overrides_wins() {
    let base = ResolvedConfig {
        utc_offset_minutes: 60,
        ..ResolvedConfig::default()
    };

    assert_eq!(apply_cli_overrides(base.clone(), Some(-60)).utc_offset_minutes, -60);
    assert_eq!(apply_cli_overrides(base, None).utc_offset_minutes, 60);
}

#[test]
#[serial(histrow_config)]
fn load_config_with_precedence_prefers_explicit_path() {
    let _guard = EnvGuard::new(CONFIG_ENV_VAR);
    let temp_dir = env::temp_dir();
    let explicit_path = temp_dir.join("histrow_explicit.toml");
    let env_path = temp_dir.join("histrow_env.toml");

    fs::write(&explicit_path, "commit_height = 11\n").expect("Failed to write explicit config");
    fs::write(&env_path, "commit_height = 22\n").expect("Failed to write env config");
    env::set_var(CONFIG_ENV_VAR, env_path.to_str().unwrap());

    let config = load_config_with_precedence(Some(explicit_path.clone()))
        .unwrap()
        .unwrap();
    assert_eq!(
        config.commit_height,
        Some(11),
        "Should use explicit path, not HISTROW_CONFIG env var"
    );

    fs::remove_file(explicit_path).ok();
    fs::remove_file(env_path).ok();
}

#[test]
#[serial(histrow_config)]
fn load_config_with_precedence_uses_env_var_when_no_explicit_path() {
    let _guard = EnvGuard::new(CONFIG_ENV_VAR);
    let env_path = env::temp_dir().join("histrow_env_only.toml");

    fs::write(&env_path, "column_width = 123\n").expect("Failed to write env config");
    env::set_var(CONFIG_ENV_VAR, env_path.to_str().unwrap());

    let config = load_config_with_precedence(None).unwrap().unwrap();
    assert_eq!(config.column_width, Some(123));

    fs::remove_file(env_path).ok();
}

#[test]
#[serial(histrow_config)]
fn load_config_with_precedence_env_var_to_missing_file_is_none() {
    let _guard = EnvGuard::new(CONFIG_ENV_VAR);
    env::set_var(CONFIG_ENV_VAR, "/nonexistent/histrow/config.toml");

    assert_eq!(load_config_with_precedence(None), Ok(None));
}
