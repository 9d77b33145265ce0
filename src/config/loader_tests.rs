//! Tests for configuration file loading.

use super::*;
use serial_test::serial;
use std::env;
use std::fs;

#[test]
fn default_config_path_contains_logpane_config_toml() {
    let Some(path) = default_config_path() else {
        return;
    };
    let path_str = path.to_string_lossy();
    assert!(
        path_str.contains("logpane") && path_str.ends_with("config.toml"),
        "Path should contain 'logpane' and end with 'config.toml', got: {}",
        path_str
    );
}

#[test]
fn default_log_path_ends_with_logpane_log() {
    let path = default_log_path();
    assert!(
        path.to_string_lossy().ends_with("logpane.log"),
        "Default log path should end with 'logpane.log', got: {:?}",
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
    let config_path = env::temp_dir().join("logpane_test_config.toml");

    let toml_content = r#"
history_capacity = 500
redraw_interval_ms = 50
line_wrap = false
follow = false
show_toolbar = false
log_file_path = "/tmp/logpane-test.log"
"#;

    fs::write(&config_path, toml_content).expect("Failed to write test config");

    let config = load_config_file(&config_path)
        .expect("Should successfully parse valid TOML")
        .expect("Should return Some(ConfigFile) for existing file");

    assert_eq!(config.history_capacity, Some(500));
    assert_eq!(config.redraw_interval_ms, Some(50));
    assert_eq!(config.line_wrap, Some(false));
    assert_eq!(config.follow, Some(false));
    assert_eq!(config.show_toolbar, Some(false));
    assert_eq!(
        config.log_file_path,
        Some(PathBuf::from("/tmp/logpane-test.log"))
    );

    fs::remove_file(config_path).ok();
}

#[test]
fn load_config_file_returns_error_for_invalid_toml() {
    let config_path = env::temp_dir().join("logpane_test_invalid.toml");

    fs::write(&config_path, "this is not valid TOML ][}{")
        .expect("Failed to write invalid test config");

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
fn load_config_file_handles_partial_config() {
    let config_path = env::temp_dir().join("logpane_test_partial.toml");

    fs::write(&config_path, "line_wrap = false\n").expect("Failed to write partial test config");

    let config = load_config_file(&config_path)
        .expect("Should parse partial config")
        .expect("File exists");
    assert_eq!(config.line_wrap, Some(false));
    assert_eq!(config.history_capacity, None);

    fs::remove_file(config_path).ok();
}

#[test]
fn config_file_rejects_unknown_fields() {
    let result: Result<ConfigFile, _> = toml::from_str("theme = \"dark\"\n");
    assert!(result.is_err(), "Unknown fields should be rejected");
}

#[test]
fn resolved_config_default_has_expected_values() {
    let config = ResolvedConfig::default();

    assert_eq!(config.history_capacity, 1_000_000);
    assert_eq!(config.redraw_interval(), Duration::from_millis(300));
    assert!(config.line_wrap);
    assert!(config.follow);
    assert!(config.show_toolbar);
    assert!(!config.log_file_path.as_os_str().is_empty());
}

#[test]
fn merge_config_uses_defaults_when_none() {
    assert_eq!(merge_config(None), ResolvedConfig::default());
}

#[test]
fn merge_config_overrides_with_config_file_values() {
    let config_file = ConfigFile {
        history_capacity: Some(42),
        redraw_interval_ms: Some(10),
        line_wrap: Some(false),
        follow: None,
        show_toolbar: Some(false),
        log_file_path: Some(PathBuf::from("/custom/path/to/app.log")),
    };

    let resolved = merge_config(Some(config_file));

    assert_eq!(resolved.history_capacity, 42);
    assert_eq!(resolved.redraw_interval_ms, 10);
    assert!(!resolved.line_wrap);
    assert!(resolved.follow, "Unset field should keep default");
    assert!(!resolved.show_toolbar);
    assert_eq!(
        resolved.log_file_path,
        PathBuf::from("/custom/path/to/app.log")
    );
}

/// RAII guard to ensure environment variable cleanup even under test parallelism.
/// Removes the var on drop, preventing test pollution in parallel execution.
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
#[serial(logpane_env)]
fn apply_env_overrides_respects_history_and_wrap() {
    let _history = EnvGuard::new(HISTORY_ENV_VAR);
    let _wrap = EnvGuard::new(WRAP_ENV_VAR);

    env::set_var(HISTORY_ENV_VAR, "250");
    env::set_var(WRAP_ENV_VAR, "0");

    let result = apply_env_overrides(ResolvedConfig::default());

    assert_eq!(result.history_capacity, 250);
    assert!(!result.line_wrap, "LOGPANE_WRAP=0 should disable wrapping");
}

#[test]
#[serial(logpane_env)]
fn apply_env_overrides_accepts_true_false_words() {
    let _wrap = EnvGuard::new(WRAP_ENV_VAR);
    let base = ResolvedConfig {
        line_wrap: false,
        ..ResolvedConfig::default()
    };

    env::set_var(WRAP_ENV_VAR, "TRUE");

    assert!(apply_env_overrides(base).line_wrap);
}

#[test]
#[serial(logpane_env)]
fn apply_env_overrides_ignores_unparseable_values() {
    let _history = EnvGuard::new(HISTORY_ENV_VAR);
    let _wrap = EnvGuard::new(WRAP_ENV_VAR);

    env::set_var(HISTORY_ENV_VAR, "lots");
    env::set_var(WRAP_ENV_VAR, "maybe");

    let base = ResolvedConfig::default();
    assert_eq!(apply_env_overrides(base.clone()), base);
}

#[test]
#[serial(logpane_env)]
fn apply_env_overrides_no_change_when_env_var_not_set() {
    let _history = EnvGuard::new(HISTORY_ENV_VAR);
    let _wrap = EnvGuard::new(WRAP_ENV_VAR);

    let base = ResolvedConfig::default();
    let result = apply_env_overrides(base.clone());

    assert_eq!(result, base, "Config should be unchanged when no env var set");
}

#[test]
#[serial(logpane_config)]
fn load_config_with_precedence_prefers_explicit_path() {
    let _guard = EnvGuard::new(CONFIG_ENV_VAR);

    let temp_dir = env::temp_dir();
    let explicit_path = temp_dir.join("logpane_explicit.toml");
    fs::write(&explicit_path, "history_capacity = 1\n").expect("Failed to write explicit config");

    // Set LOGPANE_CONFIG to different path (should be ignored)
    let env_path = temp_dir.join("logpane_env.toml");
    fs::write(&env_path, "history_capacity = 2\n").expect("Failed to write env config");
    env::set_var(CONFIG_ENV_VAR, &env_path);

    let config = load_config_with_precedence(Some(explicit_path.clone()))
        .expect("explicit config should load")
        .expect("explicit config exists");
    assert_eq!(
        config.history_capacity,
        Some(1),
        "Should use explicit path, not LOGPANE_CONFIG env var"
    );

    fs::remove_file(explicit_path).ok();
    fs::remove_file(env_path).ok();
}

#[test]
#[serial(logpane_config)]
fn load_config_with_precedence_uses_env_var_when_no_explicit_path() {
    let _guard = EnvGuard::new(CONFIG_ENV_VAR);

    let env_path = env::temp_dir().join("logpane_env_only.toml");
    fs::write(&env_path, "history_capacity = 3\n").expect("Failed to write env config");
    env::set_var(CONFIG_ENV_VAR, &env_path);

    let config = load_config_with_precedence(None)
        .expect("env config should load")
        .expect("env config exists");
    assert_eq!(config.history_capacity, Some(3));

    fs::remove_file(env_path).ok();
}

#[test]
#[serial(logpane_config)]
fn load_config_with_precedence_rejects_empty_env_path() {
    let _guard = EnvGuard::new(CONFIG_ENV_VAR);
    env::set_var(CONFIG_ENV_VAR, "");

    let result = load_config_with_precedence(None);

    assert!(
        matches!(result, Err(ConfigError::InvalidPath(_))),
        "empty LOGPANE_CONFIG should be rejected, got {result:?}"
    );
}

#[test]
fn apply_cli_overrides_no_overrides() {
    let base = ResolvedConfig::default();
    assert_eq!(apply_cli_overrides(base.clone(), None, None, None), base);
}

#[test]
fn apply_cli_overrides_multiple_overrides() {
    let result = apply_cli_overrides(ResolvedConfig::default(), Some(10), Some(false), Some(false));

    assert_eq!(result.history_capacity, 10);
    assert!(!result.line_wrap);
    assert!(!result.follow);
}

#[test]
#[serial(logpane_env)]
fn precedence_chain_full_defaults_to_cli() {
    let _history = EnvGuard::new(HISTORY_ENV_VAR);
    let _wrap = EnvGuard::new(WRAP_ENV_VAR);

    // Config file sets capacity and wrap
    let config_file = ConfigFile {
        history_capacity: Some(100),
        line_wrap: Some(false),
        ..ConfigFile::default()
    };
    let merged = merge_config(Some(config_file));
    assert_eq!(merged.history_capacity, 100);

    // Env overrides capacity
    env::set_var(HISTORY_ENV_VAR, "200");
    let with_env = apply_env_overrides(merged);
    assert_eq!(with_env.history_capacity, 200);
    assert!(!with_env.line_wrap, "File value survives when env is silent");

    // CLI overrides capacity again
    let with_cli = apply_cli_overrides(with_env, Some(300), None, None);
    assert_eq!(with_cli.history_capacity, 300);
    assert!(!with_cli.line_wrap);
}
