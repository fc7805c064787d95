//! Tests for configuration file loading.

use super::*;
use serial_test::serial;
use std::collections::HashMap;
use std::env;
use std::fs;

fn write_temp(name: &str, contents: &str) -> PathBuf {
    let path = env::temp_dir().join(format!("picseek_{}_{}.toml", name, std::process::id()));
    fs::write(&path, contents).expect("Failed to write test config");
    path
}

fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |name| map.get(name).cloned()
}

// ===== Paths =====

#[test]
fn default_config_path_ends_with_picseek_config_toml() {
    if let Some(path) = default_config_path() {
        let path_str = path.to_string_lossy();
        assert!(
            path_str.contains("picseek") && path_str.ends_with("config.toml"),
            "Path should contain 'picseek' and end with 'config.toml', got: {}",
            path_str
        );
    }
}

#[test]
fn default_log_path_ends_with_picseek_log() {
    let path = default_log_path();
    assert!(
        path.ends_with("picseek.log"),
        "Log path should end with picseek.log, got: {}",
        path.display()
    );
}

// ===== load_config_file =====

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
    let config_path = write_temp(
        "valid",
        r#"
default_query = "mountains"
api_key = "abc123"
base_url = "http://localhost:9999/api/"
per_page = 30
request_timeout_secs = 3
notice_duration_secs = 8
log_file_path = "/tmp/picseek-test.log"
"#,
    );

    let config = load_config_file(&config_path)
        .expect("Should parse valid TOML")
        .expect("Should return Some(ConfigFile) for existing file");

    assert_eq!(config.default_query.as_deref(), Some("mountains"));
    assert_eq!(config.api_key.as_deref(), Some("abc123"));
    assert_eq!(config.base_url.as_deref(), Some("http://localhost:9999/api/"));
    assert_eq!(config.per_page, Some(30));
    assert_eq!(config.request_timeout_secs, Some(3));
    assert_eq!(config.notice_duration_secs, Some(8));
    assert_eq!(
        config.log_file_path,
        Some(PathBuf::from("/tmp/picseek-test.log"))
    );

    fs::remove_file(config_path).ok();
}

#[test]
fn load_config_file_returns_error_for_invalid_toml() {
    let config_path = write_temp("invalid", "this is not valid TOML ][}{");

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
    let config_path = write_temp("unknown", "theme = \"dark\"\n");

    let result = load_config_file(&config_path);

    assert!(
        matches!(result, Err(ConfigError::ParseError { .. })),
        "Unknown keys should be rejected, got {:?}",
        result
    );

    fs::remove_file(config_path).ok();
}

#[test]
fn load_config_file_handles_partial_config() {
    let config_path = write_temp("partial", "per_page = 50\n# Other fields omitted\n");

    let config = load_config_file(&config_path).unwrap().unwrap();

    assert_eq!(config.per_page, Some(50));
    assert_eq!(config.api_key, None);
    assert_eq!(config.default_query, None);

    fs::remove_file(config_path).ok();
}

#[test]
fn load_config_file_returns_read_error_for_directory() {
    let dir = env::temp_dir();

    let result = load_config_file(&dir);

    assert!(
        matches!(result, Err(ConfigError::ReadError { .. })),
        "Reading a directory should fail, got {:?}",
        result
    );
}

// ===== merge_config =====

#[test]
fn merge_config_without_file_uses_defaults() {
    let config = merge_config(None);
    assert_eq!(config, ResolvedConfig::default());
    assert_eq!(config.default_query, "love");
    assert_eq!(config.per_page, 12);
    assert_eq!(config.base_url, DEFAULT_BASE_URL);
    assert_eq!(config.api_key, None);
}

#[test]
fn merge_config_prefers_file_values() {
    let file = ConfigFile {
        default_query: Some("sea".to_string()),
        per_page: Some(40),
        ..ConfigFile::default()
    };

    let config = merge_config(Some(file));

    assert_eq!(config.default_query, "sea");
    assert_eq!(config.per_page, 40);
    assert_eq!(config.request_timeout_secs, 10, "Unset keys keep defaults");
}

#[test]
fn merge_config_ignores_blank_api_key() {
    let file = ConfigFile {
        api_key: Some("  ".to_string()),
        ..ConfigFile::default()
    };

    assert_eq!(merge_config(Some(file)).api_key, None);
}

// ===== Environment overrides =====

#[test]
fn env_api_key_overrides_file() {
    let base = ResolvedConfig {
        api_key: Some("from-file".to_string()),
        ..ResolvedConfig::default()
    };

    let config = apply_env_overrides_from(base, lookup_from(&[("PICSEEK_API_KEY", "from-env")]));

    assert_eq!(config.api_key.as_deref(), Some("from-env"));
}

#[test]
fn pixabay_api_key_is_fallback() {
    let config = apply_env_overrides_from(
        ResolvedConfig::default(),
        lookup_from(&[("PIXABAY_API_KEY", "fallback")]),
    );
    assert_eq!(config.api_key.as_deref(), Some("fallback"));

    let config = apply_env_overrides_from(
        ResolvedConfig::default(),
        lookup_from(&[("PIXABAY_API_KEY", "fallback"), ("PICSEEK_API_KEY", "primary")]),
    );
    assert_eq!(config.api_key.as_deref(), Some("primary"));
}

#[test]
fn blank_env_values_are_ignored() {
    let base = ResolvedConfig {
        api_key: Some("keep".to_string()),
        ..ResolvedConfig::default()
    };

    let config = apply_env_overrides_from(
        base,
        lookup_from(&[("PICSEEK_API_KEY", ""), ("PICSEEK_DEFAULT_QUERY", "   ")]),
    );

    assert_eq!(config.api_key.as_deref(), Some("keep"));
    assert_eq!(config.default_query, "love");
}

#[test]
fn env_default_query_override() {
    let config = apply_env_overrides_from(
        ResolvedConfig::default(),
        lookup_from(&[("PICSEEK_DEFAULT_QUERY", "forest")]),
    );
    assert_eq!(config.default_query, "forest");
}

// ===== CLI overrides =====

#[test]
fn cli_overrides_take_precedence() {
    let base = ResolvedConfig {
        api_key: Some("env".to_string()),
        ..ResolvedConfig::default()
    };

    let config = apply_cli_overrides(
        base,
        Some("cats".to_string()),
        Some("cli".to_string()),
        Some(100),
    );

    assert_eq!(config.default_query, "cats");
    assert_eq!(config.api_key.as_deref(), Some("cli"));
    assert_eq!(config.per_page, 100);
}

#[test]
fn cli_without_flags_changes_nothing() {
    let base = ResolvedConfig::default();
    let config = apply_cli_overrides(base.clone(), None, None, None);
    assert_eq!(config, base);
}

// ===== validate =====

#[test]
fn defaults_are_valid() {
    assert_eq!(ResolvedConfig::default().validate(), Ok(()));
}

#[test]
fn per_page_bounds_are_inclusive() {
    for ok in [3, 200] {
        let config = ResolvedConfig {
            per_page: ok,
            ..ResolvedConfig::default()
        };
        assert_eq!(config.validate(), Ok(()), "per_page={} should be valid", ok);
    }
    for bad in [0, 2, 201] {
        let config = ResolvedConfig {
            per_page: bad,
            ..ResolvedConfig::default()
        };
        assert!(
            matches!(
                config.validate(),
                Err(ConfigError::InvalidValue { field: "per_page", .. })
            ),
            "per_page={} should be rejected",
            bad
        );
    }
}

#[test]
fn blank_default_query_is_rejected() {
    let config = ResolvedConfig {
        default_query: " ".to_string(),
        ..ResolvedConfig::default()
    };
    assert!(matches!(
        config.validate(),
        Err(ConfigError::InvalidValue {
            field: "default_query",
            ..
        })
    ));
}

#[test]
fn zero_timeout_is_rejected() {
    let config = ResolvedConfig {
        request_timeout_secs: 0,
        ..ResolvedConfig::default()
    };
    assert!(config.validate().is_err());
}

#[test]
fn huge_timeout_is_rejected() {
    let config = ResolvedConfig {
        request_timeout_secs: u64::MAX,
        ..ResolvedConfig::default()
    };
    assert!(matches!(
        config.validate(),
        Err(ConfigError::InvalidValue {
            field: "request_timeout_secs",
            ..
        })
    ));
}

#[test]
fn huge_notice_duration_from_file_is_rejected() {
    let file: ConfigFile = toml::from_str("notice_duration_secs = 9223372036854775807")
        .expect("value fits in the field type");
    let config = merge_config(Some(file));

    assert!(matches!(
        config.validate(),
        Err(ConfigError::InvalidValue {
            field: "notice_duration_secs",
            ..
        })
    ));
}

#[test]
fn duration_bounds_are_inclusive() {
    for (timeout, notice) in [(1, 1), (300, 3600)] {
        let config = ResolvedConfig {
            request_timeout_secs: timeout,
            notice_duration_secs: notice,
            ..ResolvedConfig::default()
        };
        assert_eq!(config.validate(), Ok(()));
    }

    let config = ResolvedConfig {
        notice_duration_secs: 3601,
        ..ResolvedConfig::default()
    };
    assert!(config.validate().is_err());
}

#[test]
fn invalid_value_message_names_field() {
    let err = ConfigError::InvalidValue {
        field: "per_page",
        reason: "500 is outside 3..=200".to_string(),
    };
    assert_eq!(
        err.to_string(),
        "Invalid value for per_page: 500 is outside 3..=200"
    );
}

// ===== Precedence =====

#[test]
#[serial(picseek_config)]
fn explicit_path_wins_over_env_var() {
    let explicit = write_temp("explicit", "per_page = 21\n");
    let from_env = write_temp("from_env", "per_page = 42\n");
    env::set_var("PICSEEK_CONFIG", &from_env);

    let config = load_config_with_precedence(Some(explicit.clone()))
        .unwrap()
        .unwrap();

    env::remove_var("PICSEEK_CONFIG");
    assert_eq!(config.per_page, Some(21));

    fs::remove_file(explicit).ok();
    fs::remove_file(from_env).ok();
}

#[test]
#[serial(picseek_config)]
fn env_var_path_is_used_without_explicit_path() {
    let from_env = write_temp("env_only", "per_page = 42\n");
    env::set_var("PICSEEK_CONFIG", &from_env);

    let config = load_config_with_precedence(None).unwrap().unwrap();

    env::remove_var("PICSEEK_CONFIG");
    assert_eq!(config.per_page, Some(42));

    fs::remove_file(from_env).ok();
}

#[test]
#[serial(picseek_config)]
fn env_var_pointing_to_missing_file_is_not_an_error() {
    env::set_var("PICSEEK_CONFIG", "/nonexistent/picseek/config.toml");

    let result = load_config_with_precedence(None);

    env::remove_var("PICSEEK_CONFIG");
    assert_eq!(result, Ok(None));
}
