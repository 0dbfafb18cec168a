// tests/unit_config.rs
use std::collections::HashMap;
use std::fs;
use std::time::Duration;

use docgen_core::config::io::{load_toml_config, parse_toml, CONFIG_FILE};
use docgen_core::config::{Config, ENV_API_BASE, ENV_API_KEY, ENV_MODEL};

#[test]
fn test_defaults() {
    let c = Config::new();
    assert_eq!(c.generation.model, "gpt-4o-mini");
    assert_eq!(c.generation.api_base, "https://api.openai.com/v1");
    assert_eq!(c.generation.timeout(), Duration::from_secs(60));
    assert!(c.generation.api_key.is_none());
    assert_eq!(c.output.dir.to_str(), Some("output"));
    assert!(!c.output.replace_existing);
}

#[test]
fn test_load_toml() {
    let d = tempfile::tempdir().unwrap();
    fs::write(
        d.path().join(CONFIG_FILE),
        "[generation]\nmodel = \"local\"\ntimeout_secs = 5\n\n[output]\nreplace_existing = true\n",
    )
    .unwrap();
    let c = load_toml_config(d.path()).unwrap();
    assert_eq!(c.generation.model, "local");
    assert_eq!(c.generation.timeout_secs, 5);
    assert_eq!(c.generation.api_base, "https://api.openai.com/v1");
    assert!(c.output.replace_existing);
}

#[test]
fn test_missing_file_yields_defaults() {
    let d = tempfile::tempdir().unwrap();
    let c = load_toml_config(d.path()).unwrap();
    assert_eq!(c.generation.model, "gpt-4o-mini");
}

#[test]
fn test_api_key_is_never_read_from_file() {
    let c = parse_toml("[generation]\napi_key = \"sk-leak\"\n").unwrap();
    assert!(c.generation.api_key.is_none());
}

#[test]
fn test_malformed_toml_is_a_config_error() {
    let err = parse_toml("[generation\nmodel = 1").unwrap_err();
    assert!(err.to_string().contains(CONFIG_FILE));
}

#[test]
fn test_env_overrides_file() {
    let mut c = parse_toml("[generation]\nmodel = \"from-file\"\n").unwrap();
    let env: HashMap<&str, &str> = HashMap::from([
        (ENV_API_KEY, "sk-test"),
        (ENV_MODEL, "from-env"),
        (ENV_API_BASE, "http://localhost:8080/v1/"),
    ]);
    c.apply_env(|k| env.get(k).map(|v| (*v).to_string()));

    assert_eq!(c.generation.api_key.as_deref(), Some("sk-test"));
    assert_eq!(c.generation.model, "from-env");
    assert_eq!(
        c.generation.endpoint(),
        "http://localhost:8080/v1/chat/completions"
    );
}

#[test]
fn test_blank_env_values_are_ignored() {
    let mut c = Config::new();
    c.apply_env(|k| (k == ENV_MODEL).then(|| "  ".to_string()));
    assert_eq!(c.generation.model, "gpt-4o-mini");
}
