//! Configuration system tests
//!
//! Tests configuration loading, validation, and environment overrides

mod common;

use std::fs;
use std::path::PathBuf;

use family_router::config::{ConsistencyPolicy, OutputFormat, RouterConfig};
use predicates::prelude::*;
use tempfile::TempDir;

use common::router_cmd;

/// Test fixture for configuration testing
struct ConfigFixture {
    _temp_dir: TempDir,
    config_path: PathBuf,
}

impl ConfigFixture {
    fn new() -> Self {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.toml");
        Self {
            _temp_dir: temp_dir,
            config_path,
        }
    }

    fn write_config(&self, content: &str) {
        fs::write(&self.config_path, content).unwrap();
    }

    fn path(&self) -> &str {
        self.config_path.to_str().unwrap()
    }
}

// ─────────────────────────────────────────────────────────────────
// Valid Configuration Tests
// ─────────────────────────────────────────────────────────────────

#[test]
fn test_empty_config() {
    let fixture = ConfigFixture::new();
    fixture.write_config("");

    router_cmd()
        .args(["config", "validate", "--config", fixture.path()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration is valid"));
}

#[test]
fn test_valid_fixture_loads() {
    let path = common::valid_config_fixture();
    let config = RouterConfig::load(path.to_str()).unwrap();

    assert_eq!(config.logging.level, "debug");
    assert_eq!(config.logging.max_files, 3);
    assert_eq!(config.host.consistency, ConsistencyPolicy::Reject);
    assert!(config.host.report_idle);
    assert_eq!(config.host.output, OutputFormat::Json);
}

#[test]
fn test_full_config() {
    let fixture = ConfigFixture::new();
    let log_dir = TempDir::new().unwrap();
    fixture.write_config(&format!(
        r#"
[logging]
level = "warn"
file = "{}"
max_file_size_mb = 5
max_files = 2
json_format = true

[host]
consistency = "ignore"
report_idle = false
output = "text"
"#,
        log_dir.path().join("router.log").display()
    ));

    router_cmd()
        .args(["config", "validate", "--config", fixture.path()])
        .assert()
        .success();
}

// ─────────────────────────────────────────────────────────────────
// Invalid Configuration Tests
// ─────────────────────────────────────────────────────────────────

#[test]
fn test_invalid_fixture_rejected() {
    router_cmd()
        .arg("config")
        .arg("validate")
        .arg("--config")
        .arg(common::invalid_config_fixture())
        .assert()
        .code(10)
        .stderr(predicate::str::contains("E102"));
}

#[test]
fn test_unknown_consistency_policy() {
    let fixture = ConfigFixture::new();
    fixture.write_config("[host]\nconsistency = \"panic\"\n");

    router_cmd()
        .args(["config", "validate", "--config", fixture.path()])
        .assert()
        .code(10)
        .stderr(predicate::str::contains("E101"));
}

#[test]
fn test_zero_max_files_with_file_logging() {
    let fixture = ConfigFixture::new();
    fixture.write_config("[logging]\nfile = \"/tmp/family-router-test.log\"\nmax_files = 0\n");

    router_cmd()
        .args(["config", "validate", "--config", fixture.path()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("max_files"));
}

#[test]
fn test_malformed_toml() {
    let fixture = ConfigFixture::new();
    fixture.write_config("[host\nconsistency = \"warn\"\n");

    router_cmd()
        .args(["config", "validate", "--config", fixture.path()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse configuration"));
}

// ─────────────────────────────────────────────────────────────────
// Config Show / Init Tests
// ─────────────────────────────────────────────────────────────────

#[test]
fn test_config_show_custom() {
    let fixture = ConfigFixture::new();
    fixture.write_config("[host]\nconsistency = \"reject\"\noutput = \"json\"\n");

    router_cmd()
        .args(["config", "show", "--config", fixture.path()])
        .assert()
        .success()
        .stdout(predicate::str::contains("consistency = \"reject\""))
        .stdout(predicate::str::contains("output = \"json\""));
}

#[test]
fn test_config_init_creates_file() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("nested").join("config.toml");

    router_cmd()
        .args(["config", "init", "--path", config_path.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created configuration file"));

    assert!(config_path.exists());

    router_cmd()
        .args(["config", "validate", "--config", config_path.to_str().unwrap()])
        .assert()
        .success();
}

#[test]
fn test_config_init_refuses_overwrite() {
    let fixture = ConfigFixture::new();
    fixture.write_config("[host]\n");

    router_cmd()
        .args(["config", "init", "--path", fixture.path()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn test_config_init_force_overwrite() {
    let fixture = ConfigFixture::new();
    fixture.write_config("[host]\nconsistency = \"ignore\"\n");

    router_cmd()
        .args(["config", "init", "--path", fixture.path(), "--force"])
        .assert()
        .success();

    let content = fs::read_to_string(fixture.path()).unwrap();
    assert!(content.contains("consistency = \"warn\""));
}

// ─────────────────────────────────────────────────────────────────
// Environment Variable Override Tests
// ─────────────────────────────────────────────────────────────────

#[test]
fn test_env_overrides_file() {
    let fixture = ConfigFixture::new();
    fixture.write_config("[host]\nconsistency = \"ignore\"\noutput = \"text\"\n");

    router_cmd()
        .args(["config", "show", "--config", fixture.path()])
        .env("FAMILY_ROUTER_CONSISTENCY", "reject")
        .env("FAMILY_ROUTER_OUTPUT", "json")
        .assert()
        .success()
        .stdout(predicate::str::contains("consistency = \"reject\""))
        .stdout(predicate::str::contains("output = \"json\""));
}

#[test]
fn test_env_invalid_value() {
    router_cmd()
        .args(["config", "validate"])
        .env("FAMILY_ROUTER_OUTPUT", "yaml")
        .assert()
        .code(10)
        .stderr(predicate::str::contains("Unknown output format"));
}

#[test]
fn test_config_path_from_env() {
    let fixture = ConfigFixture::new();
    fixture.write_config("[host]\nreport_idle = true\n");

    router_cmd()
        .args(["replay", "--input", &common::fixture_arg("guardian_onboarding.jsonl")])
        .env("FAMILY_ROUTER_CONFIG", fixture.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("#1 hold (loading)"));
}

#[test]
fn test_log_file_written() {
    let fixture = ConfigFixture::new();
    let log_dir = TempDir::new().unwrap();
    fixture.write_config(&format!(
        "[logging]\nlevel = \"info\"\nfile = \"{}\"\n",
        log_dir.path().join("router.log").display()
    ));

    router_cmd()
        .args(["replay", "--config", fixture.path(), "--input", &common::fixture_arg("guardian_onboarding.jsonl")])
        .assert()
        .success();

    let names: Vec<String> = fs::read_dir(log_dir.path())
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert!(!names.is_empty(), "rolling appender should create a log file");
    for name in &names {
        assert!(name.starts_with("router.") && name.ends_with(".log"), "{}", name);
        assert!(!name.starts_with("router.log."), "extension repeated: {}", name);
    }
}
