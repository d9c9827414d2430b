//! Common test utilities and fixtures
//!
//! Shared by the integration test binaries; not every binary uses every helper.

#![allow(dead_code)]

use std::fs;
use std::path::PathBuf;

use family_router::types::AuthState;

/// Get the path to the test fixtures directory
pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
}

/// Get a path to a specific fixture file
pub fn fixture_path(name: &str) -> PathBuf {
    fixtures_dir().join(name)
}

/// Fixture path as a CLI argument
pub fn fixture_arg(name: &str) -> String {
    fixture_path(name).to_string_lossy().into_owned()
}

/// Get the valid config fixture path
pub fn valid_config_fixture() -> PathBuf {
    fixture_path("valid_config.toml")
}

/// Get the invalid config fixture path
pub fn invalid_config_fixture() -> PathBuf {
    fixture_path("invalid_config.toml")
}

/// Decode a single-snapshot fixture
pub fn load_snapshot(name: &str) -> AuthState {
    let text = fs::read_to_string(fixture_path(name)).unwrap();
    family_router::host::parse_snapshot(&text).unwrap()
}

/// A `family-router` command isolated from the developer's environment
pub fn router_cmd() -> assert_cmd::Command {
    let mut cmd = assert_cmd::Command::cargo_bin("family-router").unwrap();
    for var in [
        "FAMILY_ROUTER_CONFIG",
        "FAMILY_ROUTER_LOG_LEVEL",
        "FAMILY_ROUTER_LOG_FILE",
        "FAMILY_ROUTER_LOG_JSON",
        "FAMILY_ROUTER_CONSISTENCY",
        "FAMILY_ROUTER_REPORT_IDLE",
        "FAMILY_ROUTER_OUTPUT",
        "RUST_LOG",
    ] {
        cmd.env_remove(var);
    }
    cmd
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixtures_dir_exists() {
        assert!(fixtures_dir().exists(), "Fixtures directory should exist");
    }

    #[test]
    fn test_config_fixtures_exist() {
        assert!(valid_config_fixture().exists());
        assert!(invalid_config_fixture().exists());
    }
}
