/// End-to-end tests for config file loading and CLI option merging.
///
/// Each test runs the binary inside a temporary directory so config
/// auto-discovery only sees the file written by the test.
use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const CONFIG_FILENAME: &str = "repo-cve-scan.config.yml";

fn fixtures_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

fn write_config(path: &Path, content: &str) {
    fs::write(path, content).unwrap();
}

/// Command running in `dir` with the empty fixture as input
fn scan_empty_in(dir: &Path) -> Command {
    let mut cmd = cargo_bin_cmd!("repo-cve-scan");
    cmd.current_dir(dir)
        .env_remove("GREMLIN_SERVER_URL_REST")
        .arg("-i")
        .arg(fixtures_path().join("empty.json"));
    cmd
}

mod auto_discovery_tests {
    use super::*;

    #[test]
    fn test_auto_discovery_applies_format() {
        let dir = TempDir::new().unwrap();
        write_config(&dir.path().join(CONFIG_FILENAME), "format: markdown\n");

        scan_empty_in(dir.path())
            .assert()
            .code(0)
            .stdout(predicate::str::starts_with("# Vulnerability Report"));
    }

    #[test]
    fn test_cli_format_overrides_config() {
        let dir = TempDir::new().unwrap();
        write_config(&dir.path().join(CONFIG_FILENAME), "format: markdown\n");

        scan_empty_in(dir.path())
            .args(["-f", "json"])
            .assert()
            .code(0)
            .stdout("[]\n");
    }

    #[test]
    fn test_no_config_uses_defaults() {
        let dir = TempDir::new().unwrap();

        scan_empty_in(dir.path()).assert().code(0).stdout("[]\n");
    }

    #[test]
    fn test_unknown_field_warns() {
        let dir = TempDir::new().unwrap();
        write_config(
            &dir.path().join(CONFIG_FILENAME),
            "format: json\ncheck_cve: true\n",
        );

        scan_empty_in(dir.path())
            .assert()
            .code(0)
            .stderr(predicate::str::contains(
                "Unknown config field 'check_cve' will be ignored",
            ));
    }

    #[test]
    fn test_config_gremlin_url_used() {
        let dir = TempDir::new().unwrap();
        write_config(
            &dir.path().join(CONFIG_FILENAME),
            "gremlin_url: ftp://from-config\n",
        );

        let mut cmd = cargo_bin_cmd!("repo-cve-scan");
        cmd.current_dir(dir.path())
            .env("GREMLIN_SERVER_URL_REST", "http://127.0.0.1:1")
            .arg("-i")
            .arg(fixtures_path().join("scan.json"))
            .assert()
            .code(3)
            .stderr(predicate::str::contains("ftp://from-config"));
    }
}

mod explicit_config_tests {
    use super::*;

    #[test]
    fn test_explicit_config_path() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join("custom.yml");
        write_config(&config_path, "format: md\n");

        scan_empty_in(dir.path())
            .arg("-c")
            .arg(&config_path)
            .assert()
            .code(0)
            .stdout(predicate::str::starts_with("# Vulnerability Report"));
    }

    #[test]
    fn test_explicit_config_missing() {
        let dir = TempDir::new().unwrap();

        scan_empty_in(dir.path())
            .args(["-c", "missing.yml"])
            .assert()
            .code(3)
            .stderr(predicate::str::contains("Failed to read config file"));
    }

    #[test]
    fn test_invalid_yaml() {
        let dir = TempDir::new().unwrap();
        write_config(
            &dir.path().join(CONFIG_FILENAME),
            "invalid: yaml: [[[broken",
        );

        scan_empty_in(dir.path())
            .assert()
            .code(3)
            .stderr(predicate::str::contains("Failed to parse config file"));
    }

    #[test]
    fn test_invalid_concurrency() {
        let dir = TempDir::new().unwrap();
        write_config(&dir.path().join(CONFIG_FILENAME), "concurrency: 0\n");

        scan_empty_in(dir.path())
            .assert()
            .code(3)
            .stderr(predicate::str::contains("concurrency must be greater than 0"));
    }

    #[test]
    fn test_invalid_membership_filter() {
        let dir = TempDir::new().unwrap();
        write_config(
            &dir.path().join(CONFIG_FILENAME),
            "membership_filter: sometimes\n",
        );

        scan_empty_in(dir.path())
            .assert()
            .code(3)
            .stderr(predicate::str::contains("Invalid membership filter"));
    }
}
