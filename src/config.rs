//! Configuration file support for repo-cve-scan.
//!
//! Provides YAML-based configuration through `repo-cve-scan.config.yml`
//! files and the resolution of the effective settings from CLI flags, the
//! config file, the environment and built-in defaults.

use anyhow::{bail, Context};
use repo_cve_scan::adapters::outbound::network::{DEFAULT_GREMLIN_URL, DEFAULT_TIMEOUT_SECS};
use repo_cve_scan::application::dto::OutputFormat;
use repo_cve_scan::application::use_cases::DEFAULT_CONCURRENCY;
use repo_cve_scan::shared::Result;
use repo_cve_scan::vulnerability_report::policies::MembershipFilter;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

use crate::cli::Args;

pub const CONFIG_FILENAME: &str = "repo-cve-scan.config.yml";

/// Environment variable holding the Gremlin Server REST endpoint
pub const GREMLIN_URL_ENV: &str = "GREMLIN_SERVER_URL_REST";

/// Top-level configuration file schema.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    pub gremlin_url: Option<String>,
    pub timeout_secs: Option<u64>,
    pub max_retries: Option<u32>,
    pub concurrency: Option<usize>,
    pub format: Option<OutputFormat>,
    pub fail_on_vulnerable: Option<bool>,
    pub membership_filter: Option<String>,
    /// Captures unknown fields for warnings.
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_yaml_ng::Value>,
}

/// Load config from an explicit path. Returns an error if the file is not found.
pub fn load_config_from_path(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path).with_context(|| {
        format!(
            "Failed to read config file: {}\n\n💡 Hint: Check that the file exists and is readable.",
            path.display()
        )
    })?;

    let config: ConfigFile = serde_yaml_ng::from_str(&content).with_context(|| {
        format!(
            "Failed to parse config file: {}\n\n💡 Hint: Ensure the file contains valid YAML syntax.",
            path.display()
        )
    })?;

    validate_config(&config)?;
    warn_unknown_fields(&config);

    Ok(config)
}

/// Auto-discover config in a directory. Returns `None` silently if not found.
pub fn discover_config(dir: &Path) -> Result<Option<ConfigFile>> {
    let config_path = dir.join(CONFIG_FILENAME);

    if !config_path.exists() {
        return Ok(None);
    }

    let config = load_config_from_path(&config_path)?;
    Ok(Some(config))
}

fn validate_config(config: &ConfigFile) -> Result<()> {
    if let Some(ref url) = config.gremlin_url {
        if url.trim().is_empty() {
            bail!(
                "Invalid config: gremlin_url must not be empty.\n\n\
                 💡 Hint: Remove the key to use the default endpoint ({}).",
                DEFAULT_GREMLIN_URL
            );
        }
    }
    if config.timeout_secs == Some(0) {
        bail!("Invalid config: timeout_secs must be greater than 0.");
    }
    if config.concurrency == Some(0) {
        bail!("Invalid config: concurrency must be greater than 0.");
    }
    if let Some(ref filter) = config.membership_filter {
        filter
            .parse::<MembershipFilter>()
            .map_err(|e| anyhow::anyhow!("Invalid config: {}", e))?;
    }
    Ok(())
}

fn warn_unknown_fields(config: &ConfigFile) {
    for key in config.unknown_fields.keys() {
        eprintln!(
            "⚠️  Warning: Unknown config field '{}' will be ignored.",
            key
        );
    }
}

/// Effective settings of one run
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub gremlin_url: String,
    pub timeout: Duration,
    pub max_retries: u32,
    pub concurrency: usize,
    pub format: OutputFormat,
    pub fail_on_vulnerable: bool,
    pub membership_filter: MembershipFilter,
}

impl Settings {
    /// Merges CLI flags, config file and environment, in that order of precedence
    pub fn resolve(args: &Args, config: Option<&ConfigFile>, env_url: Option<String>) -> Result<Self> {
        let config_membership = config
            .and_then(|c| c.membership_filter.as_deref())
            .map(str::parse::<MembershipFilter>)
            .transpose()
            .map_err(|e| anyhow::anyhow!(e))?;

        let gremlin_url = args
            .gremlin_url
            .clone()
            .or_else(|| config.and_then(|c| c.gremlin_url.clone()))
            .or_else(|| env_url.filter(|url| !url.trim().is_empty()))
            .unwrap_or_else(|| DEFAULT_GREMLIN_URL.to_string());

        let timeout_secs = args
            .timeout_secs
            .or_else(|| config.and_then(|c| c.timeout_secs))
            .unwrap_or(DEFAULT_TIMEOUT_SECS);
        if timeout_secs == 0 {
            bail!("--timeout-secs must be greater than 0");
        }

        let concurrency = args
            .concurrency
            .or_else(|| config.and_then(|c| c.concurrency))
            .unwrap_or(DEFAULT_CONCURRENCY);
        if concurrency == 0 {
            bail!("--concurrency must be greater than 0");
        }

        Ok(Self {
            gremlin_url,
            timeout: Duration::from_secs(timeout_secs),
            max_retries: args
                .max_retries
                .or_else(|| config.and_then(|c| c.max_retries))
                .unwrap_or(0),
            concurrency,
            format: args
                .format
                .or_else(|| config.and_then(|c| c.format))
                .unwrap_or_default(),
            fail_on_vulnerable: args.fail_on_vulnerable
                || config.and_then(|c| c.fail_on_vulnerable).unwrap_or(false),
            membership_filter: args
                .membership_filter
                .or(config_membership)
                .unwrap_or_default(),
        })
    }
}
