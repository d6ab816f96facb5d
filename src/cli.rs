use clap::Parser;
use repo_cve_scan::application::dto::OutputFormat;
use repo_cve_scan::vulnerability_report::policies::MembershipFilter;
use std::path::PathBuf;

/// Synchronize repository dependency edges in a Gremlin graph and report known CVEs
#[derive(Parser, Debug)]
#[command(name = "repo-cve-scan")]
#[command(version)]
#[command(
    about = "Synchronize repository dependency edges in a Gremlin graph and report known CVEs",
    long_about = None
)]
pub struct Args {
    /// Scan request file: one {"git-url", "dependencies"} object or an array of them
    #[arg(short, long, value_name = "FILE")]
    pub input: PathBuf,

    /// Output format: json or markdown [default: json]
    #[arg(short, long)]
    pub format: Option<OutputFormat>,

    /// Output file path (if not specified, outputs to stdout)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Path to config file (defaults to ./repo-cve-scan.config.yml when present)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Gremlin Server REST endpoint [env: GREMLIN_SERVER_URL_REST]
    #[arg(long, value_name = "URL")]
    pub gremlin_url: Option<String>,

    /// Request timeout in seconds [default: 30]
    #[arg(long, value_name = "SECONDS")]
    pub timeout_secs: Option<u64>,

    /// Extra attempts for a failed graph synchronization [default: 0]
    #[arg(long, value_name = "N")]
    pub max_retries: Option<u32>,

    /// Number of repositories scanned at once [default: 4]
    #[arg(long, value_name = "N")]
    pub concurrency: Option<usize>,

    /// Which traversal rows may be reported: submitted or disabled [default: submitted]
    #[arg(long, value_name = "FILTER")]
    pub membership_filter: Option<MembershipFilter>,

    /// Exit with code 1 if any vulnerable dependency is reported
    #[arg(long)]
    pub fail_on_vulnerable: bool,
}

impl Args {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
