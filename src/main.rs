mod cli;
mod config;

use cli::Args;
use config::{discover_config, load_config_from_path, ConfigFile, Settings, GREMLIN_URL_ENV};
use repo_cve_scan::adapters::outbound::console::StderrProgressReporter;
use repo_cve_scan::adapters::outbound::filesystem::{
    FileSystemReader, FileSystemWriter, StdoutPresenter,
};
use repo_cve_scan::adapters::outbound::network::GremlinGraphStore;
use repo_cve_scan::application::factories::FormatterFactory;
use repo_cve_scan::application::use_cases::ScanRepositoryUseCase;
use repo_cve_scan::ports::outbound::{OutputPresenter, ScanRequestReader};
use repo_cve_scan::shared::error::ExitCode;
use repo_cve_scan::shared::Result;
use repo_cve_scan::vulnerability_report::domain::RepositoryReport;
use repo_cve_scan::vulnerability_report::services::MetadataGenerator;
use std::process;

#[tokio::main]
async fn main() {
    match run().await {
        Ok(exit_code) => process::exit(exit_code.as_i32()),
        Err(e) => {
            eprintln!("\n❌ An error occurred:\n");
            eprintln!("{}", e);

            let mut source = e.source();
            while let Some(err) = source {
                eprintln!("\nCaused by: {}", err);
                source = err.source();
            }

            eprintln!();
            process::exit(ExitCode::ApplicationError.as_i32());
        }
    }
}

async fn run() -> Result<ExitCode> {
    let args = Args::parse_args();

    let config = load_config(&args)?;
    let settings = Settings::resolve(&args, config.as_ref(), std::env::var(GREMLIN_URL_ENV).ok())?;

    let requests = FileSystemReader::new().read_scan_requests(&args.input)?;
    eprintln!(
        "🔍 Scanning {} repositor{} against {}",
        requests.len(),
        if requests.len() == 1 { "y" } else { "ies" },
        settings.gremlin_url
    );

    let graph_store = GremlinGraphStore::new(&settings.gremlin_url, settings.timeout)?;
    let use_case = ScanRepositoryUseCase::new(graph_store, StderrProgressReporter::new())
        .with_membership_filter(settings.membership_filter)
        .with_max_retries(settings.max_retries)
        .with_concurrency(settings.concurrency);

    let total = requests.len();
    let mut reports: Vec<RepositoryReport> = Vec::new();
    let mut failures = Vec::new();
    for outcome in use_case.execute_batch(requests).await {
        match outcome.result {
            Ok(response) => reports.extend(response.reports),
            Err(e) => failures.push(e),
        }
    }

    if failures.len() < total || total == 0 {
        eprintln!("{}", FormatterFactory::progress_message(settings.format));
        let metadata = MetadataGenerator::generate_default_metadata();
        let formatted_output = FormatterFactory::create(settings.format).format(&reports, &metadata)?;

        let presenter: Box<dyn OutputPresenter> = match args.output {
            Some(path) => Box::new(FileSystemWriter::new(path)),
            None => Box::new(StdoutPresenter::new()),
        };
        presenter.present(&formatted_output)?;
    }

    let failed = failures.len();
    if let Some(first) = failures.into_iter().next() {
        return Err(first.context(format!("{} of {} scan(s) failed", failed, total)));
    }

    if settings.fail_on_vulnerable && reports.iter().any(RepositoryReport::has_vulnerabilities) {
        eprintln!("⚠️  Vulnerable dependencies found (--fail-on-vulnerable)");
        return Ok(ExitCode::VulnerabilitiesDetected);
    }

    Ok(ExitCode::Success)
}

/// Explicit `--config` path, or the config file in the working directory
fn load_config(args: &Args) -> Result<Option<ConfigFile>> {
    match args.config {
        Some(ref path) => load_config_from_path(path).map(Some),
        None => discover_config(&std::env::current_dir()?),
    }
}
