use super::GraphSynchronizer;
use crate::application::dto::{ScanRequest, ScanResponse};
use crate::ports::outbound::{GraphStore, ProgressReporter};
use crate::shared::error::ScanError;
use crate::shared::Result;
use crate::vulnerability_report::domain::{SyncPlan, TraversalResult};
use crate::vulnerability_report::policies::MembershipFilter;
use crate::vulnerability_report::services::ReportAggregator;
use dashmap::DashMap;
use futures::stream::{self, StreamExt};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;

/// Base delay between synchronize retries; attempt `n` waits `n` times this
const RETRY_BACKOFF_MS: u64 = 100;

/// Default number of repositories scanned at once by `execute_batch`
pub const DEFAULT_CONCURRENCY: usize = 4;

/// Result of one request of a batch
#[derive(Debug)]
pub struct ScanOutcome {
    pub repo_url: String,
    pub result: Result<ScanResponse>,
}

/// ScanRepositoryUseCase - synchronize a repository, then report its CVEs
///
/// Guarantees at most one in-flight synchronization per repository URL
/// within this process; different repositories proceed concurrently.
///
/// # Type Parameters
/// * `S` - GraphStore implementation
/// * `PR` - ProgressReporter implementation
pub struct ScanRepositoryUseCase<S: GraphStore, PR: ProgressReporter> {
    synchronizer: GraphSynchronizer<S>,
    progress_reporter: PR,
    membership_filter: MembershipFilter,
    max_retries: u32,
    concurrency: usize,
    repository_locks: DashMap<String, Arc<Mutex<()>>>,
}

impl<S, PR> ScanRepositoryUseCase<S, PR>
where
    S: GraphStore,
    PR: ProgressReporter,
{
    /// Creates a new use case with injected dependencies and default policy
    pub fn new(graph_store: S, progress_reporter: PR) -> Self {
        Self {
            synchronizer: GraphSynchronizer::new(graph_store),
            progress_reporter,
            membership_filter: MembershipFilter::default(),
            max_retries: 0,
            concurrency: DEFAULT_CONCURRENCY,
            repository_locks: DashMap::new(),
        }
    }

    pub fn with_membership_filter(mut self, membership_filter: MembershipFilter) -> Self {
        self.membership_filter = membership_filter;
        self
    }

    /// Extra attempts for a synchronize call that failed at the graph store
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    /// Scans a single repository
    ///
    /// # Errors
    /// Invalid input, graph store failures (after retries) and graph data
    /// anomalies; see `ScanError`.
    pub async fn execute(&self, request: ScanRequest) -> Result<ScanResponse> {
        let plan = SyncPlan::build(&request.repo_url, &request.dependencies)?;
        let repo_url = plan.repo_url().to_string();

        self.progress_reporter.report(&format!(
            "🔗 Synchronizing {} dependency edge(s) for {}",
            plan.edge_count(),
            repo_url
        ));

        let rows = self.synchronize_exclusive(&plan).await?;

        let response_edges = rows.len();
        let skipped = plan.edge_count().saturating_sub(response_edges);
        if skipped > 0 {
            self.progress_reporter.report(&format!(
                "   - {} coordinate(s) have no package version in the graph yet and were skipped",
                skipped
            ));
        }

        let reports =
            ReportAggregator::build_report(&rows, &request.dependencies, self.membership_filter)?;

        let vulnerable: usize = reports.iter().map(|r| r.vulnerable_deps.len()).sum();
        self.progress_reporter.report(&format!(
            "✅ {}: {} vulnerable dependenc{} found",
            repo_url,
            vulnerable,
            if vulnerable == 1 { "y" } else { "ies" }
        ));

        Ok(ScanResponse::new(
            repo_url,
            reports,
            plan.edge_count(),
            response_edges,
        ))
    }

    /// Scans several repositories with bounded concurrency
    ///
    /// Outcomes are returned in input order; one failing repository does
    /// not abort the others.
    pub async fn execute_batch(&self, requests: Vec<ScanRequest>) -> Vec<ScanOutcome> {
        let total = requests.len();
        let completed = AtomicUsize::new(0);
        let completed = &completed;

        stream::iter(requests)
            .map(move |request| async move {
                let repo_url = request.repo_url.trim().to_string();
                let result = self.execute(request).await;

                if let Err(e) = &result {
                    self.progress_reporter
                        .report_error(&format!("❌ Scan failed for {}: {}", repo_url, e));
                }
                let done = completed.fetch_add(1, Ordering::SeqCst) + 1;
                self.progress_reporter
                    .report_progress(done, total, Some(repo_url.as_str()));

                ScanOutcome { repo_url, result }
            })
            .buffered(self.concurrency)
            .collect()
            .await
    }

    /// Runs the synchronization while holding the repository's lock
    async fn synchronize_exclusive(&self, plan: &SyncPlan) -> Result<TraversalResult> {
        let lock = self
            .repository_locks
            .entry(plan.repo_url().to_string())
            .or_default()
            .clone();

        let result = {
            let _guard = lock.lock().await;
            self.synchronize_with_retry(plan).await
        };

        drop(lock);
        self.repository_locks
            .remove_if(plan.repo_url(), |_, lock| Arc::strong_count(lock) == 1);

        result
    }

    async fn synchronize_with_retry(&self, plan: &SyncPlan) -> Result<TraversalResult> {
        let mut attempt: u32 = 0;
        loop {
            match self.synchronizer.synchronize_plan(plan).await {
                Ok(rows) => return Ok(rows),
                Err(e) => {
                    let retryable = e
                        .downcast_ref::<ScanError>()
                        .is_some_and(ScanError::is_retryable);
                    if !retryable || attempt >= self.max_retries {
                        return Err(e);
                    }

                    attempt += 1;
                    self.progress_reporter.report_error(&format!(
                        "⚠️  Warning: synchronization of {} failed, retrying ({}/{})",
                        plan.repo_url(),
                        attempt,
                        self.max_retries
                    ));
                    tokio::time::sleep(Duration::from_millis(RETRY_BACKOFF_MS * attempt as u64))
                        .await;
                }
            }
        }
    }

    /// Number of repositories with a synchronization in flight
    #[cfg(test)]
    fn active_locks(&self) -> usize {
        self.repository_locks.len()
    }
}
