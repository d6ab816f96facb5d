use async_trait::async_trait;
use repo_cve_scan::prelude::*;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// Mock GraphStore that fails on demand before delegating to an in-memory graph
///
/// Queued errors are returned one per call, oldest first; once the queue is
/// empty every call reaches the wrapped `InMemoryGraphStore`.
pub struct MockGraphStore {
    inner: InMemoryGraphStore,
    failures: Mutex<VecDeque<GraphStoreError>>,
    calls: AtomicUsize,
}

impl MockGraphStore {
    pub fn new(inner: InMemoryGraphStore) -> Self {
        Self {
            inner,
            failures: Mutex::new(VecDeque::new()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn fail_with(self, error: GraphStoreError) -> Self {
        self.failures.lock().unwrap().push_back(error);
        self
    }

    pub fn inner(&self) -> &InMemoryGraphStore {
        &self.inner
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl GraphStore for MockGraphStore {
    async fn synchronize(
        &self,
        plan: &SyncPlan,
    ) -> std::result::Result<TraversalResult, GraphStoreError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let failure = self.failures.lock().unwrap().pop_front();
        match failure {
            Some(error) => Err(error),
            None => self.inner.synchronize(plan).await,
        }
    }
}
