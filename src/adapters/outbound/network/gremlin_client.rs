use super::gremlin_protocol::{decode_response, error_message, GremlinRequest};
use crate::ports::outbound::GraphStore;
use crate::shared::error::{GraphStoreError, ScanError};
use crate::shared::Result;
use crate::vulnerability_report::domain::{SyncPlan, TraversalResult};
use async_trait::async_trait;
use std::time::Duration;

/// Default Gremlin Server REST endpoint
pub const DEFAULT_GREMLIN_URL: &str = "http://localhost:8182";

/// Default request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// GremlinGraphStore adapter talking to a Gremlin Server over HTTP
///
/// Each synchronization is one POST of a parameterized script, so the server
/// evaluates the whole protocol in a single transaction.
pub struct GremlinGraphStore {
    client: reqwest::Client,
    endpoint: String,
}

impl GremlinGraphStore {
    /// Creates a store for `endpoint` with a per-request `timeout`
    ///
    /// # Errors
    /// Returns `Validation` when the endpoint is not an http(s) URL.
    pub fn new(endpoint: &str, timeout: Duration) -> Result<Self> {
        let endpoint = endpoint.trim().trim_end_matches('/');
        if !(endpoint.starts_with("http://") || endpoint.starts_with("https://")) {
            return Err(ScanError::Validation {
                message: format!(
                    "Gremlin endpoint must start with http:// or https://, got '{}'",
                    endpoint
                ),
            }
            .into());
        }

        let user_agent = format!("repo-cve-scan/{}", env!("CARGO_PKG_VERSION"));
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()?;

        Ok(Self {
            client,
            endpoint: endpoint.to_string(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl GraphStore for GremlinGraphStore {
    async fn synchronize(
        &self,
        plan: &SyncPlan,
    ) -> std::result::Result<TraversalResult, GraphStoreError> {
        let request = GremlinRequest::for_plan(plan);

        let response = self
            .client
            .post(&self.endpoint)
            .json(&request)
            .send()
            .await
            .map_err(|e| GraphStoreError::Transport(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| GraphStoreError::Transport(e.to_string()))?;

        if !status.is_success() {
            return Err(GraphStoreError::Status {
                code: status.as_u16(),
                message: error_message(&body),
            });
        }

        decode_response(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vulnerability_report::domain::DependencyList;

    #[test]
    fn test_new_normalizes_endpoint() {
        let store = GremlinGraphStore::new(" http://localhost:8182/ ", Duration::from_secs(5)).unwrap();
        assert_eq!(store.endpoint(), "http://localhost:8182");
    }

    #[test]
    fn test_new_rejects_non_http_endpoint() {
        let err = GremlinGraphStore::new("ws://localhost:8182/gremlin", Duration::from_secs(5))
            .err()
            .unwrap();
        assert!(matches!(
            err.downcast_ref::<ScanError>(),
            Some(ScanError::Validation { .. })
        ));
    }

    #[tokio::test]
    async fn test_unreachable_server_is_transport_error() {
        let store = GremlinGraphStore::new("http://127.0.0.1:1", Duration::from_secs(2)).unwrap();
        let plan = SyncPlan::build("github.com/x/y", &DependencyList::default()).unwrap();

        let result = store.synchronize(&plan).await;
        assert!(matches!(result, Err(GraphStoreError::Transport(_))));
    }
}
