//! Number provider client.
//!
//! Fetches a batch of integers for one category from the upstream provider.
//! Every failure mode is folded into [`FetchOutcome::Unavailable`]; callers
//! treat that as "no new numbers this round".

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use common::config::UpstreamConfig;
use common::{CategoryId, Error};
use serde::Deserialize;
use tracing::{debug, warn};

/// Body returned by the provider: `{"numbers": [..]}`.
#[derive(Debug, Deserialize)]
pub struct NumbersPayload {
    #[serde(default)]
    pub numbers: Vec<i64>,
}

/// Why a fetch produced nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Unavailable {
    Timeout,
    Transport(String),
    Status(u16),
    Malformed(String),
}

impl fmt::Display for Unavailable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Timeout => write!(f, "timed out"),
            Self::Transport(e) => write!(f, "transport error: {e}"),
            Self::Status(status) => write!(f, "provider returned {status}"),
            Self::Malformed(e) => write!(f, "malformed body: {e}"),
        }
    }
}

/// Result of a single upstream call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    Numbers(Vec<i64>),
    Unavailable(Unavailable),
}

impl FetchOutcome {
    /// Numbers fetched, or an empty batch if the provider was unavailable.
    pub fn into_numbers(self) -> Vec<i64> {
        match self {
            Self::Numbers(numbers) => numbers,
            Self::Unavailable(_) => Vec::new(),
        }
    }
}

/// Anything that can produce a batch of numbers for a category.
#[async_trait]
pub trait NumberSource: Send + Sync {
    async fn fetch(&self, category: CategoryId) -> FetchOutcome;
}

/// HTTP client for the number provider. Single attempt per call, no retries.
#[derive(Debug, Clone)]
pub struct NumbersClient {
    client: reqwest::Client,
    upstream: UpstreamConfig,
}

impl NumbersClient {
    pub fn new(upstream: UpstreamConfig, timeout: Duration) -> Result<Self, Error> {
        let client = reqwest::Client::builder()
            .user_agent("number-window/0.1")
            .pool_max_idle_per_host(4)
            .timeout(timeout)
            .build()
            .map_err(|e| Error::Http(format!("failed to build provider HTTP client: {e}")))?;

        Ok(Self { client, upstream })
    }

    /// Issue one GET for `category` and classify the response.
    pub async fn fetch_numbers(&self, category: CategoryId) -> FetchOutcome {
        let url = self.upstream.url_for(category);

        debug!("Fetching {} numbers: {}", category, url);

        let resp = match self.client.get(url).send().await {
            Ok(resp) => resp,
            Err(e) if e.is_timeout() => return FetchOutcome::Unavailable(Unavailable::Timeout),
            Err(e) => {
                return FetchOutcome::Unavailable(Unavailable::Transport(e.to_string()));
            }
        };

        let status = resp.status().as_u16();
        if status != 200 {
            return FetchOutcome::Unavailable(Unavailable::Status(status));
        }

        match resp.json::<NumbersPayload>().await {
            Ok(payload) => {
                debug!("Got {} numbers for {}", payload.numbers.len(), category);
                FetchOutcome::Numbers(payload.numbers)
            }
            Err(e) if e.is_timeout() => FetchOutcome::Unavailable(Unavailable::Timeout),
            Err(e) => FetchOutcome::Unavailable(Unavailable::Malformed(e.to_string())),
        }
    }
}

#[async_trait]
impl NumberSource for NumbersClient {
    async fn fetch(&self, category: CategoryId) -> FetchOutcome {
        let outcome = self.fetch_numbers(category).await;
        if let FetchOutcome::Unavailable(reason) = &outcome {
            warn!("{} numbers unavailable: {}", category, reason);
        }
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::extract::State;
    use axum::http::StatusCode;
    use axum::routing::get;
    use axum::{Json, Router};
    use serde_json::{json, Value};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    async fn spawn_upstream(app: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind stub upstream");
        let addr = listener.local_addr().expect("local addr");
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("stub upstream");
        });
        format!("http://{addr}")
    }

    fn client_for(base: &str, timeout_ms: u64) -> NumbersClient {
        NumbersClient::new(
            UpstreamConfig::rooted_at(base),
            Duration::from_millis(timeout_ms),
        )
        .expect("client should build")
    }

    #[test]
    fn test_payload_missing_field_is_empty() {
        let payload: NumbersPayload =
            serde_json::from_str(r#"{"other": [1, 2]}"#).expect("should deserialize");
        assert!(payload.numbers.is_empty());
    }

    #[test]
    fn test_payload_rejects_non_integer_numbers() {
        assert!(serde_json::from_str::<NumbersPayload>(r#"{"numbers": "1,2"}"#).is_err());
        assert!(serde_json::from_str::<NumbersPayload>(r#"[1, 2]"#).is_err());
    }

    #[test]
    fn test_unavailable_maps_to_empty() {
        let outcome = FetchOutcome::Unavailable(Unavailable::Status(503));
        assert!(outcome.into_numbers().is_empty());
        assert_eq!(FetchOutcome::Numbers(vec![4, 6]).into_numbers(), vec![4, 6]);
    }

    #[tokio::test]
    async fn test_fetch_success() {
        let app = Router::new().route(
            "/primes",
            get(|| async { Json(json!({"numbers": [2, 3, 5, 7]})) }),
        );
        let base = spawn_upstream(app).await;

        let outcome = client_for(&base, 500).fetch(CategoryId::Primes).await;
        assert_eq!(outcome, FetchOutcome::Numbers(vec![2, 3, 5, 7]));
    }

    #[tokio::test]
    async fn test_fetch_missing_numbers_field() {
        let app = Router::new().route("/even", get(|| async { Json(json!({"other": [1, 2]})) }));
        let base = spawn_upstream(app).await;

        let outcome = client_for(&base, 500).fetch(CategoryId::Even).await;
        assert_eq!(outcome, FetchOutcome::Numbers(vec![]));
    }

    #[tokio::test]
    async fn test_fetch_timeout_is_unavailable() {
        let app = Router::new().route(
            "/rand",
            get(|| async {
                tokio::time::sleep(Duration::from_millis(400)).await;
                Json(json!({"numbers": [9]}))
            }),
        );
        let base = spawn_upstream(app).await;

        let outcome = client_for(&base, 50).fetch(CategoryId::Random).await;
        assert_eq!(outcome, FetchOutcome::Unavailable(Unavailable::Timeout));
    }

    #[tokio::test]
    async fn test_fetch_malformed_body_is_unavailable() {
        let app = Router::new().route("/fibo", get(|| async { "not json" }));
        let base = spawn_upstream(app).await;

        let outcome = client_for(&base, 500).fetch(CategoryId::Fibonacci).await;
        assert!(matches!(
            outcome,
            FetchOutcome::Unavailable(Unavailable::Malformed(_))
        ));
    }

    #[tokio::test]
    async fn test_fetch_connection_refused_is_unavailable() {
        // Bind then drop to get a port nothing listens on.
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind");
        let addr = listener.local_addr().expect("local addr");
        drop(listener);

        let outcome = client_for(&format!("http://{addr}"), 500)
            .fetch(CategoryId::Primes)
            .await;
        assert!(matches!(outcome, FetchOutcome::Unavailable(_)));
        assert!(outcome.into_numbers().is_empty());
    }

    #[tokio::test]
    async fn test_non_200_is_not_retried() {
        let hits = Arc::new(AtomicUsize::new(0));
        let app = Router::new()
            .route(
                "/primes",
                get(|State(hits): State<Arc<AtomicUsize>>| async move {
                    hits.fetch_add(1, Ordering::SeqCst);
                    (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({"numbers": [2]})))
                }),
            )
            .with_state(hits.clone());
        let base = spawn_upstream(app).await;

        let outcome = client_for(&base, 500).fetch(CategoryId::Primes).await;
        assert_eq!(outcome, FetchOutcome::Unavailable(Unavailable::Status(500)));
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_each_category_hits_its_own_endpoint() {
        let app = Router::new()
            .route("/primes", get(|| async { Json(json!({"numbers": [2]})) }))
            .route("/fibo", get(|| async { Json(json!({"numbers": [1]})) }))
            .route("/even", get(|| async { Json(json!({"numbers": [4]})) }))
            .route("/rand", get(|| async { Json::<Value>(json!({"numbers": [7]})) }));
        let base = spawn_upstream(app).await;
        let client = client_for(&base, 500);

        assert_eq!(client.fetch(CategoryId::Primes).await.into_numbers(), vec![2]);
        assert_eq!(client.fetch(CategoryId::Fibonacci).await.into_numbers(), vec![1]);
        assert_eq!(client.fetch(CategoryId::Even).await.into_numbers(), vec![4]);
        assert_eq!(client.fetch(CategoryId::Random).await.into_numbers(), vec![7]);
    }
}
