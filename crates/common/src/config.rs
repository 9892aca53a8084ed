//! Service configuration types.

use serde::{Deserialize, Serialize};

use crate::types::CategoryId;

/// Top-level service configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Address the HTTP listener binds to.
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    /// Maximum number of unique values retained in the window.
    #[serde(default = "default_window_size")]
    pub window_size: usize,

    /// Upper bound on a single upstream fetch, in milliseconds.
    #[serde(default = "default_fetch_timeout_ms")]
    pub fetch_timeout_ms: u64,

    /// Upstream provider endpoints, one per category.
    #[serde(default)]
    pub upstream: UpstreamConfig,
}

/// Provider URL for each number category.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpstreamConfig {
    #[serde(default = "default_primes_url")]
    pub primes_url: String,

    #[serde(default = "default_fibonacci_url")]
    pub fibonacci_url: String,

    #[serde(default = "default_even_url")]
    pub even_url: String,

    #[serde(default = "default_random_url")]
    pub random_url: String,
}

impl UpstreamConfig {
    /// URL configured for a category.
    pub fn url_for(&self, category: CategoryId) -> &str {
        match category {
            CategoryId::Primes => &self.primes_url,
            CategoryId::Fibonacci => &self.fibonacci_url,
            CategoryId::Even => &self.even_url,
            CategoryId::Random => &self.random_url,
        }
    }

    /// Same URL table with every endpoint rooted at `base` (e.g. a local stub).
    pub fn rooted_at(base: &str) -> Self {
        let base = base.trim_end_matches('/');
        Self {
            primes_url: format!("{base}/primes"),
            fibonacci_url: format!("{base}/fibo"),
            even_url: format!("{base}/even"),
            random_url: format!("{base}/rand"),
        }
    }
}

// ── Defaults ──────────────────────────────────────────────────────────

const DEFAULT_PROVIDER_BASE: &str = "http://20.244.56.144/test";

fn default_bind_addr() -> String {
    "0.0.0.0:9876".into()
}
fn default_window_size() -> usize {
    10
}
fn default_fetch_timeout_ms() -> u64 {
    500
}
fn default_primes_url() -> String {
    format!("{DEFAULT_PROVIDER_BASE}/primes")
}
fn default_fibonacci_url() -> String {
    format!("{DEFAULT_PROVIDER_BASE}/fibo")
}
fn default_even_url() -> String {
    format!("{DEFAULT_PROVIDER_BASE}/even")
}
fn default_random_url() -> String {
    format!("{DEFAULT_PROVIDER_BASE}/rand")
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            primes_url: default_primes_url(),
            fibonacci_url: default_fibonacci_url(),
            even_url: default_even_url(),
            random_url: default_random_url(),
        }
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            window_size: default_window_size(),
            fetch_timeout_ms: default_fetch_timeout_ms(),
            upstream: UpstreamConfig::default(),
        }
    }
}
