//! Domain types shared between the fetcher, the window engine and the HTTP layer.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::Error;

// ── Category ──────────────────────────────────────────────────────────

/// Number sequence served by the upstream provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryId {
    Primes,
    Fibonacci,
    Even,
    Random,
}

impl CategoryId {
    pub const ALL: [CategoryId; 4] = [
        CategoryId::Primes,
        CategoryId::Fibonacci,
        CategoryId::Even,
        CategoryId::Random,
    ];

    /// Single-character token used in request paths.
    pub fn token(&self) -> &'static str {
        match self {
            Self::Primes => "p",
            Self::Fibonacci => "f",
            Self::Even => "e",
            Self::Random => "r",
        }
    }
}

impl FromStr for CategoryId {
    type Err = Error;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw {
            "p" => Ok(Self::Primes),
            "f" => Ok(Self::Fibonacci),
            "e" => Ok(Self::Even),
            "r" => Ok(Self::Random),
            other => Err(Error::InvalidCategory(other.to_string())),
        }
    }
}

impl fmt::Display for CategoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

// ── Responses ─────────────────────────────────────────────────────────

/// Before/after view of the window for one aggregation request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WindowReport {
    pub previous_window_state: Vec<i64>,
    pub current_window_state: Vec<i64>,
    pub fetched_numbers: Vec<i64>,
    pub average: f64,
}

/// Mean of `values` rounded half-to-even to two decimals; `0.0` for an empty window.
pub fn window_average(values: &[i64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let sum: f64 = values.iter().map(|v| *v as f64).sum();
    round2(sum / values.len() as f64)
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_tokens() {
        for category in CategoryId::ALL {
            let parsed: CategoryId = category.token().parse().expect("token should parse");
            assert_eq!(parsed, category);
        }
    }

    #[test]
    fn test_parse_rejects_unknown_token() {
        let err = "x".parse::<CategoryId>().unwrap_err();
        assert!(matches!(err, Error::InvalidCategory(ref t) if t == "x"));
        assert!(err.is_client_error());
        assert!("P".parse::<CategoryId>().is_err());
        assert!("primes".parse::<CategoryId>().is_err());
        assert!("".parse::<CategoryId>().is_err());
    }

    #[test]
    fn test_window_average() {
        assert_eq!(window_average(&[]), 0.0);
        assert_eq!(window_average(&[2, 4]), 3.0);
        assert_eq!(window_average(&[1, 2, 2]), 1.67);
        assert_eq!(window_average(&[1, 1, 2]), 1.33);
        assert_eq!(window_average(&[-3, 3]), 0.0);
    }

    #[test]
    fn test_window_average_ties_round_to_even() {
        // 1/8 and 5/8 are exact binary ties at the third decimal.
        assert_eq!(window_average(&[0, 0, 0, 0, 0, 0, 0, 1]), 0.12);
        assert_eq!(window_average(&[0, 0, 0, 0, 0, 1, 2, 2]), 0.62);
        assert_eq!(window_average(&[0, 0, 0, 0, 0, 0, 1, 2]), 0.38);
    }

    #[test]
    fn test_report_serializes_camel_case() {
        let report = WindowReport {
            previous_window_state: vec![1],
            current_window_state: vec![1, 2],
            fetched_numbers: vec![2],
            average: 1.5,
        };
        let value = serde_json::to_value(&report).expect("serialize");
        assert_eq!(value["previousWindowState"], serde_json::json!([1]));
        assert_eq!(value["currentWindowState"], serde_json::json!([1, 2]));
        assert_eq!(value["fetchedNumbers"], serde_json::json!([2]));
        assert_eq!(value["average"], serde_json::json!(1.5));
    }
}
