//! Stateless price statistics over a request body.

use chrono::{SecondsFormat, Utc};
use common::Error;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize)]
pub struct PricesInput {
    pub prices: Vec<f64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AverageResponse {
    pub input: Vec<f64>,
    pub result: f64,
    pub count: usize,
    pub timestamp: String,
    pub success: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatisticsResponse {
    pub average: f64,
    pub min: f64,
    pub max: f64,
    pub std_dev: f64,
    pub count: usize,
    pub timestamp: String,
    pub success: bool,
}

fn now_iso() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn mean(prices: &[f64]) -> f64 {
    prices.iter().sum::<f64>() / prices.len() as f64
}

pub fn average_prices(input: PricesInput) -> Result<AverageResponse, Error> {
    if input.prices.is_empty() {
        return Err(Error::InvalidInput("Input data is empty".into()));
    }
    if input.prices.iter().any(|p| *p < 0.0) {
        return Err(Error::InvalidInput(
            "Negative price found in input data".into(),
        ));
    }

    Ok(AverageResponse {
        result: mean(&input.prices),
        count: input.prices.len(),
        input: input.prices,
        timestamp: now_iso(),
        success: true,
    })
}

pub fn price_statistics(input: PricesInput) -> Result<StatisticsResponse, Error> {
    let prices = input.prices;
    if prices.is_empty() {
        return Err(Error::InvalidInput("Input data is empty".into()));
    }

    let average = mean(&prices);
    let min = prices.iter().copied().fold(f64::INFINITY, f64::min);
    let max = prices.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    // Population variance.
    let variance = prices.iter().map(|p| (p - average).powi(2)).sum::<f64>() / prices.len() as f64;

    Ok(StatisticsResponse {
        average,
        min,
        max,
        std_dev: variance.sqrt(),
        count: prices.len(),
        timestamp: now_iso(),
        success: true,
    })
}
