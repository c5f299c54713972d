// SPDX-FileCopyrightText: 2025 Joost van der Laan <joost@fashionunited.com>
//
// SPDX-License-Identifier: AGPL-3.0-only

use async_trait::async_trait;
use chrono::{Duration as ChronoDuration, NaiveDate};
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

use crate::error::{AppError, Result};
use crate::models::{
    CurrencyPair, HistoricalRate, HistoricalSeries, LatestRatesResponse, TimeSeriesResponse,
};

/// Length of the trailing history window in calendar days
pub const HISTORY_WINDOW_DAYS: i64 = 10;

#[async_trait]
pub trait RateProvider: Send + Sync {
    /// Spot rate: how many `target` units one `base` unit buys.
    async fn get_latest_rate(&self, pair: CurrencyPair) -> Result<f64>;

    /// Daily rates for the window ending at `end` (inclusive).
    async fn get_historical_rates(&self, pair: CurrencyPair, end: NaiveDate)
        -> Result<HistoricalSeries>;
}

/// Client for the Frankfurter exchange-rate API
#[derive(Clone)]
pub struct FrankfurterClient {
    client: Client,
    base_url: String,
}

impl FrankfurterClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::fetch(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self::with_client(client, base_url))
    }

    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    async fn make_request<T: DeserializeOwned>(&self, url: &str, query: &[(&str, &str)]) -> Result<T> {
        debug!("GET {} {:?}", url, query);
        let response = self
            .client
            .get(url)
            .query(query)
            .send()
            .await
            .map_err(|e| AppError::fetch(format!("Failed to send request: {}", e)))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| AppError::fetch(format!("Failed to get response text: {}", e)))?;

        if !status.is_success() {
            return Err(AppError::fetch(format!("API request failed: {} - {}", status, text)));
        }

        serde_json::from_str(&text)
            .map_err(|e| AppError::fetch(format!("Failed to parse response: {}", e)))
    }
}

fn checked_rate(rate: Option<f64>, target: &str, context: &str) -> Result<f64> {
    match rate {
        Some(rate) if rate.is_finite() && rate > 0.0 => Ok(rate),
        Some(rate) => Err(AppError::fetch(format!(
            "Invalid rate {} for {}{}",
            rate, target, context
        ))),
        None => Err(AppError::fetch(format!("No rate for {} in response{}", target, context))),
    }
}

/// Turn the per-date rate map into an ascending series, keeping at most the
/// last `HISTORY_WINDOW_DAYS` dates.
pub fn build_series(
    response: TimeSeriesResponse,
    pair: CurrencyPair,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<HistoricalSeries> {
    let target = pair.target().code();
    let mut rates = Vec::with_capacity(response.rates.len());

    for (date_str, day_rates) in response.rates {
        let date = NaiveDate::parse_from_str(&date_str, "%Y-%m-%d")
            .map_err(|e| AppError::fetch(format!("Invalid date '{}' in response: {}", date_str, e)))?;
        let rate = checked_rate(day_rates.get(target).copied(), target, &format!(" on {}", date_str))?;
        rates.push(HistoricalRate { date, rate });
    }

    rates.sort_by_key(|r| r.date);
    rates.dedup_by_key(|r| r.date);
    let window = HISTORY_WINDOW_DAYS as usize;
    if rates.len() > window {
        rates.drain(..rates.len() - window);
    }

    Ok(HistoricalSeries { pair, start, end, rates })
}

#[async_trait]
impl RateProvider for FrankfurterClient {
    async fn get_latest_rate(&self, pair: CurrencyPair) -> Result<f64> {
        let url = format!("{}/v1/latest", self.base_url);
        let body: LatestRatesResponse = self
            .make_request(&url, &[("base", pair.base().code()), ("symbols", pair.target().code())])
            .await?;

        let target = pair.target().code();
        let rate = checked_rate(body.rates.get(target).copied(), target, "")?;
        debug!("Latest rate {} = {}", pair, rate);
        Ok(rate)
    }

    async fn get_historical_rates(
        &self,
        pair: CurrencyPair,
        end: NaiveDate,
    ) -> Result<HistoricalSeries> {
        let start = end - ChronoDuration::days(HISTORY_WINDOW_DAYS);
        let url = format!(
            "{}/v1/{}..{}",
            self.base_url,
            start.format("%Y-%m-%d"),
            end.format("%Y-%m-%d")
        );
        let body: TimeSeriesResponse = self
            .make_request(&url, &[("base", pair.base().code()), ("symbols", pair.target().code())])
            .await?;

        let series = build_series(body, pair, start, end)?;
        debug!("Fetched {} historical rates for {}", series.len(), pair);
        Ok(series)
    }
}
