// SPDX-FileCopyrightText: 2025 Joost van der Laan <joost@fashionunited.com>
//
// SPDX-License-Identifier: AGPL-3.0-only

use super::currencies::CurrencyPair;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Body of `GET /v1/latest`
#[derive(Debug, Deserialize)]
#[allow(dead_code)]
pub struct LatestRatesResponse {
    pub amount: Option<f64>,
    pub base: Option<String>,
    pub date: Option<String>,
    pub rates: HashMap<String, f64>,
}

/// Body of `GET /v1/<start>..<end>`. Dates are kept as strings here and
/// parsed when the series is built.
#[derive(Debug, Deserialize)]
#[allow(dead_code)]
pub struct TimeSeriesResponse {
    pub amount: Option<f64>,
    pub base: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub rates: HashMap<String, HashMap<String, f64>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HistoricalRate {
    #[serde(rename = "Date")]
    pub date: NaiveDate,
    #[serde(rename = "Rate")]
    pub rate: f64,
}

/// Daily rates for one pair over the trailing window, ascending by date.
#[derive(Debug, Clone)]
pub struct HistoricalSeries {
    pub pair: CurrencyPair,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub rates: Vec<HistoricalRate>,
}

impl HistoricalSeries {
    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rates.len()
    }

    /// (min, max) of the rates, `None` for an empty series
    pub fn rate_bounds(&self) -> Option<(f64, f64)> {
        let first = self.rates.first()?.rate;
        Some(self.rates.iter().fold((first, first), |(lo, hi), r| {
            (lo.min(r.rate), hi.max(r.rate))
        }))
    }
}

/// Free-text news answer for a pair, shown as-is.
#[derive(Debug, Clone)]
pub struct NewsReport {
    pub pair: CurrencyPair,
    pub text: String,
}

impl NewsReport {
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CurrencyCode;

    fn pair() -> CurrencyPair {
        CurrencyPair::new(CurrencyCode::Usd, CurrencyCode::Eur).unwrap()
    }

    #[test]
    fn test_deserialize_latest_response() {
        let body = r#"{"amount":1.0,"base":"USD","date":"2025-03-14","rates":{"EUR":0.9187}}"#;
        let parsed: LatestRatesResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.rates.get("EUR"), Some(&0.9187));
        assert_eq!(parsed.base.as_deref(), Some("USD"));
    }

    #[test]
    fn test_deserialize_time_series_response() {
        let body = r#"{
            "amount": 1.0,
            "base": "USD",
            "start_date": "2025-03-04",
            "end_date": "2025-03-14",
            "rates": {
                "2025-03-04": {"EUR": 0.9512},
                "2025-03-05": {"EUR": 0.9301}
            }
        }"#;
        let parsed: TimeSeriesResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.rates.len(), 2);
        assert_eq!(parsed.rates["2025-03-05"]["EUR"], 0.9301);
    }

    #[test]
    fn test_rate_bounds() {
        let d = |day| NaiveDate::from_ymd_opt(2025, 3, day).unwrap();
        let series = HistoricalSeries {
            pair: pair(),
            start: d(1),
            end: d(11),
            rates: vec![
                HistoricalRate { date: d(3), rate: 0.93 },
                HistoricalRate { date: d(4), rate: 0.91 },
                HistoricalRate { date: d(5), rate: 0.95 },
            ],
        };
        assert_eq!(series.rate_bounds(), Some((0.91, 0.95)));
        assert_eq!(series.len(), 3);

        let empty = HistoricalSeries { rates: vec![], ..series };
        assert!(empty.is_empty());
        assert_eq!(empty.rate_bounds(), None);
    }

    #[test]
    fn test_blank_report() {
        let report = NewsReport { pair: pair(), text: "  \n".to_string() };
        assert!(report.is_blank());
    }
}
