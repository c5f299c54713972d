// SPDX-FileCopyrightText: 2025 Joost van der Laan <joost@fashionunited.com>
//
// SPDX-License-Identifier: AGPL-3.0-only

use crate::error::{AppError, Result};
use crate::models::CurrencyPair;

/// Smallest amount the converter accepts
pub const MIN_AMOUNT: f64 = 0.01;
pub const DEFAULT_AMOUNT: f64 = 1.0;

pub fn validate_amount(amount: f64) -> Result<f64> {
    if !amount.is_finite() || amount < MIN_AMOUNT {
        return Err(AppError::validation(format!(
            "Amount must be at least {:.2}.",
            MIN_AMOUNT
        )));
    }
    Ok(amount)
}

/// Result of converting `amount` base units at `rate`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Conversion {
    pub pair: CurrencyPair,
    pub amount: f64,
    pub rate: f64,
    pub converted: f64,
}

impl Conversion {
    pub fn new(pair: CurrencyPair, amount: f64, rate: f64) -> Result<Self> {
        let amount = validate_amount(amount)?;
        if !rate.is_finite() || rate <= 0.0 {
            return Err(AppError::fetch(format!("Invalid rate {} for {}", rate, pair)));
        }
        let converted = amount * rate;
        if !converted.is_finite() {
            return Err(AppError::validation(format!(
                "Amount {} is too large to convert to {}.",
                amount,
                pair.target()
            )));
        }
        Ok(Self {
            pair,
            amount,
            rate,
            converted,
        })
    }

    /// e.g. `100.0 USD = 90.0000 EUR`
    pub fn conversion_line(&self) -> String {
        format!(
            "{:?} {} = {:.4} {}",
            self.amount,
            self.pair.base(),
            self.converted,
            self.pair.target()
        )
    }

    /// e.g. `1 USD = 0.9000 EUR`
    pub fn rate_line(&self) -> String {
        format!("1 {} = {:.4} {}", self.pair.base(), self.rate, self.pair.target())
    }
}
