// SPDX-FileCopyrightText: 2025 Joost van der Laan <joost@fashionunited.com>
//
// SPDX-License-Identifier: AGPL-3.0-only

use crate::error::AppError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The currencies offered in the selectors, in selector order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CurrencyCode {
    Usd,
    Inr,
    Eur,
    Gbp,
    Jpy,
    Cad,
    Aud,
    Chf,
}

impl CurrencyCode {
    pub const ALL: [CurrencyCode; 8] = [
        CurrencyCode::Usd,
        CurrencyCode::Inr,
        CurrencyCode::Eur,
        CurrencyCode::Gbp,
        CurrencyCode::Jpy,
        CurrencyCode::Cad,
        CurrencyCode::Aud,
        CurrencyCode::Chf,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            CurrencyCode::Usd => "USD",
            CurrencyCode::Inr => "INR",
            CurrencyCode::Eur => "EUR",
            CurrencyCode::Gbp => "GBP",
            CurrencyCode::Jpy => "JPY",
            CurrencyCode::Cad => "CAD",
            CurrencyCode::Aud => "AUD",
            CurrencyCode::Chf => "CHF",
        }
    }

    /// Country or region shown on the currency card
    pub fn country(&self) -> &'static str {
        match self {
            CurrencyCode::Usd => "United States",
            CurrencyCode::Inr => "India",
            CurrencyCode::Eur => "European Union",
            CurrencyCode::Gbp => "United Kingdom",
            CurrencyCode::Jpy => "Japan",
            CurrencyCode::Cad => "Canada",
            CurrencyCode::Aud => "Australia",
            CurrencyCode::Chf => "Switzerland",
        }
    }

    pub fn flag(&self) -> &'static str {
        match self {
            CurrencyCode::Usd => "🇺🇸",
            CurrencyCode::Inr => "🇮🇳",
            CurrencyCode::Eur => "🇪🇺",
            CurrencyCode::Gbp => "🇬🇧",
            CurrencyCode::Jpy => "🇯🇵",
            CurrencyCode::Cad => "🇨🇦",
            CurrencyCode::Aud => "🇦🇺",
            CurrencyCode::Chf => "🇨🇭",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            CurrencyCode::Usd => "$",
            CurrencyCode::Inr => "₹",
            CurrencyCode::Eur => "€",
            CurrencyCode::Gbp => "£",
            CurrencyCode::Jpy => "¥",
            CurrencyCode::Cad => "C$",
            CurrencyCode::Aud => "A$",
            CurrencyCode::Chf => "Fr",
        }
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for CurrencyCode {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_uppercase();
        CurrencyCode::ALL
            .into_iter()
            .find(|c| c.code() == wanted)
            .ok_or_else(|| {
                let supported: Vec<&str> = CurrencyCode::ALL.iter().map(|c| c.code()).collect();
                AppError::validation(format!(
                    "Unsupported currency '{}'. Choose one of: {}",
                    s.trim(),
                    supported.join(", ")
                ))
            })
    }
}

/// A base/target selection that has already passed the "two different
/// currencies" check. Fetchers only accept this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurrencyPair {
    base: CurrencyCode,
    target: CurrencyCode,
}

impl CurrencyPair {
    pub fn new(base: CurrencyCode, target: CurrencyCode) -> Result<Self, AppError> {
        if base == target {
            return Err(AppError::validation("Please select two different currencies."));
        }
        Ok(Self { base, target })
    }

    pub fn base(&self) -> CurrencyCode {
        self.base
    }

    pub fn target(&self) -> CurrencyCode {
        self.target
    }
}

impl fmt::Display for CurrencyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.base, self.target)
    }
}

impl FromStr for CurrencyPair {
    type Err = AppError;

    /// Parses "USD-EUR" or "USD/EUR".
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (base, target) = s
            .split_once(|c: char| c == '-' || c == '/')
            .ok_or_else(|| AppError::validation(format!("Invalid currency pair '{}'. Use e.g. USD-EUR", s)))?;
        CurrencyPair::new(base.parse()?, target.parse()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_catalogue_is_complete() {
        assert_eq!(CurrencyCode::ALL.len(), 8);
        let codes: HashSet<&str> = CurrencyCode::ALL.iter().map(|c| c.code()).collect();
        assert_eq!(codes.len(), 8);
        for code in CurrencyCode::ALL {
            assert_eq!(code.code().len(), 3);
            assert!(!code.country().is_empty());
            assert!(!code.flag().is_empty());
            assert!(!code.symbol().is_empty());
        }
        assert_eq!(CurrencyCode::ALL[0], CurrencyCode::Usd);
        assert_eq!(CurrencyCode::ALL[1], CurrencyCode::Inr);
    }

    #[test]
    fn test_parse_currency_code() {
        assert_eq!("USD".parse::<CurrencyCode>().unwrap(), CurrencyCode::Usd);
        assert_eq!(" eur ".parse::<CurrencyCode>().unwrap(), CurrencyCode::Eur);
        assert_eq!("chf".parse::<CurrencyCode>().unwrap(), CurrencyCode::Chf);
        assert_eq!(CurrencyCode::Jpy.to_string(), "JPY");

        let err = "XYZ".parse::<CurrencyCode>().unwrap_err();
        assert!(err.is_validation());
        assert!(err.to_string().contains("XYZ"));
    }

    #[test]
    fn test_pair_rejects_identical_codes() {
        let err = CurrencyPair::new(CurrencyCode::Gbp, CurrencyCode::Gbp).unwrap_err();
        assert!(err.is_validation());
        assert_eq!(err.to_string(), "Please select two different currencies.");

        let pair = CurrencyPair::new(CurrencyCode::Usd, CurrencyCode::Eur).unwrap();
        assert_eq!(pair.base(), CurrencyCode::Usd);
        assert_eq!(pair.target(), CurrencyCode::Eur);
        assert_eq!(pair.to_string(), "USD-EUR");
    }

    #[test]
    fn test_parse_pair() {
        let pair: CurrencyPair = "usd/inr".parse().unwrap();
        assert_eq!(pair.to_string(), "USD-INR");
        assert!("USD-USD".parse::<CurrencyPair>().is_err());
        assert!("USDEUR".parse::<CurrencyPair>().is_err());
    }
}
