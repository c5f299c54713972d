// SPDX-FileCopyrightText: 2025 Joost van der Laan <joost@fashionunited.com>
//
// SPDX-License-Identifier: AGPL-3.0-only

use thiserror::Error;

/// Every failure a user action can run into. None of them end the process;
/// the presentation layer turns each one into a single inline line.
#[derive(Debug, Error)]
pub enum AppError {
    /// Network failure, non-2xx status or a missing field in a Frankfurter response.
    #[error("Error fetching currency data: {0}")]
    Fetch(String),

    /// The news agent (or anything it called) failed.
    #[error("Error fetching news with agent: {0}")]
    Agent(String),

    #[error("{0}")]
    Validation(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Error rendering output: {0}")]
    Chart(String),
}

impl AppError {
    pub fn fetch(msg: impl Into<String>) -> Self {
        AppError::Fetch(msg.into())
    }

    pub fn agent(msg: impl Into<String>) -> Self {
        AppError::Agent(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        AppError::Validation(msg.into())
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, AppError::Validation(_))
    }
}

pub type Result<T, E = AppError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = AppError::fetch("HTTP 404");
        assert_eq!(err.to_string(), "Error fetching currency data: HTTP 404");

        let err = AppError::agent("quota exceeded");
        assert_eq!(err.to_string(), "Error fetching news with agent: quota exceeded");

        let err = AppError::validation("Please select two different currencies.");
        assert_eq!(err.to_string(), "Please select two different currencies.");
        assert!(err.is_validation());
        assert!(!AppError::fetch("x").is_validation());
    }
}
