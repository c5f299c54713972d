// SPDX-FileCopyrightText: 2025 Joost van der Laan <joost@fashionunited.com>
//
// SPDX-License-Identifier: AGPL-3.0-only

use std::sync::Arc;
use tracing::{debug, info};

use crate::agent::NewsAgent;
use crate::error::{AppError, Result};
use crate::models::{CurrencyPair, NewsReport};

/// The instruction sent to the agent for a pair
pub fn build_news_prompt(pair: CurrencyPair) -> String {
    let base = pair.base();
    let target = pair.target();
    format!(
        "Find the latest news articles about the {base} and {target}.\n\
         For each article, include:\n\
         1. The title of the article\n\
         2. A brief summary (1-2 sentences)\n\
         3. The source publication name\n\
         4. The URL link to the article if available (if not available, just indicate \"Source: [Publication Name]\")\n\
         \n\
         Format the results as a numbered list with 3-5 recent articles from reputable financial news sources.\n\
         Include only articles that discuss the {base} or {target}."
    )
}

pub struct NewsRetriever {
    agent: Arc<dyn NewsAgent>,
}

impl NewsRetriever {
    pub fn new(agent: Arc<dyn NewsAgent>) -> Self {
        Self { agent }
    }

    /// Ask the agent for news on `pair`. The answer is returned untouched.
    pub async fn fetch_news(&self, pair: CurrencyPair) -> Result<NewsReport> {
        info!("Fetching news for {}", pair);
        let prompt = build_news_prompt(pair);
        let text = self.agent.submit(&prompt).await.map_err(|e| {
            debug!("News agent failed for {}: {}", pair, e);
            match e {
                AppError::Agent(msg) => AppError::Agent(msg),
                other => AppError::Agent(other.to_string()),
            }
        })?;
        Ok(NewsReport { pair, text })
    }
}
