// SPDX-FileCopyrightText: 2025 Joost van der Laan <joost@fashionunited.com>
//
// SPDX-License-Identifier: AGPL-3.0-only

use async_trait::async_trait;
use tracing::{debug, info};

use crate::api::serper_client::format_results;
use crate::api::{GeminiClient, SerperClient};
use crate::config::{Config, Credentials, SearchBackend};
use crate::error::{AppError, Result};

/// Text in, text out. Whatever searching or reasoning happens behind this
/// call is the implementation's business.
#[async_trait]
pub trait NewsAgent: Send + Sync {
    async fn submit(&self, prompt: &str) -> Result<String>;
}

enum Search {
    Google,
    Serper(SerperClient),
}

/// News agent backed by Gemini, searching either through Gemini's Google
/// Search grounding or through Serper.
pub struct GeminiNewsAgent {
    gemini: GeminiClient,
    search: Search,
}

impl GeminiNewsAgent {
    pub fn new(config: &Config, credentials: &Credentials) -> Result<Self> {
        let gemini = GeminiClient::new(
            config.gemini_host.clone(),
            credentials.google_api_key.clone(),
            config.gemini_model.clone(),
            config.temperature,
            config.agent_timeout(),
        )?;
        let serper = match config.search_backend {
            SearchBackend::Google => None,
            SearchBackend::Serper => Some(SerperClient::new(
                config.serper_host.clone(),
                credentials.serper_api_key.clone(),
                config.request_timeout(),
            )?),
        };
        Ok(Self::with_clients(gemini, serper))
    }

    pub fn with_clients(gemini: GeminiClient, serper: Option<SerperClient>) -> Self {
        let search = match serper {
            Some(client) => Search::Serper(client),
            None => Search::Google,
        };
        Self { gemini, search }
    }

    async fn submit_with_serper(&self, serper: &SerperClient, prompt: &str) -> Result<String> {
        let query_prompt = format!(
            "Write one concise web search query (max 10 words) that would find material for the \
             following task. Reply with the query only, no quotes or explanation.\n\nTask:\n{}",
            prompt
        );
        let query = self.gemini.generate(&query_prompt, false).await?;
        let query = query
            .lines()
            .map(|l| l.trim().trim_matches('"').trim())
            .find(|l| !l.is_empty())
            .unwrap_or_default()
            .to_string();
        if query.is_empty() {
            return Err(AppError::agent("model produced an empty search query"));
        }
        info!("Searching the web for: {}", query);

        let results = serper.search(&query).await?;
        debug!("Search returned {} results", results.len());

        let answer_prompt = format!(
            "{}\n\nUse only the following web search results (query: \"{}\"):\n{}",
            prompt,
            query,
            format_results(&results)
        );
        self.gemini.generate(&answer_prompt, false).await
    }
}

#[async_trait]
impl NewsAgent for GeminiNewsAgent {
    async fn submit(&self, prompt: &str) -> Result<String> {
        debug!("Submitting prompt to {}", self.gemini.model());
        match &self.search {
            Search::Google => self.gemini.generate(prompt, true).await,
            Search::Serper(serper) => self.submit_with_serper(serper, prompt).await,
        }
    }
}
