// SPDX-FileCopyrightText: 2025 Joost van der Laan <joost@fashionunited.com>
//
// SPDX-License-Identifier: AGPL-3.0-only

use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;
use tracing::debug;

use crate::error::{AppError, Result};

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct SearchResult {
    pub title: String,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub snippet: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SerperResponse {
    #[serde(default)]
    news: Vec<SearchResult>,
    #[serde(default, rename = "topStories")]
    top_stories: Vec<SearchResult>,
    #[serde(default)]
    organic: Vec<SearchResult>,
}

/// Google search through serper.dev
#[derive(Clone)]
pub struct SerperClient {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl SerperClient {
    pub fn new(base_url: impl Into<String>, api_key: Option<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::agent(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key,
        })
    }

    /// Run one query. News hits come first, then top stories, then organic
    /// results.
    pub async fn search(&self, query: &str) -> Result<Vec<SearchResult>> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| AppError::agent("SERPER_API_KEY is not set"))?;

        let url = format!("{}/search", self.base_url);
        debug!("Serper search: {}", query);

        let response = self
            .client
            .post(&url)
            .header("X-API-KEY", api_key)
            .json(&json!({ "q": query }))
            .send()
            .await
            .map_err(|e| AppError::agent(format!("Search request failed: {}", e)))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| AppError::agent(format!("Failed to get response text: {}", e)))?;

        if !status.is_success() {
            return Err(AppError::agent(format!("Search request failed: {} - {}", status, text)));
        }

        let parsed: SerperResponse = serde_json::from_str(&text)
            .map_err(|e| AppError::agent(format!("Failed to parse search response: {}", e)))?;

        Ok(parsed
            .news
            .into_iter()
            .chain(parsed.top_stories)
            .chain(parsed.organic)
            .collect())
    }
}

/// Render results as a numbered plain-text list for a prompt
pub fn format_results(results: &[SearchResult]) -> String {
    if results.is_empty() {
        return "No search results.".to_string();
    }
    results
        .iter()
        .enumerate()
        .map(|(i, r)| {
            let mut line = format!("{}. {}", i + 1, r.title);
            if let Some(source) = &r.source {
                line.push_str(&format!(" ({})", source));
            }
            if let Some(date) = &r.date {
                line.push_str(&format!(" [{}]", date));
            }
            if let Some(snippet) = &r.snippet {
                line.push_str(&format!("\n   {}", snippet));
            }
            if let Some(link) = &r.link {
                line.push_str(&format!("\n   {}", link));
            }
            line
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_search_orders_news_first() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/search"))
            .and(header("X-API-KEY", "serper-key"))
            .and(body_json(json!({"q": "USD EUR exchange rate news"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "organic": [{"title": "Euro - Wikipedia", "link": "https://en.wikipedia.org/wiki/Euro"}],
                "news": [{
                    "title": "Euro climbs as ECB holds",
                    "link": "https://www.reuters.com/markets/currencies/euro",
                    "snippet": "The euro rose against the dollar.",
                    "source": "Reuters",
                    "date": "2 hours ago"
                }]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = SerperClient::new(server.uri(), Some("serper-key".to_string()), Duration::from_secs(5)).unwrap();
        let results = client.search("USD EUR exchange rate news").await.unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].source.as_deref(), Some("Reuters"));
        assert_eq!(results[1].title, "Euro - Wikipedia");
    }

    #[tokio::test]
    async fn test_search_without_key() {
        let client = SerperClient::new("http://127.0.0.1:9", None, Duration::from_secs(1)).unwrap();
        let err = client.search("anything").await.unwrap_err();
        assert!(matches!(err, AppError::Agent(_)));
        assert!(err.to_string().contains("SERPER_API_KEY"));
    }

    #[test]
    fn test_format_results() {
        let results = vec![SearchResult {
            title: "Yen slides".to_string(),
            link: Some("https://example.com/yen".to_string()),
            snippet: Some("The yen weakened.".to_string()),
            source: Some("Bloomberg".to_string()),
            date: None,
        }];
        let text = format_results(&results);
        assert!(text.starts_with("1. Yen slides (Bloomberg)"));
        assert!(text.contains("The yen weakened."));
        assert!(text.contains("https://example.com/yen"));
        assert_eq!(format_results(&[]), "No search results.");
    }
}
