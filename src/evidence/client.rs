use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::models::{Article, WebResult};

const NEWS_API_URL: &str = "https://newsapi.org/v2/everything";
const SEARCH_API_URL: &str = "https://www.googleapis.com/customsearch/v1";

#[derive(Deserialize)]
struct NewsResponse {
    #[serde(default)]
    articles: Vec<Article>,
}

#[derive(Deserialize)]
struct SearchResponse {
    #[serde(default)]
    items: Vec<WebResult>,
}

/// Client for the third-party news and web search providers. Owns one
/// connection pool for the process lifetime; every fetch degrades to an
/// empty result set on failure instead of surfacing an error.
pub struct EvidenceClient {
    client: Client,
    news_api_key: Option<String>,
    search_api_key: Option<String>,
    search_engine_id: Option<String>,
}

impl EvidenceClient {
    pub fn new(config: &Config) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        Ok(Self {
            client,
            news_api_key: config.news_api_key.clone(),
            search_api_key: config.search_api_key.clone(),
            search_engine_id: config.search_engine_id.clone(),
        })
    }

    pub async fn fetch_news(&self, person: &str) -> Vec<Article> {
        let Some(key) = self.news_api_key.as_deref() else {
            tracing::warn!("NEWSAPI_KEY not configured, skipping news lookup");
            return Vec::new();
        };

        let query = format!("\"{}\"", person);
        match self.get_news(key, &query).await {
            Ok(articles) => {
                tracing::info!("NewsAPI found {} articles for {}", articles.len(), person);
                articles
            }
            Err(e) => {
                tracing::error!("News search failed for {}: {}", person, e);
                Vec::new()
            }
        }
    }

    pub async fn fetch_web(&self, person: &str, company: &str) -> Vec<WebResult> {
        let (Some(key), Some(cx)) = (
            self.search_api_key.as_deref(),
            self.search_engine_id.as_deref(),
        ) else {
            tracing::warn!("Google Search API not configured, skipping web lookup");
            return Vec::new();
        };

        let quoted = format!("\"{}\" \"{}\"", person, company);
        match self.get_web(key, cx, &quoted).await {
            Ok(items) => {
                tracing::info!("Web search found {} results for {}", items.len(), person);
                items
            }
            Err(e) => {
                // One retry with a relaxed, unquoted query before giving up
                tracing::warn!(
                    "Web search failed for {} ({}), retrying with relaxed query",
                    person,
                    e
                );
                let relaxed = format!("{} {}", person, company);
                match self.get_web(key, cx, &relaxed).await {
                    Ok(items) => {
                        tracing::info!("Web search retry found {} results", items.len());
                        items
                    }
                    Err(e) => {
                        tracing::error!("Web search retry failed for {}: {}", person, e);
                        Vec::new()
                    }
                }
            }
        }
    }

    async fn get_news(&self, key: &str, query: &str) -> Result<Vec<Article>> {
        let response = self
            .client
            .get(NEWS_API_URL)
            .query(&[
                ("q", query),
                ("sortBy", "relevancy"),
                ("pageSize", "3"),
                ("language", "en"),
                ("apiKey", key),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::SearchApi(format!("NewsAPI {}: {}", status, body)));
        }

        let data: NewsResponse = response.json().await?;
        Ok(data.articles)
    }

    async fn get_web(&self, key: &str, cx: &str, query: &str) -> Result<Vec<WebResult>> {
        let response = self
            .client
            .get(SEARCH_API_URL)
            .query(&[("q", query), ("key", key), ("cx", cx), ("num", "3")])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::SearchApi(format!(
                "Google Search {}: {}",
                status, body
            )));
        }

        let data: SearchResponse = response.json().await?;
        Ok(data.items)
    }
}
