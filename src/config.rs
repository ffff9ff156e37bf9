use std::env;

use crate::error::Result;

#[derive(Debug, Clone)]
pub struct Config {
    pub gemini_api_key: Option<String>,
    pub news_api_key: Option<String>,
    pub search_api_key: Option<String>,
    pub search_engine_id: Option<String>,
    pub database_path: String,
    pub request_timeout_secs: u64,
    pub max_team_members: usize,
    pub enrichment_enabled: bool,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let gemini_api_key = env::var("GEMINI_API_KEY").ok().filter(|v| !v.is_empty());

        // Evidence providers are optional: a missing key degrades enrichment
        // to empty evidence instead of failing the request.
        let news_api_key = env::var("NEWSAPI_KEY").ok().filter(|v| !v.is_empty());
        let search_api_key = env::var("GOOGLE_SEARCH_KEY").ok().filter(|v| !v.is_empty());
        let search_engine_id = env::var("GOOGLE_CX").ok().filter(|v| !v.is_empty());

        let database_path = env::var("DATABASE_PATH")
            .unwrap_or_else(|_| "teamlens.db".to_string());

        let request_timeout_secs = env::var("REQUEST_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(30);

        let max_team_members = env::var("MAX_TEAM_MEMBERS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(10);

        let enrichment_enabled = env::var("ENRICHMENT_ENABLED")
            .ok()
            .map(|v| v.to_lowercase() != "false")
            .unwrap_or(true);

        Ok(Self {
            gemini_api_key,
            news_api_key,
            search_api_key,
            search_engine_id,
            database_path,
            request_timeout_secs,
            max_team_members,
            enrichment_enabled,
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            gemini_api_key: None,
            news_api_key: None,
            search_api_key: None,
            search_engine_id: None,
            database_path: "teamlens.db".to_string(),
            request_timeout_secs: 30,
            max_team_members: 10,
            enrichment_enabled: true,
        }
    }
}
