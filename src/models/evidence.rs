use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Article {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebResult {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub snippet: String,
    #[serde(default)]
    pub link: String,
}

/// Per-member web evidence, recomputed on every evaluation. Ordered
/// collections keep serialization deterministic across runs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EvidenceSummary {
    pub news_mentions: u32,
    pub web_references: u32,
    pub credibility_indicators: BTreeSet<String>,
    pub has_public_presence: bool,
    pub professional_score: u32,
    pub sample_news: Vec<String>,
    pub sample_web: Vec<String>,
}
