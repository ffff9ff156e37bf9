use futures::future::join_all;
use indicatif::{ProgressBar, ProgressStyle};
use std::collections::{BTreeMap, BTreeSet};

use crate::config::Config;
use crate::evidence::client::EvidenceClient;
use crate::models::{Article, EvidenceSummary, TeamMember, WebResult};

const CREDIBILITY_KEYWORDS: &[&str] = &[
    "linkedin", "founder", "ceo", "cto", "director", "manager", "experience",
    "previous", "speaker", "coach",
];

/// Fans out evidence lookups across the roster and merges the results into
/// per-member summaries. Owns the evidence client for the process lifetime.
pub struct EnrichmentAggregator {
    client: EvidenceClient,
    enabled: bool,
    max_members: usize,
}

impl EnrichmentAggregator {
    pub fn new(client: EvidenceClient, config: &Config) -> Self {
        Self {
            client,
            enabled: config.enrichment_enabled,
            max_members: config.max_team_members,
        }
    }

    pub async fn enrich(
        &self,
        company: &str,
        members: &[TeamMember],
    ) -> BTreeMap<String, EvidenceSummary> {
        if !self.enabled {
            tracing::info!("Enrichment disabled, using zeroed evidence");
            return members
                .iter()
                .map(|m| (m.name.clone(), EvidenceSummary::default()))
                .collect();
        }

        if members.len() > self.max_members {
            tracing::warn!(
                "Roster has {} members, enriching only the first {}",
                members.len(),
                self.max_members
            );
        }

        let pb = ProgressBar::new(members.len().min(self.max_members) as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} members")
                .unwrap()
                .progress_chars("#>-"),
        );

        let lookups = members.iter().take(self.max_members).map(|member| {
            let pb = pb.clone();
            async move {
                let summary = if member.name.is_empty() {
                    EvidenceSummary::default()
                } else {
                    self.lookup(&member.name, company).await
                };
                pb.inc(1);
                (member.name.clone(), summary)
            }
        });

        let mut evidence: BTreeMap<String, EvidenceSummary> =
            join_all(lookups).await.into_iter().collect();
        pb.finish_and_clear();

        // Members past the lookup cap still get an entry
        for member in members.iter().skip(self.max_members) {
            evidence
                .entry(member.name.clone())
                .or_insert_with(EvidenceSummary::default);
        }

        evidence
    }

    async fn lookup(&self, person: &str, company: &str) -> EvidenceSummary {
        tracing::info!("Searching web evidence for: {}", person);

        // Both fetches run concurrently; each degrades to empty on its own
        let (news, web) = tokio::join!(
            self.client.fetch_news(person),
            self.client.fetch_web(person, company),
        );

        let summary = summarize(&news, &web);
        tracing::info!(
            "Evidence for {}: {} news, {} web results",
            person,
            summary.news_mentions,
            summary.web_references
        );
        summary
    }
}

fn summarize(news: &[Article], web: &[WebResult]) -> EvidenceSummary {
    let news_titles = news
        .iter()
        .map(|a| a.title.as_str())
        .collect::<Vec<_>>()
        .join(" ");
    let web_snippets = web
        .iter()
        .map(|r| r.snippet.as_str())
        .collect::<Vec<_>>()
        .join(" ");
    let haystack = format!("{} {}", news_titles, web_snippets).to_lowercase();

    let credibility_indicators: BTreeSet<String> = CREDIBILITY_KEYWORDS
        .iter()
        .filter(|keyword| haystack.contains(*keyword))
        .map(|keyword| keyword.to_string())
        .collect();

    EvidenceSummary {
        news_mentions: news.len() as u32,
        web_references: web.len() as u32,
        professional_score: (credibility_indicators.len() as u32 * 20).min(100),
        has_public_presence: !news.is_empty() || !web.is_empty(),
        sample_news: news.iter().take(2).map(|a| a.title.clone()).collect(),
        sample_web: web.iter().take(2).map(|r| r.title.clone()).collect(),
        credibility_indicators,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    fn article(title: &str) -> Article {
        Article {
            title: title.to_string(),
            description: String::new(),
            url: String::new(),
        }
    }

    fn web_result(title: &str, snippet: &str) -> WebResult {
        WebResult {
            title: title.to_string(),
            snippet: snippet.to_string(),
            link: String::new(),
        }
    }

    #[test]
    fn test_summarize_matches_keywords_case_insensitively() {
        let news = vec![article("Acme FOUNDER raises seed round")];
        let web = vec![web_result("Profile", "LinkedIn page of a former Director")];

        let summary = summarize(&news, &web);

        assert!(summary.credibility_indicators.contains("founder"));
        assert!(summary.credibility_indicators.contains("linkedin"));
        assert!(summary.credibility_indicators.contains("director"));
        assert_eq!(summary.professional_score, 60);
        assert!(summary.has_public_presence);
    }

    #[test]
    fn test_summarize_caps_professional_score() {
        let snippet = "linkedin founder ceo cto director manager experience previous speaker coach";
        let summary = summarize(&[], &[web_result("t", snippet)]);

        assert_eq!(summary.credibility_indicators.len(), 10);
        assert_eq!(summary.professional_score, 100);
    }

    #[test]
    fn test_summarize_truncates_samples() {
        let news = vec![article("one"), article("two"), article("three")];
        let summary = summarize(&news, &[]);

        assert_eq!(summary.news_mentions, 3);
        assert_eq!(summary.sample_news, vec!["one", "two"]);
        assert!(summary.sample_web.is_empty());
    }

    #[test]
    fn test_summarize_isolates_failed_news_fetch() {
        // A failed news fetch degrades to an empty slice; the successful
        // web fetch still contributes to the summary
        let web = vec![web_result("Jane Doe", "serial founder")];
        let summary = summarize(&[], &web);

        assert_eq!(summary.news_mentions, 0);
        assert_eq!(summary.web_references, 1);
        assert!(summary.has_public_presence);
        assert_eq!(summary.professional_score, 20);
    }

    #[tokio::test]
    async fn test_enrich_without_providers_yields_zeroed_summaries() {
        // No credentials configured: the client short-circuits without
        // touching the network
        let config = Config::default();
        let aggregator =
            EnrichmentAggregator::new(EvidenceClient::new(&config).unwrap(), &config);

        let members = vec![
            TeamMember { name: "Ada".to_string(), role: "CTO".to_string() },
            TeamMember { name: String::new(), role: "CEO".to_string() },
        ];
        let evidence = aggregator.enrich("Acme", &members).await;

        assert_eq!(evidence.len(), 2);
        assert_eq!(evidence["Ada"], EvidenceSummary::default());
        assert!(!evidence["Ada"].has_public_presence);
    }

    #[tokio::test]
    async fn test_enrich_disabled_skips_lookups() {
        let config = Config { enrichment_enabled: false, ..Config::default() };
        let aggregator =
            EnrichmentAggregator::new(EvidenceClient::new(&config).unwrap(), &config);

        let members = vec![TeamMember { name: "Solo".to_string(), role: "Founder".to_string() }];
        let evidence = aggregator.enrich("Acme", &members).await;

        assert_eq!(evidence["Solo"], EvidenceSummary::default());
    }
}
