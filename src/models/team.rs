use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use super::evidence::EvidenceSummary;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TeamMember {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub role: String,
}

/// Severity-ordered risk level. Escalation takes the maximum rank, so a
/// HIGH verdict is never downgraded by a later MEDIUM finding.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub fn risk_score(&self) -> u32 {
        match self {
            RiskLevel::High => 75,
            RiskLevel::Medium => 50,
            RiskLevel::Low => 25,
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RiskLevel::Low => write!(f, "LOW"),
            RiskLevel::Medium => write!(f, "MEDIUM"),
            RiskLevel::High => write!(f, "HIGH"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SizeRating {
    Excellent,
    Good,
    Risky,
}

impl SizeRating {
    pub fn score(&self) -> f64 {
        match self {
            SizeRating::Excellent => 90.0,
            SizeRating::Good => 70.0,
            SizeRating::Risky => 30.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CoverageRating {
    Strong,
    Moderate,
    Weak,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CredibilityRating {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamSizeAdequacy {
    pub team_size: usize,
    pub rating: SizeRating,
    pub rationale: String,
}

/// The four fixed leadership-capability slots.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct RoleCoverage {
    pub technical_lead: bool,
    pub business_lead: bool,
    pub product_lead: bool,
    pub operations_lead: bool,
}

impl RoleCoverage {
    pub fn covered_count(&self) -> usize {
        [
            self.technical_lead,
            self.business_lead,
            self.product_lead,
            self.operations_lead,
        ]
        .iter()
        .filter(|c| **c)
        .count()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoleCompleteness {
    pub key_roles_present: RoleCoverage,
    pub coverage_percentage: f64,
    pub missing_roles: Vec<String>,
    pub rating: CoverageRating,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionRisks {
    pub risk_level: RiskLevel,
    pub identified_risks: Vec<String>,
    pub risk_score: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemberCredibility {
    pub name: String,
    pub role: String,
    pub web_presence_score: f64,
    pub news_mentions: u32,
    pub web_references: u32,
    pub credibility_indicators: BTreeSet<String>,
    pub has_public_presence: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FounderCredibility {
    pub individual_scores: Vec<MemberCredibility>,
    pub team_credibility_score: f64,
    pub credibility_rating: CredibilityRating,
}

/// Weighted sub-scores. `risk_score` holds the risk complement
/// (100 - execution risk score), preserving the historical field name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub team_size_score: f64,
    pub role_coverage_score: f64,
    pub credibility_score: f64,
    pub risk_score: f64,
    pub overall_score: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetailedAnalysis {
    pub team_size_adequacy: TeamSizeAdequacy,
    pub role_completeness: RoleCompleteness,
    pub web_presence: BTreeMap<String, EvidenceSummary>,
    pub founder_credibility: FounderCredibility,
    pub skill_gaps: Vec<String>,
    pub execution_risks: ExecutionRisks,
    pub scores: ScoreBreakdown,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamAssessment {
    pub company_name: String,
    pub team_size: usize,
    pub overall_score: f64,
    pub risk_level: RiskLevel,
    pub strengths: Vec<String>,
    pub concerns: Vec<String>,
    pub recommendations: Vec<String>,
    pub web_data_available: bool,
    pub detailed_analysis: DetailedAnalysis,
}
