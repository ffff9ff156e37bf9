use std::collections::BTreeMap;

use crate::models::{
    CoverageRating, CredibilityRating, DetailedAnalysis, EvidenceSummary, ExecutionRisks,
    FounderCredibility, MemberCredibility, RiskLevel, RoleCompleteness, RoleCoverage,
    ScoreBreakdown, SizeRating, TeamAssessment, TeamMember, TeamSizeAdequacy,
};

// One canonical keyword table feeds coverage, gap, and risk checks alike.
pub const TECHNICAL_KEYWORDS: &[&str] = &["cto", "technical", "engineer", "developer"];
pub const BUSINESS_KEYWORDS: &[&str] = &["ceo", "business", "commercial", "sales", "marketing"];
pub const PRODUCT_KEYWORDS: &[&str] = &["product", "design", "ux", "ui"];
pub const OPERATIONS_KEYWORDS: &[&str] = &["operations", "coo", "delivery"];

const LEADERSHIP_KEYWORDS: &[&str] = &["founder", "ceo", "cto", "director"];

pub struct TeamScoringEngine {
    weights: ScoringWeights,
}

#[derive(Debug, Clone)]
pub struct ScoringWeights {
    pub size_weight: f64,
    pub role_weight: f64,
    pub credibility_weight: f64,
    pub risk_weight: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            size_weight: 0.2,
            role_weight: 0.3,
            credibility_weight: 0.3,
            risk_weight: 0.2,
        }
    }
}

impl TeamScoringEngine {
    pub fn new() -> Self {
        Self {
            weights: ScoringWeights::default(),
        }
    }

    /// Deterministic assessment of a roster plus whatever evidence was
    /// gathered for it. Identical inputs produce byte-identical output.
    pub fn assess(
        &self,
        company: &str,
        members: &[TeamMember],
        evidence: &BTreeMap<String, EvidenceSummary>,
    ) -> TeamAssessment {
        tracing::info!("Analyzing {} team members for {}", members.len(), company);

        let team_size_adequacy = self.analyze_team_size(members);
        let role_completeness = self.analyze_role_coverage(members);
        let founder_credibility = self.assess_credibility(members, evidence);
        let skill_gaps = self.identify_skill_gaps(members);
        let execution_risks = self.identify_execution_risks(members);

        let scores = self.calculate_scores(
            &team_size_adequacy,
            &role_completeness,
            &founder_credibility,
            &execution_risks,
        );

        let strengths = self.extract_strengths(
            &team_size_adequacy,
            &role_completeness,
            &founder_credibility,
            &execution_risks,
            evidence,
        );
        let concerns = self.extract_concerns(&skill_gaps, &execution_risks, &founder_credibility, evidence);
        let recommendations = self.generate_recommendations(
            &team_size_adequacy,
            &role_completeness,
            &founder_credibility,
            &execution_risks,
        );

        let web_data_available = evidence.values().any(|e| e.has_public_presence);

        TeamAssessment {
            company_name: company.to_string(),
            team_size: members.len(),
            overall_score: scores.overall_score,
            risk_level: execution_risks.risk_level,
            strengths,
            concerns,
            recommendations,
            web_data_available,
            detailed_analysis: DetailedAnalysis {
                team_size_adequacy,
                role_completeness,
                web_presence: evidence.clone(),
                founder_credibility,
                skill_gaps,
                execution_risks,
                scores,
            },
        }
    }

    fn analyze_team_size(&self, members: &[TeamMember]) -> TeamSizeAdequacy {
        let size = members.len();
        let (rating, rationale) = match size {
            n if n >= 3 => (
                SizeRating::Excellent,
                "Ideal founding team size with role specialization",
            ),
            2 => (
                SizeRating::Good,
                "Standard founding team, should cover key roles",
            ),
            _ => (
                SizeRating::Risky,
                "Single founder carries higher execution risk",
            ),
        };

        TeamSizeAdequacy {
            team_size: size,
            rating,
            rationale: rationale.to_string(),
        }
    }

    fn analyze_role_coverage(&self, members: &[TeamMember]) -> RoleCompleteness {
        let roles = roles_text(members);

        let key_roles_present = RoleCoverage {
            technical_lead: contains_any(&roles, TECHNICAL_KEYWORDS),
            business_lead: contains_any(&roles, BUSINESS_KEYWORDS),
            product_lead: contains_any(&roles, PRODUCT_KEYWORDS),
            operations_lead: contains_any(&roles, OPERATIONS_KEYWORDS),
        };

        let coverage_percentage = key_roles_present.covered_count() as f64 / 4.0 * 100.0;

        let missing_roles = [
            ("technical_lead", key_roles_present.technical_lead),
            ("business_lead", key_roles_present.business_lead),
            ("product_lead", key_roles_present.product_lead),
            ("operations_lead", key_roles_present.operations_lead),
        ]
        .iter()
        .filter(|(_, covered)| !covered)
        .map(|(slot, _)| slot.to_string())
        .collect();

        let rating = if coverage_percentage >= 75.0 {
            CoverageRating::Strong
        } else if coverage_percentage >= 50.0 {
            CoverageRating::Moderate
        } else {
            CoverageRating::Weak
        };

        RoleCompleteness {
            key_roles_present,
            coverage_percentage,
            missing_roles,
            rating,
        }
    }

    fn assess_credibility(
        &self,
        members: &[TeamMember],
        evidence: &BTreeMap<String, EvidenceSummary>,
    ) -> FounderCredibility {
        let individual_scores: Vec<MemberCredibility> = members
            .iter()
            .map(|member| {
                let summary = evidence.get(&member.name).cloned().unwrap_or_default();

                let role = member.role.to_lowercase();
                let multiplier = if contains_any(&role, LEADERSHIP_KEYWORDS) {
                    1.2
                } else {
                    1.0
                };
                let adjusted = (summary.professional_score as f64 * multiplier).min(100.0);

                MemberCredibility {
                    name: member.name.clone(),
                    role: member.role.clone(),
                    web_presence_score: adjusted,
                    news_mentions: summary.news_mentions,
                    web_references: summary.web_references,
                    credibility_indicators: summary.credibility_indicators,
                    has_public_presence: summary.has_public_presence,
                }
            })
            .collect();

        // Empty roster averages to zero, no division fault
        let team_credibility_score = if individual_scores.is_empty() {
            0.0
        } else {
            individual_scores
                .iter()
                .map(|s| s.web_presence_score)
                .sum::<f64>()
                / individual_scores.len() as f64
        };

        let credibility_rating = if team_credibility_score >= 70.0 {
            CredibilityRating::High
        } else if team_credibility_score >= 40.0 {
            CredibilityRating::Medium
        } else {
            CredibilityRating::Low
        };

        FounderCredibility {
            individual_scores,
            team_credibility_score,
            credibility_rating,
        }
    }

    fn identify_skill_gaps(&self, members: &[TeamMember]) -> Vec<String> {
        let roles = roles_text(members);
        let mut gaps = Vec::new();

        if !contains_any(&roles, TECHNICAL_KEYWORDS) {
            gaps.push("TECHNICAL_LEADERSHIP: No clear technical expertise".to_string());
        }
        if !contains_any(&roles, BUSINESS_KEYWORDS) {
            gaps.push("BUSINESS_LEADERSHIP: No clear business/commercial expertise".to_string());
        }
        if members.len() < 2 {
            gaps.push("TEAM_SIZE: Single founder may lack bandwidth for all functions".to_string());
        }

        gaps
    }

    fn identify_execution_risks(&self, members: &[TeamMember]) -> ExecutionRisks {
        let mut identified_risks = Vec::new();
        let mut risk_level = RiskLevel::Low;

        if members.len() <= 1 {
            identified_risks.push("HIGH_RISK: Single founder - high execution burden".to_string());
            risk_level = risk_level.max(RiskLevel::High);
        }

        let roles = roles_text(members);
        let technical_present = contains_any(&roles, TECHNICAL_KEYWORDS);
        let business_present = contains_any(&roles, BUSINESS_KEYWORDS);

        if !technical_present && !business_present {
            identified_risks
                .push("HIGH_RISK: Missing both technical and business leadership".to_string());
            risk_level = risk_level.max(RiskLevel::High);
        } else if !technical_present {
            identified_risks.push("MEDIUM_RISK: Missing technical leadership".to_string());
            risk_level = risk_level.max(RiskLevel::Medium);
        } else if !business_present {
            identified_risks.push("MEDIUM_RISK: Missing business leadership".to_string());
            risk_level = risk_level.max(RiskLevel::Medium);
        }

        ExecutionRisks {
            risk_level,
            identified_risks,
            risk_score: risk_level.risk_score(),
        }
    }

    fn calculate_scores(
        &self,
        size: &TeamSizeAdequacy,
        roles: &RoleCompleteness,
        credibility: &FounderCredibility,
        risks: &ExecutionRisks,
    ) -> ScoreBreakdown {
        let team_size_score = size.rating.score();
        let role_coverage_score = roles.coverage_percentage;
        let credibility_score = credibility.team_credibility_score;
        let risk_score = 100.0 - risks.risk_score as f64;

        let overall_score = team_size_score * self.weights.size_weight
            + role_coverage_score * self.weights.role_weight
            + credibility_score * self.weights.credibility_weight
            + risk_score * self.weights.risk_weight;

        ScoreBreakdown {
            team_size_score,
            role_coverage_score,
            credibility_score,
            risk_score,
            overall_score: (overall_score * 10.0).round() / 10.0,
        }
    }

    fn extract_strengths(
        &self,
        size: &TeamSizeAdequacy,
        roles: &RoleCompleteness,
        credibility: &FounderCredibility,
        risks: &ExecutionRisks,
        evidence: &BTreeMap<String, EvidenceSummary>,
    ) -> Vec<String> {
        let mut strengths = Vec::new();

        if matches!(size.rating, SizeRating::Excellent | SizeRating::Good) {
            strengths.push(format!("Strong team size: {}", size.rationale));
        }
        if roles.rating == CoverageRating::Strong {
            strengths.push("Comprehensive role coverage across key functions".to_string());
        }
        match credibility.credibility_rating {
            CredibilityRating::High => {
                strengths.push("Strong web presence and credibility indicators found".to_string());
            }
            CredibilityRating::Medium => {
                strengths
                    .push("Moderate web presence with some credibility indicators".to_string());
            }
            CredibilityRating::Low => {}
        }
        if risks.risk_level == RiskLevel::Low {
            strengths.push("Low execution risk based on team composition".to_string());
        }

        for (name, summary) in evidence {
            if summary.has_public_presence {
                strengths.push(format!(
                    "{}: Public presence validated through web search",
                    name
                ));
            }
        }

        strengths
    }

    fn extract_concerns(
        &self,
        skill_gaps: &[String],
        risks: &ExecutionRisks,
        credibility: &FounderCredibility,
        evidence: &BTreeMap<String, EvidenceSummary>,
    ) -> Vec<String> {
        let mut concerns = Vec::new();

        concerns.extend(skill_gaps.iter().cloned());
        concerns.extend(risks.identified_risks.iter().cloned());

        if credibility.credibility_rating == CredibilityRating::Low {
            concerns.push(
                "LIMITED_WEB_PRESENCE: Limited public information found about team members"
                    .to_string(),
            );
        }

        let without_presence: Vec<&str> = evidence
            .iter()
            .filter(|(_, summary)| !summary.has_public_presence)
            .map(|(name, _)| name.as_str())
            .collect();
        if !without_presence.is_empty() {
            concerns.push(format!(
                "NO_WEB_PRESENCE: No public information found for: {}",
                without_presence.join(", ")
            ));
        }

        concerns
    }

    fn generate_recommendations(
        &self,
        size: &TeamSizeAdequacy,
        roles: &RoleCompleteness,
        credibility: &FounderCredibility,
        risks: &ExecutionRisks,
    ) -> Vec<String> {
        let mut recommendations = Vec::new();

        if size.team_size == 1 {
            recommendations
                .push("Consider bringing on a co-founder to share execution burden".to_string());
        }

        for slot in &roles.missing_roles {
            let role_name = title_case(&slot.replace('_', " "));
            recommendations.push(format!(
                "Consider adding {} expertise through hiring or advisory board",
                role_name
            ));
        }

        if matches!(
            credibility.credibility_rating,
            CredibilityRating::Low | CredibilityRating::Medium
        ) {
            recommendations.push(
                "Build online presence through LinkedIn, industry publications, and speaking engagements"
                    .to_string(),
            );
            recommendations
                .push("Consider creating professional profiles on relevant platforms".to_string());
        }

        if matches!(risks.risk_level, RiskLevel::High | RiskLevel::Medium) {
            recommendations
                .push("Develop clear role definitions and accountability matrix".to_string());
            recommendations
                .push("Consider interim executives or advisors for missing expertise".to_string());
        }

        recommendations
    }
}

impl Default for TeamScoringEngine {
    fn default() -> Self {
        Self::new()
    }
}

fn roles_text(members: &[TeamMember]) -> String {
    members
        .iter()
        .map(|m| m.role.to_lowercase())
        .collect::<Vec<_>>()
        .join(" ")
}

fn contains_any(text: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|keyword| text.contains(keyword))
}

fn title_case(text: &str) -> String {
    text.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    fn member(name: &str, role: &str) -> TeamMember {
        TeamMember {
            name: name.to_string(),
            role: role.to_string(),
        }
    }

    fn no_evidence() -> BTreeMap<String, EvidenceSummary> {
        BTreeMap::new()
    }

    #[test]
    fn test_two_member_ceo_cto_team() {
        let engine = TeamScoringEngine::new();
        let members = vec![member("A", "CEO"), member("B", "CTO")];

        let assessment = engine.assess("Acme", &members, &no_evidence());
        let details = &assessment.detailed_analysis;

        assert_eq!(details.team_size_adequacy.rating, SizeRating::Good);
        assert_eq!(details.role_completeness.coverage_percentage, 50.0);
        assert!(details.role_completeness.key_roles_present.technical_lead);
        assert!(details.role_completeness.key_roles_present.business_lead);
        assert!(!details.role_completeness.key_roles_present.product_lead);
        assert!(!details.role_completeness.key_roles_present.operations_lead);
        assert_eq!(details.execution_risks.risk_level, RiskLevel::Low);
        // 70*0.2 + 50*0.3 + 0*0.3 + 75*0.2 = 44.0
        assert_eq!(assessment.overall_score, 44.0);
    }

    #[test]
    fn test_single_founder_is_high_risk_regardless_of_credibility() {
        let engine = TeamScoringEngine::new();
        let members = vec![member("Solo", "Founder")];

        let mut evidence = BTreeMap::new();
        evidence.insert(
            "Solo".to_string(),
            EvidenceSummary {
                news_mentions: 2,
                web_references: 3,
                credibility_indicators: BTreeSet::from(["founder".to_string()]),
                has_public_presence: true,
                professional_score: 20,
                sample_news: vec![],
                sample_web: vec![],
            },
        );

        let assessment = engine.assess("Acme", &members, &evidence);

        assert_eq!(assessment.risk_level, RiskLevel::High);
        assert!(assessment
            .detailed_analysis
            .execution_risks
            .identified_risks
            .iter()
            .any(|r| r.contains("Single founder")));
        // 20 * 1.2 leadership adjustment
        let individual = &assessment.detailed_analysis.founder_credibility.individual_scores[0];
        assert_eq!(individual.web_presence_score, 24.0);
        assert!(assessment.web_data_available);
    }

    #[test]
    fn test_empty_roster_does_not_divide_by_zero() {
        let engine = TeamScoringEngine::new();

        let assessment = engine.assess("Ghost", &[], &no_evidence());
        let details = &assessment.detailed_analysis;

        assert_eq!(assessment.team_size, 0);
        assert_eq!(details.team_size_adequacy.rating, SizeRating::Risky);
        assert_eq!(details.role_completeness.coverage_percentage, 0.0);
        assert_eq!(details.founder_credibility.team_credibility_score, 0.0);
        assert_eq!(assessment.risk_level, RiskLevel::High);
        assert!(details
            .execution_risks
            .identified_risks
            .iter()
            .any(|r| r.contains("Single founder")));
        assert!(assessment.overall_score.is_finite());
        assert!(assessment.overall_score >= 0.0 && assessment.overall_score <= 100.0);
    }

    #[test]
    fn test_full_role_coverage_is_strong() {
        let engine = TeamScoringEngine::new();
        let members = vec![
            member("A", "CTO"),
            member("B", "CEO"),
            member("C", "Head of Product"),
            member("D", "COO"),
        ];

        let assessment = engine.assess("Acme", &members, &no_evidence());
        let completeness = &assessment.detailed_analysis.role_completeness;

        assert_eq!(completeness.rating, CoverageRating::Strong);
        assert_eq!(completeness.coverage_percentage, 100.0);
        assert!(completeness.missing_roles.is_empty());
    }

    #[test]
    fn test_missing_technical_leadership_is_medium_risk() {
        let engine = TeamScoringEngine::new();
        let members = vec![member("A", "CEO"), member("B", "Head of Sales")];

        let risks = &engine
            .assess("Acme", &members, &no_evidence())
            .detailed_analysis
            .execution_risks;

        assert_eq!(risks.risk_level, RiskLevel::Medium);
        assert_eq!(risks.risk_score, 50);
        assert!(risks
            .identified_risks
            .iter()
            .any(|r| r.contains("Missing technical leadership")));
    }

    #[test]
    fn test_missing_both_leads_is_high_risk() {
        let engine = TeamScoringEngine::new();
        let members = vec![member("A", "Designer"), member("B", "Advisor")];

        let risks = &engine
            .assess("Acme", &members, &no_evidence())
            .detailed_analysis
            .execution_risks;

        assert_eq!(risks.risk_level, RiskLevel::High);
        assert_eq!(risks.risk_score, 75);
    }

    #[test]
    fn test_leadership_multiplier_caps_at_100() {
        let engine = TeamScoringEngine::new();
        let members = vec![member("Jane", "Founder and CEO")];

        let mut evidence = BTreeMap::new();
        evidence.insert(
            "Jane".to_string(),
            EvidenceSummary {
                professional_score: 100,
                has_public_presence: true,
                news_mentions: 5,
                web_references: 5,
                ..Default::default()
            },
        );

        let assessment = engine.assess("Acme", &members, &evidence);
        let individual = &assessment.detailed_analysis.founder_credibility.individual_scores[0];

        assert_eq!(individual.web_presence_score, 100.0);
    }

    #[test]
    fn test_overall_score_stays_in_bounds() {
        let engine = TeamScoringEngine::new();

        let rosters: Vec<Vec<TeamMember>> = vec![
            vec![],
            vec![member("A", "")],
            vec![member("A", "CEO"), member("B", "CTO"), member("C", "COO")],
            vec![
                member("A", "CTO"),
                member("B", "CEO"),
                member("C", "Product"),
                member("D", "Operations"),
            ],
        ];

        for members in rosters {
            let mut evidence = BTreeMap::new();
            for m in &members {
                evidence.insert(
                    m.name.clone(),
                    EvidenceSummary {
                        professional_score: 100,
                        ..Default::default()
                    },
                );
            }
            let assessment = engine.assess("Acme", &members, &evidence);
            assert!(
                (0.0..=100.0).contains(&assessment.overall_score),
                "score {} out of bounds for roster of {}",
                assessment.overall_score,
                members.len()
            );
        }
    }

    #[test]
    fn test_assessment_is_deterministic() {
        let engine = TeamScoringEngine::new();
        let members = vec![member("A", "CEO"), member("B", "CTO")];

        let mut evidence = BTreeMap::new();
        evidence.insert(
            "A".to_string(),
            EvidenceSummary {
                news_mentions: 1,
                has_public_presence: true,
                professional_score: 40,
                credibility_indicators: BTreeSet::from([
                    "ceo".to_string(),
                    "linkedin".to_string(),
                ]),
                ..Default::default()
            },
        );

        let first = serde_json::to_string(&engine.assess("Acme", &members, &evidence)).unwrap();
        let second = serde_json::to_string(&engine.assess("Acme", &members, &evidence)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_members_without_presence_listed_in_concerns() {
        let engine = TeamScoringEngine::new();
        let members = vec![member("A", "CEO"), member("B", "CTO")];

        let mut evidence = BTreeMap::new();
        evidence.insert("A".to_string(), EvidenceSummary::default());
        evidence.insert(
            "B".to_string(),
            EvidenceSummary {
                web_references: 1,
                has_public_presence: true,
                ..Default::default()
            },
        );

        let assessment = engine.assess("Acme", &members, &evidence);

        assert!(assessment
            .concerns
            .iter()
            .any(|c| c.starts_with("NO_WEB_PRESENCE") && c.contains('A')));
        assert!(assessment
            .strengths
            .iter()
            .any(|s| s.starts_with("B: Public presence")));
    }

    #[test]
    fn test_recommendations_for_missing_roles() {
        let engine = TeamScoringEngine::new();
        let members = vec![member("A", "CEO"), member("B", "CTO")];

        let assessment = engine.assess("Acme", &members, &no_evidence());

        assert!(assessment
            .recommendations
            .iter()
            .any(|r| r.contains("Product Lead")));
        assert!(assessment
            .recommendations
            .iter()
            .any(|r| r.contains("Operations Lead")));
    }
}
