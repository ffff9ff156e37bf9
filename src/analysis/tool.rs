use async_trait::async_trait;
use serde_json::{json, Value};

use crate::analysis::scoring::TeamScoringEngine;
use crate::error::{Error, Result};
use crate::evidence::EnrichmentAggregator;
use crate::models::TeamMember;

/// A typed capability the orchestrator can invoke as a pipeline step.
/// Implementations never propagate errors: failures come back as an
/// `{"error": …}` value so sibling work is unaffected.
#[async_trait]
pub trait AnalysisTool: Send + Sync {
    fn name(&self) -> &str;
    async fn invoke(&self, input: Value) -> Value;
}

/// Team evaluation step: enriches the roster with web evidence and runs the
/// scoring engine over the result.
pub struct TeamAnalysisTool {
    aggregator: EnrichmentAggregator,
    engine: TeamScoringEngine,
}

impl TeamAnalysisTool {
    pub fn new(aggregator: EnrichmentAggregator) -> Self {
        Self {
            aggregator,
            engine: TeamScoringEngine::new(),
        }
    }

    async fn evaluate(&self, input: Value) -> Result<Value> {
        let (company, members) = extract_team_request(&input)?;

        if !members.is_array() {
            return Ok(json!({ "error": "team_members must be a list" }));
        }
        let members: Vec<TeamMember> = serde_json::from_value(members)?;

        tracing::info!("Evaluating team for {}", company);
        let evidence = self.aggregator.enrich(&company, &members).await;
        let assessment = self.engine.assess(&company, &members, &evidence);

        Ok(json!({ "team_assessment": assessment }))
    }
}

#[async_trait]
impl AnalysisTool for TeamAnalysisTool {
    fn name(&self) -> &str {
        "evaluate_team"
    }

    async fn invoke(&self, input: Value) -> Value {
        match self.evaluate(input).await {
            Ok(result) => result,
            Err(e) => {
                tracing::error!("Team evaluation error: {}", e);
                json!({ "error": format!("Team evaluation failed: {}", e) })
            }
        }
    }
}

/// Accepts either a direct evaluation request
/// (`{company_name, team_members_json}`) or the ingestion stage's structured
/// output (`{startup_name, team: {ceo, cto, other_key_members}}`).
fn extract_team_request(input: &Value) -> Result<(String, Value)> {
    if let Some(raw) = input.get("team_members_json").and_then(Value::as_str) {
        let company = input
            .get("company_name")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        let members: Value = serde_json::from_str(raw)?;
        return Ok((company, members));
    }

    if let Some(team) = input.get("team") {
        let company = input
            .get("startup_name")
            .and_then(Value::as_str)
            .unwrap_or("Unknown")
            .to_string();

        let mut members = Vec::new();
        if let Some(ceo) = team.get("ceo").and_then(Value::as_str) {
            members.push(json!({ "name": ceo, "role": "CEO" }));
        }
        if let Some(cto) = team.get("cto").and_then(Value::as_str) {
            members.push(json!({ "name": cto, "role": "CTO" }));
        }
        if let Some(others) = team.get("other_key_members").and_then(Value::as_array) {
            for name in others.iter().filter_map(Value::as_str) {
                members.push(json!({ "name": name, "role": "" }));
            }
        }
        return Ok((company, Value::Array(members)));
    }

    Err(Error::InvalidInput(
        "input does not contain team information".to_string(),
    ))
}
