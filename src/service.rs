use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::analysis::pipeline::AnalysisPipeline;
use crate::analysis::tool::{AnalysisTool, TeamAnalysisTool};
use crate::error::{Error, Result};

/// Bundle of document references already placed into external storage by
/// the (out of scope) upload layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocRequest {
    pub bucket_name: String,
    pub file_paths: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ApiResponse {
    pub response: Value,
}

/// `POST /full-analysis`: runs the staged pipeline over the uploaded
/// documents and returns the last stage's parsed output.
pub async fn full_analysis(pipeline: &AnalysisPipeline, request: &DocRequest) -> ApiResponse {
    let payload = json!({
        "bucket_name": request.bucket_name,
        "file_paths": request.file_paths,
    });

    ApiResponse {
        response: pipeline.run(payload).await,
    }
}

/// `POST /team-analysis`: validates the roster JSON and invokes the team
/// evaluation tool directly, without the generation pipeline. Invalid input
/// is a client error; internal failures come back as an `{"error": …}`
/// payload inside a success envelope.
pub async fn team_analysis(
    tool: &TeamAnalysisTool,
    company_name: &str,
    team_members: &str,
) -> Result<ApiResponse> {
    let team: Value = serde_json::from_str(team_members).map_err(|e| {
        Error::InvalidInput(format!(
            "Invalid team_members JSON: {}. Expected format: [{{\"name\": \"...\", \"role\": \"...\"}}]",
            e
        ))
    })?;

    // A single member object is accepted and treated as a one-element roster
    let team = if team.is_array() {
        team
    } else {
        Value::Array(vec![team])
    };

    let input = json!({
        "company_name": company_name,
        "team_members_json": team.to_string(),
    });

    tracing::info!("Team analysis input: {}", input);
    Ok(ApiResponse {
        response: tool.invoke(input).await,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::evidence::{EnrichmentAggregator, EvidenceClient};

    fn offline_tool() -> TeamAnalysisTool {
        let config = Config {
            enrichment_enabled: false,
            ..Config::default()
        };
        TeamAnalysisTool::new(EnrichmentAggregator::new(
            EvidenceClient::new(&config).unwrap(),
            &config,
        ))
    }

    #[tokio::test]
    async fn test_team_analysis_success_envelope() {
        let tool = offline_tool();
        let response = team_analysis(
            &tool,
            "Acme",
            r#"[{"name":"A","role":"CEO"},{"name":"B","role":"CTO"}]"#,
        )
        .await
        .unwrap();

        let assessment = &response.response["team_assessment"];
        assert_eq!(assessment["company_name"], "Acme");
        assert_eq!(
            assessment["detailed_analysis"]["role_completeness"]["coverage_percentage"],
            50.0
        );
    }

    #[tokio::test]
    async fn test_invalid_roster_json_is_a_client_error() {
        let tool = offline_tool();
        let err = team_analysis(&tool, "Acme", "{not json")
            .await
            .unwrap_err();

        assert_eq!(err.status_code(), 400);
        assert!(err.to_string().contains("Invalid team_members JSON"));
    }

    #[tokio::test]
    async fn test_single_object_roster_is_wrapped() {
        let tool = offline_tool();
        let response = team_analysis(&tool, "Acme", r#"{"name":"Solo","role":"Founder"}"#)
            .await
            .unwrap();

        let assessment = &response.response["team_assessment"];
        assert_eq!(assessment["team_size"], 1);
        assert_eq!(assessment["risk_level"], "HIGH");
    }
}
