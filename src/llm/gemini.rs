use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Error, Result};
use crate::llm::provider::{GenerationProvider, StageEvent, StageRequest};

const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";

pub struct GeminiProvider {
    client: Client,
    api_key: String,
    model: String,
}

#[derive(Serialize)]
struct GeminiRequest {
    #[serde(rename = "systemInstruction")]
    system_instruction: SystemInstruction,
    contents: Vec<Content>,
}

#[derive(Serialize)]
struct SystemInstruction {
    parts: Vec<TextPart>,
}

#[derive(Serialize)]
struct TextPart {
    text: String,
}

#[derive(Serialize)]
struct Content {
    role: String,
    parts: Vec<TextPart>,
}

#[derive(Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
struct ResponsePart {
    text: Option<String>,
    #[serde(rename = "functionCall")]
    function_call: Option<FunctionCall>,
}

#[derive(Deserialize)]
struct FunctionCall {
    name: String,
    #[serde(default)]
    args: Value,
}

impl GeminiProvider {
    pub fn new(api_key: String, model: Option<String>) -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(120))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            api_key,
            model: model.unwrap_or_else(|| "gemini-2.0-flash".to_string()),
        }
    }
}

#[async_trait]
impl GenerationProvider for GeminiProvider {
    async fn generate(&self, request: StageRequest) -> Result<Vec<StageEvent>> {
        let url = format!(
            "{}/{}:generateContent?key={}",
            GEMINI_BASE_URL, self.model, self.api_key
        );

        let request_body = GeminiRequest {
            system_instruction: SystemInstruction {
                parts: vec![TextPart { text: request.instruction }],
            },
            contents: vec![Content {
                role: "user".to_string(),
                parts: vec![TextPart { text: request.input }],
            }],
        };

        let response = self
            .client
            .post(&url)
            .header("content-type", "application/json")
            .json(&request_body)
            .send()
            .await
            .map_err(|e| Error::LlmApi(format!("Failed to send request: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::LlmApi(format!(
                "Gemini API error ({}): {}",
                status, body
            )));
        }

        let result: GeminiResponse = response
            .json()
            .await
            .map_err(|e| Error::LlmApi(format!("Failed to parse Gemini response: {}", e)))?;

        let candidate = result
            .candidates
            .into_iter()
            .next()
            .ok_or_else(|| Error::LlmApi("Empty response from Gemini".to_string()))?;

        let mut events = Vec::new();
        for part in candidate.content.into_iter().flat_map(|c| c.parts) {
            if let Some(call) = part.function_call {
                events.push(StageEvent::ToolCall {
                    name: call.name,
                    arguments: call.args,
                });
            } else if let Some(text) = part.text {
                events.push(StageEvent::Text(text));
            }
        }

        Ok(events)
    }

    fn name(&self) -> &str {
        "Gemini"
    }
}
