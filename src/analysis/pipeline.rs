use serde_json::{json, Map, Value};
use std::sync::Arc;

use crate::analysis::tool::AnalysisTool;
use crate::llm::parser::{parse_stage_output, NO_OUTPUT_ERROR};
use crate::llm::prompts;
use crate::llm::provider::{GenerationProvider, StageEvent, StageRequest};

pub struct StageSpec {
    pub name: String,
    pub kind: StageKind,
}

pub enum StageKind {
    Generate { instruction: String },
    Tool(Arc<dyn AnalysisTool>),
}

impl StageSpec {
    pub fn generate(name: &str, instruction: &str) -> Self {
        Self {
            name: name.to_string(),
            kind: StageKind::Generate {
                instruction: instruction.to_string(),
            },
        }
    }

    pub fn tool(name: &str, tool: Arc<dyn AnalysisTool>) -> Self {
        Self {
            name: name.to_string(),
            kind: StageKind::Tool(tool),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PipelineState {
    Running(usize),
    Done,
    Failed,
}

/// Conversation context accumulated across stages: the original request plus
/// every stage's parsed output, keyed by stage name.
struct Conversation {
    turns: Map<String, Value>,
    latest: Value,
}

impl Conversation {
    fn new(payload: Value) -> Self {
        let mut turns = Map::new();
        turns.insert("request".to_string(), payload.clone());
        Self {
            turns,
            latest: payload,
        }
    }

    fn push(&mut self, stage: &str, output: Value) {
        self.turns.insert(stage.to_string(), output.clone());
        self.latest = output;
    }

    fn render(&self) -> String {
        Value::Object(self.turns.clone()).to_string()
    }
}

/// Runs an ordered list of stages strictly in sequence. Generation stages
/// feed their parsed text output forward; tool stages contribute structured
/// results directly. Only the last stage's output reaches the caller.
pub struct AnalysisPipeline {
    provider: Arc<dyn GenerationProvider>,
    stages: Vec<StageSpec>,
}

impl AnalysisPipeline {
    pub fn new(provider: impl GenerationProvider + 'static, stages: Vec<StageSpec>) -> Self {
        Self {
            provider: Arc::new(provider),
            stages,
        }
    }

    /// The standard three-stage analysis: document ingestion, team risk
    /// evaluation (typed tool step), final recommendation.
    pub fn full_analysis(
        provider: impl GenerationProvider + 'static,
        team_tool: Arc<dyn AnalysisTool>,
    ) -> Self {
        Self::new(
            provider,
            vec![
                StageSpec::generate("doc_ingest", prompts::INGESTION_INSTRUCTION),
                StageSpec::tool("team_risk", team_tool),
                StageSpec::generate("recommendation", prompts::RECOMMENDATION_INSTRUCTION),
            ],
        )
    }

    pub async fn run(&self, payload: Value) -> Value {
        let mut conversation = Conversation::new(payload);

        for (index, stage) in self.stages.iter().enumerate() {
            let state = PipelineState::Running(index);
            tracing::info!(
                "Stage {}/{} ({:?}): {}",
                index + 1,
                self.stages.len(),
                state,
                stage.name
            );

            let output = match &stage.kind {
                StageKind::Tool(tool) => {
                    tracing::info!("[{}] invoking tool: {}", stage.name, tool.name());
                    tool.invoke(conversation.latest.clone()).await
                }
                StageKind::Generate { instruction } => {
                    let request = StageRequest {
                        instruction: instruction.clone(),
                        input: conversation.render(),
                    };

                    let events = match self.provider.generate(request).await {
                        Ok(events) => events,
                        Err(e) => {
                            tracing::error!(
                                "[{}] generation failed ({:?}): {}",
                                stage.name,
                                PipelineState::Failed,
                                e
                            );
                            return json!({
                                "error": format!("{} stage failed: {}", stage.name, e)
                            });
                        }
                    };

                    let mut final_text: Option<String> = None;
                    for event in events {
                        match event {
                            StageEvent::ToolCall { name, arguments } => {
                                // Intermediate tool invocations are logged, never surfaced
                                tracing::info!(
                                    "[{}] tool call: {}({})",
                                    stage.name,
                                    name,
                                    arguments
                                );
                            }
                            StageEvent::Text(text) => {
                                if !text.trim().is_empty() {
                                    final_text = Some(text);
                                }
                            }
                        }
                    }

                    let Some(text) = final_text else {
                        tracing::error!(
                            "[{}] no text output ({:?})",
                            stage.name,
                            PipelineState::Failed
                        );
                        return json!({ "error": NO_OUTPUT_ERROR });
                    };

                    parse_stage_output(&text)
                }
            };

            conversation.push(&stage.name, output);
        }

        tracing::info!("Pipeline complete ({:?})", PipelineState::Done);
        conversation.latest
    }
}
