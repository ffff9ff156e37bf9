use async_trait::async_trait;
use serde_json::Value;

use crate::error::Result;

#[derive(Debug, Clone)]
pub struct StageRequest {
    pub instruction: String,
    pub input: String,
}

/// One event emitted by a generation stage: an intermediate tool invocation
/// (logged, never surfaced) or a text response.
#[derive(Debug, Clone)]
pub enum StageEvent {
    ToolCall { name: String, arguments: Value },
    Text(String),
}

#[async_trait]
pub trait GenerationProvider: Send + Sync {
    async fn generate(&self, request: StageRequest) -> Result<Vec<StageEvent>>;
    fn name(&self) -> &str;
}
