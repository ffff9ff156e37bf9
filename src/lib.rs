pub mod config;
pub mod error;
pub mod models;
pub mod evidence;
pub mod llm;
pub mod analysis;
pub mod service;
pub mod storage;

pub use config::Config;
pub use error::{Error, Result};
pub use evidence::{EnrichmentAggregator, EvidenceClient};
pub use llm::{GeminiProvider, GenerationProvider};
pub use analysis::{AnalysisPipeline, TeamAnalysisTool, TeamScoringEngine};
pub use storage::Storage;
