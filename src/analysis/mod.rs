pub mod pipeline;
pub mod scoring;
pub mod tool;

pub use pipeline::{AnalysisPipeline, StageKind, StageSpec};
pub use scoring::TeamScoringEngine;
pub use tool::{AnalysisTool, TeamAnalysisTool};
