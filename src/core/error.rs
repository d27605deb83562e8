//! Pipeline error types

use thiserror::Error;

/// Error returned by a failing step
pub type StepFailure = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Invalid pipeline definition
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    #[error("Pipeline has no steps")]
    EmptyPipeline,

    #[error("Duplicate step name: {0}")]
    DuplicateStep(String),

    #[error("Edge references unknown step '{0}'")]
    UnknownStep(String),

    #[error("Step '{from}' has more than one successor ('{first}' and '{second}')")]
    Branching {
        from: String,
        first: String,
        second: String,
    },

    #[error("Step '{to}' has more than one predecessor ('{first}' and '{second}')")]
    MultiplePredecessors {
        to: String,
        first: String,
        second: String,
    },

    #[error("Invalid edge {from} -> {to}")]
    InvalidEdge { from: String, to: String },

    #[error("No edge leaves the entry node")]
    MissingEntry,

    #[error("Chain starting at the entry node never reaches the exit node")]
    MissingExit,

    #[error("Step '{0}' is not reachable from the entry node")]
    Unreachable(String),
}

/// A step failed while the pipeline was running
#[derive(Debug, Error)]
#[error("Step '{step}' failed: {source}")]
pub struct StepExecutionError {
    /// Name of the step that failed
    pub step: String,

    /// The original failure raised by the step
    #[source]
    pub source: StepFailure,
}

/// Either kind of pipeline failure, for callers that build and run in one go
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error(transparent)]
    StepExecution(#[from] StepExecutionError),
}
