//! lingraph - linear state pipelines, proxy bootstrap and a streaming chat client

pub mod chat;
pub mod cli;
pub mod core;
pub mod demo;
pub mod execution;
pub mod proxy;

// Re-export commonly used types
pub use crate::chat::{ChatModel, ChatRequest, ChatError, FragmentStream, OpenAiResponsesClient};
pub use crate::core::{build_and_run, build_pipeline, AppState, GraphBuilder, Pipeline, Step, PipelineError};
pub use crate::core::{ConfigurationError, StepExecutionError};
pub use crate::execution::{ExecutionEngine, ExecutionEvent, RunOutcome};
pub use crate::proxy::{set_proxy_environment, ProxySettings};
