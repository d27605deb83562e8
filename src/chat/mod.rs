//! Streaming chat against an external LLM endpoint
//!
//! The model itself, its tools and its transport are external; this module
//! only defines the narrow seam "submit a conversation, receive a lazy
//! sequence of text fragments" and one HTTP implementation of it.

pub mod client;
pub mod events;
pub mod message;
pub mod openai;
pub mod response;
pub mod sse;
pub mod streaming;

use async_trait::async_trait;
use futures::Stream;
use std::pin::Pin;

pub use client::ChatClientConfig;
pub use events::ResponseEvent;
pub use message::{ChatMessage, ChatRequest, Role, ToolSpec};
pub use openai::OpenAiResponsesClient;
pub use response::ChatError;
pub use streaming::{collect_text, drain, FragmentCallback, NoopCallback};

/// Lazily produced response text
pub type FragmentStream = Pin<Box<dyn Stream<Item = Result<String, ChatError>> + Send>>;

/// Trait for chat models - allows for different implementations
#[async_trait]
pub trait ChatModel: Send + Sync {
    /// Submit a conversation and stream the reply
    async fn stream(&self, request: &ChatRequest) -> Result<FragmentStream, ChatError>;
}
