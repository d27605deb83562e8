//! Responses API client that streams over HTTP

use crate::chat::{
    events::ResponseEvent,
    sse::{SseDecoder, SseEvent},
    ChatClientConfig, ChatError, ChatModel, ChatRequest, FragmentStream,
};
use async_trait::async_trait;
use futures::{stream, Stream, StreamExt};
use serde_json::{json, Value};
use std::collections::VecDeque;
use std::pin::Pin;
use std::time::Duration;
use tracing::{debug, warn};

/// Streams chat responses from an OpenAI-compatible `/responses` endpoint
///
/// The underlying HTTP client reads the proxy environment when it is built,
/// so construct this after the proxy variables are in place.
#[derive(Debug, Clone)]
pub struct OpenAiResponsesClient {
    config: ChatClientConfig,
    api_key: String,
    http: reqwest::Client,
}

impl OpenAiResponsesClient {
    /// Create a client, reading the API key from `config.api_key_env`
    pub fn new(config: ChatClientConfig) -> Result<Self, ChatError> {
        let api_key = std::env::var(&config.api_key_env)
            .ok()
            .filter(|key| !key.is_empty())
            .ok_or_else(|| ChatError::MissingApiKey(config.api_key_env.clone()))?;
        Self::with_api_key(config, api_key)
    }

    /// Create a client with an explicit API key
    pub fn with_api_key(
        config: ChatClientConfig,
        api_key: impl Into<String>,
    ) -> Result<Self, ChatError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            config,
            api_key: api_key.into(),
            http,
        })
    }

    pub fn config(&self) -> &ChatClientConfig {
        &self.config
    }

    /// JSON body for a streamed request
    pub fn request_body(&self, request: &ChatRequest) -> Value {
        let mut body = json!({
            "model": self.config.model,
            "input": request.messages,
            "stream": true,
        });
        if !request.tools.is_empty() {
            body["tools"] = json!(request.tools);
        }
        body
    }

    fn map_http_error(&self, err: reqwest::Error) -> ChatError {
        if err.is_timeout() {
            ChatError::Timeout(self.config.timeout_secs)
        } else {
            ChatError::Http(err)
        }
    }
}

#[async_trait]
impl ChatModel for OpenAiResponsesClient {
    async fn stream(&self, request: &ChatRequest) -> Result<FragmentStream, ChatError> {
        let url = self.config.endpoint();
        debug!(
            "Streaming {} messages with {} tools to {}",
            request.messages.len(),
            request.tools.len(),
            url
        );

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&self.request_body(request))
            .send()
            .await
            .map_err(|e| self.map_http_error(e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("Chat request failed with {}: {}", status, body.trim());
            return Err(ChatError::Api(format!("{}: {}", status, body.trim())));
        }

        let timeout_secs = self.config.timeout_secs;
        let body = response.bytes_stream().map(move |chunk| {
            chunk.map_err(|e| {
                if e.is_timeout() {
                    ChatError::Timeout(timeout_secs)
                } else {
                    ChatError::Http(e)
                }
            })
        });

        Ok(Box::pin(fragments(body)))
    }
}

/// Turn a raw SSE byte stream into text fragments
///
/// Ends after `response.completed`, `[DONE]`, or the end of the body. The
/// first error (transport, decode, or an error event) is yielded and ends
/// the stream.
pub fn fragments<B, C>(body: B) -> impl Stream<Item = Result<String, ChatError>> + Send
where
    B: Stream<Item = Result<C, ChatError>> + Send + 'static,
    C: AsRef<[u8]> + Send + 'static,
{
    let state = FragmentState {
        body: Box::pin(body),
        decoder: SseDecoder::new(),
        pending: VecDeque::new(),
        finished: false,
    };

    stream::unfold(state, |mut state| async move {
        loop {
            if let Some(item) = state.pending.pop_front() {
                return Some((item, state));
            }
            if state.finished {
                return None;
            }

            match state.body.next().await {
                Some(Ok(chunk)) => {
                    for event in state.decoder.push(chunk.as_ref()) {
                        state.handle(event);
                        if state.finished {
                            break;
                        }
                    }
                }
                Some(Err(e)) => state.fail(e),
                None => {
                    if let Some(event) = state.decoder.finish() {
                        state.handle(event);
                    }
                    state.finished = true;
                }
            }
        }
    })
}

struct FragmentState<B> {
    body: Pin<Box<B>>,
    decoder: SseDecoder,
    pending: VecDeque<Result<String, ChatError>>,
    finished: bool,
}

impl<B> FragmentState<B> {
    fn handle(&mut self, event: SseEvent) {
        if event.data == "[DONE]" {
            self.finished = true;
            return;
        }

        let parsed: ResponseEvent = match serde_json::from_str(&event.data) {
            Ok(parsed) => parsed,
            Err(e) => return self.fail(e.into()),
        };

        if let Some(message) = parsed.error_message() {
            return self.fail(ChatError::Api(message));
        }

        match parsed {
            ResponseEvent::OutputTextDelta { delta, .. } => self.pending.push_back(Ok(delta)),
            ResponseEvent::WebSearchSearching { item_id } => {
                debug!("Web search running ({})", item_id.as_deref().unwrap_or("-"))
            }
            ResponseEvent::Completed => self.finished = true,
            _ => {}
        }
    }

    fn fail(&mut self, err: ChatError) {
        self.pending.push_back(Err(err));
        self.finished = true;
    }
}
