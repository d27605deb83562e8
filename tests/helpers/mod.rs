//! Shared test utilities

#![allow(dead_code)]

use async_trait::async_trait;
use futures::stream;
use lingraph::chat::{ChatError, ChatModel, ChatRequest, FragmentStream};
use lingraph::core::{AppState, Step};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

/// Step that appends `-<name>` to `foo`
pub fn marker(name: &str) -> Step<AppState> {
    let suffix = format!("-{}", name);
    Step::new(name, move |mut state: AppState| {
        state.foo.push_str(&suffix);
        Ok(state)
    })
}

/// Step that appends `-<name>` and counts how often it ran
pub fn counted_marker(name: &str, calls: Arc<AtomicUsize>) -> Step<AppState> {
    let suffix = format!("-{}", name);
    Step::new(name, move |mut state: AppState| {
        calls.fetch_add(1, Ordering::SeqCst);
        state.foo.push_str(&suffix);
        Ok(state)
    })
}

/// Step that always fails with `message`
pub fn failing(name: &str, message: &'static str) -> Step<AppState> {
    Step::new(name, move |_state: AppState| Err(message.into()))
}

/// Serializes tests that touch the process environment
static ENV_LOCK: Mutex<()> = Mutex::new(());

/// Snapshot of a set of environment variables, restored on drop
pub struct EnvSnapshot {
    saved: Vec<(String, Option<String>)>,
    _guard: MutexGuard<'static, ()>,
}

impl EnvSnapshot {
    pub fn take(keys: &[&str]) -> Self {
        let guard = ENV_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        let saved = keys
            .iter()
            .map(|key| (key.to_string(), std::env::var(key).ok()))
            .collect();
        Self {
            saved,
            _guard: guard,
        }
    }
}

impl Drop for EnvSnapshot {
    fn drop(&mut self) {
        for (key, value) in &self.saved {
            match value {
                Some(value) => std::env::set_var(key, value),
                None => std::env::remove_var(key),
            }
        }
    }
}

/// Chat model that replays scripted fragments
pub struct ScriptedChatModel {
    replies: Arc<Vec<Vec<Result<String, String>>>>,
    index: Arc<AtomicUsize>,
    requests: Arc<Mutex<Vec<ChatRequest>>>,
}

impl ScriptedChatModel {
    /// Each reply is a list of fragments; `Err` entries become API errors
    pub fn new(replies: Vec<Vec<Result<&str, &str>>>) -> Self {
        let replies = replies
            .into_iter()
            .map(|reply| {
                reply
                    .into_iter()
                    .map(|f| f.map(str::to_string).map_err(str::to_string))
                    .collect()
            })
            .collect();
        Self {
            replies: Arc::new(replies),
            index: Arc::new(AtomicUsize::new(0)),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Requests received so far
    pub fn requests(&self) -> Vec<ChatRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChatModel for ScriptedChatModel {
    async fn stream(&self, request: &ChatRequest) -> Result<FragmentStream, ChatError> {
        self.requests.lock().unwrap().push(request.clone());

        let idx = self.index.fetch_add(1, Ordering::SeqCst);
        let reply = self.replies.get(idx).cloned().ok_or_else(|| {
            ChatError::Api(format!("ScriptedChatModel: no reply for request {}", idx + 1))
        })?;

        Ok(Box::pin(stream::iter(
            reply.into_iter().map(|f| f.map_err(ChatError::Api)),
        )))
    }
}
