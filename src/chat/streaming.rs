//! Consuming fragment streams
//!
//! A [`FragmentStream`] yields text pieces in arrival order. The full message
//! is their plain concatenation; [`drain`] builds it while optionally handing
//! each piece to a [`FragmentCallback`] for live display.

use crate::chat::{ChatError, FragmentStream};
use futures::StreamExt;

/// Callback for processing fragments as they arrive
///
/// This trait is object-safe and can be used as `&dyn FragmentCallback`.
pub trait FragmentCallback: Send + Sync {
    /// Called once per fragment, in arrival order
    fn on_fragment(&self, fragment: &str);
}

/// No-op callback
#[derive(Debug, Clone, Default)]
pub struct NoopCallback;

impl FragmentCallback for NoopCallback {
    fn on_fragment(&self, _fragment: &str) {}
}

/// Read a stream to the end, forwarding each fragment to `callback`
///
/// Stops at the first error; fragments received before it are discarded.
pub async fn drain(
    mut stream: FragmentStream,
    callback: Option<&dyn FragmentCallback>,
) -> Result<String, ChatError> {
    let mut text = String::new();
    while let Some(fragment) = stream.next().await {
        let fragment = fragment?;
        if let Some(cb) = callback {
            cb.on_fragment(&fragment);
        }
        text.push_str(&fragment);
    }
    Ok(text)
}

/// Concatenate every fragment of a stream
pub async fn collect_text(stream: FragmentStream) -> Result<String, ChatError> {
    drain(stream, None).await
}
