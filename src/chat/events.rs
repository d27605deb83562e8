//! Responses API streaming event types

use serde::Deserialize;
use serde_json::Value;

/// Events carried in the `data:` payload of a streamed response
///
/// Only the events this crate acts on are modelled; everything else
/// deserializes to [`ResponseEvent::Other`].
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum ResponseEvent {
    /// Response object created
    #[serde(rename = "response.created")]
    Created,

    /// Generation in progress
    #[serde(rename = "response.in_progress")]
    InProgress,

    /// Text fragment
    #[serde(rename = "response.output_text.delta")]
    OutputTextDelta {
        delta: String,
        #[serde(default)]
        item_id: Option<String>,
    },

    /// Text part finished; `text` is the full part
    #[serde(rename = "response.output_text.done")]
    OutputTextDone {
        #[serde(default)]
        text: Option<String>,
    },

    /// Web search started
    #[serde(rename = "response.web_search_call.in_progress")]
    WebSearchInProgress {
        #[serde(default)]
        item_id: Option<String>,
    },

    /// Web search running
    #[serde(rename = "response.web_search_call.searching")]
    WebSearchSearching {
        #[serde(default)]
        item_id: Option<String>,
    },

    /// Web search finished
    #[serde(rename = "response.web_search_call.completed")]
    WebSearchCompleted {
        #[serde(default)]
        item_id: Option<String>,
    },

    /// Response finished successfully
    #[serde(rename = "response.completed")]
    Completed,

    /// Response failed; the payload carries the error
    #[serde(rename = "response.failed")]
    Failed { response: Value },

    /// Stream-level error
    #[serde(rename = "error")]
    Error {
        message: String,
        #[serde(default)]
        code: Option<String>,
    },

    #[serde(other)]
    Other,
}

impl ResponseEvent {
    /// Error text for failure events
    pub fn error_message(&self) -> Option<String> {
        match self {
            ResponseEvent::Error { message, code } => Some(match code {
                Some(code) => format!("{} ({})", message, code),
                None => message.clone(),
            }),
            ResponseEvent::Failed { response } => Some(
                response
                    .pointer("/error/message")
                    .and_then(Value::as_str)
                    .unwrap_or("response failed")
                    .to_string(),
            ),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_text_delta() {
        let json = r#"{"type":"response.output_text.delta","item_id":"msg_1","output_index":1,"content_index":0,"delta":"Sunny"}"#;
        let event: ResponseEvent = serde_json::from_str(json).unwrap();

        assert_eq!(
            event,
            ResponseEvent::OutputTextDelta {
                delta: "Sunny".to_string(),
                item_id: Some("msg_1".to_string()),
            }
        );
    }

    #[test]
    fn test_unit_events_ignore_payload() {
        let json = r#"{"type":"response.completed","response":{"id":"resp_1","status":"completed"}}"#;
        let event: ResponseEvent = serde_json::from_str(json).unwrap();
        assert_eq!(event, ResponseEvent::Completed);
    }

    #[test]
    fn test_web_search_events() {
        let json = r#"{"type":"response.web_search_call.searching","item_id":"ws_1","output_index":0}"#;
        let event: ResponseEvent = serde_json::from_str(json).unwrap();
        assert_eq!(
            event,
            ResponseEvent::WebSearchSearching { item_id: Some("ws_1".to_string()) }
        );
    }

    #[test]
    fn test_ignored_events_tolerate_missing_fields() {
        let event: ResponseEvent =
            serde_json::from_str(r#"{"type":"response.web_search_call.completed","output_index":0}"#)
                .unwrap();
        assert_eq!(event, ResponseEvent::WebSearchCompleted { item_id: None });

        let event: ResponseEvent =
            serde_json::from_str(r#"{"type":"response.output_text.done"}"#).unwrap();
        assert_eq!(event, ResponseEvent::OutputTextDone { text: None });
    }

    #[test]
    fn test_unknown_event_is_other() {
        let json = r#"{"type":"response.content_part.added","part":{}}"#;
        let event: ResponseEvent = serde_json::from_str(json).unwrap();
        assert_eq!(event, ResponseEvent::Other);
    }

    #[test]
    fn test_error_messages() {
        let error: ResponseEvent =
            serde_json::from_str(r#"{"type":"error","message":"rate limited","code":"429"}"#).unwrap();
        assert_eq!(error.error_message().as_deref(), Some("rate limited (429)"));

        let failed: ResponseEvent = serde_json::from_str(
            r#"{"type":"response.failed","response":{"error":{"message":"server overloaded"}}}"#,
        )
        .unwrap();
        assert_eq!(failed.error_message().as_deref(), Some("server overloaded"));

        assert_eq!(ResponseEvent::Completed.error_message(), None);
    }
}
