//! Built-in demo graph and conversation

use crate::chat::{ChatMessage, ChatRequest, ToolSpec};
use crate::core::{AppState, ConfigurationError, GraphBuilder, Pipeline, StepFailure, END, START};

pub fn w_1(mut state: AppState) -> Result<AppState, StepFailure> {
    state.foo = format!("{}-w_1", state.foo);
    Ok(state)
}

pub fn w_2(mut state: AppState) -> Result<AppState, StepFailure> {
    state.foo = format!("{}-w_2", state.foo);
    Ok(state)
}

pub fn w_3(mut state: AppState) -> Result<AppState, StepFailure> {
    state.foo = format!("{}-w_3", state.foo);
    Ok(state)
}

/// START -> w_1 -> w_2 -> w_3 -> END
pub fn demo_graph() -> Result<Pipeline<AppState>, ConfigurationError> {
    let mut graph = GraphBuilder::new("demo");

    graph.add_step("w_1", w_1);
    graph.add_step("w_2", w_2);
    graph.add_step("w_3", w_3);

    graph.add_edge(START, "w_1");
    graph.add_edge("w_1", "w_2");
    graph.add_edge("w_2", "w_3");
    graph.add_edge("w_3", END);

    graph.compile()
}

/// The weather conversation with web search bound
///
/// `question` replaces the final user turn.
pub fn weather_request(question: Option<&str>) -> ChatRequest {
    let mut request = ChatRequest::new(vec![
        ChatMessage::system("You are a helpful weather assistant. Be brief."),
        ChatMessage::human("My name is Simon"),
        ChatMessage::ai("Hello Simon, nice to meet you. How can I help you today?"),
    ])
    .bind_tools([ToolSpec::WebSearchPreview]);

    request.push(ChatMessage::human(
        question.unwrap_or("what is the weather in sf"),
    ));
    request
}
