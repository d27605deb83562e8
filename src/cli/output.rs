//! CLI output formatting

use crate::{
    core::{AppState, RunState, RunStatus},
    execution::ExecutionEvent,
};
use console::Emoji;

// Re-export style
pub use console::style;

// Emojis for output
pub static CHECK: Emoji<'_, '_> = Emoji("✅ ", "✓ ");
pub static CROSS: Emoji<'_, '_> = Emoji("❌ ", "✗ ");
pub static SPINNER: Emoji<'_, '_> = Emoji("⏳ ", "~ ");
pub static INFO: Emoji<'_, '_> = Emoji("ℹ️  ", "i ");
pub static ROCKET: Emoji<'_, '_> = Emoji("🚀 ", "> ");

/// Format a run status for display
pub fn format_status(status: RunStatus) -> String {
    match status {
        RunStatus::NotStarted => style("NOT STARTED").dim().to_string(),
        RunStatus::Running { step_index } => {
            style(format!("RUNNING (step {})", step_index + 1)).yellow().to_string()
        }
        RunStatus::Completed => style("COMPLETED").green().to_string(),
    }
}

/// Format an execution event for display
pub fn format_execution_event(event: &ExecutionEvent) -> String {
    match event {
        ExecutionEvent::PipelineStarted {
            execution_id,
            pipeline_name,
        } => format!(
            "{} Starting pipeline {} ({})",
            ROCKET,
            style(pipeline_name).bold(),
            style(&execution_id.to_string()[..8]).dim()
        ),
        ExecutionEvent::StepStarted { step, index } => {
            format!("{} [{}] {}", SPINNER, index + 1, style(step).cyan())
        }
        ExecutionEvent::StepCompleted { step, .. } => {
            format!("{} {}", CHECK, style(step).green())
        }
        ExecutionEvent::StepFailed { step, error } => {
            format!("{} {}: {}", CROSS, style(step).red(), style(error).dim())
        }
        ExecutionEvent::PipelineCompleted { execution_id } => format!(
            "{} Pipeline ({}) {}",
            INFO,
            style(&execution_id.to_string()[..8]).dim(),
            style("completed").green()
        ),
    }
}

/// Format the final state the way the run prints it
pub fn format_state(state: &AppState) -> String {
    format!("{{foo: {:?}}}", state.foo)
}

/// One-line run summary
pub fn format_run_summary(name: &str, run: &RunState) -> String {
    let marker = if run.is_completed() { &CHECK } else { &SPINNER };
    format!(
        "{} {} - {} ({}/{}, {:.0}%)",
        marker,
        style(name).bold(),
        format_status(run.status),
        run.completed_steps,
        run.total_steps,
        run.progress() * 100.0
    )
}
