//! State models: the record threaded through steps and the run state machine

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The record passed from step to step
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppState {
    pub foo: String,
}

impl AppState {
    pub fn new(foo: impl Into<String>) -> Self {
        Self { foo: foo.into() }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new("bar")
    }
}

/// Where a run currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunStatus {
    /// `run` has not been invoked yet
    NotStarted,
    /// Applying the step at `step_index`
    Running { step_index: usize },
    /// Exit sentinel reached
    Completed,
}

/// Bookkeeping for a single pipeline run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunState {
    /// Unique execution ID
    pub execution_id: Uuid,

    /// Current position in the walk
    pub status: RunStatus,

    /// When the walk left the entry node
    pub started_at: Option<DateTime<Utc>>,

    /// When the walk reached the exit node
    pub completed_at: Option<DateTime<Utc>>,

    /// Total number of steps
    pub total_steps: usize,

    /// Number of steps applied successfully
    pub completed_steps: usize,
}

impl RunState {
    /// Create a fresh run state
    pub fn new() -> Self {
        Self {
            execution_id: Uuid::new_v4(),
            status: RunStatus::NotStarted,
            started_at: None,
            completed_at: None,
            total_steps: 0,
            completed_steps: 0,
        }
    }

    /// NotStarted -> Running(0)
    pub fn start(&mut self, total_steps: usize) {
        self.status = RunStatus::Running { step_index: 0 };
        self.started_at = Some(Utc::now());
        self.total_steps = total_steps;
    }

    /// Running(i) -> Running(i + 1), or Completed after the last step
    pub fn advance(&mut self) {
        self.completed_steps += 1;
        self.status = if self.completed_steps >= self.total_steps {
            self.completed_at = Some(Utc::now());
            RunStatus::Completed
        } else {
            RunStatus::Running {
                step_index: self.completed_steps,
            }
        };
    }

    pub fn is_completed(&self) -> bool {
        self.status == RunStatus::Completed
    }

    /// Calculate progress percentage (0.0 to 1.0)
    pub fn progress(&self) -> f64 {
        if self.total_steps == 0 {
            return 0.0;
        }
        self.completed_steps as f64 / self.total_steps as f64
    }
}

impl Default for RunState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_state_default() {
        assert_eq!(AppState::default().foo, "bar");
    }

    #[test]
    fn test_app_state_json_shape() {
        let json = serde_json::to_string(&AppState::new("baz")).unwrap();
        assert_eq!(json, r#"{"foo":"baz"}"#);
    }

    #[test]
    fn test_run_state_transitions() {
        let mut state = RunState::new();
        assert_eq!(state.status, RunStatus::NotStarted);
        assert!(state.started_at.is_none());

        state.start(3);
        assert_eq!(state.status, RunStatus::Running { step_index: 0 });
        assert!(state.started_at.is_some());

        state.advance();
        assert_eq!(state.status, RunStatus::Running { step_index: 1 });
        state.advance();
        assert_eq!(state.status, RunStatus::Running { step_index: 2 });
        assert!(!state.is_completed());

        state.advance();
        assert!(state.is_completed());
        assert!(state.completed_at.is_some());
        assert_eq!(state.completed_steps, 3);
    }

    #[test]
    fn test_run_progress() {
        let mut state = RunState::new();
        assert_eq!(state.progress(), 0.0);

        state.start(4);
        state.advance();
        state.advance();
        assert_eq!(state.progress(), 0.5);
    }
}
