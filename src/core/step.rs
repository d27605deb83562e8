//! Step domain model

use crate::core::{error::StepFailure, state::AppState};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Signature every step implements
pub type StepFn<S> = dyn Fn(S) -> Result<S, StepFailure> + Send + Sync;

/// A named transformation from state to state
///
/// Steps are registered once before execution and never change afterwards,
/// so the function is `Fn` and shared behind an `Arc`.
pub struct Step<S> {
    name: String,
    func: Arc<StepFn<S>>,
}

impl<S> Step<S> {
    /// Create a step from a function
    pub fn new<F>(name: impl Into<String>, func: F) -> Self
    where
        F: Fn(S) -> Result<S, StepFailure> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            func: Arc::new(func),
        }
    }

    /// Unique step name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Apply the step to a state
    pub fn apply(&self, state: S) -> Result<S, StepFailure> {
        (self.func)(state)
    }
}

impl<S> Clone for Step<S> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            func: Arc::clone(&self.func),
        }
    }
}

impl<S> fmt::Debug for Step<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Step").field("name", &self.name).finish_non_exhaustive()
    }
}

/// Built-in transformations on [`AppState`], selectable from YAML
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum StepAction {
    /// Append `value` to `foo`
    Append { value: String },
    /// Prepend `value` to `foo`
    Prepend { value: String },
    /// Replace `foo` with `value`
    Replace { value: String },
    /// Always fail with `message`
    Fail { message: String },
}

impl StepAction {
    /// Apply the action to a state
    pub fn apply(&self, mut state: AppState) -> Result<AppState, StepFailure> {
        match self {
            StepAction::Append { value } => state.foo.push_str(value),
            StepAction::Prepend { value } => state.foo.insert_str(0, value),
            StepAction::Replace { value } => state.foo = value.clone(),
            StepAction::Fail { message } => return Err(message.clone().into()),
        }
        Ok(state)
    }

    /// Wrap the action into a named step
    pub fn into_step(self, name: impl Into<String>) -> Step<AppState> {
        Step::new(name, move |state| self.apply(state))
    }
}
