//! Main execution engine - walks a pipeline from entry to exit

use crate::core::{
    error::StepExecutionError,
    pipeline::{Node, Pipeline},
    state::RunState,
};
use std::sync::Arc;
use tracing::{debug, error, info};
use uuid::Uuid;

/// Events that can occur during pipeline execution
#[derive(Debug, Clone, PartialEq)]
pub enum ExecutionEvent {
    PipelineStarted {
        execution_id: Uuid,
        pipeline_name: String,
    },
    StepStarted {
        step: String,
        index: usize,
    },
    StepCompleted {
        step: String,
        index: usize,
    },
    StepFailed {
        step: String,
        error: String,
    },
    PipelineCompleted {
        execution_id: Uuid,
    },
}

/// Type for event handlers
pub type EventHandler = Arc<dyn Fn(&ExecutionEvent) + Send + Sync>;

/// Result of a completed run
#[derive(Debug, Clone)]
pub struct RunOutcome<S> {
    /// State returned by the last step
    pub state: S,

    /// Run bookkeeping, always `Completed`
    pub run: RunState,

    /// Names of the applied steps, in order
    pub executed: Vec<String>,
}

/// Synchronous pipeline execution engine
#[derive(Clone, Default)]
pub struct ExecutionEngine {
    event_handlers: Vec<EventHandler>,
}

impl ExecutionEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an event handler
    pub fn add_event_handler<F>(&mut self, handler: F)
    where
        F: Fn(&ExecutionEvent) + Send + Sync + 'static,
    {
        self.event_handlers.push(Arc::new(handler));
    }

    /// Emit an event to all handlers
    fn emit_event(&self, event: ExecutionEvent) {
        for handler in &self.event_handlers {
            handler(&event);
        }
    }

    /// Execute the pipeline on `initial`
    ///
    /// Each step receives the state returned by its predecessor. A failing
    /// step stops the walk and no state is returned.
    pub fn execute<S>(
        &self,
        pipeline: &Pipeline<S>,
        initial: S,
    ) -> Result<RunOutcome<S>, StepExecutionError> {
        let mut run = RunState::new();
        let execution_id = run.execution_id;

        info!(
            "Starting pipeline execution: {} ({})",
            pipeline.name, execution_id
        );
        self.emit_event(ExecutionEvent::PipelineStarted {
            execution_id,
            pipeline_name: pipeline.name.clone(),
        });

        run.start(pipeline.len());

        let mut state = initial;
        let mut executed = Vec::with_capacity(pipeline.len());
        let mut node = Node::Entry;

        while let Some(next) = pipeline.successor(node) {
            node = next;
            let Node::Step(index) = node else {
                continue;
            };

            let step = &pipeline.steps()[index];
            debug!("Running step {} ({}/{})", step.name(), index + 1, pipeline.len());
            self.emit_event(ExecutionEvent::StepStarted {
                step: step.name().to_string(),
                index,
            });

            state = match step.apply(state) {
                Ok(next_state) => next_state,
                Err(source) => {
                    error!("Step {} failed: {}", step.name(), source);
                    self.emit_event(ExecutionEvent::StepFailed {
                        step: step.name().to_string(),
                        error: source.to_string(),
                    });
                    return Err(StepExecutionError {
                        step: step.name().to_string(),
                        source,
                    });
                }
            };

            run.advance();
            executed.push(step.name().to_string());
            self.emit_event(ExecutionEvent::StepCompleted {
                step: step.name().to_string(),
                index,
            });
        }

        info!(
            "Pipeline execution finished: {} ({} steps)",
            pipeline.name, run.completed_steps
        );
        self.emit_event(ExecutionEvent::PipelineCompleted { execution_id });

        Ok(RunOutcome {
            state,
            run,
            executed,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{
        pipeline::build_pipeline,
        state::{AppState, RunStatus},
        step::{Step, StepAction},
    };
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    fn append(name: &str) -> Step<AppState> {
        StepAction::Append {
            value: format!("-{}", name),
        }
        .into_step(name)
    }

    #[test]
    fn test_outcome_records_run() {
        let pipeline = build_pipeline("demo", vec![append("a"), append("b")]).unwrap();
        let outcome = ExecutionEngine::new()
            .execute(&pipeline, AppState::new("x"))
            .unwrap();

        assert_eq!(outcome.state.foo, "x-a-b");
        assert_eq!(outcome.executed, vec!["a", "b"]);
        assert_eq!(outcome.run.status, RunStatus::Completed);
        assert_eq!(outcome.run.completed_steps, 2);
        assert!(outcome.run.completed_at.is_some());
    }

    #[test]
    fn test_events_in_order() {
        let pipeline = build_pipeline("demo", vec![append("a"), append("b")]).unwrap();
        let events = Arc::new(Mutex::new(Vec::new()));

        let mut engine = ExecutionEngine::new();
        let sink = events.clone();
        engine.add_event_handler(move |event| sink.lock().unwrap().push(event.clone()));

        let outcome = engine.execute(&pipeline, AppState::default()).unwrap();
        let events = events.lock().unwrap();

        assert_eq!(events.len(), 6);
        assert_eq!(
            events[0],
            ExecutionEvent::PipelineStarted {
                execution_id: outcome.run.execution_id,
                pipeline_name: "demo".to_string(),
            }
        );
        assert_eq!(
            events[1],
            ExecutionEvent::StepStarted { step: "a".to_string(), index: 0 }
        );
        assert_eq!(
            events[2],
            ExecutionEvent::StepCompleted { step: "a".to_string(), index: 0 }
        );
        assert_eq!(
            events[4],
            ExecutionEvent::StepCompleted { step: "b".to_string(), index: 1 }
        );
        assert_eq!(
            events[5],
            ExecutionEvent::PipelineCompleted {
                execution_id: outcome.run.execution_id
            }
        );
    }

    #[test]
    fn test_failure_stops_walk() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let after = Step::new("after", move |s: AppState| {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(s)
        });
        let boom = StepAction::Fail { message: "boom".to_string() }.into_step("boom");

        let pipeline = build_pipeline("failing", vec![append("a"), boom, after]).unwrap();

        let events = Arc::new(Mutex::new(Vec::new()));
        let mut engine = ExecutionEngine::new();
        let sink = events.clone();
        engine.add_event_handler(move |event| sink.lock().unwrap().push(event.clone()));

        let err = engine.execute(&pipeline, AppState::default()).unwrap_err();

        assert_eq!(err.step, "boom");
        assert_eq!(err.source.to_string(), "boom");
        assert_eq!(calls.load(Ordering::SeqCst), 0);

        let events = events.lock().unwrap();
        assert!(matches!(
            events.last(),
            Some(ExecutionEvent::StepFailed { step, .. }) if step == "boom"
        ));
        assert!(!events
            .iter()
            .any(|e| matches!(e, ExecutionEvent::PipelineCompleted { .. })));
    }
}
