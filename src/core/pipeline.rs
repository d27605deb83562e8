//! Pipeline domain model

use crate::core::{
    error::{ConfigurationError, PipelineError, StepExecutionError},
    step::Step,
};
use crate::execution::ExecutionEngine;
use std::collections::HashMap;

/// A position in the linear chain
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Node {
    /// Entry sentinel, before the first step
    Entry,
    /// The step at this index
    Step(usize),
    /// Exit sentinel, after the last step
    Exit,
}

/// An ordered, non-branching chain of steps between entry and exit
#[derive(Debug, Clone)]
pub struct Pipeline<S> {
    /// Pipeline name
    pub name: String,

    /// Steps in execution order
    steps: Vec<Step<S>>,

    /// Step name -> position in `steps`
    index: HashMap<String, usize>,
}

/// Build the chain entry -> step1 -> ... -> stepN -> exit
///
/// Fails when the sequence is empty or two steps share a name.
pub fn build_pipeline<S>(
    name: impl Into<String>,
    steps: Vec<Step<S>>,
) -> Result<Pipeline<S>, ConfigurationError> {
    if steps.is_empty() {
        return Err(ConfigurationError::EmptyPipeline);
    }

    let mut index = HashMap::with_capacity(steps.len());
    for (i, step) in steps.iter().enumerate() {
        if index.insert(step.name().to_string(), i).is_some() {
            return Err(ConfigurationError::DuplicateStep(step.name().to_string()));
        }
    }

    Ok(Pipeline {
        name: name.into(),
        steps,
        index,
    })
}

/// Build a pipeline from `steps` and run it on `initial` in one go
pub fn build_and_run<S>(
    name: impl Into<String>,
    steps: Vec<Step<S>>,
    initial: S,
) -> Result<S, PipelineError> {
    let pipeline = build_pipeline(name, steps)?;
    Ok(pipeline.run(initial)?)
}

impl<S> Pipeline<S> {
    /// Get a step by name
    pub fn step(&self, name: &str) -> Option<&Step<S>> {
        self.index.get(name).map(|&i| &self.steps[i])
    }

    /// Steps in execution order
    pub fn steps(&self) -> &[Step<S>] {
        &self.steps
    }

    /// Step names in execution order
    pub fn step_names(&self) -> Vec<&str> {
        self.steps.iter().map(|s| s.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// The single successor of a node; `None` only for the exit sentinel
    pub fn successor(&self, node: Node) -> Option<Node> {
        match node {
            Node::Entry => Some(Node::Step(0)),
            Node::Step(i) if i + 1 < self.steps.len() => Some(Node::Step(i + 1)),
            Node::Step(_) => Some(Node::Exit),
            Node::Exit => None,
        }
    }

    /// Run the pipeline on an initial state and return the final state
    ///
    /// Steps are applied strictly in order. The first failing step aborts the
    /// walk and its error is returned; nothing after it runs.
    pub fn run(&self, initial: S) -> Result<S, StepExecutionError> {
        ExecutionEngine::new()
            .execute(self, initial)
            .map(|outcome| outcome.state)
    }
}
