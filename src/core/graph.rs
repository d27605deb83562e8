//! Node and edge wiring that compiles into a linear [`Pipeline`]

use crate::core::{
    error::{ConfigurationError, StepFailure},
    pipeline::{build_pipeline, Pipeline},
    step::Step,
};
use std::collections::{HashMap, HashSet};

/// Name of the entry sentinel
pub const START: &str = "__start__";

/// Name of the exit sentinel
pub const END: &str = "__end__";

/// Collects steps and edges, then checks they form a single chain
#[derive(Debug)]
pub struct GraphBuilder<S> {
    name: String,
    steps: Vec<Step<S>>,
    edges: Vec<(String, String)>,
}

impl<S> GraphBuilder<S> {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            steps: Vec::new(),
            edges: Vec::new(),
        }
    }

    /// Register a step from a function
    pub fn add_step<F>(&mut self, name: impl Into<String>, func: F) -> &mut Self
    where
        F: Fn(S) -> Result<S, StepFailure> + Send + Sync + 'static,
    {
        self.steps.push(Step::new(name, func));
        self
    }

    /// Register an existing step
    pub fn add_node(&mut self, step: Step<S>) -> &mut Self {
        self.steps.push(step);
        self
    }

    /// Connect two nodes; use [`START`] and [`END`] for the sentinels
    pub fn add_edge(&mut self, from: impl Into<String>, to: impl Into<String>) -> &mut Self {
        self.edges.push((from.into(), to.into()));
        self
    }

    /// Validate the wiring and produce the pipeline in chain order
    pub fn compile(self) -> Result<Pipeline<S>, ConfigurationError> {
        if self.steps.is_empty() {
            return Err(ConfigurationError::EmptyPipeline);
        }

        let mut known: HashSet<&str> = HashSet::new();
        for step in &self.steps {
            let name = step.name();
            if name == START || name == END || !known.insert(name) {
                return Err(ConfigurationError::DuplicateStep(name.to_string()));
            }
        }

        let mut successors: HashMap<&str, &str> = HashMap::new();
        let mut predecessors: HashMap<&str, &str> = HashMap::new();

        for (from, to) in &self.edges {
            let (from, to) = (from.as_str(), to.as_str());

            if from == END || to == START {
                return Err(ConfigurationError::InvalidEdge {
                    from: from.to_string(),
                    to: to.to_string(),
                });
            }
            for node in [from, to] {
                if node != START && node != END && !known.contains(node) {
                    return Err(ConfigurationError::UnknownStep(node.to_string()));
                }
            }

            if let Some(first) = successors.insert(from, to) {
                return Err(ConfigurationError::Branching {
                    from: from.to_string(),
                    first: first.to_string(),
                    second: to.to_string(),
                });
            }
            if let Some(first) = predecessors.insert(to, from) {
                return Err(ConfigurationError::MultiplePredecessors {
                    to: to.to_string(),
                    first: first.to_string(),
                    second: from.to_string(),
                });
            }
        }

        let mut order: Vec<&str> = Vec::with_capacity(self.steps.len());
        let mut current = *successors
            .get(START)
            .ok_or(ConfigurationError::MissingEntry)?;

        while current != END {
            if order.len() >= self.steps.len() {
                return Err(ConfigurationError::MissingExit);
            }
            order.push(current);
            current = successors
                .get(current)
                .copied()
                .ok_or(ConfigurationError::MissingExit)?;
        }

        if let Some(orphan) = self.steps.iter().find(|s| !order.contains(&s.name())) {
            return Err(ConfigurationError::Unreachable(orphan.name().to_string()));
        }

        let position: HashMap<&str, usize> =
            order.iter().enumerate().map(|(i, name)| (*name, i)).collect();
        let mut steps = self.steps.clone();
        steps.sort_by_key(|s| position[s.name()]);

        build_pipeline(self.name, steps)
    }
}
