//! Core domain models
//!
//! This module defines the state threaded through a run, the steps that
//! transform it, and the linear pipelines that order them.

pub mod config;
pub mod error;
pub mod graph;
pub mod pipeline;
pub mod state;
pub mod step;

pub use error::*;
pub use graph::{GraphBuilder, END, START};
pub use pipeline::*;
pub use state::*;
pub use step::*;
