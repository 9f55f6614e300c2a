//! Engineering documents as code.
//!
//! Parameters, system trees and narrative content are described in Rust
//! modules, collected into an ordered document, and rendered to markdown
//! or an interactive browser view.

pub mod domain;
pub use domain::{
    Dimension, Function, ParameterValue, Parameters, ParametersBuilder, ParametersError, Quantity,
    QuantityError, Requirement, System, Unit,
};

pub mod document;
pub use document::{Document, DocumentConfig, Element, TableData};

/// Document module registration and orchestration.
pub mod pipeline;
pub use pipeline::{Category, Pipeline, PipelineError};

pub mod discover;

pub mod render;

/// Project configuration (`pyforge.toml`).
pub mod config;

pub mod cli;
pub use cli::Cli;

pub mod demo;
