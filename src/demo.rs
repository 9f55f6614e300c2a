//! The bundled heat-pump design report.
//!
//! A small but complete document project: typed parameters, a system tree
//! with requirements, a simulation result, and a report. The `pyforge`
//! binary serves this document, and the integration tests drive it.

/// Heat pump design parameters.
pub mod parameters;
/// The heat pump system tree.
pub mod systems;
/// Performance estimates derived from the parameters.
pub mod simulation;
/// Report assembly.
pub mod report;

use crate::{Category, Pipeline};

/// Builds the demo document pipeline.
///
/// Modules are registered under the same category/name pairs their source
/// files would carry on disk, so the pipeline runs in document order.
#[must_use]
pub fn pipeline() -> Pipeline {
    Pipeline::new()
        .with_module(Category::Parameters, "parameters_heatpump", parameters::emit)
        .with_module(Category::Systems, "systems_heatpump", systems::emit)
        .with_module(Category::Simulation, "simulation_heatpump", simulation::emit)
        .with_module(Category::Report, "report_heatpump", report::emit)
}
