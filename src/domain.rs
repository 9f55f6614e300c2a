//! Domain models for engineering documents.
//!
//! This module contains the core domain types: physical quantities with
//! units, immutable parameter sets, and the system/requirement tree.

/// Physical quantities and the unit registry.
pub mod quantity;
pub use quantity::{Dimension, Quantity, QuantityError, Unit};

/// Immutable named parameter sets.
pub mod parameters;
pub use parameters::{ParameterValue, Parameters, ParametersBuilder, ParametersError};

/// The system/requirement decomposition tree.
pub mod system;
pub use system::{Function, Requirement, System};
