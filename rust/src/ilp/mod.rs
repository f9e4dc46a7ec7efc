//! ILP model generation.
//!
//! Turns a task graph into a time-indexed integer program and writes it in
//! LP text format for an external MILP solver.

mod builder;
mod expr;
mod format;
mod model;

pub use builder::{build_model, ModelBuilder};
pub use expr::{ConstraintRow, LinearExpr, Relation, Var};
pub use model::{LpModel, Section};
