//! Critical path analysis.
//!
//! Computes the structural lower bound on latency and enumerates every
//! maximal chain of the graph through a source/sink augmented copy. These
//! results are for reporting and pre-checks; the model builder does not
//! consume them.

mod analysis;
mod augment;

pub use analysis::{
    classify_paths, classify_paths_verbose, critical_path_length, critical_path_length_verbose,
    PathClassification,
};
pub use augment::{augment, AugmentedGraph, SINK_LABEL, SOURCE_LABEL};
