//! Rust implementation of the DAG-to-ILP scheduling model generator.
//!
//! Turns a task dependency graph into a time-indexed integer linear program
//! that assigns every task to one of `L` discrete slots, respecting
//! dependencies and an optional per-slot memory budget. The model is written
//! in LP text format for an external MILP solver.

// Allow clippy warning triggered by PyO3 macro expansion
#![allow(clippy::useless_conversion)]

use pyo3::exceptions::{PyIOError, PyValueError};
use pyo3::prelude::*;

pub mod config;
pub mod critical_path;
pub mod feasibility;
pub mod graph;
pub mod ilp;
pub mod interner;
pub mod logging;
mod models;
pub mod pipeline;

pub use config::{ConfigError, GeneratorConfig, ModelConfig, Objective, SerializeConfig, VariableTyping};
pub use critical_path::{classify_paths, critical_path_length, PathClassification};
pub use feasibility::{check, FeasibilityResult};
pub use graph::{InputError, TaskGraph};
pub use ilp::{build_model, LpModel, ModelBuilder};
pub use models::{FeasibilityReport, PathReport, WeightedEdge};
pub use pipeline::{generate_lp, generate_model, write_lp, GenerateError};

fn input_err(e: InputError) -> PyErr {
    match e {
        InputError::Io(io) => PyIOError::new_err(io.to_string()),
        other => PyValueError::new_err(other.to_string()),
    }
}

fn generate_err(e: GenerateError) -> PyErr {
    match e {
        GenerateError::Io(io) => PyIOError::new_err(io.to_string()),
        other => PyValueError::new_err(other.to_string()),
    }
}

/// Run the feasibility pre-checks.
///
/// # Arguments
/// * `edges` - Weighted dependency edges
/// * `max_latency` - Number of available slots
/// * `max_memory` - Per-slot demand budget (None = unbounded)
/// * `nodes` - Extra nodes, listed first (allows isolated nodes)
///
/// # Returns
/// * FeasibilityReport; memory is checked before latency
#[pyfunction]
#[pyo3(signature = (edges, max_latency, max_memory=None, nodes=None))]
fn check_feasibility(
    edges: Vec<WeightedEdge>,
    max_latency: u32,
    max_memory: Option<u64>,
    nodes: Option<Vec<String>>,
) -> FeasibilityReport {
    let graph = models::build_graph(&edges, &nodes.unwrap_or_default());
    check(&graph, max_memory, max_latency).into()
}

/// Generate the LP text of the scheduling model.
///
/// # Arguments
/// * `edges` - Weighted dependency edges
/// * `config` - Model configuration (latency, memory, objective, formatting)
/// * `nodes` - Extra nodes, listed first
///
/// # Returns
/// * The model in LP format
///
/// # Raises
/// * ValueError if the configuration is invalid or the graph is infeasible
#[pyfunction]
#[pyo3(signature = (edges, config, nodes=None))]
fn generate_ilp(
    edges: Vec<WeightedEdge>,
    config: ModelConfig,
    nodes: Option<Vec<String>>,
) -> PyResult<String> {
    let graph = models::build_graph(&edges, &nodes.unwrap_or_default());
    generate_lp(&graph, &config).map_err(generate_err)
}

/// Generate the scheduling model and write it to `path`.
///
/// # Raises
/// * ValueError if the configuration is invalid or the graph is infeasible
/// * IOError if the file cannot be written
#[pyfunction]
#[pyo3(signature = (edges, config, path, nodes=None))]
fn write_ilp(
    edges: Vec<WeightedEdge>,
    config: ModelConfig,
    path: String,
    nodes: Option<Vec<String>>,
) -> PyResult<()> {
    let graph = models::build_graph(&edges, &nodes.unwrap_or_default());
    // Build before touching the file so an infeasible graph leaves no output behind
    let text = generate_lp(&graph, &config).map_err(generate_err)?;
    std::fs::write(&path, text).map_err(|e| PyIOError::new_err(e.to_string()))
}

/// Critical path length in nodes (unweighted longest path + 1).
#[pyfunction(name = "critical_path_length")]
#[pyo3(signature = (edges, nodes=None, verbosity=0))]
fn py_critical_path_length(
    edges: Vec<WeightedEdge>,
    nodes: Option<Vec<String>>,
    verbosity: u8,
) -> usize {
    let graph = models::build_graph(&edges, &nodes.unwrap_or_default());
    critical_path::critical_path_length_verbose(&graph, verbosity)
}

/// Enumerate all maximal paths and split them into critical and non-critical.
#[pyfunction(name = "classify_paths")]
#[pyo3(signature = (edges, nodes=None, verbosity=0))]
fn py_classify_paths(
    edges: Vec<WeightedEdge>,
    nodes: Option<Vec<String>>,
    verbosity: u8,
) -> PathReport {
    let graph = models::build_graph(&edges, &nodes.unwrap_or_default());
    PathReport::new(&critical_path::classify_paths_verbose(&graph, verbosity), &graph)
}

/// Read a weighted edge list (`source target weight` per line).
///
/// # Raises
/// * IOError if the file cannot be read
/// * ValueError if a line is malformed
#[pyfunction]
fn read_edgelist(path: String) -> PyResult<Vec<WeightedEdge>> {
    let graph = graph::read_edgelist(&path).map_err(input_err)?;
    Ok(models::graph_edges(&graph))
}

/// Write a weighted edge list.
#[pyfunction]
fn write_edgelist(edges: Vec<WeightedEdge>, path: String) -> PyResult<()> {
    let graph = models::build_graph(&edges, &[]);
    std::fs::write(&path, graph::format_edgelist(&graph))
        .map_err(|e| PyIOError::new_err(e.to_string()))
}

/// Generate a random weighted DAG for benchmarking.
#[pyfunction]
fn random_dag(config: GeneratorConfig) -> Vec<WeightedEdge> {
    models::graph_edges(&graph::random_dag(&config))
}

/// The dagilp.rust Python module.
#[pymodule]
fn rust(m: &Bound<'_, PyModule>) -> PyResult<()> {
    // Data types
    m.add_class::<WeightedEdge>()?;
    m.add_class::<FeasibilityReport>()?;
    m.add_class::<PathReport>()?;

    // Config types
    m.add_class::<ModelConfig>()?;
    m.add_class::<GeneratorConfig>()?;

    // Analysis and model generation
    m.add_function(wrap_pyfunction!(check_feasibility, m)?)?;
    m.add_function(wrap_pyfunction!(generate_ilp, m)?)?;
    m.add_function(wrap_pyfunction!(write_ilp, m)?)?;
    m.add_function(wrap_pyfunction!(py_critical_path_length, m)?)?;
    m.add_function(wrap_pyfunction!(py_classify_paths, m)?)?;

    // Graph I/O
    m.add_function(wrap_pyfunction!(read_edgelist, m)?)?;
    m.add_function(wrap_pyfunction!(write_edgelist, m)?)?;
    m.add_function(wrap_pyfunction!(random_dag, m)?)?;

    Ok(())
}
