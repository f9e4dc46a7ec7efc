//! Check-then-build pipeline.

use std::io::{self, Write};
use thiserror::Error;

use crate::config::{ConfigError, ModelConfig};
use crate::feasibility::check_verbose;
use crate::graph::TaskGraph;
use crate::ilp::{LpModel, ModelBuilder};
use crate::log_summary;

/// Errors that stop a model from being generated.
#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("Node {node} alone demands {demand}, above the memory budget")]
    MemoryInfeasible { node: String, demand: u64 },
    #[error("Latency budget is below the critical path length {critical_path_length}")]
    LatencyInfeasible { critical_path_length: usize },
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("Failed to write model: {0}")]
    Io(#[from] io::Error),
}

/// Validate the config, run the feasibility check, then build the model.
///
/// An infeasible verdict aborts before any row is generated.
pub fn generate_model(graph: &TaskGraph, config: &ModelConfig) -> Result<LpModel, GenerateError> {
    let (objective, _) = config.validate()?;

    check_verbose(graph, config.max_memory, config.max_latency, config.verbosity)
        .into_result()?;

    Ok(ModelBuilder::new(graph, config.max_latency)
        .with_max_memory(config.max_memory)
        .with_objective(objective)
        .with_verbosity(config.verbosity)
        .build())
}

/// Generate the model and serialize it to LP text.
pub fn generate_lp(graph: &TaskGraph, config: &ModelConfig) -> Result<String, GenerateError> {
    let serialize = config.serialize_config()?;
    Ok(generate_model(graph, config)?.to_lp_string(&serialize))
}

/// Generate the model and write it to `writer` in one pass.
pub fn write_lp<W: Write>(
    graph: &TaskGraph,
    config: &ModelConfig,
    writer: &mut W,
) -> Result<(), GenerateError> {
    let serialize = config.serialize_config()?;
    let model = generate_model(graph, config)?;
    model.write_to(writer, &serialize)?;
    log_summary!(config.verbosity, "[pipeline] wrote {} rows", model.row_count());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ilp::Section;

    #[test]
    fn test_latency_infeasible_aborts() {
        let graph = TaskGraph::from_edges([("A", "B", 3), ("B", "C", 4)]);
        let err = generate_model(&graph, &ModelConfig::with_bounds(2, None)).unwrap_err();
        assert!(matches!(
            err,
            GenerateError::LatencyInfeasible {
                critical_path_length: 3
            }
        ));
    }

    #[test]
    fn test_memory_infeasible_aborts() {
        let graph = TaskGraph::from_edges([("A", "B", 5), ("A", "C", 5)]);
        let err = generate_model(&graph, &ModelConfig::with_bounds(5, Some(7))).unwrap_err();
        match err {
            GenerateError::MemoryInfeasible { node, demand } => {
                assert_eq!(node, "A");
                assert_eq!(demand, 10);
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_invalid_config_reported() {
        let graph = TaskGraph::from_edges([("A", "B", 1)]);
        let config = ModelConfig {
            objective: "speed".to_string(),
            ..ModelConfig::with_bounds(3, None)
        };
        assert!(matches!(
            generate_model(&graph, &config),
            Err(GenerateError::Config(ConfigError::UnknownObjective(_)))
        ));
        assert!(matches!(
            generate_model(&graph, &ModelConfig::with_bounds(0, None)),
            Err(GenerateError::Config(ConfigError::InvalidLatency(0)))
        ));
    }

    #[test]
    fn test_feasible_graph_builds() {
        let graph = TaskGraph::from_edges([("A", "B", 2)]);
        let model = generate_model(&graph, &ModelConfig::with_bounds(3, None)).unwrap();
        assert_eq!(model.rows(Section::Assignment).len(), 2);
        assert_eq!(model.rows(Section::Precedence).len(), 1);
        assert_eq!(model.variable_count(), 6);
    }

    #[test]
    fn test_write_lp_matches_generate_lp() {
        let graph = TaskGraph::from_edges([("A", "B", 2), ("B", "C", 1)]);
        let config = ModelConfig {
            objective: "memory".to_string(),
            ..ModelConfig::with_bounds(4, Some(2))
        };

        let mut buf = Vec::new();
        write_lp(&graph, &config, &mut buf).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), generate_lp(&graph, &config).unwrap());
    }
}
