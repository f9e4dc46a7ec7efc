//! Fast feasibility pre-checks run before any model is built.
//!
//! Two necessary conditions are tested, memory first:
//! 1. No single node's demand exceeds the memory budget.
//! 2. The slot budget is not below the critical path length.
//!
//! Passing both does not make the ILP satisfiable. Interactions between
//! nodes sharing a slot are left to the solver.

use crate::critical_path::critical_path_length_verbose;
use crate::graph::TaskGraph;
use crate::logging::VERBOSITY_SILENT;
use crate::pipeline::GenerateError;
use crate::{log_checks, log_summary};

/// Outcome of the feasibility pre-check.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FeasibilityResult {
    Feasible,
    /// A node's own demand already exceeds the budget.
    MemoryInfeasible { node: String, demand: u64 },
    /// The slot budget is below the critical path length.
    LatencyInfeasible { critical_path_length: usize },
}

impl FeasibilityResult {
    pub fn is_feasible(&self) -> bool {
        matches!(self, Self::Feasible)
    }

    /// Turn an infeasible verdict into the matching error.
    pub fn into_result(self) -> Result<(), GenerateError> {
        match self {
            Self::Feasible => Ok(()),
            Self::MemoryInfeasible { node, demand } => {
                Err(GenerateError::MemoryInfeasible { node, demand })
            }
            Self::LatencyInfeasible {
                critical_path_length,
            } => Err(GenerateError::LatencyInfeasible {
                critical_path_length,
            }),
        }
    }
}

/// Run the pre-checks silently.
///
/// `max_memory = None` disables the memory check.
pub fn check(graph: &TaskGraph, max_memory: Option<u64>, max_latency: u32) -> FeasibilityResult {
    check_verbose(graph, max_memory, max_latency, VERBOSITY_SILENT)
}

/// Run the pre-checks, logging at the given verbosity.
pub fn check_verbose(
    graph: &TaskGraph,
    max_memory: Option<u64>,
    max_latency: u32,
    verbosity: u8,
) -> FeasibilityResult {
    if let Some(budget) = max_memory {
        for node in graph.nodes() {
            let demand = graph.out_weight(node);
            log_checks!(
                verbosity,
                "[feasibility] node {} demand {} (budget {})",
                graph.label(node),
                demand,
                budget
            );
            if demand > budget {
                log_summary!(
                    verbosity,
                    "[feasibility] memory infeasible: node {} needs {} > {}",
                    graph.label(node),
                    demand,
                    budget
                );
                return FeasibilityResult::MemoryInfeasible {
                    node: graph.label(node).to_string(),
                    demand,
                };
            }
        }
    }

    if verbosity > VERBOSITY_SILENT && !graph.is_acyclic() {
        log_summary!(
            verbosity,
            "[feasibility] warning: graph has a cycle; critical path length is a partial result"
        );
    }

    let actual = critical_path_length_verbose(graph, verbosity);

    if (max_latency as usize) < actual {
        log_summary!(
            verbosity,
            "[feasibility] latency infeasible: {} slots < critical path {}",
            max_latency,
            actual
        );
        return FeasibilityResult::LatencyInfeasible {
            critical_path_length: actual,
        };
    }

    log_summary!(verbosity, "[feasibility] feasible");
    FeasibilityResult::Feasible
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_latency_infeasible_scenario() {
        let graph = TaskGraph::from_edges([("A", "B", 3), ("B", "C", 4)]);
        assert_eq!(
            check(&graph, None, 2),
            FeasibilityResult::LatencyInfeasible {
                critical_path_length: 3
            }
        );
        assert!(check(&graph, None, 3).is_feasible());
    }

    #[test]
    fn test_memory_infeasible_scenario() {
        let graph = TaskGraph::from_edges([("A", "B", 5), ("A", "C", 5)]);
        assert_eq!(
            check(&graph, Some(7), 10),
            FeasibilityResult::MemoryInfeasible {
                node: "A".to_string(),
                demand: 10
            }
        );
        assert!(check(&graph, Some(10), 10).is_feasible());
    }

    #[test]
    fn test_memory_checked_before_latency() {
        // Both limits are violated; memory wins
        let graph = TaskGraph::from_edges([("A", "B", 5), ("B", "C", 1)]);
        assert_eq!(
            check(&graph, Some(4), 1),
            FeasibilityResult::MemoryInfeasible {
                node: "A".to_string(),
                demand: 5
            }
        );
    }

    #[test]
    fn test_first_offending_node_in_order() {
        let graph = TaskGraph::from_edges([("A", "B", 2), ("C", "B", 9), ("D", "B", 12)]);
        match check(&graph, Some(8), 5) {
            FeasibilityResult::MemoryInfeasible { node, demand } => {
                assert_eq!(node, "C");
                assert_eq!(demand, 9);
            }
            other => panic!("expected memory infeasible, got {:?}", other),
        }
    }

    #[test]
    fn test_unbounded_memory_skips_check() {
        let graph = TaskGraph::from_edges([("A", "B", u64::MAX)]);
        assert!(check(&graph, None, 2).is_feasible());
    }

    #[test]
    fn test_into_result() {
        assert!(FeasibilityResult::Feasible.into_result().is_ok());
        let err = FeasibilityResult::LatencyInfeasible {
            critical_path_length: 4,
        }
        .into_result()
        .unwrap_err();
        assert!(matches!(
            err,
            GenerateError::LatencyInfeasible {
                critical_path_length: 4
            }
        ));
    }
}
