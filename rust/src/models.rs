//! Python-facing data types.

use pyo3::prelude::*;

use crate::critical_path::PathClassification;
use crate::feasibility::FeasibilityResult;
use crate::graph::TaskGraph;

/// A weighted dependency between two tasks.
#[pyclass]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WeightedEdge {
    #[pyo3(get, set)]
    pub source: String,
    #[pyo3(get, set)]
    pub target: String,
    #[pyo3(get, set)]
    pub weight: u64,
}

#[pymethods]
impl WeightedEdge {
    #[new]
    #[pyo3(signature = (source, target, weight=0))]
    fn new(source: String, target: String, weight: u64) -> Self {
        Self {
            source,
            target,
            weight,
        }
    }

    fn __repr__(&self) -> String {
        format!(
            "WeightedEdge(source={:?}, target={:?}, weight={})",
            self.source, self.target, self.weight
        )
    }
}

/// Build a graph from explicit nodes followed by edges.
///
/// Listing nodes first fixes their order and allows isolated nodes.
pub fn build_graph(edges: &[WeightedEdge], nodes: &[String]) -> TaskGraph {
    let mut graph = TaskGraph::new();
    for node in nodes {
        graph.add_node(node);
    }
    for edge in edges {
        graph.add_edge(&edge.source, &edge.target, edge.weight);
    }
    graph
}

/// Edges of a graph in insertion order.
pub fn graph_edges(graph: &TaskGraph) -> Vec<WeightedEdge> {
    graph
        .edges()
        .iter()
        .map(|e| WeightedEdge {
            source: graph.label(e.source).to_string(),
            target: graph.label(e.target).to_string(),
            weight: e.weight,
        })
        .collect()
}

/// Feasibility verdict as seen from Python.
#[pyclass]
#[derive(Clone, Debug, Default)]
pub struct FeasibilityReport {
    #[pyo3(get)]
    pub feasible: bool,
    /// "feasible", "memory" or "latency"
    #[pyo3(get)]
    pub kind: String,
    /// Offending node (memory only)
    #[pyo3(get)]
    pub node: Option<String>,
    /// Offending node's demand (memory only)
    #[pyo3(get)]
    pub demand: Option<u64>,
    /// Actual critical path length (latency only)
    #[pyo3(get)]
    pub critical_path_length: Option<usize>,
}

impl From<FeasibilityResult> for FeasibilityReport {
    fn from(result: FeasibilityResult) -> Self {
        match result {
            FeasibilityResult::Feasible => Self {
                feasible: true,
                kind: "feasible".to_string(),
                ..Self::default()
            },
            FeasibilityResult::MemoryInfeasible { node, demand } => Self {
                kind: "memory".to_string(),
                node: Some(node),
                demand: Some(demand),
                ..Self::default()
            },
            FeasibilityResult::LatencyInfeasible {
                critical_path_length,
            } => Self {
                kind: "latency".to_string(),
                critical_path_length: Some(critical_path_length),
                ..Self::default()
            },
        }
    }
}

#[pymethods]
impl FeasibilityReport {
    fn __bool__(&self) -> bool {
        self.feasible
    }

    fn __repr__(&self) -> String {
        match self.kind.as_str() {
            "memory" => format!(
                "FeasibilityReport(memory, node={:?}, demand={:?})",
                self.node, self.demand
            ),
            "latency" => format!(
                "FeasibilityReport(latency, critical_path_length={:?})",
                self.critical_path_length
            ),
            _ => "FeasibilityReport(feasible)".to_string(),
        }
    }
}

/// Critical and non-critical source-to-sink paths, by node label.
#[pyclass]
#[derive(Clone, Debug, Default)]
pub struct PathReport {
    #[pyo3(get)]
    pub critical_path_length: usize,
    #[pyo3(get)]
    pub critical: Vec<Vec<String>>,
    #[pyo3(get)]
    pub non_critical: Vec<Vec<String>>,
}

impl PathReport {
    pub fn new(classification: &PathClassification, graph: &TaskGraph) -> Self {
        Self {
            critical_path_length: classification.critical_path_length,
            critical: PathClassification::labelled(&classification.critical, graph),
            non_critical: PathClassification::labelled(&classification.non_critical, graph),
        }
    }
}

#[pymethods]
impl PathReport {
    fn __repr__(&self) -> String {
        format!(
            "PathReport(critical_path_length={}, critical={}, non_critical={})",
            self.critical_path_length,
            self.critical.len(),
            self.non_critical.len()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::critical_path::classify_paths;

    fn make_edge(source: &str, target: &str, weight: u64) -> WeightedEdge {
        WeightedEdge {
            source: source.to_string(),
            target: target.to_string(),
            weight,
        }
    }

    #[test]
    fn test_build_graph_nodes_first() {
        let edges = vec![make_edge("A", "B", 1)];
        let graph = build_graph(&edges, &["B".to_string(), "Z".to_string()]);

        assert_eq!(graph.label(0), "B");
        assert_eq!(graph.label(1), "Z");
        assert_eq!(graph.label(2), "A");
        assert_eq!(graph_edges(&graph), edges);
    }

    #[test]
    fn test_report_from_result() {
        let report = FeasibilityReport::from(FeasibilityResult::MemoryInfeasible {
            node: "A".to_string(),
            demand: 10,
        });
        assert!(!report.feasible);
        assert_eq!(report.kind, "memory");
        assert_eq!(report.demand, Some(10));
        assert_eq!(report.critical_path_length, None);

        let report = FeasibilityReport::from(FeasibilityResult::Feasible);
        assert!(report.feasible);
    }

    #[test]
    fn test_path_report_labels() {
        let graph = build_graph(&[make_edge("A", "B", 1), make_edge("B", "C", 1)], &[]);
        let report = PathReport::new(&classify_paths(&graph), &graph);

        assert_eq!(report.critical_path_length, 3);
        assert_eq!(report.critical, vec![vec!["A", "B", "C"]]);
        assert!(report.non_critical.is_empty());
    }
}
