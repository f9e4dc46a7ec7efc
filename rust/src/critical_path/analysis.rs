//! Critical path length and path classification.

use crate::graph::TaskGraph;
use crate::interner::NodeId;
use crate::log_checks;
use crate::logging::VERBOSITY_SILENT;

use super::augment::augment;

/// Critical path length, counted in nodes.
///
/// This is the unweighted longest path (in edges) plus one, i.e. the least
/// number of slots any valid schedule of the graph can occupy.
pub fn critical_path_length(graph: &TaskGraph) -> usize {
    critical_path_length_verbose(graph, VERBOSITY_SILENT)
}

/// [`critical_path_length`], logging the result at the given verbosity.
pub fn critical_path_length_verbose(graph: &TaskGraph, verbosity: u8) -> usize {
    let length = graph.longest_path_length() + 1;
    log_checks!(
        verbosity,
        "[critical_path] {} nodes, {} edges: critical path length {}",
        graph.node_count(),
        graph.edge_count(),
        length
    );
    length
}

/// All maximal source-to-sink paths, split by whether they are critical.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PathClassification {
    pub critical_path_length: usize,
    /// Paths whose node count equals `critical_path_length`.
    pub critical: Vec<Vec<NodeId>>,
    pub non_critical: Vec<Vec<NodeId>>,
}

impl PathClassification {
    /// Resolve a bucket of paths to node labels.
    pub fn labelled(paths: &[Vec<NodeId>], graph: &TaskGraph) -> Vec<Vec<String>> {
        paths
            .iter()
            .map(|path| path.iter().map(|&n| graph.label(n).to_string()).collect())
            .collect()
    }

    pub fn path_count(&self) -> usize {
        self.critical.len() + self.non_critical.len()
    }
}

/// Enumerate every simple source-to-sink path in the augmented graph and
/// classify it against the critical path length.
///
/// Paths are reported with the virtual endpoints stripped. Enumeration is
/// exhaustive, so the cost grows with the number of paths, not just nodes.
pub fn classify_paths(graph: &TaskGraph) -> PathClassification {
    classify_paths_verbose(graph, VERBOSITY_SILENT)
}

/// [`classify_paths`], logging the path counts at the given verbosity.
pub fn classify_paths_verbose(graph: &TaskGraph, verbosity: u8) -> PathClassification {
    let critical_len = critical_path_length_verbose(graph, verbosity);
    let aug = augment(graph);
    let g = &aug.graph;

    let mut result = PathClassification {
        critical_path_length: critical_len,
        ..PathClassification::default()
    };

    let mut on_path = vec![false; g.node_count()];
    let mut path: Vec<NodeId> = vec![aug.source];
    // Per-depth cursor into the successor list
    let mut cursors: Vec<usize> = vec![0];
    on_path[aug.source as usize] = true;

    while let Some(&node) = path.last() {
        let depth = path.len() - 1;
        let succs = g.successors(node);

        if cursors[depth] >= succs.len() {
            on_path[node as usize] = false;
            path.pop();
            cursors.pop();
            continue;
        }

        let next = succs[cursors[depth]];
        cursors[depth] += 1;

        if next == aug.sink {
            let inner: Vec<NodeId> = path[1..].to_vec();
            if inner.len() == critical_len {
                result.critical.push(inner);
            } else {
                result.non_critical.push(inner);
            }
        } else if !on_path[next as usize] {
            on_path[next as usize] = true;
            path.push(next);
            cursors.push(0);
        }
    }

    log_checks!(
        verbosity,
        "[critical_path] {} critical, {} non-critical paths",
        result.critical.len(),
        result.non_critical.len()
    );
    result
}
