//! Source/sink augmentation.

use crate::graph::TaskGraph;
use crate::interner::NodeId;

/// Label of the virtual source node.
pub const SOURCE_LABEL: &str = "SRC";
/// Label of the virtual sink node.
pub const SINK_LABEL: &str = "SINK";

/// A copy of a graph extended with a virtual source and sink.
///
/// Real nodes keep their IDs, so paths found here can be resolved against
/// the input graph once the endpoints are stripped.
#[derive(Clone, Debug)]
pub struct AugmentedGraph {
    pub graph: TaskGraph,
    pub source: NodeId,
    pub sink: NodeId,
}

impl AugmentedGraph {
    pub fn is_virtual(&self, node: NodeId) -> bool {
        node == self.source || node == self.sink
    }
}

/// Attach a virtual source and sink to a graph.
///
/// Each node without predecessors gets a zero-weight edge from the source.
/// Otherwise, a node without successors gets a zero-weight edge to the sink.
/// An isolated node matches the first test only and is linked to the source
/// alone, so no source-to-sink path passes through it.
pub fn augment(graph: &TaskGraph) -> AugmentedGraph {
    let mut augmented = graph.clone();
    let source = augmented.add_virtual_node(SOURCE_LABEL);
    let sink = augmented.add_virtual_node(SINK_LABEL);

    for node in graph.nodes() {
        if graph.predecessors(node).is_empty() {
            augmented.add_edge_ids(source, node, 0);
        } else if graph.successors(node).is_empty() {
            augmented.add_edge_ids(node, sink, 0);
        }
    }

    AugmentedGraph {
        graph: augmented,
        source,
        sink,
    }
}
