//! Directed, edge-weighted task graph.

use rustc_hash::FxHashMap;
use std::collections::VecDeque;

use crate::interner::{NodeId, NodeInterner};

/// A weighted dependency `source -> target`.
///
/// The weight is the quantity `source` produces for `target` and counts
/// toward `source`'s demand while it is scheduled.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Edge {
    pub source: NodeId,
    pub target: NodeId,
    pub weight: u64,
}

/// Task dependency graph with dense node IDs.
///
/// Nodes and edges are kept in insertion order. At most one edge exists per
/// ordered pair; re-adding a pair overwrites its weight.
#[derive(Clone, Debug, Default)]
pub struct TaskGraph {
    interner: NodeInterner,
    predecessors: Vec<Vec<NodeId>>,
    successors: Vec<Vec<NodeId>>,
    edges: Vec<Edge>,
    edge_index: FxHashMap<(NodeId, NodeId), usize>,
}

impl TaskGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a graph from `(source, target, weight)` triples.
    pub fn from_edges<'a, I>(edges: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str, u64)>,
    {
        let mut graph = Self::new();
        for (source, target, weight) in edges {
            graph.add_edge(source, target, weight);
        }
        graph
    }

    /// Add a node by label, returning its ID. Existing labels are reused.
    pub fn add_node(&mut self, label: &str) -> NodeId {
        let before = self.interner.len();
        let id = self.interner.intern(label);
        if self.interner.len() > before {
            self.grow_adjacency();
        }
        id
    }

    /// Add a node that label lookups never resolve to.
    pub(crate) fn add_virtual_node(&mut self, label: &str) -> NodeId {
        let id = self.interner.push_unregistered(label);
        self.grow_adjacency();
        id
    }

    fn grow_adjacency(&mut self) {
        self.predecessors.push(Vec::new());
        self.successors.push(Vec::new());
    }

    /// Add an edge by endpoint labels, creating missing endpoints.
    pub fn add_edge(&mut self, source: &str, target: &str, weight: u64) {
        let u = self.add_node(source);
        let v = self.add_node(target);
        self.add_edge_ids(u, v, weight);
    }

    /// Add an edge between existing node IDs.
    pub(crate) fn add_edge_ids(&mut self, source: NodeId, target: NodeId, weight: u64) {
        if let Some(&idx) = self.edge_index.get(&(source, target)) {
            self.edges[idx].weight = weight;
            return;
        }
        self.edge_index.insert((source, target), self.edges.len());
        self.edges.push(Edge {
            source,
            target,
            weight,
        });
        self.successors[source as usize].push(target);
        self.predecessors[target as usize].push(source);
    }

    /// Node IDs in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        0..self.node_count() as NodeId
    }

    /// Edges in insertion order.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn predecessors(&self, node: NodeId) -> &[NodeId] {
        self.predecessors
            .get(node as usize)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn successors(&self, node: NodeId) -> &[NodeId] {
        self.successors
            .get(node as usize)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Weight of the edge `source -> target`, if present.
    pub fn weight(&self, source: NodeId, target: NodeId) -> Option<u64> {
        self.edge_index
            .get(&(source, target))
            .map(|&idx| self.edges[idx].weight)
    }

    /// Sum of the weights of a node's outgoing edges (its demand).
    pub fn out_weight(&self, node: NodeId) -> u64 {
        self.successors(node)
            .iter()
            .filter_map(|&succ| self.weight(node, succ))
            .fold(0u64, u64::saturating_add)
    }

    /// Label of a node. Unknown IDs resolve to the empty string.
    pub fn label(&self, node: NodeId) -> &str {
        self.interner.resolve(node).unwrap_or_default()
    }

    pub fn node_id(&self, label: &str) -> Option<NodeId> {
        self.interner.get(label)
    }

    pub fn node_count(&self) -> usize {
        self.interner.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.interner.is_empty()
    }

    /// Kahn's sweep in node order. Nodes on or behind a cycle are left out.
    fn topological_sweep(&self) -> Vec<NodeId> {
        let mut in_degree: Vec<usize> = self.predecessors.iter().map(Vec::len).collect();
        let mut queue: VecDeque<NodeId> = self
            .nodes()
            .filter(|&n| in_degree[n as usize] == 0)
            .collect();
        let mut order = Vec::with_capacity(self.node_count());

        while let Some(node) = queue.pop_front() {
            order.push(node);
            for &succ in self.successors(node) {
                let degree = &mut in_degree[succ as usize];
                *degree -= 1;
                if *degree == 0 {
                    queue.push_back(succ);
                }
            }
        }

        order
    }

    /// Whether every node can be placed in a topological order.
    pub fn is_acyclic(&self) -> bool {
        self.topological_sweep().len() == self.node_count()
    }

    /// Unweighted longest path length, counted in edges.
    ///
    /// Every edge counts as 1 regardless of its weight. A graph without edges
    /// yields 0. On cyclic input only the acyclic part reachable by the
    /// topological sweep contributes.
    pub fn longest_path_length(&self) -> usize {
        let mut depth = vec![0usize; self.node_count()];
        let mut longest = 0;

        for node in self.topological_sweep() {
            let d = depth[node as usize];
            longest = longest.max(d);
            for &succ in self.successors(node) {
                let slot = &mut depth[succ as usize];
                *slot = (*slot).max(d + 1);
            }
        }

        longest
    }
}
