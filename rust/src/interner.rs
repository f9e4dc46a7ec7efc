//! Node label interning.
//!
//! Maps node labels to dense integer IDs so graph adjacency can live in
//! plain vectors. IDs are handed out in first-seen order, which is also the
//! order every downstream enumeration follows.

use rustc_hash::FxHashMap;

/// Interned node ID (u32 for compact storage and fast hashing).
pub type NodeId = u32;

/// Bidirectional map between node labels and dense IDs.
#[derive(Debug, Clone)]
pub struct NodeInterner {
    to_int: FxHashMap<String, NodeId>,
    from_int: Vec<String>,
}

impl NodeInterner {
    /// Create a new interner with pre-allocated capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            to_int: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            from_int: Vec::with_capacity(capacity),
        }
    }

    /// Intern a label, returning its ID.
    /// If already interned, returns the existing ID.
    pub fn intern(&mut self, label: &str) -> NodeId {
        if let Some(&id) = self.to_int.get(label) {
            return id;
        }
        let id = self.push_unregistered(label);
        self.to_int.insert(label.to_string(), id);
        id
    }

    /// Append a label that gets an ID but is not reachable through [`get`](Self::get).
    ///
    /// Virtual nodes use this so they never shadow a real node with the same label.
    pub fn push_unregistered(&mut self, label: &str) -> NodeId {
        let id = self.from_int.len() as NodeId;
        self.from_int.push(label.to_string());
        id
    }

    /// Get the ID for a label, if it exists.
    #[inline]
    pub fn get(&self, label: &str) -> Option<NodeId> {
        self.to_int.get(label).copied()
    }

    /// Get the label for an ID.
    #[inline]
    pub fn resolve(&self, id: NodeId) -> Option<&str> {
        self.from_int.get(id as usize).map(|s| s.as_str())
    }

    /// Number of IDs handed out, virtual ones included.
    pub fn len(&self) -> usize {
        self.from_int.len()
    }

    pub fn is_empty(&self) -> bool {
        self.from_int.is_empty()
    }
}

impl Default for NodeInterner {
    fn default() -> Self {
        Self::with_capacity(0)
    }
}
