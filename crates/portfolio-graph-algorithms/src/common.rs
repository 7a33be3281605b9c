//! Shared utilities for graph algorithms
//!
//! Provides a read-only, optimized view of the graph topology for algorithm execution.

use std::collections::HashMap;

/// Node handle as seen by the algorithms (the caller's dense position of the node).
pub type NodeId = u64;

/// A dense, integer-indexed view of the graph topology using Compressed Sparse Row (CSR) format.
///
/// Successor order is the order in which the caller supplied the adjacency rows, so
/// traversals over the view are reproducible. Parallel edges are kept.
#[derive(Debug, Clone)]
pub struct GraphView {
    /// Number of nodes
    pub node_count: usize,
    /// Mapping from dense index (0..N) back to NodeId
    pub index_to_node: Vec<NodeId>,
    /// Mapping from NodeId to dense index
    pub node_to_index: HashMap<NodeId, usize>,

    /// Offsets into `out_targets`. Size = node_count + 1
    pub out_offsets: Vec<usize>,
    /// Contiguous array of target node indices
    pub out_targets: Vec<usize>,

    /// Edge weights: aligned with `out_targets`
    pub weights: Option<Vec<f64>>,
}

impl GraphView {
    /// Get the out-degree of a node (by index)
    pub fn out_degree(&self, idx: usize) -> usize {
        self.out_offsets[idx + 1] - self.out_offsets[idx]
    }

    /// Get outgoing neighbors (successors) of a node
    pub fn successors(&self, idx: usize) -> &[usize] {
        let start = self.out_offsets[idx];
        let end = self.out_offsets[idx + 1];
        &self.out_targets[start..end]
    }

    /// Get weights for outgoing edges of a node
    pub fn weights(&self, idx: usize) -> Option<&[f64]> {
        self.weights.as_ref().map(|w| {
            let start = self.out_offsets[idx];
            let end = self.out_offsets[idx + 1];
            &w[start..end]
        })
    }

    /// Build a view from per-node adjacency rows.
    ///
    /// `outgoing[i]` holds the dense indices reachable from `index_to_node[i]`.
    /// `weights`, when present, must hold one row per adjacency row with matching
    /// lengths; a mismatch panics here rather than misaligning later lookups.
    pub fn from_adjacency_list(
        index_to_node: Vec<NodeId>,
        outgoing: Vec<Vec<usize>>,
        weights: Option<Vec<Vec<f64>>>,
    ) -> Self {
        let node_count = index_to_node.len();
        let node_to_index = index_to_node
            .iter()
            .enumerate()
            .map(|(idx, &id)| (id, idx))
            .collect();

        let mut out_offsets = Vec::with_capacity(node_count + 1);
        let mut out_targets = Vec::new();
        let mut flat_weights = if weights.is_some() { Some(Vec::new()) } else { None };

        if let Some(w) = weights.as_ref() {
            assert_eq!(w.len(), outgoing.len(), "one weight row per adjacency row");
        }

        out_offsets.push(0);
        for (i, neighbors) in outgoing.into_iter().enumerate() {
            if let (Some(w_flat), Some(w)) = (flat_weights.as_mut(), weights.as_ref()) {
                let w_row = &w[i];
                assert_eq!(
                    w_row.len(),
                    neighbors.len(),
                    "weight row {} does not match its adjacency row",
                    i
                );
                w_flat.extend(w_row.iter());
            }

            out_targets.extend(neighbors);
            out_offsets.push(out_targets.len());
        }

        // Rows past the last supplied adjacency row are empty.
        while out_offsets.len() < node_count + 1 {
            out_offsets.push(out_targets.len());
        }

        GraphView {
            node_count,
            index_to_node,
            node_to_index,
            out_offsets,
            out_targets,
            weights: flat_weights,
        }
    }
}
