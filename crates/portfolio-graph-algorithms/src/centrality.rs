//! Degree centrality

use super::common::{GraphView, NodeId};

/// A node and its out-degree
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DegreeEntry {
    pub node: NodeId,
    pub degree: usize,
}

/// Rank nodes by out-degree, highest first.
///
/// Equal degrees keep view order. `limit` truncates the result.
pub fn out_degree_ranking(view: &GraphView, limit: usize) -> Vec<DegreeEntry> {
    let mut entries: Vec<DegreeEntry> = (0..view.node_count)
        .map(|idx| DegreeEntry {
            node: view.index_to_node[idx],
            degree: view.out_degree(idx),
        })
        .collect();

    entries.sort_by(|a, b| b.degree.cmp(&a.degree));
    entries.truncate(limit);
    entries
}
