//! Graph algorithms module
//!
//! Algorithms are implemented in the `portfolio-graph-algorithms` crate over a dense
//! `GraphView`. This module projects a `KnowledgeGraph` into such a view and maps the
//! results back to node ids.

use crate::graph::{EdgeKind, KnowledgeGraph, Node, NodeId, NodeKind};
use portfolio_graph_algorithms::NodeId as AlgoNodeId;
use tracing::debug;

// Re-export algorithms
pub use portfolio_graph_algorithms::{
    bfs, maximum_bipartite_matching, out_degree_ranking, threshold_clusters, DegreeEntry,
    GraphView, PathResult,
};

/// Which part of the graph a view covers
#[derive(Debug, Clone, Copy, Default)]
pub struct ViewFilter {
    /// Keep only nodes of this kind (edges must stay inside the kept set)
    pub node_kind: Option<NodeKind>,
    /// Keep only edges of this kind
    pub edge_kind: Option<EdgeKind>,
    /// Keep only edges with at least this weight
    pub min_weight: Option<f64>,
}

impl ViewFilter {
    pub fn all() -> Self {
        Self::default()
    }
}

/// Build a GraphView from the graph for algorithm execution.
///
/// View handles are node insertion positions, so successor order and seed order match
/// the graph's own iteration order. Edge weights are carried along.
pub fn build_view(graph: &KnowledgeGraph, filter: ViewFilter) -> GraphView {
    let mut index_to_node: Vec<AlgoNodeId> = Vec::new();
    let mut members: Vec<&Node> = Vec::new();

    for (position, node) in graph.nodes().enumerate() {
        if filter.node_kind.map_or(true, |kind| node.is(kind)) {
            index_to_node.push(position as AlgoNodeId);
            members.push(node);
        }
    }

    let dense: rustc_hash::FxHashMap<&NodeId, usize> = members
        .iter()
        .enumerate()
        .map(|(idx, node)| (&node.id, idx))
        .collect();

    let mut outgoing = vec![Vec::new(); members.len()];
    let mut weights = vec![Vec::new(); members.len()];

    for (u_idx, node) in members.iter().enumerate() {
        for edge in graph.outgoing_edges(&node.id) {
            if filter.edge_kind.is_some_and(|kind| edge.kind != kind) {
                continue;
            }
            if filter.min_weight.is_some_and(|min| edge.weight < min) {
                continue;
            }
            // If target is in our subgraph, add the connection
            if let Some(&v_idx) = dense.get(&edge.target) {
                outgoing[u_idx].push(v_idx);
                weights[u_idx].push(edge.weight);
            }
        }
    }

    debug!(
        "Built graph view with {} nodes ({:?})",
        index_to_node.len(),
        filter
    );
    GraphView::from_adjacency_list(index_to_node, outgoing, Some(weights))
}

/// Map a view handle back to its node
pub fn resolve(graph: &KnowledgeGraph, handle: AlgoNodeId) -> Option<&Node> {
    graph.node_at(handle as usize)
}

/// Handle of a node in any view built from `graph`
pub fn handle_of(graph: &KnowledgeGraph, id: &NodeId) -> Option<AlgoNodeId> {
    graph.node_index(id).map(|idx| idx as AlgoNodeId)
}

/// Breadth-first path over the directed adjacency index.
///
/// `start == end` returns `[start]` without traversal. `None` means no path (or an
/// unknown endpoint). Among equal-length paths the first one discovered wins.
pub fn find_path(graph: &KnowledgeGraph, start: &NodeId, end: &NodeId) -> Option<Vec<NodeId>> {
    if start == end {
        return Some(vec![start.clone()]);
    }

    let source = handle_of(graph, start)?;
    let target = handle_of(graph, end)?;
    let view = build_view(graph, ViewFilter::all());

    let result = bfs(&view, source, target)?;
    result
        .path
        .into_iter()
        .map(|handle| resolve(graph, handle).map(|node| node.id.clone()))
        .collect()
}
