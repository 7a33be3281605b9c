//! Hub detection: nodes with the most outgoing connections

use crate::algo::{build_view, out_degree_ranking, resolve, ViewFilter};
use crate::graph::{KnowledgeGraph, Node, NodeKind};
use serde::Serialize;

/// A node and how many outgoing edges it has
#[derive(Debug, Clone, Serialize)]
pub struct Hub<'a> {
    pub node: &'a Node,
    pub out_degree: usize,
}

/// The `limit` nodes with the highest out-degree, optionally restricted to one kind.
///
/// Degree counts every outgoing edge, whatever the target kind. Ties keep insertion
/// order.
pub fn find_hubs(graph: &KnowledgeGraph, kind: Option<NodeKind>, limit: usize) -> Vec<Hub<'_>> {
    let view = build_view(graph, ViewFilter::all());

    out_degree_ranking(&view, view.node_count)
        .into_iter()
        .filter_map(|entry| {
            let node = resolve(graph, entry.node)?;
            kind.map_or(true, |k| node.is(k)).then_some(Hub {
                node,
                out_degree: entry.degree,
            })
        })
        .take(limit)
        .collect()
}
