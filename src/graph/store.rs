//! In-memory knowledge graph storage
//!
//! An id-indexed arena: nodes and edges live in insertion-ordered maps keyed by id,
//! and the adjacency index records, per node, the target of every outgoing edge in
//! insertion order (parallel edges appear once per edge).

use super::edge::Edge;
use super::node::Node;
use super::types::{EdgeId, EdgeKind, NodeId, NodeKind};
use indexmap::IndexMap;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

/// Errors that can occur during graph operations
#[derive(Error, Debug, PartialEq)]
pub enum GraphError {
    #[error("Invalid edge: source node {0} does not exist")]
    InvalidEdgeSource(NodeId),

    #[error("Invalid edge: target node {0} does not exist")]
    InvalidEdgeTarget(NodeId),

    #[error("Edge {0} already exists")]
    EdgeAlreadyExists(EdgeId),

    #[error("Invalid edge {edge}: weight {weight} is outside [0, 1]")]
    InvalidWeight { edge: EdgeId, weight: f64 },
}

pub type GraphResult<T> = Result<T, GraphError>;

/// Aggregate counts over a graph
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphStatistics {
    pub total_nodes: usize,
    pub total_edges: usize,
    pub nodes_by_type: BTreeMap<NodeKind, usize>,
    pub edges_by_type: BTreeMap<EdgeKind, usize>,
    /// `total_edges / total_nodes`, 0 for an empty graph
    pub avg_connections: f64,
}

/// In-memory knowledge graph
///
/// - nodes: NodeId -> Node
/// - edges: EdgeId -> Edge
/// - adjacency: NodeId -> [target NodeId] (one entry per outgoing edge)
/// - outgoing / incoming: NodeId -> [EdgeId]
#[derive(Debug, Clone, Default)]
pub struct KnowledgeGraph {
    /// Node storage in insertion order
    nodes: IndexMap<NodeId, Node>,

    /// Edge storage in insertion order
    edges: IndexMap<EdgeId, Edge>,

    /// Directly reachable targets per node
    adjacency: IndexMap<NodeId, Vec<NodeId>>,

    /// Outgoing edges for each node
    outgoing: FxHashMap<NodeId, Vec<EdgeId>>,

    /// Incoming edges for each node
    incoming: FxHashMap<NodeId, Vec<EdgeId>>,

    /// Next sequential edge id
    next_edge_id: u64,
}

impl KnowledgeGraph {
    /// Create a new empty graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a node, replacing any node with the same id.
    ///
    /// Edges and adjacency recorded for the id are kept. Returns the replaced node.
    pub fn add_node(&mut self, node: Node) -> Option<Node> {
        let id = node.id.clone();
        self.adjacency.entry(id.clone()).or_default();
        self.nodes.insert(id, node)
    }

    /// Insert an edge between two existing nodes.
    ///
    /// Fails without touching any index when either endpoint is missing, the weight
    /// is outside [0, 1], or the id is taken.
    pub fn add_edge(&mut self, edge: Edge) -> GraphResult<()> {
        if !self.has_node(&edge.source) {
            return Err(GraphError::InvalidEdgeSource(edge.source));
        }
        if !self.has_node(&edge.target) {
            return Err(GraphError::InvalidEdgeTarget(edge.target));
        }
        if !edge.has_valid_weight() {
            return Err(GraphError::InvalidWeight {
                edge: edge.id,
                weight: edge.weight,
            });
        }
        if self.edges.contains_key(&edge.id) {
            return Err(GraphError::EdgeAlreadyExists(edge.id));
        }

        self.adjacency
            .entry(edge.source.clone())
            .or_default()
            .push(edge.target.clone());
        self.outgoing
            .entry(edge.source.clone())
            .or_default()
            .push(edge.id.clone());
        self.incoming
            .entry(edge.target.clone())
            .or_default()
            .push(edge.id.clone());

        self.edges.insert(edge.id.clone(), edge);
        Ok(())
    }

    /// Insert an edge with a freshly allocated id
    pub fn connect(
        &mut self,
        source: &NodeId,
        target: &NodeId,
        kind: EdgeKind,
        weight: f64,
    ) -> GraphResult<EdgeId> {
        let id = self.allocate_edge_id();
        self.add_edge(Edge::new(id.clone(), source.clone(), target.clone(), kind, weight))?;
        Ok(id)
    }

    fn allocate_edge_id(&mut self) -> EdgeId {
        loop {
            self.next_edge_id += 1;
            let id = EdgeId::new(format!("edge-{}", self.next_edge_id));
            if !self.edges.contains_key(&id) {
                return id;
            }
        }
    }

    pub fn get_node(&self, id: &NodeId) -> Option<&Node> {
        self.nodes.get(id)
    }

    pub fn has_node(&self, id: &NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    pub fn get_edge(&self, id: &EdgeId) -> Option<&Edge> {
        self.edges.get(id)
    }

    /// All nodes in insertion order
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    /// All edges in insertion order
    pub fn edges(&self) -> impl Iterator<Item = &Edge> {
        self.edges.values()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Insertion position of a node
    pub fn node_index(&self, id: &NodeId) -> Option<usize> {
        self.nodes.get_index_of(id)
    }

    /// Node at an insertion position
    pub fn node_at(&self, index: usize) -> Option<&Node> {
        self.nodes.get_index(index).map(|(_, node)| node)
    }

    /// Targets of the node's outgoing edges, in insertion order
    pub fn adjacent(&self, id: &NodeId) -> &[NodeId] {
        self.adjacency.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Out-degree (length of the adjacency sequence)
    pub fn out_degree(&self, id: &NodeId) -> usize {
        self.adjacent(id).len()
    }

    /// Nodes directly reachable from `id`, one entry per outgoing edge
    pub fn get_neighbors(&self, id: &NodeId) -> Vec<&Node> {
        self.adjacent(id)
            .iter()
            .filter_map(|target| self.nodes.get(target))
            .collect()
    }

    /// Distinct direct neighbors of a given kind, in first-seen order
    pub fn neighbors_of_kind(&self, id: &NodeId, kind: NodeKind) -> Vec<&Node> {
        let mut seen = IndexMap::new();
        for node in self.get_neighbors(id) {
            if node.is(kind) {
                seen.entry(&node.id).or_insert(node);
            }
        }
        seen.into_values().collect()
    }

    /// Outgoing edges of a node
    pub fn outgoing_edges(&self, id: &NodeId) -> Vec<&Edge> {
        self.resolve_edges(self.outgoing.get(id))
    }

    /// Incoming edges of a node
    pub fn incoming_edges(&self, id: &NodeId) -> Vec<&Edge> {
        self.resolve_edges(self.incoming.get(id))
    }

    fn resolve_edges(&self, ids: Option<&Vec<EdgeId>>) -> Vec<&Edge> {
        ids.map(|ids| ids.iter().filter_map(|e| self.edges.get(e)).collect())
            .unwrap_or_default()
    }

    /// Every edge touching the node: outgoing first, then incoming (self-loops once)
    pub fn get_node_edges(&self, id: &NodeId) -> Vec<&Edge> {
        let mut edges = self.outgoing_edges(id);
        edges.extend(self.incoming_edges(id).into_iter().filter(|e| e.source != *id));
        edges
    }

    /// Nodes of a given kind, in insertion order
    pub fn get_nodes_by_type(&self, kind: NodeKind) -> Vec<&Node> {
        self.nodes.values().filter(|n| n.is(kind)).collect()
    }

    /// Edges of a given kind, in insertion order
    pub fn get_edges_by_type(&self, kind: EdgeKind) -> Vec<&Edge> {
        self.edges.values().filter(|e| e.kind == kind).collect()
    }

    /// Aggregate counts
    pub fn statistics(&self) -> GraphStatistics {
        let mut nodes_by_type = BTreeMap::new();
        for node in self.nodes.values() {
            *nodes_by_type.entry(node.kind()).or_insert(0) += 1;
        }

        let mut edges_by_type = BTreeMap::new();
        for edge in self.edges.values() {
            *edges_by_type.entry(edge.kind).or_insert(0) += 1;
        }

        let total_nodes = self.node_count();
        let total_edges = self.edge_count();
        let avg_connections = if total_nodes == 0 {
            0.0
        } else {
            total_edges as f64 / total_nodes as f64
        };

        GraphStatistics {
            total_nodes,
            total_edges,
            nodes_by_type,
            edges_by_type,
            avg_connections,
        }
    }
}
