//! Edge implementation for the knowledge graph
//!
//! Edges are directed and weighted. Weight is a strength/confidence in [0, 1].

use super::property::{PropertyMap, PropertyValue};
use super::types::{EdgeId, EdgeKind, NodeId};
use serde::{Deserialize, Serialize};

/// A directed, weighted edge
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Edge {
    /// Unique identifier for this edge
    pub id: EdgeId,

    /// Source node (edge goes FROM this node)
    pub source: NodeId,

    /// Target node (edge goes TO this node)
    pub target: NodeId,

    /// Type of relationship
    pub kind: EdgeKind,

    /// Relationship strength in [0, 1]
    pub weight: f64,

    /// Extra attributes
    pub attributes: PropertyMap,
}

impl Edge {
    /// Create a new directed edge
    pub fn new(
        id: impl Into<EdgeId>,
        source: impl Into<NodeId>,
        target: impl Into<NodeId>,
        kind: EdgeKind,
        weight: f64,
    ) -> Self {
        Edge {
            id: id.into(),
            source: source.into(),
            target: target.into(),
            kind,
            weight,
            attributes: PropertyMap::new(),
        }
    }

    /// Set an attribute value
    pub fn set_attribute(&mut self, key: impl Into<String>, value: impl Into<PropertyValue>) {
        self.attributes.insert(key.into(), value.into());
    }

    /// Get an attribute value
    pub fn get_attribute(&self, key: &str) -> Option<&PropertyValue> {
        self.attributes.get(key)
    }

    /// Check if this edge goes FROM a specific node
    pub fn starts_from(&self, node: &NodeId) -> bool {
        &self.source == node
    }

    /// Check if this edge goes TO a specific node
    pub fn ends_at(&self, node: &NodeId) -> bool {
        &self.target == node
    }

    /// Check if this edge touches a node at either end
    pub fn touches(&self, node: &NodeId) -> bool {
        self.starts_from(node) || self.ends_at(node)
    }

    /// Whether the weight lies in [0, 1]
    pub fn has_valid_weight(&self) -> bool {
        (0.0..=1.0).contains(&self.weight)
    }
}

impl PartialEq for Edge {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Edge {}

impl std::hash::Hash for Edge {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edge_direction() {
        let edge = Edge::new("edge-1", "project-a", "tech-react", EdgeKind::Uses, 1.0);
        let project = NodeId::from("project-a");
        let tech = NodeId::from("tech-react");

        assert!(edge.starts_from(&project));
        assert!(edge.ends_at(&tech));
        assert!(!edge.starts_from(&tech));
        assert!(edge.touches(&tech));
        assert!(!edge.touches(&NodeId::from("project-b")));
    }

    #[test]
    fn test_weight_range() {
        assert!(Edge::new("e", "a", "b", EdgeKind::SimilarTo, 0.0).has_valid_weight());
        assert!(Edge::new("e", "a", "b", EdgeKind::SimilarTo, 1.0).has_valid_weight());
        assert!(!Edge::new("e", "a", "b", EdgeKind::SimilarTo, 1.2).has_valid_weight());
        assert!(!Edge::new("e", "a", "b", EdgeKind::SimilarTo, -0.1).has_valid_weight());
        assert!(!Edge::new("e", "a", "b", EdgeKind::SimilarTo, f64::NAN).has_valid_weight());
    }

    #[test]
    fn test_edge_attributes() {
        let mut edge = Edge::new("edge-2", "pattern-1", "pattern-2", EdgeKind::SimilarTo, 0.8);
        edge.set_attribute("scored_by", "keyword-overlap");
        assert_eq!(
            edge.get_attribute("scored_by").unwrap().as_string(),
            Some("keyword-overlap")
        );
    }

    #[test]
    fn test_parallel_edges_are_distinct() {
        let e1 = Edge::new("edge-1", "a", "b", EdgeKind::Uses, 1.0);
        let e2 = Edge::new("edge-2", "a", "b", EdgeKind::Uses, 1.0);
        assert_ne!(e1, e2);
    }
}
