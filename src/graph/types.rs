//! Core type definitions for the knowledge graph

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for a node
///
/// Identifiers are derived from source-record identifiers (`project-{id}`,
/// `tech-{name}`, ...) so that ingesting the same logical entity twice lands on the
/// same node.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
    pub fn new(id: impl Into<String>) -> Self {
        NodeId(id.into())
    }

    pub fn project(record_id: &str) -> Self {
        NodeId(format!("project-{}", record_id))
    }

    pub fn pattern(record_id: &str) -> Self {
        NodeId(format!("pattern-{}", record_id))
    }

    pub fn component(record_id: &str) -> Self {
        NodeId(format!("component-{}", record_id))
    }

    pub fn technology(name: &str) -> Self {
        NodeId(format!("tech-{}", name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for NodeId {
    fn from(s: String) -> Self {
        NodeId(s)
    }
}

impl From<&str> for NodeId {
    fn from(s: &str) -> Self {
        NodeId(s.to_string())
    }
}

/// Unique identifier for an edge
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
#[serde(transparent)]
pub struct EdgeId(String);

impl EdgeId {
    pub fn new(id: impl Into<String>) -> Self {
        EdgeId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for EdgeId {
    fn from(s: String) -> Self {
        EdgeId(s)
    }
}

impl From<&str> for EdgeId {
    fn from(s: &str) -> Self {
        EdgeId(s.to_string())
    }
}

/// Node type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    Project,
    Pattern,
    Component,
    Technology,
    Concept,
}

impl NodeKind {
    pub const ALL: [NodeKind; 5] = [
        NodeKind::Project,
        NodeKind::Pattern,
        NodeKind::Component,
        NodeKind::Technology,
        NodeKind::Concept,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            NodeKind::Project => "project",
            NodeKind::Pattern => "pattern",
            NodeKind::Component => "component",
            NodeKind::Technology => "technology",
            NodeKind::Concept => "concept",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Edge (relationship) type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum EdgeKind {
    Uses,
    SimilarTo,
    DependsOn,
    ReplacedBy,
    DerivedFrom,
    CoOccursWith,
}

impl EdgeKind {
    pub const ALL: [EdgeKind; 6] = [
        EdgeKind::Uses,
        EdgeKind::SimilarTo,
        EdgeKind::DependsOn,
        EdgeKind::ReplacedBy,
        EdgeKind::DerivedFrom,
        EdgeKind::CoOccursWith,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EdgeKind::Uses => "uses",
            EdgeKind::SimilarTo => "similar_to",
            EdgeKind::DependsOn => "depends_on",
            EdgeKind::ReplacedBy => "replaced_by",
            EdgeKind::DerivedFrom => "derived_from",
            EdgeKind::CoOccursWith => "co_occurs_with",
        }
    }
}

impl fmt::Display for EdgeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}
