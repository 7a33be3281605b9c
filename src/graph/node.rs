//! Node implementation for the knowledge graph
//!
//! Every node carries a payload shaped by its kind (project, pattern, component,
//! technology, concept) plus an open attribute bag for extra data.

use super::property::{PropertyMap, PropertyValue};
use super::types::{NodeId, NodeKind};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Reference to the project that owns a pattern or component
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectRef {
    /// Source-record identifier of the project (not the node id)
    pub id: String,
    pub name: String,
}

impl ProjectRef {
    pub fn node_id(&self) -> NodeId {
        NodeId::project(&self.id)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectAttrs {
    pub path: String,
    pub project_type: String,
    pub framework: Option<String>,
    pub database: Option<String>,
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatternAttrs {
    pub pattern_type: String,
    pub category: String,
    pub keywords: Vec<String>,
    /// 1-10
    pub complexity: f64,
    /// 1-10
    pub quality: f64,
    pub dependencies: Vec<String>,
    pub extracted_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentAttrs {
    pub component_type: String,
    pub category: String,
    /// 1-10
    pub quality: f64,
    pub version: String,
    /// Source-record ids of the projects the component is installed in
    pub installations: Vec<String>,
    pub extracted_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TechnologyAttrs {
    /// Stack slot the technology was first seen in ("framework", "database")
    pub role: String,
}

/// Kind-specific node data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NodePayload {
    Project(ProjectAttrs),
    Pattern(PatternAttrs),
    Component(ComponentAttrs),
    Technology(TechnologyAttrs),
    Concept,
}

impl NodePayload {
    pub fn kind(&self) -> NodeKind {
        match self {
            NodePayload::Project(_) => NodeKind::Project,
            NodePayload::Pattern(_) => NodeKind::Pattern,
            NodePayload::Component(_) => NodeKind::Component,
            NodePayload::Technology(_) => NodeKind::Technology,
            NodePayload::Concept => NodeKind::Concept,
        }
    }
}

/// A node in the knowledge graph
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    /// Unique identifier for this node
    pub id: NodeId,

    /// Display name
    pub name: String,

    /// Owning project, for patterns and components
    pub project: Option<ProjectRef>,

    /// Kind-specific data
    pub payload: NodePayload,

    /// Extra attributes not covered by the payload
    pub attributes: PropertyMap,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

impl Node {
    /// Create a new node stamped with the current time
    pub fn new(id: impl Into<NodeId>, name: impl Into<String>, payload: NodePayload) -> Self {
        Node {
            id: id.into(),
            name: name.into(),
            project: None,
            payload,
            attributes: PropertyMap::new(),
            created_at: Utc::now(),
        }
    }

    pub fn with_project(mut self, project: ProjectRef) -> Self {
        self.project = Some(project);
        self
    }

    pub fn kind(&self) -> NodeKind {
        self.payload.kind()
    }

    pub fn is(&self, kind: NodeKind) -> bool {
        self.kind() == kind
    }

    pub fn as_project(&self) -> Option<&ProjectAttrs> {
        match &self.payload {
            NodePayload::Project(attrs) => Some(attrs),
            _ => None,
        }
    }

    pub fn as_pattern(&self) -> Option<&PatternAttrs> {
        match &self.payload {
            NodePayload::Pattern(attrs) => Some(attrs),
            _ => None,
        }
    }

    pub fn as_component(&self) -> Option<&ComponentAttrs> {
        match &self.payload {
            NodePayload::Component(attrs) => Some(attrs),
            _ => None,
        }
    }

    /// Quality score of a pattern or component
    pub fn quality(&self) -> Option<f64> {
        match &self.payload {
            NodePayload::Pattern(attrs) => Some(attrs.quality),
            NodePayload::Component(attrs) => Some(attrs.quality),
            _ => None,
        }
    }

    /// Category of a pattern or component
    pub fn category(&self) -> Option<&str> {
        match &self.payload {
            NodePayload::Pattern(attrs) => Some(&attrs.category),
            NodePayload::Component(attrs) => Some(&attrs.category),
            _ => None,
        }
    }

    /// `(type, category)` signature of a pattern
    pub fn pattern_signature(&self) -> Option<(&str, &str)> {
        self.as_pattern()
            .map(|attrs| (attrs.pattern_type.as_str(), attrs.category.as_str()))
    }

    /// Set an extra attribute
    pub fn set_attribute(&mut self, key: impl Into<String>, value: impl Into<PropertyValue>) -> Option<PropertyValue> {
        self.attributes.insert(key.into(), value.into())
    }

    /// Get an extra attribute
    pub fn get_attribute(&self, key: &str) -> Option<&PropertyValue> {
        self.attributes.get(key)
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Node {}

impl std::hash::Hash for Node {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}
