//! Knowledge graph storage and ingestion
//!
//! This module implements the typed property graph over a software portfolio:
//! - Nodes with kind-specific payloads (projects, patterns, components, technologies)
//! - Directed, weighted edges with referential integrity checked on insert
//! - An insertion-ordered adjacency index for reproducible traversals
//! - Ingestion rules turning portfolio records into nodes and edges

pub mod builder;
pub mod edge;
pub mod node;
pub mod property;
pub mod store;
pub mod types;

// Re-export main types
pub use builder::GraphBuilder;
pub use edge::Edge;
pub use node::{
    ComponentAttrs, Node, NodePayload, PatternAttrs, ProjectAttrs, ProjectRef, TechnologyAttrs,
};
pub use property::{PropertyMap, PropertyValue};
pub use store::{GraphError, GraphResult, GraphStatistics, KnowledgeGraph};
pub use types::{EdgeId, EdgeKind, NodeId, NodeKind};
