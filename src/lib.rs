//! Portfolio Knowledge Graph
//!
//! An in-memory knowledge graph over a software portfolio: projects, the reusable
//! patterns and shared components extracted from them, and the technologies they use.
//! On top of the graph sit similarity scoring, cluster and hub detection, and a
//! heuristic insight generator producing ranked, explainable findings.
//!
//! # Architecture
//!
//! - `graph`: typed property graph store and the ingestion rules that build it
//! - `algo`: adapter onto the topology algorithms in `portfolio-graph-algorithms`
//! - `analysis`: similarity, clustering, technology adoption, hubs
//! - `insight`: portfolio insights and per-project recommendations
//! - `engine`: `KnowledgeEngine`, the facade callers hold
//!
//! Extraction of the input records and any persistence of results live outside
//! this crate.
//!
//! ## Example Usage
//!
//! ```rust
//! use portfolio_graph::{KnowledgeEngine, NodeId, PortfolioData, ProjectRecord};
//!
//! let data = PortfolioData {
//!     projects: vec![
//!         ProjectRecord::new("web", "Web", "nextjs").with_database("supabase"),
//!         ProjectRecord::new("admin", "Admin", "nextjs").with_database("supabase"),
//!     ],
//!     ..Default::default()
//! };
//!
//! let mut engine = KnowledgeEngine::default();
//! engine.build_graph(&data).unwrap();
//!
//! let stats = engine.statistics();
//! assert_eq!(stats.total_nodes, 3);
//!
//! let similar = engine.find_similar_projects(&NodeId::project("web"), None);
//! assert_eq!(similar[0].project, NodeId::project("admin"));
//! ```

#![allow(missing_docs)]
#![warn(clippy::all)]

pub mod algo;
pub mod analysis;
pub mod config;
pub mod engine;
pub mod graph;
pub mod insight;
pub mod portfolio;

// Re-export main types for convenience
pub use graph::{
    Edge, EdgeId, EdgeKind, GraphBuilder, GraphError, GraphResult, GraphStatistics,
    KnowledgeGraph, Node, NodeId, NodeKind, NodePayload, PropertyMap, PropertyValue,
};

pub use analysis::{
    pattern_similarity, Hub, PatternMatch, ProjectMatch, SimilarityAnalyzer, TechnologyAdoption,
};

pub use insight::{Impact, Insight, InsightKind, Priority, Recommendation, SuggestedItem};

pub use config::{ConfigError, ConfigResult, EngineConfig};

pub use engine::{GraphSnapshot, KnowledgeEngine};

pub use portfolio::{
    ComponentRecord, PatternRecord, PortfolioData, ProjectRecord, ProjectStack, SimilarityTriple,
};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get version string
pub fn version() -> &'static str {
    VERSION
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert_eq!(version(), "0.4.0");
    }
}
