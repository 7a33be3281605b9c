//! Similarity analysis over the knowledge graph
//!
//! Read-only queries: pairwise scoring, similarity clusters, technology adoption
//! and hub detection.

pub mod adoption;
pub mod clustering;
pub mod hubs;
pub mod similarity;

pub use adoption::{technology_adoption, TechnologyAdoption};
pub use clustering::{find_clusters, CLUSTER_EDGE_THRESHOLD};
pub use hubs::{find_hubs, Hub};
pub use similarity::{
    pattern_similarity, PatternFeatures, PatternMatch, ProjectMatch, SimilarityAnalyzer,
    SimilarityScore, PATTERN_MATCH_THRESHOLD,
};
