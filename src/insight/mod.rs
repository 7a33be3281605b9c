//! Insight generation
//!
//! Heuristic scans producing explainable findings for the whole portfolio
//! (`generator`) and suggestions for a single project (`recommend`). Results are
//! computed fresh on every call.

pub mod generator;
pub mod recommend;
pub mod types;

pub use generator::InsightGenerator;
pub use recommend::{generate_recommendations, tech_overlap};
pub use types::{Impact, Insight, InsightKind, Priority, Recommendation, SuggestedItem};
