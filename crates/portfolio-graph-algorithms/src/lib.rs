pub mod centrality;
pub mod common;
pub mod community;
pub mod matching;
pub mod pathfinding;

pub use centrality::{out_degree_ranking, DegreeEntry};
pub use common::{GraphView, NodeId};
pub use community::threshold_clusters;
pub use matching::maximum_bipartite_matching;
pub use pathfinding::{bfs, PathResult};
