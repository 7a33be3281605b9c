//! Similarity clusters
//!
//! Groups of nodes connected through strong `SimilarTo` edges, discovered by
//! traversing outgoing edges only.

use crate::algo::{build_view, resolve, threshold_clusters, ViewFilter};
use crate::graph::{EdgeKind, KnowledgeGraph, Node, NodeKind};
use tracing::debug;

/// Minimum `SimilarTo` weight an edge needs to join two nodes into a cluster
pub const CLUSTER_EDGE_THRESHOLD: f64 = 0.7;

/// Clusters of `kind` nodes joined by `SimilarTo` edges of weight >= 0.7.
///
/// Singletons are dropped and clusters are ordered by size, largest first. Because
/// traversal follows edge direction, a node whose only strong edge points at an
/// already-claimed node ends up alone.
pub fn find_clusters(graph: &KnowledgeGraph, kind: NodeKind) -> Vec<Vec<&Node>> {
    let view = build_view(
        graph,
        ViewFilter {
            node_kind: Some(kind),
            edge_kind: Some(EdgeKind::SimilarTo),
            min_weight: Some(CLUSTER_EDGE_THRESHOLD),
        },
    );

    let clusters: Vec<Vec<&Node>> = threshold_clusters(&view, CLUSTER_EDGE_THRESHOLD)
        .into_iter()
        .map(|members| {
            members
                .into_iter()
                .filter_map(|handle| resolve(graph, handle))
                .collect()
        })
        .collect();

    debug!("Found {} {} clusters", clusters.len(), kind);
    clusters
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{GraphBuilder, NodeId};
    use crate::portfolio::{PatternRecord, ProjectRecord, SimilarityTriple};

    fn graph(triples: &[(&str, &str, f64)]) -> KnowledgeGraph {
        let mut graph =
            GraphBuilder::build_from_projects(&[ProjectRecord::new("web", "Web", "nextjs")]).unwrap();
        let patterns: Vec<PatternRecord> = ["a", "b", "c", "d", "e"]
            .iter()
            .map(|id| PatternRecord::new(*id, *id, "hook", "auth", "web"))
            .collect();
        GraphBuilder::add_patterns(&mut graph, &patterns).unwrap();
        let triples: Vec<SimilarityTriple> = triples
            .iter()
            .map(|(s, t, w)| SimilarityTriple::new(*s, *t, *w))
            .collect();
        GraphBuilder::add_similarity_edges(&mut graph, &triples).unwrap();
        graph
    }

    fn ids(cluster: &[&Node]) -> Vec<NodeId> {
        cluster.iter().map(|n| n.id.clone()).collect()
    }

    #[test]
    fn test_find_clusters() {
        let graph = graph(&[("a", "b", 0.9), ("b", "c", 0.8), ("d", "e", 0.75)]);
        let clusters = find_clusters(&graph, NodeKind::Pattern);

        assert_eq!(clusters.len(), 2);
        assert_eq!(
            ids(&clusters[0]),
            vec![NodeId::pattern("a"), NodeId::pattern("b"), NodeId::pattern("c")]
        );
        assert_eq!(ids(&clusters[1]), vec![NodeId::pattern("d"), NodeId::pattern("e")]);
    }

    #[test]
    fn test_weak_edges_do_not_cluster() {
        let graph = graph(&[("a", "b", 0.69), ("c", "d", 0.7)]);
        let clusters = find_clusters(&graph, NodeKind::Pattern);
        assert_eq!(clusters.len(), 1);
        assert_eq!(ids(&clusters[0]), vec![NodeId::pattern("c"), NodeId::pattern("d")]);
    }

    #[test]
    fn test_other_kinds_have_no_clusters() {
        let graph = graph(&[("a", "b", 0.9)]);
        assert!(find_clusters(&graph, NodeKind::Project).is_empty());
        assert!(find_clusters(&graph, NodeKind::Component).is_empty());
    }
}
