//! Community detection algorithms
//!
//! Threshold clustering: breadth-first expansion over strong edges only.

use super::common::{GraphView, NodeId};
use std::collections::VecDeque;

/// Group nodes reachable from each other over outgoing edges of weight ≥ `min_weight`.
///
/// Seeds are taken in view order; every node joins at most one cluster (the first seed
/// that reaches it). Only outgoing edges are followed, so a cluster is the forward
/// reachability set of its seed among nodes not yet claimed. Singletons are dropped and
/// the rest are sorted by size, largest first (stable for equal sizes).
///
/// A view without weights treats every edge as strong enough.
pub fn threshold_clusters(view: &GraphView, min_weight: f64) -> Vec<Vec<NodeId>> {
    let n = view.node_count;
    let mut visited = vec![false; n];
    let mut clusters = Vec::new();

    for seed in 0..n {
        if visited[seed] {
            continue;
        }

        let mut members = Vec::new();
        let mut queue = VecDeque::new();
        visited[seed] = true;
        queue.push_back(seed);

        while let Some(current) = queue.pop_front() {
            members.push(view.index_to_node[current]);

            let weights = view.weights(current);
            for (pos, &next) in view.successors(current).iter().enumerate() {
                let weight = weights.map_or(1.0, |w| w[pos]);
                if weight < min_weight || visited[next] {
                    continue;
                }
                visited[next] = true;
                queue.push_back(next);
            }
        }

        if members.len() > 1 {
            clusters.push(members);
        }
    }

    clusters.sort_by(|a, b| b.len().cmp(&a.len()));
    clusters
}
