//! Pathfinding algorithms

use super::common::{GraphView, NodeId};
use std::collections::{HashMap, VecDeque};

/// Result of a pathfinding algorithm
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PathResult {
    pub source: NodeId,
    pub target: NodeId,
    pub path: Vec<NodeId>,
    pub cost: f64,
}

/// Breadth-First Search (Unweighted Shortest Path)
///
/// Successors are visited in view order, so among equal-length paths the first one
/// discovered wins. `source == target` yields the single-node path without traversal.
pub fn bfs(view: &GraphView, source: NodeId, target: NodeId) -> Option<PathResult> {
    let source_idx = *view.node_to_index.get(&source)?;
    let target_idx = *view.node_to_index.get(&target)?;

    if source_idx == target_idx {
        return Some(PathResult {
            source,
            target,
            path: vec![source],
            cost: 0.0,
        });
    }

    let mut queue = VecDeque::new();
    let mut visited = HashMap::new(); // index -> parent_index

    queue.push_back(source_idx);
    visited.insert(source_idx, None);

    while let Some(current_idx) = queue.pop_front() {
        if current_idx == target_idx {
            // Reconstruct path
            let mut path = Vec::new();
            let mut curr = Some(target_idx);
            while let Some(idx) = curr {
                path.push(view.index_to_node[idx]);
                curr = visited.get(&idx).copied().flatten();
            }
            path.reverse();
            return Some(PathResult {
                source,
                target,
                cost: (path.len() - 1) as f64,
                path,
            });
        }

        for &next_idx in view.successors(current_idx) {
            if !visited.contains_key(&next_idx) {
                visited.insert(next_idx, Some(current_idx));
                queue.push_back(next_idx);
            }
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chain() -> GraphView {
        // 1 -> 2 -> 3, 4 isolated
        GraphView::from_adjacency_list(vec![1, 2, 3, 4], vec![vec![1], vec![2], vec![], vec![]], None)
    }

    #[test]
    fn test_bfs() {
        let result = bfs(&chain(), 1, 3).unwrap();
        assert_eq!(result.path, vec![1, 2, 3]);
        assert_eq!(result.cost, 2.0);
    }

    #[test]
    fn test_bfs_same_node() {
        let result = bfs(&chain(), 2, 2).unwrap();
        assert_eq!(result.path, vec![2]);
        assert_eq!(result.cost, 0.0);
    }

    #[test]
    fn test_bfs_unreachable() {
        assert!(bfs(&chain(), 1, 4).is_none());
        // Edges are directed
        assert!(bfs(&chain(), 3, 1).is_none());
        // Unknown nodes
        assert!(bfs(&chain(), 1, 99).is_none());
    }

    #[test]
    fn test_bfs_first_discovered_path_wins() {
        // 1 -> 2 -> 4 and 1 -> 3 -> 4; 2 is inserted first
        let view = GraphView::from_adjacency_list(
            vec![1, 2, 3, 4],
            vec![vec![1, 2], vec![3], vec![3], vec![]],
            None,
        );
        assert_eq!(bfs(&view, 1, 4).unwrap().path, vec![1, 2, 4]);

        let view = GraphView::from_adjacency_list(
            vec![1, 2, 3, 4],
            vec![vec![2, 1], vec![3], vec![3], vec![]],
            None,
        );
        assert_eq!(bfs(&view, 1, 4).unwrap().path, vec![1, 3, 4]);
    }
}
