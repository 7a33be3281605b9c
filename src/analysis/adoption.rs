//! Technology adoption across projects

use super::similarity::sort_desc;
use crate::graph::{EdgeKind, KnowledgeGraph, Node, NodeKind};
use serde::Serialize;

/// How widely one technology is used
#[derive(Debug, Clone, Serialize)]
pub struct TechnologyAdoption<'a> {
    pub technology: &'a Node,
    /// Distinct projects with a `Uses` edge into the technology
    pub projects: Vec<&'a Node>,
    /// `projects.len()` over the number of projects in the graph (0 for none)
    pub adoption_rate: f64,
}

/// Adoption of every technology node, most adopted first.
///
/// Equal rates keep technology insertion order.
pub fn technology_adoption(graph: &KnowledgeGraph) -> Vec<TechnologyAdoption<'_>> {
    let total_projects = graph.get_nodes_by_type(NodeKind::Project).len();

    let mut adoption: Vec<TechnologyAdoption<'_>> = graph
        .get_nodes_by_type(NodeKind::Technology)
        .into_iter()
        .map(|technology| {
            let mut projects: Vec<&Node> = Vec::new();
            for edge in graph.incoming_edges(&technology.id) {
                if edge.kind != EdgeKind::Uses {
                    continue;
                }
                let Some(source) = graph.get_node(&edge.source) else {
                    continue;
                };
                if source.is(NodeKind::Project) && !projects.iter().any(|p| p.id == source.id) {
                    projects.push(source);
                }
            }

            let adoption_rate = if total_projects == 0 {
                0.0
            } else {
                projects.len() as f64 / total_projects as f64
            };

            TechnologyAdoption { technology, projects, adoption_rate }
        })
        .collect();

    sort_desc(&mut adoption, |a| a.adoption_rate);
    adoption
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{GraphBuilder, NodeId};
    use crate::portfolio::ProjectRecord;

    #[test]
    fn test_technology_adoption() {
        let projects = vec![
            ProjectRecord::new("a", "A", "nextjs").with_framework("next").with_database("supabase"),
            ProjectRecord::new("b", "B", "nextjs").with_database("supabase"),
            ProjectRecord::new("c", "C", "nextjs").with_database("supabase"),
            ProjectRecord::new("d", "D", "vite").with_framework("react"),
        ];
        let graph = GraphBuilder::build_from_projects(&projects).unwrap();
        let adoption = technology_adoption(&graph);

        assert_eq!(adoption.len(), 3);
        assert_eq!(adoption[0].technology.id, NodeId::technology("supabase"));
        assert_eq!(adoption[0].projects.len(), 3);
        assert_eq!(adoption[0].adoption_rate, 0.75);
        // next and react tie at 0.25 and keep insertion order
        assert_eq!(adoption[1].technology.id, NodeId::technology("next"));
        assert_eq!(adoption[2].technology.id, NodeId::technology("react"));
    }

    #[test]
    fn test_repeated_edges_count_once() {
        let mut graph =
            GraphBuilder::build_from_projects(&[ProjectRecord::new("a", "A", "x").with_framework("rust")])
                .unwrap();
        graph
            .connect(&NodeId::project("a"), &NodeId::technology("rust"), EdgeKind::Uses, 1.0)
            .unwrap();

        let adoption = technology_adoption(&graph);
        assert_eq!(adoption[0].projects.len(), 1);
        assert_eq!(adoption[0].adoption_rate, 1.0);
    }

    #[test]
    fn test_empty_graph() {
        assert!(technology_adoption(&KnowledgeGraph::new()).is_empty());
    }
}
