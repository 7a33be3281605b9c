//! Per-project recommendations
//!
//! Similar projects here are found with a plain technology-overlap ratio,
//! `shared / max(own, other)`, independent of the weighted project similarity in
//! `analysis::similarity`.

use super::generator::installing_projects;
use super::types::{Priority, Recommendation, SuggestedItem};
use crate::analysis::similarity::sort_desc;
use crate::graph::{KnowledgeGraph, Node, NodeId, NodeKind};
use std::collections::HashSet;
use tracing::debug;

const MIN_TECH_OVERLAP: f64 = 0.3;
const MAX_SIMILAR_PROJECTS: usize = 3;
const MIN_PATTERN_QUALITY: f64 = 7.0;
const HIGH_PRIORITY_QUALITY: f64 = 8.0;
const MIN_COMPONENT_INSTALLS: usize = 3;
const HIGH_PRIORITY_INSTALLS: usize = 5;
const MAX_COMPONENTS: usize = 5;

/// Technology-overlap ratio between two projects; 0 when neither declares any
pub fn tech_overlap(graph: &KnowledgeGraph, a: &NodeId, b: &NodeId) -> f64 {
    let own: HashSet<&NodeId> = tech_ids(graph, a);
    let other: HashSet<&NodeId> = tech_ids(graph, b);
    let max = own.len().max(other.len());
    if max == 0 {
        return 0.0;
    }
    own.intersection(&other).count() as f64 / max as f64
}

fn tech_ids<'g>(graph: &'g KnowledgeGraph, project: &NodeId) -> HashSet<&'g NodeId> {
    graph
        .neighbors_of_kind(project, NodeKind::Technology)
        .into_iter()
        .map(|n| &n.id)
        .collect()
}

/// Recommendations for one project: patterns from its closest peers, then widely
/// installed components it lacks. Unknown or non-project ids yield nothing.
pub fn generate_recommendations(graph: &KnowledgeGraph, project_id: &NodeId) -> Vec<Recommendation> {
    let Some(target) = graph.get_node(project_id).filter(|n| n.is(NodeKind::Project)) else {
        return Vec::new();
    };

    let mut recommendations = Vec::new();
    let mut next_id = 1usize;
    let mut emit = |recommendations: &mut Vec<Recommendation>,
                    item_kind: SuggestedItem,
                    item_name: &str,
                    reason: String,
                    benefit: String,
                    confidence: f64,
                    priority: Priority| {
        recommendations.push(Recommendation {
            id: format!("rec-{}-{}", project_id, next_id),
            project_id: target.id.clone(),
            project_name: target.name.clone(),
            item_kind,
            item_name: item_name.to_string(),
            reason,
            benefit,
            confidence,
            priority,
        });
        next_id += 1;
    };

    // Peers by technology overlap
    let mut peers: Vec<(&Node, f64)> = graph
        .get_nodes_by_type(NodeKind::Project)
        .into_iter()
        .filter(|p| p.id != target.id)
        .map(|p| (p, tech_overlap(graph, &target.id, &p.id)))
        .filter(|(_, overlap)| *overlap > MIN_TECH_OVERLAP)
        .collect();
    sort_desc(&mut peers, |(_, overlap)| *overlap);
    peers.truncate(MAX_SIMILAR_PROJECTS);

    let mut covered: HashSet<(&str, &str)> = graph
        .neighbors_of_kind(&target.id, NodeKind::Pattern)
        .into_iter()
        .filter_map(Node::pattern_signature)
        .collect();

    for (peer, overlap) in &peers {
        for pattern in graph.neighbors_of_kind(&peer.id, NodeKind::Pattern) {
            let (Some(attrs), Some(signature)) = (pattern.as_pattern(), pattern.pattern_signature())
            else {
                continue;
            };
            if attrs.quality < MIN_PATTERN_QUALITY || !covered.insert(signature) {
                continue;
            }

            let priority = if attrs.quality >= HIGH_PRIORITY_QUALITY {
                Priority::High
            } else {
                Priority::Medium
            };
            emit(
                &mut recommendations,
                SuggestedItem::Pattern,
                &pattern.name,
                format!(
                    "Used in {} ({:.0}% technology overlap)",
                    peer.name,
                    overlap * 100.0
                ),
                format!(
                    "Proven {} {} implementation (quality {:.1})",
                    attrs.category, attrs.pattern_type, attrs.quality
                ),
                *overlap,
                priority,
            );
        }
    }

    // Widely installed components the project lacks
    let other_projects = graph.get_nodes_by_type(NodeKind::Project).len().saturating_sub(1);
    let mut components: Vec<(&Node, usize)> = Vec::new();
    for component in graph.get_nodes_by_type(NodeKind::Component) {
        if component.project.as_ref().is_some_and(|p| p.node_id() == target.id) {
            continue;
        }
        let installs = installing_projects(graph, &component.id);
        if installs.iter().any(|p| p.id == target.id) {
            continue;
        }
        if installs.len() >= MIN_COMPONENT_INSTALLS {
            components.push((component, installs.len()));
        }
    }
    components.sort_by(|a, b| b.1.cmp(&a.1));
    components.truncate(MAX_COMPONENTS);

    for (component, installs) in components {
        let priority = if installs > HIGH_PRIORITY_INSTALLS {
            Priority::High
        } else {
            Priority::Medium
        };
        let confidence = if other_projects == 0 {
            0.0
        } else {
            (installs as f64 / other_projects as f64).min(1.0)
        };
        emit(
            &mut recommendations,
            SuggestedItem::Component,
            &component.name,
            format!("Installed in {} other projects", installs),
            "Shared, already battle-tested component".to_string(),
            confidence,
            priority,
        );
    }

    debug!(
        "Generated {} recommendations for {}",
        recommendations.len(),
        project_id
    );
    recommendations
}
