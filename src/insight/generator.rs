//! Portfolio insight generation
//!
//! Every rule scans the graph read-only and emits `Insight` records; nothing is
//! written back. Output is ranked by impact, then confidence, with generation order
//! breaking the remaining ties.

use super::types::{Impact, Insight, InsightKind};
use crate::analysis::technology_adoption;
use crate::graph::{EdgeKind, KnowledgeGraph, Node, NodeId, NodeKind};
use chrono::Utc;
use indexmap::IndexMap;
use std::cmp::Ordering;
use tracing::debug;

const MIN_INSTALLATIONS: usize = 3;
const MIN_USAGE_RATE: f64 = 0.5;
const HIGH_USAGE_RATE: f64 = 0.8;

const MIN_GROUP_SIZE: usize = 3;
const PATTERN_GROUP_CONFIDENCE: f64 = 0.8;
const HIGH_IMPACT_OWNERS: usize = 5;

const QUALITY_BAR: f64 = 7.0;
const QUALITY_CONFIDENCE: f64 = 0.7;
const MAX_ALTERNATIVES: usize = 3;

const CONSOLIDATION_CONFIDENCE: f64 = 0.75;
const HIGH_IMPACT_GROUP_SIZE: usize = 5;

const TREND_ADOPTION_RATE: f64 = 0.7;
const TREND_CONFIDENCE: f64 = 0.9;

/// Produces ranked insights over one graph
pub struct InsightGenerator<'g> {
    graph: &'g KnowledgeGraph,
    insights: Vec<Insight>,
}

impl<'g> InsightGenerator<'g> {
    pub fn new(graph: &'g KnowledgeGraph) -> Self {
        InsightGenerator {
            graph,
            insights: Vec::new(),
        }
    }

    /// Run every rule and return the ranked insights
    pub fn generate(mut self) -> Vec<Insight> {
        self.reuse_opportunities();
        self.quality_improvements();
        self.consolidation_opportunities();
        self.trends();

        let mut insights = self.insights;
        rank(&mut insights);
        debug!("Generated {} insights", insights.len());
        insights
    }

    #[allow(clippy::too_many_arguments)]
    fn push(
        &mut self,
        kind: InsightKind,
        title: String,
        description: String,
        confidence: f64,
        impact: Impact,
        suggestions: Vec<String>,
        related_nodes: Vec<NodeId>,
    ) {
        let id = format!("insight-{}", self.insights.len() + 1);
        self.insights.push(Insight {
            id,
            kind,
            title,
            description,
            confidence,
            impact,
            suggestions,
            related_nodes,
            created_at: Utc::now(),
        });
    }

    fn reuse_opportunities(&mut self) {
        let graph = self.graph;
        let total_projects = graph.get_nodes_by_type(NodeKind::Project).len();

        // Widely installed components
        if total_projects > 0 {
            for component in graph.get_nodes_by_type(NodeKind::Component) {
                let installs = installing_projects(graph, &component.id);
                let usage = installs.len() as f64 / total_projects as f64;
                if installs.len() < MIN_INSTALLATIONS || usage <= MIN_USAGE_RATE {
                    continue;
                }

                let impact = if usage >= HIGH_USAGE_RATE { Impact::High } else { Impact::Medium };
                let missing = total_projects - installs.len();
                let mut suggestions = vec![format!(
                    "Publish {} as a versioned shared package",
                    component.name
                )];
                if missing > 0 {
                    suggestions.push(format!(
                        "Evaluate {} for the remaining {} project(s)",
                        component.name, missing
                    ));
                }
                suggestions.push("Document its API so new projects adopt it by default".to_string());

                let mut related = vec![component.id.clone()];
                related.extend(installs.iter().map(|p| p.id.clone()));

                self.push(
                    InsightKind::ReuseOpportunity,
                    format!("Reuse opportunity: {}", component.name),
                    format!(
                        "{} is installed in {} of {} projects ({:.0}%)",
                        component.name,
                        installs.len(),
                        total_projects,
                        usage * 100.0
                    ),
                    usage,
                    impact,
                    suggestions,
                    related,
                );
            }
        }

        // Recurring pattern signatures
        let mut groups: IndexMap<(&str, &str), Vec<&Node>> = IndexMap::new();
        for pattern in graph.get_nodes_by_type(NodeKind::Pattern) {
            if let Some(signature) = pattern.pattern_signature() {
                groups.entry(signature).or_default().push(pattern);
            }
        }

        for ((pattern_type, category), members) in groups {
            if members.len() < MIN_GROUP_SIZE {
                continue;
            }
            let mut owners: Vec<&str> = Vec::new();
            for member in &members {
                if let Some(owner) = &member.project {
                    if !owners.contains(&owner.id.as_str()) {
                        owners.push(&owner.id);
                    }
                }
            }
            let impact = if owners.len() > HIGH_IMPACT_OWNERS { Impact::High } else { Impact::Medium };

            self.push(
                InsightKind::ReuseOpportunity,
                format!("Recurring {} {} pattern", category, pattern_type),
                format!(
                    "{} {} patterns in category {} across {} project(s)",
                    members.len(),
                    pattern_type,
                    category,
                    owners.len()
                ),
                PATTERN_GROUP_CONFIDENCE,
                impact,
                vec![
                    format!("Extract a shared {} {} implementation", category, pattern_type),
                    format!("Pick the highest-quality variant among: {}", names(&members)),
                ],
                ids(&members),
            );
        }
    }

    fn quality_improvements(&mut self) {
        let graph = self.graph;

        for kind in [NodeKind::Pattern, NodeKind::Component] {
            let candidates = graph.get_nodes_by_type(kind);

            for node in &candidates {
                let (Some(quality), Some(category)) = (node.quality(), node.category()) else {
                    continue;
                };
                if quality >= QUALITY_BAR {
                    continue;
                }

                let mut better: Vec<(&Node, f64)> = candidates
                    .iter()
                    .filter(|other| other.id != node.id && other.category() == Some(category))
                    .filter_map(|other| other.quality().map(|q| (*other, q)))
                    .filter(|(_, q)| *q > quality)
                    .collect();
                if better.is_empty() {
                    continue;
                }
                better.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
                better.truncate(MAX_ALTERNATIVES);

                let suggestions = better
                    .iter()
                    .map(|(alt, q)| format!("Consider {} (quality {:.1})", alt.name, q))
                    .collect();
                let mut related = vec![node.id.clone()];
                related.extend(better.iter().map(|(alt, _)| alt.id.clone()));

                self.push(
                    InsightKind::QualityImprovement,
                    format!("Improve {} {}", kind, node.name),
                    format!(
                        "{} has quality {:.1}; {} {} alternative(s) score higher",
                        node.name,
                        quality,
                        better.len(),
                        category
                    ),
                    QUALITY_CONFIDENCE,
                    Impact::Medium,
                    suggestions,
                    related,
                );
            }
        }
    }

    /// Single-pass greedy grouping: each pattern joins the first group whose first
    /// member shares its type and category, otherwise it starts a new group. This is
    /// not a transitive closure, so it can under-group under a looser similarity test.
    fn consolidation_opportunities(&mut self) {
        let mut groups: Vec<Vec<&Node>> = Vec::new();

        for pattern in self.graph.get_nodes_by_type(NodeKind::Pattern) {
            let Some(signature) = pattern.pattern_signature() else {
                continue;
            };
            match groups
                .iter_mut()
                .find(|group| group[0].pattern_signature() == Some(signature))
            {
                Some(group) => group.push(pattern),
                None => groups.push(vec![pattern]),
            }
        }

        for group in groups {
            if group.len() < MIN_GROUP_SIZE {
                continue;
            }
            let impact = if group.len() > HIGH_IMPACT_GROUP_SIZE { Impact::High } else { Impact::Medium };

            self.push(
                InsightKind::Consolidation,
                format!("Consolidate {} similar patterns", group.len()),
                format!("Similar implementations: {}", names(&group)),
                CONSOLIDATION_CONFIDENCE,
                impact,
                vec![
                    "Merge these into a single shared implementation".to_string(),
                    "Migrate projects to the merged version incrementally".to_string(),
                ],
                ids(&group),
            );
        }
    }

    fn trends(&mut self) {
        let adoption = technology_adoption(self.graph);

        for entry in adoption {
            if entry.adoption_rate <= TREND_ADOPTION_RATE {
                continue;
            }
            let name = &entry.technology.name;
            let mut related = vec![entry.technology.id.clone()];
            related.extend(entry.projects.iter().map(|p| p.id.clone()));

            self.push(
                InsightKind::Trend,
                format!("{} is a portfolio standard", name),
                format!(
                    "{} is used by {} project(s) ({:.0}% adoption)",
                    name,
                    entry.projects.len(),
                    entry.adoption_rate * 100.0
                ),
                TREND_CONFIDENCE,
                Impact::Medium,
                vec![
                    format!("Make {} the default for new projects", name),
                    format!("Maintain shared tooling and templates for {}", name),
                ],
                related,
            );
        }
    }
}

/// Distinct projects with a `Uses` edge into `component`
pub(crate) fn installing_projects<'g>(graph: &'g KnowledgeGraph, component: &NodeId) -> Vec<&'g Node> {
    let mut projects: Vec<&Node> = Vec::new();
    for edge in graph.incoming_edges(component) {
        if edge.kind != EdgeKind::Uses {
            continue;
        }
        if let Some(source) = graph.get_node(&edge.source) {
            if source.is(NodeKind::Project) && !projects.iter().any(|p| p.id == source.id) {
                projects.push(source);
            }
        }
    }
    projects
}

/// Impact rank descending, then confidence descending; stable
pub fn rank(insights: &mut [Insight]) {
    insights.sort_by(|a, b| {
        b.impact.rank().cmp(&a.impact.rank()).then_with(|| {
            b.confidence
                .partial_cmp(&a.confidence)
                .unwrap_or(Ordering::Equal)
        })
    });
}

fn names(nodes: &[&Node]) -> String {
    nodes.iter().map(|n| n.name.as_str()).collect::<Vec<_>>().join(", ")
}

fn ids(nodes: &[&Node]) -> Vec<NodeId> {
    nodes.iter().map(|n| n.id.clone()).collect()
}
