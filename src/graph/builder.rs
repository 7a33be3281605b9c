//! Ingestion rules: portfolio records -> nodes and edges
//!
//! Edge orientation used throughout:
//! - project -> technology (`Uses`, 1.0) for every declared stack entry
//! - project -> pattern (`Uses`, 1.0) for the owning project
//! - pattern -> technology (`DependsOn`, 0.8) for dependencies naming a known technology
//! - component -> source project (`Uses`, 1.0)
//! - installing project -> component (`Uses`, 0.9)
//! - pattern -> pattern (`SimilarTo`, score), one direction only

use super::node::{
    ComponentAttrs, Node, NodePayload, PatternAttrs, ProjectAttrs, ProjectRef, TechnologyAttrs,
};
use super::store::{GraphResult, KnowledgeGraph};
use super::types::{EdgeKind, NodeId, NodeKind};
use crate::portfolio::{ComponentRecord, PatternRecord, ProjectRecord, SimilarityTriple};
use tracing::{debug, info, warn};

pub const STACK_USES_WEIGHT: f64 = 1.0;
pub const OWNER_USES_WEIGHT: f64 = 1.0;
pub const INSTALLATION_USES_WEIGHT: f64 = 0.9;
pub const DEPENDENCY_WEIGHT: f64 = 0.8;

/// Translates portfolio records into graph structure
pub struct GraphBuilder;

impl GraphBuilder {
    /// Build a fresh graph from project records.
    ///
    /// Technology nodes are shared across projects: the first project declaring a
    /// technology creates `tech-{name}`, later ones reuse it.
    pub fn build_from_projects(projects: &[ProjectRecord]) -> GraphResult<KnowledgeGraph> {
        let mut graph = KnowledgeGraph::new();

        for project in projects {
            let project_id = NodeId::project(&project.id);
            let stack = project.stack.clone().unwrap_or_default();

            graph.add_node(Node::new(
                project_id.clone(),
                project.name.clone(),
                NodePayload::Project(ProjectAttrs {
                    path: project.path.clone(),
                    project_type: project.project_type.clone(),
                    framework: stack.framework.clone(),
                    database: stack.database.clone(),
                    status: project.status.clone(),
                }),
            ));

            let declared = [("framework", stack.framework), ("database", stack.database)];
            for (role, technology) in declared {
                let Some(technology) = technology.filter(|t| !t.is_empty()) else {
                    continue;
                };
                let tech_id = NodeId::technology(&technology);
                if !graph.has_node(&tech_id) {
                    graph.add_node(Node::new(
                        tech_id.clone(),
                        technology.clone(),
                        NodePayload::Technology(TechnologyAttrs { role: role.to_string() }),
                    ));
                }
                graph.connect(&project_id, &tech_id, EdgeKind::Uses, STACK_USES_WEIGHT)?;
            }
        }

        info!(
            "Built graph from {} projects ({} nodes, {} edges)",
            projects.len(),
            graph.node_count(),
            graph.edge_count()
        );
        Ok(graph)
    }

    /// Add pattern nodes, linking each to its owning project and known technologies
    pub fn add_patterns(graph: &mut KnowledgeGraph, patterns: &[PatternRecord]) -> GraphResult<()> {
        for pattern in patterns {
            let pattern_id = NodeId::pattern(&pattern.id);
            let owner = ProjectRef {
                id: pattern.project_id.clone(),
                name: pattern.project_name.clone(),
            };
            let owner_id = owner.node_id();

            graph.add_node(
                Node::new(
                    pattern_id.clone(),
                    pattern.name.clone(),
                    NodePayload::Pattern(PatternAttrs {
                        pattern_type: pattern.pattern_type.clone(),
                        category: pattern.category.clone(),
                        keywords: pattern.keywords.clone(),
                        complexity: pattern.complexity,
                        quality: pattern.quality,
                        dependencies: pattern.dependencies.clone(),
                        extracted_at: pattern.extracted_at,
                    }),
                )
                .with_project(owner),
            );

            if graph.has_node(&owner_id) {
                graph.connect(&owner_id, &pattern_id, EdgeKind::Uses, OWNER_USES_WEIGHT)?;
            } else {
                warn!("Pattern {} references unknown project {}", pattern_id, owner_id);
            }

            for dependency in &pattern.dependencies {
                let tech_id = NodeId::technology(dependency);
                let is_technology = graph
                    .get_node(&tech_id)
                    .is_some_and(|n| n.is(NodeKind::Technology));
                if is_technology {
                    graph.connect(&pattern_id, &tech_id, EdgeKind::DependsOn, DEPENDENCY_WEIGHT)?;
                }
            }
        }

        debug!("Added {} patterns", patterns.len());
        Ok(())
    }

    /// Add component nodes with their source-project and installation links
    pub fn add_components(
        graph: &mut KnowledgeGraph,
        components: &[ComponentRecord],
    ) -> GraphResult<()> {
        for component in components {
            let component_id = NodeId::component(&component.id);
            let source = ProjectRef {
                id: component.source_project_id.clone(),
                name: component.source_project_name.clone(),
            };
            let source_id = source.node_id();

            graph.add_node(
                Node::new(
                    component_id.clone(),
                    component.name.clone(),
                    NodePayload::Component(ComponentAttrs {
                        component_type: component.component_type.clone(),
                        category: component.category.clone(),
                        quality: component.quality,
                        version: component.version.clone(),
                        installations: component.installations.clone(),
                        extracted_at: component.extracted_at,
                    }),
                )
                .with_project(source),
            );

            if graph.has_node(&source_id) {
                graph.connect(&component_id, &source_id, EdgeKind::Uses, OWNER_USES_WEIGHT)?;
            } else {
                warn!("Component {} references unknown project {}", component_id, source_id);
            }

            for installation in &component.installations {
                let project_id = NodeId::project(installation);
                if graph.has_node(&project_id) {
                    graph.connect(
                        &project_id,
                        &component_id,
                        EdgeKind::Uses,
                        INSTALLATION_USES_WEIGHT,
                    )?;
                } else {
                    debug!(
                        "Skipping installation of {} in unknown project {}",
                        component_id, project_id
                    );
                }
            }
        }

        debug!("Added {} components", components.len());
        Ok(())
    }

    /// Add one directed `SimilarTo` edge per triple (pattern record ids).
    ///
    /// The reverse edge is not added. Unknown patterns or out-of-range scores are
    /// rejected by the store.
    pub fn add_similarity_edges(
        graph: &mut KnowledgeGraph,
        triples: &[SimilarityTriple],
    ) -> GraphResult<()> {
        for triple in triples {
            graph.connect(
                &NodeId::pattern(&triple.source),
                &NodeId::pattern(&triple.target),
                EdgeKind::SimilarTo,
                triple.similarity,
            )?;
        }

        debug!("Added {} similarity edges", triples.len());
        Ok(())
    }
}
