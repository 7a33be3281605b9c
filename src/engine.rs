//! Query facade over one portfolio graph
//!
//! `KnowledgeEngine` owns the graph for its lifetime. Ingestion replaces the graph
//! wholesale; every query is read-only and total, so unknown ids produce empty
//! results rather than errors.

use crate::algo;
use crate::analysis::{
    find_clusters, find_hubs, technology_adoption, Hub, PatternMatch, ProjectMatch,
    SimilarityAnalyzer, TechnologyAdoption,
};
use crate::config::EngineConfig;
use crate::graph::{
    Edge, GraphBuilder, GraphResult, GraphStatistics, KnowledgeGraph, Node, NodeId, NodeKind,
};
use crate::insight::{generate_recommendations, Insight, InsightGenerator, Recommendation};
use crate::portfolio::PortfolioData;
use serde::{Deserialize, Serialize};
use tracing::info;

/// Flat copy of the graph for serialization or display
///
/// Not `PartialEq`: `Node` and `Edge` compare by id only, so compare serialized
/// values when content matters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphSnapshot {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
}

impl GraphSnapshot {
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

#[derive(Debug, Clone, Default)]
pub struct KnowledgeEngine {
    config: EngineConfig,
    graph: KnowledgeGraph,
}

impl KnowledgeEngine {
    pub fn new(config: EngineConfig) -> Self {
        KnowledgeEngine {
            config,
            graph: KnowledgeGraph::new(),
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn graph(&self) -> &KnowledgeGraph {
        &self.graph
    }

    pub fn graph_mut(&mut self) -> &mut KnowledgeGraph {
        &mut self.graph
    }

    fn analyzer(&self) -> SimilarityAnalyzer {
        SimilarityAnalyzer::new(self.config.parallel_scoring)
    }

    /// Build a fresh graph from a portfolio: projects, then patterns, components and
    /// similarity edges.
    ///
    /// Without pre-scored similarities (and with `auto_similarity_edges` on) every
    /// pattern pair is scored and strong pairs get one `SimilarTo` edge. On error the
    /// previous graph is left untouched.
    pub fn build_graph(&mut self, data: &PortfolioData) -> GraphResult<()> {
        let mut graph = GraphBuilder::build_from_projects(&data.projects)?;
        GraphBuilder::add_patterns(&mut graph, &data.patterns)?;
        GraphBuilder::add_components(&mut graph, &data.components)?;

        match &data.similarities {
            Some(triples) => GraphBuilder::add_similarity_edges(&mut graph, triples)?,
            None if self.config.auto_similarity_edges => {
                let triples = self
                    .analyzer()
                    .derive_similarity_triples(&data.patterns, self.config.similarity_edge_threshold);
                GraphBuilder::add_similarity_edges(&mut graph, &triples)?;
            }
            None => {}
        }

        let stats = graph.statistics();
        info!(
            "Knowledge graph ready: {} nodes, {} edges ({:.2} avg connections)",
            stats.total_nodes, stats.total_edges, stats.avg_connections
        );
        self.graph = graph;
        Ok(())
    }

    /// Projects similar to `id`; `threshold` defaults to the configured value
    pub fn find_similar_projects(&self, id: &NodeId, threshold: Option<f64>) -> Vec<ProjectMatch> {
        let threshold = threshold.unwrap_or(self.config.project_similarity_threshold);
        self.analyzer().find_similar_projects(&self.graph, id, threshold)
    }

    /// Patterns similar to `id`; `threshold` defaults to the configured value
    pub fn find_similar_patterns(&self, id: &NodeId, threshold: Option<f64>) -> Vec<PatternMatch> {
        let threshold = threshold.unwrap_or(self.config.pattern_similarity_threshold);
        self.analyzer().find_similar_patterns(&self.graph, id, threshold)
    }

    pub fn find_clusters(&self, kind: NodeKind) -> Vec<Vec<&Node>> {
        find_clusters(&self.graph, kind)
    }

    pub fn find_technology_adoption(&self) -> Vec<TechnologyAdoption<'_>> {
        technology_adoption(&self.graph)
    }

    pub fn find_hubs(&self, kind: Option<NodeKind>, limit: Option<usize>) -> Vec<Hub<'_>> {
        find_hubs(&self.graph, kind, limit.unwrap_or(self.config.default_hub_limit))
    }

    pub fn generate_insights(&self) -> Vec<Insight> {
        let insights = InsightGenerator::new(&self.graph).generate();
        info!("Generated {} insights", insights.len());
        insights
    }

    pub fn generate_recommendations(&self, project_id: &NodeId) -> Vec<Recommendation> {
        generate_recommendations(&self.graph, project_id)
    }

    pub fn statistics(&self) -> GraphStatistics {
        self.graph.statistics()
    }

    pub fn node(&self, id: &NodeId) -> Option<&Node> {
        self.graph.get_node(id)
    }

    pub fn neighbors(&self, id: &NodeId) -> Vec<&Node> {
        self.graph.get_neighbors(id)
    }

    pub fn find_path(&self, start: &NodeId, end: &NodeId) -> Option<Vec<NodeId>> {
        algo::find_path(&self.graph, start, end)
    }

    pub fn nodes_by_type(&self, kind: NodeKind) -> Vec<&Node> {
        self.graph.get_nodes_by_type(kind)
    }

    /// Insertion-ordered copy of every node and edge
    pub fn export_graph(&self) -> GraphSnapshot {
        GraphSnapshot {
            nodes: self.graph.nodes().cloned().collect(),
            edges: self.graph.edges().cloned().collect(),
        }
    }
}
