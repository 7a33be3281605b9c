//! Pairwise similarity scoring for projects and patterns
//!
//! Both scores are symmetric and lie in [0, 1]. Pairwise work is independent, so
//! candidate scoring may run on the rayon pool; results are collected in input order
//! and therefore identical to a sequential run.

use crate::algo::maximum_bipartite_matching;
use crate::graph::{KnowledgeGraph, Node, NodeId, NodeKind, PatternAttrs};
use crate::portfolio::{PatternRecord, SimilarityTriple};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashSet;
use tracing::debug;

/// Pattern pairs at or above this score count as "similar" inside project scoring
pub const PATTERN_MATCH_THRESHOLD: f64 = 0.7;

const TECH_POINTS: f64 = 3.0;
const PATTERN_POINTS: f64 = 2.0;
const PROJECT_TYPE_POINTS: f64 = 2.0;

const PATTERN_TYPE_POINTS: f64 = 3.0;
const PATTERN_CATEGORY_POINTS: f64 = 2.0;
const PATTERN_KEYWORD_POINTS: f64 = 3.0;
const PATTERN_COMPLEXITY_POINTS: f64 = 1.0;
const PATTERN_MAX_POINTS: f64 =
    PATTERN_TYPE_POINTS + PATTERN_CATEGORY_POINTS + PATTERN_KEYWORD_POINTS + PATTERN_COMPLEXITY_POINTS;
/// Complexity gap still treated as "close"
const COMPLEXITY_TOLERANCE: f64 = 2.0;

/// The fields pattern similarity looks at
#[derive(Debug, Clone, Copy)]
pub struct PatternFeatures<'a> {
    pub pattern_type: &'a str,
    pub category: &'a str,
    pub keywords: &'a [String],
    pub complexity: f64,
}

impl<'a> From<&'a PatternAttrs> for PatternFeatures<'a> {
    fn from(attrs: &'a PatternAttrs) -> Self {
        PatternFeatures {
            pattern_type: &attrs.pattern_type,
            category: &attrs.category,
            keywords: &attrs.keywords,
            complexity: attrs.complexity,
        }
    }
}

impl<'a> From<&'a PatternRecord> for PatternFeatures<'a> {
    fn from(record: &'a PatternRecord) -> Self {
        PatternFeatures {
            pattern_type: &record.pattern_type,
            category: &record.category,
            keywords: &record.keywords,
            complexity: record.complexity,
        }
    }
}

/// Score two patterns in [0, 1].
///
/// Same type 3/3, same category 2/2, shared keywords `min(shared, 3)`/3, and complexity
/// within 2 of each other 1/1 (a step, not a decay). Sum over 9.
pub fn pattern_similarity<'a, 'b>(
    a: impl Into<PatternFeatures<'a>>,
    b: impl Into<PatternFeatures<'b>>,
) -> f64 {
    let (a, b) = (a.into(), b.into());
    let mut points = 0.0;

    if a.pattern_type == b.pattern_type {
        points += PATTERN_TYPE_POINTS;
    }
    if a.category == b.category {
        points += PATTERN_CATEGORY_POINTS;
    }

    let keywords_a: HashSet<&str> = a.keywords.iter().map(String::as_str).collect();
    let keywords_b: HashSet<&str> = b.keywords.iter().map(String::as_str).collect();
    let shared = keywords_a.intersection(&keywords_b).count() as f64;
    points += shared.min(PATTERN_KEYWORD_POINTS);

    if (a.complexity - b.complexity).abs() <= COMPLEXITY_TOLERANCE {
        points += PATTERN_COMPLEXITY_POINTS;
    }

    points / PATTERN_MAX_POINTS
}

/// Score of one pairwise comparison with its justification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimilarityScore {
    pub score: f64,
    pub reasons: Vec<String>,
}

/// A project similar to the queried one
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectMatch {
    pub project: NodeId,
    pub name: String,
    pub score: f64,
    pub reasons: Vec<String>,
}

/// A pattern similar to the queried one
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatternMatch {
    pub pattern: NodeId,
    pub name: String,
    pub score: f64,
}

/// Similarity queries over a built graph
#[derive(Debug, Clone, Copy, Default)]
pub struct SimilarityAnalyzer {
    parallel: bool,
}

impl SimilarityAnalyzer {
    pub fn new(parallel: bool) -> Self {
        SimilarityAnalyzer { parallel }
    }

    /// Weighted project similarity: shared technologies (3 each), one-to-one similar
    /// pattern pairs (2 each) and same project type (2), each normalised against its
    /// own maximum. `None` when either id is not a project.
    pub fn project_similarity(
        &self,
        graph: &KnowledgeGraph,
        a: &NodeId,
        b: &NodeId,
    ) -> Option<SimilarityScore> {
        let project_a = graph.get_node(a)?.as_project()?;
        let project_b = graph.get_node(b)?.as_project()?;
        let mut reasons = Vec::new();

        // Technologies
        let techs_a = graph.neighbors_of_kind(a, NodeKind::Technology);
        let techs_b = graph.neighbors_of_kind(b, NodeKind::Technology);
        let tech_ids_b: HashSet<&NodeId> = techs_b.iter().map(|n| &n.id).collect();
        let shared_techs: Vec<&str> = techs_a
            .iter()
            .filter(|n| tech_ids_b.contains(&n.id))
            .map(|n| n.name.as_str())
            .collect();
        let tech_max = TECH_POINTS * techs_a.len().max(techs_b.len()) as f64;
        let tech_points = (TECH_POINTS * shared_techs.len() as f64).min(tech_max);
        if !shared_techs.is_empty() {
            reasons.push(format!(
                "Shares {} technolog{}: {}",
                shared_techs.len(),
                if shared_techs.len() == 1 { "y" } else { "ies" },
                shared_techs.join(", ")
            ));
        }

        // Patterns
        let patterns_a = pattern_attrs(graph.neighbors_of_kind(a, NodeKind::Pattern));
        let patterns_b = pattern_attrs(graph.neighbors_of_kind(b, NodeKind::Pattern));
        let candidates: Vec<Vec<usize>> = patterns_a
            .iter()
            .map(|pa| {
                patterns_b
                    .iter()
                    .enumerate()
                    .filter(|(_, pb)| pattern_similarity(*pa, **pb) >= PATTERN_MATCH_THRESHOLD)
                    .map(|(j, _)| j)
                    .collect()
            })
            .collect();
        let matched = maximum_bipartite_matching(&candidates, patterns_b.len());
        let pattern_max = PATTERN_POINTS * patterns_a.len().max(patterns_b.len()) as f64;
        let pattern_points = (PATTERN_POINTS * matched as f64).min(pattern_max);
        if matched > 0 {
            reasons.push(format!("{} similar pattern pair(s)", matched));
        }

        // Project type
        let type_points = if project_a.project_type == project_b.project_type {
            reasons.push(format!("Same project type: {}", project_a.project_type));
            PROJECT_TYPE_POINTS
        } else {
            0.0
        };

        let max_points = tech_max + pattern_max + PROJECT_TYPE_POINTS;
        Some(SimilarityScore {
            score: (tech_points + pattern_points + type_points) / max_points,
            reasons,
        })
    }

    /// Projects scoring at least `threshold` against `id`, best first
    pub fn find_similar_projects(
        &self,
        graph: &KnowledgeGraph,
        id: &NodeId,
        threshold: f64,
    ) -> Vec<ProjectMatch> {
        if !graph.get_node(id).is_some_and(|n| n.is(NodeKind::Project)) {
            return Vec::new();
        }

        let candidates: Vec<&Node> = graph
            .get_nodes_by_type(NodeKind::Project)
            .into_iter()
            .filter(|n| &n.id != id)
            .collect();

        let score = |other: &&Node| -> Option<ProjectMatch> {
            let result = self.project_similarity(graph, id, &other.id)?;
            (result.score >= threshold).then(|| ProjectMatch {
                project: other.id.clone(),
                name: other.name.clone(),
                score: result.score,
                reasons: result.reasons,
            })
        };

        let mut matches: Vec<ProjectMatch> = if self.parallel {
            candidates.par_iter().filter_map(score).collect()
        } else {
            candidates.iter().filter_map(score).collect()
        };
        sort_desc(&mut matches, |m| m.score);

        debug!("{} projects similar to {} (threshold {})", matches.len(), id, threshold);
        matches
    }

    /// Patterns scoring at least `threshold` against `id`, best first
    pub fn find_similar_patterns(
        &self,
        graph: &KnowledgeGraph,
        id: &NodeId,
        threshold: f64,
    ) -> Vec<PatternMatch> {
        let Some(target) = graph.get_node(id).and_then(Node::as_pattern) else {
            return Vec::new();
        };

        let candidates: Vec<&Node> = graph
            .get_nodes_by_type(NodeKind::Pattern)
            .into_iter()
            .filter(|n| &n.id != id)
            .collect();

        let score = |other: &&Node| -> Option<PatternMatch> {
            let attrs = other.as_pattern()?;
            let score = pattern_similarity(target, attrs);
            (score >= threshold).then(|| PatternMatch {
                pattern: other.id.clone(),
                name: other.name.clone(),
                score,
            })
        };

        let mut matches: Vec<PatternMatch> = if self.parallel {
            candidates.par_iter().filter_map(score).collect()
        } else {
            candidates.iter().filter_map(score).collect()
        };
        sort_desc(&mut matches, |m| m.score);
        matches
    }

    /// Score every unordered pattern pair `(i < j)` and keep those at or above
    /// `threshold` as `i -> j` triples, in pair order.
    pub fn derive_similarity_triples(
        &self,
        patterns: &[PatternRecord],
        threshold: f64,
    ) -> Vec<SimilarityTriple> {
        let row = |i: usize| -> Vec<SimilarityTriple> {
            let a = &patterns[i];
            patterns[i + 1..]
                .iter()
                .filter_map(|b| {
                    let score = pattern_similarity(a, b);
                    (score >= threshold).then(|| SimilarityTriple::new(&a.id, &b.id, score))
                })
                .collect()
        };

        let triples: Vec<SimilarityTriple> = if self.parallel {
            (0..patterns.len()).into_par_iter().flat_map_iter(row).collect()
        } else {
            (0..patterns.len()).flat_map(row).collect()
        };

        debug!(
            "Derived {} similarity triples from {} patterns",
            triples.len(),
            patterns.len()
        );
        triples
    }
}

fn pattern_attrs(nodes: Vec<&Node>) -> Vec<&PatternAttrs> {
    nodes.into_iter().filter_map(Node::as_pattern).collect()
}

/// Stable sort, largest key first
pub(crate) fn sort_desc<T>(items: &mut [T], key: impl Fn(&T) -> f64) {
    items.sort_by(|a, b| key(b).partial_cmp(&key(a)).unwrap_or(Ordering::Equal));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::GraphBuilder;
    use crate::portfolio::ProjectRecord;

    fn pattern(id: &str, ty: &str, category: &str, keywords: &[&str], complexity: f64) -> PatternRecord {
        PatternRecord::new(id, id, ty, category, "web")
            .with_keywords(keywords)
            .with_complexity(complexity)
    }

    #[test]
    fn test_pattern_similarity_arithmetic() {
        let a = pattern("a", "hook", "auth", &["session", "token", "jwt"], 4.0);
        let b = pattern("b", "hook", "auth", &["session", "token", "oauth"], 5.0);
        // (3 + 2 + 2 + 1) / 9
        let score = pattern_similarity(&a, &b);
        assert!((score - 8.0 / 9.0).abs() < 1e-9);

        let c = pattern("c", "hook", "auth", &["session", "token"], 5.0);
        let d = pattern("d", "hook", "auth", &["session", "cookie"], 6.0);
        assert!((pattern_similarity(&c, &d) - 7.0 / 9.0).abs() < 1e-9);
    }

    #[test]
    fn test_complexity_is_a_step() {
        let a = pattern("a", "x", "y", &[], 3.0);
        let near = pattern("b", "z", "w", &[], 5.0);
        let far = pattern("c", "z", "w", &[], 5.5);
        assert!((pattern_similarity(&a, &near) - 1.0 / 9.0).abs() < 1e-9);
        assert_eq!(pattern_similarity(&a, &far), 0.0);
    }

    #[test]
    fn test_keyword_credit_is_capped() {
        let kws = ["a", "b", "c", "d", "e"];
        let a = pattern("a", "x", "y", &kws, 1.0);
        let b = pattern("b", "x", "y", &kws, 1.0);
        assert_eq!(pattern_similarity(&a, &b), 1.0);
    }

    #[test]
    fn test_keyword_duplicates_count_once() {
        let a = pattern("a", "x", "y", &["k", "k", "k"], 9.0);
        let b = pattern("b", "q", "r", &["k"], 1.0);
        assert!((pattern_similarity(&a, &b) - 1.0 / 9.0).abs() < 1e-9);
    }

    fn portfolio_graph() -> KnowledgeGraph {
        let projects = vec![
            ProjectRecord::new("web", "Web", "nextjs").with_framework("next").with_database("supabase"),
            ProjectRecord::new("admin", "Admin", "nextjs").with_framework("next").with_database("supabase"),
            ProjectRecord::new("api", "API", "express").with_framework("express").with_database("supabase"),
            ProjectRecord::new("cli", "CLI", "rust"),
        ];
        let mut graph = GraphBuilder::build_from_projects(&projects).unwrap();
        let patterns = vec![
            PatternRecord::new("w1", "useAuth", "hook", "auth", "web").with_keywords(&["auth", "session"]),
            PatternRecord::new("w2", "useCart", "hook", "state", "web").with_keywords(&["cart"]),
            PatternRecord::new("a1", "useSession", "hook", "auth", "admin").with_keywords(&["auth", "session"]),
        ];
        GraphBuilder::add_patterns(&mut graph, &patterns).unwrap();
        graph
    }

    #[test]
    fn test_project_similarity() {
        let graph = portfolio_graph();
        let analyzer = SimilarityAnalyzer::default();
        let web = NodeId::project("web");
        let admin = NodeId::project("admin");

        // techs 6/6, patterns 2/4 (one matched pair), type 2/2 => 10/12
        let result = analyzer.project_similarity(&graph, &web, &admin).unwrap();
        assert!((result.score - 10.0 / 12.0).abs() < 1e-9);
        assert_eq!(result.reasons.len(), 3);
        assert!(result.reasons[0].starts_with("Shares 2 technologies"));

        let reverse = analyzer.project_similarity(&graph, &admin, &web).unwrap();
        assert_eq!(result.score, reverse.score);

        // Non-project ids
        assert!(analyzer
            .project_similarity(&graph, &web, &NodeId::technology("next"))
            .is_none());
    }

    #[test]
    fn test_project_similarity_without_signals() {
        let graph = portfolio_graph();
        let analyzer = SimilarityAnalyzer::default();
        // cli has nothing; api differs in type: only 0 points over 3*2 + 0 + 2
        let result = analyzer
            .project_similarity(&graph, &NodeId::project("cli"), &NodeId::project("api"))
            .unwrap();
        assert_eq!(result.score, 0.0);
        assert!(result.reasons.is_empty());
    }

    #[test]
    fn test_find_similar_projects() {
        let graph = portfolio_graph();
        for parallel in [false, true] {
            let analyzer = SimilarityAnalyzer::new(parallel);
            let matches = analyzer.find_similar_projects(&graph, &NodeId::project("web"), 0.5);
            assert_eq!(matches.len(), 1);
            assert_eq!(matches[0].project, NodeId::project("admin"));

            let all = analyzer.find_similar_projects(&graph, &NodeId::project("web"), 0.0);
            assert_eq!(all.len(), 3);
            assert!(all.windows(2).all(|w| w[0].score >= w[1].score));
        }

        let analyzer = SimilarityAnalyzer::default();
        assert!(analyzer
            .find_similar_projects(&graph, &NodeId::project("nope"), 0.0)
            .is_empty());
    }

    #[test]
    fn test_find_similar_patterns() {
        let graph = portfolio_graph();
        let analyzer = SimilarityAnalyzer::new(true);

        let matches = analyzer.find_similar_patterns(&graph, &NodeId::pattern("w1"), 0.7);
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].pattern, NodeId::pattern("a1"));

        assert!(analyzer
            .find_similar_patterns(&graph, &NodeId::project("web"), 0.0)
            .is_empty());
        assert!(analyzer
            .find_similar_patterns(&graph, &NodeId::pattern("missing"), 0.0)
            .is_empty());
    }

    #[test]
    fn test_derive_similarity_triples_matches_sequential() {
        let patterns = vec![
            pattern("a", "hook", "auth", &["x", "y"], 3.0),
            pattern("b", "hook", "auth", &["x", "y"], 4.0),
            pattern("c", "util", "net", &[], 9.0),
            pattern("d", "hook", "auth", &["x"], 2.0),
        ];
        let sequential = SimilarityAnalyzer::new(false).derive_similarity_triples(&patterns, 0.7);
        let parallel = SimilarityAnalyzer::new(true).derive_similarity_triples(&patterns, 0.7);
        assert_eq!(sequential, parallel);

        let pairs: Vec<(&str, &str)> = sequential
            .iter()
            .map(|t| (t.source.as_str(), t.target.as_str()))
            .collect();
        assert_eq!(pairs, vec![("a", "b"), ("a", "d"), ("b", "d")]);
    }
}
