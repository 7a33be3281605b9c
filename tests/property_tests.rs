use portfolio_graph::{
    pattern_similarity, ComponentRecord, KnowledgeEngine, NodeId, PatternRecord, PortfolioData,
    ProjectRecord,
};
use proptest::prelude::*;

const MAX_PROJECTS: usize = 8;
const MAX_PATTERNS: usize = 16;
const TYPES: &[&str] = &["hook", "util", "component"];
const CATEGORIES: &[&str] = &["auth", "data", "network"];
const KEYWORDS: &[&str] = &["auth", "session", "cache", "retry", "table", "form"];
const TECHNOLOGIES: &[&str] = &["next", "express", "supabase", "postgres"];

fn pattern_strategy() -> impl Strategy<Value = PatternRecord> {
    (
        0..TYPES.len(),
        0..CATEGORIES.len(),
        prop::collection::vec(0..KEYWORDS.len(), 0..5),
        1u8..=10,
        1u8..=10,
    )
        .prop_map(|(ty, category, keywords, complexity, quality)| {
            let keywords: Vec<&str> = keywords.into_iter().map(|k| KEYWORDS[k]).collect();
            PatternRecord::new("x", "x", TYPES[ty], CATEGORIES[category], "p0")
                .with_keywords(&keywords)
                .with_complexity(complexity as f64)
                .with_quality(quality as f64)
        })
}

/// Random portfolios: projects with optional stacks, patterns owned by random
/// projects, and components installed in random subsets.
fn portfolio_strategy() -> impl Strategy<Value = PortfolioData> {
    (1usize..=MAX_PROJECTS).prop_flat_map(|project_count| {
        (
            prop::collection::vec(
                (prop::option::of(0..2usize), prop::option::of(2..4usize), 0..TYPES.len()),
                project_count,
            ),
            prop::collection::vec((pattern_strategy(), 0..project_count), 0..MAX_PATTERNS),
            prop::collection::vec(
                (0..project_count, prop::collection::vec(0..project_count, 0..MAX_PROJECTS)),
                0..4,
            ),
        )
            .prop_map(|(stacks, patterns, components)| {
                let projects = stacks
                    .into_iter()
                    .enumerate()
                    .map(|(i, (framework, database, ty))| {
                        let mut project = ProjectRecord::new(format!("p{}", i), format!("P{}", i), TYPES[ty]);
                        if let Some(f) = framework {
                            project = project.with_framework(TECHNOLOGIES[f]);
                        }
                        if let Some(d) = database {
                            project = project.with_database(TECHNOLOGIES[d]);
                        }
                        project
                    })
                    .collect();

                let patterns = patterns
                    .into_iter()
                    .enumerate()
                    .map(|(i, (mut pattern, owner))| {
                        pattern.id = format!("pt{}", i);
                        pattern.name = format!("pattern{}", i);
                        pattern.project_id = format!("p{}", owner);
                        pattern
                    })
                    .collect();

                let components = components
                    .into_iter()
                    .enumerate()
                    .map(|(i, (source, installs))| {
                        let installs: Vec<String> = installs.iter().map(|p| format!("p{}", p)).collect();
                        let installs: Vec<&str> = installs.iter().map(String::as_str).collect();
                        ComponentRecord::new(format!("c{}", i), format!("C{}", i), "ui", format!("p{}", source))
                            .installed_in(&installs)
                    })
                    .collect();

                PortfolioData {
                    projects,
                    patterns,
                    components,
                    similarities: None,
                }
            })
    })
}

fn engine_for(data: &PortfolioData) -> KnowledgeEngine {
    let mut engine = KnowledgeEngine::default();
    engine.build_graph(data).expect("generated portfolios are well formed");
    engine
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        failure_persistence: None,
        ..ProptestConfig::default()
    })]

    #[test]
    fn pattern_similarity_is_bounded_and_symmetric(a in pattern_strategy(), b in pattern_strategy()) {
        let ab = pattern_similarity(&a, &b);
        let ba = pattern_similarity(&b, &a);
        prop_assert!((0.0..=1.0).contains(&ab));
        prop_assert_eq!(ab, ba);
    }

    #[test]
    fn project_similarity_is_bounded_and_symmetric(data in portfolio_strategy()) {
        let engine = engine_for(&data);
        let projects: Vec<NodeId> = data.projects.iter().map(|p| NodeId::project(&p.id)).collect();

        for a in &projects {
            let matches = engine.find_similar_projects(a, Some(0.0));
            prop_assert_eq!(matches.len(), projects.len() - 1);
            prop_assert!(matches.windows(2).all(|w| w[0].score >= w[1].score));

            for m in &matches {
                prop_assert!((0.0..=1.0).contains(&m.score));
                let reverse = engine.find_similar_projects(&m.project, Some(0.0));
                let back = reverse.iter().find(|r| &r.project == a).map(|r| r.score);
                prop_assert!(back.is_some_and(|s| (s - m.score).abs() < 1e-12));
            }
        }
    }

    #[test]
    fn found_paths_follow_edges(data in portfolio_strategy()) {
        let engine = engine_for(&data);
        let graph = engine.graph();
        let ids: Vec<NodeId> = graph.nodes().map(|n| n.id.clone()).collect();

        for start in ids.iter().take(4) {
            for end in &ids {
                if let Some(path) = engine.find_path(start, end) {
                    prop_assert_eq!(path.first(), Some(start));
                    prop_assert_eq!(path.last(), Some(end));
                    for step in path.windows(2) {
                        prop_assert!(graph.adjacent(&step[0]).contains(&step[1]));
                    }
                }
            }
        }
    }

    #[test]
    fn hubs_are_bounded_and_ordered(data in portfolio_strategy(), limit in 0usize..12) {
        let engine = engine_for(&data);
        let hubs = engine.find_hubs(None, Some(limit));

        prop_assert!(hubs.len() <= limit);
        prop_assert_eq!(hubs.len(), limit.min(engine.graph().node_count()));
        prop_assert!(hubs.windows(2).all(|w| w[0].out_degree >= w[1].out_degree));
        for hub in &hubs {
            prop_assert_eq!(hub.out_degree, engine.graph().out_degree(&hub.node.id));
        }
    }

    #[test]
    fn insights_are_ranked(data in portfolio_strategy()) {
        let engine = engine_for(&data);
        let insights = engine.generate_insights();

        for pair in insights.windows(2) {
            let (a, b) = (&pair[0], &pair[1]);
            prop_assert!(a.impact.rank() >= b.impact.rank());
            if a.impact == b.impact {
                prop_assert!(a.confidence >= b.confidence);
            }
        }
        for insight in &insights {
            prop_assert!((0.0..=1.0).contains(&insight.confidence));
        }
    }

    #[test]
    fn statistics_are_consistent(data in portfolio_strategy()) {
        let engine = engine_for(&data);
        let stats = engine.statistics();

        prop_assert_eq!(stats.nodes_by_type.values().sum::<usize>(), stats.total_nodes);
        prop_assert_eq!(stats.edges_by_type.values().sum::<usize>(), stats.total_edges);
        prop_assert_eq!(
            stats.avg_connections,
            stats.total_edges as f64 / stats.total_nodes as f64
        );
    }
}
