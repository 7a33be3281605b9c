use anyhow::Context;
use portfolio_graph::{
    ComponentRecord, EngineConfig, KnowledgeEngine, NodeId, NodeKind, PatternRecord,
    PortfolioData, ProjectRecord,
};
use std::path::Path;

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    println!("Portfolio Knowledge Graph v{}", portfolio_graph::version());
    println!("==========================================");
    println!();

    let mut args = std::env::args().skip(1);
    let data = match args.next() {
        Some(path) => load_portfolio(Path::new(&path))?,
        None => sample_portfolio(),
    };
    let config = match args.next() {
        Some(path) => EngineConfig::from_file(&path)
            .with_context(|| format!("loading engine config from {}", path))?,
        None => EngineConfig::default(),
    };

    let mut engine = KnowledgeEngine::new(config);
    engine.build_graph(&data).context("building knowledge graph")?;

    print_statistics(&engine);
    print_insights(&engine);
    if let Some(first) = data.projects.first() {
        print_recommendations(&engine, &NodeId::project(&first.id));
    }

    Ok(())
}

fn load_portfolio(path: &Path) -> anyhow::Result<PortfolioData> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("reading portfolio {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("parsing portfolio {}", path.display()))
}

fn print_statistics(engine: &KnowledgeEngine) {
    println!("=== Graph ===");
    let stats = engine.statistics();
    println!("Nodes: {}  Edges: {}", stats.total_nodes, stats.total_edges);
    for (kind, count) in &stats.nodes_by_type {
        println!("  {:<12} {}", kind, count);
    }
    println!("Average connections: {:.2}", stats.avg_connections);

    println!("\nTop hubs:");
    for hub in engine.find_hubs(None, Some(5)) {
        println!("  {} ({}) -> {} edges", hub.node.name, hub.node.kind(), hub.out_degree);
    }

    println!("\nTechnology adoption:");
    for entry in engine.find_technology_adoption() {
        println!(
            "  {:<12} {:>5.1}% ({} projects)",
            entry.technology.name,
            entry.adoption_rate * 100.0,
            entry.projects.len()
        );
    }

    let clusters = engine.find_clusters(NodeKind::Pattern);
    println!("\nPattern clusters: {}", clusters.len());
    for cluster in clusters {
        let names: Vec<&str> = cluster.iter().map(|n| n.name.as_str()).collect();
        println!("  [{}]", names.join(", "));
    }
    println!();
}

fn print_insights(engine: &KnowledgeEngine) {
    println!("=== Insights ===");
    let insights = engine.generate_insights();
    if insights.is_empty() {
        println!("No insights.");
    }
    for insight in insights {
        println!(
            "[{}] {} (confidence {:.2})",
            insight.impact, insight.title, insight.confidence
        );
        println!("    {}", insight.description);
        for suggestion in &insight.suggestions {
            println!("    - {}", suggestion);
        }
    }
    println!();
}

fn print_recommendations(engine: &KnowledgeEngine, project: &NodeId) {
    let name = engine
        .node(project)
        .map(|n| n.name.clone())
        .unwrap_or_else(|| project.to_string());
    println!("=== Recommendations for {} ===", name);

    for similar in engine.find_similar_projects(project, None) {
        println!("Similar: {} ({:.2})", similar.name, similar.score);
        for reason in &similar.reasons {
            println!("    {}", reason);
        }
    }

    let recommendations = engine.generate_recommendations(project);
    if recommendations.is_empty() {
        println!("No recommendations.");
    }
    for rec in recommendations {
        println!(
            "[{}] {:?} {}: {} ({})",
            rec.priority, rec.item_kind, rec.item_name, rec.reason, rec.benefit
        );
    }
}

fn sample_portfolio() -> PortfolioData {
    let projects = vec![
        ProjectRecord::new("storefront", "Storefront", "nextjs")
            .with_framework("next")
            .with_database("supabase"),
        ProjectRecord::new("admin", "Admin Console", "nextjs")
            .with_framework("next")
            .with_database("supabase"),
        ProjectRecord::new("blog", "Blog", "nextjs")
            .with_framework("next")
            .with_database("supabase"),
        ProjectRecord::new("api", "Public API", "express")
            .with_framework("express")
            .with_database("supabase"),
        ProjectRecord::new("mobile", "Mobile App", "expo").with_database("supabase"),
    ];

    let patterns = vec![
        PatternRecord::new("sf-auth", "useAuth", "hook", "auth", "storefront")
            .with_keywords(&["auth", "session", "supabase"])
            .with_complexity(4.0)
            .with_quality(8.5)
            .with_dependencies(&["supabase"]),
        PatternRecord::new("ad-auth", "useSession", "hook", "auth", "admin")
            .with_keywords(&["auth", "session"])
            .with_complexity(5.0)
            .with_quality(6.0)
            .with_dependencies(&["supabase"]),
        PatternRecord::new("bl-auth", "useUser", "hook", "auth", "blog")
            .with_keywords(&["auth", "user"])
            .with_complexity(3.0)
            .with_quality(7.5),
        PatternRecord::new("ad-table", "DataTable", "component", "data", "admin")
            .with_keywords(&["table", "pagination"])
            .with_complexity(7.0)
            .with_quality(9.0),
        PatternRecord::new("api-retry", "withRetry", "util", "network", "api")
            .with_keywords(&["retry", "backoff"])
            .with_complexity(3.0)
            .with_quality(8.0),
    ];

    let components = vec![
        ComponentRecord::new("button", "Button", "forms", "storefront")
            .with_quality(9.0)
            .installed_in(&["admin", "blog", "mobile", "api"]),
        ComponentRecord::new("modal", "Modal", "overlay", "admin")
            .with_quality(6.5)
            .installed_in(&["storefront", "blog", "mobile"]),
    ];

    PortfolioData {
        projects,
        patterns,
        components,
        similarities: None,
    }
}
