//! Portfolio records supplied by extraction collaborators
//!
//! These are the raw inputs the graph builder ingests. They deserialize from the
//! camelCase JSON the extractors emit.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Declared technology stack of a project
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectStack {
    pub framework: Option<String>,
    pub database: Option<String>,
}

/// A project in the portfolio
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectRecord {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub path: String,
    #[serde(rename = "type")]
    pub project_type: String,
    #[serde(default)]
    pub stack: Option<ProjectStack>,
    #[serde(default)]
    pub status: String,
}

impl ProjectRecord {
    pub fn new(id: impl Into<String>, name: impl Into<String>, project_type: impl Into<String>) -> Self {
        let id = id.into();
        ProjectRecord {
            path: format!("./{}", id),
            id,
            name: name.into(),
            project_type: project_type.into(),
            stack: None,
            status: "active".to_string(),
        }
    }

    pub fn with_framework(mut self, framework: impl Into<String>) -> Self {
        self.stack.get_or_insert_with(ProjectStack::default).framework = Some(framework.into());
        self
    }

    pub fn with_database(mut self, database: impl Into<String>) -> Self {
        self.stack.get_or_insert_with(ProjectStack::default).database = Some(database.into());
        self
    }
}

/// A reusable code pattern extracted from a project
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatternRecord {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub pattern_type: String,
    pub category: String,
    #[serde(default)]
    pub keywords: Vec<String>,
    pub complexity: f64,
    pub quality: f64,
    #[serde(default)]
    pub dependencies: Vec<String>,
    pub project_id: String,
    #[serde(default)]
    pub project_name: String,
    #[serde(default = "Utc::now")]
    pub extracted_at: DateTime<Utc>,
}

impl PatternRecord {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        pattern_type: impl Into<String>,
        category: impl Into<String>,
        project_id: impl Into<String>,
    ) -> Self {
        let project_id = project_id.into();
        PatternRecord {
            id: id.into(),
            name: name.into(),
            pattern_type: pattern_type.into(),
            category: category.into(),
            keywords: Vec::new(),
            complexity: 5.0,
            quality: 7.0,
            dependencies: Vec::new(),
            project_name: project_id.clone(),
            project_id,
            extracted_at: Utc::now(),
        }
    }

    pub fn with_keywords(mut self, keywords: &[&str]) -> Self {
        self.keywords = keywords.iter().map(|k| k.to_string()).collect();
        self
    }

    pub fn with_complexity(mut self, complexity: f64) -> Self {
        self.complexity = complexity;
        self
    }

    pub fn with_quality(mut self, quality: f64) -> Self {
        self.quality = quality;
        self
    }

    pub fn with_dependencies(mut self, dependencies: &[&str]) -> Self {
        self.dependencies = dependencies.iter().map(|d| d.to_string()).collect();
        self
    }
}

/// A shared component published by one project and installed in others
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentRecord {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub component_type: String,
    pub category: String,
    pub quality: f64,
    #[serde(default)]
    pub version: String,
    /// Project record ids the component is installed in
    #[serde(default)]
    pub installations: Vec<String>,
    pub source_project_id: String,
    #[serde(default)]
    pub source_project_name: String,
    #[serde(default = "Utc::now")]
    pub extracted_at: DateTime<Utc>,
}

impl ComponentRecord {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        category: impl Into<String>,
        source_project_id: impl Into<String>,
    ) -> Self {
        let source_project_id = source_project_id.into();
        ComponentRecord {
            id: id.into(),
            name: name.into(),
            component_type: "ui".to_string(),
            category: category.into(),
            quality: 7.0,
            version: "1.0.0".to_string(),
            installations: Vec::new(),
            source_project_name: source_project_id.clone(),
            source_project_id,
            extracted_at: Utc::now(),
        }
    }

    pub fn with_quality(mut self, quality: f64) -> Self {
        self.quality = quality;
        self
    }

    pub fn installed_in(mut self, projects: &[&str]) -> Self {
        self.installations = projects.iter().map(|p| p.to_string()).collect();
        self
    }
}

/// Externally scored similarity between two patterns (pattern record ids)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimilarityTriple {
    pub source: String,
    pub target: String,
    pub similarity: f64,
}

impl SimilarityTriple {
    pub fn new(source: impl Into<String>, target: impl Into<String>, similarity: f64) -> Self {
        SimilarityTriple {
            source: source.into(),
            target: target.into(),
            similarity,
        }
    }
}

/// Everything an orchestration run hands to the engine at once
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioData {
    #[serde(default)]
    pub projects: Vec<ProjectRecord>,
    #[serde(default)]
    pub patterns: Vec<PatternRecord>,
    #[serde(default)]
    pub components: Vec<ComponentRecord>,
    /// Pre-scored pattern similarities; `None` lets the engine derive them
    #[serde(default)]
    pub similarities: Option<Vec<SimilarityTriple>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_extractor_json() {
        let json = r#"{
            "projects": [
                {"id": "web", "name": "Web", "path": "/src/web", "type": "nextjs",
                 "stack": {"framework": "next", "database": "supabase"}, "status": "active"}
            ],
            "patterns": [
                {"id": "p1", "name": "useAuth", "type": "hook", "category": "auth",
                 "keywords": ["auth", "session"], "complexity": 4, "quality": 8,
                 "dependencies": ["supabase"], "projectId": "web", "projectName": "Web",
                 "extractedAt": "2026-01-05T10:00:00Z"}
            ],
            "components": [
                {"id": "c1", "name": "Button", "type": "ui", "category": "forms",
                 "quality": 9, "version": "2.1.0", "installations": ["web"],
                 "sourceProjectId": "web", "sourceProjectName": "Web"}
            ]
        }"#;

        let data: PortfolioData = serde_json::from_str(json).unwrap();
        assert_eq!(data.projects[0].project_type, "nextjs");
        assert_eq!(
            data.projects[0].stack.as_ref().unwrap().database.as_deref(),
            Some("supabase")
        );
        assert_eq!(data.patterns[0].complexity, 4.0);
        assert_eq!(data.patterns[0].project_id, "web");
        assert_eq!(data.components[0].installations, vec!["web".to_string()]);
        assert!(data.similarities.is_none());
    }

    #[test]
    fn test_record_builders() {
        let project = ProjectRecord::new("api", "API", "express")
            .with_framework("express")
            .with_database("postgres");
        let stack = project.stack.unwrap();
        assert_eq!(stack.framework.as_deref(), Some("express"));
        assert_eq!(stack.database.as_deref(), Some("postgres"));

        let pattern = PatternRecord::new("p1", "retry", "util", "network", "api")
            .with_keywords(&["retry", "backoff"])
            .with_quality(9.0);
        assert_eq!(pattern.keywords.len(), 2);
        assert_eq!(pattern.project_name, "api");

        let component = ComponentRecord::new("c1", "Table", "data", "api").installed_in(&["a", "b"]);
        assert_eq!(component.installations.len(), 2);
    }
}
