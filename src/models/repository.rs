//! Repository data model

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;

/// One item from the GitHub repository search
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Repository {
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub stargazers_count: u64,
    #[serde(default)]
    pub forks_count: u64,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Repository {
    #[must_use]
    pub fn new(full_name: &str, stars: u64, forks: u64, language: Option<&str>) -> Self {
        Self {
            full_name: full_name.to_string(),
            stargazers_count: stars,
            forks_count: forks,
            language: language.map(str::to_string),
            extra: Map::new(),
        }
    }
}

/// GitHub `/search/repositories` envelope
#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    pub items: Option<Vec<Repository>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RepositorySummary {
    pub total_repos: usize,
    pub total_stars: u64,
    pub total_forks: u64,
    pub average_stars: u64,
    pub top_languages: HashMap<String, usize>,
    pub top_repos: Vec<Repository>,
    pub display: RepositoryDisplay,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RepositoryDisplay {
    pub total_stars: String,
    pub total_forks: String,
    pub average_stars: String,
}
