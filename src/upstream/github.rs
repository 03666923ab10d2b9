use async_trait::async_trait;
use tracing::{info, instrument};

use super::{RepositorySource, get_json};
use crate::config::DashboardConfig;
use crate::error::UpstreamError;
use crate::models::Repository;
use crate::models::repository::SearchResponse;

const SERVICE: &str = "GitHub";

/// GitHub repository search client; results come back ranked by stars
pub struct GitHubClient {
    client: reqwest::Client,
    base_url: String,
    token: Option<String>,
    created_since: String,
    per_page: u32,
}

impl GitHubClient {
    pub fn new(client: reqwest::Client, config: &DashboardConfig) -> Self {
        Self {
            client,
            base_url: config.upstream.github_base_url.trim_end_matches('/').to_string(),
            token: config.upstream.github_token.clone(),
            created_since: config.upstream.github_created_since.clone(),
            per_page: config.limits.github_per_page,
        }
    }

    fn search_url(&self) -> String {
        let query = format!("created:>{}", self.created_since);
        format!(
            "{}/search/repositories?q={}&sort=stars&order=desc&per_page={}",
            self.base_url,
            urlencoding::encode(&query),
            self.per_page
        )
    }
}

#[async_trait]
impl RepositorySource for GitHubClient {
    #[instrument(skip(self))]
    async fn search_repositories(&self) -> Result<Vec<Repository>, UpstreamError> {
        let mut request = self
            .client
            .get(self.search_url())
            .header("Accept", "application/vnd.github+json");
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response: SearchResponse = get_json(SERVICE, request).await?;
        let items = response
            .items
            .ok_or_else(|| UpstreamError::malformed(SERVICE, "search response has no items"))?;

        info!("Fetched {} repositories from {}", items.len(), SERVICE);
        Ok(items)
    }
}
