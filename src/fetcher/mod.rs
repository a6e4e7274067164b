//! Recipe fetching functionality.
//!
//! This module talks to the remote recipe API. It issues exactly one request
//! per call: there is no retry, no caching and no pagination. Everything else
//! in the crate works on the collection these functions return.

use crate::config::ClientConfig;
use crate::model::Recipe;
use regex::Regex;
use reqwest::Client;
use std::sync::OnceLock;
use thiserror::Error;
use tracing::{debug, warn};
use url::Url;

/// Errors that can occur when fetching recipes.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Failed to reach recipe API: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Recipe API responded with status {status} for {url}")]
    Status { status: u16, url: String },

    #[error("Recipe not found: {slug}")]
    NotFound { slug: String },

    #[error("Failed to decode recipe payload: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Invalid recipe slug: {0:?}")]
    InvalidSlug(String),

    #[error("Invalid request URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl FetchError {
    /// Returns true when the API reported that the recipe does not exist.
    ///
    /// Callers render a "not found" page for these and a generic error state
    /// for everything else.
    pub fn is_not_found(&self) -> bool {
        matches!(self, FetchError::NotFound { .. })
    }
}

/// HTTP client for the recipe API.
///
/// # Examples
///
/// ```no_run
/// use gastronogeek::{ClientConfig, RecipeClient};
///
/// # async fn run() -> Result<(), Box<dyn std::error::Error>> {
/// let client = RecipeClient::new(ClientConfig::from_env()?)?;
/// let recipes = client.fetch_all_recipes().await?;
/// let tatin = client.fetch_recipe_by_slug("tarte-tatin").await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct RecipeClient {
    config: ClientConfig,
    client: Client,
}

impl RecipeClient {
    pub fn new(config: ClientConfig) -> Result<Self, FetchError> {
        let mut builder = Client::builder().user_agent(config.user_agent.as_str());
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            config,
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Fetches the full recipe collection (`GET recipes/`).
    ///
    /// The order returned by the API is kept as-is.
    pub async fn fetch_all_recipes(&self) -> Result<Vec<Recipe>, FetchError> {
        let url = self.config.base_url.join("recipes/")?;
        let body = self.get_text(&url).await?;
        let recipes: Vec<Recipe> = serde_json::from_str(&body)?;

        debug!(count = recipes.len(), "fetched recipe collection");
        Ok(recipes)
    }

    /// Fetches one recipe by slug (`GET recipes/{slug}`).
    ///
    /// A 404 from the API is reported as [`FetchError::NotFound`]. Slugs that
    /// are not URL-safe are rejected without issuing a request.
    pub async fn fetch_recipe_by_slug(&self, slug: &str) -> Result<Recipe, FetchError> {
        if !is_valid_slug(slug) {
            return Err(FetchError::InvalidSlug(slug.to_string()));
        }

        let url = self.config.base_url.join(&format!("recipes/{slug}"))?;
        let body = match self.get_text(&url).await {
            Ok(body) => body,
            Err(FetchError::Status { status: 404, .. }) => {
                return Err(FetchError::NotFound {
                    slug: slug.to_string(),
                })
            }
            Err(e) => return Err(e),
        };

        Ok(serde_json::from_str(&body)?)
    }

    async fn get_text(&self, url: &Url) -> Result<String, FetchError> {
        debug!(%url, "requesting recipe API");
        let response = self.client.get(url.clone()).send().await?;

        let status = response.status();
        if !status.is_success() {
            warn!(%url, status = status.as_u16(), "recipe API request failed");
            return Err(FetchError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        Ok(response.text().await?)
    }
}

fn is_valid_slug(slug: &str) -> bool {
    static SLUG: OnceLock<Regex> = OnceLock::new();
    SLUG.get_or_init(|| Regex::new(r"^[A-Za-z0-9][A-Za-z0-9_-]*$").expect("slug pattern is valid"))
        .is_match(slug)
}
