use log::{error, info};
use std::sync::Arc;

use crate::error::{AdapterError, Operation, ProviderError};
use crate::model::Recipe;
use crate::providers::RecipeProvider;

/// Translates the two client requests into upstream calls and normalizes
/// whatever comes back.
#[derive(Clone)]
pub struct RecipeAdapter {
    provider: Arc<dyn RecipeProvider>,
}

impl RecipeAdapter {
    pub fn new(provider: Arc<dyn RecipeProvider>) -> Self {
        Self { provider }
    }

    /// One random recipe.
    ///
    /// # Errors
    /// - `MissingApiKey` before any upstream call when no credential is set
    /// - `NoRandomRecipe` when the provider returns an empty list
    /// - `RateLimited` or `Upstream` when the provider call fails
    pub async fn get_random_recipe(&self) -> Result<Recipe, AdapterError> {
        info!(
            "Random recipe request received via {}",
            self.provider.provider_name()
        );
        self.ensure_configured()?;

        let recipes = self
            .provider
            .random_recipes(1)
            .await
            .map_err(|e| upstream_failure(Operation::Random, e))?;

        match recipes.first() {
            Some(raw) => Ok(Recipe::from(raw)),
            None => Err(AdapterError::NoRandomRecipe),
        }
    }

    /// Full detail of the best match for `query`.
    ///
    /// Two sequential upstream calls: a search limited to one hit, then the
    /// information lookup for that hit.
    pub async fn search_recipe(&self, query: &str) -> Result<Recipe, AdapterError> {
        info!(
            "Search request received for query: \"{}\" via {}",
            query,
            self.provider.provider_name()
        );
        self.ensure_configured()?;

        let query = query.trim();
        if query.is_empty() {
            return Err(AdapterError::MissingQuery);
        }

        let hits = self
            .provider
            .search(query, 1)
            .await
            .map_err(|e| upstream_failure(Operation::Search, e))?;

        let Some(hit) = hits.first() else {
            info!("No results found for query: \"{}\"", query);
            return Err(AdapterError::NoSearchResults);
        };
        info!("Recipe found for query \"{}\" (ID): {}", query, hit.id);

        let detail = self
            .provider
            .information(&hit.id)
            .await
            .map_err(|e| upstream_failure(Operation::Search, e))?;

        info!("Cleaned recipe prepared for ID {}", detail.id);
        Ok(Recipe::from(&detail))
    }

    fn ensure_configured(&self) -> Result<(), AdapterError> {
        if self.provider.is_configured() {
            Ok(())
        } else {
            error!("Spoonacular API key is not configured");
            Err(AdapterError::MissingApiKey)
        }
    }
}

fn upstream_failure(operation: Operation, source: ProviderError) -> AdapterError {
    error!("Error calling upstream during {:?}: {}", operation, source);
    AdapterError::from_upstream(operation, source)
}
