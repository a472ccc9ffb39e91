mod spoonacular;
mod types;

pub use spoonacular::SpoonacularProvider;
pub use types::{RawIngredient, RawRecipe, SearchHit};

use async_trait::async_trait;

use crate::error::ProviderError;
use crate::model::RecipeId;

/// Upstream recipe data source
#[async_trait]
pub trait RecipeProvider: Send + Sync {
    /// Get the provider name (e.g., "spoonacular")
    fn provider_name(&self) -> &str;

    /// Whether a credential is available. Nothing is sent upstream when false.
    fn is_configured(&self) -> bool;

    /// Fetch up to `number` random recipes
    async fn random_recipes(&self, number: u32) -> Result<Vec<RawRecipe>, ProviderError>;

    /// Text search returning up to `number` lightweight hits
    async fn search(&self, query: &str, number: u32) -> Result<Vec<SearchHit>, ProviderError>;

    /// Full detail for one recipe
    async fn information(&self, id: &RecipeId) -> Result<RawRecipe, ProviderError>;
}
