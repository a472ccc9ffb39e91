use serde::Deserialize;

use crate::model::RecipeId;

/// Recipe object as returned by the upstream `random` and `information` endpoints.
///
/// Only the fields the normalizer reads are modelled; everything else the
/// provider sends is ignored.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RawRecipe {
    pub id: RecipeId,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub instructions: Option<String>,
    #[serde(default)]
    pub extended_ingredients: Option<Vec<RawIngredient>>,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct RawIngredient {
    #[serde(default)]
    pub original: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

/// Lightweight hit returned by `complexSearch`.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct SearchHit {
    pub id: RecipeId,
    #[serde(default)]
    pub title: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RandomResponse {
    #[serde(default)]
    pub recipes: Vec<RawRecipe>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SearchResponse {
    #[serde(default)]
    pub results: Vec<SearchHit>,
}

/// Failure body, e.g. `{"status":"failure","code":402,"message":"..."}`.
#[derive(Debug, Deserialize)]
pub(crate) struct FailureBody {
    pub message: Option<String>,
}
