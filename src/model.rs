use serde::{Deserialize, Serialize};
use std::fmt;

use crate::providers::{RawIngredient, RawRecipe};

/// Placeholder used when the provider has no instructions for a recipe.
pub const DEFAULT_INSTRUCTIONS: &str = "No instructions available.";

/// Upstream recipe identifier. Spoonacular uses integers, but nothing in the
/// contract forbids string ids.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecipeId {
    Number(i64),
    Text(String),
}

impl fmt::Display for RecipeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecipeId::Number(n) => write!(f, "{}", n),
            RecipeId::Text(s) => f.write_str(s),
        }
    }
}

/// Normalized recipe returned to clients.
///
/// Field names on the wire are the ones the web front end reads
/// (`nombre`, `imagen`, `instrucciones`, `ingredientes`). Every field is
/// always serialized; a missing image is sent as `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    pub id: RecipeId,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "imagen", default)]
    pub image: Option<String>,
    #[serde(rename = "instrucciones")]
    pub instructions: String,
    #[serde(rename = "ingredientes", default)]
    pub ingredients: Vec<String>,
}

/// JSON body of every failed API call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub message: String,
}

impl From<&RawRecipe> for Recipe {
    fn from(raw: &RawRecipe) -> Self {
        Recipe {
            id: raw.id.clone(),
            name: raw.title.clone(),
            image: raw.image.clone(),
            instructions: raw
                .instructions
                .as_deref()
                .filter(|text| !text.is_empty())
                .unwrap_or(DEFAULT_INSTRUCTIONS)
                .to_string(),
            ingredients: raw
                .extended_ingredients
                .as_deref()
                .unwrap_or_default()
                .iter()
                .map(ingredient_phrase)
                .collect(),
        }
    }
}

impl From<RawRecipe> for Recipe {
    fn from(raw: RawRecipe) -> Self {
        Recipe::from(&raw)
    }
}

/// Prefer the full original phrasing ("2 large eggs") over the bare name.
fn ingredient_phrase(ingredient: &RawIngredient) -> String {
    ingredient
        .original
        .as_deref()
        .filter(|original| !original.is_empty())
        .or(ingredient.name.as_deref())
        .unwrap_or_default()
        .to_string()
}
