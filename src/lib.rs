//! Recipe lookup service.
//!
//! A thin adapter in front of the Spoonacular API: one endpoint returns a
//! random recipe, the other returns the full detail of the best match for a
//! search term. Responses are normalized into [`Recipe`]. The [`client`]
//! module holds the front end's view state machine.

pub mod adapter;
pub mod client;
pub mod config;
pub mod error;
pub mod model;
pub mod providers;
pub mod server;

pub use adapter::RecipeAdapter;
pub use config::ServerConfig;
pub use error::{AdapterError, ClientError, ProviderError, ServerError};
pub use model::{Recipe, RecipeId, DEFAULT_INSTRUCTIONS};
pub use providers::{RecipeProvider, SpoonacularProvider};
pub use server::{router, serve};
