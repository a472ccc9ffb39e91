use async_trait::async_trait;
use log::{debug, error};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;

use super::types::{FailureBody, RandomResponse, RawRecipe, SearchHit, SearchResponse};
use super::RecipeProvider;
use crate::config::ServerConfig;
use crate::error::ProviderError;
use crate::model::RecipeId;

pub struct SpoonacularProvider {
    client: Client,
    api_key: Option<String>,
    base_url: String,
}

impl SpoonacularProvider {
    /// Create a new Spoonacular provider from configuration
    pub fn new(config: &ServerConfig) -> Result<Self, ProviderError> {
        let client = Client::builder().timeout(config.timeout()).build()?;

        Ok(SpoonacularProvider {
            client,
            api_key: config.api_key().map(str::to_string),
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    #[doc(hidden)]
    pub fn with_base_url(api_key: Option<String>, base_url: String) -> Self {
        SpoonacularProvider {
            client: Client::builder()
                .timeout(Duration::from_secs(30))
                .build()
                .unwrap_or_default(),
            api_key,
            base_url,
        }
    }

    /// GET `path` with `params` plus the credential, decoding a JSON body
    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<T, ProviderError> {
        let url = format!("{}{}", self.base_url, path);
        // Logged without the credential
        debug!("GET {} {:?}", url, params);

        let response = self
            .client
            .get(&url)
            .query(params)
            .query(&[("apiKey", self.api_key.as_deref().unwrap_or_default())])
            .send()
            .await?;

        let body = check_status(response).await?;
        Ok(serde_json::from_str(&body)?)
    }
}

/// Read the body, turning non-success statuses into `ProviderError::Status`
async fn check_status(response: Response) -> Result<String, ProviderError> {
    let status = response.status();
    let body = response.text().await?;

    if status.is_success() {
        return Ok(body);
    }

    error!("Spoonacular responded with status {}", status.as_u16());
    error!("Spoonacular error body: {}", body);

    let message = serde_json::from_str::<FailureBody>(&body)
        .ok()
        .and_then(|failure| failure.message);

    Err(ProviderError::Status {
        status: status.as_u16(),
        message,
        body,
    })
}

#[async_trait]
impl RecipeProvider for SpoonacularProvider {
    fn provider_name(&self) -> &str {
        "spoonacular"
    }

    fn is_configured(&self) -> bool {
        self.api_key.as_deref().is_some_and(|key| !key.is_empty())
    }

    async fn random_recipes(&self, number: u32) -> Result<Vec<RawRecipe>, ProviderError> {
        let response: RandomResponse = self
            .get_json("/recipes/random", &[("number", number.to_string())])
            .await?;
        Ok(response.recipes)
    }

    async fn search(&self, query: &str, number: u32) -> Result<Vec<SearchHit>, ProviderError> {
        let response: SearchResponse = self
            .get_json(
                "/recipes/complexSearch",
                &[("query", query.to_string()), ("number", number.to_string())],
            )
            .await?;
        Ok(response.results)
    }

    async fn information(&self, id: &RecipeId) -> Result<RawRecipe, ProviderError> {
        // Text ids come from upstream data; keep them inside one segment
        let segment = urlencoding::encode(&id.to_string()).into_owned();
        self.get_json(&format!("/recipes/{}/information", segment), &[])
            .await
    }
}
