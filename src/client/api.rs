use log::{debug, error};
use reqwest::Client;

use crate::error::ClientError;
use crate::model::{ErrorBody, Recipe};

/// What the user asked for on the options screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecipeRequest {
    Random,
    Search(String),
}

impl RecipeRequest {
    pub fn kind(&self) -> &'static str {
        match self {
            RecipeRequest::Random => "random",
            RecipeRequest::Search(_) => "search",
        }
    }
}

/// HTTP client for the recipe adapter
pub struct RecipeApi {
    client: Client,
    base_url: String,
}

impl RecipeApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Fetch one recipe.
    ///
    /// On failure the error carries the adapter's `message` when the body has
    /// one, otherwise a generic fetch-failure message.
    pub async fn fetch(&self, request: &RecipeRequest) -> Result<Recipe, ClientError> {
        let builder = match request {
            RecipeRequest::Search(term) if !term.is_empty() => self
                .client
                .get(format!("{}/api/recetas/search", self.base_url))
                .query(&[("query", term.as_str())]),
            _ => self.client.get(format!("{}/api/recetas", self.base_url)),
        };

        let response = builder.send().await.map_err(|e| {
            error!("Error fetching recipe: {}", e);
            generic_failure(request, None)
        })?;

        let status = response.status();
        debug!("Adapter answered {} for {} request", status, request.kind());

        if !status.is_success() {
            let message = response
                .json::<ErrorBody>()
                .await
                .ok()
                .map(|body| body.message)
                .filter(|message| !message.is_empty());

            return Err(match message {
                Some(message) => ClientError {
                    status: Some(status.as_u16()),
                    message,
                },
                None => generic_failure(request, Some(status.as_u16())),
            });
        }

        response.json::<Recipe>().await.map_err(|e| {
            error!("Error decoding recipe: {}", e);
            generic_failure(request, Some(status.as_u16()))
        })
    }
}

fn generic_failure(request: &RecipeRequest, status: Option<u16>) -> ClientError {
    ClientError {
        status,
        message: format!("Failed to fetch {} recipe from server.", request.kind()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::RecipeId;
    use mockito::{Matcher, Server};

    const RECIPE_JSON: &str = r#"{
        "id": 7,
        "nombre": "Pancakes",
        "imagen": null,
        "instrucciones": "Whisk and fry.",
        "ingredientes": ["1 cup flour", "1 egg"]
    }"#;

    #[tokio::test]
    async fn test_fetch_random() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/api/recetas")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(RECIPE_JSON)
            .create_async()
            .await;

        let recipe = RecipeApi::new(server.url())
            .fetch(&RecipeRequest::Random)
            .await
            .unwrap();

        assert_eq!(recipe.id, RecipeId::Number(7));
        assert_eq!(recipe.name, "Pancakes");
        assert!(recipe.image.is_none());
        assert_eq!(recipe.ingredients.len(), 2);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_fetch_search_encodes_term() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/api/recetas/search")
            .match_query(Matcher::UrlEncoded("query".into(), "chili con carne".into()))
            .with_status(200)
            .with_body(RECIPE_JSON)
            .create_async()
            .await;

        let result = RecipeApi::new(server.url())
            .fetch(&RecipeRequest::Search("chili con carne".to_string()))
            .await;

        assert!(result.is_ok());
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_error_message_comes_from_body() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/api/recetas/search")
            .match_query(Matcher::Any)
            .with_status(404)
            .with_body(r#"{"message": "No recipes found for your search."}"#)
            .create_async()
            .await;

        let error = RecipeApi::new(server.url())
            .fetch(&RecipeRequest::Search("zzz".to_string()))
            .await
            .unwrap_err();

        assert_eq!(error.status, Some(404));
        assert_eq!(error.message, "No recipes found for your search.");
    }

    #[tokio::test]
    async fn test_error_without_message_is_generic() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/api/recetas")
            .with_status(502)
            .with_body("Bad Gateway")
            .create_async()
            .await;

        let error = RecipeApi::new(server.url())
            .fetch(&RecipeRequest::Random)
            .await
            .unwrap_err();

        assert_eq!(error.status, Some(502));
        assert_eq!(error.message, "Failed to fetch random recipe from server.");
    }

    #[tokio::test]
    async fn test_unreachable_server_is_generic() {
        // Nothing listens on port 9 of the loopback interface
        let error = RecipeApi::new("http://127.0.0.1:9")
            .fetch(&RecipeRequest::Search("soup".to_string()))
            .await
            .unwrap_err();

        assert_eq!(error.status, None);
        assert_eq!(error.message, "Failed to fetch search recipe from server.");
    }
}
