use thiserror::Error;

pub const MISSING_API_KEY_MESSAGE: &str = "Spoonacular API Key not configured on the server.";
pub const MISSING_QUERY_MESSAGE: &str = "A 'query' parameter is required for the search.";
pub const NO_RANDOM_RECIPE_MESSAGE: &str = "No random recipe found.";
pub const NO_SEARCH_RESULTS_MESSAGE: &str = "No recipes found for your search.";
pub const RATE_LIMITED_MESSAGE: &str =
    "Spoonacular API daily request limit reached. Try again tomorrow.";
pub const RANDOM_FAILURE_MESSAGE: &str =
    "Internal server error processing random recipe request.";
pub const SEARCH_FAILURE_MESSAGE: &str =
    "Internal server error getting search results from Spoonacular.";

/// Errors raised while talking to the upstream recipe provider
#[derive(Error, Debug)]
pub enum ProviderError {
    /// The provider answered with a non-success status
    #[error("Upstream returned status {status}: {body}")]
    Status {
        status: u16,
        /// `message` field of the failure body, when the provider sent one
        message: Option<String>,
        body: String,
    },

    /// The request never produced a response
    #[error("Failed to reach upstream: {0}")]
    Transport(#[from] reqwest::Error),

    /// The response body did not match the expected shape
    #[error("Malformed upstream response: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Which adapter operation an upstream failure happened in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Random,
    Search,
}

/// Failures of the recipe adapter, one variant per outcome the HTTP
/// surface distinguishes
#[derive(Error, Debug)]
pub enum AdapterError {
    /// No provider credential was configured
    #[error("{}", MISSING_API_KEY_MESSAGE)]
    MissingApiKey,

    /// Search was called without a usable query
    #[error("{}", MISSING_QUERY_MESSAGE)]
    MissingQuery,

    /// The random endpoint answered with an empty list
    #[error("{}", NO_RANDOM_RECIPE_MESSAGE)]
    NoRandomRecipe,

    /// The search endpoint answered with zero results
    #[error("{}", NO_SEARCH_RESULTS_MESSAGE)]
    NoSearchResults,

    /// Upstream daily quota is exhausted
    #[error("{}", RATE_LIMITED_MESSAGE)]
    RateLimited,

    /// Upstream reported not-found with its own message
    #[error("{0}")]
    UpstreamNotFound(String),

    /// Any other upstream, network or decoding failure
    #[error("Upstream failure during {operation:?}: {source}")]
    Upstream {
        operation: Operation,
        #[source]
        source: ProviderError,
    },
}

impl AdapterError {
    /// HTTP status code for this failure
    pub fn status_code(&self) -> u16 {
        match self {
            AdapterError::MissingApiKey => 500,
            AdapterError::MissingQuery => 400,
            AdapterError::NoRandomRecipe
            | AdapterError::NoSearchResults
            | AdapterError::UpstreamNotFound(_) => 404,
            AdapterError::RateLimited => 402,
            AdapterError::Upstream { .. } => 500,
        }
    }

    /// Message safe to hand to the client. Upstream details never leak here.
    pub fn user_message(&self) -> String {
        match self {
            AdapterError::Upstream {
                operation: Operation::Random,
                ..
            } => RANDOM_FAILURE_MESSAGE.to_string(),
            AdapterError::Upstream {
                operation: Operation::Search,
                ..
            } => SEARCH_FAILURE_MESSAGE.to_string(),
            other => other.to_string(),
        }
    }

    /// Classify an upstream failure.
    ///
    /// 402 is the provider's quota signal on either path. A 404 that carries
    /// a message is passed through on search only. Everything else is a
    /// generic failure of `operation`.
    pub fn from_upstream(operation: Operation, source: ProviderError) -> Self {
        match source {
            ProviderError::Status { status: 402, .. } => AdapterError::RateLimited,
            ProviderError::Status {
                status: 404,
                message: Some(message),
                ..
            } if matches!(operation, Operation::Search) && !message.is_empty() => {
                AdapterError::UpstreamNotFound(message)
            }
            source => AdapterError::Upstream { operation, source },
        }
    }
}

/// Errors that stop the HTTP server itself
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Failed to build upstream client: {0}")]
    Provider(#[from] ProviderError),

    #[error("Server I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Failure seen by the recipe client when calling the adapter.
///
/// Only the message is ever shown to the user.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct ClientError {
    /// HTTP status of the adapter response, if one arrived
    pub status: Option<u16>,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status(status: u16, message: Option<&str>) -> ProviderError {
        ProviderError::Status {
            status,
            message: message.map(str::to_string),
            body: "{}".to_string(),
        }
    }

    #[test]
    fn test_quota_status_maps_to_rate_limited() {
        for operation in [Operation::Random, Operation::Search] {
            let error = AdapterError::from_upstream(operation, status(402, Some("quota")));
            assert!(matches!(error, AdapterError::RateLimited));
            assert_eq!(error.status_code(), 402);
            assert_eq!(error.user_message(), RATE_LIMITED_MESSAGE);
        }
    }

    #[test]
    fn test_not_found_with_message_is_passed_through() {
        let error = AdapterError::from_upstream(
            Operation::Search,
            status(404, Some("A recipe with the id 1 does not exist.")),
        );
        assert_eq!(error.status_code(), 404);
        assert_eq!(error.user_message(), "A recipe with the id 1 does not exist.");
    }

    #[test]
    fn test_not_found_on_random_is_generic() {
        let error = AdapterError::from_upstream(
            Operation::Random,
            status(404, Some("upstream internal detail")),
        );
        assert!(matches!(error, AdapterError::Upstream { .. }));
        assert_eq!(error.status_code(), 500);
        assert_eq!(error.user_message(), RANDOM_FAILURE_MESSAGE);
    }

    #[test]
    fn test_not_found_without_message_is_generic() {
        let error = AdapterError::from_upstream(Operation::Search, status(404, None));
        assert_eq!(error.status_code(), 500);
        assert_eq!(error.user_message(), SEARCH_FAILURE_MESSAGE);
    }

    #[test]
    fn test_generic_failure_hides_upstream_details() {
        let error = AdapterError::from_upstream(
            Operation::Random,
            ProviderError::Status {
                status: 401,
                message: Some("You are not authorized.".to_string()),
                body: "secret details".to_string(),
            },
        );
        assert_eq!(error.status_code(), 500);
        assert_eq!(error.user_message(), RANDOM_FAILURE_MESSAGE);
        assert!(error.to_string().contains("secret details"));
    }

    #[test]
    fn test_fixed_client_errors() {
        assert_eq!(AdapterError::MissingApiKey.status_code(), 500);
        assert_eq!(
            AdapterError::MissingApiKey.user_message(),
            MISSING_API_KEY_MESSAGE
        );
        assert_eq!(AdapterError::MissingQuery.status_code(), 400);
        assert_eq!(AdapterError::NoSearchResults.status_code(), 404);
        assert_eq!(
            AdapterError::NoSearchResults.user_message(),
            NO_SEARCH_RESULTS_MESSAGE
        );
    }
}
