use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use log::{info, warn};
use serde::Deserialize;
use std::path::Path;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::{
    cors::CorsLayer,
    services::{ServeDir, ServeFile},
};

use crate::adapter::RecipeAdapter;
use crate::config::ServerConfig;
use crate::error::{AdapterError, ServerError};
use crate::model::{ErrorBody, Recipe};
use crate::providers::SpoonacularProvider;

pub struct AppState {
    pub adapter: RecipeAdapter,
}

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    query: Option<String>,
}

impl IntoResponse for AdapterError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        let body = ErrorBody {
            message: self.user_message(),
        };
        (status, Json(body)).into_response()
    }
}

async fn random_handler(State(state): State<Arc<AppState>>) -> Result<Json<Recipe>, AdapterError> {
    state.adapter.get_random_recipe().await.map(Json)
}

async fn search_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Recipe>, AdapterError> {
    let query = params.query.unwrap_or_default();
    state.adapter.search_recipe(&query).await.map(Json)
}

/// API routes plus the bundled web client for every other path.
///
/// Paths that do not name a file under `static_dir` get its `index.html`,
/// so client-side navigation survives a reload.
pub fn router(adapter: RecipeAdapter, static_dir: &Path) -> Router {
    let state = Arc::new(AppState { adapter });
    let client =
        ServeDir::new(static_dir).fallback(ServeFile::new(static_dir.join("index.html")));

    Router::new()
        .route("/api/recetas", get(random_handler))
        .route("/api/recetas/search", get(search_handler))
        .fallback_service(client)
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Build the adapter from `config` and serve until Ctrl+C or SIGTERM
pub async fn serve(config: ServerConfig) -> Result<(), ServerError> {
    info!(
        "Spoonacular API key loaded (first 5 characters): {}",
        config.api_key_hint()
    );
    if config.api_key().is_none() {
        warn!("SPOONACULAR_API_KEY is not defined; API calls will fail until it is set");
    }

    let provider = SpoonacularProvider::new(&config)?;
    let app = router(RecipeAdapter::new(Arc::new(provider)), &config.static_dir);

    let address = format!("0.0.0.0:{}", config.port);
    let listener = TcpListener::bind(&address).await?;
    info!("Backend server running on http://localhost:{}", config.port);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutting down...");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                warn!("Failed to install signal handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
