use std::path::Path;
use std::sync::Arc;

use axum::routing::get;
use axum::Router;
use ludex_store::{ImageStore, ShelfStore};
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::handler;

/// Shared state handed to every request handler.
#[derive(Clone)]
pub struct AppState {
    pub shelf: Arc<dyn ShelfStore>,
    pub images: Arc<dyn ImageStore>,
}

/// Build the axum router with all Ludex endpoints.
///
/// `images_dir` is served statically under `/images`; CORS is permissive
/// because the frontend typically runs on another port.
pub fn build_router(state: AppState, images_dir: &Path) -> Router {
    Router::new()
        .route("/health", get(handler::health_handler))
        .route(
            "/games",
            get(handler::list_games).post(handler::create_game),
        )
        .route(
            "/games/:id",
            axum::routing::put(handler::update_game).delete(handler::delete_game),
        )
        .nest_service("/images", ServeDir::new(images_dir))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
