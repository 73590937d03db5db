pub mod auth;
pub mod response;
pub mod routes;

use axum::{
    Router,
    http::header::{CONTENT_DISPOSITION, CONTENT_TYPE},
    middleware::from_fn,
};
use tower::Layer;
use tower_http::{cors::CorsLayer, normalize_path::{NormalizePath, NormalizePathLayer}};
use util::state::AppState;

/// Assembles the full HTTP application: every route group under `/api`,
/// request logging, CORS, and trailing-slash normalisation.
///
/// Normalisation wraps the router from the outside so it runs before route
/// matching.
pub fn build_app(app_state: AppState) -> NormalizePath<Router> {
    let cors = CorsLayer::very_permissive().expose_headers([CONTENT_DISPOSITION, CONTENT_TYPE]);

    let router = Router::new()
        .nest("/api", routes::routes(app_state))
        .layer(from_fn(auth::middleware::log_request))
        .layer(cors);

    NormalizePathLayer::trim_trailing_slash().layer(router)
}
