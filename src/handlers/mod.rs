pub mod draft;
pub mod items;

use axum::{
    Router,
    middleware::from_fn_with_state,
    routing::{get, post, put},
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::db::AppState;
use crate::middleware::vendor_auth;

pub async fn health() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({ "status": "ok" }))
}

pub fn router(state: AppState) -> Router {
    let vendor_routes = Router::new()
        .route("/vendors/items", post(items::create_item))
        .route(
            "/vendors/items/{id}",
            get(items::get_item).put(items::update_item),
        )
        .route("/vendors/items/check", post(items::check_item))
        .route(
            "/vendors/draft",
            put(draft::save_draft)
                .get(draft::get_draft)
                .delete(draft::delete_draft),
        )
        .route_layer(from_fn_with_state(state.clone(), vendor_auth));

    Router::new()
        .route("/health", get(health))
        .merge(vendor_routes)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
