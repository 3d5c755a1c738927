pub mod dto;
pub mod errors;
pub mod extract;
pub mod handlers;
pub mod state;

use axum::{
    routing::{get, post, put},
    Router,
};
use tower_http::{
    cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_axum::router::OpenApiRouter;

use handlers::ApiDoc;
pub use state::AppState;

pub fn router(state: AppState) -> Router {
    let (router, api) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .route("/settings", put(handlers::put_settings))
        .route("/graph", get(handlers::get_graph))
        .route("/sensorData", post(handlers::post_sensor_data))
        .route("/fan", get(handlers::get_fan))
        .route("/light", get(handlers::get_light))
        .with_state(state)
        .split_for_parts();

    router
        .route("/health", get(handlers::health))
        .route(
            "/api-docs/openapi.json",
            get(move || async move { axum::Json(api) }),
        )
        .layer(cors())
        .layer(TraceLayer::new_for_http())
}

/// Any origin, with credentials. A literal `*` cannot be combined with
/// credentials, so the request's own origin, methods and headers are echoed.
fn cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::mirror_request())
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true)
}
