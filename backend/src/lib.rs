use axum::{http::Method, middleware as axum_middleware, routing::post, Router};
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub mod config;
pub mod docs;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod provider;

use config::Config;
use provider::ProviderClient;

pub type AppState = (ProviderClient, Config);

/// Function routes plus the OpenAPI UI, with the shared CORS/trace
/// layers. Browser clients invoke the functions directly, so preflight
/// must be answered the same way the hosted runtime did.
pub fn build_router(state: AppState) -> Router {
    let function_routes = Router::new()
        .route(
            "/functions/v1/generateUrl",
            post(handlers::signed_url::generate_url),
        )
        .route(
            "/functions/v1/passwordUpdate",
            post(handlers::password::password_update),
        )
        .route(
            "/functions/v1/profileUpdate",
            post(handlers::profile::profile_update),
        )
        .route_layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::auth,
        ));

    Router::new()
        .merge(function_routes)
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", docs::ApiDoc::openapi()))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(
                    CorsLayer::new()
                        .allow_origin(Any)
                        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
                        .allow_headers(Any)
                        .max_age(std::time::Duration::from_secs(24 * 60 * 60)),
                ),
        )
        .with_state(state)
}
