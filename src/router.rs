use axum::http::{HeaderValue, Method, header};
use axum::{Router, middleware, routing::get};
use metrics_exporter_prometheus::PrometheusHandle;
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable as _};
use utoipa_swagger_ui::SwaggerUi;

use evrs_auth::Role;

use crate::docs::ApiDoc;
use crate::logging::logging_middleware;
use crate::metrics::metrics_middleware;
use crate::middleware::gate::route_gate;
use crate::modules::auth::router::init_auth_router;
use crate::routes::{
    admin::init_admin_router, citizen::init_citizen_router, frontend::init_frontend_router,
    health::init_health_router, providers::init_provider_router, shared::init_shared_router,
};
use crate::state::AppState;

fn api_router(state: &AppState) -> Router<AppState> {
    let keys = &state.keys;

    Router::new()
        .nest("/auth", init_auth_router(keys.clone()))
        .nest("/admin", init_admin_router(keys.clone()))
        .nest("/hcp", init_provider_router(keys.clone(), Role::Hcp))
        .nest("/hospital", init_provider_router(keys.clone(), Role::Hospital))
        .nest("/moh", init_provider_router(keys.clone(), Role::Moh))
        .nest("/citizen", init_citizen_router(keys.clone()))
        .nest("/shared", init_shared_router(keys.clone()))
}

fn cors_layer(state: &AppState) -> CorsLayer {
    let allowed_origins: Vec<HeaderValue> = state
        .cors_config
        .allowed_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT])
        .allow_credentials(true)
}

/// Builds the application. `metrics` is the Prometheus handle returned by
/// [`crate::metrics::init_metrics`]; `/metrics` is only mounted when present.
pub fn init_router(state: AppState, metrics: Option<PrometheusHandle>) -> Router {
    let mut router = Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(Scalar::with_url("/scalar", ApiDoc::openapi()))
        .merge(init_health_router())
        .nest("/api", api_router(&state))
        .merge(init_frontend_router(
            state.server_config.static_dir.as_deref(),
        ));

    if let Some(handle) = metrics {
        router = router.route("/metrics", get(move || std::future::ready(handle.render())));
    }

    router
        .with_state(state.clone())
        .layer(middleware::from_fn(route_gate))
        .layer(cors_layer(&state))
        .layer(middleware::from_fn(metrics_middleware))
        .layer(middleware::from_fn(logging_middleware))
}
