use axum::{
    extract::Request,
    http::{header, HeaderValue},
    middleware::{self, Next},
    response::Response,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{compression::CompressionLayer, trace::TraceLayer};

pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod metrics;
pub mod middlewares;
pub mod models;
pub mod render;
pub mod services;

pub use config::Config;
pub use services::AppState;

/// CSP middleware adds Content-Security-Policy header to all responses
async fn csp_middleware(request: Request, next: Next) -> Response {
    let mut response = next.run(request).await;
    response.headers_mut().insert(
        header::CONTENT_SECURITY_POLICY,
        HeaderValue::from_static(
            "default-src 'self'; \
             script-src 'self' 'unsafe-inline'; \
             style-src 'self' 'unsafe-inline'; \
             img-src 'self' data:; \
             form-action 'self'",
        ),
    );
    response
}

pub fn create_router(app_state: Arc<AppState>) -> Router {
    Router::new()
        // Practice page
        .route("/", get(handlers::page::index))
        .route("/shuffle", post(handlers::page::shuffle))
        .route("/feedback", post(handlers::page::feedback))
        // JSON API
        .nest("/api/v1/session", session_routes())
        // Operations
        .route("/health", get(handlers::health_check))
        .route(
            "/metrics",
            get(handlers::metrics_handler).layer(middleware::from_fn_with_state(
                app_state.clone(),
                handlers::metrics_auth_middleware,
            )),
        )
        .with_state(app_state)
        .layer(middleware::from_fn(csp_middleware))
        .layer(CompressionLayer::new())
        .layer(middleware::from_fn(
            middlewares::metrics::metrics_middleware,
        ))
        .layer(middleware::from_fn(
            middlewares::trace::trace_context_middleware,
        ))
        .layer(TraceLayer::new_for_http())
}

fn session_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(handlers::session::get_session))
        .route("/shuffle", post(handlers::session::shuffle_question))
        .route("/answers", post(handlers::session::submit_answer))
}
