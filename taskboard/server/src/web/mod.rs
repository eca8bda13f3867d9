use axum::Router;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use migration::MigratorTrait;
use sea_orm::Database;
use std::any::Any;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::task::TaskState;

pub mod api;

/// Body of every response for a failure that is not the client's fault.
pub const SERVER_ERROR_MESSAGE: &str = "Something broke!";

/// Generic 500 response shared by handler errors and caught panics.
pub fn something_broke() -> Response {
    (StatusCode::INTERNAL_SERVER_ERROR, SERVER_ERROR_MESSAGE).into_response()
}

fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let details = if let Some(message) = err.downcast_ref::<String>() {
        message.as_str()
    } else if let Some(message) = err.downcast_ref::<&str>() {
        message
    } else {
        "unknown panic payload"
    };
    tracing::error!("Request handler panicked: {}", details);
    something_broke()
}

/// Wraps a router with request tracing, permissive CORS and panic recovery.
/// CORS sits outside the panic layer so the 500 still carries its headers.
pub fn with_middleware(router: Router) -> Router {
    router.layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive())
            .layer(CatchPanicLayer::custom(handle_panic)),
    )
}

/// Builds the full application router on top of an already migrated database.
pub fn create_app(db: sea_orm::DatabaseConnection) -> Router {
    let task_state = TaskState { db: Arc::new(db) };

    let app = Router::new()
        .route("/health", axum::routing::get(health_check_handler))
        .merge(api::create_api_router(task_state));
    with_middleware(app)
}

#[tracing::instrument(skip(config))]
pub async fn start_web_server(config: Config) -> anyhow::Result<()> {
    let db = Database::connect(&config.database_url).await?;
    migration::Migrator::up(&db, None).await?;
    tracing::info!("Database migrations applied successfully");

    let app = create_app(db);

    let server_address = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&server_address).await?;
    tracing::info!("Server running on port {}", config.port);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("Shutdown signal received, stopping server"),
        Err(err) => {
            tracing::error!("Failed to listen for shutdown signal: {}", err);
            std::future::pending::<()>().await;
        }
    }
}

#[tracing::instrument]
pub async fn health_check_handler() -> &'static str {
    "OK"
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use tower::ServiceExt;

    async fn body_text(response: Response) -> String {
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(body.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn can_respond_with_something_broke() {
        let response = something_broke();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_text(response).await, "Something broke!");
    }

    #[tokio::test]
    async fn can_turn_handler_panic_into_500() {
        async fn exploding_handler() -> &'static str {
            panic!("boom")
        }

        let app = with_middleware(
            Router::new().route("/explode", axum::routing::get(exploding_handler)),
        );

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/explode")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_text(response).await, "Something broke!");
    }

    #[tokio::test]
    async fn can_allow_cross_origin_on_panic_response() {
        async fn exploding_handler() -> &'static str {
            panic!("boom")
        }

        let app = with_middleware(
            Router::new().route("/explode", axum::routing::get(exploding_handler)),
        );

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/explode")
                    .header("origin", "http://localhost:5173")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            response.headers().get("access-control-allow-origin"),
            Some(&axum::http::HeaderValue::from_static("*"))
        );
    }

    #[tokio::test]
    async fn can_allow_cross_origin_requests() {
        let app = with_middleware(
            Router::new().route("/health", axum::routing::get(health_check_handler)),
        );

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .header("origin", "http://localhost:5173")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get("access-control-allow-origin"),
            Some(&axum::http::HeaderValue::from_static("*"))
        );
        assert_eq!(body_text(response).await, "OK");
    }
}
