use crate::task::{TaskState, api as task_api, create_task_router};
use axum::{Json, Router, routing::get};
use utoipa::OpenApi;

/// OpenAPI description of the JSON endpoints.
#[derive(OpenApi)]
#[openapi(
    paths(
        task_api::list_tasks_handler,
        task_api::create_task_handler,
        task_api::update_task_handler,
        task_api::delete_task_handler,
    ),
    tags(
        (name = "Tasks", description = "Create, list, update and delete tasks")
    )
)]
pub struct ApiDoc;

#[tracing::instrument]
pub async fn openapi_handler() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Creates the API routes for JSON API endpoints.
pub fn create_api_router(task_state: TaskState) -> Router {
    Router::new()
        .route("/api-docs/openapi.json", get(openapi_handler))
        .merge(create_task_router(task_state))
}
