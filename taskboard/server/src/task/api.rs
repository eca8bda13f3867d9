use crate::task::{TaskService, TaskServiceError};
use crate::web::something_broke;
use axum::{
    Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, put},
};
use std::sync::Arc;
use taskboard_core::{DeleteConfirmation, Envelope, NewTask, Task, TaskId, TaskPatch};

/// Shared state of the task routes.
#[derive(Clone)]
pub struct TaskState {
    pub db: Arc<sea_orm::DatabaseConnection>,
}

/// Errors produced by the task handlers. Responses carry a status code and a
/// plain-text body only.
#[derive(Debug, thiserror::Error)]
pub enum TaskApiError {
    /// The path segment could not name any task.
    #[error("Unknown task id '{0}'")]
    UnknownId(String),
    /// Represents a task service error.
    #[error("Task service error: {0}")]
    Service(#[from] TaskServiceError),
}

impl IntoResponse for TaskApiError {
    fn into_response(self) -> Response {
        match self {
            TaskApiError::UnknownId(_)
            | TaskApiError::Service(TaskServiceError::TaskNotFound(_)) => {
                (StatusCode::NOT_FOUND, "Task not found").into_response()
            }
            TaskApiError::Service(TaskServiceError::Invalid(err)) => {
                (StatusCode::BAD_REQUEST, err.to_string()).into_response()
            }
            TaskApiError::Service(err @ TaskServiceError::Database(_)) => {
                tracing::error!("Task request failed: {}", err);
                something_broke()
            }
        }
    }
}

fn parse_task_id(raw: &str) -> Result<TaskId, TaskApiError> {
    raw.parse::<TaskId>()
        .map_err(|_| TaskApiError::UnknownId(raw.to_string()))
}

/// Handler for GET /api/tasks - Returns every task in insertion order.
#[tracing::instrument(skip(state))]
#[utoipa::path(
    get,
    path = "/api/tasks",
    responses(
        (status = 200, description = "Successfully retrieved tasks", body = Envelope<Vec<Task>>),
        (status = 500, description = "Internal server error", body = String, content_type = "text/plain")
    ),
    tag = "Tasks"
)]
pub async fn list_tasks_handler(
    State(state): State<TaskState>,
) -> Result<Json<Envelope<Vec<Task>>>, TaskApiError> {
    let service = TaskService::new(&state.db);
    let tasks = service.get_all_tasks().await?;
    Ok(Json(Envelope::new(tasks)))
}

/// Handler for POST /api/tasks - Creates a task and returns it with its assigned ID.
#[tracing::instrument(skip(state))]
#[utoipa::path(
    post,
    path = "/api/tasks",
    request_body = NewTask,
    responses(
        (status = 201, description = "Task created", body = Envelope<Task>),
        (status = 400, description = "Title is missing or blank", body = String, content_type = "text/plain"),
        (status = 500, description = "Internal server error", body = String, content_type = "text/plain")
    ),
    tag = "Tasks"
)]
pub async fn create_task_handler(
    State(state): State<TaskState>,
    Json(new_task): Json<NewTask>,
) -> Result<(StatusCode, Json<Envelope<Task>>), TaskApiError> {
    let service = TaskService::new(&state.db);
    let task = service.create_task(new_task).await?;
    tracing::info!("Created task {}", task.id);
    Ok((StatusCode::CREATED, Json(Envelope::new(task))))
}

/// Handler for PUT /api/tasks/{id} - Merges the given fields into an existing task.
#[tracing::instrument(skip(state))]
#[utoipa::path(
    put,
    path = "/api/tasks/{id}",
    params(
        ("id" = u32, Path, description = "ID of the task to update")
    ),
    request_body = TaskPatch,
    responses(
        (status = 200, description = "Task updated", body = Envelope<Task>),
        (status = 400, description = "Title would become blank", body = String, content_type = "text/plain"),
        (status = 404, description = "Task not found", body = String, content_type = "text/plain"),
        (status = 500, description = "Internal server error", body = String, content_type = "text/plain")
    ),
    tag = "Tasks"
)]
pub async fn update_task_handler(
    State(state): State<TaskState>,
    Path(id): Path<String>,
    Json(patch): Json<TaskPatch>,
) -> Result<Json<Envelope<Task>>, TaskApiError> {
    let id = parse_task_id(&id)?;
    let service = TaskService::new(&state.db);
    let task = service.update_task_by_id(id, patch).await?;
    Ok(Json(Envelope::new(task)))
}

/// Handler for DELETE /api/tasks/{id} - Removes a task.
#[tracing::instrument(skip(state))]
#[utoipa::path(
    delete,
    path = "/api/tasks/{id}",
    params(
        ("id" = u32, Path, description = "ID of the task to delete")
    ),
    responses(
        (status = 200, description = "Task deleted", body = Envelope<DeleteConfirmation>),
        (status = 404, description = "Task not found", body = String, content_type = "text/plain"),
        (status = 500, description = "Internal server error", body = String, content_type = "text/plain")
    ),
    tag = "Tasks"
)]
pub async fn delete_task_handler(
    State(state): State<TaskState>,
    Path(id): Path<String>,
) -> Result<Json<Envelope<DeleteConfirmation>>, TaskApiError> {
    let id = parse_task_id(&id)?;
    let service = TaskService::new(&state.db);
    let confirmation = service.delete_task_by_id(id).await?;
    tracing::info!("Deleted task {}", id);
    Ok(Json(Envelope::new(confirmation)))
}

/// Creates and returns the tasks API router.
pub fn create_task_router(state: TaskState) -> Router {
    Router::new()
        .route(
            "/api/tasks",
            get(list_tasks_handler).post(create_task_handler),
        )
        .route(
            "/api/tasks/{id}",
            put(update_task_handler).delete(delete_task_handler),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_text(response: Response) -> String {
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(body.to_vec()).unwrap()
    }

    #[test]
    fn can_parse_numeric_task_id() {
        assert_eq!(parse_task_id("42").unwrap(), 42);
    }

    #[test]
    fn can_treat_malformed_task_id_as_unknown() {
        assert!(matches!(
            parse_task_id("65f0c0ffee"),
            Err(TaskApiError::UnknownId(raw)) if raw == "65f0c0ffee"
        ));
        assert!(matches!(parse_task_id("-1"), Err(TaskApiError::UnknownId(_))));
    }

    #[tokio::test]
    async fn can_map_not_found_to_404() {
        let response = TaskApiError::Service(TaskServiceError::TaskNotFound(9)).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_text(response).await, "Task not found");
    }

    #[tokio::test]
    async fn can_map_validation_error_to_400() {
        let error = TaskServiceError::Invalid(taskboard_core::TaskError::TitleRequired);
        let response = TaskApiError::from(error).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_text(response).await, "Title is required");
    }

    #[tokio::test]
    async fn can_map_database_error_to_generic_500() {
        let error = TaskServiceError::Database(sea_orm::DbErr::Custom("connection reset".into()));
        let response = TaskApiError::from(error).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_text(response).await, "Something broke!");
    }
}
