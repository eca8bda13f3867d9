use serde::de::DeserializeOwned;
use taskboard_core::{DeleteConfirmation, Envelope, NewTask, Task, TaskError, TaskId, TaskPatch};

/// Base URL used when `API_BASE_URL` was not set at build time.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:3000";

const TASKS_PATH: &str = "/api/tasks";

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The input was rejected locally; no request was sent.
    #[error(transparent)]
    Invalid(#[from] TaskError),
    #[error("Task with ID {0} not found")]
    NotFound(TaskId),
    /// Any other non-success status, with the plain-text body the server sent.
    #[error("Server responded with status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),
}

/// HTTP proxy for the task endpoints.
#[derive(Debug, Clone)]
pub struct TaskClient {
    http: reqwest::Client,
    base_url: String,
}

impl TaskClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http: reqwest::Client::new(),
            base_url,
        }
    }

    /// Uses the base URL captured at compile time, falling back to
    /// [`DEFAULT_API_BASE_URL`].
    pub fn from_build_env() -> Self {
        Self::new(build_env_base_url())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn tasks_url(&self) -> String {
        format!("{}{}", self.base_url, TASKS_PATH)
    }

    fn task_url(&self, id: TaskId) -> String {
        format!("{}{}/{}", self.base_url, TASKS_PATH, id)
    }

    /// Fetches every task.
    #[tracing::instrument(skip(self))]
    pub async fn list_tasks(&self) -> Result<Vec<Task>, ClientError> {
        let response = self.http.get(self.tasks_url()).send().await?;
        read_envelope(response, None).await
    }

    /// Creates a task. A blank title fails with [`ClientError::Invalid`] before
    /// anything is sent.
    #[tracing::instrument(skip(self))]
    pub async fn create_task(&self, new_task: &NewTask) -> Result<Task, ClientError> {
        new_task.validate()?;
        let response = self
            .http
            .post(self.tasks_url())
            .json(new_task)
            .send()
            .await?;
        read_envelope(response, None).await
    }

    /// Merges `patch` into the task. The server decides between not found and
    /// an invalid title, so the patch is sent as is.
    #[tracing::instrument(skip(self))]
    pub async fn update_task(&self, id: TaskId, patch: &TaskPatch) -> Result<Task, ClientError> {
        let response = self.http.put(self.task_url(id)).json(patch).send().await?;
        read_envelope(response, Some(id)).await
    }

    #[tracing::instrument(skip(self))]
    pub async fn delete_task(&self, id: TaskId) -> Result<DeleteConfirmation, ClientError> {
        let response = self.http.delete(self.task_url(id)).send().await?;
        read_envelope(response, Some(id)).await
    }
}

/// `API_BASE_URL`, falling back to `VITE_API_BASE_URL`.
fn build_env_base_url() -> &'static str {
    option_env!("API_BASE_URL")
        .or(option_env!("VITE_API_BASE_URL"))
        .unwrap_or(DEFAULT_API_BASE_URL)
}

/// Unwraps `{ "data": ... }` from a successful response. A 404 on a request
/// that addressed a single task becomes [`ClientError::NotFound`].
async fn read_envelope<T: DeserializeOwned>(
    response: reqwest::Response,
    id: Option<TaskId>,
) -> Result<T, ClientError> {
    let status = response.status();
    if let (reqwest::StatusCode::NOT_FOUND, Some(id)) = (status, id) {
        return Err(ClientError::NotFound(id));
    }
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        tracing::warn!("Task API returned {}: {}", status, body);
        return Err(ClientError::Status {
            status: status.as_u16(),
            body,
        });
    }
    let envelope: Envelope<T> = response.json().await?;
    Ok(envelope.into_inner())
}
