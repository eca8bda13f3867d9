use crate::entities::*;
use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::*;
use taskboard_core::{DeleteConfirmation, NewTask, Task, TaskError, TaskId, TaskPatch};

pub mod api;

pub use api::{TaskState, create_task_router};

/// Error type for TaskService operations.
#[derive(Debug, thiserror::Error)]
pub enum TaskServiceError {
    /// The input was rejected before reaching the database.
    #[error("Invalid task: {0}")]
    Invalid(#[from] TaskError),
    /// Represents a task not found error.
    #[error("Task with ID {0} not found")]
    TaskNotFound(TaskId),
    /// Represents a database error.
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),
}

impl From<task::Model> for Task {
    fn from(model: task::Model) -> Self {
        Task {
            id: model.id as TaskId,
            title: model.title,
            description: model.description,
            completed: model.completed,
            created_at: model.created_at.with_timezone(&Utc),
            updated_at: model.updated_at.with_timezone(&Utc),
        }
    }
}

/// Row id for a task id. Ids beyond the column range can never exist.
fn row_id(id: TaskId) -> Result<i32, TaskServiceError> {
    i32::try_from(id).map_err(|_| TaskServiceError::TaskNotFound(id))
}

/// Record store for tasks. Every write is a single statement with no version
/// check, so concurrent updates to the same task resolve as last writer wins.
pub struct TaskService<'a> {
    db: &'a sea_orm::DatabaseConnection,
}

impl TaskService<'_> {
    pub fn new(db: &sea_orm::DatabaseConnection) -> TaskService<'_> {
        TaskService { db }
    }

    /// Retrieves all tasks in insertion order.
    ///
    /// # Returns
    ///
    /// A `Result` containing a vector of `Task` if successful, or an error otherwise.
    #[tracing::instrument(skip(self))]
    pub async fn get_all_tasks(&self) -> Result<Vec<Task>, TaskServiceError> {
        let tasks = task::Entity::find()
            .order_by_asc(task::Column::Id)
            .all(self.db)
            .await?
            .into_iter()
            .map(Task::from)
            .collect();
        Ok(tasks)
    }

    /// Creates a new task.
    ///
    /// # Arguments
    ///
    /// * `new_task` - Title, description and completion flag of the task.
    ///
    /// # Returns
    ///
    /// A `Result` containing the created `Task` with its assigned ID, or
    /// `TaskServiceError::Invalid` when the title is blank.
    #[tracing::instrument(skip(self))]
    pub async fn create_task(&self, new_task: NewTask) -> Result<Task, TaskServiceError> {
        new_task.validate()?;

        let now = Utc::now().fixed_offset();
        let active_model = task::ActiveModel {
            title: ActiveValue::Set(new_task.title),
            description: ActiveValue::Set(new_task.description),
            completed: ActiveValue::Set(new_task.completed),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        };
        let created_model = active_model.insert(self.db).await?;
        Ok(Task::from(created_model))
    }

    /// Merges the fields present in `patch` into the task with the given ID.
    ///
    /// # Arguments
    ///
    /// * `id` - The ID of the task to update.
    /// * `patch` - The fields to overwrite. Absent fields keep their value.
    ///
    /// # Returns
    ///
    /// A `Result` containing the updated `Task`, `TaskServiceError::TaskNotFound`
    /// when no task has the ID, or `TaskServiceError::Invalid` when an existing
    /// task would lose its title.
    #[tracing::instrument(skip(self))]
    pub async fn update_task_by_id(
        &self,
        id: TaskId,
        patch: TaskPatch,
    ) -> Result<Task, TaskServiceError> {
        let row_id = row_id(id)?;
        if let Err(err) = patch.validate() {
            // An unknown id wins over an invalid body.
            self.get_task_by_id(id).await?;
            return Err(err.into());
        }

        let mut update = task::Entity::update_many()
            .col_expr(
                task::Column::UpdatedAt,
                Expr::value(Utc::now().fixed_offset()),
            )
            .filter(task::Column::Id.eq(row_id));
        if let Some(title) = patch.title {
            update = update.col_expr(task::Column::Title, Expr::value(title));
        }
        if let Some(description) = patch.description {
            update = update.col_expr(task::Column::Description, Expr::value(description));
        }
        if let Some(completed) = patch.completed {
            update = update.col_expr(task::Column::Completed, Expr::value(completed));
        }

        let result = update.exec(self.db).await?;
        if result.rows_affected == 0 {
            return Err(TaskServiceError::TaskNotFound(id));
        }
        self.get_task_by_id(id).await
    }

    /// Deletes the task with the given ID.
    ///
    /// # Returns
    ///
    /// A `Result` containing a `DeleteConfirmation`, or `TaskServiceError::TaskNotFound`.
    #[tracing::instrument(skip(self))]
    pub async fn delete_task_by_id(
        &self,
        id: TaskId,
    ) -> Result<DeleteConfirmation, TaskServiceError> {
        let result = task::Entity::delete_by_id(row_id(id)?)
            .exec(self.db)
            .await?;
        if result.rows_affected == 0 {
            return Err(TaskServiceError::TaskNotFound(id));
        }
        Ok(DeleteConfirmation::new(id))
    }

    /// Retrieves a task by its ID.
    #[tracing::instrument(skip(self))]
    pub async fn get_task_by_id(&self, id: TaskId) -> Result<Task, TaskServiceError> {
        let task_model = task::Entity::find_by_id(row_id(id)?)
            .one(self.db)
            .await?
            .ok_or(TaskServiceError::TaskNotFound(id))?;
        Ok(Task::from(task_model))
    }
}
