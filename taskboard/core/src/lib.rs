//! Core domain models shared by the Taskboard server, client proxy and web UI.
pub mod task;

pub use task::{DeleteConfirmation, Envelope, NewTask, Task, TaskError, TaskId, TaskPatch, Timestamp};
