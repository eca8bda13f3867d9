//! Client-side access to the Taskboard API.
//!
//! [`client::TaskClient`] wraps the HTTP endpoints and unwraps their `{ data }`
//! envelopes, [`board::TaskBoard`] is the local mirror of the task list that
//! the UI renders from.
pub mod board;
pub mod client;

pub use board::{TaskBoard, TaskDraft, TaskEdit};
pub use client::{ClientError, DEFAULT_API_BASE_URL, TaskClient};
