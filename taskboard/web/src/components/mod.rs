mod edit_task_dialog;
mod error_message;
mod loading_spinner;
mod new_task_form;
mod task_card;

pub use edit_task_dialog::EditTaskDialog;
pub use error_message::ErrorMessage;
pub use loading_spinner::LoadingSpinner;
pub use new_task_form::NewTaskForm;
pub use task_card::TaskCard;
