pub mod config;
pub mod error;
pub mod model;
pub mod storage;
pub mod task_api;

#[cfg(test)]
mod tests {
    use crate::error::AppError;
    use crate::model::{Task, TaskStatus};

    #[test]
    fn task_has_required_fields() {
        let task = Task {
            id: 1,
            title: "demo".to_string(),
            priority: 3,
            status: TaskStatus::Open,
            due_date: None,
        };

        assert_eq!(task.id, 1);
        assert_eq!(task.title, "demo");
        assert_eq!(task.priority, 3);
        assert_eq!(task.status, TaskStatus::Open);
        assert_eq!(task.due_date, None);
    }

    #[test]
    fn app_error_exposes_code() {
        assert_eq!(AppError::invalid_input("missing title").code(), "invalid_input");
        assert_eq!(AppError::not_found("task 3 not found").code(), "not_found");
        assert_eq!(AppError::corrupt_store("bad").code(), "corrupt_store");
        assert_eq!(AppError::io("disk").code(), "io_error");
    }

    #[test]
    fn app_error_display_includes_code_and_message() {
        let err = AppError::not_found("task 3 not found");
        assert_eq!(err.to_string(), "not_found - task 3 not found");
    }
}
