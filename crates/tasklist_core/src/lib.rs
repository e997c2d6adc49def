pub mod components;
pub mod config;
pub mod controller;
pub mod error;
pub mod memo;
pub mod model;
pub mod observer;

#[cfg(test)]
mod tests {
    use crate::error::AppError;
    use crate::model::{Task, TaskId};

    #[test]
    fn task_has_required_fields() {
        let task = Task {
            id: TaskId::new(1),
            description: "demo".to_string(),
        };

        assert_eq!(task.id.get(), 1);
        assert_eq!(task.description, "demo");
    }

    #[test]
    fn app_error_exposes_code() {
        let err = AppError::invalid_input("missing id");
        assert_eq!(err.code(), "invalid_input");
        assert_eq!(err.to_string(), "invalid_input - missing id");
    }

    #[test]
    fn json_errors_map_to_invalid_data() {
        let err: AppError = serde_json::from_str::<Task>("{").unwrap_err().into();
        assert_eq!(err.code(), "invalid_data");
    }
}
