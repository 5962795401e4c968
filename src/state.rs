use std::sync::Arc;

use crate::repository::TodoRepository;

#[derive(Clone)]
pub struct AppState {
    pub todos: Arc<dyn TodoRepository>,
    pub expose_error_details: bool,
}

impl AppState {
    pub fn new(todos: Arc<dyn TodoRepository>) -> Self {
        Self {
            todos,
            expose_error_details: false,
        }
    }

    pub fn with_error_details(mut self, expose: bool) -> Self {
        self.expose_error_details = expose;
        self
    }
}
