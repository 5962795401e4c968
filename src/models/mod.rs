pub mod todo;

pub use todo::{NewTodoRequest, Todo, TodoChanges, UpdateTodoRequest};
