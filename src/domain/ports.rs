use super::errors::DomainError;
use super::order::OrderLine;
use super::todo::{TodoBoard, TodoItem};

pub trait OrderRepository: Send + Sync + 'static {
    /// Writes one line, merging into an existing row with the same id.
    fn insert_order_line(&self, line: &OrderLine) -> Result<(), DomainError>;
    /// All rows, ordered by name.
    fn list_order_lines(&self) -> Result<Vec<OrderLine>, DomainError>;
    fn delete_order_line(&self, id: &str) -> Result<(), DomainError>;
    fn delete_all_order_lines(&self) -> Result<(), DomainError>;
}

pub trait TodoRepository: Send + Sync + 'static {
    fn insert(&self, value: &str) -> Result<TodoItem, DomainError>;
    /// Pending and done items, read as one consistent snapshot.
    fn board(&self) -> Result<TodoBoard, DomainError>;
    /// Returns `false` when no row has that id.
    fn set_done(&self, id: i32, done: bool) -> Result<bool, DomainError>;
}
