use crate::domain::errors::DomainError;
use crate::domain::ports::TodoRepository;
use crate::domain::todo::{TodoBoard, TodoItem};

pub struct TodoService<R> {
    repo: R,
}

impl<R: TodoRepository> TodoService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn add(&self, value: &str) -> Result<TodoItem, DomainError> {
        let value = value.trim();
        if value.is_empty() {
            return Err(DomainError::InvalidInput("task text is empty".to_string()));
        }
        let item = self.repo.insert(value)?;
        log::debug!("added task {}", item.id);
        Ok(item)
    }

    pub fn board(&self) -> Result<TodoBoard, DomainError> {
        self.repo.board()
    }

    pub fn set_done(&self, id: i32, done: bool) -> Result<(), DomainError> {
        if self.repo.set_done(id, done)? {
            Ok(())
        } else {
            Err(DomainError::NotFound)
        }
    }
}
