use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Local store is not ready")]
    NotReady,
    #[error("Not found")]
    NotFound,
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Invalid state: {0}")]
    InvalidState(String),
    #[error("Storage error: {0}")]
    Storage(String),
}
