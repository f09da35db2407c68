use thiserror::Error;

#[derive(Error, Debug)]
pub enum BookingError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Lead time violation: {0}")]
    LeadTimeViolation(String),

    #[error("Slot conflict: {0}")]
    SlotConflict(String),

    #[error("Adjacency violation: {0}")]
    AdjacencyViolation(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Invalid state: {0}")]
    InvalidState(String),

    #[error("Authentication error: {0}")]
    Unauthenticated(String),

    #[error("Account not verified: {0}")]
    Unverified(String),

    #[error("Already exists: {0}")]
    Conflict(String),

    #[error("Database error: {0}")]
    Database(#[from] eyre::Report),

    #[error("Internal server error: {0}")]
    Internal(#[from] Box<dyn std::error::Error + Send + Sync>),
}

pub type BookingResult<T> = Result<T, BookingError>;
