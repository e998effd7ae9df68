use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("unknown column: {0}")]
    UnknownColumn(String),
    #[error("database error: {0}")]
    Db(String),
    #[error("model error: {0}")]
    Model(#[from] models::errors::ModelError),
}

impl ServiceError {
    /// True for errors caused by the caller's input rather than the store.
    pub fn is_client_error(&self) -> bool {
        matches!(self, ServiceError::InvalidArgument(_) | ServiceError::UnknownColumn(_))
    }
}

impl From<common::pagination::PaginationError> for ServiceError {
    fn from(e: common::pagination::PaginationError) -> Self {
        Self::InvalidArgument(e.to_string())
    }
}
