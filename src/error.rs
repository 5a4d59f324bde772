use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

/// Failure of the underlying record store.
///
/// A fault is never treated as a miss: it ends the request with an internal error.
#[derive(Debug, thiserror::Error)]
pub enum StorageFault {
    #[error("redb error: {0}")]
    Database(#[from] redb::DatabaseError),
    #[error("redb storage error: {0}")]
    Storage(#[from] redb::StorageError),
    #[error("redb table error: {0}")]
    Table(#[from] redb::TableError),
    #[error("redb transaction error: {0}")]
    Transaction(Box<redb::TransactionError>),
    #[error("redb commit error: {0}")]
    Commit(#[from] redb::CommitError),
    #[error("bucket {0:?} doesn't exist")]
    BucketMissing(String),
    #[error("key required")]
    KeyRequired,
    #[error("storage task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<redb::TransactionError> for StorageFault {
    fn from(e: redb::TransactionError) -> Self {
        Self::Transaction(Box::new(e))
    }
}

#[derive(Debug)]
pub enum AppError {
    Internal { message: String },
}

impl AppError {
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Internal { message } => {
                (StatusCode::INTERNAL_SERVER_ERROR, message).into_response()
            }
        }
    }
}

impl From<StorageFault> for AppError {
    fn from(e: StorageFault) -> Self {
        tracing::error!("Storage fault: {}", e);
        AppError::internal("Database error")
    }
}
