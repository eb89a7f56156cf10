use thiserror::Error;

use super::todo::TodoId;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("todo {0} already exists")]
    Duplicate(TodoId),

    #[error("storage error: {0}")]
    Storage(#[from] sqlx::Error),
}
