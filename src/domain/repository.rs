use async_trait::async_trait;

use super::error::RepositoryError;
use super::todo::{Todo, TodoId};

/// Storage for Todo records.
///
/// `add` assigns an identifier when the record has none and rejects an
/// identifier that is already stored. `delete` matches on identifier and is a
/// no-op for records that are not stored.
#[async_trait]
pub trait TodoRepository: Send + Sync + 'static {
    async fn init(&self) -> Result<(), RepositoryError>;
    async fn get_all(&self) -> Result<Vec<Todo>, RepositoryError>;
    async fn find_by_id(&self, id: TodoId) -> Result<Option<Todo>, RepositoryError>;
    async fn add(&self, todo: Todo) -> Result<Todo, RepositoryError>;
    async fn delete(&self, todo: &Todo) -> Result<(), RepositoryError>;
}
