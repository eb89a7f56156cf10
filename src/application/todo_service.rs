use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::error::RepositoryError;
use crate::domain::repository::TodoRepository;
use crate::domain::todo::{Todo, TodoId};

type Result<T> = std::result::Result<T, RepositoryError>;

/// Operations behind the HTTP surface. `None` means the id is not stored.
#[async_trait]
pub trait TodoService: Send + Sync + 'static {
    async fn list(&self) -> Result<Vec<Todo>>;
    async fn get(&self, id: TodoId) -> Result<Option<Todo>>;
    async fn create(&self, todo: Todo) -> Result<Todo>;
    /// Replaces the stored record: the old one is deleted and `replacement`
    /// is added under the same id.
    async fn update(&self, id: TodoId, replacement: Todo) -> Result<Option<Todo>>;
    async fn delete(&self, id: TodoId) -> Result<Option<Todo>>;
}

pub struct TodoServiceImpl<R: TodoRepository> {
    repo: Arc<R>,
}

impl<R: TodoRepository> Clone for TodoServiceImpl<R> {
    fn clone(&self) -> Self { Self { repo: Arc::clone(&self.repo) } }
}

impl<R: TodoRepository> TodoServiceImpl<R> {
    pub fn new(repo: R) -> Self { Self { repo: Arc::new(repo) } }
}

#[async_trait]
impl<R: TodoRepository> TodoService for TodoServiceImpl<R> {
    async fn list(&self) -> Result<Vec<Todo>> { self.repo.get_all().await }

    async fn get(&self, id: TodoId) -> Result<Option<Todo>> { self.repo.find_by_id(id).await }

    async fn create(&self, todo: Todo) -> Result<Todo> {
        let created = self.repo.add(todo).await?;
        tracing::debug!(id = ?created.id, "created todo");
        Ok(created)
    }

    async fn update(&self, id: TodoId, replacement: Todo) -> Result<Option<Todo>> {
        let Some(existing) = self.repo.find_by_id(id).await? else { return Ok(None) };
        self.repo.delete(&existing).await?;
        match self.repo.add(replacement.identified_as(id)).await {
            Ok(updated) => {
                tracing::debug!(%id, version = updated.version, "replaced todo");
                Ok(Some(updated))
            }
            Err(e) => {
                // A failed update must leave the previous record in place.
                if let Err(restore) = self.repo.add(existing).await {
                    tracing::error!(%id, error = %restore, "failed to restore todo after update error");
                }
                Err(e)
            }
        }
    }

    async fn delete(&self, id: TodoId) -> Result<Option<Todo>> {
        let Some(existing) = self.repo.find_by_id(id).await? else { return Ok(None) };
        self.repo.delete(&existing).await?;
        tracing::debug!(%id, "deleted todo");
        Ok(Some(existing))
    }
}
