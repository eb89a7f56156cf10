use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::{
    error::RepositoryError,
    repository::TodoRepository,
    todo::{Todo, TodoId},
};

#[derive(Default)]
struct Store {
    items: Vec<Todo>,
    /// Last id handed out or stored; never moves backwards.
    last_id: i64,
}

/// Process-local repository. Vector order is insertion order.
#[derive(Clone, Default)]
pub struct InMemoryTodoRepository {
    store: Arc<RwLock<Store>>,
}

impl InMemoryTodoRepository {
    pub fn new() -> Self { Self::default() }
}

#[async_trait]
impl TodoRepository for InMemoryTodoRepository {
    async fn init(&self) -> Result<(), RepositoryError> { Ok(()) }

    async fn get_all(&self) -> Result<Vec<Todo>, RepositoryError> {
        Ok(self.store.read().await.items.clone())
    }

    async fn find_by_id(&self, id: TodoId) -> Result<Option<Todo>, RepositoryError> {
        Ok(self.store.read().await.items.iter().find(|t| t.id == Some(id)).cloned())
    }

    async fn add(&self, todo: Todo) -> Result<Todo, RepositoryError> {
        let mut store = self.store.write().await;
        let id = match todo.id {
            Some(id) if store.items.iter().any(|t| t.id == Some(id)) => return Err(RepositoryError::Duplicate(id)),
            Some(id) => id,
            None => TodoId(store.last_id + 1),
        };
        store.last_id = store.last_id.max(id.0);
        let todo = todo.identified_as(id);
        store.items.push(todo.clone());
        tracing::debug!(%id, "stored todo");
        Ok(todo)
    }

    async fn delete(&self, todo: &Todo) -> Result<(), RepositoryError> {
        let Some(id) = todo.id else { return Ok(()) };
        self.store.write().await.items.retain(|t| t.id != Some(id));
        Ok(())
    }
}
