use std::str::FromStr;
use std::sync::Arc;

use async_trait::async_trait;
use sqlx::{sqlite::{SqliteConnectOptions, SqlitePoolOptions, SqliteRow}, Pool, Row, Sqlite};

use crate::domain::{
    error::RepositoryError,
    repository::TodoRepository,
    todo::{Todo, TodoId},
};

#[derive(Clone)]
pub struct SqliteTodoRepository {
    pool: Arc<Pool<Sqlite>>,
}

impl SqliteTodoRepository {
    /// Opens the database, creating the file when it does not exist yet.
    pub async fn connect(database_url: &str) -> Result<Self, RepositoryError> {
        let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
        let pool = pool_options(database_url).connect_with(options).await?;
        Ok(Self { pool: Arc::new(pool) })
    }
}

/// An in-memory database lives exactly as long as its connection, so such
/// pools hold a single connection that is never reaped.
pub(crate) fn pool_options(database_url: &str) -> SqlitePoolOptions {
    if database_url.contains(":memory:") {
        SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
    } else {
        SqlitePoolOptions::new().max_connections(5)
    }
}

#[async_trait]
impl TodoRepository for SqliteTodoRepository {
    async fn init(&self) -> Result<(), RepositoryError> {
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS todos (
                seq INTEGER PRIMARY KEY AUTOINCREMENT,
                id INTEGER NOT NULL UNIQUE,
                title TEXT NOT NULL,
                completed INTEGER NOT NULL,
                version INTEGER NOT NULL
            )",
        )
        .execute(&*self.pool)
        .await?;
        // Highest id ever handed out, so ids of deleted records are not reused.
        sqlx::query("CREATE TABLE IF NOT EXISTS todo_ids (name TEXT PRIMARY KEY, last_id INTEGER NOT NULL)")
            .execute(&*self.pool)
            .await?;
        sqlx::query("INSERT OR IGNORE INTO todo_ids (name, last_id) VALUES ('todos', 0)")
            .execute(&*self.pool)
            .await?;
        Ok(())
    }

    async fn get_all(&self) -> Result<Vec<Todo>, RepositoryError> {
        let rows = sqlx::query("SELECT id, title, completed, version FROM todos ORDER BY seq")
            .fetch_all(&*self.pool)
            .await?;
        Ok(rows.into_iter().map(row_to_todo).collect())
    }

    async fn find_by_id(&self, id: TodoId) -> Result<Option<Todo>, RepositoryError> {
        let row = sqlx::query("SELECT id, title, completed, version FROM todos WHERE id = ?1")
            .bind(id.0)
            .fetch_optional(&*self.pool)
            .await?;
        Ok(row.map(row_to_todo))
    }

    async fn add(&self, todo: Todo) -> Result<Todo, RepositoryError> {
        let mut tx = self.pool.begin().await?;
        let id = match todo.id {
            Some(id) => {
                sqlx::query("UPDATE todo_ids SET last_id = MAX(last_id, ?1) WHERE name = 'todos'")
                    .bind(id.0)
                    .execute(&mut *tx)
                    .await?;
                id
            }
            None => {
                let row = sqlx::query("UPDATE todo_ids SET last_id = last_id + 1 WHERE name = 'todos' RETURNING last_id")
                    .fetch_one(&mut *tx)
                    .await?;
                TodoId(row.get("last_id"))
            }
        };

        let inserted = sqlx::query("INSERT INTO todos (id, title, completed, version) VALUES (?1, ?2, ?3, ?4)")
            .bind(id.0)
            .bind(&todo.title)
            .bind(todo.completed)
            .bind(todo.version)
            .execute(&mut *tx)
            .await;

        match inserted {
            Ok(_) => {
                tx.commit().await?;
                Ok(todo.identified_as(id))
            }
            Err(sqlx::Error::Database(e)) if e.is_unique_violation() => Err(RepositoryError::Duplicate(id)),
            Err(e) => Err(e.into()),
        }
    }

    async fn delete(&self, todo: &Todo) -> Result<(), RepositoryError> {
        let Some(id) = todo.id else { return Ok(()) };
        sqlx::query("DELETE FROM todos WHERE id = ?1")
            .bind(id.0)
            .execute(&*self.pool)
            .await?;
        Ok(())
    }
}

fn row_to_todo(row: SqliteRow) -> Todo {
    Todo {
        id: Some(TodoId(row.get("id"))),
        title: row.get("title"),
        completed: row.get("completed"),
        version: row.get("version"),
    }
}
