use std::path::PathBuf;

use super::{memory_repo::InMemoryTodoRepository, sqlite_repo::{pool_options, SqliteTodoRepository}};
use crate::domain::{error::RepositoryError, repository::TodoRepository, todo::{Todo, TodoId}};

async fn sqlite() -> SqliteTodoRepository {
    let repo = SqliteTodoRepository::connect("sqlite::memory:").await.unwrap();
    repo.init().await.unwrap();
    repo
}

async fn assigns_sequential_ids(repo: impl TodoRepository) {
    let first = repo.add(Todo::new("a", false)).await.unwrap();
    let second = repo.add(Todo::new("b", true)).await.unwrap();
    assert_eq!(first.id, Some(TodoId(1)));
    assert_eq!(second.id, Some(TodoId(2)));
    assert_eq!(repo.find_by_id(TodoId(2)).await.unwrap(), Some(second));
    assert_eq!(repo.find_by_id(TodoId(3)).await.unwrap(), None);
}

async fn keeps_insertion_order(repo: impl TodoRepository) {
    repo.add(Todo::with_id(5, "five", false, 1)).await.unwrap();
    repo.add(Todo::with_id(2, "two", false, 1)).await.unwrap();
    let old = repo.find_by_id(TodoId(5)).await.unwrap().unwrap();
    repo.delete(&old).await.unwrap();
    repo.add(Todo::with_id(5, "five again", true, 2)).await.unwrap();

    let titles: Vec<_> = repo.get_all().await.unwrap().into_iter().map(|t| t.title).collect();
    assert_eq!(titles, ["two", "five again"]);
}

async fn rejects_duplicate_ids(repo: impl TodoRepository) {
    repo.add(Todo::with_id(1, "a", false, 1)).await.unwrap();
    let err = repo.add(Todo::with_id(1, "b", false, 1)).await.unwrap_err();
    assert!(matches!(err, RepositoryError::Duplicate(TodoId(1))));
    assert_eq!(repo.get_all().await.unwrap().len(), 1);
}

async fn deleting_unknown_record_is_noop(repo: impl TodoRepository) {
    repo.add(Todo::new("kept", false)).await.unwrap();
    repo.delete(&Todo::with_id(42, "ghost", false, 1)).await.unwrap();
    repo.delete(&Todo::new("unstored", false)).await.unwrap();
    assert_eq!(repo.get_all().await.unwrap().len(), 1);
}

async fn never_reuses_ids(repo: impl TodoRepository) {
    let first = repo.add(Todo::new("a", false)).await.unwrap();
    let second = repo.add(Todo::new("b", false)).await.unwrap();
    repo.delete(&second).await.unwrap();
    assert_eq!(repo.add(Todo::new("c", false)).await.unwrap().id, Some(TodoId(3)));

    repo.add(Todo::with_id(10, "explicit", false, 1)).await.unwrap();
    assert_eq!(repo.add(Todo::new("d", false)).await.unwrap().id, Some(TodoId(11)));
    repo.delete(&first).await.unwrap();
    assert_eq!(repo.add(Todo::new("e", false)).await.unwrap().id, Some(TodoId(12)));
}

#[tokio::test]
async fn memory_assigns_sequential_ids() { assigns_sequential_ids(InMemoryTodoRepository::new()).await }

#[tokio::test]
async fn sqlite_assigns_sequential_ids() { assigns_sequential_ids(sqlite().await).await }

#[tokio::test]
async fn memory_keeps_insertion_order() { keeps_insertion_order(InMemoryTodoRepository::new()).await }

#[tokio::test]
async fn sqlite_keeps_insertion_order() { keeps_insertion_order(sqlite().await).await }

#[tokio::test]
async fn memory_rejects_duplicate_ids() { rejects_duplicate_ids(InMemoryTodoRepository::new()).await }

#[tokio::test]
async fn sqlite_rejects_duplicate_ids() { rejects_duplicate_ids(sqlite().await).await }

#[tokio::test]
async fn memory_delete_unknown_is_noop() { deleting_unknown_record_is_noop(InMemoryTodoRepository::new()).await }

#[tokio::test]
async fn sqlite_delete_unknown_is_noop() { deleting_unknown_record_is_noop(sqlite().await).await }

#[tokio::test]
async fn memory_never_reuses_ids() { never_reuses_ids(InMemoryTodoRepository::new()).await }

#[tokio::test]
async fn sqlite_never_reuses_ids() { never_reuses_ids(sqlite().await).await }

#[test]
fn in_memory_sqlite_pool_keeps_its_connection() {
    let options = pool_options("sqlite::memory:");
    assert_eq!(options.get_max_connections(), 1);
    assert_eq!(options.get_min_connections(), 1);
    assert_eq!(options.get_idle_timeout(), None);
    assert_eq!(options.get_max_lifetime(), None);
}

fn scratch_db(name: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("todo-api-{}-{name}.db", std::process::id()));
    let _ = std::fs::remove_file(&path);
    path
}

async fn creates_missing_file(url: String, path: PathBuf) {
    let repo = SqliteTodoRepository::connect(&url).await.unwrap();
    repo.init().await.unwrap();
    repo.add(Todo::new("persisted", false)).await.unwrap();
    assert!(path.exists(), "{} was not created", path.display());
    assert_eq!(repo.get_all().await.unwrap().len(), 1);
    for suffix in ["", "-wal", "-shm"] {
        let _ = std::fs::remove_file(format!("{}{suffix}", path.display()));
    }
}

#[tokio::test]
async fn creates_file_for_url_without_slashes() {
    let path = scratch_db("plain");
    creates_missing_file(format!("sqlite:{}", path.display()), path).await;
}

#[tokio::test]
async fn creates_file_for_url_with_query() {
    let path = scratch_db("query");
    creates_missing_file(format!("sqlite://{}?mode=rwc", path.display()), path.clone()).await;
    assert!(!PathBuf::from(format!("{}?mode=rwc", path.display())).exists());
}
