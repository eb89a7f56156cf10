use axum::{extract::{Path, State}, routing::get, Router, Json};
use axum::http::StatusCode;

use crate::{application::todo_service::TodoService, domain::todo::{Todo, TodoId}, http::types::ApiError};

#[derive(Clone)]
pub struct AppState<S: TodoService> { pub service: S }

pub fn router<S: TodoService + Clone>(state: AppState<S>) -> Router {
    Router::new()
        .route("/todos", get(list_todos::<S>).post(create_todo::<S>))
        .route("/todos/:id", get(get_todo::<S>).patch(update_todo::<S>).delete(delete_todo::<S>))
        .with_state(state)
}

async fn list_todos<S: TodoService>(State(state): State<AppState<S>>) -> Result<Json<Vec<Todo>>, ApiError> {
    Ok(Json(state.service.list().await?))
}

async fn get_todo<S: TodoService>(State(state): State<AppState<S>>, Path(id): Path<i64>) -> Result<Json<Todo>, ApiError> {
    let id = TodoId(id);
    match state.service.get(id).await? {
        Some(todo) => Ok(Json(todo)),
        None => not_found(id),
    }
}

async fn create_todo<S: TodoService>(State(state): State<AppState<S>>, Json(payload): Json<Todo>) -> Result<(StatusCode, Json<Todo>), ApiError> {
    let todo = state.service.create(payload).await?;
    Ok((StatusCode::CREATED, Json(todo)))
}

async fn update_todo<S: TodoService>(State(state): State<AppState<S>>, Path(id): Path<i64>, Json(payload): Json<Todo>) -> Result<Json<Todo>, ApiError> {
    let id = TodoId(id);
    match state.service.update(id, payload).await? {
        Some(todo) => Ok(Json(todo)),
        None => not_found(id),
    }
}

async fn delete_todo<S: TodoService>(State(state): State<AppState<S>>, Path(id): Path<i64>) -> Result<StatusCode, ApiError> {
    let id = TodoId(id);
    match state.service.delete(id).await? {
        Some(_) => Ok(StatusCode::OK),
        None => not_found(id),
    }
}

fn not_found<T>(id: TodoId) -> Result<T, ApiError> {
    tracing::debug!(%id, "todo not found");
    Err(ApiError::NotFound(id))
}
