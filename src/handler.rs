use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect},
    Form, Json,
};
use chrono::Local;
use serde_json::json;
use tracing::{info, warn};

use crate::{
    error::AppError,
    page::render_index,
    schema::{AddTodoForm, CreateTodoSchema, UpdateTodoSchema},
    AppState, VERSION,
};

// Handler for the health checker route
pub async fn health_checker_handler(State(data): State<Arc<AppState>>) -> impl IntoResponse {
    let timestamp = Local::now().to_rfc3339();

    match data.store.ping().await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({
                "status": "healthy",
                "timestamp": timestamp,
                "version": VERSION,
            })),
        ),
        Err(err) => {
            warn!(error = %err, "health check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "status": "unhealthy",
                    "timestamp": timestamp,
                    "version": VERSION,
                    "message": err.to_string(),
                })),
            )
        }
    }
}

// Home page listing every todo
pub async fn index(State(data): State<Arc<AppState>>) -> Result<Html<String>, AppError> {
    let todos = data.store.list().await?;
    info!("Loading home page with {} todos", todos.len());
    Ok(Html(render_index(&todos)))
}

// Handler for the add form; blank or unreadable submissions are ignored
pub async fn add_todo(
    State(data): State<Arc<AppState>>,
    form: Option<Form<AddTodoForm>>,
) -> Result<Redirect, AppError> {
    let text = form
        .as_ref()
        .and_then(|Form(form)| form.todo.as_deref())
        .map(str::trim)
        .unwrap_or_default();
    if !text.is_empty() {
        let todo = data.store.create(text).await?;
        info!(id = todo.id, "Added new todo: {}", todo.text);
    }
    Ok(Redirect::to("/"))
}

pub async fn complete_todo(
    Path(id): Path<i64>,
    State(data): State<Arc<AppState>>,
) -> Result<Redirect, AppError> {
    if data.store.complete(id).await? {
        info!("Completed todo ID: {}", id);
    }
    Ok(Redirect::to("/"))
}

pub async fn remove_todo(
    Path(id): Path<i64>,
    State(data): State<Arc<AppState>>,
) -> Result<Redirect, AppError> {
    if data.store.delete(id).await? {
        info!("Deleted todo ID: {}", id);
    }
    Ok(Redirect::to("/"))
}

// Handler for getting all Todo items
pub async fn get_todos(State(data): State<Arc<AppState>>) -> Result<impl IntoResponse, AppError> {
    let todos = data.store.list().await?;

    let json_response = json!({
        "status": "success",
        "results": todos.len(),
        "todos": todos
    });
    Ok((StatusCode::OK, Json(json_response)))
}

// Handler for creating a new Todo
pub async fn create_todo(
    State(data): State<Arc<AppState>>,
    Json(body): Json<CreateTodoSchema>,
) -> Result<impl IntoResponse, AppError> {
    let text = body.text.trim();
    if text.is_empty() {
        return Err(AppError::Validation("Todo text must not be empty".to_string()));
    }

    let todo = data.store.create(text).await?;
    info!(id = todo.id, "Added new todo: {}", todo.text);

    let todo_response = json!({"status": "success","data": json!({
        "todo": todo
    })});
    Ok((StatusCode::CREATED, Json(todo_response)))
}

// Handler for getting a specific Todo by ID
pub async fn get_todo(
    Path(id): Path<i64>,
    State(data): State<Arc<AppState>>,
) -> Result<impl IntoResponse, AppError> {
    let todo = data.store.get(id).await?;

    let todo_response = json!({"status": "success","data": json!({
        "todo": todo
    })});
    Ok((StatusCode::OK, Json(todo_response)))
}

// Handler for updating a Todo by ID
pub async fn update_todo(
    Path(id): Path<i64>,
    State(data): State<Arc<AppState>>,
    Json(body): Json<UpdateTodoSchema>,
) -> Result<impl IntoResponse, AppError> {
    let text = body.text.as_deref().map(str::trim);
    if text == Some("") {
        return Err(AppError::Validation("Todo text must not be empty".to_string()));
    }

    let todo = data.store.update(id, text, body.completed).await?;
    info!(id, "Updated todo");

    let todo_response = json!({"status": "success","data": json!({
        "todo": todo
    })});
    Ok(Json(todo_response))
}

// Handler for deleting a Todo by ID
pub async fn delete_todo(
    Path(id): Path<i64>,
    State(data): State<Arc<AppState>>,
) -> Result<impl IntoResponse, AppError> {
    if !data.store.delete(id).await? {
        return Err(crate::error::StoreError::NotFound(id).into());
    }
    info!("Deleted todo ID: {}", id);

    Ok(StatusCode::NO_CONTENT)
}
