use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::todo::{TodoBoard, TodoItem};
use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateTodoRequest {
    pub value: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateTodoRequest {
    pub done: bool,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TodoResponse {
    pub id: i32,
    pub done: bool,
    pub value: String,
}

impl From<TodoItem> for TodoResponse {
    fn from(item: TodoItem) -> Self {
        Self {
            id: item.id,
            done: item.done,
            value: item.value,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TodoBoardResponse {
    pub pending: Vec<TodoResponse>,
    pub done: Vec<TodoResponse>,
}

impl From<TodoBoard> for TodoBoardResponse {
    fn from(board: TodoBoard) -> Self {
        Self {
            pending: board.pending.into_iter().map(TodoResponse::from).collect(),
            done: board.done.into_iter().map(TodoResponse::from).collect(),
        }
    }
}

#[utoipa::path(
    get,
    path = "/todos",
    responses(
        (status = 200, description = "Pending and completed tasks", body = TodoBoardResponse),
        (status = 500, description = "Internal server error"),
    ),
    tag = "todos"
)]
pub async fn get_board(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let board = web::block(move || state.todos.board())
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Ok().json(TodoBoardResponse::from(board)))
}

/// POST /todos
///
/// Blank text is rejected.
#[utoipa::path(
    post,
    path = "/todos",
    request_body = CreateTodoRequest,
    responses(
        (status = 201, description = "Task created", body = TodoResponse),
        (status = 400, description = "Blank task text"),
    ),
    tag = "todos"
)]
pub async fn create_todo(
    state: web::Data<AppState>,
    body: web::Json<CreateTodoRequest>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();
    let item = web::block(move || state.todos.add(&body.value))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Created().json(TodoResponse::from(item)))
}

#[utoipa::path(
    patch,
    path = "/todos/{id}",
    params(("id" = i32, Path, description = "Task id")),
    request_body = UpdateTodoRequest,
    responses(
        (status = 204, description = "Task updated"),
        (status = 404, description = "Task not found"),
    ),
    tag = "todos"
)]
pub async fn update_todo(
    state: web::Data<AppState>,
    path: web::Path<i32>,
    body: web::Json<UpdateTodoRequest>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let done = body.done;
    web::block(move || state.todos.set_done(id, done))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::NoContent().finish())
}
