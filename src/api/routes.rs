//! API route definitions.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::api::state::AppState;
use crate::queue::{Client, PriorityClass, QueueError};

pub fn queue_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(welcome))
        .route("/queue", get(list_queue).post(add_client).put(rotate_queue))
        .route("/queue/{position}", get(get_client).delete(remove_client))
}

/// Body of `POST /queue`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AddClientRequest {
    name: String,
    priority_class: PriorityClass,
}

/// Maps core queue failures onto HTTP statuses.
struct ApiError(QueueError);

impl From<QueueError> for ApiError {
    fn from(err: QueueError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self.0 {
            QueueError::NameTooLong { .. } => StatusCode::BAD_REQUEST,
            QueueError::PositionOutOfRange { .. } => StatusCode::NOT_FOUND,
        };
        (status, Json(json!({ "error": self.0.to_string() }))).into_response()
    }
}

async fn welcome() -> Json<Value> {
    Json(json!({
        "message": "Welcome to the waiting line. Please wait for your turn."
    }))
}

async fn list_queue(State(state): State<AppState>) -> Json<Vec<Client>> {
    let waiting = state.queue.write().await.list_waiting();
    Json(waiting)
}

async fn get_client(
    State(state): State<AppState>,
    Path(position): Path<i64>,
) -> Result<Json<Client>, ApiError> {
    let client = state.queue.read().await.get_by_position(position)?;
    Ok(Json(client))
}

async fn add_client(
    State(state): State<AppState>,
    Json(req): Json<AddClientRequest>,
) -> Result<Json<Client>, ApiError> {
    let client = state.queue.write().await.add(&req.name, req.priority_class)?;
    tracing::info!(
        name = %client.name,
        class = ?client.priority_class,
        position = ?client.position,
        "client joined the line"
    );
    Ok(Json(client))
}

async fn rotate_queue(State(state): State<AppState>) -> Json<Vec<Client>> {
    let waiting = state.queue.write().await.rotate();
    tracing::info!(waiting = waiting.len(), "rotated the line");
    Json(waiting)
}

async fn remove_client(
    State(state): State<AppState>,
    Path(position): Path<i64>,
) -> Result<Json<Client>, ApiError> {
    let client = state.queue.write().await.remove_by_position(position)?;
    tracing::info!(name = %client.name, position, "client removed from the line");
    Ok(Json(client))
}
