//! HTTP routing: the thin gateway between transport and services
//!
//! Handlers deserialize the request, call one service operation with the
//! caller's identity, and serialize the result. All error translation
//! happens in [`crate::error::ServiceError`].

use axum::{
    Extension, Router,
    extract::{Path, State},
    http::{StatusCode, Uri},
    middleware,
    response::IntoResponse,
    routing::{get, post, put},
};
use common::models::{
    DeleteResponse, LoginRequest, RegisterRequest, TaskRequest, UpdateProfileRequest,
};
use serde_json::json;
use uuid::Uuid;

use crate::error::ServiceError;
use crate::extract::Json;
use crate::middleware::{CurrentUser, auth_middleware};
use crate::state::AppState;

/// Create the router for the API service
pub fn create_router(state: AppState) -> Router {
    let protected = Router::new()
        .route("/api/users/me", get(get_profile).put(update_profile))
        .route("/api/tasks", get(list_tasks).post(create_task))
        .route("/api/tasks/:id", put(update_task).delete(delete_task))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    Router::new()
        .route("/health", get(health_check))
        .route("/api/auth/register", post(register))
        .route("/api/auth/login", post(login))
        .merge(protected)
        .fallback(not_found)
        .with_state(state)
}

/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "service": "api"
    }))
}

/// Structured 404 for unmatched paths
async fn not_found(uri: Uri) -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "success": false,
            "message": "Endpoint not found",
            "path": uri.path(),
        })),
    )
}

pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    let user = state
        .auth
        .register(
            payload.name.as_deref().unwrap_or(""),
            payload.email.as_deref().unwrap_or(""),
            payload.password.as_deref().unwrap_or(""),
        )
        .await?;

    Ok((StatusCode::CREATED, Json(user)))
}

pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    let response = state
        .auth
        .login(
            payload.email.as_deref().unwrap_or(""),
            payload.password.as_deref().unwrap_or(""),
        )
        .await?;
    Ok(Json(response))
}

pub async fn get_profile(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
) -> Result<impl IntoResponse, ServiceError> {
    let profile = state.profile.get_profile(current.id).await?;
    Ok(Json(profile))
}

pub async fn update_profile(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Json(payload): Json<UpdateProfileRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    let profile = state
        .profile
        .update_profile(current.id, payload.name, payload.email)
        .await?;
    Ok(Json(profile))
}

pub async fn list_tasks(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
) -> Result<impl IntoResponse, ServiceError> {
    let tasks = state.tasks.list(current.id).await?;
    Ok(Json(tasks))
}

pub async fn create_task(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Json(payload): Json<TaskRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    let task = state
        .tasks
        .create(current.id, payload.title.as_deref().unwrap_or(""))
        .await?;
    Ok((StatusCode::CREATED, Json(task)))
}

pub async fn update_task(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
    Json(payload): Json<TaskRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    let task = state
        .tasks
        .update(current.id, id, payload.title.as_deref().unwrap_or(""))
        .await?;
    Ok(Json(task))
}

pub async fn delete_task(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ServiceError> {
    state.tasks.delete(current.id, id).await?;
    Ok(Json(DeleteResponse {
        message: "Task deleted".to_string(),
    }))
}
