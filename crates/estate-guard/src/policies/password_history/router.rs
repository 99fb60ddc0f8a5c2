use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tokio::task::JoinError;
use tracing::error;

use super::hasher::CredentialHasher;
use super::repository::{CredentialRecord, CredentialRepository, RepositoryError};
use super::service::{PasswordRotationError, PasswordRotationService};
use crate::identity::UserId;

/// Body accepted by both credential endpoints.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PasswordRequest {
    pub password: String,
}

/// Sanitized credential state; hashes never leave the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CredentialStatusView {
    pub user_id: UserId,
    pub history_len: usize,
    pub version: u64,
}

impl From<&CredentialRecord> for CredentialStatusView {
    fn from(record: &CredentialRecord) -> Self {
        Self {
            user_id: record.user_id.clone(),
            history_len: record.history.len(),
            version: record.version,
        }
    }
}

/// Router builder exposing credential creation and rotation.
pub fn password_router<R, H>(service: Arc<PasswordRotationService<R, H>>) -> Router
where
    R: CredentialRepository + 'static,
    H: CredentialHasher + 'static,
{
    Router::new()
        .route(
            "/api/v1/accounts/:user_id/credentials",
            post(create_handler::<R, H>),
        )
        .route(
            "/api/v1/accounts/:user_id/password",
            post(change_handler::<R, H>),
        )
        .with_state(service)
}

pub(crate) async fn create_handler<R, H>(
    State(service): State<Arc<PasswordRotationService<R, H>>>,
    Path(user_id): Path<String>,
    axum::Json(request): axum::Json<PasswordRequest>,
) -> Response
where
    R: CredentialRepository + 'static,
    H: CredentialHasher + 'static,
{
    let user_id = UserId(user_id);
    // Argon2 is CPU bound; keep it off the async workers.
    let outcome = tokio::task::spawn_blocking(move || {
        service.set_initial_password(&user_id, &request.password)
    })
    .await;

    match outcome {
        Ok(Ok(record)) => (
            StatusCode::CREATED,
            axum::Json(CredentialStatusView::from(&record)),
        )
            .into_response(),
        Ok(Err(error)) => error_response(error),
        Err(join_error) => worker_failure(join_error),
    }
}

pub(crate) async fn change_handler<R, H>(
    State(service): State<Arc<PasswordRotationService<R, H>>>,
    Path(user_id): Path<String>,
    axum::Json(request): axum::Json<PasswordRequest>,
) -> Response
where
    R: CredentialRepository + 'static,
    H: CredentialHasher + 'static,
{
    let user_id = UserId(user_id);
    let outcome = tokio::task::spawn_blocking(move || {
        service.change_password(&user_id, &request.password)
    })
    .await;

    match outcome {
        Ok(Ok(record)) => (
            StatusCode::OK,
            axum::Json(CredentialStatusView::from(&record)),
        )
            .into_response(),
        Ok(Err(error)) => error_response(error),
        Err(join_error) => worker_failure(join_error),
    }
}

fn error_response(error: PasswordRotationError) -> Response {
    let (status, code) = match &error {
        PasswordRotationError::PasswordReused => (StatusCode::CONFLICT, "password_reused"),
        PasswordRotationError::Repository(RepositoryError::NotFound) => {
            (StatusCode::NOT_FOUND, "account_not_found")
        }
        PasswordRotationError::Repository(RepositoryError::Conflict) => {
            (StatusCode::CONFLICT, "credentials_exist")
        }
        PasswordRotationError::Repository(RepositoryError::VersionConflict { .. }) => {
            (StatusCode::CONFLICT, "concurrent_update")
        }
        PasswordRotationError::Repository(RepositoryError::Unavailable(_))
        | PasswordRotationError::Hash(_) => (StatusCode::INTERNAL_SERVER_ERROR, "internal"),
    };

    let payload = json!({
        "error": code,
        "detail": error.to_string(),
    });
    (status, axum::Json(payload)).into_response()
}

fn worker_failure(join_error: JoinError) -> Response {
    error!(error = %join_error, "password hashing task failed");
    let payload = json!({
        "error": "internal",
        "detail": "password hashing task failed",
    });
    (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
}
