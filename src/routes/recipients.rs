use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

use crate::{
    domain::{
        Recipient, RecipientDetails, RecipientId, RecipientUpdate, User, UserId, ValidationErrors,
        validate,
    },
    operations::RecipientError,
    startup::AppState,
};

#[tracing::instrument(name = "Listing recipients", skip(app_state))]
pub async fn list_recipients(
    State(app_state): State<Arc<AppState>>,
    Path(user_id): Path<UserId>,
) -> Result<Json<Vec<Recipient>>, RecipientApiError> {
    let recipients = app_state
        .operations
        .fetch_recipients(Some(user_id))
        .await?;
    Ok(Json(recipients))
}

#[tracing::instrument(name = "Creating a recipient", skip(app_state, candidate))]
pub async fn create_recipient(
    State(app_state): State<Arc<AppState>>,
    Path(user_id): Path<UserId>,
    Json(candidate): Json<RecipientDetails>,
) -> Result<impl IntoResponse, RecipientApiError> {
    check(&candidate)?;
    let recipient = app_state
        .operations
        .add_recipient(&User::new(user_id), candidate)
        .await?;
    Ok((StatusCode::CREATED, Json(recipient)))
}

#[tracing::instrument(
    name = "Updating recipient details",
    skip(app_state, updated_recipient)
)]
pub async fn update_recipient(
    State(app_state): State<Arc<AppState>>,
    Path((user_id, recipient_id)): Path<(UserId, RecipientId)>,
    Json(updated_recipient): Json<RecipientDetails>,
) -> Result<Json<Recipient>, RecipientApiError> {
    // The body is partial, so the rules run against the record it would produce.
    let mut merged = app_state
        .operations
        .fetch_recipients(Some(user_id))
        .await?
        .into_iter()
        .find(|recipient| recipient.recipient_id() == recipient_id)
        .ok_or(RecipientApiError::NotOwned(recipient_id))?
        .details;
    merged.apply(&updated_recipient);
    check(&merged)?;

    let recipient = app_state
        .operations
        .update_recipient(
            &User::new(user_id),
            RecipientUpdate {
                recipient_id,
                updated_recipient,
            },
        )
        .await?;
    Ok(Json(recipient))
}

#[tracing::instrument(name = "Removing a recipient", skip(app_state))]
pub async fn delete_recipient(
    State(app_state): State<Arc<AppState>>,
    Path((user_id, recipient_id)): Path<(UserId, RecipientId)>,
) -> Result<StatusCode, RecipientApiError> {
    // The store deletes by id alone, so ownership is checked here first.
    let owned = app_state
        .operations
        .fetch_recipients(Some(user_id))
        .await?
        .iter()
        .any(|recipient| recipient.recipient_id() == recipient_id);
    if !owned {
        return Err(RecipientApiError::NotOwned(recipient_id));
    }

    app_state.operations.delete_recipient(recipient_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

fn check(candidate: &RecipientDetails) -> Result<(), RecipientApiError> {
    let errors = validate(candidate);
    if errors.is_valid() {
        Ok(())
    } else {
        Err(RecipientApiError::InvalidRecipient(errors))
    }
}

#[derive(Serialize)]
struct InvalidRecipientBody {
    errors: ValidationErrors,
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

#[derive(thiserror::Error, Debug)]
pub enum RecipientApiError {
    #[error("invalid recipient, {} field(s) rejected", .0.len())]
    InvalidRecipient(ValidationErrors),
    #[error("recipient {0} was not found")]
    NotOwned(RecipientId),
    #[error(transparent)]
    Operation(#[from] RecipientError),
}

impl IntoResponse for RecipientApiError {
    fn into_response(self) -> Response {
        tracing::error!("{}", self);
        match self {
            RecipientApiError::InvalidRecipient(errors) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(InvalidRecipientBody { errors }),
            )
                .into_response(),
            RecipientApiError::NotOwned(recipient_id) => (
                StatusCode::NOT_FOUND,
                Json(ErrorBody {
                    error: format!("recipient {} was not found", recipient_id),
                }),
            )
                .into_response(),
            RecipientApiError::Operation(e) => {
                let status = if e.is_not_found() {
                    StatusCode::NOT_FOUND
                } else {
                    StatusCode::INTERNAL_SERVER_ERROR
                };
                (status, Json(ErrorBody { error: e.to_string() })).into_response()
            }
        }
    }
}
