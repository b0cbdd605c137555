use axum::Json;
use axum::body::Bytes;
use axum::extract::rejection::PathRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use tracing::{debug, error};

use super::AppState;
use super::errors::AppError;
use crate::db::{BirdStore, StoreError};
use crate::models::{Bird, NewBird};

const LIST_FAILED: &str = "Error al obtener los pájaros";
const CREATE_FAILED: &str = "Error al crear el pájaro";
const UPDATE_FAILED: &str = "Error al actualizar el pájaro";

/// Run a store call on the blocking pool so rusqlite I/O stays off the async workers.
async fn with_store<T, F>(state: &AppState, op: F) -> Result<T, StoreError>
where
    F: FnOnce(&dyn BirdStore) -> Result<T, StoreError> + Send + 'static,
    T: Send + 'static,
{
    let store = state.store.clone();
    tokio::task::spawn_blocking(move || op(store.as_ref())).await?
}

/// Log the store error and swap it for the route's generic message.
fn store_failure(
    context: &'static str,
    message: &'static str,
) -> impl FnOnce(StoreError) -> AppError {
    move |e| {
        error!(error = %e, "{context}");
        AppError::Internal(message)
    }
}

fn parse_body(body: &[u8]) -> Result<NewBird, AppError> {
    serde_json::from_slice(body).map_err(|e| AppError::BadRequest(e.to_string()))
}

fn parse_id(raw: &str) -> Result<i64, AppError> {
    raw.parse()
        .map_err(|_| AppError::BadRequest(format!("invalid id: {raw}")))
}

/// GET /pajaros
pub async fn list_birds(State(state): State<AppState>) -> Result<Json<Vec<Bird>>, AppError> {
    let birds = with_store(&state, |store| store.list_all())
        .await
        .map_err(store_failure("failed to list birds", LIST_FAILED))?;
    Ok(Json(birds))
}

/// GET /pajaros/hembras
pub async fn list_female_birds(
    State(state): State<AppState>,
) -> Result<Json<Vec<Bird>>, AppError> {
    let birds = with_store(&state, |store| store.list_by_flag(true))
        .await
        .map_err(store_failure("failed to list female birds", LIST_FAILED))?;
    Ok(Json(birds))
}

/// POST /pajaros
pub async fn create_bird(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<(StatusCode, Json<Bird>), AppError> {
    let candidate = parse_body(&body)?;
    let bird = with_store(&state, move |store| store.insert(&candidate))
        .await
        .map_err(store_failure("failed to create bird", CREATE_FAILED))?;
    debug!(id = bird.id, "created bird");
    Ok((StatusCode::CREATED, Json(bird)))
}

/// PUT /pajaros/{id}
///
/// Responds with the submitted fields under the path id, whether or not a
/// record with that id existed.
pub async fn update_bird(
    State(state): State<AppState>,
    raw_id: Result<Path<String>, PathRejection>,
    body: Bytes,
) -> Result<Json<Bird>, AppError> {
    let Path(raw_id) = raw_id.map_err(|e| AppError::BadRequest(e.body_text()))?;
    let id = parse_id(&raw_id)?;
    let replacement = parse_body(&body)?;
    let stored = replacement.clone();
    with_store(&state, move |store| store.update(id, &stored))
        .await
        .map_err(store_failure("failed to update bird", UPDATE_FAILED))?;
    Ok(Json(replacement.with_id(id)))
}

/// PUT /pajaros/hembras
///
/// The listing path shadows `/pajaros/{id}`; "hembras" is just another
/// non-integer id here.
pub async fn update_listing_path() -> AppError {
    AppError::BadRequest("invalid id: hembras".to_string())
}
