/**
 * Note Handlers
 *
 * HTTP handlers for `/api/v1/notes`. Every route sits behind
 * `auth_middleware`; the authenticated user's id is passed explicitly to
 * `NoteService` as the requester.
 *
 * Path ids are taken as strings and parsed here so a malformed id comes back
 * as `400 VALIDATION_ERROR` in the usual envelope rather than axum's plain
 * text rejection.
 *
 * # Endpoints
 *
 * | Method | Path | Success |
 * |---|---|---|
 * | POST | `/api/v1/notes` | 201 note |
 * | GET | `/api/v1/notes` | 200 notes |
 * | GET | `/api/v1/notes/{id}` | 200 note |
 * | PUT | `/api/v1/notes/{id}` | 200 note at the new version |
 * | DELETE | `/api/v1/notes/{id}` | 204 |
 */

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::Json,
};

use crate::backend::error::{ApiError, InRequest};
use crate::backend::middleware::{AuthUser, RequestId};
use crate::backend::notes::service::NoteService;
use crate::backend::response::ApiResponse;
use crate::shared::{CreateNoteInput, Note, NoteId, UpdateNoteInput};

/// Create a note owned by the caller
pub async fn create_note(
    State(notes): State<NoteService>,
    request_id: RequestId,
    AuthUser(user): AuthUser,
    payload: Result<Json<CreateNoteInput>, JsonRejection>,
) -> Result<ApiResponse<Note>, ApiError> {
    let Json(input) = payload.in_request(&request_id)?;
    let note = notes.create(user.user_id, input).await.in_request(&request_id)?;
    Ok(ApiResponse::created(note, request_id))
}

/// List notes the caller owns or collaborates on
pub async fn list_notes(
    State(notes): State<NoteService>,
    request_id: RequestId,
    AuthUser(user): AuthUser,
) -> Result<ApiResponse<Vec<Note>>, ApiError> {
    let notes = notes.list(user.user_id).await.in_request(&request_id)?;
    Ok(ApiResponse::ok(notes, request_id))
}

pub async fn get_note(
    State(notes): State<NoteService>,
    request_id: RequestId,
    AuthUser(user): AuthUser,
    Path(raw_id): Path<String>,
) -> Result<ApiResponse<Note>, ApiError> {
    let id = NoteId::parse(&raw_id).in_request(&request_id)?;
    let note = notes.get(id, user.user_id).await.in_request(&request_id)?;
    Ok(ApiResponse::ok(note, request_id))
}

/// Full replacement guarded by the version in the body
///
/// # Errors
///
/// * `409 VERSION_CONFLICT` - `version` is not the stored version; re-fetch and retry
/// * `403 ACCESS_DENIED` - Caller is neither owner nor collaborator
/// * `404 NOT_FOUND` - No such note
///
/// # Example Request
///
/// ```http
/// PUT /api/v1/notes/6f1c... HTTP/1.1
/// Authorization: Bearer eyJ...
/// Content-Type: application/json
///
/// {
///   "title": "Groceries",
///   "content": {"type": "doc", "content": []},
///   "rendered_snapshot": "<p></p>",
///   "collaborators": [],
///   "version": 3
/// }
/// ```
pub async fn update_note(
    State(notes): State<NoteService>,
    request_id: RequestId,
    AuthUser(user): AuthUser,
    Path(raw_id): Path<String>,
    payload: Result<Json<UpdateNoteInput>, JsonRejection>,
) -> Result<ApiResponse<Note>, ApiError> {
    let id = NoteId::parse(&raw_id).in_request(&request_id)?;
    let Json(input) = payload.in_request(&request_id)?;

    let note = notes
        .update(id, user.user_id, input)
        .await
        .in_request(&request_id)?;
    Ok(ApiResponse::ok(note, request_id))
}

/// Owner-only delete
pub async fn delete_note(
    State(notes): State<NoteService>,
    request_id: RequestId,
    AuthUser(user): AuthUser,
    Path(raw_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = NoteId::parse(&raw_id).in_request(&request_id)?;
    notes.delete(id, user.user_id).await.in_request(&request_id)?;
    Ok(StatusCode::NO_CONTENT)
}
