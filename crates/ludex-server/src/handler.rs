//! Request handlers: translate multipart/JSON requests into store calls.

use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::response::Json;
use ludex_types::{Game, GameDraft, GameId, GamePatch};
use serde_json::json;

use crate::error::{ServerError, ServerResult};
use crate::router::AppState;

/// Health check handler.
pub async fn health_handler() -> Json<serde_json::Value> {
    Json(json!({
        "name": "ludex-server",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

pub async fn list_games(State(state): State<AppState>) -> ServerResult<Json<Vec<Game>>> {
    Ok(Json(state.shelf.list()?))
}

pub async fn create_game(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> ServerResult<(StatusCode, Json<Game>)> {
    let form = read_form(&state, &mut multipart).await?;
    // The file field is checked before the text fields, so a request
    // missing everything still gets the "no image" answer.
    if form.image.is_none() {
        return Err(ServerError::MissingImage);
    }
    let draft = GameDraft {
        image: form.image,
        title: form.title.unwrap_or_default(),
        status: form
            .status
            .ok_or_else(|| ServerError::Validation("status is required".into()))?,
        hours: form
            .hours
            .ok_or_else(|| ServerError::Validation("hours is required".into()))?,
        extra: form.extra.filter(|extra| !extra.is_empty()),
    };
    let game = state.shelf.add(draft)?;
    Ok((StatusCode::CREATED, Json(game)))
}

pub async fn update_game(
    State(state): State<AppState>,
    Path(id): Path<String>,
    mut multipart: Multipart,
) -> ServerResult<Json<Game>> {
    let id = parse_id(&id)?;
    let form = read_form(&state, &mut multipart).await?;
    let patch = GamePatch {
        image: form.image,
        // An empty title field means "leave it alone", not "blank it".
        title: form.title.filter(|title| !title.is_empty()),
        status: form.status,
        hours: form.hours,
        // For notes the empty value is meaningful: it clears them.
        extra: form.extra.map(|extra| {
            if extra.is_empty() {
                None
            } else {
                Some(extra)
            }
        }),
    };
    Ok(Json(state.shelf.update(id, patch)?))
}

pub async fn delete_game(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ServerResult<StatusCode> {
    let id = parse_id(&id)?;
    state.shelf.remove(id)?;
    Ok(StatusCode::NO_CONTENT)
}

/// A non-numeric id can never match an entry, so it reads as not-found
/// rather than as a malformed request.
fn parse_id(raw: &str) -> ServerResult<GameId> {
    raw.parse::<GameId>().map_err(|_| ServerError::NotFound)
}

#[derive(Default)]
struct UploadForm {
    /// Generated blob name of the uploaded file, if one was sent.
    image: Option<String>,
    title: Option<String>,
    status: Option<ludex_types::GameStatus>,
    hours: Option<f64>,
    extra: Option<String>,
}

/// Drain the multipart stream, storing the file field as it arrives.
///
/// The upload is materialized in the image store before any record
/// operation runs, so the store call only ever sees a resolved blob name.
/// Unknown fields are ignored; empty `status`/`hours` values count as
/// absent (browsers send empty strings for untouched inputs).
async fn read_form(state: &AppState, multipart: &mut Multipart) -> ServerResult<UploadForm> {
    let mut form = UploadForm::default();
    while let Some(field) = multipart.next_field().await? {
        match field.name() {
            Some("image") => {
                let original = field.file_name().unwrap_or("upload").to_string();
                let bytes = field.bytes().await?;
                form.image = Some(state.images.put(&original, &bytes)?);
            }
            Some("title") => form.title = Some(field.text().await?),
            Some("status") => {
                let raw = field.text().await?;
                if !raw.is_empty() {
                    form.status = Some(
                        raw.parse()
                            .map_err(|err: ludex_types::TypeError| {
                                ServerError::Validation(err.to_string())
                            })?,
                    );
                }
            }
            Some("hours") => {
                let raw = field.text().await?;
                if !raw.is_empty() {
                    form.hours = Some(raw.trim().parse().map_err(|_| {
                        ServerError::Validation(format!("hours must be a number, got {raw:?}"))
                    })?);
                }
            }
            Some("extra") => form.extra = Some(field.text().await?),
            _ => {}
        }
    }
    Ok(form)
}
