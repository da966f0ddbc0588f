//! Entry API endpoints.

use api_types::entry::{EntryNew, EntryView};
use axum::{
    Extension, Json,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
    http::StatusCode,
};
use chrono::NaiveDate;
use engine::EntryDraft;

use crate::{
    AuthUser, ServerError,
    categories::{from_api, to_api},
    server::ServerState,
};

fn map_entry(entry: engine::Entry) -> EntryView {
    EntryView {
        id: entry.id,
        price: entry.price,
        name: entry.name,
        date: entry.date,
        category: to_api(entry.category),
        user_id: entry.user_id,
    }
}

fn map_entries(entries: Vec<engine::Entry>) -> Json<Vec<EntryView>> {
    Json(entries.into_iter().map(map_entry).collect())
}

pub async fn list(
    Extension(AuthUser(user)): Extension<AuthUser>,
    State(state): State<ServerState>,
) -> Result<Json<Vec<EntryView>>, ServerError> {
    let entries = state.engine.entries(user.id).await?;
    Ok(map_entries(entries))
}

/// Store an entry supplied by the caller.
pub async fn entry_new(
    Extension(AuthUser(user)): Extension<AuthUser>,
    State(state): State<ServerState>,
    payload: Result<Json<EntryNew>, JsonRejection>,
) -> Result<(StatusCode, Json<EntryView>), ServerError> {
    let Json(payload) = payload?;
    let draft = EntryDraft {
        price: payload.price,
        name: payload.name,
        date: payload.date,
        category: payload.category.map(from_api),
    };
    let entry = state.engine.add_entry(user.id, draft).await?;
    Ok((StatusCode::CREATED, Json(map_entry(entry))))
}

/// Generate and store a random entry.
pub async fn random(
    Extension(AuthUser(user)): Extension<AuthUser>,
    State(state): State<ServerState>,
) -> Result<(StatusCode, Json<EntryView>), ServerError> {
    let entry = state.engine.create_random_entry(user.id).await?;
    Ok((StatusCode::CREATED, Json(map_entry(entry))))
}

pub async fn between_dates(
    Extension(AuthUser(user)): Extension<AuthUser>,
    State(state): State<ServerState>,
    path: Result<Path<(NaiveDate, NaiveDate)>, PathRejection>,
) -> Result<Json<Vec<EntryView>>, ServerError> {
    let Path((from, to)) = path?;
    let entries = state
        .engine
        .entries_between_dates(user.id, from, to)
        .await?;
    Ok(map_entries(entries))
}

pub async fn between_prices(
    Extension(AuthUser(user)): Extension<AuthUser>,
    State(state): State<ServerState>,
    path: Result<Path<(i32, i32)>, PathRejection>,
) -> Result<Json<Vec<EntryView>>, ServerError> {
    let Path((from, to)) = path?;
    let entries = state
        .engine
        .entries_between_prices(user.id, from, to)
        .await?;
    Ok(map_entries(entries))
}

/// Recategorize an entry. The category is matched case-insensitively.
pub async fn update_category(
    Extension(AuthUser(user)): Extension<AuthUser>,
    State(state): State<ServerState>,
    path: Result<Path<(i64, String)>, PathRejection>,
) -> Result<Json<EntryView>, ServerError> {
    let Path((id, category)) = path?;
    let category = engine::Category::try_from(category.as_str())?;
    let entry = state
        .engine
        .update_entry_category(user.id, id, category)
        .await?;
    Ok(Json(map_entry(entry)))
}
