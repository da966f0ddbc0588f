//! Registration and account lookup endpoints.

use api_types::user::{UserRegister, UserView};
use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};

use crate::{ServerError, server::ServerState};

fn map_user(user: engine::User) -> UserView {
    UserView {
        id: user.id,
        username: user.username,
        roles: user.roles.into_iter().collect(),
    }
}

/// Register a new account. This is the only endpoint reachable without
/// credentials.
pub async fn register(
    State(state): State<ServerState>,
    payload: Result<Json<UserRegister>, JsonRejection>,
) -> Result<(StatusCode, Json<UserView>), ServerError> {
    let Json(payload) = payload?;
    let user = state
        .engine
        .register_user(&payload.username, &payload.password)
        .await?;
    Ok((StatusCode::CREATED, Json(map_user(user))))
}

pub async fn get(
    State(state): State<ServerState>,
    Path(username): Path<String>,
) -> Result<Json<UserView>, ServerError> {
    let user = state.engine.user_by_username(&username).await?;
    Ok(Json(map_user(user)))
}
