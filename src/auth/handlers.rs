use axum::{
    extract::{rejection::JsonRejection, State},
    routing::post,
    Json, Router,
};
use tracing::{info, instrument, warn};

use crate::{
    auth::{
        dto::{validate_sign_up, SignUpRequest},
        password::hash_password,
        repo::{self, USER_ROLE},
    },
    error::ApiError,
    state::AppState,
};

pub fn sign_up_routes() -> Router<AppState> {
    Router::new().route("/sign-up/", post(sign_up))
}

/// The one unauthenticated write: bootstrap path for new accounts.
/// Every account created here gets the non-admin role.
#[instrument(skip(state, payload))]
async fn sign_up(
    State(state): State<AppState>,
    payload: Result<Json<SignUpRequest>, JsonRejection>,
) -> Result<&'static str, ApiError> {
    let Json(req) = payload.map_err(|e| {
        warn!(error = %e, "sign-up body rejected");
        ApiError::bad_request("cannot get request body")
    })?;

    let (name, password) = validate_sign_up(&req).map_err(ApiError::BadRequest)?;

    let hash = hash_password(password)?;
    repo::add_user(&state.db, name, &hash, USER_ROLE).await?;

    info!(name, "user signed up");
    Ok("user signed up")
}
