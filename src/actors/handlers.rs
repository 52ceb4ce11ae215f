use axum::{
    extract::{rejection::JsonRejection, Path, State},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use tracing::{info, instrument, warn};

use crate::{
    actors::{
        dto::{validate_actor, Actor, ActorList, ActorResponse},
        repo,
    },
    app::{missing_id, parse_id},
    error::ApiError,
    state::AppState,
};

pub fn actor_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/actor/",
            get(list_actors)
                .post(create_actor)
                .put(missing_id)
                .delete(missing_id),
        )
        .route(
            "/actor/:id",
            get(get_actor).put(update_actor).delete(delete_actor),
        )
}

#[instrument(skip(state))]
async fn list_actors(State(state): State<AppState>) -> Result<Json<ActorList>, ApiError> {
    list_response(&state).await.map(Json)
}

/// A numeric id above zero fetches one actor with its films embedded;
/// zero or negative falls through to the collection, non-numeric is a
/// client error.
#[instrument(skip(state))]
async fn get_actor(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Response, ApiError> {
    let id: i32 = raw_id
        .parse()
        .map_err(|_| ApiError::bad_request("invalid id"))?;
    if id <= 0 {
        return Ok(Json(list_response(&state).await?).into_response());
    }

    let actor = repo::get(&state.db, id).await?;
    let films = repo::films_of(&state.db, id).await?;
    Ok(Json(ActorResponse { actor, films }).into_response())
}

#[instrument(skip(state, payload))]
async fn create_actor(
    State(state): State<AppState>,
    payload: Result<Json<Actor>, JsonRejection>,
) -> Result<&'static str, ApiError> {
    let Json(actor) = payload.map_err(|e| {
        warn!(error = %e, "actor body rejected");
        ApiError::bad_request("cannot get request body")
    })?;
    validate_actor(&actor).map_err(ApiError::BadRequest)?;

    repo::add(&state.db, &actor).await?;
    info!("actor added");
    Ok("actor added")
}

/// Merge-update: the stored record is fetched first and only the fields
/// present in the body overwrite it.
#[instrument(skip(state, payload))]
async fn update_actor(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    payload: Result<Json<Actor>, JsonRejection>,
) -> Result<&'static str, ApiError> {
    let id = parse_id(&raw_id)?;
    let stored = repo::get(&state.db, id).await?;

    let Json(patch) = payload.map_err(|e| {
        warn!(error = %e, "actor body rejected");
        ApiError::bad_request("cannot get request body")
    })?;
    validate_actor(&patch).map_err(ApiError::BadRequest)?;

    let mut merged = stored.merged_with(patch);
    merged.id = id;
    repo::update(&state.db, &merged).await?;
    info!(id, "actor updated");
    Ok("actor updated")
}

#[instrument(skip(state))]
async fn delete_actor(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<&'static str, ApiError> {
    let id = parse_id(&raw_id)?;
    let affected = repo::delete(&state.db, id).await?;
    if affected == 0 {
        return Err(ApiError::NotFound);
    }
    info!(id, "actor deleted");
    Ok("actor deleted")
}

/// Collection retrieval embeds each actor's films, one query per actor.
/// Fine at this scale, deliberately not optimized.
async fn list_response(state: &AppState) -> Result<ActorList, ApiError> {
    let actors = repo::list(&state.db).await?;
    let mut out = Vec::with_capacity(actors.len());
    for actor in actors {
        let films = repo::films_of(&state.db, actor.id).await?;
        out.push(ActorResponse { actor, films });
    }
    Ok(ActorList { actors: out })
}
