use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use tracing::{error, info, instrument, warn};

use crate::{
    app::{missing_id, parse_id},
    error::ApiError,
    films::{
        dto::{validate_film, FilmPost, FilmPut, FilmResponse, FilmsSearch, SortBy, SortOrder},
        repo,
    },
    state::AppState,
};

type QueryParams = Query<Vec<(String, String)>>;

pub fn film_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/film/",
            get(list_films)
                .post(create_film)
                .put(missing_id)
                .delete(missing_id),
        )
        .route(
            "/film/:id",
            get(get_film).put(update_film).delete(delete_film),
        )
        .route("/search/", get(search_films))
}

#[instrument(skip(state, params))]
async fn list_films(
    State(state): State<AppState>,
    Query(params): QueryParams,
) -> Result<Json<Vec<FilmResponse>>, ApiError> {
    list_response(&state, &params).await.map(Json)
}

/// Unlike the actor route, a non-numeric id segment is not an error:
/// anything that does not parse to a positive id serves the collection.
#[instrument(skip(state, params))]
async fn get_film(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    Query(params): QueryParams,
) -> Result<Response, ApiError> {
    match raw_id.parse::<i32>() {
        Ok(id) if id > 0 => {
            let film = repo::get(&state.db, id).await?;
            let actors = repo::actors_of(&state.db, id).await?;
            Ok(Json(FilmResponse { film, actors }).into_response())
        }
        _ => Ok(Json(list_response(&state, &params).await?).into_response()),
    }
}

/// Creates the film row, then links the requested actors one by one.
/// A failed link aborts with a client error but the film row stays
/// committed; there is no transaction around the sequence.
#[instrument(skip(state, payload))]
async fn create_film(
    State(state): State<AppState>,
    payload: Result<Json<FilmPost>, JsonRejection>,
) -> Result<&'static str, ApiError> {
    let Json(body) = payload.map_err(|e| {
        warn!(error = %e, "film body rejected");
        ApiError::bad_request("cannot get request body")
    })?;
    validate_film(&body.film).map_err(ApiError::BadRequest)?;

    let film_id = repo::add(&state.db, &body.film).await?;
    for actor_id in body.actors_ids {
        if let Err(e) = repo::link(&state.db, actor_id, film_id).await {
            error!(error = %e, actor_id, film_id, "cannot link actor");
            return Err(ApiError::BadRequest(format!(
                "cannot add actor with id {actor_id}"
            )));
        }
    }
    info!(film_id, "film added");
    Ok("film added")
}

/// Merge-update followed by link/unlink application. Individual link and
/// unlink failures are logged and skipped rather than surfaced, the only
/// best-effort path in the service.
#[instrument(skip(state, payload))]
async fn update_film(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    payload: Result<Json<FilmPut>, JsonRejection>,
) -> Result<&'static str, ApiError> {
    let id = parse_id(&raw_id)?;
    let stored = repo::get(&state.db, id).await?;

    let Json(body) = payload.map_err(|e| {
        warn!(error = %e, "film body rejected");
        ApiError::bad_request("cannot get request body")
    })?;
    validate_film(&body.film).map_err(ApiError::BadRequest)?;

    let mut merged = stored.merged_with(body.film);
    merged.id = id;
    repo::update(&state.db, &merged).await?;

    for actor_id in body.actors_ids {
        if let Err(e) = repo::link(&state.db, actor_id, id).await {
            error!(error = %e, actor_id, film_id = id, "cannot link actor");
        }
    }
    for actor_id in body.remove_actors_ids {
        if let Err(e) = repo::unlink(&state.db, id, actor_id).await {
            error!(error = %e, actor_id, film_id = id, "cannot unlink actor");
        }
    }
    info!(id, "film updated");
    Ok("film updated")
}

#[instrument(skip(state))]
async fn delete_film(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<&'static str, ApiError> {
    let id = parse_id(&raw_id)?;
    let affected = repo::delete(&state.db, id).await?;
    if affected == 0 {
        return Err(ApiError::NotFound);
    }
    info!(id, "film deleted");
    Ok("film deleted")
}

#[instrument(skip(state, params))]
async fn search_films(
    State(state): State<AppState>,
    Query(params): QueryParams,
) -> Result<Json<FilmsSearch>, ApiError> {
    let Some(fragment) = single_param(&params, "search_by") else {
        return Err(ApiError::bad_request("invalid query param"));
    };
    let films = repo::search(&state.db, fragment).await?;
    Ok(Json(FilmsSearch { films }))
}

/// Each film in the collection embeds its cast, one query per film.
async fn list_response(
    state: &AppState,
    params: &[(String, String)],
) -> Result<Vec<FilmResponse>, ApiError> {
    let sort_by = SortBy::from_query(single_param(params, "sort_by"));
    let sort_order = SortOrder::from_query(single_param(params, "sort_order"));

    let films = repo::list(&state.db, sort_by, sort_order).await?;
    let mut out = Vec::with_capacity(films.len());
    for film in films {
        let actors = repo::actors_of(&state.db, film.id).await?;
        out.push(FilmResponse { film, actors });
    }
    Ok(out)
}

/// A query key counts only when it appears exactly once; zero or several
/// occurrences read as absent.
fn single_param<'a>(params: &'a [(String, String)], key: &str) -> Option<&'a str> {
    let mut values = params.iter().filter(|(k, _)| k == key);
    let first = values.next()?;
    if values.next().is_some() {
        return None;
    }
    Some(first.1.as_str())
}
