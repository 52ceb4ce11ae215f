use sqlx::PgPool;

use crate::{
    actors::dto::Actor,
    films::dto::{Film, SortBy, SortOrder},
};

/// Inserts the film and returns the store-assigned id so the caller can
/// link actors afterwards. The insert and the links are separate
/// statements, not a transaction: a failed link leaves the film row
/// committed.
pub async fn add(db: &PgPool, film: &Film) -> sqlx::Result<i32> {
    sqlx::query_scalar::<_, i32>(
        "INSERT INTO films (name, description, release_date, rating) \
         VALUES ($1, $2, $3, $4) RETURNING id",
    )
    .bind(&film.name)
    .bind(&film.description)
    .bind(film.release_date)
    .bind(film.rating)
    .fetch_one(db)
    .await
}

pub async fn update(db: &PgPool, film: &Film) -> sqlx::Result<()> {
    sqlx::query(
        "UPDATE films SET name = $1, description = $2, release_date = $3, rating = $4 \
         WHERE id = $5",
    )
    .bind(&film.name)
    .bind(&film.description)
    .bind(film.release_date)
    .bind(film.rating)
    .bind(film.id)
    .execute(db)
    .await?;
    Ok(())
}

/// Missing id yields the empty record, same convention as the actor
/// gateway.
pub async fn get(db: &PgPool, id: i32) -> sqlx::Result<Film> {
    let row = sqlx::query_as::<_, Film>(
        "SELECT id, name, description, release_date, rating FROM films WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(db)
    .await?;
    Ok(row.unwrap_or_default())
}

/// Sort key and direction are closed enums validated at the edge; they
/// are the only values ever formatted into the ORDER BY clause.
pub async fn list(db: &PgPool, sort_by: SortBy, sort_order: SortOrder) -> sqlx::Result<Vec<Film>> {
    let query = format!(
        "SELECT id, name, description, release_date, rating FROM films ORDER BY {} {}",
        sort_by.column(),
        sort_order.keyword(),
    );
    sqlx::query_as::<_, Film>(&query).fetch_all(db).await
}

pub async fn delete(db: &PgPool, id: i32) -> sqlx::Result<u64> {
    let result = sqlx::query("DELETE FROM films WHERE id = $1")
        .bind(id)
        .execute(db)
        .await?;
    Ok(result.rows_affected())
}

/// Unconditional insert: no check for an existing identical row, so
/// repeated links create duplicates.
pub async fn link(db: &PgPool, actor_id: i32, film_id: i32) -> sqlx::Result<()> {
    sqlx::query("INSERT INTO films_actors (film_id, actor_id) VALUES ($1, $2)")
        .bind(film_id)
        .bind(actor_id)
        .execute(db)
        .await?;
    Ok(())
}

pub async fn unlink(db: &PgPool, film_id: i32, actor_id: i32) -> sqlx::Result<()> {
    sqlx::query("DELETE FROM films_actors WHERE film_id = $1 AND actor_id = $2")
        .bind(film_id)
        .bind(actor_id)
        .execute(db)
        .await?;
    Ok(())
}

pub async fn actors_of(db: &PgPool, film_id: i32) -> sqlx::Result<Vec<Actor>> {
    sqlx::query_as::<_, Actor>(
        "SELECT actors.id, actors.first_name, actors.last_name, actors.sex, actors.birthdate \
         FROM actors \
         JOIN films_actors ON actors.id = films_actors.actor_id \
         JOIN films ON films_actors.film_id = films.id \
         WHERE films.id = $1",
    )
    .bind(film_id)
    .fetch_all(db)
    .await
}

/// Substring match over film name or actor first name through the join.
/// The fragment is lowercased before binding so the comparison is
/// case-insensitive on both sides. A film matching through several
/// actors appears once per match.
pub async fn search(db: &PgPool, fragment: &str) -> sqlx::Result<Vec<Film>> {
    sqlx::query_as::<_, Film>(
        "SELECT films.id, films.name, films.description, films.release_date, films.rating \
         FROM films \
         JOIN films_actors ON films.id = films_actors.film_id \
         JOIN actors ON films_actors.actor_id = actors.id \
         WHERE LOWER(films.name) LIKE '%' || $1 || '%' \
            OR LOWER(actors.first_name) LIKE '%' || $1 || '%'",
    )
    .bind(fragment.to_lowercase())
    .fetch_all(db)
    .await
}
