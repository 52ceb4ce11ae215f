use sqlx::PgPool;

use crate::{actors::dto::Actor, films::dto::Film};

pub async fn add(db: &PgPool, actor: &Actor) -> sqlx::Result<()> {
    sqlx::query("INSERT INTO actors (first_name, last_name, sex, birthdate) VALUES ($1, $2, $3, $4)")
        .bind(&actor.first_name)
        .bind(&actor.last_name)
        .bind(&actor.sex)
        .bind(actor.birthdate)
        .execute(db)
        .await?;
    Ok(())
}

/// Full-row write of an already merged record.
pub async fn update(db: &PgPool, actor: &Actor) -> sqlx::Result<()> {
    sqlx::query(
        "UPDATE actors SET first_name = $1, last_name = $2, sex = $3, birthdate = $4 WHERE id = $5",
    )
    .bind(&actor.first_name)
    .bind(&actor.last_name)
    .bind(&actor.sex)
    .bind(actor.birthdate)
    .bind(actor.id)
    .execute(db)
    .await?;
    Ok(())
}

/// A missing id is not an error here: the caller gets the all-unset
/// record with id 0 and decides what that means.
pub async fn get(db: &PgPool, id: i32) -> sqlx::Result<Actor> {
    let row = sqlx::query_as::<_, Actor>(
        "SELECT id, first_name, last_name, sex, birthdate FROM actors WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(db)
    .await?;
    Ok(row.unwrap_or_default())
}

pub async fn list(db: &PgPool) -> sqlx::Result<Vec<Actor>> {
    sqlx::query_as::<_, Actor>("SELECT id, first_name, last_name, sex, birthdate FROM actors")
        .fetch_all(db)
        .await
}

pub async fn delete(db: &PgPool, id: i32) -> sqlx::Result<u64> {
    let result = sqlx::query("DELETE FROM actors WHERE id = $1")
        .bind(id)
        .execute(db)
        .await?;
    Ok(result.rows_affected())
}

/// Films the actor is linked to, in store order.
pub async fn films_of(db: &PgPool, actor_id: i32) -> sqlx::Result<Vec<Film>> {
    sqlx::query_as::<_, Film>(
        "SELECT films.id, films.name, films.description, films.release_date, films.rating \
         FROM films \
         JOIN films_actors ON films.id = films_actors.film_id \
         JOIN actors ON films_actors.actor_id = actors.id \
         WHERE actors.id = $1",
    )
    .bind(actor_id)
    .fetch_all(db)
    .await
}
