use serde::Serialize;
use sqlx::{FromRow, PgPool};

pub const ADMIN_ROLE: &str = "admin";
pub const USER_ROLE: &str = "user";

/// Credential record. Created once at sign-up, never updated or deleted
/// through this surface.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct User {
    pub id: i32,
    pub name: String,
    #[serde(skip_serializing)]
    pub password: String,
    pub role: String,
}

pub async fn add_user(
    db: &PgPool,
    name: &str,
    password_hash: &str,
    role: &str,
) -> sqlx::Result<()> {
    sqlx::query("INSERT INTO users (name, password, role) VALUES ($1, $2, $3)")
        .bind(name)
        .bind(password_hash)
        .bind(role)
        .execute(db)
        .await?;
    Ok(())
}

pub async fn get_user(db: &PgPool, name: &str) -> sqlx::Result<Option<User>> {
    sqlx::query_as::<_, User>("SELECT id, name, password, role FROM users WHERE name = $1")
        .bind(name)
        .fetch_optional(db)
        .await
}
