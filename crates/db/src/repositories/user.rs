use crate::models::DbUser;
use chrono::Utc;
use eyre::Result;
use slotdesk_core::models::user::NewUser;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

pub async fn create_user(pool: &Pool<Postgres>, user: &NewUser) -> Result<DbUser> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    tracing::debug!(
        "Creating user: id={}, username={}, agency={}",
        id,
        user.username,
        user.agency_name
    );

    let row = sqlx::query_as::<_, DbUser>(
        r#"
        INSERT INTO users (id, username, email, password_hash, first_name, last_name, agency_name, verified, created_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, FALSE, $8)
        RETURNING id, username, email, password_hash, first_name, last_name, agency_name, verified, created_at
        "#,
    )
    .bind(id)
    .bind(&user.username)
    .bind(&user.email)
    .bind(&user.password_hash)
    .bind(&user.first_name)
    .bind(&user.last_name)
    .bind(&user.agency_name)
    .bind(now)
    .fetch_one(pool)
    .await?;

    Ok(row)
}

pub async fn get_user_by_id(pool: &Pool<Postgres>, id: Uuid) -> Result<Option<DbUser>> {
    let row = sqlx::query_as::<_, DbUser>(
        r#"
        SELECT id, username, email, password_hash, first_name, last_name, agency_name, verified, created_at
        FROM users
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(row)
}

pub async fn get_user_by_login(pool: &Pool<Postgres>, login: &str) -> Result<Option<DbUser>> {
    let row = sqlx::query_as::<_, DbUser>(
        r#"
        SELECT id, username, email, password_hash, first_name, last_name, agency_name, verified, created_at
        FROM users
        WHERE username = $1 OR LOWER(email) = LOWER($1)
        LIMIT 1
        "#,
    )
    .bind(login)
    .fetch_optional(pool)
    .await?;

    Ok(row)
}

pub async fn user_exists(pool: &Pool<Postgres>, username: &str, email: &str) -> Result<bool> {
    let exists = sqlx::query_scalar::<_, bool>(
        r#"
        SELECT EXISTS (
            SELECT 1
            FROM users
            WHERE username = $1 OR LOWER(email) = LOWER($2)
        );
        "#,
    )
    .bind(username)
    .bind(email)
    .fetch_one(pool)
    .await?;

    Ok(exists)
}

pub async fn mark_user_verified(pool: &Pool<Postgres>, id: Uuid) -> Result<Option<DbUser>> {
    let row = sqlx::query_as::<_, DbUser>(
        r#"
        UPDATE users
        SET verified = TRUE
        WHERE id = $1
        RETURNING id, username, email, password_hash, first_name, last_name, agency_name, verified, created_at
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(row)
}
