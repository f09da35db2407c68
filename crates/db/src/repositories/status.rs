use crate::models::DbStatusCheck;
use eyre::Result;
use slotdesk_core::models::status::StatusCheck;
use sqlx::{Pool, Postgres};

pub async fn create_status_check(pool: &Pool<Postgres>, check: &StatusCheck) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO status_checks (id, client_name, checked_at)
        VALUES ($1, $2, $3)
        "#,
    )
    .bind(check.id)
    .bind(&check.client_name)
    .bind(check.timestamp)
    .execute(pool)
    .await?;

    Ok(())
}

pub async fn get_status_checks(pool: &Pool<Postgres>, limit: i64) -> Result<Vec<DbStatusCheck>> {
    let rows = sqlx::query_as::<_, DbStatusCheck>(
        r#"
        SELECT id, client_name, checked_at
        FROM status_checks
        ORDER BY checked_at ASC
        LIMIT $1
        "#,
    )
    .bind(limit)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}
