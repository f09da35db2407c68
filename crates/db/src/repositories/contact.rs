use crate::models::DbContactRequest;
use eyre::Result;
use slotdesk_core::models::contact::ContactRequest;
use sqlx::{Pool, Postgres};

pub async fn create_contact_request(pool: &Pool<Postgres>, contact: &ContactRequest) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO contact_requests (id, name, email, phone, service, message, created_at, status)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        "#,
    )
    .bind(contact.id)
    .bind(&contact.name)
    .bind(&contact.email)
    .bind(contact.phone.as_deref())
    .bind(&contact.service)
    .bind(&contact.message)
    .bind(contact.created_at)
    .bind(&contact.status)
    .execute(pool)
    .await?;

    Ok(())
}

pub async fn get_contact_requests(pool: &Pool<Postgres>, limit: i64) -> Result<Vec<DbContactRequest>> {
    let rows = sqlx::query_as::<_, DbContactRequest>(
        r#"
        SELECT id, name, email, phone, service, message, created_at, status
        FROM contact_requests
        ORDER BY created_at ASC
        LIMIT $1
        "#,
    )
    .bind(limit)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}
