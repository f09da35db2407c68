use crate::models::DbAppointment;
use chrono::{NaiveDate, NaiveTime};
use eyre::Result;
use slotdesk_core::models::appointment::{Appointment, AppointmentStatus};
use sqlx::{PgExecutor, Pool, Postgres};
use uuid::Uuid;

const COLUMNS: &str = "id, user_id, user_name, agency_name, user_email, slot_date, slot_time, \
                       duration_minutes, notes, status, created_at";

pub async fn create_appointment<'e, E>(executor: E, appointment: &Appointment) -> Result<DbAppointment>
where
    E: PgExecutor<'e>,
{
    tracing::debug!(
        "Creating appointment: id={}, user_id={}, date={}, time={}",
        appointment.id,
        appointment.user_id,
        appointment.date,
        appointment.time
    );

    let row = sqlx::query_as::<_, DbAppointment>(&format!(
        r#"
        INSERT INTO appointments ({COLUMNS})
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
        RETURNING {COLUMNS}
        "#
    ))
    .bind(appointment.id)
    .bind(appointment.user_id)
    .bind(&appointment.user_name)
    .bind(&appointment.agency_name)
    .bind(&appointment.user_email)
    .bind(appointment.date)
    .bind(appointment.time)
    .bind(appointment.duration_minutes)
    .bind(appointment.notes.as_deref())
    .bind(appointment.status.as_str())
    .bind(appointment.created_at)
    .fetch_one(executor)
    .await?;

    Ok(row)
}

/// Serializes writers for one user's day until the surrounding transaction ends.
pub async fn lock_user_day<'e, E>(executor: E, user_id: Uuid, date: NaiveDate) -> Result<()>
where
    E: PgExecutor<'e>,
{
    sqlx::query("SELECT pg_advisory_xact_lock(hashtext($1))")
        .bind(format!("{user_id}:{date}"))
        .execute(executor)
        .await?;

    Ok(())
}

pub async fn get_active_times_for_user_on_date<'e, E>(
    executor: E,
    user_id: Uuid,
    date: NaiveDate,
) -> Result<Vec<NaiveTime>>
where
    E: PgExecutor<'e>,
{
    let times = sqlx::query_scalar::<_, NaiveTime>(
        r#"
        SELECT slot_time
        FROM appointments
        WHERE user_id = $1 AND slot_date = $2 AND status <> 'cancelled'
        ORDER BY slot_time ASC
        "#,
    )
    .bind(user_id)
    .bind(date)
    .fetch_all(executor)
    .await?;

    Ok(times)
}

pub async fn get_active_appointments_by_date(
    pool: &Pool<Postgres>,
    date: NaiveDate,
) -> Result<Vec<DbAppointment>> {
    let rows = sqlx::query_as::<_, DbAppointment>(&format!(
        r#"
        SELECT {COLUMNS}
        FROM appointments
        WHERE slot_date = $1 AND status <> 'cancelled'
        ORDER BY slot_time ASC
        "#
    ))
    .bind(date)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

pub async fn get_appointment_by_id(
    pool: &Pool<Postgres>,
    id: Uuid,
) -> Result<Option<DbAppointment>> {
    tracing::debug!("Getting appointment by id: {}", id);

    let row = sqlx::query_as::<_, DbAppointment>(&format!(
        r#"
        SELECT {COLUMNS}
        FROM appointments
        WHERE id = $1
        "#
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(row)
}

pub async fn get_active_appointments_by_user(
    pool: &Pool<Postgres>,
    user_id: Uuid,
) -> Result<Vec<DbAppointment>> {
    let rows = sqlx::query_as::<_, DbAppointment>(&format!(
        r#"
        SELECT {COLUMNS}
        FROM appointments
        WHERE user_id = $1 AND status <> 'cancelled'
        ORDER BY slot_date ASC, slot_time ASC
        "#
    ))
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Compare-and-set on the status column. Returns `None` when the row is
/// missing or its status is not one of `from`.
pub async fn update_appointment_status(
    pool: &Pool<Postgres>,
    id: Uuid,
    from: &[AppointmentStatus],
    to: AppointmentStatus,
) -> Result<Option<DbAppointment>> {
    let expected: Vec<String> = from.iter().map(|status| status.as_str().to_string()).collect();

    tracing::debug!(
        "Updating appointment status: id={}, from={:?}, to={}",
        id,
        expected,
        to
    );

    let row = sqlx::query_as::<_, DbAppointment>(&format!(
        r#"
        UPDATE appointments
        SET status = $3
        WHERE id = $1 AND status = ANY($2)
        RETURNING {COLUMNS}
        "#
    ))
    .bind(id)
    .bind(expected)
    .bind(to.as_str())
    .fetch_optional(pool)
    .await?;

    Ok(row)
}
