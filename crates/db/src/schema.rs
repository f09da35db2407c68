use eyre::Result;
use sqlx::{Pool, Postgres};
use tracing::info;

/// DDL applied in order on startup. Every statement is idempotent.
const STATEMENTS: &[&str] = &[
    // Agency accounts
    r#"
    CREATE TABLE IF NOT EXISTS users (
        id UUID PRIMARY KEY,
        username VARCHAR(100) NOT NULL UNIQUE,
        email VARCHAR(255) NOT NULL,
        password_hash VARCHAR(255) NOT NULL,
        first_name VARCHAR(100) NOT NULL,
        last_name VARCHAR(100) NOT NULL,
        agency_name VARCHAR(255) NOT NULL,
        verified BOOLEAN NOT NULL DEFAULT FALSE,
        created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
    );
    "#,
    r#"CREATE UNIQUE INDEX IF NOT EXISTS uq_users_email ON users (LOWER(email));"#,
    // Appointments, never deleted
    r#"
    CREATE TABLE IF NOT EXISTS appointments (
        id UUID PRIMARY KEY,
        user_id UUID NOT NULL REFERENCES users(id),
        user_name VARCHAR(255) NOT NULL,
        agency_name VARCHAR(255) NOT NULL,
        user_email VARCHAR(255) NOT NULL,
        slot_date DATE NOT NULL,
        slot_time TIME NOT NULL,
        duration_minutes INTEGER NOT NULL,
        notes TEXT NULL,
        status TEXT NOT NULL DEFAULT 'pending',
        created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
        CONSTRAINT valid_status CHECK (status IN ('pending', 'confirmed', 'rejected', 'cancelled')),
        CONSTRAINT positive_duration CHECK (duration_minutes > 0)
    );
    "#,
    // At most one slot holder per (date, time); cancelled rows drop out of the index
    r#"
    CREATE UNIQUE INDEX IF NOT EXISTS uq_appointments_active_slot
        ON appointments (slot_date, slot_time)
        WHERE status <> 'cancelled';
    "#,
    r#"CREATE INDEX IF NOT EXISTS idx_appointments_user_date ON appointments (user_id, slot_date);"#,
    // Contact form submissions
    r#"
    CREATE TABLE IF NOT EXISTS contact_requests (
        id UUID PRIMARY KEY,
        name VARCHAR(100) NOT NULL,
        email VARCHAR(255) NOT NULL,
        phone VARCHAR(20) NULL,
        service VARCHAR(255) NOT NULL,
        message TEXT NOT NULL,
        created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
        status VARCHAR(32) NOT NULL DEFAULT 'new'
    );
    "#,
    // Liveness log
    r#"
    CREATE TABLE IF NOT EXISTS status_checks (
        id UUID PRIMARY KEY,
        client_name VARCHAR(255) NOT NULL,
        checked_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
    );
    "#,
];

pub async fn initialize_database(pool: &Pool<Postgres>) -> Result<()> {
    info!("Initializing database schema...");

    for statement in STATEMENTS {
        sqlx::query(statement).execute(pool).await?;
    }

    info!("Database schema initialized successfully.");
    Ok(())
}
