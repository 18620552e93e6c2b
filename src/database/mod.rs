pub mod models;
pub mod repositories;

use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

use crate::config::Config;

pub async fn connect(config: &Config) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .connect(&config.database_url())
        .await
}

/// Startup schema migration. Creates both tables and retrofits the `es_tutor`
/// flag on older databases. Any failure is reported to the caller and aborts
/// startup; there are no per-request schema checks.
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS usuarios (
            id BIGSERIAL PRIMARY KEY,
            nombre TEXT NOT NULL,
            apellido TEXT NOT NULL,
            email TEXT NOT NULL UNIQUE,
            contrasena TEXT NOT NULL,
            es_tutor BOOLEAN NOT NULL DEFAULT FALSE
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS asesorias (
            id BIGSERIAL PRIMARY KEY,
            tema TEXT NOT NULL,
            fecha DATE NOT NULL,
            duracion INT NOT NULL,
            notas TEXT NOT NULL,
            usuario_id BIGINT NOT NULL REFERENCES usuarios (id),
            tutor_id BIGINT REFERENCES usuarios (id)
        )
        "#,
    )
    .execute(pool)
    .await?;

    // Databases created before the tutor pool existed lack the flag.
    sqlx::query("ALTER TABLE usuarios ADD COLUMN IF NOT EXISTS es_tutor BOOLEAN NOT NULL DEFAULT FALSE")
        .execute(pool)
        .await?;

    tracing::info!("database migrations applied");
    Ok(())
}
