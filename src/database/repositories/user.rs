use async_trait::async_trait;
use sqlx::PgPool;

use super::UserRepository;
use crate::database::models::{NewUser, UserEntity};

/// Postgres-backed user directory.
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn create(&self, user: NewUser) -> Result<i64, sqlx::Error> {
        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO usuarios (nombre, apellido, email, contrasena, es_tutor)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id
            "#,
        )
        .bind(&user.nombre)
        .bind(&user.apellido)
        .bind(&user.email)
        .bind(&user.contrasena)
        .bind(user.es_tutor)
        .fetch_one(&self.pool)
        .await?;

        tracing::debug!(id, email = %user.email, "usuario creado");
        Ok(id)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<UserEntity>, sqlx::Error> {
        sqlx::query_as::<_, UserEntity>(
            "SELECT id, nombre, apellido, email, contrasena, es_tutor FROM usuarios WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<UserEntity>, sqlx::Error> {
        sqlx::query_as::<_, UserEntity>(
            "SELECT id, nombre, apellido, email, contrasena, es_tutor FROM usuarios WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
    }

    async fn tutors_except(&self, exclude_id: i64) -> Result<Vec<UserEntity>, sqlx::Error> {
        sqlx::query_as::<_, UserEntity>(
            r#"
            SELECT id, nombre, apellido, email, contrasena, es_tutor
            FROM usuarios
            WHERE es_tutor AND id <> $1
            ORDER BY id
            "#,
        )
        .bind(exclude_id)
        .fetch_all(&self.pool)
        .await
    }

    async fn count_tutors_except(&self, exclude_id: i64) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM usuarios WHERE es_tutor AND id <> $1")
            .bind(exclude_id)
            .fetch_one(&self.pool)
            .await
    }
}
