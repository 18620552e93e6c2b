use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::PgPool;

use super::AdvisoryRepository;
use crate::database::models::{AdvisoryRow, AdvisoryUpdate, NewAdvisory};

// Creator join is inner (every session has one), tutor join is left so
// sessions with an unassigned tutor still show up.
const SELECT_JOINED: &str = r#"
    SELECT a.id, a.tema, a.fecha, a.duracion, a.notas, a.usuario_id, a.tutor_id,
           creador.nombre || ' ' || creador.apellido AS creador_nombre,
           tutor.nombre || ' ' || tutor.apellido AS tutor_nombre
    FROM asesorias a
    JOIN usuarios creador ON a.usuario_id = creador.id
    LEFT JOIN usuarios tutor ON a.tutor_id = tutor.id
"#;

/// Postgres-backed advisory-session catalog.
pub struct PgAdvisoryRepository {
    pool: PgPool,
}

impl PgAdvisoryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AdvisoryRepository for PgAdvisoryRepository {
    async fn create(&self, data: NewAdvisory) -> Result<i64, sqlx::Error> {
        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO asesorias (tema, fecha, duracion, notas, usuario_id, tutor_id)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id
            "#,
        )
        .bind(&data.tema)
        .bind(data.fecha)
        .bind(data.duracion)
        .bind(&data.notas)
        .bind(data.usuario_id)
        .bind(data.tutor_id)
        .fetch_one(&self.pool)
        .await?;

        tracing::debug!(id, usuario_id = data.usuario_id, "asesoria creada");
        Ok(id)
    }

    async fn list_upcoming(&self, today: NaiveDate) -> Result<Vec<AdvisoryRow>, sqlx::Error> {
        let query = format!("{SELECT_JOINED} WHERE a.fecha >= $1 ORDER BY a.fecha ASC");
        sqlx::query_as::<_, AdvisoryRow>(&query)
            .bind(today)
            .fetch_all(&self.pool)
            .await
    }

    async fn find_one(&self, id: i64) -> Result<Option<AdvisoryRow>, sqlx::Error> {
        let query = format!("{SELECT_JOINED} WHERE a.id = $1");
        sqlx::query_as::<_, AdvisoryRow>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }

    async fn update(&self, data: AdvisoryUpdate) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            UPDATE asesorias
            SET tema = $1, fecha = $2, duracion = $3, notas = $4, tutor_id = $5
            WHERE id = $6
            "#,
        )
        .bind(&data.tema)
        .bind(data.fecha)
        .bind(data.duracion)
        .bind(&data.notas)
        .bind(data.tutor_id)
        .bind(data.id)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn update_tutor(&self, id: i64, tutor_id: i64) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE asesorias SET tutor_id = $1 WHERE id = $2")
            .bind(tutor_id)
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn delete(&self, id: i64) -> Result<(), sqlx::Error> {
        sqlx::query("DELETE FROM asesorias WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
