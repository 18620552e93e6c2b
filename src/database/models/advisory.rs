use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Row of `asesorias` joined with the creator and tutor names. The two
/// display names come from the join and are never persisted.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct AdvisoryRow {
    pub id: i64,
    pub tema: String,
    pub fecha: NaiveDate,
    pub duracion: i32,
    pub notas: String,
    pub usuario_id: i64,
    pub tutor_id: Option<i64>,
    pub creador_nombre: String,
    pub tutor_nombre: Option<String>,
}

/// Fields for inserting a new advisory session.
#[derive(Debug, Clone)]
pub struct NewAdvisory {
    pub tema: String,
    pub fecha: NaiveDate,
    pub duracion: i32,
    pub notas: String,
    pub usuario_id: i64,
    pub tutor_id: i64,
}

/// Full-field update. The creator reference is immutable and absent here.
#[derive(Debug, Clone)]
pub struct AdvisoryUpdate {
    pub id: i64,
    pub tema: String,
    pub fecha: NaiveDate,
    pub duracion: i32,
    pub notas: String,
    pub tutor_id: i64,
}
