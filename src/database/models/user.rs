use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Row of `usuarios`. The credential is stored only as a bcrypt hash and is
/// never serialized into a view model.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct UserEntity {
    pub id: i64,
    pub nombre: String,
    pub apellido: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub contrasena: String,
    pub es_tutor: bool,
}

impl UserEntity {
    pub fn nombre_completo(&self) -> String {
        format!("{} {}", self.nombre, self.apellido)
    }
}

/// Fields for inserting a new user. `contrasena` is already hashed here.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub nombre: String,
    pub apellido: String,
    pub email: String,
    pub contrasena: String,
    pub es_tutor: bool,
}
