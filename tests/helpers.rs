//! In-memory repository doubles and test-server setup shared by the
//! integration tests.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum_test::TestServer;
use chrono::NaiveDate;

use asesorias_backend::AppState;
use asesorias_backend::config::Config;
use asesorias_backend::database::models::{
    AdvisoryRow, AdvisoryUpdate, NewAdvisory, NewUser, UserEntity,
};
use asesorias_backend::database::repositories::{AdvisoryRepository, UserRepository};
use asesorias_backend::routes;

#[derive(Debug, Clone)]
pub struct StoredAdvisory {
    pub id: i64,
    pub tema: String,
    pub fecha: NaiveDate,
    pub duracion: i32,
    pub notas: String,
    pub usuario_id: i64,
    pub tutor_id: i64,
}

/// Backs both repository traits with plain vectors.
#[derive(Default)]
pub struct MemoryStore {
    pub users: Mutex<Vec<UserEntity>>,
    pub advisories: Mutex<Vec<StoredAdvisory>>,
}

impl MemoryStore {
    pub fn user_id_by_email(&self, email: &str) -> i64 {
        self.users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.email == email)
            .map(|u| u.id)
            .expect("user registered")
    }

    pub fn first_tutor_id(&self) -> i64 {
        self.users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.es_tutor)
            .map(|u| u.id)
            .expect("tutor seeded")
    }

    pub fn tutor_count(&self) -> usize {
        self.users.lock().unwrap().iter().filter(|u| u.es_tutor).count()
    }

    pub fn insert_tutor(&self, nombre: &str, email: &str) -> i64 {
        let mut users = self.users.lock().unwrap();
        let id = users.len() as i64 + 1;
        users.push(UserEntity {
            id,
            nombre: nombre.to_string(),
            apellido: "Tutor".to_string(),
            email: email.to_string(),
            contrasena: String::new(),
            es_tutor: true,
        });
        id
    }

    fn full_name(&self, id: i64) -> Option<String> {
        self.users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.id == id)
            .map(|u| format!("{} {}", u.nombre, u.apellido))
    }

    fn to_row(&self, stored: &StoredAdvisory) -> AdvisoryRow {
        AdvisoryRow {
            id: stored.id,
            tema: stored.tema.clone(),
            fecha: stored.fecha,
            duracion: stored.duracion,
            notas: stored.notas.clone(),
            usuario_id: stored.usuario_id,
            tutor_id: Some(stored.tutor_id),
            creador_nombre: self.full_name(stored.usuario_id).unwrap_or_default(),
            tutor_nombre: self.full_name(stored.tutor_id),
        }
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn create(&self, user: NewUser) -> Result<i64, sqlx::Error> {
        let mut users = self.users.lock().unwrap();
        let id = users.len() as i64 + 1;
        users.push(UserEntity {
            id,
            nombre: user.nombre,
            apellido: user.apellido,
            email: user.email,
            contrasena: user.contrasena,
            es_tutor: user.es_tutor,
        });
        Ok(id)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<UserEntity>, sqlx::Error> {
        Ok(self.users.lock().unwrap().iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<UserEntity>, sqlx::Error> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn tutors_except(&self, exclude_id: i64) -> Result<Vec<UserEntity>, sqlx::Error> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .filter(|u| u.es_tutor && u.id != exclude_id)
            .cloned()
            .collect())
    }

    async fn count_tutors_except(&self, exclude_id: i64) -> Result<i64, sqlx::Error> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .filter(|u| u.es_tutor && u.id != exclude_id)
            .count() as i64)
    }
}

#[async_trait]
impl AdvisoryRepository for MemoryStore {
    async fn create(&self, data: NewAdvisory) -> Result<i64, sqlx::Error> {
        let mut advisories = self.advisories.lock().unwrap();
        let id = advisories.iter().map(|a| a.id).max().unwrap_or(0) + 1;
        advisories.push(StoredAdvisory {
            id,
            tema: data.tema,
            fecha: data.fecha,
            duracion: data.duracion,
            notas: data.notas,
            usuario_id: data.usuario_id,
            tutor_id: data.tutor_id,
        });
        Ok(id)
    }

    async fn list_upcoming(&self, today: NaiveDate) -> Result<Vec<AdvisoryRow>, sqlx::Error> {
        let mut upcoming: Vec<StoredAdvisory> = self
            .advisories
            .lock()
            .unwrap()
            .iter()
            .filter(|a| a.fecha >= today)
            .cloned()
            .collect();
        upcoming.sort_by_key(|a| a.fecha);
        Ok(upcoming.iter().map(|a| self.to_row(a)).collect())
    }

    async fn find_one(&self, id: i64) -> Result<Option<AdvisoryRow>, sqlx::Error> {
        let stored = self
            .advisories
            .lock()
            .unwrap()
            .iter()
            .find(|a| a.id == id)
            .cloned();
        Ok(stored.map(|a| self.to_row(&a)))
    }

    async fn update(&self, data: AdvisoryUpdate) -> Result<(), sqlx::Error> {
        let mut advisories = self.advisories.lock().unwrap();
        if let Some(stored) = advisories.iter_mut().find(|a| a.id == data.id) {
            stored.tema = data.tema;
            stored.fecha = data.fecha;
            stored.duracion = data.duracion;
            stored.notas = data.notas;
            stored.tutor_id = data.tutor_id;
        }
        Ok(())
    }

    async fn update_tutor(&self, id: i64, tutor_id: i64) -> Result<(), sqlx::Error> {
        let mut advisories = self.advisories.lock().unwrap();
        if let Some(stored) = advisories.iter_mut().find(|a| a.id == id) {
            stored.tutor_id = tutor_id;
        }
        Ok(())
    }

    async fn delete(&self, id: i64) -> Result<(), sqlx::Error> {
        self.advisories.lock().unwrap().retain(|a| a.id != id);
        Ok(())
    }
}

pub fn test_config() -> Config {
    Config {
        db_host: "localhost".into(),
        db_port: 5432,
        db_user: "test".into(),
        db_password: "test".into(),
        db_name: "test".into(),
        session_secret: "secreto-de-prueba".into(),
        session_ttl_secs: 3600,
        server_host: "127.0.0.1".into(),
        server_port: 0,
        seed_demo_tutors: true,
    }
}

pub fn setup_test_server_with_config(config: Config) -> (TestServer, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::default());
    let state = AppState {
        users: store.clone(),
        advisories: store.clone(),
        config,
    };
    let mut server = TestServer::new(routes::create_router(state)).unwrap();
    server.save_cookies();
    (server, store)
}

/// Test server over in-memory repositories, with a cookie jar so session and
/// flash cookies behave like a browser's.
pub fn setup_test_server() -> (TestServer, Arc<MemoryStore>) {
    setup_test_server_with_config(test_config())
}

/// Registers and logs in a user, leaving the session cookie in the server's
/// jar. Credential is always "abc".
pub async fn register_and_login(server: &TestServer, nombre: &str, email: &str) {
    server
        .post("/registro")
        .form(&[
            ("nombre", nombre),
            ("apellido", "Lopez"),
            ("email", email),
            ("contrasena", "abc"),
            ("confirmar_contrasena", "abc"),
        ])
        .await;
    server
        .post("/login")
        .form(&[("email", email), ("contrasena", "abc")])
        .await;
}
