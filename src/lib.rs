use std::sync::Arc;

use config::Config;

pub mod config;
pub mod database;
pub mod error;
pub mod middleware;
pub mod routes;

use database::repositories::{AdvisoryRepository, UserRepository};

/// Shared application state. Handlers depend on the repository traits rather
/// than a concrete connector, so tests can swap in in-memory doubles.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserRepository>,
    pub advisories: Arc<dyn AdvisoryRepository>,
    pub config: Config,
}
