// Repository traits the handlers depend on, plus the Postgres
// implementations used in production.

mod advisory;
mod user;

pub use advisory::PgAdvisoryRepository;
pub use user::PgUserRepository;

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::database::models::{AdvisoryRow, AdvisoryUpdate, NewAdvisory, NewUser, UserEntity};

/// User directory: registration lookups and the tutor pool.
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create(&self, user: NewUser) -> Result<i64, sqlx::Error>;
    async fn find_by_id(&self, id: i64) -> Result<Option<UserEntity>, sqlx::Error>;
    async fn find_by_email(&self, email: &str) -> Result<Option<UserEntity>, sqlx::Error>;
    /// Tutor-flagged users excluding the given id.
    async fn tutors_except(&self, exclude_id: i64) -> Result<Vec<UserEntity>, sqlx::Error>;
    async fn count_tutors_except(&self, exclude_id: i64) -> Result<i64, sqlx::Error>;
}

/// Advisory-session catalog. Each call is one independently committed
/// statement; read-then-write sequences are last-write-wins by design.
#[async_trait]
pub trait AdvisoryRepository: Send + Sync {
    async fn create(&self, data: NewAdvisory) -> Result<i64, sqlx::Error>;
    /// Sessions dated `today` or later, earliest first, with display names.
    async fn list_upcoming(&self, today: NaiveDate) -> Result<Vec<AdvisoryRow>, sqlx::Error>;
    async fn find_one(&self, id: i64) -> Result<Option<AdvisoryRow>, sqlx::Error>;
    async fn update(&self, data: AdvisoryUpdate) -> Result<(), sqlx::Error>;
    async fn update_tutor(&self, id: i64, tutor_id: i64) -> Result<(), sqlx::Error>;
    async fn delete(&self, id: i64) -> Result<(), sqlx::Error>;
}
