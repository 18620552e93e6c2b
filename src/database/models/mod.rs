pub mod advisory;
pub mod user;

pub use advisory::{AdvisoryRow, AdvisoryUpdate, NewAdvisory};
pub use user::{NewUser, UserEntity};
