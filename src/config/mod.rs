use std::env;
use std::time::Duration;

#[derive(Debug, Clone, serde::Deserialize)]
pub struct Config {
    pub db_host: String,
    pub db_port: u16,
    pub db_user: String,
    pub db_password: String,
    pub db_name: String,
    pub session_secret: String,
    pub session_ttl_secs: u64,
    pub server_host: String,
    pub server_port: u16,
    /// Demo-only bootstrap: auto-create placeholder tutor accounts with a
    /// fixed credential when the pool runs short. Disable outside demos.
    pub seed_demo_tutors: bool,
}

impl Config {
    pub fn from_env() -> Result<Self, env::VarError> {
        dotenv::dotenv().ok();

        let session_ttl_hours = env::var("SESSION_TTL")
            .unwrap_or_default()
            .trim_end_matches('h')
            .parse::<u64>()
            .unwrap_or(24);
        Ok(Config {
            db_host: env::var("DB_HOST")?,
            db_port: env::var("DB_PORT")
                .unwrap_or_default()
                .parse()
                .unwrap_or(5432),
            db_user: env::var("DB_USER")?,
            db_password: env::var("DB_PASSWORD")?,
            db_name: env::var("DB_NAME")?,
            session_secret: env::var("SESSION_SECRET")?,
            session_ttl_secs: session_ttl_hours * 3600,
            server_host: env::var("SERVER_HOST").unwrap_or_else(|_| "::".into()),
            server_port: env::var("SERVER_PORT")
                .unwrap_or_default()
                .parse()
                .unwrap_or(3000),
            seed_demo_tutors: env::var("SEED_DEMO_TUTORS")
                .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
                .unwrap_or(true),
        })
    }

    pub fn database_url(&self) -> String {
        format!(
            "postgres://{}:{}@{}:{}/{}",
            self.db_user, self.db_password, self.db_host, self.db_port, self.db_name
        )
    }

    pub fn session_ttl(&self) -> Duration {
        Duration::from_secs(self.session_ttl_secs)
    }
}
