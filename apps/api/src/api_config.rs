use std::env;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;

use portaria_core::AppError;
use tracing_subscriber::EnvFilter;

/// What this invocation should do after connecting to the database.
#[derive(Debug, Clone)]
pub enum RunMode {
    /// Run migrations and serve HTTP.
    Serve,
    /// Run migrations and exit.
    MigrateOnly,
    /// Create or reset the `admin` account with the given password, then
    /// exit.
    SeedAdmin {
        /// Plaintext password to hash and store.
        password: String,
    },
}

/// Process configuration, read once at startup and never mutated.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub run_mode: RunMode,
    pub database_url: String,
    pub api_host: String,
    pub api_port: u16,
    pub cookie_secure: bool,
}

impl ApiConfig {
    pub fn load() -> Result<Self, AppError> {
        let run_mode = match env::args().nth(1).as_deref() {
            Some("migrate") => RunMode::MigrateOnly,
            Some("seed-admin") => {
                let password = env::args().nth(2).ok_or_else(|| {
                    AppError::Validation("seed-admin requires a password argument".to_owned())
                })?;
                RunMode::SeedAdmin { password }
            }
            _ => RunMode::Serve,
        };

        let database_url = required_env("DATABASE_URL")?;

        let api_host = env::var("API_HOST").unwrap_or_else(|_| "127.0.0.1".to_owned());
        let api_port = env::var("API_PORT")
            .ok()
            .and_then(|value| value.parse::<u16>().ok())
            .unwrap_or(3001);

        // Off by default for local HTTP; set to true behind TLS.
        let cookie_secure = env::var("SESSION_COOKIE_SECURE")
            .unwrap_or_else(|_| "false".to_owned())
            .eq_ignore_ascii_case("true");

        Ok(Self {
            run_mode,
            database_url,
            api_host,
            api_port,
            cookie_secure,
        })
    }

    pub fn socket_address(&self) -> Result<SocketAddr, AppError> {
        let host = IpAddr::from_str(&self.api_host).map_err(|error| {
            AppError::Internal(format!("invalid API_HOST '{}': {error}", self.api_host))
        })?;
        Ok(SocketAddr::from((host, self.api_port)))
    }
}

pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .init();
}

fn required_env(name: &str) -> Result<String, AppError> {
    env::var(name).map_err(|_| AppError::Validation(format!("{name} is required")))
}
