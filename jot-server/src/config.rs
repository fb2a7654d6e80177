// Application configuration, sourced from the environment at startup.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database_path: PathBuf,
    pub jwt_secret: String,
    pub token_ttl: Duration,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let host = env::var("HTTP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("HTTP_PORT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(3000);
        let database_path = env::var("DATABASE_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("jot.sqlite"));
        let jwt_secret = env::var("AUTH_JWT_SECRET").unwrap_or_else(|_| "dev-secret".to_string());
        let token_ttl = env::var("AUTH_TOKEN_TTL_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .map(Duration::from_secs)
            .unwrap_or_else(|| Duration::from_secs(24 * 60 * 60));

        Self {
            host,
            port,
            database_path,
            jwt_secret,
            token_ttl,
        }
    }
}
