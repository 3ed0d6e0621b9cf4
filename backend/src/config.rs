//! Process configuration, read once from the environment at startup and
//! shared through the application context.

use std::env;
use std::path::PathBuf;

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    MissingVar(&'static str),

    #[error("invalid value for {0}: {1}")]
    InvalidVar(&'static str, String),
}

/// SMTP settings for the summary email. When absent the server falls back
/// to a log-only notifier, keeping imports fully functional without a mail
/// relay.
#[derive(Debug, Clone)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub from_address: String,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database_path: PathBuf,
    pub uploads_dir: PathBuf,
    pub jwt_secret: String,
    pub jwt_ttl_minutes: i64,
    pub app_url: String,
    pub smtp: Option<SmtpConfig>,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = match env::var("PORT") {
            Ok(raw) => raw
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidVar("PORT", raw))?,
            Err(_) => 8080,
        };

        let jwt_secret =
            env::var("JWT_SECRET").map_err(|_| ConfigError::MissingVar("JWT_SECRET"))?;
        let jwt_ttl_minutes = match env::var("JWT_TTL_MINUTES") {
            Ok(raw) => raw
                .parse::<i64>()
                .map_err(|_| ConfigError::InvalidVar("JWT_TTL_MINUTES", raw))?,
            Err(_) => 60,
        };

        let smtp = match env::var("SMTP_HOST") {
            Ok(smtp_host) => {
                let smtp_port = match env::var("SMTP_PORT") {
                    Ok(raw) => raw
                        .parse::<u16>()
                        .map_err(|_| ConfigError::InvalidVar("SMTP_PORT", raw))?,
                    Err(_) => 587,
                };
                Some(SmtpConfig {
                    host: smtp_host,
                    port: smtp_port,
                    username: env::var("SMTP_USERNAME").unwrap_or_default(),
                    password: env::var("SMTP_PASSWORD").unwrap_or_default(),
                    from_address: env::var("SMTP_FROM")
                        .map_err(|_| ConfigError::MissingVar("SMTP_FROM"))?,
                })
            }
            Err(_) => None,
        };

        Ok(AppConfig {
            host,
            port,
            database_path: env::var("DATABASE_PATH")
                .unwrap_or_else(|_| "gestor.sqlite".to_string())
                .into(),
            uploads_dir: env::var("UPLOADS_DIR")
                .unwrap_or_else(|_| "./uploads".to_string())
                .into(),
            jwt_secret,
            jwt_ttl_minutes,
            app_url: env::var("APP_URL").unwrap_or_else(|_| "http://127.0.0.1:8080".to_string()),
            smtp,
        })
    }

    /// Link included in the summary email so recipients can jump straight
    /// to their collaborator dashboard.
    pub fn dashboard_url(&self) -> String {
        format!("{}/dashboard/collaborators", self.app_url.trim_end_matches('/'))
    }
}
