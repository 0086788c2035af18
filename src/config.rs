use std::{env, fmt::Display, str::FromStr};

use tracing::{info, warn};

use crate::error::{AppError, Result};

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub bind_addr: String,
    pub jwt_secret: String,
    pub token_ttl_minutes: i64,
    pub smtp: Option<SmtpConfig>,
    pub mail_from: String,
    pub cleanup_cron: String,
    pub notification_queue_capacity: usize,
}

#[derive(Debug, Clone)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub username: Option<String>,
    pub password: Option<String>,
    pub starttls: bool,
}

impl Config {
    /// Reads the process environment; call `dotenvy::dotenv()` first to pick up `.env`.
    pub fn from_env() -> Result<Self> {
        let smtp = match var("SMTP_HOST") {
            Some(host) => Some(SmtpConfig {
                host,
                port: try_load("SMTP_PORT", "587")?,
                username: var("SMTP_USERNAME"),
                password: var("SMTP_PASSWORD"),
                starttls: try_load("SMTP_STARTTLS", "true")?,
            }),
            None => {
                info!("SMTP_HOST not set, notification mail will only be logged");
                None
            }
        };

        Ok(Self {
            database_url: required("DATABASE_URL")?,
            bind_addr: try_load("BIND_ADDR", "0.0.0.0:3000")?,
            jwt_secret: required("JWT_SECRET")?,
            token_ttl_minutes: try_load("TOKEN_TTL_MINUTES", "60")?,
            smtp,
            mail_from: try_load("MAIL_FROM", "noreply@classifieds.local")?,
            cleanup_cron: try_load("CLEANUP_CRON", "0 0 0 * * *")?,
            notification_queue_capacity: try_load("NOTIFICATION_QUEUE_CAPACITY", "256")?,
        })
    }
}

fn var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn required(key: &str) -> Result<String> {
    var(key).ok_or_else(|| AppError::config(format!("{key} must be set")))
}

fn try_load<T: FromStr>(key: &str, default: &str) -> Result<T>
where
    T::Err: Display,
{
    let raw = var(key).unwrap_or_else(|| {
        info!("{key} not set, using default: {default}");
        default.to_string()
    });

    raw.parse().map_err(|e| {
        warn!("Invalid {key} value: {e}");
        AppError::config(format!("invalid {key} value {raw:?}: {e}"))
    })
}
