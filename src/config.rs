use anyhow::Context;
use axum::http::{HeaderName, HeaderValue};

pub const DEFAULT_DATABASE_URL: &str = "sqlite://skill_swap.db";
const DEFAULT_CORS_ORIGINS: &str = "https://skill-swap-app-omega.vercel.app";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub max_connections: u32,
    pub cors_origins: Vec<String>,
    /// Header carrying the caller's user id.
    pub auth_header: HeaderName,
    pub host: String,
    pub port: u16,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url =
            std::env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.into());
        let max_connections = std::env::var("DB_MAX_CONNECTIONS")
            .ok()
            .and_then(|v| v.parse::<u32>().ok())
            .unwrap_or(10);
        let cors_origins = parse_origins(
            &std::env::var("CORS_ORIGINS").unwrap_or_else(|_| DEFAULT_CORS_ORIGINS.into()),
        )?;
        let auth_header = std::env::var("AUTH_HEADER")
            .unwrap_or_else(|_| "authorization".into())
            .parse::<HeaderName>()
            .context("AUTH_HEADER is not a valid header name")?;
        let host = std::env::var("APP_HOST").unwrap_or_else(|_| "0.0.0.0".into());
        let port = std::env::var("APP_PORT")
            .ok()
            .and_then(|v| v.parse::<u16>().ok())
            .unwrap_or(8000);

        Ok(Self {
            database_url,
            max_connections,
            cors_origins,
            auth_header,
            host,
            port,
        })
    }
}

/// Splits a comma-separated origin list. Browsers send origins without a
/// trailing slash, so one is stripped here.
pub fn parse_origins(raw: &str) -> anyhow::Result<Vec<String>> {
    raw.split(',')
        .map(|o| o.trim().trim_end_matches('/'))
        .filter(|o| !o.is_empty())
        .map(|o| {
            HeaderValue::from_str(o).with_context(|| format!("invalid CORS origin `{o}`"))?;
            Ok(o.to_string())
        })
        .collect()
}
