use std::sync::Arc;

use anyhow::Context;
use sqlx::{pool::PoolConnection, Sqlite, SqlitePool};

use crate::auth::identity::{HeaderIdentity, IdentityResolver};
use crate::config::AppConfig;
use crate::db;

#[derive(Clone)]
pub struct AppState {
    pub db: SqlitePool,
    pub config: Arc<AppConfig>,
    pub identity: Arc<dyn IdentityResolver>,
}

impl AppState {
    pub async fn init() -> anyhow::Result<Self> {
        let config = Arc::new(AppConfig::from_env()?);
        let db = db::connect(&config.database_url, config.max_connections).await?;
        let identity =
            Arc::new(HeaderIdentity::new(config.auth_header.clone())) as Arc<dyn IdentityResolver>;
        Ok(Self::from_parts(db, config, identity))
    }

    pub fn from_parts(
        db: SqlitePool,
        config: Arc<AppConfig>,
        identity: Arc<dyn IdentityResolver>,
    ) -> Self {
        Self {
            db,
            config,
            identity,
        }
    }

    /// Checks a connection out of the pool for the current request. It goes
    /// back to the pool when the guard is dropped.
    pub async fn conn(&self) -> anyhow::Result<PoolConnection<Sqlite>> {
        self.db.acquire().await.context("acquire connection")
    }

    #[cfg(test)]
    pub fn for_tests(db: SqlitePool) -> Self {
        let config = Arc::new(AppConfig {
            database_url: "sqlite::memory:".into(),
            max_connections: 4,
            cors_origins: vec!["http://localhost:5173".into()],
            auth_header: axum::http::header::AUTHORIZATION,
            host: "127.0.0.1".into(),
            port: 0,
        });
        let identity =
            Arc::new(HeaderIdentity::new(config.auth_header.clone())) as Arc<dyn IdentityResolver>;
        Self::from_parts(db, config, identity)
    }
}
