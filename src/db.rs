use std::str::FromStr;

use anyhow::Context;
use sqlx::{
    migrate::Migrator,
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
    SqlitePool,
};

static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Opens a pool on the SQLite file behind `database_url`, creating the file
/// if it does not exist yet.
pub async fn connect(database_url: &str, max_connections: u32) -> anyhow::Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str(database_url)
        .with_context(|| format!("parse database url `{database_url}`"))?
        .create_if_missing(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect_with(options)
        .await
        .context("connect to database")?;
    Ok(pool)
}

/// Creates the tables if they are missing. Safe to run against an existing
/// database.
pub async fn ensure_schema(db: &SqlitePool) -> anyhow::Result<()> {
    MIGRATOR.run(db).await.context("apply schema")?;
    Ok(())
}

#[cfg(test)]
pub(crate) async fn test_pool() -> (tempfile::TempDir, SqlitePool) {
    let dir = tempfile::tempdir().expect("tempdir");
    let url = format!("sqlite://{}", dir.path().join("test.db").display());
    let db = connect(&url, 4).await.expect("connect");
    ensure_schema(&db).await.expect("schema");
    (dir, db)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn ensure_schema_is_idempotent() {
        let (_dir, db) = test_pool().await;
        ensure_schema(&db).await.expect("second run is a no-op");

        let tables: Vec<(String,)> = sqlx::query_as(
            "SELECT name FROM sqlite_master WHERE type = 'table' AND name IN ('users', 'skill_swap_requests') ORDER BY name",
        )
        .fetch_all(&db)
        .await
        .unwrap();
        let names: Vec<_> = tables.into_iter().map(|(n,)| n).collect();
        assert_eq!(names, vec!["skill_swap_requests", "users"]);
    }
}
