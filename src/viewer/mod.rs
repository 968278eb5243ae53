//! Read and seed helpers for the `skillswap-db` debugging tool.
//!
//! The tool opens the same SQLite file as the API service but shares nothing
//! else with it. Every row is decoded into a named-field record.

pub mod render;

use std::path::{Path, PathBuf};

use anyhow::Context;
use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
    FromRow, SqliteConnection, SqlitePool,
};
use tracing::info;

use crate::auth::services::hash_password;
use crate::swaps::repo::SkillSwapRequest;
use crate::users::repo::{NewUser, User};

/// Column description as reported by `PRAGMA table_info`.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct ColumnInfo {
    pub name: String,
    pub decl_type: String,
    pub not_null: bool,
    pub default_value: Option<String>,
    pub primary_key: bool,
}

impl ColumnInfo {
    /// `email (TEXT) NOT NULL`, `status (TEXT) NOT NULL DEFAULT 'Pending'`.
    pub fn describe(&self) -> String {
        let nullable = if self.not_null { "NOT NULL" } else { "NULL" };
        match &self.default_value {
            Some(d) => format!("{} ({}) {} DEFAULT {}", self.name, self.decl_type, nullable, d),
            None => format!("{} ({}) {}", self.name, self.decl_type, nullable),
        }
    }
}

/// One cell of a generically dumped row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub column: String,
    pub value: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenericRow {
    pub fields: Vec<Field>,
}

pub const NO_TABLES: &str = "No tables found in database";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedSummary {
    pub users: usize,
    pub requests: usize,
}

/// Accepts either a plain path or a `sqlite:` url.
pub fn database_path(input: &str) -> PathBuf {
    let stripped = input
        .strip_prefix("sqlite://")
        .or_else(|| input.strip_prefix("sqlite:"))
        .unwrap_or(input);
    let without_query = stripped.split('?').next().unwrap_or(stripped);
    PathBuf::from(without_query)
}

/// Opens an existing database file. Never creates one.
pub async fn open_existing(path: &Path) -> anyhow::Result<SqlitePool> {
    if !path.exists() {
        anyhow::bail!("database file not found: {}", path.display());
    }
    let options = SqliteConnectOptions::new()
        .filename(path)
        .create_if_missing(false);
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await
        .with_context(|| format!("open {}", path.display()))?;
    Ok(pool)
}

/// User-facing tables in creation order; sqlite and migration bookkeeping
/// tables are left out.
pub async fn list_tables(conn: &mut SqliteConnection) -> anyhow::Result<Vec<String>> {
    let rows: Vec<(String,)> = sqlx::query_as(
        r#"
        SELECT name
        FROM sqlite_master
        WHERE type = 'table'
          AND name NOT LIKE 'sqlite_%'
          AND name <> '_sqlx_migrations'
        ORDER BY rowid
        "#,
    )
    .fetch_all(conn)
    .await
    .context("list tables")?;
    Ok(rows.into_iter().map(|(name,)| name).collect())
}

pub async fn table_columns(
    conn: &mut SqliteConnection,
    table: &str,
) -> anyhow::Result<Vec<ColumnInfo>> {
    let columns = sqlx::query_as::<_, ColumnInfo>(
        r#"
        SELECT name, type AS decl_type, "notnull" AS not_null,
               dflt_value AS default_value, pk > 0 AS primary_key
        FROM pragma_table_info(?)
        ORDER BY cid
        "#,
    )
    .bind(table)
    .fetch_all(conn)
    .await
    .with_context(|| format!("describe table {table}"))?;
    Ok(columns)
}

fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

/// Every row of `table` with each value rendered as text.
pub async fn dump_table(
    conn: &mut SqliteConnection,
    table: &str,
) -> anyhow::Result<Vec<GenericRow>> {
    let columns = table_columns(&mut *conn, table).await?;
    if columns.is_empty() {
        return Ok(Vec::new());
    }

    let select_list = columns
        .iter()
        .map(|c| format!("CAST({} AS TEXT)", quote_ident(&c.name)))
        .collect::<Vec<_>>()
        .join(", ");
    let sql = format!("SELECT {} FROM {}", select_list, quote_ident(table));

    let rows = sqlx::query(&sql)
        .fetch_all(&mut *conn)
        .await
        .with_context(|| format!("dump table {table}"))?;

    rows.iter()
        .map(|row| -> anyhow::Result<GenericRow> {
            let fields = columns
                .iter()
                .enumerate()
                .map(|(i, c)| {
                    Ok(Field {
                        column: c.name.clone(),
                        value: sqlx::Row::try_get::<Option<String>, _>(row, i)?,
                    })
                })
                .collect::<Result<Vec<_>, sqlx::Error>>()?;
            Ok(GenericRow { fields })
        })
        .collect()
}

pub async fn users(conn: &mut SqliteConnection) -> anyhow::Result<Vec<User>> {
    User::list_all(conn).await
}

pub async fn requests(conn: &mut SqliteConnection) -> anyhow::Result<Vec<SkillSwapRequest>> {
    SkillSwapRequest::list_all(conn).await
}

struct SampleUser {
    email: &'static str,
    password: &'static str,
    name: &'static str,
    location: &'static str,
    availability: &'static str,
    offered: &'static str,
    wanted: &'static str,
    message: &'static str,
}

const SAMPLES: [SampleUser; 3] = [
    SampleUser {
        email: "john@example.com",
        password: "password123",
        name: "John Doe",
        location: "New York",
        availability: "Weekends",
        offered: "Python Programming",
        wanted: "JavaScript",
        message: "Looking to learn JavaScript in exchange for Python help",
    },
    SampleUser {
        email: "jane@example.com",
        password: "password456",
        name: "Jane Smith",
        location: "Los Angeles",
        availability: "Evenings",
        offered: "Graphic Design",
        wanted: "Web Development",
        message: "Can help with design in exchange for web dev skills",
    },
    SampleUser {
        email: "bob@example.com",
        password: "password789",
        name: "Bob Johnson",
        location: "Chicago",
        availability: "Weekdays",
        offered: "Cooking",
        wanted: "Photography",
        message: "Home chef looking to learn photography",
    },
];

/// Inserts the sample users and one request each. All or nothing: if any
/// insert fails (for example a sample email already exists) nothing is kept.
pub async fn seed_sample_data(db: &SqlitePool) -> anyhow::Result<SeedSummary> {
    let mut tx = db.begin().await.context("begin seed transaction")?;

    let tables = list_tables(&mut tx).await?;
    if tables.is_empty() {
        anyhow::bail!(NO_TABLES);
    }
    for required in ["users", "skill_swap_requests"] {
        if !tables.iter().any(|t| t == required) {
            anyhow::bail!("table {required} doesn't exist yet");
        }
    }
    let mut summary = SeedSummary {
        users: 0,
        requests: 0,
    };

    for sample in &SAMPLES {
        let hash = hash_password(sample.password)?;
        let user = User::create(
            &mut tx,
            &NewUser {
                email: sample.email,
                password_hash: &hash,
                name: sample.name,
                location: Some(sample.location),
                profile_photo: None,
                availability: Some(sample.availability),
            },
        )
        .await
        .with_context(|| format!("seed user {}", sample.email))?;
        summary.users += 1;

        SkillSwapRequest::create(
            &mut tx,
            user.id,
            sample.offered,
            sample.wanted,
            Some(sample.message),
        )
        .await?;
        summary.requests += 1;
    }

    tx.commit().await.context("commit seed transaction")?;
    info!(users = summary.users, requests = summary.requests, "sample data added");
    Ok(summary)
}
