use anyhow::Context;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqliteConnection};

/// User row. Serialized as-is, password hash included.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub password: String, // argon2 PHC string
    pub name: String,
    pub location: Option<String>,
    pub profile_photo: Option<String>,
    pub availability: Option<String>,
}

/// Fields needed to insert a user; `password` is already hashed.
#[derive(Debug)]
pub struct NewUser<'a> {
    pub email: &'a str,
    pub password_hash: &'a str,
    pub name: &'a str,
    pub location: Option<&'a str>,
    pub profile_photo: Option<&'a str>,
    pub availability: Option<&'a str>,
}

impl User {
    pub async fn find_by_email(
        conn: &mut SqliteConnection,
        email: &str,
    ) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, password, name, location, profile_photo, availability
            FROM users
            WHERE email = ?
            "#,
        )
        .bind(email)
        .fetch_optional(conn)
        .await
        .context("find user by email")?;
        Ok(user)
    }

    pub async fn find_by_id(conn: &mut SqliteConnection, id: i64) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, password, name, location, profile_photo, availability
            FROM users
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(conn)
        .await
        .context("find user by id")?;
        Ok(user)
    }

    pub async fn list_all(conn: &mut SqliteConnection) -> anyhow::Result<Vec<User>> {
        let users = sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, password, name, location, profile_photo, availability
            FROM users
            ORDER BY id
            "#,
        )
        .fetch_all(conn)
        .await
        .context("list users")?;
        Ok(users)
    }

    /// Inserts a user. A duplicate email surfaces as a `sqlx::Error` whose
    /// database error reports a unique violation; see [`is_unique_violation`].
    ///
    /// The `RETURNING` row is drained with `fetch_all`: sqlite only commits an
    /// autocommit statement once it has stepped to completion, and other pooled
    /// connections must see the row as soon as this returns.
    pub async fn create(conn: &mut SqliteConnection, new: &NewUser<'_>) -> anyhow::Result<User> {
        let mut rows = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (email, password, name, location, profile_photo, availability)
            VALUES (?, ?, ?, ?, ?, ?)
            RETURNING id, email, password, name, location, profile_photo, availability
            "#,
        )
        .bind(new.email)
        .bind(new.password_hash)
        .bind(new.name)
        .bind(new.location)
        .bind(new.profile_photo)
        .bind(new.availability)
        .fetch_all(conn)
        .await
        .context("insert user")?;
        rows.pop().context("insert user returned no row")
    }
}

pub fn is_unique_violation(err: &anyhow::Error) -> bool {
    matches!(
        err.downcast_ref::<sqlx::Error>(),
        Some(sqlx::Error::Database(db_err)) if db_err.is_unique_violation()
    )
}
