use anyhow::Context;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqliteConnection};

/// Status given to every new request. Nothing moves it anywhere else.
pub const DEFAULT_STATUS: &str = "Pending";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct SkillSwapRequest {
    pub id: i64,
    pub user_id: i64,
    pub skills_offered: String,
    pub skills_wanted: String,
    pub message: Option<String>,
    pub status: String,
}

impl SkillSwapRequest {
    pub async fn create(
        conn: &mut SqliteConnection,
        user_id: i64,
        skills_offered: &str,
        skills_wanted: &str,
        message: Option<&str>,
    ) -> anyhow::Result<SkillSwapRequest> {
        // Drained with fetch_all so the insert commits before returning.
        let mut rows = sqlx::query_as::<_, SkillSwapRequest>(
            r#"
            INSERT INTO skill_swap_requests (user_id, skills_offered, skills_wanted, message, status)
            VALUES (?, ?, ?, ?, ?)
            RETURNING id, user_id, skills_offered, skills_wanted, message, status
            "#,
        )
        .bind(user_id)
        .bind(skills_offered)
        .bind(skills_wanted)
        .bind(message)
        .bind(DEFAULT_STATUS)
        .fetch_all(conn)
        .await
        .context("insert skill swap request")?;
        rows.pop().context("insert skill swap request returned no row")
    }

    /// Every request, oldest first.
    pub async fn list_all(conn: &mut SqliteConnection) -> anyhow::Result<Vec<SkillSwapRequest>> {
        let rows = sqlx::query_as::<_, SkillSwapRequest>(
            r#"
            SELECT id, user_id, skills_offered, skills_wanted, message, status
            FROM skill_swap_requests
            ORDER BY id
            "#,
        )
        .fetch_all(conn)
        .await
        .context("list skill swap requests")?;
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_pool;
    use crate::users::repo::{NewUser, User};

    #[tokio::test]
    async fn created_requests_are_pending_and_listed_in_order() {
        let (_dir, db) = test_pool().await;
        let mut conn = db.acquire().await.unwrap();
        let user = User::create(
            &mut conn,
            &NewUser {
                email: "a@x.com",
                password_hash: "hash",
                name: "Alice",
                location: None,
                profile_photo: None,
                availability: None,
            },
        )
        .await
        .unwrap();

        let first = SkillSwapRequest::create(&mut conn, user.id, "Guitar", "Chess", None)
            .await
            .unwrap();
        let second =
            SkillSwapRequest::create(&mut conn, user.id, "Cooking", "Photography", Some("hi"))
                .await
                .unwrap();
        assert_eq!(first.status, DEFAULT_STATUS);
        assert_eq!(second.user_id, user.id);
        assert!(second.id > first.id);

        let all = SkillSwapRequest::list_all(&mut conn).await.unwrap();
        assert_eq!(all, vec![first, second]);
    }

    #[tokio::test]
    async fn listing_an_empty_table_returns_nothing() {
        let (_dir, db) = test_pool().await;
        let mut conn = db.acquire().await.unwrap();
        assert!(SkillSwapRequest::list_all(&mut conn).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn created_request_is_listed_on_another_connection() {
        let (_dir, db) = test_pool().await;
        let mut writer = db.acquire().await.unwrap();
        let mut reader = db.acquire().await.unwrap();
        let user = User::create(
            &mut writer,
            &NewUser {
                email: "a@x.com",
                password_hash: "hash",
                name: "Alice",
                location: None,
                profile_photo: None,
                availability: None,
            },
        )
        .await
        .unwrap();

        let created = SkillSwapRequest::create(&mut writer, user.id, "Guitar", "Chess", None)
            .await
            .unwrap();

        let listed = SkillSwapRequest::list_all(&mut reader).await.unwrap();
        assert_eq!(listed, vec![created]);
    }
}
