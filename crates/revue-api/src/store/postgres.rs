//! PostgreSQL store implementations
//!
//! Durable backing over `sqlx::PgPool`. Page queries pair a COUNT with a
//! LIMIT/OFFSET slice; ordering is publication time descending with the id
//! as a deterministic tiebreak. The schema lives in
//! `migrations/0001_init.sql`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use revue_core::{
    CredentialStore, Result, Review, ReviewStore, Role, RevueError, UserAccount,
};
use sqlx::PgPool;
use uuid::Uuid;

fn store_err(e: sqlx::Error) -> RevueError {
    RevueError::Store(e.to_string())
}

#[derive(sqlx::FromRow)]
struct AccountRow {
    id: Uuid,
    username: String,
    password_hash: String,
    roles: Vec<String>,
    created_at: DateTime<Utc>,
}

impl From<AccountRow> for UserAccount {
    fn from(row: AccountRow) -> Self {
        let roles: Vec<Role> = row.roles.iter().filter_map(|r| Role::parse(r)).collect();
        UserAccount {
            id: row.id,
            username: row.username,
            password_hash: row.password_hash,
            // The role set is non-empty by construction; guard anyway in
            // case of hand-edited rows.
            roles: if roles.is_empty() {
                vec![Role::User]
            } else {
                roles
            },
            created_at: row.created_at,
        }
    }
}

/// Credential store over the `users` table
pub struct PgCredentialStore {
    pool: PgPool,
}

impl PgCredentialStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CredentialStore for PgCredentialStore {
    async fn exists(&self, username: &str) -> Result<bool> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users WHERE username = $1")
            .bind(username)
            .fetch_one(&self.pool)
            .await
            .map_err(store_err)?;

        Ok(count > 0)
    }

    async fn insert(&self, account: UserAccount) -> Result<UserAccount> {
        let roles: Vec<String> = account.roles.iter().map(|r| r.as_str().to_string()).collect();

        sqlx::query(
            "INSERT INTO users (id, username, password_hash, roles, created_at) \
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(account.id)
        .bind(&account.username)
        .bind(&account.password_hash)
        .bind(&roles)
        .bind(account.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| match e.as_database_error() {
            Some(db) if matches!(db.kind(), sqlx::error::ErrorKind::UniqueViolation) => {
                RevueError::UsernameTaken
            }
            _ => store_err(e),
        })?;

        Ok(account)
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<UserAccount>> {
        let row = sqlx::query_as::<_, AccountRow>(
            "SELECT id, username, password_hash, roles, created_at \
             FROM users WHERE username = $1",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await
        .map_err(store_err)?;

        Ok(row.map(UserAccount::from))
    }
}

#[derive(sqlx::FromRow)]
struct ReviewRow {
    id: Uuid,
    album_id: String,
    user_id: Uuid,
    username: String,
    title: String,
    content: String,
    score: i32,
    likes: i64,
    published_at: DateTime<Utc>,
}

impl From<ReviewRow> for Review {
    fn from(row: ReviewRow) -> Self {
        Review {
            id: row.id,
            album_id: row.album_id,
            user_id: row.user_id,
            username: row.username,
            title: row.title,
            content: row.content,
            score: row.score,
            likes: row.likes,
            published_at: row.published_at,
        }
    }
}

const REVIEW_SELECT: &str = "SELECT r.id, r.album_id, r.user_id, u.username, r.title, \
     r.content, r.score, r.likes, r.published_at \
     FROM reviews r JOIN users u ON u.id = r.user_id";

/// Review store over the `reviews` table
pub struct PgReviewStore {
    pool: PgPool,
}

impl PgReviewStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReviewStore for PgReviewStore {
    async fn insert(&self, review: Review) -> Result<Review> {
        sqlx::query(
            "INSERT INTO reviews (id, album_id, user_id, title, content, score, likes, published_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)",
        )
        .bind(review.id)
        .bind(&review.album_id)
        .bind(review.user_id)
        .bind(&review.title)
        .bind(&review.content)
        .bind(review.score)
        .bind(review.likes)
        .bind(review.published_at)
        .execute(&self.pool)
        .await
        .map_err(store_err)?;

        Ok(review)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Review>> {
        let row = sqlx::query_as::<_, ReviewRow>(&format!("{REVIEW_SELECT} WHERE r.id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(store_err)?;

        Ok(row.map(Review::from))
    }

    async fn update(&self, review: Review) -> Result<Review> {
        let result = sqlx::query(
            "UPDATE reviews SET title = $1, content = $2, score = $3 WHERE id = $4",
        )
        .bind(&review.title)
        .bind(&review.content)
        .bind(review.score)
        .bind(review.id)
        .execute(&self.pool)
        .await
        .map_err(store_err)?;

        if result.rows_affected() == 0 {
            return Err(RevueError::ReviewNotFound);
        }

        Ok(review)
    }

    async fn delete(&self, id: Uuid) -> Result<()> {
        sqlx::query("DELETE FROM reviews WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(store_err)?;

        Ok(())
    }

    async fn page_by_album(
        &self,
        album_id: &str,
        offset: u64,
        limit: u64,
    ) -> Result<(Vec<Review>, u64)> {
        let total =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM reviews WHERE album_id = $1")
                .bind(album_id)
                .fetch_one(&self.pool)
                .await
                .map_err(store_err)?;

        let rows = sqlx::query_as::<_, ReviewRow>(&format!(
            "{REVIEW_SELECT} WHERE r.album_id = $1 \
             ORDER BY r.published_at DESC, r.id LIMIT $2 OFFSET $3"
        ))
        .bind(album_id)
        .bind(limit as i64)
        .bind(offset as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(store_err)?;

        Ok((rows.into_iter().map(Review::from).collect(), total as u64))
    }

    async fn page_by_user(
        &self,
        user_id: Uuid,
        offset: u64,
        limit: u64,
    ) -> Result<(Vec<Review>, u64)> {
        let total =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM reviews WHERE user_id = $1")
                .bind(user_id)
                .fetch_one(&self.pool)
                .await
                .map_err(store_err)?;

        let rows = sqlx::query_as::<_, ReviewRow>(&format!(
            "{REVIEW_SELECT} WHERE r.user_id = $1 \
             ORDER BY r.published_at DESC, r.id LIMIT $2 OFFSET $3"
        ))
        .bind(user_id)
        .bind(limit as i64)
        .bind(offset as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(store_err)?;

        Ok((rows.into_iter().map(Review::from).collect(), total as u64))
    }
}
