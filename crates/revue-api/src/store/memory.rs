//! In-memory store implementations
//!
//! The default backing when no database is configured, and the substrate
//! for tests. Consistency comes from a `tokio::sync::RwLock` around each
//! map; page queries sort on demand, which is fine at this scale.

use async_trait::async_trait;
use revue_core::{
    CredentialStore, Result, Review, ReviewStore, RevueError, UserAccount,
};
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Credential store backed by a username-keyed map
#[derive(Default)]
pub struct MemoryCredentialStore {
    accounts: RwLock<HashMap<String, UserAccount>>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CredentialStore for MemoryCredentialStore {
    async fn exists(&self, username: &str) -> Result<bool> {
        Ok(self.accounts.read().await.contains_key(username))
    }

    async fn insert(&self, account: UserAccount) -> Result<UserAccount> {
        let mut accounts = self.accounts.write().await;
        if accounts.contains_key(&account.username) {
            return Err(RevueError::UsernameTaken);
        }
        accounts.insert(account.username.clone(), account.clone());
        Ok(account)
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<UserAccount>> {
        Ok(self.accounts.read().await.get(username).cloned())
    }
}

/// Review store backed by an id-keyed map
#[derive(Default)]
pub struct MemoryReviewStore {
    reviews: RwLock<HashMap<Uuid, Review>>,
}

impl MemoryReviewStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Order matching records newest-first (id as a deterministic tiebreak)
    /// and cut the requested slice.
    fn page(mut matching: Vec<Review>, offset: u64, limit: u64) -> (Vec<Review>, u64) {
        let total = matching.len() as u64;

        matching.sort_by(|a, b| {
            b.published_at
                .cmp(&a.published_at)
                .then_with(|| a.id.cmp(&b.id))
        });

        let slice = matching
            .into_iter()
            .skip(offset as usize)
            .take(limit as usize)
            .collect();

        (slice, total)
    }
}

#[async_trait]
impl ReviewStore for MemoryReviewStore {
    async fn insert(&self, review: Review) -> Result<Review> {
        self.reviews
            .write()
            .await
            .insert(review.id, review.clone());
        Ok(review)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Review>> {
        Ok(self.reviews.read().await.get(&id).cloned())
    }

    async fn update(&self, review: Review) -> Result<Review> {
        let mut reviews = self.reviews.write().await;
        if !reviews.contains_key(&review.id) {
            return Err(RevueError::ReviewNotFound);
        }
        reviews.insert(review.id, review.clone());
        Ok(review)
    }

    async fn delete(&self, id: Uuid) -> Result<()> {
        self.reviews.write().await.remove(&id);
        Ok(())
    }

    async fn page_by_album(
        &self,
        album_id: &str,
        offset: u64,
        limit: u64,
    ) -> Result<(Vec<Review>, u64)> {
        let matching = self
            .reviews
            .read()
            .await
            .values()
            .filter(|r| r.album_id == album_id)
            .cloned()
            .collect();

        Ok(Self::page(matching, offset, limit))
    }

    async fn page_by_user(
        &self,
        user_id: Uuid,
        offset: u64,
        limit: u64,
    ) -> Result<(Vec<Review>, u64)> {
        let matching = self
            .reviews
            .read()
            .await
            .values()
            .filter(|r| r.user_id == user_id)
            .cloned()
            .collect();

        Ok(Self::page(matching, offset, limit))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn review_for(album_id: &str, user_id: Uuid, age_mins: i64) -> Review {
        let mut review = Review::new(user_id, "alice", album_id, "t", "c", 5);
        review.published_at = Utc::now() - Duration::minutes(age_mins);
        review
    }

    #[tokio::test]
    async fn test_duplicate_username_rejected() {
        let store = MemoryCredentialStore::new();

        store
            .insert(UserAccount::new("alice", "hash-1"))
            .await
            .unwrap();
        let result = store.insert(UserAccount::new("alice", "hash-2")).await;
        assert!(matches!(result, Err(RevueError::UsernameTaken)));

        // Original entry untouched
        let kept = store.find_by_username("alice").await.unwrap().unwrap();
        assert_eq!(kept.password_hash, "hash-1");
    }

    #[tokio::test]
    async fn test_page_by_album_ordering_and_total() {
        let store = MemoryReviewStore::new();
        let user = Uuid::new_v4();

        // Inserted out of order; ages 0, 10, 20 minutes
        for age in [10, 0, 20] {
            store.insert(review_for("album-1", user, age)).await.unwrap();
        }
        store
            .insert(review_for("album-2", user, 5))
            .await
            .unwrap();

        let (page, total) = store.page_by_album("album-1", 0, 10).await.unwrap();
        assert_eq!(total, 3);
        assert_eq!(page.len(), 3);
        assert!(page.windows(2).all(|w| w[0].published_at >= w[1].published_at));
    }

    #[tokio::test]
    async fn test_paging_slices_without_overlap() {
        let store = MemoryReviewStore::new();
        let user = Uuid::new_v4();

        for age in 0..5 {
            store.insert(review_for("album-1", user, age)).await.unwrap();
        }

        let (first, total) = store.page_by_album("album-1", 0, 2).await.unwrap();
        let (second, _) = store.page_by_album("album-1", 2, 2).await.unwrap();
        let (third, _) = store.page_by_album("album-1", 4, 2).await.unwrap();

        assert_eq!(total, 5);
        let seen: std::collections::HashSet<Uuid> = first
            .iter()
            .chain(second.iter())
            .chain(third.iter())
            .map(|r| r.id)
            .collect();
        assert_eq!(seen.len(), 5);
    }

    #[tokio::test]
    async fn test_update_missing_review() {
        let store = MemoryReviewStore::new();
        let review = review_for("album-1", Uuid::new_v4(), 0);

        let result = store.update(review).await;
        assert!(matches!(result, Err(RevueError::ReviewNotFound)));
    }

    #[tokio::test]
    async fn test_delete_then_find() {
        let store = MemoryReviewStore::new();
        let review = review_for("album-1", Uuid::new_v4(), 0);
        let id = review.id;

        store.insert(review).await.unwrap();
        store.delete(id).await.unwrap();

        assert!(store.find_by_id(id).await.unwrap().is_none());
    }
}
