//! Review access service
//!
//! The orchestrator over the review store, credential store, and album
//! gateway: composes paginated listings, enforces the owner-may-edit rule
//! on mutations, and enriches detailed listings with album metadata.

use crate::auth::CurrentUser;
use chrono::{DateTime, Utc};
use revue_core::{
    AlbumInfo, AlbumInfoGateway, CredentialStore, PageRequest, PageResponse, Result, Review,
    ReviewStore, RevueError,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Payload for creating a review
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReviewInput {
    #[validate(length(min = 1, max = 64))]
    pub album_id: String,

    #[validate(length(min = 1, max = 200))]
    pub title: String,

    #[serde(default)]
    pub content: String,

    #[validate(range(min = 1, max = 10))]
    pub score: i32,
}

/// Partial update payload
///
/// Absent fields leave the stored values untouched. A supplied score of 0
/// is also a no-op, keeping the wire convention of the numeric sentinel
/// observable alongside the optional-field semantics.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct ReviewPatch {
    pub title: Option<String>,
    pub content: Option<String>,
    pub score: Option<i32>,
}

/// Review representation for listings and single fetches
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReviewSummary {
    pub id: Uuid,
    pub album_id: String,
    pub username: String,
    pub title: String,
    pub content: String,
    pub score: i32,
    pub likes: i64,
    pub date_of_publication: DateTime<Utc>,
}

impl From<Review> for ReviewSummary {
    fn from(review: Review) -> Self {
        Self {
            id: review.id,
            album_id: review.album_id,
            username: review.username,
            title: review.title,
            content: review.content,
            score: review.score,
            likes: review.likes,
            date_of_publication: review.published_at,
        }
    }
}

/// Review enriched with album metadata
///
/// `album_details` is omitted and `partial` set when the gateway lookup for
/// this item failed; the surrounding page is never aborted for it.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewDetailed {
    #[serde(flatten)]
    pub review: ReviewSummary,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub album_details: Option<AlbumInfo>,

    pub partial: bool,
}

/// Apply a partial update to a review record
///
/// Field order mirrors the overwrite semantics: score only when supplied
/// and non-zero, content and title only when supplied.
fn apply_patch(review: &mut Review, patch: ReviewPatch) {
    if let Some(score) = patch.score {
        if score != 0 {
            review.score = score;
        }
    }
    if let Some(content) = patch.content {
        review.content = content;
    }
    if let Some(title) = patch.title {
        review.title = title;
    }
}

/// Review access service
#[derive(Clone)]
pub struct ReviewService {
    reviews: Arc<dyn ReviewStore>,
    credentials: Arc<dyn CredentialStore>,
    albums: Arc<dyn AlbumInfoGateway>,
}

impl ReviewService {
    pub fn new(
        reviews: Arc<dyn ReviewStore>,
        credentials: Arc<dyn CredentialStore>,
        albums: Arc<dyn AlbumInfoGateway>,
    ) -> Self {
        Self {
            reviews,
            credentials,
            albums,
        }
    }

    /// List reviews for an album, newest publication first
    ///
    /// No enrichment: the caller already knows the album.
    pub async fn list_by_album(
        &self,
        album_id: &str,
        page: PageRequest,
    ) -> Result<PageResponse<ReviewSummary>> {
        let (records, total) = self
            .reviews
            .page_by_album(album_id, page.offset(), page.limit())
            .await?;

        let content = records.into_iter().map(ReviewSummary::from).collect();
        Ok(PageResponse::new(content, &page, total))
    }

    /// List a user's reviews, newest publication first, with album metadata
    pub async fn list_by_username(
        &self,
        username: &str,
        page: PageRequest,
    ) -> Result<PageResponse<ReviewDetailed>> {
        let account = self
            .credentials
            .find_by_username(username)
            .await?
            .ok_or(RevueError::UnknownUser)?;

        let (records, total) = self
            .reviews
            .page_by_user(account.id, page.offset(), page.limit())
            .await?;

        // One gateway lookup per distinct album id in the page; a failed
        // lookup is recorded and the item ships without enrichment.
        let mut fetched: HashMap<String, Option<AlbumInfo>> = HashMap::new();
        let mut content = Vec::with_capacity(records.len());

        for record in records {
            let album = match fetched.get(&record.album_id) {
                Some(cached) => cached.clone(),
                None => {
                    let looked_up = match self.albums.album_info(&record.album_id).await {
                        Ok(info) => Some(info),
                        Err(e) => {
                            tracing::warn!(
                                album_id = %record.album_id,
                                error = %e,
                                "album enrichment failed, returning partial item"
                            );
                            None
                        }
                    };
                    fetched.insert(record.album_id.clone(), looked_up.clone());
                    looked_up
                }
            };

            let partial = album.is_none();
            content.push(ReviewDetailed {
                review: ReviewSummary::from(record),
                album_details: album,
                partial,
            });
        }

        Ok(PageResponse::new(content, &page, total))
    }

    pub async fn get_by_id(&self, review_id: Uuid) -> Result<ReviewSummary> {
        let review = self
            .reviews
            .find_by_id(review_id)
            .await?
            .ok_or(RevueError::ReviewNotFound)?;

        Ok(ReviewSummary::from(review))
    }

    /// Create a review owned by the caller
    ///
    /// The publication timestamp comes from the server clock, never from
    /// the caller.
    pub async fn create(&self, caller: &CurrentUser, input: ReviewInput) -> Result<ReviewSummary> {
        input
            .validate()
            .map_err(|e| RevueError::Validation(e.to_string()))?;

        let review = Review::new(
            caller.id,
            &caller.username,
            input.album_id,
            input.title,
            input.content,
            input.score,
        );

        let stored = self.reviews.insert(review).await?;
        tracing::info!(review_id = %stored.id, username = %caller.username, "review created");

        Ok(ReviewSummary::from(stored))
    }

    /// Partially update a review the caller owns
    pub async fn update(
        &self,
        caller: &CurrentUser,
        review_id: Uuid,
        patch: ReviewPatch,
    ) -> Result<ReviewSummary> {
        let mut review = self
            .reviews
            .find_by_id(review_id)
            .await?
            .ok_or(RevueError::ReviewNotFound)?;

        if !review.is_owned_by(&caller.username) {
            return Err(RevueError::NotOwner);
        }

        apply_patch(&mut review, patch);

        let updated = self.reviews.update(review).await?;
        Ok(ReviewSummary::from(updated))
    }

    /// Delete a review the caller owns
    pub async fn delete(&self, caller: &CurrentUser, review_id: Uuid) -> Result<()> {
        let review = self
            .reviews
            .find_by_id(review_id)
            .await?
            .ok_or(RevueError::ReviewNotFound)?;

        if !review.is_owned_by(&caller.username) {
            return Err(RevueError::NotOwner);
        }

        self.reviews.delete(review.id).await?;
        tracing::info!(review_id = %review.id, username = %caller.username, "review deleted");

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_review() -> Review {
        Review::new(Uuid::new_v4(), "alice", "album-1", "Great", "A classic.", 9)
    }

    #[test]
    fn test_patch_absent_fields_untouched() {
        let mut review = sample_review();
        apply_patch(&mut review, ReviewPatch::default());

        assert_eq!(review.title, "Great");
        assert_eq!(review.content, "A classic.");
        assert_eq!(review.score, 9);
    }

    #[test]
    fn test_patch_score_zero_is_noop() {
        let mut review = sample_review();
        apply_patch(
            &mut review,
            ReviewPatch {
                score: Some(0),
                ..Default::default()
            },
        );

        assert_eq!(review.score, 9);
    }

    #[test]
    fn test_patch_overwrites_supplied_fields() {
        let mut review = sample_review();
        apply_patch(
            &mut review,
            ReviewPatch {
                title: Some("Revisited".to_string()),
                content: None,
                score: Some(7),
            },
        );

        assert_eq!(review.title, "Revisited");
        assert_eq!(review.content, "A classic.");
        assert_eq!(review.score, 7);
    }

    #[test]
    fn test_patch_never_touches_identity_fields() {
        let mut review = sample_review();
        let id = review.id;
        let owner = review.username.clone();
        let published = review.published_at;

        apply_patch(
            &mut review,
            ReviewPatch {
                title: Some("x".to_string()),
                content: Some("y".to_string()),
                score: Some(1),
            },
        );

        assert_eq!(review.id, id);
        assert_eq!(review.username, owner);
        assert_eq!(review.published_at, published);
    }
}
