//! Application state shared across handlers

use crate::auth::AuthService;
use crate::reviews::ReviewService;
use revue_core::{AlbumInfoGateway, AppConfig, CredentialStore, ReviewStore};
use std::sync::Arc;

/// Shared state: configuration plus the two domain services
///
/// Services hold their collaborators behind `Arc<dyn Trait>`, so a test
/// can assemble the same state over in-memory fakes.
pub struct AppState {
    pub config: AppConfig,
    pub auth: AuthService,
    pub reviews: ReviewService,
}

impl AppState {
    pub fn new(
        config: AppConfig,
        credentials: Arc<dyn CredentialStore>,
        reviews: Arc<dyn ReviewStore>,
        albums: Arc<dyn AlbumInfoGateway>,
    ) -> Self {
        let auth = AuthService::new(credentials.clone(), config.auth.clone());
        let reviews = ReviewService::new(reviews, credentials, albums);

        Self {
            config,
            auth,
            reviews,
        }
    }
}
