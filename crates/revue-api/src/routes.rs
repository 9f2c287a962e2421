//! API route definitions

use crate::auth::middleware::require_auth;
use crate::handlers::{auth, reviews};
use crate::state::AppState;
use axum::{
    middleware,
    routing::{delete, get, post, put},
    Router,
};
use std::sync::Arc;

/// Create the `/api` routes
///
/// Listings by album and single fetches are public; listing by user and
/// all mutations sit behind the auth middleware.
pub fn api_routes(state: Arc<AppState>) -> Router<Arc<AppState>> {
    let public_routes = Router::new()
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route("/reviews/album/:album_id", get(reviews::list_by_album))
        .route("/reviews/:id", get(reviews::get_review));

    let protected_routes = Router::new()
        .route("/reviews/user/:username", get(reviews::list_by_user))
        .route("/reviews", post(reviews::create_review))
        .route("/reviews/:id", put(reviews::update_review))
        .route("/reviews/:id", delete(reviews::delete_review))
        .layer(middleware::from_fn_with_state(state, require_auth));

    Router::new().merge(public_routes).merge(protected_routes)
}
