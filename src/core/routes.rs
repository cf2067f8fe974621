// HTTP routes configuration

use crate::core::state::AppState;
use crate::handlers::{auth, fallback, health, review, university};
use axum::{
    routing::{any, get, post},
    Router,
};
use std::sync::Arc;
use tower_http::services::{ServeDir, ServeFile};

pub fn build_router(state: Arc<AppState>) -> Router {
    let static_dir = state.config.server.static_dir.clone();

    let router = Router::new()
        // Auth
        .route("/api/auth/signup", post(auth::signup_handler))
        .route("/api/auth/signin", post(auth::signin_handler))
        .route("/api/auth/google", post(auth::google_handler))
        .route("/api/auth/signout", post(auth::signout_handler))

        // Reviews
        .route("/api/review/create", post(review::create_review_handler))
        .route("/api/review/read", get(review::read_reviews_handler))

        // Catalog
        .route("/api/university/read", get(university::read_universities_handler))

        .route("/health", get(health::health_handler))

        // Unknown API paths never fall through to the SPA
        .route("/api", any(fallback::fallback_handler))
        .route("/api/{*rest}", any(fallback::fallback_handler))
        .method_not_allowed_fallback(fallback::method_not_allowed_handler);

    // Everything else is the front-end bundle, with index.html for client-side routes
    let router = match static_dir {
        Some(dir) => {
            let index = ServeFile::new(dir.join("index.html"));
            router.fallback_service(ServeDir::new(dir).fallback(index))
        }
        None => router.fallback(fallback::fallback_handler),
    };

    router.with_state(state)
}
