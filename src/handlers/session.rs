use axum::{extract::FromRequestParts, http::request::Parts};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use std::sync::Arc;
use tracing::debug;

use crate::core::config::AuthConfig;
use crate::core::error::ApiError;
use crate::core::state::AppState;
use crate::utils::token::SESSION_COOKIE;

/// Authenticated caller, resolved from the session cookie
///
/// Rejects with 401 "Unauthorized" when the cookie is missing, malformed,
/// signed with another secret or expired.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub id: String,
}

impl FromRequestParts<Arc<AppState>> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);

        let Some(cookie) = jar.get(SESSION_COOKIE) else {
            debug!("Request without session cookie");
            return Err(ApiError::unauthorized());
        };

        match state.tokens.verify(cookie.value()) {
            Some(claims) => Ok(AuthUser { id: claims.id }),
            None => {
                debug!("Rejected invalid or expired session token");
                Err(ApiError::unauthorized())
            }
        }
    }
}

pub fn session_cookie(auth: &AuthConfig, token: String) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, token))
        .http_only(true)
        .path("/")
        .same_site(SameSite::Lax)
        .secure(auth.cookie_secure)
        .build()
}

/// Removal cookie; path must match the one the session was set with
pub fn expired_session_cookie() -> Cookie<'static> {
    Cookie::build(SESSION_COOKIE).path("/").build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::state::test_support::create_test_state;
    use axum::http::{header, Request};

    async fn extract(cookie: Option<&str>, state: &Arc<AppState>) -> Result<AuthUser, ApiError> {
        let mut builder = Request::builder().uri("/api/review/create");
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        let (mut parts, _) = builder.body(()).unwrap().into_parts();
        AuthUser::from_request_parts(&mut parts, state).await
    }

    #[tokio::test]
    async fn test_valid_cookie_yields_user() {
        let (state, _dir) = create_test_state();
        let token = state.tokens.issue("aaaaaaaaaaaaaaaaaaaaaaaa").unwrap();

        let user = extract(Some(&format!("access_token={}", token)), &state)
            .await
            .unwrap();
        assert_eq!(user.id, "aaaaaaaaaaaaaaaaaaaaaaaa");
    }

    #[tokio::test]
    async fn test_missing_cookie_rejected() {
        let (state, _dir) = create_test_state();

        let err = extract(None, &state).await.unwrap_err();
        assert!(matches!(err, ApiError::Authentication(ref m) if m == "Unauthorized"));
    }

    #[tokio::test]
    async fn test_garbage_and_expired_tokens_rejected() {
        let (state, _dir) = create_test_state();
        let expired = state.tokens.issue_at("someone", 1_000).unwrap();

        for cookie in ["access_token=garbage".to_string(), format!("access_token={}", expired)] {
            let err = extract(Some(&cookie), &state).await.unwrap_err();
            assert!(matches!(err, ApiError::Authentication(_)));
        }
    }

    #[test]
    fn test_session_cookie_attributes() {
        let (state, _dir) = create_test_state();
        let cookie = session_cookie(&state.config.auth, "tok".to_string());

        assert_eq!(cookie.name(), "access_token");
        assert_eq!(cookie.value(), "tok");
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.path(), Some("/"));
        assert_eq!(cookie.same_site(), Some(SameSite::Lax));
    }
}
