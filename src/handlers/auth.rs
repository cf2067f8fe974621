use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use axum_extra::extract::cookie::CookieJar;
use std::sync::Arc;
use tracing::{info, instrument};

use crate::core::error::ApiError;
use crate::core::state::AppState;
use crate::handlers::session::{expired_session_cookie, session_cookie};
use crate::models::auth::{GoogleRequest, SigninRequest, SignupRequest, SignupResponse, SuccessResponse};
use crate::services::auth::{self, AuthOutcome};

/// POST /api/auth/signup
#[instrument(skip_all)]
pub async fn signup_handler(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    payload: Result<Json<SignupRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(req) = payload?;
    let AuthOutcome { user, token, .. } = auth::signup(&state, req).await?;

    let jar = jar.add(session_cookie(&state.config.auth, token));
    let body = SignupResponse {
        success: true,
        message: "Signup successful".to_string(),
        user,
    };

    Ok((StatusCode::CREATED, jar, Json(body)).into_response())
}

/// POST /api/auth/signin
#[instrument(skip_all)]
pub async fn signin_handler(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    payload: Result<Json<SigninRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(req) = payload?;
    let AuthOutcome { user, token, .. } = auth::signin(&state, req).await?;

    let jar = jar.add(session_cookie(&state.config.auth, token));
    Ok((StatusCode::OK, jar, Json(user)).into_response())
}

/// POST /api/auth/google
///
/// 200 for an existing account, 201 when the account was created.
#[instrument(skip_all)]
pub async fn google_handler(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    payload: Result<Json<GoogleRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(req) = payload?;
    let AuthOutcome { user, token, created } = auth::federated_sign_in(&state, req).await?;

    let status = if created { StatusCode::CREATED } else { StatusCode::OK };
    let jar = jar.add(session_cookie(&state.config.auth, token));
    Ok((status, jar, Json(user)).into_response())
}

/// POST /api/auth/signout
pub async fn signout_handler(jar: CookieJar) -> Response {
    info!("User signed out");

    let jar = jar.remove(expired_session_cookie());
    let body = SuccessResponse {
        success: true,
        message: "User has been signed out".to_string(),
    };

    (StatusCode::OK, jar, Json(body)).into_response()
}
