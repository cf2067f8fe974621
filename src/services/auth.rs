use chrono::Utc;
use rand::Rng;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::core::error::{ApiError, StoreError};
use crate::core::state::AppState;
use crate::models::auth::{GoogleRequest, SigninRequest, SignupRequest};
use crate::models::user::{initials_from, PublicUser, UserRecord};
use crate::utils::id::new_id;
use crate::utils::password::{generate_password, hash_password_blocking, verify_password_blocking};
use crate::validation::signup::validate_signup;
use crate::wal::wal::WalOperation;

pub const INVALID_CREDENTIALS: &str = "Invalid email/username or password";

/// Attempts at finding a free generated username before giving up
const USERNAME_ATTEMPTS: usize = 5;

/// Result of a successful authentication: the sanitized user plus a fresh
/// session token
#[derive(Debug)]
pub struct AuthOutcome {
    pub user: PublicUser,
    pub token: String,
    /// True when the call created the account
    pub created: bool,
}

pub async fn signup(state: &AppState, req: SignupRequest) -> Result<AuthOutcome, ApiError> {
    let input = validate_signup(req)?;

    let password_hash = hash_password_blocking(input.password).await?;
    let initials = initials_from(&input.username);
    let record = new_user_record(state, input.username, input.email, password_hash, initials);

    let user = persist_user(state, record)?;
    info!(user_id = %user.id, username = %user.username, "User signed up");

    issue(state, &user, true)
}

pub async fn signin(state: &AppState, req: SigninRequest) -> Result<AuthOutcome, ApiError> {
    let email = req.email.as_deref().map(str::trim).filter(|e| !e.is_empty());
    let username = req.username.as_deref().map(str::trim).filter(|u| !u.is_empty());
    let password = req.password.filter(|p| !p.is_empty());

    let password = match (email.or(username), password) {
        (Some(_), Some(password)) => password,
        _ => return Err(ApiError::Validation("All fields are required".to_string())),
    };

    let user = match state.users.find_by_identifier(email, username) {
        Some(user) => user,
        None => {
            debug!("Signin for unknown identifier");
            return Err(ApiError::Authentication(INVALID_CREDENTIALS.to_string()));
        }
    };

    if !verify_password_blocking(password, user.password_hash.clone()).await? {
        warn!(user_id = %user.id, "Signin with wrong password");
        return Err(ApiError::Authentication(INVALID_CREDENTIALS.to_string()));
    }

    info!(user_id = %user.id, "User signed in");
    issue(state, &user, false)
}

/// Google-style sign-in: log in by email, or create an account on first use
pub async fn federated_sign_in(state: &AppState, req: GoogleRequest) -> Result<AuthOutcome, ApiError> {
    let email = req.email.map(|e| e.trim().to_string()).filter(|e| !e.is_empty());
    let name = req.name.map(|n| n.trim().to_string()).filter(|n| !n.is_empty());

    let (email, name) = match (email, name) {
        (Some(email), Some(name)) => (email, name),
        _ => return Err(ApiError::Validation("All fields are required".to_string())),
    };

    if let Some(user) = state.users.find_by_email(&email) {
        info!(user_id = %user.id, "Federated sign-in for existing user");
        return issue(state, &user, false);
    }

    let password_hash = hash_password_blocking(generate_password()).await?;
    let initials = initials_from(&name);
    let base = username_base(&name);

    let candidates = (0..USERNAME_ATTEMPTS).map(|_| format!("{}{}", base, username_suffix()));
    let user = create_federated_user(state, candidates, &email, &password_hash, &initials)?;

    info!(user_id = %user.id, username = %user.username, "User created through federated sign-in");
    issue(state, &user, true)
}

/// Persist a federated account under the first free username in `candidates`
fn create_federated_user(
    state: &AppState,
    candidates: impl IntoIterator<Item = String>,
    email: &str,
    password_hash: &str,
    initials: &str,
) -> Result<Arc<UserRecord>, ApiError> {
    for (attempt, candidate) in candidates.into_iter().enumerate() {
        if state.users.username_taken(&candidate) {
            debug!(attempt, candidate = %candidate, "Generated username taken, retrying");
            continue;
        }

        let record = new_user_record(
            state,
            candidate,
            email.to_string(),
            password_hash.to_string(),
            initials.to_string(),
        );

        match persist_user(state, record) {
            Ok(user) => return Ok(user),
            Err(ApiError::Conflict(_)) if state.users.find_by_email(email).is_none() => {
                debug!(attempt, "Generated username claimed concurrently, retrying");
            }
            Err(e) => return Err(e),
        }
    }

    Err(ApiError::Conflict(
        "Could not generate a unique username, please try again".to_string(),
    ))
}

/// Display name lowercased, keeping only ASCII letters and digits:
/// "Jaco Canete" → "jacocanete"
pub fn username_base(name: &str) -> String {
    let base: String = name
        .to_lowercase()
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .collect();

    if base.is_empty() {
        "user".to_string()
    } else {
        base
    }
}

/// Four digits in 0..=8, the tail of a base-9 random fraction
fn username_suffix() -> String {
    let mut rng = rand::rng();
    (0..4)
        .map(|_| char::from(b'0' + rng.random_range(0..9u8)))
        .collect()
}

fn new_user_record(
    state: &AppState,
    username: String,
    email: String,
    password_hash: String,
    initials: String,
) -> UserRecord {
    let now = Utc::now();
    UserRecord {
        id: new_id(),
        username,
        email,
        password_hash,
        initials,
        avatar: state.config.auth.default_avatar.clone(),
        created_at: now,
        updated_at: now,
    }
}

/// Insert into the credential store and log to the WAL, undoing the insert
/// if the log write fails
fn persist_user(state: &AppState, record: UserRecord) -> Result<Arc<UserRecord>, ApiError> {
    let user = state.users.insert(record)?;

    if let Err(e) = state.wal.log_operation(&WalOperation::InsertUser((*user).clone())) {
        state.users.remove(&user.id);
        return Err(StoreError::Persistence(e).into());
    }

    Ok(user)
}

fn issue(state: &AppState, user: &UserRecord, created: bool) -> Result<AuthOutcome, ApiError> {
    let token = state.tokens.issue(&user.id)?;

    Ok(AuthOutcome {
        user: PublicUser::from(user),
        token,
        created,
    })
}
