// Application state (AppState)

use crate::core::config::Config;
use crate::stores::{review_store::ReviewStore, university_store::UniversityStore, user_store::UserStore};
use crate::utils::token::TokenIssuer;
use crate::wal::wal::Wal;
use std::sync::{Arc, Mutex};

/// Shared application state
///
/// Contains all shared components that are accessed by request handlers.
/// All fields are wrapped in Arc for efficient cloning across threads.
#[derive(Clone)]
pub struct AppState {
    /// Credential store
    pub users: Arc<UserStore>,

    /// Reviews indexed by university
    pub reviews: Arc<ReviewStore>,

    /// University catalog
    pub universities: Arc<UniversityStore>,

    /// Session token signer/verifier
    pub tokens: TokenIssuer,

    /// Write-Ahead Log for persistence
    pub wal: Arc<Wal>,

    /// Configuration
    pub config: Arc<Config>,

    /// Held while a university's rating aggregates are recomputed
    pub catalog_lock: Arc<Mutex<()>>,
}

impl AppState {
    pub fn new(config: Config, wal: Wal) -> Self {
        let config = Arc::new(config);

        let tokens = TokenIssuer::new(&config.auth.jwt_secret, config.auth.token_ttl_secs);

        Self {
            users: Arc::new(UserStore::new()),
            reviews: Arc::new(ReviewStore::new()),
            universities: Arc::new(UniversityStore::new()),
            tokens,
            wal: Arc::new(wal),
            config,
            catalog_lock: Arc::new(Mutex::new(())),
        }
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use crate::core::config::test_config;
    use tempfile::TempDir;

    /// State backed by a WAL in a temp dir; keep the `TempDir` alive for the test
    pub fn create_test_state() -> (Arc<AppState>, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let wal_path = temp_dir.path().join("test.wal");
        let wal = Wal::new(wal_path.clone()).unwrap();

        (Arc::new(AppState::new(test_config(wal_path), wal)), temp_dir)
    }
}
