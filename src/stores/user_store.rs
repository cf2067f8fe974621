use crate::core::error::StoreError;
use crate::models::user::UserRecord;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::sync::Arc;

/// In-memory credential store
///
/// Records are keyed by id; username and email each have a unique index.
/// Emails are indexed case-insensitively.
pub struct UserStore {
    users: DashMap<String, Arc<UserRecord>>,
    by_username: DashMap<String, String>,
    by_email: DashMap<String, String>,
}

fn email_key(email: &str) -> String {
    email.trim().to_lowercase()
}

impl UserStore {
    pub fn new() -> Self {
        Self {
            users: DashMap::new(),
            by_username: DashMap::new(),
            by_email: DashMap::new(),
        }
    }

    /// Insert a new user, claiming its username and email
    ///
    /// Fails without modifying the store if either is already taken.
    pub fn insert(&self, user: UserRecord) -> Result<Arc<UserRecord>, StoreError> {
        match self.by_username.entry(user.username.clone()) {
            Entry::Occupied(_) => return Err(StoreError::Duplicate { field: "username" }),
            Entry::Vacant(slot) => {
                slot.insert(user.id.clone());
            }
        }

        match self.by_email.entry(email_key(&user.email)) {
            Entry::Occupied(_) => {
                self.by_username.remove(&user.username);
                return Err(StoreError::Duplicate { field: "email" });
            }
            Entry::Vacant(slot) => {
                slot.insert(user.id.clone());
            }
        }

        let user = Arc::new(user);
        self.users.insert(user.id.clone(), Arc::clone(&user));
        Ok(user)
    }

    /// Remove a user and release its username and email
    pub fn remove(&self, id: &str) -> Option<Arc<UserRecord>> {
        let (_, user) = self.users.remove(id)?;
        self.by_username.remove(&user.username);
        self.by_email.remove(&email_key(&user.email));
        Some(user)
    }

    pub fn get(&self, id: &str) -> Option<Arc<UserRecord>> {
        self.users.get(id).map(|entry| Arc::clone(entry.value()))
    }

    pub fn find_by_email(&self, email: &str) -> Option<Arc<UserRecord>> {
        let id = self.by_email.get(&email_key(email))?.value().clone();
        self.get(&id)
    }

    pub fn find_by_username(&self, username: &str) -> Option<Arc<UserRecord>> {
        let id = self.by_username.get(username)?.value().clone();
        self.get(&id)
    }

    /// First user whose email OR username matches; absent identifiers match nothing
    pub fn find_by_identifier(
        &self,
        email: Option<&str>,
        username: Option<&str>,
    ) -> Option<Arc<UserRecord>> {
        email
            .and_then(|email| self.find_by_email(email))
            .or_else(|| username.and_then(|username| self.find_by_username(username)))
    }

    pub fn username_taken(&self, username: &str) -> bool {
        self.by_username.contains_key(username)
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

impl Default for UserStore {
    fn default() -> Self {
        Self::new()
    }
}
