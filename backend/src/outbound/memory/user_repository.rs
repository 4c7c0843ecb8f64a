//! In-memory `UserRepository`.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{EmailAddress, User, UserId};

/// User store held in a `HashMap` keyed by id.
///
/// Email uniqueness is checked under the same lock as the write, so two
/// concurrent registrations for one address cannot both succeed.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    users: Mutex<HashMap<UserId, User>>,
}

impl InMemoryUserRepository {
    /// Empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored users.
    ///
    /// # Errors
    /// Fails when a writer panicked while holding the store lock.
    pub fn len(&self) -> Result<usize, UserPersistenceError> {
        self.lock().map(|users| users.len())
    }

    /// Whether no users are stored.
    ///
    /// # Errors
    /// Fails when a writer panicked while holding the store lock.
    pub fn is_empty(&self) -> Result<bool, UserPersistenceError> {
        self.len().map(|count| count == 0)
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<UserId, User>>, UserPersistenceError> {
        self.users
            .lock()
            .map_err(|_| UserPersistenceError::query("user store lock poisoned"))
    }
}

fn email_owned_by_other(users: &HashMap<UserId, User>, candidate: &User) -> bool {
    users
        .values()
        .any(|existing| existing.email() == candidate.email() && existing.id() != candidate.id())
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn insert(&self, user: &User) -> Result<(), UserPersistenceError> {
        let mut users = self.lock()?;
        if email_owned_by_other(&users, user) {
            return Err(UserPersistenceError::duplicate_email(user.email().as_ref()));
        }
        if users.contains_key(user.id()) {
            return Err(UserPersistenceError::query("user id already exists"));
        }
        users.insert(*user.id(), user.clone());
        Ok(())
    }

    async fn update(&self, user: &User) -> Result<(), UserPersistenceError> {
        let mut users = self.lock()?;
        if email_owned_by_other(&users, user) {
            return Err(UserPersistenceError::duplicate_email(user.email().as_ref()));
        }
        match users.get_mut(user.id()) {
            Some(slot) => {
                *slot = user.clone();
                Ok(())
            }
            None => Err(UserPersistenceError::missing(user.id().to_string())),
        }
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        Ok(self.lock()?.get(id).cloned())
    }

    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<User>, UserPersistenceError> {
        Ok(self
            .lock()?
            .values()
            .find(|user| user.email() == email)
            .cloned())
    }
}
