//! Port abstraction for user persistence adapters and their errors.
use async_trait::async_trait;

use crate::domain::{EmailAddress, User, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}",
        /// Another user already owns the email address.
        DuplicateEmail { email: String } => "email already registered: {email}",
        /// Update targeted a user that does not exist.
        Missing { id: String } => "user not found: {id}",
    }
}

/// Driven port owning user records.
///
/// Emails are compared exactly; callers pass normalised [`EmailAddress`]
/// values so lookups match what creation stored.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Store a new user. Fails with `DuplicateEmail` when the email is taken.
    async fn insert(&self, user: &User) -> Result<(), UserPersistenceError>;

    /// Replace an existing user record.
    ///
    /// Fails with `DuplicateEmail` when the new email belongs to another user
    /// and with `Missing` when the id is unknown.
    async fn update(&self, user: &User) -> Result<(), UserPersistenceError>;

    /// Fetch a user by identifier.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError>;

    /// Fetch a user by normalised email.
    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<User>, UserPersistenceError>;
}
