//! Port abstraction for one-way password hashing.
//!
//! Hashing is CPU bound and synchronous; callers decide whether to move it
//! off the async executor.

use crate::domain::{Password, PasswordHash};

use super::define_port_error;

define_port_error! {
    /// Errors raised by password hashing adapters.
    pub enum PasswordHashError {
        /// Hash computation failed.
        Hashing { message: String } => "password hashing failed: {message}",
        /// The stored hash could not be parsed.
        MalformedHash { message: String } => "stored password hash is malformed: {message}",
    }
}

/// Driven port for hashing and verifying passwords.
#[cfg_attr(test, mockall::automock)]
pub trait PasswordHasher: Send + Sync {
    /// Hash a policy-compliant password with a fresh salt.
    fn hash(&self, password: &Password) -> Result<PasswordHash, PasswordHashError>;

    /// Check a plaintext candidate against a stored hash.
    ///
    /// A mismatch is `Ok(false)`; only unreadable hashes are errors.
    fn verify(&self, candidate: &str, hash: &PasswordHash) -> Result<bool, PasswordHashError>;
}
