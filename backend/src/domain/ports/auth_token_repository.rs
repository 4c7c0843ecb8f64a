//! Port abstraction for token storage.
use async_trait::async_trait;

use crate::domain::{TokenDigest, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by token repository adapters.
    pub enum AuthTokenPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "token repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "token repository query failed: {message}",
    }
}

/// Driven port mapping token digests to their owners.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AuthTokenRepository: Send + Sync {
    /// Bind a digest to a user.
    async fn store(
        &self,
        digest: &TokenDigest,
        user_id: &UserId,
    ) -> Result<(), AuthTokenPersistenceError>;

    /// Owner of the digest, if any.
    async fn find_user_id(
        &self,
        digest: &TokenDigest,
    ) -> Result<Option<UserId>, AuthTokenPersistenceError>;
}
