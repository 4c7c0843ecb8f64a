//! Driving ports for minting and resolving bearer tokens.

use async_trait::async_trait;

use crate::domain::{AuthToken, Error, User};

/// Mints tokens for authenticated users.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TokenIssuer: Send + Sync {
    /// Mint a new token bound to `user`.
    async fn issue_token(&self, user: &User) -> Result<AuthToken, Error>;
}

/// Resolves presented tokens back to users.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TokenAuthenticator: Send + Sync {
    /// Active user bound to `token`, or `None` when the token is unknown or
    /// its owner is inactive.
    async fn resolve_token(&self, token: &AuthToken) -> Result<Option<User>, Error>;
}
