//! Driving port for login/authentication use-cases.
//!
//! Inbound adapters call this port to check credentials without knowing the
//! backing infrastructure, so HTTP handler tests can substitute a mock.

use async_trait::async_trait;

use crate::domain::{Error, LoginCredentials, User};

/// Domain use-case port for authentication.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Return the active user matching the credentials.
    ///
    /// Unknown email, wrong password and inactive accounts all yield
    /// `Ok(None)`. Only storage or hashing failures are errors.
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<Option<User>, Error>;
}
