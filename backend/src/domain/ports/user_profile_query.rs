//! Driving port for user profile queries.
//!
//! Inbound adapters use this port to load a user's profile without importing
//! persistence details.

use async_trait::async_trait;

use crate::domain::{Error, User, UserId};

/// Domain use-case port for reading users.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserProfileQuery: Send + Sync {
    /// Return the profile for the authenticated user.
    ///
    /// # Errors
    /// `not_found` when the id is unknown.
    async fn fetch_profile(&self, user_id: &UserId) -> Result<User, Error>;

    /// Look a user up by email, normalising the input first.
    ///
    /// # Errors
    /// `invalid_request` when the email is malformed, `not_found` when no
    /// user owns it.
    async fn find_by_email(&self, email: &str) -> Result<User, Error>;
}
