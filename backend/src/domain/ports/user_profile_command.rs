//! Driving port for profile updates.

use async_trait::async_trait;

use crate::domain::{Error, User, UserId};

/// Partial profile update. `None` fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileUpdate {
    /// New email; normalised like at creation.
    pub email: Option<String>,
    /// New plaintext password; subject to the password policy.
    pub password: Option<String>,
    /// New display name.
    pub name: Option<String>,
}

impl ProfileUpdate {
    /// Whether the update changes nothing.
    pub fn is_empty(&self) -> bool {
        self.email.is_none() && self.password.is_none() && self.name.is_none()
    }
}

/// Domain use-case port for modifying the current user.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserProfileCommand: Send + Sync {
    /// Apply `update` to the user and return the stored result.
    ///
    /// # Errors
    /// `invalid_request` for invalid fields or a taken email, `not_found`
    /// when the user vanished.
    async fn update_profile(&self, user_id: &UserId, update: ProfileUpdate)
    -> Result<User, Error>;
}
