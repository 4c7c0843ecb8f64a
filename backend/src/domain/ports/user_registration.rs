//! Driving port for account creation.

use async_trait::async_trait;

use crate::domain::{Error, User};

/// Raw registration input as received from a client or the CLI.
///
/// Fields stay unvalidated strings so the service can report every failure
/// as a field-level validation error.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistrationRequest {
    /// Email address; `None` is rejected.
    pub email: Option<String>,
    /// Plaintext password; `None` is rejected.
    pub password: Option<String>,
    /// Optional display name.
    pub name: Option<String>,
}

impl RegistrationRequest {
    /// Request carrying only email and password.
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: Some(email.into()),
            password: Some(password.into()),
            name: None,
        }
    }

    /// Attach a display name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

/// Domain use-case port for creating users.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRegistration: Send + Sync {
    /// Create an active, non-staff user.
    ///
    /// # Errors
    /// `invalid_request` for a missing or malformed email, a weak password,
    /// an overlong name, or an email that is already registered.
    async fn create_user(&self, request: RegistrationRequest) -> Result<User, Error>;

    /// Create a user with staff and superuser rights.
    async fn create_superuser(&self, request: RegistrationRequest) -> Result<User, Error>;
}
