//! Shared HTTP adapter state.
//!
//! Handlers accept this state via `actix_web::web::Data` so they only depend
//! on domain ports and stay testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    LoginService, TokenAuthenticator, TokenIssuer, UserProfileCommand, UserProfileQuery,
    UserRegistration,
};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub registration: Arc<dyn UserRegistration>,
    pub login: Arc<dyn LoginService>,
    pub tokens: Arc<dyn TokenIssuer>,
    pub authenticator: Arc<dyn TokenAuthenticator>,
    pub profile: Arc<dyn UserProfileQuery>,
    pub profile_command: Arc<dyn UserProfileCommand>,
}

impl HttpState {
    /// Wire every port to one service implementing all of them.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use accounts::domain::AccountService;
    /// use accounts::inbound::http::state::HttpState;
    /// use accounts::outbound::memory::{InMemoryAuthTokenRepository, InMemoryUserRepository};
    /// use accounts::outbound::security::Argon2PasswordHasher;
    ///
    /// let service = AccountService::new(
    ///     Arc::new(InMemoryUserRepository::new()),
    ///     Arc::new(InMemoryAuthTokenRepository::new()),
    ///     Arc::new(Argon2PasswordHasher::new()),
    /// );
    /// let state = HttpState::from_service(service);
    /// let _login = state.login.clone();
    /// ```
    pub fn from_service<S>(service: S) -> Self
    where
        S: UserRegistration
            + LoginService
            + TokenIssuer
            + TokenAuthenticator
            + UserProfileQuery
            + UserProfileCommand
            + 'static,
    {
        let service = Arc::new(service);
        Self {
            registration: service.clone(),
            login: service.clone(),
            tokens: service.clone(),
            authenticator: service.clone(),
            profile: service.clone(),
            profile_command: service,
        }
    }
}
