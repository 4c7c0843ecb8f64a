//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use crate::domain::ports::{
    MockLoginService, MockTokenAuthenticator, MockTokenIssuer, MockUserProfileCommand,
    MockUserProfileQuery, MockUserRegistration,
};
use crate::domain::{EmailAddress, PasswordHash, User, UserId};
use crate::inbound::http::state::HttpState;

/// Token accepted by [`MockPorts::authenticating`].
pub const VALID_TOKEN: &str = "0123456789abcdef0123456789abcdef01234567";

/// Mock for every port in [`HttpState`]. Unset mocks panic when called.
#[derive(Default)]
pub struct MockPorts {
    pub registration: MockUserRegistration,
    pub login: MockLoginService,
    pub tokens: MockTokenIssuer,
    pub authenticator: MockTokenAuthenticator,
    pub profile: MockUserProfileQuery,
    pub profile_command: MockUserProfileCommand,
}

impl MockPorts {
    /// Resolve [`VALID_TOKEN`] to `user` and every other token to nothing.
    pub fn authenticating(user: User) -> Self {
        let mut ports = Self::default();
        ports
            .authenticator
            .expect_resolve_token()
            .returning(move |token| {
                Ok((token.expose() == VALID_TOKEN).then(|| user.clone()))
            });
        ports
    }

    pub fn into_state(self) -> HttpState {
        HttpState {
            registration: Arc::new(self.registration),
            login: Arc::new(self.login),
            tokens: Arc::new(self.tokens),
            authenticator: Arc::new(self.authenticator),
            profile: Arc::new(self.profile),
            profile_command: Arc::new(self.profile_command),
        }
    }
}

/// Active member with a placeholder hash.
pub fn sample_user(email: &str, name: &str) -> User {
    let email = EmailAddress::new(email).expect("valid fixture email");
    let name = crate::domain::DisplayName::new(name).expect("valid fixture name");
    User::builder(UserId::random(), email, PasswordHash::new("$argon2id$fixture"))
        .name(name)
        .build()
}

/// `Authorization` header carrying [`VALID_TOKEN`].
pub fn auth_header() -> (&'static str, String) {
    ("Authorization", format!("Token {VALID_TOKEN}"))
}
