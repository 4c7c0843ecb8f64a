//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports (`UserRepository`, `AuthTokenRepository`, `PasswordHasher`)
//! are implemented by outbound adapters. Driving ports (`UserRegistration`,
//! `LoginService`, `TokenIssuer`, `TokenAuthenticator`, `UserProfileQuery`,
//! `UserProfileCommand`) are called by inbound adapters and implemented by
//! [`AccountService`](crate::domain::AccountService).

mod macros;
pub(crate) use macros::define_port_error;

mod auth_token_repository;
mod login_service;
mod password_hasher;
mod token_issuer;
mod user_profile_command;
mod user_profile_query;
mod user_registration;
mod user_repository;

#[cfg(test)]
pub use auth_token_repository::MockAuthTokenRepository;
pub use auth_token_repository::{AuthTokenPersistenceError, AuthTokenRepository};
#[cfg(test)]
pub use login_service::MockLoginService;
pub use login_service::LoginService;
#[cfg(test)]
pub use password_hasher::MockPasswordHasher;
pub use password_hasher::{PasswordHashError, PasswordHasher};
#[cfg(test)]
pub use token_issuer::{MockTokenAuthenticator, MockTokenIssuer};
pub use token_issuer::{TokenAuthenticator, TokenIssuer};
#[cfg(test)]
pub use user_profile_command::MockUserProfileCommand;
pub use user_profile_command::{ProfileUpdate, UserProfileCommand};
#[cfg(test)]
pub use user_profile_query::MockUserProfileQuery;
pub use user_profile_query::UserProfileQuery;
#[cfg(test)]
pub use user_registration::MockUserRegistration;
pub use user_registration::{RegistrationRequest, UserRegistration};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserPersistenceError, UserRepository};
