//! Account domain service.
//!
//! [`AccountService`] implements every driving port over the user store, the
//! token store and the password hasher. Password hashing runs on the blocking
//! thread pool so Argon2 never stalls the HTTP workers.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::{debug, info};

use crate::domain::ports::{
    AuthTokenPersistenceError, AuthTokenRepository, LoginService, PasswordHashError,
    PasswordHasher, ProfileUpdate, RegistrationRequest, TokenAuthenticator, TokenIssuer,
    UserPersistenceError, UserProfileCommand, UserProfileQuery, UserRegistration, UserRepository,
};
use crate::domain::{
    AccessLevel, AuthToken, DisplayName, EmailAddress, Error, LoginCredentials,
    LoginValidationError, Password, PasswordHash, User, UserId, UserValidationError,
};

/// Detail code reported when an email is already registered.
pub const EMAIL_TAKEN: &str = "email_taken";

/// Well-formed Argon2id hash at default cost that matches no password.
///
/// Logins for unknown emails verify against it so they take as long as a
/// wrong password for a registered one.
pub const DECOY_PASSWORD_HASH: &str = "$argon2id$v=19$m=19456,t=2,p=1$y1QqIDroUX/BeVWhFlmI5w$eOFZ5KCAbJW/X6I0IZ9AzXfobobtuEt0l7Z5164LjHk";

/// Map a user field validation failure to a client error.
pub fn user_validation_error(error: UserValidationError) -> Error {
    Error::invalid_request(error.to_string()).with_details(json!({
        "field": error.field(),
        "code": error.code(),
    }))
}

/// Map a login payload validation failure to a client error.
pub fn login_validation_error(error: LoginValidationError) -> Error {
    Error::invalid_request(error.to_string()).with_details(json!({
        "field": error.field(),
        "code": error.code(),
    }))
}

/// Account service implementing the driving ports.
pub struct AccountService<U, T, H> {
    users: Arc<U>,
    tokens: Arc<T>,
    hasher: Arc<H>,
}

impl<U, T, H> Clone for AccountService<U, T, H> {
    fn clone(&self) -> Self {
        Self {
            users: Arc::clone(&self.users),
            tokens: Arc::clone(&self.tokens),
            hasher: Arc::clone(&self.hasher),
        }
    }
}

impl<U, T, H> AccountService<U, T, H> {
    /// Create a new service over the given adapters.
    pub fn new(users: Arc<U>, tokens: Arc<T>, hasher: Arc<H>) -> Self {
        Self {
            users,
            tokens,
            hasher,
        }
    }
}

impl<U, T, H> AccountService<U, T, H>
where
    U: UserRepository,
    T: AuthTokenRepository,
    H: PasswordHasher + 'static,
{
    fn map_user_error(error: UserPersistenceError) -> Error {
        match error {
            UserPersistenceError::Connection { message } => {
                Error::service_unavailable(format!("user repository unavailable: {message}"))
            }
            UserPersistenceError::Query { message } => {
                Error::internal(format!("user repository error: {message}"))
            }
            UserPersistenceError::DuplicateEmail { .. } => {
                Error::invalid_request("user with this email already exists").with_details(
                    json!({
                        "field": "email",
                        "code": EMAIL_TAKEN,
                    }),
                )
            }
            UserPersistenceError::Missing { .. } => Error::not_found("user not found"),
        }
    }

    fn map_token_error(error: AuthTokenPersistenceError) -> Error {
        match error {
            AuthTokenPersistenceError::Connection { message } => {
                Error::service_unavailable(format!("token repository unavailable: {message}"))
            }
            AuthTokenPersistenceError::Query { message } => {
                Error::internal(format!("token repository error: {message}"))
            }
        }
    }

    fn map_hash_error(error: PasswordHashError) -> Error {
        Error::internal(format!("password hasher failed: {error}"))
    }

    async fn hash_password(&self, password: Password) -> Result<PasswordHash, Error> {
        let hasher = Arc::clone(&self.hasher);
        let outcome = tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|err| Error::internal(format!("password hashing task failed: {err}")))?;
        outcome.map_err(Self::map_hash_error)
    }

    async fn verify_password(&self, candidate: &str, hash: &PasswordHash) -> Result<bool, Error> {
        let hasher = Arc::clone(&self.hasher);
        let candidate = zeroize::Zeroizing::new(candidate.to_owned());
        let hash = hash.clone();
        let outcome = tokio::task::spawn_blocking(move || hasher.verify(&candidate, &hash))
            .await
            .map_err(|err| Error::internal(format!("password check task failed: {err}")))?;
        outcome.map_err(Self::map_hash_error)
    }

    async fn find_active(&self, user_id: &UserId) -> Result<Option<User>, Error> {
        let user = self
            .users
            .find_by_id(user_id)
            .await
            .map_err(Self::map_user_error)?;
        Ok(user.filter(User::is_active))
    }

    async fn verify_decoy(&self, candidate: &str) -> Result<(), Error> {
        self.verify_password(candidate, &PasswordHash::new(DECOY_PASSWORD_HASH))
            .await
            .map(|_| ())
    }

    async fn register(
        &self,
        request: RegistrationRequest,
        access: AccessLevel,
    ) -> Result<User, Error> {
        let RegistrationRequest {
            email,
            password,
            name,
        } = request;

        let email = EmailAddress::from_optional(email.as_deref()).map_err(user_validation_error)?;
        let password = Password::new(password.unwrap_or_default()).map_err(user_validation_error)?;
        let name = DisplayName::new(name.unwrap_or_default()).map_err(user_validation_error)?;

        let password_hash = self.hash_password(password).await?;
        let user = User::builder(UserId::random(), email, password_hash)
            .name(name)
            .access(access)
            .build();

        self.users
            .insert(&user)
            .await
            .map_err(Self::map_user_error)?;

        info!(
            user_id = %user.id(),
            staff = user.is_staff(),
            superuser = user.is_superuser(),
            "user created"
        );
        Ok(user)
    }
}

#[async_trait]
impl<U, T, H> UserRegistration for AccountService<U, T, H>
where
    U: UserRepository,
    T: AuthTokenRepository,
    H: PasswordHasher + 'static,
{
    async fn create_user(&self, request: RegistrationRequest) -> Result<User, Error> {
        self.register(request, AccessLevel::Member).await
    }

    async fn create_superuser(&self, request: RegistrationRequest) -> Result<User, Error> {
        self.register(request, AccessLevel::Superuser).await
    }
}

#[async_trait]
impl<U, T, H> LoginService for AccountService<U, T, H>
where
    U: UserRepository,
    T: AuthTokenRepository,
    H: PasswordHasher + 'static,
{
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<Option<User>, Error> {
        let Ok(email) = EmailAddress::new(credentials.email()) else {
            debug!("login rejected: malformed email");
            self.verify_decoy(credentials.password()).await?;
            return Ok(None);
        };

        let Some(user) = self
            .users
            .find_by_email(&email)
            .await
            .map_err(Self::map_user_error)?
        else {
            debug!("login rejected: unknown email");
            self.verify_decoy(credentials.password()).await?;
            return Ok(None);
        };

        if !self
            .verify_password(credentials.password(), user.password_hash())
            .await?
        {
            debug!(user_id = %user.id(), "login rejected: password mismatch");
            return Ok(None);
        }

        if !user.is_active() {
            debug!(user_id = %user.id(), "login rejected: inactive account");
            return Ok(None);
        }

        Ok(Some(user))
    }
}

#[async_trait]
impl<U, T, H> TokenIssuer for AccountService<U, T, H>
where
    U: UserRepository,
    T: AuthTokenRepository,
    H: PasswordHasher + 'static,
{
    async fn issue_token(&self, user: &User) -> Result<AuthToken, Error> {
        let token = AuthToken::generate();
        self.tokens
            .store(&token.digest(), user.id())
            .await
            .map_err(Self::map_token_error)?;
        info!(user_id = %user.id(), "token issued");
        Ok(token)
    }
}

#[async_trait]
impl<U, T, H> TokenAuthenticator for AccountService<U, T, H>
where
    U: UserRepository,
    T: AuthTokenRepository,
    H: PasswordHasher + 'static,
{
    async fn resolve_token(&self, token: &AuthToken) -> Result<Option<User>, Error> {
        let owner = self
            .tokens
            .find_user_id(&token.digest())
            .await
            .map_err(Self::map_token_error)?;
        match owner {
            Some(user_id) => self.find_active(&user_id).await,
            None => Ok(None),
        }
    }
}

#[async_trait]
impl<U, T, H> UserProfileQuery for AccountService<U, T, H>
where
    U: UserRepository,
    T: AuthTokenRepository,
    H: PasswordHasher + 'static,
{
    async fn fetch_profile(&self, user_id: &UserId) -> Result<User, Error> {
        self.users
            .find_by_id(user_id)
            .await
            .map_err(Self::map_user_error)?
            .ok_or_else(|| Error::not_found("user not found"))
    }

    async fn find_by_email(&self, email: &str) -> Result<User, Error> {
        let email = EmailAddress::new(email).map_err(user_validation_error)?;
        self.users
            .find_by_email(&email)
            .await
            .map_err(Self::map_user_error)?
            .ok_or_else(|| Error::not_found("user not found"))
    }
}

#[async_trait]
impl<U, T, H> UserProfileCommand for AccountService<U, T, H>
where
    U: UserRepository,
    T: AuthTokenRepository,
    H: PasswordHasher + 'static,
{
    async fn update_profile(
        &self,
        user_id: &UserId,
        update: ProfileUpdate,
    ) -> Result<User, Error> {
        let ProfileUpdate {
            email,
            password,
            name,
        } = update;

        let email = email
            .map(EmailAddress::new)
            .transpose()
            .map_err(user_validation_error)?;
        let name = name
            .map(DisplayName::new)
            .transpose()
            .map_err(user_validation_error)?;
        let password = password
            .map(Password::new)
            .transpose()
            .map_err(user_validation_error)?;

        let mut user = self.fetch_profile(user_id).await?;
        if let Some(email) = email {
            user = user.with_email(email);
        }
        if let Some(name) = name {
            user = user.with_name(name);
        }
        if let Some(password) = password {
            user = user.with_password_hash(self.hash_password(password).await?);
        }

        self.users
            .update(&user)
            .await
            .map_err(Self::map_user_error)?;
        info!(user_id = %user.id(), "profile updated");
        Ok(user)
    }
}

#[cfg(test)]
#[path = "account_service_tests.rs"]
mod tests;
