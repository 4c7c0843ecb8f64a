//! Domain primitives, ports and services.
//!
//! Purpose: define strongly typed account entities and the use-cases that
//! operate on them, independent of HTTP and storage. Keep types immutable and
//! document invariants in each type's Rustdoc.
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic failure payload.
//! - User and its field types: the account aggregate.
//! - Password / PasswordHash, AuthToken / TokenDigest: credential values.
//! - AccountService: implementation of every driving port.

pub mod account_service;
pub mod auth;
pub mod error;
pub mod password;
pub mod ports;
pub mod token;
pub mod trace_id;
pub mod user;

pub use self::account_service::{
    AccountService, EMAIL_TAKEN, login_validation_error, user_validation_error,
};
pub use self::auth::{LoginCredentials, LoginValidationError};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::password::{PASSWORD_MIN_LENGTH, Password, PasswordHash};
pub use self::token::{AuthToken, TokenDigest};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{
    AccessLevel, DISPLAY_NAME_MAX, DisplayName, EMAIL_MAX, EmailAddress, User, UserBuilder,
    UserId, UserValidationError, normalise_email,
};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use accounts::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<()> {
///     Err(Error::unauthorized("authentication credentials were not provided"))
/// }
/// assert!(handler().is_err());
/// ```
pub type ApiResult<T> = Result<T, Error>;
