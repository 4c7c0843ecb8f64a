//! User data model.
//!
//! A [`User`] is an account identified by a normalised [`EmailAddress`]. The
//! stored credential is a [`PasswordHash`]; plaintext passwords never reach
//! this type. Access flags are modelled by [`AccessLevel`] so that a
//! superuser is always staff.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::PasswordHash;

/// Validation errors returned by user field constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserValidationError {
    /// The identifier is not a UUID.
    InvalidId,
    /// Email was missing or blank.
    EmptyEmail,
    /// Email does not look like `local@domain`.
    InvalidEmail,
    /// Email exceeds the storage limit.
    EmailTooLong { max: usize },
    /// Name exceeds the storage limit.
    NameTooLong { max: usize },
    /// Password was missing or empty.
    EmptyPassword,
    /// Password is shorter than the policy minimum.
    PasswordTooShort { min: usize },
    /// Stored flags describe a superuser that is not staff.
    InconsistentAccess,
}

impl UserValidationError {
    /// Name of the request field the error refers to.
    pub fn field(&self) -> &'static str {
        match self {
            Self::InvalidId => "id",
            Self::EmptyEmail | Self::InvalidEmail | Self::EmailTooLong { .. } => "email",
            Self::NameTooLong { .. } => "name",
            Self::EmptyPassword | Self::PasswordTooShort { .. } => "password",
            Self::InconsistentAccess => "is_staff",
        }
    }

    /// Stable machine-readable reason.
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidId => "invalid_id",
            Self::EmptyEmail => "empty_email",
            Self::InvalidEmail => "invalid_email",
            Self::EmailTooLong { .. } => "email_too_long",
            Self::NameTooLong { .. } => "name_too_long",
            Self::EmptyPassword => "empty_password",
            Self::PasswordTooShort { .. } => "password_too_short",
            Self::InconsistentAccess => "inconsistent_access",
        }
    }
}

impl fmt::Display for UserValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidId => write!(f, "user id must be a valid UUID"),
            Self::EmptyEmail => write!(f, "email must not be empty"),
            Self::InvalidEmail => write!(f, "email must be a valid address"),
            Self::EmailTooLong { max } => write!(f, "email must be at most {max} characters"),
            Self::NameTooLong { max } => write!(f, "name must be at most {max} characters"),
            Self::EmptyPassword => write!(f, "password must not be empty"),
            Self::PasswordTooShort { min } => {
                write!(f, "password must be at least {min} characters")
            }
            Self::InconsistentAccess => write!(f, "a superuser must also be staff"),
        }
    }
}

impl std::error::Error for UserValidationError {}

/// Stable user identifier stored as a UUID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserId(Uuid);

impl UserId {
    /// Parse a [`UserId`] from its hyphenated string form.
    pub fn new(id: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let raw = id.as_ref();
        if raw.trim() != raw {
            return Err(UserValidationError::InvalidId);
        }
        Uuid::parse_str(raw)
            .map(Self)
            .map_err(|_| UserValidationError::InvalidId)
    }

    /// Generate a new random [`UserId`].
    #[must_use]
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl From<UserId> for String {
    fn from(value: UserId) -> Self {
        value.0.to_string()
    }
}

impl TryFrom<String> for UserId {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Maximum stored length of an email address.
pub const EMAIL_MAX: usize = 255;

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        // One `@`, no whitespace, and a dotted domain.
        let pattern = r"^[^@\s]+@[^@\s]+\.[^@\s.]+$";
        Regex::new(pattern)
            .unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

/// Email address with its domain part lowercased.
///
/// ## Invariants
/// - Surrounding whitespace is removed.
/// - The domain (text after the last `@`) is lowercase; the local part keeps
///   its case.
/// - At most [`EMAIL_MAX`] characters.
///
/// # Examples
/// ```
/// use accounts::domain::EmailAddress;
///
/// let email = EmailAddress::new("Ada@EXAMPLE.COM").unwrap();
/// assert_eq!(email.as_ref(), "Ada@example.com");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Normalise and validate an email address.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(UserValidationError::EmptyEmail);
        }

        let normalised = normalise_email(trimmed);
        if normalised.chars().count() > EMAIL_MAX {
            return Err(UserValidationError::EmailTooLong { max: EMAIL_MAX });
        }
        if !email_regex().is_match(&normalised) {
            return Err(UserValidationError::InvalidEmail);
        }

        Ok(Self(normalised))
    }

    /// Validate an optional email, treating `None` like an empty value.
    pub fn from_optional(raw: Option<&str>) -> Result<Self, UserValidationError> {
        raw.map_or(Err(UserValidationError::EmptyEmail), Self::new)
    }
}

/// Lowercase the domain part of an email address.
///
/// Input without an `@` is returned unchanged so validation can reject it.
#[must_use]
pub fn normalise_email(raw: &str) -> String {
    match raw.rsplit_once('@') {
        Some((local, domain)) => format!("{local}@{}", domain.to_lowercase()),
        None => raw.to_owned(),
    }
}

impl AsRef<str> for EmailAddress {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<EmailAddress> for String {
    fn from(value: EmailAddress) -> Self {
        value.0
    }
}

impl TryFrom<String> for EmailAddress {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Maximum stored length of a display name.
pub const DISPLAY_NAME_MAX: usize = 255;

/// Human readable name for the user. May be empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DisplayName(String);

impl DisplayName {
    /// Trim and validate a display name.
    pub fn new(display_name: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let trimmed = display_name.as_ref().trim();
        if trimmed.chars().count() > DISPLAY_NAME_MAX {
            return Err(UserValidationError::NameTooLong {
                max: DISPLAY_NAME_MAX,
            });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Whether the name is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl AsRef<str> for DisplayName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for DisplayName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<DisplayName> for String {
    fn from(value: DisplayName) -> Self {
        value.0
    }
}

impl TryFrom<String> for DisplayName {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Administrative access granted to a user.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum AccessLevel {
    /// Ordinary account.
    #[default]
    Member,
    /// Staff account without superuser rights.
    Staff,
    /// Staff account with every permission.
    Superuser,
}

impl AccessLevel {
    /// Rebuild an access level from stored flags.
    pub fn from_flags(is_staff: bool, is_superuser: bool) -> Result<Self, UserValidationError> {
        match (is_staff, is_superuser) {
            (false, false) => Ok(Self::Member),
            (true, false) => Ok(Self::Staff),
            (true, true) => Ok(Self::Superuser),
            (false, true) => Err(UserValidationError::InconsistentAccess),
        }
    }

    /// Whether the level grants staff access.
    pub const fn is_staff(self) -> bool {
        matches!(self, Self::Staff | Self::Superuser)
    }

    /// Whether the level grants superuser access.
    pub const fn is_superuser(self) -> bool {
        matches!(self, Self::Superuser)
    }
}

/// Application user.
///
/// ## Invariants
/// - `email` is normalised (see [`EmailAddress`]).
/// - `password_hash` is a one-way hash; the type never holds plaintext.
/// - `is_superuser()` implies `is_staff()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    id: UserId,
    email: EmailAddress,
    name: DisplayName,
    password_hash: PasswordHash,
    is_active: bool,
    access: AccessLevel,
}

impl User {
    /// Start building a user from its required parts.
    ///
    /// Defaults: empty name, active, [`AccessLevel::Member`].
    pub fn builder(id: UserId, email: EmailAddress, password_hash: PasswordHash) -> UserBuilder {
        UserBuilder {
            id,
            email,
            name: DisplayName::default(),
            password_hash,
            is_active: true,
            access: AccessLevel::Member,
        }
    }

    /// Stable user identifier.
    pub fn id(&self) -> &UserId {
        &self.id
    }

    /// Normalised email address.
    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Display name; empty when not provided.
    pub fn name(&self) -> &DisplayName {
        &self.name
    }

    /// Stored password hash.
    pub fn password_hash(&self) -> &PasswordHash {
        &self.password_hash
    }

    /// Whether the account may authenticate.
    pub fn is_active(&self) -> bool {
        self.is_active
    }

    /// Administrative access level.
    pub fn access(&self) -> AccessLevel {
        self.access
    }

    /// Whether the user is staff.
    pub fn is_staff(&self) -> bool {
        self.access.is_staff()
    }

    /// Whether the user is a superuser.
    pub fn is_superuser(&self) -> bool {
        self.access.is_superuser()
    }

    /// Copy of the user with a new email address.
    #[must_use]
    pub fn with_email(mut self, email: EmailAddress) -> Self {
        self.email = email;
        self
    }

    /// Copy of the user with a new display name.
    #[must_use]
    pub fn with_name(mut self, name: DisplayName) -> Self {
        self.name = name;
        self
    }

    /// Copy of the user with a new password hash.
    #[must_use]
    pub fn with_password_hash(mut self, password_hash: PasswordHash) -> Self {
        self.password_hash = password_hash;
        self
    }

    /// Copy of the user with the active flag set.
    #[must_use]
    pub fn with_active(mut self, is_active: bool) -> Self {
        self.is_active = is_active;
        self
    }
}

/// Builder returned by [`User::builder`].
#[derive(Debug, Clone)]
pub struct UserBuilder {
    id: UserId,
    email: EmailAddress,
    name: DisplayName,
    password_hash: PasswordHash,
    is_active: bool,
    access: AccessLevel,
}

impl UserBuilder {
    /// Set the display name.
    #[must_use]
    pub fn name(mut self, name: DisplayName) -> Self {
        self.name = name;
        self
    }

    /// Set whether the account may authenticate.
    #[must_use]
    pub fn active(mut self, is_active: bool) -> Self {
        self.is_active = is_active;
        self
    }

    /// Set the access level.
    #[must_use]
    pub fn access(mut self, access: AccessLevel) -> Self {
        self.access = access;
        self
    }

    /// Finish building.
    #[must_use]
    pub fn build(self) -> User {
        let Self {
            id,
            email,
            name,
            password_hash,
            is_active,
            access,
        } = self;
        User {
            id,
            email,
            name,
            password_hash,
            is_active,
            access,
        }
    }
}

#[cfg(test)]
mod tests;
