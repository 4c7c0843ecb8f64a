//! Password value types.
//!
//! [`Password`] carries caller-supplied plaintext and wipes it on drop;
//! [`PasswordHash`] carries the PHC string produced by a
//! [`PasswordHasher`](crate::domain::ports::PasswordHasher).

use std::fmt;

use zeroize::Zeroizing;

use super::UserValidationError;

/// Passwords of this many characters or fewer are rejected.
pub const PASSWORD_MIN_LENGTH: usize = 6;

/// Plaintext password that satisfies the password policy.
///
/// ## Invariants
/// - At least [`PASSWORD_MIN_LENGTH`] characters.
/// - Whitespace is preserved; passwords are compared byte for byte.
///
/// # Examples
/// ```
/// use accounts::domain::Password;
///
/// assert!(Password::new("testpass123").is_ok());
/// assert!(Password::new("pw").is_err());
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct Password(Zeroizing<String>);

impl Password {
    /// Validate a plaintext password against the policy.
    pub fn new(raw: impl Into<String>) -> Result<Self, UserValidationError> {
        let raw = Zeroizing::new(raw.into());
        if raw.is_empty() {
            return Err(UserValidationError::EmptyPassword);
        }
        if raw.chars().count() < PASSWORD_MIN_LENGTH {
            return Err(UserValidationError::PasswordTooShort {
                min: PASSWORD_MIN_LENGTH,
            });
        }
        Ok(Self(raw))
    }

    /// Plaintext for hashing.
    pub fn expose(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(**redacted**)")
    }
}

/// One-way password hash in PHC string format.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordHash(String);

impl PasswordHash {
    /// Wrap an encoded hash produced by a hasher or read from storage.
    pub fn new(encoded: impl Into<String>) -> Self {
        Self(encoded.into())
    }

    /// Encoded PHC string.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for PasswordHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordHash(..)")
    }
}

impl From<PasswordHash> for String {
    fn from(value: PasswordHash) -> Self {
        value.0
    }
}
