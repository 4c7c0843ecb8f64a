//! Opaque bearer tokens and their stored digests.
//!
//! A token is handed to the client exactly once. Storage only ever sees the
//! SHA-256 [`TokenDigest`], so a leaked token table cannot be replayed.

use std::fmt;

use rand::RngCore;
use rand::rngs::OsRng;
use sha2::{Digest, Sha256};
use zeroize::Zeroizing;

/// Number of random bytes behind each token.
pub const TOKEN_BYTES: usize = 20;

/// Opaque bearer token presented in the `Authorization` header.
///
/// # Examples
/// ```
/// use accounts::domain::AuthToken;
///
/// let token = AuthToken::generate();
/// assert_eq!(token.expose().len(), 40);
/// assert_eq!(token.digest(), AuthToken::from_presented(token.expose()).digest());
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct AuthToken(Zeroizing<String>);

impl AuthToken {
    /// Mint a fresh token from the operating system CSPRNG.
    #[must_use]
    pub fn generate() -> Self {
        let mut bytes = Zeroizing::new([0_u8; TOKEN_BYTES]);
        OsRng.fill_bytes(&mut bytes[..]);
        Self(Zeroizing::new(hex::encode(&bytes[..])))
    }

    /// Wrap a token presented by a client.
    pub fn from_presented(raw: impl Into<String>) -> Self {
        Self(Zeroizing::new(raw.into()))
    }

    /// Token text for the response body.
    pub fn expose(&self) -> &str {
        self.0.as_str()
    }

    /// Digest used as the storage key.
    #[must_use]
    pub fn digest(&self) -> TokenDigest {
        TokenDigest(hex::encode(Sha256::digest(self.0.as_bytes())))
    }
}

impl fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AuthToken(**redacted**)")
    }
}

/// Lowercase hex SHA-256 digest of an [`AuthToken`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TokenDigest(String);

impl TokenDigest {
    /// Wrap a digest read back from storage.
    pub fn from_stored(hex_digest: impl Into<String>) -> Self {
        Self(hex_digest.into())
    }

    /// Hex representation.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for TokenDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn generated_tokens_are_lowercase_hex() {
        let token = AuthToken::generate();
        assert_eq!(token.expose().len(), TOKEN_BYTES * 2);
        assert!(
            token
                .expose()
                .chars()
                .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c))
        );
    }

    #[rstest]
    fn generated_tokens_differ() {
        assert_ne!(AuthToken::generate(), AuthToken::generate());
    }

    #[rstest]
    fn digest_matches_known_vector() {
        let token = AuthToken::from_presented("abc");
        assert_eq!(
            token.digest().as_str(),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[rstest]
    fn debug_hides_token() {
        let token = AuthToken::from_presented("visible-secret");
        assert!(!format!("{token:?}").contains("visible-secret"));
    }
}
