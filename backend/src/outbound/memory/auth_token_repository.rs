//! In-memory `AuthTokenRepository`.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::ports::{AuthTokenPersistenceError, AuthTokenRepository};
use crate::domain::{TokenDigest, UserId};

/// Token digests mapped to their owners.
#[derive(Debug, Default)]
pub struct InMemoryAuthTokenRepository {
    tokens: Mutex<HashMap<TokenDigest, UserId>>,
}

impl InMemoryAuthTokenRepository {
    /// Empty repository.
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned<T>(_: T) -> AuthTokenPersistenceError {
    AuthTokenPersistenceError::query("token store lock poisoned")
}

#[async_trait]
impl AuthTokenRepository for InMemoryAuthTokenRepository {
    async fn store(
        &self,
        digest: &TokenDigest,
        user_id: &UserId,
    ) -> Result<(), AuthTokenPersistenceError> {
        self.tokens
            .lock()
            .map_err(poisoned)?
            .insert(digest.clone(), *user_id);
        Ok(())
    }

    async fn find_user_id(
        &self,
        digest: &TokenDigest,
    ) -> Result<Option<UserId>, AuthTokenPersistenceError> {
        Ok(self.tokens.lock().map_err(poisoned)?.get(digest).copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::AuthToken;
    use rstest::rstest;

    #[rstest]
    #[tokio::test]
    async fn stored_digest_resolves_to_owner() {
        let repo = InMemoryAuthTokenRepository::new();
        let owner = UserId::random();
        let token = AuthToken::generate();

        repo.store(&token.digest(), &owner).await.expect("store");

        assert_eq!(
            repo.find_user_id(&token.digest()).await.expect("lookup"),
            Some(owner)
        );
        assert_eq!(
            repo.find_user_id(&AuthToken::generate().digest())
                .await
                .expect("lookup"),
            None
        );
    }
}
