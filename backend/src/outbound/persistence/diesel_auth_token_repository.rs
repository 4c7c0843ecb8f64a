//! PostgreSQL-backed `AuthTokenRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::ports::{AuthTokenPersistenceError, AuthTokenRepository};
use crate::domain::{TokenDigest, UserId};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::NewAuthTokenRow;
use super::pool::{DbPool, PoolError};
use super::schema::auth_tokens;

/// Diesel-backed implementation of the `AuthTokenRepository` port.
#[derive(Clone)]
pub struct DieselAuthTokenRepository {
    pool: DbPool,
}

impl DieselAuthTokenRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> AuthTokenPersistenceError {
    map_basic_pool_error(error, AuthTokenPersistenceError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> AuthTokenPersistenceError {
    map_basic_diesel_error(
        error,
        AuthTokenPersistenceError::query,
        AuthTokenPersistenceError::connection,
    )
}

#[async_trait]
impl AuthTokenRepository for DieselAuthTokenRepository {
    async fn store(
        &self,
        digest: &TokenDigest,
        user_id: &UserId,
    ) -> Result<(), AuthTokenPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = NewAuthTokenRow {
            digest: digest.as_str(),
            user_id: *user_id.as_uuid(),
        };

        diesel::insert_into(auth_tokens::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn find_user_id(
        &self,
        digest: &TokenDigest,
    ) -> Result<Option<UserId>, AuthTokenPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let owner: Option<Uuid> = auth_tokens::table
            .find(digest.as_str())
            .select(auth_tokens::user_id)
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        Ok(owner.map(UserId::from_uuid))
    }
}
