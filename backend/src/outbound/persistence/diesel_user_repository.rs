//! PostgreSQL-backed `UserRepository` implementation using Diesel ORM.
//!
//! Email uniqueness is enforced by the `users_email_key` index; violations
//! surface as `UserPersistenceError::DuplicateEmail`.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::warn;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{AccessLevel, DisplayName, EmailAddress, PasswordHash, User, UserId};

use super::diesel_basic_error_mapping::{
    is_unique_violation, map_basic_diesel_error, map_basic_pool_error,
};
use super::models::{NewUserRow, UserRow, UserUpdate};
use super::pool::{DbPool, PoolError};
use super::schema::users;

const EMAIL_UNIQUE_INDEX: &str = "users_email_key";

/// Diesel-backed implementation of the `UserRepository` port.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> UserPersistenceError {
    map_basic_pool_error(error, UserPersistenceError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> UserPersistenceError {
    map_basic_diesel_error(
        error,
        UserPersistenceError::query,
        UserPersistenceError::connection,
    )
}

fn map_write_error(error: diesel::result::Error, email: &EmailAddress) -> UserPersistenceError {
    if is_unique_violation(&error, EMAIL_UNIQUE_INDEX) {
        return UserPersistenceError::duplicate_email(email.as_ref());
    }
    map_diesel_error(error)
}

/// Convert a database row to a domain user.
///
/// Rows that no longer satisfy domain validation are reported as query
/// errors rather than silently repaired.
fn row_to_user(row: UserRow) -> Result<User, UserPersistenceError> {
    let corrupt = |field: &str, err: crate::domain::UserValidationError| {
        warn!(user_id = %row.id, field, error = %err, "stored user row failed validation");
        UserPersistenceError::query(format!("invalid stored {field}"))
    };

    let email = EmailAddress::new(&row.email).map_err(|err| corrupt("email", err))?;
    let name = DisplayName::new(&row.name).map_err(|err| corrupt("name", err))?;
    let access = AccessLevel::from_flags(row.is_staff, row.is_superuser)
        .map_err(|err| corrupt("access flags", err))?;

    Ok(
        User::builder(UserId::from_uuid(row.id), email, PasswordHash::new(row.password_hash))
            .name(name)
            .active(row.is_active)
            .access(access)
            .build(),
    )
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn insert(&self, user: &User) -> Result<(), UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = NewUserRow {
            id: *user.id().as_uuid(),
            email: user.email().as_ref(),
            password_hash: user.password_hash().as_str(),
            name: user.name().as_ref(),
            is_active: user.is_active(),
            is_staff: user.is_staff(),
            is_superuser: user.is_superuser(),
        };

        diesel::insert_into(users::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(|err| map_write_error(err, user.email()))
    }

    async fn update(&self, user: &User) -> Result<(), UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let changes = UserUpdate {
            email: user.email().as_ref(),
            password_hash: user.password_hash().as_str(),
            name: user.name().as_ref(),
            is_active: user.is_active(),
            is_staff: user.is_staff(),
            is_superuser: user.is_superuser(),
        };

        let affected = diesel::update(users::table.find(user.id().as_uuid()))
            .set(&changes)
            .execute(&mut conn)
            .await
            .map_err(|err| map_write_error(err, user.email()))?;

        if affected == 0 {
            return Err(UserPersistenceError::missing(user.id().to_string()));
        }
        Ok(())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<UserRow> = users::table
            .find(id.as_uuid())
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_user).transpose()
    }

    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<UserRow> = users::table
            .filter(users::email.eq(email.as_ref()))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_user).transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use uuid::Uuid;

    fn row(is_staff: bool, is_superuser: bool) -> UserRow {
        UserRow {
            id: Uuid::new_v4(),
            email: "ada@example.com".to_owned(),
            password_hash: "$argon2id$stub".to_owned(),
            name: "Ada".to_owned(),
            is_active: true,
            is_staff,
            is_superuser,
        }
    }

    #[rstest]
    fn row_converts_to_domain_user() {
        let user = row_to_user(row(true, true)).expect("valid row");
        assert_eq!(user.email().as_ref(), "ada@example.com");
        assert_eq!(user.name().as_ref(), "Ada");
        assert!(user.is_superuser());
    }

    #[rstest]
    fn inconsistent_flags_are_query_errors() {
        let error = row_to_user(row(false, true)).expect_err("invalid flags");
        assert!(matches!(error, UserPersistenceError::Query { .. }));
    }

    #[rstest]
    fn corrupt_email_is_a_query_error() {
        let mut bad = row(false, false);
        bad.email = "not-an-email".to_owned();
        assert!(matches!(
            row_to_user(bad),
            Err(UserPersistenceError::Query { .. })
        ));
    }
}
