//! Builders wiring storage adapters into the account service.

use std::sync::Arc;

use actix_web::web;
use tracing::warn;

use accounts::domain::AccountService;
use accounts::inbound::http::state::HttpState;
use accounts::outbound::memory::{InMemoryAuthTokenRepository, InMemoryUserRepository};
use accounts::outbound::persistence::{DbPool, DieselAuthTokenRepository, DieselUserRepository};
use accounts::outbound::security::Argon2PasswordHasher;

use super::ServerConfig;

/// Account service over PostgreSQL.
pub(crate) fn diesel_account_service(
    pool: &DbPool,
) -> AccountService<DieselUserRepository, DieselAuthTokenRepository, Argon2PasswordHasher> {
    AccountService::new(
        Arc::new(DieselUserRepository::new(pool.clone())),
        Arc::new(DieselAuthTokenRepository::new(pool.clone())),
        Arc::new(Argon2PasswordHasher::new()),
    )
}

/// Build handler state, falling back to in-memory stores without a pool.
pub(crate) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let state = match &config.db_pool {
        Some(pool) => HttpState::from_service(diesel_account_service(pool)),
        None => {
            warn!("no database configured; accounts are kept in memory and lost on restart");
            HttpState::from_service(AccountService::new(
                Arc::new(InMemoryUserRepository::new()),
                Arc::new(InMemoryAuthTokenRepository::new()),
                Arc::new(Argon2PasswordHasher::new()),
            ))
        }
    };
    web::Data::new(state)
}
