//! In-process adapters backed by mutex-guarded maps.
//!
//! Used when no database URL is configured and by the HTTP integration
//! tests. Contents vanish when the process exits.

mod auth_token_repository;
mod user_repository;

pub use auth_token_repository::InMemoryAuthTokenRepository;
pub use user_repository::InMemoryUserRepository;
