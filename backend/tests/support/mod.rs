//! Shared fixtures for black-box tests over the in-memory adapters.

#![expect(dead_code, reason = "each test binary uses a different subset")]

use std::sync::Arc;

use accounts::app::{AppDependencies, build_app};
use accounts::domain::AccountService;
use accounts::inbound::http::health::HealthState;
use accounts::inbound::http::state::HttpState;
use accounts::outbound::memory::{InMemoryAuthTokenRepository, InMemoryUserRepository};
use accounts::outbound::security::Argon2PasswordHasher;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::{test as actix_test, web};
use argon2::Params;
use serde_json::Value;

pub type TestService =
    AccountService<InMemoryUserRepository, InMemoryAuthTokenRepository, Argon2PasswordHasher>;

/// Account service plus direct handles on its stores.
pub struct Harness {
    pub service: TestService,
    pub users: Arc<InMemoryUserRepository>,
    pub tokens: Arc<InMemoryAuthTokenRepository>,
}

/// Argon2id with minimum cost so tests stay fast.
pub fn fast_hasher() -> Argon2PasswordHasher {
    let params = Params::new(Params::MIN_M_COST, 1, 1, None).expect("valid argon2 params");
    Argon2PasswordHasher::with_params(params)
}

pub fn harness() -> Harness {
    let users = Arc::new(InMemoryUserRepository::new());
    let tokens = Arc::new(InMemoryAuthTokenRepository::new());
    let service = AccountService::new(users.clone(), tokens.clone(), Arc::new(fast_hasher()));
    Harness {
        service,
        users,
        tokens,
    }
}

/// Initialise the full application around `harness`.
pub async fn init_app(
    harness: &Harness,
) -> impl Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error> {
    let health_state = web::Data::new(HealthState::new());
    health_state.mark_ready();
    actix_test::init_service(build_app(AppDependencies {
        health_state,
        http_state: web::Data::new(HttpState::from_service(harness.service.clone())),
    }))
    .await
}

/// Read a JSON body, mapping an empty body to `Value::Null`.
pub async fn json_body(response: ServiceResponse) -> Value {
    let body = actix_test::read_body(response).await;
    if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).expect("JSON body")
    }
}
