//! Server construction and storage wiring.

mod config;
mod state_builders;

pub use config::ServerConfig;
pub(crate) use state_builders::diesel_account_service;

use state_builders::build_http_state;

use actix_web::dev::Server;
use actix_web::{HttpServer, web};
use tracing::info;

use accounts::app::{AppDependencies, build_app};
use accounts::inbound::http::health::HealthState;

/// Construct an Actix HTTP server using the provided health state and
/// configuration.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let server_health_state = health_state.clone();
    let http_state = build_http_state(&config);
    let bind_addr = config.bind_addr;

    let server = HttpServer::new(move || {
        build_app(AppDependencies {
            health_state: server_health_state.clone(),
            http_state: http_state.clone(),
        })
    })
    .bind(bind_addr)?
    .run();

    info!(%bind_addr, "server listening");
    health_state.mark_ready();
    Ok(server)
}
