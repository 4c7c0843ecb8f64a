//! Accounts entry-point: HTTP server and administrative commands.

mod server;

use std::io::{self, BufRead};

use actix_web::web;
use clap::{Parser, Subcommand};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use accounts::domain::ports::{RegistrationRequest, UserRegistration};
use accounts::inbound::http::health::HealthState;
use accounts::outbound::persistence::{DbPool, PoolConfig, run_migrations};
use accounts::settings::AppSettings;

use server::{ServerConfig, create_server, diesel_account_service};

#[derive(Debug, Parser)]
#[command(name = "accounts", version, about = "User accounts service")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the HTTP server (default).
    Serve,
    /// Create a staff superuser in the configured database.
    CreateSuperuser {
        #[arg(long)]
        email: String,
        /// Read from standard input when neither the flag nor the variable is set.
        #[arg(long, env = "ACCOUNTS_SUPERUSER_PASSWORD", hide_env_values = true)]
        password: Option<String>,
        #[arg(long)]
        name: Option<String>,
    },
}

#[actix_web::main]
async fn main() -> io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let cli = Cli::parse();
    let settings = AppSettings::load_from_env()?;

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => serve(&settings).await,
        Command::CreateSuperuser {
            email,
            password,
            name,
        } => {
            let password = resolve_password(password, io::stdin().lock())?;
            create_superuser(&settings, email, password, name).await
        }
    }
}

/// Use the supplied password or read the first line of `input`.
fn resolve_password(supplied: Option<String>, mut input: impl BufRead) -> io::Result<String> {
    if let Some(password) = supplied {
        return Ok(password);
    }
    let mut line = String::new();
    input.read_line(&mut line)?;
    let password = line.trim_end_matches(['\r', '\n']);
    if password.is_empty() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            "no superuser password given on stdin or ACCOUNTS_SUPERUSER_PASSWORD",
        ));
    }
    Ok(password.to_owned())
}

async fn connect(database_url: &str, settings: &AppSettings) -> io::Result<DbPool> {
    run_migrations(database_url)
        .await
        .map_err(|e| io::Error::other(format!("database migration failed: {e}")))?;
    let config = PoolConfig::new(database_url).with_max_size(settings.pool_size());
    DbPool::new(config)
        .await
        .map_err(|e| io::Error::other(format!("database pool setup failed: {e}")))
}

async fn serve(settings: &AppSettings) -> io::Result<()> {
    let mut config = ServerConfig::new(settings.bind_addr());
    if let Some(url) = settings.database_url() {
        config = config.with_db_pool(connect(url, settings).await?);
    }

    let health_state = web::Data::new(HealthState::new());
    create_server(health_state, config)?.await
}

async fn create_superuser(
    settings: &AppSettings,
    email: String,
    password: String,
    name: Option<String>,
) -> io::Result<()> {
    let url = settings.database_url().ok_or_else(|| {
        io::Error::other("create-superuser requires ACCOUNTS_DATABASE_URL to be set")
    })?;
    let pool = connect(url, settings).await?;
    let service = diesel_account_service(&pool);

    let mut request = RegistrationRequest::new(email, password);
    if let Some(name) = name {
        request = request.with_name(name);
    }
    let user = service
        .create_superuser(request)
        .await
        .map_err(|e| io::Error::other(format!("failed to create superuser: {e}")))?;
    info!(user_id = %user.id(), email = %user.email(), "superuser created");
    Ok(())
}
