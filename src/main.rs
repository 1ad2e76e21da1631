//! dirbrowse server: cookie-authenticated directory browsing over HTTP.
//!
//! Main entry point that wires all crates together and starts the server.

use std::time::Duration;

use clap::{Parser, Subcommand};
use tokio::sync::watch;
use tracing_subscriber::{EnvFilter, fmt};

use dirbrowse_api::{AppState, build_app};
use dirbrowse_auth::PasswordHasher;
use dirbrowse_core::config::AppConfig;
use dirbrowse_core::error::AppError;

/// Environment variable selecting the `config/{env}.toml` overlay.
const ENV_VAR: &str = "DIRBROWSE_ENV";

#[derive(Debug, Parser)]
#[command(name = "dirbrowse-server", version, about = "Browse a directory tree over HTTP")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Start the HTTP server (default)
    Serve,
    /// Print an Argon2id hash for `auth.users[].password_hash`
    HashPassword {
        /// Password to hash; prompts when omitted
        #[arg(long)]
        password: Option<String>,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match load_configuration() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    let result = match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => {
            init_logging(&config);
            run(config).await.inspect_err(|e| tracing::error!("Server error: {e}"))
        }
        Command::HashPassword { password } => hash_password(&config, password),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

/// Load configuration from files and environment
fn load_configuration() -> Result<AppConfig, AppError> {
    let env = std::env::var(ENV_VAR).unwrap_or_else(|_| "development".to_string());
    AppConfig::load(&env)
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting dirbrowse v{}", env!("CARGO_PKG_VERSION"));

    // ── Step 1: Validate settings ────────────────────────────────
    if config.auth.users.is_empty() {
        tracing::warn!("No users configured; every login will fail");
    }
    let addr = config.server.bind_address();
    let grace = Duration::from_secs(config.server.shutdown_grace_seconds);

    // ── Step 2: Build shared state ───────────────────────────────
    let state = AppState::from_config(config)?;
    tracing::info!(
        root = %state.resolver.root().display(),
        session_ttl_seconds = state.sessions.ttl().num_seconds(),
        "Serving directory"
    );

    // ── Step 3: Bind and serve ───────────────────────────────────
    let app = build_app(state);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;
    tracing::info!("dirbrowse listening on {}", addr);

    let (shutdown_tx, mut shutdown_rx) = watch::channel(false);
    let mut server = tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                shutdown_signal().await;
                tracing::info!("Shutdown signal received, draining connections");
                let _ = shutdown_tx.send(true);
            })
            .await
    });

    // ── Step 4: Drain within the grace period ────────────────────
    tokio::select! {
        joined = &mut server => return server_outcome(joined),
        _ = shutdown_rx.changed() => {}
    }

    match tokio::time::timeout(grace, &mut server).await {
        Ok(joined) => server_outcome(joined)?,
        Err(_) => {
            tracing::warn!(
                grace_seconds = grace.as_secs(),
                "Grace period elapsed, closing remaining connections"
            );
            server.abort();
        }
    }

    tracing::info!("dirbrowse shut down gracefully");
    Ok(())
}

fn server_outcome(
    joined: Result<std::io::Result<()>, tokio::task::JoinError>,
) -> Result<(), AppError> {
    joined
        .map_err(|e| AppError::internal(format!("Server task failed: {e}")))?
        .map_err(|e| AppError::internal(format!("Server error: {e}")))
}

/// Print a PHC hash for a password given on the command line or prompted.
fn hash_password(config: &AppConfig, password: Option<String>) -> Result<(), AppError> {
    let password = match password {
        Some(p) => p,
        None => dialoguer::Password::new()
            .with_prompt("Password")
            .with_confirmation("Confirm password", "Passwords do not match")
            .interact()
            .map_err(|e| AppError::internal(format!("Input error: {e}")))?,
    };
    if password.is_empty() {
        return Err(AppError::validation("Password must not be empty"));
    }

    let hasher = PasswordHasher::new(&config.auth.argon2)?;
    println!("{}", hasher.hash_password(&password)?);
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
