use std::process::ExitCode;
use ticker::repository::{RepositoryProvider, Warehouse};
use ticker::settings::Setup;
use ticker::ticker::Ticker;
use tokio::select;
use tokio::signal::unix::{signal, SignalKind};
use tracing_subscriber::EnvFilter;

/// VERSION shall be updated before creating release.
static VERSION: &str = "Ticker 0.1.0";

#[tokio::main]
async fn main() -> ExitCode {
    let setup = Setup::from_env();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let repo = match Warehouse::new(setup.get_connection_str(), setup.get_acquire_timeout()).await
    {
        Ok(repo) => repo,
        Err(e) => {
            tracing::error!(error = %e, "database initialization failed");
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = repo.migrate().await {
        tracing::error!(error = %e, "database initialization failed");
        repo.close().await;
        return ExitCode::FAILURE;
    }

    let mut terminate = match signal(SignalKind::terminate()) {
        Ok(s) => s,
        Err(e) => {
            tracing::error!(error = %e, "cannot listen for termination signal");
            repo.close().await;
            return ExitCode::FAILURE;
        }
    };

    println!(
        "\n{} started. A record will be added every {} seconds...",
        VERSION,
        setup.get_interval().as_secs()
    );
    println!("Database: {}", setup.redacted_connection_str());
    println!("Press Ctrl+C to stop.\n");

    let mut ticker = Ticker::new(repo.clone(), &setup);

    select! {
        _ = ticker.run() => {},
        r = tokio::signal::ctrl_c() => match r {
            Ok(()) => tracing::info!("interrupt received, shutting down"),
            Err(e) => tracing::error!(error = %e, "cannot listen for interrupt signal, shutting down"),
        },
        _ = terminate.recv() => tracing::info!("terminate received, shutting down"),
    }

    repo.close().await;

    println!("All connections closed.\n");

    ExitCode::SUCCESS
}
