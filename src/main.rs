use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tokio::sync::watch;
use tracing::{error, info};

use spreadwatch::infrastructure::bootstrap::build_scan_loop;
use spreadwatch::infrastructure::config::Config;

const DEFAULT_CONFIG: &str = "config.toml";

/// Arbitrage spread monitor for binary prediction markets.
#[derive(Parser, Debug)]
#[command(name = "spreadwatch", version, about)]
struct Cli {
    /// Configuration file. A missing default file means built-in defaults.
    #[arg(short, long, default_value = DEFAULT_CONFIG)]
    config: PathBuf,
}

#[tokio::main]
async fn main() -> ExitCode {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    let loaded = if cli.config == PathBuf::from(DEFAULT_CONFIG) {
        Config::load_or_default(&cli.config)
    } else {
        Config::load(&cli.config)
    };
    let config = match loaded {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load config {}: {e}", cli.config.display());
            return ExitCode::from(2);
        }
    };

    config.init_logging();
    info!(config = %cli.config.display(), "spreadwatch starting");

    let scan = match build_scan_loop(&config) {
        Ok(scan) => scan,
        Err(e) => {
            error!(error = %e, "Startup failed");
            return ExitCode::from(2);
        }
    };

    let (stop_tx, stop_rx) = watch::channel(false);
    tokio::spawn(async move {
        shutdown_signal().await;
        info!("Shutdown signal received, stopping after current cycle");
        let _ = stop_tx.send(true);
    });

    scan.run(stop_rx).await;
    info!("spreadwatch stopped");
    ExitCode::SUCCESS
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {}
        () = terminate => {}
    }
}
