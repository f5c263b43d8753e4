//! Charla CLI and HTTP server entry point.
//!
//! Binary name: `charla`
//!
//! Parses CLI arguments, sets up tracing, then either starts the server or
//! runs one of the offline commands.

mod cli;
mod http;
mod state;
#[cfg(test)]
mod test_support;

use clap::Parser;
use clap_complete::generate;

use charla_infra::filesystem::resolve_data_dir;
use charla_observe::tracing_setup::{init_tracing, shutdown_tracing, TracingOptions};

use cli::{Cli, Commands};
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Shell completions don't need logging or state
    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = <Cli as clap::CommandFactory>::command();
        generate(*shell, &mut cmd, "charla", &mut std::io::stdout());
        return Ok(());
    }

    let mut options = TracingOptions::from_verbosity(cli.verbose, cli.quiet);
    options.json = cli.json_logs;
    options.otel = cli.otel;
    init_tracing(&options).map_err(|e| anyhow::anyhow!("failed to initialize tracing: {e}"))?;

    let data_dir = cli.data_dir.clone().unwrap_or_else(resolve_data_dir);

    let result = run(cli, data_dir).await;
    shutdown_tracing();
    result
}

async fn run(cli: Cli, data_dir: std::path::PathBuf) -> anyhow::Result<()> {
    match cli.command {
        Commands::Serve { port, host } => {
            // Corpus is fully loaded before the listener exists.
            let state = AppState::init(&data_dir).await?;
            let chunks = state.chat_service.chunk_count();

            let addr = format!("{host}:{port}");
            let listener = tokio::net::TcpListener::bind(&addr).await?;

            if !cli.quiet {
                println!(
                    "  {} Charla listening on {} ({} chunks indexed)",
                    console::style("⚡").bold(),
                    console::style(format!("http://{addr}")).cyan(),
                    chunks
                );
                println!("  {}", console::style("Press Ctrl+C to stop").dim());
            }
            tracing::info!(%addr, chunks, data_dir = %data_dir.display(), "server started");

            let router = http::router::build_router(state);

            axum::serve(listener, router)
                .with_graceful_shutdown(shutdown_signal())
                .await?;

            if !cli.quiet {
                println!("\n  Server stopped.");
            }
        }

        Commands::Index { rebuild } => {
            cli::index::index(&data_dir, rebuild, cli.json).await?;
        }

        Commands::Ask {
            message,
            url,
            session,
        } => {
            cli::ask::ask(&url, &message, session, cli.json).await?;
        }

        Commands::Completions { .. } => {}
    }

    Ok(())
}

/// Wait for Ctrl+C or SIGTERM for graceful shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for Ctrl+C");
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
                tracing::error!(error = %e, "failed to install SIGTERM handler");
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

    tracing::info!("shutdown signal received");
}
