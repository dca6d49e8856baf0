//! webgen CLI and REST API entry point.
//!
//! Parses CLI arguments, opens the website store, then dispatches to the
//! appropriate command handler or starts the REST API server.

mod cli;
mod http;
mod state;

use clap::Parser;
use clap_complete::generate;

use cli::{Cli, Commands};
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 if cli.quiet => "error",
        0 => "warn",
        1 => "info,webgen=debug",
        _ => "trace",
    };
    let tracing_config = webgen_observe::tracing_setup::TracingConfig::from_env(filter);
    webgen_observe::tracing_setup::init_tracing(&tracing_config)
        .map_err(|e| anyhow::anyhow!("failed to initialize tracing: {e}"))?;

    // Shell completions don't need app state
    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = <Cli as clap::CommandFactory>::command();
        generate(*shell, &mut cmd, "webgen", &mut std::io::stdout());
        return Ok(());
    }

    let state = AppState::init().await?;
    let result = run(cli, state).await;

    webgen_observe::tracing_setup::shutdown_tracing();
    result
}

async fn run(cli: Cli, state: AppState) -> anyhow::Result<()> {
    let json = cli.json;

    match cli.command {
        Commands::Save(args) => cli::website::save_website(&state, args, json).await?,

        Commands::Import {
            prompt,
            site_type,
            file,
        } => cli::website::import_website(&state, prompt, site_type, &file, json).await?,

        Commands::List => cli::website::list_websites(&state, json)?,

        Commands::Show { slug } => cli::website::show_website(&state, &slug, json)?,

        Commands::Delete { slug, force } => {
            cli::website::delete_website(&state, &slug, force, json)?
        }

        Commands::Clear { force } => cli::website::clear_websites(&state, force, json)?,

        Commands::Count => cli::website::count_websites(&state, json)?,

        Commands::Slug { title } => cli::website::preview_slug(&state, &title, json)?,

        Commands::Serve { port, host } => {
            let host = host.unwrap_or_else(|| state.config.server.host.clone());
            let port = port.unwrap_or(state.config.server.port);

            let addr = format!("{host}:{port}");
            let listener = tokio::net::TcpListener::bind(&addr).await?;
            tracing::info!(
                addr = %addr,
                data_dir = %state.data_dir.display(),
                "starting HTTP server"
            );

            println!(
                "  {} webgen API listening on {}",
                console::style("⚡").bold(),
                console::style(format!("http://{addr}")).cyan()
            );
            println!("  {}", console::style("Press Ctrl+C to stop").dim());

            let router = http::router::build_router(state);

            axum::serve(listener, router)
                .with_graceful_shutdown(shutdown_signal())
                .await?;

            println!("\n  Server stopped.");
        }

        Commands::Completions { .. } => unreachable!("handled before state init"),
    }

    Ok(())
}

/// Wait for Ctrl+C or SIGTERM for graceful shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
