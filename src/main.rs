// postscroll - infinite-scroll post reader for the terminal
//
// Reads a paginated JSON posts collection and shows it as a feed that loads
// the next page when you scroll to the end.
//
// Architecture:
// - Feed (feed/): pagination controller, HTTP source, background loader
// - TUI (ratatui): renders post cards, turns scrolling into load requests
// - Headless: same controller, posts as JSON lines on stdout
// - Demo server (axum): generated corpus served locally, also the test fixture

mod cli;
mod config;
mod demo;
mod feed;
mod headless;
mod logging;
mod tui;

use anyhow::{Context, Result};
use clap::Parser;
use config::{Config, VERSION};
use demo::DemoServer;
use feed::HttpPostSource;
use logging::LogBuffer;
use std::sync::Arc;
use std::time::Duration;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = cli::Cli::parse();

    // Subcommands (config --show, --reset, ...) exit early
    if cli::handle_command(&cli) {
        return Ok(());
    }

    // Ensure config template exists (helps users discover options)
    Config::ensure_config_exists();

    let mut config = Config::from_env();
    cli.run.apply(&mut config);

    // TUI mode captures logs into the buffer; headless writes them to stderr.
    // The guard must outlive everything that logs so the file writer flushes.
    let log_buffer = LogBuffer::new();
    let _file_guard = logging::init(
        &config.logging,
        config.enable_tui.then(|| log_buffer.clone()),
    );

    let demo_server = if config.demo_mode {
        let server = DemoServer::start(&config.demo).await?;
        config.base_url = server.posts_url();
        Some(server)
    } else {
        None
    };

    tracing::info!(
        "postscroll v{} reading {} ({} posts per page)",
        VERSION,
        config.base_url,
        config.page_size
    );

    let source = HttpPostSource::new(
        config.base_url.clone(),
        Duration::from_secs(config.request_timeout_secs),
    )
    .context("Failed to build HTTP client")?;

    let result = if config.enable_tui {
        tui::run_tui(config, Arc::new(source), log_buffer).await
    } else {
        run_headless(&config, &source).await
    };

    if let Some(server) = demo_server {
        server.shutdown().await;
    }

    tracing::info!("Shutdown complete");
    result
}

/// Print posts as JSON lines; a failed fetch makes the process exit non-zero
async fn run_headless(config: &Config, source: &HttpPostSource) -> Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    let summary = headless::run(
        source,
        config.page_size,
        config.headless_pages,
        &config.image,
        &mut out,
    )
    .await?;

    tracing::info!(
        "Wrote {} posts from {} page(s)",
        summary.posts_written,
        summary.pages_loaded
    );

    match summary.error {
        Some(error) => anyhow::bail!(error),
        None => Ok(()),
    }
}
