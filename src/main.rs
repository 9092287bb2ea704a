//! blogdesk binary entry point

use std::io;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{error, info};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use blogdesk::{
    api::BlogClient,
    auth::Auth0DeviceAuth,
    cli::{run_cli_command, Cli, Commands},
    config::Config,
    models,
    tui::App,
};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set default log level to INFO if not specified
    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "blogdesk=info");
    }

    let config = Config::from_env()?;
    config.validate()?;
    init_logging(&config.log_file, cli.cli)?;

    info!("Starting blogdesk...");
    let client = BlogClient::new(&config).context("Failed to build HTTP client")?;

    // Handle CLI mode - print output and exit without TUI
    if cli.cli {
        let Some(command) = cli.command else {
            eprintln!("Error: CLI mode requires a command");
            std::process::exit(1);
        };
        let mut stdout = io::stdout();
        if let Err(e) = run_cli_command(command, &client, models::today(), &mut stdout).await {
            error!("Command failed: {:#}", e);
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
        return Ok(());
    }

    let auth = Auth0DeviceAuth::new(&config)?;
    let mut app = App::new(config, Arc::new(client), Arc::new(auth));

    // A search term given on the command line pre-fills the list search
    match cli.command {
        Some(Commands::Search { term }) => app.post_list.search_input.set_value(&term),
        Some(other) => info!("Ignoring {:?} outside CLI mode", other),
        None => {}
    }

    // Setup terminal for TUI mode
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = app.run(&mut terminal).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    match result {
        Ok(()) => {
            info!("blogdesk exited successfully");
        }
        Err(e) => {
            error!("blogdesk encountered an error: {:#}", e);
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
    }

    Ok(())
}

/// Log to `log_file`. The TUI owns the terminal, so only CLI mode also
/// reports warnings on stderr.
fn init_logging(log_file: &Path, cli_mode: bool) -> Result<()> {
    let directory = match log_file.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let file_name = log_file
        .file_name()
        .with_context(|| format!("Invalid log file path: {}", log_file.display()))?;
    let file_appender = tracing_appender::rolling::never(directory, file_name);

    let stderr_layer = cli_mode.then(|| {
        fmt::layer()
            .with_writer(io::stderr)
            .with_filter(EnvFilter::new("warn"))
    });

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(file_appender)
                .with_ansi(false)
                .with_filter(EnvFilter::from_default_env()),
        )
        .with(stderr_layer)
        .init();

    Ok(())
}
