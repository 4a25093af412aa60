//! Cupcake - main entry point
//!
//! Parses the command line, sets up logging and either runs the interactive
//! order wizard or one of the headless commands.

use anyhow::{Context, Result};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::fs::File;
use std::io::stdout;
use std::path::Path;
use std::sync::Mutex;
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

use cupcake::app::App;
use cupcake::cli::{Cli, Commands};
use cupcake::{
    Catalog, CupcakeError, FileShare, Outbox, QuoteRequest, ShareTarget, StepFlowController,
};

/// Initialize tracing.
///
/// The wizard owns the terminal, so it only logs when a log file is given.
/// Headless commands log warnings to stderr unless RUST_LOG says otherwise.
fn init_tracing(log_file: Option<&Path>, interactive: bool) -> Result<()> {
    match log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create log file {:?}", path))?;
            let filter =
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .init();
        }
        None if !interactive => {
            let filter =
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .init();
        }
        None => {}
    }
    Ok(())
}

fn load_catalog(path: Option<&Path>) -> Result<Catalog> {
    match path {
        Some(path) => {
            info!("Loading catalog from {:?}", path);
            Catalog::load_from_file(path)
        }
        None => Ok(Catalog::default()),
    }
}

/// Main application entry point
fn main() -> Result<()> {
    let cli = Cli::parse_args();
    let interactive = matches!(cli.command, None | Some(Commands::Order { .. }));
    init_tracing(cli.log_file.as_deref(), interactive)?;
    info!("Cupcake starting up");

    match cli.command {
        Some(Commands::Quote {
            quantity,
            flavor,
            pickup,
        }) => {
            let catalog = load_catalog(cli.catalog.as_deref())?;
            let mut flow = StepFlowController::new(catalog);
            let request = QuoteRequest {
                quantity,
                flavor,
                pickup,
            };
            let shared = cupcake::quote(&mut flow, &request)?;
            println!("{}\n\n{}", shared.subject, shared.body);
        }
        Some(Commands::Catalog { validate }) => match validate {
            Some(path) => {
                Catalog::load_from_file(&path)?;
                println!("Catalog file is valid: {}", path.display());
            }
            None => {
                let catalog = load_catalog(cli.catalog.as_deref())?;
                println!("{}", serde_json::to_string_pretty(&catalog)?);
            }
        },
        Some(Commands::Order { share_file, step }) => {
            run_wizard(cli.catalog.as_deref(), share_file.as_deref(), &step)?;
        }
        None => {
            debug!("No command specified, launching order wizard");
            run_wizard(cli.catalog.as_deref(), None, "start")?;
        }
    }

    Ok(())
}

/// Run the interactive wizard and report what was sent
fn run_wizard(catalog: Option<&Path>, share_file: Option<&Path>, step: &str) -> Result<()> {
    let catalog = load_catalog(catalog)?;
    let mut flow = StepFlowController::new(catalog);
    flow.restore(step);

    match share_file {
        Some(path) => {
            run_tui(App::new(flow, FileShare::new(path)))?;
        }
        None => {
            let mut outbox = run_tui(App::new(flow, Outbox::default()))?;
            for request in outbox.drain() {
                println!("{}\n\n{}\n", request.subject, request.body);
            }
        }
    }

    Ok(())
}

/// Set up the terminal, run the app, and always restore the terminal
fn run_tui<T: ShareTarget>(mut app: App<T>) -> Result<T> {
    debug!("Initializing terminal for TUI mode");

    enable_raw_mode()
        .map_err(|e| CupcakeError::terminal(format!("Failed to enable raw mode: {}", e)))?;
    crossterm::execute!(stdout(), crossterm::terminal::EnterAlternateScreen).map_err(|e| {
        CupcakeError::terminal(format!("Failed to enter alternate screen: {}", e))
    })?;

    let result = Terminal::new(CrosstermBackend::new(stdout()))
        .map_err(CupcakeError::from)
        .and_then(|mut terminal| app.run(&mut terminal));

    let _ = disable_raw_mode();
    let _ = crossterm::execute!(stdout(), crossterm::terminal::LeaveAlternateScreen);

    if let Err(e) = &result {
        error!("Wizard exited with error: {}", e);
    }
    result?;
    Ok(app.into_share_target())
}
