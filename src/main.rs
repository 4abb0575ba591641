use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{error, info, warn};

use connect_four_duel::ai::{Evaluator, NegamaxEvaluator, OpeningBook};
use connect_four_duel::config::AppConfig;
use connect_four_duel::logging;
use connect_four_duel::session::Session;
use connect_four_duel::ui::{App, Exit};

/// Play Connect Four against the computer in the terminal.
#[derive(Parser)]
#[command(name = "connect-four-duel", about = "Play Connect Four against the computer")]
struct Cli {
    /// Path to TOML configuration file
    #[arg(long, default_value = "connect_four.toml")]
    config: PathBuf,

    /// Override search depth
    #[arg(long)]
    depth: Option<usize>,

    /// Opening book to load instead of the configured one
    #[arg(long, conflicts_with = "no_book")]
    book: Option<PathBuf>,

    /// Search every position, ignoring any opening book
    #[arg(long)]
    no_book: bool,

    /// Only evaluate when the computer is about to move
    #[arg(long)]
    no_live_eval: bool,

    /// Print the default configuration as TOML and exit
    #[arg(long)]
    dump_config: bool,
}

fn main() {
    match run() {
        Ok(Exit::Quit) => {}
        Ok(Exit::Aborted(fault)) => {
            eprintln!("Game aborted: {fault}");
            std::process::exit(1);
        }
        Err(err) => {
            eprintln!("Error: {err:#}");
            std::process::exit(1);
        }
    }
}

fn run() -> Result<Exit> {
    let cli = Cli::parse();

    if cli.dump_config {
        print!("{}", AppConfig::default_toml());
        return Ok(Exit::Quit);
    }

    // Load configuration
    let mut config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("loading config from {}", cli.config.display()))?;

    // Apply CLI overrides
    if let Some(depth) = cli.depth {
        config.search.depth = depth;
    }
    if let Some(book) = cli.book {
        config.search.book = Some(book);
    }
    if cli.no_book {
        config.search.book = None;
    }
    if cli.no_live_eval {
        config.session.live_evaluation = false;
    }
    config.validate().context("validating command line overrides")?;

    logging::init(&config.logging)
        .with_context(|| format!("opening log file {}", config.logging.file.display()))?;

    let evaluator = build_evaluator(&config);
    info!(
        evaluator = evaluator.name(),
        depth = evaluator.depth(),
        book = evaluator.has_book(),
        live_evaluation = config.session.live_evaluation,
        "starting"
    );
    let session = Session::new(evaluator, config.session.clone());
    let mut app = App::new(session, config.ui.clone());

    // Setup terminal
    enable_raw_mode().context("enabling raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("entering alternate screen")?;
    if config.ui.mouse {
        execute!(stdout, EnableMouseCapture).context("enabling mouse capture")?;
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("creating terminal")?;

    let res = app.run(&mut terminal);

    // Restore terminal; always runs, even on error
    let _ = disable_raw_mode();
    if config.ui.mouse {
        let _ = execute!(terminal.backend_mut(), DisableMouseCapture);
    }
    let _ = execute!(terminal.backend_mut(), LeaveAlternateScreen);
    let _ = terminal.show_cursor();

    let exit = res.context("running game")?;
    if let Exit::Aborted(fault) = &exit {
        error!(%fault, "exiting after session abort");
    }
    Ok(exit)
}

/// Negamax search, backed by the opening book when one loads cleanly.
fn build_evaluator(config: &AppConfig) -> NegamaxEvaluator {
    let evaluator = NegamaxEvaluator::new(config.search.depth);
    let Some(path) = &config.search.book else {
        return evaluator;
    };

    match OpeningBook::load(path) {
        Ok(book) => {
            info!(path = %path.display(), entries = book.len(), "loaded opening book");
            evaluator.with_book(book)
        }
        Err(e) => {
            warn!(error = %e, "opening book unavailable, using search only");
            evaluator
        }
    }
}
