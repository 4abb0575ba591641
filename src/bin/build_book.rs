use std::path::PathBuf;
use std::time::Instant;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use connect_four_duel::ai::{NegamaxEvaluator, OpeningBook};

/// Precompute column scores for early positions.
#[derive(Parser)]
#[command(name = "build_book", about = "Generate a Connect Four opening book")]
struct Cli {
    /// Search depth used to score each position
    #[arg(long, default_value_t = 9)]
    depth: usize,

    /// Include every unfinished position up to this many moves
    #[arg(long, default_value_t = 4)]
    plies: usize,

    /// Where to write the JSON book
    #[arg(long, default_value = "7x6.book.json")]
    output: PathBuf,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Headless, so log straight to stderr
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    if cli.depth == 0 {
        bail!("--depth must be at least 1");
    }

    let start = Instant::now();
    let mut evaluator = NegamaxEvaluator::new(cli.depth);
    let book = OpeningBook::generate(&mut evaluator, cli.plies);

    book.save(&cli.output)
        .with_context(|| format!("writing opening book to {}", cli.output.display()))?;

    println!(
        "Wrote {} positions to {} in {:.1}s",
        book.len(),
        cli.output.display(),
        start.elapsed().as_secs_f64()
    );
    Ok(())
}
