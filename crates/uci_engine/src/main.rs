//! UCI engine binary.
//!
//! Speaks UCI on stdin/stdout; logs go to stderr so they never mix with
//! protocol output.

mod session;

use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use game_search::SearchConfig;
use tracing::info;

use crate::session::Session;

#[derive(Parser, Debug)]
#[command(name = "uci_engine")]
#[command(about = "Game-tree search chess engine speaking UCI")]
struct Args {
    /// TOML search configuration (strategy, depth, breadth, seed, log_level)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Log level override (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,

    /// Write the move tree of every search to this file as JSON
    #[arg(long)]
    tree_file: Option<PathBuf>,
}

fn init_tracing(level: &str) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => SearchConfig::load(path)
            .with_context(|| format!("loading search config from {}", path.display()))?,
        None => SearchConfig::default(),
    };

    let level = args.log_level.as_deref().unwrap_or(&config.log_level);
    init_tracing(level);
    info!(
        strategy = %config.strategy,
        depth = config.depth,
        breadth = config.breadth,
        seed = ?config.seed,
        "engine starting"
    );

    let mut session = Session::new(config)?;
    if let Some(path) = args.tree_file {
        session.set_tree_file(Some(path));
    }

    let stdin = io::stdin();
    let stdout = io::stdout();
    session.run(stdin.lock(), stdout.lock())
}
