//! UCI command loop.

use std::io::{BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use chess_core::{move_to_uci, position_from_uci, Color, Position};
use game_search::{ChessRules, ConfigError, RandomChooser, SearchConfig, SearchPlan, Strategy};
use tracing::{debug, error, info, warn};

const ENGINE_NAME: &str = "GameSearch 0.1";
const ENGINE_AUTHOR: &str = "ML-chess";

const STRATEGY_VARS: &str = "var minimax var alphabeta var stochastic var random";

/// Upper bounds advertised for the spin options and enforced by `setoption`.
const MAX_DEPTH: i64 = 64;
const MAX_BREADTH: i64 = 4096;

/// Whether the loop should keep reading commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Engine state between UCI commands.
pub struct Session {
    pos: Position,
    config: SearchConfig,
    plan: SearchPlan,
    chooser: RandomChooser,
    tree_file: Option<PathBuf>,
}

impl Session {
    pub fn new(config: SearchConfig) -> Result<Self, ConfigError> {
        let plan = config.plan()?;
        let chooser = config.chooser();
        Ok(Self {
            pos: Position::startpos(),
            config,
            plan,
            chooser,
            tree_file: None,
        })
    }

    pub fn set_tree_file(&mut self, path: Option<PathBuf>) {
        self.tree_file = path;
    }

    pub fn position(&self) -> &Position {
        &self.pos
    }

    pub fn plan(&self) -> SearchPlan {
        self.plan
    }

    /// Reads commands until `quit` or end of input.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, mut out: W) -> Result<()> {
        for line in input.lines() {
            let line = line.context("reading UCI input")?;
            if self.handle(&line, &mut out)? == Flow::Quit {
                break;
            }
        }
        Ok(())
    }

    /// Handles one command line. Only output failures are errors; bad
    /// commands are logged and ignored, as UCI expects.
    pub fn handle<W: Write>(&mut self, line: &str, out: &mut W) -> Result<Flow> {
        let parts: Vec<&str> = line.split_whitespace().collect();
        let Some((&cmd, args)) = parts.split_first() else {
            return Ok(Flow::Continue);
        };
        debug!(cmd, "uci command");

        match cmd {
            "uci" => self.identify(out)?,
            "isready" => writeln!(out, "readyok")?,
            "ucinewgame" => self.pos = Position::startpos(),
            "setoption" => self.set_option(args),
            "position" => match position_from_uci(args) {
                Some(pos) => self.pos = pos,
                None => warn!(args = %args.join(" "), "ignoring invalid position"),
            },
            "go" => self.go(out)?,
            "quit" => return Ok(Flow::Quit),
            _ => debug!(cmd, "ignoring unknown command"),
        }
        out.flush()?;
        Ok(Flow::Continue)
    }

    fn identify<W: Write>(&self, out: &mut W) -> Result<()> {
        writeln!(out, "id name {ENGINE_NAME}")?;
        writeln!(out, "id author {ENGINE_AUTHOR}")?;
        writeln!(
            out,
            "option name Strategy type combo default {} {STRATEGY_VARS}",
            self.config.strategy
        )?;
        writeln!(
            out,
            "option name Depth type spin default {} min 0 max {MAX_DEPTH}",
            self.config.depth
        )?;
        writeln!(
            out,
            "option name Breadth type spin default {} min 0 max {MAX_BREADTH}",
            self.config.breadth
        )?;
        writeln!(out, "option name Seed type string default <empty>")?;
        writeln!(out, "option name TreeFile type string default <empty>")?;
        writeln!(out, "uciok")?;
        Ok(())
    }

    // setoption name <id> [value <x>]
    fn set_option(&mut self, args: &[&str]) {
        let value_at = args.iter().position(|&a| a == "value");
        let name = args
            .get(1..value_at.unwrap_or(args.len()))
            .unwrap_or_default()
            .join(" ");
        let value = value_at
            .map(|i| args[i + 1..].join(" "))
            .unwrap_or_default();

        if let Err(e) = self.apply_option(&name, &value) {
            warn!(option = %name, %value, error = %e, "option rejected");
        }
    }

    fn apply_option(&mut self, name: &str, value: &str) -> Result<(), ConfigError> {
        let mut next = self.config.clone();
        match name.to_ascii_lowercase().as_str() {
            "strategy" => next.strategy = value.parse::<Strategy>()?,
            "depth" => next.depth = parse_spin(name, value, MAX_DEPTH)?,
            "breadth" => next.breadth = parse_spin(name, value, MAX_BREADTH)?,
            "seed" => {
                next.seed = match value {
                    "" | "<empty>" => None,
                    v => Some(v.parse().map_err(|_| {
                        ConfigError::InvalidArgument(format!("seed must be an integer, got '{v}'"))
                    })?),
                };
                self.chooser = next.chooser();
            }
            "treefile" => {
                self.tree_file = match value {
                    "" | "<empty>" => None,
                    v => Some(PathBuf::from(v)),
                };
                return Ok(());
            }
            _ => {
                debug!(option = name, "ignoring unknown option");
                return Ok(());
            }
        }
        self.plan = next.plan()?;
        info!(option = name, value, "option set");
        self.config = next;
        Ok(())
    }

    fn go<W: Write>(&mut self, out: &mut W) -> Result<()> {
        let pos = &self.pos;
        let result = self.plan.run(
            &ChessRules,
            pos.side_to_move,
            &pos.board,
            &pos.flags,
            &mut self.chooser,
        );
        let outcome = match result {
            Ok(outcome) => outcome,
            Err(e) => {
                error!(error = %e, "search failed");
                writeln!(out, "info string search failed: {e}")?;
                writeln!(out, "bestmove 0000")?;
                return Ok(());
            }
        };

        let pv: Vec<String> = outcome.moves.iter().map(|&mv| move_to_uci(mv)).collect();
        let mut info_line = format!(
            "info depth {} score cp {} nodes {}",
            self.plan.depth,
            centipawns(outcome.value, pos.side_to_move),
            outcome.nodes
        );
        if !pv.is_empty() {
            info_line.push_str(" pv ");
            info_line.push_str(&pv.join(" "));
        }
        writeln!(out, "{info_line}")?;
        writeln!(
            out,
            "bestmove {}",
            pv.first().map(String::as_str).unwrap_or("0000")
        )?;

        if let Some(path) = &self.tree_file {
            let written = serde_json::to_string_pretty(&outcome.tree)
                .map_err(anyhow::Error::from)
                .and_then(|json| std::fs::write(path, json).map_err(anyhow::Error::from));
            match written {
                Ok(()) => debug!(
                    path = %path.display(),
                    keys = outcome.tree.node_count(),
                    "move tree written"
                ),
                Err(e) => error!(path = %path.display(), error = %e, "failed to write move tree"),
            }
        }
        Ok(())
    }
}

fn parse_spin(name: &str, value: &str, max: i64) -> Result<i64, ConfigError> {
    match value.trim().parse::<i64>() {
        Ok(n) if (0..=max).contains(&n) => Ok(n),
        _ => Err(ConfigError::InvalidArgument(format!(
            "{name} must be an integer between 0 and {max}, got '{value}'"
        ))),
    }
}

/// Converts a White-relative value in pawns to centipawns for the side to move.
fn centipawns(value: f64, side: Color) -> i64 {
    let cp = (value * 100.0).round() as i64;
    match side {
        Color::White => cp,
        Color::Black => -cp,
    }
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod session_tests;
