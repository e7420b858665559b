//! Search configuration
//!
//! Loaded from TOML; every key is optional:
//!
//! ```toml
//! strategy = "alphabeta"   # minimax | alphabeta | stochastic | random
//! depth = 3
//! breadth = 8              # rollouts per first move, stochastic only
//! seed = 42                # omit for an entropy-seeded chooser
//! log_level = "info"
//! ```

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    alphabeta, minimax, random_move, stochastic, Chooser, GameRules, RandomChooser, SearchResult,
};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("unknown strategy '{0}'")]
    UnknownStrategy(String),
}

/// Which searcher to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    Minimax,
    #[default]
    AlphaBeta,
    Stochastic,
    Random,
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Strategy::Minimax => "minimax",
            Strategy::AlphaBeta => "alphabeta",
            Strategy::Stochastic => "stochastic",
            Strategy::Random => "random",
        })
    }
}

impl FromStr for Strategy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "minimax" => Ok(Strategy::Minimax),
            "alphabeta" | "alpha-beta" => Ok(Strategy::AlphaBeta),
            "stochastic" => Ok(Strategy::Stochastic),
            "random" => Ok(Strategy::Random),
            _ => Err(ConfigError::UnknownStrategy(s.to_string())),
        }
    }
}

/// User-facing settings. Depth and breadth are signed so that bad input is
/// reported by [`SearchConfig::plan`] instead of failing to parse.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub strategy: Strategy,
    /// Plies of lookahead.
    pub depth: i64,
    /// Rollouts averaged per first move (stochastic only).
    pub breadth: i64,
    /// Seed for the random chooser.
    pub seed: Option<u64>,
    pub log_level: String,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            strategy: Strategy::AlphaBeta,
            depth: 2,
            breadth: 4,
            seed: None,
            log_level: "info".to_string(),
        }
    }
}

impl SearchConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: SearchConfig = toml::from_str(text)?;
        config.plan()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Validates depth and breadth and returns a runnable plan.
    pub fn plan(&self) -> Result<SearchPlan, ConfigError> {
        Ok(SearchPlan {
            strategy: self.strategy,
            depth: non_negative("depth", self.depth)?,
            breadth: non_negative("breadth", self.breadth)?,
        })
    }

    /// A seeded chooser when `seed` is set, otherwise an entropy-seeded one.
    pub fn chooser(&self) -> RandomChooser {
        match self.seed {
            Some(seed) => RandomChooser::seeded(seed),
            None => RandomChooser::from_entropy(),
        }
    }
}

fn non_negative(name: &str, value: i64) -> Result<u32, ConfigError> {
    u32::try_from(value).map_err(|_| {
        ConfigError::InvalidArgument(format!(
            "{name} must be between 0 and {}, got {value}",
            u32::MAX
        ))
    })
}

/// A validated strategy and budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchPlan {
    pub strategy: Strategy,
    pub depth: u32,
    pub breadth: u32,
}

impl SearchPlan {
    /// Runs the selected searcher. `chooser` is only consulted by the
    /// stochastic and random strategies.
    pub fn run<R, C>(
        &self,
        rules: &R,
        side: R::Side,
        board: &R::Board,
        flags: &R::Flags,
        chooser: &mut C,
    ) -> SearchResult<R>
    where
        R: GameRules,
        C: Chooser<R::Move> + ?Sized,
    {
        match self.strategy {
            Strategy::Minimax => minimax(rules, side, board, flags, self.depth),
            Strategy::AlphaBeta => alphabeta(rules, side, board, flags, self.depth),
            Strategy::Stochastic => {
                stochastic(rules, side, board, flags, self.depth, self.breadth, chooser)
            }
            Strategy::Random => random_move(rules, side, board, flags, chooser),
        }
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod config_tests;
