//! Game-tree search engines
//!
//! Three interchangeable searchers over the same [`GameRules`] contract:
//! - [`minimax`]: exhaustive fixed-depth search
//! - [`alphabeta`]: the same answer as minimax with provably irrelevant
//!   subtrees pruned
//! - [`stochastic`]: every first move is scored by averaging `breadth`
//!   sampled rollouts
//!
//! Every searcher returns the value reached, the chosen line and a
//! [`MoveTree`] trace of what was explored. [`random_move`] is a one-ply
//! baseline. [`ChessRules`] plugs in the `chess_core` rules engine.

mod alphabeta;
mod chess;
mod chooser;
mod config;
mod error;
mod minimax;
mod random;
mod rules;
mod stochastic;
mod tree;

#[cfg(test)]
mod testing;

pub use alphabeta::{alphabeta, alphabeta_window};
pub use chess::ChessRules;
pub use chooser::{Chooser, FirstChooser, RandomChooser};
pub use config::{ConfigError, SearchConfig, SearchPlan, Strategy};
pub use error::SearchError;
pub use minimax::minimax;
pub use random::random_move;
pub use rules::GameRules;
pub use stochastic::{rollout, stochastic};
pub use tree::MoveTree;

/// What every searcher returns.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchOutcome<M, K: Ord> {
    /// Value of the position the chosen line leads to (or, for stochastic
    /// search, the averaged rollout value of the chosen first move).
    pub value: f64,
    /// Chosen line from the searched position. Empty at a terminal node.
    pub moves: Vec<M>,
    /// Every move explored during the call.
    pub tree: MoveTree<K>,
    /// Number of moves applied during the call.
    pub nodes: u64,
}

/// Outcome type for a given rules engine.
pub type Outcome<R> = SearchOutcome<<R as GameRules>::Move, <R as GameRules>::Key>;

/// Result type for a given rules engine.
pub type SearchResult<R> = Result<Outcome<R>, SearchError<<R as GameRules>::Error>>;

/// Value, line and trace of one recursive call.
pub(crate) struct Line<M, K: Ord> {
    pub value: f64,
    pub moves: Vec<M>,
    pub tree: MoveTree<K>,
}

impl<M, K: Ord> Line<M, K> {
    pub fn terminal(value: f64) -> Self {
        Self {
            value,
            moves: Vec::new(),
            tree: MoveTree::new(),
        }
    }

    pub fn into_outcome(self, nodes: u64) -> SearchOutcome<M, K> {
        SearchOutcome {
            value: self.value,
            moves: self.moves,
            tree: self.tree,
            nodes,
        }
    }
}

/// Strict improvement test. Ties keep the earlier move.
pub(crate) fn improves(maximizing: bool, candidate: f64, best: Option<f64>) -> bool {
    match best {
        None => true,
        Some(b) if maximizing => candidate > b,
        Some(b) => candidate < b,
    }
}

/// Asks `chooser` for a move and checks the index it returns.
pub(crate) fn pick<'a, R, C>(
    chooser: &mut C,
    moves: &'a [R::Move],
) -> Result<&'a R::Move, SearchError<R::Error>>
where
    R: GameRules,
    C: Chooser<R::Move> + ?Sized,
{
    let idx = chooser.choose(moves);
    moves.get(idx).ok_or_else(|| {
        SearchError::InvalidArgument(format!(
            "chooser returned index {idx} for {} candidates",
            moves.len()
        ))
    })
}
