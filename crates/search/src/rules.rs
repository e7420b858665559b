//! The collaborator contract every searcher is written against.

use std::fmt::Debug;

/// Rules engine, static evaluator and move encoder for a two-player,
/// zero-sum game.
///
/// Implementations must be deterministic and must never mutate their inputs:
/// `apply_move` returns a fresh board and flags so sibling branches of a
/// search never alias state.
pub trait GameRules {
    /// Which player moves next.
    type Side: Copy + Eq + Debug;
    type Board: Clone;
    /// Auxiliary legality state (castling rights, en passant, ...).
    type Flags: Clone;
    type Move: Clone + Debug;
    /// Map key produced by [`GameRules::encode`].
    type Key: Ord + Clone + Debug;
    type Error: std::error::Error + Send + Sync + 'static;

    /// Every legal move for `side`. An empty list is a terminal position.
    fn generate_moves(
        &self,
        side: Self::Side,
        board: &Self::Board,
        flags: &Self::Flags,
    ) -> Result<Vec<Self::Move>, Self::Error>;

    fn apply_move(
        &self,
        side: Self::Side,
        board: &Self::Board,
        flags: &Self::Flags,
        mv: &Self::Move,
    ) -> Result<(Self::Side, Self::Board, Self::Flags), Self::Error>;

    /// Static score; higher favours the maximizing side.
    fn evaluate(&self, board: &Self::Board) -> Result<f64, Self::Error>;

    /// Must be injective: two different moves never share a key.
    fn encode(&self, mv: &Self::Move) -> Self::Key;

    fn is_maximizing(&self, side: Self::Side) -> bool;
}
