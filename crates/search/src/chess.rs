//! `chess_core` as a [`GameRules`] collaborator.

use chess_core::{
    apply_move, evaluate, legal_moves_iter, move_to_uci, Board, Color, Flags, Move, MoveError,
};

use crate::GameRules;

/// Standard chess. White maximizes, Black minimizes; moves are keyed by their
/// UCI spelling (`e2e4`, `a7a8q`).
#[derive(Debug, Clone, Copy, Default)]
pub struct ChessRules;

impl GameRules for ChessRules {
    type Side = Color;
    type Board = Board;
    type Flags = Flags;
    type Move = Move;
    type Key = String;
    type Error = MoveError;

    /// One move per legal destination of each of `side`'s pieces, tagged with
    /// the rules engine's promotion choice. Order is the engine's order.
    fn generate_moves(
        &self,
        side: Color,
        board: &Board,
        flags: &Flags,
    ) -> Result<Vec<Move>, MoveError> {
        Ok(legal_moves_iter(side, board, flags).collect())
    }

    fn apply_move(
        &self,
        side: Color,
        board: &Board,
        flags: &Flags,
        mv: &Move,
    ) -> Result<(Color, Board, Flags), MoveError> {
        apply_move(side, board, flags, *mv)
    }

    fn evaluate(&self, board: &Board) -> Result<f64, MoveError> {
        Ok(evaluate(board))
    }

    fn encode(&self, mv: &Move) -> String {
        move_to_uci(*mv)
    }

    fn is_maximizing(&self, side: Color) -> bool {
        side == Color::White
    }
}
