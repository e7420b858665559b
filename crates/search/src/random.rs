use tracing::debug;

use crate::{pick, Chooser, GameRules, Line, MoveTree, SearchResult};

/// One-ply baseline: lets `chooser` pick a legal move and scores the board it
/// leads to. Without legal moves the current board is evaluated.
pub fn random_move<R, C>(
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
    let moves = rules.generate_moves(side, board, flags)?;
    if moves.is_empty() {
        return Ok(Line::terminal(rules.evaluate(board)?).into_outcome(0));
    }

    let mv = pick::<R, C>(chooser, &moves)?.clone();
    let (_, next_board, _) = rules.apply_move(side, board, flags, &mv)?;
    let value = rules.evaluate(&next_board)?;
    debug!(?mv, value, "random move chosen");

    let mut tree = MoveTree::new();
    tree.insert(rules.encode(&mv), MoveTree::new());
    Ok(Line {
        value,
        moves: vec![mv],
        tree,
    }
    .into_outcome(1))
}
