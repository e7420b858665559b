//! Exhaustive fixed-depth minimax.

use tracing::debug;

use crate::{improves, GameRules, Line, MoveTree, SearchError, SearchResult};

/// Searches every line `depth` plies deep and returns the optimal value and
/// principal variation.
///
/// The maximizing side keeps the first move whose value is strictly greater
/// than the best so far, the minimizing side the first strictly smaller one,
/// so ties go to the earliest enumerated move. A depth of zero or a position
/// without legal moves evaluates the board as-is.
pub fn minimax<R: GameRules>(
    rules: &R,
    side: R::Side,
    board: &R::Board,
    flags: &R::Flags,
    depth: u32,
) -> SearchResult<R> {
    let mut nodes = 0;
    let line = search(rules, side, board, flags, depth, &mut nodes)?;
    debug!(
        depth,
        nodes,
        value = line.value,
        pv_len = line.moves.len(),
        "minimax finished"
    );
    Ok(line.into_outcome(nodes))
}

type Node<R> = Line<<R as GameRules>::Move, <R as GameRules>::Key>;

fn search<R: GameRules>(
    rules: &R,
    side: R::Side,
    board: &R::Board,
    flags: &R::Flags,
    depth: u32,
    nodes: &mut u64,
) -> Result<Node<R>, SearchError<R::Error>> {
    if depth == 0 {
        return Ok(Line::terminal(rules.evaluate(board)?));
    }
    let moves = rules.generate_moves(side, board, flags)?;
    if moves.is_empty() {
        return Ok(Line::terminal(rules.evaluate(board)?));
    }

    let maximizing = rules.is_maximizing(side);
    let mut tree = MoveTree::new();
    let mut best: Option<(f64, Vec<R::Move>)> = None;

    for mv in moves {
        let (next_side, next_board, next_flags) = rules.apply_move(side, board, flags, &mv)?;
        *nodes += 1;
        let child = search(rules, next_side, &next_board, &next_flags, depth - 1, nodes)?;
        tree.insert(rules.encode(&mv), child.tree);

        if improves(maximizing, child.value, best.as_ref().map(|(v, _)| *v)) {
            let mut line = Vec::with_capacity(child.moves.len() + 1);
            line.push(mv);
            line.extend(child.moves);
            best = Some((child.value, line));
        }
    }

    // `moves` was non-empty, so `best` is set.
    let (value, moves) = best.unwrap_or_default();
    Ok(Line { value, moves, tree })
}

#[cfg(test)]
#[path = "minimax_tests.rs"]
mod minimax_tests;
