//! Minimax with alpha-beta pruning.

use tracing::debug;

use crate::{improves, GameRules, Line, MoveTree, SearchError, SearchResult};

/// Alpha-beta search with the full `(-inf, +inf)` window.
///
/// Returns the same value and principal variation as [`crate::minimax`] for
/// the same inputs; only the move tree is smaller, because siblings after a
/// cutoff are never explored.
pub fn alphabeta<R: GameRules>(
    rules: &R,
    side: R::Side,
    board: &R::Board,
    flags: &R::Flags,
    depth: u32,
) -> SearchResult<R> {
    alphabeta_window(
        rules,
        side,
        board,
        flags,
        depth,
        f64::NEG_INFINITY,
        f64::INFINITY,
    )
}

/// Alpha-beta search starting from an explicit `(alpha, beta)` window.
///
/// `alpha` is the value the maximizing side is already assured of, `beta`
/// the value the minimizing side is assured of.
pub fn alphabeta_window<R: GameRules>(
    rules: &R,
    side: R::Side,
    board: &R::Board,
    flags: &R::Flags,
    depth: u32,
    alpha: f64,
    beta: f64,
) -> SearchResult<R> {
    if alpha.is_nan() || beta.is_nan() {
        return Err(SearchError::InvalidArgument(
            "alpha-beta bounds must not be NaN".to_string(),
        ));
    }
    let mut nodes = 0;
    let line = search(rules, side, board, flags, depth, alpha, beta, &mut nodes)?;
    debug!(
        depth,
        nodes,
        value = line.value,
        pv_len = line.moves.len(),
        "alpha-beta finished"
    );
    Ok(line.into_outcome(nodes))
}

type Node<R> = Line<<R as GameRules>::Move, <R as GameRules>::Key>;

#[allow(clippy::too_many_arguments)]
fn search<R: GameRules>(
    rules: &R,
    side: R::Side,
    board: &R::Board,
    flags: &R::Flags,
    depth: u32,
    mut alpha: f64,
    mut beta: f64,
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
        let child = search(
            rules,
            next_side,
            &next_board,
            &next_flags,
            depth - 1,
            alpha,
            beta,
            nodes,
        )?;
        // The move that triggers a cutoff is still recorded.
        tree.insert(rules.encode(&mv), child.tree);

        if improves(maximizing, child.value, best.as_ref().map(|(v, _)| *v)) {
            let mut line = Vec::with_capacity(child.moves.len() + 1);
            line.push(mv);
            line.extend(child.moves);
            best = Some((child.value, line));
        }

        let best_value = best.as_ref().map_or(child.value, |(v, _)| *v);
        if maximizing {
            alpha = alpha.max(best_value);
        } else {
            beta = beta.min(best_value);
        }
        if alpha >= beta {
            break;
        }
    }

    let (value, moves) = best.unwrap_or_default();
    Ok(Line { value, moves, tree })
}

#[cfg(test)]
#[path = "alphabeta_tests.rs"]
mod alphabeta_tests;
