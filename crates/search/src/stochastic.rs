//! Rollout-based stochastic search.

use tracing::{debug, trace};

use crate::{improves, pick, Chooser, GameRules, Line, MoveTree, SearchError, SearchResult};

/// Scores every legal first move by averaging `breadth` sampled rollouts of
/// `depth - 1` further plies, then keeps the best average (first strict
/// improvement wins ties).
///
/// The returned line holds only the chosen first move. The trace records every
/// first move; below each one the rollout traces are merged shallowly, so a
/// later rollout that starts with the same reply replaces the earlier one's
/// subtree.
///
/// `depth == 0` or `breadth == 0` evaluates the board immediately without
/// enumerating moves.
pub fn stochastic<R, C>(
    rules: &R,
    side: R::Side,
    board: &R::Board,
    flags: &R::Flags,
    depth: u32,
    breadth: u32,
    chooser: &mut C,
) -> SearchResult<R>
where
    R: GameRules,
    C: Chooser<R::Move> + ?Sized,
{
    if depth == 0 || breadth == 0 {
        return Ok(Line::terminal(rules.evaluate(board)?).into_outcome(0));
    }
    let mut moves = rules.generate_moves(side, board, flags)?;
    if moves.is_empty() {
        return Ok(Line::terminal(rules.evaluate(board)?).into_outcome(0));
    }

    let maximizing = rules.is_maximizing(side);
    let mut nodes = 0;
    let mut tree = MoveTree::new();
    let mut best_value = 0.0;
    let mut best_idx = 0;

    for (i, mv) in moves.iter().enumerate() {
        let (next_side, next_board, next_flags) = rules.apply_move(side, board, flags, mv)?;
        nodes += 1;

        let mut merged = MoveTree::new();
        let mut total = 0.0;
        for _ in 0..breadth {
            let path = sample(
                rules,
                next_side,
                &next_board,
                &next_flags,
                depth - 1,
                chooser,
                &mut nodes,
            )?;
            total += path.value;
            merged.absorb(path.tree);
        }
        let average = total / f64::from(breadth);
        trace!(?mv, average, "first move scored");

        tree.insert(rules.encode(mv), merged);
        if improves(maximizing, average, (i > 0).then_some(best_value)) {
            best_value = average;
            best_idx = i;
        }
    }

    let chosen = moves.swap_remove(best_idx);
    debug!(depth, breadth, nodes, value = best_value, "stochastic search finished");
    Ok(Line {
        value: best_value,
        moves: vec![chosen],
        tree,
    }
    .into_outcome(nodes))
}

/// Plays a single sampled path of up to `depth` plies, asking `chooser` for
/// one move per ply.
///
/// The returned line is the whole sampled path and the trace is a single
/// chain with no siblings.
pub fn rollout<R, C>(
    rules: &R,
    side: R::Side,
    board: &R::Board,
    flags: &R::Flags,
    depth: u32,
    chooser: &mut C,
) -> SearchResult<R>
where
    R: GameRules,
    C: Chooser<R::Move> + ?Sized,
{
    let mut nodes = 0;
    let line = sample(rules, side, board, flags, depth, chooser, &mut nodes)?;
    Ok(line.into_outcome(nodes))
}

type Node<R> = Line<<R as GameRules>::Move, <R as GameRules>::Key>;

fn sample<R, C>(
    rules: &R,
    side: R::Side,
    board: &R::Board,
    flags: &R::Flags,
    depth: u32,
    chooser: &mut C,
    nodes: &mut u64,
) -> Result<Node<R>, SearchError<R::Error>>
where
    R: GameRules,
    C: Chooser<R::Move> + ?Sized,
{
    if depth == 0 {
        return Ok(Line::terminal(rules.evaluate(board)?));
    }
    let moves = rules.generate_moves(side, board, flags)?;
    if moves.is_empty() {
        return Ok(Line::terminal(rules.evaluate(board)?));
    }

    let mv = pick::<R, C>(chooser, &moves)?.clone();
    let (next_side, next_board, next_flags) = rules.apply_move(side, board, flags, &mv)?;
    *nodes += 1;
    let below = sample(
        rules,
        next_side,
        &next_board,
        &next_flags,
        depth - 1,
        chooser,
        nodes,
    )?;

    let mut tree = MoveTree::new();
    tree.insert(rules.encode(&mv), below.tree);
    let mut moves = Vec::with_capacity(below.moves.len() + 1);
    moves.push(mv);
    moves.extend(below.moves);
    Ok(Line {
        value: below.value,
        moves,
        tree,
    })
}

#[cfg(test)]
#[path = "stochastic_tests.rs"]
mod stochastic_tests;
