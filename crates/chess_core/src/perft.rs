use crate::{
    board::{apply_move, Board, Flags},
    movegen::legal_moves,
    types::Color,
};

/// Counts leaf positions `depth` plies below the given state.
///
/// Promotions count once per destination because the generator offers a
/// single promotion piece.
pub fn perft(side: Color, board: &Board, flags: &Flags, depth: u8) -> u64 {
    if depth == 0 {
        return 1;
    }
    let moves = legal_moves(side, board, flags);
    if depth == 1 {
        return moves.len() as u64;
    }
    moves
        .into_iter()
        .filter_map(|mv| apply_move(side, board, flags, mv).ok())
        .map(|(s, b, f)| perft(s, &b, &f, depth - 1))
        .sum()
}
