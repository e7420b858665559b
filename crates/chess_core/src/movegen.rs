use crate::board::{apply_move, Board, Flags, DIAGONALS, KING_DELTAS, KNIGHT_DELTAS, ORTHOGONALS};
use crate::types::*;

/// Legal destination squares for the piece of `side` standing on `from`.
///
/// Returns an empty list when `from` is empty or holds an enemy piece.
/// Destinations that would leave `side` in check are filtered out.
pub fn destinations(side: Color, board: &Board, from: u8, flags: &Flags) -> Vec<u8> {
    let pc = match board.piece_at(from) {
        Some(pc) if pc.color == side => pc,
        _ => return Vec::new(),
    };

    let mut out = Vec::with_capacity(28);
    match pc.kind {
        PieceKind::Pawn => pawn_targets(board, from, side, flags, &mut out),
        PieceKind::Knight => step_targets(board, from, side, &KNIGHT_DELTAS, &mut out),
        PieceKind::Bishop => ray_targets(board, from, side, &DIAGONALS, &mut out),
        PieceKind::Rook => ray_targets(board, from, side, &ORTHOGONALS, &mut out),
        PieceKind::Queen => {
            ray_targets(board, from, side, &DIAGONALS, &mut out);
            ray_targets(board, from, side, &ORTHOGONALS, &mut out);
        }
        PieceKind::King => {
            step_targets(board, from, side, &KING_DELTAS, &mut out);
            castle_targets(board, from, side, flags, &mut out);
        }
    }

    out.retain(|&to| leaves_king_safe(side, board, flags, from, to));
    out
}

/// The piece a pawn promotes to when moving `from` -> `to`, if the move is a
/// promotion. Only a single choice (the queen) is offered.
pub fn promotion_choice(side: Color, board: &Board, from: u8, to: u8) -> Option<PieceKind> {
    match board.piece_at(from) {
        Some(pc)
            if pc.color == side
                && pc.kind == PieceKind::Pawn
                && rank_of(to) == side.promotion_rank() =>
        {
            Some(PieceKind::Queen)
        }
        _ => None,
    }
}

/// Lazily enumerates every legal move for `side`: pieces in ascending square
/// order, each destination tagged with its promotion choice.
pub fn legal_moves_iter<'a>(
    side: Color,
    board: &'a Board,
    flags: &'a Flags,
) -> impl Iterator<Item = Move> + 'a {
    board.pieces(side).flat_map(move |(from, _)| {
        destinations(side, board, from, flags)
            .into_iter()
            .map(move |to| Move::with_promotion(from, to, promotion_choice(side, board, from, to)))
    })
}

/// Every legal move for `side`, collected.
pub fn legal_moves(side: Color, board: &Board, flags: &Flags) -> Vec<Move> {
    legal_moves_iter(side, board, flags).collect()
}

fn leaves_king_safe(side: Color, board: &Board, flags: &Flags, from: u8, to: u8) -> bool {
    match apply_move(side, board, flags, Move::new(from, to)) {
        Ok((_, next, _)) => !next.in_check(side),
        Err(_) => false,
    }
}

fn open_or_enemy(board: &Board, to: u8, c: Color) -> bool {
    board.piece_at(to).is_none_or(|pc| pc.color != c)
}

fn pawn_targets(board: &Board, from: u8, c: Color, flags: &Flags, out: &mut Vec<u8>) {
    let f = file_of(from);
    let r = rank_of(from);
    let dir = c.forward();

    if let Some(one) = sq(f, r + dir)
        && board.piece_at(one).is_none()
    {
        out.push(one);
        if r == c.pawn_rank()
            && let Some(two) = sq(f, r + 2 * dir)
            && board.piece_at(two).is_none()
        {
            out.push(two);
        }
    }

    for df in [-1, 1] {
        let Some(to) = sq(f + df, r + dir) else {
            continue;
        };
        match board.piece_at(to) {
            Some(pc) if pc.color != c => out.push(to),
            None if flags.en_passant == Some(to) => out.push(to),
            _ => {}
        }
    }
}

fn step_targets(board: &Board, from: u8, c: Color, deltas: &[(i8, i8)], out: &mut Vec<u8>) {
    let f = file_of(from);
    let r = rank_of(from);
    out.extend(
        deltas
            .iter()
            .filter_map(|(df, dr)| sq(f + df, r + dr))
            .filter(|&to| open_or_enemy(board, to, c)),
    );
}

fn ray_targets(board: &Board, from: u8, c: Color, dirs: &[(i8, i8)], out: &mut Vec<u8>) {
    for (df, dr) in dirs {
        let mut f = file_of(from) + df;
        let mut r = rank_of(from) + dr;
        while let Some(to) = sq(f, r) {
            match board.piece_at(to) {
                None => out.push(to),
                Some(pc) => {
                    if pc.color != c {
                        out.push(to);
                    }
                    break;
                }
            }
            f += df;
            r += dr;
        }
    }
}

fn castle_targets(board: &Board, from: u8, c: Color, flags: &Flags, out: &mut Vec<u8>) {
    let rank = c.home_rank();
    if sq(4, rank) != Some(from) || board.in_check(c) {
        return;
    }
    let enemy = c.other();
    let rook_home = |file: i8| {
        sq(file, rank)
            .and_then(|s| board.piece_at(s))
            .is_some_and(|pc| pc == Piece::new(c, PieceKind::Rook))
    };
    let empty = |files: &[i8]| {
        files
            .iter()
            .all(|&f| sq(f, rank).is_some_and(|s| board.piece_at(s).is_none()))
    };
    let safe = |files: &[i8]| {
        files
            .iter()
            .all(|&f| sq(f, rank).is_some_and(|s| !board.is_square_attacked(s, enemy)))
    };

    if flags.castling.kingside(c) && rook_home(7) && empty(&[5, 6]) && safe(&[5, 6]) {
        out.extend(sq(6, rank));
    }
    if flags.castling.queenside(c) && rook_home(0) && empty(&[1, 2, 3]) && safe(&[2, 3]) {
        out.extend(sq(2, rank));
    }
}
