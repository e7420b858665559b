use thiserror::Error;

use crate::types::*;

pub(crate) const KNIGHT_DELTAS: [(i8, i8); 8] = [
    (1, 2),
    (2, 1),
    (-1, 2),
    (-2, 1),
    (1, -2),
    (2, -1),
    (-1, -2),
    (-2, -1),
];
pub(crate) const KING_DELTAS: [(i8, i8); 8] = [
    (1, 1),
    (1, 0),
    (1, -1),
    (0, 1),
    (0, -1),
    (-1, 1),
    (-1, 0),
    (-1, -1),
];
pub(crate) const DIAGONALS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];
pub(crate) const ORTHOGONALS: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

const BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

/// Errors raised while parsing a FEN string.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FenError {
    #[error("expected at least 4 FEN fields, got {0}")]
    FieldCount(usize),
    #[error("expected 8 ranks in FEN board, got {0}")]
    RankCount(usize),
    #[error("invalid piece character '{0}'")]
    BadPiece(char),
    #[error("rank {0} does not describe exactly 8 files")]
    BadRankLength(usize),
    #[error("invalid side to move '{0}'")]
    BadSideToMove(String),
    #[error("invalid castling character '{0}'")]
    BadCastling(char),
    #[error("invalid en-passant square '{0}'")]
    BadEnPassant(String),
    #[error("invalid move counter '{0}'")]
    BadClock(String),
}

/// Errors raised by move application.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MoveError {
    #[error("no piece on origin square {0}")]
    EmptyOrigin(String),
    #[error("piece on {square} does not belong to {side:?}")]
    WrongSide { square: String, side: Color },
}

/// Piece placement only. Everything else about the position lives in [`Flags`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    squares: [Option<Piece>; 64],
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CastlingRights {
    pub wk: bool,
    pub wq: bool,
    pub bk: bool,
    pub bq: bool,
}

impl CastlingRights {
    pub fn all() -> Self {
        Self {
            wk: true,
            wq: true,
            bk: true,
            bq: true,
        }
    }

    pub fn none() -> Self {
        Self {
            wk: false,
            wq: false,
            bk: false,
            bq: false,
        }
    }

    pub fn kingside(&self, c: Color) -> bool {
        match c {
            Color::White => self.wk,
            Color::Black => self.bk,
        }
    }

    pub fn queenside(&self, c: Color) -> bool {
        match c {
            Color::White => self.wq,
            Color::Black => self.bq,
        }
    }

    fn clear_side(&mut self, c: Color) {
        match c {
            Color::White => {
                self.wk = false;
                self.wq = false;
            }
            Color::Black => {
                self.bk = false;
                self.bq = false;
            }
        }
    }

    /// Any move touching a rook's home corner revokes the matching right.
    fn touch(&mut self, square: u8) {
        match square {
            0 => self.wq = false,
            7 => self.wk = false,
            56 => self.bq = false,
            63 => self.bk = false,
            _ => {}
        }
    }
}

/// Auxiliary legality state threaded alongside the [`Board`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Flags {
    pub castling: CastlingRights,
    pub en_passant: Option<u8>, // square behind a pawn that just advanced 2
    pub halfmove_clock: u32,
    pub fullmove_number: u32,
}

impl Flags {
    pub fn startpos() -> Self {
        Self {
            castling: CastlingRights::all(),
            en_passant: None,
            halfmove_clock: 0,
            fullmove_number: 1,
        }
    }
}

/// A full game state: side to move, placement and flags.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Position {
    pub side_to_move: Color,
    pub board: Board,
    pub flags: Flags,
}

impl Board {
    pub fn empty() -> Self {
        Self {
            squares: [None; 64],
        }
    }

    pub fn startpos() -> Self {
        let mut b = Board::empty();
        for (f, &kind) in BACK_RANK.iter().enumerate() {
            b.squares[f] = Some(Piece::new(Color::White, kind));
            b.squares[8 + f] = Some(Piece::new(Color::White, PieceKind::Pawn));
            b.squares[48 + f] = Some(Piece::new(Color::Black, PieceKind::Pawn));
            b.squares[56 + f] = Some(Piece::new(Color::Black, kind));
        }
        b
    }

    pub fn piece_at(&self, sq: u8) -> Option<Piece> {
        self.squares[sq as usize]
    }

    pub fn set_piece(&mut self, sq: u8, pc: Option<Piece>) {
        self.squares[sq as usize] = pc;
    }

    /// Squares and pieces belonging to `c`, in ascending square order.
    pub fn pieces(&self, c: Color) -> impl Iterator<Item = (u8, Piece)> + '_ {
        self.squares
            .iter()
            .enumerate()
            .filter_map(move |(i, pc)| match pc {
                Some(p) if p.color == c => Some((i as u8, *p)),
                _ => None,
            })
    }

    pub fn king_sq(&self, c: Color) -> Option<u8> {
        self.pieces(c)
            .find(|(_, pc)| pc.kind == PieceKind::King)
            .map(|(s, _)| s)
    }

    pub fn in_check(&self, c: Color) -> bool {
        match self.king_sq(c) {
            Some(k) => self.is_square_attacked(k, c.other()),
            None => false,
        }
    }

    fn holds(&self, s: Option<u8>, by: Color, kinds: &[PieceKind]) -> bool {
        match s.and_then(|s| self.piece_at(s)) {
            Some(pc) => pc.color == by && kinds.contains(&pc.kind),
            None => false,
        }
    }

    /// First occupied square along a ray from `from`, if any.
    fn ray_hit(&self, from: u8, (df, dr): (i8, i8)) -> Option<u8> {
        let mut f = file_of(from) + df;
        let mut r = rank_of(from) + dr;
        while let Some(s) = sq(f, r) {
            if self.piece_at(s).is_some() {
                return Some(s);
            }
            f += df;
            r += dr;
        }
        None
    }

    pub fn is_square_attacked(&self, target: u8, by: Color) -> bool {
        let tf = file_of(target);
        let tr = rank_of(target);

        // A pawn of `by` attacks diagonally forward, so look one rank behind.
        let pawn_rank = tr - by.forward();
        if [-1, 1]
            .iter()
            .any(|df| self.holds(sq(tf + df, pawn_rank), by, &[PieceKind::Pawn]))
        {
            return true;
        }
        if KNIGHT_DELTAS
            .iter()
            .any(|(df, dr)| self.holds(sq(tf + df, tr + dr), by, &[PieceKind::Knight]))
        {
            return true;
        }
        if KING_DELTAS
            .iter()
            .any(|(df, dr)| self.holds(sq(tf + df, tr + dr), by, &[PieceKind::King]))
        {
            return true;
        }
        let diagonal = [PieceKind::Bishop, PieceKind::Queen];
        let straight = [PieceKind::Rook, PieceKind::Queen];
        DIAGONALS
            .iter()
            .any(|&d| self.holds(self.ray_hit(target, d), by, &diagonal))
            || ORTHOGONALS
                .iter()
                .any(|&d| self.holds(self.ray_hit(target, d), by, &straight))
    }
}

/// Plays `mv` for `side`, returning the successor side, board and flags.
///
/// The inputs are never modified. Castling is recognised by a king moving two
/// files and en passant by a pawn moving diagonally onto the en-passant square.
/// A pawn reaching the last rank without an explicit promotion becomes a queen.
pub fn apply_move(
    side: Color,
    board: &Board,
    flags: &Flags,
    mv: Move,
) -> Result<(Color, Board, Flags), MoveError> {
    let moved = board
        .piece_at(mv.from)
        .ok_or_else(|| MoveError::EmptyOrigin(sq_to_coord(mv.from)))?;
    if moved.color != side {
        return Err(MoveError::WrongSide {
            square: sq_to_coord(mv.from),
            side,
        });
    }

    let mut next = board.clone();
    let mut nf = flags.clone();
    nf.en_passant = None;

    let mut capture = board.piece_at(mv.to).is_some();
    let from_file = file_of(mv.from);
    let to_file = file_of(mv.to);

    if moved.kind == PieceKind::Pawn
        && from_file != to_file
        && !capture
        && flags.en_passant == Some(mv.to)
        && let Some(victim) = sq(to_file, rank_of(mv.from))
    {
        next.set_piece(victim, None);
        capture = true;
    }

    if moved.kind == PieceKind::King && (to_file - from_file).abs() == 2 {
        let rank = rank_of(mv.from);
        let (rook_from, rook_to) = if to_file > from_file {
            (sq(7, rank), sq(5, rank))
        } else {
            (sq(0, rank), sq(3, rank))
        };
        if let (Some(rf), Some(rt)) = (rook_from, rook_to) {
            let rook = next.piece_at(rf);
            next.set_piece(rf, None);
            next.set_piece(rt, rook);
        }
    }

    let landed = if moved.kind == PieceKind::Pawn && rank_of(mv.to) == side.promotion_rank() {
        Piece::new(side, mv.promo.unwrap_or(PieceKind::Queen))
    } else {
        moved
    };
    next.set_piece(mv.from, None);
    next.set_piece(mv.to, Some(landed));

    if moved.kind == PieceKind::King {
        nf.castling.clear_side(side);
    }
    nf.castling.touch(mv.from);
    nf.castling.touch(mv.to);

    if moved.kind == PieceKind::Pawn && (rank_of(mv.to) - rank_of(mv.from)).abs() == 2 {
        nf.en_passant = sq(from_file, (rank_of(mv.from) + rank_of(mv.to)) / 2);
    }

    nf.halfmove_clock = if moved.kind == PieceKind::Pawn || capture {
        0
    } else {
        flags.halfmove_clock + 1
    };
    if side == Color::Black {
        nf.fullmove_number += 1;
    }

    Ok((side.other(), next, nf))
}

impl Position {
    pub fn startpos() -> Self {
        Position {
            side_to_move: Color::White,
            board: Board::startpos(),
            flags: Flags::startpos(),
        }
    }

    /// Parses Forsyth-Edwards Notation. The move counters are optional.
    pub fn from_fen(fen: &str) -> Result<Self, FenError> {
        let parts: Vec<&str> = fen.split_whitespace().collect();
        if parts.len() < 4 {
            return Err(FenError::FieldCount(parts.len()));
        }

        let ranks: Vec<&str> = parts[0].split('/').collect();
        if ranks.len() != 8 {
            return Err(FenError::RankCount(ranks.len()));
        }
        let mut board = Board::empty();
        for (idx, text) in ranks.iter().enumerate() {
            let rank = 7 - idx as i8; // FEN lists rank 8 .. 1
            let mut file: i8 = 0;
            for ch in text.chars() {
                if let Some(d) = ch.to_digit(10) {
                    file += d as i8;
                    if file > 8 {
                        return Err(FenError::BadRankLength(8 - idx));
                    }
                    continue;
                }
                let kind = PieceKind::from_letter(ch).ok_or(FenError::BadPiece(ch))?;
                let color = if ch.is_ascii_uppercase() {
                    Color::White
                } else {
                    Color::Black
                };
                let s = sq(file, rank).ok_or(FenError::BadRankLength(8 - idx))?;
                board.set_piece(s, Some(Piece::new(color, kind)));
                file += 1;
            }
            if file != 8 {
                return Err(FenError::BadRankLength(8 - idx));
            }
        }

        let side_to_move = match parts[1] {
            "w" => Color::White,
            "b" => Color::Black,
            other => return Err(FenError::BadSideToMove(other.to_string())),
        };

        let mut castling = CastlingRights::none();
        if parts[2] != "-" {
            for c in parts[2].chars() {
                match c {
                    'K' => castling.wk = true,
                    'Q' => castling.wq = true,
                    'k' => castling.bk = true,
                    'q' => castling.bq = true,
                    _ => return Err(FenError::BadCastling(c)),
                }
            }
        }

        let en_passant = match parts[3] {
            "-" => None,
            s => Some(coord_to_sq(s).ok_or_else(|| FenError::BadEnPassant(s.to_string()))?),
        };

        let clock = |field: Option<&&str>, default: u32| -> Result<u32, FenError> {
            match field {
                Some(s) => s.parse().map_err(|_| FenError::BadClock(s.to_string())),
                None => Ok(default),
            }
        };
        let halfmove_clock = clock(parts.get(4), 0)?;
        let fullmove_number = clock(parts.get(5), 1)?;

        Ok(Position {
            side_to_move,
            board,
            flags: Flags {
                castling,
                en_passant,
                halfmove_clock,
                fullmove_number,
            },
        })
    }

    /// Returns the position after `mv`, leaving `self` untouched.
    pub fn play(&self, mv: Move) -> Result<Position, MoveError> {
        let (side_to_move, board, flags) =
            apply_move(self.side_to_move, &self.board, &self.flags, mv)?;
        Ok(Position {
            side_to_move,
            board,
            flags,
        })
    }
}

#[cfg(test)]
#[path = "board_tests.rs"]
mod board_tests;
