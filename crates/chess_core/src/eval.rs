//! Static material evaluation.

use crate::{board::Board, types::*};

/// Material value of a piece in pawns.
#[inline]
pub fn piece_value(kind: PieceKind) -> f64 {
    match kind {
        PieceKind::Pawn => 1.0,
        PieceKind::Knight => 3.2,
        PieceKind::Bishop => 3.3,
        PieceKind::Rook => 5.0,
        PieceKind::Queen => 9.0,
        PieceKind::King => 0.0,
    }
}

/// Material balance from White's point of view: positive favours White
/// (the maximizing side), negative favours Black.
pub fn evaluate(board: &Board) -> f64 {
    board
        .pieces(Color::White)
        .map(|(_, pc)| piece_value(pc.kind))
        .sum::<f64>()
        - board
            .pieces(Color::Black)
            .map(|(_, pc)| piece_value(pc.kind))
            .sum::<f64>()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Position;

    #[test]
    fn startpos_is_balanced() {
        assert_eq!(evaluate(&Board::startpos()), 0.0);
    }

    #[test]
    fn extra_white_queen_scores_positive() {
        let pos = Position::from_fen("4k3/8/8/8/8/8/8/3QK3 w - - 0 1").unwrap();
        assert_eq!(evaluate(&pos.board), 9.0);
    }

    #[test]
    fn black_material_scores_negative() {
        let pos = Position::from_fen("r3k3/8/8/8/8/8/8/4K3 b - - 0 1").unwrap();
        assert_eq!(evaluate(&pos.board), -5.0);
    }
}
