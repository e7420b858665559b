use crate::{board::Position, movegen::legal_moves, types::*};

/// Long algebraic notation (`e2e4`, `e7e8q`). Distinct moves always map to
/// distinct strings, so this doubles as a map key.
pub fn move_to_uci(mv: Move) -> String {
    let mut s = sq_to_coord(mv.from);
    s.push_str(&sq_to_coord(mv.to));
    if let Some(p) = mv.promo {
        s.push(p.letter());
    }
    s
}

/// Parses `txt` and matches it against the legal moves of `pos`.
pub fn parse_uci_move(pos: &Position, txt: &str) -> Option<Move> {
    if !txt.is_ascii() || !(4..=5).contains(&txt.len()) {
        return None;
    }
    let from = coord_to_sq(&txt[0..2])?;
    let to = coord_to_sq(&txt[2..4])?;
    let promo = match txt[4..].chars().next() {
        Some(c) => Some(PieceKind::from_letter(c).filter(|k| {
            matches!(
                k,
                PieceKind::Queen | PieceKind::Rook | PieceKind::Bishop | PieceKind::Knight
            )
        })?),
        None => None,
    };

    let legal = legal_moves(pos.side_to_move, &pos.board, &pos.flags)
        .into_iter()
        .find(|m| m.from == from && m.to == to)?;
    match (legal.promo, promo) {
        // Under-promotion is accepted even though the generator only offers a queen.
        (Some(_), Some(p)) => Some(Move::with_promotion(from, to, Some(p))),
        (Some(_), None) => Some(legal),
        (None, None) => Some(legal),
        (None, Some(_)) => None,
    }
}

/// Builds a position from the arguments of a UCI `position` command:
/// `startpos [moves ...]` or `fen <fields> [moves ...]`.
///
/// Returns `None` if the FEN is malformed or any listed move is illegal.
pub fn position_from_uci(args: &[&str]) -> Option<Position> {
    let moves_at = args.iter().position(|&a| a == "moves");
    let setup = &args[..moves_at.unwrap_or(args.len())];

    let mut pos = match setup.first() {
        None | Some(&"startpos") => Position::startpos(),
        Some(&"fen") => Position::from_fen(&setup[1..].join(" ")).ok()?,
        Some(_) => return None,
    };

    if let Some(i) = moves_at {
        for txt in &args[i + 1..] {
            let mv = parse_uci_move(&pos, txt)?;
            pos = pos.play(mv).ok()?;
        }
    }
    Some(pos)
}
