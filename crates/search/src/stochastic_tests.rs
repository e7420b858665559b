use super::*;
use crate::testing::*;
use crate::{FirstChooser, Outcome};

fn search<C: Chooser<usize>>(
    game: &TreeGame,
    side: Player,
    depth: u32,
    breadth: u32,
    chooser: &mut C,
) -> Outcome<TreeGame> {
    stochastic(game, side, &TreeGame::ROOT, &(), depth, breadth, chooser).unwrap()
}

#[test]
fn test_breadth_zero_skips_enumeration() {
    let game = textbook();
    let out = search(&game, Player::Max, 3, 0, &mut FirstChooser);
    assert_eq!(out.value, 0.0);
    assert!(out.moves.is_empty());
    assert!(out.tree.is_empty());
    assert_eq!(game.generated.get(), 0);
}

#[test]
fn test_depth_zero_is_terminal() {
    let game = TreeGame::new(valued(2.5, vec![leaf(1.0)]));
    let out = search(&game, Player::Max, 0, 5, &mut FirstChooser);
    assert_eq!(out.value, 2.5);
    assert!(out.moves.is_empty());
    assert_eq!(game.generated.get(), 0);
}

#[test]
fn test_no_moves_is_terminal() {
    let game = TreeGame::new(leaf(-4.0));
    let out = search(&game, Player::Min, 3, 2, &mut FirstChooser);
    assert_eq!(out.value, -4.0);
    assert!(out.moves.is_empty());
    assert!(out.tree.is_empty());
}

#[test]
fn test_depth_one_scores_first_moves_directly() {
    let game = textbook();
    let out = search(&game, Player::Max, 1, 5, &mut FirstChooser);
    // Interior nodes evaluate to 0, so the first move wins the tie.
    assert_eq!(out.moves, vec![1]);
    assert_eq!(out.tree.len(), 3);
    assert!(out.tree.iter().all(|(_, below)| below.is_empty()));
    assert_eq!(out.nodes, 3);
}

#[test]
fn test_first_chooser_follows_first_replies() {
    let game = textbook();
    let out = search(&game, Player::Max, 2, 3, &mut FirstChooser);
    // First replies: 3, 2, 14.
    assert_eq!(out.value, 14.0);
    assert_eq!(out.moves, vec![9]);
    assert_eq!(out.tree.get(&9).unwrap().keys().copied().collect::<Vec<_>>(), vec![10]);
    assert_eq!(out.nodes, 3 + 3 * 3);
}

#[test]
fn test_rollouts_are_averaged() {
    let game = textbook();
    let mut turn = 0usize;
    // Cycles through replies 0, 1, 2 so each first move sees all three.
    let mut cycle = |c: &[usize]| {
        let i = turn % c.len();
        turn += 1;
        i
    };
    let out = search(&game, Player::Max, 2, 3, &mut cycle);
    // Averages: (3+12+8)/3, (2+4+6)/3, (14+5+2)/3.
    assert_eq!(out.moves, vec![1]);
    assert!((out.value - 23.0 / 3.0).abs() < 1e-12);
    assert_eq!(out.tree.get(&1).unwrap().len(), 3);
}

#[test]
fn test_minimizing_side_takes_lowest_average() {
    let game = TreeGame::new(node(vec![
        node(vec![leaf(4.0)]),
        node(vec![leaf(-1.0)]),
        node(vec![leaf(-1.0)]),
    ]));
    let out = search(&game, Player::Min, 2, 2, &mut FirstChooser);
    assert_eq!(out.value, -1.0);
    assert_eq!(out.moves, vec![3]);
}

#[test]
fn test_merge_keeps_later_rollout_subtrees() {
    // One first move, then two replies each with two follow-ups.
    let game = TreeGame::new(node(vec![node(vec![
        node(vec![leaf(1.0), leaf(2.0)]),
        node(vec![leaf(3.0), leaf(4.0)]),
    ])]));
    // Rollout 1 picks 0 then 0; rollout 2 picks 0 then 1.
    let picks = [0usize, 0, 0, 1];
    let mut next = 0;
    let mut scripted = |_: &[usize]| {
        let i = picks[next];
        next += 1;
        i
    };
    let out = search(&game, Player::Max, 4, 2, &mut scripted);
    assert_eq!(out.value, 1.5);
    let reply = out.tree.get(&1).unwrap().get(&2).unwrap();
    assert_eq!(reply.keys().copied().collect::<Vec<_>>(), vec![4]);
}

#[test]
fn test_deterministic_chooser_reproduces_output() {
    let a = search(&TreeGame::random(3, 5), Player::Max, 5, 4, &mut FirstChooser);
    let b = search(&TreeGame::random(3, 5), Player::Max, 5, 4, &mut FirstChooser);
    assert_eq!(a, b);
}

#[test]
fn test_rollout_is_a_single_chain() {
    let game = textbook();
    let mut last = |c: &[usize]| c.len() - 1;
    let out = rollout(&game, Player::Max, &TreeGame::ROOT, &(), 5, &mut last).unwrap();
    assert_eq!(out.moves, vec![9, 12]);
    assert_eq!(out.value, 2.0);
    assert_eq!(out.tree.node_count(), 2);
    assert_eq!(out.tree.depth(), 2);
}

#[test]
fn test_bad_chooser_index_is_rejected() {
    let game = textbook();
    let mut broken = |c: &[usize]| c.len();
    let err = stochastic(&game, Player::Max, &TreeGame::ROOT, &(), 2, 1, &mut broken).unwrap_err();
    assert!(matches!(err, SearchError::InvalidArgument(_)));
}
