//! Small explicit game trees for exercising the searchers.

use std::cell::{Cell, RefCell};

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use thiserror::Error;

use crate::GameRules;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Player {
    Max,
    Min,
}

impl Player {
    pub fn other(self) -> Player {
        match self {
            Player::Max => Player::Min,
            Player::Min => Player::Max,
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TreeError {
    #[error("node {0} cannot be evaluated")]
    Poisoned(usize),
}

/// Description of a tree: every node carries its own static value.
pub enum Shape {
    Leaf(f64),
    Node(f64, Vec<Shape>),
}

pub fn leaf(v: f64) -> Shape {
    Shape::Leaf(v)
}

pub fn node(children: Vec<Shape>) -> Shape {
    Shape::Node(0.0, children)
}

pub fn valued(v: f64, children: Vec<Shape>) -> Shape {
    Shape::Node(v, children)
}

struct TreeNode {
    value: f64,
    children: Vec<usize>,
}

/// A game whose boards are node ids and whose moves are child node ids.
pub struct TreeGame {
    nodes: Vec<TreeNode>,
    poisoned: Option<usize>,
    pub applied: RefCell<Vec<usize>>,
    pub generated: Cell<usize>,
}

impl TreeGame {
    pub fn new(shape: Shape) -> Self {
        let mut game = TreeGame {
            nodes: Vec::new(),
            poisoned: None,
            applied: RefCell::new(Vec::new()),
            generated: Cell::new(0),
        };
        game.push(shape);
        game
    }

    /// A tree with 0..=3 children per node, `depth` levels deep, and small
    /// integer values so ties are common.
    pub fn random(seed: u64, depth: u32) -> Self {
        fn grow(rng: &mut ChaCha8Rng, depth: u32) -> Shape {
            let value = f64::from(rng.gen_range(-3i32..=3));
            if depth == 0 {
                return Shape::Leaf(value);
            }
            let width = rng.gen_range(0..=3);
            Shape::Node(value, (0..width).map(|_| grow(rng, depth - 1)).collect())
        }
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        TreeGame::new(grow(&mut rng, depth))
    }

    pub fn poison(mut self, id: usize) -> Self {
        self.poisoned = Some(id);
        self
    }

    pub const ROOT: usize = 0;

    fn push(&mut self, shape: Shape) -> usize {
        let id = self.nodes.len();
        let (value, children) = match shape {
            Shape::Leaf(v) => (v, Vec::new()),
            Shape::Node(v, children) => (v, children),
        };
        self.nodes.push(TreeNode {
            value,
            children: Vec::new(),
        });
        let ids: Vec<usize> = children.into_iter().map(|c| self.push(c)).collect();
        self.nodes[id].children = ids;
        id
    }
}

impl GameRules for TreeGame {
    type Side = Player;
    type Board = usize;
    type Flags = ();
    type Move = usize;
    type Key = usize;
    type Error = TreeError;

    fn generate_moves(
        &self,
        _side: Player,
        board: &usize,
        _flags: &(),
    ) -> Result<Vec<usize>, TreeError> {
        self.generated.set(self.generated.get() + 1);
        Ok(self.nodes[*board].children.clone())
    }

    fn apply_move(
        &self,
        side: Player,
        _board: &usize,
        _flags: &(),
        mv: &usize,
    ) -> Result<(Player, usize, ()), TreeError> {
        self.applied.borrow_mut().push(*mv);
        Ok((side.other(), *mv, ()))
    }

    fn evaluate(&self, board: &usize) -> Result<f64, TreeError> {
        if self.poisoned == Some(*board) {
            return Err(TreeError::Poisoned(*board));
        }
        Ok(self.nodes[*board].value)
    }

    fn encode(&self, mv: &usize) -> usize {
        *mv
    }

    fn is_maximizing(&self, side: Player) -> bool {
        side == Player::Max
    }
}

/// The textbook example: max over three min nodes.
///
/// Node ids: root 0; min nodes 1, 5, 9; leaves 2-4, 6-8, 10-12.
pub fn textbook() -> TreeGame {
    TreeGame::new(node(vec![
        node(vec![leaf(3.0), leaf(12.0), leaf(8.0)]),
        node(vec![leaf(2.0), leaf(4.0), leaf(6.0)]),
        node(vec![leaf(14.0), leaf(5.0), leaf(2.0)]),
    ]))
}
