//! Chess rules for the search workspace: board and flags, legal move
//! generation, pure move application, a material evaluator and UCI helpers.

pub mod board;
pub mod eval;
pub mod movegen;
pub mod perft;
pub mod types;
pub mod uci;

pub use board::*;
pub use eval::{evaluate, piece_value};
pub use movegen::*;
pub use perft::perft;
pub use types::*;
pub use uci::*;
