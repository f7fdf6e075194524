pub mod board;
pub mod game;
pub mod piece;

pub use board::*;
pub use game::*;
pub use piece::*;
