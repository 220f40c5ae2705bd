pub mod board;
pub mod engine;
pub mod error;
pub mod game;
pub mod moves;
pub mod piece;
pub mod snapshot;

#[cfg(target_arch = "wasm32")]
mod wasm_api;

pub use board::Board;
pub use error::{CheckersError, Result};
pub use game::{Game, GameStatus, PlayedMove};
pub use moves::{Move, MoveKind, Square};
pub use piece::{Color, Piece, Rank};
