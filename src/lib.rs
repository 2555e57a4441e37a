pub mod best_score;
pub mod config;
pub mod error;
pub mod game;
pub mod game_loop;
pub mod grid;
pub mod layout;
pub mod theme;
pub mod tile;
pub mod ui;

pub use error::{Error, Result};
pub use game::{Game, Status};
pub use grid::{Board, Direction, MoveOutcome};
