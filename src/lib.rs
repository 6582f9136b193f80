pub mod audio;
pub mod board;
pub mod config;
pub mod game;
pub mod game_loop;
pub mod input;
pub mod progression;
pub mod render;
pub mod shapes;

pub use board::{collides, merge, Board, BOARD_COLS, BOARD_ROWS};
pub use game::{ActivePiece, DropOutcome, GameState};
pub use game_loop::{GameLoop, LoopPhase};
pub use progression::Progression;
pub use shapes::{PieceKind, PieceMatrix};
