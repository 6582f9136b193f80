use macroquad::logging::{debug, info};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::board::{collides, merge, Board, BOARD_COLS};
use crate::progression::Progression;
use crate::shapes::{PieceKind, PieceMatrix};

/// The falling piece: its square matrix and the board position of the matrix's
/// top-left corner.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ActivePiece {
    pub kind: PieceKind,
    pub matrix: PieceMatrix,
    pub x: i32,
    pub y: i32,
}

impl ActivePiece {
    pub fn new(kind: PieceKind, x: i32, y: i32) -> Self {
        ActivePiece {
            kind,
            matrix: kind.matrix(),
            x,
            y,
        }
    }

    /// Horizontally centered on the top row.
    pub fn spawned(kind: PieceKind) -> Self {
        let matrix = kind.matrix();
        let x = (BOARD_COLS as i32 - matrix.size() as i32) / 2;
        ActivePiece { kind, matrix, x, y: 0 }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DropOutcome {
    /// The piece fell one row.
    Moved,
    /// The piece could not fall: it was merged, full rows swept and the next piece spawned.
    Locked { rows_cleared: u32 },
    /// Game over; nothing happened.
    Ignored,
}

// -------------------------------------------------------------------
/// Everything one game mutates. The driver owns exactly one of these.
pub struct GameState {
    pub board: Board,
    pub active: ActivePiece,
    pub next: PieceKind,
    pub progression: Progression,
    pub game_over: bool,
    rng: StdRng,
}

impl GameState {
    pub fn new() -> Self {
        Self::from_rng(StdRng::from_entropy())
    }

    /// Reproducible piece sequence.
    pub fn with_seed(seed: u64) -> Self {
        Self::from_rng(StdRng::seed_from_u64(seed))
    }

    fn from_rng(rng: StdRng) -> Self {
        // Placeholders; `reset` draws the real pieces.
        let mut state = GameState {
            board: Board::new(),
            active: ActivePiece::spawned(PieceKind::I),
            next: PieceKind::I,
            progression: Progression::new(),
            game_over: false,
            rng,
        };
        state.reset();
        state
    }

    /// Clears the board and progression, draws a tracked next piece and spawns from it.
    pub fn reset(&mut self) {
        self.board = Board::new();
        self.progression = Progression::new();
        self.game_over = false;
        self.next = PieceKind::random(&mut self.rng);
        self.spawn();
    }

    /// Promotes the next piece to active at the centered spawn position and draws a
    /// fresh next piece. Sets game over when the new piece does not fit.
    pub fn spawn(&mut self) -> bool {
        self.active = ActivePiece::spawned(self.next);
        self.next = PieceKind::random(&mut self.rng);
        if collides(&self.board, &self.active) {
            self.game_over = true;
            info!(
                "game over: score {} lines {} level {}",
                self.progression.score, self.progression.lines, self.progression.level
            );
        }
        !self.game_over
    }

    /// Shifts the piece one column; a blocked shift is undone.
    pub fn move_piece(&mut self, dir: i32) -> bool {
        if self.game_over {
            return false;
        }
        self.active.x += dir;
        if collides(&self.board, &self.active) {
            self.active.x -= dir;
            return false;
        }
        true
    }

    /// One gravity step, shared by the timer and the soft-drop key.
    pub fn drop_piece(&mut self) -> DropOutcome {
        if self.game_over {
            return DropOutcome::Ignored;
        }
        self.active.y += 1;
        if !collides(&self.board, &self.active) {
            return DropOutcome::Moved;
        }
        self.active.y -= 1;
        merge(&mut self.board, &self.active);
        let rows_cleared = self.board.sweep() as u32;
        if rows_cleared > 0 {
            let level_up = self.progression.record_clear(rows_cleared);
            debug!(
                "cleared {} rows, score {}",
                rows_cleared, self.progression.score
            );
            if level_up {
                debug!(
                    "level {} ({}ms per row)",
                    self.progression.level, self.progression.drop_interval_ms
                );
            }
        }
        self.spawn();
        DropOutcome::Locked { rows_cleared }
    }

    /// Quarter turn clockwise with a simple wall kick: shift by +1, -2, +3, ...
    /// until the piece fits. When the next shift would exceed the matrix width the
    /// piece is put back exactly as it was.
    pub fn rotate_piece(&mut self) -> bool {
        if self.game_over {
            return false;
        }
        let original = self.active;
        self.active.matrix = original.matrix.rotated();
        let width = self.active.matrix.size() as i32;
        let mut offset = 1;
        while collides(&self.board, &self.active) {
            self.active.x += offset;
            offset = -(offset + offset.signum());
            if offset.abs() > width {
                self.active = original;
                return false;
            }
        }
        true
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}
