use macroquad::logging::info;

use crate::game::{DropOutcome, GameState};
use crate::input::Command;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoopPhase {
    /// Reset but not started yet.
    Ready,
    Running,
    GameOver,
}

/// Frame-driven gravity timer. Times are milliseconds on the caller's clock.
#[derive(Debug)]
pub struct GameLoop {
    phase: LoopPhase,
    last_time_ms: Option<f64>,
    drop_counter_ms: f64,
}

impl Default for GameLoop {
    fn default() -> Self {
        Self::new()
    }
}

impl GameLoop {
    pub fn new() -> Self {
        GameLoop {
            phase: LoopPhase::Ready,
            last_time_ms: None,
            drop_counter_ms: 0.0,
        }
    }

    pub fn phase(&self) -> LoopPhase {
        self.phase
    }

    pub fn drop_counter_ms(&self) -> f64 {
        self.drop_counter_ms
    }

    /// Resets the game and begins ticking.
    pub fn start(&mut self, game: &mut GameState) {
        game.reset();
        self.phase = LoopPhase::Running;
        self.last_time_ms = None;
        self.drop_counter_ms = 0.0;
        info!("game started");
    }

    /// Advances the clock to `now_ms`. Once the accumulated time exceeds the current
    /// drop interval, runs one gravity step. The first tick after a start only sets
    /// the time baseline.
    pub fn tick(&mut self, game: &mut GameState, now_ms: f64) -> LoopPhase {
        if self.phase != LoopPhase::Running {
            return self.phase;
        }
        let delta = match self.last_time_ms {
            Some(last) => (now_ms - last).max(0.0),
            None => 0.0,
        };
        self.last_time_ms = Some(now_ms);
        self.drop_counter_ms += delta;
        if self.drop_counter_ms > f64::from(game.progression.drop_interval_ms) {
            self.drop(game);
        }
        self.sync_phase(game)
    }

    /// Runs one input command. Commands only apply while running.
    pub fn apply(&mut self, game: &mut GameState, command: Command) -> bool {
        if self.phase != LoopPhase::Running {
            return false;
        }
        let applied = match command {
            Command::MoveLeft => game.move_piece(-1),
            Command::MoveRight => game.move_piece(1),
            Command::SoftDrop => self.drop(game) != DropOutcome::Ignored,
            Command::Rotate => game.rotate_piece(),
        };
        self.sync_phase(game);
        applied
    }

    fn drop(&mut self, game: &mut GameState) -> DropOutcome {
        self.drop_counter_ms = 0.0;
        game.drop_piece()
    }

    fn sync_phase(&mut self, game: &GameState) -> LoopPhase {
        if game.game_over {
            self.phase = LoopPhase::GameOver;
        }
        self.phase
    }
}
