use anyhow::Result;
use clap::Parser;
use macroquad::logging::{error, info, warn};
use macroquad::prelude::*;

use ambient_tetris::audio::{AudioMode, MusicManager};
use ambient_tetris::config::{Args, DEFAULT_BLOCK_SIZE};
use ambient_tetris::input::{self, Action};
use ambient_tetris::render::{self, Layout};
use ambient_tetris::{GameLoop, GameState, LoopPhase};

fn window_conf() -> Conf {
    // The window is sized before arguments are parsed, so read the block size leniently.
    let block = Args::try_parse()
        .map(|args| args.block_size)
        .unwrap_or(DEFAULT_BLOCK_SIZE);
    let (width, height) = Layout::new(block as f32).window_size();
    Conf {
        window_title: "Ambient Tetris".to_owned(),
        window_width: width as i32,
        window_height: height as i32,
        window_resizable: false,
        ..Default::default()
    }
}

/// Audio is optional: without a device the game runs silently.
struct Music {
    manager: Option<MusicManager>,
    mode: AudioMode,
}

impl Music {
    fn new(mode: AudioMode, play: bool) -> Self {
        let manager = match MusicManager::new(mode) {
            Ok(manager) => Some(manager),
            Err(err) => {
                warn!("audio disabled: {:#}", err);
                None
            }
        };
        let mut music = Music { manager, mode };
        if play {
            music.run(MusicManager::start);
        }
        music
    }

    fn run(&mut self, op: impl FnOnce(&mut MusicManager) -> Result<()>) {
        if let Some(manager) = self.manager.as_mut() {
            if let Err(err) = op(manager) {
                warn!("audio: {:#}", err);
            }
        }
    }

    fn cycle_mode(&mut self) {
        self.mode = self.mode.next();
        let mode = self.mode;
        self.run(|manager| manager.set_mode(mode));
    }

    fn status(&mut self) -> String {
        match self.manager.as_mut() {
            Some(manager) => {
                manager.release_finished();
                manager.status()
            }
            None => format!("Music: {} (unavailable)", self.mode.as_str()),
        }
    }
}

async fn run(args: Args) -> Result<()> {
    let layout = Layout::new(args.block_size as f32);
    let mut game = match args.seed {
        Some(seed) => GameState::with_seed(seed),
        None => GameState::new(),
    };
    let mut game_loop = GameLoop::new();
    let mut music = Music::new(args.music, args.play_music);
    info!("ready; press Enter to start");

    loop {
        for action in input::pressed_actions() {
            match action {
                Action::Game(command) => {
                    game_loop.apply(&mut game, command);
                }
                Action::Start => game_loop.start(&mut game),
                Action::ToggleMusic => music.run(MusicManager::toggle),
                Action::CycleMusicMode => music.cycle_mode(),
                Action::Quit => return Ok(()),
            }
        }

        if game_loop.phase() == LoopPhase::Running {
            game_loop.tick(&mut game, get_time() * 1000.0);
        }

        render::draw_frame(&game, game_loop.phase(), &layout, &music.status());
        next_frame().await;
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    let args = Args::parse();
    if let Err(err) = run(args).await {
        error!("{:#}", err);
    }
}
