use clap::Parser;

use crate::audio::AudioMode;

pub const DEFAULT_BLOCK_SIZE: u32 = 30;

#[derive(Debug, Clone, Parser)]
#[command(name = "ambient_tetris", about = "Falling-block puzzle with generated background music")]
pub struct Args {
    /// Music mode selected at launch.
    #[arg(long, value_enum, default_value_t = AudioMode::Ambient)]
    pub music: AudioMode,

    /// Start the music right away instead of waiting for the M key.
    #[arg(long)]
    pub play_music: bool,

    /// Seed for the piece generator; random when omitted.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Size of one board cell in pixels.
    #[arg(long, default_value_t = DEFAULT_BLOCK_SIZE, value_parser = clap::value_parser!(u32).range(10..=60))]
    pub block_size: u32,
}
