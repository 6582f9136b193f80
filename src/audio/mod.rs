//! Background music. Self-contained: nothing here reads or writes game state.

pub mod player;
pub mod synth;

pub use player::{MusicManager, Playback};

use clap::ValueEnum;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum AudioMode {
    /// A slow drone pad.
    #[default]
    Ambient,
    /// The pad plus a generated melody over a strummed chord loop.
    Folk,
}

impl AudioMode {
    pub fn next(self) -> AudioMode {
        match self {
            AudioMode::Ambient => AudioMode::Folk,
            AudioMode::Folk => AudioMode::Ambient,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            AudioMode::Ambient => "ambient",
            AudioMode::Folk => "folk",
        }
    }
}
