use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::{Context, Result};
use macroquad::logging::info;
use rodio::{OutputStream, OutputStreamHandle, Sink};

use super::synth::Soundscape;
use super::AudioMode;

const MUSIC_VOLUME: f32 = 0.5;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Playback {
    Stopped,
    Playing,
}

/// Owns the output device and at most one live soundscape.
pub struct MusicManager {
    _stream: OutputStream,
    handle: OutputStreamHandle,
    sink: Option<Sink>,
    stop_flag: Arc<AtomicBool>,
    mode: AudioMode,
    playback: Playback,
}

impl MusicManager {
    pub fn new(mode: AudioMode) -> Result<Self> {
        let (stream, handle) =
            OutputStream::try_default().context("no default audio output device")?;
        Ok(MusicManager {
            _stream: stream,
            handle,
            sink: None,
            stop_flag: Arc::new(AtomicBool::new(true)),
            mode,
            playback: Playback::Stopped,
        })
    }

    pub fn mode(&self) -> AudioMode {
        self.mode
    }

    pub fn playback(&self) -> Playback {
        self.playback
    }

    /// Fades in a fresh soundscape in the current mode.
    pub fn start(&mut self) -> Result<()> {
        if self.playback == Playback::Playing {
            return Ok(());
        }
        // A previous soundscape may still be fading out.
        if let Some(old) = self.sink.take() {
            old.stop();
        }
        let sink = Sink::try_new(&self.handle).context("could not open an audio sink")?;
        sink.set_volume(MUSIC_VOLUME);
        self.stop_flag = Arc::new(AtomicBool::new(false));
        sink.append(Soundscape::new(
            self.mode,
            self.stop_flag.clone(),
            rand::random(),
        ));
        sink.play();
        self.sink = Some(sink);
        self.playback = Playback::Playing;
        info!("music started ({})", self.mode.as_str());
        Ok(())
    }

    /// Starts the fade out; the soundscape ends itself and the sink drains.
    pub fn stop(&mut self) {
        if self.playback == Playback::Stopped {
            return;
        }
        self.stop_flag.store(true, Ordering::Relaxed);
        self.playback = Playback::Stopped;
        info!("music stopped");
    }

    pub fn toggle(&mut self) -> Result<()> {
        match self.playback {
            Playback::Playing => {
                self.stop();
                Ok(())
            }
            Playback::Stopped => self.start(),
        }
    }

    /// Switches mode, restarting playback in the new mode if it was playing.
    pub fn set_mode(&mut self, mode: AudioMode) -> Result<()> {
        if mode == self.mode {
            return Ok(());
        }
        self.mode = mode;
        if self.playback == Playback::Playing {
            self.stop();
            if let Some(old) = self.sink.take() {
                old.stop();
            }
            self.start()?;
        }
        Ok(())
    }

    /// Drops the sink once its soundscape has fully faded out.
    pub fn release_finished(&mut self) {
        if self.playback == Playback::Stopped && self.sink.as_ref().is_some_and(Sink::empty) {
            self.sink = None;
        }
    }

    pub fn status(&self) -> String {
        let state = match self.playback {
            Playback::Playing => "playing",
            Playback::Stopped => "stopped",
        };
        format!("Music: {} ({})", self.mode.as_str(), state)
    }
}
