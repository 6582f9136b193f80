use std::f32::consts::TAU;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::AudioMode;

pub const SAMPLE_RATE: u32 = 44_100;
pub const FADE_IN: Duration = Duration::from_millis(2000);
pub const FADE_OUT: Duration = Duration::from_millis(1500);

const TEMPO_BPM: f32 = 100.0;
const STEPS_PER_BEAT: u64 = 2;
const STEPS_PER_BAR: u64 = 8;
const PAD_LEVEL: f32 = 0.06;
const PLUCK_LEVEL: f32 = 0.12;
const MELODY_LEVEL: f32 = 0.16;

// D drone: D2 A2 D3 F#3 A3.
const PAD_NOTES: [u8; 5] = [38, 45, 50, 54, 57];
const PAD_DETUNE: f32 = 0.003;

// D, Bm, G, A.
const PROGRESSION: [[u8; 3]; 4] = [[50, 54, 57], [47, 50, 54], [43, 47, 50], [45, 49, 52]];
// D major pentatonic, D4..F#5.
const MELODY_SCALE: [u8; 8] = [62, 64, 66, 69, 71, 74, 76, 78];

pub fn midi_to_hz(note: u8) -> f32 {
    440.0 * 2f32.powf((note as f32 - 69.0) / 12.0)
}

#[derive(Clone, Copy, Debug)]
struct Oscillator {
    phase: f32,
    step: f32,
}

impl Oscillator {
    fn new(freq_hz: f32, sample_rate: u32) -> Self {
        Oscillator {
            phase: 0.0,
            step: freq_hz / sample_rate as f32,
        }
    }

    fn next_sample(&mut self) -> f32 {
        let sample = (self.phase * TAU).sin();
        self.phase = (self.phase + self.step).fract();
        sample
    }
}

// -------------------------------------------------------------------
/// Detuned sine pairs over a drone chord, swelling on a slow LFO.
struct Pad {
    voices: Vec<Oscillator>,
    lfo: Oscillator,
}

impl Pad {
    fn new(sample_rate: u32) -> Self {
        let voices = PAD_NOTES
            .iter()
            .flat_map(|&note| {
                let hz = midi_to_hz(note);
                [
                    Oscillator::new(hz * (1.0 - PAD_DETUNE), sample_rate),
                    Oscillator::new(hz * (1.0 + PAD_DETUNE), sample_rate),
                ]
            })
            .collect();
        Pad {
            voices,
            lfo: Oscillator::new(0.07, sample_rate),
        }
    }

    fn next_sample(&mut self) -> f32 {
        let sum: f32 = self.voices.iter_mut().map(Oscillator::next_sample).sum();
        let swell = 0.7 + 0.3 * self.lfo.next_sample();
        sum / self.voices.len() as f32 * swell
    }
}

/// Sine with an exponential decay, used for strums and melody notes.
#[derive(Clone, Copy, Debug)]
struct Pluck {
    osc: Oscillator,
    amp: f32,
    decay: f32,
}

impl Pluck {
    fn new(note: u8, amp: f32, ring: Duration, sample_rate: u32) -> Self {
        let ring_samples = (ring.as_secs_f32() * sample_rate as f32).max(1.0);
        Pluck {
            osc: Oscillator::new(midi_to_hz(note), sample_rate),
            amp,
            // Reaches 1/1000 of the start level after `ring`.
            decay: (0.001f32.ln() / ring_samples).exp(),
        }
    }

    fn next_sample(&mut self) -> f32 {
        let s = self.osc.next_sample() * self.amp;
        self.amp *= self.decay;
        s
    }

    fn is_silent(&self) -> bool {
        self.amp < 1e-4
    }
}

// -------------------------------------------------------------------
/// Eighth-note sequencer: strums the progression on beats 1 and 3 of each bar
/// and improvises a pentatonic random walk on top.
pub struct FolkSequencer {
    rng: StdRng,
    sample_rate: u32,
    samples_per_step: u64,
    clock: u64,
    step: u64,
    melody_index: usize,
    voices: Vec<Pluck>,
}

impl FolkSequencer {
    pub fn new(seed: u64, sample_rate: u32) -> Self {
        let samples_per_beat = sample_rate as f32 * 60.0 / TEMPO_BPM;
        FolkSequencer {
            rng: StdRng::seed_from_u64(seed),
            sample_rate,
            samples_per_step: (samples_per_beat / STEPS_PER_BEAT as f32) as u64,
            clock: 0,
            step: 0,
            melody_index: MELODY_SCALE.len() / 2,
            voices: Vec::new(),
        }
    }

    /// The chord sounding during `step`.
    pub fn chord_at(step: u64) -> [u8; 3] {
        let bar = (step / STEPS_PER_BAR) as usize;
        PROGRESSION[bar % PROGRESSION.len()]
    }

    /// Picks the melody note for `step`, or `None` for a rest. On beats the walk
    /// lands on a tone of the current chord when one is in reach.
    pub fn next_melody_note(&mut self, step: u64) -> Option<u8> {
        if self.rng.gen_bool(0.3) {
            return None;
        }
        let jump: i32 = self.rng.gen_range(-2..=2);
        let last = MELODY_SCALE.len() as i32 - 1;
        let mut index = (self.melody_index as i32 + jump).clamp(0, last) as usize;

        if step % STEPS_PER_BEAT == 0 {
            let chord = Self::chord_at(step);
            let is_chord_tone = |i: usize| chord.iter().any(|&c| c % 12 == MELODY_SCALE[i] % 12);
            if !is_chord_tone(index) {
                let below = index.checked_sub(1).filter(|&i| is_chord_tone(i));
                let above = Some(index + 1).filter(|&i| i < MELODY_SCALE.len() && is_chord_tone(i));
                if let Some(i) = below.or(above) {
                    index = i;
                }
            }
        }

        self.melody_index = index;
        Some(MELODY_SCALE[index])
    }

    fn trigger_step(&mut self) {
        let step = self.step;
        let in_bar = step % STEPS_PER_BAR;
        if in_bar == 0 || in_bar == STEPS_PER_BAR / 2 {
            let level = if in_bar == 0 { PLUCK_LEVEL } else { PLUCK_LEVEL * 0.6 };
            let chord = Self::chord_at(step);
            self.voices.push(Pluck::new(chord[0] - 12, level, Duration::from_millis(1800), self.sample_rate));
            for &note in &chord {
                self.voices.push(Pluck::new(note, level * 0.7, Duration::from_millis(1400), self.sample_rate));
            }
        }
        if let Some(note) = self.next_melody_note(step) {
            self.voices.push(Pluck::new(note, MELODY_LEVEL, Duration::from_millis(600), self.sample_rate));
        }
        self.step += 1;
    }

    fn next_sample(&mut self) -> f32 {
        if self.clock % self.samples_per_step.max(1) == 0 {
            self.trigger_step();
        }
        self.clock += 1;
        let sum: f32 = self.voices.iter_mut().map(Pluck::next_sample).sum();
        self.voices.retain(|v| !v.is_silent());
        sum
    }
}

// -------------------------------------------------------------------
/// Linear fade in on creation; fade out once the stop flag is raised.
pub struct Fader {
    gain: f32,
    in_step: f32,
    out_step: f32,
    stop: Arc<AtomicBool>,
}

impl Fader {
    pub fn new(stop: Arc<AtomicBool>, sample_rate: u32) -> Self {
        let per_sec = sample_rate as f32;
        Fader {
            gain: 0.0,
            in_step: 1.0 / (FADE_IN.as_secs_f32() * per_sec),
            out_step: 1.0 / (FADE_OUT.as_secs_f32() * per_sec),
            stop,
        }
    }

    /// Next gain value, or `None` once fully faded out.
    pub fn next_gain(&mut self) -> Option<f32> {
        if self.stop.load(Ordering::Relaxed) {
            self.gain -= self.out_step;
            if self.gain <= 0.0 {
                return None;
            }
        } else {
            self.gain = (self.gain + self.in_step).min(1.0);
        }
        Some(self.gain)
    }
}

// -------------------------------------------------------------------
/// Endless mono source: the pad, plus the folk layer when selected. Ends after
/// its fade out completes.
pub struct Soundscape {
    pad: Pad,
    folk: Option<FolkSequencer>,
    fader: Fader,
    sample_rate: u32,
}

impl Soundscape {
    pub fn new(mode: AudioMode, stop: Arc<AtomicBool>, seed: u64) -> Self {
        Soundscape {
            pad: Pad::new(SAMPLE_RATE),
            folk: match mode {
                AudioMode::Ambient => None,
                AudioMode::Folk => Some(FolkSequencer::new(seed, SAMPLE_RATE)),
            },
            fader: Fader::new(stop, SAMPLE_RATE),
            sample_rate: SAMPLE_RATE,
        }
    }
}

impl Iterator for Soundscape {
    type Item = f32;

    fn next(&mut self) -> Option<Self::Item> {
        let gain = self.fader.next_gain()?;
        let mut sample = self.pad.next_sample() * PAD_LEVEL;
        if let Some(folk) = self.folk.as_mut() {
            sample += folk.next_sample();
        }
        Some((sample * gain).clamp(-1.0, 1.0))
    }
}

impl rodio::Source for Soundscape {
    fn current_frame_len(&self) -> Option<usize> {
        None
    }

    fn channels(&self) -> u16 {
        1
    }

    fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    fn total_duration(&self) -> Option<Duration> {
        None
    }
}
