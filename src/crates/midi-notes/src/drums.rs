//! Drum names to General MIDI percussion pitches (channel 10 key map).

use crate::error::{NoteError, Result};
use crate::note::{Note, DEFAULT_NOTE_VELOCITY};
use serde::{Deserialize, Serialize};

/// Keys are already normalized: lower-case, words joined by underscores.
pub const DRUM_MAP: &[(&str, u8)] = &[
    ("kick", 36),       // Bass Drum 1
    ("kick_2", 35),     // Acoustic Bass Drum
    ("snare", 38),      // Acoustic Snare
    ("snare_2", 40),    // Electric Snare
    ("clap", 39),       // Hand Clap
    ("closed_hat", 42), // Closed Hi-Hat
    ("open_hat", 46),   // Open Hi-Hat
    ("crash", 49),      // Crash Cymbal 1
    ("ride", 51),       // Ride Cymbal 1
    ("tom_low", 45),    // Low Tom
    ("tom_mid", 48),    // Hi-Mid Tom
    ("tom_high", 50),   // High Tom
    ("rim_shot", 37),   // Side Stick
    ("cowbell", 56),    // Cowbell
    ("shaker", 70),     // Maracas
];

/// Every drum hit lasts this long, whatever the instrument
pub const DRUM_HIT_DURATION: f64 = 0.1;

/// "Closed Hat" and "closed-hat" both become "closed_hat"
pub fn normalize_drum_name(name: &str) -> String {
    name.to_lowercase().replace([' ', '-'], "_")
}

/// Valid drum names, in table order
pub fn available_drums() -> Vec<&'static str> {
    DRUM_MAP.iter().map(|&(name, _)| name).collect()
}

/// Look up the GM pitch for a drum name
pub fn drum_pitch(name: &str) -> Result<u8> {
    let key = normalize_drum_name(name);
    DRUM_MAP
        .iter()
        .find(|&&(drum, _)| drum == key)
        .map(|&(_, pitch)| pitch)
        .ok_or_else(|| NoteError::UnknownDrum {
            name: name.to_string(),
            available: available_drums(),
        })
}

/// A short hit on an explicit MIDI pitch
pub fn drum_hit(midi_note: i32, start_time: f64, velocity: impl Into<i32>) -> Result<Note> {
    Note::new(midi_note, start_time, DRUM_HIT_DURATION, velocity.into(), false)
}

/// A short hit on a named drum
pub fn resolve_drum(name: &str, start_time: f64, velocity: impl Into<i32>) -> Result<Note> {
    let pitch = drum_pitch(name)?;
    drum_hit(pitch as i32, start_time, velocity)
}

/// A drum hit request as it arrives from a tool call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrumHitSpec {
    #[serde(alias = "drum")]
    pub drum_name: String,
    #[serde(alias = "start")]
    pub start_time: f64,
    #[serde(default = "default_velocity")]
    pub velocity: i32,
}

fn default_velocity() -> i32 {
    DEFAULT_NOTE_VELOCITY
}

impl DrumHitSpec {
    pub fn new(drum_name: impl Into<String>, start_time: f64, velocity: impl Into<i32>) -> Self {
        DrumHitSpec {
            drum_name: drum_name.into(),
            start_time,
            velocity: velocity.into(),
        }
    }

    pub fn to_note(&self) -> Result<Note> {
        resolve_drum(&self.drum_name, self.start_time, self.velocity)
    }
}
