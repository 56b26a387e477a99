//! Conversion between MIDI pitch numbers and scientific note names.
//!
//! Middle C is pitch 60 and is spelled "C4". Names are always produced with
//! sharps, so a flat spelling does not survive a round trip: "Db4" parses to
//! 61, which prints as "C#4".

use crate::error::{NoteError, Result};
use serde::{de, Deserialize, Deserializer, Serialize};
use std::fmt;

/// Note names in chromatic order, sharps only
const NOTE_NAMES: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

/// Accepted letter + accidental spellings and their pitch class
const PITCH_CLASSES: [(&str, i64); 17] = [
    ("C", 0),
    ("C#", 1),
    ("Db", 1),
    ("D", 2),
    ("D#", 3),
    ("Eb", 3),
    ("E", 4),
    ("F", 5),
    ("F#", 6),
    ("Gb", 6),
    ("G", 7),
    ("G#", 8),
    ("Ab", 8),
    ("A", 9),
    ("A#", 10),
    ("Bb", 10),
    ("B", 11),
];

pub const MIN_PITCH: i32 = 0;
pub const MAX_PITCH: i32 = 127;

/// Parse a note name like "C4", "F#3", "Bb5" or "C-1" into a MIDI pitch.
pub fn name_to_pitch(name: &str) -> Result<u8> {
    if name.chars().count() < 2 {
        return Err(NoteError::invalid_note_name(
            name,
            "expected a note letter followed by an octave",
        ));
    }

    let letter_len = name.chars().next().map(char::len_utf8).unwrap_or(0);
    let class_len = match name[letter_len..].chars().next() {
        Some('#') | Some('b') => letter_len + 1,
        _ => letter_len,
    };
    let (class_label, octave_str) = name.split_at(class_len);

    let pitch_class = PITCH_CLASSES
        .iter()
        .find(|(label, _)| *label == class_label)
        .map(|&(_, class)| class)
        .ok_or_else(|| NoteError::invalid_note_name(name, format!("unknown note '{}'", class_label)))?;

    let octave: i64 = octave_str
        .parse()
        .map_err(|_| NoteError::invalid_note_name(name, format!("invalid octave '{}'", octave_str)))?;

    let pitch = octave
        .checked_add(1)
        .and_then(|o| o.checked_mul(12))
        .and_then(|base| base.checked_add(pitch_class));

    match pitch {
        Some(p) if (MIN_PITCH as i64..=MAX_PITCH as i64).contains(&p) => Ok(p as u8),
        _ => Err(NoteError::invalid_note_name(
            name,
            "outside MIDI range (0-127)",
        )),
    }
}

/// Convert a MIDI pitch to its sharp-spelled name, e.g. 61 -> "C#4".
pub fn pitch_to_name(pitch: i32) -> Result<String> {
    if !(MIN_PITCH..=MAX_PITCH).contains(&pitch) {
        return Err(NoteError::OutOfRange { pitch });
    }
    Ok(name_for(pitch as u8))
}

/// Infallible naming for pitches already known to be in range
pub(crate) fn name_for(pitch: u8) -> String {
    let note_name = NOTE_NAMES[(pitch % 12) as usize];
    let octave = (pitch / 12) as i32 - 1;
    format!("{}{}", note_name, octave)
}

/// A pitch given either as a MIDI number or as a note name.
///
/// Tool arguments from the agent arrive in either shape, so this
/// deserializes untagged: `60`, `60.0` and `"C4"` are all accepted.
/// Fractional numbers are rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum PitchInput {
    Midi(i32),
    Name(String),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawPitchInput {
    Integer(i64),
    Float(f64),
    Name(String),
}

impl<'de> Deserialize<'de> for PitchInput {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = RawPitchInput::deserialize(deserializer)?;
        raw.into_pitch_input().map_err(de::Error::custom)
    }
}

impl RawPitchInput {
    fn into_pitch_input(self) -> Result<PitchInput> {
        const EXPECTED: &str = "a whole MIDI pitch number or a note name";
        match self {
            RawPitchInput::Integer(pitch) => i32::try_from(pitch)
                .map(PitchInput::Midi)
                .map_err(|_| NoteError::validation("pitch", pitch, EXPECTED)),
            RawPitchInput::Float(pitch)
                if pitch.fract() == 0.0
                    && pitch >= i32::MIN as f64
                    && pitch <= i32::MAX as f64 =>
            {
                Ok(PitchInput::Midi(pitch as i32))
            }
            RawPitchInput::Float(pitch) => Err(NoteError::validation("pitch", pitch, EXPECTED)),
            RawPitchInput::Name(name) => Ok(PitchInput::Name(name)),
        }
    }
}

impl PitchInput {
    /// Resolve to a MIDI number. Names are parsed, numbers pass through
    /// unchecked so range errors are reported by whatever validates the note.
    pub fn resolve(&self) -> Result<i32> {
        match self {
            PitchInput::Midi(pitch) => Ok(*pitch),
            PitchInput::Name(name) => name_to_pitch(name).map(i32::from),
        }
    }
}

impl fmt::Display for PitchInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PitchInput::Midi(pitch) => write!(f, "{}", pitch),
            PitchInput::Name(name) => write!(f, "{}", name),
        }
    }
}

impl From<i32> for PitchInput {
    fn from(pitch: i32) -> Self {
        PitchInput::Midi(pitch)
    }
}

impl From<u8> for PitchInput {
    fn from(pitch: u8) -> Self {
        PitchInput::Midi(pitch as i32)
    }
}

impl From<&str> for PitchInput {
    fn from(name: &str) -> Self {
        PitchInput::Name(name.to_string())
    }
}

impl From<String> for PitchInput {
    fn from(name: String) -> Self {
        PitchInput::Name(name)
    }
}
