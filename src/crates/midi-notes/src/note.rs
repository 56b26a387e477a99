use crate::error::{NoteError, Result};
use crate::pitch::{self, PitchInput, MAX_PITCH, MIN_PITCH};
use serde::{Deserialize, Serialize};
use std::fmt;

pub const MIN_VELOCITY: i32 = 1;
pub const MAX_VELOCITY: i32 = 127;

/// Sixteenth note
pub const DEFAULT_NOTE_DURATION: f64 = 0.25;
pub const DEFAULT_NOTE_VELOCITY: i32 = 100;

/// A single validated MIDI note.
///
/// Fields are private: a `Note` can only come out of [`Note::new`] (or a
/// validated deserialization), so every instance satisfies
/// pitch 0..=127, start_time >= 0, duration > 0 and velocity 1..=127.
/// Derived notes such as repeated copies are new values.
///
/// Serializes to the record shape Ableton's `add_notes_to_clip` expects:
/// `{"pitch", "start_time", "duration", "velocity", "mute"}`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "NoteRecord", into = "NoteRecord")]
pub struct Note {
    pitch: u8,
    start_time: f64,
    duration: f64,
    velocity: u8,
    muted: bool,
}

impl Note {
    /// Build a note, failing on the first field outside its bound.
    pub fn new(pitch: i32, start_time: f64, duration: f64, velocity: i32, muted: bool) -> Result<Self> {
        Ok(Note {
            pitch: validate_pitch(pitch)?,
            start_time: validate_start_time(start_time)?,
            duration: validate_duration(duration)?,
            velocity: validate_velocity(velocity)?,
            muted,
        })
    }

    pub fn pitch(&self) -> u8 {
        self.pitch
    }

    /// Start in beats from the clip start
    pub fn start_time(&self) -> f64 {
        self.start_time
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }

    pub fn velocity(&self) -> u8 {
        self.velocity
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    /// Beat at which the note stops sounding
    pub fn end_time(&self) -> f64 {
        self.start_time + self.duration
    }

    /// Sharp-spelled note name, e.g. "C#4"
    pub fn name(&self) -> String {
        pitch::name_for(self.pitch)
    }

    /// Copy of this note starting at `start_time`.
    pub fn with_start_time(&self, start_time: f64) -> Result<Note> {
        Ok(Note {
            start_time: validate_start_time(start_time)?,
            ..*self
        })
    }

    pub fn with_muted(&self, muted: bool) -> Note {
        Note { muted, ..*self }
    }

    /// Plain record for the clip boundary.
    pub fn to_record(&self) -> NoteRecord {
        NoteRecord::from(*self)
    }
}

impl fmt::Display for Note {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} @ {} for {} (vel {}{})",
            self.name(),
            self.start_time,
            self.duration,
            self.velocity,
            if self.muted { ", muted" } else { "" }
        )
    }
}

/// Unvalidated wire form of a [`Note`].
///
/// Integer fields are wide so that out-of-range input reaches validation
/// and gets a field-specific error instead of a generic parse failure.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NoteRecord {
    pub pitch: i32,
    pub start_time: f64,
    pub duration: f64,
    #[serde(default = "default_velocity")]
    pub velocity: i32,
    #[serde(default, alias = "muted")]
    pub mute: bool,
}

fn default_velocity() -> i32 {
    DEFAULT_NOTE_VELOCITY
}

impl TryFrom<NoteRecord> for Note {
    type Error = NoteError;

    fn try_from(record: NoteRecord) -> Result<Self> {
        Note::new(
            record.pitch,
            record.start_time,
            record.duration,
            record.velocity,
            record.mute,
        )
    }
}

impl From<Note> for NoteRecord {
    fn from(note: Note) -> Self {
        NoteRecord {
            pitch: note.pitch as i32,
            start_time: note.start_time,
            duration: note.duration,
            velocity: note.velocity as i32,
            mute: note.muted,
        }
    }
}

/// Construct a validated note. Equivalent to [`Note::new`].
pub fn make_note(pitch: i32, start_time: f64, duration: f64, velocity: i32, muted: bool) -> Result<Note> {
    Note::new(pitch, start_time, duration, velocity, muted)
}

/// Construct a note from a MIDI number or a note name.
///
/// ```
/// use midi_notes::{note, Velocity};
///
/// let a = note("C4", 0.0, 1.0, Velocity::F, false).unwrap();
/// let b = note(60, 0.0, 1.0, 96, false).unwrap();
/// assert_eq!(a, b);
/// ```
pub fn note(
    pitch: impl Into<PitchInput>,
    start_time: f64,
    duration: f64,
    velocity: impl Into<i32>,
    muted: bool,
) -> Result<Note> {
    let pitch = pitch.into().resolve()?;
    Note::new(pitch, start_time, duration, velocity.into(), muted)
}

pub(crate) fn validate_pitch(pitch: i32) -> Result<u8> {
    if (MIN_PITCH..=MAX_PITCH).contains(&pitch) {
        Ok(pitch as u8)
    } else {
        Err(NoteError::validation("pitch", pitch, "an integer in 0..=127"))
    }
}

pub(crate) fn validate_start_time(start_time: f64) -> Result<f64> {
    if start_time.is_finite() && start_time >= 0.0 {
        Ok(start_time)
    } else {
        Err(NoteError::validation("start_time", start_time, "a finite number >= 0"))
    }
}

pub(crate) fn validate_duration(duration: f64) -> Result<f64> {
    if duration.is_finite() && duration > 0.0 {
        Ok(duration)
    } else {
        Err(NoteError::validation("duration", duration, "a finite number > 0"))
    }
}

pub(crate) fn validate_velocity(velocity: i32) -> Result<u8> {
    if (MIN_VELOCITY..=MAX_VELOCITY).contains(&velocity) {
        Ok(velocity as u8)
    } else {
        Err(NoteError::validation("velocity", velocity, "an integer in 1..=127"))
    }
}
