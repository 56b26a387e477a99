//! Chord expansion: a root, a quality and a time slot become a stack of notes.

use crate::error::{NoteError, Result};
use crate::note::{validate_duration, validate_pitch, validate_start_time, validate_velocity, Note};
use crate::pitch::{PitchInput, MAX_PITCH};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One bar of 4/4
pub const DEFAULT_CHORD_DURATION: f64 = 4.0;
pub const DEFAULT_CHORD_VELOCITY: i32 = 80;

/// Each voice above the root is played this much softer than the one below.
pub const VOICE_VELOCITY_STEP: i32 = 5;

/// Upper voices never drop below this velocity.
pub const CHORD_VELOCITY_FLOOR: i32 = 1;

pub const MAX_INVERSION: i32 = 3;

/// Chord qualities with a known interval layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChordQuality {
    Major,
    Minor,
    Maj7,
    Min7,
    Dom7,
    Dim,
    Aug,
}

impl ChordQuality {
    pub const ALL: [ChordQuality; 7] = [
        ChordQuality::Major,
        ChordQuality::Minor,
        ChordQuality::Maj7,
        ChordQuality::Min7,
        ChordQuality::Dom7,
        ChordQuality::Dim,
        ChordQuality::Aug,
    ];

    /// Semitone offsets from the root, lowest voice first
    pub fn intervals(self) -> &'static [i32] {
        match self {
            ChordQuality::Major => &[0, 4, 7],
            ChordQuality::Minor => &[0, 3, 7],
            ChordQuality::Maj7 => &[0, 4, 7, 11],
            ChordQuality::Min7 => &[0, 3, 7, 10],
            ChordQuality::Dom7 => &[0, 4, 7, 10],
            ChordQuality::Dim => &[0, 3, 6],
            ChordQuality::Aug => &[0, 4, 8],
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ChordQuality::Major => "major",
            ChordQuality::Minor => "minor",
            ChordQuality::Maj7 => "maj7",
            ChordQuality::Min7 => "min7",
            ChordQuality::Dom7 => "dom7",
            ChordQuality::Dim => "dim",
            ChordQuality::Aug => "aug",
        }
    }

    /// Strict, case-insensitive lookup.
    pub fn parse(label: &str) -> Option<ChordQuality> {
        let label = label.to_lowercase();
        Self::ALL.into_iter().find(|q| q.label() == label)
    }

    /// Lenient lookup: anything unrecognised is a major triad.
    pub fn from_label(label: &str) -> ChordQuality {
        Self::parse(label).unwrap_or(ChordQuality::Major)
    }
}

impl fmt::Display for ChordQuality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// A validated chord request.
///
/// `chord_type` keeps the caller's label verbatim; it is resolved with
/// [`ChordQuality::from_label`] at expansion time. `inversion` is validated
/// and carried along but does not change the voicing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChordSpec {
    root_note: u8,
    chord_type: String,
    inversion: u8,
    start_time: f64,
    duration: f64,
    velocity: u8,
}

impl ChordSpec {
    pub fn new(
        root_note: i32,
        chord_type: impl Into<String>,
        inversion: i32,
        start_time: f64,
        duration: f64,
        velocity: i32,
    ) -> Result<Self> {
        let root_note = validate_pitch(root_note).map_err(|_| {
            NoteError::validation("root_note", root_note, "an integer in 0..=127")
        })?;
        if !(0..=MAX_INVERSION).contains(&inversion) {
            return Err(NoteError::validation("inversion", inversion, "an integer in 0..=3"));
        }
        Ok(ChordSpec {
            root_note,
            chord_type: chord_type.into(),
            inversion: inversion as u8,
            start_time: validate_start_time(start_time)?,
            duration: validate_duration(duration)?,
            velocity: validate_velocity(velocity)?,
        })
    }

    pub fn root_note(&self) -> u8 {
        self.root_note
    }

    pub fn chord_type(&self) -> &str {
        &self.chord_type
    }

    pub fn quality(&self) -> ChordQuality {
        ChordQuality::from_label(&self.chord_type)
    }

    pub fn inversion(&self) -> u8 {
        self.inversion
    }

    pub fn start_time(&self) -> f64 {
        self.start_time
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }

    pub fn velocity(&self) -> u8 {
        self.velocity
    }

    pub fn expand(&self) -> Result<Vec<Note>> {
        expand_chord(self)
    }
}

/// Expand a chord into one note per voice.
///
/// Voices that would land above pitch 127 are dropped rather than folded
/// down. Voice `i` gets `velocity - 5 * i`, floored at 1.
pub fn expand_chord(spec: &ChordSpec) -> Result<Vec<Note>> {
    let intervals = spec.quality().intervals();
    let mut notes = Vec::with_capacity(intervals.len());

    for (i, interval) in intervals.iter().enumerate() {
        let pitch = spec.root_note as i32 + interval;
        if pitch > MAX_PITCH {
            tracing::debug!(
                root = spec.root_note,
                interval,
                "dropping chord voice above MIDI range"
            );
            continue;
        }

        let velocity =
            (spec.velocity as i32 - i as i32 * VOICE_VELOCITY_STEP).max(CHORD_VELOCITY_FLOOR);
        notes.push(Note::new(
            pitch,
            spec.start_time,
            spec.duration,
            velocity,
            false,
        )?);
    }

    Ok(notes)
}

/// Build and expand a chord in one go, taking the root as a number or a name.
///
/// ```
/// use midi_notes::chord;
///
/// let c_major = chord("C4", "major", 0.0, 4.0, 80, 0).unwrap();
/// let pitches: Vec<u8> = c_major.iter().map(|n| n.pitch()).collect();
/// assert_eq!(pitches, vec![60, 64, 67]);
/// ```
pub fn chord(
    root: impl Into<PitchInput>,
    chord_type: &str,
    start_time: f64,
    duration: f64,
    velocity: impl Into<i32>,
    inversion: i32,
) -> Result<Vec<Note>> {
    let root = root.into().resolve()?;
    ChordSpec::new(root, chord_type, inversion, start_time, duration, velocity.into())?.expand()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pitches(notes: &[Note]) -> Vec<u8> {
        notes.iter().map(|n| n.pitch()).collect()
    }

    fn velocities(notes: &[Note]) -> Vec<u8> {
        notes.iter().map(|n| n.velocity()).collect()
    }

    #[test]
    fn test_minor_chord() {
        let spec = ChordSpec::new(60, "minor", 0, 0.0, 4.0, 80).unwrap();
        let notes = expand_chord(&spec).unwrap();
        assert_eq!(pitches(&notes), vec![60, 63, 67]);
        assert_eq!(velocities(&notes), vec![80, 75, 70]);
        assert!(notes.iter().all(|n| n.start_time() == 0.0 && n.duration() == 4.0));
        assert!(notes.iter().all(|n| !n.is_muted()));
    }

    #[test]
    fn test_interval_table() {
        let expected: [(&str, &[u8]); 7] = [
            ("major", &[60, 64, 67]),
            ("minor", &[60, 63, 67]),
            ("maj7", &[60, 64, 67, 71]),
            ("min7", &[60, 63, 67, 70]),
            ("dom7", &[60, 64, 67, 70]),
            ("dim", &[60, 63, 66]),
            ("aug", &[60, 64, 68]),
        ];
        for (label, want) in expected {
            let notes = chord(60, label, 0.0, 1.0, 100, 0).unwrap();
            assert_eq!(pitches(&notes), want.to_vec(), "chord type {}", label);
        }
    }

    #[test]
    fn test_chord_type_is_case_insensitive() {
        let upper = chord(60, "MAJ7", 0.0, 1.0, 100, 0).unwrap();
        let lower = chord(60, "maj7", 0.0, 1.0, 100, 0).unwrap();
        assert_eq!(upper, lower);
    }

    #[test]
    fn test_unknown_type_falls_back_to_major() {
        let unknown = chord(60, "xyz", 0.0, 4.0, 80, 0).unwrap();
        let major = chord(60, "major", 0.0, 4.0, 80, 0).unwrap();
        assert_eq!(unknown, major);
    }

    #[test]
    fn test_voices_above_127_are_dropped() {
        let notes = chord(125, "maj7", 0.0, 1.0, 100, 0).unwrap();
        assert_eq!(pitches(&notes), vec![125]);

        let notes = chord(120, "maj7", 0.0, 1.0, 100, 0).unwrap();
        assert_eq!(pitches(&notes), vec![120, 124, 127]);
        assert_eq!(velocities(&notes), vec![100, 95, 90]);
    }

    #[test]
    fn test_voice_velocity_is_floored_at_one() {
        let notes = chord(60, "maj7", 0.0, 1.0, 8, 0).unwrap();
        assert_eq!(velocities(&notes), vec![8, 3, 1, 1]);

        let notes = chord(60, "min7", 0.0, 1.0, 1, 0).unwrap();
        assert_eq!(velocities(&notes), vec![1, 1, 1, 1]);
    }

    #[test]
    fn test_inversion_is_accepted_but_unused() {
        let root = chord(60, "major", 0.0, 1.0, 80, 0).unwrap();
        let inverted = chord(60, "major", 0.0, 1.0, 80, 2).unwrap();
        assert_eq!(root, inverted);
    }

    #[test]
    fn test_chord_arguments_are_validated() {
        let field = |r: Result<ChordSpec>| r.err().and_then(|e| e.field());
        assert_eq!(field(ChordSpec::new(128, "major", 0, 0.0, 1.0, 80)), Some("root_note"));
        assert_eq!(field(ChordSpec::new(60, "major", 4, 0.0, 1.0, 80)), Some("inversion"));
        assert_eq!(field(ChordSpec::new(60, "major", -1, 0.0, 1.0, 80)), Some("inversion"));
        assert_eq!(field(ChordSpec::new(60, "major", 0, -2.0, 1.0, 80)), Some("start_time"));
        assert_eq!(field(ChordSpec::new(60, "major", 0, 0.0, 0.0, 80)), Some("duration"));
        assert_eq!(field(ChordSpec::new(60, "major", 0, 0.0, 1.0, 0)), Some("velocity"));
    }

    #[test]
    fn test_chord_from_note_name() {
        let notes = chord("A3", "min7", 2.0, 2.0, 90, 0).unwrap();
        assert_eq!(pitches(&notes), vec![57, 60, 64, 67]);
        assert!(notes.iter().all(|n| n.start_time() == 2.0));
    }

    #[test]
    fn test_quality_parse() {
        assert_eq!(ChordQuality::parse("Dom7"), Some(ChordQuality::Dom7));
        assert_eq!(ChordQuality::parse("sus4"), None);
        assert_eq!(ChordQuality::from_label("sus4"), ChordQuality::Major);
        assert_eq!(ChordQuality::Aug.to_string(), "aug");
    }
}
