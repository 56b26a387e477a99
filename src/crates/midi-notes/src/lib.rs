//! MIDI note model for driving Ableton Live clips
//!
//! This crate holds the note-level building blocks a producer agent uses
//! before it asks Ableton to write a clip: validated notes, a note-name
//! codec, chord expansion, drum-name lookup and pattern repetition. It does
//! no I/O; the resulting notes serialize straight into the argument shape of
//! the remote `add_notes_to_clip` tool.
//!
//! # Examples
//!
//! ```
//! use midi_notes::{chord, repeat_pattern, resolve_drum, AddNotesRequest, Velocity};
//!
//! let groove = vec![
//!     resolve_drum("kick", 0.0, Velocity::F).unwrap(),
//!     resolve_drum("closed hat", 0.5, Velocity::Mp).unwrap(),
//!     resolve_drum("snare", 1.0, Velocity::F).unwrap(),
//! ];
//! let four_loops = repeat_pattern(&groove, 4, 0.0).unwrap();
//! let pad = chord("A3", "min7", 0.0, 4.0, Velocity::Mf, 0).unwrap();
//!
//! let drums = AddNotesRequest::new(0, 0, four_loops);
//! let keys = AddNotesRequest::new(1, 0, pad);
//! assert_eq!(drums.len(), 12);
//! assert_eq!(keys.len(), 4);
//! ```
//!
//! # Main Components
//!
//! - **Note**: validated pitch, start, duration, velocity and mute flag
//! - **pitch**: "C4" ⇄ 60, sharps on the way out
//! - **chord**: interval tables with per-voice velocity falloff
//! - **drums**: General MIDI drum names
//! - **pattern**: loop repetition

pub mod chord;
pub mod clip;
pub mod drums;
pub mod error;
pub mod note;
pub mod pattern;
pub mod pitch;
pub mod velocity;

pub use chord::{chord, expand_chord, ChordQuality, ChordSpec};
pub use clip::{AddNotesRequest, ADD_NOTES_TOOL};
pub use drums::{available_drums, drum_hit, drum_pitch, resolve_drum, DrumHitSpec, DRUM_MAP};
pub use error::{NoteError, Result};
pub use note::{make_note, note, Note, NoteRecord};
pub use pattern::{pattern_duration, repeat_pattern};
pub use pitch::{name_to_pitch, pitch_to_name, PitchInput};
pub use velocity::Velocity;
