use std::fmt;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, NoteError>;

/// Errors raised while building or converting notes.
///
/// Every error is produced synchronously at the call that received the bad
/// input; nothing in this crate retries or recovers internally.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum NoteError {
    /// A note (or chord/pattern) field fell outside its declared bound.
    #[error("invalid {field}: {value} (expected {expected})")]
    Validation {
        field: &'static str,
        value: String,
        expected: &'static str,
    },

    /// A note name such as "C4" or "Bb5" could not be parsed.
    #[error("invalid note name '{name}': {reason}")]
    InvalidNoteName { name: String, reason: String },

    /// A pitch passed to the name codec is not a MIDI pitch.
    #[error("MIDI pitch must be between 0 and 127, got {pitch}")]
    OutOfRange { pitch: i32 },

    #[error("unknown drum '{name}'. Available drums: {}", .available.join(", "))]
    UnknownDrum {
        name: String,
        available: Vec<&'static str>,
    },
}

impl NoteError {
    pub fn validation(field: &'static str, value: impl fmt::Display, expected: &'static str) -> Self {
        NoteError::Validation {
            field,
            value: value.to_string(),
            expected,
        }
    }

    pub fn invalid_note_name(name: impl Into<String>, reason: impl Into<String>) -> Self {
        NoteError::InvalidNoteName {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Name of the offending field for validation errors.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            NoteError::Validation { field, .. } => Some(field),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_message_names_field_and_bound() {
        let err = NoteError::validation("velocity", 0, "1..=127");
        assert_eq!(err.to_string(), "invalid velocity: 0 (expected 1..=127)");
        assert_eq!(err.field(), Some("velocity"));
    }

    #[test]
    fn test_unknown_drum_lists_available() {
        let err = NoteError::UnknownDrum {
            name: "tambourine".into(),
            available: vec!["kick", "snare"],
        };
        assert_eq!(
            err.to_string(),
            "unknown drum 'tambourine'. Available drums: kick, snare"
        );
        assert_eq!(err.field(), None);
    }
}
