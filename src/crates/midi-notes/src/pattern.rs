use crate::error::{NoteError, Result};
use crate::note::Note;

/// Length of a loop body: from beat 0 to the end of its latest note.
///
/// Returns 0.0 for an empty slice.
pub fn pattern_duration(notes: &[Note]) -> f64 {
    notes.iter().map(Note::end_time).fold(0.0, f64::max)
}

/// Repeat a loop body `repeat` times, back to back, shifted by `offset`.
///
/// Copy `r` of each note starts at `start + r * pattern_duration + offset`.
/// Output is ordered by repetition, then by input order, and always holds
/// `repeat * notes.len()` notes.
///
/// ```
/// use midi_notes::{repeat_pattern, resolve_drum};
///
/// let body = vec![
///     resolve_drum("kick", 0.0, 100).unwrap(),
///     resolve_drum("snare", 1.0, 100).unwrap(),
/// ];
/// let two_bars = repeat_pattern(&body, 2, 0.0).unwrap();
/// assert_eq!(two_bars.len(), 4);
/// ```
pub fn repeat_pattern(notes: &[Note], repeat: usize, offset: f64) -> Result<Vec<Note>> {
    if repeat < 1 {
        return Err(NoteError::validation("repeat", repeat, "an integer >= 1"));
    }
    if !(offset.is_finite() && offset >= 0.0) {
        return Err(NoteError::validation("offset", offset, "a finite number >= 0"));
    }
    if notes.is_empty() {
        return Ok(Vec::new());
    }

    let length = pattern_duration(notes);
    let mut repeated = Vec::with_capacity(repeat * notes.len());

    for rep in 0..repeat {
        let shift = rep as f64 * length + offset;
        for note in notes {
            repeated.push(note.with_start_time(note.start_time() + shift)?);
        }
    }

    Ok(repeated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::make_note;

    fn body() -> Vec<Note> {
        vec![
            make_note(36, 0.0, 0.5, 100, false).unwrap(),
            make_note(38, 1.0, 0.5, 90, true).unwrap(),
        ]
    }

    fn starts(notes: &[Note]) -> Vec<f64> {
        notes.iter().map(|n| n.start_time()).collect()
    }

    #[test]
    fn test_pattern_duration() {
        assert_eq!(pattern_duration(&body()), 1.5);
        assert_eq!(pattern_duration(&[]), 0.0);
    }

    #[test]
    fn test_repeat_twice() {
        let notes = repeat_pattern(&body(), 2, 0.0).unwrap();
        assert_eq!(starts(&notes), vec![0.0, 1.0, 1.5, 2.5]);
        let pitches: Vec<u8> = notes.iter().map(|n| n.pitch()).collect();
        assert_eq!(pitches, vec![36, 38, 36, 38]);
    }

    #[test]
    fn test_other_fields_are_copied() {
        let original_body = body();
        let notes = repeat_pattern(&original_body, 3, 0.0).unwrap();
        for (i, n) in notes.iter().enumerate() {
            let original = &original_body[i % 2];
            assert_eq!(n.pitch(), original.pitch());
            assert_eq!(n.duration(), original.duration());
            assert_eq!(n.velocity(), original.velocity());
            assert_eq!(n.is_muted(), original.is_muted());
        }
    }

    #[test]
    fn test_offset_shifts_every_copy() {
        let notes = repeat_pattern(&body(), 2, 4.0).unwrap();
        assert_eq!(starts(&notes), vec![4.0, 5.0, 5.5, 6.5]);
    }

    #[test]
    fn test_single_repeat_is_identity() {
        assert_eq!(repeat_pattern(&body(), 1, 0.0).unwrap(), body());
    }

    #[test]
    fn test_empty_pattern() {
        assert!(repeat_pattern(&[], 5, 0.0).unwrap().is_empty());
    }

    #[test]
    fn test_invalid_arguments() {
        let err = repeat_pattern(&body(), 0, 0.0).unwrap_err();
        assert_eq!(err.field(), Some("repeat"));
        let err = repeat_pattern(&body(), 2, -1.0).unwrap_err();
        assert_eq!(err.field(), Some("offset"));
        let err = repeat_pattern(&body(), 2, f64::NAN).unwrap_err();
        assert_eq!(err.field(), Some("offset"));
    }

    #[test]
    fn test_input_is_left_untouched() {
        let original = body();
        let _ = repeat_pattern(&original, 4, 2.0).unwrap();
        assert_eq!(original, body());
    }
}
