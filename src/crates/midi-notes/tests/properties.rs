//! Property tests for the note model.
//!
//! ```bash
//! cargo test -p midi-notes --test properties
//! ```

use midi_notes::{
    chord, make_note, name_to_pitch, pitch_to_name, repeat_pattern, ChordQuality, Note, NoteError,
};
use proptest::prelude::*;

/// Times sit on a sixteenth-of-a-beat grid, like notes an agent writes.
fn arbitrary_note() -> impl Strategy<Value = Note> {
    (0i32..=127, 0u32..1024, 1u32..128, 1i32..=127, any::<bool>()).prop_map(
        |(pitch, start, duration, velocity, muted)| {
            make_note(pitch, start as f64 / 16.0, duration as f64 / 16.0, velocity, muted).unwrap()
        },
    )
}

proptest! {
    /// Every MIDI pitch survives pitch -> name -> pitch.
    #[test]
    fn pitch_name_round_trip(pitch in 0i32..=127) {
        let name = pitch_to_name(pitch).unwrap();
        prop_assert_eq!(name_to_pitch(&name).unwrap() as i32, pitch);
        prop_assert!(!name.contains('b'), "names are spelled with sharps: {}", name);
    }

    /// Arbitrary strings never panic the parser.
    #[test]
    fn name_parser_never_panics(s in "\\PC{0,12}") {
        let _ = name_to_pitch(&s);
    }

    /// Pitches outside 0..=127 are always rejected by both sides of the codec.
    #[test]
    fn out_of_range_pitches_rejected(pitch in prop_oneof![i32::MIN..0, 128..i32::MAX]) {
        prop_assert_eq!(pitch_to_name(pitch), Err(NoteError::OutOfRange { pitch }));
        let is_pitch_error = matches!(
            make_note(pitch, 0.0, 1.0, 100, false),
            Err(NoteError::Validation { field: "pitch", .. })
        );
        prop_assert!(is_pitch_error);
    }

    /// Velocities outside 1..=127 never make a note.
    #[test]
    fn out_of_range_velocities_rejected(velocity in prop_oneof![i32::MIN..1, 128..i32::MAX]) {
        prop_assert!(make_note(60, 0.0, 1.0, velocity, false).is_err());
    }

    /// Chord voices never exceed the MIDI ceiling and the root always sounds.
    #[test]
    fn chord_voices_stay_in_range(
        root in 0i32..=127,
        quality in prop::sample::select(ChordQuality::ALL.to_vec()),
        velocity in 1i32..=127,
    ) {
        let notes = chord(root, quality.label(), 0.0, 1.0, velocity, 0).unwrap();
        prop_assert!(!notes.is_empty());
        prop_assert_eq!(notes[0].pitch() as i32, root);
        prop_assert_eq!(notes[0].velocity() as i32, velocity);
        prop_assert!(notes.len() <= quality.intervals().len());
        prop_assert!(notes.iter().all(|n| n.velocity() >= 1));
        prop_assert!(notes.windows(2).all(|w| w[0].pitch() < w[1].pitch()));
    }

    /// Repetition multiplies the length and never reorders within a copy.
    #[test]
    fn repeat_pattern_layout(
        body in prop::collection::vec(arbitrary_note(), 1..8),
        repeat in 1usize..6,
        offset in 0.0f64..16.0,
    ) {
        let notes = repeat_pattern(&body, repeat, offset).unwrap();
        prop_assert_eq!(notes.len(), repeat * body.len());

        let length = body.iter().map(|n| n.end_time()).fold(0.0, f64::max);
        for (i, n) in notes.iter().enumerate() {
            let rep = i / body.len();
            let original = &body[i % body.len()];
            let expected = original.start_time() + rep as f64 * length + offset;
            prop_assert!((n.start_time() - expected).abs() < 1e-9);
            prop_assert_eq!(n.pitch(), original.pitch());
            prop_assert_eq!(n.velocity(), original.velocity());
        }
    }

    /// Notes survive a trip through the clip record.
    #[test]
    fn note_json_round_trip(n in arbitrary_note()) {
        let text = serde_json::to_string(&n).unwrap();
        let back: Note = serde_json::from_str(&text).unwrap();
        prop_assert_eq!(back, n);
    }
}
