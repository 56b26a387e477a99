use crate::note::Note;
use serde::{Deserialize, Serialize};

/// Name of the remote Ableton tool that receives [`AddNotesRequest`]s.
pub const ADD_NOTES_TOOL: &str = "add_notes_to_clip";

/// Arguments for the remote `add_notes_to_clip` call.
///
/// This crate only shapes the payload; whoever owns the connection to
/// Ableton sends it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddNotesRequest {
    pub track_index: u32,
    pub clip_index: u32,
    pub notes: Vec<Note>,
}

impl AddNotesRequest {
    pub fn new(track_index: u32, clip_index: u32, notes: Vec<Note>) -> Self {
        AddNotesRequest {
            track_index,
            clip_index,
            notes,
        }
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    /// Beat at which the last note in the request ends
    pub fn end_time(&self) -> f64 {
        crate::pattern::pattern_duration(&self.notes)
    }
}
