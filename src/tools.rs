// Producer agent tools
// Tools the agent uses to build notes and write them into Ableton clips

use anyhow::{anyhow, Result as AnyResult};
use async_trait::async_trait;
use midi_notes::chord::{DEFAULT_CHORD_DURATION, DEFAULT_CHORD_VELOCITY, MAX_INVERSION};
use midi_notes::note::{DEFAULT_NOTE_VELOCITY, MAX_VELOCITY, MIN_VELOCITY};
use midi_notes::pitch::{MAX_PITCH, MIN_PITCH};
use midi_notes::{
    chord, repeat_pattern, AddNotesRequest, ChordQuality, DrumHitSpec, Note, PitchInput,
};
use rig::{completion::ToolDefinition as RigToolDefinition, tool::Tool as RigTool};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use thiserror::Error;

/// Upper bound on notes moved by a single tool call
pub const MAX_NOTES_PER_CALL: usize = 4096;

const MAX_REPEAT: usize = 256;

/// Where finished note lists go.
///
/// The live implementation forwards to Ableton's `add_notes_to_clip` tool
/// over the tool-protocol client; that client lives outside this crate.
#[async_trait]
pub trait ClipSink: Send + Sync {
    async fn add_notes(&self, request: &AddNotesRequest) -> AnyResult<()>;
}

/// Logs requests instead of sending them.
#[derive(Debug, Default, Clone, Copy)]
pub struct DryRunSink;

#[async_trait]
impl ClipSink for DryRunSink {
    async fn add_notes(&self, request: &AddNotesRequest) -> AnyResult<()> {
        tracing::info!(
            track = request.track_index,
            clip = request.clip_index,
            notes = request.len(),
            "dry run: not sending notes to Ableton"
        );
        tracing::debug!(payload = %serde_json::to_string(request)?, "add_notes_to_clip payload");
        Ok(())
    }
}

#[derive(Clone)]
pub struct ToolRuntimeContext {
    sink: Arc<dyn ClipSink>,
}

impl ToolRuntimeContext {
    pub fn new(sink: Arc<dyn ClipSink>) -> Self {
        Self { sink }
    }

    pub fn dry_run() -> Self {
        Self::new(Arc::new(DryRunSink))
    }

    pub async fn add_notes_to_clip(
        &self,
        track_index: u32,
        clip_index: u32,
        notes: Vec<Note>,
    ) -> AnyResult<String> {
        if notes.is_empty() {
            return Ok("No notes provided to add to clip".into());
        }
        if notes.len() > MAX_NOTES_PER_CALL {
            return Err(anyhow!(
                "Too many notes ({}, max {} per call)",
                notes.len(),
                MAX_NOTES_PER_CALL
            ));
        }

        let request = AddNotesRequest::new(track_index, clip_index, notes);
        self.sink.add_notes(&request).await.map_err(|e| {
            tracing::error!(track = track_index, clip = clip_index, "Error adding notes to clip: {}", e);
            anyhow!("Error adding notes to clip: {}", e)
        })?;

        tracing::info!(
            "Added {} notes to track {}, clip {}",
            request.len(),
            track_index,
            clip_index
        );
        Ok(format!(
            "Successfully added {} notes to clip at track {}, slot {}",
            request.len(),
            track_index,
            clip_index
        ))
    }

    pub fn chord_notes(
        &self,
        root: PitchInput,
        chord_type: &str,
        start: f64,
        duration: Option<f64>,
        velocity: Option<i32>,
        inversion: Option<i32>,
    ) -> AnyResult<Vec<Note>> {
        let notes = chord(
            root,
            chord_type,
            start,
            duration.unwrap_or(DEFAULT_CHORD_DURATION),
            velocity.unwrap_or(DEFAULT_CHORD_VELOCITY),
            inversion.unwrap_or(0),
        )?;
        Ok(notes)
    }

    pub fn drum_pattern_notes(
        &self,
        hits: &[DrumHitSpec],
        repeat: Option<usize>,
        offset: Option<f64>,
    ) -> AnyResult<Vec<Note>> {
        let repeat = repeat.unwrap_or(1);
        if repeat > MAX_REPEAT {
            return Err(anyhow!("Repeat too large (max {})", MAX_REPEAT));
        }
        if hits.len().saturating_mul(repeat) > MAX_NOTES_PER_CALL {
            return Err(anyhow!(
                "Pattern too large (max {} notes per call)",
                MAX_NOTES_PER_CALL
            ));
        }

        let body = hits
            .iter()
            .map(DrumHitSpec::to_note)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(repeat_pattern(&body, repeat, offset.unwrap_or(0.0))?)
    }
}

#[derive(Debug, Error)]
#[error("{0}")]
pub struct ToolInvocationError(#[from] anyhow::Error);

fn notes_json(notes: &[Note]) -> AnyResult<String> {
    Ok(serde_json::to_string(notes)?)
}

#[derive(Clone)]
pub struct RigAddNotesTool {
    ctx: ToolRuntimeContext,
}

impl RigAddNotesTool {
    pub fn new(ctx: ToolRuntimeContext) -> Self {
        Self { ctx }
    }
}

#[derive(Clone, Deserialize)]
pub struct RigAddNotesArgs {
    track_index: u32,
    clip_index: u32,
    notes: Vec<Note>,
}

impl RigTool for RigAddNotesTool {
    const NAME: &'static str = "add_notes_to_clip";

    type Error = ToolInvocationError;
    type Args = RigAddNotesArgs;
    type Output = String;

    async fn definition(&self, _prompt: String) -> RigToolDefinition {
        RigToolDefinition {
            name: Self::NAME.to_string(),
            description: "Add validated MIDI notes to an existing clip in Ableton Live."
                .to_string(),
            parameters: json!({
                "type": "object",
                "properties": {
                    "track_index": {
                        "type": "integer",
                        "description": "Index of the track containing the clip."
                    },
                    "clip_index": {
                        "type": "integer",
                        "description": "Index of the clip slot containing the clip."
                    },
                    "notes": {
                        "type": "array",
                        "description": "Notes to add. Times are in beats from the clip start.",
                        "items": {
                            "type": "object",
                            "properties": {
                                "pitch": {
                                    "type": "integer",
                                    "minimum": MIN_PITCH,
                                    "maximum": MAX_PITCH,
                                    "description": "MIDI pitch (60 = C4)."
                                },
                                "start_time": {
                                    "type": "number",
                                    "minimum": 0,
                                    "description": "Start time in beats (0.0 = clip start)."
                                },
                                "duration": {
                                    "type": "number",
                                    "exclusiveMinimum": 0,
                                    "description": "Duration in beats (0.25 = 16th note, 1.0 = quarter note)."
                                },
                                "velocity": {
                                    "type": "integer",
                                    "minimum": MIN_VELOCITY,
                                    "maximum": MAX_VELOCITY,
                                    "default": DEFAULT_NOTE_VELOCITY,
                                    "description": "Note velocity."
                                },
                                "mute": {
                                    "type": "boolean",
                                    "default": false,
                                    "description": "Whether the note is muted."
                                }
                            },
                            "required": ["pitch", "start_time", "duration"]
                        }
                    }
                },
                "required": ["track_index", "clip_index", "notes"]
            }),
        }
    }

    async fn call(&self, args: Self::Args) -> Result<Self::Output, Self::Error> {
        self.ctx
            .add_notes_to_clip(args.track_index, args.clip_index, args.notes)
            .await
            .map_err(ToolInvocationError::from)
    }
}

#[derive(Clone)]
pub struct RigBuildChordTool {
    ctx: ToolRuntimeContext,
}

impl RigBuildChordTool {
    pub fn new(ctx: ToolRuntimeContext) -> Self {
        Self { ctx }
    }
}

#[derive(Clone, Deserialize)]
pub struct RigBuildChordArgs {
    root: PitchInput,
    chord_type: String,
    start: f64,
    duration: Option<f64>,
    velocity: Option<i32>,
    inversion: Option<i32>,
}

impl RigTool for RigBuildChordTool {
    const NAME: &'static str = "build_chord";

    type Error = ToolInvocationError;
    type Args = RigBuildChordArgs;
    type Output = String;

    async fn definition(&self, _prompt: String) -> RigToolDefinition {
        let qualities: Vec<&str> = ChordQuality::ALL.iter().map(|q| q.label()).collect();
        RigToolDefinition {
            name: Self::NAME.to_string(),
            description: "Build the notes of a chord. Returns a JSON array of notes ready for add_notes_to_clip."
                .to_string(),
            parameters: json!({
                "type": "object",
                "properties": {
                    "root": {
                        "type": ["integer", "string"],
                        "description": "Root as a MIDI number (60) or a note name (\"C4\", \"F#3\", \"Bb2\")."
                    },
                    "chord_type": {
                        "type": "string",
                        "description": format!(
                            "Chord quality: {}. Unknown values fall back to major.",
                            qualities.join(", ")
                        )
                    },
                    "start": {
                        "type": "number",
                        "description": "Start time in beats."
                    },
                    "duration": {
                        "type": "number",
                        "exclusiveMinimum": 0,
                        "default": DEFAULT_CHORD_DURATION,
                        "description": "Duration in beats."
                    },
                    "velocity": {
                        "type": "integer",
                        "minimum": MIN_VELOCITY,
                        "maximum": MAX_VELOCITY,
                        "default": DEFAULT_CHORD_VELOCITY,
                        "description": "Velocity of the root. Upper voices are slightly softer."
                    },
                    "inversion": {
                        "type": "integer",
                        "minimum": 0,
                        "maximum": MAX_INVERSION,
                        "default": 0,
                        "description": "Chord inversion."
                    }
                },
                "required": ["root", "chord_type", "start"]
            }),
        }
    }

    async fn call(&self, args: Self::Args) -> Result<Self::Output, Self::Error> {
        let notes = self.ctx.chord_notes(
            args.root,
            &args.chord_type,
            args.start,
            args.duration,
            args.velocity,
            args.inversion,
        )?;
        notes_json(&notes).map_err(ToolInvocationError::from)
    }
}

#[derive(Clone)]
pub struct RigDrumPatternTool {
    ctx: ToolRuntimeContext,
}

impl RigDrumPatternTool {
    pub fn new(ctx: ToolRuntimeContext) -> Self {
        Self { ctx }
    }
}

#[derive(Clone, Deserialize)]
pub struct RigDrumPatternArgs {
    hits: Vec<DrumHitSpec>,
    repeat: Option<usize>,
    offset: Option<f64>,
}

impl RigTool for RigDrumPatternTool {
    const NAME: &'static str = "build_drum_pattern";

    type Error = ToolInvocationError;
    type Args = RigDrumPatternArgs;
    type Output = String;

    async fn definition(&self, _prompt: String) -> RigToolDefinition {
        RigToolDefinition {
            name: Self::NAME.to_string(),
            description: "Build a drum loop from named hits and repeat it. Returns a JSON array of notes ready for add_notes_to_clip."
                .to_string(),
            parameters: json!({
                "type": "object",
                "properties": {
                    "hits": {
                        "type": "array",
                        "description": "One loop of drum hits.",
                        "items": {
                            "type": "object",
                            "properties": {
                                "drum": {
                                    "type": "string",
                                    "enum": midi_notes::available_drums(),
                                    "description": "Drum name."
                                },
                                "start": {
                                    "type": "number",
                                    "description": "Start time in beats within the loop."
                                },
                                "velocity": {
                                    "type": "integer",
                                    "minimum": MIN_VELOCITY,
                                    "maximum": MAX_VELOCITY,
                                    "default": DEFAULT_NOTE_VELOCITY,
                                    "description": "Hit velocity."
                                }
                            },
                            "required": ["drum", "start"]
                        }
                    },
                    "repeat": {
                        "type": "integer",
                        "description": "How many times to play the loop (default 1)."
                    },
                    "offset": {
                        "type": "number",
                        "description": "Beats to shift the whole pattern by (default 0)."
                    }
                },
                "required": ["hits"]
            }),
        }
    }

    async fn call(&self, args: Self::Args) -> Result<Self::Output, Self::Error> {
        let notes = self
            .ctx
            .drum_pattern_notes(&args.hits, args.repeat, args.offset)?;
        notes_json(&notes).map_err(ToolInvocationError::from)
    }
}
