//! Glue between the producer agent and the note model.
//!
//! - [`settings`]: LLM provider configuration from the environment
//! - [`tools`]: rig tools the agent calls, and the [`tools::ClipSink`] seam
//!   where the Ableton tool-protocol client plugs in
//! - [`logging`]: tracing subscriber setup

pub mod logging;
pub mod settings;
pub mod tools;

pub use midi_notes;
pub use settings::{LlmProvider, Settings, SettingsError};
pub use tools::{ClipSink, DryRunSink, ToolRuntimeContext};
