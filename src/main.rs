use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use midi_notes::{name_to_pitch, pitch_to_name, AddNotesRequest, DrumHitSpec, Note, PitchInput, Velocity};
use producer_lib::{logging, Settings, ToolRuntimeContext};

#[derive(Parser, Debug)]
#[command(name = "producer")]
#[command(about = "Build MIDI notes for Ableton Live clips", long_about = None)]
struct Cli {
    /// More log output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Convert a note name (C4, F#3, Bb5) to a MIDI pitch
    Pitch { name: String },

    /// Convert a MIDI pitch to a note name
    Name {
        #[arg(allow_negative_numbers = true)]
        pitch: i32,
    },

    /// Print the notes of a chord
    Chord {
        /// Root as a MIDI number or note name
        root: String,

        /// major, minor, maj7, min7, dom7, dim or aug
        chord_type: String,

        /// Start time in beats
        #[arg(long, default_value = "0.0")]
        start: f64,

        /// Duration in beats
        #[arg(long, default_value = "4.0")]
        duration: f64,

        /// Root velocity: 1-127 or a dynamic marking (pp, mf, ff...)
        #[arg(long, default_value = "80", value_parser = parse_velocity)]
        velocity: i32,

        #[arg(long, default_value = "0")]
        inversion: i32,

        #[command(flatten)]
        target: ClipTarget,
    },

    /// Print a drum loop, optionally repeated
    Drums {
        /// Hits as drum@start[:velocity], e.g. kick@0 closed_hat@0.5:70
        #[arg(required = true, value_parser = parse_hit)]
        hits: Vec<DrumHitSpec>,

        /// How many times to play the loop
        #[arg(short, long, default_value = "1")]
        repeat: usize,

        /// Beats to shift the whole pattern by
        #[arg(long, default_value = "0.0")]
        offset: f64,

        #[command(flatten)]
        target: ClipTarget,
    },

    /// Validate the agent settings in the environment
    Settings,
}

#[derive(Args, Debug)]
struct ClipTarget {
    /// Track index; together with --clip the output becomes an add_notes_to_clip request
    #[arg(long, requires = "clip")]
    track: Option<u32>,

    /// Clip slot index
    #[arg(long, requires = "track")]
    clip: Option<u32>,
}

fn parse_velocity(s: &str) -> Result<i32, String> {
    if let Some(dynamic) = Velocity::from_marking(s) {
        return Ok(dynamic.into());
    }
    s.parse()
        .map_err(|_| format!("'{}' is neither a number nor a dynamic marking", s))
}

fn parse_hit(s: &str) -> Result<DrumHitSpec, String> {
    let (drum, timing) = s
        .split_once('@')
        .ok_or_else(|| format!("expected drum@start[:velocity], got '{}'", s))?;
    let (start, velocity) = match timing.split_once(':') {
        Some((start, velocity)) => (start, parse_velocity(velocity)?),
        None => (timing, midi_notes::note::DEFAULT_NOTE_VELOCITY),
    };
    let start: f64 = start
        .parse()
        .map_err(|_| format!("invalid start time '{}' in '{}'", start, s))?;
    Ok(DrumHitSpec::new(drum, start, velocity))
}

fn parse_pitch_input(s: &str) -> PitchInput {
    match s.parse::<i32>() {
        Ok(pitch) => PitchInput::Midi(pitch),
        Err(_) => PitchInput::Name(s.to_string()),
    }
}

async fn emit_notes(ctx: &ToolRuntimeContext, notes: Vec<Note>, target: ClipTarget) -> Result<()> {
    let output = match (target.track, target.clip) {
        (Some(track), Some(clip)) => {
            let request = AddNotesRequest::new(track, clip, notes);
            ctx.add_notes_to_clip(track, clip, request.notes.clone()).await?;
            serde_json::to_string_pretty(&request)
        }
        _ => serde_json::to_string_pretty(&notes),
    }
    .context("Failed to serialize notes")?;

    println!("{}", output);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(logging::level_for(cli.verbose, cli.quiet));

    let ctx = ToolRuntimeContext::dry_run();

    match cli.command {
        Command::Pitch { name } => {
            println!("{}", name_to_pitch(&name)?);
        }
        Command::Name { pitch } => {
            println!("{}", pitch_to_name(pitch)?);
        }
        Command::Chord {
            root,
            chord_type,
            start,
            duration,
            velocity,
            inversion,
            target,
        } => {
            let notes = ctx.chord_notes(
                parse_pitch_input(&root),
                &chord_type,
                start,
                Some(duration),
                Some(velocity),
                Some(inversion),
            )?;
            emit_notes(&ctx, notes, target).await?;
        }
        Command::Drums {
            hits,
            repeat,
            offset,
            target,
        } => {
            let notes = ctx.drum_pattern_notes(&hits, Some(repeat), Some(offset))?;
            emit_notes(&ctx, notes, target).await?;
        }
        Command::Settings => {
            let settings = Settings::from_env().context("Invalid agent settings")?;
            tracing::info!(?settings, "settings loaded");
            println!("{}", settings.model());
        }
    }

    Ok(())
}
