//! CLI logic for the Fretwork fretboard diagram tool.

mod args;
mod config;

pub use args::{Args, MarkSpec};

use log::info;

use fretwork::{
    ConfigError, Fretboard, FretworkError,
    color::Color,
    instrument::{Instrument, Marker, Tuning},
    pitch::{Note, PitchClass},
};

/// Run the Fretwork CLI application
///
/// This function builds the instrument described by the arguments, applies
/// the requested marks, and writes the diagram to the output file.
///
/// # Arguments
///
/// * `args` - Command-line arguments
///
/// # Errors
///
/// Returns `FretworkError` for:
/// - Configuration loading errors
/// - Invalid instrument parameters
/// - Out-of-range mark positions
/// - File I/O and rendering errors
pub fn run(args: &Args) -> Result<(), FretworkError> {
    info!(output_path = args.output; "Rendering fretboard diagram");

    // Load configuration
    let app_config = config::load_config(args.config.as_ref())?;

    // Build the instrument
    let tuning: Tuning = args.tuning.parse().map_err(ConfigError::from)?;
    let mut builder = Instrument::builder()
        .with_tuning(tuning)
        .with_frets(args.frets)
        .with_start_fret(args.start_fret)
        .with_left_handed(args.lefty)
        .with_prefer_flats(args.prefer_flats)
        .with_scale_length(args.scale_length)
        .with_inlays(args.inlays);
    if let Some(strings) = args.strings {
        builder = builder.with_strings(strings);
    }
    if let Some(title) = &args.title {
        builder = builder.with_title(title.as_str());
    }
    let instrument = builder.build()?;

    let mut board = Fretboard::new(instrument, app_config)?;

    // Positional marks
    for spec in &args.marks {
        let mut marker = Marker::new(spec.string - 1, spec.fret);
        if let Some(label) = &spec.label {
            marker = marker.with_label(label.as_str());
        }
        if let Some(raw) = &spec.color {
            let color = Color::new(raw)
                .map_err(|message| ConfigError::Invalid(format!("invalid mark color: {message}")))?;
            marker = marker.with_color(color);
        }
        board.mark_with(marker)?;
    }

    // Note-based marks: an octave digit selects an exact pitch, a bare
    // name selects a pitch class
    for raw in &args.mark_notes {
        if raw.chars().any(|c| c.is_ascii_digit()) {
            let note: Note = raw.parse().map_err(ConfigError::from)?;
            board.mark_note(note, None)?;
        } else {
            let class: PitchClass = raw.parse().map_err(ConfigError::from)?;
            board.mark_pitch_class(class, None)?;
        }
    }

    if args.mark_chromatic {
        board.mark_all(true);
    } else if args.mark_all {
        board.mark_all(false);
    }

    board.export(&args.output)?;

    info!(output_file = args.output; "Diagram exported successfully");

    Ok(())
}
