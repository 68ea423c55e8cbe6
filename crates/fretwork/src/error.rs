//! Error types for Fretwork operations.
//!
//! This module provides the main error type [`FretworkError`] plus the two
//! structured error types the library reports for invalid input:
//! [`ConfigError`] for invalid construction/configuration parameters and
//! [`OutOfRangeError`] for marker positions outside the configured layout.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use fretwork_core::pitch::PitchError;

/// The main error type for Fretwork operations.
///
/// All failures surface synchronously to the caller; nothing is retried or
/// recovered internally.
#[derive(Debug, Error)]
pub enum FretworkError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    OutOfRange(#[from] OutOfRangeError),

    #[error("export error: {0}")]
    Export(Box<dyn std::error::Error + Send + Sync>),
}

impl From<crate::export::Error> for FretworkError {
    fn from(error: crate::export::Error) -> Self {
        // File-level failures keep their I/O identity; everything else is
        // an export error.
        match error {
            crate::export::Error::Io(err) => Self::Io(err),
            other => Self::Export(Box::new(other)),
        }
    }
}

/// Invalid construction or configuration parameters.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("tuning has {tuning_len} notes but the instrument has {strings} strings")]
    TuningMismatch { strings: usize, tuning_len: usize },

    #[error("instrument needs at least one string")]
    NoStrings,

    #[error("instrument needs at least one fret")]
    NoFrets,

    #[error("scale length must be positive, got {0} mm")]
    ScaleLength(f32),

    #[error("neck width at the twelfth fret ({twelfth} mm) must exceed the width at the nut ({nut} mm)")]
    NeckTaper { nut: f32, twelfth: f32 },

    #[error("pixels-per-millimeter must be positive, got {0}")]
    Resolution(f32),

    #[error("invalid color for `{element}`: {message}")]
    Color {
        element: &'static str,
        message: String,
    },

    #[error(transparent)]
    Pitch(#[from] PitchError),

    #[error("missing configuration file: {0}")]
    MissingFile(PathBuf),

    #[error("failed to parse configuration: {0}")]
    Parse(String),

    #[error("{0}")]
    Invalid(String),
}

/// A marker position outside the configured layout bounds.
#[derive(Debug, Error)]
pub enum OutOfRangeError {
    #[error("string index {index} is out of range for a {count}-string instrument")]
    String { index: usize, count: usize },

    #[error("fret {fret} is not markable; valid positions are the open string and frets {min}..={max}")]
    Fret { fret: u32, min: u32, max: u32 },
}
