//! Fretwork - fretboard diagram rendering for stringed instruments.
//!
//! A [`Fretboard`] is built from a validated [`instrument::Instrument`]
//! plus an [`config::AppConfig`], accepts any number of marked positions,
//! and exports a single diagram as SVG or PNG.
//!
//! # Examples
//!
//! ```
//! use fretwork::{Fretboard, config::AppConfig, instrument::Instrument};
//!
//! let instrument = Instrument::builder()
//!     .with_frets(12)
//!     .with_title("C major triad tones")
//!     .build()
//!     .expect("valid instrument");
//!
//! let mut board = Fretboard::new(instrument, AppConfig::default())
//!     .expect("valid configuration");
//!
//! // Mark the third fret on the high E string
//! board.mark(0, 3).expect("position in range");
//!
//! // Mark every E on the neck
//! board.mark_pitch_class("E".parse().unwrap(), None).expect("strings in range");
//!
//! let svg = board.render_svg();
//! assert!(svg.contains("<svg"));
//! ```
//!
//! Writing to a file picks the format from the extension:
//!
//! ```rust,no_run
//! # use fretwork::{Fretboard, config::AppConfig, instrument::Instrument};
//! # let instrument = Instrument::builder().build().unwrap();
//! # let board = Fretboard::new(instrument, AppConfig::default()).unwrap();
//! board.export("out.svg")?;
//! board.export("out.png")?;
//! # Ok::<(), fretwork::FretworkError>(())
//! ```

pub mod config;
pub mod instrument;
pub mod layout;
pub mod theme;

mod error;
mod export;

pub use fretwork_core::{color, draw, geometry, pitch};

pub use error::{ConfigError, FretworkError, OutOfRangeError};

use std::ops::Range;
use std::path::Path;

use log::{debug, info};

use config::{AppConfig, RenderOptions};
use export::{Exporter, ImageFormat};
use instrument::{Instrument, Marker};
use layout::{Engine, Layout};
use fretwork_core::pitch::{Note, PitchClass};
use theme::Theme;

/// A fretboard diagram: one instrument, a set of marked positions, and the
/// configuration used to render them.
pub struct Fretboard {
    instrument: Instrument,
    theme: Theme,
    options: RenderOptions,
    markers: Vec<Marker>,
}

impl Fretboard {
    /// Creates a diagram for an instrument with the given configuration.
    ///
    /// Process-wide defaults apply only here; the resolved theme and render
    /// options are stored on the instance and read at render time.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] (wrapped in [`FretworkError`]) when the
    /// configuration contains unparsable colors or a non-positive
    /// resolution.
    pub fn new(instrument: Instrument, config: AppConfig) -> Result<Self, FretworkError> {
        let theme = config.style().resolve()?;
        let options = config.render().resolve()?;

        Ok(Self {
            instrument,
            theme,
            options,
            markers: Vec::new(),
        })
    }

    /// Returns the instrument this diagram renders.
    pub fn instrument(&self) -> &Instrument {
        &self.instrument
    }

    /// Returns the markers added so far, in insertion order.
    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    /// Marks a (string, fret) position with the default label and color.
    ///
    /// # Errors
    ///
    /// Returns an [`OutOfRangeError`] when the string index or fret is
    /// outside the configured layout.
    pub fn mark(&mut self, string: usize, fret: u32) -> Result<(), OutOfRangeError> {
        self.mark_with(Marker::new(string, fret))
    }

    /// Marks a position described by a [`Marker`], which may carry label
    /// and color overrides.
    ///
    /// # Errors
    ///
    /// Returns an [`OutOfRangeError`] when the marker position is outside
    /// the configured layout.
    pub fn mark_with(&mut self, marker: Marker) -> Result<(), OutOfRangeError> {
        self.instrument
            .validate_position(marker.string(), marker.fret())?;
        self.markers.push(marker);
        Ok(())
    }

    /// Marks every position sounding exactly the given pitch.
    ///
    /// Searches the open string and every fret slot of the rendered window,
    /// on one string or on all of them.
    ///
    /// # Errors
    ///
    /// Returns an [`OutOfRangeError`] when a string index is given and is
    /// out of range. A pitch that occurs nowhere marks nothing.
    pub fn mark_note(&mut self, note: Note, string: Option<usize>) -> Result<(), OutOfRangeError> {
        for string in self.resolve_strings(string)? {
            for fret in self.instrument.markable_frets() {
                if self.instrument.sounding_note(string, fret) == Some(note) {
                    self.markers.push(Marker::new(string, fret));
                }
            }
        }
        Ok(())
    }

    /// Marks every position sounding the given pitch class, in any octave.
    ///
    /// # Errors
    ///
    /// Returns an [`OutOfRangeError`] when a string index is given and is
    /// out of range.
    pub fn mark_pitch_class(
        &mut self,
        class: PitchClass,
        string: Option<usize>,
    ) -> Result<(), OutOfRangeError> {
        for string in self.resolve_strings(string)? {
            self.mark_class_on_string(class, string);
        }
        Ok(())
    }

    /// Marks every natural note on every string; with
    /// `include_accidentals`, marks the full chromatic set.
    pub fn mark_all(&mut self, include_accidentals: bool) {
        let classes: Vec<PitchClass> = if include_accidentals {
            PitchClass::chromatic().collect()
        } else {
            PitchClass::naturals().collect()
        };
        for string in 0..self.instrument.strings() {
            for &class in &classes {
                self.mark_class_on_string(class, string);
            }
        }
    }

    /// Renders the diagram to an SVG document string.
    ///
    /// Rendering the same diagram twice yields byte-identical output.
    pub fn render_svg(&self) -> String {
        let layout = self.layout();
        export::svg::document(&layout, &self.theme, &self.options).to_string()
    }

    /// Exports the diagram to a file, picking the format from the path
    /// extension (`.svg` or `.png`).
    ///
    /// There is no partial-output guarantee: a failure during the write may
    /// leave an incomplete file behind. Callers needing atomicity should
    /// export to a temporary path and rename.
    ///
    /// # Errors
    ///
    /// Returns [`FretworkError::Io`] for file creation or write failures,
    /// and [`FretworkError::Export`] for unsupported extensions or
    /// rasterization failures.
    pub fn export(&self, path: impl AsRef<Path>) -> Result<(), FretworkError> {
        let path = path.as_ref();
        let format = ImageFormat::from_path(path)?;

        info!(
            output_path = path.display().to_string(),
            format:? = format;
            "Exporting fretboard diagram"
        );

        let layout = self.layout();
        debug!(
            frets_len = layout.frets().len(),
            strings_len = layout.strings().len(),
            markers_len = layout.markers().len();
            "Layout calculated"
        );

        let file_name = path.to_string_lossy();
        match format {
            ImageFormat::Svg => {
                export::svg::Svg::new(&file_name).export_layout(&layout, &self.theme, &self.options)?
            }
            ImageFormat::Png => {
                export::png::Png::new(&file_name).export_layout(&layout, &self.theme, &self.options)?
            }
        }

        info!(output_file = path.display().to_string(); "Diagram exported successfully");
        Ok(())
    }

    fn layout(&self) -> Layout {
        Engine::new(&self.instrument).calculate(&self.markers)
    }

    fn mark_class_on_string(&mut self, class: PitchClass, string: usize) {
        for fret in self.instrument.markable_frets() {
            let sounds = self
                .instrument
                .sounding_note(string, fret)
                .is_some_and(|note| note.is_class(class));
            if sounds {
                self.markers.push(Marker::new(string, fret));
            }
        }
    }

    fn resolve_strings(&self, string: Option<usize>) -> Result<Range<usize>, OutOfRangeError> {
        let count = self.instrument.strings();
        match string {
            Some(index) if index >= count => Err(OutOfRangeError::String { index, count }),
            Some(index) => Ok(index..index + 1),
            None => Ok(0..count),
        }
    }
}
