//! Instrument layout parameters and markers.
//!
//! This module provides the validated instrument description the layout
//! engine works from:
//!
//! - [`Tuning`] - Ordered open-string pitches, highest-pitched string first.
//! - [`Instrument`] - String/fret counts, physical dimensions, handedness,
//!   and the fret window for chord diagrams. Built through
//!   [`InstrumentBuilder`], which enforces the construction invariants.
//! - [`Marker`] - A highlighted (string, fret) position with optional label
//!   and color overrides.

use std::fmt;
use std::str::FromStr;

use fretwork_core::color::Color;
use fretwork_core::pitch::{Note, PitchError};

use crate::error::{ConfigError, OutOfRangeError};

/// Default scale length in millimeters (a common 25.5" inspired value).
pub const DEFAULT_SCALE_LENGTH: f32 = 628.0;

/// Default neck width at the nut in millimeters.
pub const DEFAULT_WIDTH_AT_NUT: f32 = 43.0;

/// Default neck width at the twelfth fret in millimeters.
pub const DEFAULT_WIDTH_AT_TWELFTH: f32 = 52.0;

/// An ordered sequence of open-string pitches, one per string.
///
/// String index 0 is the highest-pitched string, matching the top string of
/// a right-handed diagram.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tuning {
    notes: Vec<Note>,
}

impl Tuning {
    /// Creates a tuning from an ordered list of open-string pitches.
    pub fn new(notes: Vec<Note>) -> Self {
        Self { notes }
    }

    /// Standard six-string guitar tuning: E4 B3 G3 D3 A2 E2.
    pub fn standard_guitar() -> Self {
        "E4,B3,G3,D3,A2,E2".parse().expect("valid builtin tuning")
    }

    /// Standard (high-G) ukulele tuning: A4 E4 C4 G4.
    pub fn standard_ukulele() -> Self {
        "A4,E4,C4,G4".parse().expect("valid builtin tuning")
    }

    /// Returns the number of strings in the tuning.
    pub fn len(&self) -> usize {
        self.notes.len()
    }

    /// Returns true if the tuning has no strings.
    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    /// Returns the open-string pitch for the given string index.
    pub fn note(&self, string: usize) -> Option<Note> {
        self.notes.get(string).copied()
    }

    /// Returns the open-string pitches in string order.
    pub fn notes(&self) -> &[Note] {
        &self.notes
    }
}

impl FromStr for Tuning {
    type Err = PitchError;

    /// Parses a comma- or whitespace-separated list of notes, e.g.
    /// `"E4,B3,G3,D3,A2,E2"` or `"D4 A3 D3 G2"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let notes = s
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|part| !part.is_empty())
            .map(str::parse)
            .collect::<Result<Vec<Note>, _>>()?;
        Ok(Self { notes })
    }
}

impl fmt::Display for Tuning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, note) in self.notes.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{note}")?;
        }
        Ok(())
    }
}

/// Which fret positions carry inlay dots.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum InlayPattern {
    /// Single dots at 3, 5, 7, 9, 15, 17, 19, 21; double dots at 12 and 24.
    #[default]
    Guitar,
    /// Single dots at 5, 10, 15, 17; double dots at 7 and 12.
    Ukulele,
    /// No inlay dots.
    None,
}

impl InlayPattern {
    /// Frets that carry a single center dot.
    pub fn single_dot_frets(self) -> &'static [u32] {
        match self {
            Self::Guitar => &[3, 5, 7, 9, 15, 17, 19, 21],
            Self::Ukulele => &[5, 10, 15, 17],
            Self::None => &[],
        }
    }

    /// Frets that carry a double dot.
    pub fn double_dot_frets(self) -> &'static [u32] {
        match self {
            Self::Guitar => &[12, 24],
            Self::Ukulele => &[7, 12],
            Self::None => &[],
        }
    }
}

impl FromStr for InlayPattern {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "guitar" => Ok(Self::Guitar),
            "ukulele" => Ok(Self::Ukulele),
            "none" => Ok(Self::None),
            _ => Err(format!(
                "invalid inlay pattern `{s}`, valid values: guitar, ukulele, none"
            )),
        }
    }
}

/// A validated instrument layout.
///
/// Construct through [`Instrument::builder`]; the builder rejects parameter
/// combinations that violate the layout invariants with a [`ConfigError`].
#[derive(Debug, Clone)]
pub struct Instrument {
    strings: usize,
    frets: u32,
    start_fret: u32,
    tuning: Tuning,
    left_handed: bool,
    prefer_flats: bool,
    title: Option<String>,
    scale_length: f32,
    width_at_nut: f32,
    width_at_twelfth: f32,
    inlays: InlayPattern,
}

impl Instrument {
    /// Returns a builder preloaded with a standard six-string guitar.
    pub fn builder() -> InstrumentBuilder {
        InstrumentBuilder::new()
    }

    /// Returns the number of strings.
    pub fn strings(&self) -> usize {
        self.strings
    }

    /// Returns the number of frets in the rendered window.
    pub fn frets(&self) -> u32 {
        self.frets
    }

    /// Returns the starting fret of the rendered window (0 = full neck from
    /// the nut).
    pub fn start_fret(&self) -> u32 {
        self.start_fret
    }

    /// Returns the tuning.
    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    /// Returns true for a left-handed (string-order mirrored) diagram.
    pub fn left_handed(&self) -> bool {
        self.left_handed
    }

    /// Returns true if note names are spelled with flats instead of sharps.
    pub fn prefer_flats(&self) -> bool {
        self.prefer_flats
    }

    /// Returns the diagram title, if any.
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Returns the scale length in millimeters.
    pub fn scale_length(&self) -> f32 {
        self.scale_length
    }

    /// Returns the neck width at the nut in millimeters.
    pub fn width_at_nut(&self) -> f32 {
        self.width_at_nut
    }

    /// Returns the neck width at the twelfth fret in millimeters.
    pub fn width_at_twelfth(&self) -> f32 {
        self.width_at_twelfth
    }

    /// Returns the inlay dot pattern.
    pub fn inlays(&self) -> InlayPattern {
        self.inlays
    }

    /// Returns the highest markable fret.
    pub fn last_fret(&self) -> u32 {
        self.start_fret + self.frets
    }

    /// Returns the pitch sounded by fretting the given string at the given
    /// fret (fret 0 is the open string).
    pub fn sounding_note(&self, string: usize, fret: u32) -> Option<Note> {
        Some(self.tuning.note(string)?.transpose(fret as i32))
    }

    /// Returns true if the fret is a markable position: the open string, or
    /// a fret slot inside the rendered window.
    pub fn is_markable_fret(&self, fret: u32) -> bool {
        fret == 0 || (fret > self.start_fret && fret <= self.last_fret())
    }

    /// Iterates over all markable frets on a string, open string first.
    pub fn markable_frets(&self) -> impl Iterator<Item = u32> + use<> {
        std::iter::once(0).chain(self.start_fret + 1..=self.last_fret())
    }

    /// Validates a marker position against the layout bounds.
    pub fn validate_position(&self, string: usize, fret: u32) -> Result<(), OutOfRangeError> {
        if string >= self.strings {
            return Err(OutOfRangeError::String {
                index: string,
                count: self.strings,
            });
        }
        if !self.is_markable_fret(fret) {
            return Err(OutOfRangeError::Fret {
                fret,
                min: self.start_fret + 1,
                max: self.last_fret(),
            });
        }
        Ok(())
    }
}

/// Builder for [`Instrument`] values.
///
/// Defaults describe a right-handed six-string guitar in standard tuning
/// with twelve frets from the nut.
#[derive(Debug, Clone)]
pub struct InstrumentBuilder {
    strings: Option<usize>,
    frets: u32,
    start_fret: u32,
    tuning: Tuning,
    left_handed: bool,
    prefer_flats: bool,
    title: Option<String>,
    scale_length: f32,
    width_at_nut: f32,
    width_at_twelfth: f32,
    inlays: InlayPattern,
}

impl Default for InstrumentBuilder {
    fn default() -> Self {
        Self {
            strings: None,
            frets: 12,
            start_fret: 0,
            tuning: Tuning::standard_guitar(),
            left_handed: false,
            prefer_flats: false,
            title: None,
            scale_length: DEFAULT_SCALE_LENGTH,
            width_at_nut: DEFAULT_WIDTH_AT_NUT,
            width_at_twelfth: DEFAULT_WIDTH_AT_TWELFTH,
            inlays: InlayPattern::default(),
        }
    }
}

impl InstrumentBuilder {
    /// Creates a builder with default (standard guitar) settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the string count explicitly.
    ///
    /// When not set, the string count is taken from the tuning length.
    pub fn with_strings(mut self, strings: usize) -> Self {
        self.strings = Some(strings);
        self
    }

    /// Sets the number of frets in the rendered window.
    pub fn with_frets(mut self, frets: u32) -> Self {
        self.frets = frets;
        self
    }

    /// Sets the starting fret for a chord-window diagram.
    pub fn with_start_fret(mut self, start_fret: u32) -> Self {
        self.start_fret = start_fret;
        self
    }

    /// Sets the tuning.
    pub fn with_tuning(mut self, tuning: Tuning) -> Self {
        self.tuning = tuning;
        self
    }

    /// Sets left-handed rendering.
    pub fn with_left_handed(mut self, left_handed: bool) -> Self {
        self.left_handed = left_handed;
        self
    }

    /// Sets flat-preferring note spelling.
    pub fn with_prefer_flats(mut self, prefer_flats: bool) -> Self {
        self.prefer_flats = prefer_flats;
        self
    }

    /// Sets the diagram title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets the scale length in millimeters.
    pub fn with_scale_length(mut self, scale_length: f32) -> Self {
        self.scale_length = scale_length;
        self
    }

    /// Sets the neck widths at the nut and at the twelfth fret, in
    /// millimeters.
    pub fn with_neck_widths(mut self, at_nut: f32, at_twelfth: f32) -> Self {
        self.width_at_nut = at_nut;
        self.width_at_twelfth = at_twelfth;
        self
    }

    /// Sets the inlay dot pattern.
    pub fn with_inlays(mut self, inlays: InlayPattern) -> Self {
        self.inlays = inlays;
        self
    }

    /// Validates the parameters and builds the instrument.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] when the tuning length does not match the
    /// string count, when the string or fret count is zero, or when the
    /// physical dimensions are degenerate.
    pub fn build(self) -> Result<Instrument, ConfigError> {
        let strings = self.strings.unwrap_or(self.tuning.len());

        if strings == 0 {
            return Err(ConfigError::NoStrings);
        }
        if self.tuning.len() != strings {
            return Err(ConfigError::TuningMismatch {
                strings,
                tuning_len: self.tuning.len(),
            });
        }
        if self.frets == 0 {
            return Err(ConfigError::NoFrets);
        }
        if self.scale_length <= 0.0 {
            return Err(ConfigError::ScaleLength(self.scale_length));
        }
        if self.width_at_twelfth <= self.width_at_nut || self.width_at_nut <= 0.0 {
            return Err(ConfigError::NeckTaper {
                nut: self.width_at_nut,
                twelfth: self.width_at_twelfth,
            });
        }

        Ok(Instrument {
            strings,
            frets: self.frets,
            start_fret: self.start_fret,
            tuning: self.tuning,
            left_handed: self.left_handed,
            prefer_flats: self.prefer_flats,
            title: self.title,
            scale_length: self.scale_length,
            width_at_nut: self.width_at_nut,
            width_at_twelfth: self.width_at_twelfth,
            inlays: self.inlays,
        })
    }
}

/// A highlighted (string, fret) position.
///
/// String indices are 0-based from the highest-pitched string; fret 0 marks
/// the open string. Label and color default to the sounding note's letter
/// and theme color when not set.
#[derive(Debug, Clone)]
pub struct Marker {
    string: usize,
    fret: u32,
    label: Option<String>,
    color: Option<Color>,
}

impl Marker {
    /// Creates a marker at the given position with default label and color.
    pub fn new(string: usize, fret: u32) -> Self {
        Self {
            string,
            fret,
            label: None,
            color: None,
        }
    }

    /// Overrides the rendered label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Overrides the rendered color.
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    /// Returns the 0-based string index.
    pub fn string(&self) -> usize {
        self.string
    }

    /// Returns the fret index (0 = open string).
    pub fn fret(&self) -> u32 {
        self.fret
    }

    /// Returns the label override, if set.
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Returns the color override, if set.
    pub fn color(&self) -> Option<Color> {
        self.color
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tuning_parse_comma_and_space_separated() {
        let comma: Tuning = "E4,B3,G3,D3,A2,E2".parse().unwrap();
        let spaced: Tuning = "E4 B3 G3 D3 A2 E2".parse().unwrap();
        assert_eq!(comma, spaced);
        assert_eq!(comma.len(), 6);
        assert_eq!(comma.note(0), Some("E4".parse().unwrap()));
        assert_eq!(comma.note(5), Some("E2".parse().unwrap()));
        assert_eq!(comma.note(6), None);
    }

    #[test]
    fn test_tuning_parse_rejects_bad_notes() {
        assert!("E4,X3".parse::<Tuning>().is_err());
    }

    #[test]
    fn test_tuning_display_round_trip() {
        let tuning = Tuning::standard_guitar();
        let reparsed: Tuning = tuning.to_string().parse().unwrap();
        assert_eq!(tuning, reparsed);
    }

    #[test]
    fn test_builder_defaults() {
        let instrument = Instrument::builder().build().unwrap();
        assert_eq!(instrument.strings(), 6);
        assert_eq!(instrument.frets(), 12);
        assert_eq!(instrument.start_fret(), 0);
        assert!(!instrument.left_handed());
        assert_eq!(instrument.scale_length(), DEFAULT_SCALE_LENGTH);
        assert_eq!(instrument.inlays(), InlayPattern::Guitar);
    }

    #[test]
    fn test_builder_rejects_tuning_mismatch() {
        let result = Instrument::builder().with_strings(7).build();
        assert!(matches!(
            result,
            Err(ConfigError::TuningMismatch {
                strings: 7,
                tuning_len: 6
            })
        ));
    }

    #[test]
    fn test_builder_rejects_short_tuning() {
        // A tuning shorter than the declared string count is a
        // configuration error
        let result = Instrument::builder()
            .with_strings(6)
            .with_tuning("E4,B3,G3".parse().unwrap())
            .build();
        assert!(matches!(result, Err(ConfigError::TuningMismatch { .. })));
    }

    #[test]
    fn test_builder_rejects_degenerate_parameters() {
        assert!(matches!(
            Instrument::builder()
                .with_tuning(Tuning::new(Vec::new()))
                .build(),
            Err(ConfigError::NoStrings)
        ));
        assert!(matches!(
            Instrument::builder().with_frets(0).build(),
            Err(ConfigError::NoFrets)
        ));
        assert!(matches!(
            Instrument::builder().with_scale_length(0.0).build(),
            Err(ConfigError::ScaleLength(_))
        ));
        assert!(matches!(
            Instrument::builder().with_neck_widths(52.0, 43.0).build(),
            Err(ConfigError::NeckTaper { .. })
        ));
    }

    #[test]
    fn test_sounding_note() {
        let instrument = Instrument::builder().build().unwrap();
        // Third fret on the high E string is a G4
        assert_eq!(
            instrument.sounding_note(0, 3),
            Some("G4".parse().unwrap())
        );
        // Open low E string
        assert_eq!(instrument.sounding_note(5, 0), Some("E2".parse().unwrap()));
        assert_eq!(instrument.sounding_note(6, 0), None);
    }

    #[test]
    fn test_validate_position_bounds() {
        let instrument = Instrument::builder().build().unwrap();
        assert!(instrument.validate_position(0, 0).is_ok());
        assert!(instrument.validate_position(5, 12).is_ok());

        assert!(matches!(
            instrument.validate_position(6, 0),
            Err(OutOfRangeError::String { index: 6, count: 6 })
        ));
        assert!(matches!(
            instrument.validate_position(0, 13),
            Err(OutOfRangeError::Fret { fret: 13, .. })
        ));
    }

    #[test]
    fn test_markable_frets_with_window() {
        let instrument = Instrument::builder()
            .with_start_fret(5)
            .with_frets(4)
            .build()
            .unwrap();

        // Open string stays markable; the anchor fret itself does not
        assert!(instrument.is_markable_fret(0));
        assert!(!instrument.is_markable_fret(5));
        assert!(instrument.is_markable_fret(6));
        assert!(instrument.is_markable_fret(9));
        assert!(!instrument.is_markable_fret(10));

        let frets: Vec<u32> = instrument.markable_frets().collect();
        assert_eq!(frets, vec![0, 6, 7, 8, 9]);
    }

    #[test]
    fn test_inlay_patterns() {
        assert!(InlayPattern::Guitar.single_dot_frets().contains(&3));
        assert!(InlayPattern::Guitar.double_dot_frets().contains(&12));
        assert!(InlayPattern::Ukulele.double_dot_frets().contains(&7));
        assert!(InlayPattern::None.single_dot_frets().is_empty());

        assert_eq!("guitar".parse::<InlayPattern>().unwrap(), InlayPattern::Guitar);
        assert!("celtic".parse::<InlayPattern>().is_err());
    }

    #[test]
    fn test_marker_builders() {
        let marker = Marker::new(2, 3)
            .with_label("root")
            .with_color(Color::new("red").unwrap());
        assert_eq!(marker.string(), 2);
        assert_eq!(marker.fret(), 3);
        assert_eq!(marker.label(), Some("root"));
        assert_eq!(marker.color(), Some(Color::new("red").unwrap()));
    }
}
