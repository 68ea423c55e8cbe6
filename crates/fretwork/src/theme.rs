//! Color themes for rendered diagrams.
//!
//! A [`Theme`] is a closed mapping from diagram element kinds to typed
//! [`Color`] values: one color per structural element (background, frets,
//! strings, inlays, title) plus one per note letter A-G. Accidentals share
//! the color of their spelled letter, so `C#` uses C's color and `Bb` uses
//! B's.
//!
//! Themes are resolved from the style section of the application
//! configuration at construction time; there is no process-global mutable
//! color state.

use fretwork_core::color::Color;
use fretwork_core::pitch::PitchClass;

/// Default palette entries, as (element, CSS color) pairs.
const DEFAULT_BACKGROUND: &str = "white";
const DEFAULT_LINES: &str = "#333333";
const DEFAULT_NOTE_COLORS: [&str; 7] = [
    "#b50000", // A
    "#0050a5", // B
    "#00a504", // C
    "#00ccf1", // D
    "#d5a000", // E
    "#acacac", // F
    "#5a0093", // G
];

/// A closed mapping from element kinds to colors.
#[derive(Debug, Clone)]
pub struct Theme {
    background: Color,
    frets: Color,
    strings: Color,
    inlays: Color,
    title: Color,
    /// Note letter colors, indexed A through G.
    notes: [Color; 7],
}

impl Theme {
    /// Returns the diagram background color.
    pub fn background(&self) -> Color {
        self.background
    }

    /// Returns the fret line color.
    pub fn frets(&self) -> Color {
        self.frets
    }

    /// Returns the string line color (also used for tuning labels).
    pub fn strings(&self) -> Color {
        self.strings
    }

    /// Returns the inlay dot color.
    pub fn inlays(&self) -> Color {
        self.inlays
    }

    /// Returns the title color.
    pub fn title(&self) -> Color {
        self.title
    }

    /// Returns the color for a note letter, `'A'` through `'G'`.
    pub fn note_letter(&self, letter: char) -> Option<Color> {
        if letter.is_ascii_uppercase() && ('A'..='G').contains(&letter) {
            Some(self.notes[(letter as u8 - b'A') as usize])
        } else {
            None
        }
    }

    /// Returns the color for a pitch class.
    ///
    /// The color follows the spelled letter, so the flat preference decides
    /// whether `A#`/`Bb` takes A's or B's color.
    pub fn note_color(&self, class: PitchClass, prefer_flats: bool) -> Color {
        let letter = class
            .name(prefer_flats)
            .chars()
            .next()
            .expect("pitch class names are non-empty");
        self.note_letter(letter)
            .expect("pitch class names start with A-G")
    }

    pub(crate) fn set_background(&mut self, color: Color) {
        self.background = color;
    }

    pub(crate) fn set_frets(&mut self, color: Color) {
        self.frets = color;
    }

    pub(crate) fn set_strings(&mut self, color: Color) {
        self.strings = color;
    }

    pub(crate) fn set_inlays(&mut self, color: Color) {
        self.inlays = color;
    }

    pub(crate) fn set_title(&mut self, color: Color) {
        self.title = color;
    }

    pub(crate) fn set_note_letter(&mut self, letter: char, color: Color) {
        debug_assert!(('A'..='G').contains(&letter));
        self.notes[(letter as u8 - b'A') as usize] = color;
    }
}

impl Default for Theme {
    fn default() -> Self {
        let parse = |s: &str| Color::new(s).expect("valid builtin color");
        Self {
            background: parse(DEFAULT_BACKGROUND),
            frets: parse(DEFAULT_LINES),
            strings: parse(DEFAULT_LINES),
            inlays: parse(DEFAULT_LINES),
            title: parse(DEFAULT_LINES),
            notes: DEFAULT_NOTE_COLORS.map(parse),
        }
    }
}
