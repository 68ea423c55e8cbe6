//! Musical pitch parsing and arithmetic.
//!
//! This module provides the two pitch types the fretboard model works with:
//!
//! - [`Note`] - A concrete pitch identified by its MIDI number, parsed from
//!   strings such as `"A4"`, `"C#3"`, or `"Bb2"`.
//! - [`PitchClass`] - An octave-free note name such as `"E"` or `"F#"`, used
//!   for octave-independent position lookup across the neck.
//!
//! # Note string format
//!
//! A note string is a letter `A`-`G`, an optional accidental (`#` or `b`),
//! and an octave number. The MIDI mapping follows the convention where
//! `"A0"` is 21 and `"C4"` (middle C) is 60.
//!
//! # Examples
//!
//! ```
//! use fretwork_core::pitch::{Note, PitchClass};
//!
//! let e4: Note = "E4".parse().unwrap();
//! assert_eq!(e4.midi(), 64);
//!
//! // Fretting the 3rd fret on a string tuned to E4 sounds a G4
//! let g4 = e4.transpose(3);
//! assert_eq!(g4.to_string(), "G4");
//!
//! let e: PitchClass = "E".parse().unwrap();
//! assert!(e4.transpose(12).is_class(e));
//! ```

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Note spellings indexed by semitone within the octave, sharp-preferring.
const SHARP_NAMES: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

/// Note spellings indexed by semitone within the octave, flat-preferring.
const FLAT_NAMES: [&str; 12] = [
    "C", "Db", "D", "Eb", "E", "F", "Gb", "G", "Ab", "A", "Bb", "B",
];

/// Errors produced when parsing pitch strings.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PitchError {
    /// The string is not a valid note with an octave.
    #[error("invalid note `{0}`: expected a letter A-G, an optional # or b, and an octave (e.g. `E4`, `Bb2`)")]
    InvalidNote(String),

    /// The string is not a valid octave-free note name.
    #[error("invalid pitch class `{0}`: expected a letter A-G with an optional # or b (e.g. `E`, `C#`)")]
    InvalidPitchClass(String),
}

/// Returns the semitone offset from C for a note letter, if valid.
fn letter_offset(letter: char) -> Option<i32> {
    match letter {
        'C' => Some(0),
        'D' => Some(2),
        'E' => Some(4),
        'F' => Some(5),
        'G' => Some(7),
        'A' => Some(9),
        'B' => Some(11),
        _ => None,
    }
}

/// Parses a letter plus optional accidental, returning the semitone offset
/// from C and the number of characters consumed.
fn parse_class_prefix(s: &str) -> Option<(i32, usize)> {
    let mut chars = s.chars();
    let offset = letter_offset(chars.next()?)?;
    match chars.next() {
        Some('#') => Some((offset + 1, 2)),
        Some('b') => Some((offset - 1, 2)),
        _ => Some((offset, 1)),
    }
}

/// An octave-free note name.
///
/// A pitch class identifies one of the twelve equal-tempered semitones
/// within an octave, without committing to a register. `C` is 0, `B` is 11.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PitchClass {
    semitone: u8,
}

impl PitchClass {
    /// Creates a pitch class from a semitone index, wrapping into 0..12.
    pub fn from_semitone(semitone: i32) -> Self {
        Self {
            semitone: semitone.rem_euclid(12) as u8,
        }
    }

    /// Returns the semitone index within the octave (0..12, C = 0).
    pub fn semitone(self) -> u8 {
        self.semitone
    }

    /// Returns the spelled name of this pitch class.
    pub fn name(self, prefer_flats: bool) -> &'static str {
        let names = if prefer_flats { FLAT_NAMES } else { SHARP_NAMES };
        names[self.semitone as usize]
    }

    /// Returns true if this pitch class is spelled with an accidental.
    pub fn is_accidental(self) -> bool {
        matches!(self.semitone, 1 | 3 | 6 | 8 | 10)
    }

    /// The seven natural pitch classes (A through G).
    pub fn naturals() -> impl Iterator<Item = PitchClass> {
        [9, 11, 0, 2, 4, 5, 7].into_iter().map(Self::from_semitone)
    }

    /// All twelve pitch classes, naturals first, then sharps.
    pub fn chromatic() -> impl Iterator<Item = PitchClass> {
        Self::naturals().chain([10, 1, 3, 6, 8].into_iter().map(Self::from_semitone))
    }
}

impl FromStr for PitchClass {
    type Err = PitchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match parse_class_prefix(s) {
            Some((offset, consumed)) if consumed == s.len() => Ok(Self::from_semitone(offset)),
            _ => Err(PitchError::InvalidPitchClass(s.to_string())),
        }
    }
}

impl fmt::Display for PitchClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name(false))
    }
}

/// A concrete musical pitch, identified by its MIDI number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Note {
    midi: i32,
}

impl Note {
    /// Creates a note directly from a MIDI number.
    pub fn from_midi(midi: i32) -> Self {
        Self { midi }
    }

    /// Returns the MIDI number of this note.
    pub fn midi(self) -> i32 {
        self.midi
    }

    /// Returns the note transposed by the given number of semitones.
    ///
    /// Fretting a string at fret `n` transposes its open pitch up by `n`.
    pub fn transpose(self, semitones: i32) -> Self {
        Self {
            midi: self.midi + semitones,
        }
    }

    /// Returns the pitch class of this note.
    pub fn pitch_class(self) -> PitchClass {
        PitchClass::from_semitone(self.midi)
    }

    /// Returns true if this note belongs to the given pitch class.
    pub fn is_class(self, class: PitchClass) -> bool {
        self.pitch_class() == class
    }

    /// Returns true if the two notes are octaves of each other (or equal).
    pub fn is_octave_of(self, other: Note) -> bool {
        self.pitch_class() == other.pitch_class()
    }

    /// Returns the octave number, where MIDI 12 is the start of octave 0.
    pub fn octave(self) -> i32 {
        self.midi.div_euclid(12) - 1
    }

    /// Returns true if the note is spelled with an accidental.
    pub fn is_accidental(self) -> bool {
        self.pitch_class().is_accidental()
    }

    /// Returns the spelled name without the octave, e.g. `"Bb"`.
    pub fn letter(self, prefer_flats: bool) -> &'static str {
        self.pitch_class().name(prefer_flats)
    }

    /// Returns the full spelled name including the octave, e.g. `"Bb0"`.
    pub fn name(self, prefer_flats: bool) -> String {
        format!("{}{}", self.letter(prefer_flats), self.octave())
    }
}

impl FromStr for Note {
    type Err = PitchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (offset, consumed) =
            parse_class_prefix(s).ok_or_else(|| PitchError::InvalidNote(s.to_string()))?;
        let octave: i32 = s[consumed..]
            .parse()
            .map_err(|_| PitchError::InvalidNote(s.to_string()))?;

        Ok(Self {
            midi: 12 + octave * 12 + offset,
        })
    }
}

impl fmt::Display for Note {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name(false))
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn test_note_parse_matches_midi_convention() {
        assert_eq!("A0".parse::<Note>().unwrap().midi(), 21);
        assert_eq!("C4".parse::<Note>().unwrap().midi(), 60);
        assert_eq!("E4".parse::<Note>().unwrap().midi(), 64);
        assert_eq!("E2".parse::<Note>().unwrap().midi(), 40);
    }

    #[test]
    fn test_note_parse_accidentals() {
        assert_eq!("A#0".parse::<Note>().unwrap().midi(), 22);
        assert_eq!("Bb0".parse::<Note>().unwrap().midi(), 22);
        assert_eq!("Db3".parse::<Note>().unwrap(), "C#3".parse::<Note>().unwrap());
    }

    #[test]
    fn test_note_parse_rejects_malformed() {
        for bad in ["H4", "A", "#4", "Ax4", "A4x", "", "4"] {
            assert!(bad.parse::<Note>().is_err(), "expected `{bad}` to fail");
        }
    }

    #[test]
    fn test_note_display_spelling() {
        let note = Note::from_midi(22);
        assert_eq!(note.name(true), "Bb0");
        assert_eq!(note.name(false), "A#0");
        assert_eq!(note.to_string(), "A#0");
    }

    #[test]
    fn test_note_parse_format_round_trip() {
        for name in ["C0", "E2", "A2", "D3", "G3", "B3", "E4", "F#5", "Bb1"] {
            let note: Note = name.parse().unwrap();
            let spelled = note.name(name.contains('b'));
            assert_eq!(spelled, name);
        }
    }

    #[test]
    fn test_note_transpose_and_octaves() {
        let e2: Note = "E2".parse().unwrap();
        assert_eq!(e2.transpose(12), "E3".parse().unwrap());
        assert!(e2.is_octave_of("E4".parse().unwrap()));
        assert!(!e2.is_octave_of("F4".parse().unwrap()));
    }

    #[test]
    fn test_note_is_accidental() {
        assert!("C#4".parse::<Note>().unwrap().is_accidental());
        assert!("Bb2".parse::<Note>().unwrap().is_accidental());
        assert!(!"G3".parse::<Note>().unwrap().is_accidental());
    }

    #[test]
    fn test_pitch_class_parse() {
        assert_eq!("E".parse::<PitchClass>().unwrap().semitone(), 4);
        assert_eq!("C#".parse::<PitchClass>().unwrap().semitone(), 1);
        assert_eq!("Bb".parse::<PitchClass>().unwrap().semitone(), 10);

        for bad in ["E4", "h", "", "bb", "C##"] {
            assert!(bad.parse::<PitchClass>().is_err(), "expected `{bad}` to fail");
        }
    }

    #[test]
    fn test_pitch_class_sets() {
        assert_eq!(PitchClass::naturals().count(), 7);
        assert_eq!(PitchClass::chromatic().count(), 12);
        assert!(PitchClass::naturals().all(|class| !class.is_accidental()));
    }

    proptest! {
        #[test]
        fn prop_note_name_round_trips(midi in 12i32..=127) {
            let note = Note::from_midi(midi);
            for prefer_flats in [false, true] {
                let reparsed: Note = note.name(prefer_flats).parse().unwrap();
                prop_assert_eq!(reparsed, note);
            }
        }
    }

    #[test]
    fn test_pitch_class_membership() {
        let e: PitchClass = "E".parse().unwrap();
        let open: Note = "E2".parse().unwrap();
        assert!(open.is_class(e));
        assert!(open.transpose(24).is_class(e));
        assert!(!open.transpose(1).is_class(e));
    }
}
