//! Command-line argument definitions for the Fretwork CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`], plus the [`MarkSpec`] mini-format used by the repeatable
//! `--mark` flag. Strings are numbered from 1 on the command line, starting
//! at the highest-pitched string.

use std::str::FromStr;

use clap::Parser;

use fretwork::instrument::InlayPattern;

/// Command-line arguments for the Fretwork fretboard diagram tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the output image (.svg or .png)
    #[arg(short, long, default_value = "out.svg")]
    pub output: String,

    /// Open-string tuning, highest string first, e.g. "E4,B3,G3,D3,A2,E2"
    #[arg(long, default_value = "E4,B3,G3,D3,A2,E2")]
    pub tuning: String,

    /// String count; defaults to the tuning length
    #[arg(long)]
    pub strings: Option<usize>,

    /// Number of frets in the rendered window
    #[arg(long, default_value_t = 12)]
    pub frets: u32,

    /// Starting fret for a chord-window diagram (0 = from the nut)
    #[arg(long, default_value_t = 0)]
    pub start_fret: u32,

    /// Render left-handed (reversed string order)
    #[arg(long)]
    pub lefty: bool,

    /// Diagram title
    #[arg(long)]
    pub title: Option<String>,

    /// Scale length in millimeters
    #[arg(long, default_value_t = fretwork::instrument::DEFAULT_SCALE_LENGTH)]
    pub scale_length: f32,

    /// Spell accidentals with flats instead of sharps
    #[arg(long)]
    pub prefer_flats: bool,

    /// Inlay dot pattern (guitar, ukulele, none)
    #[arg(long, default_value = "guitar")]
    pub inlays: InlayPattern,

    /// Mark a position: STRING:FRET[:LABEL[:COLOR]], strings numbered from 1
    #[arg(long = "mark")]
    pub marks: Vec<MarkSpec>,

    /// Mark every position sounding a note ("E4") or pitch class ("E")
    #[arg(long = "mark-note")]
    pub mark_notes: Vec<String>,

    /// Mark every natural note on every string
    #[arg(long)]
    pub mark_all: bool,

    /// Mark every chromatic note on every string
    #[arg(long)]
    pub mark_chromatic: bool,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

/// A parsed `--mark` value: `STRING:FRET[:LABEL[:COLOR]]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkSpec {
    /// 1-based string number.
    pub string: usize,
    /// Fret index, 0 for the open string.
    pub fret: u32,
    /// Optional label override.
    pub label: Option<String>,
    /// Optional CSS color override, parsed later.
    pub color: Option<String>,
}

impl FromStr for MarkSpec {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.splitn(4, ':');

        let string = parts
            .next()
            .filter(|part| !part.is_empty())
            .ok_or_else(|| format!("invalid mark `{s}`, expected STRING:FRET[:LABEL[:COLOR]]"))?
            .parse::<usize>()
            .map_err(|_| format!("invalid string number in mark `{s}`"))?;
        if string == 0 {
            return Err(format!(
                "invalid string number in mark `{s}`, strings are numbered from 1"
            ));
        }

        let fret = parts
            .next()
            .ok_or_else(|| format!("invalid mark `{s}`, expected STRING:FRET[:LABEL[:COLOR]]"))?
            .parse::<u32>()
            .map_err(|_| format!("invalid fret number in mark `{s}`"))?;

        let label = parts.next().filter(|part| !part.is_empty());
        let color = parts.next().filter(|part| !part.is_empty());

        Ok(Self {
            string,
            fret,
            label: label.map(str::to_string),
            color: color.map(str::to_string),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mark_spec_minimal() {
        let spec: MarkSpec = "2:3".parse().unwrap();
        assert_eq!(
            spec,
            MarkSpec {
                string: 2,
                fret: 3,
                label: None,
                color: None,
            }
        );
    }

    #[test]
    fn test_mark_spec_with_label_and_color() {
        let spec: MarkSpec = "1:0:root:#ff0000".parse().unwrap();
        assert_eq!(spec.string, 1);
        assert_eq!(spec.fret, 0);
        assert_eq!(spec.label.as_deref(), Some("root"));
        assert_eq!(spec.color.as_deref(), Some("#ff0000"));
    }

    #[test]
    fn test_mark_spec_empty_label_keeps_default() {
        let spec: MarkSpec = "4:5::blue".parse().unwrap();
        assert_eq!(spec.label, None);
        assert_eq!(spec.color.as_deref(), Some("blue"));
    }

    #[test]
    fn test_mark_spec_rejects_malformed() {
        assert!("".parse::<MarkSpec>().is_err());
        assert!("3".parse::<MarkSpec>().is_err());
        assert!("a:3".parse::<MarkSpec>().is_err());
        assert!("1:b".parse::<MarkSpec>().is_err());
        // Strings are numbered from 1 on the command line
        assert!("0:3".parse::<MarkSpec>().is_err());
    }

    #[test]
    fn test_args_parse_round_trip() {
        let args = Args::parse_from([
            "fretwork",
            "--output",
            "diagram.png",
            "--frets",
            "15",
            "--lefty",
            "--mark",
            "1:3",
            "--mark",
            "6:0",
            "--mark-note",
            "E",
            "--inlays",
            "ukulele",
        ]);

        assert_eq!(args.output, "diagram.png");
        assert_eq!(args.frets, 15);
        assert!(args.lefty);
        assert_eq!(args.marks.len(), 2);
        assert_eq!(args.mark_notes, vec!["E".to_string()]);
        assert_eq!(args.inlays, InlayPattern::Ukulele);
    }
}
