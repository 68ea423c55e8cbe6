//! Example: Rendering a chord-window diagram
//!
//! This example builds a small C-shape chord chart anchored at the third
//! fret and writes it next to a full-neck diagram of every E on the board.

use fretwork::{
    Fretboard,
    config::AppConfig,
    instrument::{Instrument, Marker},
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // A four-fret window starting at the third fret
    let instrument = Instrument::builder()
        .with_start_fret(3)
        .with_frets(4)
        .with_title("C shape at the third fret")
        .build()?;

    let mut chord = Fretboard::new(instrument, AppConfig::default())?;
    chord.mark_with(Marker::new(1, 5).with_label("R"))?;
    chord.mark(2, 5)?;
    chord.mark(3, 5)?;
    chord.export("chord.svg")?;
    println!("Wrote chord.svg");

    // A full neck with every E highlighted
    let instrument = Instrument::builder()
        .with_frets(15)
        .with_title("Every E on the neck")
        .build()?;

    let mut neck = Fretboard::new(instrument, AppConfig::default())?;
    neck.mark_pitch_class("E".parse()?, None)?;
    neck.export("every-e.png")?;
    println!("Wrote every-e.png");

    Ok(())
}
