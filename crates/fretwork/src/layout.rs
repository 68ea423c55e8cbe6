//! Layout engine: instrument parameters to diagram coordinates.
//!
//! The [`Engine`] computes every position the exporter draws, in
//! millimeters, with the origin at the top-left of the canvas. Fret spacing
//! follows equal temperament: fret `n` sits at `scale * (1 - 2^(-n/12))`
//! from the nut, so spacing compresses toward the body. The neck tapers
//! linearly from the nut width to the twelfth-fret width.
//!
//! For chord-window diagrams (`start_fret > 0`) the anchor line is the
//! starting fret and all x positions are re-anchored to it; the window is
//! labeled with the first visible fret number.
//!
//! Left-handed rendering mirrors the string axis: string rows are reversed
//! top-to-bottom while the nut stays on the left. Mirroring twice restores
//! the original ordering.

use fretwork_core::color::Color;
use fretwork_core::draw::{Text, TextDefinition};
use fretwork_core::geometry::{Point, Size};

use crate::instrument::{Instrument, Marker};

/// Horizontal margin on each side of the canvas, in millimeters.
const WIDTH_MARGIN: f32 = 10.0;

/// Vertical margin above and below the board, in millimeters.
const HEIGHT_MARGIN: f32 = 10.0;

/// Height of the title band above the board, in millimeters.
const TITLE_BAND: f32 = 20.0;

/// Stroke width of fret lines, in millimeters.
const FRET_LINE_WIDTH: f32 = 0.75;

/// Gap between the nut and the tuning labels, in millimeters.
const LABEL_GAP: f32 = 2.5;

/// Ratio of the cleared area around a note letter to the letter itself.
const LETTER_MARGIN_RATIO: f32 = 1.25;

/// Inlay dot radius as a fraction of the scale length.
const INLAY_RADIUS_FACTOR: f32 = 0.004;

/// Font size of the fret-window label, in millimeters.
const WINDOW_LABEL_SIZE: f32 = 5.0;

/// A straight line with a stroke width.
#[derive(Debug, Clone, Copy)]
pub struct Line {
    start: Point,
    end: Point,
    width: f32,
}

impl Line {
    /// Returns the start point.
    pub fn start(&self) -> Point {
        self.start
    }

    /// Returns the end point.
    pub fn end(&self) -> Point {
        self.end
    }

    /// Returns the stroke width in millimeters.
    pub fn width(&self) -> f32 {
        self.width
    }
}

/// A filled dot.
#[derive(Debug, Clone, Copy)]
pub struct Dot {
    center: Point,
    radius: f32,
}

impl Dot {
    /// Returns the center point.
    pub fn center(&self) -> Point {
        self.center
    }

    /// Returns the radius in millimeters.
    pub fn radius(&self) -> f32 {
        self.radius
    }
}

/// A positioned piece of text.
#[derive(Debug, Clone)]
pub struct Label {
    position: Point,
    text: String,
    font_size: f32,
    bold: bool,
}

impl Label {
    /// Returns the center position of the label.
    pub fn position(&self) -> Point {
        self.position
    }

    /// Returns the label text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns the font size in millimeters.
    pub fn font_size(&self) -> f32 {
        self.font_size
    }

    /// Returns true if the label renders bold.
    pub fn bold(&self) -> bool {
        self.bold
    }
}

/// A resolved marker glyph: a note letter placed on the board.
#[derive(Debug, Clone)]
pub struct MarkerGlyph {
    position: Point,
    label: String,
    font_size: f32,
    letter: char,
    color: Option<Color>,
    open: bool,
}

impl MarkerGlyph {
    /// Returns the center position of the glyph.
    pub fn position(&self) -> Point {
        self.position
    }

    /// Returns the rendered label text.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Returns the font size in millimeters, already shrunk to fit the
    /// fret slot.
    pub fn font_size(&self) -> f32 {
        self.font_size
    }

    /// Returns the palette letter (`'A'`..=`'G'`) of the sounding note,
    /// which selects the theme color when no override is set.
    pub fn letter(&self) -> char {
        self.letter
    }

    /// Returns the color override, if any.
    pub fn color(&self) -> Option<Color> {
        self.color
    }

    /// Returns true for an open-string marker, rendered at the tuning
    /// label position instead of on a fret slot.
    pub fn open(&self) -> bool {
        self.open
    }
}

/// A computed diagram layout, ready for export.
#[derive(Debug)]
pub struct Layout {
    canvas: Size,
    frets: Vec<Line>,
    strings: Vec<Line>,
    inlays: Vec<Dot>,
    tuning_labels: Vec<Label>,
    markers: Vec<MarkerGlyph>,
    title: Option<Label>,
    window_label: Option<Label>,
}

impl Layout {
    /// Returns the canvas size in millimeters.
    pub fn canvas(&self) -> Size {
        self.canvas
    }

    /// Returns the fret lines, anchor line first.
    pub fn frets(&self) -> &[Line] {
        &self.frets
    }

    /// Returns the string lines in string-index order.
    pub fn strings(&self) -> &[Line] {
        &self.strings
    }

    /// Returns the inlay dots.
    pub fn inlays(&self) -> &[Dot] {
        &self.inlays
    }

    /// Returns the tuning labels at the nut.
    pub fn tuning_labels(&self) -> &[Label] {
        &self.tuning_labels
    }

    /// Returns the marker glyphs in insertion order.
    pub fn markers(&self) -> &[MarkerGlyph] {
        &self.markers
    }

    /// Returns the title label, if a title is set.
    pub fn title(&self) -> Option<&Label> {
        self.title.as_ref()
    }

    /// Returns the fret-window label for diagrams with a starting fret.
    pub fn window_label(&self) -> Option<&Label> {
        self.window_label.as_ref()
    }
}

/// Computes diagram layouts for one instrument.
pub struct Engine<'a> {
    instrument: &'a Instrument,
}

impl<'a> Engine<'a> {
    /// Creates a layout engine for the given instrument.
    pub fn new(instrument: &'a Instrument) -> Self {
        Self { instrument }
    }

    /// Returns the distance of a fret line from the nut, in millimeters.
    ///
    /// Equal-tempered spacing: each fret shortens the vibrating length by a
    /// factor of the twelfth root of two.
    pub fn fret_position(&self, fret: u32) -> f32 {
        let scale = self.instrument.scale_length();
        scale * (1.0 - (-(fret as f32) / 12.0).exp2())
    }

    /// Returns the distance of a fret slot (the spot between two fret
    /// lines where a finger or dot sits) from the nut, in millimeters.
    ///
    /// The slot is the equal-tempered midpoint of the fret, a quarter tone
    /// below the fret line itself. Only valid for `fret >= 1`.
    pub fn slot_position(&self, fret: u32) -> f32 {
        debug_assert!(fret >= 1);
        let scale = self.instrument.scale_length();
        scale * (1.0 - (-((2 * fret - 1) as f32) / 24.0).exp2())
    }

    /// Returns the neck width at the given distance from the nut, in
    /// millimeters.
    ///
    /// The taper is linear through the nut width at the nut and the
    /// twelfth-fret width at half the scale length.
    pub fn width_at(&self, distance: f32) -> f32 {
        let scale = self.instrument.scale_length();
        let nut = self.instrument.width_at_nut();
        let twelfth = self.instrument.width_at_twelfth();

        // Distance from the (virtual) apex of the tapered sides to the
        // twelfth fret
        let apex = twelfth * scale * 0.5 / (twelfth - nut);
        twelfth * (apex - scale * 0.5 + distance) / apex
    }

    /// Computes the full layout for the given markers.
    ///
    /// Marker positions are assumed valid; [`crate::Fretboard`] validates
    /// them when they are added.
    pub fn calculate(&self, markers: &[Marker]) -> Layout {
        let instrument = self.instrument;
        let strings = instrument.strings();
        let start = instrument.start_fret();
        let last = instrument.last_fret();

        let anchor = self.fret_position(start);
        let length = self.fret_position(last) - anchor;
        let end_width = self.width_at(self.fret_position(last));

        // Space reserved left of the nut for the tuning labels
        let gutter = ((1.0_f32 / 24.0).exp2() - 1.0) * length;
        let title_band = if instrument.title().is_some() {
            TITLE_BAND
        } else {
            0.0
        };

        let canvas = Size::new(
            length + 2.0 * WIDTH_MARGIN + gutter,
            end_width + 2.0 * HEIGHT_MARGIN + title_band,
        );
        let origin_x = WIDTH_MARGIN + gutter;
        let center_y = title_band + HEIGHT_MARGIN + end_width / 2.0;

        let geometry = BoardGeometry {
            engine: self,
            anchor,
            origin_x,
            center_y,
        };

        let label_font = 1.5 * instrument.width_at_nut() / strings as f32;

        let frets = self.fret_lines(&geometry);
        let string_lines = self.string_lines(&geometry);
        let inlays = self.inlay_dots(&geometry);
        let marker_glyphs = self.marker_glyphs(&geometry, markers, label_font);
        let tuning_labels = self.tuning_labels(&geometry, &marker_glyphs, label_font);
        let title = self.title_label(canvas);
        let window_label = self.window_label(&geometry);

        Layout {
            canvas,
            frets,
            strings: string_lines,
            inlays,
            tuning_labels,
            markers: marker_glyphs,
            title,
            window_label,
        }
    }

    /// Returns the vertical fraction (0 = top row) of a string, with
    /// left-handed layouts reversing the row order.
    fn string_fraction(&self, string: usize) -> f32 {
        let strings = self.instrument.strings();
        let fraction = if strings > 1 {
            string as f32 / (strings - 1) as f32
        } else {
            0.5
        };

        if self.instrument.left_handed() {
            1.0 - fraction
        } else {
            fraction
        }
    }

    fn fret_lines(&self, geometry: &BoardGeometry<'_, '_>) -> Vec<Line> {
        let start = self.instrument.start_fret();
        (start..=self.instrument.last_fret())
            .map(|fret| {
                let distance = self.fret_position(fret);
                let x = geometry.x_of(distance);
                let width = self.width_at(distance);
                Line {
                    start: Point::new(x, geometry.center_y - width / 2.0),
                    end: Point::new(x, geometry.center_y + width / 2.0),
                    width: FRET_LINE_WIDTH,
                }
            })
            .collect()
    }

    fn string_lines(&self, geometry: &BoardGeometry<'_, '_>) -> Vec<Line> {
        let instrument = self.instrument;
        let strings = instrument.strings();
        let start_distance = self.fret_position(instrument.start_fret());
        let end_distance = self.fret_position(instrument.last_fret());

        (0..strings)
            .map(|string| {
                // Heavier gauge toward the low strings
                let gauge = 0.5 + 1.5 * string as f32 / strings as f32;
                Line {
                    start: Point::new(
                        geometry.x_of(start_distance),
                        geometry.string_y(string, start_distance),
                    ),
                    end: Point::new(
                        geometry.x_of(end_distance),
                        geometry.string_y(string, end_distance),
                    ),
                    width: gauge,
                }
            })
            .collect()
    }

    fn inlay_dots(&self, geometry: &BoardGeometry<'_, '_>) -> Vec<Dot> {
        let instrument = self.instrument;
        let radius = INLAY_RADIUS_FACTOR * instrument.scale_length();
        let quarter = instrument.width_at_nut() / 4.0;
        let in_window =
            |fret: u32| fret > instrument.start_fret() && fret <= instrument.last_fret();

        let mut dots = Vec::new();
        for &fret in instrument.inlays().single_dot_frets() {
            if in_window(fret) {
                let x = geometry.x_of(self.slot_position(fret));
                dots.push(Dot {
                    center: Point::new(x, geometry.center_y),
                    radius,
                });
            }
        }
        for &fret in instrument.inlays().double_dot_frets() {
            if in_window(fret) {
                let x = geometry.x_of(self.slot_position(fret));
                for offset in [-quarter, quarter] {
                    dots.push(Dot {
                        center: Point::new(x, geometry.center_y + offset),
                        radius,
                    });
                }
            }
        }
        dots
    }

    fn marker_glyphs(
        &self,
        geometry: &BoardGeometry<'_, '_>,
        markers: &[Marker],
        label_font: f32,
    ) -> Vec<MarkerGlyph> {
        markers
            .iter()
            .map(|marker| {
                let note = self
                    .instrument
                    .sounding_note(marker.string(), marker.fret())
                    .expect("markers are validated on insertion");
                let spelled = note.letter(self.instrument.prefer_flats());
                let letter = spelled.chars().next().expect("note letters are non-empty");
                let label = match marker.label() {
                    Some(label) => label.to_string(),
                    None => spelled.to_string(),
                };

                if marker.fret() == 0 {
                    // Open string: the glyph replaces the tuning label
                    let position =
                        geometry.label_position(marker.string(), &label, label_font);
                    MarkerGlyph {
                        position,
                        label,
                        font_size: label_font,
                        letter,
                        color: marker.color(),
                        open: true,
                    }
                } else {
                    let slot = self.slot_position(marker.fret());
                    let position = Point::new(
                        geometry.x_of(slot),
                        geometry.string_y(marker.string(), slot),
                    );

                    // Space available inside the slot, between the
                    // surrounding fret lines
                    let room = (2.0 * (slot - self.fret_position(marker.fret() - 1))
                        - 2.0 * FRET_LINE_WIDTH)
                        .max(0.5);
                    let font_size =
                        fitted_label_font(&label, label_font, room / LETTER_MARGIN_RATIO);

                    MarkerGlyph {
                        position,
                        label,
                        font_size,
                        letter,
                        color: marker.color(),
                        open: false,
                    }
                }
            })
            .collect()
    }

    fn tuning_labels(
        &self,
        geometry: &BoardGeometry<'_, '_>,
        markers: &[MarkerGlyph],
        label_font: f32,
    ) -> Vec<Label> {
        let instrument = self.instrument;
        let open_positions: Vec<f32> = markers
            .iter()
            .filter(|glyph| glyph.open)
            .map(|glyph| glyph.position.y())
            .collect();

        (0..instrument.strings())
            .filter_map(|string| {
                let text = instrument
                    .tuning()
                    .note(string)?
                    .letter(instrument.prefer_flats())
                    .to_string();
                let position = geometry.label_position(string, &text, label_font);

                // An open-string marker replaces the plain tuning label
                if open_positions
                    .iter()
                    .any(|&y| (y - position.y()).abs() < f32::EPSILON)
                {
                    return None;
                }

                Some(Label {
                    position,
                    text,
                    font_size: label_font,
                    bold: true,
                })
            })
            .collect()
    }

    fn title_label(&self, canvas: Size) -> Option<Label> {
        let text = self.instrument.title()?.to_string();
        let base_font = TITLE_BAND * 0.8;
        let font_size = fitted_title_font(&text, base_font, canvas.width() - 2.0 * WIDTH_MARGIN);

        Some(Label {
            position: Point::new(canvas.width() / 2.0, HEIGHT_MARGIN + TITLE_BAND / 2.0),
            text,
            font_size,
            bold: false,
        })
    }

    fn window_label(&self, geometry: &BoardGeometry<'_, '_>) -> Option<Label> {
        let start = self.instrument.start_fret();
        if start == 0 {
            return None;
        }

        let first_fret = start + 1;
        let slot = self.slot_position(first_fret);
        let board_bottom = geometry.center_y + self.width_at(slot) / 2.0;

        Some(Label {
            position: Point::new(geometry.x_of(slot), board_bottom + 4.0),
            text: format!("{first_fret}fr"),
            font_size: WINDOW_LABEL_SIZE,
            bold: false,
        })
    }
}

/// Resolved canvas-space anchors shared by the per-element passes.
struct BoardGeometry<'e, 'a> {
    engine: &'e Engine<'a>,
    anchor: f32,
    origin_x: f32,
    center_y: f32,
}

impl BoardGeometry<'_, '_> {
    /// Maps a distance-from-nut to a canvas x coordinate, re-anchored to
    /// the fret window.
    fn x_of(&self, distance: f32) -> f32 {
        self.origin_x + distance - self.anchor
    }

    /// Returns the y coordinate of a string at the given distance from the
    /// nut.
    fn string_y(&self, string: usize, distance: f32) -> f32 {
        let width = self.engine.width_at(distance);
        self.center_y + width * (self.engine.string_fraction(string) - 0.5)
    }

    /// Returns the center position of a nut-side label on the given string.
    fn label_position(&self, string: usize, text: &str, font_size: f32) -> Point {
        let mut definition = TextDefinition::new();
        definition.set_font_size(font_size);
        definition.set_bold(true);
        let width = Text::new(&definition, text).calculate_size().width();

        let start_distance = self.engine.fret_position(self.engine.instrument.start_fret());
        Point::new(
            self.origin_x - LABEL_GAP - width / 2.0,
            self.string_y(string, start_distance),
        )
    }
}

/// Shrinks a bold label font until the text fits `max_width`.
fn fitted_label_font(text: &str, font_size: f32, max_width: f32) -> f32 {
    let mut definition = TextDefinition::new();
    definition.set_font_size(font_size);
    definition.set_bold(true);
    Text::new(&definition, text).fitted_font_size(max_width)
}

/// Shrinks the title font until the text fits `max_width`.
fn fitted_title_font(text: &str, font_size: f32, max_width: f32) -> f32 {
    let mut definition = TextDefinition::new();
    definition.set_font_size(font_size);
    Text::new(&definition, text).fitted_font_size(max_width)
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;
    use proptest::prelude::*;

    use crate::instrument::{InlayPattern, Instrument, Marker, Tuning};

    use super::*;

    fn standard() -> Instrument {
        Instrument::builder().build().unwrap()
    }

    #[test]
    fn test_fret_position_endpoints() {
        let instrument = standard();
        let engine = Engine::new(&instrument);

        assert_approx_eq!(f32, engine.fret_position(0), 0.0);
        // The twelfth fret halves the vibrating length
        assert_approx_eq!(
            f32,
            engine.fret_position(12),
            instrument.scale_length() / 2.0,
            epsilon = 1e-3
        );
    }

    #[test]
    fn test_fret_spacing_strictly_decreases() {
        let instrument = standard();
        let engine = Engine::new(&instrument);

        let mut previous_gap = f32::MAX;
        for fret in 1..=24 {
            let gap = engine.fret_position(fret) - engine.fret_position(fret - 1);
            assert!(gap > 0.0);
            assert!(
                gap < previous_gap,
                "spacing must compress toward the body at fret {fret}"
            );
            previous_gap = gap;
        }
    }

    #[test]
    fn test_slot_sits_between_fret_lines() {
        let instrument = standard();
        let engine = Engine::new(&instrument);

        for fret in 1..=24 {
            let slot = engine.slot_position(fret);
            assert!(slot > engine.fret_position(fret - 1));
            assert!(slot < engine.fret_position(fret));
        }
    }

    #[test]
    fn test_width_taper_endpoints() {
        let instrument = standard();
        let engine = Engine::new(&instrument);

        assert_approx_eq!(
            f32,
            engine.width_at(0.0),
            instrument.width_at_nut(),
            epsilon = 1e-3
        );
        assert_approx_eq!(
            f32,
            engine.width_at(instrument.scale_length() / 2.0),
            instrument.width_at_twelfth(),
            epsilon = 1e-3
        );
    }

    #[test]
    fn test_line_counts_match_configuration() {
        let instrument = Instrument::builder()
            .with_tuning("A4,E4,C4,G4".parse().unwrap())
            .with_frets(15)
            .build()
            .unwrap();
        let layout = Engine::new(&instrument).calculate(&[]);

        assert_eq!(layout.frets().len(), 16);
        assert_eq!(layout.strings().len(), 4);
        assert_eq!(layout.tuning_labels().len(), 4);
    }

    #[test]
    fn test_single_string_renders_on_center_line() {
        let instrument = Instrument::builder()
            .with_tuning("E2".parse().unwrap())
            .build()
            .unwrap();
        let layout = Engine::new(&instrument).calculate(&[]);

        assert_eq!(layout.strings().len(), 1);
        let string = layout.strings()[0];
        let fret = layout.frets()[0];
        assert_approx_eq!(f32, string.start().y(), fret.start().midpoint(fret.end()).y());
    }

    #[test]
    fn test_window_reanchors_at_start_fret() {
        let full = Instrument::builder().build().unwrap();
        let windowed = Instrument::builder()
            .with_start_fret(5)
            .with_frets(4)
            .build()
            .unwrap();

        let full_engine = Engine::new(&full);
        let engine = Engine::new(&windowed);
        let layout = engine.calculate(&[]);

        assert_eq!(layout.frets().len(), 5);

        // The drawn board spans exactly pos(9) - pos(5)
        let drawn = layout.frets().last().unwrap().start().x() - layout.frets()[0].start().x();
        let expected = full_engine.fret_position(9) - full_engine.fret_position(5);
        assert_approx_eq!(f32, drawn, expected, epsilon = 1e-3);

        // The window is labeled with the first visible fret
        let label = layout.window_label().expect("windowed layouts are labeled");
        assert_eq!(label.text(), "6fr");

        assert!(Engine::new(&full).calculate(&[]).window_label().is_none());
    }

    #[test]
    fn test_left_handed_reverses_string_rows() {
        let righty = Instrument::builder().build().unwrap();
        let lefty = Instrument::builder().with_left_handed(true).build().unwrap();

        let righty_layout = Engine::new(&righty).calculate(&[]);
        let lefty_layout = Engine::new(&lefty).calculate(&[]);

        let n = righty.strings();
        for string in 0..n {
            assert_approx_eq!(
                f32,
                lefty_layout.strings()[string].start().y(),
                righty_layout.strings()[n - 1 - string].start().y()
            );
        }

        // Gauge travels with the string, so the thickest line moves to the top
        assert_approx_eq!(
            f32,
            lefty_layout.strings()[n - 1].width(),
            righty_layout.strings()[n - 1].width()
        );
        assert!(lefty_layout.strings()[n - 1].start().y() < lefty_layout.strings()[0].start().y());
    }

    #[test]
    fn test_marker_glyph_sits_on_slot_and_string() {
        let instrument = standard();
        let engine = Engine::new(&instrument);
        let layout = engine.calculate(&[Marker::new(0, 3)]);

        assert_eq!(layout.markers().len(), 1);
        let glyph = &layout.markers()[0];
        assert_eq!(glyph.label(), "G");
        assert!(!glyph.open());

        // Between the x positions of fret lines 2 and 3
        let x2 = layout.frets()[2].start().x();
        let x3 = layout.frets()[3].start().x();
        assert!(glyph.position().x() > x2 && glyph.position().x() < x3);

        // On the first string's row
        let string = layout.strings()[0];
        assert!(glyph.position().y() <= string.start().y().max(string.end().y()));
        assert!(glyph.position().y() >= string.start().y().min(string.end().y()));
    }

    #[test]
    fn test_open_marker_replaces_tuning_label() {
        let instrument = standard();
        let layout = Engine::new(&instrument).calculate(&[Marker::new(0, 0)]);

        let glyph = &layout.markers()[0];
        assert!(glyph.open());
        assert_eq!(glyph.label(), "E");

        // The marked string no longer carries a plain tuning label
        assert_eq!(layout.tuning_labels().len(), instrument.strings() - 1);

        // Open markers sit left of the nut
        assert!(glyph.position().x() < layout.frets()[0].start().x());
    }

    #[test]
    fn test_marker_font_shrinks_in_high_frets() {
        let instrument = Instrument::builder().with_frets(24).build().unwrap();
        let layout = Engine::new(&instrument)
            .calculate(&[Marker::new(0, 1), Marker::new(0, 24)]);

        let low = &layout.markers()[0];
        let high = &layout.markers()[1];
        assert!(high.font_size() <= low.font_size());
    }

    #[test]
    fn test_marker_label_and_color_overrides() {
        let instrument = standard();
        let marker = Marker::new(2, 1)
            .with_label("root")
            .with_color(Color::new("red").unwrap());
        let layout = Engine::new(&instrument).calculate(&[marker]);

        let glyph = &layout.markers()[0];
        assert_eq!(glyph.label(), "root");
        assert_eq!(glyph.color(), Some(Color::new("red").unwrap()));
    }

    #[test]
    fn test_flat_spelling_in_labels() {
        let instrument = Instrument::builder().with_prefer_flats(true).build().unwrap();
        // First fret on the A2 string is an A#/Bb
        let layout = Engine::new(&instrument).calculate(&[Marker::new(4, 1)]);
        assert_eq!(layout.markers()[0].label(), "Bb");
    }

    #[test]
    fn test_guitar_inlays_in_twelve_fret_window() {
        let instrument = standard();
        let layout = Engine::new(&instrument).calculate(&[]);

        // Singles at 3, 5, 7, 9 plus a double at 12
        assert_eq!(layout.inlays().len(), 6);
    }

    #[test]
    fn test_inlay_patterns_respect_window() {
        let ukulele = Instrument::builder()
            .with_tuning(Tuning::standard_ukulele())
            .with_frets(12)
            .with_inlays(InlayPattern::Ukulele)
            .build()
            .unwrap();
        let layout = Engine::new(&ukulele).calculate(&[]);
        // Singles at 5, 10 plus doubles at 7 and 12
        assert_eq!(layout.inlays().len(), 6);

        let plain = Instrument::builder()
            .with_inlays(InlayPattern::None)
            .build()
            .unwrap();
        assert!(Engine::new(&plain).calculate(&[]).inlays().is_empty());
    }

    #[test]
    fn test_title_reserves_band_and_shrinks() {
        let untitled = Instrument::builder().build().unwrap();
        let titled = Instrument::builder()
            .with_title("Fretboard diagram")
            .build()
            .unwrap();

        let untitled_layout = Engine::new(&untitled).calculate(&[]);
        let titled_layout = Engine::new(&titled).calculate(&[]);

        assert!(untitled_layout.title().is_none());
        let title = titled_layout.title().unwrap();
        assert_eq!(title.text(), "Fretboard diagram");
        assert_approx_eq!(
            f32,
            titled_layout.canvas().height() - untitled_layout.canvas().height(),
            TITLE_BAND
        );

        let long = Instrument::builder()
            .with_title(
                "This is a very long title in order to show that the font \
                 is supposed to be smaller there",
            )
            .build()
            .unwrap();
        let long_layout = Engine::new(&long).calculate(&[]);
        assert!(long_layout.title().unwrap().font_size() < title.font_size());
    }

    proptest! {
        #[test]
        fn prop_fret_spacing_decreases(scale in 300.0f32..1000.0, fret in 2u32..24) {
            let instrument = Instrument::builder()
                .with_scale_length(scale)
                .with_frets(24)
                .build()
                .unwrap();
            let engine = Engine::new(&instrument);

            let previous = engine.fret_position(fret - 1) - engine.fret_position(fret - 2);
            let current = engine.fret_position(fret) - engine.fret_position(fret - 1);
            prop_assert!(current < previous);
        }

        #[test]
        fn prop_mirroring_is_an_involution(strings in 1usize..10) {
            let notes = vec!["E4".parse().unwrap(); strings];
            let righty = Instrument::builder()
                .with_tuning(Tuning::new(notes.clone()))
                .build()
                .unwrap();
            let lefty = Instrument::builder()
                .with_tuning(Tuning::new(notes))
                .with_left_handed(true)
                .build()
                .unwrap();

            let righty_engine = Engine::new(&righty);
            let lefty_engine = Engine::new(&lefty);

            for string in 0..strings {
                // Mirroring maps row i to row n-1-i; applying the map twice
                // restores the original ordering
                let mirrored = lefty_engine.string_fraction(string);
                let double_mirrored = 1.0 - mirrored;
                prop_assert!(
                    (double_mirrored - righty_engine.string_fraction(string)).abs() < 1e-6
                );
                prop_assert!(
                    (mirrored - righty_engine.string_fraction(strings - 1 - string)).abs() < 1e-6
                );
            }
        }
    }
}
