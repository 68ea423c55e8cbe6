//! SVG document assembly and file output.

use std::{fs::File, io::Write};

use log::{debug, error, info};
use svg::{Document, node::element as svg_element};

use fretwork_core::apply_stroke;
use fretwork_core::draw::{Drawable, LayeredOutput, RenderLayer, StrokeDefinition, Text, TextDefinition};
use fretwork_core::geometry::Insets;

use crate::{
    config::RenderOptions,
    export,
    layout::{Label, Layout},
    theme::Theme,
};

/// Ratio of the cleared background around a note letter to the letter size.
const MARKER_PADDING_RATIO: f32 = 0.125;

/// SVG exporter writing to a file path.
pub struct Svg {
    pub file_name: String,
}

impl Svg {
    pub fn new(file_name: &str) -> Self {
        Self {
            file_name: file_name.to_string(),
        }
    }

    /// Writes an SVG document to the configured file.
    pub fn write_document(&self, doc: Document) -> Result<(), export::Error> {
        info!(file_name = self.file_name; "Creating SVG file");
        let f = match File::create(&self.file_name) {
            Ok(file) => file,
            Err(err) => {
                error!(file_name = self.file_name, err:err; "Failed to create SVG file");
                return Err(export::Error::Io(err));
            }
        };

        if let Err(err) = write!(&f, "{doc}") {
            error!(file_name = self.file_name, err:err; "Failed to write SVG content");
            return Err(export::Error::Io(err));
        }

        Ok(())
    }
}

impl export::Exporter for Svg {
    fn export_layout(
        &self,
        layout: &Layout,
        theme: &Theme,
        options: &RenderOptions,
    ) -> Result<(), export::Error> {
        let doc = document(layout, theme, options);
        debug!("SVG document rendered");

        self.write_document(doc)
    }
}

/// Assembles the SVG document for a computed layout.
///
/// The viewBox is in millimeters; the pixel dimensions come from the
/// configured pixels-per-millimeter scale. Serialization is deterministic:
/// the same layout, theme, and options produce a byte-identical document.
pub(crate) fn document(layout: &Layout, theme: &Theme, options: &RenderOptions) -> Document {
    let canvas = layout.canvas();
    let pixel_size = canvas.scale(options.pixels_per_mm());

    let mut doc = Document::new()
        .set(
            "viewBox",
            format!("0 0 {} {}", canvas.width(), canvas.height()),
        )
        .set("width", pixel_size.width())
        .set("height", pixel_size.height());

    let mut output = LayeredOutput::new();

    // Background fill
    let background = svg_element::Rectangle::new()
        .set("x", 0)
        .set("y", 0)
        .set("width", canvas.width())
        .set("height", canvas.height())
        .set("fill", theme.background().to_string())
        .set("fill-opacity", theme.background().alpha());
    output.add_to_layer(RenderLayer::Background, Box::new(background));

    // Inlay dots
    for dot in layout.inlays() {
        let circle = svg_element::Circle::new()
            .set("cx", dot.center().x())
            .set("cy", dot.center().y())
            .set("r", dot.radius())
            .set("fill", theme.inlays().to_string())
            .set("fill-opacity", theme.inlays().alpha());
        output.add_to_layer(RenderLayer::Inlay, Box::new(circle));
    }

    // Fret lines
    for line in layout.frets() {
        let stroke = StrokeDefinition::new(theme.frets(), line.width());
        let element = svg_element::Line::new()
            .set("x1", line.start().x())
            .set("y1", line.start().y())
            .set("x2", line.end().x())
            .set("y2", line.end().y());
        let element = apply_stroke!(element, &stroke);
        output.add_to_layer(RenderLayer::Fret, Box::new(element));
    }

    // String lines
    for line in layout.strings() {
        let stroke = StrokeDefinition::new(theme.strings(), line.width());
        let element = svg_element::Line::new()
            .set("x1", line.start().x())
            .set("y1", line.start().y())
            .set("x2", line.end().x())
            .set("y2", line.end().y());
        let element = apply_stroke!(element, &stroke);
        output.add_to_layer(RenderLayer::String, Box::new(element));
    }

    // Tuning labels
    for label in layout.tuning_labels() {
        let definition = label_definition(label, theme.strings());
        output.merge(Text::new(&definition, label.text()).render_to_layers(label.position()));
    }

    // Note markers
    for glyph in layout.markers() {
        let color = glyph
            .color()
            .or_else(|| theme.note_letter(glyph.letter()))
            .unwrap_or_else(|| theme.strings());

        let mut definition = TextDefinition::new();
        definition.set_font_size(glyph.font_size());
        definition.set_bold(true);
        definition.set_color(Some(color));

        if !glyph.open() {
            // Mask the string line beneath the letter
            definition.set_background_color(Some(theme.background()));
            definition.set_background_layer(RenderLayer::Marker);
            definition.set_padding(Insets::uniform(glyph.font_size() * MARKER_PADDING_RATIO));
        }

        output.merge(Text::new(&definition, glyph.label()).render_to_layers(glyph.position()));
    }

    // Fret-window label
    if let Some(label) = layout.window_label() {
        let definition = label_definition(label, theme.frets());
        output.merge(Text::new(&definition, label.text()).render_to_layers(label.position()));
    }

    // Title
    if let Some(label) = layout.title() {
        let definition = label_definition(label, theme.title());
        output.merge(Text::new(&definition, label.text()).render_to_layers(label.position()));
    }

    for node in output.render() {
        doc = doc.add(node);
    }

    doc
}

fn label_definition(label: &Label, color: fretwork_core::color::Color) -> TextDefinition {
    let mut definition = TextDefinition::new();
    definition.set_font_size(label.font_size());
    definition.set_bold(label.bold());
    definition.set_color(Some(color));
    definition
}
