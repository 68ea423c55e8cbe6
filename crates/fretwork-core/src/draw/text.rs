//! Text rendering definitions for labels and titles.
//!
//! This module provides types for configuring text appearance and rendering
//! text elements in fretboard diagrams. Text is rendered as an SVG `<text>`
//! element with an optional background rectangle that masks whatever lies
//! beneath the label (the SVG equivalent of punching a hole in the string
//! line under a note letter).
//!
//! Font sizes are in diagram units (millimeters). Measurement treats units
//! as pixels, which preserves the ratios the shrink-to-fit logic needs.
//!
//! # Quick Start
//!
//! ```
//! # use fretwork_core::draw::{Text, TextDefinition};
//! let mut style = TextDefinition::new();
//! style.set_font_size(10.0);
//! style.set_bold(true);
//!
//! let text = Text::new(&style, "Bb");
//! let size = text.calculate_size();
//! assert!(size.width() > 0.0);
//! ```

use std::sync::{Arc, Mutex, OnceLock};

use cosmic_text::{Attrs, Buffer, Family, FontSystem, Metrics, Shaping};
use log::info;
use svg::node::element as svg_element;

use crate::{
    color::Color,
    draw::{Drawable, LayeredOutput, RenderLayer},
    geometry::{Insets, Point, Size},
};

/// Defines the visual style for text elements in diagrams.
///
/// `TextDefinition` configures font properties, colors, and padding for
/// text rendered as note labels, tuning labels, and titles. Multiple
/// [`Text`] elements can share the same definition for consistent styling.
///
/// # Default Values
///
/// | Property | Default |
/// |----------|---------|
/// | Font family | `"sans-serif"` |
/// | Font size | `10.0` diagram units |
/// | Bold | `false` |
/// | Background color | `None` |
/// | Background layer | [`RenderLayer::Background`] |
/// | Text color | `None` (SVG default, typically black) |
/// | Padding | Zero on all sides |
#[derive(Debug, Clone)]
pub struct TextDefinition {
    font_family: String,
    font_size: f32,
    bold: bool,
    color: Option<Color>,
    background_color: Option<Color>,
    background_layer: RenderLayer,
    padding: Insets,
}

impl TextDefinition {
    /// Creates a new text definition with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the font size in diagram units.
    pub fn set_font_size(&mut self, size: f32) {
        self.font_size = size;
    }

    /// Sets the font family for the text.
    pub fn set_font_family(&mut self, family: &str) {
        self.font_family = family.to_string();
    }

    /// Sets whether the text renders bold.
    pub fn set_bold(&mut self, bold: bool) {
        self.bold = bold;
    }

    /// Sets the text color.
    ///
    /// When set to `None`, the SVG default color (usually black) is used.
    pub fn set_color(&mut self, color: Option<Color>) {
        self.color = color;
    }

    /// Sets the background color for the text.
    ///
    /// When set to `Some(color)`, text will be rendered with a rounded
    /// rectangle background in the specified color. When set to `None`, no
    /// background will be rendered.
    pub fn set_background_color(&mut self, color: Option<Color>) {
        self.background_color = color;
    }

    /// Sets the layer the background rectangle is emitted to.
    ///
    /// Note labels set this to [`RenderLayer::Marker`] so the background
    /// masks the string line underneath; the default keeps backgrounds at
    /// the bottom of the stack.
    pub fn set_background_layer(&mut self, layer: RenderLayer) {
        self.background_layer = layer;
    }

    /// Sets the padding around the text content.
    ///
    /// Padding affects the size of the background rectangle (if present)
    /// and is applied even when no background color is set.
    pub fn set_padding(&mut self, padding: Insets) {
        self.padding = padding;
    }

    /// Returns the font size in diagram units.
    pub fn font_size(&self) -> f32 {
        self.font_size
    }

    fn font_family(&self) -> &str {
        &self.font_family
    }

    fn bold(&self) -> bool {
        self.bold
    }

    fn color(&self) -> Option<&Color> {
        self.color.as_ref()
    }

    fn background_color(&self) -> Option<&Color> {
        self.background_color.as_ref()
    }

    fn padding(&self) -> Insets {
        self.padding
    }
}

impl Default for TextDefinition {
    fn default() -> Self {
        Self {
            font_family: "sans-serif".to_string(),
            font_size: 10.0,
            bold: false,
            color: None,
            background_color: None,
            background_layer: RenderLayer::Background,
            padding: Insets::default(),
        }
    }
}

/// A renderable text element combining content with styling.
#[derive(Debug, Clone)]
pub struct Text<'a> {
    definition: &'a TextDefinition,
    content: &'a str,
}

impl<'a> Text<'a> {
    /// Creates a new text element with the given definition and content.
    pub fn new(definition: &'a TextDefinition, content: &'a str) -> Self {
        Self {
            definition,
            content,
        }
    }

    /// Returns the text content of this element.
    pub fn content(&self) -> &str {
        self.content
    }

    /// Calculate the total size required to display this text, including padding.
    pub fn calculate_size(&self) -> Size {
        let padding = self.definition.padding();
        self.calculate_size_without_padding().add_padding(padding)
    }

    /// Calculate the size required to display this text content without padding.
    fn calculate_size_without_padding(&self) -> Size {
        TEXT_MANAGER
            .get_or_init(TextManager::new)
            .calculate_text_size(self.content, self.definition)
    }

    /// Returns the largest font size, at most the definition's, at which
    /// this text fits in `max_width` diagram units.
    ///
    /// Used to shrink note labels in narrow fret slots and over-long titles
    /// into the drawing area.
    pub fn fitted_font_size(&self, max_width: f32) -> f32 {
        let size = self.calculate_size_without_padding();
        let font_size = self.definition.font_size();
        if size.width() <= max_width || size.width() <= 0.0 {
            font_size
        } else {
            font_size * max_width / size.width()
        }
    }
}

impl<'a> Drawable for Text<'a> {
    fn render_to_layers(&self, position: Point) -> LayeredOutput {
        let mut output = LayeredOutput::new();
        let text_size = self.calculate_size();

        let mut rendered_text = svg_element::Text::new(self.content)
            .set("x", position.x())
            .set("y", position.y())
            .set("text-anchor", "middle")
            .set("dominant-baseline", "central")
            .set("font-family", self.definition.font_family())
            .set("font-size", self.definition.font_size());

        if self.definition.bold() {
            rendered_text = rendered_text.set("font-weight", "bold");
        }

        if let Some(color) = self.definition.color() {
            rendered_text = rendered_text
                .set("fill", color.to_string())
                .set("fill-opacity", color.alpha());
        }

        // Add background rectangle if color is specified
        if let Some(bg_color) = self.definition.background_color() {
            let bg_bounds = position.to_bounds(text_size);
            let bg_size = bg_bounds.to_size();
            let bg_min_point = bg_bounds.min_point();

            let bg = svg_element::Rectangle::new()
                .set("x", bg_min_point.x())
                .set("y", bg_min_point.y())
                .set("width", bg_size.width())
                .set("height", bg_size.height())
                .set("fill", bg_color.to_string())
                .set("fill-opacity", bg_color.alpha())
                .set("rx", 1.0);

            output.add_to_layer(self.definition.background_layer, Box::new(bg));
        }

        output.add_to_layer(RenderLayer::Text, Box::new(rendered_text));
        output
    }

    fn size(&self) -> Size {
        self.calculate_size()
    }
}

/// TextManager handles text measurement and font operations.
/// It maintains a reusable FontSystem instance to avoid expensive recreation.
struct TextManager {
    font_system: Arc<Mutex<FontSystem>>,
}

impl TextManager {
    /// Create a new TextManager with a default FontSystem
    fn new() -> Self {
        info!("Initializing FontSystem");
        Self {
            font_system: Arc::new(Mutex::new(FontSystem::new())),
        }
    }

    /// Calculate the size of text using cosmic-text.
    ///
    /// This provides a measurement based on real font metrics and shaping.
    /// When no fonts are available, an estimate based on the glyph count is
    /// returned instead.
    fn calculate_text_size(&self, text: &str, text_def: &TextDefinition) -> Size {
        if text.is_empty() {
            return Size::default();
        }

        // Lock the FontSystem for use
        let mut font_system = self.font_system.lock().expect("failed to lock FontSystem");

        let font_size = text_def.font_size();

        // Create metrics with font size and approximate line height
        let line_height = font_size * 1.15;
        let metrics = Metrics::new(font_size, line_height);

        // Create a buffer with the metrics
        let mut buffer = Buffer::new(&mut font_system, metrics);
        let mut buffer = buffer.borrow_with(&mut font_system);

        // Set up text attributes
        let attrs = Attrs::new().family(Family::Name(text_def.font_family()));

        // Set the buffer's size to unlimited to allow text to flow naturally
        buffer.set_size(None, None);

        // Advanced shaping handles ligatures, kerning, etc.
        buffer.set_text(text, &attrs, Shaping::Advanced, None);

        // Shape the text to calculate layout
        buffer.shape_until_scroll(true);

        // Calculate bounds by examining layout runs to determine actual rendered size
        let mut max_width: f32 = 0.0;
        let mut total_height: f32 = 0.0;

        let layout_runs: Vec<_> = buffer.layout_runs().collect();
        if !layout_runs.is_empty() {
            for last in layout_runs.iter().map(|run| run.glyphs.last()) {
                // Find rightmost glyph position
                if let Some(last) = last {
                    let run_width = last.x + last.w;
                    max_width = max_width.max(run_width);
                }
                total_height += metrics.line_height;
            }
        } else {
            // Estimate when no fonts are available
            max_width = text.len() as f32 * (font_size * 0.55);
            total_height = metrics.line_height;
        }

        Size::new(max_width, total_height)
    }
}

// Create a global instance for use throughout the application
static TEXT_MANAGER: OnceLock<TextManager> = OnceLock::new();
