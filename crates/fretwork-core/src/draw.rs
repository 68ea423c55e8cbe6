//! Drawable primitives for fretboard rendering.
//!
//! This module provides the building blocks the exporter assembles diagrams
//! from: stroke definitions for fret and string lines, a z-ordered layer
//! system for SVG output, and measurable text elements.

mod layer;
mod stroke;
mod text;

pub use layer::{LayeredOutput, RenderLayer, SvgNode};
pub use stroke::{StrokeCap, StrokeDefinition};
pub use text::{Text, TextDefinition};

use crate::geometry::{Point, Size};

/// A renderable diagram element.
///
/// Drawables emit their SVG nodes into a [`LayeredOutput`] so that z-order
/// is decided by layer, not by emission order.
pub trait Drawable: std::fmt::Debug {
    /// Renders this element centered at the given position.
    fn render_to_layers(&self, position: Point) -> LayeredOutput;

    /// Returns the size this element occupies.
    fn size(&self) -> Size;
}
