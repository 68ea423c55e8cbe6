//! Layer-based rendering system for SVG output.
//!
//! Fretboard elements are emitted in a fixed z-order: background first, then
//! inlay dots, fret lines, string lines, marker backgrounds, and finally
//! text. Collecting nodes per layer keeps that order independent of the
//! order the layout is walked in.

use svg::node::element as svg_element;

/// Type alias for boxed SVG nodes.
pub type SvgNode = Box<dyn svg::Node>;

/// Defines the rendering layers for SVG output.
///
/// Layers are rendered from bottom to top in the order defined by variant
/// declaration. The `Ord` derive uses declaration order, so the first
/// variant renders first (bottom), and the last variant renders last (top).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RenderLayer {
    /// Background fill - renders first
    Background,
    /// Fretboard inlay dots, drawn underneath the frets and strings
    Inlay,
    /// Fret lines (including the nut or window anchor line)
    Fret,
    /// String lines
    String,
    /// Marker backgrounds that mask the string under a note label
    Marker,
    /// Note labels, tuning labels, and the title
    Text,
}

impl RenderLayer {
    /// Returns a human-readable name for this layer.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Background => "background",
            Self::Inlay => "inlay",
            Self::Fret => "fret",
            Self::String => "string",
            Self::Marker => "marker",
            Self::Text => "text",
        }
    }
}

/// Represents SVG nodes grouped by rendering layer.
///
/// This struct collects SVG nodes and organizes them by layer. When
/// rendered, nodes are emitted in layer order (bottom to top), ensuring
/// correct z-ordering.
#[derive(Debug, Default)]
pub struct LayeredOutput {
    items: Vec<(RenderLayer, SvgNode)>,
}

impl LayeredOutput {
    /// Creates a new empty `LayeredOutput`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a single node to the specified layer.
    ///
    /// Nodes are appended to the layer in the order they are added.
    pub fn add_to_layer(&mut self, layer: RenderLayer, node: SvgNode) {
        self.items.push((layer, node));
    }

    /// Merges all layers from another `LayeredOutput` into this one.
    ///
    /// Nodes from the other output are appended to existing layers in this
    /// output. This is useful for combining outputs from multiple drawables.
    pub fn merge(&mut self, other: LayeredOutput) {
        self.items.extend(other.items);
    }

    /// Returns `true` if there are no nodes in any layer.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Renders all layers to SVG groups, consuming the output.
    ///
    /// Each non-empty layer becomes an SVG `<g>` element with a `data-layer`
    /// attribute identifying the layer. Empty layers are skipped. Layers are
    /// rendered from bottom to top based on the `Ord` implementation of
    /// `RenderLayer`.
    pub fn render(mut self) -> Vec<SvgNode> {
        if self.is_empty() {
            return Vec::new();
        }

        // Stable sort keeps insertion order within a layer
        self.items.sort_by_key(|(layer, _)| *layer);

        let mut result = Vec::new();
        let mut current_layer = self.items[0].0;
        let mut current_group = svg_element::Group::new().set("data-layer", current_layer.name());

        for (layer, node) in self.items {
            if layer != current_layer {
                result.push(Box::new(current_group) as SvgNode);

                current_layer = layer;
                current_group = svg_element::Group::new().set("data-layer", layer.name());
            }

            current_group = current_group.add(node);
        }

        result.push(Box::new(current_group) as SvgNode);

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use svg::node::element::Rectangle;

    #[test]
    fn test_layered_output_new_is_empty() {
        let output = LayeredOutput::new();
        assert!(output.is_empty());
    }

    #[test]
    fn test_layered_output_add_to_layer() {
        let mut output = LayeredOutput::new();
        output.add_to_layer(RenderLayer::Fret, Box::new(Rectangle::new()));
        assert!(!output.is_empty());
    }

    #[test]
    fn test_layered_output_render_groups_per_layer() {
        let mut output = LayeredOutput::new();
        output.add_to_layer(RenderLayer::Fret, Box::new(Rectangle::new()));
        output.add_to_layer(RenderLayer::String, Box::new(Rectangle::new()));
        output.add_to_layer(RenderLayer::Text, Box::new(Rectangle::new()));

        let svg_nodes = output.render();
        assert_eq!(svg_nodes.len(), 3);
    }

    #[test]
    fn test_layered_output_merge_same_layer() {
        let mut output1 = LayeredOutput::new();
        output1.add_to_layer(RenderLayer::Inlay, Box::new(Rectangle::new()));

        let mut output2 = LayeredOutput::new();
        output2.add_to_layer(RenderLayer::Inlay, Box::new(Rectangle::new()));

        output1.merge(output2);

        // Both nodes end up in one group for the shared layer
        let nodes = output1.render();
        assert_eq!(nodes.len(), 1);
    }

    #[test]
    fn test_layer_order_is_bottom_to_top() {
        assert!(RenderLayer::Background < RenderLayer::Inlay);
        assert!(RenderLayer::Inlay < RenderLayer::Fret);
        assert!(RenderLayer::Fret < RenderLayer::String);
        assert!(RenderLayer::String < RenderLayer::Marker);
        assert!(RenderLayer::Marker < RenderLayer::Text);
    }
}
