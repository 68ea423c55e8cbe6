//! PNG export by rasterizing the SVG document.

use log::{debug, info};
use resvg::{tiny_skia, usvg};
use svg::Document;

use crate::{config::RenderOptions, export, layout::Layout, theme::Theme};

/// PNG exporter writing to a file path.
pub struct Png {
    pub file_name: String,
}

impl Png {
    pub fn new(file_name: &str) -> Self {
        Self {
            file_name: file_name.to_string(),
        }
    }

    /// Rasterizes an SVG document at its pixel dimensions and writes the
    /// PNG to the configured file.
    pub fn write_document(&self, doc: Document) -> Result<(), export::Error> {
        let svg_data = doc.to_string();

        let mut options = usvg::Options::default();
        options.fontdb_mut().load_system_fonts();

        let tree = usvg::Tree::from_str(&svg_data, &options)
            .map_err(|err| export::Error::Render(format!("failed to build SVG tree: {err}")))?;

        let size = tree.size().to_int_size();
        let mut pixmap = tiny_skia::Pixmap::new(size.width(), size.height())
            .ok_or_else(|| export::Error::Render("canvas has zero pixel area".to_string()))?;

        debug!(width = size.width(), height = size.height(); "Rasterizing SVG");
        resvg::render(&tree, tiny_skia::Transform::default(), &mut pixmap.as_mut());

        info!(file_name = self.file_name; "Creating PNG file");
        pixmap
            .save_png(&self.file_name)
            .map_err(|err| export::Error::Io(std::io::Error::other(err)))?;

        Ok(())
    }
}

impl export::Exporter for Png {
    fn export_layout(
        &self,
        layout: &Layout,
        theme: &Theme,
        options: &RenderOptions,
    ) -> Result<(), export::Error> {
        let doc = super::svg::document(layout, theme, options);
        debug!("SVG document rendered");

        self.write_document(doc)
    }
}
