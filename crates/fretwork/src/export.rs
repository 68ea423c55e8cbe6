//! Image export: format selection and the exporter interface.

pub mod png;
pub mod svg;

use std::path::Path;

use crate::config::RenderOptions;
use crate::layout::Layout;
use crate::theme::Theme;

/// An output surface a layout can be exported to.
pub trait Exporter {
    fn export_layout(
        &self,
        layout: &Layout,
        theme: &Theme,
        options: &RenderOptions,
    ) -> Result<(), Error>;
}

/// Supported output image formats, selected by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    /// Vector output via an SVG document.
    Svg,
    /// Raster output by rasterizing the SVG document.
    Png,
}

impl ImageFormat {
    /// Determines the output format from a file path's extension
    /// (case-insensitive).
    pub fn from_path(path: &Path) -> Result<Self, Error> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);

        match extension.as_deref() {
            Some("svg") => Ok(Self::Svg),
            Some("png") => Ok(Self::Png),
            _ => Err(Error::UnsupportedFormat(path.display().to_string())),
        }
    }
}

#[derive(Debug)]
pub enum Error {
    Render(String),
    Io(std::io::Error),
    UnsupportedFormat(String),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Render(msg) => write!(f, "Render error: {msg}"),
            Self::Io(err) => write!(f, "I/O error: {err}"),
            Self::UnsupportedFormat(path) => write!(
                f,
                "Unsupported output format for `{path}`, expected a .svg or .png path"
            ),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Render(_) | Self::UnsupportedFormat(_) => None,
            Self::Io(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_path() {
        assert_eq!(
            ImageFormat::from_path(Path::new("out.svg")).unwrap(),
            ImageFormat::Svg
        );
        assert_eq!(
            ImageFormat::from_path(Path::new("dir/out.PNG")).unwrap(),
            ImageFormat::Png
        );
        assert!(matches!(
            ImageFormat::from_path(Path::new("out.pdf")),
            Err(Error::UnsupportedFormat(_))
        ));
        assert!(matches!(
            ImageFormat::from_path(Path::new("out")),
            Err(Error::UnsupportedFormat(_))
        ));
    }
}
