//! Configuration types for fretboard rendering.
//!
//! This module provides configuration structures that control how diagrams
//! are scaled and colored. All types implement [`serde::Deserialize`] for
//! loading from TOML; unknown keys are rejected at parse time, so a
//! misspelled element kind fails loudly instead of being ignored.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining render and style settings.
//! - [`RenderConfig`] - Raster resolution (pixels per millimeter).
//! - [`StyleConfig`] - Color overrides for the closed set of element kinds.
//!
//! # Example
//!
//! ```
//! # use fretwork::config::AppConfig;
//! let config = AppConfig::default();
//! assert!(config.style().resolve().is_ok());
//! ```

use serde::Deserialize;

use fretwork_core::color::Color;

use crate::error::ConfigError;
use crate::theme::Theme;

/// Default raster resolution in pixels per millimeter.
const DEFAULT_PIXELS_PER_MM: f32 = 8.0;

/// Top-level application configuration combining render and style settings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    /// Render configuration section.
    #[serde(default)]
    render: RenderConfig,

    /// Style configuration section.
    #[serde(default)]
    style: StyleConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] from its sections.
    pub fn new(render: RenderConfig, style: StyleConfig) -> Self {
        Self { render, style }
    }

    /// Returns the render configuration.
    pub fn render(&self) -> &RenderConfig {
        &self.render
    }

    /// Returns the style configuration.
    pub fn style(&self) -> &StyleConfig {
        &self.style
    }
}

/// Raster resolution configuration.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RenderConfig {
    /// Pixels per millimeter of diagram space.
    #[serde(default = "default_pixels_per_mm")]
    pixels_per_mm: f32,
}

fn default_pixels_per_mm() -> f32 {
    DEFAULT_PIXELS_PER_MM
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            pixels_per_mm: DEFAULT_PIXELS_PER_MM,
        }
    }
}

impl RenderConfig {
    /// Creates a render configuration with the given resolution.
    pub fn new(pixels_per_mm: f32) -> Self {
        Self { pixels_per_mm }
    }

    /// Validates the configuration into render options.
    ///
    /// # Errors
    ///
    /// Returns an error when the resolution is not positive.
    pub fn resolve(&self) -> Result<RenderOptions, ConfigError> {
        if self.pixels_per_mm <= 0.0 {
            return Err(ConfigError::Resolution(self.pixels_per_mm));
        }
        Ok(RenderOptions {
            pixels_per_mm: self.pixels_per_mm,
        })
    }
}

/// Validated render options applied at export time.
#[derive(Debug, Clone, Copy)]
pub struct RenderOptions {
    pixels_per_mm: f32,
}

impl RenderOptions {
    /// Returns the raster resolution in pixels per millimeter.
    pub fn pixels_per_mm(self) -> f32 {
        self.pixels_per_mm
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            pixels_per_mm: DEFAULT_PIXELS_PER_MM,
        }
    }
}

/// Color overrides for the closed set of diagram element kinds.
///
/// Colors are kept as raw CSS strings until [`StyleConfig::resolve`] parses
/// them; fields that are not set fall back to the default palette.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StyleConfig {
    /// Diagram background color.
    background: Option<String>,

    /// Fret line color.
    frets: Option<String>,

    /// String line and tuning label color.
    strings: Option<String>,

    /// Inlay dot color.
    inlays: Option<String>,

    /// Title color.
    title: Option<String>,

    /// Per-letter note colors.
    #[serde(default)]
    notes: NoteStyleConfig,
}

/// Note letter color overrides.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NoteStyleConfig {
    a: Option<String>,
    b: Option<String>,
    c: Option<String>,
    d: Option<String>,
    e: Option<String>,
    f: Option<String>,
    g: Option<String>,
}

impl StyleConfig {
    /// Resolves the configured colors into a [`Theme`], applying defaults
    /// for anything not set.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] naming the element whose color string
    /// cannot be parsed.
    pub fn resolve(&self) -> Result<Theme, ConfigError> {
        fn parse(element: &'static str, value: &Option<String>) -> Result<Option<Color>, ConfigError> {
            value
                .as_ref()
                .map(|raw| {
                    Color::new(raw).map_err(|message| ConfigError::Color { element, message })
                })
                .transpose()
        }

        let mut theme = Theme::default();

        if let Some(color) = parse("background", &self.background)? {
            theme.set_background(color);
        }
        if let Some(color) = parse("frets", &self.frets)? {
            theme.set_frets(color);
        }
        if let Some(color) = parse("strings", &self.strings)? {
            theme.set_strings(color);
        }
        if let Some(color) = parse("inlays", &self.inlays)? {
            theme.set_inlays(color);
        }
        if let Some(color) = parse("title", &self.title)? {
            theme.set_title(color);
        }

        let letters = [
            ('A', "notes.a", &self.notes.a),
            ('B', "notes.b", &self.notes.b),
            ('C', "notes.c", &self.notes.c),
            ('D', "notes.d", &self.notes.d),
            ('E', "notes.e", &self.notes.e),
            ('F', "notes.f", &self.notes.f),
            ('G', "notes.g", &self.notes.g),
        ];
        for (letter, element, value) in letters {
            if let Some(color) = parse(element, value)? {
                theme.set_note_letter(letter, color);
            }
        }

        Ok(theme)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_resolves() {
        let config = AppConfig::default();
        assert!(config.style().resolve().is_ok());
        let options = config.render().resolve().unwrap();
        assert_eq!(options.pixels_per_mm(), DEFAULT_PIXELS_PER_MM);
    }

    #[test]
    fn test_toml_round_trip() {
        let config: AppConfig = toml::from_str(
            r##"
            [render]
            pixels_per_mm = 4.0

            [style]
            background = "ivory"
            frets = "#222222"

            [style.notes]
            e = "#ff0000"
            "##,
        )
        .unwrap();

        let options = config.render().resolve().unwrap();
        assert_eq!(options.pixels_per_mm(), 4.0);

        let theme = config.style().resolve().unwrap();
        assert_eq!(theme.background().to_string(), "ivory");
        assert_eq!(
            theme.note_letter('E'),
            Some(Color::new("#ff0000").unwrap())
        );
        // Unset entries keep the default palette
        assert_eq!(theme.note_letter('A'), Some(Color::new("#b50000").unwrap()));
    }

    #[test]
    fn test_unknown_style_keys_are_rejected() {
        let result = toml::from_str::<AppConfig>(
            r##"
            [style]
            fretz = "#222222"
            "##,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_invalid_color_names_element() {
        let config: AppConfig = toml::from_str(
            r#"
            [style]
            frets = "not-a-color"
            "#,
        )
        .unwrap();

        let err = config.style().resolve().unwrap_err();
        assert!(matches!(err, ConfigError::Color { element: "frets", .. }));
    }

    #[test]
    fn test_invalid_resolution_is_rejected() {
        let config = AppConfig::new(RenderConfig::new(0.0), StyleConfig::default());
        assert!(matches!(
            config.render().resolve(),
            Err(ConfigError::Resolution(_))
        ));
    }
}
