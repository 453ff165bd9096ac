//! Configuration types for EVE-NG to GNS3 conversion.
//!
//! This module provides configuration structures that control canvas
//! geometry, console port allocation and label styling. All types implement
//! [`serde::Deserialize`] and fill missing fields with their defaults, so a
//! configuration file only needs to name the values it changes.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining every section.
//! - [`CanvasConfig`] - Scale, margin and rounding of the GNS3 scene.
//! - [`ConsoleConfig`] - First console port handed out to nodes.
//! - [`StyleConfig`] - Fonts used for node, link and drawing labels.
//!
//! # Example
//!
//! ```
//! # use eve2gns::config::AppConfig;
//! let config = AppConfig::default();
//! assert_eq!(config.console().start_port(), 5000);
//! assert_eq!(config.canvas().default_size().width(), 2000.0);
//! ```

use serde::Deserialize;

use eve2gns_core::geometry::Size;

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Canvas configuration section.
    #[serde(default)]
    canvas: CanvasConfig,

    /// Console configuration section.
    #[serde(default)]
    console: ConsoleConfig,

    /// Style configuration section.
    #[serde(default)]
    style: StyleConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] from its sections.
    pub fn new(canvas: CanvasConfig, console: ConsoleConfig, style: StyleConfig) -> Self {
        Self {
            canvas,
            console,
            style,
        }
    }

    /// Returns the canvas configuration.
    pub fn canvas(&self) -> &CanvasConfig {
        &self.canvas
    }

    /// Returns the console configuration.
    pub fn console(&self) -> &ConsoleConfig {
        &self.console
    }

    /// Returns the style configuration.
    pub fn style(&self) -> &StyleConfig {
        &self.style
    }

    /// Replaces the first console port, e.g. from a command line flag.
    pub fn with_console_start_port(mut self, start_port: u16) -> Self {
        self.console.start_port = start_port;
        self
    }
}

/// Geometry of the GNS3 scene.
///
/// The scene is sized to fit every node plus `margin`, rounded up to a
/// multiple of `grid`, and never smaller than the default size.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    /// Factor applied to source coordinates.
    scale: f64,

    /// Space added past the right-most and bottom-most node.
    margin: f64,

    /// Scene dimensions are rounded up to a multiple of this value.
    grid: f64,

    default_width: f64,
    default_height: f64,
}

impl CanvasConfig {
    /// Creates a new [`CanvasConfig`].
    ///
    /// # Arguments
    ///
    /// * `scale` - Factor applied to source coordinates.
    /// * `margin` - Space added past the outermost node.
    /// * `grid` - Rounding step for scene dimensions.
    /// * `default_size` - Minimum scene size, also the reference for
    ///   percentage positions.
    pub fn new(scale: f64, margin: f64, grid: f64, default_size: Size) -> Self {
        Self {
            scale,
            margin,
            grid,
            default_width: default_size.width(),
            default_height: default_size.height(),
        }
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn margin(&self) -> f64 {
        self.margin
    }

    pub fn grid(&self) -> f64 {
        self.grid
    }

    /// Returns the minimum scene size.
    pub fn default_size(&self) -> Size {
        Size::new(self.default_width, self.default_height)
    }
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            scale: 1.0,
            margin: 200.0,
            grid: 500.0,
            default_width: 2000.0,
            default_height: 1000.0,
        }
    }
}

/// Console port allocation.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ConsoleConfig {
    /// Console port of the first node; later nodes count up from here.
    start_port: u16,
}

impl ConsoleConfig {
    pub fn new(start_port: u16) -> Self {
        Self { start_port }
    }

    pub fn start_port(&self) -> u16 {
        self.start_port
    }
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self { start_port: 5000 }
    }
}

/// Fonts used in the generated project.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StyleConfig {
    label_font_family: String,
    label_font_size: f64,
    drawing_font_size: f64,
}

impl StyleConfig {
    /// Creates a new [`StyleConfig`].
    ///
    /// # Arguments
    ///
    /// * `label_font_family` - Font family for node, link and drawing text.
    /// * `label_font_size` - Font size of node and link labels.
    /// * `drawing_font_size` - Font size of free text drawings.
    pub fn new(
        label_font_family: impl Into<String>,
        label_font_size: f64,
        drawing_font_size: f64,
    ) -> Self {
        Self {
            label_font_family: label_font_family.into(),
            label_font_size,
            drawing_font_size,
        }
    }

    pub fn label_font_family(&self) -> &str {
        &self.label_font_family
    }

    pub fn label_font_size(&self) -> f64 {
        self.label_font_size
    }

    pub fn drawing_font_size(&self) -> f64 {
        self.drawing_font_size
    }

    /// CSS style string GNS3 expects for node and link labels.
    ///
    /// # Examples
    ///
    /// ```
    /// # use eve2gns::config::StyleConfig;
    /// assert_eq!(
    ///     StyleConfig::default().label_style(),
    ///     "font-family: TypeWriter;font-size: 10.0;font-weight: bold;fill: #000000;fill-opacity: 1.0;"
    /// );
    /// ```
    pub fn label_style(&self) -> String {
        format!(
            "font-family: {};font-size: {:.1};font-weight: bold;fill: #000000;fill-opacity: 1.0;",
            self.label_font_family, self.label_font_size
        )
    }
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            label_font_family: "TypeWriter".to_string(),
            label_font_size: 10.0,
            drawing_font_size: 14.0,
        }
    }
}
