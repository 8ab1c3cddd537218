//! Report configuration
//!
//! The report has no external configuration surface: the defaults below are the
//! fixed input/output files and figure geometry. The builder methods exist so
//! the same pipeline can be pointed at other paths (tests, scratch runs).

use std::path::{Path, PathBuf};

/// Results file read by the report
pub const INPUT_FILE: &str = "resultados_hil_Rampa.txt";

/// Image written by the report
pub const OUTPUT_FILE: &str = "resultados_hil.png";

/// Figure size in inches (width, height)
pub const FIGURE_SIZE_IN: (f64, f64) = (12.0, 8.0);

/// Resolution used when saving the figure
pub const DPI: u32 = 300;

const POINTS_PER_INCH: f64 = 72.0;
const METERS_PER_INCH: f64 = 0.0254;

/// Configuration for one report run
#[derive(Debug, Clone, PartialEq)]
pub struct ReportConfig {
    /// Delimited results table to load
    pub input_path: PathBuf,
    /// PNG file to write (overwritten if present)
    pub output_path: PathBuf,
    /// Figure width in inches
    pub width_in: f64,
    /// Figure height in inches
    pub height_in: f64,
    /// Dots per inch of the saved image
    pub dpi: u32,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            input_path: PathBuf::from(INPUT_FILE),
            output_path: PathBuf::from(OUTPUT_FILE),
            width_in: FIGURE_SIZE_IN.0,
            height_in: FIGURE_SIZE_IN.1,
            dpi: DPI,
        }
    }
}

impl ReportConfig {
    /// Create a configuration with the fixed report defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: read the results table from another path
    pub fn with_input_path(mut self, path: impl AsRef<Path>) -> Self {
        self.input_path = path.as_ref().to_path_buf();
        self
    }

    /// Builder method: write the image to another path
    pub fn with_output_path(mut self, path: impl AsRef<Path>) -> Self {
        self.output_path = path.as_ref().to_path_buf();
        self
    }

    /// Builder method: set the figure size in inches
    pub fn with_figure_size(mut self, width_in: f64, height_in: f64) -> Self {
        self.width_in = width_in;
        self.height_in = height_in;
        self
    }

    /// Builder method: set the output resolution
    pub fn with_dpi(mut self, dpi: u32) -> Self {
        self.dpi = dpi;
        self
    }

    /// Image size in pixels (width, height)
    pub fn pixel_size(&self) -> (u32, u32) {
        let dpi = self.dpi as f64;
        (
            (self.width_in * dpi).round().max(1.0) as u32,
            (self.height_in * dpi).round().max(1.0) as u32,
        )
    }

    /// Resolution in pixels per meter, as stored in the PNG `pHYs` chunk
    pub fn pixels_per_meter(&self) -> u32 {
        (self.dpi as f64 / METERS_PER_INCH).round() as u32
    }

    /// Convert a typographic size in points to pixels at this resolution
    pub fn points_to_pixels(&self, points: f64) -> f64 {
        points * self.dpi as f64 / POINTS_PER_INCH
    }
}
