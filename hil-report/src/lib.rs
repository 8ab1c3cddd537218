//! HIL Report Library
//!
//! Turns the results table of a hardware-in-the-loop run into a two-panel
//! figure: reference tracking on top, higher-order derivatives below.
//!
//! # Architecture
//!
//! The pipeline is a straight line:
//! - [`ResultsTable`] loads the delimited results file column-wise
//! - [`FigureSpec`] describes the plot areas, series and styles
//! - [`layout`] autoscales axes and sizes the label areas
//! - [`Renderer`] rasterizes the figure and writes a PNG at the configured DPI
//!
//! Displaying the saved image is left to the application layer (hil-report-cli).
//!
//! # Example Usage
//!
//! ```no_run
//! use hil_report::{FigureSpec, ReportConfig, Renderer, ResultsTable};
//!
//! let config = ReportConfig::default();
//! let table = ResultsTable::from_path(&config.input_path).unwrap();
//!
//! let summary = Renderer::new(config)
//!     .render_to_file(&table, &FigureSpec::hil_results())
//!     .unwrap();
//!
//! for panel in &summary.panels {
//!     println!("{}: {:?}", panel.title, panel.series_labels);
//! }
//! ```

// Public modules
pub mod config;
pub mod figure;
pub mod layout;
pub mod render;
pub mod table;
pub mod types;

// Re-export main types for convenience
pub use config::ReportConfig;
pub use figure::{FigureSpec, LegendCorner, LineKind, PanelSpec, SeriesSpec, SeriesStyle};
pub use render::{render_report, RenderedFigure, Renderer};
pub use table::{Column, ResultsTable, Sample};
pub use types::{FigureSummary, PanelSummary, ReportError, Result};

// Internal modules (not exposed in public API)
mod encode;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
