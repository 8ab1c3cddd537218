//! Core types for the HIL report library
//!
//! This module defines the error type shared by every stage of the pipeline
//! and the summary the renderer hands back after drawing a figure.

use crate::figure::LegendCorner;
use plotters::drawing::DrawingAreaErrorKind;
use std::error::Error;

/// Result type for report operations
pub type Result<T> = std::result::Result<T, ReportError>;

/// Errors that can occur while loading, drawing or saving a report
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("Failed to read results table")]
    Csv(#[from] csv::Error),

    #[error("Missing column in results table: {0}")]
    MissingColumn(String),

    #[error("Failed to load font: {0}")]
    Font(String),

    #[error("Failed to draw figure: {0}")]
    Draw(String),

    #[error("Failed to encode PNG")]
    Encode(#[from] png::EncodingError),

    #[error("IO error")]
    IoError(#[from] std::io::Error),
}

impl<E: Error + Send + Sync> From<DrawingAreaErrorKind<E>> for ReportError {
    fn from(err: DrawingAreaErrorKind<E>) -> Self {
        ReportError::Draw(err.to_string())
    }
}

/// What was actually drawn into one plot area
#[derive(Debug, Clone, PartialEq)]
pub struct PanelSummary {
    /// Plot area title
    pub title: String,
    /// X axis description
    pub x_label: String,
    /// Y axis description
    pub y_label: String,
    /// Legend labels, in the order the series were drawn
    pub series_labels: Vec<String>,
    /// Number of finite points drawn across all series
    pub points_drawn: usize,
    /// Corner the legend was placed in, if the plot area has one
    pub legend: Option<LegendCorner>,
}

/// Introspection data for a rendered figure
#[derive(Debug, Clone, PartialEq)]
pub struct FigureSummary {
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
    /// Plot areas, top to bottom
    pub panels: Vec<PanelSummary>,
}

impl FigureSummary {
    /// Number of plot areas in the figure
    pub fn num_panels(&self) -> usize {
        self.panels.len()
    }

    /// Total number of series across all plot areas
    pub fn num_series(&self) -> usize {
        self.panels.iter().map(|p| p.series_labels.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ReportError::MissingColumn("Tiempo".to_string());
        assert_eq!(err.to_string(), "Missing column in results table: Tiempo");

        let err = ReportError::Draw("backend gone".to_string());
        assert_eq!(err.to_string(), "Failed to draw figure: backend gone");
    }

    #[test]
    fn test_wrapped_error_reads_once() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "No such file or directory");
        let err = ReportError::from(io);

        // The cause is reported through source(), not repeated in the message
        assert_eq!(err.to_string(), "IO error");
        let source = err.source().unwrap();
        assert_eq!(source.to_string(), "No such file or directory");
    }

    #[test]
    fn test_summary_counts() {
        let panel = |labels: &[&str]| PanelSummary {
            title: String::new(),
            x_label: String::new(),
            y_label: String::new(),
            series_labels: labels.iter().map(|s| s.to_string()).collect(),
            points_drawn: 0,
            legend: None,
        };
        let summary = FigureSummary {
            width: 10,
            height: 10,
            panels: vec![panel(&["a", "b", "c"]), panel(&["d", "e"])],
        };
        assert_eq!(summary.num_panels(), 2);
        assert_eq!(summary.num_series(), 5);
    }
}
