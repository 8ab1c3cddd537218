//! Automatic layout
//!
//! Computes axis ranges, tick label precision and the label areas around each
//! plot so titles, tick labels and axis descriptions of stacked plot areas do
//! not overlap. Text is rendered with a monospace font, which makes text
//! extents a function of character count and font size alone.

use crate::config::ReportConfig;
use crate::figure::LegendCorner;
use std::ops::Range;

/// Advance width of one DejaVu Sans Mono glyph, in em
pub const MONO_ADVANCE_EM: f64 = 0.602;

/// Fraction of the data span added on both sides of an axis
pub const AXIS_MARGIN: f64 = 0.05;

const TITLE_PT: f64 = 12.0;
const BASE_PT: f64 = 10.0;
const GRID_PT: f64 = 0.8;
const TIGHT_PAD: f64 = 1.08;
const LABEL_PAD_PT: f64 = 4.0;
const TICK_PAD_PT: f64 = 3.5;
const LEGEND_HANDLE_EM: f64 = 2.0;
const LEGEND_TEXT_GAP_EM: f64 = 0.5;
const LEGEND_ROW_EM: f64 = 1.3;
const DASH_ON_PT: f64 = 3.7;
const DASH_OFF_PT: f64 = 1.6;

/// Font and stroke sizes in pixels for one output resolution
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextMetrics {
    /// Plot area title
    pub title_px: f64,
    /// Axis descriptions, tick labels and legend text
    pub base_px: f64,
    /// Grid line width
    pub grid_px: u32,
    /// Padding between tick labels, axis descriptions and the plot edge
    pub label_pad_px: u32,
    pub tick_pad_px: u32,
    /// Length of the line sample drawn in the legend
    pub legend_handle_px: u32,
    /// Space reserved before each legend label: the line sample plus a gap
    pub legend_area_px: u32,
    points_to_px: f64,
}

impl TextMetrics {
    pub fn for_config(config: &ReportConfig) -> Self {
        let points_to_px = config.points_to_pixels(1.0);
        Self {
            title_px: TITLE_PT * points_to_px,
            base_px: BASE_PT * points_to_px,
            grid_px: stroke_px(GRID_PT * points_to_px),
            label_pad_px: (LABEL_PAD_PT * points_to_px).round() as u32,
            tick_pad_px: (TICK_PAD_PT * points_to_px).round() as u32,
            legend_handle_px: (LEGEND_HANDLE_EM * BASE_PT * points_to_px).round() as u32,
            legend_area_px: ((LEGEND_HANDLE_EM + LEGEND_TEXT_GAP_EM) * BASE_PT * points_to_px)
                .round() as u32,
            points_to_px,
        }
    }

    /// Stroke width in pixels for a line weight in points
    pub fn line_px(&self, weight_pt: f64) -> u32 {
        stroke_px(weight_pt * self.points_to_px)
    }

    /// Dash and gap lengths in pixels for a line weight in points
    pub fn dash_px(&self, weight_pt: f64) -> (u32, u32) {
        let scale = weight_pt * self.points_to_px;
        (
            stroke_px(DASH_ON_PT * scale),
            stroke_px(DASH_OFF_PT * scale),
        )
    }

    /// Rendered width of a single-line string at the given size
    pub fn text_width(&self, text: &str, size_px: f64) -> u32 {
        (text.chars().count() as f64 * MONO_ADVANCE_EM * size_px).ceil() as u32
    }

    /// Outer size in pixels (width, height) of a legend listing `labels`
    pub fn legend_box(&self, labels: &[&str]) -> (u32, u32) {
        let widest = labels
            .iter()
            .map(|label| self.text_width(label, self.base_px))
            .max()
            .unwrap_or(0);
        let rows = (labels.len() as f64 * LEGEND_ROW_EM * self.base_px).ceil() as u32;
        (
            2 * self.label_pad_px + self.legend_area_px + widest,
            2 * self.label_pad_px + rows,
        )
    }
}

fn stroke_px(px: f64) -> u32 {
    px.round().max(1.0) as u32
}

/// Margins and label areas of one plot area, in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelLayout {
    pub margin: u32,
    pub x_label_area: u32,
    pub y_label_area: u32,
}

/// Fit the label areas to the text that will be drawn around one plot area
pub fn tight_layout(metrics: &TextMetrics, y_tick_labels: &[String]) -> PanelLayout {
    let widest_tick = y_tick_labels
        .iter()
        .map(|label| metrics.text_width(label, metrics.base_px))
        .max()
        .unwrap_or(0);
    let line = metrics.base_px.ceil() as u32;

    PanelLayout {
        margin: (TIGHT_PAD * metrics.base_px).round() as u32,
        x_label_area: metrics.tick_pad_px + line + metrics.label_pad_px + line,
        y_label_area: metrics.tick_pad_px + widest_tick + metrics.label_pad_px + line,
    }
}

/// Autoscaled axis range covering all finite values plus a margin
pub fn axis_range<'a>(values: impl IntoIterator<Item = &'a f64>) -> Range<f64> {
    let (lo, hi) = values
        .into_iter()
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        });

    if lo > hi {
        return 0.0..1.0;
    }
    if lo == hi {
        let half = if lo == 0.0 { 0.5 } else { lo.abs() * AXIS_MARGIN };
        return (lo - half)..(hi + half);
    }

    let pad = (hi - lo) * AXIS_MARGIN;
    (lo - pad)..(hi + pad)
}

/// Number of decimals needed to tell neighbouring ticks apart
pub fn tick_precision(range: &Range<f64>) -> usize {
    let step = (range.end - range.start).abs() / 10.0;
    if !step.is_finite() || step <= 0.0 {
        return 0;
    }
    (-step.log10().floor()).clamp(0.0, 6.0) as usize
}

/// Format one tick value with a fixed precision
pub fn format_tick(value: f64, precision: usize) -> String {
    let text = format!("{:.*}", precision, value);
    // "-0.00" reads as noise next to "0.00"
    if text.starts_with('-') && text[1..].chars().all(|c| c == '0' || c == '.') {
        text[1..].to_string()
    } else {
        text
    }
}

/// Tick labels at the ends of a range, the widest labels the axis can show
pub fn extreme_tick_labels(range: &Range<f64>) -> Vec<String> {
    let precision = tick_precision(range);
    vec![
        format_tick(range.start, precision),
        format_tick(range.end, precision),
    ]
}

/// Corner whose legend box covers the fewest data points
///
/// `plot_px` is the size of the plotting area, `box_px` the legend size and
/// `inset_px` the gap between legend and plot edge. Ties go to `preferred`,
/// then upper right, upper left, lower left, lower right.
pub fn best_legend_corner(
    points: impl IntoIterator<Item = (f64, f64)>,
    x_range: &Range<f64>,
    y_range: &Range<f64>,
    plot_px: (u32, u32),
    box_px: (u32, u32),
    inset_px: u32,
    preferred: LegendCorner,
) -> LegendCorner {
    let candidates = [
        preferred,
        LegendCorner::UpperRight,
        LegendCorner::UpperLeft,
        LegendCorner::LowerLeft,
        LegendCorner::LowerRight,
    ];
    let (plot_w, plot_h) = (plot_px.0.max(1) as f64, plot_px.1.max(1) as f64);
    let (box_w, box_h) = (box_px.0 as f64 / plot_w, box_px.1 as f64 / plot_h);
    let (inset_x, inset_y) = (inset_px as f64 / plot_w, inset_px as f64 / plot_h);
    let x_span = x_range.end - x_range.start;
    let y_span = y_range.end - y_range.start;

    let mut covered = [0usize; 5];
    for (x, y) in points {
        if !(x.is_finite() && y.is_finite()) {
            continue;
        }
        // Position inside the plot, 0..1 from the lower left
        let fx = (x - x_range.start) / x_span;
        let fy = (y - y_range.start) / y_span;

        for (count, corner) in covered.iter_mut().zip(candidates) {
            let (left, bottom) = match corner {
                LegendCorner::UpperLeft => (inset_x, 1.0 - inset_y - box_h),
                LegendCorner::UpperRight => (1.0 - inset_x - box_w, 1.0 - inset_y - box_h),
                LegendCorner::LowerLeft => (inset_x, inset_y),
                LegendCorner::LowerRight => (1.0 - inset_x - box_w, inset_y),
            };
            if fx >= left && fx <= left + box_w && fy >= bottom && fy <= bottom + box_h {
                *count += 1;
            }
        }
    }

    candidates
        .iter()
        .zip(covered)
        .min_by_key(|(_, count)| *count)
        .map(|(corner, _)| *corner)
        .unwrap_or(preferred)
}

/// Split a series into runs of consecutive finite points
pub fn finite_runs(xs: &[f64], ys: &[f64]) -> Vec<Vec<(f64, f64)>> {
    let mut runs = Vec::new();
    let mut current = Vec::new();

    for (&x, &y) in xs.iter().zip(ys) {
        if x.is_finite() && y.is_finite() {
            current.push((x, y));
        } else if !current.is_empty() {
            runs.push(std::mem::take(&mut current));
        }
    }
    if !current.is_empty() {
        runs.push(current);
    }

    runs
}
