//! Figure description
//!
//! A [`FigureSpec`] says what to draw: which plot areas, which columns in each,
//! and how every series is styled. It holds no data and knows nothing about the
//! drawing backend, so the fixed report layout can be inspected on its own.

use crate::table::Column;
use plotters::style::RGBColor;

/// Line pattern of a series
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    Solid,
    Dashed,
}

/// Corner of the plot area holding the legend
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LegendCorner {
    UpperLeft,
    UpperRight,
    LowerLeft,
    LowerRight,
}

/// Visual style of one series
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeriesStyle {
    pub color: RGBColor,
    pub kind: LineKind,
    /// Line weight in points
    pub weight: f64,
}

/// Default line weight in points
pub const DEFAULT_WEIGHT: f64 = 1.5;

/// Default color cycle for series without an explicit color
pub const COLOR_CYCLE: [RGBColor; 3] = [
    RGBColor(0x1f, 0x77, 0xb4),
    RGBColor(0xff, 0x7f, 0x0e),
    RGBColor(0x2c, 0xa0, 0x2c),
];

const REFERENCE_BLUE: RGBColor = RGBColor(0x00, 0x00, 0xff);
const TRACKING_RED: RGBColor = RGBColor(0xff, 0x00, 0x00);
const PLANT_GREEN: RGBColor = RGBColor(0x00, 0x80, 0x00);

impl SeriesStyle {
    pub fn solid(color: RGBColor, weight: f64) -> Self {
        Self {
            color,
            kind: LineKind::Solid,
            weight,
        }
    }

    pub fn dashed(color: RGBColor, weight: f64) -> Self {
        Self {
            color,
            kind: LineKind::Dashed,
            weight,
        }
    }

    /// Style of the n-th series in a plot area when nothing else is specified
    pub fn cycled(n: usize) -> Self {
        Self::solid(COLOR_CYCLE[n % COLOR_CYCLE.len()], DEFAULT_WEIGHT)
    }
}

/// One series: a column drawn against the time axis
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesSpec {
    pub column: Column,
    pub label: String,
    pub style: SeriesStyle,
}

/// One plot area of the figure
#[derive(Debug, Clone, PartialEq)]
pub struct PanelSpec {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub series: Vec<SeriesSpec>,
    pub legend: Option<LegendCorner>,
    pub grid: bool,
}

impl PanelSpec {
    pub fn new(title: &str, x_label: &str, y_label: &str) -> Self {
        Self {
            title: title.to_string(),
            x_label: x_label.to_string(),
            y_label: y_label.to_string(),
            series: Vec::new(),
            legend: None,
            grid: false,
        }
    }

    /// Builder method: add a series with an explicit style
    pub fn with_series(mut self, column: Column, label: &str, style: SeriesStyle) -> Self {
        self.series.push(SeriesSpec {
            column,
            label: label.to_string(),
            style,
        });
        self
    }

    /// Builder method: add a series styled from the default cycle
    pub fn with_default_series(self, column: Column, label: &str) -> Self {
        let style = SeriesStyle::cycled(self.series.len());
        self.with_series(column, label, style)
    }

    /// Builder method: show a legend, preferring `corner` when no other
    /// corner covers fewer data points
    pub fn with_legend(mut self, corner: LegendCorner) -> Self {
        self.legend = Some(corner);
        self
    }

    /// Builder method: draw grid lines
    pub fn with_grid(mut self) -> Self {
        self.grid = true;
        self
    }

    /// Legend labels in drawing order
    pub fn labels(&self) -> Vec<&str> {
        self.series.iter().map(|s| s.label.as_str()).collect()
    }
}

/// A figure of vertically stacked plot areas sharing one time column
#[derive(Debug, Clone, PartialEq)]
pub struct FigureSpec {
    pub x_column: Column,
    pub panels: Vec<PanelSpec>,
}

impl FigureSpec {
    /// The HIL results figure: reference tracking on top, derivatives below
    pub fn hil_results() -> Self {
        let tracking = PanelSpec::new("Seguimiento de Referencia", "Tiempo (s)", "Amplitud")
            .with_series(
                Column::Reference,
                "Referencia",
                SeriesStyle::dashed(REFERENCE_BLUE, 2.0),
            )
            .with_series(
                Column::Tracking,
                "z0 (Seguimiento)",
                SeriesStyle::solid(TRACKING_RED, 1.5),
            )
            .with_series(
                Column::PlantOutput,
                "Salida Planta",
                SeriesStyle::solid(PLANT_GREEN, 1.5),
            )
            .with_legend(LegendCorner::UpperLeft)
            .with_grid();

        let derivatives = PanelSpec::new("Derivadas de Orden Superior", "Tiempo (s)", "Derivadas")
            .with_default_series(Column::Derivative1, "z1 (1ra derivada)")
            .with_default_series(Column::Derivative2, "z2 (2da derivada)")
            .with_default_series(Column::Derivative3, "z3 (3ra derivada)")
            .with_legend(LegendCorner::UpperRight)
            .with_grid();

        Self {
            x_column: Column::Time,
            panels: vec![tracking, derivatives],
        }
    }
}
