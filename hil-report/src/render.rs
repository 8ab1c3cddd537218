//! Figure rendering
//!
//! The [`Renderer`] rasterizes a [`FigureSpec`] with data from a
//! [`ResultsTable`] into an in-memory RGB buffer, one chart per plot area,
//! and saves it as a PNG. Nothing touches the output path until the whole
//! figure has been drawn.

use crate::config::ReportConfig;
use crate::encode;
use crate::figure::{FigureSpec, LegendCorner, LineKind, PanelSpec, SeriesSpec};
use crate::layout::{self, TextMetrics};
use crate::table::ResultsTable;
use crate::types::{FigureSummary, PanelSummary, ReportError, Result};
use plotters::coord::cartesian::Cartesian2d;
use plotters::coord::types::RangedCoordf64;
use plotters::coord::Shift;
use plotters::element::DashedPathElement;
use plotters::prelude::*;
use plotters::series::DashedLineSeries;
use plotters::style::{register_font, FontDesc, FontFamily, FontStyle};

type Area<'a> = DrawingArea<BitMapBackend<'a>, Shift>;

const GRID_GRAY: RGBColor = RGBColor(0xb0, 0xb0, 0xb0);
const LEGEND_EDGE: RGBColor = RGBColor(0xcc, 0xcc, 0xcc);

/// A rasterized figure, ready to be saved
pub struct RenderedFigure {
    pub summary: FigureSummary,
    pixels: Vec<u8>,
}

impl RenderedFigure {
    /// Raw RGB pixels, row-major
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }
}

/// Draws figures at the size and resolution of a [`ReportConfig`]
pub struct Renderer {
    config: ReportConfig,
    metrics: TextMetrics,
}

impl Renderer {
    pub fn new(config: ReportConfig) -> Self {
        let metrics = TextMetrics::for_config(&config);
        Self { config, metrics }
    }

    pub fn config(&self) -> &ReportConfig {
        &self.config
    }

    /// Rasterize `figure` in memory
    pub fn render(&self, table: &ResultsTable, figure: &FigureSpec) -> Result<RenderedFigure> {
        register_embedded_font()?;

        let (width, height) = self.config.pixel_size();
        log::info!(
            "Rendering {} plot area(s) at {}x{} px ({} DPI)",
            figure.panels.len(),
            width,
            height,
            self.config.dpi
        );

        let mut pixels = vec![0u8; width as usize * height as usize * 3];
        let mut panels = Vec::with_capacity(figure.panels.len());
        {
            let root = BitMapBackend::with_buffer(&mut pixels, (width, height)).into_drawing_area();
            root.fill(&WHITE)?;

            let rows = figure.panels.len().max(1);
            let areas = root.split_evenly((rows, 1));
            for (area, panel) in areas.iter().zip(&figure.panels) {
                panels.push(self.draw_panel(area, table, figure, panel)?);
            }

            root.present()?;
        }

        Ok(RenderedFigure {
            summary: FigureSummary {
                width,
                height,
                panels,
            },
            pixels,
        })
    }

    /// Rasterize `figure` and write it to the configured output path
    pub fn render_to_file(&self, table: &ResultsTable, figure: &FigureSpec) -> Result<FigureSummary> {
        let rendered = self.render(table, figure)?;

        log::info!("Saving figure: {:?}", self.config.output_path);
        encode::write_png(
            &self.config.output_path,
            (rendered.summary.width, rendered.summary.height),
            rendered.pixels(),
            self.config.pixels_per_meter(),
        )?;

        Ok(rendered.summary)
    }

    fn draw_panel(
        &self,
        area: &Area<'_>,
        table: &ResultsTable,
        figure: &FigureSpec,
        panel: &PanelSpec,
    ) -> Result<PanelSummary> {
        let metrics = &self.metrics;
        let xs = table.column(figure.x_column);

        let x_range = layout::axis_range(xs);
        let y_range = layout::axis_range(
            panel
                .series
                .iter()
                .flat_map(|series| table.column(series.column)),
        );
        let x_precision = layout::tick_precision(&x_range);
        let y_precision = layout::tick_precision(&y_range);

        let fit = layout::tight_layout(metrics, &layout::extreme_tick_labels(&y_range));
        log::debug!(
            "Plot area '{}': x {:?}, y {:?}, layout {:?}",
            panel.title,
            x_range,
            y_range,
            fit
        );

        let mut chart = ChartBuilder::on(area)
            .caption(&panel.title, font(metrics.title_px))
            .margin(fit.margin)
            .x_label_area_size(fit.x_label_area)
            .y_label_area_size(fit.y_label_area)
            .build_cartesian_2d(x_range.clone(), y_range.clone())?;

        let x_ticks = |v: &f64| layout::format_tick(*v, x_precision);
        let y_ticks = |v: &f64| layout::format_tick(*v, y_precision);
        let mut mesh = chart.configure_mesh();
        mesh.x_desc(panel.x_label.as_str())
            .y_desc(panel.y_label.as_str())
            .label_style(font(metrics.base_px))
            .axis_desc_style(font(metrics.base_px))
            .x_label_formatter(&x_ticks)
            .y_label_formatter(&y_ticks)
            .x_labels(10)
            .y_labels(8)
            .bold_line_style(GRID_GRAY.stroke_width(metrics.grid_px))
            .light_line_style(WHITE);
        if !panel.grid {
            mesh.disable_mesh();
        }
        mesh.draw()?;

        let mut points_drawn = 0;
        for series in &panel.series {
            points_drawn += self.draw_series(&mut chart, xs, table.column(series.column), series)?;
        }

        let mut legend = None;
        if let Some(preferred) = panel.legend {
            let points = panel.series.iter().flat_map(|series| {
                xs.iter().copied().zip(table.column(series.column).iter().copied())
            });
            let corner = layout::best_legend_corner(
                points,
                &x_range,
                &y_range,
                chart.plotting_area().dim_in_pixel(),
                metrics.legend_box(&panel.labels()),
                metrics.label_pad_px,
                preferred,
            );
            log::debug!("Plot area '{}': legend at {:?}", panel.title, corner);
            legend = Some(corner);

            chart
                .configure_series_labels()
                .position(legend_position(corner))
                .label_font(font(metrics.base_px))
                .legend_area_size(metrics.legend_area_px)
                .margin(metrics.label_pad_px)
                .background_style(WHITE.mix(0.8))
                .border_style(LEGEND_EDGE)
                .draw()?;
        }

        Ok(PanelSummary {
            title: panel.title.clone(),
            x_label: panel.x_label.clone(),
            y_label: panel.y_label.clone(),
            series_labels: panel.series.iter().map(|s| s.label.clone()).collect(),
            points_drawn,
            legend,
        })
    }

    /// Draw one series as runs of finite points, labeling only the first run
    fn draw_series(
        &self,
        chart: &mut ChartContext<'_, BitMapBackend<'_>, Cartesian2d<RangedCoordf64, RangedCoordf64>>,
        xs: &[f64],
        ys: &[f64],
        series: &SeriesSpec,
    ) -> Result<usize> {
        let style = series.style.color.stroke_width(self.metrics.line_px(series.style.weight));
        let (dash, gap) = self.metrics.dash_px(series.style.weight);

        let mut runs = layout::finite_runs(xs, ys);
        let points: usize = runs.iter().map(Vec::len).sum();
        if points < xs.len().min(ys.len()) {
            log::warn!(
                "Series '{}': skipped {} non-finite sample(s)",
                series.label,
                xs.len().min(ys.len()) - points
            );
        }
        // An empty run still yields a legend entry
        if runs.is_empty() {
            runs.push(Vec::new());
        }

        for (n, run) in runs.into_iter().enumerate() {
            let anno = match series.style.kind {
                LineKind::Dashed if !run.is_empty() => {
                    chart.draw_series(DashedLineSeries::new(run, dash, gap, style))?
                }
                _ => chart.draw_series(LineSeries::new(run, style))?,
            };
            if n == 0 {
                let handle = self.metrics.legend_handle_px as i32;
                anno.label(series.label.as_str());
                match series.style.kind {
                    LineKind::Solid => {
                        anno.legend(move |(x, y)| {
                            PathElement::new(vec![(x, y), (x + handle, y)], style)
                        });
                    }
                    LineKind::Dashed => {
                        anno.legend(move |(x, y)| {
                            DashedPathElement::new(vec![(x, y), (x + handle, y)], dash, gap, style)
                        });
                    }
                }
            }
        }

        Ok(points)
    }
}

fn font(size_px: f64) -> FontDesc<'static> {
    FontDesc::new(FontFamily::SansSerif, size_px, FontStyle::Normal)
}

fn legend_position(corner: LegendCorner) -> SeriesLabelPosition {
    match corner {
        LegendCorner::UpperLeft => SeriesLabelPosition::UpperLeft,
        LegendCorner::UpperRight => SeriesLabelPosition::UpperRight,
        LegendCorner::LowerLeft => SeriesLabelPosition::LowerLeft,
        LegendCorner::LowerRight => SeriesLabelPosition::LowerRight,
    }
}

/// Make the embedded monospace font the sans-serif family used for all text
fn register_embedded_font() -> Result<()> {
    let bytes: &'static [u8] = dejavu::sans_mono::regular();
    register_font("sans-serif", FontStyle::Normal, bytes)
        .map_err(|_| ReportError::Font("embedded DejaVu Sans Mono is not a valid font".to_string()))
}

/// Load the results table, render the figure and save it, all per `config`
pub fn render_report(config: &ReportConfig) -> Result<FigureSummary> {
    let table = ResultsTable::from_path(&config.input_path)?;
    let figure = FigureSpec::hil_results();
    Renderer::new(config.clone()).render_to_file(&table, &figure)
}
