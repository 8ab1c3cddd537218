//! HIL Report CLI Application
//!
//! Reads `resultados_hil_Rampa.txt` from the working directory, renders the
//! reference-tracking and derivative plots into `resultados_hil.png` and opens
//! the image in the system viewer.

use anyhow::{Context, Result};
use clap::Parser;
use hil_report::ReportConfig;

mod viewer;

/// HIL Report - Plot hardware-in-the-loop results
#[derive(Parser, Debug)]
#[command(name = "hil-report")]
#[command(about = "Plot HIL ramp results into resultados_hil.png", long_about = None)]
#[command(version)]
struct Args {
    /// Save the figure without opening it in a viewer (on Linux, xdg-open never waits for the viewer anyway)
    #[arg(long)]
    no_show: bool,

    /// Verbosity level (can be repeated: -v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    init_logging(args.verbose, args.quiet);

    log::info!("HIL Report CLI v{}", env!("CARGO_PKG_VERSION"));
    log::debug!("Using report library v{}", hil_report::VERSION);

    let config = ReportConfig::default();
    let summary = hil_report::render_report(&config).with_context(|| {
        format!(
            "Failed to plot {:?} into {:?}",
            config.input_path, config.output_path
        )
    })?;

    for panel in &summary.panels {
        log::debug!(
            "Plot area '{}': {} series, {} points",
            panel.title,
            panel.series_labels.len(),
            panel.points_drawn
        );
    }
    log::info!(
        "Figure saved: {:?} ({}x{} px)",
        config.output_path,
        summary.width,
        summary.height
    );

    if args.no_show {
        log::debug!("Display skipped (--no-show)");
    } else {
        viewer::show(&config.output_path);
    }

    Ok(())
}

/// Initialize logging based on verbosity level
fn init_logging(verbose: u8, quiet: bool) {
    use env_logger::Builder;
    use std::io::Write;

    Builder::new()
        .filter_level(log_level(verbose, quiet))
        .format(|buf, record| {
            writeln!(
                buf,
                "[{} {}] {}",
                record.level(),
                record.target(),
                record.args()
            )
        })
        .init();
}

fn log_level(verbose: u8, quiet: bool) -> log::LevelFilter {
    use log::LevelFilter;

    if quiet {
        LevelFilter::Error
    } else {
        match verbose {
            0 => LevelFilter::Info,
            1 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }
}
