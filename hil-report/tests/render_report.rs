// End-to-end runs of the report: results file in, PNG out
use hil_report::{render_report, ReportConfig, ReportError};
use std::fs::{self, File};
use std::path::Path;

const HEADER: &str =
    "Tiempo,Referencia,z0_Seguimiento,Salida_Planta,z1_Derivada1,z2_Derivada2,z3_Derivada3";

/// A ramp response like the ones the HIL bench writes
fn write_ramp_results(path: &Path, rows: usize) {
    let mut text = format!("{}\n", HEADER);
    for i in 0..rows {
        let t = i as f64 * 0.001;
        let out = t - 0.02 * (1.0 - (-t * 50.0).exp());
        text.push_str(&format!(
            "{:.6},{:.6},{:.6},{:.6},{:.6},{:.6},{:.6}\n",
            t,
            t,
            out + 0.001,
            out,
            1.0 - (-t * 50.0).exp(),
            50.0 * (-t * 50.0).exp(),
            -2500.0 * (-t * 50.0).exp(),
        ));
    }
    fs::write(path, text).unwrap();
}

fn test_config(dir: &Path) -> ReportConfig {
    ReportConfig::default()
        .with_input_path(dir.join("resultados_hil_Rampa.txt"))
        .with_output_path(dir.join("resultados_hil.png"))
        .with_dpi(40)
}

#[test]
fn writes_two_panel_png() {
    let dir = tempfile::tempdir().unwrap();
    let config = test_config(dir.path());
    write_ramp_results(&config.input_path, 200);

    let summary = render_report(&config).unwrap();

    let metadata = fs::metadata(&config.output_path).unwrap();
    assert!(metadata.len() > 0);

    assert_eq!(summary.num_panels(), 2);
    assert_eq!(summary.panels[0].title, "Seguimiento de Referencia");
    assert_eq!(
        summary.panels[0].series_labels,
        vec!["Referencia", "z0 (Seguimiento)", "Salida Planta"]
    );
    assert_eq!(summary.panels[1].title, "Derivadas de Orden Superior");
    assert_eq!(
        summary.panels[1].series_labels,
        vec!["z1 (1ra derivada)", "z2 (2da derivada)", "z3 (3ra derivada)"]
    );
    assert!(summary.panels.iter().all(|p| p.x_label == "Tiempo (s)"));
}

#[test]
fn png_carries_size_and_dpi() {
    let dir = tempfile::tempdir().unwrap();
    let config = test_config(dir.path());
    write_ramp_results(&config.input_path, 10);

    render_report(&config).unwrap();

    let decoder = png::Decoder::new(File::open(&config.output_path).unwrap());
    let reader = decoder.read_info().unwrap();
    let info = reader.info();

    // 12x8 inches at 40 DPI
    assert_eq!((info.width, info.height), (480, 320));
    let dims = info.pixel_dims.unwrap();
    assert_eq!(dims.xppu, config.pixels_per_meter());
    assert_eq!(dims.yppu, config.pixels_per_meter());
    assert_eq!(dims.unit, png::Unit::Meter);
}

#[test]
fn single_row_renders() {
    let dir = tempfile::tempdir().unwrap();
    let config = test_config(dir.path());
    write_ramp_results(&config.input_path, 1);

    let summary = render_report(&config).unwrap();
    assert_eq!(summary.num_series(), 6);
    assert!(config.output_path.exists());
}

#[test]
fn rerun_overwrites_output() {
    let dir = tempfile::tempdir().unwrap();
    let config = test_config(dir.path());
    fs::write(&config.output_path, b"stale").unwrap();
    write_ramp_results(&config.input_path, 20);

    render_report(&config).unwrap();
    render_report(&config).unwrap();

    let bytes = fs::read(&config.output_path).unwrap();
    assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
}

#[test]
fn missing_input_file_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let config = test_config(dir.path());

    let err = render_report(&config).unwrap_err();

    assert!(matches!(err, ReportError::IoError(_)));
    assert!(!config.output_path.exists());
}

#[test]
fn missing_column_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let config = test_config(dir.path());
    fs::write(
        &config.input_path,
        "Tiempo,Referencia,z0_Seguimiento,z1_Derivada1,z2_Derivada2,z3_Derivada3\n0,0,0,0,0,0\n",
    )
    .unwrap();

    let err = render_report(&config).unwrap_err();

    match err {
        ReportError::MissingColumn(name) => assert_eq!(name, "Salida_Planta"),
        other => panic!("unexpected error: {}", other),
    }
    assert!(!config.output_path.exists());
}
