//! Results table loading
//!
//! The results file is a comma-separated table with a header row. Rows are
//! deserialized into a typed [`Sample`] and stored column-wise so whole
//! columns can be handed to the plotting code.

use crate::types::{ReportError, Result};
use serde::Deserialize;
use std::fmt;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// A required column of the results table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    /// Sample time in seconds
    Time,
    /// Reference / setpoint signal
    Reference,
    /// Tracked output (z0)
    Tracking,
    /// Plant output
    PlantOutput,
    /// First derivative estimate (z1)
    Derivative1,
    /// Second derivative estimate (z2)
    Derivative2,
    /// Third derivative estimate (z3)
    Derivative3,
}

impl Column {
    /// Every required column, in file order
    pub const ALL: [Column; 7] = [
        Column::Time,
        Column::Reference,
        Column::Tracking,
        Column::PlantOutput,
        Column::Derivative1,
        Column::Derivative2,
        Column::Derivative3,
    ];

    /// Header text naming this column in the results file
    pub fn header(self) -> &'static str {
        match self {
            Column::Time => "Tiempo",
            Column::Reference => "Referencia",
            Column::Tracking => "z0_Seguimiento",
            Column::PlantOutput => "Salida_Planta",
            Column::Derivative1 => "z1_Derivada1",
            Column::Derivative2 => "z2_Derivada2",
            Column::Derivative3 => "z3_Derivada3",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.header())
    }
}

/// One row of the results file
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Sample {
    #[serde(rename = "Tiempo")]
    pub time: f64,
    #[serde(rename = "Referencia")]
    pub reference: f64,
    #[serde(rename = "z0_Seguimiento")]
    pub tracking: f64,
    #[serde(rename = "Salida_Planta")]
    pub plant_output: f64,
    #[serde(rename = "z1_Derivada1")]
    pub derivative1: f64,
    #[serde(rename = "z2_Derivada2")]
    pub derivative2: f64,
    #[serde(rename = "z3_Derivada3")]
    pub derivative3: f64,
}

impl Sample {
    fn values(&self) -> [f64; 7] {
        [
            self.time,
            self.reference,
            self.tracking,
            self.plant_output,
            self.derivative1,
            self.derivative2,
            self.derivative3,
        ]
    }
}

/// Column-wise, read-only view of the results file
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultsTable {
    columns: [Vec<f64>; 7],
}

impl ResultsTable {
    /// Load the results table from a file
    pub fn from_path(path: &Path) -> Result<Self> {
        log::info!("Loading results table: {:?}", path);

        let file = File::open(path)?;
        let table = Self::from_reader(BufReader::new(file))?;

        log::info!("Loaded {} samples from {:?}", table.len(), path);
        Ok(table)
    }

    /// Load the results table from any reader producing delimited text
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        // Report a missing column by name instead of a serde field error
        let headers = csv_reader.headers()?.clone();
        log::debug!("Results table header: {:?}", headers);
        for column in Column::ALL {
            if !headers.iter().any(|h| h == column.header()) {
                return Err(ReportError::MissingColumn(column.header().to_string()));
            }
        }

        let mut table = ResultsTable::default();
        for record in csv_reader.deserialize::<Sample>() {
            table.push(&record?);
        }

        Ok(table)
    }

    /// Build a table directly from samples
    pub fn from_samples<'a>(samples: impl IntoIterator<Item = &'a Sample>) -> Self {
        let mut table = ResultsTable::default();
        for sample in samples {
            table.push(sample);
        }
        table
    }

    fn push(&mut self, sample: &Sample) {
        for (column, value) in self.columns.iter_mut().zip(sample.values()) {
            column.push(value);
        }
    }

    /// Number of samples (rows)
    pub fn len(&self) -> usize {
        self.columns[Column::Time.index()].len()
    }

    /// True if the file held a header but no samples
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All values of one column, in row order
    pub fn column(&self, column: Column) -> &[f64] {
        &self.columns[column.index()]
    }

    /// Sample time axis
    pub fn time(&self) -> &[f64] {
        self.column(Column::Time)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str =
        "Tiempo,Referencia,z0_Seguimiento,Salida_Planta,z1_Derivada1,z2_Derivada2,z3_Derivada3";

    #[test]
    fn test_load_from_reader() {
        let data = format!(
            "{}\n0.0,0.0,0.0,0.0,0.0,0.0,0.0\n0.01,0.01,0.009,0.008,1.0,0.5,-0.25\n",
            HEADER
        );
        let table = ResultsTable::from_reader(data.as_bytes()).unwrap();

        assert_eq!(table.len(), 2);
        assert_eq!(table.time(), &[0.0, 0.01]);
        assert_eq!(table.column(Column::Tracking), &[0.0, 0.009]);
        assert_eq!(table.column(Column::Derivative3), &[0.0, -0.25]);
    }

    #[test]
    fn test_columns_matched_by_name() {
        // Reordered header plus an extra column that is ignored
        let data = "Extra,z3_Derivada3,z2_Derivada2,z1_Derivada1,Salida_Planta,z0_Seguimiento,Referencia,Tiempo\n\
                    9, 7, 6, 5, 4, 3, 2, 1\n";
        let table = ResultsTable::from_reader(data.as_bytes()).unwrap();

        assert_eq!(table.len(), 1);
        assert_eq!(table.time(), &[1.0]);
        assert_eq!(table.column(Column::Reference), &[2.0]);
        assert_eq!(table.column(Column::Derivative3), &[7.0]);
    }

    #[test]
    fn test_missing_column() {
        let data = "Tiempo,Referencia,z0_Seguimiento,Salida_Planta,z1_Derivada1,z2_Derivada2\n\
                    0,0,0,0,0,0\n";
        let err = ResultsTable::from_reader(data.as_bytes()).unwrap_err();
        match err {
            ReportError::MissingColumn(name) => assert_eq!(name, "z3_Derivada3"),
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_malformed_rows() {
        let short_row = format!("{}\n0,0,0,0,0,0\n", HEADER);
        assert!(matches!(
            ResultsTable::from_reader(short_row.as_bytes()),
            Err(ReportError::Csv(_))
        ));

        let not_a_number = format!("{}\n0,abc,0,0,0,0,0\n", HEADER);
        assert!(matches!(
            ResultsTable::from_reader(not_a_number.as_bytes()),
            Err(ReportError::Csv(_))
        ));
    }

    #[test]
    fn test_header_only() {
        let table = ResultsTable::from_reader(format!("{}\n", HEADER).as_bytes()).unwrap();
        assert!(table.is_empty());
        assert!(table.column(Column::Reference).is_empty());
    }

    #[test]
    fn test_non_finite_values_load() {
        let data = format!("{}\n0,NaN,inf,0,0,0,0\n", HEADER);
        let table = ResultsTable::from_reader(data.as_bytes()).unwrap();
        assert!(table.column(Column::Reference)[0].is_nan());
        assert!(table.column(Column::Tracking)[0].is_infinite());
    }

    #[test]
    fn test_missing_file() {
        let err = ResultsTable::from_path(Path::new("does/not/exist.txt")).unwrap_err();
        assert!(matches!(err, ReportError::IoError(_)));
    }

    #[test]
    fn test_column_headers() {
        let headers: Vec<&str> = Column::ALL.iter().map(|c| c.header()).collect();
        assert_eq!(headers.join(","), HEADER);
        assert_eq!(Column::Derivative2.to_string(), "z2_Derivada2");
    }
}
