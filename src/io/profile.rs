//! Household profile CSV reader.
//!
//! Expects a header row with `load` and `pv` columns (average power in kW);
//! any other columns, including a leading timestamp, are ignored. The
//! sampling interval is not read from the file — the caller supplies it.

use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::series::{SeriesError, TimeSeries};

/// Error reading or interpreting a profile file.
#[derive(Debug)]
pub enum ProfileError {
    /// File or CSV-level read failure.
    Read(String),
    /// The header row lacks a required column.
    MissingColumn(&'static str),
    /// A data cell did not parse as a number.
    Parse {
        /// 1-based data row number (excluding the header).
        row: usize,
        /// Column the bad cell belongs to.
        column: &'static str,
        /// Parser message.
        message: String,
    },
    /// The parsed columns do not form a valid series.
    Series(SeriesError),
}

impl fmt::Display for ProfileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Read(msg) => write!(f, "profile error: {msg}"),
            Self::MissingColumn(name) => {
                write!(f, "profile error: missing required column \"{name}\"")
            }
            Self::Parse {
                row,
                column,
                message,
            } => write!(
                f,
                "profile error: row {row}, column \"{column}\": {message}"
            ),
            Self::Series(e) => write!(f, "profile error: {e}"),
        }
    }
}

impl From<SeriesError> for ProfileError {
    fn from(e: SeriesError) -> Self {
        Self::Series(e)
    }
}

/// Loads a household profile from a CSV file.
///
/// # Errors
///
/// Returns a [`ProfileError`] if the file cannot be read, lacks the `load` or
/// `pv` column, contains a non-numeric cell, or yields an invalid series.
pub fn load_profile(path: &Path, dt_hours: f32) -> Result<TimeSeries, ProfileError> {
    let file = File::open(path)
        .map_err(|e| ProfileError::Read(format!("cannot open \"{}\": {e}", path.display())))?;
    read_profile(file, dt_hours)
}

/// Reads a household profile from any reader.
///
/// # Errors
///
/// Same conditions as [`load_profile`], minus file opening.
pub fn read_profile(reader: impl Read, dt_hours: f32) -> Result<TimeSeries, ProfileError> {
    let mut rdr = csv::ReaderBuilder::new().from_reader(reader);

    let headers = rdr
        .headers()
        .map_err(|e| ProfileError::Read(e.to_string()))?
        .clone();
    let load_idx = column_index(&headers, "load")?;
    let pv_idx = column_index(&headers, "pv")?;

    let mut load_kw = Vec::new();
    let mut pv_kw = Vec::new();
    for (i, record) in rdr.records().enumerate() {
        let record = record.map_err(|e| ProfileError::Read(e.to_string()))?;
        load_kw.push(parse_cell(&record, load_idx, "load", i + 1)?);
        pv_kw.push(parse_cell(&record, pv_idx, "pv", i + 1)?);
    }

    Ok(TimeSeries::from_load_pv(&load_kw, &pv_kw, dt_hours)?)
}

fn column_index(headers: &csv::StringRecord, name: &'static str) -> Result<usize, ProfileError> {
    headers
        .iter()
        .position(|h| h.trim() == name)
        .ok_or(ProfileError::MissingColumn(name))
}

fn parse_cell(
    record: &csv::StringRecord,
    idx: usize,
    column: &'static str,
    row: usize,
) -> Result<f32, ProfileError> {
    let cell = record.get(idx).ok_or(ProfileError::Parse {
        row,
        column,
        message: "cell missing".to_string(),
    })?;
    cell.trim().parse::<f32>().map_err(|e| ProfileError::Parse {
        row,
        column,
        message: format!("\"{cell}\": {e}"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_load_and_pv_columns() {
        let csv = "time,load,pv\n\
                   2014-01-01 00:00,0.4,0.0\n\
                   2014-01-01 00:15,0.3,1.2\n";
        let series = read_profile(csv.as_bytes(), 0.25).unwrap();
        assert_eq!(series.len(), 2);
        let s = series.samples();
        assert!((s[0].load_kw - 0.4).abs() < 1e-6);
        assert!((s[1].pv_kw - 1.2).abs() < 1e-6);
        assert!((s[1].residual_kw + 0.9).abs() < 1e-6);
    }

    #[test]
    fn column_order_is_irrelevant() {
        let csv = "pv,load\n1.0,2.0\n";
        let series = read_profile(csv.as_bytes(), 0.25).unwrap();
        let s = series.samples()[0];
        assert_eq!(s.load_kw, 2.0);
        assert_eq!(s.pv_kw, 1.0);
    }

    #[test]
    fn missing_column_reported() {
        let csv = "time,load\n2014-01-01,0.4\n";
        let err = read_profile(csv.as_bytes(), 0.25).unwrap_err();
        assert!(matches!(err, ProfileError::MissingColumn("pv")));
    }

    #[test]
    fn bad_number_reports_row_and_column() {
        let csv = "load,pv\n0.4,0.0\nnope,0.1\n";
        let err = read_profile(csv.as_bytes(), 0.25).unwrap_err();
        match err {
            ProfileError::Parse { row, column, .. } => {
                assert_eq!(row, 2);
                assert_eq!(column, "load");
            }
            other => panic!("expected parse error, got {other}"),
        }
    }

    #[test]
    fn empty_file_yields_series_error() {
        let csv = "load,pv\n";
        let err = read_profile(csv.as_bytes(), 0.25).unwrap_err();
        assert!(matches!(err, ProfileError::Series(_)));
    }
}
