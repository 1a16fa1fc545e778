//! CSV export for the sweep results table.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use crate::sim::sweep::EvaluationRow;

/// Column header for the results CSV.
const HEADER: &str = "simulation,total_demand_kwh,total_generation_kwh,\
                      capacity_kwh,max_charge_kw,max_discharge_kw,costs,ssr,scr";

/// Exports the results table to a CSV file at the given path.
///
/// Writes a header row followed by one row per [`EvaluationRow`] in table
/// order. Undefined metrics are written as empty cells. Produces
/// deterministic output for identical inputs.
///
/// # Errors
///
/// Returns an `io::Error` if file creation or writing fails.
pub fn export_csv(rows: &[EvaluationRow], path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    let buf = io::BufWriter::new(file);
    write_csv(rows, buf)
}

/// Writes the results table as CSV to any writer.
///
/// # Errors
///
/// Returns an `io::Error` if writing fails.
pub fn write_csv(rows: &[EvaluationRow], writer: impl Write) -> io::Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);

    wtr.write_record(HEADER.split(',').map(str::trim))?;

    for r in rows {
        wtr.write_record(&[
            r.simulation.clone(),
            format!("{:.4}", r.total_demand_kwh),
            format!("{:.4}", r.total_generation_kwh),
            format!("{:.4}", r.capacity_kwh),
            format!("{:.4}", r.max_charge_kw),
            format!("{:.4}", r.max_discharge_kw),
            format!("{:.4}", r.costs),
            fraction_cell(r.ssr),
            fraction_cell(r.scr),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

fn fraction_cell(value: Option<f32>) -> String {
    match value {
        Some(v) => format!("{v:.6}"),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_row(label: &str, capacity_kwh: f32) -> EvaluationRow {
        EvaluationRow {
            simulation: label.to_string(),
            total_demand_kwh: 1000.0,
            total_generation_kwh: 600.0,
            capacity_kwh,
            max_charge_kw: 0.6,
            max_discharge_kw: 0.3,
            costs: 321.45,
            ssr: Some(0.42),
            scr: Some(0.88),
        }
    }

    #[test]
    fn header_matches_schema() {
        let rows = vec![make_row("Greedy", 1.0)];
        let mut buf = Vec::new();
        write_csv(&rows, &mut buf).ok();
        let output = String::from_utf8(buf).ok();
        let first_line = output.as_deref().unwrap_or("").lines().next().unwrap_or("");
        assert_eq!(
            first_line,
            "simulation,total_demand_kwh,total_generation_kwh,\
             capacity_kwh,max_charge_kw,max_discharge_kw,costs,ssr,scr"
        );
    }

    #[test]
    fn row_count_matches_table() {
        let rows: Vec<EvaluationRow> = (0..8).map(|i| make_row("Greedy", i as f32)).collect();
        let mut buf = Vec::new();
        write_csv(&rows, &mut buf).ok();
        let output = String::from_utf8(buf).ok();
        let lines: Vec<&str> = output.as_deref().unwrap_or("").lines().collect();
        // 1 header + 8 data rows
        assert_eq!(lines.len(), 9);
    }

    #[test]
    fn undefined_metric_written_as_empty_cell() {
        let mut row = make_row("Without Storage", 0.0);
        row.scr = None;
        let mut buf = Vec::new();
        write_csv(&[row], &mut buf).ok();
        let output = String::from_utf8(buf).unwrap_or_default();
        let data_line = output.lines().nth(1).unwrap_or("");
        assert!(data_line.ends_with(','), "scr cell should be empty: {data_line}");
    }

    #[test]
    fn deterministic_output() {
        let rows: Vec<EvaluationRow> = (0..5).map(|i| make_row("Greedy", i as f32)).collect();
        let mut buf1 = Vec::new();
        let mut buf2 = Vec::new();
        write_csv(&rows, &mut buf1).ok();
        write_csv(&rows, &mut buf2).ok();
        assert_eq!(buf1, buf2);
    }

    #[test]
    fn round_trip_parseable() {
        let rows = vec![make_row("Without Storage", 0.0), make_row("Greedy", 1.5)];
        let mut buf = Vec::new();
        write_csv(&rows, &mut buf).ok();

        let mut rdr = csv::ReaderBuilder::new().from_reader(buf.as_slice());
        let headers = rdr.headers().cloned().ok();
        assert_eq!(headers.as_ref().map(csv::StringRecord::len), Some(9));

        let mut row_count = 0;
        for record in rdr.records() {
            let rec = record.ok();
            assert!(rec.is_some(), "every row should parse");
            let rec = rec.as_ref();
            // Numeric columns parse as f32
            for i in 1..9 {
                let val: Result<f32, _> = rec.unwrap()[i].parse();
                assert!(val.is_ok(), "column {i} should parse as f32");
            }
            row_count += 1;
        }
        assert_eq!(row_count, 2);
    }
}
