//! CSV and JSON export for estimate results.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use crate::estimate::projection::CumulativeProjection;
use crate::estimate::report::EstimateReport;

/// Column header for the projection CSV export.
const HEADER: &str = "year,baseline_cost,with_solar_cost,cumulative_benefit";

/// Exports the yearly projection to a CSV file at the given path.
///
/// Writes a header row followed by one data row per projected year.
/// Produces deterministic output for identical inputs.
///
/// # Arguments
///
/// * `projection` - Complete yearly projection
/// * `path` - Output file path
///
/// # Errors
///
/// Returns an `io::Error` if file creation or writing fails.
pub fn export_projection_csv(projection: &CumulativeProjection, path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    let buf = io::BufWriter::new(file);
    write_projection_csv(projection, buf)
}

/// Writes the yearly projection as CSV to any writer.
///
/// # Arguments
///
/// * `projection` - Complete yearly projection
/// * `writer` - Destination implementing `Write`
///
/// # Errors
///
/// Returns an `io::Error` if writing fails.
pub fn write_projection_csv(
    projection: &CumulativeProjection,
    writer: impl Write,
) -> io::Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);

    // Header
    wtr.write_record(HEADER.split(','))?;

    // Data rows
    for point in &projection.years {
        wtr.write_record(&[
            point.year.to_string(),
            format!("{:.2}", point.baseline_cost),
            format!("{:.2}", point.with_solar_cost),
            format!("{:.2}", point.cumulative_benefit()),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

/// Exports the full report as pretty-printed JSON at the given path.
///
/// # Errors
///
/// Returns an `io::Error` if file creation, serialization, or writing fails.
pub fn export_report_json(report: &EstimateReport, path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    let buf = io::BufWriter::new(file);
    write_report_json(report, buf)
}

/// Writes the full report as pretty-printed JSON to any writer.
///
/// # Errors
///
/// Returns an `io::Error` if serialization or writing fails.
pub fn write_report_json(report: &EstimateReport, mut writer: impl Write) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut writer, report)?;
    writer.write_all(b"\n")?;
    writer.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ScenarioConfig;
    use crate::estimate::run_estimate;

    fn make_projection(years: u32) -> CumulativeProjection {
        CumulativeProjection::from_monthly(15_000.0, 9_000.0, years)
    }

    #[test]
    fn header_matches_schema() {
        let projection = make_projection(1);
        let mut buf = Vec::new();
        write_projection_csv(&projection, &mut buf).ok();
        let output = String::from_utf8(buf).ok();
        let first_line = output.as_deref().unwrap_or("").lines().next().unwrap_or("");
        assert_eq!(
            first_line,
            "year,baseline_cost,with_solar_cost,cumulative_benefit"
        );
    }

    #[test]
    fn row_count_matches_year_count() {
        let projection = make_projection(25);
        let mut buf = Vec::new();
        write_projection_csv(&projection, &mut buf).ok();
        let output = String::from_utf8(buf).ok();
        let lines: Vec<&str> = output.as_deref().unwrap_or("").lines().collect();
        // 1 header + 25 data rows
        assert_eq!(lines.len(), 26);
    }

    #[test]
    fn deterministic_output() {
        let projection = make_projection(5);
        let mut buf1 = Vec::new();
        let mut buf2 = Vec::new();
        write_projection_csv(&projection, &mut buf1).ok();
        write_projection_csv(&projection, &mut buf2).ok();
        assert_eq!(buf1, buf2);
    }

    #[test]
    fn round_trip_parseable() {
        let projection = make_projection(3);
        let mut buf = Vec::new();
        write_projection_csv(&projection, &mut buf).ok();

        let mut rdr = csv::ReaderBuilder::new().from_reader(buf.as_slice());
        let headers = rdr.headers().cloned().ok();
        assert_eq!(headers.as_ref().map(csv::StringRecord::len), Some(4));

        let mut row_count = 0;
        for record in rdr.records() {
            let rec = record.ok();
            assert!(rec.is_some(), "every row should parse");
            let rec = rec.as_ref();
            // Year parses as u32
            let year: Result<u32, _> = rec.unwrap()[0].parse();
            assert!(year.is_ok(), "year column should parse as u32");
            // Cost columns parse as f64
            for i in 1..4 {
                let val: Result<f64, _> = rec.unwrap()[i].parse();
                assert!(val.is_ok(), "column {i} should parse as f64");
            }
            row_count += 1;
        }
        assert_eq!(row_count, 3);
    }

    #[test]
    fn benefit_column_is_the_cost_difference() {
        let projection = make_projection(2);
        let mut buf = Vec::new();
        write_projection_csv(&projection, &mut buf).ok();
        let output = String::from_utf8(buf).unwrap_or_default();
        // Year 1: 180000 baseline, 108000 with solar, 72000 benefit.
        assert!(output.contains("1,180000.00,108000.00,72000.00"));
    }

    #[test]
    fn json_report_parses_back() {
        let report = run_estimate(&ScenarioConfig::baseline()).unwrap();
        let mut buf = Vec::new();
        write_report_json(&report, &mut buf).ok();

        let parsed: serde_json::Value =
            serde_json::from_slice(&buf).expect("exported JSON should parse");
        assert!(parsed["scenario"]["panel_kw"].is_number());
        assert!(parsed["monthly"]["monthly_benefit"].is_number());
        assert_eq!(
            parsed["projection"]["years"].as_array().map(Vec::len),
            Some(25)
        );
    }
}
