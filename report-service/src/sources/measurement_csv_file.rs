use std::{fs, path::PathBuf};

use csv::StringRecord;
use energy_client::domain::Measurement;
use time::{macros::format_description, PrimitiveDateTime};

use crate::pipeline::{PipelineError, Source};

/// CSV source for hourly `Measurement`s.
///
/// The first line is a header. Columns are read by position:
/// - timestamp (ISO 8601 local date-time, optional offset is ignored)
/// - consumption in kWh
/// - production in kWh
/// - temperature in °C
///
/// Fields are separated by `;` when the header contains one, otherwise by `,`.
/// Numbers may use either `.` or `,` as decimal separator. Rows that cannot be
/// interpreted are skipped.
pub struct MeasurementCsvFileSource {
    path: PathBuf,
}

impl MeasurementCsvFileSource {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }
}

fn detect_delimiter(contents: &str) -> u8 {
    match contents.lines().next() {
        Some(header) if header.contains(';') => b';',
        _ => b',',
    }
}

fn parse_decimal(s: &str) -> Option<f64> {
    s.trim().replace(',', ".").parse().ok()
}

/// Drops a trailing `Z` or `±HH:MM` offset. The wall-clock reading is kept, no zone conversion.
fn strip_offset(s: &str) -> &str {
    if let Some(rest) = s.strip_suffix(['Z', 'z']) {
        return rest;
    }

    let Some(split) = s.len().checked_sub(6) else {
        return s;
    };
    match (s.get(..split), s.get(split..).map(str::as_bytes)) {
        (Some(rest), Some([sign, h1, h2, b':', m1, m2]))
            if matches!(*sign, b'+' | b'-') && [h1, h2, m1, m2].iter().all(|b| b.is_ascii_digit()) =>
        {
            rest
        }
        _ => s,
    }
}

fn parse_timestamp(s: &str) -> Option<PrimitiveDateTime> {
    let s = s.trim().replacen(' ', "T", 1);
    let s = strip_offset(&s);

    PrimitiveDateTime::parse(s, format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]"))
        .or_else(|_| {
            PrimitiveDateTime::parse(
                s,
                format_description!("[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond]"),
            )
        })
        .or_else(|_| PrimitiveDateTime::parse(s, format_description!("[year]-[month]-[day]T[hour]:[minute]")))
        .ok()
}

pub(crate) fn record_to_measurement(record: &StringRecord) -> Result<Measurement, PipelineError> {
    if record.len() < 4 {
        return Err(PipelineError::Source(format!(
            "expected at least 4 columns, got {}",
            record.len()
        )));
    }

    let field = |idx: usize| record.get(idx).unwrap_or("");

    let ts_str = field(0);
    let ts = parse_timestamp(ts_str).ok_or_else(|| PipelineError::Source(format!("invalid timestamp '{ts_str}'")))?;

    let number = |idx: usize, name: &str| -> Result<f64, PipelineError> {
        let raw = field(idx);
        parse_decimal(raw).ok_or_else(|| PipelineError::Source(format!("invalid {name} '{raw}'")))
    };

    Ok(Measurement {
        ts,
        consumption_kwh: number(1, "consumption")?,
        production_kwh: number(2, "production")?,
        temperature_c: number(3, "temperature")?,
    })
}

impl Source<Measurement> for MeasurementCsvFileSource {
    fn load(&self) -> Result<Vec<Measurement>, PipelineError> {
        let contents = fs::read_to_string(&self.path).map_err(|e| {
            PipelineError::Source(format!("failed to open CSV file '{}': {e}", self.path.display()))
        })?;

        let mut rdr = csv::ReaderBuilder::new()
            .delimiter(detect_delimiter(&contents))
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(contents.as_bytes());

        let mut rows = Vec::new();
        let mut skipped: usize = 0;

        for result in rdr.records() {
            let parsed = result
                .map_err(|e| PipelineError::Source(format!("failed to read CSV record: {e}")))
                .and_then(|record| {
                    record_to_measurement(&record).map_err(|e| {
                        let line = record.position().map(|p| p.line()).unwrap_or_default();
                        PipelineError::Source(format!("line {line}: {e}"))
                    })
                });

            match parsed {
                Ok(m) => rows.push(m),
                Err(e) => {
                    skipped += 1;
                    metrics::counter!("measurement_csv_parse_errors_total").increment(1);
                    tracing::warn!(error = %e, path = %self.path.display(), "skipping unreadable measurement row");
                }
            }
        }

        tracing::info!(
            path = %self.path.display(),
            loaded = rows.len(),
            skipped,
            "measurement file read"
        );

        Ok(rows)
    }
}
