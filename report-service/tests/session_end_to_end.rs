use std::{fs, io::Cursor, path::Path, sync::Arc};

use energy_client::domain::Measurement;
use report_service::{
    pipeline::Pipeline,
    session::{Session, SessionOptions, State},
    sinks::ReportFileSink,
    sources::MeasurementCsvFileSource,
    transform::MeasurementValidation,
};

const CSV: &str = "\
Time;Consumption (kWh);Production (kWh);Temperature (°C)
2025-01-01T00:00:00;1,0;0,5;10,0
2025-01-01T01:00:00;2,0;0,5;12,0
broken row
2025-01-02T00:00:00;1,0;1,0;8,0
2025-01-03T00:00:00;nan;0,0;0,0
";

fn load(dir: &Path) -> Vec<Measurement> {
    let csv_path = dir.join("2025.csv");
    fs::write(&csv_path, CSV).unwrap();

    let pipeline: Pipeline<_, Measurement> = Pipeline {
        source: MeasurementCsvFileSource::new(&csv_path),
        transforms: vec![Arc::new(MeasurementValidation)],
    };
    pipeline.load().unwrap()
}

fn run(measurements: &[Measurement], report_path: &Path, script: &str) -> (State, String) {
    let mut out = Vec::new();
    let mut session = Session::new(
        measurements,
        SessionOptions {
            year: 2025,
            destination: report_path.display().to_string(),
        },
        ReportFileSink::new(report_path),
        Cursor::new(script.as_bytes()),
        &mut out,
    );
    session.run().unwrap();
    let state = session.state();
    drop(session);
    (state, String::from_utf8(out).unwrap())
}

#[test]
fn range_report_is_displayed_and_persisted() {
    let dir = tempfile::tempdir().unwrap();
    let measurements = load(dir.path());
    assert_eq!(measurements.len(), 3);

    let report_path = dir.path().join("report.txt");
    let (state, out) = run(&measurements, &report_path, "1\n01.01.2025\n02.01.2025\n1\n3\n");

    assert_eq!(state, State::Terminated);
    let expected = "\
-----------------------------------------------------
Report for the period 01.01.2025–02.01.2025
- Total consumption: 4,00 kWh
- Total production: 2,00 kWh
- Average temperature: 10,00 °C
";
    assert_eq!(fs::read_to_string(&report_path).unwrap(), expected);
    assert!(out.contains(expected));
}

#[test]
fn month_report_overwrites_earlier_file() {
    let dir = tempfile::tempdir().unwrap();
    let measurements = load(dir.path());
    let report_path = dir.path().join("report.txt");

    let (_, _) = run(&measurements, &report_path, "3\n1\n2\n2\n1\n1\n1\n3\n");

    let saved = fs::read_to_string(&report_path).unwrap();
    assert!(saved.contains("Report for the month: January\n"));
    assert!(saved.contains("- Average temperature: 9,50 °C\n"));
    assert!(!saved.contains("Report for the year"));
    assert_eq!(saved.lines().count(), 5);
}

#[test]
fn unwritable_destination_does_not_end_session() {
    let dir = tempfile::tempdir().unwrap();
    let measurements = load(dir.path());
    let report_path = dir.path().join("no-such-dir").join("report.txt");

    let (state, out) = run(&measurements, &report_path, "3\n1\n2\n4\n");

    assert_eq!(state, State::Terminated);
    assert!(out.contains("Error: could not save the report"));
    assert!(!report_path.exists());
}
