use anyhow::{bail, Result};
use report_service::{
    config::AppConfig,
    observability,
    pipeline::Pipeline,
    session::{Session, SessionOptions},
    sinks::ReportFileSink,
    sources::MeasurementCsvFileSource,
    transform,
};
use energy_client::domain::Measurement;
use std::{env, io, path::PathBuf, sync::Arc};

/// Interactive energy report tool.
///
/// Usage:
///   energy-report [measurements_csv]
fn main() -> Result<()> {
    // Load configuration (ENERGY_REPORT_CONFIG can point to a specific file).
    let mut cfg = AppConfig::load()?;

    observability::init_tracing(&cfg.log.filter);

    let args: Vec<String> = env::args().collect();
    if args.len() > 2 {
        bail!("usage: energy-report [measurements_csv]");
    }
    if let Some(path) = args.get(1) {
        cfg.data.path = PathBuf::from(path);
    }

    let pipeline: Pipeline<_, Measurement> = Pipeline {
        source: MeasurementCsvFileSource::new(&cfg.data.path),
        transforms: vec![Arc::new(transform::MeasurementValidation)],
    };
    let measurements = pipeline.load()?;
    tracing::info!(
        path = %cfg.data.path.display(),
        measurements = measurements.len(),
        "measurement store loaded"
    );

    let sink = ReportFileSink::new(&cfg.report.path);
    let options = SessionOptions {
        year: cfg.data.year,
        destination: sink.path().display().to_string(),
    };

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut session = Session::new(&measurements, options, sink, stdin.lock(), stdout.lock());
    session.run()?;

    Ok(())
}
