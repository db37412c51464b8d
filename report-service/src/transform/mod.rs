use crate::pipeline::{PipelineError, Transform};
use energy_client::domain::Measurement;
use time::macros::datetime;

/// Pure validation of a `Measurement` record.
///
/// Rules:
/// - consumption, production and temperature must be finite numbers.
/// - ts must be within a broad sanity window [1970-01-01, 2100-01-01).
///
/// Negative consumption is allowed (net metering).
pub fn validate_measurement(m: Measurement) -> Result<Measurement, PipelineError> {
    let fields = [
        ("consumption_kwh", m.consumption_kwh),
        ("production_kwh", m.production_kwh),
        ("temperature_c", m.temperature_c),
    ];
    if let Some((name, _)) = fields.iter().find(|(_, v)| !v.is_finite()) {
        return Err(PipelineError::Transform(format!("{name} must be finite")));
    }

    let min_ts = datetime!(1970-01-01 00:00:00);
    let max_ts = datetime!(2100-01-01 00:00:00);

    if m.ts < min_ts || m.ts >= max_ts {
        return Err(PipelineError::Transform(format!("timestamp {} out of allowed range", m.ts)));
    }

    Ok(m)
}

#[derive(Clone, Default)]
pub struct MeasurementValidation;

impl Transform<Measurement> for MeasurementValidation {
    fn apply(&self, input: Measurement) -> Result<Measurement, PipelineError> {
        match validate_measurement(input) {
            Ok(m) => Ok(m),
            Err(e) => {
                metrics::counter!("measurement_validation_rejected_total").increment(1);
                Err(e)
            }
        }
    }
}
