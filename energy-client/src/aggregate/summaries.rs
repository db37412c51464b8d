use time::{Date, Month};

use crate::domain::{DailyIndex, Measurement};

/// Totals and mean temperature over some selection of measurements.
///
/// An empty selection yields all zeros.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Summary {
    pub total_consumption_kwh: f64,
    pub total_production_kwh: f64,
    pub average_temperature_c: f64,
}

#[derive(Debug, Default)]
struct Accumulator {
    consumption_kwh: f64,
    production_kwh: f64,
    temperature_sum: f64,
    samples: usize,
}

impl Accumulator {
    fn add(&mut self, m: &Measurement) {
        self.consumption_kwh += m.consumption_kwh;
        self.production_kwh += m.production_kwh;
        self.temperature_sum += m.temperature_c;
        self.samples += 1;
    }

    fn mean_temperature(&self) -> f64 {
        if self.samples == 0 {
            0.0
        } else {
            self.temperature_sum / self.samples as f64
        }
    }

    fn into_summary(self) -> Summary {
        Summary {
            total_consumption_kwh: self.consumption_kwh,
            total_production_kwh: self.production_kwh,
            average_temperature_c: self.mean_temperature(),
        }
    }
}

/// Summary over the days in `[start, end]`, inclusive.
///
/// Reversed bounds are swapped. Temperature is the flat mean over every
/// measurement in the range.
pub fn range_summary(index: &DailyIndex, start: Date, end: Date) -> Summary {
    let mut acc = Accumulator::default();
    for (_, rows) in index.days_between(start, end) {
        rows.iter().for_each(|m| acc.add(m));
    }
    acc.into_summary()
}

/// Summary over one calendar month.
///
/// Temperature is the mean of per-day means, so every day weighs the same
/// regardless of how many samples it holds. This intentionally differs from
/// [`range_summary`] and [`year_summary`].
pub fn month_summary(index: &DailyIndex, year: i32, month: Month) -> Summary {
    let mut totals = Accumulator::default();
    let mut day_means: Vec<f64> = Vec::new();

    for (_, rows) in index.days_in_month(year, month) {
        let mut day = Accumulator::default();
        for m in rows {
            totals.add(m);
            day.add(m);
        }
        if day.samples > 0 {
            day_means.push(day.mean_temperature());
        }
    }

    let average_temperature_c = if day_means.is_empty() {
        0.0
    } else {
        day_means.iter().sum::<f64>() / day_means.len() as f64
    };

    Summary {
        total_consumption_kwh: totals.consumption_kwh,
        total_production_kwh: totals.production_kwh,
        average_temperature_c,
    }
}

/// Summary over every measurement stamped in `year`, with a flat temperature mean.
pub fn year_summary(measurements: &[Measurement], year: i32) -> Summary {
    measurements
        .iter()
        .filter(|m| m.year() == year)
        .fold(Accumulator::default(), |mut acc, m| {
            acc.add(m);
            acc
        })
        .into_summary()
}
