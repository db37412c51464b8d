use time::{Date, PrimitiveDateTime};

/// One hourly energy record. Timestamps are local wall-clock time, no zone attached.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Measurement {
    pub ts: PrimitiveDateTime,
    pub consumption_kwh: f64,
    pub production_kwh: f64,
    pub temperature_c: f64,
}

impl Measurement {
    pub fn date(&self) -> Date {
        self.ts.date()
    }

    pub fn year(&self) -> i32 {
        self.ts.year()
    }
}
