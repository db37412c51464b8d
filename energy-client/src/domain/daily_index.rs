use std::collections::BTreeMap;

use time::{Date, Month};

use super::Measurement;

/// Measurements grouped by calendar date.
///
/// Within a day, measurements keep the order they were ingested in. Every
/// measurement of the source slice lands in exactly one day.
#[derive(Debug, Clone, Default)]
pub struct DailyIndex {
    days: BTreeMap<Date, Vec<Measurement>>,
}

impl DailyIndex {
    pub fn build(measurements: &[Measurement]) -> Self {
        let mut days: BTreeMap<Date, Vec<Measurement>> = BTreeMap::new();
        for m in measurements {
            days.entry(m.date()).or_default().push(*m);
        }
        Self { days }
    }

    /// Number of distinct days.
    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    pub fn measurement_count(&self) -> usize {
        self.days.values().map(Vec::len).sum()
    }

    pub fn day(&self, date: Date) -> Option<&[Measurement]> {
        self.days.get(&date).map(Vec::as_slice)
    }

    /// Days between `start` and `end`, both inclusive, in calendar order.
    /// The bounds may be given in either order.
    pub fn days_between(&self, start: Date, end: Date) -> impl Iterator<Item = (Date, &[Measurement])> + '_ {
        let (start, end) = if end < start { (end, start) } else { (start, end) };
        self.days.range(start..=end).map(|(d, rows)| (*d, rows.as_slice()))
    }

    /// Days of one calendar month, in calendar order.
    pub fn days_in_month(&self, year: i32, month: Month) -> impl Iterator<Item = (Date, &[Measurement])> + '_ {
        let bounds = Date::from_calendar_date(year, month, 1).ok().and_then(|first| {
            first
                .replace_day(time::util::days_in_year_month(year, month))
                .ok()
                .map(|last| (first, last))
        });

        bounds
            .into_iter()
            .flat_map(move |(first, last)| self.days.range(first..=last))
            .map(|(d, rows)| (*d, rows.as_slice()))
    }
}
