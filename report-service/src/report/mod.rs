//! Human-readable report rendering.

pub mod format;

use std::fmt;

use energy_client::aggregate::Summary;
use time::{Date, Month};

pub use format::{format_date, format_decimal, month_name};

const SEPARATOR_WIDTH: usize = 53;

/// Which aggregation a report was built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportKind {
    Range,
    Month,
    Year,
}

impl ReportKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Range => "range",
            Self::Month => "month",
            Self::Year => "year",
        }
    }
}

/// An immutable, ordered list of report lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    kind: ReportKind,
    lines: Vec<String>,
}

impl Report {
    /// Report over `[start, end]`. Reversed bounds are shown in calendar order.
    pub fn range(start: Date, end: Date, summary: &Summary) -> Self {
        let (start, end) = if end < start { (end, start) } else { (start, end) };
        let title = format!("Report for the period {}–{}", format_date(start), format_date(end));
        Self::build(ReportKind::Range, title, summary)
    }

    pub fn month(month: Month, summary: &Summary) -> Self {
        let title = format!("Report for the month: {}", month_name(month));
        Self::build(ReportKind::Month, title, summary)
    }

    pub fn year(year: i32, summary: &Summary) -> Self {
        let title = format!("Report for the year: {year}");
        Self::build(ReportKind::Year, title, summary)
    }

    fn build(kind: ReportKind, title: String, summary: &Summary) -> Self {
        let lines = vec![
            "-".repeat(SEPARATOR_WIDTH),
            title,
            format!("- Total consumption: {} kWh", format_decimal(summary.total_consumption_kwh)),
            format!("- Total production: {} kWh", format_decimal(summary.total_production_kwh)),
            format!("- Average temperature: {} °C", format_decimal(summary.average_temperature_c)),
        ];
        Self { kind, lines }
    }

    pub fn kind(&self) -> ReportKind {
        self.kind
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }
}

/// One `\n`-terminated line per report line; this is also the persisted form.
impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in &self.lines {
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}
