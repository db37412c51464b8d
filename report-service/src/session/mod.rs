//! Interactive report session.
//!
//! The session is a small state machine. Each call to [`Session::step`] reads
//! what the current state needs from the operator, performs the transition and
//! returns the next state. Only console I/O failures escape; every other error
//! is reported to the operator and routes back to a menu.

pub mod error;
pub mod input;

use std::io::{self, BufRead, Write};

use energy_client::{
    aggregate::{month_summary, range_summary, year_summary},
    domain::{DailyIndex, Measurement},
};

use crate::{pipeline::Sink, report::Report};

pub use error::SessionError;
pub use input::{parse_date, parse_month};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    MainMenu,
    AwaitingRangeInput,
    AwaitingMonthInput,
    PostReportMenu,
    Terminated,
}

#[derive(Debug, Clone)]
pub struct SessionOptions {
    /// Year used by the month and full-year reports.
    pub year: i32,
    /// Shown to the operator in the save option.
    pub destination: String,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            year: 2025,
            destination: "report.txt".to_string(),
        }
    }
}

pub struct Session<'a, R, W, K> {
    measurements: &'a [Measurement],
    index: DailyIndex,
    options: SessionOptions,
    sink: K,
    input: R,
    output: W,
    state: State,
    current: Option<Report>,
}

impl<'a, R, W, K> Session<'a, R, W, K>
where
    R: BufRead,
    W: Write,
    K: Sink<Report>,
{
    pub fn new(measurements: &'a [Measurement], options: SessionOptions, sink: K, input: R, output: W) -> Self {
        let index = DailyIndex::build(measurements);
        tracing::debug!(days = index.len(), measurements = measurements.len(), "daily index built");

        Self {
            measurements,
            index,
            options,
            sink,
            input,
            output,
            state: State::MainMenu,
            current: None,
        }
    }

    pub fn state(&self) -> State {
        self.state
    }

    /// The most recently generated report, if any.
    pub fn current_report(&self) -> Option<&Report> {
        self.current.as_ref()
    }

    /// Steps until the session terminates.
    pub fn run(&mut self) -> io::Result<()> {
        while self.state != State::Terminated {
            self.step()?;
        }
        Ok(())
    }

    /// Performs one transition and returns the new state.
    pub fn step(&mut self) -> io::Result<State> {
        let next = match self.state {
            State::MainMenu => self.main_menu()?,
            State::AwaitingRangeInput => self.range_input()?,
            State::AwaitingMonthInput => self.month_input()?,
            State::PostReportMenu => self.post_report_menu()?,
            State::Terminated => State::Terminated,
        };
        self.state = next;
        Ok(next)
    }

    fn main_menu(&mut self) -> io::Result<State> {
        writeln!(self.output)?;
        writeln!(self.output, "Choose a report type:")?;
        writeln!(self.output, "1) Daily summary for a date range")?;
        writeln!(self.output, "2) Monthly summary for one month")?;
        writeln!(self.output, "3) Full year {} summary", self.options.year)?;
        writeln!(self.output, "4) Exit the program")?;

        let Some(choice) = self.prompt("Select (1-4): ")? else {
            return Ok(State::Terminated);
        };

        match choice.as_str() {
            "1" => Ok(State::AwaitingRangeInput),
            "2" => Ok(State::AwaitingMonthInput),
            "3" => {
                let summary = year_summary(self.measurements, self.options.year);
                self.publish(Report::year(self.options.year, &summary))?;
                Ok(State::PostReportMenu)
            }
            "4" => Ok(State::Terminated),
            _ => {
                writeln!(self.output, "Invalid selection. Please choose 1–4.")?;
                Ok(State::MainMenu)
            }
        }
    }

    fn range_input(&mut self) -> io::Result<State> {
        let Some(start) = self.prompt("Enter start date (dd.mm.yyyy): ")? else {
            return Ok(State::Terminated);
        };
        let Some(end) = self.prompt("Enter end date (dd.mm.yyyy): ")? else {
            return Ok(State::Terminated);
        };

        match self.range_report(&start, &end) {
            Ok(report) => {
                self.publish(report)?;
                Ok(State::PostReportMenu)
            }
            Err(e) => self.recover(e),
        }
    }

    fn month_input(&mut self) -> io::Result<State> {
        let Some(month) = self.prompt("Enter month number (1–12): ")? else {
            return Ok(State::Terminated);
        };

        match self.month_report(&month) {
            Ok(report) => {
                self.publish(report)?;
                Ok(State::PostReportMenu)
            }
            Err(e) => self.recover(e),
        }
    }

    fn post_report_menu(&mut self) -> io::Result<State> {
        writeln!(self.output)?;
        writeln!(self.output, "What would you like to do next?")?;
        writeln!(self.output, "1) Write the report to the file {}", self.options.destination)?;
        writeln!(self.output, "2) Create a new report")?;
        writeln!(self.output, "3) Exit")?;

        let Some(choice) = self.prompt("Select (1-3): ")? else {
            return Ok(State::Terminated);
        };

        match choice.as_str() {
            "1" => {
                match self.persist() {
                    Ok(()) => writeln!(
                        self.output,
                        "Report written to {} (overwritten).",
                        self.options.destination
                    )?,
                    Err(e) => {
                        tracing::warn!(error = %e, "report persistence failed");
                        writeln!(self.output, "Error: {e}")?;
                    }
                }
                Ok(State::PostReportMenu)
            }
            "2" => Ok(State::MainMenu),
            "3" => Ok(State::Terminated),
            _ => {
                writeln!(self.output, "Invalid selection. Please choose 1–3.")?;
                Ok(State::PostReportMenu)
            }
        }
    }

    fn range_report(&self, start: &str, end: &str) -> Result<Report, SessionError> {
        let start = parse_date(start)?;
        let end = parse_date(end)?;
        let summary = range_summary(&self.index, start, end);
        Ok(Report::range(start, end, &summary))
    }

    fn month_report(&self, month: &str) -> Result<Report, SessionError> {
        let month = parse_month(month)?;
        let summary = month_summary(&self.index, self.options.year, month);
        Ok(Report::month(month, &summary))
    }

    fn persist(&self) -> Result<(), SessionError> {
        let report = self
            .current
            .as_ref()
            .ok_or_else(|| SessionError::Validation("there is no report to save".to_string()))?;

        match self.sink.write(report) {
            Ok(()) => {
                metrics::counter!("reports_persisted_total").increment(1);
                tracing::info!(destination = %self.options.destination, "report persisted");
                Ok(())
            }
            Err(e) => {
                metrics::counter!("report_persist_errors_total").increment(1);
                Err(e.into())
            }
        }
    }

    /// Shows the report and makes it the current one.
    fn publish(&mut self, report: Report) -> io::Result<()> {
        let kind = report.kind().as_str();
        metrics::counter!("reports_generated_total", "kind" => kind).increment(1);
        tracing::info!(kind, "report generated");

        writeln!(self.output)?;
        for line in report.lines() {
            writeln!(self.output, "{line}")?;
        }
        self.current = Some(report);
        Ok(())
    }

    fn recover(&mut self, e: SessionError) -> io::Result<State> {
        tracing::warn!(error = %e, "report request failed");
        writeln!(self.output, "Error: {e}")?;
        writeln!(self.output, "Please try again.")?;
        Ok(State::MainMenu)
    }

    /// Returns the trimmed answer, or `None` once the input is exhausted.
    fn prompt(&mut self, text: &str) -> io::Result<Option<String>> {
        write!(self.output, "{text}")?;
        self.output.flush()?;

        let mut buf = Vec::new();
        if self.input.read_until(b'\n', &mut buf)? == 0 {
            tracing::info!("operator input closed, ending session");
            return Ok(None);
        }
        Ok(Some(String::from_utf8_lossy(&buf).trim().to_string()))
    }
}
