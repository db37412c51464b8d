pub mod summaries;

pub use summaries::{month_summary, range_summary, year_summary, Summary};
