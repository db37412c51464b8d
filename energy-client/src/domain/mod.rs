pub mod daily_index;
pub mod measurement;

pub use daily_index::DailyIndex;
pub use measurement::Measurement;
