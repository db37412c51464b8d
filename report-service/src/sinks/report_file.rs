use std::{fs, path::PathBuf};

use crate::{
    pipeline::{PipelineError, Sink},
    report::Report,
};

/// Writes a report to a text file, replacing whatever the file held before.
pub struct ReportFileSink {
    path: PathBuf,
}

impl ReportFileSink {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

impl Sink<Report> for ReportFileSink {
    fn write(&self, item: &Report) -> Result<(), PipelineError> {
        fs::write(&self.path, item.to_string())
            .map_err(|e| PipelineError::Sink(format!("failed to write '{}': {e}", self.path.display())))
    }
}
