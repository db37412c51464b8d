use crate::pipeline::PipelineError;

/// Recoverable failures inside a session. None of them end the session.
#[derive(thiserror::Error, Debug)]
pub enum SessionError {
    /// Operator input could not be converted to its typed form.
    #[error("could not parse {what} '{input}'")]
    Parse { what: &'static str, input: String },
    /// Well-formed input outside its accepted domain.
    #[error("{0}")]
    Validation(String),
    /// The current report could not be written.
    #[error("could not save the report: {0}")]
    Persistence(#[from] PipelineError),
}
