use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WizardError {
    /// The scan collaborator failed or returned an unusable result.
    #[error("{0}")]
    ScanFailed(String),

    #[error("No scan result available")]
    NoResultAvailable,

    #[error("Invalid check id '{id}': ids are lowercase identifiers and must not use the reserved '{reserved}'")]
    InvalidCheckId { id: String, reserved: &'static str },

    #[error("Duplicate check id '{0}'")]
    DuplicateCheckId(String),

    #[error("Failed to load scan fixture {path}: {message}")]
    Fixture { path: PathBuf, message: String },

    #[error("Failed to write report to {path}: {source}")]
    Persist {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Prompt failed: {0}")]
    Prompt(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, WizardError>;

impl From<dialoguer::Error> for WizardError {
    fn from(err: dialoguer::Error) -> Self {
        WizardError::Prompt(err.to_string())
    }
}
