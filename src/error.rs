// src/error.rs
//! Error taxonomy for the resume flow

use std::path::PathBuf;
use thiserror::Error;

/// Writing an accepted upload into the uploads root failed
#[derive(Debug, Error)]
#[error("failed to store image at {path}: {source}")]
pub struct StorageError {
    pub path: PathBuf,
    #[source]
    pub source: std::io::Error,
}

/// The renderer was handed a template id outside the closed set
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RenderError {
    #[error("unknown template id {0}, expected 1 (classic) or 2 (modern)")]
    UnknownTemplate(u8),
}

#[derive(Debug, Error)]
pub enum ConversionError {
    #[error("failed to launch converter `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("converter exited with {status}: {stderr}")]
    Failed { status: String, stderr: String },

    #[error("conversion service request failed: {0}")]
    Service(#[from] reqwest::Error),

    #[error("conversion service returned {status}: {body}")]
    ServiceStatus { status: u16, body: String },

    #[error("conversion timed out after {0} seconds")]
    Timeout(u64),

    #[error("converter produced an empty document")]
    EmptyOutput,
}

/// Failures of a flow step that are not field-level validation problems
#[derive(Debug, Error)]
pub enum FlowError {
    #[error("no resume data in session")]
    StateMissing,

    #[error(transparent)]
    Render(#[from] RenderError),

    #[error(transparent)]
    Conversion(#[from] ConversionError),

    #[error("session value could not be encoded: {0}")]
    Session(#[from] serde_json::Error),
}

impl FlowError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::StateMissing => "STATE_MISSING",
            Self::Render(_) => "RENDER_CONTRACT_VIOLATION",
            Self::Conversion(_) => "CONVERSION_ERROR",
            Self::Session(_) => "SESSION_ERROR",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(FlowError::StateMissing.code(), "STATE_MISSING");
        assert_eq!(
            FlowError::from(RenderError::UnknownTemplate(9)).code(),
            "RENDER_CONTRACT_VIOLATION"
        );
        assert_eq!(
            FlowError::from(ConversionError::EmptyOutput).code(),
            "CONVERSION_ERROR"
        );
    }

    #[test]
    fn test_unknown_template_message() {
        assert_eq!(
            RenderError::UnknownTemplate(3).to_string(),
            "unknown template id 3, expected 1 (classic) or 2 (modern)"
        );
    }
}
