//! Error types.
//!
//! `PipelineError` is what the pipeline stages return; each variant is one
//! failure kind and names the offending input. `AppError` is the run-boundary
//! error the binary turns into an exit code.

use thiserror::Error;

/// A fatal failure inside one of the pipeline stages.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PipelineError {
    #[error("Invalid {field} '{value}': {reason}")]
    InvalidInput {
        field: &'static str,
        value: String,
        reason: String,
    },

    #[error("FPDS request failed: {0}")]
    Fetch(String),

    #[error("FPDS response is not a usable award table: {0}")]
    Parse(String),

    #[error("Malformed amount on line {line} in `{field}`: '{value}'")]
    MalformedAmount {
        line: usize,
        field: &'static str,
        value: String,
    },

    #[error("The query returned no award records; nothing to aggregate.")]
    EmptyDataset,
}

impl PipelineError {
    pub fn invalid_input(field: &'static str, value: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            field,
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Process exit code for this failure kind.
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::InvalidInput { .. } => 2,
            Self::MalformedAmount { .. } | Self::EmptyDataset => 3,
            Self::Fetch(_) => 4,
            Self::Parse(_) => 5,
        }
    }
}

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl From<PipelineError> for AppError {
    fn from(err: PipelineError) -> Self {
        Self::new(err.exit_code(), err.to_string())
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}
