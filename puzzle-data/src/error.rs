use std::fmt::Display;

use serde_json::error::Category;

/// Why a payload could not be decoded.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    /// The text is not valid JSON.
    #[error("malformed input at line {line}, column {column}: {message}")]
    MalformedInput {
        message: String,
        line: usize,
        column: usize,
    },
    /// The JSON is valid but a value does not fit its declared type.
    #[error("type mismatch: {message}")]
    TypeMismatch { message: String },
}

impl DecodeError {
    pub fn type_mismatch(message: impl Into<String>) -> Self {
        Self::TypeMismatch {
            message: message.into(),
        }
    }

    pub fn is_malformed_input(&self) -> bool {
        matches!(self, Self::MalformedInput { .. })
    }

    pub fn is_type_mismatch(&self) -> bool {
        matches!(self, Self::TypeMismatch { .. })
    }
}

impl From<serde_json::Error> for DecodeError {
    fn from(e: serde_json::Error) -> Self {
        match e.classify() {
            Category::Data => Self::TypeMismatch {
                message: e.to_string(),
            },
            Category::Syntax | Category::Eof | Category::Io => Self::MalformedInput {
                message: e.to_string(),
                line: e.line(),
                column: e.column(),
            },
        }
    }
}

#[derive(Debug, thiserror::Error)]
#[error("failed to encode puzzle data: {0}")]
pub struct EncodeError(#[from] serde_json::Error);

/// An envelope whose status is not "ok".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    pub status: String,
    pub message: String,
    pub code: Option<u16>,
}

impl Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "API responded with status {:?}", self.status)?;
        if let Some(code) = self.code {
            write!(f, " ({})", code)?;
        }
        write!(f, ": {}", self.message)
    }
}

impl std::error::Error for ApiError {}
