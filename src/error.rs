//! Error types and handling for the `TripWeaver` application

use thiserror::Error;

/// Main error type for the `TripWeaver` application
#[derive(Error, Debug)]
pub enum PlannerError {
    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Completion-service communication errors (network, auth, quota)
    #[error("Upstream error: {message}")]
    Upstream { message: String },

    /// The completion text could not be parsed as JSON after fence-stripping
    #[error("Malformed response: {message}")]
    MalformedResponse { message: String },

    /// Parsed JSON lacks an expected key
    #[error("Missing field in response: {field}")]
    MissingField { field: String },

    /// I/O operation errors
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

impl PlannerError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new upstream error
    pub fn upstream<S: Into<String>>(message: S) -> Self {
        Self::Upstream {
            message: message.into(),
        }
    }

    /// Create a new malformed-response error
    pub fn malformed<S: Into<String>>(message: S) -> Self {
        Self::MalformedResponse {
            message: message.into(),
        }
    }

    /// Create a new missing-field error
    pub fn missing_field<S: Into<String>>(field: S) -> Self {
        Self::MissingField {
            field: field.into(),
        }
    }

    /// Short name of the error kind, for logging
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            PlannerError::Config { .. } => "config",
            PlannerError::Upstream { .. } => "upstream",
            PlannerError::MalformedResponse { .. } => "malformed_response",
            PlannerError::MissingField { .. } => "missing_field",
            PlannerError::Io { .. } => "io",
        }
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            PlannerError::Config { .. } => {
                "Configuration error. Please check your API key.".to_string()
            }
            PlannerError::Upstream { .. } => {
                "Unable to reach the travel assistant. Please try again in a moment.".to_string()
            }
            PlannerError::MalformedResponse { .. } => {
                "The travel assistant returned an unexpected answer. Please try again.".to_string()
            }
            PlannerError::MissingField { field } => {
                format!(
                    "The travel assistant left out '{field}'. Please try rephrasing your request."
                )
            }
            PlannerError::Io { .. } => {
                "File operation failed. Please check file permissions.".to_string()
            }
        }
    }
}
