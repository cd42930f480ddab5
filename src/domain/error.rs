use thiserror::Error;

/// Core domain errors
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Not found: {message}")]
    NotFound { message: String },

    #[error("Transient fetch error for region {region}: {message}")]
    TransientFetch { region: String, message: String },

    #[error("Permanent fetch error for region {region}: {message}")]
    PermanentFetch { region: String, message: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

impl DomainError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    pub fn transient_fetch(region: impl Into<String>, message: impl Into<String>) -> Self {
        Self::TransientFetch {
            region: region.into(),
            message: message.into(),
        }
    }

    pub fn permanent_fetch(region: impl Into<String>, message: impl Into<String>) -> Self {
        Self::PermanentFetch {
            region: region.into(),
            message: message.into(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Returns true for caller errors that must never be retried
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }

    /// Returns true for failures that may succeed on a later attempt
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::TransientFetch { .. })
    }
}
