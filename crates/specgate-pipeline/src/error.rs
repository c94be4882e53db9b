//! Error types for the validation pipeline
//!
//! Only configuration problems are errors here. An invalid model is the normal
//! output of the pipeline and lands in [`crate::ModelState`] instead.
//!
//! Copyright (c) 2025 Specgate Team
//! Licensed under the Apache-2.0 license

use specgate_engine::EngineError;
use thiserror::Error;

/// Main error type for pipeline operations
#[derive(Error, Debug)]
pub enum Error {
    /// The framework's message-provider slot is absent for a property node
    #[error("Binding message provider is missing for property '{property}' of '{type_name}'")]
    MissingMessageProvider { type_name: String, property: String },

    /// A required collaborator was not registered
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Errors raised by the validation engine facade
    #[error("Engine error: {0}")]
    Engine(#[from] EngineError),
}

impl Error {
    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }
}

/// Convenience type alias for pipeline results
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::MissingMessageProvider {
            type_name: "Body".to_string(),
            property: "NewPassword".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Binding message provider is missing for property 'NewPassword' of 'Body'"
        );

        let err = Error::configuration("spec validator provider not registered");
        assert!(err.to_string().starts_with("Configuration error:"));
    }

    #[test]
    fn test_engine_error_conversion() {
        let err: Error = EngineError::NoValidatorRegistered {
            type_name: "Route".to_string(),
        }
        .into();
        assert!(matches!(err, Error::Engine(_)));
    }
}
