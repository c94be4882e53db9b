//! Error types for the validation engine facade
//!
//! Copyright (c) 2025 Specgate Team
//! Licensed under the Apache-2.0 license

use thiserror::Error;

/// Errors raised by the engine facade
///
/// A model that breaks its rules is not an error; those outcomes are
/// carried by [`crate::ValidationResult`]. These variants cover programming and
/// registration mistakes only.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// A validator was handed a model of a different type
    #[error("Validator for '{expected}' was handed a model of a different type")]
    ModelTypeMismatch { expected: &'static str },

    /// A caller demanded a validator for a type nobody registered
    #[error("No validator for type '{type_name}' has been registered")]
    NoValidatorRegistered { type_name: String },
}

/// Convenience type alias for engine results
pub type Result<T> = std::result::Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = EngineError::NoValidatorRegistered {
            type_name: "Body".to_string(),
        };
        assert_eq!(err.to_string(), "No validator for type 'Body' has been registered");

        let err = EngineError::ModelTypeMismatch { expected: "Body" };
        assert_eq!(
            err.to_string(),
            "Validator for 'Body' was handed a model of a different type"
        );
    }
}
