//! Error types for the eligibility engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for configuration, assembly and engine failures. Incomplete household data
//! is not an error: resolvers fall back to defaults instead.

use thiserror::Error;

/// The main error type for the eligibility engine.
///
/// # Example
///
/// ```
/// use eligibility_engine::error::EngineError;
///
/// let error = EngineError::ProgramNotFound {
///     program: "zz_snap".to_string(),
/// };
/// assert_eq!(error.to_string(), "Program not registered: zz_snap");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// Two jurisdictions registered the same program identifier.
    #[error("Program '{program}' registered by both {first} and {second}")]
    DuplicateProgram {
        /// The colliding program identifier.
        program: String,
        /// The jurisdiction that registered it first.
        first: String,
        /// The jurisdiction that registered it again.
        second: String,
    },

    /// A calculator reads an output at a different unit than its category.
    #[error("Program '{program}' output '{field}' is computed over {found}, expected {expected}")]
    CategoryMismatch {
        /// The program identifier.
        program: String,
        /// The offending output field.
        field: String,
        /// The calculator's category.
        expected: String,
        /// The unit the output resolver declares.
        found: String,
    },

    /// A dependency names a variable the engine does not know.
    #[error("Program '{program}' references unknown engine variable '{field}'")]
    UnknownVariable {
        /// The program identifier.
        program: String,
        /// The unknown field.
        field: String,
    },

    /// A dependency declares a unit that disagrees with the variable catalog.
    #[error("Program '{program}' declares '{field}' at {declared}, engine defines it at {catalog}")]
    VariableUnitMismatch {
        /// The program identifier.
        program: String,
        /// The field in question.
        field: String,
        /// The unit declared by the resolver.
        declared: String,
        /// The unit recorded in the catalog.
        catalog: String,
    },

    /// A screening asked for a program that is not registered.
    #[error("Program not registered: {program}")]
    ProgramNotFound {
        /// The unknown program identifier.
        program: String,
    },

    /// Two resolvers with the same field produced different values for one entity.
    #[error("Conflicting values for '{field}' on {unit} entity '{entity}'")]
    ConflictingInput {
        /// The unit of the entity.
        unit: String,
        /// The entity key.
        entity: String,
        /// The field written twice.
        field: String,
    },

    /// The external engine call failed.
    #[error("Engine failure: {message}")]
    EngineFailure {
        /// A description of the failure.
        message: String,
    },

    /// The engine response did not contain a requested output.
    #[error("Engine returned no value for '{field}' on {unit} entity '{entity}'")]
    MissingOutput {
        /// The unit of the entity.
        unit: String,
        /// The entity key.
        entity: String,
        /// The requested field.
        field: String,
    },

    /// The engine returned a value of an unexpected type.
    #[error("Engine returned a non-numeric value for '{field}' on {unit} entity '{entity}'")]
    UnexpectedOutputType {
        /// The unit of the entity.
        unit: String,
        /// The entity key.
        entity: String,
        /// The requested field.
        field: String,
    },

    /// A general calculation error occurred.
    #[error("Calculation error: {message}")]
    CalculationError {
        /// A description of the calculation error.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_not_found_displays_path() {
        let error = EngineError::ConfigNotFound {
            path: "/missing/engine.yaml".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Configuration file not found: /missing/engine.yaml"
        );
    }

    #[test]
    fn test_duplicate_program_names_both_jurisdictions() {
        let error = EngineError::DuplicateProgram {
            program: "snap".to_string(),
            first: "federal".to_string(),
            second: "tx".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Program 'snap' registered by both federal and tx"
        );
    }

    #[test]
    fn test_category_mismatch_displays_units() {
        let error = EngineError::CategoryMismatch {
            program: "ma_head_start".to_string(),
            field: "snap".to_string(),
            expected: "people".to_string(),
            found: "spm_units".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Program 'ma_head_start' output 'snap' is computed over spm_units, expected people"
        );
    }

    #[test]
    fn test_missing_output_displays_entity() {
        let error = EngineError::MissingOutput {
            unit: "people".to_string(),
            entity: "3".to_string(),
            field: "head_start".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Engine returned no value for 'head_start' on people entity '3'"
        );
    }

    #[test]
    fn test_errors_implement_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<EngineError>();
    }

    #[test]
    fn test_error_propagation_with_question_mark() {
        fn returns_engine_failure() -> EngineResult<()> {
            Err(EngineError::EngineFailure {
                message: "timeout".to_string(),
            })
        }

        fn propagates_error() -> EngineResult<()> {
            returns_engine_failure()?;
            Ok(())
        }

        assert!(propagates_error().is_err());
    }
}
