use thiserror::Error;

use crate::registry::AddressFamily;

/// Errors raised when an edited form cannot be mapped back onto domain
/// objects.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FormError {
    /// The form carries a parameter the target block has no field for.
    #[error("unknown parameter '{0}'")]
    UnknownParameter(String),
    /// The parameter exists, but only for subnets of the other family.
    #[error("parameter '{parameter}' does not apply to {family} subnets")]
    NotApplicable {
        parameter: String,
        family: AddressFamily,
    },
    /// A slot holds a value of the wrong type for the parameter.
    #[error("parameter '{parameter}' expects {expected}, got {found}")]
    TypeMismatch {
        parameter: String,
        expected: &'static str,
        found: String,
    },
    /// A numeric slot cannot be stored in the parameter's integer field.
    #[error("parameter '{parameter}' expects a non-negative 32-bit integer, got {value}")]
    NotAnInteger { parameter: String, value: f64 },
}
