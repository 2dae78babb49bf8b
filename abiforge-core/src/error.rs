//! Structured errors raised while turning an ABI into a contract spec.
//!
//! Any of these aborts generation for the whole contract: emitters never
//! see a partially built [`ContractSpec`](crate::spec::ContractSpec).

use thiserror::Error;

/// Result alias used throughout the core crate.
pub type AbiResult<T> = Result<T, AbiError>;

/// Generation-time error taxonomy.
///
/// # Example
/// ```rust
/// use abiforge_core::error::AbiError;
/// use abiforge_core::types::TypeDescriptor;
///
/// let err = TypeDescriptor::normalize("uint7", &[]).unwrap_err();
/// assert!(matches!(err, AbiError::UnsupportedType { .. }));
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AbiError {
    /// The type string does not map to a supported ABI type
    #[error("Unsupported ABI type '{type_string}'")]
    UnsupportedType {
        type_string: String,
    },

    /// A required field is missing or the entry is structurally invalid
    #[error("Malformed ABI: {message}")]
    MalformedAbi {
        message: String,
    },

    /// Two generated names could not be told apart
    #[error("Name collision in {scope}: '{name}' is produced by both '{first}' and '{second}'")]
    NameCollision {
        scope: String,
        name: String,
        first: String,
        second: String,
    },
}

impl AbiError {
    pub fn unsupported(type_string: impl Into<String>) -> Self {
        AbiError::UnsupportedType {
            type_string: type_string.into(),
        }
    }

    pub fn malformed(message: impl Into<String>) -> Self {
        AbiError::MalformedAbi {
            message: message.into(),
        }
    }
}
