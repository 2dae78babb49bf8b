//! Errors raised by the runtime: CLI argument conversion and the
//! instantiation guard.

use thiserror::Error;

/// A CLI argument string that could not be converted to its ABI type.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("invalid integer '{raw}': {reason}")]
    InvalidInteger { raw: String, reason: String },

    #[error("'{raw}' does not fit in {bits} bits")]
    OutOfRange { raw: String, bits: u16 },

    #[error("invalid bool '{raw}': expected true or false")]
    InvalidBool { raw: String },

    #[error("invalid address '{raw}': {reason}")]
    InvalidAddress { raw: String, reason: String },

    #[error("invalid hex '{raw}': {reason}")]
    InvalidHex { raw: String, reason: String },

    #[error("{len} bytes given, at most {size} allowed")]
    BytesTooLong { len: usize, size: u8 },

    #[error("invalid literal at offset {offset}: {message}")]
    InvalidLiteral { offset: usize, message: String },

    #[error("unsupported literal type '{signature}'")]
    UnsupportedType { signature: String },
}

impl ParseError {
    pub(crate) fn literal(offset: usize, message: impl Into<String>) -> Self {
        ParseError::InvalidLiteral {
            offset,
            message: message.into(),
        }
    }
}

/// A contract method was called before the binding had a deployed address.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("contract {contract_name} is not instantiated: deploy it or pass an address")]
pub struct NotInstantiatedError {
    pub contract_name: String,
}

impl NotInstantiatedError {
    pub fn new(contract_name: impl Into<String>) -> Self {
        Self {
            contract_name: contract_name.into(),
        }
    }
}
