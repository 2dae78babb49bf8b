//! ABI value types passed between generated bindings and a backend.
//!
//! Integers and addresses are the `alloy-primitives` types; this module
//! adds the dynamic [`AbiValue`] and its serialized/displayed forms.

use std::fmt;

use serde::{Serialize, Serializer};

pub use alloy_primitives::{Address, I256, U256};

use crate::hex::hex_encode;

/// Serialize through `Display`: integers as decimal strings, addresses in
/// checksummed form.
pub(crate) fn display<T: fmt::Display, S: Serializer>(value: &T, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(value)
}

/// [`display`] for optional fields.
pub(crate) fn display_opt<T: fmt::Display, S: Serializer>(
    value: &Option<T>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match value {
        Some(value) => serializer.collect_str(value),
        None => serializer.serialize_none(),
    }
}

// ─── Dynamic values ──────────────────────────────────────────────

/// A typed ABI value, as handed to and returned from a backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "camelCase")]
pub enum AbiValue {
    Uint(#[serde(serialize_with = "display")] U256),
    Int(#[serde(serialize_with = "display")] I256),
    Address(#[serde(serialize_with = "display")] Address),
    Bool(bool),
    FixedBytes(Vec<u8>),
    Bytes(Vec<u8>),
    String(String),
    Array(Vec<AbiValue>),
    FixedArray(Vec<AbiValue>),
    Tuple(Vec<AbiValue>),
}

impl fmt::Display for AbiValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AbiValue::Uint(v) => write!(f, "{}", v),
            AbiValue::Int(v) => write!(f, "{}", v),
            AbiValue::Address(a) => write!(f, "{}", a),
            AbiValue::Bool(b) => write!(f, "{}", b),
            AbiValue::FixedBytes(bytes) | AbiValue::Bytes(bytes) => f.write_str(&hex_encode(bytes)),
            AbiValue::String(s) => write!(f, "{:?}", s),
            AbiValue::Array(items) | AbiValue::FixedArray(items) => {
                let parts: Vec<String> = items.iter().map(|v| v.to_string()).collect();
                write!(f, "[{}]", parts.join(", "))
            }
            AbiValue::Tuple(items) => {
                let parts: Vec<String> = items.iter().map(|v| v.to_string()).collect();
                write!(f, "({})", parts.join(", "))
            }
        }
    }
}

/// Render decoded call outputs: one value bare, several as a tuple.
pub fn format_outputs(outputs: &[AbiValue]) -> String {
    match outputs {
        [single] => single.to_string(),
        many => AbiValue::Tuple(many.to_vec()).to_string(),
    }
}
