//! Transaction configuration and block selection.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::ParseError;
use crate::value::{display_opt, U256};

/// Block a read-only call executes against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BlockIdentifier {
    #[default]
    Latest,
    Number(u64),
}

impl FromStr for BlockIdentifier {
    type Err = ParseError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        if raw == "latest" {
            return Ok(BlockIdentifier::Latest);
        }
        let parsed = match crate::hex::strip_0x(raw) {
            Some(digits) => u64::from_str_radix(digits, 16),
            None => raw.parse(),
        };
        parsed.map(BlockIdentifier::Number).map_err(|e| ParseError::InvalidInteger {
            raw: raw.to_string(),
            reason: format!("expected 'latest' or a block number ({})", e),
        })
    }
}

impl fmt::Display for BlockIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BlockIdentifier::Latest => f.write_str("latest"),
            BlockIdentifier::Number(n) => write!(f, "{}", n),
        }
    }
}

/// Optional submission parameters. Only fields that were explicitly given
/// are set, and unset ones are left out when serialized.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TransactionOverrides {
    #[serde(skip_serializing_if = "Option::is_none", serialize_with = "display_opt")]
    pub gas_price: Option<U256>,
    #[serde(skip_serializing_if = "Option::is_none", serialize_with = "display_opt")]
    pub max_fee: Option<U256>,
    #[serde(skip_serializing_if = "Option::is_none", serialize_with = "display_opt")]
    pub priority_fee: Option<U256>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required_confs: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nonce: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none", serialize_with = "display_opt")]
    pub value: Option<U256>,
}

impl TransactionOverrides {
    pub fn is_empty(&self) -> bool {
        *self == TransactionOverrides::default()
    }
}

/// Signer plus overrides for one state-mutating call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransactionConfig<S> {
    pub from: S,
    #[serde(flatten)]
    pub overrides: TransactionOverrides,
}

impl<S> TransactionConfig<S> {
    /// Config that sets nothing beyond the signer.
    pub fn new(from: S) -> Self {
        Self {
            from,
            overrides: TransactionOverrides::default(),
        }
    }

    pub fn with_overrides(mut self, overrides: TransactionOverrides) -> Self {
        self.overrides = overrides;
        self
    }
}
