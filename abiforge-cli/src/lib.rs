//! Runtime support for abiforge-generated contract bindings and CLIs.
//!
//! Provides:
//! - ABI value types: `alloy-primitives` integers and addresses plus the
//!   dynamic `AbiValue`
//! - CLI converters, including a structured-literal parser for tuples
//! - Shared argument groups and transaction-config assembly
//! - The backend traits generated code is generic over
//!
//! With the `generator` feature this crate also builds the `abiforge`
//! binary that turns ABI files into binding and interface sources.

pub mod args;
pub mod backend;
pub mod error;
pub mod hex;
pub mod parse;
pub mod tx;
pub mod value;

#[cfg(feature = "generator")]
pub mod generator;

pub use args::{CallArgs, TransactArgs};
pub use backend::{ContractBackend, ContractHandle, Deployment, Network, Receipt};
pub use error::{NotInstantiatedError, ParseError};
pub use tx::{BlockIdentifier, TransactionConfig, TransactionOverrides};
pub use value::{format_outputs, AbiValue, Address, I256, U256};

/// Re-exported for generated code, so binding crates need no direct clap
/// dependency.
pub use clap;
pub use serde_json;
