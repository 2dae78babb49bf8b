//! Collaborator traits that generated bindings call into.
//!
//! A backend owns everything chain-specific: the ABI/build registry, the
//! contract factory, encoding, submission and key management. Generated
//! code only shapes calls; backend errors come back unchanged.

use std::fmt;

use serde_json::Value;

use crate::error::NotInstantiatedError;
use crate::tx::{BlockIdentifier, TransactionConfig};
use crate::value::{AbiValue, Address};

/// Connects to a named network and yields a backend for it.
pub trait Network {
    type Backend: ContractBackend;

    fn connect(&self, network: &str) -> Result<Self::Backend, <Self::Backend as ContractBackend>::Error>;
}

/// A bound contract instance.
pub trait ContractHandle {
    fn address(&self) -> Address;
}

/// Result of a submitted transaction. `Display` is the one-line summary;
/// [`Receipt::info`] is the extended report printed with `--verbose`.
pub trait Receipt: fmt::Display {
    fn info(&self) -> String;
}

/// Outcome of a deployment.
#[derive(Debug, Clone)]
pub struct Deployment<C, R> {
    pub address: Address,
    pub contract: C,
    pub receipt: R,
}

pub trait ContractBackend {
    type Error: std::error::Error + From<NotInstantiatedError>;
    type Contract: ContractHandle;
    type Receipt: Receipt;
    type Signer;

    /// ABI JSON registered under `contract_name`.
    fn load_abi(&self, contract_name: &str) -> Result<Value, Self::Error>;

    /// Bind an existing deployment.
    fn contract_at(&self, contract_name: &str, address: Address, abi: &Value) -> Result<Self::Contract, Self::Error>;

    /// Deploy from the build registered under `contract_name`.
    fn deploy(
        &self,
        contract_name: &str,
        abi: &Value,
        args: Vec<AbiValue>,
        config: &TransactionConfig<Self::Signer>,
    ) -> Result<Deployment<Self::Contract, Self::Receipt>, Self::Error>;

    /// Deploy `bytecode` compiled into the bindings, bypassing the build
    /// registry. Used by bindings generated with an embedded build.
    fn deploy_bytecode(
        &self,
        contract_name: &str,
        abi: &Value,
        bytecode: &[u8],
        args: Vec<AbiValue>,
        config: &TransactionConfig<Self::Signer>,
    ) -> Result<Deployment<Self::Contract, Self::Receipt>, Self::Error>;

    /// Read-only call; returns the decoded outputs.
    fn call(
        &self,
        contract: &Self::Contract,
        signature: &str,
        args: Vec<AbiValue>,
        block: BlockIdentifier,
    ) -> Result<Vec<AbiValue>, Self::Error>;

    /// State-mutating call.
    fn transact(
        &self,
        contract: &Self::Contract,
        signature: &str,
        args: Vec<AbiValue>,
        config: &TransactionConfig<Self::Signer>,
    ) -> Result<Self::Receipt, Self::Error>;

    /// Publish the contract source to the network's explorer.
    fn publish_source(&self, contract: &Self::Contract) -> Result<(), Self::Error>;

    /// Load a signer from a keystore.
    fn load_account(&self, keystore: &str, password: Option<&str>) -> Result<Self::Signer, Self::Error>;
}
