//! # abiforge
//!
//! Turns a contract ABI into typed host bindings, a command-line
//! interface and a Solidity interface stub.
//!
//! ```rust,ignore
//! use abiforge::prelude::*;
//!
//! abiforge::contract!(name = "Token", abi = "abi/Token.json");
//!
//! let token = Token::new(backend, Some(address))?;
//! println!("{}", format_outputs(&token.balance_of(owner, None)?));
//! ```

// Re-export the proc macro
pub use abiforge_macros::contract;

// Re-export core types
pub use abiforge_core::*;

/// Runtime the generated bindings are compiled against.
pub use abiforge_cli as cli;

/// Emitters, for build scripts that write bindings to disk.
pub use abiforge_codegen as codegen;

/// Parse ABI JSON and render the Solidity interface with default settings.
pub fn interface_source(name: &str, abi_json: &str) -> Result<String, codegen::GenerateError> {
    let spec = codegen::contract_spec_from_json(name, abi_json)?;
    codegen::generate_interface_source(&spec, &codegen::GeneratorConfig::default())
}

pub mod prelude {
    pub use crate::contract;
    pub use abiforge_cli::{
        format_outputs, AbiValue, Address, BlockIdentifier, ContractBackend, ContractHandle, Deployment, Network,
        NotInstantiatedError, Receipt, TransactionConfig, TransactionOverrides, I256, U256,
    };
    pub use abiforge_core::prelude::*;
}
