//! # abiforge core
//!
//! ABI model, type normalization, naming rules and the target-agnostic
//! contract specification consumed by every abiforge emitter.

pub mod abi;
pub mod error;
pub mod naming;
pub mod spec;
pub mod types;

pub mod prelude {
    pub use crate::abi::{AbiEntry, AbiParam, BuildDescriptor, EntryKind};
    pub use crate::error::{AbiError, AbiResult};
    pub use crate::spec::{
        CliConverter, ContractSpec, EventSpec, FunctionSpec, Mutability, ParameterSpec,
    };
    pub use crate::types::{ElementaryType, TupleComponent, TypeDescriptor};
}
