//! Build artifacts compiled into host bindings.
//!
//! With an [`EmbeddedBuild`] the binding struct stops asking the backend's
//! registry for the ABI and hands the creation bytecode to
//! `ContractBackend::deploy_bytecode` itself.

use abiforge_core::abi::{AbiEntry, BuildDescriptor};
use abiforge_core::error::AbiError;
use proc_macro2::{Literal, TokenStream as TokenStream2};
use quote::quote;
use serde_json::Value;

use crate::GenerateError;

/// ABI JSON and creation bytecode of one contract.
#[derive(Debug, Clone, PartialEq)]
pub struct EmbeddedBuild {
    pub abi: Value,
    pub bytecode: Vec<u8>,
}

impl EmbeddedBuild {
    /// `bytecode` is hex with an optional `0x` prefix and must not be empty.
    pub fn new(abi: &[AbiEntry], bytecode: &str) -> Result<Self, GenerateError> {
        let digits = bytecode.trim();
        let digits = digits
            .strip_prefix("0x")
            .or_else(|| digits.strip_prefix("0X"))
            .unwrap_or(digits);
        if digits.is_empty() {
            return Err(GenerateError::Build {
                message: "bytecode is empty; abstract contracts and interfaces cannot be embedded".to_string(),
            });
        }
        let bytecode = hex::decode(digits).map_err(|e| GenerateError::Build {
            message: format!("bytecode is not hex: {}", e),
        })?;
        Ok(Self {
            abi: serde_json::to_value(abi)?,
            bytecode,
        })
    }

    /// Bytecode from `build`, with `abi` overriding the descriptor's own.
    pub fn from_descriptor(build: &BuildDescriptor, abi: Option<&[AbiEntry]>) -> Result<Self, GenerateError> {
        let entries = abi.or(build.abi.as_deref()).ok_or_else(|| {
            GenerateError::Abi(AbiError::malformed(format!(
                "build descriptor for {} has no abi",
                build.contract_name
            )))
        })?;
        Self::new(entries, &build.bytecode)
    }

    /// The ABI as compact JSON text.
    pub fn abi_json(&self) -> String {
        self.abi.to_string()
    }
}

/// `ABI_JSON`/`BYTECODE` constants and the `embedded_abi` constructor.
pub(crate) fn generate_constants(build: &EmbeddedBuild, rt: &syn::Path) -> TokenStream2 {
    let abi_json = build.abi_json();
    let bytecode = Literal::byte_string(&build.bytecode);
    let abi_value = json_tokens(&build.abi, rt);
    quote! {
        /// ABI the bindings were generated from, as JSON.
        pub const ABI_JSON: &'static str = #abi_json;

        /// Creation bytecode deployed by [`Self::deploy`].
        pub const BYTECODE: &'static [u8] = #bytecode;

        /// [`Self::ABI_JSON`] as a JSON value.
        pub fn embedded_abi() -> #rt::serde_json::Value {
            #abi_value
        }
    }
}

/// An expression that rebuilds `value` without parsing at runtime.
fn json_tokens(value: &Value, rt: &syn::Path) -> TokenStream2 {
    match value {
        Value::Null => quote! { #rt::serde_json::Value::Null },
        Value::Bool(b) => quote! { #rt::serde_json::Value::Bool(#b) },
        Value::Number(n) => {
            if let Some(u) = n.as_u64() {
                quote! { #rt::serde_json::Value::from(#u) }
            } else if let Some(i) = n.as_i64() {
                quote! { #rt::serde_json::Value::from(#i) }
            } else {
                let f = n.as_f64().unwrap_or_default();
                quote! { #rt::serde_json::Value::from(#f) }
            }
        }
        Value::String(s) => quote! { #rt::serde_json::Value::String(::std::string::String::from(#s)) },
        Value::Array(items) => {
            let items = items.iter().map(|item| json_tokens(item, rt));
            quote! { #rt::serde_json::Value::Array(::std::vec![#(#items),*]) }
        }
        Value::Object(map) if map.is_empty() => quote! { #rt::serde_json::Value::Object(#rt::serde_json::Map::new()) },
        Value::Object(map) => {
            let entries = map.iter().map(|(key, item)| {
                let item = json_tokens(item, rt);
                quote! { (::std::string::String::from(#key), #item) }
            });
            quote! {
                #rt::serde_json::Value::Object(
                    ::std::iter::FromIterator::from_iter([#(#entries),*])
                )
            }
        }
    }
}
