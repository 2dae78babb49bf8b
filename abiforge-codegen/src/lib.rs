//! # abiforge codegen
//!
//! Emitters that render one [`ContractSpec`] three ways:
//! - a host binding struct generic over a runtime backend ([`host`])
//! - a clap command tree dispatching into that struct ([`cli`])
//! - a Solidity `interface` stub ([`interface`])
//!
//! Host and CLI output are built as `proc_macro2` token streams; the
//! interface goes through its own IR. An [`EmbeddedBuild`] compiles a build
//! descriptor's ABI and bytecode into the host struct ([`embed`]).
//! Generation is a pure function of the
//! spec and the [`GeneratorConfig`]: the same input always yields the same
//! bytes.

pub mod cli;
pub mod config;
pub mod embed;
pub mod format;
pub mod host;
pub mod interface;
pub mod rust_types;

use abiforge_core::abi::parse_abi;
use abiforge_core::error::AbiError;
use abiforge_core::spec::ContractSpec;
use proc_macro2::{Ident, TokenStream as TokenStream2};
use quote::quote;
use thiserror::Error;
use tracing::info;

pub use config::GeneratorConfig;
pub use embed::EmbeddedBuild;
pub use format::{Rustfmt, SourceFormatter, Unformatted};

/// Errors that abort generation of an artifact.
#[derive(Error, Debug)]
pub enum GenerateError {
    #[error(transparent)]
    Abi(#[from] AbiError),

    #[error("Invalid ABI JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Formatter failed: {message}")]
    Format { message: String },

    #[error("Invalid configuration for {field}: {message}")]
    InvalidConfig { field: &'static str, message: String },

    #[error("Cannot embed build: {message}")]
    Build { message: String },
}

/// Parse ABI JSON (bare array or build artifact) and build the spec.
pub fn contract_spec_from_json(name: &str, abi_json: &str) -> Result<ContractSpec, GenerateError> {
    let entries = parse_abi(abi_json)?;
    Ok(ContractSpec::build(name, &entries)?)
}

fn struct_ident(spec: &ContractSpec) -> Result<Ident, GenerateError> {
    syn::parse_str::<Ident>(&spec.name).map_err(|_| {
        GenerateError::Abi(AbiError::malformed(format!(
            "contract name '{}' is not a Rust identifier",
            spec.name
        )))
    })
}

/// Binding struct, plus the CLI module when `config.emit_cli` is set.
pub fn generate_host_tokens(spec: &ContractSpec, config: &GeneratorConfig) -> Result<TokenStream2, GenerateError> {
    bindings(spec, None, config)
}

/// Like [`generate_host_tokens`], with the ABI and creation bytecode of
/// `build` compiled into the binding struct.
pub fn generate_embedded_host_tokens(
    spec: &ContractSpec,
    build: &EmbeddedBuild,
    config: &GeneratorConfig,
) -> Result<TokenStream2, GenerateError> {
    bindings(spec, Some(build), config)
}

fn bindings(
    spec: &ContractSpec,
    build: Option<&EmbeddedBuild>,
    config: &GeneratorConfig,
) -> Result<TokenStream2, GenerateError> {
    config.validate()?;
    let rt = config.runtime_path()?;
    let struct_name = struct_ident(spec)?;

    let host = host::generate_host(spec, &struct_name, &rt, build);
    let cli = if config.emit_cli {
        cli::generate_cli(spec, &struct_name, &rt)?
    } else {
        TokenStream2::new()
    };

    Ok(quote! {
        #host
        #cli
    })
}

/// Host binding source text with a version header, formatted when
/// `config.format` is set. `build` is compiled in when given.
pub fn generate_host_source(
    spec: &ContractSpec,
    build: Option<&EmbeddedBuild>,
    config: &GeneratorConfig,
    formatter: &dyn SourceFormatter,
) -> Result<String, GenerateError> {
    let tokens = bindings(spec, build, config)?;
    let source = format!(
        "// Code generated by abiforge {}. DO NOT EDIT.\n\n{}\n",
        config.version, tokens
    );
    let source = if config.format { formatter.format(&source)? } else { source };
    info!(
        contract = %spec.name,
        functions = spec.functions.len(),
        cli = config.emit_cli,
        embedded = build.is_some(),
        "generated host bindings"
    );
    Ok(source)
}

/// Solidity interface source for `spec`.
pub fn generate_interface_source(spec: &ContractSpec, config: &GeneratorConfig) -> Result<String, GenerateError> {
    config.validate()?;
    let items = interface::interface_items(spec)?;
    let source = interface::render_interface(&spec.name, &items, &config.version, &config.pragma_version);
    info!(contract = %spec.name, items = items.len(), "generated interface");
    Ok(source)
}
