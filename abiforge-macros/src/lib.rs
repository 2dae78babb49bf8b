//! # abiforge Proc Macros
//!
//! `contract!` reads an ABI file at compile time and expands to the same
//! binding struct and CLI the `abiforge host` command writes to disk.
//!
//! ## Usage
//!
//! ```rust,ignore
//! abiforge::contract!(name = "Token", abi = "abi/Token.json");
//!
//! let token = Token::new(backend, Some(address))?;
//! let balance = token.balance_of(owner, None)?;
//! ```
//!
//! The ABI path is relative to the invoking crate's `CARGO_MANIFEST_DIR`.
//!
//! With `embed = true` the file must be a build descriptor carrying
//! `bytecode`; its ABI and bytecode are compiled into the bindings:
//!
//! ```rust,ignore
//! abiforge::contract!(name = "Counter", abi = "build/Counter.json", embed = true);
//!
//! let mut counter = Counter::new(backend, None)?;
//! counter.deploy(&config)?; // ContractBackend::deploy_bytecode(.., Counter::BYTECODE, ..)
//! ```

use std::path::PathBuf;

use abiforge_codegen::{
    contract_spec_from_json, generate_embedded_host_tokens, generate_host_tokens, EmbeddedBuild, GeneratorConfig,
};
use abiforge_core::abi::BuildDescriptor;
use abiforge_core::spec::ContractSpec;
use proc_macro::TokenStream;
use proc_macro2::{Span, TokenStream as TokenStream2};
use quote::quote;
use syn::parse::{Parse, ParseStream};
use syn::{parse_macro_input, Ident, LitBool, LitStr, Token};

/// Generate bindings for one contract.
///
/// Keys:
/// - `name = "..."` (required): struct name, also the registry key
///   passed to the backend
/// - `abi = "..."` (required): path to the ABI JSON or build artifact
/// - `cli = bool` (default `true`): also emit the clap command tree
/// - `embed = bool` (default `false`): compile the build descriptor's ABI
///   and bytecode into the bindings
#[proc_macro]
pub fn contract(input: TokenStream) -> TokenStream {
    let args = parse_macro_input!(input as ContractArgs);
    match expand_contract(args) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

// ─── Argument parsing ────────────────────────────────────────────

struct ContractArgs {
    name: LitStr,
    abi: LitStr,
    cli: bool,
    embed: bool,
}

impl Parse for ContractArgs {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let mut name = None;
        let mut abi = None;
        let mut cli = None;
        let mut embed = None;

        while !input.is_empty() {
            let key: Ident = input.parse()?;
            input.parse::<Token![=]>()?;
            match key.to_string().as_str() {
                "name" => set_once(&mut name, &key, input.parse::<LitStr>()?)?,
                "abi" => set_once(&mut abi, &key, input.parse::<LitStr>()?)?,
                "cli" => set_once(&mut cli, &key, input.parse::<LitBool>()?.value)?,
                "embed" => set_once(&mut embed, &key, input.parse::<LitBool>()?.value)?,
                other => {
                    return Err(syn::Error::new_spanned(
                        &key,
                        format!("unknown key `{}`; expected `name`, `abi`, `cli` or `embed`", other),
                    ))
                }
            }
            if input.is_empty() {
                break;
            }
            input.parse::<Token![,]>()?;
        }

        Ok(ContractArgs {
            name: name.ok_or_else(|| syn::Error::new(Span::call_site(), "missing `name = \"...\"`"))?,
            abi: abi.ok_or_else(|| syn::Error::new(Span::call_site(), "missing `abi = \"...\"`"))?,
            cli: cli.unwrap_or(true),
            embed: embed.unwrap_or(false),
        })
    }
}

fn set_once<T>(slot: &mut Option<T>, key: &Ident, value: T) -> syn::Result<()> {
    if slot.is_some() {
        return Err(syn::Error::new_spanned(key, format!("duplicate key `{}`", key)));
    }
    *slot = Some(value);
    Ok(())
}

// ─── Expansion ───────────────────────────────────────────────────

fn expand_contract(args: ContractArgs) -> syn::Result<TokenStream2> {
    let manifest_dir = std::env::var("CARGO_MANIFEST_DIR")
        .map_err(|_| syn::Error::new(Span::call_site(), "CARGO_MANIFEST_DIR is not set"))?;
    let path = PathBuf::from(manifest_dir).join(args.abi.value());
    let json = std::fs::read_to_string(&path)
        .map_err(|e| syn::Error::new_spanned(&args.abi, format!("cannot read {}: {}", path.display(), e)))?;

    let config = GeneratorConfig {
        runtime_path: "::abiforge::cli".to_string(),
        emit_cli: args.cli,
        format: false,
        embed_build: args.embed,
        ..Default::default()
    };
    let bindings = if args.embed {
        let build = BuildDescriptor::from_json(&json)
            .map_err(|e| syn::Error::new_spanned(&args.abi, format!("invalid build descriptor: {}", e)))?;
        let embedded =
            EmbeddedBuild::from_descriptor(&build, None).map_err(|e| syn::Error::new_spanned(&args.abi, e.to_string()))?;
        let entries = build.abi.unwrap_or_default();
        let spec = ContractSpec::build(&args.name.value(), &entries)
            .map_err(|e| syn::Error::new_spanned(&args.abi, e.to_string()))?;
        generate_embedded_host_tokens(&spec, &embedded, &config)
    } else {
        let spec = contract_spec_from_json(&args.name.value(), &json)
            .map_err(|e| syn::Error::new_spanned(&args.abi, e.to_string()))?;
        generate_host_tokens(&spec, &config)
    }
    .map_err(|e| syn::Error::new_spanned(&args.name, e.to_string()))?;

    // Rebuild when the ABI file changes
    let tracked = path.to_string_lossy().into_owned();
    Ok(quote! {
        const _: &str = ::std::include_str!(#tracked);
        #bindings
    })
}
