//! CLI emitter: a clap command tree plus the dispatch that calls into the
//! binding struct.
//!
//! Output lives in its own module so the derive expansions can reach clap
//! through the runtime crate:
//!
//! ```rust,ignore
//! pub mod token_cli {
//!     use super::*;
//!     use ::abiforge_cli::clap;
//!
//!     pub struct TokenCli { command: TokenCommand }
//!     pub enum TokenCommand { Deploy { .. }, VerifyContract { .. }, BalanceOf { .. }, .. }
//!     impl TokenCli { pub fn run<N: Network>(self, network: &N) -> Result<(), ..> }
//! }
//! pub use token_cli::{TokenCli, TokenCommand};
//! ```

use std::collections::HashMap;

use abiforge_core::error::AbiError;
use abiforge_core::naming::{to_snake_case, variant_name};
use abiforge_core::spec::{CliConverter, ContractSpec, FunctionSpec, ParameterSpec};
use proc_macro2::{Ident, TokenStream as TokenStream2};
use quote::{format_ident, quote};

use crate::rust_types::{element_type, rust_type};

/// Generate the CLI module for `spec`, dispatching to `struct_name`.
pub fn generate_cli(
    spec: &ContractSpec,
    struct_name: &Ident,
    rt: &syn::Path,
) -> Result<TokenStream2, AbiError> {
    let cli_name = format_ident!("{}Cli", struct_name);
    let command_name = format_ident!("{}Command", struct_name);
    let module_name = format_ident!("{}_cli", to_snake_case(&struct_name.to_string()));
    let about = format!("Command-line interface for the {} contract", spec.name);

    let mut variants: HashMap<String, String> = HashMap::new();
    variants.insert("Deploy".to_string(), "deploy".to_string());
    variants.insert("VerifyContract".to_string(), "verify-contract".to_string());

    let mut variant_defs = vec![generate_deploy_variant(&spec.constructor, rt)];
    let mut match_arms = vec![generate_deploy_arm(&spec.constructor, struct_name, &command_name, rt)];
    variant_defs.push(quote! {
        /// Publish the contract source to the network's explorer
        #[command(name = "verify-contract")]
        VerifyContract {
            #[command(flatten)]
            call: #rt::CallArgs,
        },
    });
    match_arms.push(quote! {
        #command_name::VerifyContract { call } => {
            let backend = network.connect(&call.network)?;
            let contract = #struct_name::new(backend, call.address)?;
            contract.verify_contract()?;
            ::std::println!("✅ Source published for {}", contract.contract_name());
            ::std::result::Result::Ok(())
        }
    });

    for function in &spec.functions {
        let variant = variant_name(&function.cli_name);
        if let Some(first) = variants.insert(variant.clone(), function.cli_name.clone()) {
            return Err(AbiError::NameCollision {
                scope: format!("CLI command variants of {}", spec.name),
                name: variant,
                first,
                second: function.cli_name.clone(),
            });
        }
        let variant = syn::parse_str::<Ident>(&variant).map_err(|_| {
            AbiError::malformed(format!(
                "CLI command variant '{}' for {} is not a Rust identifier",
                variant, function.abi_name
            ))
        })?;
        variant_defs.push(generate_function_variant(function, &variant, rt));
        match_arms.push(generate_function_arm(function, &variant, struct_name, &command_name, rt));
    }

    Ok(quote! {
        pub mod #module_name {
            use super::*;
            use #rt::clap;

            #[derive(clap::Parser, Debug)]
            #[command(about = #about)]
            pub struct #cli_name {
                #[command(subcommand)]
                pub command: #command_name,
            }

            #[derive(clap::Subcommand, Debug)]
            pub enum #command_name {
                #(#variant_defs)*
            }

            impl #cli_name {
                /// Connect to the requested network and run the subcommand.
                pub fn run<N: #rt::Network>(
                    self,
                    network: &N,
                ) -> ::std::result::Result<(), <N::Backend as #rt::ContractBackend>::Error> {
                    match self.command {
                        #(#match_arms)*
                    }
                }
            }
        }

        pub use #module_name::{#cli_name, #command_name};
    })
}

/// clap value parser expression for a converter.
fn value_parser(converter: &CliConverter, rt: &syn::Path) -> TokenStream2 {
    match converter {
        CliConverter::Integer { signed: false, bits } => quote! { #rt::parse::uint_parser(#bits) },
        CliConverter::Integer { signed: true, bits } => quote! { #rt::parse::int_parser(#bits) },
        CliConverter::Boolean => quote! { #rt::parse::boolean },
        CliConverter::Address => quote! { #rt::parse::address },
        CliConverter::Bytes { size: Some(size) } => {
            quote! { #rt::parse::bytes_parser(::std::option::Option::Some(#size)) }
        }
        CliConverter::Bytes { size: None } => {
            quote! { #rt::parse::bytes_parser(::std::option::Option::None) }
        }
        CliConverter::Text => quote! { #rt::parse::text },
        CliConverter::Literal { signature } => quote! { #rt::parse::literal_parser(#signature) },
        CliConverter::Variadic { element, .. } => value_parser(element, rt),
    }
}

/// One `--flag` field per ABI input.
fn arg_fields(inputs: &[ParameterSpec], rt: &syn::Path) -> Vec<TokenStream2> {
    inputs
        .iter()
        .map(|p| {
            let ident = format_ident!("{}", p.method_name);
            let flag = &p.cli_flag;
            let help = format!("Type: {}", p.abi_type);
            let parser = value_parser(&p.converter, rt);
            match &p.converter {
                CliConverter::Variadic { length, .. } => {
                    let element = p.ty.element().map(|e| element_type(e, rt)).unwrap_or_default();
                    let num_args = match length {
                        Some(n) => quote! { #n },
                        None => quote! { 1.. },
                    };
                    quote! {
                        #[arg(long = #flag, required = true, num_args = #num_args, help = #help, value_parser = #parser)]
                        #ident: Vec<#element>,
                    }
                }
                CliConverter::Boolean => quote! {
                    #[arg(long = #flag, required = true, action = clap::ArgAction::Set, help = #help, value_parser = #parser)]
                    #ident: bool,
                },
                _ => {
                    let ty = rust_type(&p.ty, rt);
                    quote! {
                        #[arg(long = #flag, required = true, help = #help, value_parser = #parser)]
                        #ident: #ty,
                    }
                }
            }
        })
        .collect()
}

fn arg_idents(inputs: &[ParameterSpec]) -> Vec<Ident> {
    inputs.iter().map(|p| format_ident!("{}", p.method_name)).collect()
}

fn generate_deploy_variant(constructor: &FunctionSpec, rt: &syn::Path) -> TokenStream2 {
    let fields = arg_fields(&constructor.inputs, rt);
    quote! {
        /// Deploy a new instance of the contract
        #[command(name = "deploy")]
        Deploy {
            #[command(flatten)]
            transact: #rt::TransactArgs,
            #(#fields)*
        },
    }
}

fn generate_deploy_arm(
    constructor: &FunctionSpec,
    struct_name: &Ident,
    command_name: &Ident,
    rt: &syn::Path,
) -> TokenStream2 {
    let args = arg_idents(&constructor.inputs);
    quote! {
        #command_name::Deploy { transact, #(#args),* } => {
            let backend = network.connect(&transact.network)?;
            let transaction_config = transact.transaction_config(&backend)?;
            let mut contract = #struct_name::new(backend, ::std::option::Option::None)?;
            let receipt = contract.deploy(#(#args,)* &transaction_config)?;
            ::std::println!("{}", receipt);
            if transact.verbose {
                ::std::println!("{}", #rt::Receipt::info(&receipt));
            }
            ::std::result::Result::Ok(())
        }
    }
}

fn generate_function_variant(function: &FunctionSpec, variant: &Ident, rt: &syn::Path) -> TokenStream2 {
    let command = &function.cli_name;
    let about = format!("Call {} ({})", function.signature, function.mutability.as_str());
    let fields = arg_fields(&function.inputs, rt);
    let common = if function.is_read() {
        quote! { call: #rt::CallArgs, }
    } else {
        quote! { transact: #rt::TransactArgs, }
    };
    quote! {
        #[command(name = #command, about = #about)]
        #variant {
            #[command(flatten)]
            #common
            #(#fields)*
        },
    }
}

fn generate_function_arm(
    function: &FunctionSpec,
    variant: &Ident,
    struct_name: &Ident,
    command_name: &Ident,
    rt: &syn::Path,
) -> TokenStream2 {
    let method = format_ident!("{}", function.method_name);
    let args = arg_idents(&function.inputs);
    if function.is_read() {
        quote! {
            #command_name::#variant { call, #(#args),* } => {
                let backend = network.connect(&call.network)?;
                let contract = #struct_name::new(backend, call.address)?;
                let result = contract.#method(#(#args,)* ::std::option::Option::Some(call.block_number))?;
                ::std::println!("{}", #rt::format_outputs(&result));
                ::std::result::Result::Ok(())
            }
        }
    } else {
        quote! {
            #command_name::#variant { transact, #(#args),* } => {
                let backend = network.connect(&transact.network)?;
                let transaction_config = transact.transaction_config(&backend)?;
                let contract = #struct_name::new(backend, transact.address)?;
                let receipt = contract.#method(#(#args,)* &transaction_config)?;
                ::std::println!("{}", receipt);
                if transact.verbose {
                    ::std::println!("{}", #rt::Receipt::info(&receipt));
                }
                ::std::result::Result::Ok(())
            }
        }
    }
}
