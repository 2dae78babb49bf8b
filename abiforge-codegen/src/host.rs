//! Host binding emitter: one struct per contract, generic over the backend.

use abiforge_core::spec::{ContractSpec, FunctionSpec, ParameterSpec};
use proc_macro2::{Ident, TokenStream as TokenStream2};
use quote::{format_ident, quote};

use crate::embed::{generate_constants, EmbeddedBuild};
use crate::rust_types::{rust_type, to_abi_value};

/// Generate the binding struct and its impl block. With `build`, the ABI
/// and bytecode are compiled in instead of coming from the backend registry.
pub fn generate_host(
    spec: &ContractSpec,
    struct_name: &Ident,
    rt: &syn::Path,
    build: Option<&EmbeddedBuild>,
) -> TokenStream2 {
    let contract_name = &spec.name;
    let struct_doc = format!(" Bindings for the `{}` contract.", contract_name);

    let constants = build.map(|build| generate_constants(build, rt));
    let (new_doc, load_abi) = match build {
        Some(_) => (
            " Bind the compiled-in ABI and, when an address is given, the deployed contract.",
            quote! { Self::embedded_abi() },
        ),
        None => (
            " Load the ABI from the backend's registry and, when an address is given, bind the deployed contract.",
            quote! { backend.load_abi(&contract_name)? },
        ),
    };
    let deploy_fn = generate_deploy(&spec.constructor, rt, build.is_some());
    let method_fns: Vec<TokenStream2> = spec
        .functions
        .iter()
        .map(|f| generate_method(f, rt))
        .collect();

    quote! {
        #[doc = #struct_doc]
        pub struct #struct_name<B: #rt::ContractBackend> {
            backend: B,
            contract_name: ::std::string::String,
            address: ::std::option::Option<#rt::Address>,
            contract: ::std::option::Option<B::Contract>,
            abi: #rt::serde_json::Value,
        }

        impl<B: #rt::ContractBackend> #struct_name<B> {
            #constants

            #[doc = #new_doc]
            pub fn new(
                backend: B,
                contract_address: ::std::option::Option<#rt::Address>,
            ) -> ::std::result::Result<Self, B::Error> {
                let contract_name = ::std::string::String::from(#contract_name);
                let abi = #load_abi;
                let contract = match contract_address {
                    ::std::option::Option::Some(address) => {
                        ::std::option::Option::Some(backend.contract_at(&contract_name, address, &abi)?)
                    }
                    ::std::option::Option::None => ::std::option::Option::None,
                };
                ::std::result::Result::Ok(Self {
                    backend,
                    contract_name,
                    address: contract_address,
                    contract,
                    abi,
                })
            }

            pub fn contract_name(&self) -> &str {
                &self.contract_name
            }

            pub fn address(&self) -> ::std::option::Option<#rt::Address> {
                self.address
            }

            pub fn abi(&self) -> &#rt::serde_json::Value {
                &self.abi
            }

            pub fn backend(&self) -> &B {
                &self.backend
            }

            #deploy_fn

            /// Publish the contract source through the backend.
            pub fn verify_contract(&self) -> ::std::result::Result<(), B::Error> {
                let contract = self.assert_contract_is_instantiated()?;
                self.backend.publish_source(contract)
            }

            fn assert_contract_is_instantiated(
                &self,
            ) -> ::std::result::Result<&B::Contract, #rt::NotInstantiatedError> {
                self.contract
                    .as_ref()
                    .ok_or_else(|| #rt::NotInstantiatedError::new(self.contract_name.as_str()))
            }

            #(#method_fns)*
        }
    }
}

fn arg_idents(inputs: &[ParameterSpec]) -> Vec<Ident> {
    inputs.iter().map(|p| format_ident!("{}", p.method_name)).collect()
}

/// `name: Type` pairs for a method signature.
fn params(inputs: &[ParameterSpec], rt: &syn::Path) -> Vec<TokenStream2> {
    inputs
        .iter()
        .zip(arg_idents(inputs))
        .map(|(p, ident)| {
            let ty = rust_type(&p.ty, rt);
            quote! { #ident: #ty }
        })
        .collect()
}

/// The `AbiValue` list handed to the backend, in ABI order.
fn abi_args(inputs: &[ParameterSpec], rt: &syn::Path) -> TokenStream2 {
    let values: Vec<TokenStream2> = inputs
        .iter()
        .zip(arg_idents(inputs))
        .map(|(p, ident)| to_abi_value(&p.ty, quote! { #ident }, rt))
        .collect();
    quote! { ::std::vec![#(#values),*] }
}

fn generate_deploy(constructor: &FunctionSpec, rt: &syn::Path, embedded: bool) -> TokenStream2 {
    let params = params(&constructor.inputs, rt);
    let args = abi_args(&constructor.inputs, rt);
    let doc = format!(" Deploy a new instance: `{}`.", constructor.signature);
    let deployment = if embedded {
        quote! {
            self.backend.deploy_bytecode(
                &self.contract_name,
                &self.abi,
                Self::BYTECODE,
                args,
                transaction_config,
            )?
        }
    } else {
        quote! {
            self.backend
                .deploy(&self.contract_name, &self.abi, args, transaction_config)?
        }
    };
    quote! {
        #[doc = #doc]
        pub fn deploy(
            &mut self,
            #(#params,)*
            transaction_config: &#rt::TransactionConfig<B::Signer>,
        ) -> ::std::result::Result<B::Receipt, B::Error> {
            let args: ::std::vec::Vec<#rt::AbiValue> = #args;
            let deployment = #deployment;
            self.address = ::std::option::Option::Some(deployment.address);
            self.contract = ::std::option::Option::Some(deployment.contract);
            ::std::result::Result::Ok(deployment.receipt)
        }
    }
}

fn generate_method(function: &FunctionSpec, rt: &syn::Path) -> TokenStream2 {
    let method = format_ident!("{}", function.method_name);
    let params = params(&function.inputs, rt);
    let args = abi_args(&function.inputs, rt);
    let signature = &function.signature;
    let doc = format!(" `{}` ({})", signature, function.mutability.as_str());

    if function.is_read() {
        quote! {
            #[doc = #doc]
            pub fn #method(
                &self,
                #(#params,)*
                block_number: ::std::option::Option<#rt::BlockIdentifier>,
            ) -> ::std::result::Result<::std::vec::Vec<#rt::AbiValue>, B::Error> {
                let contract = self.assert_contract_is_instantiated()?;
                let args: ::std::vec::Vec<#rt::AbiValue> = #args;
                self.backend
                    .call(contract, #signature, args, block_number.unwrap_or_default())
            }
        }
    } else {
        quote! {
            #[doc = #doc]
            pub fn #method(
                &self,
                #(#params,)*
                transaction_config: &#rt::TransactionConfig<B::Signer>,
            ) -> ::std::result::Result<B::Receipt, B::Error> {
                let contract = self.assert_contract_is_instantiated()?;
                let args: ::std::vec::Vec<#rt::AbiValue> = #args;
                self.backend.transact(contract, #signature, args, transaction_config)
            }
        }
    }
}
