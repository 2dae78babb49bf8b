//! ABI types as Rust types, and the expressions that turn typed arguments
//! back into `AbiValue`s.

use abiforge_core::types::{ElementaryType, TypeDescriptor};
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;

/// Type of a binding argument.
///
/// Byte strings and arrays use the fully qualified `::std::vec::Vec` so a
/// clap derive never mistakes a single `bytes` value for a list.
pub fn rust_type(ty: &TypeDescriptor, rt: &syn::Path) -> TokenStream2 {
    match ty {
        TypeDescriptor::Elementary(e) => elementary_type(e, rt),
        TypeDescriptor::FixedArray(element, _) | TypeDescriptor::DynamicArray(element) => {
            let inner = element_type(element, rt);
            quote! { ::std::vec::Vec<#inner> }
        }
        TypeDescriptor::Tuple(_) => quote! { #rt::AbiValue },
    }
}

/// Type of one array element: nested arrays and tuples stay dynamic.
pub fn element_type(element: &TypeDescriptor, rt: &syn::Path) -> TokenStream2 {
    if element.is_array() || element.is_tuple() {
        quote! { #rt::AbiValue }
    } else {
        rust_type(element, rt)
    }
}

fn elementary_type(e: &ElementaryType, rt: &syn::Path) -> TokenStream2 {
    match e {
        ElementaryType::Uint(_) => quote! { #rt::U256 },
        ElementaryType::Int(_) => quote! { #rt::I256 },
        ElementaryType::Address => quote! { #rt::Address },
        ElementaryType::Bool => quote! { bool },
        ElementaryType::FixedBytes(_) | ElementaryType::Bytes => quote! { ::std::vec::Vec<u8> },
        ElementaryType::String => quote! { ::std::string::String },
    }
}

/// Expression converting `value` (of [`rust_type`]) into an `AbiValue`.
pub fn to_abi_value(ty: &TypeDescriptor, value: TokenStream2, rt: &syn::Path) -> TokenStream2 {
    match ty {
        TypeDescriptor::Elementary(e) => {
            let variant = match e {
                ElementaryType::Uint(_) => quote! { Uint },
                ElementaryType::Int(_) => quote! { Int },
                ElementaryType::Address => quote! { Address },
                ElementaryType::Bool => quote! { Bool },
                ElementaryType::FixedBytes(_) => quote! { FixedBytes },
                ElementaryType::Bytes => quote! { Bytes },
                ElementaryType::String => quote! { String },
            };
            quote! { #rt::AbiValue::#variant(#value) }
        }
        TypeDescriptor::FixedArray(element, _) => {
            let items = items_to_abi_values(element, value, rt);
            quote! { #rt::AbiValue::FixedArray(#items) }
        }
        TypeDescriptor::DynamicArray(element) => {
            let items = items_to_abi_values(element, value, rt);
            quote! { #rt::AbiValue::Array(#items) }
        }
        TypeDescriptor::Tuple(_) => value,
    }
}

fn items_to_abi_values(element: &TypeDescriptor, value: TokenStream2, rt: &syn::Path) -> TokenStream2 {
    if element.is_array() || element.is_tuple() {
        // Already `AbiValue`s
        return value;
    }
    let item = to_abi_value(element, quote! { item }, rt);
    quote! { #value.into_iter().map(|item| #item).collect() }
}
