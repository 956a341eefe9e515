//! Derive macro for `loose_json::Record`.

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

mod derive;

/// Generates the record shape and field accessors for a struct with named
/// fields.
///
/// Recognised field attributes:
/// - `#[loose(rename = "key")]`: the external key name
/// - `#[loose(skip)]`: never decode or encode this field
#[proc_macro_derive(Record, attributes(loose))]
pub fn derive_record(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    derive::expand(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}
