use proc_macro::TokenStream;
use quote::quote;
use syn::{ItemFn, parse_macro_input, parse_quote};

/// Test attribute macro that sets up tracing before running the test.
///
/// # Usage
///
/// Basic usage (uses `#[test]`):
/// ```ignore
/// #[loose_json_testhelpers::test]
/// fn my_test() {
///     // tracing is set up automatically
/// }
/// ```
///
/// With a custom test attribute:
/// ```ignore
/// #[loose_json_testhelpers::test(tokio::test)]
/// async fn my_async_test() {}
/// ```
#[proc_macro_attribute]
pub fn test(attr: TokenStream, item: TokenStream) -> TokenStream {
    let mut func = parse_macro_input!(item as ItemFn);

    let test_attr = if attr.is_empty() {
        quote! { #[::core::prelude::rust_2024::test] }
    } else {
        let attr = proc_macro2::TokenStream::from(attr);
        quote! { #[#attr] }
    };

    let body = &func.block;
    func.block = parse_quote! {{
        ::loose_json_testhelpers::setup();

        #body
    }};

    quote! {
        #test_attr
        #func
    }
    .into()
}
