//! Defines the Tweenkit runtime macros.

#![doc(test(
    no_crate_inject,
    attr(deny(warnings, rust_2018_idioms), allow(dead_code, unused_variables))
))]

extern crate proc_macro;

use proc_macro::TokenStream;

use quote::quote;
use syn::{parse_macro_input, ItemFn};

/// Macro definition for the Tweenkit runtime.
///
/// This macro should be used once only in a project.
/// This macro requires `tokio` as a dependency (re-exported as `tweenkit::utils::tokio`).
///
/// _Executes the entire function in a blocking thread and provides synchronization for waiting on
/// all subsequently and dynamically created tasks (using `task::run`)._
///
/// # Example
/// ```
/// # #[allow(unused_imports)]
/// # use tweenkit::utils::tokio;
/// #[tweenkit_macros::runtime]
/// async fn main() {
///     // whatever
/// }
/// ```
#[proc_macro_attribute]
pub fn runtime(_: TokenStream, item: TokenStream) -> TokenStream {
    macro_inner(item, false)
}

/// Same as `#[tweenkit_macros::runtime]` but for tests: the test body runs inside a tokio
/// runtime and tests are serialized (the task channel is a global).
#[proc_macro_attribute]
pub fn test(_: TokenStream, item: TokenStream) -> TokenStream {
    macro_inner(item, true)
}

fn macro_inner(item: TokenStream, test: bool) -> TokenStream {
    let tweenkit = tweenkit_crate_path();

    let input = parse_macro_input!(item as ItemFn);
    let ItemFn {
        attrs,
        vis,
        sig,
        block,
    } = input;

    // Define the #[tokio::main] / #[tokio::test] tokio macro attribute.
    let tokio_main_attr = match test {
        true => quote! {
            #[#tweenkit::utils::tokio::test]
            #[::serial_test::serial]
        },
        false => quote! {
            #[#tweenkit::utils::tokio::main]
        },
    };

    let modified_block = quote! {
        {
            // Prepare the global channel used to track dynamically spawned tasks.
            #tweenkit::utils::task::init_task_channel().await;

            let result = #block;

            // Wait for all dynamically spawned tasks to complete.
            #tweenkit::utils::task::wait_for_all_tasks().await;

            result
        }
    };

    // Reconstruct the function with the modified block.
    let output = quote! {
        #tokio_main_attr
        #(#attrs)*
        #vis #sig
        #modified_block
    };

    output.into()
}

/// Path used to refer to the `tweenkit` crate in generated code.
///
/// The library itself aliases `self` as `tweenkit` in test builds, so the external path
/// resolves everywhere: unit tests, integration tests, doctests and downstream crates.
fn tweenkit_crate_path() -> syn::Path {
    syn::parse_quote!(::tweenkit)
}
