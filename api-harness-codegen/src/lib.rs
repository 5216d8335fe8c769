use proc_macro::TokenStream;
use proc_macro2::Span;
use quote::{format_ident, quote, quote_spanned};

/// Turns `async fn name(session: &TestSession)` into a live API `#[test]`.
///
/// ```ignore
/// #[api_test("smoke, user_retrieval", reqres_suite::session)]
/// async fn test_get_user_list(session: &TestSession) { ... }
/// ```
///
/// The first argument lists the test's markers, the second is a function returning
/// `Result<Arc<TestSession>, api_harness::Error>`. The test only runs when its markers are
/// selected through `API_TEST_MARKERS`.
#[proc_macro_attribute]
pub fn api_test(attrs: TokenStream, item: TokenStream) -> TokenStream {
    let input = syn::parse_macro_input!(item as syn::ItemFn);
    let args = syn::parse_macro_input!(attrs as syn::AttributeArgs);

    if args.len() != 2 {
        return quote! {
            compile_error!("A marker list and a session function should be passed to the macro");
        }
        .into();
    }

    let markers = if let syn::NestedMeta::Lit(syn::Lit::Str(parsed_markers)) = &args[0] {
        match parse_markers(&parsed_markers.value(), parsed_markers.span()) {
            Ok(markers) => markers,
            Err(stream) => return stream.into(),
        }
    } else {
        return quote! {
            compile_error!("The first argument should be a string literal!");
        }
        .into();
    };

    let session_function = if let syn::NestedMeta::Meta(syn::Meta::Path(function_path)) = &args[1]
    {
        function_path
    } else {
        return quote! {
            compile_error!("The second argument should be a session function!");
        }
        .into();
    };

    if input.sig.asyncness.is_none() {
        return quote_spanned! {input.sig.fn_token.span=>
            compile_error!("The test function should be async!");
        }
        .into();
    }

    if input.sig.inputs.len() != 1 {
        return quote_spanned! {input.sig.ident.span()=>
            compile_error!("The test function should take the test session as its only argument!");
        }
        .into();
    }

    let name = &input.sig.ident;
    let attributes = &input.attrs;
    let visibility = &input.vis;

    let mut body_function = input.clone();
    body_function.attrs.clear();
    body_function.vis = syn::Visibility::Inherited;
    body_function.sig.ident = format_ident!("__{}_body", name);
    let body_name = &body_function.sig.ident;

    let finish = match &input.sig.output {
        syn::ReturnType::Default => quote! {
            let () = __api_test_outcome;
        },
        syn::ReturnType::Type(_, _) => quote! {
            if let Err(e) = __api_test_outcome {
                panic!("API test failed: {}", e);
            }
        },
    };

    let output = quote! {
        #(#attributes)*
        #[test]
        #visibility fn #name() {
            #body_function

            api_harness::logging::init();
            match api_harness::markers::is_selected(stringify!(#name), &[#(#markers),*]) {
                Ok(true) => {}
                Ok(false) => return,
                Err(e) => panic!("API test error: {}", e),
            }

            let __api_test_session = match #session_function() {
                Ok(session) => session,
                Err(e) => panic!("API test session error: {}", e),
            };

            let __api_test_outcome = match api_harness::block_on(#body_name(&__api_test_session)) {
                Ok(outcome) => outcome,
                Err(e) => panic!("API test runtime error: {}", e),
            };
            #finish
        }
    };

    TokenStream::from(output)
}

fn parse_markers(markers: &str, span: Span) -> Result<Vec<String>, proc_macro2::TokenStream> {
    let markers = markers
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|marker| !marker.is_empty())
        .map(String::from)
        .collect::<Vec<_>>();

    if markers.is_empty() {
        return Err(quote_spanned! {span=>
            compile_error!("At least one marker should be given!");
        });
    }

    if let Some(invalid) = markers.iter().find(|marker| !is_valid_marker(marker)) {
        let message = format!(
            "\"{}\" is not a valid marker, use lower-case letters, digits and underscores",
            invalid
        );
        return Err(quote_spanned! {span=>
            compile_error!(#message);
        });
    }

    Ok(markers)
}

fn is_valid_marker(marker: &str) -> bool {
    let mut chars = marker.chars();

    matches!(chars.next(), Some(first) if first.is_ascii_lowercase())
        && chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
}
