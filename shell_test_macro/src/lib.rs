extern crate proc_macro;
use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{parse::Parser, parse_macro_input, Expr, FnArg, ItemFn, Pat};

/// Turns a function taking `&mut ShellEmulator` into a test running in a fresh session.
///
/// ```ignore
/// #[shell_test(config = CONFIG)]
/// fn mkdir_creates_directory(shell: &mut ShellEmulator) -> shell_emulator::Result<()> {
///     shell.mkdir("docs")?;
///     Ok(())
/// }
/// ```
///
/// `config` accepts a string literal or a constant. Without it the session root is an
/// empty temporary directory.
#[proc_macro_attribute]
pub fn shell_test(attr: TokenStream, item: TokenStream) -> TokenStream {
    let input_fn = parse_macro_input!(item as ItemFn);
    let fn_name = &input_fn.sig.ident;
    let fn_attrs = &input_fn.attrs;
    let fn_block = &input_fn.block;

    let attr_parser = |stream: TokenStream2| -> Result<Option<Expr>, syn::Error> {
        let mut config = None;

        let parser = syn::meta::parser(|meta| {
            if meta.path.is_ident("config") {
                config = Some(meta.value()?.parse::<Expr>()?);
            } else {
                return Err(meta.error("unsupported attribute"));
            }
            Ok(())
        });

        parser.parse2(stream)?;
        Ok(config)
    };

    let config = match attr_parser(attr.into()) {
        Ok(Some(config)) => quote! { #config },
        Ok(None) => quote! { "root: !sandbox\n  name: shell_test\n" },
        Err(err) => return err.to_compile_error().into(),
    };

    // The test body sees the emulator under the name and type of its only argument.
    let fn_output = &input_fn.sig.output;

    let (shell_ident, shell_ty) = match input_fn.sig.inputs.first() {
        Some(FnArg::Typed(arg)) => match arg.pat.as_ref() {
            Pat::Ident(pat) if input_fn.sig.inputs.len() == 1 => (pat.ident.clone(), &arg.ty),
            _ => {
                return syn::Error::new_spanned(
                    &arg.pat,
                    "shell_test expects a single `name: &mut ShellEmulator` argument",
                )
                .to_compile_error()
                .into()
            }
        },
        _ => {
            return syn::Error::new_spanned(
                &input_fn.sig,
                "shell_test expects a single `name: &mut ShellEmulator` argument",
            )
            .to_compile_error()
            .into()
        }
    };

    let expanded = quote! {
        #[test]
        #(#fn_attrs)*
        fn #fn_name() {
            let config_str: &str = #config;

            let mut emulator = ::shell_emulator::ShellEmulator::from_config_str(config_str)
                .expect("shell_test configuration should build a session");

            emulator.perform_shell_test(
                |#shell_ident: #shell_ty| #fn_output #fn_block,
            );
        }
    };

    TokenStream::from(expanded)
}
